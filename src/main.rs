// Copyright (c) 2025, Jason Jenkins
// SPDX-License-Identifier: BSD-3-Clause

//! Hotspot editor
//!
//! A desktop application for placing, describing and persisting hotspot
//! annotations on an image.

mod app;
mod ui;

use anyhow::{Context, Result};
use app::HotspotApp;
use hotspots::config::{Config, CONFIG_ENV};
use hotspots::surface::CursorHint;
use hotspots::HotspotSession;
use std::cell::RefCell;
use std::path::PathBuf;
use std::rc::Rc;

fn main() -> Result<()> {
    // Initialize logging
    env_logger::init();

    let config_path = std::env::var_os(CONFIG_ENV).map(PathBuf::from);
    let config = Config::discover(config_path.as_deref()).context("Failed to load configuration")?;
    let storage = config.file_storage().context("Failed to open hotspot storage")?;
    log::info!("Storing hotspots under {}", storage.root().display());

    let hint = Rc::new(RefCell::new(CursorHint::new()));
    let session = HotspotSession::builder(storage)
        .config(&config)
        .hint(hint.clone())
        .build()
        .context("Failed to restore saved hotspots")?;
    let app = HotspotApp::new(session, hint);

    // Configure egui options
    let options = eframe::NativeOptions {
        viewport: egui::ViewportBuilder::default()
            .with_inner_size([1280.0, 720.0])
            .with_min_inner_size([800.0, 600.0])
            .with_title("Hotspots"),
        ..Default::default()
    };

    // Run the application
    eframe::run_native("Hotspots", options, Box::new(move |_cc| Ok(Box::new(app))))
        .map_err(|e| anyhow::anyhow!("Application error: {}", e))?;

    Ok(())
}
