// Copyright (c) 2025, Jason Jenkins
// SPDX-License-Identifier: BSD-3-Clause

//! Main application state and egui App implementation.
//!
//! This module hosts a hotspot session: it forwards canvas pointer activity
//! to the session's surface, routes panel edits through the session's
//! operations and renders from the session's state each frame.

use crate::ui::{canvas, properties, toolbar};
use hotspots::io::media::LoadedImage;
use hotspots::surface::CursorHint;
use hotspots::HotspotSession;
use std::cell::RefCell;
use std::path::PathBuf;
use std::rc::Rc;
use std::sync::mpsc::{channel, Receiver, TryRecvError};

/// Main application state.
pub struct HotspotApp {
    /// Hotspot store, placement mode and persistence
    session: HotspotSession,

    /// Pointer hint shared with the session's placement mode
    hint: Rc<RefCell<CursorHint>>,

    /// Id of the currently selected hotspot
    selected: Option<String>,

    /// Loaded image texture for display
    image_texture: Option<egui::TextureHandle>,

    /// Image dimensions (width, height)
    image_size: Option<(u32, u32)>,

    /// Receiver for background image loading
    image_loader: Option<Receiver<Result<LoadedImage, String>>>,

    /// Loading state message
    loading_message: Option<String>,

    /// Latest error shown in the status bar
    status_error: Option<String>,
}

impl HotspotApp {
    /// Create the app around a session built with `hint` as its pointer hint.
    pub fn new(session: HotspotSession, hint: Rc<RefCell<CursorHint>>) -> Self {
        Self {
            session,
            hint,
            selected: None,
            image_texture: None,
            image_size: None,
            image_loader: None,
            loading_message: None,
            status_error: None,
        }
    }

    /// Export hotspots to a file.
    fn export_hotspots(&mut self, path: PathBuf) {
        let state = self.session.state();
        let extension = path.extension().and_then(|s| s.to_str());
        let result = match extension {
            Some("yaml") | Some("yml") => {
                hotspots::io::serialization::export_yaml(state.hotspots(), &path)
            }
            Some("json") => hotspots::io::serialization::export_json(state.hotspots(), &path),
            _ => {
                log::error!("Unsupported file extension: {:?}", extension);
                return;
            }
        };

        match result {
            Ok(_) => log::info!("Exported {} hotspots to {}", state.hotspots().len(), path.display()),
            Err(e) => {
                log::error!("Failed to export hotspots: {}", e);
                self.status_error = Some(format!("Export failed: {}", e));
            }
        }
    }

    /// Load an image file to use as the surface (asynchronously).
    fn load_image_file(&mut self, path: PathBuf) {
        let (sender, receiver) = channel();
        self.image_loader = Some(receiver);
        self.loading_message = Some("Loading image...".to_string());

        std::thread::spawn(move || {
            let result = hotspots::io::media::load_image(&path)
                .map_err(|e| format!("Failed to load image: {}", e));
            if let Ok(ref loaded) = result {
                log::info!("Loaded image: {} ({}x{})", path.display(), loaded.width, loaded.height);
            }
            let _ = sender.send(result);
        });
    }

    fn poll_image_loader(&mut self, ctx: &egui::Context) {
        let Some(ref receiver) = self.image_loader else {
            return;
        };
        let result = match receiver.try_recv() {
            Ok(result) => result,
            Err(TryRecvError::Empty) => return,
            Err(TryRecvError::Disconnected) => Err("Image loader stopped without a result".to_string()),
        };
        self.image_loader = None;
        self.loading_message = None;

        match result {
            Ok(loaded) => {
                let size = [loaded.width as usize, loaded.height as usize];
                let color_image = egui::ColorImage::from_rgba_unmultiplied(size, &loaded.pixels);
                let texture = ctx.load_texture("surface_image", color_image, egui::TextureOptions::LINEAR);
                self.image_texture = Some(texture);
                self.image_size = Some((loaded.width, loaded.height));
            }
            Err(e) => {
                log::error!("{}", e);
                self.status_error = Some(e);
            }
        }
    }

    fn show_menu(&mut self, ctx: &egui::Context) {
        egui::TopBottomPanel::top("menu_bar").show(ctx, |ui| {
            egui::menu::bar(ui, |ui| {
                ui.menu_button("File", |ui| {
                    if ui.button("Open Image...").clicked() {
                        if let Some(path) = rfd::FileDialog::new()
                            .add_filter("Images", &["jpg", "jpeg", "png", "bmp", "tiff", "tif"])
                            .pick_file()
                        {
                            self.load_image_file(path);
                        }
                        ui.close_menu();
                    }
                    ui.separator();
                    ui.menu_button("Export Hotspots", |ui| {
                        if ui.button("Export as YAML...").clicked() {
                            if let Some(path) = rfd::FileDialog::new()
                                .add_filter("YAML", &["yaml", "yml"])
                                .set_file_name("hotspots.yaml")
                                .save_file()
                            {
                                self.export_hotspots(path);
                            }
                            ui.close_menu();
                        }
                        if ui.button("Export as JSON...").clicked() {
                            if let Some(path) = rfd::FileDialog::new()
                                .add_filter("JSON", &["json"])
                                .set_file_name("hotspots.json")
                                .save_file()
                            {
                                self.export_hotspots(path);
                            }
                            ui.close_menu();
                        }
                    });
                    ui.separator();
                    if ui.button("Quit").clicked() {
                        ctx.send_viewport_cmd(egui::ViewportCommand::Close);
                    }
                });
            });
        });
    }
}

impl eframe::App for HotspotApp {
    fn update(&mut self, ctx: &egui::Context, _frame: &mut eframe::Frame) {
        self.poll_image_loader(ctx);
        if self.loading_message.is_some() {
            ctx.request_repaint();
        }

        for error in self.session.take_persist_errors() {
            self.status_error = Some(format!("Could not save hotspots: {}", error));
        }

        let state = self.session.state();
        let actions = self.session.actions().clone();

        // Drop a selection whose hotspot is gone
        if self
            .selected
            .as_deref()
            .is_some_and(|id| state.hotspot(id).is_none())
        {
            self.selected = None;
        }

        self.show_menu(ctx);

        let toolbar_action = egui::TopBottomPanel::top("toolbar")
            .show(ctx, |ui| toolbar::show(ui, state.is_pointing(), state.hotspots().len()))
            .inner;
        match toolbar_action {
            toolbar::ToolbarAction::StartPlacing => {
                self.selected = None;
                actions.toggle_is_pointing().call(Some(true));
            }
            toolbar::ToolbarAction::CancelPlacing => actions.toggle_is_pointing().call(None),
            toolbar::ToolbarAction::None => {}
        }

        egui::TopBottomPanel::bottom("status_bar").show(ctx, |ui| {
            ui.horizontal(|ui| {
                let dismissed = match &self.status_error {
                    Some(error) => {
                        ui.label(egui::RichText::new(error).color(egui::Color32::LIGHT_RED));
                        ui.small_button("Dismiss").clicked()
                    }
                    None => {
                        ui.label(format!("Saved under \"{}\"", self.session.storage_key()));
                        false
                    }
                };
                if dismissed {
                    self.status_error = None;
                }
            });
        });

        let properties_action = egui::SidePanel::right("properties")
            .default_width(250.0)
            .show(ctx, |ui| properties::show(ui, state.hotspots(), self.selected.as_deref()))
            .inner;
        match properties_action {
            properties::PropertiesAction::SelectHotspot(id) => self.selected = Some(id),
            properties::PropertiesAction::EditHotspot(hotspot) => actions.edit_hotspot().call(hotspot),
            properties::PropertiesAction::DeleteHotspot(id) => {
                actions.delete_hotspot().call(id);
                self.selected = None;
            }
            properties::PropertiesAction::None => {}
        }

        // Escape cancels placement mode
        if state.is_pointing() && ctx.input(|i| i.key_pressed(egui::Key::Escape)) {
            actions.toggle_is_pointing().call(None);
        }

        let primed = self.hint.borrow().primed();
        let canvas_action = egui::CentralPanel::default()
            .show(ctx, |ui| {
                if let Some(ref message) = self.loading_message {
                    ui.centered_and_justified(|ui| {
                        ui.vertical_centered(|ui| {
                            ui.spinner();
                            ui.label(egui::RichText::new(message).size(16.0));
                        });
                    });
                    return canvas::CanvasAction::None;
                }
                canvas::show(
                    ui,
                    canvas::CanvasView {
                        image_texture: &self.image_texture,
                        image_size: self.image_size,
                        hotspots: state.hotspots(),
                        selected: self.selected.as_deref(),
                        is_pointing: state.is_pointing(),
                        primed,
                    },
                )
            })
            .inner;

        match canvas_action {
            canvas::CanvasAction::PointerMove(position) => {
                self.session.surface().pointer_move(position.left, position.top);
            }
            canvas::CanvasAction::Click(position) => {
                self.session.surface().click(position.left, position.top);
                if !state.is_pointing() {
                    self.selected = None;
                }
            }
            canvas::CanvasAction::SelectHotspot(id) => self.selected = Some(id),
            canvas::CanvasAction::None => {}
        }

        // Select the hotspot a click just created
        let after = self.session.state();
        if after.hotspots().len() > state.hotspots().len() {
            if let Some(created) = after.hotspots().last() {
                self.selected = Some(created.id().to_string());
            }
        }
    }
}
