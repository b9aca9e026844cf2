// Copyright (c) 2025, Jason Jenkins
// SPDX-License-Identifier: BSD-3-Clause

//! Hotspot annotations over an image.
//!
//! The core is a small state machine: a pure transition function over four
//! actions, stable operation handles wrapping it, a placement mode that turns
//! the next surface click into a hotspot, and a sync that mirrors the hotspot
//! list into durable storage after every change.

pub mod config;
pub mod error;
pub mod hotspots;
pub mod io;
pub mod models;
pub mod surface;
pub mod util;

pub use config::Config;
pub use error::{ConfigError, StorageError};
pub use hotspots::{Action, Dispatcher, HotspotSession, PlacementMode, SessionBuilder};
pub use models::{Hotspot, Position, State};
