// Copyright (c) 2025, Jason Jenkins
// SPDX-License-Identifier: BSD-3-Clause

//! Core data model: hotspot records and the aggregate state.

pub mod hotspot;
pub mod state;

pub use hotspot::{Hotspot, Position};
pub use state::State;
