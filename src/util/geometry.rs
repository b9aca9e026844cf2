// Copyright (c) 2025, Jason Jenkins
// SPDX-License-Identifier: BSD-3-Clause

//! Geometric utility functions.
//!
//! This module converts pointer positions between view coordinates (where
//! the surface is drawn, possibly scaled) and surface coordinates (what a
//! hotspot position records).

use crate::models::Position;

/// Where a surface of `surface_size` is drawn: top-left `origin` and
/// on-screen `display_size`, both in view coordinates.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct SurfaceView {
    pub origin: (f64, f64),
    pub display_size: (f64, f64),
    pub surface_size: (f64, f64),
}

impl SurfaceView {
    /// A view drawn at its natural size.
    pub fn unscaled(origin: (f64, f64), size: (f64, f64)) -> Self {
        Self {
            origin,
            display_size: size,
            surface_size: size,
        }
    }
}

/// Convert a view-space pointer to a surface position.
///
/// Returns `None` when the pointer is outside the displayed surface or the
/// view has no area.
pub fn to_surface(pointer_x: f64, pointer_y: f64, view: &SurfaceView) -> Option<Position> {
    let (width, height) = view.display_size;
    if width <= 0.0 || height <= 0.0 {
        return None;
    }

    let rel_x = (pointer_x - view.origin.0) / width;
    let rel_y = (pointer_y - view.origin.1) / height;
    if !(0.0..=1.0).contains(&rel_x) || !(0.0..=1.0).contains(&rel_y) {
        return None;
    }

    Some(Position {
        left: rel_x * view.surface_size.0,
        top: rel_y * view.surface_size.1,
    })
}

/// Convert a surface position back to view coordinates.
pub fn to_view(position: &Position, view: &SurfaceView) -> (f64, f64) {
    let (surface_w, surface_h) = view.surface_size;
    let scale_x = if surface_w > 0.0 { view.display_size.0 / surface_w } else { 0.0 };
    let scale_y = if surface_h > 0.0 { view.display_size.1 / surface_h } else { 0.0 };

    (
        view.origin.0 + position.left * scale_x,
        view.origin.1 + position.top * scale_y,
    )
}
