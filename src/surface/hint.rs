// Copyright (c) 2025, Jason Jenkins
// SPDX-License-Identifier: BSD-3-Clause

//! Transient pointer feedback while placement mode is active.

use super::SurfaceEvent;
use crate::models::Position;

/// Cosmetic "ready to place" feedback.
///
/// Applying a hint is idempotent and never fails; bad input is ignored.
/// [`PointerHint::clear_pointer_hint`] removes everything applied so far.
pub trait PointerHint {
    fn apply_pointer_hint(&mut self, event: &SurfaceEvent);
    fn clear_pointer_hint(&mut self);
}

/// Remembers the single position the pointer is primed at, for the
/// renderer to draw a marker preview.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct CursorHint {
    primed: Option<Position>,
}

impl CursorHint {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn primed(&self) -> Option<Position> {
        self.primed
    }
}

impl PointerHint for CursorHint {
    fn apply_pointer_hint(&mut self, event: &SurfaceEvent) {
        let SurfaceEvent::PointerMove(position) = event else {
            return;
        };
        // No target under the pointer
        if !position.left.is_finite() || !position.top.is_finite() {
            return;
        }
        self.primed = Some(*position);
    }

    fn clear_pointer_hint(&mut self) {
        self.primed = None;
    }
}
