// Copyright (c) 2025, Jason Jenkins
// SPDX-License-Identifier: BSD-3-Clause

//! Aggregate hotspot state.
//!
//! The hotspot list sits behind an `Rc` so transitions that leave it alone
//! hand the same allocation to the next state. Effects compare lists by
//! identity with [`State::same_hotspots`] to decide whether anything changed.

use super::hotspot::Hotspot;
use std::rc::Rc;

/// Snapshot of every hotspot plus the placement-mode flag.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct State {
    hotspots: Rc<Vec<Hotspot>>,
    is_pointing: bool,
}

impl State {
    /// State holding the given hotspots, placement mode off.
    pub fn with_hotspots(hotspots: Vec<Hotspot>) -> Self {
        Self {
            hotspots: Rc::new(hotspots),
            is_pointing: false,
        }
    }

    pub fn hotspots(&self) -> &[Hotspot] {
        &self.hotspots
    }

    pub fn is_pointing(&self) -> bool {
        self.is_pointing
    }

    /// Look up a hotspot by id.
    pub fn hotspot(&self, id: &str) -> Option<&Hotspot> {
        self.hotspots.iter().find(|h| h.id() == id)
    }

    /// True when both states share the same hotspot list allocation.
    pub fn same_hotspots(&self, other: &State) -> bool {
        Rc::ptr_eq(&self.hotspots, &other.hotspots)
    }

    pub(crate) fn replace_hotspots(&self, hotspots: Vec<Hotspot>) -> Self {
        Self {
            hotspots: Rc::new(hotspots),
            is_pointing: self.is_pointing,
        }
    }

    pub(crate) fn set_pointing(&self, is_pointing: bool) -> Self {
        Self {
            hotspots: Rc::clone(&self.hotspots),
            is_pointing,
        }
    }
}
