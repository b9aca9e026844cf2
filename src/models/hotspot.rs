// Copyright (c) 2025, Jason Jenkins
// SPDX-License-Identifier: BSD-3-Clause

//! Hotspot data structures.
//!
//! This module defines the annotation record placed on a surface and its
//! surface-relative position.

use serde::{ser, Deserialize, Serialize, Serializer};

/// Surface-relative offset of a hotspot.
///
/// Only finite offsets serialize; JSON has no NaN or infinity.
#[derive(Debug, Clone, Copy, Default, PartialEq, Serialize, Deserialize)]
pub struct Position {
    #[serde(serialize_with = "finite")]
    pub left: f64,
    #[serde(serialize_with = "finite")]
    pub top: f64,
}

impl Position {
    pub fn new(left: f64, top: f64) -> Self {
        Self { left, top }
    }

    pub fn is_finite(&self) -> bool {
        self.left.is_finite() && self.top.is_finite()
    }
}

fn finite<S: Serializer>(value: &f64, serializer: S) -> Result<S::Ok, S::Error> {
    if !value.is_finite() {
        return Err(ser::Error::custom(format!("non-finite position offset {value}")));
    }
    serializer.serialize_f64(*value)
}

/// A positioned annotation with free-form title and description text.
///
/// The id is fixed at construction. Edits produce a new value carrying the
/// same id, usually via [`Hotspot::with_title`] or by cloning and mutating
/// the public text fields.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Hotspot {
    id: String,
    pub position: Position,
    #[serde(default)]
    pub title: String,
    #[serde(default)]
    pub description: String,
}

impl Hotspot {
    /// Create a hotspot with empty title and description.
    pub fn new(id: impl Into<String>, position: Position) -> Self {
        Self {
            id: id.into(),
            position,
            title: String::new(),
            description: String::new(),
        }
    }

    pub fn id(&self) -> &str {
        &self.id
    }

    /// Copy of this hotspot with a new title.
    pub fn with_title(&self, title: impl Into<String>) -> Self {
        Self {
            title: title.into(),
            ..self.clone()
        }
    }

    /// Copy of this hotspot with a new description.
    pub fn with_description(&self, description: impl Into<String>) -> Self {
        Self {
            description: description.into(),
            ..self.clone()
        }
    }
}
