// Copyright (c) 2025, Jason Jenkins
// SPDX-License-Identifier: BSD-3-Clause

//! Hotspot serialization and export.
//!
//! The storage slot holds a compact JSON array. Exports write the same list
//! to a user-chosen file in YAML or pretty JSON.

use crate::models::Hotspot;
use anyhow::Result;
use std::path::Path;

/// Encode hotspots in the storage format.
pub fn to_json(hotspots: &[Hotspot]) -> serde_json::Result<String> {
    serde_json::to_string(hotspots)
}

/// Decode hotspots from the storage format.
pub fn from_json(json: &str) -> serde_json::Result<Vec<Hotspot>> {
    serde_json::from_str(json)
}

/// Export hotspots to YAML format.
pub fn export_yaml(hotspots: &[Hotspot], path: &Path) -> Result<()> {
    let yaml = serde_yaml::to_string(hotspots)?;
    std::fs::write(path, yaml)?;
    Ok(())
}

/// Export hotspots to JSON format.
pub fn export_json(hotspots: &[Hotspot], path: &Path) -> Result<()> {
    let json = serde_json::to_string_pretty(hotspots)?;
    std::fs::write(path, json)?;
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::Position;

    fn sample() -> Vec<Hotspot> {
        vec![
            Hotspot::new("first", Position::new(10.0, 20.0)).with_title("Entrance"),
            Hotspot::new("second", Position::new(0.5, 99.25)).with_description("Window\nnorth side"),
        ]
    }

    #[test]
    fn test_storage_roundtrip_preserves_order() {
        let hotspots = sample();
        let json = to_json(&hotspots).unwrap();
        assert_eq!(from_json(&json).unwrap(), hotspots);
    }

    #[test]
    fn test_empty_list_is_empty_array() {
        assert_eq!(to_json(&[]).unwrap(), "[]");
    }

    #[test]
    fn test_non_finite_position_is_an_error() {
        let hotspots = vec![Hotspot::new("nan", Position::new(f64::NAN, 45.0))];
        assert!(to_json(&hotspots).is_err());
    }

    #[test]
    fn test_rejects_non_array() {
        assert!(from_json(r#"{"id":"x"}"#).is_err());
    }

    #[test]
    fn test_export_yaml_and_json() {
        let dir = tempfile::tempdir().unwrap();
        let hotspots = sample();

        let yaml_path = dir.path().join("hotspots.yaml");
        export_yaml(&hotspots, &yaml_path).unwrap();
        let yaml = std::fs::read_to_string(&yaml_path).unwrap();
        let from_yaml: Vec<Hotspot> = serde_yaml::from_str(&yaml).unwrap();
        assert_eq!(from_yaml, hotspots);

        let json_path = dir.path().join("hotspots.json");
        export_json(&hotspots, &json_path).unwrap();
        let json = std::fs::read_to_string(&json_path).unwrap();
        assert_eq!(from_json(&json).unwrap(), hotspots);
    }
}
