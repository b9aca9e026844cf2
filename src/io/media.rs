// Copyright (c) 2025, Jason Jenkins
// SPDX-License-Identifier: BSD-3-Clause

//! Background image loading.
//!
//! This module decodes the image used as the hotspot surface and converts
//! it to RGBA pixels suitable for display in egui.

use anyhow::{Context, Result};
use std::path::Path;

/// Decoded RGBA8 image.
pub struct LoadedImage {
    pub width: u32,
    pub height: u32,
    pub pixels: Vec<u8>,
}

/// Load and decode an image file.
pub fn load_image(path: &Path) -> Result<LoadedImage> {
    let img = image::open(path)
        .with_context(|| format!("Failed to open image {}", path.display()))?
        .to_rgba8();
    let (width, height) = img.dimensions();

    Ok(LoadedImage {
        width,
        height,
        pixels: img.into_raw(),
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_load_png_dimensions() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("surface.png");
        image::RgbaImage::from_pixel(3, 2, image::Rgba([10, 20, 30, 255]))
            .save(&path)
            .unwrap();

        let loaded = load_image(&path).unwrap();
        assert_eq!((loaded.width, loaded.height), (3, 2));
        assert_eq!(loaded.pixels.len(), 3 * 2 * 4);
        assert_eq!(&loaded.pixels[..4], &[10, 20, 30, 255]);
    }

    #[test]
    fn test_missing_file_is_error() {
        assert!(load_image(Path::new("/nonexistent/surface.png")).is_err());
    }
}
