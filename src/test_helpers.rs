//! Shared test utilities: in-memory image builders and fixture writers.
//!
//! # Usage
//!
//! ```ignore
//! use crate::test_helpers::*;
//!
//! let red = solid(100, 200, [255, 0, 0]);
//! let tmp = tempfile::TempDir::new().unwrap();
//! write_jpeg(&tmp.path().join("a.jpg"), &gradient(64, 48));
//! ```

use image::{ImageFormat, Rgb, RgbImage};
use std::path::Path;

// =========================================================================
// Image builders
// =========================================================================

/// A single-color image.
pub fn solid(width: u32, height: u32, color: [u8; 3]) -> RgbImage {
    RgbImage::from_pixel(width, height, Rgb(color))
}

/// A deterministic image with distinct neighbouring pixels, for tests that
/// need to detect resampling.
pub fn gradient(width: u32, height: u32) -> RgbImage {
    RgbImage::from_fn(width, height, |x, y| {
        Rgb([(x % 256) as u8, (y % 256) as u8, ((x + y) % 256) as u8])
    })
}

// =========================================================================
// Fixture writers
// =========================================================================

pub fn write_jpeg(path: &Path, img: &RgbImage) {
    img.save_with_format(path, ImageFormat::Jpeg).unwrap();
}

pub fn write_png(path: &Path, img: &RgbImage) {
    img.save_with_format(path, ImageFormat::Png).unwrap();
}
