//! In-memory pixel operations.
//!
//! These functions combine the pure [`calculations`](super::calculations)
//! with actual resampling and pasting. Each takes ownership of its input image
//! and returns a new one, so a caller never holds a stale reference to a
//! pre-resize buffer.

use super::backend::Dimensions;
use super::calculations::{bordered_dimensions, fit_to_height, fit_to_width};
use super::layout::LayoutError;
use super::params::LayoutPlan;
use image::imageops::{self, FilterType};
use image::{Rgb, RgbImage};

/// Resampling filter for every resize. Lanczos3 holds up for both upscaling
/// and downscaling photographic content; nearest and box filters do not.
pub const RESAMPLE_FILTER: FilterType = FilterType::Lanczos3;

/// Resample `img` to exactly `size`, or hand it back untouched if it is
/// already that size.
pub fn resize_to(img: RgbImage, size: Dimensions) -> RgbImage {
    if Dimensions::of(&img) == size {
        return img;
    }
    log::debug!(
        "resampling {}x{} -> {}",
        img.width(),
        img.height(),
        size
    );
    imageops::resize(&img, size.width, size.height, RESAMPLE_FILTER)
}

/// Scale `img` to `height`, keeping its aspect ratio.
pub fn resize_to_height(img: RgbImage, height: u32) -> RgbImage {
    let size = fit_to_height(Dimensions::of(&img), height);
    resize_to(img, size)
}

/// Scale `img` to `width`, keeping its aspect ratio.
pub fn resize_to_width(img: RgbImage, width: u32) -> RgbImage {
    let size = fit_to_width(Dimensions::of(&img), width);
    resize_to(img, size)
}

/// Execute a layout plan: fill a canvas with `fill`, then resize each image
/// to its cell and paste it at the cell's origin.
///
/// `images` and `plan.cells` are paired by position.
pub fn render(plan: &LayoutPlan, images: Vec<RgbImage>, fill: Rgb<u8>) -> RgbImage {
    let mut canvas = RgbImage::from_pixel(plan.canvas.width, plan.canvas.height, fill);
    for (img, cell) in images.into_iter().zip(&plan.cells) {
        let placed = resize_to(img, cell.size);
        imageops::replace(&mut canvas, &placed, cell.x as i64, cell.y as i64);
    }
    canvas
}

/// Surround `img` with a uniform `width`-pixel frame of `color`.
///
/// A zero width returns `img` as-is.
pub fn apply_border(img: RgbImage, width: u32, color: Rgb<u8>) -> Result<RgbImage, LayoutError> {
    if width == 0 {
        return Ok(img);
    }
    let outer =
        bordered_dimensions(Dimensions::of(&img), width).ok_or(LayoutError::CanvasTooLarge)?;
    let mut framed = RgbImage::from_pixel(outer.width, outer.height, color);
    imageops::replace(&mut framed, &img, width as i64, width as i64);
    Ok(framed)
}
