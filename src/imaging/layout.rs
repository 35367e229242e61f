//! Composite layouts: horizontal strip, vertical strip and 2×2 grid.
//!
//! Each layout is plan-then-render: the geometry comes from
//! [`calculations`](super::calculations) using only image dimensions, and
//! [`operations::render`](super::operations::render) resamples and pastes.

use super::backend::Dimensions;
use super::calculations::{plan_grid, plan_horizontal, plan_vertical};
use super::operations::render;
use super::params::LayoutPlan;
use crate::types::{Arrangement, MergeMode};
use image::{Rgb, RgbImage};
use thiserror::Error;

#[derive(Error, Debug, PartialEq, Eq)]
pub enum LayoutError {
    #[error("{mode} needs {expected} images, got {actual}")]
    WrongImageCount {
        mode: MergeMode,
        expected: usize,
        actual: usize,
    },
    #[error("composite would be larger than {} pixels on a side", u32::MAX)]
    CanvasTooLarge,
}

fn dimensions(images: &[RgbImage]) -> Vec<Dimensions> {
    images.iter().map(Dimensions::of).collect()
}

/// Place `images` left to right at the shortest one's height.
pub fn merge_horizontal(
    images: Vec<RgbImage>,
    gap: u32,
    fill: Rgb<u8>,
) -> Result<RgbImage, LayoutError> {
    let plan = plan_horizontal(&dimensions(&images), gap).ok_or(LayoutError::CanvasTooLarge)?;
    Ok(render(&plan, images, fill))
}

/// Stack `images` top to bottom at the narrowest one's width.
pub fn merge_vertical(
    images: Vec<RgbImage>,
    gap: u32,
    fill: Rgb<u8>,
) -> Result<RgbImage, LayoutError> {
    let plan = plan_vertical(&dimensions(&images), gap).ok_or(LayoutError::CanvasTooLarge)?;
    Ok(render(&plan, images, fill))
}

/// Arrange four images as `[top-left, top-right, bottom-left, bottom-right]`.
pub fn merge_grid(
    images: [RgbImage; 4],
    gap: u32,
    fill: Rgb<u8>,
) -> Result<RgbImage, LayoutError> {
    let sources = [
        Dimensions::of(&images[0]),
        Dimensions::of(&images[1]),
        Dimensions::of(&images[2]),
        Dimensions::of(&images[3]),
    ];
    let plan = plan_grid(&sources, gap).ok_or(LayoutError::CanvasTooLarge)?;
    Ok(render(&plan, Vec::from(images), fill))
}

/// Compute the layout `mode` would produce for images of the given sizes.
pub fn plan(mode: MergeMode, sources: &[Dimensions], gap: u32) -> Result<LayoutPlan, LayoutError> {
    check_count(mode, sources.len())?;
    let plan = match mode.arrangement() {
        Arrangement::Horizontal => plan_horizontal(sources, gap),
        Arrangement::Vertical => plan_vertical(sources, gap),
        Arrangement::Grid => plan_grid(&[sources[0], sources[1], sources[2], sources[3]], gap),
    };
    plan.ok_or(LayoutError::CanvasTooLarge)
}

/// Run the layout selected by `mode`.
pub fn compose(
    mode: MergeMode,
    images: Vec<RgbImage>,
    gap: u32,
    fill: Rgb<u8>,
) -> Result<RgbImage, LayoutError> {
    check_count(mode, images.len())?;
    let composite = match mode.arrangement() {
        Arrangement::Horizontal => merge_horizontal(images, gap, fill)?,
        Arrangement::Vertical => merge_vertical(images, gap, fill)?,
        Arrangement::Grid => {
            let grid: [RgbImage; 4] =
                images
                    .try_into()
                    .map_err(|rest: Vec<RgbImage>| LayoutError::WrongImageCount {
                        mode,
                        expected: 4,
                        actual: rest.len(),
                    })?;
            merge_grid(grid, gap, fill)?
        }
    };
    log::debug!(
        "{mode} composite is {}x{}",
        composite.width(),
        composite.height()
    );
    Ok(composite)
}

fn check_count(mode: MergeMode, actual: usize) -> Result<(), LayoutError> {
    let expected = mode.required_images();
    if actual != expected {
        return Err(LayoutError::WrongImageCount {
            mode,
            expected,
            actual,
        });
    }
    Ok(())
}
