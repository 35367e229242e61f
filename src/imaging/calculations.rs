//! Pure calculation functions for composite dimensions.
//!
//! All functions here are pure and testable without any I/O or images. They
//! work in whole pixels; the only rounding happens in [`scale_dimension`].

use super::backend::Dimensions;
use super::params::{Cell, LayoutPlan};

/// Scale `other` by `target / current`, rounding to the nearest pixel.
///
/// Ties round away from zero. The result is never below 1 so a resize target
/// is always drawable.
///
/// # Examples
/// ```
/// # use image_merger::imaging::scale_dimension;
/// // 300x200 brought to height 100 → width 150
/// assert_eq!(scale_dimension(300, 100, 200), 150);
/// // 5 * 1 / 2 = 2.5 → 3
/// assert_eq!(scale_dimension(5, 1, 2), 3);
/// ```
pub fn scale_dimension(other: u32, target: u32, current: u32) -> u32 {
    if current == 0 {
        return other.max(1);
    }
    let num = 2 * other as u64 * target as u64 + current as u64;
    let den = 2 * current as u64;
    u32::try_from(num / den).unwrap_or(u32::MAX).max(1)
}

/// Dimensions after an aspect-preserving resize to `height`.
pub fn fit_to_height(source: Dimensions, height: u32) -> Dimensions {
    if source.height == height {
        return source;
    }
    Dimensions {
        width: scale_dimension(source.width, height, source.height),
        height,
    }
}

/// Dimensions after an aspect-preserving resize to `width`.
pub fn fit_to_width(source: Dimensions, width: u32) -> Dimensions {
    if source.width == width {
        return source;
    }
    Dimensions {
        width,
        height: scale_dimension(source.height, width, source.width),
    }
}

/// Left-to-right strip at the shortest input's height.
///
/// Canvas = `(Σ resized widths + gap·(n−1), min height)`. `None` when the
/// canvas width does not fit in a `u32`.
pub fn plan_horizontal(sources: &[Dimensions], gap: u32) -> Option<LayoutPlan> {
    let height = sources.iter().map(|d| d.height).min().unwrap_or(0);

    let mut cells = Vec::with_capacity(sources.len());
    let mut x = 0u32;
    for (i, source) in sources.iter().enumerate() {
        if i > 0 {
            x = x.checked_add(gap)?;
        }
        let size = fit_to_height(*source, height);
        cells.push(Cell { size, x, y: 0 });
        x = x.checked_add(size.width)?;
    }

    Some(LayoutPlan {
        canvas: Dimensions { width: x, height },
        cells,
    })
}

/// Top-to-bottom strip at the narrowest input's width.
///
/// Canvas = `(min width, Σ resized heights + gap·(n−1))`. `None` on overflow.
pub fn plan_vertical(sources: &[Dimensions], gap: u32) -> Option<LayoutPlan> {
    let width = sources.iter().map(|d| d.width).min().unwrap_or(0);

    let mut cells = Vec::with_capacity(sources.len());
    let mut y = 0u32;
    for (i, source) in sources.iter().enumerate() {
        if i > 0 {
            y = y.checked_add(gap)?;
        }
        let size = fit_to_width(*source, width);
        cells.push(Cell { size, x: 0, y });
        y = y.checked_add(size.height)?;
    }

    Some(LayoutPlan {
        canvas: Dimensions { width, height: y },
        cells,
    })
}

/// 2×2 grid: `[top-left, top-right, bottom-left, bottom-right]`.
///
/// Each row is brought to its own shortest height first; column widths are
/// then the widest resized image in each column. Images narrower than their
/// column stay left-aligned in the cell. `None` on overflow.
pub fn plan_grid(sources: &[Dimensions; 4], gap: u32) -> Option<LayoutPlan> {
    let [tl, tr, bl, br] = *sources;

    // Rows first: column widths depend on the resized widths.
    let top_h = tl.height.min(tr.height);
    let bottom_h = bl.height.min(br.height);
    let tl = fit_to_height(tl, top_h);
    let tr = fit_to_height(tr, top_h);
    let bl = fit_to_height(bl, bottom_h);
    let br = fit_to_height(br, bottom_h);

    let left_w = tl.width.max(bl.width);
    let right_w = tr.width.max(br.width);
    let right_x = left_w.checked_add(gap)?;
    let bottom_y = top_h.checked_add(gap)?;

    Some(LayoutPlan {
        canvas: Dimensions {
            width: right_x.checked_add(right_w)?,
            height: bottom_y.checked_add(bottom_h)?,
        },
        cells: vec![
            Cell {
                size: tl,
                x: 0,
                y: 0,
            },
            Cell {
                size: tr,
                x: right_x,
                y: 0,
            },
            Cell {
                size: bl,
                x: 0,
                y: bottom_y,
            },
            Cell {
                size: br,
                x: right_x,
                y: bottom_y,
            },
        ],
    })
}

/// Canvas size once a `border`-pixel frame is added on every side, or
/// `None` if it does not fit in a `u32`.
pub fn bordered_dimensions(inner: Dimensions, border: u32) -> Option<Dimensions> {
    let frame = border.checked_mul(2)?;
    Some(Dimensions {
        width: inner.width.checked_add(frame)?,
        height: inner.height.checked_add(frame)?,
    })
}
