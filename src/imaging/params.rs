//! Parameter types for image operations.
//!
//! These structs describe *what* to draw, not *how*. The pure
//! [`calculations`](super::calculations) module produces them; the
//! [`operations`](super::operations) module executes them against pixels.
//! Keeping the plan separate lets the layout math be tested without
//! allocating a single image.
//!
//! ## Types
//!
//! - [`Quality`] — JPEG encoding quality (1–100, default 90). Clamped on construction.
//! - [`Cell`] — one placed image: the size it is resized to and its paste origin.
//! - [`LayoutPlan`] — canvas size plus one cell per input image, in input order.

use super::backend::Dimensions;
use serde::{Deserialize, Serialize};

/// Quality setting for lossy image encoding (1-100).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct Quality(pub u32);

impl Quality {
    pub fn new(value: u32) -> Self {
        Self(value.clamp(1, 100))
    }

    pub fn value(self) -> u32 {
        self.0
    }
}

impl Default for Quality {
    fn default() -> Self {
        Self(90)
    }
}

/// Where and at what size one input image lands on the canvas.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Cell {
    /// Size the source is resampled to (equal to the source size means no resample).
    pub size: Dimensions,
    /// Top-left paste position.
    pub x: u32,
    pub y: u32,
}

/// A complete composite layout.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LayoutPlan {
    pub canvas: Dimensions,
    /// One entry per input image, in input order.
    pub cells: Vec<Cell>,
}

impl LayoutPlan {
    /// Paste origins in input order.
    pub fn origins(&self) -> Vec<(u32, u32)> {
        self.cells.iter().map(|c| (c.x, c.y)).collect()
    }
}
