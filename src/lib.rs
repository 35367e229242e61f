//! # Image Merger
//!
//! Combines two to four images into one: a horizontal strip, a vertical
//! strip or a 2×2 grid, with a colored gap between images and an optional
//! border around the result.
//!
//! # Architecture: One Pass, Plan Then Render
//!
//! A merge is a single synchronous pass:
//!
//! ```text
//! validate  →  load  →  plan layout  →  render  →  border  →  encode + write
//! ```
//!
//! Layout geometry is computed from image dimensions alone before any pixel
//! is touched. That keeps every size rule (common height, common width,
//! row-then-column grid sizing, rounding) unit testable without allocating
//! images, and leaves rendering as a dumb "resize to cell, paste at origin"
//! loop.
//!
//! # Module Map
//!
//! | Module | Role |
//! |--------|------|
//! | [`merge`] | The pipeline: validation, loading, composition, writing, events and errors |
//! | [`imaging`] | Pure-Rust image work: layout math, resampling, borders, decode/encode backend |
//! | [`color`] | Color spec parsing with fallback-and-warn validation |
//! | [`config`] | TOML settings file: defaults, overlay merge, validation, `gen-config` |
//! | [`types`] | Request types: [`types::MergeMode`], [`types::MergeRequest`] |
//! | [`output`] | CLI output formatting of progress events, reports and errors |
//!
//! # Design Decisions
//!
//! ## RGB Working Representation
//!
//! Every input is flattened to 8-bit RGB on load, whatever its source format
//! (palette, grayscale, RGBA, 16-bit). Alpha is dropped, not composited. One
//! pixel type means one code path for layout and borders, and the output is
//! always opaque.
//!
//! ## Invalid Colors Warn, Never Fail
//!
//! A color that does not parse is replaced by its default (white for the
//! gap, black for the border) and reported as a warning event and in the
//! final [`merge::MergeReport`]. Numeric problems, missing images and I/O
//! failures are fatal and abort before anything is written.
//!
//! ## Single Write
//!
//! The composite is encoded fully in memory and written with one call at the
//! very end, so a failed merge never leaves a partial file behind.
//!
//! ## Events Over Printing
//!
//! The library never prints. Progress goes out as [`merge::MergeEvent`]s on
//! an optional channel; the binary drains them on a printer thread and
//! formats them with [`output`].

pub mod color;
pub mod config;
pub mod imaging;
pub mod merge;
pub mod output;
pub mod types;

#[cfg(test)]
pub(crate) mod test_helpers;
