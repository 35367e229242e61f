//! Image I/O backend trait and shared types.
//!
//! The [`ImageBackend`] trait covers the two operations that touch the
//! filesystem: decoding an input into the RGB working representation, and
//! encoding a finished composite to its destination. Everything between
//! those two (resampling, layout, borders) is plain in-memory pixel work in
//! [`operations`](super::operations).
//!
//! The production implementation is
//! [`RustBackend`](super::rust_backend::RustBackend), built on the `image`
//! crate's pure-Rust codecs.

use image::RgbImage;
use serde::Serialize;
use std::path::Path;
use thiserror::Error;

#[derive(Error, Debug)]
pub enum BackendError {
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
    #[error("decode failed: {0}")]
    Decode(String),
    #[error("encode failed: {0}")]
    Encode(String),
    #[error("unsupported output format '{0}'")]
    UnsupportedFormat(String),
}

/// Width and height of an image, in pixels.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct Dimensions {
    pub width: u32,
    pub height: u32,
}

impl Dimensions {
    pub fn of(img: &RgbImage) -> Self {
        Self {
            width: img.width(),
            height: img.height(),
        }
    }
}

impl std::fmt::Display for Dimensions {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}x{}", self.width, self.height)
    }
}

/// Trait for image I/O backends.
///
/// `load` must return a fully opaque 3-channel image regardless of the
/// source's pixel format. `save` must either write the whole file or leave
/// the destination untouched; it returns the number of bytes written.
pub trait ImageBackend: Sync {
    /// Decode `path` into the RGB working representation.
    fn load(&self, path: &Path) -> Result<RgbImage, BackendError>;

    /// Encode `img` in the format implied by `path`'s extension and write it.
    fn save(&self, img: &RgbImage, path: &Path, quality: u32) -> Result<u64, BackendError>;
}
