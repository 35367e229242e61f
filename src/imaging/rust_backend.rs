//! Pure Rust I/O backend built on the `image` crate.
//!
//! ## Crate mapping
//!
//! | Operation | Crate / function |
//! |---|---|
//! | Decode (JPEG, PNG, BMP, GIF, TIFF, WebP) | `image::ImageReader` with content sniffing |
//! | Flatten to RGB | `image::DynamicImage::into_rgb8` (alpha dropped, not composited) |
//! | Encode → JPEG | `image::codecs::jpeg::JpegEncoder` with explicit quality |
//! | Encode → PNG, BMP, TIFF, WebP | `image::ImageBuffer::write_to` |

use super::backend::{BackendError, ImageBackend};
use image::codecs::jpeg::JpegEncoder;
use image::{ExtendedColorType, ImageEncoder, ImageFormat, ImageReader, RgbImage};
use std::io::Cursor;
use std::path::Path;
use std::sync::LazyLock;

/// Input extensions paired with the decoder they need.
const INPUT_CANDIDATES: &[(&str, ImageFormat)] = &[
    ("jpg", ImageFormat::Jpeg),
    ("jpeg", ImageFormat::Jpeg),
    ("png", ImageFormat::Png),
    ("bmp", ImageFormat::Bmp),
    ("gif", ImageFormat::Gif),
    ("tif", ImageFormat::Tiff),
    ("tiff", ImageFormat::Tiff),
    ("webp", ImageFormat::WebP),
];

/// Output extensions paired with the encoder they select.
const OUTPUT_CANDIDATES: &[(&str, ImageFormat)] = &[
    ("png", ImageFormat::Png),
    ("jpg", ImageFormat::Jpeg),
    ("jpeg", ImageFormat::Jpeg),
    ("bmp", ImageFormat::Bmp),
    ("tif", ImageFormat::Tiff),
    ("tiff", ImageFormat::Tiff),
    ("webp", ImageFormat::WebP),
];

static SUPPORTED_INPUT: LazyLock<Vec<&'static str>> = LazyLock::new(|| {
    INPUT_CANDIDATES
        .iter()
        .filter(|(_, fmt)| fmt.reading_enabled())
        .map(|(ext, _)| *ext)
        .collect()
});

static SUPPORTED_OUTPUT: LazyLock<Vec<&'static str>> = LazyLock::new(|| {
    OUTPUT_CANDIDATES
        .iter()
        .filter(|(_, fmt)| fmt.writing_enabled())
        .map(|(ext, _)| *ext)
        .collect()
});

/// Image file extensions that have working decoders compiled in.
pub fn supported_input_extensions() -> &'static [&'static str] {
    &SUPPORTED_INPUT
}

/// Image file extensions a composite can be written as.
pub fn supported_output_extensions() -> &'static [&'static str] {
    &SUPPORTED_OUTPUT
}

/// Resolve the encoder for a destination path from its extension.
pub fn output_format(path: &Path) -> Result<ImageFormat, BackendError> {
    let ext = path
        .extension()
        .and_then(|e| e.to_str())
        .unwrap_or("")
        .to_lowercase();

    OUTPUT_CANDIDATES
        .iter()
        .find(|(candidate, fmt)| *candidate == ext && fmt.writing_enabled())
        .map(|(_, fmt)| *fmt)
        .ok_or(BackendError::UnsupportedFormat(ext))
}

/// Backend using the `image` crate's pure-Rust codecs.
///
/// See the [module docs](self) for the crate-to-operation mapping.
pub struct RustBackend;

impl RustBackend {
    pub fn new() -> Self {
        Self
    }
}

impl Default for RustBackend {
    fn default() -> Self {
        Self::new()
    }
}

/// Encode the whole composite into memory so a failing encoder never leaves
/// a truncated destination behind.
fn encode(img: &RgbImage, format: ImageFormat, quality: u32) -> Result<Vec<u8>, BackendError> {
    let mut buf = Cursor::new(Vec::new());
    let result = match format {
        ImageFormat::Jpeg => JpegEncoder::new_with_quality(&mut buf, quality.clamp(1, 100) as u8)
            .write_image(
                img.as_raw(),
                img.width(),
                img.height(),
                ExtendedColorType::Rgb8,
            ),
        other => img.write_to(&mut buf, other),
    };
    result.map_err(|e| BackendError::Encode(e.to_string()))?;
    Ok(buf.into_inner())
}

impl ImageBackend for RustBackend {
    fn load(&self, path: &Path) -> Result<RgbImage, BackendError> {
        let decoded = ImageReader::open(path)?
            .with_guessed_format()?
            .decode()
            .map_err(|e| BackendError::Decode(e.to_string()))?;
        log::debug!(
            "decoded {} as {:?} ({}x{})",
            path.display(),
            decoded.color(),
            decoded.width(),
            decoded.height()
        );
        Ok(decoded.into_rgb8())
    }

    fn save(&self, img: &RgbImage, path: &Path, quality: u32) -> Result<u64, BackendError> {
        let format = output_format(path)?;
        let bytes = encode(img, format, quality)?;
        std::fs::write(path, &bytes)?;
        log::debug!(
            "wrote {} bytes of {:?} to {}",
            bytes.len(),
            format,
            path.display()
        );
        Ok(bytes.len() as u64)
    }
}
