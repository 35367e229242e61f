//! The merge pipeline.
//!
//! One call to [`merge`] turns a [`MergeRequest`] into exactly one written
//! file, or into nothing at all:
//!
//! ```text
//! widths → colors → destination → load → layout → border → encode + write
//! ```
//!
//! ## Failure model
//!
//! | Stage | Outcome on bad input |
//! |---|---|
//! | widths | [`MergeError::InvalidNumericInput`] |
//! | colors | fallback substituted, [`MergeEvent::ColorSubstituted`] emitted |
//! | destination | `None` → [`MergeOutcome::Cancelled`]; bad extension → [`MergeError::ImageWrite`] |
//! | load | [`MergeError::MissingImage`] or [`MergeError::ImageLoad`] (first failing slot) |
//! | write | [`MergeError::ImageWrite`] |
//!
//! The destination is touched only by the final write, so every failure
//! before it leaves the filesystem unchanged.
//!
//! ## Progress events
//!
//! Stages report through an optional [`Sender<MergeEvent>`]. The pipeline
//! never prints; the CLI renders events with [`crate::output`].

use crate::color::{self, ColorWarning, DEFAULT_BORDER_COLOR, DEFAULT_GAP_COLOR, ValidatedColor};
use crate::imaging::rust_backend::output_format;
use crate::imaging::{
    BackendError, Dimensions, ImageBackend, LayoutError, RustBackend, apply_border, compose,
};
use crate::types::{MergeMode, MergeRequest};
use serde::Serialize;
use std::fmt;
use std::path::{Path, PathBuf};
use std::sync::mpsc::Sender;
use thiserror::Error;

/// Extension appended to a destination that has none.
pub const DEFAULT_OUTPUT_EXTENSION: &str = "png";

/// Largest accepted gap or border width, in pixels.
pub const MAX_WIDTH: u32 = 10_000;

#[derive(Error, Debug)]
pub enum MergeError {
    #[error("{field} width must be an integer from 0 to {max}, got '{value}'", max = MAX_WIDTH)]
    InvalidNumericInput { field: &'static str, value: String },
    #[error("image {slot} of {required} is missing")]
    MissingImage { slot: usize, required: usize },
    #[error("failed to load image {slot} ({}): {source}", path.display())]
    ImageLoad {
        slot: usize,
        path: PathBuf,
        #[source]
        source: BackendError,
    },
    #[error("failed to write {}: {source}", path.display())]
    ImageWrite {
        path: PathBuf,
        #[source]
        source: BackendError,
    },
}

/// The fatal error kinds a merge can end with.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub enum ErrorKind {
    InvalidNumericInput,
    MissingImage,
    ImageLoadFailure,
    ImageWriteFailure,
}

impl fmt::Display for ErrorKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            ErrorKind::InvalidNumericInput => "invalid input",
            ErrorKind::MissingImage => "missing image",
            ErrorKind::ImageLoadFailure => "load error",
            ErrorKind::ImageWriteFailure => "write error",
        };
        f.write_str(name)
    }
}

impl MergeError {
    pub fn kind(&self) -> ErrorKind {
        match self {
            MergeError::InvalidNumericInput { .. } => ErrorKind::InvalidNumericInput,
            MergeError::MissingImage { .. } => ErrorKind::MissingImage,
            MergeError::ImageLoad { .. } => ErrorKind::ImageLoadFailure,
            MergeError::ImageWrite { .. } => ErrorKind::ImageWriteFailure,
        }
    }

    /// The file the error is about, if any.
    pub fn path(&self) -> Option<&Path> {
        match self {
            MergeError::ImageLoad { path, .. } | MergeError::ImageWrite { path, .. } => Some(path),
            _ => None,
        }
    }
}

/// Which color setting a substitution applies to.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum ColorField {
    Gap,
    Border,
}

impl fmt::Display for ColorField {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ColorField::Gap => f.write_str("gap"),
            ColorField::Border => f.write_str("border"),
        }
    }
}

/// A color that was rejected and replaced by its fallback.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ColorSubstitution {
    pub field: ColorField,
    #[serde(flatten)]
    pub warning: ColorWarning,
}

/// Progress reported while a merge runs.
#[derive(Debug, Clone, PartialEq)]
pub enum MergeEvent {
    ColorSubstituted(ColorSubstitution),
    ExtraImagesIgnored {
        required: usize,
        ignored: usize,
    },
    ImageLoaded {
        slot: usize,
        path: PathBuf,
        dimensions: Dimensions,
    },
    Composed {
        mode: MergeMode,
        dimensions: Dimensions,
    },
    BorderApplied {
        width: u32,
        dimensions: Dimensions,
    },
    Written {
        path: PathBuf,
        bytes: u64,
    },
}

/// Summary of a successful merge.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct MergeReport {
    pub path: PathBuf,
    pub mode: MergeMode,
    pub dimensions: Dimensions,
    pub bytes: u64,
    pub gap_color: String,
    pub border_color: String,
    pub warnings: Vec<ColorSubstitution>,
}

#[derive(Debug, Clone, PartialEq)]
pub enum MergeOutcome {
    Written(MergeReport),
    /// No destination was chosen. Nothing was loaded or written.
    Cancelled,
}

/// Convert textual width input, reporting non-numeric values.
///
/// Sign is not checked here; the pipeline rejects negative widths itself.
pub fn parse_width(field: &'static str, raw: &str) -> Result<i64, MergeError> {
    raw.trim()
        .parse::<i64>()
        .map_err(|_| MergeError::InvalidNumericInput {
            field,
            value: raw.to_string(),
        })
}

/// The path the composite is written to: `requested`, with `.png` appended
/// when it has no extension.
pub fn resolve_output_path(requested: &Path) -> PathBuf {
    if requested.extension().is_some() {
        requested.to_path_buf()
    } else {
        requested.with_extension(DEFAULT_OUTPUT_EXTENSION)
    }
}

/// Run a merge with the production backend.
pub fn merge(
    request: &MergeRequest,
    events: Option<Sender<MergeEvent>>,
) -> Result<MergeOutcome, MergeError> {
    merge_with_backend(&RustBackend::new(), request, events)
}

/// Run a merge using a specific backend (allows testing with mock).
pub fn merge_with_backend(
    backend: &impl ImageBackend,
    request: &MergeRequest,
    events: Option<Sender<MergeEvent>>,
) -> Result<MergeOutcome, MergeError> {
    let emit = |event: MergeEvent| {
        if let Some(tx) = &events {
            // A dropped receiver only means nobody is listening.
            let _ = tx.send(event);
        }
    };

    let gap = check_width("gap", request.gap.width)?;
    let border = check_width("border", request.border.width)?;

    let mut warnings = Vec::new();
    let mut checked_color = |field: ColorField, spec: &str, fallback: &str| -> ValidatedColor {
        let (color, warning) = color::validate(spec, fallback);
        if let Some(warning) = warning {
            log::warn!("{field} color: {warning}");
            let substitution = ColorSubstitution { field, warning };
            emit(MergeEvent::ColorSubstituted(substitution.clone()));
            warnings.push(substitution);
        }
        color
    };
    let gap_color = checked_color(ColorField::Gap, &request.gap.color, DEFAULT_GAP_COLOR);
    let border_color = checked_color(
        ColorField::Border,
        &request.border.color,
        DEFAULT_BORDER_COLOR,
    );

    let Some(requested) = request.output_path.as_deref() else {
        log::info!("no destination chosen, nothing to do");
        return Ok(MergeOutcome::Cancelled);
    };
    let output_path = resolve_output_path(requested);
    output_format(&output_path).map_err(|source| MergeError::ImageWrite {
        path: output_path.clone(),
        source,
    })?;

    let paths = required_paths(request.mode, &request.image_paths)?;
    let ignored = request.image_paths[paths.len()..]
        .iter()
        .filter(|p| !p.as_os_str().is_empty())
        .count();
    if ignored > 0 {
        log::info!("ignoring {ignored} image(s) beyond what {} uses", request.mode);
        emit(MergeEvent::ExtraImagesIgnored {
            required: paths.len(),
            ignored,
        });
    }

    let mut images = Vec::with_capacity(paths.len());
    for (i, path) in paths.iter().enumerate() {
        let img = backend.load(path).map_err(|source| MergeError::ImageLoad {
            slot: i + 1,
            path: path.clone(),
            source,
        })?;
        emit(MergeEvent::ImageLoaded {
            slot: i + 1,
            path: path.clone(),
            dimensions: Dimensions::of(&img),
        });
        images.push(img);
    }

    let composite = compose(request.mode, images, gap, gap_color.rgb)
        .map_err(|e| layout_error("gap", gap, e))?;
    emit(MergeEvent::Composed {
        mode: request.mode,
        dimensions: Dimensions::of(&composite),
    });

    let composite = apply_border(composite, border, border_color.rgb)
        .map_err(|e| layout_error("border", border, e))?;
    if border > 0 {
        emit(MergeEvent::BorderApplied {
            width: border,
            dimensions: Dimensions::of(&composite),
        });
    }

    let bytes = backend
        .save(&composite, &output_path, request.jpeg_quality.value())
        .map_err(|source| MergeError::ImageWrite {
            path: output_path.clone(),
            source,
        })?;
    emit(MergeEvent::Written {
        path: output_path.clone(),
        bytes,
    });

    Ok(MergeOutcome::Written(MergeReport {
        path: output_path,
        mode: request.mode,
        dimensions: Dimensions::of(&composite),
        bytes,
        gap_color: gap_color.spec,
        border_color: border_color.spec,
        warnings,
    }))
}

fn check_width(field: &'static str, width: i64) -> Result<u32, MergeError> {
    u32::try_from(width)
        .ok()
        .filter(|w| *w <= MAX_WIDTH)
        .ok_or_else(|| MergeError::InvalidNumericInput {
            field,
            value: width.to_string(),
        })
}

/// A canvas that cannot be sized is blamed on the width that grew it.
fn layout_error(field: &'static str, width: u32, err: LayoutError) -> MergeError {
    match err {
        LayoutError::WrongImageCount {
            expected, actual, ..
        } => MergeError::MissingImage {
            slot: actual + 1,
            required: expected,
        },
        LayoutError::CanvasTooLarge => MergeError::InvalidNumericInput {
            field,
            value: width.to_string(),
        },
    }
}

/// The paths for the mode's slots, or the first slot that is empty.
fn required_paths(mode: MergeMode, paths: &[PathBuf]) -> Result<&[PathBuf], MergeError> {
    let required = mode.required_images();
    for slot in 0..required {
        let present = paths.get(slot).is_some_and(|p| !p.as_os_str().is_empty());
        if !present {
            return Err(MergeError::MissingImage {
                slot: slot + 1,
                required,
            });
        }
    }
    Ok(&paths[..required])
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::imaging::Quality;
    use crate::imaging::backend::tests::{MockBackend, RecordedOp};
    use crate::types::{BorderSpec, GapSpec};
    use image::Rgb;
    use std::sync::mpsc;

    const WHITE: [u8; 3] = [255, 255, 255];
    const RED: [u8; 3] = [255, 0, 0];
    const BLUE: [u8; 3] = [0, 0, 255];

    fn request(mode: MergeMode, paths: &[&str]) -> MergeRequest {
        MergeRequest {
            mode,
            image_paths: paths.iter().map(PathBuf::from).collect(),
            gap: GapSpec {
                width: 10,
                color: "#FFFFFF".to_string(),
            },
            border: BorderSpec {
                width: 0,
                color: "#000000".to_string(),
            },
            output_path: Some(PathBuf::from("/out/merged.png")),
            jpeg_quality: Quality::default(),
        }
    }

    fn two_image_backend() -> MockBackend {
        MockBackend::new()
            .with_image("/a.png", 100, 200, RED)
            .with_image("/b.png", 300, 200, BLUE)
    }

    fn written(outcome: MergeOutcome) -> MergeReport {
        match outcome {
            MergeOutcome::Written(report) => report,
            MergeOutcome::Cancelled => panic!("expected a written merge, got Cancelled"),
        }
    }

    // =========================================================================
    // End-to-end scenarios against the mock backend
    // =========================================================================

    #[test]
    fn two_horizontal_same_height() {
        let backend = two_image_backend();
        let req = request(MergeMode::TwoHorizontal, &["/a.png", "/b.png"]);

        let report = written(merge_with_backend(&backend, &req, None).unwrap());

        assert_eq!(
            report.dimensions,
            Dimensions {
                width: 410,
                height: 200
            }
        );
        assert_eq!(
            backend.saves(),
            vec![RecordedOp::Save {
                path: "/out/merged.png".to_string(),
                width: 410,
                height: 200,
                quality: 90,
            }]
        );
    }

    #[test]
    fn two_horizontal_with_border() {
        let backend = two_image_backend();
        let mut req = request(MergeMode::TwoHorizontal, &["/a.png", "/b.png"]);
        req.border = BorderSpec {
            width: 5,
            color: "black".to_string(),
        };

        let report = written(merge_with_backend(&backend, &req, None).unwrap());
        assert_eq!(
            report.dimensions,
            Dimensions {
                width: 420,
                height: 210
            }
        );

        let img = backend.saved_image().unwrap();
        for (x, y) in [(0, 0), (4, 100), (419, 209), (200, 4), (415, 205)] {
            assert_eq!(img.get_pixel(x, y), &Rgb([0, 0, 0]), "frame at ({x}, {y})");
        }
        assert_eq!(img.get_pixel(5, 5), &Rgb(RED));
        assert_eq!(img.get_pixel(110, 100), &Rgb(WHITE));
        assert_eq!(img.get_pixel(414, 204), &Rgb(BLUE));
    }

    #[test]
    fn four_grid_with_three_paths_is_missing_slot_four() {
        let backend = MockBackend::new()
            .with_image("/a.png", 10, 10, RED)
            .with_image("/b.png", 10, 10, RED)
            .with_image("/c.png", 10, 10, RED);
        let req = request(MergeMode::FourGrid, &["/a.png", "/b.png", "/c.png"]);

        let err = merge_with_backend(&backend, &req, None).unwrap_err();

        assert!(matches!(
            err,
            MergeError::MissingImage {
                slot: 4,
                required: 4
            }
        ));
        assert_eq!(err.kind(), ErrorKind::MissingImage);
        assert!(backend.get_operations().is_empty());
    }

    #[test]
    fn empty_path_counts_as_missing_slot() {
        let backend = two_image_backend();
        let req = request(MergeMode::TwoVertical, &["/a.png", ""]);

        let err = merge_with_backend(&backend, &req, None).unwrap_err();
        assert!(matches!(err, MergeError::MissingImage { slot: 2, .. }));
    }

    #[test]
    fn grid_composite_uses_gap_fill() {
        let backend = MockBackend::new()
            .with_image("/tl.png", 20, 10, RED)
            .with_image("/tr.png", 10, 10, RED)
            .with_image("/bl.png", 10, 10, BLUE)
            .with_image("/br.png", 10, 10, BLUE);
        let mut req = request(
            MergeMode::FourGrid,
            &["/tl.png", "/tr.png", "/bl.png", "/br.png"],
        );
        req.gap = GapSpec {
            width: 2,
            color: "#00ff00".to_string(),
        };

        let report = written(merge_with_backend(&backend, &req, None).unwrap());
        assert_eq!(
            report.dimensions,
            Dimensions {
                width: 32,
                height: 22
            }
        );

        let img = backend.saved_image().unwrap();
        // Bottom-left is 10 wide in a 20 wide column.
        assert_eq!(img.get_pixel(9, 12), &Rgb(BLUE));
        assert_eq!(img.get_pixel(10, 12), &Rgb([0, 255, 0]));
        assert_eq!(img.get_pixel(22, 0), &Rgb(RED));
    }

    // =========================================================================
    // Validation and cancellation
    // =========================================================================

    #[test]
    fn negative_gap_is_rejected_before_any_io() {
        let backend = two_image_backend();
        let mut req = request(MergeMode::TwoHorizontal, &["/a.png", "/b.png"]);
        req.gap.width = -1;

        let err = merge_with_backend(&backend, &req, None).unwrap_err();
        assert!(matches!(
            &err,
            MergeError::InvalidNumericInput { field: "gap", value } if value == "-1"
        ));
        assert!(backend.get_operations().is_empty());
    }

    #[test]
    fn negative_border_is_rejected() {
        let backend = two_image_backend();
        let mut req = request(MergeMode::TwoHorizontal, &["/a.png", "/b.png"]);
        req.border.width = -3;

        let err = merge_with_backend(&backend, &req, None).unwrap_err();
        assert_eq!(err.kind(), ErrorKind::InvalidNumericInput);
        assert!(err.to_string().contains("border"));
    }

    #[test]
    fn oversized_width_is_rejected() {
        let backend = two_image_backend();
        let mut req = request(MergeMode::TwoHorizontal, &["/a.png", "/b.png"]);
        req.gap.width = i64::from(u32::MAX) + 1;

        let err = merge_with_backend(&backend, &req, None).unwrap_err();
        assert_eq!(err.kind(), ErrorKind::InvalidNumericInput);
    }

    #[test]
    fn huge_gap_is_rejected_not_a_panic() {
        let backend = MockBackend::new()
            .with_image("/a.png", 1, 1, RED)
            .with_image("/b.png", 1, 1, RED)
            .with_image("/c.png", 1, 1, RED);
        let mut req = request(MergeMode::ThreeHorizontal, &["/a.png", "/b.png", "/c.png"]);
        req.gap.width = 1 << 31;

        let err = merge_with_backend(&backend, &req, None).unwrap_err();
        assert!(matches!(
            &err,
            MergeError::InvalidNumericInput { field: "gap", value } if value == "2147483648"
        ));
        assert!(backend.get_operations().is_empty());
    }

    #[test]
    fn largest_accepted_gap_merges() {
        let backend = MockBackend::new()
            .with_image("/a.png", 1, 1, RED)
            .with_image("/b.png", 1, 1, RED)
            .with_image("/c.png", 1, 1, RED);
        let mut req = request(MergeMode::ThreeHorizontal, &["/a.png", "/b.png", "/c.png"]);
        req.gap.width = i64::from(MAX_WIDTH);

        let report = written(merge_with_backend(&backend, &req, None).unwrap());
        assert_eq!(
            report.dimensions,
            Dimensions {
                width: 3 + 2 * MAX_WIDTH,
                height: 1
            }
        );

        req.gap.width += 1;
        let err = merge_with_backend(&backend, &req, None).unwrap_err();
        assert_eq!(err.kind(), ErrorKind::InvalidNumericInput);
    }

    #[test]
    fn border_width_limit() {
        assert_eq!(check_width("border", i64::from(MAX_WIDTH)).unwrap(), MAX_WIDTH);
        let err = check_width("border", i64::from(MAX_WIDTH) + 1).unwrap_err();
        assert!(matches!(err, MergeError::InvalidNumericInput { field: "border", .. }));

        let backend = two_image_backend();
        let mut req = request(MergeMode::TwoHorizontal, &["/a.png", "/b.png"]);
        req.border.width = 1 << 31;
        let err = merge_with_backend(&backend, &req, None).unwrap_err();
        assert_eq!(err.kind(), ErrorKind::InvalidNumericInput);
        assert!(backend.get_operations().is_empty());
    }

    #[test]
    fn canvas_overflow_maps_to_numeric_input() {
        let err = layout_error("border", 7, LayoutError::CanvasTooLarge);
        assert!(matches!(
            &err,
            MergeError::InvalidNumericInput { field: "border", value } if value == "7"
        ));
    }

    #[test]
    fn parse_width_accepts_integers_and_rejects_text() {
        assert_eq!(parse_width("gap", " 12 ").unwrap(), 12);
        assert_eq!(parse_width("gap", "-4").unwrap(), -4);
        let err = parse_width("border", "ten").unwrap_err();
        assert!(matches!(
            &err,
            MergeError::InvalidNumericInput { field: "border", value } if value == "ten"
        ));
    }

    #[test]
    fn no_destination_cancels_without_io() {
        let backend = two_image_backend();
        let mut req = request(MergeMode::TwoHorizontal, &["/a.png", "/b.png"]);
        req.output_path = None;

        let outcome = merge_with_backend(&backend, &req, None).unwrap();
        assert_eq!(outcome, MergeOutcome::Cancelled);
        assert!(backend.get_operations().is_empty());
    }

    #[test]
    fn invalid_color_substitutes_and_warns() {
        let backend = two_image_backend();
        let mut req = request(MergeMode::TwoHorizontal, &["/a.png", "/b.png"]);
        req.gap.color = "not-a-color".to_string();
        let (tx, rx) = mpsc::channel();

        let report = written(merge_with_backend(&backend, &req, Some(tx)).unwrap());

        assert_eq!(report.gap_color, "#FFFFFF");
        assert_eq!(report.warnings.len(), 1);
        assert_eq!(report.warnings[0].field, ColorField::Gap);
        assert_eq!(report.warnings[0].warning.given, "not-a-color");

        let substitutions: Vec<MergeEvent> = rx
            .iter()
            .filter(|e| matches!(e, MergeEvent::ColorSubstituted(_)))
            .collect();
        assert_eq!(substitutions.len(), 1);

        let img = backend.saved_image().unwrap();
        assert_eq!(img.get_pixel(105, 0), &Rgb(WHITE));
    }

    #[test]
    fn valid_colors_produce_no_warnings() {
        let backend = two_image_backend();
        let req = request(MergeMode::TwoHorizontal, &["/a.png", "/b.png"]);

        let report = written(merge_with_backend(&backend, &req, None).unwrap());
        assert!(report.warnings.is_empty());
        assert_eq!(report.border_color, "#000000");
    }

    // =========================================================================
    // Load and write failures
    // =========================================================================

    #[test]
    fn load_failure_aborts_at_first_bad_slot() {
        let backend = MockBackend::new()
            .with_image("/a.png", 10, 10, RED)
            .with_image("/c.png", 10, 10, RED);
        let req = request(MergeMode::ThreeHorizontal, &["/a.png", "/b.png", "/c.png"]);

        let err = merge_with_backend(&backend, &req, None).unwrap_err();

        assert_eq!(err.kind(), ErrorKind::ImageLoadFailure);
        assert_eq!(err.path(), Some(Path::new("/b.png")));
        assert!(matches!(err, MergeError::ImageLoad { slot: 2, .. }));
        assert_eq!(
            backend.get_operations(),
            vec![
                RecordedOp::Load("/a.png".to_string()),
                RecordedOp::Load("/b.png".to_string()),
            ]
        );
    }

    #[test]
    fn save_failure_is_a_write_error() {
        let backend = two_image_backend().failing_saves();
        let req = request(MergeMode::TwoHorizontal, &["/a.png", "/b.png"]);

        let err = merge_with_backend(&backend, &req, None).unwrap_err();
        assert_eq!(err.kind(), ErrorKind::ImageWriteFailure);
        assert_eq!(err.path(), Some(Path::new("/out/merged.png")));
    }

    #[test]
    fn unsupported_extension_fails_before_loading() {
        let backend = two_image_backend();
        let mut req = request(MergeMode::TwoHorizontal, &["/a.png", "/b.png"]);
        req.output_path = Some(PathBuf::from("/out/merged.psd"));

        let err = merge_with_backend(&backend, &req, None).unwrap_err();
        assert_eq!(err.kind(), ErrorKind::ImageWriteFailure);
        assert!(backend.get_operations().is_empty());
    }

    // =========================================================================
    // Destination handling, extras and events
    // =========================================================================

    #[test]
    fn missing_extension_defaults_to_png() {
        assert_eq!(
            resolve_output_path(Path::new("/out/merged")),
            PathBuf::from("/out/merged.png")
        );
        assert_eq!(
            resolve_output_path(Path::new("/out/merged.jpg")),
            PathBuf::from("/out/merged.jpg")
        );

        let backend = two_image_backend();
        let mut req = request(MergeMode::TwoHorizontal, &["/a.png", "/b.png"]);
        req.output_path = Some(PathBuf::from("/out/merged"));
        let report = written(merge_with_backend(&backend, &req, None).unwrap());
        assert_eq!(report.path, PathBuf::from("/out/merged.png"));
    }

    #[test]
    fn jpeg_quality_reaches_the_backend() {
        let backend = two_image_backend();
        let mut req = request(MergeMode::TwoHorizontal, &["/a.png", "/b.png"]);
        req.output_path = Some(PathBuf::from("/out/merged.jpg"));
        req.jpeg_quality = Quality::new(55);

        merge_with_backend(&backend, &req, None).unwrap();
        assert!(matches!(
            &backend.saves()[0],
            RecordedOp::Save { quality: 55, .. }
        ));
    }

    #[test]
    fn extra_images_are_ignored_and_reported() {
        let backend = two_image_backend();
        let req = request(MergeMode::TwoHorizontal, &["/a.png", "/b.png", "/c.png"]);
        let (tx, rx) = mpsc::channel();

        merge_with_backend(&backend, &req, Some(tx)).unwrap();

        let events: Vec<MergeEvent> = rx.iter().collect();
        assert!(events.contains(&MergeEvent::ExtraImagesIgnored {
            required: 2,
            ignored: 1
        }));
        assert!(
            !backend
                .get_operations()
                .contains(&RecordedOp::Load("/c.png".to_string()))
        );
    }

    #[test]
    fn events_follow_pipeline_order() {
        let backend = two_image_backend();
        let mut req = request(MergeMode::TwoHorizontal, &["/a.png", "/b.png"]);
        req.border.width = 1;
        let (tx, rx) = mpsc::channel();

        merge_with_backend(&backend, &req, Some(tx)).unwrap();

        let names: Vec<&str> = rx
            .iter()
            .map(|e| match e {
                MergeEvent::ColorSubstituted(_) => "color",
                MergeEvent::ExtraImagesIgnored { .. } => "extra",
                MergeEvent::ImageLoaded { .. } => "loaded",
                MergeEvent::Composed { .. } => "composed",
                MergeEvent::BorderApplied { .. } => "border",
                MergeEvent::Written { .. } => "written",
            })
            .collect();
        assert_eq!(
            names,
            vec!["loaded", "loaded", "composed", "border", "written"]
        );
    }

    #[test]
    fn report_serializes_to_json() {
        let backend = two_image_backend();
        let mut req = request(MergeMode::TwoHorizontal, &["/a.png", "/b.png"]);
        req.border.color = "nope".to_string();

        let report = written(merge_with_backend(&backend, &req, None).unwrap());
        let json = serde_json::to_value(&report).unwrap();

        assert_eq!(json["mode"], "2-horizontal");
        assert_eq!(json["dimensions"]["width"], 410);
        assert_eq!(json["warnings"][0]["field"], "border");
        assert_eq!(json["warnings"][0]["given"], "nope");
    }
}
