//! CLI output formatting for merges and the listing commands.
//!
//! # Output Format
//!
//! ## Merge progress
//!
//! ```text
//! 001 a.jpg (1200x800)
//!     Source: photos/a.jpg
//! 002 b.png (640x480)
//!     Source: photos/b.png
//! Composed 2-horizontal → 1850x800
//! Border 5px → 1860x810
//! Wrote merged.png (2.4 MB)
//! ```
//!
//! Warnings (substituted colors, ignored images) are prefixed with
//! `warning:` and printed as they happen.
//!
//! ## Failure
//!
//! ```text
//! error: load error: failed to load image 2 (photos/b.png): decode failed: ...
//! ```
//!
//! # Architecture
//!
//! Each output has a `format_*` function (returns `Vec<String>`) for
//! testability and a `print_*` wrapper that writes to stdout or stderr.
//! Format functions are pure: no I/O, no side effects.

use crate::merge::{MergeError, MergeEvent, MergeReport};
use crate::types::MergeMode;
use std::path::Path;

// ============================================================================
// Shared display helpers
// ============================================================================

/// Format a 1-based slot number as 3-digit zero-padded.
fn format_index(pos: usize) -> String {
    format!("{:0>3}", pos)
}

/// Return indentation string: 4 spaces per depth level.
fn indent(depth: usize) -> String {
    "    ".repeat(depth)
}

fn file_name(path: &Path) -> String {
    path.file_name()
        .map(|f| f.to_string_lossy().into_owned())
        .unwrap_or_else(|| path.display().to_string())
}

/// Human-readable byte count: `512 B`, `3.4 KB`, `2.4 MB`.
fn format_bytes(bytes: u64) -> String {
    const KB: f64 = 1024.0;
    const MB: f64 = KB * 1024.0;
    let b = bytes as f64;
    if b >= MB {
        format!("{:.1} MB", b / MB)
    } else if b >= KB {
        format!("{:.1} KB", b / KB)
    } else {
        format!("{} B", bytes)
    }
}

// ============================================================================
// Merge output
// ============================================================================

/// Format a single merge progress event as display lines.
pub fn format_event(event: &MergeEvent) -> Vec<String> {
    match event {
        MergeEvent::ColorSubstituted(sub) => {
            vec![format!("warning: {} {}", sub.field, sub.warning)]
        }
        MergeEvent::ExtraImagesIgnored { required, ignored } => vec![format!(
            "warning: mode uses {} images, ignoring {} more",
            required, ignored
        )],
        MergeEvent::ImageLoaded {
            slot,
            path,
            dimensions,
        } => vec![
            format!("{} {} ({})", format_index(*slot), file_name(path), dimensions),
            format!("{}Source: {}", indent(1), path.display()),
        ],
        MergeEvent::Composed { mode, dimensions } => {
            vec![format!("Composed {} \u{2192} {}", mode, dimensions)]
        }
        MergeEvent::BorderApplied { width, dimensions } => {
            vec![format!("Border {}px \u{2192} {}", width, dimensions)]
        }
        MergeEvent::Written { path, bytes } => {
            vec![format!("Wrote {} ({})", path.display(), format_bytes(*bytes))]
        }
    }
}

/// Format the closing summary of a successful merge.
pub fn format_report(report: &MergeReport) -> Vec<String> {
    let mut lines = vec![format!(
        "Merged {} \u{2192} {} ({})",
        report.mode,
        report.path.display(),
        report.dimensions
    )];
    lines.push(format!("{}Gap color: {}", indent(1), report.gap_color));
    lines.push(format!("{}Border color: {}", indent(1), report.border_color));
    if !report.warnings.is_empty() {
        lines.push(format!(
            "{}{} color warning(s)",
            indent(1),
            report.warnings.len()
        ));
    }
    lines
}

pub fn print_report(report: &MergeReport) {
    for line in format_report(report) {
        println!("{}", line);
    }
}

/// Format a fatal merge error, kind first.
pub fn format_error(err: &MergeError) -> Vec<String> {
    let mut lines = vec![format!("error: {}: {}", err.kind(), err)];
    if let MergeError::MissingImage { required, .. } = err {
        lines.push(format!(
            "{}this mode needs {} input images",
            indent(1),
            required
        ));
    }
    lines
}

pub fn print_error(err: &MergeError) {
    for line in format_error(err) {
        eprintln!("{}", line);
    }
}

/// Line printed when no destination was chosen.
pub fn format_cancelled() -> String {
    "No output chosen; nothing written".to_string()
}

// ============================================================================
// Listings
// ============================================================================

/// One line per mode: tag, required image count and description.
pub fn format_modes() -> Vec<String> {
    MergeMode::ALL
        .iter()
        .map(|mode| {
            format!(
                "{:<14}{} images  {}",
                mode.tag(),
                mode.required_images(),
                mode.description()
            )
        })
        .collect()
}

pub fn print_modes() {
    for line in format_modes() {
        println!("{}", line);
    }
}

/// Readable and writable file extensions.
pub fn format_formats(input: &[&str], output: &[&str]) -> Vec<String> {
    vec![
        format!("Read:  {}", input.join(", ")),
        format!("Write: {}", output.join(", ")),
    ]
}

pub fn print_formats(input: &[&str], output: &[&str]) {
    for line in format_formats(input, output) {
        println!("{}", line);
    }
}
