//! Request types shared by the CLI, the config layer and the merge pipeline.
//!
//! A [`MergeRequest`] is built once per operation and handed to
//! [`merge`](crate::merge::merge) by reference. Nothing in here is mutated by
//! the pipeline.

use crate::imaging::Quality;
use serde::{Deserialize, Serialize};
use std::fmt;
use std::path::PathBuf;
use std::str::FromStr;

/// How the input images are arranged in the composite.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
pub enum MergeMode {
    #[default]
    #[serde(rename = "2-horizontal", alias = "2_horiz")]
    TwoHorizontal,
    #[serde(rename = "2-vertical", alias = "2_vert")]
    TwoVertical,
    #[serde(rename = "3-horizontal", alias = "3_horiz")]
    ThreeHorizontal,
    #[serde(rename = "3-vertical", alias = "3_vert")]
    ThreeVertical,
    #[serde(rename = "4-grid", alias = "4_grid")]
    FourGrid,
}

/// The layout algorithm a mode runs.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Arrangement {
    Horizontal,
    Vertical,
    Grid,
}

impl MergeMode {
    pub const ALL: [MergeMode; 5] = [
        MergeMode::TwoHorizontal,
        MergeMode::TwoVertical,
        MergeMode::ThreeHorizontal,
        MergeMode::ThreeVertical,
        MergeMode::FourGrid,
    ];

    /// Number of images this mode needs before layout can start.
    pub fn required_images(self) -> usize {
        match self {
            MergeMode::TwoHorizontal | MergeMode::TwoVertical => 2,
            MergeMode::ThreeHorizontal | MergeMode::ThreeVertical => 3,
            MergeMode::FourGrid => 4,
        }
    }

    pub fn arrangement(self) -> Arrangement {
        match self {
            MergeMode::TwoHorizontal | MergeMode::ThreeHorizontal => Arrangement::Horizontal,
            MergeMode::TwoVertical | MergeMode::ThreeVertical => Arrangement::Vertical,
            MergeMode::FourGrid => Arrangement::Grid,
        }
    }

    /// Canonical tag, as accepted on the command line and in `config.toml`.
    pub fn tag(self) -> &'static str {
        match self {
            MergeMode::TwoHorizontal => "2-horizontal",
            MergeMode::TwoVertical => "2-vertical",
            MergeMode::ThreeHorizontal => "3-horizontal",
            MergeMode::ThreeVertical => "3-vertical",
            MergeMode::FourGrid => "4-grid",
        }
    }

    /// Human-readable description for listings.
    pub fn description(self) -> &'static str {
        match self {
            MergeMode::TwoHorizontal => "2 images side by side",
            MergeMode::TwoVertical => "2 images stacked",
            MergeMode::ThreeHorizontal => "3 images side by side",
            MergeMode::ThreeVertical => "3 images stacked",
            MergeMode::FourGrid => "4 images in a 2x2 grid (TL, TR, BL, BR)",
        }
    }
}

impl fmt::Display for MergeMode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.tag())
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct UnknownMode(pub String);

impl fmt::Display for UnknownMode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let tags: Vec<&str> = MergeMode::ALL.iter().map(|m| m.tag()).collect();
        write!(
            f,
            "unknown merge mode '{}' (expected one of: {})",
            self.0,
            tags.join(", ")
        )
    }
}

impl std::error::Error for UnknownMode {}

impl FromStr for MergeMode {
    type Err = UnknownMode;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "2-horizontal" | "2_horiz" | "2-horiz" => Ok(MergeMode::TwoHorizontal),
            "2-vertical" | "2_vert" | "2-vert" => Ok(MergeMode::TwoVertical),
            "3-horizontal" | "3_horiz" | "3-horiz" => Ok(MergeMode::ThreeHorizontal),
            "3-vertical" | "3_vert" | "3-vert" => Ok(MergeMode::ThreeVertical),
            "4-grid" | "4_grid" | "grid" => Ok(MergeMode::FourGrid),
            _ => Err(UnknownMode(s.to_string())),
        }
    }
}

/// Spacing between placed images; `color` is also the canvas fill.
///
/// Width is signed so that out-of-range input reaches the pipeline's numeric
/// check instead of being silently wrapped at the boundary.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct GapSpec {
    pub width: i64,
    pub color: String,
}

/// Frame drawn once around the finished composite. Width 0 disables it.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct BorderSpec {
    pub width: i64,
    pub color: String,
}

/// Everything one merge needs.
///
/// `image_paths` is positional: slot `i` of the mode is `image_paths[i]`. A
/// slot that is absent or holds an empty path counts as missing.
/// `output_path: None` means no destination was chosen.
#[derive(Debug, Clone, PartialEq)]
pub struct MergeRequest {
    pub mode: MergeMode,
    pub image_paths: Vec<PathBuf>,
    pub gap: GapSpec,
    pub border: BorderSpec,
    pub output_path: Option<PathBuf>,
    pub jpeg_quality: Quality,
}
