//! Image processing — pure Rust, built on the `image` crate.
//!
//! | Operation | Crate / function |
//! |---|---|
//! | **Decode** | `image::ImageReader`, flattened with `into_rgb8` |
//! | **Resize** | `image::imageops::resize` with Lanczos3 |
//! | **Layout** | pure plans, pasted with `image::imageops::replace` |
//! | **Encode** | `image` PNG/JPEG/BMP/TIFF/WebP encoders |
//!
//! The module is split into:
//! - **Calculations**: Pure functions for dimension math (unit testable)
//! - **Parameters**: Data structures describing a layout
//! - **Backend**: [`ImageBackend`] trait + [`RustBackend`]
//! - **Operations**: Resizing, plan rendering and borders on in-memory images
//! - **Layout**: The three composite arrangements, dispatched by mode

pub mod backend;
mod calculations;
pub mod layout;
pub mod operations;
mod params;
pub mod rust_backend;

pub use backend::{BackendError, Dimensions, ImageBackend};
pub use calculations::{
    bordered_dimensions, fit_to_height, fit_to_width, plan_grid, plan_horizontal, plan_vertical,
    scale_dimension,
};
pub use layout::{LayoutError, compose, merge_grid, merge_horizontal, merge_vertical};
pub use operations::{apply_border, resize_to_height, resize_to_width};
pub use params::{Cell, LayoutPlan, Quality};
pub use rust_backend::{RustBackend, supported_input_extensions, supported_output_extensions};
