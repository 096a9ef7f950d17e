//! Image codec — pure Rust, zero external dependencies.
//!
//! | Operation | Crate / function |
//! |---|---|
//! | **Identify** | `ImageReader::with_guessed_format` + `into_dimensions` |
//! | **Resize** | Lanczos3 `resize_exact`, re-encoded in the source format |
//! | **Bitmap** | RGB8 → BMP, for the OS wallpaper call |
//!
//! The module is split into:
//! - **Calculations**: Pure functions for dimension math (unit testable)
//! - **Parameters**: Data structures describing image operations
//! - **Backend**: [`ImageBackend`] trait + [`RustBackend`]
//! - **Operations**: High-level functions combining calculations + backend

pub mod backend;
mod calculations;
pub mod operations;
mod params;
pub mod rust_backend;

pub use backend::{BackendError, Dimensions, Identified, ImageBackend};
pub use calculations::{calculate_fit_dimensions, fits_within};
pub use operations::{Resized, get_dimensions, output_format, resize_if_exceeds};
pub use params::{MAX_RESOLUTION, MaxResolution, Quality, ResizeParams};
pub use rust_backend::RustBackend;
