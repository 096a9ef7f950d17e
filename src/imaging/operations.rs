//! High-level image operations.
//!
//! These functions combine calculations with backend execution. They decide
//! whether an image needs work at all, compute the parameters, and call the
//! backend.

use super::backend::{BackendError, Dimensions, ImageBackend};
use super::calculations::{calculate_fit_dimensions, fits_within};
use super::params::{MaxResolution, Quality, ResizeParams};
use image::ImageFormat;

/// Result type for image operations.
pub type Result<T> = std::result::Result<T, BackendError>;

/// Format used when the source format is unknown or has no encoder compiled in.
pub const FALLBACK_FORMAT: ImageFormat = ImageFormat::Jpeg;

/// Outcome of [`resize_if_exceeds`].
#[derive(Debug, Clone, PartialEq)]
pub enum Resized {
    /// Already within bounds. Holds the caller's bytes untouched.
    Unchanged { bytes: Vec<u8>, dimensions: Dimensions },
    /// Scaled down and re-encoded.
    Downsized {
        bytes: Vec<u8>,
        from: Dimensions,
        to: Dimensions,
        format: ImageFormat,
    },
}

impl Resized {
    pub fn bytes(&self) -> &[u8] {
        match self {
            Resized::Unchanged { bytes, .. } | Resized::Downsized { bytes, .. } => bytes,
        }
    }

    pub fn into_bytes(self) -> Vec<u8> {
        match self {
            Resized::Unchanged { bytes, .. } | Resized::Downsized { bytes, .. } => bytes,
        }
    }
}

/// Get image dimensions using the backend.
pub fn get_dimensions(backend: &impl ImageBackend, bytes: &[u8]) -> Result<Dimensions> {
    Ok(backend.identify(bytes)?.dimensions)
}

/// Pick the encoding for a resized image: the source format when we can
/// write it, [`FALLBACK_FORMAT`] otherwise.
pub fn output_format(source: Option<ImageFormat>) -> ImageFormat {
    source
        .filter(|f| f.writing_enabled())
        .unwrap_or(FALLBACK_FORMAT)
}

/// Shrink an encoded image so it fits inside `max`.
///
/// Images already within bounds are returned byte-identical, with no decode
/// and no re-encode. Larger images are scaled with Lanczos3 so the
/// constraining edge sits exactly on the bound.
pub fn resize_if_exceeds(
    backend: &impl ImageBackend,
    bytes: Vec<u8>,
    max: MaxResolution,
    quality: Quality,
) -> Result<Resized> {
    let identified = backend.identify(&bytes)?;
    let from = identified.dimensions;

    if fits_within(from, max) {
        return Ok(Resized::Unchanged {
            bytes,
            dimensions: from,
        });
    }

    let to = calculate_fit_dimensions(from, max);
    let format = output_format(identified.format);
    let resized = backend.resize(&ResizeParams {
        source: &bytes,
        width: to.width,
        height: to.height,
        format,
        quality,
    })?;

    Ok(Resized::Downsized {
        bytes: resized,
        from,
        to,
        format,
    })
}
