//! Parameter types for image operations.
//!
//! These structs describe *what* to do, not *how* to do it. They are the
//! interface between the high-level [`operations`](super::operations) module
//! (which decides whether an image needs shrinking) and the
//! [`backend`](super::backend) (which does the pixel work).
//!
//! ## Types
//!
//! - [`Quality`] — JPEG encoding quality (1–100, default 90). Clamped on construction.
//! - [`MaxResolution`] — Bounding box every saved image must fit in.
//! - [`ResizeParams`] — Everything a resize needs: source bytes, target size, output format, quality.

use image::ImageFormat;

/// Quality setting for lossy image encoding (1-100).
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Quality(pub u8);

impl Quality {
    pub fn new(value: u8) -> Self {
        Self(value.clamp(1, 100))
    }

    pub fn value(self) -> u8 {
        self.0
    }
}

impl Default for Quality {
    fn default() -> Self {
        Self(90)
    }
}

/// Largest width and height a saved image may have.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct MaxResolution {
    pub width: u32,
    pub height: u32,
}

/// 4K UHD, the bound applied to every downloaded image.
pub const MAX_RESOLUTION: MaxResolution = MaxResolution {
    width: 3840,
    height: 2160,
};

impl std::fmt::Display for MaxResolution {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}x{}", self.width, self.height)
    }
}

/// Parameters for a resize operation.
#[derive(Debug, Clone, PartialEq)]
pub struct ResizeParams<'a> {
    /// Encoded source image.
    pub source: &'a [u8],
    /// Exact output dimensions. Callers compute these with the aspect ratio preserved.
    pub width: u32,
    pub height: u32,
    pub format: ImageFormat,
    /// Only used when `format` is JPEG.
    pub quality: Quality,
}
