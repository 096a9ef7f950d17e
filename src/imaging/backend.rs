//! Image codec backend trait and shared types.
//!
//! The [`ImageBackend`] trait defines the three operations the workflow needs
//! from an image library: identify, resize and bitmap conversion. All of them
//! work on in-memory encoded bytes; the workflow owns every file write.
//!
//! The production implementation is
//! [`RustBackend`](super::rust_backend::RustBackend), built on the `image`
//! crate's pure Rust codecs.

use super::params::ResizeParams;
use image::ImageFormat;
use thiserror::Error;

#[derive(Error, Debug)]
pub enum BackendError {
    #[error("Failed to decode image: {0}")]
    Decode(String),
    #[error("Failed to encode image as {format:?}: {message}")]
    Encode {
        format: ImageFormat,
        message: String,
    },
}

/// Pixel dimensions of an image.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Dimensions {
    pub width: u32,
    pub height: u32,
}

impl std::fmt::Display for Dimensions {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}x{}", self.width, self.height)
    }
}

/// Result of an identify operation.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Identified {
    pub dimensions: Dimensions,
    /// Container format sniffed from the bytes, if the backend recognised it.
    pub format: Option<ImageFormat>,
}

/// Trait for image codec backends.
pub trait ImageBackend {
    /// Read dimensions and format without decoding the pixel data.
    fn identify(&self, bytes: &[u8]) -> Result<Identified, BackendError>;

    /// Decode, resize to exactly `params.width` x `params.height`, re-encode.
    fn resize(&self, params: &ResizeParams<'_>) -> Result<Vec<u8>, BackendError>;

    /// Decode, drop any alpha channel and encode as an uncompressed BMP.
    fn to_bitmap(&self, bytes: &[u8]) -> Result<Vec<u8>, BackendError>;
}
