//! Pure Rust image codec backend.
//!
//! Everything is statically linked into the binary.
//!
//! ## Crate mapping
//!
//! | Operation | Crate / function |
//! |---|---|
//! | Sniff format + dimensions | `image::ImageReader::with_guessed_format` + `into_dimensions` |
//! | Decode (JPEG, PNG, GIF, TIFF, WebP, BMP) | `image` crate (pure Rust decoders) |
//! | Resize | `image::DynamicImage::resize_exact` with `Lanczos3` filter |
//! | Encode → JPEG | `image::codecs::jpeg::JpegEncoder` with explicit quality |
//! | Encode → other formats | `image::DynamicImage::write_to` |
//! | Bitmap for wallpaper | `to_rgb8` + `ImageFormat::Bmp` |

use super::backend::{BackendError, Dimensions, Identified, ImageBackend};
use super::params::{Quality, ResizeParams};
use image::codecs::jpeg::JpegEncoder;
use image::imageops::FilterType;
use image::{DynamicImage, ImageFormat, ImageReader};
use std::io::Cursor;

/// Pure Rust backend using the `image` crate ecosystem.
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

fn reader(bytes: &[u8]) -> Result<ImageReader<Cursor<&[u8]>>, BackendError> {
    ImageReader::new(Cursor::new(bytes))
        .with_guessed_format()
        .map_err(|e| BackendError::Decode(e.to_string()))
}

/// Decode an image from memory, sniffing the format from its magic bytes.
fn decode(bytes: &[u8]) -> Result<DynamicImage, BackendError> {
    reader(bytes)?
        .decode()
        .map_err(|e| BackendError::Decode(e.to_string()))
}

/// Encode into `format`.
///
/// JPEG has no alpha channel, so it always gets RGB8. Other formats get RGB8
/// or RGBA8 depending on the source; every compiled-in encoder accepts both.
fn encode(img: &DynamicImage, format: ImageFormat, quality: Quality) -> Result<Vec<u8>, BackendError> {
    let mut buf = Vec::new();
    let result = match format {
        ImageFormat::Jpeg => {
            let rgb = DynamicImage::ImageRgb8(img.to_rgb8());
            let encoder = JpegEncoder::new_with_quality(&mut buf, quality.value());
            rgb.write_with_encoder(encoder)
        }
        other => {
            let normalized = if img.color().has_alpha() {
                DynamicImage::ImageRgba8(img.to_rgba8())
            } else {
                DynamicImage::ImageRgb8(img.to_rgb8())
            };
            normalized.write_to(&mut Cursor::new(&mut buf), other)
        }
    };
    result.map_err(|e| BackendError::Encode {
        format,
        message: e.to_string(),
    })?;
    Ok(buf)
}

impl ImageBackend for RustBackend {
    fn identify(&self, bytes: &[u8]) -> Result<Identified, BackendError> {
        let reader = reader(bytes)?;
        let format = reader.format();
        let (width, height) = reader
            .into_dimensions()
            .map_err(|e| BackendError::Decode(e.to_string()))?;
        Ok(Identified {
            dimensions: Dimensions { width, height },
            format,
        })
    }

    fn resize(&self, params: &ResizeParams<'_>) -> Result<Vec<u8>, BackendError> {
        let img = decode(params.source)?;
        let resized = img.resize_exact(params.width, params.height, FilterType::Lanczos3);
        encode(&resized, params.format, params.quality)
    }

    fn to_bitmap(&self, bytes: &[u8]) -> Result<Vec<u8>, BackendError> {
        let img = decode(bytes)?;
        let rgb = DynamicImage::ImageRgb8(img.to_rgb8());
        let mut buf = Vec::new();
        rgb.write_to(&mut Cursor::new(&mut buf), ImageFormat::Bmp)
            .map_err(|e| BackendError::Encode {
                format: ImageFormat::Bmp,
                message: e.to_string(),
            })?;
        Ok(buf)
    }
}
