//! Pure calculation functions for image dimensions.
//!
//! All functions here are pure and testable without any I/O or images.

use super::backend::Dimensions;
use super::params::MaxResolution;

/// Whether an image is already small enough to keep as-is.
///
/// Both edges must be within bounds; an image exactly at the bound fits.
pub fn fits_within(source: Dimensions, max: MaxResolution) -> bool {
    source.width <= max.width && source.height <= max.height
}

/// Calculate dimensions that fit inside `max` while keeping the source aspect ratio.
///
/// The constraining edge lands exactly on the bound and the other edge is
/// rounded to the nearest pixel (never below 1). Integer math keeps the
/// constraining edge exact, which float division does not guarantee.
///
/// # Examples
/// ```
/// # use nasa_iotd::imaging::{Dimensions, MAX_RESOLUTION, calculate_fit_dimensions};
/// // 16:10 source is height-limited in a 16:9 box
/// let fit = calculate_fit_dimensions(Dimensions { width: 8000, height: 5000 }, MAX_RESOLUTION);
/// assert_eq!(fit, Dimensions { width: 3456, height: 2160 });
/// ```
pub fn calculate_fit_dimensions(source: Dimensions, max: MaxResolution) -> Dimensions {
    let (src_w, src_h) = (u64::from(source.width), u64::from(source.height));
    let (max_w, max_h) = (u64::from(max.width), u64::from(max.height));

    // Compare src_w / src_h against max_w / max_h without dividing.
    if src_w * max_h >= src_h * max_w {
        // Source is wider than the box: width is the constraint
        let h = (src_h * max_w + src_w / 2) / src_w;
        Dimensions {
            width: max.width,
            height: h.clamp(1, max_h) as u32,
        }
    } else {
        // Source is taller than the box: height is the constraint
        let w = (src_w * max_h + src_h / 2) / src_h;
        Dimensions {
            width: w.clamp(1, max_w) as u32,
            height: max.height,
        }
    }
}
