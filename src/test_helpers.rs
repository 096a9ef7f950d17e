//! Shared test utilities for the nasa-iotd test suite.
//!
//! Provides synthetic image builders, a stub page, and test doubles for the
//! [`PageFetcher`] and [`WallpaperSetter`] seams.
//!
//! # Usage
//!
//! ```rust,ignore
//! use crate::test_helpers::*;
//!
//! let tmp = TempDir::new().unwrap();
//! let fetcher = MockFetcher::new(stub_page("/images/test.jpg"), jpeg_bytes(100, 100));
//! let wallpaper = RecordingWallpaper::default();
//! let settings = test_settings(tmp.path());
//! ```

use std::cell::RefCell;
use std::io::Cursor;
use std::path::{Path, PathBuf};

use image::{DynamicImage, ImageFormat, RgbImage, RgbaImage};

use crate::config::{DEFAULT_PAGE_URL, Settings};
use crate::fetch::{FetchError, PageFetcher};
use crate::imaging::{MAX_RESOLUTION, Quality};
use crate::wallpaper::{WallpaperError, WallpaperSetter};

// =========================================================================
// Synthetic images
// =========================================================================

fn encode(img: DynamicImage, format: ImageFormat) -> Vec<u8> {
    let mut buf = Vec::new();
    img.write_to(&mut Cursor::new(&mut buf), format).unwrap();
    buf
}

/// A gradient JPEG of the given size.
pub fn jpeg_bytes(width: u32, height: u32) -> Vec<u8> {
    let img = RgbImage::from_fn(width, height, |x, y| {
        image::Rgb([(x % 256) as u8, (y % 256) as u8, 128])
    });
    encode(DynamicImage::ImageRgb8(img), ImageFormat::Jpeg)
}

/// An opaque RGB PNG of the given size.
pub fn png_bytes(width: u32, height: u32) -> Vec<u8> {
    let img = RgbImage::from_pixel(width, height, image::Rgb([10, 20, 30]));
    encode(DynamicImage::ImageRgb8(img), ImageFormat::Png)
}

/// A half-transparent RGBA PNG of the given size.
pub fn rgba_png_bytes(width: u32, height: u32) -> Vec<u8> {
    let img = RgbaImage::from_pixel(width, height, image::Rgba([200, 100, 50, 128]));
    encode(DynamicImage::ImageRgba8(img), ImageFormat::Png)
}

// =========================================================================
// Page + settings
// =========================================================================

/// A minimal Image of the Day page with one article image.
pub fn stub_page(src: &str) -> String {
    format!(
        r#"<!doctype html>
<html><body>
  <header><img src="/logo.svg" alt="NASA"></header>
  <main>
    <article>
      <h1>Image of the Day</h1>
      <figure><img src="{src}" alt="today"></figure>
    </article>
  </main>
</body></html>"#
    )
}

/// Settings rooted in `root`: `images/`, `logs/` and `wallpaper.bmp`.
pub fn test_settings(root: &Path) -> Settings {
    Settings {
        save_dir: root.join("images"),
        log_dir: root.join("logs"),
        keep_history: false,
        page_url: DEFAULT_PAGE_URL.to_string(),
        site_origin: "https://www.nasa.gov".to_string(),
        jpeg_quality: Quality::default(),
        set_wallpaper: true,
        bitmap_path: root.join("wallpaper.bmp"),
        max_resolution: MAX_RESOLUTION,
    }
}

// =========================================================================
// Test doubles
// =========================================================================

/// Fetcher serving one page and one image, recording every request.
///
/// Requests are recorded as `"page <url>"` and `"bytes <url>"`.
pub struct MockFetcher {
    page: Option<String>,
    image: Vec<u8>,
    calls: RefCell<Vec<String>>,
}

impl MockFetcher {
    pub fn new(page: impl Into<String>, image: Vec<u8>) -> Self {
        Self {
            page: Some(page.into()),
            image,
            calls: RefCell::new(Vec::new()),
        }
    }

    /// Every page request fails with HTTP 503.
    pub fn unavailable() -> Self {
        Self {
            page: None,
            image: Vec::new(),
            calls: RefCell::new(Vec::new()),
        }
    }

    pub fn calls(&self) -> Vec<String> {
        self.calls.borrow().clone()
    }

    pub fn byte_requests(&self) -> usize {
        self.calls
            .borrow()
            .iter()
            .filter(|c| c.starts_with("bytes "))
            .count()
    }
}

impl PageFetcher for MockFetcher {
    fn fetch_page(&self, url: &str) -> Result<String, FetchError> {
        self.calls.borrow_mut().push(format!("page {url}"));
        self.page.clone().ok_or_else(|| FetchError::Status {
            url: url.to_string(),
            status: 503,
        })
    }

    fn fetch_bytes(&self, url: &str) -> Result<Vec<u8>, FetchError> {
        self.calls.borrow_mut().push(format!("bytes {url}"));
        Ok(self.image.clone())
    }
}

/// Wallpaper setter that snapshots the bitmap file it was given.
#[derive(Default)]
pub struct RecordingWallpaper {
    pub applied: RefCell<Vec<(PathBuf, Vec<u8>)>>,
    pub fail: bool,
}

impl RecordingWallpaper {
    pub fn failing() -> Self {
        Self {
            applied: RefCell::new(Vec::new()),
            fail: true,
        }
    }

    pub fn count(&self) -> usize {
        self.applied.borrow().len()
    }
}

impl WallpaperSetter for RecordingWallpaper {
    fn apply(&self, bitmap: &Path) -> Result<(), WallpaperError> {
        let bytes = std::fs::read(bitmap).unwrap();
        self.applied
            .borrow_mut()
            .push((bitmap.to_path_buf(), bytes));
        if self.fail {
            return Err(WallpaperError::Failed {
                program: "mock",
                status: "exit status: 1".into(),
                stderr: "no desktop session".into(),
            });
        }
        Ok(())
    }
}

/// File names in `dir`, sorted. Empty if `dir` does not exist.
pub fn list_names(dir: &Path) -> Vec<String> {
    let Ok(entries) = std::fs::read_dir(dir) else {
        return Vec::new();
    };
    let mut names: Vec<String> = entries
        .map(|e| e.unwrap().file_name().to_string_lossy().into_owned())
        .collect();
    names.sort();
    names
}
