//! # NASA Image of the Day
//!
//! Fetches the NASA "Image of the Day" page, downloads the featured picture,
//! caps it at 3840x2160, keeps it on disk and sets it as the desktop
//! wallpaper. Older downloads are pruned unless history is kept, and every
//! run prepends a timestamped block to a log file.
//!
//! # Architecture
//!
//! A run is a straight line of steps, each behind a small seam so the whole
//! thing can be exercised without network or desktop:
//!
//! ```text
//! PageFetcher ─▶ resolve ─▶ PageFetcher ─▶ imaging ─▶ disk ─▶ WallpaperSetter ─▶ prune
//!   (page)       (URL)       (bytes)      (resize)            (BMP)
//! ```
//!
//! [`workflow::execute`] drives one run and always flushes the
//! [`run_log::RunLog`] at the end, whatever happened.
//!
//! # Module Map
//!
//! | Module | Role |
//! |--------|------|
//! | [`workflow`] | The run itself: stages, errors, reuse-by-filename, cleanup |
//! | [`fetch`] | Blocking HTTP behind the [`fetch::PageFetcher`] trait |
//! | [`resolve`] | Finds the article image in the page and makes its URL absolute |
//! | [`imaging`] | Identify, downsize and BMP conversion with the `image` crate |
//! | [`wallpaper`] | Platform wallpaper helpers behind [`wallpaper::WallpaperSetter`] |
//! | [`run_log`] | Timestamped per-run log, written newest-first |
//! | [`config`] | `config.toml` loading and CLI precedence |
//! | [`logging`] | `tracing` subscriber for console output |
//! | [`output`] | End-of-run summary |
//!
//! # Design Decisions
//!
//! ## Filename Is Identity
//!
//! The saved file is named after the last URL segment and a file with that
//! name short-circuits the download. Re-running on the same day costs one
//! page fetch and no image transfer.
//!
//! ## Log Failures, Don't Crash
//!
//! Every failure inside a run becomes a [`workflow::RunFailure`], is written
//! to the run log and reported in the summary. The binary still exits
//! non-zero so schedulers notice.

pub mod config;
pub mod fetch;
pub mod imaging;
pub mod logging;
pub mod output;
pub mod resolve;
pub mod run_log;
pub mod wallpaper;
pub mod workflow;

#[cfg(test)]
pub(crate) mod test_helpers;
