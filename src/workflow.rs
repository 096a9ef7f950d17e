//! One run of the tool: fetch → parse → resize → persist → wallpaper → cleanup.
//!
//! ## Stages
//!
//! ```text
//! Start ─▶ UrlResolved ─┬─▶ Existing ───┬─▶ WallpaperSet ─▶ CleanedUp ─▶ Done
//!                       └─▶ Downloaded ─┘
//! ```
//!
//! Any step can fail. [`run`] stops at the first error and returns it as a
//! [`RunFailure`] carrying the last stage reached. Nothing is retried.
//! [`execute`] wraps a run with the begin/end markers and always flushes the
//! [`RunLog`] afterwards, on success and on failure alike.
//!
//! ## Reuse by filename
//!
//! The image is saved under the last path segment of its URL. If that file
//! already exists the download is skipped and the file on disk is used as-is.
//! Two different images with the same trailing filename are therefore
//! treated as the same image.
//!
//! ## Concurrency
//!
//! None. Two runs pointed at the same directories race on the prune and on
//! the log rewrite; there is no locking.

use crate::config::Settings;
use crate::fetch::{FetchError, HttpFetcher, PageFetcher};
use crate::imaging::{BackendError, Dimensions, ImageBackend, Resized, RustBackend, resize_if_exceeds};
use crate::resolve::{ResolveError, find_image_url, target_filename};
use crate::run_log::RunLog;
use crate::wallpaper::{SystemWallpaper, WallpaperError, WallpaperSetter};
use std::ffi::OsStr;
use std::fs;
use std::io;
use std::path::{Path, PathBuf};
use thiserror::Error;
use tracing::debug;
use walkdir::WalkDir;

/// Progress through a run.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Stage {
    Start,
    UrlResolved,
    /// The target file was already on disk.
    Existing,
    /// The image was downloaded, resized if needed, and saved.
    Downloaded,
    WallpaperSet,
    CleanedUp,
    Done,
}

impl std::fmt::Display for Stage {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let name = match self {
            Stage::Start => "start",
            Stage::UrlResolved => "url resolved",
            Stage::Existing => "existing image",
            Stage::Downloaded => "downloaded",
            Stage::WallpaperSet => "wallpaper set",
            Stage::CleanedUp => "cleaned up",
            Stage::Done => "done",
        };
        f.write_str(name)
    }
}

#[derive(Error, Debug)]
pub enum RunError {
    #[error(transparent)]
    NotFound(#[from] ResolveError),
    #[error(transparent)]
    Network(#[from] FetchError),
    #[error(transparent)]
    Decode(#[from] BackendError),
    #[error("Failed to {action} {}: {source}", .path.display())]
    Filesystem {
        action: &'static str,
        path: PathBuf,
        #[source]
        source: io::Error,
    },
    #[error(transparent)]
    Wallpaper(#[from] WallpaperError),
}

impl RunError {
    fn fs<'a>(action: &'static str, path: &'a Path) -> impl FnOnce(io::Error) -> RunError + 'a {
        move |source| RunError::Filesystem {
            action,
            path: path.to_path_buf(),
            source,
        }
    }
}

/// A run that stopped early.
#[derive(Error, Debug)]
#[error("{error}")]
pub struct RunFailure {
    /// Last stage completed before the error.
    pub stage: Stage,
    #[source]
    pub error: RunError,
}

trait AtStage<T> {
    fn at(self, stage: Stage) -> Result<T, RunFailure>;
}

impl<T, E: Into<RunError>> AtStage<T> for Result<T, E> {
    fn at(self, stage: Stage) -> Result<T, RunFailure> {
        self.map_err(|e| RunFailure {
            stage,
            error: e.into(),
        })
    }
}

/// Where the wallpaper bytes came from.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ImageSource {
    /// Reused from a previous run.
    Existing,
    /// Fetched this run. `original` and `saved` differ when it was downsized.
    Downloaded { original: Dimensions, saved: Dimensions },
}

/// Summary of a successful run.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RunOutcome {
    pub image_url: String,
    pub filename: String,
    pub saved_path: PathBuf,
    pub source: ImageSource,
    pub wallpaper_applied: bool,
    /// Names removed from the save directory, in name order.
    pub pruned: Vec<String>,
    pub stage: Stage,
}

/// Result of [`execute`]: the run itself and the log flush that followed it.
#[derive(Debug)]
pub struct Execution {
    pub result: Result<RunOutcome, RunFailure>,
    pub log_file: io::Result<PathBuf>,
}

impl Execution {
    pub fn succeeded(&self) -> bool {
        self.result.is_ok()
    }

    /// Process exit status: 0 after a successful run, 1 after a failed one.
    /// A log file that could not be written does not change it.
    pub fn exit_status(&self) -> u8 {
        if self.succeeded() { 0 } else { 1 }
    }
}

fn advance(stage: &mut Stage, next: Stage) {
    debug!(from = %stage, to = %next, "stage");
    *stage = next;
}

/// Run the workflow against real HTTP, the `image` backend and the OS wallpaper.
pub fn execute(settings: &Settings) -> Execution {
    let mut log = RunLog::new();
    log.info("---- Execution begins ----");
    let result = match HttpFetcher::new() {
        Ok(fetcher) => run(
            &fetcher,
            &RustBackend::new(),
            &SystemWallpaper::new(),
            settings,
            &mut log,
        ),
        Err(e) => Err::<RunOutcome, _>(e).at(Stage::Start),
    };
    finish(result, settings, log)
}

/// [`execute`] with injected collaborators.
pub fn execute_with(
    fetcher: &impl PageFetcher,
    backend: &impl ImageBackend,
    wallpaper: &impl WallpaperSetter,
    settings: &Settings,
) -> Execution {
    let mut log = RunLog::new();
    log.info("---- Execution begins ----");
    let result = run(fetcher, backend, wallpaper, settings, &mut log);
    finish(result, settings, log)
}

fn finish(result: Result<RunOutcome, RunFailure>, settings: &Settings, mut log: RunLog) -> Execution {
    if let Err(failure) = &result {
        log.error(format!("ERROR : {}", failure.error));
        debug!(stage = %failure.stage, "run failed");
    }
    log.info("---- End of execution ----");
    let log_file = log.flush_to(&settings.log_dir);
    if let Err(e) = &log_file {
        tracing::error!(
            "Could not write log file in {}: {e}",
            settings.log_dir.display()
        );
    }
    Execution { result, log_file }
}

/// The fallible part of a run. Every message goes to `log`.
pub fn run(
    fetcher: &impl PageFetcher,
    backend: &impl ImageBackend,
    wallpaper: &impl WallpaperSetter,
    settings: &Settings,
    log: &mut RunLog,
) -> Result<RunOutcome, RunFailure> {
    let mut stage = Stage::Start;

    log.info("Retrieving the NASA page...");
    let html = fetcher.fetch_page(&settings.page_url).at(stage)?;
    let image_url = find_image_url(&html, &settings.site_origin).at(stage)?;
    log.info(format!("Image URL detected : {image_url}"));
    advance(&mut stage, Stage::UrlResolved);

    let filename = target_filename(&image_url).to_string();
    if filename.is_empty() {
        return Err::<RunOutcome, _>(ResolveError::NoFilename(image_url)).at(stage);
    }
    let save_path = settings.save_dir.join(&filename);

    let (bytes, source) = if save_path.exists() {
        log.info(format!("Already existing image: {filename}"));
        let bytes = fs::read(&save_path)
            .map_err(RunError::fs("read", &save_path))
            .at(stage)?;
        advance(&mut stage, Stage::Existing);
        (bytes, ImageSource::Existing)
    } else {
        log.info("Downloading the image...");
        let raw = fetcher.fetch_bytes(&image_url).at(stage)?;
        let resized = resize_if_exceeds(backend, raw, settings.max_resolution, settings.jpeg_quality)
            .at(stage)?;
        let source = match &resized {
            Resized::Unchanged { dimensions, .. } => {
                log.info(format!("Image already correct ({dimensions}), no reduction."));
                ImageSource::Downloaded {
                    original: *dimensions,
                    saved: *dimensions,
                }
            }
            Resized::Downsized { from, to, .. } => {
                log.info(format!(
                    "4K Reduction : {from} → max {}",
                    settings.max_resolution
                ));
                log.info(format!("New size : {to}"));
                ImageSource::Downloaded {
                    original: *from,
                    saved: *to,
                }
            }
        };
        let bytes = resized.into_bytes();
        save_image(&bytes, &settings.save_dir, &save_path).at(stage)?;
        log.info(format!("Image saved : {}", save_path.display()));
        advance(&mut stage, Stage::Downloaded);
        (bytes, source)
    };

    if settings.set_wallpaper {
        apply_wallpaper(backend, wallpaper, &bytes, &settings.bitmap_path, log).at(stage)?;
    } else {
        log.info("Wallpaper disabled, skipping.");
    }
    advance(&mut stage, Stage::WallpaperSet);

    let pruned = cleanup_old_images(&settings.save_dir, settings.keep_history, &filename, log)
        .at(stage)?;
    advance(&mut stage, Stage::CleanedUp);
    advance(&mut stage, Stage::Done);

    Ok(RunOutcome {
        image_url,
        filename,
        saved_path: save_path,
        source,
        wallpaper_applied: settings.set_wallpaper,
        pruned,
        stage,
    })
}

/// Write a freshly downloaded image, creating the save directory if needed.
fn save_image(bytes: &[u8], save_dir: &Path, save_path: &Path) -> Result<(), RunError> {
    fs::create_dir_all(save_dir).map_err(RunError::fs("create", save_dir))?;
    fs::write(save_path, bytes).map_err(RunError::fs("write", save_path))
}

/// Convert to BMP, write it to `bitmap_path`, and hand that path to the OS.
fn apply_wallpaper(
    backend: &impl ImageBackend,
    wallpaper: &impl WallpaperSetter,
    bytes: &[u8],
    bitmap_path: &Path,
    log: &mut RunLog,
) -> Result<(), RunError> {
    log.info("Applying the wallpaper...");
    let bitmap = backend.to_bitmap(bytes)?;
    fs::write(bitmap_path, bitmap).map_err(RunError::fs("write", bitmap_path))?;
    wallpaper.apply(bitmap_path)?;
    log.info("Wallpaper applied.");
    Ok(())
}

/// Delete every entry of `save_dir` except `keep_filename`.
///
/// Does nothing when `keep_history` is set. A failure to list the directory
/// is an error; a failure to delete one entry is logged and the scan goes on.
/// Returns the names that were removed.
pub fn cleanup_old_images(
    save_dir: &Path,
    keep_history: bool,
    keep_filename: &str,
    log: &mut RunLog,
) -> Result<Vec<String>, RunError> {
    if keep_history {
        return Ok(Vec::new());
    }

    let mut pruned = Vec::new();
    let walker = WalkDir::new(save_dir)
        .min_depth(1)
        .max_depth(1)
        .sort_by_file_name();

    for entry in walker {
        let entry = match entry {
            Ok(entry) => entry,
            Err(e) if e.depth() == 0 => {
                let source = e
                    .into_io_error()
                    .unwrap_or_else(|| io::Error::other("directory walk failed"));
                return Err(RunError::Filesystem {
                    action: "list",
                    path: save_dir.to_path_buf(),
                    source,
                });
            }
            Err(e) => {
                log.warn(format!("Error listing {} : {e}", save_dir.display()));
                continue;
            }
        };

        if entry.file_name() == OsStr::new(keep_filename) {
            continue;
        }
        let name = entry.file_name().to_string_lossy().into_owned();
        match fs::remove_file(entry.path()) {
            Ok(()) => {
                log.info(format!("Old image deleted: {name}"));
                pruned.push(name);
            }
            Err(e) => log.warn(format!("Error deletion {name} : {e}")),
        }
    }

    Ok(pruned)
}
