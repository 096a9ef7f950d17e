//! Configuration module.
//!
//! Settings come from three layers, highest priority first:
//!
//! 1. Command-line flags (`--save-dir`, `--log-file`, `--keep-history`, `--no-wallpaper`)
//! 2. An optional `config.toml` (default: `<base dir>/config.toml`)
//! 3. Built-in defaults
//!
//! The base directory is the platform's local data dir plus `nasa_iotd`
//! (`%LOCALAPPDATA%\nasa_iotd` on Windows, `~/.local/share/nasa_iotd` on
//! Linux), or the current directory when that cannot be determined.
//!
//! ## Configuration Options
//!
//! ```toml
//! # All options are optional - defaults shown below
//!
//! # save_dir = "<base dir>/images"   # Where the image is kept
//! # log_dir = "<base dir>"           # Directory holding iotdLog.log
//! keep_history = false               # Keep every image instead of only today's
//! page_url = "https://www.nasa.gov/image-of-the-day/"
//! jpeg_quality = 90                  # Quality for re-encoded JPEGs (1-100)
//! set_wallpaper = true               # false = download only
//! ```
//!
//! The 3840x2160 size limit is not configurable.
//!
//! Unknown keys are rejected to catch typos early.

use crate::imaging::{MAX_RESOLUTION, MaxResolution, Quality};
use reqwest::Url;
use serde::{Deserialize, Serialize};
use std::fs;
use std::path::{Path, PathBuf};
use thiserror::Error;

/// NASA's Image of the Day listing.
pub const DEFAULT_PAGE_URL: &str = "https://www.nasa.gov/image-of-the-day/";

/// Directory name under the platform data dir.
const APP_DIR_NAME: &str = "nasa_iotd";

/// Config file looked up in the base directory when `--config` is absent.
pub const CONFIG_FILENAME: &str = "config.toml";

/// Reusable bitmap handed to the OS, overwritten every run.
pub const WALLPAPER_BITMAP_NAME: &str = "iotd_wallpaper.bmp";

#[derive(Error, Debug)]
pub enum ConfigError {
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
    #[error("TOML parse error: {0}")]
    Toml(#[from] toml::de::Error),
    #[error("Config validation error: {0}")]
    Validation(String),
}

/// Contents of `config.toml`.
///
/// All fields have defaults. User config files need only specify the values
/// they want to override.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct IotdConfig {
    /// Image directory. `None` means `<base dir>/images`.
    pub save_dir: Option<PathBuf>,
    /// Log directory. `None` means the base dir itself.
    pub log_dir: Option<PathBuf>,
    /// Keep previously downloaded images instead of pruning them.
    pub keep_history: bool,
    /// Page that carries the image of the day.
    pub page_url: String,
    /// Quality used when a resized image is re-encoded as JPEG.
    pub jpeg_quality: u8,
    /// Apply the image as the desktop background.
    pub set_wallpaper: bool,
}

impl Default for IotdConfig {
    fn default() -> Self {
        Self {
            save_dir: None,
            log_dir: None,
            keep_history: false,
            page_url: DEFAULT_PAGE_URL.to_string(),
            jpeg_quality: Quality::default().value(),
            set_wallpaper: true,
        }
    }
}

impl IotdConfig {
    /// Validate config values are within acceptable ranges.
    pub fn validate(&self) -> Result<(), ConfigError> {
        if !(1..=100).contains(&self.jpeg_quality) {
            return Err(ConfigError::Validation(
                "jpeg_quality must be 1-100".into(),
            ));
        }
        if !self.page_url.starts_with("http") {
            return Err(ConfigError::Validation(format!(
                "page_url must be an http(s) URL, got {:?}",
                self.page_url
            )));
        }
        Ok(())
    }
}

/// Values given on the command line. `None`/`false` defers to the config file.
#[derive(Debug, Clone, Default)]
pub struct CliOverrides {
    pub save_dir: Option<PathBuf>,
    pub log_dir: Option<PathBuf>,
    pub keep_history: bool,
    pub no_wallpaper: bool,
}

/// Fully resolved settings for one run.
#[derive(Debug, Clone, PartialEq)]
pub struct Settings {
    pub save_dir: PathBuf,
    pub log_dir: PathBuf,
    pub keep_history: bool,
    pub page_url: String,
    /// Scheme + host of `page_url`, used for root-relative image paths.
    pub site_origin: String,
    pub jpeg_quality: Quality,
    pub set_wallpaper: bool,
    pub bitmap_path: PathBuf,
    pub max_resolution: MaxResolution,
}

impl Settings {
    /// Merge CLI flags over a loaded config and fill the remaining defaults.
    pub fn resolve(
        config: IotdConfig,
        cli: CliOverrides,
        base_dir: &Path,
    ) -> Result<Self, ConfigError> {
        config.validate()?;
        let site_origin = site_origin(&config.page_url)?;

        let save_dir = cli
            .save_dir
            .or(config.save_dir)
            .unwrap_or_else(|| base_dir.join("images"));
        let log_dir = cli
            .log_dir
            .or(config.log_dir)
            .unwrap_or_else(|| base_dir.to_path_buf());

        Ok(Self {
            save_dir,
            log_dir,
            keep_history: cli.keep_history || config.keep_history,
            page_url: config.page_url,
            site_origin,
            jpeg_quality: Quality::new(config.jpeg_quality),
            set_wallpaper: config.set_wallpaper && !cli.no_wallpaper,
            bitmap_path: std::env::temp_dir().join(WALLPAPER_BITMAP_NAME),
            max_resolution: MAX_RESOLUTION,
        })
    }
}

/// `https://www.nasa.gov/image-of-the-day/` → `https://www.nasa.gov`.
pub fn site_origin(page_url: &str) -> Result<String, ConfigError> {
    let url = Url::parse(page_url)
        .map_err(|e| ConfigError::Validation(format!("page_url {page_url:?}: {e}")))?;
    Ok(url.origin().ascii_serialization())
}

/// Platform data dir + `nasa_iotd`, or `./nasa_iotd` as a last resort.
pub fn default_base_dir() -> PathBuf {
    dirs::data_local_dir()
        .or_else(|| std::env::current_dir().ok())
        .unwrap_or_else(|| PathBuf::from("."))
        .join(APP_DIR_NAME)
}

/// Load a config file. A missing file yields the defaults.
pub fn load_config(path: &Path) -> Result<IotdConfig, ConfigError> {
    let content = match fs::read_to_string(path) {
        Ok(c) => c,
        Err(e) if e.kind() == std::io::ErrorKind::NotFound => return Ok(IotdConfig::default()),
        Err(e) => return Err(e.into()),
    };
    let config: IotdConfig = toml::from_str(&content)?;
    config.validate()?;
    Ok(config)
}

/// A documented `config.toml` with every option at its default.
pub fn stock_config_toml() -> &'static str {
    r#"# nasa-iotd configuration
# All options are optional - the values below are the defaults.

# Directory the image of the day is saved in.
# Default: <local data dir>/nasa_iotd/images
# save_dir = "/path/to/images"

# Directory holding iotdLog.log (newest run first).
# Default: <local data dir>/nasa_iotd
# log_dir = "/path/to/logs"

# Keep every downloaded image instead of only the current one.
keep_history = false

# Page the image is taken from: first <img> inside the first <article>.
page_url = "https://www.nasa.gov/image-of-the-day/"

# Quality (1-100) used when an image larger than 3840x2160 is
# downscaled and re-encoded as JPEG.
jpeg_quality = 90

# Set the image as the desktop background. false = download only.
set_wallpaper = true
"#
}
