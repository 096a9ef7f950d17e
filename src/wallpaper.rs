//! Desktop wallpaper integration.
//!
//! The workflow writes a BMP file and hands its path to a
//! [`WallpaperSetter`]. [`SystemWallpaper`] applies it by running the
//! platform's own helper:
//!
//! | OS | Helper |
//! |---|---|
//! | Windows | `powershell` → `user32!SystemParametersInfoW(SPI_SETDESKWALLPAPER, 0, path, SPIF_UPDATEINIFILE \| SPIF_SENDCHANGE)` |
//! | macOS | `osascript` → System Events, every desktop |
//! | Linux | `gsettings` → `org.gnome.desktop.background` `picture-uri` and `picture-uri-dark` |

use reqwest::Url;
use std::io;
use std::path::{Path, PathBuf};
use std::process::Command;
use thiserror::Error;
use tracing::debug;

#[derive(Error, Debug)]
pub enum WallpaperError {
    #[error("Failed to run {program}: {source}")]
    Spawn {
        program: &'static str,
        #[source]
        source: io::Error,
    },
    #[error("{program} failed ({status}): {stderr}")]
    Failed {
        program: &'static str,
        status: String,
        stderr: String,
    },
    #[error("Setting the wallpaper is not supported on {0}")]
    Unsupported(&'static str),
    #[error("Cannot build a file URI for {}", .0.display())]
    InvalidPath(PathBuf),
}

/// Applies a bitmap file as the desktop background.
pub trait WallpaperSetter {
    fn apply(&self, bitmap: &Path) -> Result<(), WallpaperError>;
}

/// One external command the platform needs to switch the wallpaper.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct HelperCommand {
    pub program: &'static str,
    pub args: Vec<String>,
}

/// `SPI_SETDESKWALLPAPER`
const SPI_SETDESKWALLPAPER: u32 = 20;
/// `SPIF_UPDATEINIFILE | SPIF_SENDCHANGE`
const SPIF_PERSIST_AND_BROADCAST: u32 = 3;

/// Build the helper invocations for `os` (as in [`std::env::consts::OS`]).
///
/// Returns an empty list for platforms without a known helper. Fails only
/// when a helper needs a `file://` URI and `bitmap` is not absolute.
pub fn platform_commands(os: &str, bitmap: &Path) -> Result<Vec<HelperCommand>, WallpaperError> {
    let path = bitmap.display().to_string();
    match os {
        "windows" => {
            let quoted = path.replace('\'', "''");
            let script = format!(
                "Add-Type -TypeDefinition 'using System.Runtime.InteropServices; \
                 public static class IotdWallpaper {{ \
                 [DllImport(\"user32.dll\", CharSet = CharSet.Unicode, SetLastError = true)] \
                 public static extern bool SystemParametersInfo(int action, int param, string value, int flags); }}'; \
                 if (-not [IotdWallpaper]::SystemParametersInfo({SPI_SETDESKWALLPAPER}, 0, '{quoted}', {SPIF_PERSIST_AND_BROADCAST})) {{ exit 1 }}"
            );
            Ok(vec![HelperCommand {
                program: "powershell",
                args: vec![
                    "-NoProfile".into(),
                    "-NonInteractive".into(),
                    "-Command".into(),
                    script,
                ],
            }])
        }
        "macos" => {
            let quoted = path.replace('\\', "\\\\").replace('"', "\\\"");
            Ok(vec![HelperCommand {
                program: "osascript",
                args: vec![
                    "-e".into(),
                    format!(
                        "tell application \"System Events\" to tell every desktop to set picture to \"{quoted}\""
                    ),
                ],
            }])
        }
        "linux" | "freebsd" | "openbsd" => {
            let uri = Url::from_file_path(bitmap)
                .map_err(|()| WallpaperError::InvalidPath(bitmap.to_path_buf()))?
                .to_string();
            Ok(["picture-uri", "picture-uri-dark"]
                .into_iter()
                .map(|key| HelperCommand {
                    program: "gsettings",
                    args: vec![
                        "set".into(),
                        "org.gnome.desktop.background".into(),
                        key.into(),
                        uri.clone(),
                    ],
                })
                .collect())
        }
        _ => Ok(Vec::new()),
    }
}

/// [`WallpaperSetter`] for the machine we are running on.
#[derive(Debug, Default)]
pub struct SystemWallpaper;

impl SystemWallpaper {
    pub fn new() -> Self {
        Self
    }
}

impl WallpaperSetter for SystemWallpaper {
    fn apply(&self, bitmap: &Path) -> Result<(), WallpaperError> {
        let os = std::env::consts::OS;
        let commands = platform_commands(os, bitmap)?;
        if commands.is_empty() {
            return Err(WallpaperError::Unsupported(os));
        }

        for HelperCommand { program, args } in commands {
            debug!(program, "running wallpaper helper");
            let output = Command::new(program)
                .args(&args)
                .output()
                .map_err(|source| WallpaperError::Spawn { program, source })?;
            if !output.status.success() {
                return Err(WallpaperError::Failed {
                    program,
                    status: output.status.to_string(),
                    stderr: String::from_utf8_lossy(&output.stderr).trim().to_string(),
                });
            }
        }
        Ok(())
    }
}
