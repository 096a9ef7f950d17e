//! Per-run log buffer and the newest-first log file.
//!
//! Every user-facing message of a run goes through a [`RunLog`]: it is
//! timestamped, echoed to the console through `tracing`, and kept in memory.
//! At the end of the run the buffer is written once with
//! [`RunLog::flush_to`], *above* whatever the log file already held:
//!
//! ```text
//! [2026-10-18 07:00:01] ---- Execution begins ----     ← this run
//! [2026-10-18 07:00:03] ---- End of execution ----
//!
//! [2026-10-17 07:00:01] ---- Execution begins ----     ← previous run
//! ...
//! ```
//!
//! The file is never rotated or truncated. Two runs flushing at the same time
//! race on the read-modify-write and one block can be lost; there is no
//! locking.

use chrono::Local;
use std::fs;
use std::io;
use std::path::{Path, PathBuf};

/// Name of the log file inside the log directory.
pub const LOG_FILENAME: &str = "iotdLog.log";

const TIMESTAMP_FORMAT: &str = "%Y-%m-%d %H:%M:%S";

/// Buffered, timestamped log lines for a single run.
#[derive(Debug, Default)]
pub struct RunLog {
    lines: Vec<String>,
}

impl RunLog {
    pub fn new() -> Self {
        Self::default()
    }

    /// Record a progress message.
    pub fn info(&mut self, message: impl AsRef<str>) {
        let message = message.as_ref();
        tracing::info!("{message}");
        self.push(message);
    }

    /// Record a non-fatal problem (e.g. a file that could not be pruned).
    pub fn warn(&mut self, message: impl AsRef<str>) {
        let message = message.as_ref();
        tracing::warn!("{message}");
        self.push(message);
    }

    /// Record the error that ended the run.
    pub fn error(&mut self, message: impl AsRef<str>) {
        let message = message.as_ref();
        tracing::error!("{message}");
        self.push(message);
    }

    fn push(&mut self, message: &str) {
        let timestamp = Local::now().format(TIMESTAMP_FORMAT);
        self.lines.push(format!("[{timestamp}] {message}\n"));
    }

    /// Buffered lines, each ending in `\n`.
    pub fn lines(&self) -> &[String] {
        &self.lines
    }

    pub fn is_empty(&self) -> bool {
        self.lines.is_empty()
    }

    /// Write this run's block above the existing contents of
    /// `<log_dir>/iotdLog.log`, creating the directory and file if needed.
    ///
    /// Returns the path of the log file.
    pub fn flush_to(&self, log_dir: &Path) -> io::Result<PathBuf> {
        fs::create_dir_all(log_dir)?;
        let path = log_dir.join(LOG_FILENAME);

        // Older blocks are kept byte for byte, whatever their encoding.
        let old = match fs::read(&path) {
            Ok(content) => content,
            Err(e) if e.kind() == io::ErrorKind::NotFound => Vec::new(),
            Err(e) => return Err(e),
        };

        let mut content = self.lines.concat().into_bytes();
        content.push(b'\n');
        content.extend_from_slice(&old);
        fs::write(&path, content)?;
        Ok(path)
    }
}
