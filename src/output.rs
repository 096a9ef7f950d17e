//! End-of-run summary printed to stdout.
//!
//! The detailed progress already went through the run log (and to stderr via
//! `tracing`). This is the short recap a user sees when the command returns.
//!
//! # Output Format
//!
//! ## Success
//!
//! ```text
//! Image of the Day: iss071e.jpg
//!     Source: https://www.nasa.gov/wp-content/uploads/2024/05/iss071e.jpg
//!     Saved: /home/me/.local/share/nasa_iotd/images/iss071e.jpg
//!     Size: 4000x2500 → 3456x2160
//!     Wallpaper: applied
//! Pruned 2 old images
//!     001 aurora.jpg
//!     002 nebula.png
//! Log: /home/me/.local/share/nasa_iotd/iotdLog.log
//! ```
//!
//! ## Failure
//!
//! ```text
//! Run failed after stage "start"
//!     The image could not be found on the NASA page (...)
//! Log: /home/me/.local/share/nasa_iotd/iotdLog.log
//! ```
//!
//! Each shape has a `format_*` function (returns `Vec<String>`) for
//! testability and a `print_*` wrapper that writes to stdout.

use crate::workflow::{Execution, ImageSource, RunFailure, RunOutcome};
use std::io;
use std::path::PathBuf;

/// Format a 1-based positional index as 3-digit zero-padded.
fn format_index(pos: usize) -> String {
    format!("{:0>3}", pos)
}

/// Return indentation string: 4 spaces per depth level.
fn indent(depth: usize) -> String {
    "    ".repeat(depth)
}

fn plural(n: usize, word: &str) -> String {
    if n == 1 {
        format!("{n} {word}")
    } else {
        format!("{n} {word}s")
    }
}

pub fn format_outcome(outcome: &RunOutcome) -> Vec<String> {
    let mut lines = vec![format!("Image of the Day: {}", outcome.filename)];
    lines.push(format!("{}Source: {}", indent(1), outcome.image_url));
    lines.push(format!("{}Saved: {}", indent(1), outcome.saved_path.display()));

    let size = match &outcome.source {
        ImageSource::Existing => "already on disk".to_string(),
        ImageSource::Downloaded { original, saved } if original == saved => original.to_string(),
        ImageSource::Downloaded { original, saved } => format!("{original} → {saved}"),
    };
    lines.push(format!("{}Size: {}", indent(1), size));

    let wallpaper = if outcome.wallpaper_applied {
        "applied"
    } else {
        "skipped"
    };
    lines.push(format!("{}Wallpaper: {}", indent(1), wallpaper));

    if !outcome.pruned.is_empty() {
        lines.push(format!(
            "Pruned {}",
            plural(outcome.pruned.len(), "old image")
        ));
        for (i, name) in outcome.pruned.iter().enumerate() {
            lines.push(format!("{}{} {}", indent(1), format_index(i + 1), name));
        }
    }
    lines
}

pub fn format_failure(failure: &RunFailure) -> Vec<String> {
    vec![
        format!("Run failed after stage \"{}\"", failure.stage),
        format!("{}{}", indent(1), failure.error),
    ]
}

fn format_log_file(log_file: &io::Result<PathBuf>) -> String {
    match log_file {
        Ok(path) => format!("Log: {}", path.display()),
        Err(e) => format!("Log: not written ({e})"),
    }
}

/// Summary of a whole execution, run result first, log location last.
pub fn format_execution(execution: &Execution) -> Vec<String> {
    let mut lines = match &execution.result {
        Ok(outcome) => format_outcome(outcome),
        Err(failure) => format_failure(failure),
    };
    lines.push(format_log_file(&execution.log_file));
    lines
}

pub fn print_execution(execution: &Execution) {
    for line in format_execution(execution) {
        println!("{}", line);
    }
}
