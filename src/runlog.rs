// src/runlog.rs
use std::fs;
use std::path::Path;

use chrono::Local;

use crate::error::{ReportError, Result};

/// In-memory run log: timestamped event lines accumulated during a run and
/// flushed to disk once at the end. Buffering avoids holding a file handle
/// open per event on large runs.
#[derive(Debug, Default)]
pub struct RunLog {
    entries: Vec<String>,
}

impl RunLog {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Appends an event line, stamped with the local time.
    pub fn push(&mut self, message: impl AsRef<str>) {
        self.entries.push(format!(
            "{} {}",
            message.as_ref(),
            Local::now().format("%a %b %d %Y %H:%M:%S")
        ));
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Writes all accumulated lines to `path`.
    ///
    /// # Errors
    /// `Io` if the file cannot be written.
    pub fn flush(&self, path: &Path) -> Result<()> {
        let mut text = self.entries.join("\n");
        text.push('\n');
        fs::write(path, text).map_err(|e| ReportError::io(e, path))
    }
}
