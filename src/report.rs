// src/report.rs
//! Report writer: serializes the rolled-up forest to disk.

use std::fs;
use std::path::{Path, PathBuf};

use serde::Serialize;
use serde_json::ser::PrettyFormatter;
use serde_json::{json, Serializer, Value};

use crate::config::Config;
use crate::error::{ReportError, Result};
use crate::runlog::RunLog;
use crate::tree::Tree;

pub const REPORT_DIR: &str = "reports";
pub const LOG_FILENAME: &str = "log.txt";

/// Writes the forest to `reports/<report_filename>` as a JSON array of
/// nested organization trees (parent back-references are structurally
/// absent) with a final `{"_url": ...}` element linking the report back to
/// the source instance. Tab-indented, matching the format existing
/// consumers parse.
///
/// # Errors
/// `Io` if the report directory or file cannot be written, `Serialize` on
/// JSON encoding failure.
pub fn write_report(config: &Config, forest: &[Tree], log: &mut RunLog) -> Result<PathBuf> {
    let folder = Path::new(REPORT_DIR);
    fs::create_dir_all(folder).map_err(|e| ReportError::io(e, folder))?;
    let location = folder.join(&config.report_filename);

    let mut doc: Vec<Value> = Vec::with_capacity(forest.len() + 1);
    for tree in forest {
        doc.push(serde_json::to_value(tree.view())?);
    }
    doc.push(json!({ "_url": config.server_url }));

    let mut buf = Vec::new();
    let formatter = PrettyFormatter::with_indent(b"\t");
    let mut serializer = Serializer::with_formatter(&mut buf, formatter);
    doc.serialize(&mut serializer)?;
    fs::write(&location, buf).map_err(|e| ReportError::io(e, &location))?;

    log.push(format!("Report generated in {}", location.display()));
    Ok(location)
}

/// Flushes the run log next to the report.
///
/// # Errors
/// `Io` if the log file cannot be written.
pub fn write_log(log: &RunLog) -> Result<PathBuf> {
    let location = Path::new(REPORT_DIR).join(LOG_FILENAME);
    log.flush(&location)?;
    Ok(location)
}
