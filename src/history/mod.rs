// src/history/mod.rs

use anyhow::Context;
use chrono::{Local, NaiveDateTime};
use std::{
    fs::OpenOptions,
    io::Write,
    path::{Path, PathBuf},
};
use tracing::info;

use crate::error::{EtlError, Result};

/// Year-MonthName-Day-Hour:Minute:Second, e.g. `2024-Jan-05-14:30:02`.
pub const TIMESTAMP_FORMAT: &str = "%Y-%b-%d-%H:%M:%S";

/// Append-only milestone log, one `<timestamp> : <message>` line per call.
/// No rotation and no levels; diagnostics go through `tracing` instead.
#[derive(Debug, Clone)]
pub struct ProgressLog {
    path: PathBuf,
}

impl ProgressLog {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    /// Record `message` stamped with the local time.
    pub fn log(&self, message: &str) -> Result<()> {
        self.log_at(Local::now().naive_local(), message)
    }

    /// Record `message` stamped with `at`.
    pub fn log_at(&self, at: NaiveDateTime, message: &str) -> Result<()> {
        let line = format!("{} : {}", at.format(TIMESTAMP_FORMAT), message);
        self.append(&line)
            .map_err(|e| EtlError::storage(self.path.display().to_string(), e))?;
        info!(milestone = message, "progress");
        Ok(())
    }

    fn append(&self, line: &str) -> anyhow::Result<()> {
        let mut f = OpenOptions::new()
            .create(true)
            .append(true)
            .open(&self.path)
            .with_context(|| format!("opening progress log {:?}", &self.path))?;
        writeln!(f, "{}", line).context("appending progress line")?;
        Ok(())
    }
}

/// Split a log line back into its timestamp and message.
pub fn parse_line(line: &str) -> Option<(NaiveDateTime, &str)> {
    let (ts, message) = line.split_once(" : ")?;
    let at = NaiveDateTime::parse_from_str(ts, TIMESTAMP_FORMAT).ok()?;
    Some((at, message))
}
