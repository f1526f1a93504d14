//! Append-only CSV log of accepted samples.
//!
//! One file per session, named after the session start time:
//! `log_{year}-{month}-{day}-{hour}-{minute}-{second}.csv`. The header is
//! `time,temp_a,temp_b` and each record is `MM:SS.mmm,temp_a,temp_b`, where the
//! time column is measured from the first sample written.

use std::fs::{self, File, OpenOptions};
use std::io::{self, BufWriter, Write};
use std::path::{Path, PathBuf};

use chrono::{DateTime, Local};

use crate::error::{Error, Result};
use crate::protocol::Sample;
use crate::store::elapsed_secs;

pub const LOG_HEADER: &str = "time,temp_a,temp_b";

pub struct Logger {
    path: PathBuf,
    writer: BufWriter<File>,
    first_captured_at: Option<DateTime<Local>>,
}

/// File name for a session started at `session_start` (unpadded fields).
pub fn log_file_name(session_start: DateTime<Local>) -> String {
    session_start
        .format("log_%Y-%-m-%-d-%-H-%-M-%-S.csv")
        .to_string()
}

/// Format elapsed seconds as `MM:SS.mmm`.
pub fn format_elapsed(secs: f64) -> String {
    let millis_total = (secs.max(0.0) * 1000.0).round() as u64;
    let minutes = millis_total / 60_000;
    let millis = millis_total % 60_000;
    format!("{:02}:{:02}.{:03}", minutes, millis / 1000, millis % 1000)
}

impl Logger {
    /// Create the output directory if needed, create a fresh log file for this
    /// session and write the header row.
    ///
    /// An existing directory is fine. An existing file with the same name is
    /// left untouched; a `_1`, `_2`, … suffix is used instead.
    pub fn open(directory: impl AsRef<Path>, session_start: DateTime<Local>) -> Result<Self> {
        let directory = directory.as_ref();
        fs::create_dir_all(directory).map_err(|source| Error::LogDir {
            path: directory.to_path_buf(),
            source,
        })?;

        let (path, file) = create_unique(directory, &log_file_name(session_start))?;
        let mut logger = Self {
            path,
            writer: BufWriter::new(file),
            first_captured_at: None,
        };
        logger
            .write_line(LOG_HEADER)
            .map_err(|source| logger.io_error(source))?;
        Ok(logger)
    }

    /// Wrap an already open file without writing a header.
    #[cfg(test)]
    pub(crate) fn from_file(path: impl Into<PathBuf>, file: File) -> Self {
        Self {
            path: path.into(),
            writer: BufWriter::new(file),
            first_captured_at: None,
        }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    /// Append one record and push it to disk before returning.
    pub fn write(&mut self, sample: &Sample) -> Result<()> {
        let start = *self
            .first_captured_at
            .get_or_insert_with(|| sample.captured_at());
        let record = format!(
            "{},{},{}",
            format_elapsed(elapsed_secs(start, sample.captured_at())),
            sample.temperature_a(),
            sample.temperature_b()
        );
        self.write_line(&record)
            .map_err(|source| self.io_error(source))
    }

    fn write_line(&mut self, line: &str) -> io::Result<()> {
        writeln!(self.writer, "{line}")?;
        self.writer.flush()?;
        self.writer.get_ref().sync_data()
    }

    fn io_error(&self, source: io::Error) -> Error {
        Error::Log {
            path: self.path.clone(),
            source,
        }
    }
}

impl Drop for Logger {
    fn drop(&mut self) {
        if let Err(e) = self.writer.flush() {
            log::warn!("failed to flush {:?} on close: {e}", self.path);
        }
    }
}

fn create_unique(directory: &Path, file_name: &str) -> Result<(PathBuf, File)> {
    let stem = file_name.trim_end_matches(".csv");
    let mut attempt = 0u32;
    loop {
        let name = if attempt == 0 {
            file_name.to_string()
        } else {
            format!("{stem}_{attempt}.csv")
        };
        let path = directory.join(name);
        match OpenOptions::new().write(true).create_new(true).open(&path) {
            Ok(file) => return Ok((path, file)),
            Err(e) if e.kind() == io::ErrorKind::AlreadyExists => attempt += 1,
            Err(source) => return Err(Error::Log { path, source }),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::TimeZone;

    #[test]
    fn file_name_is_unpadded() {
        let t = Local.with_ymd_and_hms(2024, 3, 7, 9, 5, 2).unwrap();
        assert_eq!(log_file_name(t), "log_2024-3-7-9-5-2.csv");
        let t = Local.with_ymd_and_hms(2024, 11, 27, 23, 59, 30).unwrap();
        assert_eq!(log_file_name(t), "log_2024-11-27-23-59-30.csv");
    }

    #[test]
    fn elapsed_formatting() {
        assert_eq!(format_elapsed(0.0), "00:00.000");
        assert_eq!(format_elapsed(1.5), "00:01.500");
        assert_eq!(format_elapsed(59.9996), "01:00.000");
        assert_eq!(format_elapsed(125.25), "02:05.250");
        assert_eq!(format_elapsed(6000.0), "100:00.000");
    }
}
