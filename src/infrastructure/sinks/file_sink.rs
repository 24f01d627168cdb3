//! Host trace listener
//!
//! Appends one formatted line per trace record to a file:
//!
//! ```text
//! [2024-01-01 12:00:00Z INFO JobRunner] starting job
//! ```

use std::fs::{self, File, OpenOptions};
use std::io::{BufWriter, Write};
use std::path::{Path, PathBuf};
use std::sync::Mutex;

use anyhow::{Context, Result};
use chrono::Utc;
use tracing::warn;

use crate::domain::errors::SinkError;
use crate::domain::models::TraceRecord;
use crate::domain::ports::TraceSink;

/// File-backed trace sink.
#[derive(Debug)]
pub struct FileSink {
    path: PathBuf,
    writer: Mutex<BufWriter<File>>,
}

impl FileSink {
    /// Open (or create) the trace file in append mode
    ///
    /// Creates parent directories if they don't exist and writes a header
    /// line marking the start of this session.
    pub fn open(path: impl AsRef<Path>) -> Result<Self> {
        let path = path.as_ref();

        if let Some(parent) = path.parent() {
            if !parent.as_os_str().is_empty() {
                fs::create_dir_all(parent).context("failed to create trace file directory")?;
            }
        }

        let file = OpenOptions::new()
            .create(true)
            .append(true)
            .open(path)
            .with_context(|| format!("failed to open trace file {}", path.display()))?;

        let mut writer = BufWriter::new(file);
        writeln!(
            writer,
            "*** trace session started {} ***",
            Utc::now().format("%Y-%m-%d %H:%M:%SZ")
        )
        .context("failed to write trace file header")?;
        writer.flush().context("failed to flush trace file header")?;

        Ok(Self {
            path: path.to_path_buf(),
            writer: Mutex::new(writer),
        })
    }

    /// Path of the trace file.
    pub fn path(&self) -> &Path {
        &self.path
    }
}

impl TraceSink for FileSink {
    fn write(&self, record: &TraceRecord<'_>) {
        let Ok(mut writer) = self.writer.lock() else {
            warn!(path = %self.path.display(), "trace file writer poisoned; line dropped");
            return;
        };

        if let Err(err) = writeln!(writer, "{}", record.to_line()) {
            warn!(path = %self.path.display(), error = %err, "failed to write trace line");
        }
    }

    fn flush(&self) -> Result<(), SinkError> {
        let mut writer = self.writer.lock().map_err(|_| SinkError::Poisoned)?;
        writer.flush()?;
        Ok(())
    }
}

impl Drop for FileSink {
    fn drop(&mut self) {
        if let Ok(writer) = self.writer.get_mut() {
            let _ = writer.flush();
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::models::TraceLevel;
    use tempfile::TempDir;

    #[test]
    fn test_creates_parent_dirs_and_header() {
        let temp_dir = TempDir::new().unwrap();
        let path = temp_dir.path().join("nested").join("trace.log");

        let sink = FileSink::open(&path).unwrap();
        sink.flush().unwrap();

        let contents = fs::read_to_string(&path).unwrap();
        assert!(contents.starts_with("*** trace session started"));
        assert_eq!(sink.path(), path.as_path());
    }

    #[test]
    fn test_writes_formatted_lines() {
        let temp_dir = TempDir::new().unwrap();
        let path = temp_dir.path().join("trace.log");

        let sink = FileSink::open(&path).unwrap();
        sink.write(&TraceRecord::now("JobRunner", TraceLevel::Info, "starting job"));
        sink.write(&TraceRecord::now("JobRunner", TraceLevel::Error, "job failed"));
        sink.flush().unwrap();

        let contents = fs::read_to_string(&path).unwrap();
        let lines: Vec<_> = contents.lines().skip(1).collect();
        assert_eq!(lines.len(), 2);
        assert!(lines[0].ends_with("INFO JobRunner] starting job"));
        assert!(lines[1].ends_with("ERROR JobRunner] job failed"));
    }

    #[test]
    fn test_appends_across_sessions() {
        let temp_dir = TempDir::new().unwrap();
        let path = temp_dir.path().join("trace.log");

        drop(FileSink::open(&path).unwrap());
        drop(FileSink::open(&path).unwrap());

        let contents = fs::read_to_string(&path).unwrap();
        assert_eq!(contents.matches("trace session started").count(), 2);
    }
}
