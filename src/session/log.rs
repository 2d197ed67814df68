//! Append-only game log sinks.

use std::fs::{File, OpenOptions};
use std::io::{self, Write};
use std::path::{Path, PathBuf};
use std::sync::{Mutex, PoisonError};

use tracing::warn;

/// Somewhere to append lines of game log.
///
/// Shared by every unit, so implementations must be `Sync`.
pub trait LogSink: Send + Sync {
    /// Append one line. The sink adds the line terminator.
    fn append_line(&self, line: &str) -> io::Result<()>;
}

/// Append `line`, reporting a failure through `tracing` instead of failing.
///
/// The outcome of a match never depends on the log being written.
pub(crate) fn append_or_warn(sink: &dyn LogSink, line: &str) {
    if let Err(e) = sink.append_line(line) {
        warn!(error = %e, line, "failed to write game log");
    }
}

/// Game log backed by a file opened in append mode.
#[derive(Debug)]
pub struct FileLog {
    file: File,
    path: PathBuf,
}

impl FileLog {
    /// Open (creating if needed) `path` for appending.
    pub fn open(path: impl AsRef<Path>) -> io::Result<Self> {
        let path = path.as_ref().to_path_buf();
        let file = OpenOptions::new().create(true).append(true).open(&path)?;
        Ok(Self { file, path })
    }

    /// Path of the log file.
    #[must_use]
    pub fn path(&self) -> &Path {
        &self.path
    }
}

impl LogSink for FileLog {
    fn append_line(&self, line: &str) -> io::Result<()> {
        // Append mode plus one write per line keeps lines whole.
        let mut file = &self.file;
        file.write_all(format!("{line}\n").as_bytes())
    }
}

/// Game log kept in memory.
#[derive(Debug, Default)]
pub struct MemoryLog {
    lines: Mutex<Vec<String>>,
}

impl MemoryLog {
    pub fn new() -> Self {
        Self::default()
    }

    /// Lines appended so far.
    #[must_use]
    pub fn lines(&self) -> Vec<String> {
        self.lines
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .clone()
    }
}

impl LogSink for MemoryLog {
    fn append_line(&self, line: &str) -> io::Result<()> {
        self.lines
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .push(line.to_string());
        Ok(())
    }
}
