//! File transport
//!
//! Appends newline-terminated lines to a log file opened create/append with
//! mode 0o640. The handle can be closed and lazily reopened without losing
//! transport identity, which is what the rotation scheduler relies on.

use crate::core::{LogError, LogValue, Result, Severity};
use crate::format::Formatter;
use parking_lot::Mutex;
use std::fs::{File, OpenOptions};
use std::io::Write;
use std::path::PathBuf;

const FILE_MODE: u32 = 0o640;

pub struct FileTransport {
    id: String,
    path: PathBuf,
    handle: Mutex<Option<File>>,
    formatter: Box<dyn Formatter>,
}

impl FileTransport {
    pub fn new(id: &str, path: impl Into<PathBuf>, formatter: Box<dyn Formatter>) -> Result<Self> {
        let transport = Self {
            id: id.to_string(),
            path: path.into(),
            handle: Mutex::new(None),
            formatter,
        };
        transport.open(false)?;
        Ok(transport)
    }

    pub fn path(&self) -> &PathBuf {
        &self.path
    }

    /// Open the handle if none is live; `force` closes the current handle
    /// first (rotation support).
    pub fn open(&self, force: bool) -> Result<()> {
        let mut guard = self.handle.lock();
        if force {
            *guard = None;
        }
        if guard.is_none() {
            let mut options = OpenOptions::new();
            options.create(true).append(true);
            #[cfg(unix)]
            {
                use std::os::unix::fs::OpenOptionsExt;
                options.mode(FILE_MODE);
            }
            let file = options
                .open(&self.path)
                .map_err(|e| LogError::io(self.path.display().to_string(), e))?;
            *guard = Some(file);
        }
        Ok(())
    }

    /// Append one rendered line. A closed handle makes this a silent no-op;
    /// write failures come back for a root-logger diagnostic and are never
    /// seen by the log caller.
    pub fn write(&self, severity: Severity, args: &[LogValue]) -> Result<()> {
        let mut guard = self.handle.lock();
        let Some(file) = guard.as_mut() else {
            return Ok(());
        };
        let mut line = self.formatter.format(&self.id, severity, args);
        line.push('\n');
        file.write_all(line.as_bytes())
            .map_err(|e| LogError::io(self.path.display().to_string(), e))
    }
}
