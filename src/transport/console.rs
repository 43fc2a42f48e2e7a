//! Console transport
//!
//! Always open, writes the colorized line straight to standard output and
//! never fails to the caller.

use crate::core::{LogValue, Severity};
use crate::format::Formatter;
use std::io::Write;

pub struct ConsoleTransport {
    id: String,
    formatter: Box<dyn Formatter>,
}

impl ConsoleTransport {
    pub fn new(id: &str, formatter: Box<dyn Formatter>) -> Self {
        Self {
            id: id.to_string(),
            formatter,
        }
    }

    pub fn write(&self, severity: Severity, args: &[LogValue]) {
        let mut line = self.formatter.format(&self.id, severity, args);
        line.push('\n');
        let stdout = std::io::stdout();
        let _ = stdout.lock().write_all(line.as_bytes());
    }
}
