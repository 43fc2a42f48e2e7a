//! Log argument values
//!
//! Callers hand loggers ordered lists of arbitrary values; formatters turn
//! them into one output line. Sanitizers keep a rendered value from spanning
//! lines or leaking non-ASCII into syslog headers.

use serde::Serialize;

/// One argument to a severity method.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(untagged)]
pub enum LogValue {
    Str(String),
    Int(i64),
    Float(f64),
    Bool(bool),
    Null,
    Bytes(Vec<u8>),
    Error(ErrorValue),
    Json(serde_json::Value),
}

/// An error captured for logging: type name, message, and optionally the
/// backtrace the verbose flag switches to.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ErrorValue {
    pub name: String,
    pub message: String,
    pub backtrace: Option<String>,
}

impl ErrorValue {
    pub fn new(name: impl Into<String>, message: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            message: message.into(),
            backtrace: None,
        }
    }

    pub fn with_backtrace(mut self, backtrace: impl Into<String>) -> Self {
        self.backtrace = Some(backtrace.into());
        self
    }

    /// One-line rendering: the backtrace under the verbose flag when
    /// present, `name: message` otherwise.
    pub fn to_line(&self, verbose: bool) -> String {
        match (&self.backtrace, verbose) {
            (Some(trace), true) => sanitize_line(trace),
            _ => sanitize_line(&format!("{}: {}", self.name, self.message)),
        }
    }
}

impl LogValue {
    /// Capture any `std::error::Error` as a loggable value.
    pub fn from_error(err: &dyn std::error::Error) -> Self {
        let name = std::any::type_name_of_val(err);
        // Strip the module path, keep the bare type name.
        let name = name.rsplit("::").next().unwrap_or(name);
        LogValue::Error(ErrorValue::new(name, err.to_string()))
    }

    /// Plain (uncolored) rendering used by the tab format: strings are
    /// line-sanitized, errors collapse to one line, bytes dump in the
    /// configured base, everything else serializes as JSON.
    pub fn plain(&self, verbose: bool, dump_base: u8) -> String {
        match self {
            LogValue::Str(s) => sanitize_line(s),
            LogValue::Error(e) => e.to_line(verbose),
            LogValue::Bytes(b) => crate::format::dump::dump(b, dump_base),
            other => other.json_string(),
        }
    }

    /// JSON-token rendering used by the wire formats: errors appear as
    /// `[name: message]` (or `[backtrace]` under verbose), everything else
    /// is a JSON literal.
    pub fn wire(&self, verbose: bool) -> String {
        match self {
            LogValue::Error(e) => format!("[{}]", e.to_line(verbose)),
            other => other.json_string(),
        }
    }

    fn json_string(&self) -> String {
        serde_json::to_string(self).unwrap_or_else(|_| "[unserializable]".to_string())
    }
}

impl From<&str> for LogValue {
    fn from(s: &str) -> Self {
        LogValue::Str(s.to_string())
    }
}

impl From<String> for LogValue {
    fn from(s: String) -> Self {
        LogValue::Str(s)
    }
}

impl From<i64> for LogValue {
    fn from(n: i64) -> Self {
        LogValue::Int(n)
    }
}

impl From<i32> for LogValue {
    fn from(n: i32) -> Self {
        LogValue::Int(n as i64)
    }
}

impl From<u32> for LogValue {
    fn from(n: u32) -> Self {
        LogValue::Int(n as i64)
    }
}

impl From<f64> for LogValue {
    fn from(n: f64) -> Self {
        LogValue::Float(n)
    }
}

impl From<bool> for LogValue {
    fn from(b: bool) -> Self {
        LogValue::Bool(b)
    }
}

impl From<Vec<u8>> for LogValue {
    fn from(b: Vec<u8>) -> Self {
        LogValue::Bytes(b)
    }
}

impl From<&[u8]> for LogValue {
    fn from(b: &[u8]) -> Self {
        LogValue::Bytes(b.to_vec())
    }
}

impl From<serde_json::Value> for LogValue {
    fn from(v: serde_json::Value) -> Self {
        LogValue::Json(v)
    }
}

impl From<ErrorValue> for LogValue {
    fn from(e: ErrorValue) -> Self {
        LogValue::Error(e)
    }
}

/// Replace control characters so one value cannot fake further log lines.
pub fn sanitize_line(s: &str) -> String {
    s.chars()
        .map(|c| if ('\0'..='\x1f').contains(&c) || c == '\x7f' { ' ' } else { c })
        .collect()
}

/// Replace everything outside printable ASCII; used for syslog header
/// fields which must stay plain ASCII.
pub fn sanitize_ascii(s: &str) -> String {
    s.chars()
        .map(|c| if (' '..='\x7e').contains(&c) { c } else { '_' })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_sanitize_line() {
        assert_eq!(sanitize_line("a\nb\tc"), "a b c");
        assert_eq!(sanitize_line("plain"), "plain");
    }

    #[test]
    fn test_sanitize_ascii() {
        assert_eq!(sanitize_ascii("héllo\n"), "h_llo_");
        assert_eq!(sanitize_ascii("ok -"), "ok -");
    }

    #[test]
    fn test_error_line() {
        let err = ErrorValue::new("RangeError", "out of range").with_backtrace("at foo\nat bar");
        assert_eq!(err.to_line(false), "RangeError: out of range");
        assert_eq!(err.to_line(true), "at foo at bar");

        let bare = ErrorValue::new("Error", "boom");
        assert_eq!(bare.to_line(true), "Error: boom");
    }

    #[test]
    fn test_plain_rendering() {
        assert_eq!(LogValue::from("a\nb").plain(false, 16), "a b");
        assert_eq!(LogValue::from(42i64).plain(false, 16), "42");
        assert_eq!(LogValue::from(true).plain(false, 16), "true");
        assert_eq!(LogValue::Null.plain(false, 16), "null");
        let json = serde_json::json!({"k": 1});
        assert_eq!(LogValue::from(json).plain(false, 16), r#"{"k":1}"#);
    }

    #[test]
    fn test_wire_rendering() {
        let err = LogValue::Error(ErrorValue::new("Error", "boom"));
        assert_eq!(err.wire(false), "[Error: boom]");
        assert_eq!(LogValue::from("x").wire(false), "\"x\"");
    }

    #[test]
    fn test_from_error() {
        let io = std::io::Error::new(std::io::ErrorKind::NotFound, "missing");
        let value = LogValue::from_error(&io);
        match value {
            LogValue::Error(e) => assert_eq!(e.message, "missing"),
            other => panic!("expected error value, got {:?}", other),
        }
    }
}
