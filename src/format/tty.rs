//! Colorized terminal format
//!
//! Console default: the same template machinery as the tab format, with
//! the severity name colored per level and argument values colored by
//! type.

use super::{now_line, replace_token, Formatter};
use crate::core::value::sanitize_line;
use crate::core::{LogValue, Severity, SharedConfig};
use crate::locator::Locator;
use colored::Colorize;

pub struct TtyFormat {
    prefix: String,
    config: SharedConfig,
}

const DEFAULT_PREFIX: &str = "time\tname\tid";

/// Bytes of preview shown for a buffer argument.
const BUFFER_PREVIEW: usize = 8;

impl TtyFormat {
    pub fn new(locator: &Locator, config: SharedConfig) -> Self {
        let prefix = match &locator.query {
            Some(query) => sanitize_line(query).replace('&', "\t"),
            None => DEFAULT_PREFIX.to_string(),
        };
        Self { prefix, config }
    }

    fn colorize(&self, value: &LogValue) -> String {
        match value {
            LogValue::Str(s) => sanitize_line(s).green().to_string(),
            LogValue::Int(n) => n.to_string().bright_green().to_string(),
            LogValue::Float(n) => n.to_string().bright_green().to_string(),
            LogValue::Bool(true) => "true".blue().bold().to_string(),
            LogValue::Bool(false) => "false".red().bold().to_string(),
            LogValue::Null => "null".bold().to_string(),
            LogValue::Bytes(b) => preview_bytes(b).magenta().to_string(),
            LogValue::Error(e) => format!("[{}]", e.to_line(self.config.verbose()))
                .yellow()
                .to_string(),
            LogValue::Json(v) => serde_json::to_string(v)
                .unwrap_or_else(|_| "[unserializable]".to_string())
                .cyan()
                .to_string(),
        }
    }
}

fn preview_bytes(bytes: &[u8]) -> String {
    let head: Vec<String> = bytes
        .iter()
        .take(BUFFER_PREVIEW)
        .map(|b| format!("{:02x}", b))
        .collect();
    if bytes.len() > BUFFER_PREVIEW {
        format!(
            "<Buffer {} \u{2026} {}>",
            head.join(" "),
            bytes.len() - BUFFER_PREVIEW
        )
    } else {
        format!("<Buffer {}>", head.join(" "))
    }
}

impl Formatter for TtyFormat {
    fn format(&self, id: &str, severity: Severity, args: &[LogValue]) -> String {
        let name = severity.name().color(severity.color()).bold().to_string();
        let mut msg = replace_token(&self.prefix, "time", &now_line().dimmed().to_string());
        msg = replace_token(&msg, "name", &name);
        msg = replace_token(&msg, "id", &id.underline().to_string());

        for arg in args {
            if !msg.is_empty() {
                msg.push('\t');
            }
            msg.push_str(&self.colorize(arg));
        }

        msg
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::{ErrorValue, RuntimeConfig};

    fn formatter(locator: &str) -> TtyFormat {
        colored::control::set_override(false);
        TtyFormat::new(&Locator::parse(locator).unwrap(), RuntimeConfig::new())
    }

    #[test]
    fn test_default_prefix_fields() {
        let line = formatter(".").format("main", Severity::Notice, &["hi".into()]);
        let fields: Vec<&str> = line.split('\t').collect();
        assert_eq!(fields.len(), 4);
        assert_eq!(fields[1], "notice");
        assert_eq!(fields[2], "main");
        assert_eq!(fields[3], "hi");
    }

    #[test]
    fn test_value_rendering() {
        let fmt = formatter(".?id");
        let err = LogValue::Error(ErrorValue::new("Error", "boom"));
        let line = fmt.format(
            "main",
            Severity::Err,
            &[err, LogValue::Bool(false), LogValue::Null],
        );
        assert_eq!(line, "main\t[Error: boom]\tfalse\tnull");
    }

    #[test]
    fn test_buffer_preview() {
        assert_eq!(preview_bytes(&[0xde, 0xad]), "<Buffer de ad>");
        let long: Vec<u8> = (0..12).collect();
        assert_eq!(
            preview_bytes(&long),
            "<Buffer 00 01 02 03 04 05 06 07 \u{2026} 4>"
        );
    }
}
