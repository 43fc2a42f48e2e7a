//! Rendering strategies
//!
//! A formatter is a pure rendering strategy turning
//! `(destination id, severity, args)` into one output line, without the
//! trailing newline (transports append it). The registry maps locator
//! format hints to constructors; unknown hints fall back to the
//! transport's default.

pub mod dump;
pub mod gelf;
pub mod syslog;
pub mod tab;
pub mod tty;

pub use gelf::GelfFormat;
pub use syslog::SyslogFormat;
pub use tab::TabFormat;
pub use tty::TtyFormat;

use crate::core::{LogValue, Result, Severity, SharedConfig};
use crate::locator::{Locator, Scheme};
use chrono::Local;

pub trait Formatter: Send + Sync {
    fn format(&self, id: &str, severity: Severity, args: &[LogValue]) -> String;
}

/// Construct the formatter a recognized format hint names, or `None` for
/// unrecognized hints (the transport default applies then).
pub fn for_hint(
    hint: &str,
    locator: &Locator,
    config: &SharedConfig,
) -> Option<Result<Box<dyn Formatter>>> {
    match hint {
        "tab" => Some(Ok(Box::new(TabFormat::new(locator, config.clone())))),
        "tty" => Some(Ok(Box::new(TtyFormat::new(locator, config.clone())))),
        "gelf" => Some(Ok(Box::new(GelfFormat::new(locator, config.clone())))),
        "syslog" => Some(
            SyslogFormat::new(locator, config.clone()).map(|f| Box::new(f) as Box<dyn Formatter>),
        ),
        _ => None,
    }
}

/// The default formatter per transport scheme: plain tab lines for files,
/// syslog frames for datagrams, colorized lines for the console.
pub fn default_for(
    scheme: Scheme,
    locator: &Locator,
    config: &SharedConfig,
) -> Result<Box<dyn Formatter>> {
    match scheme {
        Scheme::File => Ok(Box::new(TabFormat::new(locator, config.clone()))),
        Scheme::Udp => {
            SyslogFormat::new(locator, config.clone()).map(|f| Box::new(f) as Box<dyn Formatter>)
        }
        Scheme::Console => Ok(Box::new(TtyFormat::new(locator, config.clone()))),
    }
}

/// Local wall-clock prefix: `2025-01-08 10:30:45.123`.
pub(crate) fn now_line() -> String {
    Local::now().format("%Y-%m-%d %H:%M:%S%.3f").to_string()
}

/// Replace the first word-boundary occurrence of `token` in `template`.
/// Tokens embedded in longer words (`runtime`) are left alone.
pub(crate) fn replace_token(template: &str, token: &str, value: &str) -> String {
    let is_word = |c: char| c.is_ascii_alphanumeric() || c == '_';
    let mut from = 0;
    while let Some(pos) = template[from..].find(token) {
        let start = from + pos;
        let end = start + token.len();
        let left_ok = start == 0 || !template[..start].chars().next_back().is_some_and(is_word);
        let right_ok = end == template.len() || !template[end..].chars().next().is_some_and(is_word);
        if left_ok && right_ok {
            return format!("{}{}{}", &template[..start], value, &template[end..]);
        }
        from = end;
    }
    template.to_string()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::RuntimeConfig;

    #[test]
    fn test_replace_token() {
        assert_eq!(replace_token("time\t[name]", "name", "err"), "time\t[err]");
        assert_eq!(replace_token("runtime", "time", "X"), "runtime");
        assert_eq!(replace_token("time time", "time", "X"), "X time");
        assert_eq!(replace_token("no match", "id", "X"), "no match");
    }

    #[test]
    fn test_hint_registry() {
        let config = RuntimeConfig::new();
        let locator = Locator::parse("/tmp/x.gelf").unwrap();
        assert!(for_hint("gelf", &locator, &config).is_some());
        assert!(for_hint("tab", &locator, &config).is_some());
        assert!(for_hint("log", &locator, &config).is_none());
    }

    #[test]
    fn test_syslog_hint_propagates_config_error() {
        let config = RuntimeConfig::new();
        let locator = Locator::parse("udp://h:514/x.syslog?facility=99").unwrap();
        let built = for_hint("syslog", &locator, &config).unwrap();
        assert!(built.is_err());
    }
}
