//! Structured JSON wire format
//!
//! Single-line JSON records for machine ingestion (GELF-compatible):
//! `version`, `host` (locator userinfo), `short_message` (destination id),
//! `full_message` (tab-joined args), `timestamp` (float unix seconds) and
//! the numeric severity as `level`.

use super::Formatter;
use crate::core::value::sanitize_line;
use crate::core::{LogValue, Severity, SharedConfig};
use crate::locator::Locator;
use chrono::Utc;
use serde_json::json;

pub struct GelfFormat {
    host: String,
    config: SharedConfig,
}

impl GelfFormat {
    pub fn new(locator: &Locator, config: SharedConfig) -> Self {
        let host = locator
            .userinfo
            .as_deref()
            .map(sanitize_line)
            .unwrap_or_else(|| "-".to_string());
        Self { host, config }
    }
}

impl Formatter for GelfFormat {
    fn format(&self, id: &str, severity: Severity, args: &[LogValue]) -> String {
        let verbose = self.config.verbose();
        let full: Vec<String> = args.iter().map(|a| a.wire(verbose)).collect();
        let timestamp = Utc::now().timestamp_millis() as f64 / 1000.0;

        json!({
            "version": "1.1",
            "host": self.host,
            "short_message": id,
            "full_message": full.join("\t"),
            "timestamp": timestamp,
            "level": severity as u8,
        })
        .to_string()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::{ErrorValue, RuntimeConfig};

    fn record(locator: &str, args: &[LogValue]) -> serde_json::Value {
        let locator = Locator::parse(locator).unwrap();
        let fmt = GelfFormat::new(&locator, RuntimeConfig::new());
        serde_json::from_str(&fmt.format("svc", Severity::Err, args)).unwrap()
    }

    #[test]
    fn test_record_fields() {
        let rec = record("udp://app@10.0.0.1:12201/x.gelf", &["boom".into()]);
        assert_eq!(rec["version"], "1.1");
        assert_eq!(rec["host"], "app");
        assert_eq!(rec["short_message"], "svc");
        assert_eq!(rec["full_message"], "\"boom\"");
        assert_eq!(rec["level"], 3);
        assert!(rec["timestamp"].as_f64().unwrap() > 0.0);
    }

    #[test]
    fn test_host_defaults_to_nil() {
        let rec = record("udp://10.0.0.1:12201/x.gelf", &[]);
        assert_eq!(rec["host"], "-");
        assert_eq!(rec["full_message"], "");
    }

    #[test]
    fn test_errors_render_bracketed() {
        let err = LogValue::Error(ErrorValue::new("RangeError", "too big"));
        let rec = record("udp://a@h:1/x.gelf", &[err, LogValue::Int(2)]);
        assert_eq!(rec["full_message"], "[RangeError: too big]\t2");
    }

    #[test]
    fn test_single_line() {
        let rec_str = {
            let locator = Locator::parse("udp://a@h:1/x.gelf").unwrap();
            let fmt = GelfFormat::new(&locator, RuntimeConfig::new());
            fmt.format("svc", Severity::Info, &["a".into()])
        };
        assert!(!rec_str.contains('\n'));
    }
}
