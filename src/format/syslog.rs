//! Syslog-style datagram format (RFC 5424 shaped)
//!
//! Datagram default:
//! `<facility*8+severity>1 ISO8601 hostname appname pid id - BOM args`.
//! `facility`, `hostname` and `appname` come from the locator query string
//! and are validated at resolution time; header fields are ASCII-sanitized.

use super::Formatter;
use crate::core::value::sanitize_ascii;
use crate::core::{LogError, LogValue, Result, Severity, SharedConfig};
use crate::locator::Locator;
use chrono::{SecondsFormat, Utc};

const NIL: &str = "-";
const BOM: char = '\u{feff}';

pub struct SyslogFormat {
    facility: u8,
    /// Pre-rendered ` hostname appname pid ` header slice.
    header: String,
    config: SharedConfig,
}

impl SyslogFormat {
    pub fn new(locator: &Locator, config: SharedConfig) -> Result<Self> {
        let mut hostname = NIL.to_string();
        let mut appname = NIL.to_string();
        let mut facility: u8 = 1;

        if let Some(query) = &locator.query {
            for pair in query.split('&') {
                let Some((key, value)) = pair.split_once('=') else {
                    continue;
                };
                match key.to_lowercase().as_str() {
                    "hostname" => hostname = sanitize_ascii(value),
                    "appname" => appname = sanitize_ascii(value),
                    "facility" => {
                        facility = value
                            .parse::<u8>()
                            .ok()
                            .filter(|f| *f <= 23)
                            .ok_or_else(|| LogError::InvalidFacility {
                                value: value.to_string(),
                            })?;
                    }
                    other => {
                        return Err(LogError::InvalidSyslogField {
                            field: other.to_string(),
                        })
                    }
                }
            }
        }

        let header = format!(" {} {} {} ", hostname, appname, std::process::id());
        Ok(Self {
            facility,
            header,
            config,
        })
    }
}

impl Formatter for SyslogFormat {
    fn format(&self, id: &str, severity: Severity, args: &[LogValue]) -> String {
        let id = if id.is_empty() { NIL } else { id };
        let verbose = self.config.verbose();
        let rendered: Vec<String> = args.iter().map(|a| a.wire(verbose)).collect();

        format!(
            "<{}>1 {}{}{} - {}{}",
            self.facility as u16 * 8 + severity as u16,
            Utc::now().to_rfc3339_opts(SecondsFormat::Millis, true),
            self.header,
            sanitize_ascii(id),
            BOM,
            rendered.join("\t"),
        )
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::RuntimeConfig;

    fn formatter(locator: &str) -> Result<SyslogFormat> {
        SyslogFormat::new(&Locator::parse(locator).unwrap(), RuntimeConfig::new())
    }

    #[test]
    fn test_default_header() {
        let fmt = formatter("udp://10.0.0.1:514").unwrap();
        let line = fmt.format("svc", Severity::Warning, &["careful".into()]);
        // facility 1, warning rank 4
        assert!(line.starts_with("<12>1 "), "got {}", line);
        assert!(line.contains(&format!(" - - {} svc - ", std::process::id())));
        assert!(line.ends_with("\u{feff}\"careful\""));
    }

    #[test]
    fn test_query_fields() {
        let fmt = formatter("udp://h:514?facility=4&hostname=web1&appname=api").unwrap();
        let line = fmt.format("svc", Severity::Err, &[]);
        // facility 4 * 8 + err rank 3
        assert!(line.starts_with("<35>1 "));
        assert!(line.contains(" web1 api "));
    }

    #[test]
    fn test_invalid_facility() {
        assert!(matches!(
            formatter("udp://h:514?facility=24"),
            Err(LogError::InvalidFacility { .. })
        ));
        assert!(matches!(
            formatter("udp://h:514?facility=abc"),
            Err(LogError::InvalidFacility { .. })
        ));
        assert!(matches!(
            formatter("udp://h:514?facility=-1"),
            Err(LogError::InvalidFacility { .. })
        ));
    }

    #[test]
    fn test_unknown_field_rejected() {
        assert!(matches!(
            formatter("udp://h:514?severity=1"),
            Err(LogError::InvalidSyslogField { .. })
        ));
    }

    #[test]
    fn test_header_fields_sanitized() {
        let fmt = formatter("udp://h:514?hostname=wéb").unwrap();
        let line = fmt.format("svc", Severity::Info, &[]);
        assert!(line.contains(" w_b "));
    }

    #[test]
    fn test_empty_id_renders_nil() {
        let fmt = formatter("udp://h:514").unwrap();
        let line = fmt.format("", Severity::Notice, &[]);
        assert!(line.contains(&format!("{} - - \u{feff}", std::process::id())));
    }
}
