//! Error types for the logging facade
//!
//! Configuration errors surface synchronously at destination-registration
//! time. Everything that can go wrong after registration (write failures,
//! oversize datagrams) is reported as a diagnostic on the root logger and
//! never reaches the log-call caller.

pub type Result<T> = std::result::Result<T, LogError>;

#[derive(Debug, thiserror::Error)]
pub enum LogError {
    /// Malformed destination locator
    #[error("invalid locator '{locator}': {message}")]
    InvalidLocator { locator: String, message: String },

    /// Port component outside 0..=65535 or not numeric
    #[error("invalid port '{port}'")]
    InvalidPort { port: String },

    /// Explicit scheme not in the registered transport set
    #[error("unsupported scheme '{scheme}'")]
    UnsupportedScheme { scheme: String },

    /// Level-filter expression that matches no severity name
    #[error("invalid level expression '{expr}'")]
    InvalidLevel { expr: String },

    /// Path containing a NUL byte or otherwise unusable
    #[error("invalid path: {message}")]
    InvalidPath { message: String },

    /// Unknown key in a syslog query string
    #[error("invalid syslog field '{field}', valid: hostname, appname, facility")]
    InvalidSyslogField { field: String },

    /// Facility outside 0..=23 or not an integer
    #[error("invalid facility '{value}'")]
    InvalidFacility { value: String },

    /// Datagram host that is neither IPv4 nor IPv6
    #[error("datagram host must be an IPv4 or IPv6 address, got '{host}'")]
    InvalidHost { host: String },

    /// Rendered message needs more fragments than the configured ceiling.
    /// Never surfaced to callers; degrades to a dropped send plus a
    /// root-logger diagnostic.
    #[error("datagram message of {len} bytes needs {needed} fragments, ceiling is {ceiling}")]
    Oversize {
        len: usize,
        needed: usize,
        ceiling: usize,
    },

    /// Transport I/O failure, re-emitted as a root-logger diagnostic
    #[error("I/O error on '{destination}': {source}")]
    Io {
        destination: String,
        #[source]
        source: std::io::Error,
    },
}

impl LogError {
    /// Create an invalid-locator error
    pub fn locator(locator: impl Into<String>, message: impl Into<String>) -> Self {
        LogError::InvalidLocator {
            locator: locator.into(),
            message: message.into(),
        }
    }

    /// Create an invalid-level error
    pub fn level(expr: impl Into<String>) -> Self {
        LogError::InvalidLevel { expr: expr.into() }
    }

    /// Create an invalid-path error
    pub fn path(message: impl Into<String>) -> Self {
        LogError::InvalidPath {
            message: message.into(),
        }
    }

    /// Create an I/O error tagged with the failing destination
    pub fn io(destination: impl Into<String>, source: std::io::Error) -> Self {
        LogError::Io {
            destination: destination.into(),
            source,
        }
    }

    /// True for errors raised at registration time (as opposed to the
    /// internal variants that only ever become diagnostics).
    pub fn is_configuration(&self) -> bool {
        !matches!(self, LogError::Oversize { .. } | LogError::Io { .. })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_error_display() {
        let err = LogError::InvalidPort {
            port: "99999".into(),
        };
        assert_eq!(err.to_string(), "invalid port '99999'");

        let err = LogError::locator("udp://[::1", "unterminated IPv6 bracket");
        assert!(err.to_string().contains("udp://[::1"));

        let err = LogError::Oversize {
            len: 100_000,
            needed: 13,
            ceiling: 4,
        };
        assert!(err.to_string().contains("13 fragments"));
    }

    #[test]
    fn test_configuration_classification() {
        assert!(LogError::level("bogus").is_configuration());
        assert!(LogError::UnsupportedScheme { scheme: "ftp".into() }.is_configuration());
        assert!(!LogError::Oversize {
            len: 1,
            needed: 2,
            ceiling: 1
        }
        .is_configuration());
        let io = std::io::Error::new(std::io::ErrorKind::PermissionDenied, "denied");
        assert!(!LogError::io("/var/log/x.log", io).is_configuration());
    }
}
