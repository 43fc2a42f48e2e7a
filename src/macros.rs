//! Logging macros for ergonomic multi-value log calls.
//!
//! A log call carries an ordered list of values, not a format string; the
//! bound formatter decides how each value is rendered. [`args!`] builds
//! that list from anything convertible into a [`crate::LogValue`], and the
//! per-severity macros forward it to a logger handle.
//!
//! # Examples
//!
//! ```
//! use logroute::{info, Hub};
//!
//! let hub = Hub::new();
//! let logger = hub.add("svc", ".").unwrap();
//!
//! // Basic logging
//! info!(logger, "server started");
//!
//! // Mixed value types, rendered per destination
//! let port = 8080;
//! info!(logger, "listening", port);
//! ```

/// Build an argument list from heterogeneous values.
///
/// # Examples
///
/// ```
/// use logroute::{args, LogValue};
///
/// let list: Vec<LogValue> = args!["reconnect", 3, true];
/// assert_eq!(list.len(), 3);
/// ```
#[macro_export]
macro_rules! args {
    () => {
        ::std::vec::Vec::<$crate::LogValue>::new()
    };
    ($($value:expr),+ $(,)?) => {
        ::std::vec![$($crate::LogValue::from($value)),+]
    };
}

/// Log at `emerg` and terminate the process. Does not return.
#[macro_export]
macro_rules! emerg {
    ($logger:expr, $($value:expr),+ $(,)?) => {
        $logger.emerg($crate::args![$($value),+])
    };
}

/// Log an alert-level message.
///
/// # Examples
///
/// ```
/// # use logroute::Hub;
/// # let hub = Hub::new();
/// # let logger = hub.add("svc", ".").unwrap();
/// use logroute::alert;
/// alert!(logger, "disk almost full", 97.5);
/// ```
#[macro_export]
macro_rules! alert {
    ($logger:expr, $($value:expr),+ $(,)?) => {
        $logger.alert($crate::args![$($value),+])
    };
}

/// Log a critical-level message.
#[macro_export]
macro_rules! crit {
    ($logger:expr, $($value:expr),+ $(,)?) => {
        $logger.crit($crate::args![$($value),+])
    };
}

/// Log an error-level message.
///
/// # Examples
///
/// ```
/// # use logroute::Hub;
/// # let hub = Hub::new();
/// # let logger = hub.add("svc", ".").unwrap();
/// use logroute::err;
/// err!(logger, "request failed", 500);
/// ```
#[macro_export]
macro_rules! err {
    ($logger:expr, $($value:expr),+ $(,)?) => {
        $logger.err($crate::args![$($value),+])
    };
}

/// Log a warning-level message.
#[macro_export]
macro_rules! warning {
    ($logger:expr, $($value:expr),+ $(,)?) => {
        $logger.warning($crate::args![$($value),+])
    };
}

/// Log a notice-level message.
#[macro_export]
macro_rules! notice {
    ($logger:expr, $($value:expr),+ $(,)?) => {
        $logger.notice($crate::args![$($value),+])
    };
}

/// Log an info-level message.
#[macro_export]
macro_rules! info {
    ($logger:expr, $($value:expr),+ $(,)?) => {
        $logger.info($crate::args![$($value),+])
    };
}

/// Log a debug-level message.
///
/// # Examples
///
/// ```
/// # use logroute::Hub;
/// # let hub = Hub::new();
/// # let logger = hub.add("svc", ".").unwrap();
/// use logroute::debug;
/// debug!(logger, "cache miss", "user:42");
/// ```
#[macro_export]
macro_rules! debug {
    ($logger:expr, $($value:expr),+ $(,)?) => {
        $logger.debug($crate::args![$($value),+])
    };
}
