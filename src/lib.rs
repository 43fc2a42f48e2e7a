//! # logroute
//!
//! A process-local logging façade routing severity-tagged value lists to
//! files, UDP peers, and the console, each destination described by one
//! URI-like locator string.
//!
//! ## Features
//!
//! - **Locator-Driven**: `path[?template][#levels]` strings fully describe
//!   a destination, its formatter, and its severity filter
//! - **Fire and Forget**: severity methods gate, enqueue, and return;
//!   callers never see I/O errors
//! - **Binary-Safe Datagrams**: oversized UDP messages are framed with a
//!   correlation header instead of truncated
//! - **Rotation-Aware**: file handles reopen on a timer and on `SIGUSR2`
//!
//! ## Example
//!
//! ```no_run
//! use logroute::Hub;
//!
//! let hub = Hub::new();
//! let log = hub.add("svc", "/var/log/svc.log#info+").unwrap();
//! log.info("server started");
//! log.warning(logroute::args!["slow request", 1500]);
//! ```

pub mod core;
pub mod format;
pub mod hub;
pub mod locator;
pub mod macros;
pub mod transport;

pub mod prelude {
    pub use crate::core::{
        ErrorValue, LevelExpr, LevelMask, LogError, LogValue, Result, RuntimeConfig, Severity,
        SharedConfig,
    };
    pub use crate::hub::{Args, Hub, LocatorList, Logger, Root};
    pub use crate::locator::{Locator, Scheme};
}

pub use crate::core::{
    ErrorValue, LevelExpr, LevelMask, LogError, LogValue, Result, RuntimeConfig, Severity,
    SharedConfig,
};
pub use crate::hub::{Args, Hub, LocatorList, Logger, Root};
pub use crate::locator::{Locator, Scheme};
