//! Core types: severities, level masks, runtime config, argument values

pub mod config;
pub mod error;
pub mod level;
pub mod severity;
pub mod value;

pub use config::{RuntimeConfig, SharedConfig};
pub use error::{LogError, Result};
pub use level::{LevelExpr, LevelMask};
pub use severity::Severity;
pub use value::{ErrorValue, LogValue};
