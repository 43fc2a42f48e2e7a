//! Severity levels
//!
//! Eight ranked syslog severities, `Emerg` (highest priority) through
//! `Debug` (lowest), plus the `Tip` pseudo-severity used by the root
//! logger for its own diagnostics.

use serde::{Deserialize, Serialize};
use std::fmt;

#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub enum Severity {
    /// System is unusable; logging it terminates the process
    Emerg = 0,
    /// Action must be taken immediately
    Alert = 1,
    /// Critical conditions
    Crit = 2,
    /// Error conditions
    Err = 3,
    /// Warning conditions
    Warning = 4,
    /// Normal but significant condition
    Notice = 5,
    /// Informational
    Info = 6,
    /// Debug-level messages
    Debug = 7,
    /// Root-logger pseudo-severity, never filtered
    Tip = 8,
}

/// Severity names in rank order, indexable by `Severity as usize`.
pub const SEVERITY_NAMES: [&str; 9] = [
    "emerg", "alert", "crit", "err", "warning", "notice", "info", "debug", "tip",
];

impl Severity {
    pub fn name(&self) -> &'static str {
        SEVERITY_NAMES[*self as usize]
    }

    /// Filter bit for this severity: bit `(rank - 1)` for ranks 1..=7.
    /// `Emerg` and `Tip` carry no bit and are never masked out.
    pub fn bit(&self) -> u8 {
        match *self as u8 {
            rank @ 1..=7 => 1 << (rank - 1),
            _ => 0,
        }
    }

    pub fn from_rank(rank: u8) -> Option<Self> {
        match rank {
            0 => Some(Severity::Emerg),
            1 => Some(Severity::Alert),
            2 => Some(Severity::Crit),
            3 => Some(Severity::Err),
            4 => Some(Severity::Warning),
            5 => Some(Severity::Notice),
            6 => Some(Severity::Info),
            7 => Some(Severity::Debug),
            8 => Some(Severity::Tip),
            _ => None,
        }
    }

    pub fn color(&self) -> colored::Color {
        use colored::Color::*;
        match self {
            Severity::Emerg => BrightWhite,
            Severity::Alert => BrightRed,
            Severity::Crit => Red,
            Severity::Err => BrightYellow,
            Severity::Warning => Green,
            Severity::Notice => Blue,
            Severity::Info => BrightBlue,
            Severity::Debug => Magenta,
            Severity::Tip => Black,
        }
    }
}

impl fmt::Display for Severity {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.name())
    }
}
