//! Level-filter mask engine
//!
//! Compiles level-filter expressions (name-prefix lists, numbers, booleans)
//! into a 7-bit severity mask. Bit `(rank - 1)` covers severities 1..=7;
//! `emerg` has no bit and is always delivered.

use super::error::{LogError, Result};
use super::severity::Severity;
use std::fmt;

/// Names eligible for prefix matching, ranks 0..=7. The `tip`
/// pseudo-severity is not addressable from a filter expression.
static FILTER_NAMES: [&str; 8] = [
    "emerg", "alert", "crit", "err", "warning", "notice", "info", "debug",
];

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct LevelMask(u8);

/// Input accepted by [`LevelMask::parse`]: a name expression, a raw
/// bit number, or a boolean (all on / all off).
#[derive(Debug, Clone)]
pub enum LevelExpr {
    Named(String),
    Number(i64),
    Bool(bool),
}

impl From<&str> for LevelExpr {
    fn from(s: &str) -> Self {
        LevelExpr::Named(s.to_string())
    }
}

impl From<String> for LevelExpr {
    fn from(s: String) -> Self {
        LevelExpr::Named(s)
    }
}

impl From<i64> for LevelExpr {
    fn from(n: i64) -> Self {
        LevelExpr::Number(n)
    }
}

impl From<u8> for LevelExpr {
    fn from(n: u8) -> Self {
        LevelExpr::Number(n as i64)
    }
}

impl From<bool> for LevelExpr {
    fn from(b: bool) -> Self {
        LevelExpr::Bool(b)
    }
}

impl LevelMask {
    pub const NONE: LevelMask = LevelMask(0);
    pub const ALL: LevelMask = LevelMask(0x7F);

    pub fn from_bits(bits: u8) -> Self {
        LevelMask(bits & Self::ALL.0)
    }

    pub fn bits(self) -> u8 {
        self.0
    }

    /// Whether this mask delivers the given severity. `Emerg` and `Tip`
    /// carry no filter bit and always pass.
    pub fn allows(self, severity: Severity) -> bool {
        let bit = severity.bit();
        bit == 0 || self.0 & bit != 0
    }

    /// Compile a level-filter expression into a mask.
    ///
    /// `"-"` is NONE; `""`, `"+"` and `true` are ALL; a finite number `n`
    /// (including numeric strings) is `ALL & n`; `false` is NONE. Anything
    /// else is a `+`-delimited list of case-insensitive severity-name
    /// prefixes; a token followed by an empty segment cascades down to
    /// every higher-priority bit short of `emerg`.
    pub fn parse(expr: impl Into<LevelExpr>) -> Result<LevelMask> {
        match expr.into() {
            LevelExpr::Bool(true) => Ok(Self::ALL),
            LevelExpr::Bool(false) => Ok(Self::NONE),
            LevelExpr::Number(n) => Ok(LevelMask((Self::ALL.0 as i64 & n) as u8)),
            LevelExpr::Named(s) => Self::parse_named(&s),
        }
    }

    fn parse_named(expr: &str) -> Result<LevelMask> {
        if expr == "-" {
            return Ok(Self::NONE);
        }
        if expr.is_empty() || expr == "+" {
            return Ok(Self::ALL);
        }
        // Numeric strings behave like numbers.
        if let Ok(n) = expr.parse::<f64>() {
            if n.is_finite() {
                return Ok(LevelMask((Self::ALL.0 as i64 & n as i64) as u8));
            }
        }

        let segments: Vec<&str> = expr.split('+').collect();
        let mut mask = 0u8;
        let mut i = 0;
        while i < segments.len() {
            let token = segments[i].to_lowercase();
            if token.is_empty() {
                i += 1;
                continue;
            }
            if token == "all" {
                return Ok(Self::ALL);
            }
            // Scan from the lowest-priority name down; the first name with
            // the token as a prefix wins.
            let rank = (0..FILTER_NAMES.len())
                .rev()
                .find(|&j| FILTER_NAMES[j].starts_with(&token))
                .ok_or_else(|| LogError::level(expr))?;
            if rank > 0 {
                mask |= 1 << (rank - 1);
                // An empty segment right after a match cascades: set every
                // remaining bit down to (excluding) emerg's nonexistent one.
                if segments.get(i + 1) == Some(&"") {
                    for k in 1..rank {
                        mask |= 1 << (k - 1);
                    }
                    i += 1;
                }
            }
            i += 1;
        }

        Ok(LevelMask(mask))
    }

    /// Render this mask as a `+`-joined severity-name list. Re-parsing the
    /// result yields the same mask. The empty mask renders as `"-"`.
    pub fn names(self) -> String {
        if self.0 == 0 {
            return "-".to_string();
        }
        let mut parts = Vec::new();
        for rank in 1..FILTER_NAMES.len() {
            if self.0 & (1 << (rank - 1)) != 0 {
                parts.push(FILTER_NAMES[rank]);
            }
        }
        parts.join("+")
    }
}

impl fmt::Display for LevelMask {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.names())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_filter_names_track_severity_ranks() {
        use crate::core::severity::SEVERITY_NAMES;
        assert_eq!(&FILTER_NAMES[..], &SEVERITY_NAMES[..8]);
    }

    #[test]
    fn test_fixed_forms() {
        assert_eq!(LevelMask::parse("-").unwrap(), LevelMask::NONE);
        assert_eq!(LevelMask::parse("").unwrap(), LevelMask::ALL);
        assert_eq!(LevelMask::parse("+").unwrap(), LevelMask::ALL);
        assert_eq!(LevelMask::parse(true).unwrap(), LevelMask::ALL);
        assert_eq!(LevelMask::parse(false).unwrap(), LevelMask::NONE);
        assert_eq!(LevelMask::parse("all").unwrap(), LevelMask::ALL);
        assert_eq!(LevelMask::parse("debug+all").unwrap(), LevelMask::ALL);
    }

    #[test]
    fn test_numbers() {
        assert_eq!(LevelMask::parse(5i64).unwrap().bits(), 5);
        assert_eq!(LevelMask::parse(0xFFi64).unwrap().bits(), 0x7F);
        assert_eq!(LevelMask::parse(-1i64).unwrap().bits(), 0x7F);
        assert_eq!(LevelMask::parse("5").unwrap().bits(), 5);
        assert_eq!(LevelMask::parse("255").unwrap().bits(), 0x7F);
    }

    #[test]
    fn test_single_names() {
        assert_eq!(LevelMask::parse("alert").unwrap().bits(), 1);
        assert_eq!(LevelMask::parse("err").unwrap().bits(), 1 << 2);
        assert_eq!(LevelMask::parse("DEBUG").unwrap().bits(), 1 << 6);
        // emerg has no bit
        assert_eq!(LevelMask::parse("emerg").unwrap(), LevelMask::NONE);
    }

    #[test]
    fn test_prefix_matching_scans_from_tail() {
        // "e" is a prefix of both "emerg" and "err"; the tail-first scan
        // picks "err"
        assert_eq!(LevelMask::parse("e").unwrap().bits(), 1 << 2);
        // "d" picks "debug", "i" picks "info", "n" picks "notice"
        assert_eq!(LevelMask::parse("d").unwrap().bits(), 1 << 6);
        assert_eq!(LevelMask::parse("i").unwrap().bits(), 1 << 5);
        assert_eq!(LevelMask::parse("n").unwrap().bits(), 1 << 4);
    }

    #[test]
    fn test_joined_names() {
        let mask = LevelMask::parse("err+warning").unwrap();
        assert_eq!(mask.bits(), (1 << 2) | (1 << 3));
    }

    #[test]
    fn test_cascade() {
        // "err+" sets err plus every higher-priority bit short of emerg
        let mask = LevelMask::parse("err+").unwrap();
        assert_eq!(mask.bits(), 0b111);

        // "info+" covers alert..info but not debug
        let mask = LevelMask::parse("info+").unwrap();
        assert_eq!(mask.bits(), 0b11_1111);
        assert!(mask.allows(Severity::Warning));
        assert!(!mask.allows(Severity::Debug));

        // cascade mid-expression, then a further token
        let mask = LevelMask::parse("crit++debug").unwrap();
        assert_eq!(mask.bits(), 0b11 | (1 << 6));

        // "debug+" is everything
        assert_eq!(LevelMask::parse("debug+").unwrap(), LevelMask::ALL);
    }

    #[test]
    fn test_invalid_tokens() {
        assert!(LevelMask::parse("bogus").is_err());
        assert!(LevelMask::parse("err+bogus").is_err());
        // "tip" is not addressable from a filter expression
        assert!(LevelMask::parse("tip").is_err());
    }

    #[test]
    fn test_names_round_trip() {
        for expr in ["err+warning", "alert", "info+", "debug", "-"] {
            let mask = LevelMask::parse(expr).unwrap();
            assert_eq!(LevelMask::parse(mask.names().as_str()).unwrap(), mask);
        }
    }

    #[test]
    fn test_allows_unmaskable() {
        assert!(LevelMask::NONE.allows(Severity::Emerg));
        assert!(LevelMask::NONE.allows(Severity::Tip));
        assert!(!LevelMask::NONE.allows(Severity::Debug));
    }
}
