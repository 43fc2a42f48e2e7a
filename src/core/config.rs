//! Process-wide runtime controls
//!
//! An explicit, injectable configuration object shared by the hub, the
//! transports, and the formatters. Every field is independently mutable at
//! runtime; mutation points are the setters below, nothing is ambient.

use super::error::Result;
use super::level::{LevelExpr, LevelMask};
use parking_lot::RwLock;
use std::sync::atomic::{AtomicBool, AtomicU8, AtomicUsize, Ordering};
use std::sync::Arc;

pub type SharedConfig = Arc<RuntimeConfig>;

pub struct RuntimeConfig {
    /// Process-wide severity filter. `None` means no global filtering;
    /// per-destination masks still apply.
    mask: RwLock<Option<LevelMask>>,
    /// Render error values with their backtrace instead of one line.
    verbose: AtomicBool,
    /// Maximum datagram fragments per message; messages needing more are
    /// dropped with a diagnostic.
    max_fragments: AtomicUsize,
    /// Numeric base for byte-buffer dumps: 2, 8, 10 or 16.
    dump_base: AtomicU8,
}

impl RuntimeConfig {
    pub fn new() -> SharedConfig {
        Arc::new(Self {
            mask: RwLock::new(None),
            verbose: AtomicBool::new(false),
            max_fragments: AtomicUsize::new(1),
            dump_base: AtomicU8::new(16),
        })
    }

    pub fn mask(&self) -> Option<LevelMask> {
        *self.mask.read()
    }

    /// Set the process-wide filter from a level expression, or disable
    /// global filtering with `None`.
    pub fn set_mask(&self, expr: Option<impl Into<LevelExpr>>) -> Result<()> {
        let mask = match expr {
            Some(e) => Some(LevelMask::parse(e)?),
            None => None,
        };
        *self.mask.write() = mask;
        Ok(())
    }

    pub fn verbose(&self) -> bool {
        self.verbose.load(Ordering::Relaxed)
    }

    pub fn set_verbose(&self, verbose: bool) {
        self.verbose.store(verbose, Ordering::Relaxed);
    }

    pub fn max_fragments(&self) -> usize {
        self.max_fragments.load(Ordering::Relaxed)
    }

    /// Set the fragment-count ceiling. Clamped to 1..=255: the frame
    /// header carries sequence and total in one byte each.
    pub fn set_max_fragments(&self, count: usize) {
        self.max_fragments
            .store(count.clamp(1, u8::MAX as usize), Ordering::Relaxed);
    }

    pub fn dump_base(&self) -> u8 {
        self.dump_base.load(Ordering::Relaxed)
    }

    /// Set the buffer-dump base. Anything other than 2, 8, 10 or 16 is
    /// ignored and `false` is returned.
    pub fn set_dump_base(&self, base: u8) -> bool {
        if matches!(base, 2 | 8 | 10 | 16) {
            self.dump_base.store(base, Ordering::Relaxed);
            true
        } else {
            false
        }
    }
}
