//! Transport implementations and the destination cache
//!
//! A transport owns one live I/O resource and its own level mask. The
//! closed [`TransportKind`] variant set maps one-to-one onto the locator
//! scheme table; resolution errors on anything else. The cache memoizes one
//! transport per distinct (whole-decoded) locator string for the lifetime
//! of the process, so loggers share physical destinations.

pub mod console;
pub mod datagram;
pub mod file;
pub mod fragment;

pub use console::ConsoleTransport;
pub use datagram::DatagramTransport;
pub use file::FileTransport;

use crate::core::{LevelMask, LogValue, Result, Severity, SharedConfig};
use crate::format;
use crate::locator::{Locator, Scheme};
use parking_lot::RwLock;
use std::collections::HashMap;
use std::sync::Arc;

pub struct Transport {
    mask: LevelMask,
    kind: TransportKind,
    /// Human-readable destination label for diagnostics.
    label: String,
}

pub enum TransportKind {
    File(FileTransport),
    Datagram(DatagramTransport),
    Console(ConsoleTransport),
}

impl Transport {
    /// Build a transport for a parsed locator, on behalf of destination
    /// `id`. All configuration errors (scheme, host, port, facility, level
    /// expression) surface here.
    pub fn build(id: &str, locator: &Locator, config: &SharedConfig) -> Result<Transport> {
        let mask = LevelMask::parse(locator.fragment.clone().unwrap_or_default())?;

        let formatter = match &locator.format_hint {
            Some(hint) => match format::for_hint(hint, locator, config) {
                Some(built) => built?,
                None => format::default_for(locator.scheme, locator, config)?,
            },
            None => format::default_for(locator.scheme, locator, config)?,
        };

        let (kind, label) = match locator.scheme {
            Scheme::File => {
                let path = locator.path.clone().ok_or_else(|| {
                    crate::core::LogError::locator(id, "file destination needs a path")
                })?;
                let label = path.clone();
                (
                    TransportKind::File(FileTransport::new(id, path, formatter)?),
                    label,
                )
            }
            Scheme::Udp => {
                let t = DatagramTransport::new(id, locator, formatter, config.clone())?;
                let label = t.peer().to_string();
                (TransportKind::Datagram(t), label)
            }
            Scheme::Console => (
                TransportKind::Console(ConsoleTransport::new(id, formatter)),
                "tty".to_string(),
            ),
        };

        Ok(Transport { mask, kind, label })
    }

    pub fn mask(&self) -> LevelMask {
        self.mask
    }

    pub fn label(&self) -> &str {
        &self.label
    }

    pub fn as_file(&self) -> Option<&FileTransport> {
        match &self.kind {
            TransportKind::File(f) => Some(f),
            _ => None,
        }
    }

    /// Reopen the underlying resource where that means something (File);
    /// Datagram and Console have no reopenable state.
    pub fn open(&self, force: bool) -> Result<()> {
        match &self.kind {
            TransportKind::File(f) => f.open(force),
            _ => Ok(()),
        }
    }

    /// Deliver one log call, applying this destination's own mask. `Emerg`
    /// (bit-less) is always delivered. Errors feed root-logger diagnostics;
    /// the original caller never sees them.
    pub fn write(&self, severity: Severity, args: &[LogValue]) -> Result<()> {
        if !self.mask.allows(severity) {
            return Ok(());
        }
        match &self.kind {
            TransportKind::File(f) => f.write(severity, args),
            TransportKind::Datagram(d) => d.write(severity, args),
            TransportKind::Console(c) => {
                c.write(severity, args);
                Ok(())
            }
        }
    }
}

/// Process-wide locator-to-transport memoization.
#[derive(Default)]
pub struct TransportCache {
    inner: RwLock<HashMap<String, Arc<Transport>>>,
}

impl TransportCache {
    pub fn new() -> Self {
        Self::default()
    }

    /// Resolve a raw locator to its transport, constructing it on first
    /// sight. The key is the whole-decoded locator string, so spellings
    /// differing only in percent-escapes share one transport.
    pub fn resolve(&self, id: &str, raw: &str, config: &SharedConfig) -> Result<Arc<Transport>> {
        let key = Locator::decode(raw)?;
        if let Some(existing) = self.inner.read().get(&key) {
            return Ok(existing.clone());
        }

        let locator = Locator::parse(&key)?;
        let transport = Arc::new(Transport::build(id, &locator, config)?);

        let mut guard = self.inner.write();
        Ok(guard.entry(key).or_insert(transport).clone())
    }

    /// Every distinct File transport, for the rotation scheduler.
    pub fn file_transports(&self) -> Vec<Arc<Transport>> {
        self.inner
            .read()
            .values()
            .filter(|t| t.as_file().is_some())
            .cloned()
            .collect()
    }
}
