//! Logger façade and registry
//!
//! A [`Hub`] owns the runtime config, the locator-to-transport cache, the
//! logger registry, one background writer thread, and the rotation
//! scheduler. Severity methods are submit-only: they gate on the
//! process-wide mask, hand the call to the writer queue, and return —
//! they never block on I/O, never fail, and never observe completion.

use crate::core::{LevelExpr, LogError, LogValue, Result, RuntimeConfig, Severity, SharedConfig};
use crate::format::{self, Formatter};
use crate::locator::{Locator, Scheme};
use crate::transport::{Transport, TransportCache};
use crossbeam_channel::{bounded, unbounded, Receiver, Sender};
use parking_lot::RwLock;
use std::collections::HashMap;
use std::io::{IsTerminal, Write};
use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::{Arc, OnceLock, Weak};
use std::thread;
use std::time::Duration;

/// Periodic reopen interval for file transports.
const ROTATE_INTERVAL: Duration = Duration::from_secs(60);

/// How often the rotation thread checks the signal flag.
const ROTATE_TICK: Duration = Duration::from_secs(1);

pub struct Hub {
    shared: Arc<HubShared>,
}

struct HubShared {
    config: SharedConfig,
    loggers: RwLock<HashMap<String, Logger>>,
    cache: TransportCache,
    tx: Sender<Job>,
    root: Arc<Root>,
}

enum Job {
    Write {
        transports: Arc<[Arc<Transport>]>,
        severity: Severity,
        args: Vec<LogValue>,
    },
    Flush(Sender<()>),
}

/// Ordered argument list for one log call. Single strings and values
/// coerce to a one-element list.
pub struct Args(Vec<LogValue>);

impl From<Vec<LogValue>> for Args {
    fn from(v: Vec<LogValue>) -> Self {
        Args(v)
    }
}

impl From<LogValue> for Args {
    fn from(v: LogValue) -> Self {
        Args(vec![v])
    }
}

impl From<&str> for Args {
    fn from(s: &str) -> Self {
        Args(vec![LogValue::from(s)])
    }
}

impl From<String> for Args {
    fn from(s: String) -> Self {
        Args(vec![LogValue::from(s)])
    }
}

impl<const N: usize> From<[LogValue; N]> for Args {
    fn from(v: [LogValue; N]) -> Self {
        Args(v.into())
    }
}

/// One or more destination locators. A bare string or number coerces to a
/// one-element list.
pub struct LocatorList(Vec<String>);

impl From<&str> for LocatorList {
    fn from(s: &str) -> Self {
        LocatorList(vec![s.to_string()])
    }
}

impl From<String> for LocatorList {
    fn from(s: String) -> Self {
        LocatorList(vec![s])
    }
}

impl From<u64> for LocatorList {
    fn from(n: u64) -> Self {
        LocatorList(vec![n.to_string()])
    }
}

impl From<Vec<String>> for LocatorList {
    fn from(v: Vec<String>) -> Self {
        LocatorList(v)
    }
}

impl From<&[&str]> for LocatorList {
    fn from(v: &[&str]) -> Self {
        LocatorList(v.iter().map(|s| s.to_string()).collect())
    }
}

impl<const N: usize> From<[&str; N]> for LocatorList {
    fn from(v: [&str; N]) -> Self {
        LocatorList(v.iter().map(|s| s.to_string()).collect())
    }
}

impl Hub {
    /// Create a hub with its writer thread and rotation scheduler. The
    /// rotation thread holds only a weak reference, so dropping the hub
    /// (and its loggers) shuts both threads down.
    pub fn new() -> Hub {
        let config = RuntimeConfig::new();
        let root = Arc::new(Root::new(config.clone()));
        let (tx, rx) = unbounded();

        spawn_writer(rx, root.clone());

        let shared = Arc::new(HubShared {
            config,
            loggers: RwLock::new(HashMap::new()),
            cache: TransportCache::new(),
            tx,
            root,
        });

        spawn_rotation(Arc::downgrade(&shared));

        Hub { shared }
    }

    /// The usual process-wide hub.
    pub fn global() -> &'static Hub {
        static GLOBAL: OnceLock<Hub> = OnceLock::new();
        GLOBAL.get_or_init(Hub::new)
    }

    /// Register a logger id with its destination locators. The first
    /// registration wins; re-adding an existing id is a no-op that returns
    /// the existing logger. Any configuration error leaves the id
    /// unregistered. An empty locator list yields an inert logger without
    /// registering anything.
    pub fn add(&self, id: &str, locators: impl Into<LocatorList>) -> Result<Logger> {
        if let Some(existing) = self.shared.loggers.read().get(id) {
            return Ok(existing.clone());
        }

        let LocatorList(locators) = locators.into();
        if locators.is_empty() {
            return Ok(self.inert(id));
        }

        let mut transports = Vec::with_capacity(locators.len());
        for raw in &locators {
            transports.push(self.shared.cache.resolve(id, raw, &self.shared.config)?);
        }

        let logger = Logger {
            id: Arc::from(id),
            transports: transports.into(),
            config: self.shared.config.clone(),
            tx: self.shared.tx.clone(),
        };

        // First registration wins even against a racing add.
        let mut guard = self.shared.loggers.write();
        Ok(guard.entry(id.to_string()).or_insert(logger).clone())
    }

    /// Register several ids at once.
    pub fn add_destinations<I, L>(&self, bindings: I) -> Result<()>
    where
        I: IntoIterator<Item = (String, L)>,
        L: Into<LocatorList>,
    {
        for (id, locators) in bindings {
            self.add(&id, locators)?;
        }
        Ok(())
    }

    /// The logger registered under `id`, or an inert logger that accepts
    /// every call and delivers nothing.
    pub fn get(&self, id: &str) -> Logger {
        self.shared
            .loggers
            .read()
            .get(id)
            .cloned()
            .unwrap_or_else(|| self.inert(id))
    }

    fn inert(&self, id: &str) -> Logger {
        Logger {
            id: Arc::from(id),
            transports: Arc::from([]),
            config: self.shared.config.clone(),
            tx: self.shared.tx.clone(),
        }
    }

    /// The root logger carrying internal diagnostics; also usable directly.
    pub fn root(&self) -> Arc<Root> {
        self.shared.root.clone()
    }

    pub fn config(&self) -> &SharedConfig {
        &self.shared.config
    }

    /// Set (or with `None` disable) the process-wide severity filter.
    pub fn set_level(&self, expr: Option<impl Into<LevelExpr>>) -> Result<()> {
        self.shared.config.set_mask(expr)
    }

    pub fn set_verbose(&self, verbose: bool) {
        self.shared.config.set_verbose(verbose);
    }

    /// Ceiling on datagram fragments per message.
    pub fn set_chunked(&self, count: usize) {
        self.shared.config.set_max_fragments(count);
    }

    /// Numeric base for byte-buffer dumps (2, 8, 10 or 16).
    pub fn set_dump_base(&self, base: u8) -> bool {
        self.shared.config.set_dump_base(base)
    }

    /// Wait until every submitted write has been handed to its transport.
    pub fn flush(&self) {
        let (ack_tx, ack_rx) = bounded(1);
        if self.shared.tx.send(Job::Flush(ack_tx)).is_ok() {
            let _ = ack_rx.recv();
        }
    }

    /// Reopen every distinct File transport; `force` closes handles first
    /// (the rotation-signal path). One transport's failure is reported and
    /// does not block the others.
    pub fn rotate(&self, force: bool) {
        self.shared.rotate(force);
    }
}

impl Default for Hub {
    fn default() -> Self {
        Self::new()
    }
}

impl HubShared {
    fn rotate(&self, force: bool) {
        for transport in self.cache.file_transports() {
            if let Err(e) = transport.open(force) {
                self.root.diagnose(&e);
            }
        }
    }
}

fn spawn_writer(rx: Receiver<Job>, root: Arc<Root>) {
    let _ = thread::Builder::new()
        .name("logroute-writer".to_string())
        .spawn(move || {
            for job in rx.iter() {
                match job {
                    Job::Write {
                        transports,
                        severity,
                        args,
                    } => {
                        // One diagnostic per failing destination; siblings
                        // still get the write.
                        for transport in transports.iter() {
                            if let Err(e) = transport.write(severity, &args) {
                                root.diagnose(&e);
                            }
                        }
                    }
                    Job::Flush(ack) => {
                        let _ = ack.send(());
                    }
                }
            }
        });
}

fn spawn_rotation(shared: Weak<HubShared>) {
    let flag = Arc::new(AtomicBool::new(false));
    let _ = signal_hook::flag::register(signal_hook::consts::SIGUSR2, flag.clone());

    let _ = thread::Builder::new()
        .name("logroute-rotate".to_string())
        .spawn(move || {
            let mut elapsed = Duration::ZERO;
            loop {
                thread::sleep(ROTATE_TICK);
                let Some(shared) = shared.upgrade() else {
                    break;
                };
                let force = flag.swap(false, Ordering::Relaxed);
                elapsed += ROTATE_TICK;
                let periodic = elapsed >= ROTATE_INTERVAL;
                if periodic {
                    elapsed = Duration::ZERO;
                }
                if force || periodic {
                    shared.rotate(force);
                }
            }
        });
}

/// A registered logger: an ordered list of bound transports behind eight
/// severity methods. Cheap to clone; inert when no transports are bound.
#[derive(Clone)]
pub struct Logger {
    id: Arc<str>,
    transports: Arc<[Arc<Transport>]>,
    config: SharedConfig,
    tx: Sender<Job>,
}

impl Logger {
    pub fn id(&self) -> &str {
        &self.id
    }

    /// Whether this logger delivers anywhere.
    pub fn is_inert(&self) -> bool {
        self.transports.is_empty()
    }

    fn emit(&self, severity: Severity, args: Args) {
        // The process-wide gate: transports never observe filtered calls.
        // Emerg carries no bit and passes every mask.
        if let Some(mask) = self.config.mask() {
            if !mask.allows(severity) {
                return;
            }
        }
        if self.transports.is_empty() {
            return;
        }
        let _ = self.tx.send(Job::Write {
            transports: self.transports.clone(),
            severity,
            args: args.0,
        });
    }

    fn drain(&self) {
        let (ack_tx, ack_rx) = bounded(1);
        if self.tx.send(Job::Flush(ack_tx)).is_ok() {
            let _ = ack_rx.recv();
        }
    }

    /// Log at `emerg`, wait for delivery, then terminate the process with
    /// a non-zero status. The only severity method that does not return.
    pub fn emerg(&self, args: impl Into<Args>) -> ! {
        self.emit(Severity::Emerg, args.into());
        self.drain();
        std::process::exit(1);
    }

    pub fn alert(&self, args: impl Into<Args>) {
        self.emit(Severity::Alert, args.into());
    }

    pub fn crit(&self, args: impl Into<Args>) {
        self.emit(Severity::Crit, args.into());
    }

    pub fn err(&self, args: impl Into<Args>) {
        self.emit(Severity::Err, args.into());
    }

    pub fn warning(&self, args: impl Into<Args>) {
        self.emit(Severity::Warning, args.into());
    }

    pub fn notice(&self, args: impl Into<Args>) {
        self.emit(Severity::Notice, args.into());
    }

    pub fn info(&self, args: impl Into<Args>) {
        self.emit(Severity::Info, args.into());
    }

    pub fn debug(&self, args: impl Into<Args>) {
        self.emit(Severity::Debug, args.into());
    }
}

/// The root logger: writes synchronously to standard error, colorized when
/// stderr is a terminal. Carries every internal diagnostic and never
/// filters.
pub struct Root {
    formatter: Box<dyn Formatter>,
}

impl Root {
    fn new(config: SharedConfig) -> Root {
        // The bare console locator: no query template, no hint.
        let locator = Locator {
            scheme: Scheme::Console,
            userinfo: None,
            host: None,
            port: None,
            path: None,
            query: None,
            fragment: None,
            format_hint: None,
        };
        let formatter: Box<dyn Formatter> = if std::io::stderr().is_terminal() {
            Box::new(format::TtyFormat::new(&locator, config))
        } else {
            Box::new(format::TabFormat::new(&locator, config))
        };
        Root { formatter }
    }

    /// Write one line at the `tip` pseudo-severity.
    pub fn log(&self, args: impl Into<Args>) {
        let Args(args) = args.into();
        let mut line = self.formatter.format("main", Severity::Tip, &args);
        line.push('\n');
        let stderr = std::io::stderr();
        let _ = stderr.lock().write_all(line.as_bytes());
    }

    pub(crate) fn diagnose(&self, err: &LogError) {
        self.log(vec![LogValue::from_error(err)]);
    }
}
