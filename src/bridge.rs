use std::cell::Cell;
use std::sync::Arc;

use parking_lot::Mutex;

use crate::error::LoggerError;
use crate::level::Level;
use crate::logger::Logger;

/// A `Logger` that can be shared between threads.
///
/// Every access locks the inner logger, so a tag set inside one
/// [`with`](SharedLogger::with) call is consumed by an emission in that same
/// call and cannot leak to another thread's line.
///
/// ```
/// # use banana_logger::{Logger, MemorySink, SharedLogger};
/// let sink = MemorySink::new();
/// let shared = SharedLogger::new(Logger::with_sink(sink.clone()));
///
/// let worker = shared.clone();
/// std::thread::spawn(move || {
///     worker.with(|logger| {
///         logger.tag("worker").info(["started"]);
///     });
/// })
/// .join()
/// .unwrap();
///
/// assert!(sink.lines()[0].contains("[worker] [INFO] started"));
/// ```
#[derive(Clone)]
pub struct SharedLogger {
    inner: Arc<Mutex<Logger>>,
}

impl SharedLogger {
    pub fn new(logger: Logger) -> Self {
        Self {
            inner: Arc::new(Mutex::new(logger)),
        }
    }

    /// Runs `f` with exclusive access to the logger.
    pub fn with<R>(&self, f: impl FnOnce(&mut Logger) -> R) -> R {
        f(&mut self.inner.lock())
    }

    /// Registers this logger as the global `log` backend.
    ///
    /// Records from the `log` macros are emitted with their target as tag,
    /// unless a tag is already pending. The global max level is left wide
    /// open so later `set_level` calls keep deciding what passes.
    ///
    /// # Errors
    ///
    /// [`LoggerError::AlreadyInstalled`] if the process already has a global
    /// logger.
    pub fn install(&self) -> Result<(), LoggerError> {
        log::set_boxed_logger(Box::new(LogBridge::new(self.clone())))
            .map_err(|_| LoggerError::AlreadyInstalled)?;
        log::set_max_level(log::LevelFilter::Trace);
        Ok(())
    }
}

thread_local! {
    // set while this thread holds the logger inside the bridge
    static IN_BRIDGE: Cell<bool> = const { Cell::new(false) };
}

struct BridgeGuard;

impl BridgeGuard {
    /// `None` when the current thread is already inside the bridge.
    fn enter() -> Option<Self> {
        IN_BRIDGE.with(|flag| (!flag.replace(true)).then_some(BridgeGuard))
    }
}

impl Drop for BridgeGuard {
    fn drop(&mut self) {
        IN_BRIDGE.with(|flag| flag.set(false));
    }
}

/// Adapter from the `log` facade to a [`SharedLogger`].
///
/// Records raised while the same thread is already emitting through the
/// bridge (a sink or a `tracing`-to-`log` forwarder calling back into `log`)
/// are dropped, since the logger lock is not reentrant.
pub struct LogBridge {
    logger: SharedLogger,
}

impl LogBridge {
    pub fn new(logger: SharedLogger) -> Self {
        Self { logger }
    }
}

impl log::Log for LogBridge {
    fn enabled(&self, metadata: &log::Metadata) -> bool {
        let Some(_guard) = BridgeGuard::enter() else {
            return false;
        };
        let level = Level::from(metadata.level());
        self.logger.with(|logger| logger.should_log(level))
    }

    fn log(&self, record: &log::Record) {
        let Some(_guard) = BridgeGuard::enter() else {
            return;
        };
        let level = Level::from(record.level());
        let message = record.args().to_string();
        self.logger.with(|logger| {
            if logger.should_log(level) {
                if logger.current_tag().is_none() {
                    logger.tag(record.target());
                }
                logger.log(level, [message]);
            }
        });
    }

    fn flush(&self) {}
}
