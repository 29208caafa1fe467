//! Registry of handlers receiving every dispatched record.
//!
//! A [`LoggerRegistry`] is created by test setup code and passed to whatever
//! emits records. [`default_registry`] provides a process-wide instance for
//! harness wiring that cannot thread a handle through, such as the `log`
//! crate bridge.

use std::sync::Arc;

use log::debug;
use once_cell::sync::Lazy;
use parking_lot::RwLock;
use thiserror::Error;

use crate::handler::{FemtoHandler, HandlerError};
use crate::level::FemtoLevel;
use crate::log_record::FemtoLogRecord;

/// Errors raised while wiring handlers into process-wide logging state.
#[derive(Debug, Error, Clone, Copy, PartialEq, Eq)]
pub enum RegistryError {
    /// Another `log::Log` implementation was installed first.
    #[error("global Rust logger is already set; cannot install the capture bridge")]
    GlobalLoggerAlreadySet,
}

/// Ordered set of attached handlers.
#[derive(Default)]
pub struct LoggerRegistry {
    handlers: RwLock<Vec<Arc<dyn FemtoHandler>>>,
}

static DEFAULT_REGISTRY: Lazy<Arc<LoggerRegistry>> = Lazy::new(|| Arc::new(LoggerRegistry::new()));

/// Process-wide registry used when no explicit registry is available.
pub fn default_registry() -> &'static Arc<LoggerRegistry> {
    &DEFAULT_REGISTRY
}

fn handler_addr<H: ?Sized>(handler: &Arc<H>) -> *const () {
    Arc::as_ptr(handler) as *const ()
}

impl LoggerRegistry {
    pub fn new() -> Self {
        Self::default()
    }

    /// Register `handler`. Returns `false` if it was already registered.
    pub fn attach<H>(&self, handler: &Arc<H>) -> bool
    where
        H: FemtoHandler + 'static,
    {
        let addr = handler_addr(handler);
        {
            let mut handlers = self.handlers.write();
            if handlers.iter().any(|h| handler_addr(h) == addr) {
                return false;
            }
            handlers.push(Arc::clone(handler) as Arc<dyn FemtoHandler>);
        }
        debug!("attached handler {addr:p}");
        true
    }

    /// Unregister `handler`. Returns `false` if it was not registered.
    pub fn detach<H>(&self, handler: &Arc<H>) -> bool
    where
        H: FemtoHandler + ?Sized,
    {
        let addr = handler_addr(handler);
        let removed = {
            let mut handlers = self.handlers.write();
            let before = handlers.len();
            handlers.retain(|h| handler_addr(h) != addr);
            handlers.len() != before
        };
        if removed {
            debug!("detached handler {addr:p}");
        }
        removed
    }

    pub fn is_attached<H>(&self, handler: &Arc<H>) -> bool
    where
        H: FemtoHandler + ?Sized,
    {
        let addr = handler_addr(handler);
        self.handlers.read().iter().any(|h| handler_addr(h) == addr)
    }

    pub fn len(&self) -> usize {
        self.handlers.read().len()
    }

    pub fn is_empty(&self) -> bool {
        self.handlers.read().is_empty()
    }

    /// Deliver `record` to every attached handler in attachment order.
    ///
    /// The handler list is snapshotted first so handlers may attach or detach
    /// while being called. The first handler error stops delivery.
    pub fn dispatch(&self, record: &FemtoLogRecord) -> Result<(), HandlerError> {
        let handlers = self.handlers.read().clone();
        for handler in &handlers {
            handler.handle(record)?;
        }
        Ok(())
    }

    /// Build a record and dispatch it.
    pub fn log(&self, logger: &str, level: FemtoLevel, message: &str) -> Result<(), HandlerError> {
        self.dispatch(&FemtoLogRecord::new(logger, level, message))
    }
}
