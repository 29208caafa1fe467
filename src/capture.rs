//! Attach/detach lifecycle for [`ListAppender`].
//!
//! An appender starts detached. Attaching registers it with a
//! [`LoggerRegistry`]; detaching removes it again without touching the lines
//! it already captured, so a test can still inspect or dump them. Appenders
//! may be re-attached any number of times.
//!
//! [`CaptureGuard`] ties attachment to a scope: the appender is detached when
//! the guard drops, including while a failing test unwinds.

use std::io;
use std::ops::Deref;
use std::sync::Arc;
use std::thread;

use crate::appender::ListAppender;
use crate::registry::LoggerRegistry;
#[cfg(feature = "log-compat")]
use crate::registry::{RegistryError, default_registry};

impl ListAppender {
    /// Register this appender with `registry`.
    pub fn attach(self: &Arc<Self>, registry: &LoggerRegistry) {
        registry.attach(self);
    }

    /// Remove this appender from `registry`; a no-op when not attached.
    pub fn detach(self: &Arc<Self>, registry: &LoggerRegistry) -> bool {
        registry.detach(self)
    }

    pub fn is_attached_to(self: &Arc<Self>, registry: &LoggerRegistry) -> bool {
        registry.is_attached(self)
    }

    /// Create an appender and attach it to `registry` until the guard drops.
    pub fn create_and_attach(registry: &Arc<LoggerRegistry>) -> CaptureGuard {
        CaptureGuard::attach(Arc::new(Self::new()), Arc::clone(registry))
    }

    /// Create an appender receiving everything logged through the `log` crate.
    ///
    /// Installs the `log` bridge on first use and attaches the appender to
    /// the default registry.
    #[cfg(feature = "log-compat")]
    pub fn create_and_add_to_root_logger() -> Result<CaptureGuard, RegistryError> {
        crate::log_compat::install_global_logger()?;
        Ok(Self::create_and_attach(default_registry()))
    }
}

/// Keeps an appender attached for as long as the guard lives.
#[must_use = "the appender is detached as soon as the guard is dropped"]
pub struct CaptureGuard {
    appender: Arc<ListAppender>,
    registry: Arc<LoggerRegistry>,
}

impl CaptureGuard {
    /// Attach `appender` to `registry` and return a guard owning both.
    pub fn attach(appender: Arc<ListAppender>, registry: Arc<LoggerRegistry>) -> Self {
        appender.attach(&registry);
        Self { appender, registry }
    }

    pub fn appender(&self) -> &Arc<ListAppender> {
        &self.appender
    }

    pub fn registry(&self) -> &Arc<LoggerRegistry> {
        &self.registry
    }

    pub fn is_attached(&self) -> bool {
        self.appender.is_attached_to(&self.registry)
    }

    /// Detach now and hand back the appender for inspection.
    pub fn detach(self) -> Arc<ListAppender> {
        Arc::clone(&self.appender)
    }
}

impl Deref for CaptureGuard {
    type Target = ListAppender;

    fn deref(&self) -> &Self::Target {
        &self.appender
    }
}

impl Drop for CaptureGuard {
    fn drop(&mut self) {
        if thread::panicking() && self.appender.dumps_on_failure() {
            // Best effort; the panic already reports the failure.
            let _ = self.appender.print_to(&mut io::stderr().lock());
        }
        self.appender.detach(&self.registry);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::level::FemtoLevel;

    #[test]
    fn guard_detaches_on_drop() {
        let registry = Arc::new(LoggerRegistry::new());
        let appender = {
            let guard = ListAppender::create_and_attach(&registry);
            assert!(guard.is_attached());
            Arc::clone(guard.appender())
        };
        assert!(registry.is_empty());
        registry.log("core", FemtoLevel::Info, "late").expect("dispatch");
        assert!(appender.is_empty());
    }

    #[test]
    fn explicit_detach_keeps_captured_lines() {
        let registry = Arc::new(LoggerRegistry::new());
        let guard = ListAppender::create_and_attach(&registry);
        registry.log("core", FemtoLevel::Warn, "disk low").expect("dispatch");
        let appender = guard.detach();
        registry.log("core", FemtoLevel::Warn, "ignored").expect("dispatch");
        assert_eq!(appender.to_string(), "WARN: disk low");
        assert!(!appender.is_attached_to(&registry));
    }

    #[test]
    fn reattach_keeps_existing_lines() {
        let registry = LoggerRegistry::new();
        let appender = Arc::new(ListAppender::new());
        appender.attach(&registry);
        registry.log("core", FemtoLevel::Info, "first").expect("dispatch");
        assert!(appender.detach(&registry));
        registry.log("core", FemtoLevel::Info, "missed").expect("dispatch");
        appender.attach(&registry);
        registry.log("core", FemtoLevel::Info, "second").expect("dispatch");
        assert_eq!(appender.lines(), ["INFO: first", "INFO: second"]);
    }

    #[test]
    fn guard_detaches_while_unwinding() {
        let registry = Arc::new(LoggerRegistry::new());
        let shared = Arc::clone(&registry);
        let outcome = std::panic::catch_unwind(std::panic::AssertUnwindSafe(move || {
            let _guard = ListAppender::builder()
                .dump_on_failure(true)
                .attach_to(&shared);
            shared.log("core", FemtoLevel::Error, "boom").expect("dispatch");
            panic!("test failure");
        }));
        assert!(outcome.is_err());
        assert!(registry.is_empty());
    }
}
