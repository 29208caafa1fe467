//! Test fixtures providing a private registry and an appender attached to it.
//! Each test gets its own registry so captures never observe records emitted
//! by tests running in parallel.

use std::sync::Arc;

use femtologging_capture::{CaptureGuard, FemtoLevel, ListAppender, LoggerRegistry};
use rstest::fixture;

/// Return a fresh registry with nothing attached.
#[fixture]
pub fn registry() -> Arc<LoggerRegistry> {
    Arc::new(LoggerRegistry::new())
}

/// Return a registry together with a default appender attached to it.
#[fixture]
pub fn capture(registry: Arc<LoggerRegistry>) -> (Arc<LoggerRegistry>, CaptureGuard) {
    let guard = ListAppender::create_and_attach(&registry);
    (registry, guard)
}

/// Emit `message` at `level` through `registry`, failing the test on error.
pub fn emit(registry: &LoggerRegistry, level: FemtoLevel, message: &str) {
    registry
        .log("test", level, message)
        .expect("dispatch should succeed");
}
