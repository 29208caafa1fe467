//! Send/Sync guarantees for core types.

use femtologging_capture::{
    FemtoLogRecord, ListAppender, ListAppenderBuilder, LoggerRegistry,
    PatternFormatter, SharedFormatter,
};
use rstest::rstest;
use static_assertions::assert_impl_all;

#[rstest]
fn builders_are_send_sync() {
    assert_impl_all!(ListAppenderBuilder: Send, Sync);
}

#[rstest]
fn components_are_send_sync() {
    assert_impl_all!(ListAppender: Send, Sync);
    assert_impl_all!(LoggerRegistry: Send, Sync);
    assert_impl_all!(SharedFormatter: Send, Sync);
    assert_impl_all!(PatternFormatter: Send, Sync);
    assert_impl_all!(FemtoLogRecord: Send, Sync);
}

#[cfg(feature = "tracing-compat")]
#[rstest]
fn tracing_layer_is_send_sync() {
    assert_impl_all!(femtologging_capture::CaptureLayer: Send, Sync);
}
