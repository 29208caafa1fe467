//! Capture under concurrent emission from several threads.

use std::sync::{Arc, Barrier};
use std::thread;

use femtologging_capture::{FemtoLevel, ListAppender, LoggerRegistry};
use rstest::rstest;

#[rstest]
#[case(2, 100)]
#[case(8, 250)]
fn no_line_is_lost_or_torn(#[case] threads: usize, #[case] per_thread: usize) {
    let registry = Arc::new(LoggerRegistry::new());
    let appender = ListAppender::create_and_attach(&registry);
    let barrier = Arc::new(Barrier::new(threads));

    let handles: Vec<_> = (0..threads)
        .map(|t| {
            let registry = Arc::clone(&registry);
            let barrier = Arc::clone(&barrier);
            thread::spawn(move || {
                barrier.wait();
                for i in 0..per_thread {
                    registry
                        .log("worker", FemtoLevel::Info, &format!("t{t} m{i}"))
                        .expect("dispatch should succeed");
                }
            })
        })
        .collect();
    for handle in handles {
        handle.join().expect("worker thread panicked");
    }

    let lines = appender.lines();
    assert_eq!(lines.len(), threads * per_thread);
    assert!(lines.iter().all(|l| l.starts_with("INFO: t")));

    // Each thread's own messages keep their relative order.
    for t in 0..threads {
        let prefix = format!("INFO: t{t} m");
        let seen: Vec<usize> = lines
            .iter()
            .filter_map(|l| l.strip_prefix(prefix.as_str()))
            .map(|n| n.parse().expect("numeric suffix"))
            .collect();
        assert_eq!(seen, (0..per_thread).collect::<Vec<_>>());
    }
}

#[test]
fn queries_run_while_other_threads_capture() {
    let registry = Arc::new(LoggerRegistry::new());
    let appender = ListAppender::create_and_attach(&registry);

    let writer = {
        let registry = Arc::clone(&registry);
        thread::spawn(move || {
            for i in 0..500 {
                registry
                    .log("writer", FemtoLevel::Warn, &format!("line {i}"))
                    .expect("dispatch should succeed");
            }
        })
    };
    for _ in 0..50 {
        let snapshot = appender.lines();
        assert!(snapshot.iter().all(|l| l.starts_with("WARN: line ")));
        let _ = appender.to_string();
    }
    writer.join().expect("writer thread panicked");

    assert_eq!(appender.len(), 500);
    appender.assert_has_log(|line: &str| line == "WARN: line 499");
}
