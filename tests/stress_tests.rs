//! Stress tests for concurrent dispatch
//!
//! These tests verify:
//! - No event is lost or duplicated under concurrent logging
//! - Adding and removing backends while other threads log is safe
//! - Flush can run while events are being dispatched

use rust_logger_facade::prelude::*;
use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::Arc;
use std::thread;

fn shared_logger() -> (Arc<Logger>, MemoryHandle) {
    let memory = MemoryBackend::new();
    let handle = memory.handle();
    let logger = Logger::builder()
        .environment(Environment::new(None, false))
        .without_backends()
        .level(LogLevel::Debug)
        .backend("memory", memory)
        .build();
    (Arc::new(logger), handle)
}

#[test]
fn test_concurrent_logging_delivers_every_event() {
    const THREADS: usize = 8;
    const PER_THREAD: usize = 500;

    let (logger, events) = shared_logger();

    let handles: Vec<_> = (0..THREADS)
        .map(|thread_id| {
            let logger = Arc::clone(&logger);
            thread::spawn(move || {
                for i in 0..PER_THREAD {
                    logger.info(format!("thread {} event {}", thread_id, i));
                }
            })
        })
        .collect();

    for handle in handles {
        handle.join().expect("logging thread panicked");
    }

    assert_eq!(events.len(), THREADS * PER_THREAD);
    assert_eq!(
        logger.metrics().events_dispatched(),
        (THREADS * PER_THREAD) as u64
    );

    // Per-thread order is preserved
    let messages = events.messages();
    for thread_id in 0..THREADS {
        let prefix = format!("thread {} event ", thread_id);
        let sequence: Vec<usize> = messages
            .iter()
            .filter_map(|m| m.strip_prefix(&prefix))
            .map(|n| n.parse().unwrap())
            .collect();
        assert_eq!(sequence, (0..PER_THREAD).collect::<Vec<_>>());
    }
}

#[test]
fn test_registry_churn_while_logging() {
    let (logger, events) = shared_logger();
    let running = Arc::new(AtomicBool::new(true));

    let writers: Vec<_> = (0..4)
        .map(|_| {
            let logger = Arc::clone(&logger);
            let running = Arc::clone(&running);
            thread::spawn(move || {
                let mut sent = 0usize;
                while running.load(Ordering::Relaxed) {
                    logger.debug("churn");
                    sent += 1;
                }
                sent
            })
        })
        .collect();

    let churn = {
        let logger = Arc::clone(&logger);
        thread::spawn(move || {
            for round in 0..200 {
                let name = format!("transient-{}", round % 4);
                logger.add_backend(&name, MemoryBackend::with_capacity(16));
                logger.remove_logger(&name);
            }
        })
    };

    churn.join().expect("churn thread panicked");
    running.store(false, Ordering::Relaxed);
    let sent: usize = writers
        .into_iter()
        .map(|w| w.join().expect("writer thread panicked"))
        .sum();

    // The permanent backend saw every event regardless of churn
    assert_eq!(events.len(), sent);
    assert_eq!(logger.logger_names(), vec!["memory"]);
}

#[tokio::test(flavor = "multi_thread", worker_threads = 4)]
async fn test_flush_during_dispatch() {
    let (logger, events) = shared_logger();

    let writer = {
        let logger = Arc::clone(&logger);
        tokio::task::spawn_blocking(move || {
            for i in 0..1_000 {
                logger.res(format!("response {}", i));
            }
        })
    };

    for _ in 0..10 {
        logger.flush().await.expect("memory flush never fails");
    }
    writer.await.expect("writer task panicked");
    logger.flush().await.expect("memory flush never fails");

    assert_eq!(events.len(), 1_000);
    assert_eq!(events.flush_count(), 11);
}
