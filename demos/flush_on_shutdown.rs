//! Graceful shutdown example
//!
//! Demonstrates a custom backend with an asynchronous flush, registered next
//! to the built-in ones, and a shutdown that waits for every flush.
//!
//! Run with: cargo run --example flush_on_shutdown

use async_trait::async_trait;
use parking_lot::Mutex;
use rust_logger_facade::prelude::*;
use std::sync::Arc;
use std::time::Duration;

/// Batches events and "ships" them on flush
struct BatchingBackend {
    pending: Mutex<Vec<String>>,
}

#[async_trait]
impl Backend for BatchingBackend {
    fn log(&self, event: &LogEvent) -> Result<()> {
        self.pending.lock().push(event.to_json()?);
        Ok(())
    }

    fn can_flush(&self) -> bool {
        true
    }

    async fn flush(&self) -> Result<()> {
        let batch = std::mem::take(&mut *self.pending.lock());
        tokio::time::sleep(Duration::from_millis(50)).await;
        println!("   shipped {} event(s)", batch.len());
        Ok(())
    }
}

#[tokio::main]
async fn main() -> Result<()> {
    println!("=== Rust Logger Facade - Flush On Shutdown Example ===\n");

    let logger = Arc::new(
        Logger::builder()
            .without_backends()
            .backend("console", ConsoleBackend::with_colors(false))
            .build(),
    );

    let added = logger.add_logger(
        "batching",
        |_| {
            Ok(Arc::new(BatchingBackend {
                pending: Mutex::new(Vec::new()),
            }) as Arc<dyn Backend>)
        },
        &serde_json::Value::Null,
    )?;
    println!("Registered batching backend: {}\n", added);

    let workers: Vec<_> = (0..3)
        .map(|worker| {
            let logger = Arc::clone(&logger);
            tokio::spawn(async move {
                for job in 0..3 {
                    logger.info_with(
                        "job finished",
                        vec![FieldValue::from(worker), FieldValue::from(job)],
                    );
                }
            })
        })
        .collect();
    for worker in workers {
        worker.await.map_err(|e| LoggerError::other(e.to_string()))?;
    }

    println!("\nShutting down:");
    logger.shutdown().await?;
    println!("Remaining backends: {:?}", logger.logger_names());

    println!("\n=== Example completed successfully! ===");

    Ok(())
}
