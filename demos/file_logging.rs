//! File logging example
//!
//! Demonstrates loading console and file backends from a JSON config.
//!
//! Run with: cargo run --example file_logging

use rust_logger_facade::prelude::*;

fn main() -> Result<()> {
    println!("=== Rust Logger Facade - File Logging Example ===\n");

    let config = LoggerConfig::from_json(
        r#"{
            "level": 6,
            "logger": {
                "console": { "colors": true, "timestamp": true },
                "file": { "logfile": "./logs/file_logging.log", "timestamp_format": "rfc3339" }
            }
        }"#,
    )?;

    let (logger, report) = Logger::builder().config(config).build_with_report();
    println!("Loaded backends: {:?}", report.loaded);
    for (name, error) in &report.failed {
        println!("Backend '{}' failed to load: {}", name, error);
    }

    logger.info("Application started");
    logger.req_with("GET /api/items", vec![FieldValue::from("client-7")]);
    logger.res_with("200 OK", vec![FieldValue::from(12.5)]);
    logger.warn("Disk usage above 80%");

    let timer = logger.timer(Some("report generated in %s"));
    let total: u64 = (1..=100_000u64).sum();
    timer.stop();
    logger.debug_with("hidden at info level", vec![FieldValue::from(total as i64)]);

    futures::executor::block_on(logger.flush())?;

    println!("\n=== Example completed successfully! ===");
    println!("Check './logs/file_logging.log' for file output");

    Ok(())
}
