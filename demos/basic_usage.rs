//! Basic logger usage example
//!
//! Demonstrates the level table, threshold changes and custom event kinds
//! with a console backend.
//!
//! Run with: cargo run --example basic_usage

use colored::Color;
use rust_logger_facade::prelude::*;
use rust_logger_facade::{info, req};

fn main() -> Result<()> {
    println!("=== Rust Logger Facade - Basic Usage Example ===\n");

    let logger = Logger::builder()
        .without_backends()
        .backend("console", ConsoleBackend::new())
        .build();

    println!(
        "Environment {:?} gives default level {:?}\n",
        logger.environment().tag(),
        logger.get_level()
    );

    // Log messages at every level
    println!("1. Logging at every level:");
    logger.set_level("debug")?;
    logger.error("This is an error message");
    logger.warn("This is a warning message");
    logger.sys("This is a system message");
    logger.req("GET /users");
    logger.res("200 OK");
    logger.info("This is an info message");
    logger.debug("This is a debug message");

    println!("\n2. Raising the threshold:");
    logger.set_level("sys")?;
    println!("   Level set to SYS - req, res, info and debug won't show:");
    logger.info("Info message (hidden)");
    logger.sys("System message (visible)");

    println!("\n3. Custom kinds are never filtered:");
    logger.log("audit", Some(&"user 42 deleted"), vec![FieldValue::from(42)]);

    println!("\n4. Styled messages and extra data:");
    logger.reset_level();
    logger.info_with(
        StyledMessage::new()
            .plain("cache ")
            .colored("warm", Color::Green)
            .bold(" (3 regions)"),
        vec![FieldValue::from("eu-west"), FieldValue::from(true)],
    );
    info!(logger, "formatted with the {} macro", "info!");
    req!(logger, "{} {}", "POST", "/orders");

    println!("\n=== Example completed successfully! ===");

    Ok(())
}
