//! Basic logger usage example
//!
//! Demonstrates verbosity bands and line templates on standard output.
//!
//! Run with: cargo run --example basic_usage

use plain_log::prelude::*;
use plain_log::{much, publish};

fn main() -> Result<()> {
    println!("=== Plain Log - Basic Usage Example ===\n");

    let template = format!("%{}s | %s", Level::longest_name_len());
    let format = Format::new(&template, &[FormatOption::Level, FormatOption::RuntimeParameter])?;
    let logger = Logger::stdout(format);

    println!("1. Everything starts disabled:");
    publish!(logger, Level::Little, "This line is never shown")?;

    println!("\n2. Enabling VERY_MUCH enables every less verbose level too:");
    logger.enable(Level::VeryMuch);
    for level in Level::ALL {
        logger.publish(level, Value::from("Hello, Log!"), &[])?;
    }

    println!("\n3. Disabling NORMAL switches off NORMAL and LITTLE:");
    logger.disable(Level::Normal);
    for level in Level::ALL {
        logger.publish(level, Value::from("Hello again"), &[])?;
    }

    println!("\n4. Thread ids and several runtime values:");
    let detailed = Format::new(
        "[thread %s] %-9s %s took %sms",
        &[
            FormatOption::ThreadId,
            FormatOption::Level,
            FormatOption::RuntimeParameter,
            FormatOption::RuntimeParameter,
        ],
    )?;
    let detailed_logger = Logger::stdout(detailed);
    detailed_logger.enable_all_levels();
    much!(detailed_logger, "index rebuild", 42)?;

    println!("\n5. Too few values is an error:");
    if let Err(e) = much!(detailed_logger, "missing duration") {
        println!("   {}", e);
    }

    println!("\n=== Example completed successfully! ===");

    Ok(())
}
