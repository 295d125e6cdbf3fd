//! # Plain Log
//!
//! A small, synchronous line logger.
//!
//! ## Features
//!
//! - **Verbosity bands**: enabling a [`Level`] enables everything less verbose
//! - **Line templates**: printf-style templates fed by level, thread id and caller values
//! - **Single sink**: any [`std::io::Write`], flushed after every line
//! - **Thread safe**: one logger can be shared between threads

pub mod core;
pub mod macros;

pub mod prelude {
    pub use crate::core::{
        Format, FormatOption, Level, LevelSet, LineEnding, Log, Logger, LoggerBuilder,
        LoggerError, LoggerMetrics, Result, Value,
    };
}

pub use core::{
    Format, FormatOption, Level, LevelSet, LineEnding, Log, Logger, LoggerBuilder, LoggerError,
    LoggerMetrics, Result, Value,
};
