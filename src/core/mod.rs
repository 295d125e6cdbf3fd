//! Core logger types and traits

pub mod error;
pub mod format;
pub mod level;
pub mod logger;
pub mod metrics;
pub mod value;

pub use error::{LoggerError, Result};
pub use format::{Format, FormatOption, LineEnding};
pub use level::{Level, LevelSet};
pub use logger::{Log, Logger, LoggerBuilder};
pub use metrics::LoggerMetrics;
pub use value::Value;
