//! Main logger implementation

use super::{
    error::{precondition, LoggerError, Result},
    format::Format,
    level::{Level, LevelSet},
    metrics::LoggerMetrics,
    value::Value,
};
use parking_lot::{Mutex, RwLock};
use std::io::{self, Stdout, Write};
use std::sync::Arc;

/// The operations every logger offers.
pub trait Log {
    /// Publish one line at `level` if that level is enabled.
    fn publish(&self, level: Level, msg: Value, msgs: &[Value]) -> Result<()>;

    fn enable_all_levels(&self);

    fn disable_all_levels(&self);

    /// Enable `level` and every level below it.
    fn enable(&self, level: Level);

    /// Disable `level` and every level below it.
    fn disable(&self, level: Level);

    fn is_enabled(&self, level: Level) -> bool;
}

/// Synchronous logger writing formatted lines to a single sink.
///
/// All levels start disabled. Every line is written with one `write_all` and
/// followed by a `flush` while the sink lock is held, so lines from different
/// threads never interleave. The logger never closes its sink; use
/// [`Logger::into_sink`] to take it back.
///
/// # Example
///
/// ```
/// use plain_log::prelude::*;
///
/// let format = Format::new("%s: %s", &[FormatOption::Level, FormatOption::RuntimeParameter])?;
/// let logger = Logger::new(format, Vec::new());
/// logger.enable(Level::Normal);
///
/// logger.publish(Level::Little, Value::from("shown"), &[])?;
/// logger.publish(Level::Much, Value::from("hidden"), &[])?;
///
/// let out = String::from_utf8(logger.into_sink()).unwrap();
/// assert_eq!(out.lines().collect::<Vec<_>>(), vec!["LITTLE: shown"]);
/// # Ok::<(), plain_log::LoggerError>(())
/// ```
pub struct Logger<W: Write + Send = Stdout> {
    enabled: RwLock<LevelSet>,
    format: Arc<Format>,
    sink: Mutex<W>,
    metrics: LoggerMetrics,
}

impl Logger<Stdout> {
    /// Create a logger writing to the process's standard output.
    #[must_use]
    pub fn stdout(format: impl Into<Arc<Format>>) -> Self {
        Self::new(format, io::stdout())
    }

    /// Create a builder for Logger
    ///
    /// # Example
    /// ```
    /// use plain_log::prelude::*;
    ///
    /// let format = Format::new("%s", &[FormatOption::RuntimeParameter]).unwrap();
    /// let logger = Logger::builder()
    ///     .format(format)
    ///     .sink(Vec::new())
    ///     .enable(Level::Much)
    ///     .build()
    ///     .unwrap();
    /// assert!(logger.is_enabled(Level::Little));
    /// ```
    #[must_use]
    pub fn builder() -> LoggerBuilder<Stdout> {
        LoggerBuilder::new()
    }
}

impl<W: Write + Send> Logger<W> {
    #[must_use]
    pub fn new(format: impl Into<Arc<Format>>, sink: W) -> Self {
        Self {
            enabled: RwLock::new(LevelSet::empty()),
            format: format.into(),
            sink: Mutex::new(sink),
            metrics: LoggerMetrics::new(),
        }
    }

    /// Publish one line, escalating sink failures to a panic.
    ///
    /// Returns an error when `msg` is [`Value::Null`] or when the format needs
    /// more runtime values than were given. Nothing is written in either case.
    ///
    /// # Panics
    ///
    /// Panics if writing to or flushing the sink fails.
    pub fn publish(&self, level: Level, msg: Value, msgs: &[Value]) -> Result<()> {
        match self.try_publish(level, msg, msgs) {
            Err(LoggerError::IoOperation {
                operation,
                message,
                source,
            }) => panic!("[LOGGER FATAL] {} failed ({}): {}", operation, message, source),
            other => other,
        }
    }

    /// Same as [`Logger::publish`] but returns sink failures as
    /// [`LoggerError::IoOperation`].
    pub fn try_publish(&self, level: Level, msg: Value, msgs: &[Value]) -> Result<()> {
        if let Err(e) = precondition(!msg.is_null(), "Message may not be null") {
            self.metrics.record_rejected();
            return Err(e);
        }

        if !self.is_enabled(level) {
            self.metrics.record_suppressed();
            return Ok(());
        }

        let mut values = Vec::with_capacity(msgs.len() + 1);
        values.push(msg);
        values.extend_from_slice(msgs);

        let line = match self.format.construct_line(level, &values) {
            Ok(line) => line,
            Err(e) => {
                self.metrics.record_rejected();
                return Err(e);
            }
        };

        self.write_line(line.as_bytes())
    }

    fn write_line(&self, bytes: &[u8]) -> Result<()> {
        let mut sink = self.sink.lock();
        sink.write_all(bytes).map_err(|e| {
            LoggerError::io_operation(
                "writing log line",
                format!("sink rejected {} bytes", bytes.len()),
                e,
            )
        })?;
        sink.flush()
            .map_err(|e| LoggerError::io_operation("flushing log sink", "flush after write", e))?;
        drop(sink);

        self.metrics.record_written(bytes.len());
        Ok(())
    }

    pub fn enable_all_levels(&self) {
        *self.enabled.write() = LevelSet::all();
    }

    pub fn disable_all_levels(&self) {
        *self.enabled.write() = LevelSet::empty();
    }

    pub fn enable(&self, level: Level) {
        let mut enabled = self.enabled.write();
        *enabled = enabled.union(level.lower_and_current());
    }

    pub fn disable(&self, level: Level) {
        let mut enabled = self.enabled.write();
        *enabled = enabled.difference(level.lower_and_current());
    }

    #[inline]
    pub fn is_enabled(&self, level: Level) -> bool {
        self.enabled.read().contains(level)
    }

    /// Snapshot of the currently enabled levels
    pub fn enabled_levels(&self) -> LevelSet {
        *self.enabled.read()
    }

    pub fn format(&self) -> &Format {
        &self.format
    }

    pub fn metrics(&self) -> &LoggerMetrics {
        &self.metrics
    }

    /// Consume the logger and hand back its sink, unclosed.
    pub fn into_sink(self) -> W {
        self.sink.into_inner()
    }
}

impl<W: Write + Send> Log for Logger<W> {
    fn publish(&self, level: Level, msg: Value, msgs: &[Value]) -> Result<()> {
        Logger::publish(self, level, msg, msgs)
    }

    fn enable_all_levels(&self) {
        Logger::enable_all_levels(self);
    }

    fn disable_all_levels(&self) {
        Logger::disable_all_levels(self);
    }

    fn enable(&self, level: Level) {
        Logger::enable(self, level);
    }

    fn disable(&self, level: Level) {
        Logger::disable(self, level);
    }

    fn is_enabled(&self, level: Level) -> bool {
        Logger::is_enabled(self, level)
    }
}

/// Builder for constructing Logger with a fluent API
pub struct LoggerBuilder<W> {
    format: Option<Arc<Format>>,
    sink: Option<W>,
    enabled: LevelSet,
}

impl LoggerBuilder<Stdout> {
    /// Create a new builder with no format, no sink and every level disabled
    pub fn new() -> Self {
        Self {
            format: None,
            sink: None,
            enabled: LevelSet::empty(),
        }
    }

    /// Write to the process's standard output
    #[must_use = "builder methods return a new value"]
    pub fn stdout(mut self) -> Self {
        self.sink = Some(io::stdout());
        self
    }
}

impl Default for LoggerBuilder<Stdout> {
    fn default() -> Self {
        Self::new()
    }
}

impl<W: Write + Send> LoggerBuilder<W> {
    #[must_use = "builder methods return a new value"]
    pub fn format(mut self, format: impl Into<Arc<Format>>) -> Self {
        self.format = Some(format.into());
        self
    }

    /// Set the sink lines are written to
    #[must_use = "builder methods return a new value"]
    pub fn sink<S: Write + Send>(self, sink: S) -> LoggerBuilder<S> {
        LoggerBuilder {
            format: self.format,
            sink: Some(sink),
            enabled: self.enabled,
        }
    }

    /// Enable `level` and every level below it
    #[must_use = "builder methods return a new value"]
    pub fn enable(mut self, level: Level) -> Self {
        self.enabled = self.enabled.union(level.lower_and_current());
        self
    }

    #[must_use = "builder methods return a new value"]
    pub fn enable_all(mut self) -> Self {
        self.enabled = LevelSet::all();
        self
    }

    /// Build the Logger
    ///
    /// Fails when no format or no sink was given.
    pub fn build(self) -> Result<Logger<W>> {
        let format = self
            .format
            .ok_or_else(|| LoggerError::invalid_argument("Format may not be null"))?;
        let sink = self
            .sink
            .ok_or_else(|| LoggerError::invalid_argument("OutputStream may not be null"))?;

        let logger = Logger::new(format, sink);
        *logger.enabled.write() = self.enabled;
        Ok(logger)
    }
}
