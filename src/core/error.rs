//! Error types for the logger

pub type Result<T> = std::result::Result<T, LoggerError>;

#[derive(Debug, thiserror::Error)]
pub enum LoggerError {
    /// A construction or call precondition did not hold
    #[error("Invalid argument: {0}")]
    InvalidArgument(String),

    /// IO error with context
    #[error("IO error while {operation}: {message}")]
    IoOperation {
        operation: String,
        message: String,
        #[source]
        source: std::io::Error,
    },
}

impl LoggerError {
    /// Create an invalid argument error
    pub fn invalid_argument<S: Into<String>>(msg: S) -> Self {
        LoggerError::InvalidArgument(msg.into())
    }

    /// Create an IO operation error with context
    pub fn io_operation(
        operation: impl Into<String>,
        message: impl Into<String>,
        source: std::io::Error,
    ) -> Self {
        LoggerError::IoOperation {
            operation: operation.into(),
            message: message.into(),
            source,
        }
    }

    pub fn is_invalid_argument(&self) -> bool {
        matches!(self, LoggerError::InvalidArgument(_))
    }
}

/// Fails with [`LoggerError::InvalidArgument`] unless `condition` holds.
pub(crate) fn precondition(condition: bool, msg: &str) -> Result<()> {
    if condition {
        Ok(())
    } else {
        Err(LoggerError::invalid_argument(msg))
    }
}
