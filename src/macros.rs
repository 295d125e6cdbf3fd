//! Macros for publishing lines without building [`Value`](crate::Value)s by hand.
//!
//! Every argument after the level is converted with `Value::from`; the first one
//! is the message, the rest fill the remaining runtime slots in order.
//!
//! # Examples
//!
//! ```
//! use plain_log::prelude::*;
//! use plain_log::publish;
//!
//! let format = Format::new(
//!     "%s %s=%s",
//!     &[FormatOption::RuntimeParameter, FormatOption::RuntimeParameter, FormatOption::RuntimeParameter],
//! )
//! .unwrap();
//! let logger = Logger::new(format, Vec::new());
//! logger.enable_all_levels();
//!
//! publish!(logger, Level::Normal, "listening", "port", 8080).unwrap();
//! assert_eq!(String::from_utf8(logger.into_sink()).unwrap().trim_end(), "listening port=8080");
//! ```

/// Publish a line at the given level.
///
/// Evaluates to the `Result` of the publish call.
#[macro_export]
macro_rules! publish {
    ($logger:expr, $level:expr, $msg:expr $(, $rest:expr)* $(,)?) => {
        $logger.publish(
            $level,
            $crate::Value::from($msg),
            &[$($crate::Value::from($rest)),*],
        )
    };
}

/// Publish a line at [`Level::Little`](crate::Level::Little).
#[macro_export]
macro_rules! little {
    ($logger:expr, $($arg:expr),+ $(,)?) => {
        $crate::publish!($logger, $crate::Level::Little, $($arg),+)
    };
}

/// Publish a line at [`Level::Normal`](crate::Level::Normal).
#[macro_export]
macro_rules! normal {
    ($logger:expr, $($arg:expr),+ $(,)?) => {
        $crate::publish!($logger, $crate::Level::Normal, $($arg),+)
    };
}

/// Publish a line at [`Level::Much`](crate::Level::Much).
#[macro_export]
macro_rules! much {
    ($logger:expr, $($arg:expr),+ $(,)?) => {
        $crate::publish!($logger, $crate::Level::Much, $($arg),+)
    };
}

/// Publish a line at [`Level::VeryMuch`](crate::Level::VeryMuch).
#[macro_export]
macro_rules! very_much {
    ($logger:expr, $($arg:expr),+ $(,)?) => {
        $crate::publish!($logger, $crate::Level::VeryMuch, $($arg),+)
    };
}

/// Publish a line at [`Level::Insane`](crate::Level::Insane).
#[macro_export]
macro_rules! insane {
    ($logger:expr, $($arg:expr),+ $(,)?) => {
        $crate::publish!($logger, $crate::Level::Insane, $($arg),+)
    };
}
