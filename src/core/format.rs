//! Line templates
//!
//! A [`Format`] pairs a printf-style template with the ordered list of
//! [`FormatOption`]s that feed its placeholders. Supported directives:
//!
//! - `%s`: the next slot, rendered with its default string form
//! - `%9s`: the next slot, right-aligned in a field of 9 characters
//! - `%-9s`: the next slot, left-aligned in a field of 9 characters
//! - `%%`: a literal percent sign
//! - `%n`: the line terminator

use super::error::{precondition, LoggerError, Result};
use super::level::Level;
use super::value::Value;
use serde::{Deserialize, Serialize};
use std::cell::RefCell;
use std::fmt::{self, Write};
use std::str::FromStr;

// Thread-local cache so the id is only formatted once per thread
thread_local! {
    static THREAD_ID_CACHE: RefCell<Option<String>> = const { RefCell::new(None) };
}

/// Numeric id of the calling thread, computed and cached on first access
fn current_thread_id() -> String {
    THREAD_ID_CACHE.with(|cache| {
        cache
            .borrow_mut()
            .get_or_insert_with(|| {
                // `ThreadId` only exposes its number through Debug: "ThreadId(7)"
                let raw = format!("{:?}", std::thread::current().id());
                raw.chars().filter(char::is_ascii_digit).collect()
            })
            .clone()
    })
}

/// Where the value for one template placeholder comes from.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum FormatOption {
    /// Level of the current publish call
    Level,
    /// Id of the calling thread
    ThreadId,
    /// Next value supplied by the caller
    RuntimeParameter,
}

impl fmt::Display for FormatOption {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(match self {
            FormatOption::Level => "LEVEL",
            FormatOption::ThreadId => "THREAD_ID",
            FormatOption::RuntimeParameter => "RUNTIME_PARAMETER",
        })
    }
}

impl FromStr for FormatOption {
    type Err = String;

    fn from_str(s: &str) -> std::result::Result<Self, Self::Err> {
        match s.trim().to_uppercase().replace('-', "_").as_str() {
            "LEVEL" => Ok(FormatOption::Level),
            "THREAD_ID" => Ok(FormatOption::ThreadId),
            "RUNTIME_PARAMETER" => Ok(FormatOption::RuntimeParameter),
            _ => Err(format!("Unknown FormatOption: '{}'", s)),
        }
    }
}

/// Line terminator appended to every rendered line.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum LineEnding {
    Lf,
    CrLf,
}

impl LineEnding {
    /// The standard terminator of the platform this crate was built for
    pub const fn platform() -> Self {
        if cfg!(windows) {
            LineEnding::CrLf
        } else {
            LineEnding::Lf
        }
    }

    pub const fn as_str(&self) -> &'static str {
        match self {
            LineEnding::Lf => "\n",
            LineEnding::CrLf => "\r\n",
        }
    }
}

impl Default for LineEnding {
    fn default() -> Self {
        Self::platform()
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
enum Segment {
    Literal(String),
    Placeholder { width: Option<usize>, left_align: bool },
    LineBreak,
}

/// One resolved slot value for a single render.
enum Arg<'a> {
    Level(Level),
    ThreadId(String),
    Runtime(&'a Value),
}

impl fmt::Display for Arg<'_> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Arg::Level(level) => fmt::Display::fmt(level, f),
            Arg::ThreadId(id) => f.pad(id),
            Arg::Runtime(value) => fmt::Display::fmt(value, f),
        }
    }
}

fn parse_template(template: &str) -> Result<Vec<Segment>> {
    let mut segments = Vec::new();
    let mut literal = String::new();
    let mut chars = template.chars().peekable();

    while let Some(c) = chars.next() {
        if c != '%' {
            literal.push(c);
            continue;
        }

        let left_align = chars.next_if_eq(&'-').is_some();
        let mut digits = String::new();
        while let Some(d) = chars.next_if(char::is_ascii_digit) {
            digits.push(d);
        }

        let directive = chars.next().ok_or_else(|| {
            LoggerError::invalid_argument(format!(
                "Template ends inside a directive: '{}'",
                template
            ))
        })?;
        let plain = !left_align && digits.is_empty();

        match directive {
            '%' if plain => literal.push('%'),
            'n' if plain => {
                flush_literal(&mut literal, &mut segments);
                segments.push(Segment::LineBreak);
            }
            's' => {
                let width = if digits.is_empty() {
                    None
                } else {
                    Some(digits.parse::<usize>().map_err(|_| {
                        LoggerError::invalid_argument(format!("Field width too large: {}", digits))
                    })?)
                };
                flush_literal(&mut literal, &mut segments);
                segments.push(Segment::Placeholder { width, left_align });
            }
            other => {
                return Err(LoggerError::invalid_argument(format!(
                    "Unsupported directive '%{}{}{}' in template",
                    if left_align { "-" } else { "" },
                    digits,
                    other
                )));
            }
        }
    }

    flush_literal(&mut literal, &mut segments);
    Ok(segments)
}

fn flush_literal(literal: &mut String, segments: &mut Vec<Segment>) {
    if !literal.is_empty() {
        segments.push(Segment::Literal(std::mem::take(literal)));
    }
}

/// Immutable description of how a single line looks.
///
/// # Example
///
/// ```
/// use plain_log::{Format, FormatOption, Level, Value};
///
/// let format = Format::new("%9s | %s", &[FormatOption::Level, FormatOption::RuntimeParameter])
///     .unwrap();
/// let line = format.construct_line(Level::Much, &[Value::from("Hello, Log!")]).unwrap();
/// assert_eq!(line.trim_end(), "     MUCH | Hello, Log!");
/// ```
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Format {
    template: String,
    slots: Box<[FormatOption]>,
    segments: Vec<Segment>,
    line_ending: LineEnding,
}

impl Format {
    /// Build a format terminated by the platform line ending.
    ///
    /// Fails when the template is empty, when `slots` is empty, or when the
    /// template's `%s` placeholders do not match the number of slots.
    pub fn new(template: &str, slots: &[FormatOption]) -> Result<Self> {
        Self::with_line_ending(template, slots, LineEnding::platform())
    }

    pub fn with_line_ending(
        template: &str,
        slots: &[FormatOption],
        line_ending: LineEnding,
    ) -> Result<Self> {
        precondition(!template.is_empty(), "format may not be empty")?;
        precondition(!slots.is_empty(), "Need at least one FormatOption")?;

        let mut segments = parse_template(template)?;
        let placeholders = segments
            .iter()
            .filter(|segment| matches!(segment, Segment::Placeholder { .. }))
            .count();
        if placeholders != slots.len() {
            return Err(LoggerError::invalid_argument(format!(
                "Template has {} placeholders but {} FormatOptions were given",
                placeholders,
                slots.len()
            )));
        }
        segments.push(Segment::LineBreak);

        Ok(Self {
            template: template.to_string(),
            slots: slots.into(),
            segments,
            line_ending,
        })
    }

    /// The template as supplied, without the trailing line terminator
    pub fn template(&self) -> &str {
        &self.template
    }

    pub fn slots(&self) -> &[FormatOption] {
        &self.slots
    }

    pub fn line_ending(&self) -> LineEnding {
        self.line_ending
    }

    /// Number of caller-supplied values a line needs
    pub fn runtime_parameter_count(&self) -> usize {
        self.slots
            .iter()
            .filter(|slot| **slot == FormatOption::RuntimeParameter)
            .count()
    }

    /// Render one line, line terminator included.
    ///
    /// Runtime values are consumed in order; values beyond the template's
    /// `RUNTIME_PARAMETER` slots are ignored.
    pub fn construct_line(&self, level: Level, provided: &[Value]) -> Result<String> {
        let mut args = Vec::with_capacity(self.slots.len());
        let mut index = 0;
        for slot in self.slots.iter() {
            let arg = match slot {
                FormatOption::Level => Arg::Level(level),
                FormatOption::ThreadId => Arg::ThreadId(current_thread_id()),
                FormatOption::RuntimeParameter => {
                    let value = provided.get(index).ok_or_else(|| {
                        LoggerError::invalid_argument(format!(
                            "Expecting more arguments than {}",
                            provided.len()
                        ))
                    })?;
                    index += 1;
                    Arg::Runtime(value)
                }
            };
            args.push(arg);
        }

        Ok(self.render(&args))
    }

    fn render(&self, args: &[Arg<'_>]) -> String {
        let mut line = String::with_capacity(self.template.len() + 16 * args.len());
        let mut args = args.iter();
        for segment in &self.segments {
            match segment {
                Segment::Literal(text) => line.push_str(text),
                Segment::LineBreak => line.push_str(self.line_ending.as_str()),
                Segment::Placeholder { width, left_align } => {
                    // placeholder count was checked against the slots in the constructor
                    let Some(arg) = args.next() else { break };
                    // writing into a String cannot fail
                    let _ = match (width, left_align) {
                        (None, _) => write!(line, "{}", arg),
                        (Some(w), true) => write!(line, "{:<w$}", arg, w = *w),
                        (Some(w), false) => write!(line, "{:>w$}", arg, w = *w),
                    };
                }
            }
        }
        line
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use FormatOption::{RuntimeParameter, ThreadId};

    fn values(items: &[&str]) -> Vec<Value> {
        items.iter().map(|s| Value::from(*s)).collect()
    }

    #[test]
    fn test_right_aligned_level_column() {
        let format = Format::with_line_ending("%9s | %s", &[FormatOption::Level, RuntimeParameter], LineEnding::Lf).unwrap();
        let line = format
            .construct_line(Level::VeryMuch, &values(&["Hello, Log!"]))
            .unwrap();
        assert_eq!(line, "VERY_MUCH | Hello, Log!\n");
    }

    #[test]
    fn test_left_aligned_and_escapes() {
        let format =
            Format::with_line_ending("[%-6s] 100%% %s", &[FormatOption::Level, RuntimeParameter], LineEnding::CrLf).unwrap();
        let line = format.construct_line(Level::Much, &values(&["done"])).unwrap();
        assert_eq!(line, "[MUCH  ] 100% done\r\n");
    }

    #[test]
    fn test_inline_line_break_directive() {
        let format = Format::with_line_ending("%s%n%s", &[RuntimeParameter, RuntimeParameter], LineEnding::Lf)
            .unwrap();
        let line = format.construct_line(Level::Little, &values(&["a", "b"])).unwrap();
        assert_eq!(line, "a\nb\n");
    }

    #[test]
    fn test_runtime_values_in_order() {
        let format = Format::with_line_ending(
            "%s-%s-%s",
            &[RuntimeParameter, FormatOption::Level, RuntimeParameter],
            LineEnding::Lf,
        )
        .unwrap();
        let line = format
            .construct_line(Level::Normal, &[Value::from(1), Value::from("two")])
            .unwrap();
        assert_eq!(line, "1-NORMAL-two\n");
    }

    #[test]
    fn test_extra_values_are_ignored() {
        let format = Format::with_line_ending("%s", &[RuntimeParameter], LineEnding::Lf).unwrap();
        let line = format.construct_line(Level::Little, &values(&["x", "y", "z"])).unwrap();
        assert_eq!(line, "x\n");
    }

    #[test]
    fn test_too_few_values() {
        let format = Format::new("%s %s", &[RuntimeParameter, RuntimeParameter]).unwrap();
        let err = format
            .construct_line(Level::Little, &values(&["only one"]))
            .unwrap_err();
        assert_eq!(err.to_string(), "Invalid argument: Expecting more arguments than 1");
    }

    #[test]
    fn test_thread_id_is_numeric() {
        let format = Format::with_line_ending("%s", &[ThreadId], LineEnding::Lf).unwrap();
        let line = format.construct_line(Level::Little, &[]).unwrap();
        let id = line.trim_end();
        assert!(!id.is_empty());
        assert!(id.chars().all(|c| c.is_ascii_digit()), "got {:?}", id);
    }

    #[test]
    fn test_thread_ids_differ_across_threads() {
        let here = current_thread_id();
        let there = std::thread::spawn(current_thread_id).join().unwrap();
        assert_ne!(here, there);
    }

    #[test]
    fn test_repeated_render_is_identical() {
        let format = Format::new("%9s | %s", &[FormatOption::Level, RuntimeParameter]).unwrap();
        let provided = values(&["same"]);
        let first = format.construct_line(Level::Insane, &provided).unwrap();
        let second = format.construct_line(Level::Insane, &provided).unwrap();
        assert_eq!(first.as_bytes(), second.as_bytes());
    }

    #[test]
    fn test_failed_render_leaves_no_residue() {
        let format = Format::with_line_ending("%s %s", &[RuntimeParameter, RuntimeParameter], LineEnding::Lf)
            .unwrap();
        assert!(format.construct_line(Level::Little, &values(&["stale"])).is_err());
        let line = format.construct_line(Level::Little, &values(&["a", "b"])).unwrap();
        assert_eq!(line, "a b\n");
    }

    #[test]
    fn test_construction_errors() {
        assert!(Format::new("", &[FormatOption::Level]).unwrap_err().is_invalid_argument());
        assert!(Format::new("%s", &[]).unwrap_err().is_invalid_argument());
        assert!(Format::new("%s %s", &[FormatOption::Level]).unwrap_err().is_invalid_argument());
        assert!(Format::new("%d", &[FormatOption::Level]).unwrap_err().is_invalid_argument());
        assert!(Format::new("%s %", &[FormatOption::Level]).unwrap_err().is_invalid_argument());
    }

    #[test]
    fn test_defensive_copy_of_slots() {
        let mut slots = vec![FormatOption::Level, RuntimeParameter];
        let format = Format::new("%s %s", &slots).unwrap();
        slots[0] = RuntimeParameter;
        assert_eq!(format.slots(), &[FormatOption::Level, RuntimeParameter]);
        assert_eq!(format.runtime_parameter_count(), 1);
        assert_eq!(format.template(), "%s %s");
    }

    #[test]
    fn test_option_parsing() {
        assert_eq!("thread-id".parse::<FormatOption>(), Ok(ThreadId));
        assert_eq!(RuntimeParameter.to_string(), "RUNTIME_PARAMETER");
        assert!("TIMESTAMP".parse::<FormatOption>().is_err());
    }

    #[test]
    fn test_platform_line_ending() {
        let expected = if cfg!(windows) { "\r\n" } else { "\n" };
        assert_eq!(LineEnding::platform().as_str(), expected);
        assert_eq!(Format::new("%s", &[FormatOption::Level]).unwrap().line_ending(), LineEnding::platform());
    }
}
