//! Log record representation consumed by the handler.

use std::fmt;

use serde_json::{Map, Value};

/// The message payload of a log record.
#[derive(Clone, Debug)]
pub enum RecordMessage {
    /// A plain or format-string message.
    Text(String),
    /// A structured map, preserved as a JSON object in the emitted event.
    Structured(Map<String, Value>),
}

/// A single log record handed to [`emit`](crate::SplunkHecHandler::emit).
///
/// The record is read-only to the handler: normalisation builds a fresh
/// event envelope per emit and never mutates its input.
#[derive(Clone, Debug)]
pub struct HecLogRecord {
    /// Level name, e.g. `"INFO"` or `"ERROR"`.
    pub level: String,
    /// Message payload.
    pub message: RecordMessage,
    /// Positional formatting arguments. May be empty.
    pub args: Vec<Value>,
}

impl HecLogRecord {
    /// Construct a record with a plain text message.
    pub fn new(level: &str, message: &str) -> Self {
        Self {
            level: level.to_owned(),
            message: RecordMessage::Text(message.to_owned()),
            args: Vec::new(),
        }
    }

    /// Construct a record whose message is a format string consumed by
    /// `args`.
    ///
    /// `{}` placeholders are substituted left-to-right with the string form
    /// of each argument. Without placeholders, percent-style formatting is
    /// applied; the supported specifiers are `%s`, `%d`/`%i`, `%f` and
    /// `%%`. Any other specifier, or an argument-count mismatch, ships the
    /// message text unmodified rather than failing the emit.
    pub fn with_args(level: &str, message: &str, args: Vec<Value>) -> Self {
        Self {
            level: level.to_owned(),
            message: RecordMessage::Text(message.to_owned()),
            args,
        }
    }

    /// Construct a record carrying a structured map message.
    pub fn structured(level: &str, message: Map<String, Value>) -> Self {
        Self {
            level: level.to_owned(),
            message: RecordMessage::Structured(message),
            args: Vec::new(),
        }
    }
}

impl fmt::Display for HecLogRecord {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match &self.message {
            RecordMessage::Text(text) => write!(f, "{} - {}", self.level, text),
            RecordMessage::Structured(map) => {
                write!(f, "{} - {}", self.level, Value::Object(map.clone()))
            }
        }
    }
}
