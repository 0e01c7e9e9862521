//! Event envelope construction.
//!
//! Converts a [`HecLogRecord`] plus the handler configuration into the JSON
//! envelope accepted by the collector's event endpoint. The precedence rules
//! here are load-bearing: structured messages override everything, caller
//! supplied extra fields override configured metadata, and indexed fields
//! may promote values over the envelope's own keys. Normalisation never
//! fails; every malformed input degrades to shipping the raw message.

use std::time::{SystemTime, UNIX_EPOCH};

use serde_json::{Map, Number, Value};

use crate::config::HecHandlerConfig;
use crate::literal::parse_literal;
use crate::record::{HecLogRecord, RecordMessage};

/// Envelope keys an indexed-fields entry may override directly.
const RESERVED_FIELD_KEYS: [&str; 5] = ["host", "source", "sourcetype", "time", "index"];

/// The outer JSON object sent per request.
///
/// Created fresh for every emit, serialised, and discarded. Keys serialise
/// in sorted order, so the same envelope always yields byte-identical JSON.
#[derive(Clone, Debug, PartialEq)]
pub struct EventEnvelope {
    entries: Map<String, Value>,
}

impl EventEnvelope {
    /// Look up a top-level envelope key.
    pub fn get(&self, key: &str) -> Option<&Value> {
        self.entries.get(key)
    }

    /// The `host` value stamped on the event, if it is a string.
    pub fn host(&self) -> Option<&str> {
        self.get("host").and_then(Value::as_str)
    }

    /// The event timestamp.
    pub fn time(&self) -> Option<&Value> {
        self.get("time")
    }

    /// The main event body.
    pub fn event(&self) -> Option<&Map<String, Value>> {
        self.get("event").and_then(Value::as_object)
    }

    /// Indexed side-channel fields, separate from the event body.
    pub fn indexed_fields(&self) -> Option<&Map<String, Value>> {
        self.get("fields").and_then(Value::as_object)
    }

    /// Serialise to the wire payload. Key order is deterministic.
    pub fn to_json(&self) -> Result<String, serde_json::Error> {
        serde_json::to_string(&self.entries)
    }
}

/// Build the envelope for `record` using the current wall-clock time.
pub fn normalize(record: &HecLogRecord, config: &HecHandlerConfig) -> EventEnvelope {
    build_envelope(record, config, unix_now())
}

/// Build the envelope with an explicit fallback timestamp.
///
/// A `time` key inside a structured message still wins over `now`; this
/// parameter only replaces the wall-clock default.
pub(crate) fn build_envelope(
    record: &HecLogRecord,
    config: &HecHandlerConfig,
    now: f64,
) -> EventEnvelope {
    let mut body = Map::new();
    body.insert("log_level".to_owned(), Value::String(record.level.clone()));
    interpret_message(&mut body, &record.message, &record.args);

    let mut entries = Map::new();
    entries.insert(
        "host".to_owned(),
        Value::String(config.client_hostname.clone()),
    );
    entries.insert("fields".to_owned(), Value::Object(Map::new()));

    // The collector rejects empty metadata values, so unset options are
    // omitted entirely rather than sent as "".
    if let Some(source) = &config.source {
        entries.insert("source".to_owned(), Value::String(source.clone()));
    }
    if let Some(sourcetype) = &config.sourcetype {
        entries.insert("sourcetype".to_owned(), Value::String(sourcetype.clone()));
    }
    if let Some(index) = &config.index {
        entries.insert("index".to_owned(), Value::String(index.clone()));
    }

    for (key, value) in &config.extra_fields {
        entries.insert(key.clone(), Value::String(value.clone()));
    }

    // A structured message may pin a custom event time, e.g. when replaying
    // historical events. Otherwise stamp the wall clock.
    let time = match body.get("time") {
        Some(time) => time.clone(),
        None => Number::from_f64(now).map(Value::Number).unwrap_or(Value::Null),
    };
    entries.insert("time".to_owned(), time);

    extract_indexed_fields(&mut body, &mut entries);

    entries.insert("event".to_owned(), Value::Object(body));
    EventEnvelope { entries }
}

/// Apply the message-interpretation precedence rules to fill `body`.
fn interpret_message(body: &mut Map<String, Value>, message: &RecordMessage, args: &[Value]) {
    match message {
        RecordMessage::Structured(map) => {
            for (key, value) in map {
                body.insert(key.clone(), value.clone());
            }
        }
        RecordMessage::Text(text) => {
            body.insert("message".to_owned(), render_text(text, args));
        }
    }
}

fn render_text(text: &str, args: &[Value]) -> Value {
    if text.contains("{}") {
        return Value::String(substitute_placeholders(text, args));
    }
    if !args.is_empty() {
        return match percent_format(text, args) {
            Some(formatted) => Value::String(formatted),
            None => Value::String(text.to_owned()),
        };
    }
    match parse_literal(text) {
        Some(value) => value,
        None => Value::String(text.to_owned()),
    }
}

/// Substitute each `{}` in left-to-right order with the string form of the
/// corresponding argument. Surplus placeholders remain untouched.
fn substitute_placeholders(text: &str, args: &[Value]) -> String {
    let mut rendered = text.to_owned();
    for arg in args {
        match rendered.find("{}") {
            Some(idx) => rendered.replace_range(idx..idx + 2, &display_value(arg)),
            None => break,
        }
    }
    rendered
}

/// Minimal percent-style formatter covering the conversions log call sites
/// actually use (`%s`, `%d`/`%i`, `%f`, `%%`). Returns `None` whenever the
/// template and arguments disagree so the caller can fall back to shipping
/// the raw message.
fn percent_format(text: &str, args: &[Value]) -> Option<String> {
    let mut out = String::with_capacity(text.len());
    let mut args_iter = args.iter();
    let mut chars = text.chars();
    while let Some(ch) = chars.next() {
        if ch != '%' {
            out.push(ch);
            continue;
        }
        match chars.next()? {
            '%' => out.push('%'),
            's' => out.push_str(&display_value(args_iter.next()?)),
            'd' | 'i' => out.push_str(&format_integer(args_iter.next()?)?),
            'f' => out.push_str(&format!("{:.6}", args_iter.next()?.as_f64()?)),
            _ => return None,
        }
    }
    // Unconsumed arguments mean the text was not a format string at all.
    if args_iter.next().is_some() {
        return None;
    }
    Some(out)
}

fn format_integer(value: &Value) -> Option<String> {
    if let Some(int) = value.as_i64() {
        return Some(int.to_string());
    }
    value.as_u64().map(|int| int.to_string())
}

/// The string form of a value: strings verbatim, everything else as JSON.
fn display_value(value: &Value) -> String {
    match value {
        Value::String(text) => text.clone(),
        other => other.to_string(),
    }
}

/// Move a `fields` map out of the body into the envelope's indexed fields.
///
/// Reserved keys override the matching top-level envelope entry instead.
/// The collector refuses events whose indexed field values are anything but
/// strings or lists, so other values are stringified. A `fields` value that
/// is not a map is left in the body untouched; the event still ships.
fn extract_indexed_fields(body: &mut Map<String, Value>, entries: &mut Map<String, Value>) {
    let annotations = match body.get("fields") {
        Some(Value::Object(map)) => map.clone(),
        _ => return,
    };
    for (key, value) in annotations {
        if RESERVED_FIELD_KEYS.contains(&key.as_str()) {
            entries.insert(key, value);
            continue;
        }
        let coerced = match value {
            Value::String(_) | Value::Array(_) => value,
            other => Value::String(display_value(&other)),
        };
        if let Some(Value::Object(fields)) = entries.get_mut("fields") {
            fields.insert(key, coerced);
        }
    }
    body.remove("fields");
}

fn unix_now() -> f64 {
    SystemTime::now()
        .duration_since(UNIX_EPOCH)
        .map(|elapsed| elapsed.as_secs_f64())
        .unwrap_or_default()
}
