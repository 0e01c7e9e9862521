//! Best-effort parsing of textual literals into structured values.
//!
//! Call sites frequently stringify payloads before handing them to a logging
//! framework, e.g. `logger.info("{'user': 'foo', 'attempts': 3}")`. This
//! module recovers such values so they reach the collector as structured
//! JSON instead of an opaque string. Only data literals are recognised:
//! numbers, quoted strings, booleans, null, lists, tuples and maps. There is
//! no expression evaluation of any kind, and anything unrecognised is left
//! to the caller to treat as plain text.
//!
//! JSON input takes the `serde_json` fast path; the fallback cursor accepts
//! the single-quote and `True`/`False`/`None` spellings common in log lines
//! produced by other ecosystems.

use serde_json::{Map, Number, Value};

/// Parse `input` as a standalone data literal.
///
/// Returns `None` unless the entire input is consumed by one literal.
pub fn parse_literal(input: &str) -> Option<Value> {
    let trimmed = input.trim();
    if trimmed.is_empty() {
        return None;
    }
    if let Ok(value) = serde_json::from_str::<Value>(trimmed) {
        return Some(value);
    }

    let mut cursor = Cursor::new(trimmed);
    cursor.skip_whitespace();
    let value = cursor.parse_value()?;
    cursor.skip_whitespace();
    if cursor.at_end() {
        Some(value)
    } else {
        None
    }
}

struct Cursor {
    chars: Vec<char>,
    pos: usize,
}

impl Cursor {
    fn new(input: &str) -> Self {
        Self {
            chars: input.chars().collect(),
            pos: 0,
        }
    }

    fn at_end(&self) -> bool {
        self.pos >= self.chars.len()
    }

    fn peek(&self) -> Option<char> {
        self.chars.get(self.pos).copied()
    }

    fn bump(&mut self) -> Option<char> {
        let ch = self.peek()?;
        self.pos += 1;
        Some(ch)
    }

    fn skip_whitespace(&mut self) {
        while self.peek().is_some_and(|ch| ch.is_whitespace()) {
            self.pos += 1;
        }
    }

    fn eat(&mut self, expected: char) -> bool {
        if self.peek() == Some(expected) {
            self.pos += 1;
            true
        } else {
            false
        }
    }

    fn parse_value(&mut self) -> Option<Value> {
        match self.peek()? {
            '{' => self.parse_map(),
            '[' => self.parse_sequence('[', ']'),
            '(' => self.parse_sequence('(', ')'),
            '\'' | '"' => self.parse_string().map(Value::String),
            ch if ch.is_ascii_alphabetic() => self.parse_keyword(),
            ch if ch.is_ascii_digit() || ch == '-' || ch == '+' || ch == '.' => self.parse_number(),
            _ => None,
        }
    }

    fn parse_keyword(&mut self) -> Option<Value> {
        let start = self.pos;
        while self.peek().is_some_and(|ch| ch.is_ascii_alphabetic()) {
            self.pos += 1;
        }
        let word: String = self.chars[start..self.pos].iter().collect();
        match word.as_str() {
            "None" | "null" => Some(Value::Null),
            "True" | "true" => Some(Value::Bool(true)),
            "False" | "false" => Some(Value::Bool(false)),
            _ => None,
        }
    }

    fn parse_number(&mut self) -> Option<Value> {
        let start = self.pos;
        while self
            .peek()
            .is_some_and(|ch| ch.is_ascii_digit() || "+-.eE".contains(ch))
        {
            self.pos += 1;
        }
        let text: String = self.chars[start..self.pos].iter().collect();
        if let Ok(int) = text.parse::<i64>() {
            return Some(Value::Number(int.into()));
        }
        let float = text.parse::<f64>().ok()?;
        Number::from_f64(float).map(Value::Number)
    }

    fn parse_string(&mut self) -> Option<String> {
        let quote = self.bump()?;
        if quote != '\'' && quote != '"' {
            return None;
        }
        let mut out = String::new();
        loop {
            match self.bump()? {
                '\\' => out.push(unescape(self.bump()?)),
                ch if ch == quote => return Some(out),
                ch => out.push(ch),
            }
        }
    }

    fn parse_sequence(&mut self, open: char, close: char) -> Option<Value> {
        if !self.eat(open) {
            return None;
        }
        let mut items = Vec::new();
        loop {
            self.skip_whitespace();
            if self.eat(close) {
                return Some(Value::Array(items));
            }
            items.push(self.parse_value()?);
            self.skip_whitespace();
            if !self.eat(',') && self.peek() != Some(close) {
                return None;
            }
        }
    }

    fn parse_map(&mut self) -> Option<Value> {
        if !self.eat('{') {
            return None;
        }
        let mut map = Map::new();
        loop {
            self.skip_whitespace();
            if self.eat('}') {
                return Some(Value::Object(map));
            }
            let key = self.parse_string()?;
            self.skip_whitespace();
            if !self.eat(':') {
                return None;
            }
            self.skip_whitespace();
            let value = self.parse_value()?;
            map.insert(key, value);
            self.skip_whitespace();
            if !self.eat(',') && self.peek() != Some('}') {
                return None;
            }
        }
    }
}

fn unescape(ch: char) -> char {
    match ch {
        'n' => '\n',
        'r' => '\r',
        't' => '\t',
        '0' => '\0',
        other => other,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rstest::rstest;
    use serde_json::json;

    #[rstest]
    #[case("42", json!(42))]
    #[case("-7", json!(-7))]
    #[case("+5", json!(5))]
    #[case("12.5", json!(12.5))]
    #[case("1e3", json!(1000.0))]
    #[case("True", json!(true))]
    #[case("false", json!(false))]
    #[case("None", json!(null))]
    #[case("'single'", json!("single"))]
    #[case("\"double\"", json!("double"))]
    #[case("[1, 2, 3]", json!([1, 2, 3]))]
    #[case("[1, 2, 3,]", json!([1, 2, 3]))]
    #[case("(1, 'x')", json!([1, "x"]))]
    #[case("{'a': 1}", json!({"a": 1}))]
    #[case("{'a': {'b': [1, None]}}", json!({"a": {"b": [1, null]}}))]
    #[case("{\"a\": 1, \"b\": \"two\"}", json!({"a": 1, "b": "two"}))]
    #[case("  {'padded': true}  ", json!({"padded": true}))]
    fn parses_data_literals(#[case] input: &str, #[case] expected: Value) {
        assert_eq!(parse_literal(input), Some(expected));
    }

    #[rstest]
    #[case("hello")]
    #[case("")]
    #[case("   ")]
    #[case("{'a': 1} trailing")]
    #[case("{'unterminated': 1")]
    #[case("[1, 2")]
    #[case("{1: 'non-string key'}")]
    #[case("os.system('rm')")]
    #[case("1 + 2")]
    fn rejects_non_literals(#[case] input: &str) {
        assert_eq!(parse_literal(input), None);
    }

    #[test]
    fn handles_escaped_quotes() {
        assert_eq!(
            parse_literal(r"'it\'s fine'"),
            Some(json!("it's fine"))
        );
    }
}
