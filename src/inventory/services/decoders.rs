//! Decoder strategies for serialized inventory fields
//!
//! The inventory export stores nested data (OS descriptors, software lists,
//! vulnerability lists) as text. Some cells hold strict JSON, others hold
//! Python literal syntax (`{'name': 'Windows', 'version': None}`). Each
//! syntax is a [`ValueDecoder`]; a [`DecoderChain`] tries them in order and
//! returns the first success as a generic [`serde_json::Value`].

use serde_json::{Map, Number, Value};
use thiserror::Error;

/// Nesting limit for the literal parser
const MAX_DEPTH: usize = 128;

/// Failure signal returned by a single decoder strategy
#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[error("{decoder} decoder failed at position {position}: {message}")]
pub struct DecodeError {
    pub decoder: &'static str,
    pub position: usize,
    pub message: String,
}

/// One decoding strategy for serialized text
pub trait ValueDecoder: Send + Sync {
    /// Short identifier used in diagnostics
    fn name(&self) -> &'static str;

    /// Decodes `raw` into a generic value
    ///
    /// # Errors
    /// Returns a [`DecodeError`] when `raw` is not valid in this syntax
    fn decode(&self, raw: &str) -> Result<Value, DecodeError>;
}

/// Strict JSON via serde_json
#[derive(Debug, Clone, Copy, Default)]
pub struct JsonDecoder;

impl ValueDecoder for JsonDecoder {
    fn name(&self) -> &'static str {
        "json"
    }

    fn decode(&self, raw: &str) -> Result<Value, DecodeError> {
        serde_json::from_str::<Value>(raw).map_err(|e| DecodeError {
            decoder: self.name(),
            position: e.column(),
            message: e.to_string(),
        })
    }
}

/// Python literal syntax: the subset accepted by `ast.literal_eval` that
/// appears in exported inventory data
///
/// Supports single/double/triple-quoted strings (with `r`/`u`/`b` prefixes),
/// `True`, `False`, `None`, ints (decimal, hex, octal, binary), floats,
/// lists, tuples, sets, dicts, and trailing commas. Tuples and sets decode
/// to arrays; dict keys are rendered as strings.
#[derive(Debug, Clone, Copy, Default)]
pub struct PythonLiteralDecoder;

impl ValueDecoder for PythonLiteralDecoder {
    fn name(&self) -> &'static str {
        "python-literal"
    }

    fn decode(&self, raw: &str) -> Result<Value, DecodeError> {
        let mut parser = LiteralParser::new(raw, self.name());
        let value = parser.parse_value(0)?;
        parser.skip_whitespace();
        if !parser.at_end() {
            return Err(parser.error("unexpected trailing characters"));
        }
        Ok(value)
    }
}

/// Ordered list of decoder strategies
pub struct DecoderChain {
    decoders: Vec<Box<dyn ValueDecoder>>,
}

impl DecoderChain {
    pub fn new(decoders: Vec<Box<dyn ValueDecoder>>) -> Self {
        Self { decoders }
    }

    /// Strict JSON first, then Python literal syntax
    pub fn standard() -> Self {
        Self::new(vec![Box::new(JsonDecoder), Box::new(PythonLiteralDecoder)])
    }

    /// Tries each decoder in order and returns the first success
    ///
    /// # Errors
    /// Returns every strategy's failure, in order, when none succeeds
    pub fn decode(&self, raw: &str) -> Result<Value, Vec<DecodeError>> {
        let mut failures = Vec::with_capacity(self.decoders.len());
        for decoder in &self.decoders {
            match decoder.decode(raw) {
                Ok(value) => return Ok(value),
                Err(e) => failures.push(e),
            }
        }
        Err(failures)
    }
}

impl Default for DecoderChain {
    fn default() -> Self {
        Self::standard()
    }
}

struct LiteralParser {
    chars: Vec<char>,
    pos: usize,
    decoder: &'static str,
}

impl LiteralParser {
    fn new(raw: &str, decoder: &'static str) -> Self {
        Self {
            chars: raw.chars().collect(),
            pos: 0,
            decoder,
        }
    }

    fn error(&self, message: impl Into<String>) -> DecodeError {
        DecodeError {
            decoder: self.decoder,
            position: self.pos,
            message: message.into(),
        }
    }

    fn at_end(&self) -> bool {
        self.pos >= self.chars.len()
    }

    fn peek(&self) -> Option<char> {
        self.chars.get(self.pos).copied()
    }

    fn peek_at(&self, offset: usize) -> Option<char> {
        self.chars.get(self.pos + offset).copied()
    }

    fn bump(&mut self) -> Option<char> {
        let c = self.peek()?;
        self.pos += 1;
        Some(c)
    }

    fn skip_whitespace(&mut self) {
        while matches!(self.peek(), Some(c) if c.is_whitespace()) {
            self.pos += 1;
        }
    }

    fn expect(&mut self, expected: char) -> Result<(), DecodeError> {
        match self.bump() {
            Some(c) if c == expected => Ok(()),
            Some(c) => Err(self.error(format!("expected '{}', found '{}'", expected, c))),
            None => Err(self.error(format!("expected '{}', found end of input", expected))),
        }
    }

    fn parse_value(&mut self, depth: usize) -> Result<Value, DecodeError> {
        if depth > MAX_DEPTH {
            return Err(self.error("nesting too deep"));
        }
        self.skip_whitespace();
        match self.peek() {
            None => Err(self.error("unexpected end of input")),
            Some('{') => self.parse_brace(depth),
            Some('[') => {
                self.pos += 1;
                let items = self.parse_sequence(']', depth)?;
                Ok(Value::Array(items))
            }
            Some('(') => self.parse_paren(depth),
            Some('\'') | Some('"') => self.parse_strings(),
            Some(c) if c.is_ascii_digit() || matches!(c, '-' | '+' | '.') => self.parse_number(),
            Some(c) if c.is_alphabetic() || c == '_' => self.parse_word(),
            Some(c) => Err(self.error(format!("unexpected character '{}'", c))),
        }
    }

    /// Comma-separated values up to `close`; the opening token is consumed
    fn parse_sequence(&mut self, close: char, depth: usize) -> Result<Vec<Value>, DecodeError> {
        let mut items = Vec::new();
        loop {
            self.skip_whitespace();
            if self.peek() == Some(close) {
                self.pos += 1;
                return Ok(items);
            }
            items.push(self.parse_value(depth + 1)?);
            self.skip_whitespace();
            match self.bump() {
                Some(',') => continue,
                Some(c) if c == close => return Ok(items),
                Some(c) => return Err(self.error(format!("expected ',' or '{}', found '{}'", close, c))),
                None => return Err(self.error(format!("unclosed '{}'", close))),
            }
        }
    }

    /// `(x)` is a parenthesized value, `(x,)` and `(x, y)` are tuples
    fn parse_paren(&mut self, depth: usize) -> Result<Value, DecodeError> {
        self.expect('(')?;
        self.skip_whitespace();
        if self.peek() == Some(')') {
            self.pos += 1;
            return Ok(Value::Array(Vec::new()));
        }
        let first = self.parse_value(depth + 1)?;
        self.skip_whitespace();
        match self.bump() {
            Some(')') => Ok(first),
            Some(',') => {
                let mut items = vec![first];
                items.extend(self.parse_sequence(')', depth)?);
                Ok(Value::Array(items))
            }
            Some(c) => Err(self.error(format!("expected ',' or ')', found '{}'", c))),
            None => Err(self.error("unclosed '('")),
        }
    }

    /// Dict when the first element is followed by ':', set otherwise
    fn parse_brace(&mut self, depth: usize) -> Result<Value, DecodeError> {
        self.expect('{')?;
        self.skip_whitespace();
        if self.peek() == Some('}') {
            self.pos += 1;
            return Ok(Value::Object(Map::new()));
        }

        let first = self.parse_value(depth + 1)?;
        self.skip_whitespace();
        if self.peek() != Some(':') {
            let mut items = vec![first];
            match self.bump() {
                Some('}') => return Ok(Value::Array(items)),
                Some(',') => {
                    items.extend(self.parse_sequence('}', depth)?);
                    return Ok(Value::Array(items));
                }
                Some(c) => return Err(self.error(format!("expected ',' or '}}', found '{}'", c))),
                None => return Err(self.error("unclosed '{'")),
            }
        }

        let mut map = Map::new();
        let mut key = first;
        loop {
            self.expect(':')?;
            let value = self.parse_value(depth + 1)?;
            map.insert(self.key_to_string(key)?, value);
            self.skip_whitespace();
            match self.bump() {
                Some('}') => return Ok(Value::Object(map)),
                Some(',') => {
                    self.skip_whitespace();
                    if self.peek() == Some('}') {
                        self.pos += 1;
                        return Ok(Value::Object(map));
                    }
                    key = self.parse_value(depth + 1)?;
                    self.skip_whitespace();
                }
                Some(c) => return Err(self.error(format!("expected ',' or '}}', found '{}'", c))),
                None => return Err(self.error("unclosed '{'")),
            }
        }
    }

    fn key_to_string(&self, key: Value) -> Result<String, DecodeError> {
        match key {
            Value::String(s) => Ok(s),
            Value::Number(n) => Ok(n.to_string()),
            Value::Bool(true) => Ok("True".to_string()),
            Value::Bool(false) => Ok("False".to_string()),
            Value::Null => Ok("None".to_string()),
            Value::Array(_) | Value::Object(_) => Err(self.error("unhashable dict key")),
        }
    }

    /// Adjacent string literals concatenate, as in Python
    fn parse_strings(&mut self) -> Result<Value, DecodeError> {
        let mut text = self.parse_string(false)?;
        loop {
            let checkpoint = self.pos;
            self.skip_whitespace();
            match self.peek() {
                Some('\'') | Some('"') => text.push_str(&self.parse_string(false)?),
                _ => {
                    self.pos = checkpoint;
                    return Ok(Value::String(text));
                }
            }
        }
    }

    fn parse_string(&mut self, raw: bool) -> Result<String, DecodeError> {
        let quote = self
            .bump()
            .ok_or_else(|| self.error("expected string"))?;
        let triple = self.peek() == Some(quote) && self.peek_at(1) == Some(quote);
        if triple {
            self.pos += 2;
        }

        let mut out = String::new();
        loop {
            let c = self.bump().ok_or_else(|| self.error("unterminated string"))?;
            if c == quote {
                if !triple {
                    return Ok(out);
                }
                if self.peek() == Some(quote) && self.peek_at(1) == Some(quote) {
                    self.pos += 2;
                    return Ok(out);
                }
                out.push(c);
                continue;
            }
            if c == '\n' && !triple {
                return Err(self.error("newline in single-quoted string"));
            }
            if c == '\\' {
                self.parse_escape(raw, &mut out)?;
                continue;
            }
            out.push(c);
        }
    }

    fn parse_escape(&mut self, raw: bool, out: &mut String) -> Result<(), DecodeError> {
        let c = self.bump().ok_or_else(|| self.error("unterminated escape"))?;
        if raw {
            out.push('\\');
            out.push(c);
            return Ok(());
        }
        match c {
            '\n' => {}
            '\\' => out.push('\\'),
            '\'' => out.push('\''),
            '"' => out.push('"'),
            'n' => out.push('\n'),
            't' => out.push('\t'),
            'r' => out.push('\r'),
            '0' => out.push('\0'),
            'a' => out.push('\u{07}'),
            'b' => out.push('\u{08}'),
            'f' => out.push('\u{0C}'),
            'v' => out.push('\u{0B}'),
            'x' => out.push(self.parse_hex_escape(2)?),
            'u' => out.push(self.parse_hex_escape(4)?),
            'U' => out.push(self.parse_hex_escape(8)?),
            other => {
                out.push('\\');
                out.push(other);
            }
        }
        Ok(())
    }

    fn parse_hex_escape(&mut self, digits: usize) -> Result<char, DecodeError> {
        let mut code = 0u32;
        for _ in 0..digits {
            let d = self
                .bump()
                .and_then(|c| c.to_digit(16))
                .ok_or_else(|| self.error("invalid hex escape"))?;
            code = code * 16 + d;
        }
        char::from_u32(code).ok_or_else(|| self.error("invalid code point in escape"))
    }

    fn parse_word(&mut self) -> Result<Value, DecodeError> {
        let start = self.pos;
        while matches!(self.peek(), Some(c) if c.is_alphanumeric() || c == '_') {
            self.pos += 1;
        }
        let word: String = self.chars[start..self.pos].iter().collect();

        if matches!(self.peek(), Some('\'') | Some('"')) {
            let lower = word.to_ascii_lowercase();
            if matches!(lower.as_str(), "r" | "u" | "b" | "rb" | "br") {
                let text = self.parse_string(lower.contains('r'))?;
                return Ok(Value::String(text));
            }
        }

        match word.as_str() {
            "True" => Ok(Value::Bool(true)),
            "False" => Ok(Value::Bool(false)),
            "None" => Ok(Value::Null),
            _ => {
                self.pos = start;
                Err(self.error(format!("unsupported name '{}'", word)))
            }
        }
    }

    fn parse_number(&mut self) -> Result<Value, DecodeError> {
        let start = self.pos;
        let mut negative = false;
        while let Some(sign @ ('-' | '+')) = self.peek() {
            if sign == '-' {
                negative = !negative;
            }
            self.pos += 1;
            self.skip_whitespace();
        }

        if self.peek() == Some('0') && matches!(self.peek_at(1), Some('x' | 'X' | 'o' | 'O' | 'b' | 'B')) {
            let radix = match self.peek_at(1) {
                Some('x' | 'X') => 16,
                Some('o' | 'O') => 8,
                _ => 2,
            };
            self.pos += 2;
            let digits: String = self
                .take_while(|c| c.is_ascii_alphanumeric() || c == '_')
                .chars()
                .filter(|c| *c != '_')
                .collect();
            let magnitude = i64::from_str_radix(&digits, radix)
                .map_err(|_| self.error(format!("invalid integer literal at {}", start)))?;
            return Ok(Value::Number(Number::from(if negative { -magnitude } else { magnitude })));
        }

        let mut body =
            self.take_while(|c| c.is_ascii_digit() || matches!(c, '.' | '_' | 'e' | 'E'));
        // exponent sign
        if body.ends_with(|c| c == 'e' || c == 'E') && matches!(self.peek(), Some('-' | '+')) {
            body.push(self.bump().unwrap_or('+'));
            body.push_str(&self.take_while(|c| c.is_ascii_digit() || c == '_'));
        }
        if matches!(self.peek(), Some('j' | 'J')) {
            return Err(self.error("complex numbers are not supported"));
        }
        if body.is_empty() || body.starts_with('_') || body.ends_with('_') {
            return Err(self.error("invalid number"));
        }

        let cleaned: String = body.chars().filter(|c| *c != '_').collect();
        let is_float = cleaned.contains(|c| matches!(c, '.' | 'e' | 'E'));
        if !is_float {
            if let Ok(n) = cleaned.parse::<i64>() {
                return Ok(Value::Number(Number::from(if negative { -n } else { n })));
            }
        }
        let f: f64 = cleaned
            .parse()
            .map_err(|_| self.error(format!("invalid number '{}'", body)))?;
        let f = if negative { -f } else { f };
        Number::from_f64(f)
            .map(Value::Number)
            .ok_or_else(|| self.error("number out of range"))
    }

    fn take_while(&mut self, keep: impl Fn(char) -> bool) -> String {
        let start = self.pos;
        while matches!(self.peek(), Some(c) if keep(c)) {
            self.pos += 1;
        }
        self.chars[start..self.pos].iter().collect()
    }
}
