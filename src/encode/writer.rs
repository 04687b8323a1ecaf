use crate::codec;
use crate::error::{Error, Result};
use crate::options::{WriteConfig, WriteState};
use crate::value::{Key, Object, Value};

const HEX_UPPER: &[u8; 16] = b"0123456789ABCDEF";

pub(crate) struct Writer<'a> {
    out: &'a mut String,
    config: &'a WriteConfig,
}

impl<'a> Writer<'a> {
    pub(crate) fn new(out: &'a mut String, config: &'a WriteConfig) -> Self {
        Self { out, config }
    }

    /// Serializes `value` at nesting level zero, with the trailing line
    /// end the indented format calls for.
    pub(crate) fn write_document(&mut self, value: &Value) -> Result<()> {
        self.write_value(value, WriteState::new(), false)
    }

    fn indented(&self) -> bool {
        !self.config.indent.is_empty()
    }

    fn write_indent(&mut self, level: usize) {
        if self.indented() {
            for _ in 0..level {
                self.out.push_str(&self.config.indent);
            }
        }
    }

    /// Comma and line-end bookkeeping shared by every value form.
    fn write_tail(&mut self, add_comma: bool) {
        if add_comma {
            self.out.push(',');
        }
        if self.indented() {
            self.out.push_str(&self.config.line_end);
        }
    }

    fn write_value(&mut self, value: &Value, state: WriteState, add_comma: bool) -> Result<()> {
        match value {
            Value::Null => self.out.push_str("null"),
            Value::Bool(true) => self.out.push_str("true"),
            Value::Bool(false) => self.out.push_str("false"),
            Value::Integer(v) => self.write_integer(*v),
            Value::Real(v) => self.write_real(*v)?,
            Value::String(s) => self.write_quoted(s),
            Value::Array(items) => return self.write_array(items, state, add_comma),
            Value::Object(map) => return self.write_object(map, state, add_comma),
        }
        self.write_tail(add_comma);
        Ok(())
    }

    fn write_array(&mut self, items: &[Value], state: WriteState, add_comma: bool) -> Result<()> {
        if items.is_empty() {
            self.out.push_str("[]");
            self.write_tail(add_comma);
            return Ok(());
        }

        self.out.push('[');
        if self.indented() {
            self.out.push_str(&self.config.line_end);
        }

        let deeper = state.deeper();
        let last = items.len() - 1;
        for (i, item) in items.iter().enumerate() {
            self.write_indent(deeper.nest_level);
            self.write_value(item, deeper, i != last)?;
        }

        self.write_indent(state.nest_level);
        self.out.push(']');
        self.write_tail(add_comma);
        Ok(())
    }

    fn write_object(&mut self, map: &Object, state: WriteState, add_comma: bool) -> Result<()> {
        if map.is_empty() {
            self.out.push_str("{}");
            self.write_tail(add_comma);
            return Ok(());
        }

        self.out.push('{');
        if self.indented() {
            self.out.push_str(&self.config.line_end);
        }

        let mut entries: Vec<(&Key, &Value)> = map.iter().collect();
        if self.config.sort_keys {
            let mut keyed: Vec<(String, &Key, &Value)> = Vec::with_capacity(entries.len());
            for (key, value) in entries {
                keyed.push((self.key_form(key)?, key, value));
            }
            keyed.sort_by(|a, b| a.0.cmp(&b.0));
            entries = keyed.into_iter().map(|(_, k, v)| (k, v)).collect();
        }

        let deeper = state.deeper();
        let last = entries.len() - 1;
        for (i, (key, value)) in entries.into_iter().enumerate() {
            self.write_indent(deeper.nest_level);
            self.write_key(key)?;
            if self.indented() {
                self.out.push_str(" : ");
            } else {
                self.out.push(':');
            }
            self.write_value(value, deeper, i != last)?;
        }

        self.write_indent(state.nest_level);
        self.out.push('}');
        self.write_tail(add_comma);
        Ok(())
    }

    /// Keys are emitted as quoted strings; non-string keys use the same
    /// text their standalone value form would.
    fn write_key(&mut self, key: &Key) -> Result<()> {
        match key {
            Key::String(s) => self.write_quoted(s),
            other => {
                self.out.push('"');
                let form = self.key_form(other)?;
                self.out.push_str(&form);
                self.out.push('"');
            }
        }
        Ok(())
    }

    /// Stringified key used for sorting and for non-string key output.
    fn key_form(&self, key: &Key) -> Result<String> {
        Ok(match key {
            Key::Null => "null".to_string(),
            Key::Bool(true) => "true".to_string(),
            Key::Bool(false) => "false".to_string(),
            Key::Integer(v) => {
                let mut buf = itoa::Buffer::new();
                buf.format(*v).to_string()
            }
            Key::Real(v) => real_to_string(*v, self.config.real_precision)?,
            Key::String(s) => s.clone(),
        })
    }

    fn write_integer(&mut self, v: i64) {
        let mut buf = itoa::Buffer::new();
        self.out.push_str(buf.format(v));
    }

    fn write_real(&mut self, v: f64) -> Result<()> {
        let s = real_to_string(v, self.config.real_precision)?;
        self.out.push_str(&s);
        Ok(())
    }

    /// Emits a quoted string literal. Printable ASCII other than `"`, `\`
    /// and `/` passes through raw; the short escapes cover the usual
    /// suspects, and everything else becomes `\uXXXX` (a surrogate pair
    /// beyond the BMP) with uppercase hex digits.
    fn write_quoted(&mut self, s: &str) {
        self.out.push('"');
        for c in s.chars() {
            match c {
                '"' => self.out.push_str("\\\""),
                '\\' => self.out.push_str("\\\\"),
                '/' => self.out.push_str("\\/"),
                '\u{0008}' => self.out.push_str("\\b"),
                '\u{000C}' => self.out.push_str("\\f"),
                '\n' => self.out.push_str("\\n"),
                '\r' => self.out.push_str("\\r"),
                '\t' => self.out.push_str("\\t"),
                c if (' '..='~').contains(&c) => self.out.push(c),
                c => self.write_unicode_escape(c),
            }
        }
        self.out.push('"');
    }

    fn write_unicode_escape(&mut self, c: char) {
        let (units, len) =
            codec::encode_utf16(c as u32).expect("char is always a valid scalar");
        for unit in &units[..len] {
            self.out.push_str("\\u");
            self.out.push(HEX_UPPER[usize::from(unit >> 12) & 0xF] as char);
            self.out.push(HEX_UPPER[usize::from(unit >> 8) & 0xF] as char);
            self.out.push(HEX_UPPER[usize::from(unit >> 4) & 0xF] as char);
            self.out.push(HEX_UPPER[usize::from(*unit) & 0xF] as char);
        }
    }
}

/// Shortest decimal text that parses back to exactly `v`. Fixed form with
/// a mandatory decimal point for moderate magnitudes, exponent form for
/// extreme ones. A `real_precision` below the default first rounds to that
/// many significant digits.
pub(crate) fn real_to_string(v: f64, precision: usize) -> Result<String> {
    if !v.is_finite() {
        return Err(Error::serialize(format!(
            "the non-finite Real value {v} is not representable in JSON text"
        )));
    }
    let v = if precision < crate::options::DEFAULT_REAL_PRECISION {
        format!("{v:.prec$e}", prec = precision.max(1) - 1)
            .parse()
            .unwrap_or(v)
    } else {
        v
    };
    let mut buf = ryu::Buffer::new();
    Ok(buf.format(v).to_string())
}
