use smallvec::SmallVec;

use crate::codec;
use crate::decode::cursor::Cursor;
use crate::decode::number::lex_number;
use crate::error::{Error, Result, UtfError};
use crate::options::ParseOptions;
use crate::value::{Key, Object, Value};

/// Recursive-descent value parser over any [`Cursor`]. Call-stack depth is
/// proportional to document nesting depth; no explicit limit is imposed.
pub(crate) struct Parser<'a, 'o, C: Cursor> {
    cursor: &'a mut C,
    options: &'o ParseOptions,
}

impl<'a, 'o, C: Cursor> Parser<'a, 'o, C> {
    pub(crate) fn new(cursor: &'a mut C, options: &'o ParseOptions) -> Self {
        Self { cursor, options }
    }

    fn position(&self) -> (usize, usize) {
        (self.cursor.line(), self.cursor.column())
    }

    /// Parses one value, dispatching on the first significant character.
    pub(crate) fn parse_value(&mut self) -> Result<Value> {
        let c = self.cursor.peek_significant()?;
        match c {
            'n' => self.parse_literal("null", Value::Null),
            't' => self.parse_literal("true", Value::Bool(true)),
            'f' => self.parse_literal("false", Value::Bool(false)),
            '-' | '0'..='9' => {
                let parts = lex_number(self.cursor)?;
                parts.to_value()
            }
            '"' => self.parse_string().map(Value::String),
            '[' => self.parse_array(),
            '{' => self.parse_object(),
            _ => {
                let (line, column) = self.position();
                Err(Error::parse("Unexpected character", line, column))
            }
        }
    }

    fn parse_literal(&mut self, literal: &'static str, value: Value) -> Result<Value> {
        for expected in literal.chars() {
            let (line, column) = self.position();
            if self.cursor.advance()? != expected {
                return Err(Error::parse("Unexpected string", line, column));
            }
        }
        Ok(value)
    }

    /// Consumes one scalar inside a string literal, re-wrapping transcoding
    /// failures from the raw input path as parse errors.
    fn advance_in_string(&mut self) -> Result<char> {
        let (line, column) = self.position();
        self.cursor.advance().map_err(|err| match err {
            Error::Utf(e) => wrap_utf(e, line, column),
            other => other,
        })
    }

    fn parse_string(&mut self) -> Result<String> {
        self.cursor.skip_whitespace()?;
        let (line, column) = self.position();
        if self.cursor.advance()? != '"' {
            return Err(Error::parse("Unexpected character", line, column));
        }

        let mut out = String::new();
        loop {
            let (line, column) = self.position();
            let c = self.advance_in_string()?;
            match c {
                '"' => break,
                '\\' => self.parse_escape(&mut out)?,
                c if (c as u32) < 0x20 => {
                    if self.options.allow_control_chars {
                        out.push(c);
                    } else {
                        return Err(Error::parse("Unexpected character", line, column));
                    }
                }
                c => out.push(c),
            }
        }
        Ok(out)
    }

    /// Handles the character after a backslash.
    fn parse_escape(&mut self, out: &mut String) -> Result<()> {
        let (line, column) = self.position();
        let c = self.cursor.advance()?;
        match c {
            '"' => out.push('"'),
            '\\' => out.push('\\'),
            '/' => out.push('/'),
            'b' => out.push('\u{0008}'),
            'f' => out.push('\u{000C}'),
            'n' => out.push('\n'),
            'r' => out.push('\r'),
            't' => out.push('\t'),
            'u' => self.parse_unicode_escape(out)?,
            _ => return Err(Error::parse("Unexpected character", line, column)),
        }
        Ok(())
    }

    /// Parses the `XXXX` of a `\uXXXX` escape into one UTF-16 unit.
    fn parse_escape_hex(&mut self) -> Result<u16> {
        let mut unit: u16 = 0;
        for _ in 0..4 {
            let (line, column) = self.position();
            let c = self.cursor.advance()?;
            let nibble = match c {
                '0'..='9' => c as u16 - '0' as u16,
                'A'..='F' => c as u16 - 'A' as u16 + 0xA,
                'a'..='f' => c as u16 - 'a' as u16 + 0xA,
                _ => return Err(Error::parse("Invalid \\uXXXX escape", line, column)),
            };
            unit = (unit << 4) | nibble;
        }
        Ok(unit)
    }

    /// Parses one `\uXXXX` escape after the `u`. A high surrogate must be
    /// immediately followed by a low-surrogate escape; the pair encodes a
    /// single code point. A standalone surrogate is a hard error.
    fn parse_unicode_escape(&mut self, out: &mut String) -> Result<()> {
        let first = self.parse_escape_hex()?;
        let mut units: SmallVec<[u16; 2]> = SmallVec::new();
        units.push(first);

        if (0xD800..=0xDBFF).contains(&first) {
            let (line, column) = self.position();
            if self.cursor.advance()? != '\\' || self.cursor.advance()? != 'u' {
                return Err(wrap_utf(
                    UtfError::InvalidEncoding("unpaired UTF-16 surrogate"),
                    line,
                    column,
                ));
            }
            units.push(self.parse_escape_hex()?);
        }

        let (line, column) = self.position();
        let (cp, _) = codec::decode_utf16(&units).map_err(|e| wrap_utf(e, line, column))?;
        out.push(char::from_u32(cp).expect("codec validated the scalar"));
        Ok(())
    }

    fn parse_array(&mut self) -> Result<Value> {
        self.cursor.expect_delimiter('[')?;
        let mut items = Vec::new();

        if self.cursor.peek_significant()? == ']' {
            self.cursor.advance()?;
            return Ok(Value::Array(items));
        }

        loop {
            items.push(self.parse_value()?);
            self.cursor.skip_whitespace()?;
            let (line, column) = self.position();
            match self.cursor.advance()? {
                ',' => {}
                ']' => break,
                _ => return Err(Error::parse("Unexpected character", line, column)),
            }
        }
        Ok(Value::Array(items))
    }

    fn parse_object(&mut self) -> Result<Value> {
        self.cursor.expect_delimiter('{')?;
        let mut map = Object::new();

        if self.cursor.peek_significant()? == '}' {
            self.cursor.advance()?;
            return Ok(Value::Object(map));
        }

        loop {
            self.cursor.skip_whitespace()?;
            let (line, column) = self.position();
            if self.cursor.peek()? != '"' {
                return Err(Error::parse("Unexpected character", line, column));
            }
            let key = self.parse_string()?;
            self.cursor.expect_delimiter(':')?;
            let value = self.parse_value()?;
            // duplicate keys overwrite; the entry keeps its original slot
            map.insert(Key::String(key), value);

            self.cursor.skip_whitespace()?;
            let (line, column) = self.position();
            match self.cursor.advance()? {
                ',' => {}
                '}' => break,
                _ => return Err(Error::parse("Unexpected character", line, column)),
            }
        }
        Ok(Value::Object(map))
    }
}

fn wrap_utf(e: UtfError, line: usize, column: usize) -> Error {
    Error::parse(format!("Invalid Unicode - {e}"), line, column)
}

/// Parses one value and requires that nothing but whitespace follows.
pub(crate) fn parse_document<C: Cursor>(cursor: &mut C, options: &ParseOptions) -> Result<Value> {
    let value = parse_prefix(cursor, options)?;
    cursor.skip_whitespace()?;
    match cursor.try_peek() {
        Ok(None) => Ok(value),
        _ => Err(Error::parse("Extra Data", cursor.line(), cursor.column())),
    }
}

/// Parses one value and stops right behind it, leaving trailing content
/// to the caller.
pub(crate) fn parse_prefix<C: Cursor>(cursor: &mut C, options: &ParseOptions) -> Result<Value> {
    Parser::new(cursor, options).parse_value()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::decode::cursor::SliceCursor;

    fn parse(input: &str) -> Result<Value> {
        let mut cursor = SliceCursor::new(input.as_bytes());
        parse_document(&mut cursor, &ParseOptions::default())
    }

    fn parse_lenient(input: &str) -> Result<Value> {
        let mut cursor = SliceCursor::new(input.as_bytes());
        let options = ParseOptions::new().with_allow_control_chars(true);
        parse_document(&mut cursor, &options)
    }

    #[rstest::rstest]
    fn test_literals() {
        assert_eq!(parse("null").unwrap(), Value::Null);
        assert_eq!(parse("true").unwrap(), Value::Bool(true));
        assert_eq!(parse("false").unwrap(), Value::Bool(false));
        assert_eq!(parse("  \t\r\n null \n").unwrap(), Value::Null);
    }

    #[rstest::rstest]
    #[case("nul")]
    #[case("nulL")]
    #[case("tru")]
    #[case("truE")]
    #[case("fals")]
    #[case("falze")]
    fn test_bad_literals(#[case] input: &str) {
        let err = parse(input).unwrap_err();
        assert!(
            err.to_string().contains("Unexpected string")
                || err.to_string().contains("Unexpected Ends"),
            "unexpected error: {err}"
        );
    }

    #[rstest::rstest]
    fn test_numbers() {
        assert_eq!(parse("0").unwrap(), Value::Integer(0));
        assert_eq!(parse("-0").unwrap(), Value::Integer(0));
        assert_eq!(parse("123").unwrap(), Value::Integer(123));
        assert_eq!(parse("-17").unwrap(), Value::Integer(-17));
        assert_eq!(parse("0.0").unwrap(), Value::Real(0.0));
        assert_eq!(parse("1e1").unwrap(), Value::Real(10.0));
        assert_eq!(parse("-2.5e-1").unwrap(), Value::Real(-0.25));
    }

    #[rstest::rstest]
    fn test_leading_zero_leaves_extra_data() {
        let err = parse("0123").unwrap_err();
        assert!(err.to_string().contains("Extra Data"));
        assert_eq!(err.position(), Some((0, 1)));
    }

    #[rstest::rstest]
    fn test_strings() {
        assert_eq!(parse(r#""""#).unwrap(), Value::String(String::new()));
        assert_eq!(
            parse(r#""hello world""#).unwrap(),
            Value::String("hello world".to_string())
        );
        assert_eq!(
            parse(r#""a\"b\\c\/d\be\ff\ng\rh\ti""#).unwrap(),
            Value::String("a\"b\\c/d\u{0008}e\u{000C}f\ng\rh\ti".to_string())
        );
        // raw multi-byte UTF-8 passes through re-encoded
        assert_eq!(parse("\"测试\"").unwrap(), Value::String("测试".to_string()));
    }

    #[rstest::rstest]
    fn test_unicode_escapes() {
        assert_eq!(
            parse(r#""\u0041\u00e9""#).unwrap(),
            Value::String("A\u{00E9}".to_string())
        );
        assert_eq!(
            parse(r#""\u6D4B\u8bd5""#).unwrap(),
            Value::String("\u{6D4B}\u{8BD5}".to_string())
        );
        // surrogate pair combines into the single code point U+1F606
        let v = parse(r#""\ud83d\ude06""#).unwrap();
        assert_eq!(v, Value::String("\u{1F606}".to_string()));
        assert_eq!(v.as_str().unwrap().as_bytes(), &[0xF0, 0x9F, 0x98, 0x86]);
    }

    #[rstest::rstest]
    #[case(r#""\ud83d""#)] // lone high surrogate at end of string
    #[case(r#""\ud83dxx""#)] // high surrogate followed by raw text
    #[case(r#""\ud83d\n""#)] // high surrogate followed by another escape
    #[case(r#""\ude06""#)] // lone low surrogate
    #[case(r#""\ud83d\ud83d""#)] // high surrogate pair misordered
    fn test_unpaired_surrogate_escapes_fail(#[case] input: &str) {
        let err = parse(input).unwrap_err();
        assert!(
            err.to_string().contains("Invalid Unicode"),
            "unexpected error: {err}"
        );
    }

    #[rstest::rstest]
    #[case(r#""\uD8G0""#)]
    #[case(r#""\u12""#)]
    fn test_bad_escape_hex(#[case] input: &str) {
        let err = parse(input).unwrap_err();
        assert!(
            err.to_string().contains("Invalid \\uXXXX escape")
                || err.to_string().contains("Unexpected Ends"),
            "unexpected error: {err}"
        );
    }

    #[rstest::rstest]
    fn test_unknown_escape_fails() {
        let err = parse(r#""\x""#).unwrap_err();
        assert!(err.to_string().contains("Unexpected character"));
    }

    #[rstest::rstest]
    fn test_malformed_raw_utf8_wraps_codec_message() {
        let mut input = b"\"a".to_vec();
        input.extend_from_slice(&[0xC0, 0xAF]);
        input.push(b'"');
        let mut cursor = SliceCursor::new(&input);
        let err = parse_document(&mut cursor, &ParseOptions::default()).unwrap_err();
        assert!(err.is_parse());
        assert!(err.to_string().contains("Invalid Unicode - Invalid Encoding"));
    }

    #[rstest::rstest]
    fn test_raw_control_chars_policy() {
        let input = "\"a\u{0001}b\"";
        assert!(parse(input).unwrap_err().to_string().contains("Unexpected character"));
        assert_eq!(
            parse_lenient(input).unwrap(),
            Value::String("a\u{0001}b".to_string())
        );
        // the quote-and-backslash machinery is unaffected by the flag
        assert!(parse_lenient(r#""\q""#).is_err());
    }

    #[rstest::rstest]
    fn test_unterminated_string() {
        let err = parse(r#""abc"#).unwrap_err();
        assert!(err.to_string().contains("Unexpected Ends"));
    }

    #[rstest::rstest]
    fn test_arrays() {
        assert_eq!(parse("[]").unwrap(), Value::Array(vec![]));
        assert_eq!(parse("[ \n ]").unwrap(), Value::Array(vec![]));
        assert_eq!(
            parse("[1,2,3]").unwrap(),
            Value::Array(vec![
                Value::Integer(1),
                Value::Integer(2),
                Value::Integer(3)
            ])
        );
        assert_eq!(
            parse("[ true , [ null ] ]").unwrap(),
            Value::Array(vec![
                Value::Bool(true),
                Value::Array(vec![Value::Null])
            ])
        );
    }

    #[rstest::rstest]
    #[case("[1,2,]")]
    #[case("[,]")]
    #[case("[1 2]")]
    #[case("[1;2]")]
    #[case("[1,2")]
    fn test_bad_arrays(#[case] input: &str) {
        assert!(parse(input).is_err());
    }

    #[rstest::rstest]
    fn test_objects() {
        assert_eq!(parse("{}").unwrap(), Value::Object(Object::new()));

        let v = parse(r#"{ "a" : 1 , "b" : [true] }"#).unwrap();
        let obj = v.as_object().unwrap();
        assert_eq!(obj.len(), 2);
        assert_eq!(obj[&Key::from("a")], Value::Integer(1));
        assert_eq!(obj[&Key::from("b")], Value::Array(vec![Value::Bool(true)]));
    }

    #[rstest::rstest]
    fn test_object_preserves_insertion_order() {
        let v = parse(r#"{"b":1,"a":2,"c":3}"#).unwrap();
        let keys: Vec<&str> = v
            .as_object()
            .unwrap()
            .keys()
            .map(|k| k.as_str().unwrap())
            .collect();
        assert_eq!(keys, ["b", "a", "c"]);
    }

    #[rstest::rstest]
    fn test_duplicate_keys_last_write_wins() {
        let v = parse(r#"{"a":1,"b":2,"a":3}"#).unwrap();
        let obj = v.as_object().unwrap();
        assert_eq!(obj.len(), 2);
        assert_eq!(obj[&Key::from("a")], Value::Integer(3));
        // the overwritten entry keeps its original slot
        let keys: Vec<&str> = obj.keys().map(|k| k.as_str().unwrap()).collect();
        assert_eq!(keys, ["a", "b"]);
    }

    #[rstest::rstest]
    #[case(r#"{"a":1,}"#)]
    #[case(r#"{"a" 1}"#)]
    #[case(r#"{"a":}"#)]
    #[case(r#"{1:2}"#)]
    #[case(r#"{"a":1"#)]
    #[case(r#"{"a":1;"b":2}"#)]
    fn test_bad_objects(#[case] input: &str) {
        assert!(parse(input).is_err());
    }

    #[rstest::rstest]
    fn test_bad_dispatch_character_reports_position() {
        let err = parse("\n  ;").unwrap_err();
        assert_eq!(err.position(), Some((1, 2)));
        assert!(err.to_string().contains("Unexpected character"));
    }

    #[rstest::rstest]
    fn test_deep_nesting() {
        let depth = 200;
        let mut input = String::new();
        for _ in 0..depth {
            input.push('[');
        }
        for _ in 0..depth {
            input.push(']');
        }
        let mut v = parse(&input).unwrap();
        for _ in 0..depth - 1 {
            let inner = v.as_array().unwrap();
            assert_eq!(inner.len(), 1);
            v = inner[0].clone();
        }
        assert_eq!(v, Value::Array(vec![]));
    }
}
