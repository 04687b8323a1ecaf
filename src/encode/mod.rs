//! Writing entry points.

pub(crate) mod writer;

use crate::error::Result;
use crate::options::WriteConfig;
use crate::value::Value;

/// Serializes `value` into `out` with the given configuration.
pub(crate) fn write_value(value: &Value, out: &mut String, config: &WriteConfig) -> Result<()> {
    writer::Writer::new(out, config).write_document(value)
}

/// Compact serialization with the default configuration.
pub fn to_string(value: &Value) -> Result<String> {
    to_string_with_config(value, &WriteConfig::default())
}

pub fn to_string_with_config(value: &Value, config: &WriteConfig) -> Result<String> {
    let mut out = String::new();
    write_value(value, &mut out, config)?;
    Ok(out)
}

/// Serializes into any byte sink.
pub fn to_writer<W: std::io::Write>(mut writer: W, value: &Value) -> Result<()> {
    to_writer_with_config(&mut writer, value, &WriteConfig::default())
}

pub fn to_writer_with_config<W: std::io::Write>(
    mut writer: W,
    value: &Value,
    config: &WriteConfig,
) -> Result<()> {
    let text = to_string_with_config(value, config)?;
    writer
        .write_all(text.as_bytes())
        .map_err(|e| crate::error::Error::serialize(e.to_string()))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::value::{Key, Object};

    #[rstest::rstest]
    fn test_to_string_compact_default() {
        let mut map = Object::new();
        map.insert(Key::from("a"), Value::Array(vec![Value::Integer(1)]));
        let v = Value::Object(map);
        assert_eq!(to_string(&v).unwrap(), r#"{"a":[1]}"#);
        assert_eq!(v.to_string(), r#"{"a":[1]}"#);
    }

    #[rstest::rstest]
    fn test_to_string_with_config_indents() {
        let v = Value::Array(vec![Value::Null]);
        let cfg = WriteConfig::new().with_indent("  ");
        assert_eq!(to_string_with_config(&v, &cfg).unwrap(), "[\n  null\n]\n");
    }

    #[rstest::rstest]
    fn test_to_writer_emits_bytes() {
        let v = Value::Array(vec![Value::Integer(1), Value::Bool(false)]);
        let mut out = Vec::new();
        to_writer(&mut out, &v).unwrap();
        assert_eq!(out, b"[1,false]");
    }
}
