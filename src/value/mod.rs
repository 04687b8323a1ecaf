use std::fmt;

use indexmap::IndexMap;

use crate::error::{Error, Result};
use crate::options::WriteConfig;

mod key;

pub use key::Key;

pub type Array = Vec<Value>;
pub type Object = IndexMap<Key, Value>;

/// Discriminant of the active [`Value`] kind.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Kind {
    Null,
    Bool,
    Integer,
    Real,
    String,
    Array,
    Object,
}

impl fmt::Display for Kind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            Kind::Null => "Null",
            Kind::Bool => "Boolean",
            Kind::Integer => "Integer",
            Kind::Real => "Real",
            Kind::String => "String",
            Kind::Array => "Array",
            Kind::Object => "Object",
        };
        f.write_str(name)
    }
}

/// A JSON document value.
///
/// Integer and Real are separate kinds: a literal is classified by its
/// lexical form (`1e0` is Real even though its value is integral), and
/// equality never crosses kinds. String content is canonical UTF-8; arrays
/// preserve insertion order, and objects map restricted scalar [`Key`]s to
/// values in insertion order.
#[derive(Debug, Clone, PartialEq, Default)]
pub enum Value {
    #[default]
    Null,
    Bool(bool),
    Integer(i64),
    Real(f64),
    String(String),
    Array(Array),
    Object(Object),
}

impl Value {
    /// Parses a complete document from UTF-8 text.
    pub fn parse(input: &str) -> Result<Value> {
        crate::decode::from_str(input)
    }

    /// Parses one value from the front of `input`, returning it along
    /// with the number of bytes consumed.
    pub fn parse_partial(input: &str) -> Result<(Value, usize)> {
        crate::decode::from_str_partial(input)
    }

    pub fn kind(&self) -> Kind {
        match self {
            Value::Null => Kind::Null,
            Value::Bool(_) => Kind::Bool,
            Value::Integer(_) => Kind::Integer,
            Value::Real(_) => Kind::Real,
            Value::String(_) => Kind::String,
            Value::Array(_) => Kind::Array,
            Value::Object(_) => Kind::Object,
        }
    }

    pub fn is_null(&self) -> bool {
        matches!(self, Value::Null)
    }

    pub fn is_bool(&self) -> bool {
        matches!(self, Value::Bool(_))
    }

    pub fn is_integer(&self) -> bool {
        matches!(self, Value::Integer(_))
    }

    pub fn is_real(&self) -> bool {
        matches!(self, Value::Real(_))
    }

    pub fn is_string(&self) -> bool {
        matches!(self, Value::String(_))
    }

    pub fn is_array(&self) -> bool {
        matches!(self, Value::Array(_))
    }

    pub fn is_object(&self) -> bool {
        matches!(self, Value::Object(_))
    }

    pub fn as_bool(&self) -> Result<bool> {
        match self {
            Value::Bool(v) => Ok(*v),
            other => Err(Error::unsupported(other.kind(), "as_bool")),
        }
    }

    pub fn as_i64(&self) -> Result<i64> {
        match self {
            Value::Integer(v) => Ok(*v),
            other => Err(Error::unsupported(other.kind(), "as_i64")),
        }
    }

    pub fn as_i8(&self) -> Result<i8> {
        self.narrow("as_i8")
    }

    pub fn as_i16(&self) -> Result<i16> {
        self.narrow("as_i16")
    }

    pub fn as_i32(&self) -> Result<i32> {
        self.narrow("as_i32")
    }

    pub fn as_u8(&self) -> Result<u8> {
        self.narrow("as_u8")
    }

    pub fn as_u16(&self) -> Result<u16> {
        self.narrow("as_u16")
    }

    pub fn as_u32(&self) -> Result<u32> {
        self.narrow("as_u32")
    }

    pub fn as_u64(&self) -> Result<u64> {
        self.narrow("as_u64")
    }

    fn narrow<T: TryFrom<i64>>(&self, op: &'static str) -> Result<T> {
        match self {
            Value::Integer(v) => T::try_from(*v).map_err(|_| {
                Error::range(format!(
                    "the integer value {v} cannot fit into the type requested by {op}"
                ))
            }),
            other => Err(Error::unsupported(other.kind(), op)),
        }
    }

    pub fn as_f64(&self) -> Result<f64> {
        match self {
            Value::Real(v) => Ok(*v),
            other => Err(Error::unsupported(other.kind(), "as_f64")),
        }
    }

    pub fn as_str(&self) -> Result<&str> {
        match self {
            Value::String(v) => Ok(v),
            other => Err(Error::unsupported(other.kind(), "as_str")),
        }
    }

    pub fn as_array(&self) -> Result<&Array> {
        match self {
            Value::Array(v) => Ok(v),
            other => Err(Error::unsupported(other.kind(), "as_array")),
        }
    }

    pub fn as_array_mut(&mut self) -> Result<&mut Array> {
        match self {
            Value::Array(v) => Ok(v),
            other => Err(Error::unsupported(other.kind(), "as_array_mut")),
        }
    }

    pub fn as_object(&self) -> Result<&Object> {
        match self {
            Value::Object(v) => Ok(v),
            other => Err(Error::unsupported(other.kind(), "as_object")),
        }
    }

    pub fn as_object_mut(&mut self) -> Result<&mut Object> {
        match self {
            Value::Object(v) => Ok(v),
            other => Err(Error::unsupported(other.kind(), "as_object_mut")),
        }
    }

    /// Array element by position; `None` for non-arrays or out of range.
    pub fn get(&self, index: usize) -> Option<&Value> {
        match self {
            Value::Array(v) => v.get(index),
            _ => None,
        }
    }

    pub fn get_mut(&mut self, index: usize) -> Option<&mut Value> {
        match self {
            Value::Array(v) => v.get_mut(index),
            _ => None,
        }
    }

    /// Object entry by string key; `None` for non-objects or missing keys.
    pub fn get_field(&self, key: &str) -> Option<&Value> {
        match self {
            Value::Object(map) => map.get(&Key::String(key.to_string())),
            _ => None,
        }
    }

    pub fn get_field_mut(&mut self, key: &str) -> Option<&mut Value> {
        match self {
            Value::Object(map) => map.get_mut(&Key::String(key.to_string())),
            _ => None,
        }
    }

    /// Resets this value to Null, returning the previous contents.
    pub fn take(&mut self) -> Value {
        std::mem::take(self)
    }

    /// Serializes with the given configuration.
    pub fn write_to(&self, out: &mut String, config: &WriteConfig) -> Result<()> {
        crate::encode::write_value(self, out, config)
    }

    /// Serializes with the given configuration into a fresh string.
    pub fn to_json(&self, config: &WriteConfig) -> Result<String> {
        let mut out = String::new();
        self.write_to(&mut out, config)?;
        Ok(out)
    }
}

impl fmt::Display for Value {
    /// Compact serialization. Falls back to `null` when the value cannot
    /// be serialized (a non-finite Real somewhere in the tree); use
    /// [`Value::to_json`] for the checked path.
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self.to_json(&WriteConfig::default()) {
            Ok(s) => f.write_str(&s),
            Err(_) => f.write_str("null"),
        }
    }
}

impl From<bool> for Value {
    fn from(v: bool) -> Self {
        Value::Bool(v)
    }
}

impl From<i8> for Value {
    fn from(v: i8) -> Self {
        Value::Integer(v.into())
    }
}

impl From<i16> for Value {
    fn from(v: i16) -> Self {
        Value::Integer(v.into())
    }
}

impl From<i32> for Value {
    fn from(v: i32) -> Self {
        Value::Integer(v.into())
    }
}

impl From<i64> for Value {
    fn from(v: i64) -> Self {
        Value::Integer(v)
    }
}

impl From<u8> for Value {
    fn from(v: u8) -> Self {
        Value::Integer(v.into())
    }
}

impl From<u16> for Value {
    fn from(v: u16) -> Self {
        Value::Integer(v.into())
    }
}

impl From<u32> for Value {
    fn from(v: u32) -> Self {
        Value::Integer(v.into())
    }
}

impl From<f32> for Value {
    fn from(v: f32) -> Self {
        Value::Real(v.into())
    }
}

impl From<f64> for Value {
    fn from(v: f64) -> Self {
        Value::Real(v)
    }
}

impl From<&str> for Value {
    fn from(v: &str) -> Self {
        Value::String(v.to_string())
    }
}

impl From<String> for Value {
    fn from(v: String) -> Self {
        Value::String(v)
    }
}

impl From<Array> for Value {
    fn from(v: Array) -> Self {
        Value::Array(v)
    }
}

impl From<Object> for Value {
    fn from(v: Object) -> Self {
        Value::Object(v)
    }
}
