use std::hash::{Hash, Hasher};

use crate::error::{Error, Result};
use crate::value::{Kind, Value};

/// A dictionary key: the scalar subset of [`Value`].
///
/// Keys must be hashable, so the Real arm compares and hashes by IEEE-754
/// bit pattern (`0.0` and `-0.0` are distinct keys). Parsing only ever
/// produces String keys; the other arms exist for directly constructed
/// documents.
#[derive(Debug, Clone)]
pub enum Key {
    Null,
    Bool(bool),
    Integer(i64),
    Real(f64),
    String(String),
}

impl Key {
    pub fn kind(&self) -> Kind {
        match self {
            Key::Null => Kind::Null,
            Key::Bool(_) => Kind::Bool,
            Key::Integer(_) => Kind::Integer,
            Key::Real(_) => Kind::Real,
            Key::String(_) => Kind::String,
        }
    }

    /// Converts a scalar value into a key. Array and Object values are not
    /// hashable and fail with the unsupported-operation error.
    pub fn from_value(value: Value) -> Result<Self> {
        match value {
            Value::Null => Ok(Key::Null),
            Value::Bool(v) => Ok(Key::Bool(v)),
            Value::Integer(v) => Ok(Key::Integer(v)),
            Value::Real(v) => Ok(Key::Real(v)),
            Value::String(v) => Ok(Key::String(v)),
            other => Err(Error::unsupported(other.kind(), "Key::from_value")),
        }
    }

    pub fn into_value(self) -> Value {
        match self {
            Key::Null => Value::Null,
            Key::Bool(v) => Value::Bool(v),
            Key::Integer(v) => Value::Integer(v),
            Key::Real(v) => Value::Real(v),
            Key::String(v) => Value::String(v),
        }
    }

    pub fn as_str(&self) -> Result<&str> {
        match self {
            Key::String(s) => Ok(s),
            other => Err(Error::unsupported(other.kind(), "as_str")),
        }
    }
}

impl PartialEq for Key {
    fn eq(&self, other: &Self) -> bool {
        match (self, other) {
            (Key::Null, Key::Null) => true,
            (Key::Bool(a), Key::Bool(b)) => a == b,
            (Key::Integer(a), Key::Integer(b)) => a == b,
            // Bit-pattern equality keeps Eq and Hash consistent.
            (Key::Real(a), Key::Real(b)) => a.to_bits() == b.to_bits(),
            (Key::String(a), Key::String(b)) => a == b,
            _ => false,
        }
    }
}

impl Eq for Key {}

impl Hash for Key {
    fn hash<H: Hasher>(&self, state: &mut H) {
        match self {
            Key::Null => state.write_u8(0),
            Key::Bool(v) => {
                state.write_u8(1);
                v.hash(state);
            }
            Key::Integer(v) => {
                state.write_u8(2);
                v.hash(state);
            }
            Key::Real(v) => {
                state.write_u8(3);
                v.to_bits().hash(state);
            }
            Key::String(v) => {
                state.write_u8(4);
                v.hash(state);
            }
        }
    }
}

impl From<bool> for Key {
    fn from(v: bool) -> Self {
        Key::Bool(v)
    }
}

impl From<i64> for Key {
    fn from(v: i64) -> Self {
        Key::Integer(v)
    }
}

impl From<f64> for Key {
    fn from(v: f64) -> Self {
        Key::Real(v)
    }
}

impl From<&str> for Key {
    fn from(v: &str) -> Self {
        Key::String(v.to_string())
    }
}

impl From<String> for Key {
    fn from(v: String) -> Self {
        Key::String(v)
    }
}

#[cfg(test)]
mod tests {
    use std::collections::hash_map::DefaultHasher;

    use super::*;

    fn hash_of(key: &Key) -> u64 {
        let mut hasher = DefaultHasher::new();
        key.hash(&mut hasher);
        hasher.finish()
    }

    #[rstest::rstest]
    fn test_cross_kind_equality_is_false() {
        assert_ne!(Key::Null, Key::Bool(false));
        assert_ne!(Key::Integer(0), Key::Real(0.0));
        assert_ne!(Key::String("0".to_string()), Key::Integer(0));
    }

    #[rstest::rstest]
    fn test_real_keys_compare_by_bits() {
        assert_eq!(Key::Real(1.5), Key::Real(1.5));
        assert_ne!(Key::Real(0.0), Key::Real(-0.0));
        assert_eq!(hash_of(&Key::Real(1.5)), hash_of(&Key::Real(1.5)));
    }

    #[rstest::rstest]
    fn test_from_value_rejects_containers() {
        let err = Key::from_value(Value::Array(vec![])).unwrap_err();
        assert!(matches!(
            err,
            Error::Unsupported {
                kind: Kind::Array,
                ..
            }
        ));

        let key = Key::from_value(Value::String("a".to_string())).unwrap();
        assert_eq!(key, Key::String("a".to_string()));
        assert_eq!(key.into_value(), Value::String("a".to_string()));
    }
}
