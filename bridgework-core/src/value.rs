//! Host value seam
//!
//! Container examples never see a concrete host type. They work over
//! [`HostValue`], which the Python bindings implement for `Bound<PyAny>`
//! and which [`Value`] implements for the CLI and tests.

use serde::{Deserialize, Serialize};
use std::fmt;

use crate::error::Result;

/// Read access to a dynamically typed host object
pub trait HostValue: Sized {
    /// Runtime type name as the host reports it (`int`, `str`, ...)
    fn type_name(&self) -> Result<String>;

    /// The value as an integer, if the host would convert it to one
    fn to_int(&self) -> Option<i64>;

    /// The value as a float, if the host would convert it to one
    fn to_float(&self) -> Option<f64>;

    /// The value as a string, only if it is a string
    fn to_text(&self) -> Option<String>;

    /// The elements, only if the value is a list
    fn to_list(&self) -> Option<Vec<Self>>;
}

/// Owned model of a host object
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum Value {
    None,
    Bool(bool),
    Int(i64),
    Float(f64),
    Str(String),
    Complex(Complex),
    List(Vec<Value>),
    Dict(#[serde(with = "dict_entries")] Vec<(Value, Value)>),
    /// Anything the model does not capture, kept by type name only
    Object { type_name: String },
}

/// Complex number, written in JSON as `{"complex": [re, im]}`
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(from = "ComplexRepr", into = "ComplexRepr")]
pub struct Complex {
    pub re: f64,
    pub im: f64,
}

impl Complex {
    pub fn new(re: f64, im: f64) -> Self {
        Self { re, im }
    }
}

/// Marker form; any other key makes the object a plain dict.
#[derive(Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
struct ComplexRepr {
    complex: [f64; 2],
}

impl From<ComplexRepr> for Complex {
    fn from(repr: ComplexRepr) -> Self {
        let [re, im] = repr.complex;
        Complex { re, im }
    }
}

impl From<Complex> for ComplexRepr {
    fn from(c: Complex) -> Self {
        ComplexRepr {
            complex: [c.re, c.im],
        }
    }
}

impl Value {
    /// Build a complex value
    pub fn complex(re: f64, im: f64) -> Self {
        Value::Complex(Complex::new(re, im))
    }

    /// Build a list value
    pub fn list(items: impl IntoIterator<Item = Value>) -> Self {
        Value::List(items.into_iter().collect())
    }

    /// Build a string-keyed dict value, keeping the given order
    pub fn dict<K, V>(entries: impl IntoIterator<Item = (K, V)>) -> Self
    where
        K: Into<String>,
        V: Into<Value>,
    {
        Value::Dict(
            entries
                .into_iter()
                .map(|(k, v)| (Value::Str(k.into()), v.into()))
                .collect(),
        )
    }

    /// Host type name for this variant
    pub fn kind(&self) -> &str {
        match self {
            Value::None => "NoneType",
            Value::Bool(_) => "bool",
            Value::Int(_) => "int",
            Value::Float(_) => "float",
            Value::Str(_) => "str",
            Value::Complex(_) => "complex",
            Value::List(_) => "list",
            Value::Dict(_) => "dict",
            Value::Object { type_name } => type_name,
        }
    }

    /// Entries of a dict value
    pub fn as_dict(&self) -> Option<&[(Value, Value)]> {
        match self {
            Value::Dict(entries) => Some(entries),
            _ => None,
        }
    }
}

impl HostValue for Value {
    fn type_name(&self) -> Result<String> {
        Ok(self.kind().to_string())
    }

    fn to_int(&self) -> Option<i64> {
        match self {
            Value::Int(i) => Some(*i),
            Value::Bool(b) => Some(i64::from(*b)),
            _ => None,
        }
    }

    fn to_float(&self) -> Option<f64> {
        match self {
            Value::Float(f) => Some(*f),
            Value::Int(i) => Some(*i as f64),
            Value::Bool(b) => Some(if *b { 1.0 } else { 0.0 }),
            _ => None,
        }
    }

    fn to_text(&self) -> Option<String> {
        match self {
            Value::Str(s) => Some(s.clone()),
            _ => None,
        }
    }

    fn to_list(&self) -> Option<Vec<Self>> {
        match self {
            Value::List(items) => Some(items.clone()),
            _ => None,
        }
    }
}

impl fmt::Display for Value {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Value::None => write!(f, "None"),
            Value::Bool(true) => write!(f, "True"),
            Value::Bool(false) => write!(f, "False"),
            Value::Int(i) => write!(f, "{}", i),
            Value::Float(x) if x.fract() == 0.0 && x.is_finite() => write!(f, "{:.1}", x),
            Value::Float(x) => write!(f, "{}", x),
            Value::Str(s) => write!(f, "'{}'", s),
            Value::Complex(c) if c.re == 0.0 => write!(f, "{}j", c.im),
            Value::Complex(c) if c.im < 0.0 => write!(f, "({}-{}j)", c.re, -c.im),
            Value::Complex(c) => write!(f, "({}+{}j)", c.re, c.im),
            Value::List(items) => {
                write!(f, "[")?;
                for (i, item) in items.iter().enumerate() {
                    if i > 0 {
                        write!(f, ", ")?;
                    }
                    write!(f, "{}", item)?;
                }
                write!(f, "]")
            }
            Value::Dict(entries) => {
                write!(f, "{{")?;
                for (i, (k, v)) in entries.iter().enumerate() {
                    if i > 0 {
                        write!(f, ", ")?;
                    }
                    write!(f, "{}: {}", k, v)?;
                }
                write!(f, "}}")
            }
            Value::Object { type_name } => write!(f, "<{} object>", type_name),
        }
    }
}

impl From<i64> for Value {
    fn from(i: i64) -> Self {
        Value::Int(i)
    }
}

impl From<f64> for Value {
    fn from(x: f64) -> Self {
        Value::Float(x)
    }
}

impl From<bool> for Value {
    fn from(b: bool) -> Self {
        Value::Bool(b)
    }
}

impl From<&str> for Value {
    fn from(s: &str) -> Self {
        Value::Str(s.to_string())
    }
}

impl From<String> for Value {
    fn from(s: String) -> Self {
        Value::Str(s)
    }
}

impl From<Vec<Value>> for Value {
    fn from(items: Vec<Value>) -> Self {
        Value::List(items)
    }
}

/// Dicts serialize as JSON objects with string keys, in insertion order.
mod dict_entries {
    use super::Value;
    use serde::de::{Deserializer, MapAccess, Visitor};
    use serde::ser::{Error as _, SerializeMap, Serializer};
    use std::fmt;

    pub fn serialize<S: Serializer>(
        entries: &[(Value, Value)],
        serializer: S,
    ) -> Result<S::Ok, S::Error> {
        let mut map = serializer.serialize_map(Some(entries.len()))?;
        for (key, value) in entries {
            match key {
                Value::Str(k) => map.serialize_entry(k, value)?,
                other => {
                    return Err(S::Error::custom(format!(
                        "dict keys must be strings to serialize, got {}",
                        other.kind()
                    )));
                }
            }
        }
        map.end()
    }

    pub fn deserialize<'de, D: Deserializer<'de>>(
        deserializer: D,
    ) -> Result<Vec<(Value, Value)>, D::Error> {
        struct EntriesVisitor;

        impl<'de> Visitor<'de> for EntriesVisitor {
            type Value = Vec<(Value, Value)>;

            fn expecting(&self, f: &mut fmt::Formatter) -> fmt::Result {
                f.write_str("a map with string keys")
            }

            fn visit_map<A: MapAccess<'de>>(self, mut access: A) -> Result<Self::Value, A::Error> {
                let mut entries = Vec::with_capacity(access.size_hint().unwrap_or(0));
                while let Some((key, value)) = access.next_entry::<String, Value>()? {
                    entries.push((Value::Str(key), value));
                }
                Ok(entries)
            }
        }

        deserializer.deserialize_map(EntriesVisitor)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_kind_names() {
        assert_eq!(Value::Int(1).kind(), "int");
        assert_eq!(Value::Float(1.5).kind(), "float");
        assert_eq!(Value::from("aa").kind(), "str");
        assert_eq!(Value::complex(1.0, 4.0).kind(), "complex");
        assert_eq!(Value::list(vec![]).kind(), "list");
        assert_eq!(Value::None.kind(), "NoneType");
        assert_eq!(
            Value::Object {
                type_name: "Point3D".to_string()
            }
            .kind(),
            "Point3D"
        );
    }

    #[test]
    fn test_int_conversion_follows_host() {
        assert_eq!(Value::Bool(true).to_int(), Some(1));
        assert_eq!(Value::Float(3.0).to_int(), None);
        assert_eq!(Value::from("3").to_int(), None);
        assert_eq!(Value::Int(3).to_float(), Some(3.0));
    }

    #[test]
    fn test_json_shapes() {
        let value: Value =
            serde_json::from_str(r#"{"cat": "meow", "dog": "woof", "n": [1, 2.5, null]}"#).unwrap();
        let entries = value.as_dict().unwrap();
        assert_eq!(entries[0], (Value::from("cat"), Value::from("meow")));
        assert_eq!(entries[1].0, Value::from("dog"));
        assert_eq!(
            entries[2].1,
            Value::list(vec![Value::Int(1), Value::Float(2.5), Value::None])
        );
    }

    #[test]
    fn test_complex_from_json() {
        let value: Value = serde_json::from_str(r#"{"complex": [1.0, 4.0]}"#).unwrap();
        assert_eq!(value, Value::complex(1.0, 4.0));
        assert_eq!(
            serde_json::to_string(&value).unwrap(),
            r#"{"complex":[1.0,4.0]}"#
        );
    }

    #[test]
    fn test_dict_with_complex_like_keys_stays_dict() {
        let value: Value =
            serde_json::from_str(r#"{"re": 1, "im": 2, "label": "x"}"#).unwrap();
        let entries = value.as_dict().unwrap();
        assert_eq!(entries.len(), 3);
        assert_eq!(entries[2], (Value::from("label"), Value::from("x")));

        let value: Value = serde_json::from_str(r#"{"re": 1.0, "im": 2.0}"#).unwrap();
        assert_eq!(value.kind(), "dict");

        let value: Value =
            serde_json::from_str(r#"{"complex": [1.0, 2.0], "label": "x"}"#).unwrap();
        assert_eq!(value.as_dict().unwrap().len(), 2);
    }

    #[test]
    fn test_display_like_host() {
        let value = Value::list(vec![
            Value::Int(12),
            Value::from("a"),
            Value::Float(1.0),
            Value::complex(1.0, 4.0),
        ]);
        assert_eq!(value.to_string(), "[12, 'a', 1.0, (1+4j)]");
    }
}
