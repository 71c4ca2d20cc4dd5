mod de;
mod scalar;
mod ser;


pub use scalar::parse_scalar;

use crate::error::{Error, Result};
use indexmap::IndexMap;

/// Insertion-ordered mapping used for every decoded table/object/section
pub type Mapping = IndexMap<String, Value>;

/// Canonical in-memory representation shared by all backends
#[derive(Debug, Clone, PartialEq, Default)]
pub enum Value {
    #[default]
    Null,
    Bool(bool),
    Integer(i64),
    Float(f64),
    String(String),
    Bytes(Vec<u8>),
    Array(Vec<Value>),
    Map(Mapping),
}

/// Container used to materialize decoded mappings
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum MapKind {
    /// Keys stay in document order
    Ordered,
    /// Keys are sorted, recursively
    Sorted,
}

impl MapKind {
    /// Interpret a container option value such as `"ordered"` or `"dict"`
    pub fn from_option(name: &str, value: &Value) -> Result<Self> {
        match value.as_str() {
            Some("ordered") | Some("OrderedDict") => Ok(MapKind::Ordered),
            Some("sorted") | Some("dict") => Ok(MapKind::Sorted),
            _ => Err(Error::InvalidOption {
                name: name.to_string(),
                reason: format!(
                    "expected one of \"ordered\", \"sorted\", got {}",
                    value.kind_name()
                ),
            }),
        }
    }
}

impl Value {
    /// Empty mapping
    pub fn map() -> Self {
        Value::Map(Mapping::new())
    }

    /// Short type name used in diagnostics
    pub fn kind_name(&self) -> &'static str {
        match self {
            Value::Null => "null",
            Value::Bool(_) => "boolean",
            Value::Integer(_) => "integer",
            Value::Float(_) => "float",
            Value::String(_) => "string",
            Value::Bytes(_) => "bytes",
            Value::Array(_) => "array",
            Value::Map(_) => "mapping",
        }
    }

    pub fn is_map(&self) -> bool {
        matches!(self, Value::Map(_))
    }

    /// True for anything that is not an array or a mapping
    pub fn is_scalar(&self) -> bool {
        !matches!(self, Value::Array(_) | Value::Map(_))
    }

    pub fn as_map(&self) -> Option<&Mapping> {
        match self {
            Value::Map(map) => Some(map),
            _ => None,
        }
    }

    pub fn as_array(&self) -> Option<&[Value]> {
        match self {
            Value::Array(items) => Some(items),
            _ => None,
        }
    }

    pub fn as_str(&self) -> Option<&str> {
        match self {
            Value::String(s) => Some(s),
            _ => None,
        }
    }

    pub fn as_bool(&self) -> Option<bool> {
        match self {
            Value::Bool(b) => Some(*b),
            _ => None,
        }
    }

    pub fn as_i64(&self) -> Option<i64> {
        match self {
            Value::Integer(i) => Some(*i),
            _ => None,
        }
    }

    pub fn as_f64(&self) -> Option<f64> {
        match self {
            Value::Float(f) => Some(*f),
            Value::Integer(i) => Some(*i as f64),
            _ => None,
        }
    }

    /// Look up `key` when this value is a mapping
    pub fn get(&self, key: &str) -> Option<&Value> {
        self.as_map().and_then(|map| map.get(key))
    }

    /// Sort mapping keys at every depth
    pub fn sort_keys(&mut self) {
        match self {
            Value::Map(map) => {
                map.sort_keys();
                map.values_mut().for_each(Value::sort_keys);
            }
            Value::Array(items) => items.iter_mut().for_each(Value::sort_keys),
            _ => {}
        }
    }

    /// Rebuild nested mappings with the requested container
    pub fn into_container(mut self, kind: MapKind) -> Self {
        if kind == MapKind::Sorted {
            self.sort_keys();
        }
        self
    }

    /// Render a scalar the way string-table formats (INI, properties, XML text) store it
    pub fn to_plain_string(&self) -> Option<String> {
        match self {
            Value::Null => Some(String::new()),
            Value::Bool(b) => Some(b.to_string()),
            Value::Integer(i) => Some(i.to_string()),
            Value::Float(f) => Some(f.to_string()),
            Value::String(s) => Some(s.clone()),
            Value::Bytes(_) | Value::Array(_) | Value::Map(_) => None,
        }
    }
}

impl From<bool> for Value {
    fn from(b: bool) -> Self {
        Value::Bool(b)
    }
}

impl From<i64> for Value {
    fn from(i: i64) -> Self {
        Value::Integer(i)
    }
}

impl From<i32> for Value {
    fn from(i: i32) -> Self {
        Value::Integer(i64::from(i))
    }
}

impl From<f64> for Value {
    fn from(f: f64) -> Self {
        Value::Float(f)
    }
}

impl From<&str> for Value {
    fn from(s: &str) -> Self {
        Value::String(s.to_string())
    }
}

impl From<String> for Value {
    fn from(s: String) -> Self {
        Value::String(s)
    }
}

impl From<Vec<Value>> for Value {
    fn from(items: Vec<Value>) -> Self {
        Value::Array(items)
    }
}

impl From<Mapping> for Value {
    fn from(map: Mapping) -> Self {
        Value::Map(map)
    }
}

impl<K: Into<String>, V: Into<Value>> FromIterator<(K, V)> for Value {
    fn from_iter<I: IntoIterator<Item = (K, V)>>(iter: I) -> Self {
        Value::Map(
            iter.into_iter()
                .map(|(k, v)| (k.into(), v.into()))
                .collect(),
        )
    }
}
