use crate::value::Value;
use indexmap::IndexMap;

/// Container override honored by every backend: `"ordered"` or `"sorted"`
pub const AC_DICT: &str = "ac_dict";
/// Keep codec order for backends that do not preserve order themselves
pub const AC_ORDERED: &str = "ac_ordered";
/// Loading a missing path yields an empty mapping instead of an error
pub const AC_IGNORE_MISSING: &str = "ac_ignore_missing";
/// Parse scalar strings of string-only formats into typed values
pub const AC_PARSE_VALUE: &str = "ac_parse_value";

/// Keyword options passed to load/dump calls
///
/// One `Options` value can be shared across heterogeneous backends: each
/// backend only ever sees the names it declares, see [`Options::filter`].
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Options(IndexMap<String, Value>);

impl Options {
    pub fn new() -> Self {
        Self::default()
    }

    /// Builder-style insert
    pub fn with(mut self, name: impl Into<String>, value: impl Into<Value>) -> Self {
        self.0.insert(name.into(), value.into());
        self
    }

    pub fn insert(&mut self, name: impl Into<String>, value: impl Into<Value>) -> Option<Value> {
        self.0.insert(name.into(), value.into())
    }

    pub fn get(&self, name: &str) -> Option<&Value> {
        self.0.get(name)
    }

    pub fn contains(&self, name: &str) -> bool {
        self.0.contains_key(name)
    }

    /// Boolean option; absent or non-boolean values read as `false`
    pub fn get_bool(&self, name: &str) -> bool {
        self.get(name).and_then(Value::as_bool).unwrap_or(false)
    }

    pub fn get_i64(&self, name: &str) -> Option<i64> {
        self.get(name).and_then(Value::as_i64)
    }

    pub fn names(&self) -> impl Iterator<Item = &str> {
        self.0.keys().map(String::as_str)
    }

    pub fn len(&self) -> usize {
        self.0.len()
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    /// Copy of these options restricted to `allowed` names
    ///
    /// Unknown names are dropped silently. The receiver is left untouched
    /// and filtering an already filtered set is a no-op.
    pub fn filter(&self, allowed: &[&str]) -> Options {
        let (kept, dropped): (IndexMap<_, _>, IndexMap<_, _>) = self
            .0
            .iter()
            .map(|(k, v)| (k.clone(), v.clone()))
            .partition(|(k, _)| allowed.contains(&k.as_str()));

        if !dropped.is_empty() {
            tracing::trace!(dropped = ?dropped.keys().collect::<Vec<_>>(), "filtered options");
        }

        Options(kept)
    }
}

impl<K: Into<String>, V: Into<Value>> FromIterator<(K, V)> for Options {
    fn from_iter<I: IntoIterator<Item = (K, V)>>(iter: I) -> Self {
        Options(
            iter.into_iter()
                .map(|(k, v)| (k.into(), v.into()))
                .collect(),
        )
    }
}
