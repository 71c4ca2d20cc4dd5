use super::sorted_if_requested;
use crate::error::{Error, Result};
use crate::parser::{text, Options, Parser};
use crate::value::Value;

const TYPE_ID: &str = "toml";

/// TOML via the `toml` crate
///
/// TOML has no null; dumping a `Value::Null` anywhere fails with a codec
/// error. Datetimes load as the crate's private single-key table.
#[derive(Debug, Default, Clone, Copy)]
pub struct TomlParser;

impl Parser for TomlParser {
    fn type_id(&self) -> &'static str {
        TYPE_ID
    }

    fn extensions(&self) -> &'static [&'static str] {
        &["toml"]
    }

    fn dump_option_names(&self) -> &'static [&'static str] {
        &["pretty", "sort_keys"]
    }

    fn read_document(&self, content: &[u8], _options: &Options) -> Result<Value> {
        toml::from_str(text(TYPE_ID, content)?).map_err(|e| Error::codec(TYPE_ID, e))
    }

    fn write_document(&self, value: &Value, options: &Options) -> Result<Vec<u8>> {
        let value = sorted_if_requested(value, options);
        let encoded = if options.get_bool("pretty") {
            toml::to_string_pretty(value.as_ref())
        } else {
            toml::to_string(value.as_ref())
        };

        encoded
            .map(String::into_bytes)
            .map_err(|e| Error::codec(TYPE_ID, e))
    }
}
