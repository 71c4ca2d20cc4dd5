use crate::error::{Error, Result};
use crate::parser::{text, Options, Parser};
use crate::value::Value;

const TYPE_ID: &str = "json5";

/// JSON5 via the `json5` crate; dumps plain JSON-compatible JSON5
#[derive(Debug, Default, Clone, Copy)]
pub struct Json5Parser;

impl Parser for Json5Parser {
    fn type_id(&self) -> &'static str {
        TYPE_ID
    }

    fn extensions(&self) -> &'static [&'static str] {
        &["json5"]
    }

    fn preserves_order(&self) -> bool {
        true
    }

    fn allows_primitive_root(&self) -> bool {
        true
    }

    fn load_option_names(&self) -> &'static [&'static str] {
        &["object_hook", "object_pairs_hook"]
    }

    fn dict_option_names(&self) -> &'static [&'static str] {
        &["object_hook", "object_pairs_hook"]
    }

    fn read_document(&self, content: &[u8], _options: &Options) -> Result<Value> {
        json5::from_str(text(TYPE_ID, content)?).map_err(|e| Error::codec(TYPE_ID, e))
    }

    fn write_document(&self, value: &Value, _options: &Options) -> Result<Vec<u8>> {
        json5::to_string(value)
            .map(String::into_bytes)
            .map_err(|e| Error::codec(TYPE_ID, e))
    }
}
