use crate::error::{Error, Result};
use crate::parser::{Options, Parser};
use crate::value::Value;
use std::io::{Read, Write};

const TYPE_ID: &str = "cbor";

/// CBOR via `ciborium`; semantic tags are dropped on load
#[derive(Debug, Default, Clone, Copy)]
pub struct CborParser;

impl Parser for CborParser {
    fn type_id(&self) -> &'static str {
        TYPE_ID
    }

    fn extensions(&self) -> &'static [&'static str] {
        &["cbor"]
    }

    fn priority(&self) -> i32 {
        10
    }

    fn allows_primitive_root(&self) -> bool {
        true
    }

    fn is_binary(&self) -> bool {
        true
    }

    fn load_option_names(&self) -> &'static [&'static str] {
        &["object_hook"]
    }

    fn dict_option_names(&self) -> &'static [&'static str] {
        &["object_hook"]
    }

    fn read_document(&self, content: &[u8], _options: &Options) -> Result<Value> {
        ciborium::de::from_reader(content).map_err(|e| Error::codec(TYPE_ID, e))
    }

    fn read_stream(&self, stream: &mut dyn Read, _options: &Options) -> Result<Value> {
        ciborium::de::from_reader(stream).map_err(|e| Error::codec(TYPE_ID, e))
    }

    fn write_document(&self, value: &Value, _options: &Options) -> Result<Vec<u8>> {
        let mut out = Vec::new();
        ciborium::ser::into_writer(value, &mut out).map_err(|e| Error::codec(TYPE_ID, e))?;
        Ok(out)
    }

    fn write_stream(&self, value: &Value, stream: &mut dyn Write, _options: &Options) -> Result<()> {
        ciborium::ser::into_writer(value, stream).map_err(|e| Error::codec(TYPE_ID, e))
    }
}
