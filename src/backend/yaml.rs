use super::sorted_if_requested;
use crate::error::{Error, Result};
use crate::parser::{Options, Parser};
use crate::value::Value;
use std::io::{Read, Write};

const TYPE_ID: &str = "yaml";

/// YAML via `serde_yaml`; tagged values load as single-entry mappings
#[derive(Debug, Default, Clone, Copy)]
pub struct YamlParser;

impl Parser for YamlParser {
    fn type_id(&self) -> &'static str {
        TYPE_ID
    }

    fn aliases(&self) -> &'static [&'static str] {
        &["yml"]
    }

    fn extensions(&self) -> &'static [&'static str] {
        &["yaml", "yml"]
    }

    fn preserves_order(&self) -> bool {
        true
    }

    fn allows_primitive_root(&self) -> bool {
        true
    }

    fn dump_option_names(&self) -> &'static [&'static str] {
        &["sort_keys"]
    }

    fn read_document(&self, content: &[u8], _options: &Options) -> Result<Value> {
        serde_yaml::from_slice(content).map_err(|e| Error::codec(TYPE_ID, e))
    }

    fn read_stream(&self, stream: &mut dyn Read, _options: &Options) -> Result<Value> {
        serde_yaml::from_reader(stream).map_err(|e| Error::codec(TYPE_ID, e))
    }

    fn write_document(&self, value: &Value, options: &Options) -> Result<Vec<u8>> {
        let mut out = Vec::new();
        self.write_stream(value, &mut out, options)?;
        Ok(out)
    }

    fn write_stream(&self, value: &Value, stream: &mut dyn Write, options: &Options) -> Result<()> {
        let value = sorted_if_requested(value, options);
        serde_yaml::to_writer(stream, value.as_ref()).map_err(|e| Error::codec(TYPE_ID, e))
    }
}
