use super::sorted_if_requested;
use crate::error::{Error, Result};
use crate::parser::{Options, Parser};
use crate::value::Value;
use serde::Serialize;
use serde_json::ser::{PrettyFormatter, Serializer};
use std::io::{Read, Write};

const TYPE_ID: &str = "json";

/// Widest accepted `indent`
const MAX_INDENT: usize = 64;

fn indent_width(width: i64) -> Result<usize> {
    usize::try_from(width)
        .ok()
        .filter(|w| *w <= MAX_INDENT)
        .ok_or_else(|| Error::InvalidOption {
            name: "indent".to_string(),
            reason: format!("expected 0..={MAX_INDENT} spaces, got {width}"),
        })
}

/// JSON via `serde_json`
///
/// Dump options: `indent` (spaces per level, pretty output when set) and
/// `sort_keys`.
#[derive(Debug, Default, Clone, Copy)]
pub struct JsonParser;

impl Parser for JsonParser {
    fn type_id(&self) -> &'static str {
        TYPE_ID
    }

    fn extensions(&self) -> &'static [&'static str] {
        &["json", "jsn", "js"]
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

    fn dump_option_names(&self) -> &'static [&'static str] {
        &["indent", "sort_keys"]
    }

    fn dict_option_names(&self) -> &'static [&'static str] {
        &["object_hook", "object_pairs_hook"]
    }

    fn read_document(&self, content: &[u8], _options: &Options) -> Result<Value> {
        serde_json::from_slice(content).map_err(|e| Error::codec(TYPE_ID, e))
    }

    fn read_stream(&self, stream: &mut dyn Read, _options: &Options) -> Result<Value> {
        serde_json::from_reader(stream).map_err(|e| Error::codec(TYPE_ID, e))
    }

    fn write_document(&self, value: &Value, options: &Options) -> Result<Vec<u8>> {
        let mut out = Vec::new();
        self.write_stream(value, &mut out, options)?;
        Ok(out)
    }

    fn write_stream(&self, value: &Value, stream: &mut dyn Write, options: &Options) -> Result<()> {
        let value = sorted_if_requested(value, options);

        let written = match options.get_i64("indent") {
            Some(width) => {
                let indent = vec![b' '; indent_width(width)?];
                let mut serializer = Serializer::with_formatter(stream, PrettyFormatter::with_indent(&indent));
                value.serialize(&mut serializer)
            }
            None => serde_json::to_writer(stream, value.as_ref()),
        };

        written.map_err(|e| Error::codec(TYPE_ID, e))
    }
}
