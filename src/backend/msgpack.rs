use crate::error::{Error, Result};
use crate::parser::{Options, Parser};
use crate::value::Value;
use std::io::{Read, Write};

const TYPE_ID: &str = "msgpack";

/// MessagePack via `rmp-serde`; maps are always written as maps
#[derive(Debug, Default, Clone, Copy)]
pub struct MsgPackParser;

impl Parser for MsgPackParser {
    fn type_id(&self) -> &'static str {
        TYPE_ID
    }

    fn extensions(&self) -> &'static [&'static str] {
        &["mpk", "msgpack"]
    }

    fn allows_primitive_root(&self) -> bool {
        true
    }

    fn is_binary(&self) -> bool {
        true
    }

    fn load_option_names(&self) -> &'static [&'static str] {
        &["object_hook", "object_pairs_hook"]
    }

    fn dict_option_names(&self) -> &'static [&'static str] {
        &["object_hook", "object_pairs_hook"]
    }

    fn read_document(&self, content: &[u8], _options: &Options) -> Result<Value> {
        rmp_serde::from_slice(content).map_err(|e| Error::codec(TYPE_ID, e))
    }

    fn read_stream(&self, stream: &mut dyn Read, _options: &Options) -> Result<Value> {
        rmp_serde::from_read(stream).map_err(|e| Error::codec(TYPE_ID, e))
    }

    fn write_document(&self, value: &Value, _options: &Options) -> Result<Vec<u8>> {
        rmp_serde::to_vec(value).map_err(|e| Error::codec(TYPE_ID, e))
    }

    fn write_stream(&self, value: &Value, mut stream: &mut dyn Write, _options: &Options) -> Result<()> {
        rmp_serde::encode::write(&mut stream, value).map_err(|e| Error::codec(TYPE_ID, e))
    }
}
