use crate::error::{Error, Result};
use crate::parser::{Options, Parser};
use crate::value::Value;
use serde_pickle::{DeOptions, SerOptions};
use std::io::{Read, Write};

const TYPE_ID: &str = "pickle";

/// Python pickle streams via `serde-pickle`
///
/// Load option `decode_strings` decodes protocol 2 byte strings as UTF-8;
/// dump option `protocol` selects 2 or 3 (the default).
#[derive(Debug, Default, Clone, Copy)]
pub struct PickleParser;

impl PickleParser {
    fn de_options(options: &Options) -> DeOptions {
        let de = DeOptions::new();
        if options.get_bool("decode_strings") {
            de.decode_strings()
        } else {
            de
        }
    }

    fn ser_options(options: &Options) -> Result<SerOptions> {
        match options.get_i64("protocol") {
            None | Some(3) => Ok(SerOptions::new()),
            Some(2) => Ok(SerOptions::new().proto_v2()),
            Some(other) => Err(Error::InvalidOption {
                name: "protocol".to_string(),
                reason: format!("supported protocols are 2 and 3, got {other}"),
            }),
        }
    }
}

impl Parser for PickleParser {
    fn type_id(&self) -> &'static str {
        TYPE_ID
    }

    fn extensions(&self) -> &'static [&'static str] {
        &["pkl", "pickle"]
    }

    fn allows_primitive_root(&self) -> bool {
        true
    }

    fn is_binary(&self) -> bool {
        true
    }

    fn load_option_names(&self) -> &'static [&'static str] {
        &["decode_strings"]
    }

    fn dump_option_names(&self) -> &'static [&'static str] {
        &["protocol"]
    }

    fn read_document(&self, content: &[u8], options: &Options) -> Result<Value> {
        serde_pickle::from_slice(content, Self::de_options(options)).map_err(|e| Error::codec(TYPE_ID, e))
    }

    fn read_stream(&self, stream: &mut dyn Read, options: &Options) -> Result<Value> {
        serde_pickle::from_reader(stream, Self::de_options(options)).map_err(|e| Error::codec(TYPE_ID, e))
    }

    fn write_document(&self, value: &Value, options: &Options) -> Result<Vec<u8>> {
        serde_pickle::to_vec(value, Self::ser_options(options)?).map_err(|e| Error::codec(TYPE_ID, e))
    }

    fn write_stream(&self, value: &Value, mut stream: &mut dyn Write, options: &Options) -> Result<()> {
        serde_pickle::to_writer(&mut stream, value, Self::ser_options(options)?).map_err(|e| Error::codec(TYPE_ID, e))
    }
}
