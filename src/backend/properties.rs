use super::string_value;
use crate::error::{Error, Result};
use crate::parser::options::AC_PARSE_VALUE;
use crate::parser::{Options, Parser};
use crate::value::{Mapping, Value};
use java_properties::{PropertiesIter, PropertiesWriter};
use std::io::Read;

const TYPE_ID: &str = "properties";

/// Java `.properties` files via `java-properties`; flat mappings only
#[derive(Debug, Default, Clone, Copy)]
pub struct PropertiesParser;

impl Parser for PropertiesParser {
    fn type_id(&self) -> &'static str {
        TYPE_ID
    }

    fn aliases(&self) -> &'static [&'static str] {
        &["java-properties"]
    }

    fn extensions(&self) -> &'static [&'static str] {
        &["properties"]
    }

    fn preserves_order(&self) -> bool {
        true
    }

    fn load_option_names(&self) -> &'static [&'static str] {
        &[AC_PARSE_VALUE]
    }

    fn read_document(&self, content: &[u8], options: &Options) -> Result<Value> {
        self.read_stream(&mut &content[..], options)
    }

    fn read_stream(&self, stream: &mut dyn Read, options: &Options) -> Result<Value> {
        let mut map = Mapping::new();
        PropertiesIter::new(stream)
            .read_into(|key, raw| {
                map.insert(key, string_value(&raw, options));
            })
            .map_err(|e| Error::codec(TYPE_ID, e))?;
        Ok(Value::Map(map))
    }

    fn write_document(&self, value: &Value, _options: &Options) -> Result<Vec<u8>> {
        let map = value
            .as_map()
            .ok_or_else(|| Error::unsupported(TYPE_ID, "document root must be a mapping"))?;

        let mut out = Vec::new();
        {
            let mut writer = PropertiesWriter::new(&mut out);
            for (key, item) in map {
                let rendered = item.to_plain_string().ok_or_else(|| {
                    Error::unsupported(TYPE_ID, format!("{key}: nested {} values cannot be stored", item.kind_name()))
                })?;
                writer
                    .write(key, &rendered)
                    .map_err(|e| Error::codec(TYPE_ID, e))?;
            }
            writer.finish().map_err(|e| Error::codec(TYPE_ID, e))?;
        }
        Ok(out)
    }
}
