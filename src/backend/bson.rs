use crate::error::{Error, Result};
use crate::parser::{Options, Parser};
use crate::value::Value;

const TYPE_ID: &str = "bson";

/// BSON documents via the `bson` crate
///
/// Extended types (ObjectId, datetimes, ...) load in their extended JSON
/// mapping form, e.g. `{"$oid": "..."}`.
#[derive(Debug, Default, Clone, Copy)]
pub struct BsonParser;

impl Parser for BsonParser {
    fn type_id(&self) -> &'static str {
        TYPE_ID
    }

    fn extensions(&self) -> &'static [&'static str] {
        &["bson"]
    }

    fn preserves_order(&self) -> bool {
        true
    }

    fn is_binary(&self) -> bool {
        true
    }

    fn read_document(&self, content: &[u8], _options: &Options) -> Result<Value> {
        bson::from_slice(content).map_err(|e| Error::codec(TYPE_ID, e))
    }

    fn write_document(&self, value: &Value, _options: &Options) -> Result<Vec<u8>> {
        bson::to_vec(value).map_err(|e| Error::codec(TYPE_ID, e))
    }
}
