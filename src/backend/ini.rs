use super::string_value;
use crate::error::{Error, Result};
use crate::parser::options::AC_PARSE_VALUE;
use crate::parser::{text, Options, Parser};
use crate::value::{Mapping, Value};
use ini::Ini;
use std::collections::HashSet;

const TYPE_ID: &str = "ini";

/// INI via `rust-ini`
///
/// Keys outside any section land at the top level, each named section
/// becomes a nested mapping. Dumping accepts exactly that shape: scalars
/// and one level of section mappings.
#[derive(Debug, Default, Clone, Copy)]
pub struct IniParser;

impl Parser for IniParser {
    fn type_id(&self) -> &'static str {
        TYPE_ID
    }

    fn aliases(&self) -> &'static [&'static str] {
        &["configparser"]
    }

    fn extensions(&self) -> &'static [&'static str] {
        &["ini"]
    }

    fn preserves_order(&self) -> bool {
        true
    }

    fn load_option_names(&self) -> &'static [&'static str] {
        &[AC_PARSE_VALUE]
    }

    fn read_document(&self, content: &[u8], options: &Options) -> Result<Value> {
        let ini = Ini::load_from_str(text(TYPE_ID, content)?).map_err(|e| Error::codec(TYPE_ID, e))?;

        let mut root = Mapping::new();
        let mut sections = HashSet::new();
        for (section, properties) in ini.iter() {
            let entries: Mapping = properties
                .iter()
                .map(|(key, raw)| (key.to_string(), string_value(raw, options)))
                .collect();

            match section {
                None => {
                    for (key, value) in entries {
                        if root.insert(key.clone(), value).is_some() {
                            return Err(collision(&key));
                        }
                    }
                }
                // Repeated sections merge; a clash with a top-level key is an error
                Some(name) => match root.get_mut(name) {
                    Some(Value::Map(existing)) if sections.contains(name) => existing.extend(entries),
                    Some(_) => return Err(collision(name)),
                    None => {
                        sections.insert(name.to_string());
                        root.insert(name.to_string(), Value::Map(entries));
                    }
                },
            }
        }

        Ok(Value::Map(root))
    }

    fn write_document(&self, value: &Value, _options: &Options) -> Result<Vec<u8>> {
        let map = value
            .as_map()
            .ok_or_else(|| Error::unsupported(TYPE_ID, "document root must be a mapping"))?;

        let mut ini = Ini::new();
        for (key, entry) in map {
            match entry {
                Value::Map(section) => {
                    let mut setter = ini.with_section(Some(key.as_str()));
                    for (name, item) in section {
                        let rendered = item.to_plain_string().ok_or_else(|| {
                            Error::unsupported(
                                TYPE_ID,
                                format!("[{key}] {name}: {} values cannot be stored", item.kind_name()),
                            )
                        })?;
                        setter.set(name.as_str(), rendered);
                    }
                }
                scalar => {
                    let rendered = scalar.to_plain_string().ok_or_else(|| {
                        Error::unsupported(TYPE_ID, format!("{key}: {} values cannot be stored", scalar.kind_name()))
                    })?;
                    ini.with_general_section().set(key.as_str(), rendered);
                }
            }
        }

        let mut out = Vec::new();
        ini.write_to(&mut out)?;
        Ok(out)
    }
}

/// A top-level key and a section share a name; keeping either drops the other
fn collision(name: &str) -> Error {
    Error::unsupported(TYPE_ID, format!("'{name}' is both a top-level key and a section"))
}
