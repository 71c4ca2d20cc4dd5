use super::string_value;
use crate::error::{Error, Result};
use crate::parser::options::AC_PARSE_VALUE;
use crate::parser::{text, Options, Parser};
use crate::value::{Mapping, Value};
use regex::Regex;
use std::borrow::Cow;
use std::sync::OnceLock;
use tracing::warn;

const TYPE_ID: &str = "shellvars";

static ASSIGNMENT: OnceLock<Regex> = OnceLock::new();

fn assignment() -> &'static Regex {
    ASSIGNMENT.get_or_init(|| {
        Regex::new(r"^\s*(?:export\s+)?([A-Za-z_][A-Za-z0-9_]*)=(.*)$").expect("assignment pattern is valid")
    })
}

/// Shell variable assignments (`NAME=value`, optionally `export`ed)
///
/// Blank lines and `#` comments are skipped; so is anything else that is
/// not a plain assignment, with a warning.
#[derive(Debug, Default, Clone, Copy)]
pub struct ShellVarsParser;

impl Parser for ShellVarsParser {
    fn type_id(&self) -> &'static str {
        TYPE_ID
    }

    fn extensions(&self) -> &'static [&'static str] {
        &["sh"]
    }

    fn load_option_names(&self) -> &'static [&'static str] {
        &[AC_PARSE_VALUE]
    }

    fn read_document(&self, content: &[u8], options: &Options) -> Result<Value> {
        let mut map = Mapping::new();

        for (lineno, line) in text(TYPE_ID, content)?.lines().enumerate() {
            let trimmed = line.trim();
            if trimmed.is_empty() || trimmed.starts_with('#') {
                continue;
            }

            let Some(caps) = assignment().captures(line) else {
                warn!(line = lineno + 1, content = trimmed, "skipping unrecognized shell line");
                continue;
            };

            let raw = unquote(strip_trailing_comment(caps[2].trim()));
            map.insert(caps[1].to_string(), string_value(&raw, options));
        }

        Ok(Value::Map(map))
    }

    fn write_document(&self, value: &Value, _options: &Options) -> Result<Vec<u8>> {
        let map = value
            .as_map()
            .ok_or_else(|| Error::unsupported(TYPE_ID, "document root must be a mapping"))?;

        let mut out = String::new();
        for (key, item) in map {
            if !assignment().is_match(&format!("{key}=")) {
                return Err(Error::unsupported(TYPE_ID, format!("'{key}' is not a valid variable name")));
            }
            let rendered = item.to_plain_string().ok_or_else(|| {
                Error::unsupported(TYPE_ID, format!("{key}: nested {} values cannot be stored", item.kind_name()))
            })?;
            // Single quotes keep everything literal; embedded ones are closed and escaped
            out.push_str(&format!("{key}='{}'\n", rendered.replace('\'', r"'\''")));
        }

        Ok(out.into_bytes())
    }
}

/// Drop an unquoted ` # comment` tail
fn strip_trailing_comment(raw: &str) -> &str {
    if raw.starts_with('"') || raw.starts_with('\'') {
        return raw;
    }
    match raw.find(" #") {
        Some(idx) => raw[..idx].trim_end(),
        None => raw,
    }
}

fn unquote(raw: &str) -> Cow<'_, str> {
    if raw.len() >= 2 && raw.starts_with('\'') && raw.ends_with('\'') {
        return Cow::Owned(raw[1..raw.len() - 1].replace(r"'\''", "'"));
    }
    if raw.len() >= 2 && raw.starts_with('"') && raw.ends_with('"') {
        return Cow::Borrowed(&raw[1..raw.len() - 1]);
    }
    Cow::Borrowed(raw)
}
