//! XML <-> mapping conversion.
//!
//! A document `<root a="1"><x>2</x><y/></root>` loads as
//! `{"root": {"@attrs": {"a": "1"}, "x": "2", "y": null}}`:
//! - an element with neither attributes nor children is its text (or null)
//! - attributes go under `@attrs`, or straight into the body with `merge_attrs`
//! - text next to attributes or children goes under `@text`
//! - children are keyed by tag when tags are unique, otherwise they are
//!   kept in order under `@children` as single-entry mappings
//!
//! Dumping accepts the same shape; an array under a tag repeats the element.

use super::string_value;
use crate::error::{CodecError, Error, Result};
use crate::parser::options::AC_PARSE_VALUE;
use crate::parser::{Options, Parser};
use crate::value::{Mapping, Value};
use quick_xml::events::{BytesDecl, BytesEnd, BytesStart, BytesText, Event};
use quick_xml::{Reader, Writer};
use std::io::Write;

const TYPE_ID: &str = "xml";

const ATTRS: &str = "@attrs";
const TEXT: &str = "@text";
const CHILDREN: &str = "@children";

fn xml_error(e: impl Into<CodecError>) -> Error {
    Error::codec(TYPE_ID, e)
}

/// XML via `quick-xml`
#[derive(Debug, Default, Clone, Copy)]
pub struct XmlParser;

impl Parser for XmlParser {
    fn type_id(&self) -> &'static str {
        TYPE_ID
    }

    fn extensions(&self) -> &'static [&'static str] {
        &["xml"]
    }

    fn preserves_order(&self) -> bool {
        true
    }

    fn load_option_names(&self) -> &'static [&'static str] {
        &["merge_attrs", AC_PARSE_VALUE]
    }

    fn dump_option_names(&self) -> &'static [&'static str] {
        &["indent"]
    }

    fn read_document(&self, content: &[u8], options: &Options) -> Result<Value> {
        let mut reader = Reader::from_reader(content);
        let mut buf = Vec::new();
        let mut stack: Vec<Element> = Vec::new();
        let mut root: Option<Value> = None;

        loop {
            match reader.read_event_into(&mut buf).map_err(xml_error)? {
                Event::Start(start) => stack.push(Element::open(&start)?),
                Event::Empty(start) => {
                    let element = Element::open(&start)?;
                    attach(element, &mut stack, &mut root, options)?;
                }
                Event::End(_) => {
                    let element = stack
                        .pop()
                        .ok_or_else(|| xml_error("unbalanced closing tag"))?;
                    attach(element, &mut stack, &mut root, options)?;
                }
                Event::Text(t) => {
                    if let Some(element) = stack.last_mut() {
                        element.text.push_str(&t.unescape().map_err(xml_error)?);
                    }
                }
                Event::CData(c) => {
                    if let Some(element) = stack.last_mut() {
                        element.text.push_str(&String::from_utf8_lossy(&c.into_inner()));
                    }
                }
                Event::Eof => break,
                _ => {}
            }
            buf.clear();
        }

        if !stack.is_empty() {
            return Err(xml_error("document ended inside an element"));
        }
        Ok(root.unwrap_or_else(Value::map))
    }

    fn write_document(&self, value: &Value, options: &Options) -> Result<Vec<u8>> {
        let mut out = Vec::new();
        self.write_stream(value, &mut out, options)?;
        Ok(out)
    }

    fn write_stream(&self, value: &Value, stream: &mut dyn Write, options: &Options) -> Result<()> {
        let (tag, body) = match value.as_map() {
            Some(map) if map.len() == 1 => map
                .first()
                .ok_or_else(|| Error::unsupported(TYPE_ID, "empty document"))?,
            _ => {
                return Err(Error::unsupported(
                    TYPE_ID,
                    "document root must be a mapping with exactly one key",
                ))
            }
        };
        if matches!(body, Value::Array(_)) {
            return Err(Error::unsupported(TYPE_ID, "root element cannot repeat"));
        }

        let mut writer = match options.get_i64("indent") {
            Some(width) if width > 0 => Writer::new_with_indent(stream, b' ', width as usize),
            _ => Writer::new(stream),
        };
        writer
            .write_event(Event::Decl(BytesDecl::new("1.0", Some("UTF-8"), None)))
            .map_err(xml_error)?;
        write_element(&mut writer, tag, body)
    }
}

/// Element being collected while its children are read
struct Element {
    tag: String,
    attrs: Mapping,
    text: String,
    children: Vec<(String, Value)>,
}

impl Element {
    fn open(start: &BytesStart<'_>) -> Result<Self> {
        let tag = String::from_utf8_lossy(start.name().as_ref()).into_owned();

        let mut attrs = Mapping::new();
        for attr in start.attributes() {
            let attr = attr.map_err(xml_error)?;
            let key = String::from_utf8_lossy(attr.key.as_ref()).into_owned();
            let value = attr.unescape_value().map_err(xml_error)?.into_owned();
            attrs.insert(key, Value::String(value));
        }

        Ok(Self {
            tag,
            attrs,
            text: String::new(),
            children: Vec::new(),
        })
    }

    fn into_body(self, options: &Options) -> Value {
        let text = self.text.trim();

        if self.attrs.is_empty() && self.children.is_empty() {
            return if text.is_empty() {
                Value::Null
            } else {
                string_value(text, options)
            };
        }

        let mut body = Mapping::new();
        if !self.attrs.is_empty() {
            if options.get_bool("merge_attrs") {
                for (key, value) in self.attrs {
                    body.insert(key, string_attr(value, options));
                }
            } else {
                let attrs = self
                    .attrs
                    .into_iter()
                    .map(|(key, value)| (key, string_attr(value, options)))
                    .collect();
                body.insert(ATTRS.to_string(), Value::Map(attrs));
            }
        }

        if !text.is_empty() {
            body.insert(TEXT.to_string(), string_value(text, options));
        }

        let unique = self.children.iter().enumerate().all(|(i, (tag, _))| {
            !body.contains_key(tag) && !self.children[..i].iter().any(|(seen, _)| seen == tag)
        });

        if unique {
            body.extend(self.children);
        } else {
            let children = self
                .children
                .into_iter()
                .map(|(tag, value)| Value::Map(Mapping::from_iter([(tag, value)])))
                .collect();
            body.insert(CHILDREN.to_string(), Value::Array(children));
        }

        Value::Map(body)
    }
}

fn string_attr(value: Value, options: &Options) -> Value {
    match value {
        Value::String(raw) if options.get_bool(AC_PARSE_VALUE) => string_value(&raw, options),
        other => other,
    }
}

/// Close `element` into its parent, or make it the document root
fn attach(element: Element, stack: &mut [Element], root: &mut Option<Value>, options: &Options) -> Result<()> {
    let tag = element.tag.clone();
    let body = element.into_body(options);

    match stack.last_mut() {
        Some(parent) => parent.children.push((tag, body)),
        None if root.is_none() => *root = Some(Value::Map(Mapping::from_iter([(tag, body)]))),
        None => return Err(xml_error("more than one root element")),
    }
    Ok(())
}

fn plain(tag: &str, value: &Value) -> Result<String> {
    value
        .to_plain_string()
        .ok_or_else(|| Error::unsupported(TYPE_ID, format!("<{tag}>: {} values cannot be stored as text", value.kind_name())))
}

fn write_element<W: Write>(writer: &mut Writer<W>, tag: &str, body: &Value) -> Result<()> {
    match body {
        Value::Null => {
            writer
                .write_event(Event::Empty(BytesStart::new(tag)))
                .map_err(xml_error)?;
        }
        Value::Array(items) => {
            for item in items {
                write_element(writer, tag, item)?;
            }
        }
        Value::Map(map) => {
            let mut start = BytesStart::new(tag);
            if let Some(attrs) = map.get(ATTRS) {
                let attrs = attrs
                    .as_map()
                    .ok_or_else(|| Error::unsupported(TYPE_ID, format!("<{tag}>: {ATTRS} must be a mapping")))?;
                for (key, value) in attrs {
                    start.push_attribute((key.as_str(), plain(tag, value)?.as_str()));
                }
            }

            let text = map.get(TEXT);
            let has_children = map.keys().any(|k| k != ATTRS && k != TEXT);
            if text.is_none() && !has_children {
                writer.write_event(Event::Empty(start)).map_err(xml_error)?;
                return Ok(());
            }

            writer.write_event(Event::Start(start)).map_err(xml_error)?;
            if let Some(text) = text {
                writer
                    .write_event(Event::Text(BytesText::new(&plain(tag, text)?)))
                    .map_err(xml_error)?;
            }
            for (key, value) in map {
                match key.as_str() {
                    ATTRS | TEXT => {}
                    CHILDREN => write_children(writer, tag, value)?,
                    child => write_element(writer, child, value)?,
                }
            }
            writer
                .write_event(Event::End(BytesEnd::new(tag)))
                .map_err(xml_error)?;
        }
        scalar => {
            let text = plain(tag, scalar)?;
            writer
                .write_event(Event::Start(BytesStart::new(tag)))
                .map_err(xml_error)?;
            writer
                .write_event(Event::Text(BytesText::new(&text)))
                .map_err(xml_error)?;
            writer
                .write_event(Event::End(BytesEnd::new(tag)))
                .map_err(xml_error)?;
        }
    }
    Ok(())
}

/// `@children`: ordered list of single-entry `{tag: body}` mappings
fn write_children<W: Write>(writer: &mut Writer<W>, parent: &str, children: &Value) -> Result<()> {
    let items = children
        .as_array()
        .ok_or_else(|| Error::unsupported(TYPE_ID, format!("<{parent}>: {CHILDREN} must be an array")))?;

    for item in items {
        match item.as_map() {
            Some(child) => {
                for (tag, body) in child {
                    write_element(writer, tag, body)?;
                }
            }
            None => {
                return Err(Error::unsupported(
                    TYPE_ID,
                    format!("<{parent}>: {CHILDREN} entries must be mappings"),
                ))
            }
        }
    }
    Ok(())
}
