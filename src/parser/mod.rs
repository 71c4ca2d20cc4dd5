mod document;
pub mod options;
mod registry;
mod select;


pub use document::Document;
pub use options::Options;
pub use registry::{default_registry, ParserCtor, ParserRegistry, Registration, RegistryBuilder};
pub use select::ForcedType;

use crate::error::{Error, Result};
use crate::value::{MapKind, Value};
use options::{AC_DICT, AC_IGNORE_MISSING, AC_ORDERED};
use std::fmt;
use std::fs::{self, File};
use std::io::{BufReader, BufWriter, Read, Write};
use std::path::Path;
use tracing::debug;

/// Capability contract every format backend implements
///
/// Backends declare their identity, capability flags and the option names
/// their codec understands, and implement the four codec hooks. The
/// provided `load_*`/`dump_*` operations apply the rules shared by every
/// backend around those hooks:
/// - options are filtered to the declared names before reaching a hook
/// - at most one dict option may be given per call
/// - decoded mappings are materialized with the resolved [`MapKind`]
/// - backends without primitive-root support only dump mappings
/// - text backends exchange [`Document::Text`], binary ones [`Document::Binary`]
///
/// Caller streams are borrowed and never closed.
pub trait Parser: Send + Sync {
    /// Canonical short name, e.g. `"json"`
    fn type_id(&self) -> &'static str;

    /// Additional names resolving to this backend
    fn aliases(&self) -> &'static [&'static str] {
        &[]
    }

    /// File extensions without the dot
    fn extensions(&self) -> &'static [&'static str];

    /// Higher wins when several backends claim the same key
    fn priority(&self) -> i32 {
        0
    }

    /// Decoded mappings always keep document order
    fn preserves_order(&self) -> bool {
        false
    }

    /// Scalars and arrays are valid document roots
    fn allows_primitive_root(&self) -> bool {
        false
    }

    /// Operates on bytes instead of text
    fn is_binary(&self) -> bool {
        false
    }

    fn load_option_names(&self) -> &'static [&'static str] {
        &[]
    }

    fn dump_option_names(&self) -> &'static [&'static str] {
        &[]
    }

    /// Load options selecting the mapping container; mutually exclusive
    fn dict_option_names(&self) -> &'static [&'static str] {
        &[]
    }

    /// Decode a whole document. `options` holds load options only.
    fn read_document(&self, content: &[u8], options: &Options) -> Result<Value>;

    /// Decode from a stream. Defaults to buffering it into [`Parser::read_document`].
    fn read_stream(&self, stream: &mut dyn Read, options: &Options) -> Result<Value> {
        let mut content = Vec::new();
        stream.read_to_end(&mut content)?;
        self.read_document(&content, options)
    }

    /// Encode a whole document. `options` holds dump options only.
    fn write_document(&self, value: &Value, options: &Options) -> Result<Vec<u8>>;

    /// Encode into a stream. Defaults to writing [`Parser::write_document`] output.
    fn write_stream(&self, value: &Value, stream: &mut dyn Write, options: &Options) -> Result<()> {
        let encoded = self.write_document(value, options)?;
        stream.write_all(&encoded)?;
        Ok(())
    }

    /// Container used for decoded mappings
    ///
    /// Container option values are validated first. Order-preserving
    /// backends then always use [`MapKind::Ordered`]. Otherwise `ac_dict`
    /// wins over a dict option, which wins over `ac_ordered`.
    fn container_kind(&self, options: &Options) -> Result<MapKind> {
        let hooks: Vec<&str> = self
            .dict_option_names()
            .iter()
            .copied()
            .filter(|name| options.contains(name))
            .collect();

        if hooks.len() > 1 {
            return Err(Error::ConflictingDictOptions {
                type_id: self.type_id(),
                options: hooks.iter().map(|s| s.to_string()).collect(),
            });
        }

        // Values are checked even when the backend ignores them
        let forced = options
            .get(AC_DICT)
            .map(|value| MapKind::from_option(AC_DICT, value))
            .transpose()?;
        let hooked = hooks
            .first()
            .and_then(|&hook| options.get(hook).map(|value| MapKind::from_option(hook, value)))
            .transpose()?;

        if self.preserves_order() {
            return Ok(MapKind::Ordered);
        }

        Ok(forced.or(hooked).unwrap_or(if options.get_bool(AC_ORDERED) {
            MapKind::Ordered
        } else {
            MapKind::Sorted
        }))
    }

    /// Load from in-memory content; empty content yields an empty mapping
    fn load_from_string(&self, content: &Document, options: &Options) -> Result<Value> {
        if content.is_binary() != self.is_binary() {
            return Err(Error::ContentMismatch {
                type_id: self.type_id(),
                expected: if self.is_binary() { "binary" } else { "text" },
            });
        }

        let container = self.container_kind(options)?;
        if content.is_empty() {
            return Ok(Value::map());
        }

        let load_options = options.filter(self.load_option_names());
        let value = self.read_document(content.as_bytes(), &load_options)?;
        Ok(value.into_container(container))
    }

    fn load_from_stream(&self, stream: &mut dyn Read, options: &Options) -> Result<Value> {
        let container = self.container_kind(options)?;
        let load_options = options.filter(self.load_option_names());
        let value = self.read_stream(stream, &load_options)?;
        Ok(value.into_container(container))
    }

    fn load_from_path(&self, path: &Path, options: &Options) -> Result<Value> {
        if options.get_bool(AC_IGNORE_MISSING) && !path.exists() {
            debug!(path = %path.display(), "ignoring missing input");
            self.container_kind(options)?;
            return Ok(Value::map());
        }

        let mut reader = BufReader::new(File::open(path)?);
        self.load_from_stream(&mut reader, options)
    }

    fn dump_to_string(&self, value: &Value, options: &Options) -> Result<Document> {
        self.check_root(value)?;
        let dump_options = options.filter(self.dump_option_names());
        let encoded = self.write_document(value, &dump_options)?;

        if self.is_binary() {
            Ok(Document::Binary(encoded))
        } else {
            String::from_utf8(encoded)
                .map(Document::Text)
                .map_err(|e| Error::codec(self.type_id(), e))
        }
    }

    fn dump_to_stream(&self, value: &Value, stream: &mut dyn Write, options: &Options) -> Result<()> {
        self.check_root(value)?;
        let dump_options = options.filter(self.dump_option_names());
        self.write_stream(value, stream, &dump_options)
    }

    /// Dump to a file, creating missing parent directories first
    fn dump_to_path(&self, value: &Value, path: &Path, options: &Options) -> Result<()> {
        self.check_root(value)?;
        ensure_parent_dir(path)?;

        let mut writer = BufWriter::new(File::create(path)?);
        self.dump_to_stream(value, &mut writer, options)?;
        writer.flush()?;
        Ok(())
    }

    /// Reject non-mapping roots unless the format supports them
    fn check_root(&self, value: &Value) -> Result<()> {
        if !self.allows_primitive_root() && !value.is_map() {
            return Err(Error::PrimitiveRoot {
                type_id: self.type_id(),
                found: value.kind_name(),
            });
        }
        Ok(())
    }
}

impl fmt::Debug for dyn Parser {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Parser")
            .field("type_id", &self.type_id())
            .field("extensions", &self.extensions())
            .finish()
    }
}

/// View `content` as UTF-8 text for text backends
pub(crate) fn text<'a>(type_id: &'static str, content: &'a [u8]) -> Result<&'a str> {
    std::str::from_utf8(content).map_err(|e| Error::codec(type_id, e))
}

pub(crate) fn ensure_parent_dir(path: &Path) -> Result<()> {
    if let Some(outdir) = path.parent() {
        if !outdir.as_os_str().is_empty() && !outdir.exists() {
            debug!(outdir = %outdir.display(), "creating output directory");
            fs::create_dir_all(outdir)?;
        }
    }
    Ok(())
}
