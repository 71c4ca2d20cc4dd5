//! One-call load/dump entry points over the default registry.

use crate::error::{Error, Result};
use crate::input::{Handle, Input, Opener};
use crate::parser::options::AC_IGNORE_MISSING;
use crate::parser::{default_registry, Document, ForcedType, Options, Parser};
use crate::value::Value;
use std::io::Write;
use std::sync::Arc;
use tracing::debug;

fn selected(input: &Input<'_>) -> Result<Arc<dyn Parser>> {
    input.parser().cloned().ok_or(Error::MissingInput)
}

/// Load a document from a path, path object or stream
///
/// The backend comes from `forced_type` when given, otherwise from the
/// path's extension. With `ac_ignore_missing` set, a missing path yields
/// an empty mapping.
///
/// # Example
/// ```ignore
/// let cfg = polyconf::load("/etc/app/config.toml", None, &Options::new())?;
/// ```
pub fn load<'a>(handle: impl Into<Handle<'a>>, forced_type: Option<&ForcedType>, options: &Options) -> Result<Value> {
    let mut input = Input::make(handle.into(), default_registry(), forced_type)?;
    let parser = selected(&input)?;
    let path = input.path().map(|p| p.to_path_buf());

    match (input.opener(), path) {
        (Opener::Filesystem, Some(path)) => parser.load_from_path(&path, options),
        (Opener::PathObject, Some(path)) if input.is_missing_path() && options.get_bool(AC_IGNORE_MISSING) => {
            debug!(path = %path.display(), "ignoring missing input");
            parser.container_kind(options)?;
            Ok(Value::map())
        }
        _ => {
            let mut stream = input.open_read()?.ok_or(Error::MissingInput)?;
            parser.load_from_stream(&mut *stream, options)
        }
    }
}

/// Load from in-memory content with an explicitly chosen backend
pub fn loads(content: impl Into<Document>, forced_type: &ForcedType, options: &Options) -> Result<Value> {
    let input = Input::make(Handle::None, default_registry(), Some(forced_type))?;
    selected(&input)?.load_from_string(&content.into(), options)
}

/// Dump `value` to a path, path object or writable stream
///
/// Missing parent directories of filesystem paths are created.
pub fn dump<'a>(
    value: &Value,
    handle: impl Into<Handle<'a>>,
    forced_type: Option<&ForcedType>,
    options: &Options,
) -> Result<()> {
    let mut input = Input::make(handle.into(), default_registry(), forced_type)?;
    let parser = selected(&input)?;
    let path = input.path().map(|p| p.to_path_buf());

    match (input.opener(), path) {
        (Opener::Filesystem, Some(path)) => parser.dump_to_path(value, &path, options),
        _ => {
            let mut stream = input.open_write()?.ok_or(Error::MissingInput)?;
            parser.dump_to_stream(value, &mut *stream, options)?;
            stream.flush()?;
            Ok(())
        }
    }
}

/// Dump to an in-memory document with an explicitly chosen backend
pub fn dumps(value: &Value, forced_type: &ForcedType, options: &Options) -> Result<Document> {
    let input = Input::make(Handle::None, default_registry(), Some(forced_type))?;
    selected(&input)?.dump_to_string(value, options)
}
