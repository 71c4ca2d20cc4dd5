mod handle;


pub use handle::{Handle, PathObject, Stream};

use crate::error::{Error, Result};
use crate::parser::{ensure_parent_dir, ForcedType, Parser, ParserRegistry};
use crate::paths::{normalize, path_of_file};
use std::fmt;
use std::fs::File;
use std::io::{Read, Write};
use std::path::{Path, PathBuf};
use std::sync::Arc;

/// Classification of a caller-supplied input handle
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum InputKind {
    None,
    PathString,
    PathObject,
    Stream,
}

/// How an [`Input`] yields an open stream
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Opener {
    /// Nothing to open
    Noop,
    /// `File::open` / `File::create` on the normalized path
    Filesystem,
    /// The path object's own open methods
    PathObject,
    /// The caller's stream, handed back as-is
    Identity,
}

/// Canonical descriptor of an input or output target
pub struct Input<'a> {
    source: Handle<'a>,
    kind: InputKind,
    path: Option<PathBuf>,
    parser: Option<Arc<dyn Parser>>,
    opener: Opener,
}

/// Classify a handle; total over every [`Handle`]
pub fn classify(handle: &Handle<'_>) -> InputKind {
    match handle {
        Handle::None => InputKind::None,
        Handle::PathStr(_) => InputKind::PathString,
        Handle::PathObject(_) => InputKind::PathObject,
        Handle::Stream { .. } => InputKind::Stream,
    }
}

/// Resolve a handle into a descriptor without selecting a parser
pub fn resolve(handle: Handle<'_>) -> Result<Input<'_>> {
    let kind = classify(&handle);

    let (path, opener) = match &handle {
        Handle::None => (None, Opener::Noop),
        Handle::PathStr(raw) if raw.is_empty() => (None, Opener::Filesystem),
        Handle::PathStr(raw) => (Some(normalize(Path::new(raw))?), Opener::Filesystem),
        Handle::PathObject(obj) => (Some(normalize(&obj.to_path())?), Opener::PathObject),
        Handle::Stream { stream, name } => {
            let recovered = match (name, stream) {
                (Some(name), _) => Some(normalize(name)?),
                (None, Stream::File(file)) => path_of_file(file),
                (None, _) => None,
            };
            (recovered, Opener::Identity)
        }
    };

    Ok(Input {
        source: handle,
        kind,
        path,
        parser: None,
        opener,
    })
}

impl<'a> Input<'a> {
    /// Resolve `handle` and select its parser from `registry`
    ///
    /// Fails with `MissingInput` when there is no handle and no forced type.
    pub fn make(
        handle: Handle<'a>,
        registry: &ParserRegistry,
        forced_type: Option<&ForcedType>,
    ) -> Result<Self> {
        if matches!(handle, Handle::None) && forced_type.is_none() {
            return Err(Error::MissingInput);
        }

        let mut input = resolve(handle)?;
        let parser = registry.select(input.path.as_deref(), forced_type)?;
        input.parser = Some(parser);
        Ok(input)
    }

    /// The handle as given by the caller
    pub fn source(&self) -> &Handle<'a> {
        &self.source
    }

    pub fn kind(&self) -> InputKind {
        self.kind
    }

    /// Normalized absolute path, when one is known
    pub fn path(&self) -> Option<&Path> {
        self.path.as_deref()
    }

    pub fn parser(&self) -> Option<&Arc<dyn Parser>> {
        self.parser.as_ref()
    }

    pub fn opener(&self) -> Opener {
        self.opener
    }

    /// True when the target is a path that does not exist yet
    pub fn is_missing_path(&self) -> bool {
        matches!(self.kind, InputKind::PathString | InputKind::PathObject)
            && self.path.as_deref().is_some_and(|p| !p.exists())
    }

    /// Open for reading; `None` for the `None` kind
    ///
    /// Streams are returned as borrowed, never reopened.
    pub fn open_read(&mut self) -> Result<Option<Box<dyn Read + '_>>> {
        match &mut self.source {
            Handle::None => Ok(None),
            Handle::PathStr(_) => {
                let path = self.path.as_deref().ok_or(Error::MissingInput)?;
                Ok(Some(Box::new(File::open(path)?)))
            }
            Handle::PathObject(obj) => Ok(Some(obj.open_read()?)),
            Handle::Stream { stream, .. } => match stream {
                Stream::Reader(reader) => Ok(Some(Box::new(&mut **reader))),
                Stream::File(file) => Ok(Some(Box::new(&mut **file))),
                Stream::Writer(_) => Err(Error::StreamDirection("reading")),
            },
        }
    }

    /// Open for writing; `None` for the `None` kind
    ///
    /// Filesystem paths get their parent directories created first.
    pub fn open_write(&mut self) -> Result<Option<Box<dyn Write + '_>>> {
        match &mut self.source {
            Handle::None => Ok(None),
            Handle::PathStr(_) => {
                let path = self.path.as_deref().ok_or(Error::MissingInput)?;
                ensure_parent_dir(path)?;
                Ok(Some(Box::new(File::create(path)?)))
            }
            Handle::PathObject(obj) => Ok(Some(obj.open_write()?)),
            Handle::Stream { stream, .. } => match stream {
                Stream::Writer(writer) => Ok(Some(Box::new(&mut **writer))),
                Stream::File(file) => Ok(Some(Box::new(&mut **file))),
                Stream::Reader(_) => Err(Error::StreamDirection("writing")),
            },
        }
    }
}

impl fmt::Debug for Input<'_> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Input")
            .field("source", &self.source)
            .field("kind", &self.kind)
            .field("path", &self.path)
            .field("parser", &self.parser.as_ref().map(|p| p.type_id()))
            .field("opener", &self.opener)
            .finish()
    }
}
