use std::fmt;
use std::fs::{self, File};
use std::io::{self, Read, Write};
use std::path::{Path, PathBuf};

/// Structured path value with its own open semantics
///
/// The default methods open the filesystem path returned by `to_path`,
/// creating missing parent directories before writing. Virtual or remote
/// path types override them.
pub trait PathObject {
    fn to_path(&self) -> PathBuf;

    fn open_read(&self) -> io::Result<Box<dyn Read>> {
        Ok(Box::new(File::open(self.to_path())?))
    }

    fn open_write(&self) -> io::Result<Box<dyn Write>> {
        let path = self.to_path();
        if let Some(parent) = path.parent().filter(|p| !p.as_os_str().is_empty()) {
            fs::create_dir_all(parent)?;
        }
        Ok(Box::new(File::create(path)?))
    }
}

impl PathObject for PathBuf {
    fn to_path(&self) -> PathBuf {
        self.clone()
    }
}

/// An already-open stream owned by the caller
pub enum Stream<'a> {
    Reader(&'a mut dyn Read),
    Writer(&'a mut dyn Write),
    /// Readable and writable; its path can often be recovered
    File(&'a mut File),
}

/// Every input or output target accepted by the resolver
pub enum Handle<'a> {
    None,
    PathStr(&'a str),
    PathObject(&'a dyn PathObject),
    Stream {
        stream: Stream<'a>,
        /// Caller-supplied path of the stream, if any
        name: Option<PathBuf>,
    },
}

impl<'a> Handle<'a> {
    pub fn reader(reader: &'a mut dyn Read) -> Self {
        Handle::Stream {
            stream: Stream::Reader(reader),
            name: None,
        }
    }

    pub fn writer(writer: &'a mut dyn Write) -> Self {
        Handle::Stream {
            stream: Stream::Writer(writer),
            name: None,
        }
    }

    pub fn file(file: &'a mut File) -> Self {
        Handle::Stream {
            stream: Stream::File(file),
            name: None,
        }
    }

    /// Attach a path to a stream handle; other handles are returned unchanged
    pub fn named(self, path: impl AsRef<Path>) -> Self {
        match self {
            Handle::Stream { stream, .. } => Handle::Stream {
                stream,
                name: Some(path.as_ref().to_path_buf()),
            },
            other => other,
        }
    }
}

impl<'a> From<&'a str> for Handle<'a> {
    fn from(path: &'a str) -> Self {
        Handle::PathStr(path)
    }
}

impl<'a> From<&'a String> for Handle<'a> {
    fn from(path: &'a String) -> Self {
        Handle::PathStr(path.as_str())
    }
}

impl<'a> From<&'a PathBuf> for Handle<'a> {
    fn from(path: &'a PathBuf) -> Self {
        Handle::PathObject(path)
    }
}

impl<'a> From<&'a mut File> for Handle<'a> {
    fn from(file: &'a mut File) -> Self {
        Handle::file(file)
    }
}

impl<'a, T: Into<Handle<'a>>> From<Option<T>> for Handle<'a> {
    fn from(handle: Option<T>) -> Self {
        handle.map(Into::into).unwrap_or(Handle::None)
    }
}

impl fmt::Debug for Handle<'_> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Handle::None => f.write_str("None"),
            Handle::PathStr(path) => f.debug_tuple("PathStr").field(path).finish(),
            Handle::PathObject(obj) => f.debug_tuple("PathObject").field(&obj.to_path()).finish(),
            Handle::Stream { stream, name } => {
                let kind = match stream {
                    Stream::Reader(_) => "reader",
                    Stream::Writer(_) => "writer",
                    Stream::File(_) => "file",
                };
                f.debug_struct("Stream").field("kind", &kind).field("name", name).finish()
            }
        }
    }
}
