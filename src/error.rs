use thiserror::Error;

/// Boxed error from a wrapped codec crate
pub type CodecError = Box<dyn std::error::Error + Send + Sync>;

#[derive(Error, Debug)]
pub enum Error {
    #[error("No parser found for file '{0}'")]
    UnknownFileType(String),

    #[error("No parser found for type '{0}'")]
    UnknownParserType(String),

    #[error("Either an input path or a forced parser type must be given")]
    MissingInput,

    #[error("Options {} of '{type_id}' are mutually exclusive", options.join(", "))]
    ConflictingDictOptions {
        type_id: &'static str,
        options: Vec<String>,
    },

    #[error("Invalid value for option '{name}': {reason}")]
    InvalidOption { name: String, reason: String },

    #[error("'{type_id}' expects {expected} content")]
    ContentMismatch {
        type_id: &'static str,
        expected: &'static str,
    },

    #[error("'{type_id}' requires a mapping at the document root, got {found}")]
    PrimitiveRoot {
        type_id: &'static str,
        found: &'static str,
    },

    #[error("Stream cannot be opened for {0}")]
    StreamDirection(&'static str),

    #[error("Failed to process '{type_id}' data: {source}")]
    Codec {
        type_id: &'static str,
        #[source]
        source: CodecError,
    },

    #[error("'{type_id}' cannot represent this data: {message}")]
    Unsupported {
        type_id: &'static str,
        message: String,
    },

    #[error("Invalid path pattern: {0}")]
    Pattern(#[from] globset::Error),

    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),
}

impl Error {
    /// Wrap an error raised by the codec crate behind `type_id`
    pub fn codec(type_id: &'static str, source: impl Into<CodecError>) -> Self {
        Error::Codec {
            type_id,
            source: source.into(),
        }
    }

    pub fn unsupported(type_id: &'static str, message: impl Into<String>) -> Self {
        Error::Unsupported {
            type_id,
            message: message.into(),
        }
    }
}

pub type Result<T> = std::result::Result<T, Error>;
