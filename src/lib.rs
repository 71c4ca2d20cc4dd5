// Public API exports
pub mod api;
pub mod backend;
pub mod error;
pub mod input;
pub mod parser;
pub mod paths;
pub mod value;

// Re-export main types for convenience
pub use api::{dump, dumps, load, loads};

pub use error::{Error, Result};

pub use input::{Handle, Input, InputKind, Opener, PathObject};

pub use parser::{
    default_registry, Document, ForcedType, Options, Parser, ParserRegistry, Registration, RegistryBuilder,
};

pub use value::{MapKind, Mapping, Value};
