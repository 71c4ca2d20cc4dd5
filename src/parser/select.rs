use super::{Parser, ParserRegistry, Registration};
use crate::error::{Error, Result};
use std::fmt;
use std::path::Path;
use std::sync::Arc;
use tracing::debug;

/// Caller override of extension-based backend inference
#[derive(Clone)]
pub enum ForcedType {
    /// Type id or alias to look up
    Type(String),
    /// Ready-made backend, used as-is
    Parser(Arc<dyn Parser>),
}

impl fmt::Debug for ForcedType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ForcedType::Type(type_id) => f.debug_tuple("Type").field(type_id).finish(),
            ForcedType::Parser(parser) => f.debug_tuple("Parser").field(&parser.type_id()).finish(),
        }
    }
}

impl From<&str> for ForcedType {
    fn from(type_id: &str) -> Self {
        ForcedType::Type(type_id.to_string())
    }
}

impl From<String> for ForcedType {
    fn from(type_id: String) -> Self {
        ForcedType::Type(type_id)
    }
}

impl From<Arc<dyn Parser>> for ForcedType {
    fn from(parser: Arc<dyn Parser>) -> Self {
        ForcedType::Parser(parser)
    }
}

impl ParserRegistry {
    /// Select exactly one backend
    ///
    /// Precedence:
    /// 1. a forced parser instance is returned unchanged
    /// 2. a forced type id is looked up by type
    /// 3. otherwise the extension of `path` decides
    ///
    /// Fails with `MissingInput` when there is neither a non-empty path nor
    /// a forced type. No fallback backend is ever guessed.
    pub fn select(&self, path: Option<&Path>, forced_type: Option<&ForcedType>) -> Result<Arc<dyn Parser>> {
        let parser = match forced_type {
            Some(ForcedType::Parser(parser)) => Arc::clone(parser),
            Some(ForcedType::Type(type_id)) => self
                .find_by_type(type_id)
                .map(Registration::instantiate)
                .ok_or_else(|| Error::UnknownParserType(type_id.clone()))?,
            None => {
                let path = path
                    .filter(|p| !p.as_os_str().is_empty())
                    .ok_or(Error::MissingInput)?;
                self.find_by_path(path)
                    .map(Registration::instantiate)
                    .ok_or_else(|| Error::UnknownFileType(path.display().to_string()))?
            }
        };

        debug!(type_id = parser.type_id(), ?forced_type, path = ?path, "selected parser");
        Ok(parser)
    }
}
