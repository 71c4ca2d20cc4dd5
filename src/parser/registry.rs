use super::Parser;
use crate::backend;
use crate::paths::file_extension;
use indexmap::IndexMap;
use std::path::Path;
use std::sync::{Arc, OnceLock};
use tracing::debug;

/// Constructor producing a fresh backend instance
pub type ParserCtor = fn() -> Arc<dyn Parser>;

fn construct<P: Parser + Default + 'static>() -> Arc<dyn Parser> {
    Arc::new(P::default())
}

/// A backend "class": its constructor plus the metadata used for lookups
#[derive(Debug, Clone)]
pub struct Registration {
    type_id: &'static str,
    aliases: &'static [&'static str],
    /// Lower-cased, without the dot
    extensions: Vec<String>,
    priority: i32,
    ctor: ParserCtor,
}

impl Registration {
    /// Registration for a backend type constructed with `Default`
    pub fn of<P: Parser + Default + 'static>() -> Self {
        Self::from_ctor(construct::<P>)
    }

    /// Registration from a constructor; metadata is read from one sample instance
    pub fn from_ctor(ctor: ParserCtor) -> Self {
        let sample = ctor();
        Self {
            type_id: sample.type_id(),
            aliases: sample.aliases(),
            extensions: sample
                .extensions()
                .iter()
                .map(|ext| ext.trim_start_matches('.').to_lowercase())
                .collect(),
            priority: sample.priority(),
            ctor,
        }
    }

    pub fn type_id(&self) -> &'static str {
        self.type_id
    }

    pub fn aliases(&self) -> &'static [&'static str] {
        self.aliases
    }

    pub fn extensions(&self) -> &[String] {
        &self.extensions
    }

    pub fn priority(&self) -> i32 {
        self.priority
    }

    /// Build a new backend instance
    pub fn instantiate(&self) -> Arc<dyn Parser> {
        (self.ctor)()
    }
}

/// Mutable builder collecting registrations in call order
#[derive(Debug, Default)]
pub struct RegistryBuilder {
    registrations: Vec<Registration>,
    by_extension: IndexMap<String, Vec<usize>>,
    by_type: IndexMap<String, Vec<usize>>,
}

impl RegistryBuilder {
    pub fn new() -> Self {
        Self::default()
    }

    /// Register a backend type
    ///
    /// # Example
    /// ```ignore
    /// let mut builder = RegistryBuilder::new();
    /// builder.register::<JsonParser>().register::<YamlParser>();
    /// let registry = builder.build();
    /// ```
    pub fn register<P: Parser + Default + 'static>(&mut self) -> &mut Self {
        self.register_registration(Registration::of::<P>())
    }

    /// Append a registration to both indexes
    ///
    /// Earlier registrations for the same key are shadowed, never removed.
    pub fn register_registration(&mut self, registration: Registration) -> &mut Self {
        let index = self.registrations.len();

        for ext in &registration.extensions {
            self.by_extension.entry(ext.clone()).or_default().push(index);
        }

        let type_keys = std::iter::once(registration.type_id).chain(registration.aliases.iter().copied());
        for key in type_keys {
            self.by_type.entry(key.to_string()).or_default().push(index);
        }

        self.registrations.push(registration);
        self
    }

    /// Freeze into a read-only registry
    pub fn build(self) -> ParserRegistry {
        ParserRegistry {
            registrations: self.registrations,
            by_extension: self.by_extension,
            by_type: self.by_type,
        }
    }
}

/// Read-only lookup tables from file extension and type id to backends
#[derive(Debug)]
pub struct ParserRegistry {
    registrations: Vec<Registration>,
    /// Extension -> candidate indexes, in registration order
    by_extension: IndexMap<String, Vec<usize>>,
    /// Type id or alias -> candidate indexes, in registration order
    by_type: IndexMap<String, Vec<usize>>,
}

impl ParserRegistry {
    pub fn builder() -> RegistryBuilder {
        RegistryBuilder::new()
    }

    /// Backend registered for `ext` (with or without a leading dot, any case)
    pub fn find_by_extension(&self, ext: &str) -> Option<&Registration> {
        let key = ext.trim_start_matches('.').to_lowercase();
        self.pick(self.by_extension.get(&key))
    }

    /// Backend registered under `type_id` or an alias; exact match
    pub fn find_by_type(&self, type_id: &str) -> Option<&Registration> {
        self.pick(self.by_type.get(type_id))
    }

    /// Backend for the extension of `path`
    pub fn find_by_path(&self, path: &Path) -> Option<&Registration> {
        let ext = file_extension(path);
        if ext.is_empty() {
            return None;
        }
        self.find_by_extension(&ext)
    }

    /// Every registration claiming `ext`, oldest first
    pub fn candidates_by_extension(&self, ext: &str) -> Vec<&Registration> {
        let key = ext.trim_start_matches('.').to_lowercase();
        self.candidates(self.by_extension.get(&key))
    }

    /// Every registration claiming `type_id`, oldest first
    pub fn candidates_by_type(&self, type_id: &str) -> Vec<&Registration> {
        self.candidates(self.by_type.get(type_id))
    }

    pub fn registrations(&self) -> &[Registration] {
        &self.registrations
    }

    /// Number of registrations, shadowed ones included
    pub fn parser_count(&self) -> usize {
        self.registrations.len()
    }

    pub fn registered_extensions(&self) -> Vec<&str> {
        self.by_extension.keys().map(|s| s.as_str()).collect()
    }

    /// Type ids and aliases
    pub fn registered_types(&self) -> Vec<&str> {
        self.by_type.keys().map(|s| s.as_str()).collect()
    }

    fn candidates(&self, indexes: Option<&Vec<usize>>) -> Vec<&Registration> {
        indexes
            .map(|idx| idx.iter().map(|&i| &self.registrations[i]).collect())
            .unwrap_or_default()
    }

    // Highest priority wins; `max_by_key` keeps the last of equal maxima,
    // so ties go to the most recent registration.
    fn pick(&self, indexes: Option<&Vec<usize>>) -> Option<&Registration> {
        indexes?
            .iter()
            .map(|&i| &self.registrations[i])
            .max_by_key(|r| r.priority)
    }
}

static DEFAULT_REGISTRY: OnceLock<ParserRegistry> = OnceLock::new();

/// Process-wide registry of built-in and available optional backends
///
/// Built on first use and immutable afterwards.
pub fn default_registry() -> &'static ParserRegistry {
    DEFAULT_REGISTRY.get_or_init(|| {
        let mut builder = RegistryBuilder::new();
        backend::register_defaults(&mut builder);
        let registry = builder.build();
        debug!(
            parsers = registry.parser_count(),
            types = ?registry.registered_types(),
            "built default parser registry"
        );
        registry
    })
}
