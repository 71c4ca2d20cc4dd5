//! Format backends and the default registration order.
//!
//! Built-in backends are always compiled. Optional backends sit behind
//! cargo features; a compiled-out backend is skipped with a warning and
//! never fails the registry build.

mod ini;
mod json;
mod pickle;
mod properties;
mod shellvars;
mod xml;

#[cfg(feature = "bson")]
mod bson;
#[cfg(feature = "cbor")]
mod cbor;
#[cfg(feature = "json5")]
mod json5;
#[cfg(feature = "msgpack")]
mod msgpack;
#[cfg(feature = "toml")]
mod toml;
#[cfg(feature = "yaml")]
mod yaml;

#[cfg(test)]
mod tests;

pub use ini::IniParser;
pub use json::JsonParser;
pub use pickle::PickleParser;
pub use properties::PropertiesParser;
pub use shellvars::ShellVarsParser;
pub use xml::XmlParser;

#[cfg(feature = "bson")]
pub use self::bson::BsonParser;
#[cfg(feature = "cbor")]
pub use cbor::CborParser;
#[cfg(feature = "json5")]
pub use self::json5::Json5Parser;
#[cfg(feature = "msgpack")]
pub use msgpack::MsgPackParser;
#[cfg(feature = "toml")]
pub use self::toml::TomlParser;
#[cfg(feature = "yaml")]
pub use yaml::YamlParser;

use crate::parser::options::AC_PARSE_VALUE;
use crate::parser::{Options, Registration, RegistryBuilder};
use crate::value::{parse_scalar, Value};
use std::borrow::Cow;
use tracing::warn;

/// Backend whose codec crate may be compiled out
struct OptionalBackend {
    /// Codec crate name
    module: &'static str,
    /// Human-readable format name
    format: &'static str,
    register: fn() -> Option<Registration>,
}

const OPTIONAL_BACKENDS: &[OptionalBackend] = &[
    OptionalBackend {
        module: "serde_yaml",
        format: "YAML",
        register: register_yaml,
    },
    OptionalBackend {
        module: "toml",
        format: "TOML",
        register: register_toml,
    },
    OptionalBackend {
        module: "rmp-serde",
        format: "MessagePack",
        register: register_msgpack,
    },
    OptionalBackend {
        module: "ciborium",
        format: "CBOR",
        register: register_cbor,
    },
    OptionalBackend {
        module: "bson",
        format: "BSON",
        register: register_bson,
    },
    OptionalBackend {
        module: "json5",
        format: "JSON5",
        register: register_json5,
    },
];

/// Register built-ins, then every optional backend compiled into this build
pub fn register_defaults(builder: &mut RegistryBuilder) {
    builder
        .register::<IniParser>()
        .register::<PickleParser>()
        .register::<PropertiesParser>()
        .register::<ShellVarsParser>()
        .register::<XmlParser>()
        .register::<JsonParser>();

    for backend in OPTIONAL_BACKENDS {
        match (backend.register)() {
            Some(registration) => {
                builder.register_registration(registration);
            }
            None => warn!(
                "'{}' module is not available. Disabled {} support.",
                backend.module, backend.format
            ),
        }
    }
}

fn register_yaml() -> Option<Registration> {
    #[cfg(feature = "yaml")]
    return Some(Registration::of::<YamlParser>());
    #[cfg(not(feature = "yaml"))]
    None
}

fn register_toml() -> Option<Registration> {
    #[cfg(feature = "toml")]
    return Some(Registration::of::<TomlParser>());
    #[cfg(not(feature = "toml"))]
    None
}

fn register_msgpack() -> Option<Registration> {
    #[cfg(feature = "msgpack")]
    return Some(Registration::of::<MsgPackParser>());
    #[cfg(not(feature = "msgpack"))]
    None
}

fn register_cbor() -> Option<Registration> {
    #[cfg(feature = "cbor")]
    return Some(Registration::of::<CborParser>());
    #[cfg(not(feature = "cbor"))]
    None
}

fn register_bson() -> Option<Registration> {
    #[cfg(feature = "bson")]
    return Some(Registration::of::<BsonParser>());
    #[cfg(not(feature = "bson"))]
    None
}

fn register_json5() -> Option<Registration> {
    #[cfg(feature = "json5")]
    return Some(Registration::of::<Json5Parser>());
    #[cfg(not(feature = "json5"))]
    None
}

/// Apply the `sort_keys` dump option
fn sorted_if_requested<'v>(value: &'v Value, options: &Options) -> Cow<'v, Value> {
    if options.get_bool("sort_keys") {
        let mut sorted = value.clone();
        sorted.sort_keys();
        Cow::Owned(sorted)
    } else {
        Cow::Borrowed(value)
    }
}

/// Scalar from a string-only format, typed when `ac_parse_value` is set
fn string_value(raw: &str, options: &Options) -> Value {
    if options.get_bool(AC_PARSE_VALUE) {
        parse_scalar(raw)
    } else {
        Value::String(raw.to_string())
    }
}
