//! Resource identifiers
//!
//! An identifier locates a resource without pinning a version:
//!
//! ```text
//! [<type>] [[scheme://]registry/]<path>
//! ```
//!
//! The location takes one of three forms:
//! - full URI: `https://registry.example.com/path/to/resource`
//! - registry without scheme (`https` implied): `registry.example.com/path/to/resource`
//! - default registry: `namespace/name`, or just `name` in the default namespace

use std::borrow::Cow;
use std::fmt;
use std::str::FromStr;

use serde::{Serialize, Serializer};

use crate::error::{Cause, Error, Result};
use crate::parser::identifier::IdentifierParser;
use crate::parser::patterns::{NAME_PATTERN, TYPE_PATTERN};
use crate::registry::Registry;

/// Defaults applied when an identifier does not name a registry
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct IdentifierOptions {
    default_registry: Registry,
    default_namespace: String,
}

impl IdentifierOptions {
    /// Both values are required. A registry given without a scheme
    /// (`registry.example.com`) is assumed to be `https`.
    pub fn new(default_registry: &str, default_namespace: &str) -> Result<Self> {
        if default_registry.trim().is_empty() {
            return Err(Error::identifier(Cause::MissingDefaultRegistry));
        }
        if default_namespace.trim().is_empty() {
            return Err(Error::identifier(Cause::MissingDefaultNamespace));
        }
        if !NAME_PATTERN.is_match(default_namespace) {
            return Err(Error::identifier(Cause::InvalidNamespace));
        }

        Ok(Self {
            default_registry: Registry::parse(default_registry)?,
            default_namespace: default_namespace.to_string(),
        })
    }

    pub fn default_registry(&self) -> &Registry {
        &self.default_registry
    }

    pub fn default_namespace(&self) -> &str {
        &self.default_namespace
    }
}

/// Where in the registry the resource lives
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub(crate) enum Location {
    /// Default registry: `namespace/name`
    Default { namespace: String, name: String },
    /// Any other registry: free-form path
    Remote { path: String },
}

/// A parsed resource identifier
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct Identifier {
    resource_type: String,
    registry: Registry,
    location: Location,
}

impl Identifier {
    /// Parse an identifier string
    ///
    /// `context_type` is the resource type the caller expects. It is used when
    /// the string carries no type, and must match exactly when it does.
    pub fn parse(s: &str, context_type: &str, options: &IdentifierOptions) -> Result<Self> {
        IdentifierParser::tokenize(s, options).parse(context_type)
    }

    /// Like [`Identifier::parse`], but panics on error.
    ///
    /// Only meant for literals known to be valid at the call site.
    #[track_caller]
    pub fn must_parse(s: &str, context_type: &str, options: &IdentifierOptions) -> Self {
        Self::parse(s, context_type, options)
            .unwrap_or_else(|err| panic!("invalid identifier {s:?}: {err}"))
    }

    /// Build a default-form identifier (`namespace/name`) from its parts
    pub fn new(resource_type: &str, registry: &str, namespace: &str, name: &str) -> Result<Self> {
        if !TYPE_PATTERN.is_match(resource_type) {
            return Err(Error::identifier(Cause::InvalidContextType));
        }
        if !NAME_PATTERN.is_match(namespace) {
            return Err(Error::identifier(Cause::InvalidNamespace));
        }
        if !NAME_PATTERN.is_match(name) {
            return Err(Error::identifier(Cause::InvalidName));
        }

        Ok(Self::from_parts(
            resource_type,
            Registry::parse(registry)?,
            Location::Default {
                namespace: namespace.to_string(),
                name: name.to_string(),
            },
        ))
    }

    pub(crate) fn from_parts(resource_type: &str, registry: Registry, location: Location) -> Self {
        Self {
            resource_type: resource_type.to_string(),
            registry,
            location,
        }
    }

    /// Resource type, e.g. `template`
    pub fn resource_type(&self) -> &str {
        &self.resource_type
    }

    pub fn registry(&self) -> &Registry {
        &self.registry
    }

    /// Registry host as written, including the port if one is set
    pub fn host(&self) -> &str {
        self.registry.host()
    }

    /// Registry host without port
    pub fn hostname(&self) -> &str {
        self.registry.hostname()
    }

    /// Namespace, for default registry identifiers
    pub fn namespace(&self) -> Option<&str> {
        match &self.location {
            Location::Default { namespace, .. } => Some(namespace),
            Location::Remote { .. } => None,
        }
    }

    /// Resource name, for default registry identifiers
    pub fn name(&self) -> Option<&str> {
        match &self.location {
            Location::Default { name, .. } => Some(name),
            Location::Remote { .. } => None,
        }
    }

    /// `namespace/name` for default registry identifiers, the stored path
    /// otherwise
    pub fn path(&self) -> Cow<'_, str> {
        match &self.location {
            Location::Default { namespace, name } => Cow::Owned(format!("{namespace}/{name}")),
            Location::Remote { path } => Cow::Borrowed(path),
        }
    }

    /// Whether the identifier was resolved against the default registry
    pub fn is_default_registry(&self) -> bool {
        matches!(self.location, Location::Default { .. })
    }

    /// Registry URL and path, e.g. `https://registry.example.com/namespace/name`
    pub fn uri(&self) -> String {
        format!("{}/{}", self.registry, self.path())
    }
}

impl fmt::Display for Identifier {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} {}", self.resource_type, self.uri())
    }
}

impl Serialize for Identifier {
    fn serialize<S: Serializer>(&self, serializer: S) -> std::result::Result<S::Ok, S::Error> {
        serializer.collect_str(self)
    }
}

impl FromStr for IdentifierOptions {
    type Err = Error;

    /// Parse `registry namespace`
    fn from_str(s: &str) -> Result<Self> {
        let (registry, namespace) = s
            .trim()
            .split_once(char::is_whitespace)
            .ok_or_else(|| Error::identifier(Cause::MissingDefaultNamespace))?;
        Self::new(registry, namespace.trim())
    }
}
