//! Identifier parser
//!
//! Consumes an optional type token and exactly one location token.

use tracing::debug;

use crate::error::{Cause, Error, ErrorKind, Result};
use crate::identifier::{Identifier, IdentifierOptions, Location};
use crate::parser::cursor::TokenCursor;
use crate::parser::patterns::{
    NAME_PATTERN, PATH_PATTERN, REGISTRY_PATTERN, SCHEME_PATTERN, TYPE_PATTERN, looks_like_registry,
};
use crate::registry::{DEFAULT_SCHEME, Registry};

pub(crate) struct IdentifierParser<'a> {
    cursor: TokenCursor<'a>,
    options: &'a IdentifierOptions,
}

impl<'a> IdentifierParser<'a> {
    pub(crate) fn new(cursor: TokenCursor<'a>, options: &'a IdentifierOptions) -> Self {
        Self { cursor, options }
    }

    pub(crate) fn tokenize(input: &'a str, options: &'a IdentifierOptions) -> Self {
        Self::new(TokenCursor::tokenize(input), options)
    }

    pub(crate) fn parse(mut self, context_type: &str) -> Result<Identifier> {
        if !TYPE_PATTERN.is_match(context_type) {
            return Err(Error::identifier(Cause::InvalidContextType));
        }
        if self.cursor.is_empty() {
            return Err(Error::identifier(Cause::EmptyIdentifier));
        }

        self.parse_type(context_type)?;
        let (registry, location) = self.parse_location()?;

        if let Some(tok) = self.cursor.peek() {
            return Err(Error::identifier(Cause::UnexpectedToken(tok.to_string())));
        }

        let id = Identifier::from_parts(context_type, registry, location);
        debug!("Parsed identifier: {}", id);
        Ok(id)
    }

    /// Consume the type token if there is one
    ///
    /// A lowercase word is only a type when another token follows that looks
    /// like a path or registry; a lone token is always the location.
    fn parse_type(&mut self, context_type: &str) -> Result<()> {
        let Some(tok) = self.cursor.peek() else {
            return Ok(());
        };
        if !TYPE_PATTERN.is_match(tok) || self.cursor.remaining() < 2 {
            return Ok(());
        }

        let is_type = self
            .cursor
            .peek_ahead(1)
            .is_some_and(|next| next.contains('/') || looks_like_registry(next));
        if !is_type {
            return Ok(());
        }

        if tok != context_type {
            return Err(Error::new(
                ErrorKind::TypeMismatch,
                Cause::TypeMismatch {
                    found: tok.to_string(),
                    expected: context_type.to_string(),
                },
            ));
        }
        self.cursor.next();

        Ok(())
    }

    fn parse_location(&mut self) -> Result<(Registry, Location)> {
        let tok = self
            .cursor
            .next()
            .ok_or_else(|| Error::identifier(Cause::EmptyIdentifier))?;

        if let Some((scheme, rest)) = tok.split_once("://") {
            return parse_uri(scheme, rest);
        }

        if let Some((first, rest)) = tok.split_once('/')
            && looks_like_registry(first)
        {
            return parse_registry_path(first, rest);
        }

        self.parse_default_path(tok)
    }

    /// `namespace/name` or `name` in the default registry
    fn parse_default_path(&self, tok: &str) -> Result<(Registry, Location)> {
        let (namespace, name) = match tok.split_once('/') {
            Some((namespace, name)) => {
                if !NAME_PATTERN.is_match(namespace) {
                    return Err(Error::identifier(Cause::InvalidNamespace));
                }
                (namespace, name)
            }
            None => (self.options.default_namespace(), tok),
        };

        if !NAME_PATTERN.is_match(name) {
            return Err(Error::identifier(Cause::InvalidName));
        }

        Ok((
            self.options.default_registry().clone(),
            Location::Default {
                namespace: namespace.to_string(),
                name: name.to_string(),
            },
        ))
    }
}

/// `scheme://registry/path`
fn parse_uri(scheme: &str, rest: &str) -> Result<(Registry, Location)> {
    if !SCHEME_PATTERN.is_match(scheme) {
        return Err(Error::identifier(Cause::InvalidScheme));
    }

    let (registry, path) = match rest.split_once('/') {
        Some((registry, _)) if registry.is_empty() => {
            return Err(Error::identifier(Cause::MissingRegistry));
        }
        Some((_, "")) => return Err(Error::identifier(Cause::MissingPath)),
        Some(parts) => parts,
        None => return Err(Error::identifier(Cause::MissingRegistry)),
    };
    if !REGISTRY_PATTERN.is_match(registry) {
        return Err(Error::identifier(Cause::InvalidRegistry));
    }

    remote(scheme, registry, path)
}

/// `registry/path`, scheme defaults to `https`
fn parse_registry_path(registry: &str, path: &str) -> Result<(Registry, Location)> {
    if !REGISTRY_PATTERN.is_match(registry) {
        return Err(Error::identifier(Cause::InvalidRegistry));
    }
    if path.is_empty() {
        return Err(Error::identifier(Cause::EmptyPath));
    }

    remote(DEFAULT_SCHEME, registry, path)
}

/// Registry text has already matched the host pattern; it is kept as written
fn remote(scheme: &str, registry: &str, path: &str) -> Result<(Registry, Location)> {
    if !PATH_PATTERN.is_match(path) {
        return Err(Error::identifier(Cause::InvalidPath));
    }

    Ok((
        Registry::remote(scheme, registry),
        Location::Remote {
            path: path.to_string(),
        },
    ))
}
