//! Registry addresses
//!
//! A registry is kept as the scheme and authority text it was written with.
//! Hosts are not case-folded and explicit ports stay, even default ones, so
//! `https://Registry.Example.COM:443` renders back unchanged.

use std::fmt;

use serde::{Serialize, Serializer};
use url::Url;

use crate::error::{Cause, Error, Result};
use crate::parser::patterns::SCHEME_PATTERN;

/// Scheme assumed when a registry is written without one
pub const DEFAULT_SCHEME: &str = "https";

#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct Registry {
    scheme: String,
    authority: String,
    base_path: String,
}

impl Registry {
    /// Parse a configured registry such as `https://registry.example.com/api`
    /// or `registry.example.com:5000`
    ///
    /// The authority only has to be non-empty and free of whitespace and
    /// userinfo; a port, when present, must be numeric.
    pub fn parse(s: &str) -> Result<Self> {
        let s = s.trim();
        let (scheme, rest) = s.split_once("://").unwrap_or((DEFAULT_SCHEME, s));
        if !SCHEME_PATTERN.is_match(scheme) {
            return Err(Error::identifier(Cause::InvalidRegistry));
        }

        let (authority, base_path) = rest.split_once('/').unwrap_or((rest, ""));
        if !is_valid_authority(authority) {
            return Err(Error::identifier(Cause::InvalidRegistry));
        }

        Ok(Self {
            scheme: scheme.to_string(),
            authority: authority.to_string(),
            base_path: base_path.trim_matches('/').to_string(),
        })
    }

    /// Registry from parts already checked by the identifier parser
    pub(crate) fn remote(scheme: &str, authority: &str) -> Self {
        Self {
            scheme: scheme.to_string(),
            authority: authority.to_string(),
            base_path: String::new(),
        }
    }

    pub fn scheme(&self) -> &str {
        &self.scheme
    }

    /// Host as written, including the port if one is set
    pub fn host(&self) -> &str {
        &self.authority
    }

    /// Host without port
    pub fn hostname(&self) -> &str {
        match split_port(&self.authority) {
            Some((hostname, _)) => hostname,
            None => &self.authority,
        }
    }

    pub fn port(&self) -> Option<u16> {
        split_port(&self.authority).and_then(|(_, port)| port.parse().ok())
    }

    /// Path below the host for registries served under a prefix, without
    /// surrounding slashes
    pub fn base_path(&self) -> &str {
        &self.base_path
    }

    /// Convert to a [`Url`] for callers that need to talk to the registry
    ///
    /// URL parsing normalizes the host, so the result may not render the same
    /// as the registry itself.
    pub fn to_url(&self) -> Result<Url> {
        Url::parse(&self.to_string()).map_err(|_| Error::identifier(Cause::InvalidRegistry))
    }
}

/// Split `host:port` when the suffix after the last colon is a port
fn split_port(authority: &str) -> Option<(&str, &str)> {
    authority
        .rsplit_once(':')
        .filter(|(_, port)| !port.is_empty() && port.bytes().all(|b| b.is_ascii_digit()))
}

fn is_valid_authority(authority: &str) -> bool {
    let hostname = match authority.rsplit_once(':') {
        Some((hostname, port)) if !port.ends_with(']') => {
            if port.is_empty() || !port.bytes().all(|b| b.is_ascii_digit()) {
                return false;
            }
            hostname
        }
        _ => authority,
    };

    !hostname.is_empty()
        && !authority
            .chars()
            .any(|c| c.is_whitespace() || matches!(c, '@' | '?' | '#'))
}

impl fmt::Display for Registry {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}://{}", self.scheme, self.authority)?;
        if !self.base_path.is_empty() {
            write!(f, "/{}", self.base_path)?;
        }
        Ok(())
    }
}

impl Serialize for Registry {
    fn serialize<S: Serializer>(&self, serializer: S) -> std::result::Result<S::Ok, S::Error> {
        serializer.collect_str(self)
    }
}
