//! Resource references
//!
//! A reference is an identifier plus either a version constraint or a
//! channel, optionally frozen to exact content by a digest:
//!
//! ```text
//! [<type>] [[scheme://]registry/]<path> (<version-constraint> | :<channel>) [<digest>]
//! ```
//!
//! Version constraints may span several tokens (`>=1.0.0 <2.0.0`). Channels
//! are the only way to select prerelease content.

use std::fmt;

use serde::{Serialize, Serializer};

use crate::digest::Digest;
use crate::error::{Cause, Error, Result};
use crate::identifier::{Identifier, IdentifierOptions};
use crate::parser::reference::{ReferenceParser, channel_name};
use crate::version::VersionConstraint;

/// What a reference selects within its resource
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub enum Target {
    /// Any release matching a constraint
    Version(VersionConstraint),
    /// A named release track, e.g. `stable`
    Channel(String),
}

impl fmt::Display for Target {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Target::Version(constraint) => write!(f, "{constraint}"),
            Target::Channel(channel) => write!(f, ":{channel}"),
        }
    }
}

/// A parsed resource reference
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct Reference {
    identifier: Identifier,
    target: Target,
    digest: Option<Digest>,
}

impl Reference {
    /// Parse a reference string
    ///
    /// `context_type` is used when the string carries no type, and must match
    /// exactly when it does.
    pub fn parse(s: &str, context_type: &str, options: &IdentifierOptions) -> Result<Self> {
        ReferenceParser::tokenize(s, options).parse(context_type)
    }

    /// Like [`Reference::parse`], but panics on error.
    ///
    /// Only meant for literals known to be valid at the call site.
    #[track_caller]
    pub fn must_parse(s: &str, context_type: &str, options: &IdentifierOptions) -> Self {
        Self::parse(s, context_type, options)
            .unwrap_or_else(|err| panic!("invalid reference {s:?}: {err}"))
    }

    /// Build a reference from already parsed parts
    ///
    /// `version_or_channel` is a channel when it is exactly a channel token
    /// (`:stable`, no surrounding whitespace), and is parsed as a version
    /// constraint otherwise.
    pub fn new(
        identifier: Identifier,
        version_or_channel: &str,
        digest: Option<Digest>,
    ) -> Result<Self> {
        let target = match channel_name(version_or_channel) {
            Some(channel) => Target::Channel(channel.to_string()),
            None if version_or_channel.trim().is_empty() => {
                return Err(Error::reference(Cause::MissingVersionOrChannel));
            }
            None => Target::Version(VersionConstraint::parse(version_or_channel)?),
        };

        Ok(Self::from_parts(identifier, target, digest))
    }

    pub(crate) fn from_parts(identifier: Identifier, target: Target, digest: Option<Digest>) -> Self {
        Self {
            identifier,
            target,
            digest,
        }
    }

    pub fn identifier(&self) -> &Identifier {
        &self.identifier
    }

    pub fn target(&self) -> &Target {
        &self.target
    }

    /// Version constraint, unless the reference is channel based
    pub fn version(&self) -> Option<&VersionConstraint> {
        match &self.target {
            Target::Version(constraint) => Some(constraint),
            Target::Channel(_) => None,
        }
    }

    /// Channel name without the `:` prefix, unless the reference is version
    /// based
    pub fn channel(&self) -> Option<&str> {
        match &self.target {
            Target::Channel(channel) => Some(channel),
            Target::Version(_) => None,
        }
    }

    pub fn digest(&self) -> Option<&Digest> {
        self.digest.as_ref()
    }

    /// Whether a digest pins the reference to exact content
    pub fn is_frozen(&self) -> bool {
        self.digest.is_some()
    }

    pub fn is_channel_based(&self) -> bool {
        matches!(self.target, Target::Channel(_))
    }

    pub fn is_version_based(&self) -> bool {
        matches!(self.target, Target::Version(_))
    }
}

impl fmt::Display for Reference {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} {}", self.identifier, self.target)?;
        if let Some(digest) = &self.digest {
            write!(f, " {digest}")?;
        }
        Ok(())
    }
}

impl Serialize for Reference {
    fn serialize<S: Serializer>(&self, serializer: S) -> std::result::Result<S::Ok, S::Error> {
        serializer.collect_str(self)
    }
}
