//! Reference parser
//!
//! Splits the token stream into location tokens, a version constraint or
//! channel, and an optional digest.

use tracing::debug;

use crate::digest::Digest;
use crate::error::{Cause, Error, Result};
use crate::identifier::IdentifierOptions;
use crate::parser::cursor::TokenCursor;
use crate::parser::identifier::IdentifierParser;
use crate::parser::patterns::{CHANNEL_PATTERN, DIGEST_PATTERN, looks_like_version};
use crate::reference::{Reference, Target};
use crate::version::VersionConstraint;

pub(crate) struct ReferenceParser<'a> {
    cursor: TokenCursor<'a>,
    options: &'a IdentifierOptions,
}

impl<'a> ReferenceParser<'a> {
    pub(crate) fn tokenize(input: &'a str, options: &'a IdentifierOptions) -> Self {
        Self {
            cursor: TokenCursor::tokenize(input),
            options,
        }
    }

    pub(crate) fn parse(mut self, context_type: &str) -> Result<Reference> {
        let end = self.cursor.position(is_identifier_boundary);
        if end == 0 {
            return Err(Error::reference(Cause::EmptyReference));
        }

        let identifier =
            IdentifierParser::new(self.cursor.take_until(end), self.options).parse(context_type)?;
        let target = self.parse_target()?;
        let digest = self.parse_digest()?;

        if let Some(tok) = self.cursor.peek() {
            return Err(Error::reference(Cause::UnexpectedToken(tok.to_string())));
        }

        let reference = Reference::from_parts(identifier, target, digest);
        debug!("Parsed reference: {}", reference);
        Ok(reference)
    }

    /// A channel token, or every token up to a digest joined into a
    /// version constraint
    fn parse_target(&mut self) -> Result<Target> {
        let tok = self
            .cursor
            .peek()
            .ok_or_else(|| Error::reference(Cause::MissingVersionOrChannel))?;

        if let Some(channel) = channel_name(tok) {
            self.cursor.next();
            return Ok(Target::Channel(channel.to_string()));
        }

        let end = self.cursor.position(|tok| DIGEST_PATTERN.is_match(tok));
        let version_tokens: Vec<&str> = self.cursor.take_until(end).collect();
        if version_tokens.is_empty() {
            return Err(Error::reference(Cause::MissingVersionOrChannel));
        }

        let constraint = VersionConstraint::parse(&version_tokens.join(" "))?;
        Ok(Target::Version(constraint))
    }

    fn parse_digest(&mut self) -> Result<Option<Digest>> {
        match self.cursor.peek() {
            Some(tok) if DIGEST_PATTERN.is_match(tok) => {
                self.cursor.next();
                Digest::parse(tok).map(Some)
            }
            _ => Ok(None),
        }
    }
}

/// The identifier ends at the first channel, digest or version-like token
fn is_identifier_boundary(tok: &str) -> bool {
    CHANNEL_PATTERN.is_match(tok) || DIGEST_PATTERN.is_match(tok) || looks_like_version(tok)
}

/// Channel name without its `:` prefix, if `tok` is a channel
pub(crate) fn channel_name(tok: &str) -> Option<&str> {
    if CHANNEL_PATTERN.is_match(tok) {
        tok.strip_prefix(':')
    } else {
        None
    }
}
