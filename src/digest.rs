//! Content digests (`algorithm:hash`)
//!
//! Only the shape is checked here. Whether the hash actually matches some
//! content is up to whoever holds the content.

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

use crate::error::{Cause, Error, Result};

/// A content digest pinning a reference to exact content
///
/// Both parts are stored lowercase. Comparing `Option<Digest>` values gives
/// the usual "both absent are equal" semantics for free.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(try_from = "String", into = "String")]
pub struct Digest {
    algorithm: String,
    hash: String,
}

impl Digest {
    /// Parse `algorithm:hash`, splitting on the first colon
    pub fn parse(s: &str) -> Result<Self> {
        let (algorithm, hash) = s
            .trim()
            .split_once(':')
            .ok_or_else(|| Error::digest(Cause::MissingDigestColon))?;

        Self::new(algorithm, hash)
    }

    /// Build a digest from its parts, normalizing them to lowercase
    pub fn new(algorithm: &str, hash: &str) -> Result<Self> {
        if algorithm.is_empty() {
            return Err(Error::digest(Cause::EmptyDigestAlgorithm));
        }
        if hash.is_empty() {
            return Err(Error::digest(Cause::EmptyDigestHash));
        }

        Ok(Self {
            algorithm: algorithm.to_lowercase(),
            hash: hash.to_lowercase(),
        })
    }

    /// Like [`Digest::parse`], but panics on error.
    ///
    /// Only meant for literals known to be valid at the call site.
    #[track_caller]
    pub fn must_parse(s: &str) -> Self {
        Self::parse(s).unwrap_or_else(|err| panic!("invalid digest {s:?}: {err}"))
    }

    /// Hash algorithm, e.g. `sha256`
    pub fn algorithm(&self) -> &str {
        &self.algorithm
    }

    /// Hex-encoded hash value
    pub fn hash(&self) -> &str {
        &self.hash
    }
}

impl fmt::Display for Digest {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}:{}", self.algorithm, self.hash)
    }
}

impl FromStr for Digest {
    type Err = Error;

    fn from_str(s: &str) -> Result<Self> {
        Self::parse(s)
    }
}

impl TryFrom<String> for Digest {
    type Error = Error;

    fn try_from(value: String) -> Result<Self> {
        Self::parse(&value)
    }
}

impl From<Digest> for String {
    fn from(value: Digest) -> Self {
        value.to_string()
    }
}
