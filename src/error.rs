//! Error types for reference, identifier, version and digest parsing
//!
//! Every error carries a broad [`ErrorKind`] that callers can branch on and a
//! specific [`Cause`] describing exactly what was wrong with the input.

use thiserror::Error;

/// Broad error category
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Error)]
pub enum ErrorKind {
    #[error("Invalid identifier")]
    InvalidIdentifier,

    #[error("Invalid reference")]
    InvalidReference,

    #[error("Invalid version")]
    InvalidVersion,

    #[error("Invalid digest")]
    InvalidDigest,

    #[error("Resource type mismatch")]
    TypeMismatch,

    #[error("Incompatible constraints")]
    IncompatibleConstraints,
}

/// Specific reason behind an [`Error`]
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum Cause {
    // Identifier
    #[error("invalid context type")]
    InvalidContextType,

    #[error("empty identifier")]
    EmptyIdentifier,

    #[error("invalid scheme")]
    InvalidScheme,

    #[error("invalid registry")]
    InvalidRegistry,

    #[error("invalid path")]
    InvalidPath,

    #[error("invalid namespace")]
    InvalidNamespace,

    #[error("invalid name")]
    InvalidName,

    #[error("missing registry in URI")]
    MissingRegistry,

    #[error("missing path in URI")]
    MissingPath,

    #[error("empty path")]
    EmptyPath,

    #[error("default registry is required")]
    MissingDefaultRegistry,

    #[error("default namespace is required")]
    MissingDefaultNamespace,

    #[error("type {found:?} does not match context {expected:?}")]
    TypeMismatch { found: String, expected: String },

    #[error("unexpected token {0:?}")]
    UnexpectedToken(String),

    // Reference
    #[error("empty reference")]
    EmptyReference,

    #[error("missing version or channel")]
    MissingVersionOrChannel,

    // Version constraint
    #[error("empty constraint string")]
    EmptyConstraint,

    #[error("empty version constraint in OR expression")]
    EmptyOrExpression,

    #[error("bare wildcard not allowed")]
    BareWildcard,

    #[error("multiple wildcards not allowed")]
    MultipleWildcards,

    #[error("wildcard cannot have operator")]
    WildcardWithOperator,

    #[error("prerelease not allowed in constraint")]
    PrereleaseInConstraint,

    #[error("leading hyphen in range")]
    LeadingHyphen,

    #[error("trailing hyphen in range")]
    TrailingHyphen,

    #[error("consecutive hyphens in range")]
    ConsecutiveHyphens,

    #[error("hyphen range with operator")]
    HyphenWithOperator,

    #[error("range bound cannot have operator")]
    RangeBoundWithOperator,

    #[error("range bound cannot have wildcard")]
    RangeBoundWithWildcard,

    #[error("constraint requires explicit upper bound")]
    MissingUpperBound,

    #[error("invalid version format")]
    InvalidVersionFormat,

    #[error("invalid constraint operator")]
    InvalidConstraintOperator,

    #[error("constraints have no common versions")]
    IncompatibleConstraints,

    // Version
    #[error("invalid build metadata")]
    InvalidBuildMetadata,

    #[error("invalid prerelease format")]
    InvalidPrereleaseFormat,

    #[error("version must have major.minor.patch")]
    InvalidVersionComponents,

    #[error("invalid major version")]
    InvalidMajorVersion,

    #[error("invalid minor version")]
    InvalidMinorVersion,

    #[error("invalid patch version")]
    InvalidPatchVersion,

    // Digest
    #[error("digest missing colon separator")]
    MissingDigestColon,

    #[error("empty digest algorithm")]
    EmptyDigestAlgorithm,

    #[error("empty digest hash")]
    EmptyDigestHash,
}

/// Error returned by every parse and construct operation in this crate
#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[error("{kind}: {cause}")]
pub struct Error {
    kind: ErrorKind,
    #[source]
    cause: Cause,
}

impl Error {
    pub fn new(kind: ErrorKind, cause: Cause) -> Self {
        Self { kind, cause }
    }

    /// Broad category, for coarse-grained handling
    pub fn kind(&self) -> ErrorKind {
        self.kind
    }

    /// Specific reason
    pub fn cause(&self) -> &Cause {
        &self.cause
    }

    pub(crate) fn identifier(cause: Cause) -> Self {
        Self::new(ErrorKind::InvalidIdentifier, cause)
    }

    pub(crate) fn reference(cause: Cause) -> Self {
        Self::new(ErrorKind::InvalidReference, cause)
    }

    pub(crate) fn version(cause: Cause) -> Self {
        Self::new(ErrorKind::InvalidVersion, cause)
    }

    pub(crate) fn digest(cause: Cause) -> Self {
        Self::new(ErrorKind::InvalidDigest, cause)
    }
}

pub type Result<T, E = Error> = std::result::Result<T, E>;
