//! Identifiers, versions, version constraints and references for Crucible
//! resources
//!
//! ```
//! use crucible_reference::{IdentifierOptions, Reference};
//!
//! let opts = IdentifierOptions::new("https://registry.crucible.net", "official")?;
//! let reference = Reference::parse("namespace/name >=1.0.0 <2.0.0", "template", &opts)?;
//!
//! assert!(reference.version().is_some_and(|v| v.matches("1.5.0").unwrap_or(false)));
//! assert_eq!(
//!     reference.to_string(),
//!     "template https://registry.crucible.net/namespace/name >=1.0.0 <2.0.0"
//! );
//! # Ok::<(), crucible_reference::Error>(())
//! ```

pub mod config;
pub mod digest;
pub mod error;
pub mod identifier;
mod parser;
pub mod reference;
pub mod registry;
pub mod version;

pub use digest::Digest;
pub use error::{Cause, Error, ErrorKind, Result};
pub use identifier::{Identifier, IdentifierOptions};
pub use reference::{Reference, Target};
pub use registry::Registry;
pub use version::{Constraint, ConstraintGroup, Operator, Version, VersionConstraint, VersionMatcher};
