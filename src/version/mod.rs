//! Versions and version constraints
//!
//! # Architecture
//!
//! ```text
//! ┌───────────────────┐     ┌───────────────────┐     ┌─────────────┐
//! │ VersionConstraint │────▶│  ConstraintGroup  │────▶│ Constraint  │
//! │       (OR)        │     │       (AND)       │     │ (op + ver)  │
//! └───────────────────┘     └───────────────────┘     └─────────────┘
//!           │                         │                      │
//!           └─────────────────────────┴──────────────────────┘
//!                                     ▼
//!                             ┌───────────────┐
//!                             │VersionMatcher │──▶ Version
//!                             └───────────────┘
//! ```
//!
//! # Modules
//!
//! - [`semver`]: Concrete versions with restricted prereleases
//! - [`matcher`]: Matching trait shared by every constraint level
//! - [`constraint`]: Single constraints and AND-groups
//! - [`range`]: Constraint expression grammar, matching and intersection

pub mod constraint;
pub mod matcher;
pub mod range;
pub mod semver;

pub use constraint::{Constraint, ConstraintGroup, Operator};
pub use matcher::VersionMatcher;
pub use range::VersionConstraint;
pub use semver::Version;
