//! Version matching abstraction shared by constraints, groups and full
//! version constraints

use crate::version::semver::Version;

/// Trait for anything a concrete version can be checked against
///
/// Implemented at every level of the constraint tree:
/// - single constraint: `^1.2.3`
/// - constraint group (AND): `>=1.0.0 <2.0.0`
/// - version constraint (OR): `^1.0.0 || ^2.0.0`
///
/// Prerelease versions never match. They can only be selected via channels.
pub trait VersionMatcher {
    /// Check whether a version satisfies this matcher
    fn matches_version(&self, version: &Version) -> bool;

    /// Check whether any of the available versions satisfies this matcher
    fn matches_any(&self, available_versions: &[Version]) -> bool {
        available_versions.iter().any(|v| self.matches_version(v))
    }
}
