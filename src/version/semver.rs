//! Semantic versions
//!
//! Versions always carry all three numeric components. Prereleases are
//! restricted to `identifier.number` (e.g. `alpha.1`, `rc.0`) so that they can
//! be ordered without the lexical surprises of the semver spec: prereleases
//! of different tracks are simply not comparable.

use std::cmp::Ordering;
use std::fmt;
use std::str::FromStr;
use std::sync::LazyLock;

use regex::Regex;
use serde::{Deserialize, Serialize};

use crate::error::{Cause, Error, Result};

/// Prerelease: identifier starting with a letter, a dot, and a number without
/// leading zeros
static PRERELEASE_PATTERN: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"^[a-zA-Z][a-zA-Z0-9]*\.([0-9]|[1-9][0-9]+)$").expect("a valid regular expression")
});

/// Build metadata: dot-separated alphanumeric and hyphen identifiers
static BUILD_PATTERN: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"^[0-9A-Za-z-]+(\.[0-9A-Za-z-]+)*$").expect("a valid regular expression")
});

/// A parsed semantic version
///
/// Equality and ordering follow [`Version::compare`]: build metadata is
/// ignored, and prereleases on different tracks are unordered.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(try_from = "String", into = "String")]
pub struct Version {
    major: u64,
    minor: u64,
    patch: u64,
    prerelease: Option<String>,
    build: Option<String>,
}

impl Version {
    /// Create a stable version with no build metadata
    pub fn new(major: u64, minor: u64, patch: u64) -> Self {
        Self {
            major,
            minor,
            patch,
            prerelease: None,
            build: None,
        }
    }

    /// Parse a version string
    ///
    /// Accepts an optional `v`/`V` prefix. All of major, minor and patch are
    /// required.
    ///
    /// Examples:
    /// - "1.2.3" -> 1.2.3
    /// - "v1.2.3-alpha.1+001" -> 1.2.3-alpha.1+001
    /// - "1.2" -> error (missing patch)
    pub fn parse(version: &str) -> Result<Self> {
        let s = version.trim();
        let s = s.strip_prefix(['v', 'V']).unwrap_or(s);

        let (s, build) = match s.split_once('+') {
            Some((rest, build)) => {
                if !BUILD_PATTERN.is_match(build) {
                    return Err(Error::version(Cause::InvalidBuildMetadata));
                }
                (rest, Some(build.to_string()))
            }
            None => (s, None),
        };

        let (s, prerelease) = match s.split_once('-') {
            Some((rest, prerelease)) => {
                if !PRERELEASE_PATTERN.is_match(prerelease) || split_prerelease(prerelease).is_none()
                {
                    return Err(Error::version(Cause::InvalidPrereleaseFormat));
                }
                (rest, Some(prerelease.to_string()))
            }
            None => (s, None),
        };

        let parts: Vec<&str> = s.split('.').collect();
        let [major, minor, patch] = parts.as_slice() else {
            return Err(Error::version(Cause::InvalidVersionComponents));
        };

        Ok(Self {
            major: parse_component(major, Cause::InvalidMajorVersion)?,
            minor: parse_component(minor, Cause::InvalidMinorVersion)?,
            patch: parse_component(patch, Cause::InvalidPatchVersion)?,
            prerelease,
            build,
        })
    }

    /// Like [`Version::parse`], but panics on error.
    ///
    /// Only meant for literals known to be valid at the call site.
    #[track_caller]
    pub fn must_parse(version: &str) -> Self {
        Self::parse(version).unwrap_or_else(|err| panic!("invalid version {version:?}: {err}"))
    }

    pub fn major(&self) -> u64 {
        self.major
    }

    pub fn minor(&self) -> u64 {
        self.minor
    }

    pub fn patch(&self) -> u64 {
        self.patch
    }

    /// Prerelease suffix without the leading `-` (e.g. "alpha.1")
    pub fn prerelease(&self) -> Option<&str> {
        self.prerelease.as_deref()
    }

    /// Build metadata without the leading `+`
    pub fn build(&self) -> Option<&str> {
        self.build.as_deref()
    }

    pub fn is_prerelease(&self) -> bool {
        self.prerelease.is_some()
    }

    /// Compare two versions
    ///
    /// Returns `None` when both versions are prereleases of the same
    /// major.minor.patch on different tracks (e.g. "alpha" vs "beta"). A
    /// stable version is always greater than a prerelease of the same
    /// major.minor.patch. Build metadata never participates.
    pub fn compare(&self, other: &Version) -> Option<Ordering> {
        let ordering = self
            .major
            .cmp(&other.major)
            .then(self.minor.cmp(&other.minor))
            .then(self.patch.cmp(&other.patch));

        if ordering != Ordering::Equal {
            return Some(ordering);
        }

        compare_prerelease(self.prerelease(), other.prerelease())
    }
}

fn parse_component(component: &str, cause: Cause) -> Result<u64> {
    if component.is_empty() || !component.bytes().all(|b| b.is_ascii_digit()) {
        return Err(Error::version(cause));
    }
    component.parse().map_err(|_| Error::version(cause))
}

fn compare_prerelease(a: Option<&str>, b: Option<&str>) -> Option<Ordering> {
    match (a, b) {
        (None, None) => Some(Ordering::Equal),
        (None, Some(_)) => Some(Ordering::Greater),
        (Some(_), None) => Some(Ordering::Less),
        (Some(a), Some(b)) => {
            let (a_id, a_num) = split_prerelease(a)?;
            let (b_id, b_num) = split_prerelease(b)?;
            (a_id == b_id).then(|| a_num.cmp(&b_num))
        }
    }
}

/// Split a prerelease into its track identifier and number.
///
/// Not stored separately on [`Version`] so nobody is tempted to compare
/// numbers across tracks.
fn split_prerelease(prerelease: &str) -> Option<(&str, u64)> {
    let (id, num) = prerelease.rsplit_once('.')?;
    Some((id, num.parse().ok()?))
}

impl PartialEq for Version {
    fn eq(&self, other: &Self) -> bool {
        self.compare(other) == Some(Ordering::Equal)
    }
}

impl PartialOrd for Version {
    fn partial_cmp(&self, other: &Self) -> Option<Ordering> {
        self.compare(other)
    }
}

impl fmt::Display for Version {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}.{}.{}", self.major, self.minor, self.patch)?;
        if let Some(prerelease) = &self.prerelease {
            write!(f, "-{prerelease}")?;
        }
        if let Some(build) = &self.build {
            write!(f, "+{build}")?;
        }
        Ok(())
    }
}

impl FromStr for Version {
    type Err = Error;

    fn from_str(s: &str) -> Result<Self> {
        Self::parse(s)
    }
}

impl TryFrom<String> for Version {
    type Error = Error;

    fn try_from(value: String) -> Result<Self> {
        Self::parse(&value)
    }
}

impl From<Version> for String {
    fn from(value: Version) -> Self {
        value.to_string()
    }
}
