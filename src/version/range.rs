//! Version constraint expressions
//!
//! Grammar:
//! - `1.2.3`, `=1.2.3` - exact version (partial versions allowed: `1.2`, `1`)
//! - `!=1.2.3`, `>1.0.0`, `>=1.0.0`, `<2.0.0`, `<=2.0.0` - comparisons
//! - `~1.2.3` - patch-level changes
//! - `^1.2.3` - minor-level changes
//! - `1.x`, `1.2.x` - wildcards (a bare `*` or `x` is not allowed)
//! - `1.0.0 - 2.0.0` - hyphen range, expands to `>=1.0.0 <=2.0.0`
//! - space-separated constraints are ANDed, `||` separates ORed groups
//!
//! Every group must have an upper bound: `>=1.0.0` is rejected, while
//! `>=1.0.0 <2.0.0` is fine. Prereleases are not allowed anywhere in a
//! constraint; use a channel to select them.

use std::fmt;
use std::str::FromStr;
use std::sync::LazyLock;

use regex::Regex;
use serde::{Deserialize, Serialize};
use tracing::debug;

use crate::error::{Cause, Error, ErrorKind, Result};
use crate::version::constraint::{Constraint, ConstraintGroup, Operator};
use crate::version::matcher::VersionMatcher;
use crate::version::semver::Version;

/// Partial version with optional `v` prefix. A prerelease suffix is captured
/// only so it can be rejected with a precise error.
static VERSION_PATTERN: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"^[vV]?([0-9]+)(?:\.([0-9]+))?(?:\.([0-9]+))?(?:-([a-zA-Z0-9.-]+))?$")
        .expect("a valid regular expression")
});

/// A parsed version constraint: constraint groups joined by OR
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(try_from = "String", into = "String")]
pub struct VersionConstraint {
    groups: Vec<ConstraintGroup>,
}

impl VersionConstraint {
    /// Parse a version constraint expression
    pub fn parse(s: &str) -> Result<Self> {
        let s = s.trim();
        if s.is_empty() {
            return Err(Error::reference(Cause::EmptyConstraint));
        }

        let groups = s
            .split("||")
            .map(|segment| {
                let segment = segment.trim();
                if segment.is_empty() {
                    return Err(Error::reference(Cause::EmptyOrExpression));
                }
                parse_group(segment)
            })
            .collect::<Result<Vec<_>>>()?;

        Ok(Self { groups })
    }

    /// Like [`VersionConstraint::parse`], but panics on error.
    ///
    /// Only meant for literals known to be valid at the call site.
    #[track_caller]
    pub fn must_parse(s: &str) -> Self {
        Self::parse(s).unwrap_or_else(|err| panic!("invalid version constraint {s:?}: {err}"))
    }

    /// The ORed groups, in the order they were written
    pub fn groups(&self) -> &[ConstraintGroup] {
        &self.groups
    }

    /// Parse `version` and check it against this constraint
    pub fn matches(&self, version: &str) -> Result<bool> {
        let version = Version::parse(version)?;
        Ok(self.matches_version(&version))
    }

    /// Check a version against this constraint (any group must match)
    pub fn matches_version(&self, version: &Version) -> bool {
        self.groups.iter().any(|g| g.matches_version(version))
    }

    /// Intersect two constraints
    ///
    /// Every group of `self` is ANDed with every group of `other`, and the
    /// combinations are ORed. Combinations that violate the upper bound policy
    /// are dropped. Fails only when no combination survives.
    ///
    /// This is structural: a surviving group may still match no version at
    /// all (e.g. `=1.0.0 =2.0.0`).
    pub fn intersect(&self, other: &VersionConstraint) -> Result<VersionConstraint> {
        let groups: Vec<ConstraintGroup> = self
            .groups
            .iter()
            .flat_map(|a| other.groups.iter().map(move |b| (a, b)))
            .filter_map(|(a, b)| match a.combine(b) {
                Ok(combined) => Some(combined),
                Err(err) => {
                    debug!("Dropping combination '{}' + '{}': {}", a, b, err);
                    None
                }
            })
            .collect();

        if groups.is_empty() {
            return Err(Error::new(
                ErrorKind::IncompatibleConstraints,
                Cause::IncompatibleConstraints,
            ));
        }

        Ok(Self { groups })
    }
}

impl VersionMatcher for VersionConstraint {
    fn matches_version(&self, version: &Version) -> bool {
        VersionConstraint::matches_version(self, version)
    }
}

/// Parse space-separated AND constraints, expanding hyphen ranges
fn parse_group(segment: &str) -> Result<ConstraintGroup> {
    let tokens: Vec<&str> = segment.split_whitespace().collect();
    validate_hyphen_positions(&tokens)?;

    let mut constraints = Vec::with_capacity(tokens.len());
    let mut i = 0;

    while i < tokens.len() {
        if i + 2 < tokens.len() && is_hyphen(tokens[i + 1]) {
            constraints.push(parse_range_bound(Operator::Ge, tokens[i])?);
            constraints.push(parse_range_bound(Operator::Le, tokens[i + 2])?);
            i += 3;
            continue;
        }

        constraints.push(parse_constraint(tokens[i])?);
        i += 1;
    }

    ConstraintGroup::new(constraints)
}

fn is_hyphen(token: &str) -> bool {
    token == "-"
}

fn starts_with_operator(token: &str) -> bool {
    token.starts_with(['>', '<', '=', '!', '~', '^'])
}

fn is_wildcard_segment(segment: &str) -> bool {
    segment.eq_ignore_ascii_case("x")
}

fn has_wildcard(version: &str) -> bool {
    version.split('.').any(is_wildcard_segment)
}

/// A hyphen needs a bare version on both sides
fn validate_hyphen_positions(tokens: &[&str]) -> Result<()> {
    for (i, token) in tokens.iter().enumerate() {
        if !is_hyphen(token) {
            continue;
        }

        if i == 0 {
            return Err(Error::reference(Cause::LeadingHyphen));
        }
        if i == tokens.len() - 1 {
            return Err(Error::reference(Cause::TrailingHyphen));
        }

        let (before, after) = (tokens[i - 1], tokens[i + 1]);
        if is_hyphen(before) || is_hyphen(after) {
            return Err(Error::reference(Cause::ConsecutiveHyphens));
        }
        if starts_with_operator(before) || starts_with_operator(after) {
            return Err(Error::reference(Cause::HyphenWithOperator));
        }
    }

    Ok(())
}

fn parse_range_bound(operator: Operator, token: &str) -> Result<Constraint> {
    if starts_with_operator(token) {
        return Err(Error::reference(Cause::RangeBoundWithOperator));
    }
    if has_wildcard(token) {
        return Err(Error::reference(Cause::RangeBoundWithWildcard));
    }
    parse_partial(Some(operator), token)
}

/// Parse a single constraint token (no hyphen range)
fn parse_constraint(token: &str) -> Result<Constraint> {
    if token == "*" {
        return Err(Error::reference(Cause::BareWildcard));
    }

    let (operator, rest) = Operator::split_prefix(token);

    if token.ends_with(".x") || token.ends_with(".X") {
        return parse_wildcard(operator, rest);
    }

    if rest.is_empty() {
        return Err(Error::reference(Cause::InvalidConstraintOperator));
    }

    parse_partial(operator, rest)
}

/// Parse a possibly partial version (`1`, `1.2`, `v1.2.3`)
fn parse_partial(operator: Option<Operator>, version: &str) -> Result<Constraint> {
    if has_wildcard(version) {
        return parse_wildcard(operator, version);
    }

    let caps = VERSION_PATTERN
        .captures(version)
        .ok_or_else(|| Error::reference(Cause::InvalidVersionFormat))?;

    if caps.get(4).is_some() {
        return Err(Error::reference(Cause::PrereleaseInConstraint));
    }

    let major = parse_number(&caps[1], Cause::InvalidMajorVersion)?;
    let minor = caps
        .get(2)
        .map(|m| parse_number(m.as_str(), Cause::InvalidMinorVersion))
        .transpose()?;
    let patch = caps
        .get(3)
        .map(|m| parse_number(m.as_str(), Cause::InvalidPatchVersion))
        .transpose()?;

    Ok(Constraint::new(
        operator.unwrap_or(Operator::Eq),
        major,
        minor,
        patch,
    ))
}

/// Parse `1.x` or `1.2.x` into an equality constraint on the leading
/// components
fn parse_wildcard(operator: Option<Operator>, body: &str) -> Result<Constraint> {
    if !matches!(operator, None | Some(Operator::Eq)) {
        return Err(Error::reference(Cause::WildcardWithOperator));
    }

    if body.is_empty() || is_wildcard_segment(body) {
        return Err(Error::reference(Cause::BareWildcard));
    }

    let segments: Vec<&str> = body.split('.').collect();
    let wildcards = segments.iter().filter(|s| is_wildcard_segment(s)).count();
    if wildcards > 1 || segments.len() > 3 {
        return Err(Error::reference(Cause::MultipleWildcards));
    }

    match segments.as_slice() {
        [major, x] if is_wildcard_segment(x) => Ok(Constraint::new(
            Operator::Eq,
            parse_number(major, Cause::InvalidMajorVersion)?,
            None,
            None,
        )),
        [major, minor, x] if is_wildcard_segment(x) => Ok(Constraint::new(
            Operator::Eq,
            parse_number(major, Cause::InvalidMajorVersion)?,
            Some(parse_number(minor, Cause::InvalidMinorVersion)?),
            None,
        )),
        _ => Err(Error::reference(Cause::InvalidVersionFormat)),
    }
}

fn parse_number(s: &str, cause: Cause) -> Result<u64> {
    if s.is_empty() || !s.bytes().all(|b| b.is_ascii_digit()) {
        return Err(Error::reference(cause));
    }
    s.parse().map_err(|_| Error::reference(cause))
}

impl fmt::Display for VersionConstraint {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for (i, group) in self.groups.iter().enumerate() {
            if i > 0 {
                f.write_str(" || ")?;
            }
            write!(f, "{group}")?;
        }
        Ok(())
    }
}

impl FromStr for VersionConstraint {
    type Err = Error;

    fn from_str(s: &str) -> Result<Self> {
        Self::parse(s)
    }
}

impl TryFrom<String> for VersionConstraint {
    type Error = Error;

    fn try_from(value: String) -> Result<Self> {
        Self::parse(&value)
    }
}

impl From<VersionConstraint> for String {
    fn from(value: VersionConstraint) -> Self {
        value.to_string()
    }
}
