//! Single version constraints and AND-groups of them
//!
//! A constraint is an operator plus a possibly partial version:
//! - `=1.2` - exact match on the components given (any 1.2.x)
//! - `!=1.2.3` - anything but 1.2.3
//! - `>1.0.0`, `>=1.0.0`, `<2.0.0`, `<=2.0.0` - comparisons
//! - `~1.2.3` - patch-level changes (1.2.x, x >= 3)
//! - `^1.2.3` - minor-level changes within the major (special rules for 0.x)

use std::cmp::Ordering;
use std::fmt;

use crate::error::{Cause, Error, Result};
use crate::version::matcher::VersionMatcher;
use crate::version::semver::Version;

/// Comparison operator of a single constraint
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Operator {
    /// `=`
    Eq,
    /// `!=`
    Ne,
    /// `>`
    Gt,
    /// `<`
    Lt,
    /// `>=`
    Ge,
    /// `<=`
    Le,
    /// `~`
    Tilde,
    /// `^`
    Caret,
}

impl Operator {
    /// Operators in the order they must be tried when stripping a prefix, so
    /// that two-character operators win over their one-character prefixes.
    const PREFIX_ORDER: [Operator; 8] = [
        Operator::Ge,
        Operator::Le,
        Operator::Ne,
        Operator::Gt,
        Operator::Lt,
        Operator::Eq,
        Operator::Tilde,
        Operator::Caret,
    ];

    pub fn as_str(&self) -> &'static str {
        match self {
            Operator::Eq => "=",
            Operator::Ne => "!=",
            Operator::Gt => ">",
            Operator::Lt => "<",
            Operator::Ge => ">=",
            Operator::Le => "<=",
            Operator::Tilde => "~",
            Operator::Caret => "^",
        }
    }

    /// Split a leading operator off a constraint token
    pub(crate) fn split_prefix(token: &str) -> (Option<Operator>, &str) {
        Self::PREFIX_ORDER
            .iter()
            .find_map(|op| token.strip_prefix(op.as_str()).map(|rest| (Some(*op), rest)))
            .unwrap_or((None, token))
    }

    /// Whether the operator leaves the range open towards future versions
    pub fn is_unbounded_above(&self) -> bool {
        matches!(self, Operator::Gt | Operator::Ge)
    }
}

impl fmt::Display for Operator {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// A single version comparison rule
///
/// Minor and patch are optional; only the components that are set take part
/// in matching. A patch is never set without a minor.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct Constraint {
    operator: Operator,
    major: u64,
    minor: Option<u64>,
    patch: Option<u64>,
}

impl Constraint {
    pub(crate) fn new(operator: Operator, major: u64, minor: Option<u64>, patch: Option<u64>) -> Self {
        debug_assert!(patch.is_none() || minor.is_some(), "patch set without minor");
        Self {
            operator,
            major,
            minor,
            patch,
        }
    }

    pub fn operator(&self) -> Operator {
        self.operator
    }

    pub fn major(&self) -> u64 {
        self.major
    }

    pub fn minor(&self) -> Option<u64> {
        self.minor
    }

    pub fn patch(&self) -> Option<u64> {
        self.patch
    }

    /// Ordering of the constraint's version relative to `v`, looking only at
    /// the components that are set
    fn compare(&self, v: &Version) -> Ordering {
        self.major
            .cmp(&v.major())
            .then_with(|| self.minor.map_or(Ordering::Equal, |minor| minor.cmp(&v.minor())))
            .then_with(|| self.patch.map_or(Ordering::Equal, |patch| patch.cmp(&v.patch())))
    }

    /// ~1 matches 1.x.x, ~1.2 matches 1.2.x, ~1.2.3 matches 1.2.x where x >= 3
    fn matches_tilde(&self, v: &Version) -> bool {
        if v.major() != self.major {
            return false;
        }
        let Some(minor) = self.minor else {
            return true;
        };
        if v.minor() != minor {
            return false;
        }
        self.patch.is_none_or(|patch| v.patch() >= patch)
    }

    fn matches_caret(&self, v: &Version) -> bool {
        if v.major() != self.major {
            return false;
        }
        if self.major == 0 {
            self.matches_caret_major_zero(v)
        } else {
            self.matches_caret_major_non_zero(v)
        }
    }

    /// 0.x versions are unstable, so caret only allows patch changes:
    /// - ^0 matches 0.x.x
    /// - ^0.0 matches 0.0.x
    /// - ^0.0.3 matches only 0.0.3
    /// - ^0.2 matches 0.2.x
    /// - ^0.2.3 matches 0.2.x where x >= 3
    fn matches_caret_major_zero(&self, v: &Version) -> bool {
        let Some(minor) = self.minor else {
            return true;
        };
        if v.minor() != minor {
            return false;
        }
        match self.patch {
            None => true,
            Some(patch) if minor == 0 => v.patch() == patch,
            Some(patch) => v.patch() >= patch,
        }
    }

    /// - ^1 matches 1.x.x
    /// - ^1.2 matches 1.x.y where x >= 2
    /// - ^1.2.3 matches 1.x.y where x > 2, or x == 2 and y >= 3
    fn matches_caret_major_non_zero(&self, v: &Version) -> bool {
        let Some(minor) = self.minor else {
            return true;
        };
        match v.minor().cmp(&minor) {
            Ordering::Greater => true,
            Ordering::Less => false,
            Ordering::Equal => self.patch.is_none_or(|patch| v.patch() >= patch),
        }
    }
}

impl VersionMatcher for Constraint {
    fn matches_version(&self, v: &Version) -> bool {
        if v.is_prerelease() {
            return false;
        }

        match self.operator {
            Operator::Eq => self.compare(v) == Ordering::Equal,
            Operator::Ne => self.compare(v) != Ordering::Equal,
            Operator::Gt => self.compare(v) == Ordering::Less,
            Operator::Ge => self.compare(v) != Ordering::Greater,
            Operator::Lt => self.compare(v) == Ordering::Greater,
            Operator::Le => self.compare(v) != Ordering::Less,
            Operator::Tilde => self.matches_tilde(v),
            Operator::Caret => self.matches_caret(v),
        }
    }
}

impl fmt::Display for Constraint {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}{}", self.operator, self.major)?;
        if let Some(minor) = self.minor {
            write!(f, ".{minor}")?;
        }
        if let Some(patch) = self.patch {
            write!(f, ".{patch}")?;
        }
        Ok(())
    }
}

/// Constraints joined by AND (space-separated)
///
/// A group is never empty, and a group containing `>` or `>=` always carries
/// an upper bound as well.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct ConstraintGroup {
    constraints: Vec<Constraint>,
}

impl ConstraintGroup {
    /// Build a group, enforcing the explicit upper bound policy
    ///
    /// `>=1.0.0` alone would accept 2.0.0 and every future major, so it is
    /// rejected unless paired with `=`, `!=`, `<`, `<=`, `~` or `^`.
    pub(crate) fn new(constraints: Vec<Constraint>) -> Result<Self> {
        if constraints.is_empty() {
            return Err(Error::reference(Cause::EmptyConstraint));
        }

        let needs_upper = constraints.iter().any(|c| c.operator.is_unbounded_above());
        let has_upper = constraints.iter().any(|c| !c.operator.is_unbounded_above());

        if needs_upper && !has_upper {
            return Err(Error::reference(Cause::MissingUpperBound));
        }

        Ok(Self { constraints })
    }

    /// Both groups' constraints ANDed together, if the result is still a
    /// valid group
    pub(crate) fn combine(&self, other: &ConstraintGroup) -> Result<Self> {
        let constraints = self
            .constraints
            .iter()
            .chain(other.constraints.iter())
            .copied()
            .collect();
        Self::new(constraints)
    }

    pub fn constraints(&self) -> &[Constraint] {
        &self.constraints
    }
}

impl VersionMatcher for ConstraintGroup {
    fn matches_version(&self, v: &Version) -> bool {
        self.constraints.iter().all(|c| c.matches_version(v))
    }
}

impl fmt::Display for ConstraintGroup {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for (i, constraint) in self.constraints.iter().enumerate() {
            if i > 0 {
                f.write_str(" ")?;
            }
            write!(f, "{constraint}")?;
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rstest::rstest;

    fn constraint(operator: Operator, spec: &str) -> Constraint {
        let mut parts = spec.split('.').map(|p| p.parse::<u64>().unwrap());
        let major = parts.next().unwrap();
        let minor = parts.next();
        let patch = parts.next();
        Constraint::new(operator, major, minor, patch)
    }

    fn matches(operator: Operator, spec: &str, version: &str) -> bool {
        constraint(operator, spec).matches_version(&Version::must_parse(version))
    }

    #[rstest]
    #[case("1.2.3", "1.2.3", true)]
    #[case("1.2.3", "1.2.4", false)]
    #[case("1.2", "1.2.0", true)]
    #[case("1.2", "1.2.99", true)]
    #[case("1.2", "1.3.0", false)]
    #[case("1", "1.0.0", true)]
    #[case("1", "1.99.99", true)]
    #[case("1", "2.0.0", false)]
    fn equal_compares_only_set_components(
        #[case] spec: &str,
        #[case] version: &str,
        #[case] expected: bool,
    ) {
        assert_eq!(matches(Operator::Eq, spec, version), expected);
        assert_eq!(matches(Operator::Ne, spec, version), !expected);
    }

    #[rstest]
    #[case(Operator::Gt, "1.0.0", "1.0.1", true)]
    #[case(Operator::Gt, "1.0.0", "1.0.0", false)]
    #[case(Operator::Gt, "1.0.0", "0.9.9", false)]
    #[case(Operator::Gt, "1.2", "1.2.9", false)] // partial: 1.2.x is not above 1.2
    #[case(Operator::Gt, "1.2", "1.3.0", true)]
    #[case(Operator::Ge, "1.0.0", "1.0.0", true)]
    #[case(Operator::Ge, "1.0.0", "0.9.9", false)]
    #[case(Operator::Ge, "1.2", "1.2.0", true)]
    #[case(Operator::Lt, "2.0.0", "1.9.9", true)]
    #[case(Operator::Lt, "2.0.0", "2.0.0", false)]
    #[case(Operator::Lt, "2", "2.5.0", false)]
    #[case(Operator::Lt, "2", "1.99.0", true)]
    #[case(Operator::Le, "2.0.0", "2.0.0", true)]
    #[case(Operator::Le, "2.0.0", "2.0.1", false)]
    #[case(Operator::Le, "2", "2.9.9", true)]
    fn comparison_operators(
        #[case] operator: Operator,
        #[case] spec: &str,
        #[case] version: &str,
        #[case] expected: bool,
    ) {
        assert_eq!(matches(operator, spec, version), expected);
    }

    #[rstest]
    #[case("1", "1.0.0", true)]
    #[case("1", "1.9.9", true)]
    #[case("1", "2.0.0", false)]
    #[case("1.2", "1.2.0", true)]
    #[case("1.2", "1.2.9", true)]
    #[case("1.2", "1.3.0", false)]
    #[case("1.2.3", "1.2.3", true)]
    #[case("1.2.3", "1.2.9", true)]
    #[case("1.2.3", "1.2.2", false)]
    #[case("1.2.3", "1.3.0", false)]
    fn tilde_allows_patch_changes(
        #[case] spec: &str,
        #[case] version: &str,
        #[case] expected: bool,
    ) {
        assert_eq!(matches(Operator::Tilde, spec, version), expected);
    }

    #[rstest]
    // major != 0
    #[case("1", "1.0.0", true)]
    #[case("1", "1.9.9", true)]
    #[case("1", "2.0.0", false)]
    #[case("1.2", "1.2.0", true)]
    #[case("1.2", "1.9.0", true)]
    #[case("1.2", "1.1.9", false)]
    #[case("1.2.3", "1.2.3", true)]
    #[case("1.2.3", "1.2.2", false)]
    #[case("1.2.3", "1.3.0", true)]
    #[case("1.2.3", "1.9.0", true)]
    #[case("1.2.3", "2.0.0", false)]
    #[case("1.2.3", "0.9.0", false)]
    // major == 0
    #[case("0", "0.0.1", true)]
    #[case("0", "0.9.9", true)]
    #[case("0", "1.0.0", false)]
    #[case("0.0", "0.0.7", true)]
    #[case("0.0", "0.1.0", false)]
    #[case("0.0.3", "0.0.3", true)]
    #[case("0.0.3", "0.0.4", false)]
    #[case("0.0.3", "0.0.2", false)]
    #[case("0.2", "0.2.0", true)]
    #[case("0.2", "0.2.9", true)]
    #[case("0.2", "0.3.0", false)]
    #[case("0.2.3", "0.2.3", true)]
    #[case("0.2.3", "0.2.9", true)]
    #[case("0.2.3", "0.2.2", false)]
    #[case("0.2.3", "0.3.0", false)]
    fn caret_rules(#[case] spec: &str, #[case] version: &str, #[case] expected: bool) {
        assert_eq!(matches(Operator::Caret, spec, version), expected);
    }

    #[rstest]
    #[case(Operator::Eq)]
    #[case(Operator::Ne)]
    #[case(Operator::Gt)]
    #[case(Operator::Ge)]
    #[case(Operator::Lt)]
    #[case(Operator::Le)]
    #[case(Operator::Tilde)]
    #[case(Operator::Caret)]
    fn prerelease_never_matches(#[case] operator: Operator) {
        assert!(!matches(operator, "1.2.3", "1.2.3-alpha.1"));
        assert!(!matches(operator, "1", "1.5.0-rc.1"));
    }

    #[rstest]
    #[case(">=1.0.0", (Some(Operator::Ge), "1.0.0"))]
    #[case("<=1.0.0", (Some(Operator::Le), "1.0.0"))]
    #[case("!=1.0.0", (Some(Operator::Ne), "1.0.0"))]
    #[case(">1", (Some(Operator::Gt), "1"))]
    #[case("<1", (Some(Operator::Lt), "1"))]
    #[case("=1", (Some(Operator::Eq), "1"))]
    #[case("~1.2", (Some(Operator::Tilde), "1.2"))]
    #[case("^1.2", (Some(Operator::Caret), "1.2"))]
    #[case("1.2.3", (None, "1.2.3"))]
    #[case("!1.2.3", (None, "!1.2.3"))]
    fn split_prefix_prefers_longest_operator(
        #[case] token: &str,
        #[case] expected: (Option<Operator>, &str),
    ) {
        assert_eq!(Operator::split_prefix(token), expected);
    }

    #[rstest]
    #[case(Operator::Caret, "1.2.3", "^1.2.3")]
    #[case(Operator::Eq, "1.2", "=1.2")]
    #[case(Operator::Ne, "1", "!=1")]
    #[case(Operator::Le, "2.0.0", "<=2.0.0")]
    fn constraint_display(#[case] operator: Operator, #[case] spec: &str, #[case] expected: &str) {
        assert_eq!(constraint(operator, spec).to_string(), expected);
    }

    #[rstest]
    #[case(vec![(Operator::Ge, "1.0.0")], false)]
    #[case(vec![(Operator::Gt, "1.0.0")], false)]
    #[case(vec![(Operator::Gt, "1.0.0"), (Operator::Ge, "1.1.0")], false)]
    #[case(vec![(Operator::Ge, "1.0.0"), (Operator::Lt, "2.0.0")], true)]
    #[case(vec![(Operator::Gt, "1.0.0"), (Operator::Le, "2.0.0")], true)]
    #[case(vec![(Operator::Ge, "1.0.0"), (Operator::Ne, "1.5.0")], true)]
    #[case(vec![(Operator::Ge, "1.0.0"), (Operator::Caret, "1.2.0")], true)]
    #[case(vec![(Operator::Ge, "1.0.0"), (Operator::Tilde, "1.2.0")], true)]
    #[case(vec![(Operator::Ge, "1.0.0"), (Operator::Eq, "1.2.0")], true)]
    #[case(vec![(Operator::Lt, "2.0.0")], true)]
    #[case(vec![(Operator::Caret, "1.0.0")], true)]
    fn group_requires_upper_bound_for_open_ranges(
        #[case] members: Vec<(Operator, &str)>,
        #[case] valid: bool,
    ) {
        let constraints = members
            .into_iter()
            .map(|(op, spec)| constraint(op, spec))
            .collect();

        let result = ConstraintGroup::new(constraints);

        match result {
            Ok(_) => assert!(valid),
            Err(err) => {
                assert!(!valid);
                assert_eq!(err.cause(), &Cause::MissingUpperBound);
            }
        }
    }

    #[test]
    fn empty_group_is_rejected() {
        let err = ConstraintGroup::new(vec![]).unwrap_err();
        assert_eq!(err.cause(), &Cause::EmptyConstraint);
    }

    #[test]
    fn group_matches_when_every_member_matches() {
        let group = ConstraintGroup::new(vec![
            constraint(Operator::Ge, "1.0.0"),
            constraint(Operator::Lt, "2.0.0"),
            constraint(Operator::Ne, "1.5.0"),
        ])
        .unwrap();

        assert!(group.matches_version(&Version::must_parse("1.2.0")));
        assert!(!group.matches_version(&Version::must_parse("1.5.0")));
        assert!(!group.matches_version(&Version::must_parse("2.0.0")));
        assert!(!group.matches_version(&Version::must_parse("0.9.0")));
        assert_eq!(group.to_string(), ">=1.0.0 <2.0.0 !=1.5.0");
    }

    #[test]
    fn combine_concatenates_in_order() {
        let lower = ConstraintGroup::new(vec![constraint(Operator::Lt, "3.0.0")]).unwrap();
        let upper = ConstraintGroup::new(vec![constraint(Operator::Caret, "2.1")]).unwrap();

        let combined = lower.combine(&upper).unwrap();

        assert_eq!(combined.to_string(), "<3.0.0 ^2.1");
        assert_eq!(combined.constraints().len(), 2);
    }

    #[test]
    fn matches_any_checks_each_available_version() {
        let c = constraint(Operator::Tilde, "1.2");
        let available = [Version::must_parse("1.1.0"), Version::must_parse("1.2.7")];

        assert!(c.matches_any(&available));
        assert!(!c.matches_any(&available[..1]));
        assert!(!c.matches_any(&[]));
    }
}
