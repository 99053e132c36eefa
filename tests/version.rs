//! Versions and version constraints through the public API

use std::cmp::Ordering;

use crucible_reference::{Cause, ErrorKind, Version, VersionConstraint, VersionMatcher};
use rstest::rstest;

#[rstest]
#[case("0.0.0")]
#[case("1.2.3")]
#[case("10.20.30-rc.0")]
#[case("1.0.0-alpha.12+build.5")]
#[case("2.0.0+sha.abc-def")]
fn version_round_trips_field_wise(#[case] input: &str) {
    let version = Version::parse(input).unwrap();

    let reparsed = Version::parse(&version.to_string()).unwrap();

    assert_eq!(reparsed.major(), version.major());
    assert_eq!(reparsed.minor(), version.minor());
    assert_eq!(reparsed.patch(), version.patch());
    assert_eq!(reparsed.prerelease(), version.prerelease());
    assert_eq!(reparsed.build(), version.build());
}

#[test]
fn prereleases_of_different_tracks_are_incomparable() {
    let alpha = Version::parse("1.0.0-alpha.1").unwrap();
    let beta = Version::parse("1.0.0-beta.1").unwrap();

    assert_eq!(alpha.compare(&beta), None);
    assert!(!(alpha < beta) && !(alpha > beta) && alpha != beta);
}

#[test]
fn stable_is_greater_than_its_prerelease() {
    let stable = Version::parse("1.0.0").unwrap();
    let alpha = Version::parse("1.0.0-alpha.1").unwrap();

    assert_eq!(stable.compare(&alpha), Some(Ordering::Greater));
    assert!(stable > alpha);
}

#[rstest]
#[case(">=1.0.0 <2.0.0")]
#[case("1.0.0 - 2.0.0 || ^3")]
#[case("  ~1.2   !=1.2.5 ")]
#[case("1.x || 2.3.X || =4")]
#[case("v1.0.0 - v1.9.9")]
fn canonical_form_is_idempotent(#[case] input: &str) {
    let once = VersionConstraint::parse(input).unwrap().to_string();
    let twice = VersionConstraint::parse(&once).unwrap().to_string();

    assert_eq!(once, twice);
}

#[test]
fn open_range_needs_upper_bound() {
    let err = VersionConstraint::parse(">=1.0.0").unwrap_err();
    assert_eq!(err.kind(), ErrorKind::InvalidReference);
    assert_eq!(err.cause(), &Cause::MissingUpperBound);

    let bounded = VersionConstraint::parse(">=1.0.0 <2.0.0").unwrap();
    assert!(bounded.matches("1.5.0").unwrap());
    assert!(!bounded.matches("0.9.0").unwrap());
    assert!(!bounded.matches("2.0.0").unwrap());
}

#[rstest]
#[case("^0.2.3", &["0.2.3", "0.2.9"], &["0.3.0", "0.2.2", "1.0.0"])]
#[case("^0.0.3", &["0.0.3"], &["0.0.4", "0.0.2", "0.1.0"])]
#[case("~1.2.3", &["1.2.3", "1.2.9"], &["1.3.0", "1.2.2"])]
#[case("^1.2.3", &["1.2.3", "1.9.0"], &["2.0.0", "1.2.2"])]
fn operator_ranges(#[case] constraint: &str, #[case] inside: &[&str], #[case] outside: &[&str]) {
    let constraint = VersionConstraint::parse(constraint).unwrap();

    for version in inside {
        assert!(constraint.matches(version).unwrap(), "{constraint} should match {version}");
    }
    for version in outside {
        assert!(!constraint.matches(version).unwrap(), "{constraint} should not match {version}");
    }
}

#[test]
fn prerelease_never_matches() {
    let constraint = VersionConstraint::parse("=1.2.3").unwrap();

    assert!(!constraint.matches("1.2.3-alpha.1").unwrap());
}

#[test]
fn intersection_of_or_groups() {
    let a = VersionConstraint::parse(">=1.0.0 <2.0.0 || >=3.0.0 <4.0.0").unwrap();
    let b = VersionConstraint::parse(">=1.5.0 <3.5.0").unwrap();

    let result = a.intersect(&b).unwrap();

    for version in ["1.7.0", "3.2.0"] {
        assert!(result.matches(version).unwrap(), "should match {version}");
    }
    for version in ["1.4.0", "2.5.0", "3.6.0"] {
        assert!(!result.matches(version).unwrap(), "should not match {version}");
    }
}

#[test]
fn matcher_trait_selects_from_available_versions() {
    let available: Vec<Version> = ["0.9.0", "1.4.2", "2.0.0-rc.1"]
        .iter()
        .map(|v| Version::parse(v).unwrap())
        .collect();

    let constraint = VersionConstraint::parse("^1.4").unwrap();
    let prerelease_only = VersionConstraint::parse("=2.0.0").unwrap();

    assert!(constraint.matches_any(&available));
    assert!(!prerelease_only.matches_any(&available));
}
