//! Identifiers and references through the public API

mod helper;

use crucible_reference::{Cause, Digest, ErrorKind, Identifier, Reference, Target, VersionConstraint};
use rstest::rstest;

use helper::options;

#[test]
fn full_uri_identifier_path() {
    let id = Identifier::parse("https://myregistry.com/path/to/resource", "template", &options())
        .unwrap();

    assert_eq!(id.path(), "path/to/resource");
    assert_eq!(id.hostname(), "myregistry.com");
    assert_eq!(id.namespace(), None);
}

#[test]
fn frozen_reference_keeps_version_and_digest() {
    let reference =
        Reference::parse("namespace/name 1.0.0 sha256:abcd1234", "template", &options()).unwrap();

    assert!(reference.is_frozen());
    assert!(reference.version().is_some());
    assert_eq!(reference.digest(), Some(&Digest::parse("sha256:abcd1234").unwrap()));
    assert_eq!(
        reference.to_string(),
        "template https://registry.test/namespace/name =1.0.0 sha256:abcd1234"
    );
}

#[rstest]
#[case("name :stable")]
#[case("template namespace/name ^1.2 || ~2.0.1")]
#[case("registry.example.com:5000/team/tool 1.0.0 - 1.4.0 sha256:0123abcd")]
#[case("oci://registry.example.com/team/tool :nightly sha256:ff")]
fn canonical_reference_round_trips(#[case] input: &str) {
    let opts = options();
    let reference = Reference::parse(input, "template", &opts).unwrap();

    let reparsed = Reference::parse(&reference.to_string(), "template", &opts).unwrap();

    assert_eq!(reparsed.to_string(), reference.to_string());
    assert_eq!(reparsed.identifier().uri(), reference.identifier().uri());
    assert_eq!(reparsed.target(), reference.target());
    assert_eq!(reparsed.digest(), reference.digest());
}

#[test]
fn new_matches_parse_for_every_target_kind() {
    let opts = options();
    let id = Identifier::parse("namespace/name", "template", &opts).unwrap();

    let channel = Reference::new(id.clone(), ":stable", None).unwrap();
    let version = Reference::new(id, "1.x", Some(Digest::parse("sha256:ab").unwrap())).unwrap();

    assert_eq!(channel.target(), &Target::Channel("stable".to_string()));
    assert_eq!(
        version.target(),
        &Target::Version(VersionConstraint::parse("1.x").unwrap())
    );
    assert_eq!(
        version,
        Reference::parse("namespace/name 1.x sha256:ab", "template", &opts).unwrap()
    );
}

#[rstest]
#[case("", ErrorKind::InvalidReference, Cause::EmptyReference)]
#[case("namespace/name", ErrorKind::InvalidReference, Cause::MissingVersionOrChannel)]
#[case("namespace/name 1.0.0 sha256:abcd oops", ErrorKind::InvalidReference, Cause::UnexpectedToken("oops".to_string()))]
#[case("namespace/name >1.0.0", ErrorKind::InvalidReference, Cause::MissingUpperBound)]
#[case("widget namespace/name 1.0.0", ErrorKind::TypeMismatch, Cause::TypeMismatch { found: "widget".to_string(), expected: "template".to_string() })]
#[case("https://registry.test 1.0.0", ErrorKind::InvalidIdentifier, Cause::MissingRegistry)]
fn reference_errors_are_categorized(
    #[case] input: &str,
    #[case] kind: ErrorKind,
    #[case] cause: Cause,
) {
    let err = Reference::parse(input, "template", &options()).unwrap_err();

    assert_eq!(err.kind(), kind);
    assert_eq!(err.cause(), &cause);
}

#[test]
fn references_are_send_and_sync() {
    fn assert_send_sync<T: Send + Sync>() {}

    assert_send_sync::<Reference>();
    assert_send_sync::<Identifier>();
    assert_send_sync::<VersionConstraint>();
}
