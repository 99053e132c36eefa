//! Shared fixtures for integration tests

use crucible_reference::IdentifierOptions;

pub const REGISTRY: &str = "https://registry.test";
pub const NAMESPACE: &str = "official";

/// Identifier defaults used across the integration tests
pub fn options() -> IdentifierOptions {
    IdentifierOptions::new(REGISTRY, NAMESPACE).unwrap()
}
