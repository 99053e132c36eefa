//! Token patterns shared by the identifier and reference parsers

use std::sync::LazyLock;

use regex::Regex;

fn compile(pattern: &str) -> Regex {
    Regex::new(pattern).expect("a valid regular expression")
}

/// Resource type: lowercase alphabetic only
pub(crate) static TYPE_PATTERN: LazyLock<Regex> = LazyLock::new(|| compile(r"^[a-z]+$"));

/// URI scheme
pub(crate) static SCHEME_PATTERN: LazyLock<Regex> =
    LazyLock::new(|| compile(r"^[a-z][a-z0-9+.-]*$"));

/// Registry host: DNS-like labels with at least one dot, optional trailing
/// dot and port
pub(crate) static REGISTRY_PATTERN: LazyLock<Regex> = LazyLock::new(|| {
    compile(
        r"^[a-zA-Z0-9]([a-zA-Z0-9-]*[a-zA-Z0-9])?(\.([a-zA-Z0-9]([a-zA-Z0-9-]*[a-zA-Z0-9])?))+\.?(:[0-9]+)?$",
    )
});

/// Namespace or name in the default registry
pub(crate) static NAME_PATTERN: LazyLock<Regex> =
    LazyLock::new(|| compile(r"^[a-z]([a-z0-9-]{0,126}[a-z0-9])?$"));

/// Resource path in a non-default registry
pub(crate) static PATH_PATTERN: LazyLock<Regex> = LazyLock::new(|| compile(r"^[a-z0-9/_.-]+$"));

/// Channel: colon prefix, lowercase alphanumeric with hyphens
pub(crate) static CHANNEL_PATTERN: LazyLock<Regex> =
    LazyLock::new(|| compile(r"^:[a-z][a-z0-9-]*$"));

/// Digest as it appears inside a reference (lowercase hex)
pub(crate) static DIGEST_PATTERN: LazyLock<Regex> =
    LazyLock::new(|| compile(r"^[a-z0-9]+:[a-f0-9]+$"));

/// Whether a token could be a registry host (`example.com`, `localhost:5000`)
pub(crate) fn looks_like_registry(s: &str) -> bool {
    s.contains(['.', ':'])
}

/// Whether a token starts a version constraint
pub(crate) fn looks_like_version(s: &str) -> bool {
    s.starts_with(|c: char| matches!(c, '>' | '<' | '=' | '^' | '~' | 'v' | 'V') || c.is_ascii_digit())
}
