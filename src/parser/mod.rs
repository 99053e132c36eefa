//! Parser layer
//! - cursor.rs: Whitespace token cursor
//! - patterns.rs: Token patterns (type, scheme, registry, name, path, channel, digest)
//! - identifier.rs: Identifier parser
//! - reference.rs: Reference parser, built on the identifier parser

pub(crate) mod cursor;
pub(crate) mod identifier;
pub(crate) mod patterns;
pub(crate) mod reference;
