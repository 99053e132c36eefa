//! Subcommand handlers
//!
//! Handlers write to the given output and report success through the exit
//! code; only malformed input is an error.

use std::cmp::Ordering;
use std::io::Write;
use std::process::ExitCode;

use anyhow::Context;
use serde::Serialize;
use tracing::info;

use crucible_reference::config::Config;
use crucible_reference::{
    Digest, Identifier, IdentifierOptions, Reference, Version, VersionConstraint,
};

use crate::cli::Command;

pub fn execute(command: &Command, config: &Config, out: &mut impl Write) -> anyhow::Result<ExitCode> {
    match command {
        Command::Parse {
            reference,
            resource_type,
            json,
        } => parse_reference(&reference.join(" "), resource_type, *json, config, out),
        Command::Identifier {
            identifier,
            resource_type,
            json,
        } => parse_identifier(&identifier.join(" "), resource_type, *json, config, out),
        Command::Compare { a, b } => compare(a, b, out),
        Command::Matches {
            constraint,
            versions,
        } => matches(constraint, versions, out),
        Command::Intersect { a, b } => intersect(a, b, out),
        Command::Canonical { constraint } => canonical(constraint, out),
    }
}

#[derive(Serialize)]
#[serde(rename_all = "camelCase")]
struct IdentifierReport<'a> {
    #[serde(rename = "type")]
    resource_type: &'a str,
    registry: String,
    host: &'a str,
    #[serde(skip_serializing_if = "Option::is_none")]
    namespace: Option<&'a str>,
    #[serde(skip_serializing_if = "Option::is_none")]
    name: Option<&'a str>,
    path: String,
    uri: String,
}

impl<'a> From<&'a Identifier> for IdentifierReport<'a> {
    fn from(id: &'a Identifier) -> Self {
        Self {
            resource_type: id.resource_type(),
            registry: id.registry().to_string(),
            host: id.host(),
            namespace: id.namespace(),
            name: id.name(),
            path: id.path().into_owned(),
            uri: id.uri(),
        }
    }
}

#[derive(Serialize)]
#[serde(rename_all = "camelCase")]
struct ReferenceReport<'a> {
    canonical: String,
    #[serde(flatten)]
    identifier: IdentifierReport<'a>,
    #[serde(skip_serializing_if = "Option::is_none")]
    version: Option<&'a VersionConstraint>,
    #[serde(skip_serializing_if = "Option::is_none")]
    channel: Option<&'a str>,
    #[serde(skip_serializing_if = "Option::is_none")]
    digest: Option<&'a Digest>,
    frozen: bool,
}

impl<'a> From<&'a Reference> for ReferenceReport<'a> {
    fn from(reference: &'a Reference) -> Self {
        Self {
            canonical: reference.to_string(),
            identifier: reference.identifier().into(),
            version: reference.version(),
            channel: reference.channel(),
            digest: reference.digest(),
            frozen: reference.is_frozen(),
        }
    }
}

fn options(config: &Config) -> anyhow::Result<IdentifierOptions> {
    config
        .identifier_options()
        .context("Invalid default registry or namespace")
}

fn parse_reference(
    input: &str,
    resource_type: &str,
    json: bool,
    config: &Config,
    out: &mut impl Write,
) -> anyhow::Result<ExitCode> {
    let options = options(config)?;
    let reference = Reference::parse(input, resource_type, &options)
        .with_context(|| format!("Failed to parse reference '{input}'"))?;

    if json {
        serde_json::to_writer_pretty(&mut *out, &ReferenceReport::from(&reference))?;
        writeln!(out)?;
    } else {
        writeln!(out, "{reference}")?;
    }
    Ok(ExitCode::SUCCESS)
}

fn parse_identifier(
    input: &str,
    resource_type: &str,
    json: bool,
    config: &Config,
    out: &mut impl Write,
) -> anyhow::Result<ExitCode> {
    let options = options(config)?;
    let identifier = Identifier::parse(input, resource_type, &options)
        .with_context(|| format!("Failed to parse identifier '{input}'"))?;

    if json {
        serde_json::to_writer_pretty(&mut *out, &IdentifierReport::from(&identifier))?;
        writeln!(out)?;
    } else {
        writeln!(out, "{identifier}")?;
    }
    Ok(ExitCode::SUCCESS)
}

fn parse_version(input: &str) -> anyhow::Result<Version> {
    Version::parse(input).with_context(|| format!("Failed to parse version '{input}'"))
}

fn parse_constraint(input: &str) -> anyhow::Result<VersionConstraint> {
    VersionConstraint::parse(input).with_context(|| format!("Failed to parse constraint '{input}'"))
}

fn compare(a: &str, b: &str, out: &mut impl Write) -> anyhow::Result<ExitCode> {
    let (a, b) = (parse_version(a)?, parse_version(b)?);

    let symbol = match a.compare(&b) {
        Some(Ordering::Less) => "<",
        Some(Ordering::Equal) => "=",
        Some(Ordering::Greater) => ">",
        None => "incomparable",
    };
    writeln!(out, "{symbol}")?;
    Ok(ExitCode::SUCCESS)
}

fn matches(constraint: &str, versions: &[String], out: &mut impl Write) -> anyhow::Result<ExitCode> {
    let constraint = parse_constraint(constraint)?;

    let mut any = false;
    for version in versions {
        let matched = constraint.matches_version(&parse_version(version)?);
        any |= matched;
        writeln!(out, "{version}: {}", if matched { "match" } else { "no match" })?;
    }

    if !any {
        info!("No version matches '{}'", constraint);
        return Ok(ExitCode::FAILURE);
    }
    Ok(ExitCode::SUCCESS)
}

fn intersect(a: &str, b: &str, out: &mut impl Write) -> anyhow::Result<ExitCode> {
    let (a, b) = (parse_constraint(a)?, parse_constraint(b)?);

    let result = a
        .intersect(&b)
        .with_context(|| format!("Cannot intersect '{a}' and '{b}'"))?;
    writeln!(out, "{result}")?;
    Ok(ExitCode::SUCCESS)
}

fn canonical(constraint: &str, out: &mut impl Write) -> anyhow::Result<ExitCode> {
    writeln!(out, "{}", parse_constraint(constraint)?)?;
    Ok(ExitCode::SUCCESS)
}
