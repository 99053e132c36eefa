use std::path::PathBuf;

use clap::{ArgAction, Args, Parser, Subcommand};

#[derive(Parser)]
#[command(name = "crucible-ref")]
#[command(version, about = "Parse and evaluate Crucible resource references")]
pub struct Cli {
    #[command(flatten)]
    pub global: GlobalArgs,

    #[command(subcommand)]
    pub command: Command,
}

#[derive(Args, Debug, Default)]
pub struct GlobalArgs {
    /// Config file (defaults to $XDG_CONFIG_HOME/crucible-ref/config.json)
    #[arg(long, global = true, value_name = "PATH")]
    pub config: Option<PathBuf>,

    /// Default registry URL, overriding the config file
    #[arg(long, global = true, value_name = "URL")]
    pub registry: Option<String>,

    /// Default namespace, overriding the config file
    #[arg(long, global = true, value_name = "NS")]
    pub namespace: Option<String>,

    /// Increase log verbosity (-v, -vv, -vvv)
    #[arg(short, long, global = true, action = ArgAction::Count)]
    pub verbose: u8,
}

#[derive(Subcommand, Debug)]
pub enum Command {
    /// Parse a reference and print its canonical form
    Parse {
        /// Reference tokens, e.g. `namespace/name >=1.0.0 <2.0.0`
        #[arg(required = true, value_name = "REFERENCE")]
        reference: Vec<String>,

        /// Resource type expected by the caller
        #[arg(short, long = "type", value_name = "TYPE")]
        resource_type: String,

        /// Print a JSON report instead of the canonical form
        #[arg(long)]
        json: bool,
    },

    /// Parse an identifier and print its canonical form
    Identifier {
        #[arg(required = true, value_name = "IDENTIFIER")]
        identifier: Vec<String>,

        #[arg(short, long = "type", value_name = "TYPE")]
        resource_type: String,

        #[arg(long)]
        json: bool,
    },

    /// Compare two versions
    Compare { a: String, b: String },

    /// Check versions against a constraint
    Matches {
        constraint: String,

        #[arg(required = true, value_name = "VERSION")]
        versions: Vec<String>,
    },

    /// Intersect two constraints
    Intersect { a: String, b: String },

    /// Print the canonical form of a constraint
    Canonical { constraint: String },
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn cli_definition_is_consistent() {
        use clap::CommandFactory;
        Cli::command().debug_assert();
    }

    #[test]
    fn parse_collects_reference_tokens() {
        let cli = Cli::try_parse_from([
            "crucible-ref",
            "parse",
            "--type",
            "template",
            "namespace/name",
            ">=1.0.0",
            "<2.0.0",
        ])
        .unwrap();

        match cli.command {
            Command::Parse {
                reference,
                resource_type,
                json,
            } => {
                assert_eq!(reference, vec!["namespace/name", ">=1.0.0", "<2.0.0"]);
                assert_eq!(resource_type, "template");
                assert!(!json);
            }
            other => panic!("unexpected command: {other:?}"),
        }
    }

    #[test]
    fn global_flags_work_after_subcommand() {
        let cli = Cli::try_parse_from([
            "crucible-ref",
            "canonical",
            "1.x",
            "--registry",
            "registry.example.com",
            "-vv",
        ])
        .unwrap();

        assert_eq!(cli.global.registry.as_deref(), Some("registry.example.com"));
        assert_eq!(cli.global.verbose, 2);
    }

    #[test]
    fn matches_requires_a_version() {
        assert!(Cli::try_parse_from(["crucible-ref", "matches", "^1.0.0"]).is_err());
    }
}
