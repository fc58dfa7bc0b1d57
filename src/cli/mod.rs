//! CLI module for BPM Cloud
//!
//! Provides subcommands:
//! - `serve`: HTTP API server
//! - `validate`: validate a model document offline
//! - `types`: list the registered model types

pub mod serve;
pub mod validate;

use clap::{Parser, Subcommand};

/// BPM Cloud - modeling service with per-type validation
#[derive(Parser)]
#[command(name = "bpm-cloud")]
#[command(version, about, long_about = None)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Command,
}

#[derive(Subcommand)]
pub enum Command {
    /// Run the HTTP API server
    Serve,

    /// Validate a model content or extensions file
    Validate(validate::ValidateArgs),

    /// List registered model types
    Types,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_serve() {
        let cli = Cli::try_parse_from(["bpm-cloud", "serve"]).unwrap();
        assert!(matches!(cli.command, Command::Serve));
    }

    #[test]
    fn test_parse_validate() {
        let cli = Cli::try_parse_from([
            "bpm-cloud",
            "validate",
            "--type",
            "connector",
            "--extensions",
            "model.json",
        ])
        .unwrap();

        match cli.command {
            Command::Validate(args) => {
                assert_eq!(args.model_type, "connector");
                assert!(args.extensions);
                assert_eq!(args.file.to_str(), Some("model.json"));
            }
            _ => panic!("expected validate command"),
        }
    }

    #[test]
    fn test_validate_requires_type() {
        assert!(Cli::try_parse_from(["bpm-cloud", "validate", "model.json"]).is_err());
    }
}
