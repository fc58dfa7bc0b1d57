//! Validate and types commands - offline model checks against the built-in
//! model types

use std::path::PathBuf;

use clap::Args;

use crate::domain::validation::{ModelTypeRegistry, ValidationContext};
use crate::domain::DomainError;
use crate::infrastructure::services::{dispatch, ValidationTarget};
use crate::infrastructure::validation::builtin_model_types;

/// Arguments for the validate command
#[derive(Args, Clone, Debug)]
pub struct ValidateArgs {
    /// Model type whose rules apply
    #[arg(long = "type", short = 't')]
    pub model_type: String,

    /// Treat the file as an extensions document instead of model content
    #[arg(long)]
    pub extensions: bool,

    /// File to validate
    pub file: PathBuf,
}

impl ValidateArgs {
    fn target(&self) -> ValidationTarget {
        if self.extensions {
            ValidationTarget::Extensions
        } else {
            ValidationTarget::Content
        }
    }
}

/// Validate one file and print every problem found
pub async fn run(args: ValidateArgs) -> anyhow::Result<()> {
    let registry = builtin_model_types()?;
    let content = tokio::fs::read(&args.file)
        .await
        .map_err(|e| anyhow::anyhow!("Failed to read {}: {}", args.file.display(), e))?;

    match check(&registry, &args, &content) {
        Ok(()) => {
            println!("{}: valid {} {}", args.file.display(), args.model_type, args.target());
            Ok(())
        }
        Err(DomainError::ModelValidation(e)) => {
            println!("{}: {}", args.file.display(), e);
            for error in e.errors() {
                println!("  {}", error.description);
            }
            anyhow::bail!("{} {} validation error(s)", e.errors().len(), e.kind().as_str())
        }
        Err(e) => Err(e.into()),
    }
}

/// Print the registered model types
pub fn types() -> anyhow::Result<()> {
    let registry = builtin_model_types()?;
    for model_type in registry.types() {
        println!("{}", model_type);
    }
    Ok(())
}

fn check(
    registry: &ModelTypeRegistry,
    args: &ValidateArgs,
    content: &[u8],
) -> Result<(), DomainError> {
    let context = ValidationContext::empty(args.model_type.as_str());
    dispatch(registry, content, &context, args.target())
}
