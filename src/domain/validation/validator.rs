//! Validator seams

use super::{ModelValidationError, ValidationContext};

#[cfg(test)]
use mockall::automock;

/// Checks raw model content against the rules of its model type
#[cfg_attr(test, automock)]
pub trait ModelContentValidator: Send + Sync {
    fn validate_model_content(
        &self,
        content: &[u8],
        context: &ValidationContext,
    ) -> Result<(), ModelValidationError>;
}

/// Checks a model extensions document against its contract
#[cfg_attr(test, automock)]
pub trait ModelExtensionsValidator: Send + Sync {
    fn validate_model_extensions(
        &self,
        content: &[u8],
        context: &ValidationContext,
    ) -> Result<(), ModelValidationError>;
}
