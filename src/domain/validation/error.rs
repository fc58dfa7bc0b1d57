//! Validation error model

use serde::{Deserialize, Serialize};
use thiserror::Error;

/// A single validation violation
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ValidationError {
    /// Bare violation message, e.g. `required key [id] not found`
    pub problem: String,
    /// Violation message located in the document, e.g. `#/name: ...`
    pub description: String,
}

impl ValidationError {
    pub fn new(problem: impl Into<String>, description: impl Into<String>) -> Self {
        Self {
            problem: problem.into(),
            description: description.into(),
        }
    }

    /// Create an error located at a JSON pointer
    pub fn at(pointer: &str, problem: impl Into<String>) -> Self {
        let problem = problem.into();
        let description = format!("{}: {}", pointer, problem);
        Self {
            problem,
            description,
        }
    }
}

/// Discriminator between the two validation failure kinds
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ValidationErrorKind {
    Syntactic,
    Semantic,
}

impl ValidationErrorKind {
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Syntactic => "syntactic",
            Self::Semantic => "semantic",
        }
    }
}

/// Failure raised by a content or extensions validator
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ModelValidationError {
    /// Input could not be parsed at all
    #[error("Syntactic model validation errors encountered: {}", first_problem(.errors))]
    Syntactic { errors: Vec<ValidationError> },

    /// Input parsed but violates the rules of its model type
    #[error("Semantic model validation errors encountered: {} schema violations found", .errors.len())]
    Semantic { errors: Vec<ValidationError> },
}

fn first_problem(errors: &[ValidationError]) -> &str {
    errors.first().map(|e| e.problem.as_str()).unwrap_or("")
}

impl ModelValidationError {
    pub fn syntactic(errors: Vec<ValidationError>) -> Self {
        Self::Syntactic { errors }
    }

    pub fn semantic(errors: Vec<ValidationError>) -> Self {
        Self::Semantic { errors }
    }

    /// Syntactic failure carrying one parser diagnostic
    pub fn unparsable(message: impl Into<String>) -> Self {
        let message = message.into();
        Self::syntactic(vec![ValidationError::new(message.clone(), message)])
    }

    pub fn kind(&self) -> ValidationErrorKind {
        match self {
            Self::Syntactic { .. } => ValidationErrorKind::Syntactic,
            Self::Semantic { .. } => ValidationErrorKind::Semantic,
        }
    }

    pub fn errors(&self) -> &[ValidationError] {
        match self {
            Self::Syntactic { errors } | Self::Semantic { errors } => errors,
        }
    }

    pub fn into_errors(self) -> Vec<ValidationError> {
        match self {
            Self::Syntactic { errors } | Self::Semantic { errors } => errors,
        }
    }

    pub fn problems(&self) -> Vec<&str> {
        self.errors().iter().map(|e| e.problem.as_str()).collect()
    }
}
