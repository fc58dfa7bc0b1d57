//! Model type strategy table

use std::collections::BTreeMap;
use std::fmt;
use std::sync::Arc;

use super::{ModelContentValidator, ModelExtensionsValidator};
use crate::domain::DomainError;

/// The validator pair registered for one model type
#[derive(Clone)]
pub struct ModelTypeValidators {
    content: Arc<dyn ModelContentValidator>,
    extensions: Arc<dyn ModelExtensionsValidator>,
}

impl ModelTypeValidators {
    pub fn new(
        content: Arc<dyn ModelContentValidator>,
        extensions: Arc<dyn ModelExtensionsValidator>,
    ) -> Self {
        Self {
            content,
            extensions,
        }
    }

    pub fn content(&self) -> &Arc<dyn ModelContentValidator> {
        &self.content
    }

    pub fn extensions(&self) -> &Arc<dyn ModelExtensionsValidator> {
        &self.extensions
    }
}

/// Maps a model type tag to its content and extensions validators
#[derive(Clone, Default)]
pub struct ModelTypeRegistry {
    types: BTreeMap<String, ModelTypeValidators>,
}

impl ModelTypeRegistry {
    pub fn new() -> Self {
        Self::default()
    }

    /// Register (or replace) the validators of a model type
    pub fn register(
        mut self,
        model_type: impl Into<String>,
        content: Arc<dyn ModelContentValidator>,
        extensions: Arc<dyn ModelExtensionsValidator>,
    ) -> Self {
        self.types.insert(
            model_type.into(),
            ModelTypeValidators::new(content, extensions),
        );
        self
    }

    pub fn get(&self, model_type: &str) -> Option<&ModelTypeValidators> {
        self.types.get(model_type)
    }

    /// Validators of a model type, or a validation error for unknown tags
    pub fn require(&self, model_type: &str) -> Result<&ModelTypeValidators, DomainError> {
        self.get(model_type).ok_or_else(|| {
            DomainError::validation(format!("Unknown model type '{}'", model_type))
        })
    }

    pub fn contains(&self, model_type: &str) -> bool {
        self.types.contains_key(model_type)
    }

    /// Registered type tags, sorted
    pub fn types(&self) -> Vec<&str> {
        self.types.keys().map(String::as_str).collect()
    }
}

impl fmt::Debug for ModelTypeRegistry {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("ModelTypeRegistry")
            .field("types", &self.types())
            .finish()
    }
}
