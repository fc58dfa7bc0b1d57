//! Model validation service - dispatches a model to its type's validators

use std::fmt;
use std::sync::Arc;

use metrics::counter;
use tracing::{debug, info};

use crate::domain::model::{Model, ModelId, ModelRepository};
use crate::domain::project::ProjectRepository;
use crate::domain::validation::{ModelTypeRegistry, ValidationContext};
use crate::domain::DomainError;

/// Which half of a model is being validated
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ValidationTarget {
    Content,
    Extensions,
}

impl ValidationTarget {
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Content => "content",
            Self::Extensions => "extensions",
        }
    }
}

impl fmt::Display for ValidationTarget {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Resolves a model, builds its validation context and runs exactly one
/// validator of the model's type
pub struct ModelValidationService {
    models: Arc<dyn ModelRepository>,
    projects: Arc<dyn ProjectRepository>,
    registry: Arc<ModelTypeRegistry>,
}

impl ModelValidationService {
    pub fn new(
        models: Arc<dyn ModelRepository>,
        projects: Arc<dyn ProjectRepository>,
        registry: Arc<ModelTypeRegistry>,
    ) -> Self {
        Self {
            models,
            projects,
            registry,
        }
    }

    pub fn registry(&self) -> &ModelTypeRegistry {
        &self.registry
    }

    /// Validate candidate content bytes for a stored model
    pub async fn validate_content(&self, model_id: &str, content: &[u8]) -> Result<(), DomainError> {
        self.validate(model_id, content, ValidationTarget::Content).await
    }

    /// Validate a candidate extensions document for a stored model
    pub async fn validate_extensions(
        &self,
        model_id: &str,
        content: &[u8],
    ) -> Result<(), DomainError> {
        self.validate(model_id, content, ValidationTarget::Extensions)
            .await
    }

    pub async fn validate(
        &self,
        model_id: &str,
        content: &[u8],
        target: ValidationTarget,
    ) -> Result<(), DomainError> {
        let model = self.find_model(model_id).await?;
        let context = self.build_context(&model).await?;

        debug!(
            model_id = %model_id,
            model_type = %model.model_type(),
            target = %target,
            models_in_scope = context.models().len(),
            "Validating model"
        );

        dispatch(&self.registry, content, &context, target)
    }

    async fn find_model(&self, model_id: &str) -> Result<Model, DomainError> {
        if model_id.trim().is_empty() {
            return Err(DomainError::invalid_id("Model ID cannot be empty"));
        }

        self.models
            .get(&ModelId::new(model_id))
            .await?
            .ok_or_else(|| DomainError::not_found(format!("Model '{}' not found", model_id)))
    }

    async fn build_context(&self, model: &Model) -> Result<ValidationContext, DomainError> {
        let Some(project_id) = model.project_id() else {
            return Ok(ValidationContext::for_model(model, None, Vec::new()));
        };

        let project = self.projects.get(project_id).await?;
        let siblings = self.models.list_by_project(project_id).await?;

        Ok(ValidationContext::for_model(model, project, siblings))
    }
}

/// Run the validator registered for the context's model type
pub fn dispatch(
    registry: &ModelTypeRegistry,
    content: &[u8],
    context: &ValidationContext,
    target: ValidationTarget,
) -> Result<(), DomainError> {
    let model_type = context.model_type();
    let validators = registry.require(model_type)?;

    let result = match target {
        ValidationTarget::Content => validators
            .content()
            .validate_model_content(content, context),
        ValidationTarget::Extensions => validators
            .extensions()
            .validate_model_extensions(content, context),
    };

    let outcome = match &result {
        Ok(()) => "valid",
        Err(e) => e.kind().as_str(),
    };

    counter!(
        "model_validations_total",
        "model_type" => model_type.to_string(),
        "target" => target.as_str(),
        "outcome" => outcome
    )
    .increment(1);

    if let Err(e) = &result {
        info!(
            model_type = %model_type,
            target = %target,
            kind = %e.kind().as_str(),
            errors = e.errors().len(),
            "Model validation failed"
        );
    }

    result.map_err(DomainError::from)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::model::InMemoryModelRepository;
    use crate::domain::project::{InMemoryProjectRepository, Project, ProjectId};
    use crate::domain::validation::{
        MockModelContentValidator, MockModelExtensionsValidator, ModelValidationError,
        ValidationError, ValidationErrorKind,
    };

    struct Fixture {
        service: ModelValidationService,
        models: Arc<InMemoryModelRepository>,
        projects: Arc<InMemoryProjectRepository>,
    }

    fn fixture(
        content: MockModelContentValidator,
        extensions: MockModelExtensionsValidator,
    ) -> Fixture {
        let models = Arc::new(InMemoryModelRepository::new());
        let projects = Arc::new(InMemoryProjectRepository::new());
        let registry =
            ModelTypeRegistry::new().register("json", Arc::new(content), Arc::new(extensions));

        Fixture {
            service: ModelValidationService::new(
                models.clone(),
                projects.clone(),
                Arc::new(registry),
            ),
            models,
            projects,
        }
    }

    async fn store_model(models: &InMemoryModelRepository, name: &str) -> Model {
        models
            .create(Model::new(ModelId::new(name), name, "json"))
            .await
            .unwrap()
    }

    #[tokio::test]
    async fn test_content_endpoint_runs_only_content_validator() {
        let mut content = MockModelContentValidator::new();
        content
            .expect_validate_model_content()
            .withf(|bytes, ctx| {
                bytes == &b"{}"[..] && ctx.model_type() == "json" && !ctx.is_empty()
            })
            .times(1)
            .returning(|_, _| Ok(()));
        let mut extensions = MockModelExtensionsValidator::new();
        extensions.expect_validate_model_extensions().times(0);

        let f = fixture(content, extensions);
        store_model(&f.models, "simple-model").await;

        f.service.validate_content("simple-model", b"{}").await.unwrap();
    }

    #[tokio::test]
    async fn test_extensions_endpoint_runs_only_extensions_validator() {
        let mut content = MockModelContentValidator::new();
        content.expect_validate_model_content().times(0);
        let mut extensions = MockModelExtensionsValidator::new();
        extensions
            .expect_validate_model_extensions()
            .times(1)
            .returning(|_, _| {
                Err(ModelValidationError::semantic(vec![ValidationError::at(
                    "#",
                    "required key [id] not found",
                )]))
            });

        let f = fixture(content, extensions);
        store_model(&f.models, "simple-model").await;

        let err = f
            .service
            .validate_extensions("simple-model", b"{}")
            .await
            .unwrap_err();

        match err {
            DomainError::ModelValidation(e) => {
                assert_eq!(e.kind(), ValidationErrorKind::Semantic);
                assert_eq!(e.problems(), vec!["required key [id] not found"]);
            }
            other => panic!("unexpected error: {:?}", other),
        }
    }

    #[tokio::test]
    async fn test_unknown_model_runs_no_validator() {
        let mut content = MockModelContentValidator::new();
        content.expect_validate_model_content().times(0);
        let mut extensions = MockModelExtensionsValidator::new();
        extensions.expect_validate_model_extensions().times(0);

        let f = fixture(content, extensions);

        assert!(matches!(
            f.service.validate_content("missing", b"{}").await,
            Err(DomainError::NotFound { .. })
        ));
        assert!(matches!(
            f.service.validate_extensions("", b"{}").await,
            Err(DomainError::InvalidId { .. })
        ));
    }

    #[tokio::test]
    async fn test_unregistered_type_is_validation_error() {
        let f = fixture(
            MockModelContentValidator::new(),
            MockModelExtensionsValidator::new(),
        );
        f.models
            .create(Model::new(ModelId::new("dmn-1"), "dmn-1", "decision-table"))
            .await
            .unwrap();

        assert!(matches!(
            f.service.validate_content("dmn-1", b"{}").await,
            Err(DomainError::Validation { .. })
        ));
    }

    #[tokio::test]
    async fn test_context_includes_project_siblings() {
        let mut content = MockModelContentValidator::new();
        content
            .expect_validate_model_content()
            .withf(|_, ctx| {
                ctx.project().map(|p| p.name()) == Some("invoicing")
                    && ctx.models().len() == 2
                    && ctx.models()[0].name() == "invoice-form"
                    && ctx.find_model_by_name("invoice-connector").is_some()
            })
            .times(1)
            .returning(|_, _| Ok(()));

        let f = fixture(content, MockModelExtensionsValidator::new());
        let project = f
            .projects
            .create(Project::new(ProjectId::new("p-1"), "invoicing"))
            .await
            .unwrap();

        for name in ["invoice-form", "invoice-connector"] {
            f.models
                .create(
                    Model::new(ModelId::new(name), name, "json")
                        .with_project(project.id().clone()),
                )
                .await
                .unwrap();
        }
        store_model(&f.models, "unrelated").await;

        f.service.validate_content("invoice-form", b"{}").await.unwrap();
    }
}
