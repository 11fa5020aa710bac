use thiserror::Error;

/// Failures that stop the engine before any output is produced.
#[derive(Debug, Clone, PartialEq, Error)]
pub enum RecommendationError {
    #[error("Validation error on {field}: {message}")]
    Validation { field: String, message: String },

    #[error("Treatment catalog is empty")]
    EmptyCatalog,
}

impl RecommendationError {
    pub fn validation(field: impl Into<String>, message: impl Into<String>) -> Self {
        RecommendationError::Validation {
            field: field.into(),
            message: message.into(),
        }
    }
}
