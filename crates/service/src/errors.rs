use thiserror::Error;

#[derive(Debug, Error)]
pub enum ServiceError {
    #[error("validation error: {0}")]
    Validation(String),
    #[error("not found: {0}")]
    NotFound(String),
    #[error("storage error: {0}")]
    Db(String),
    #[error("model error: {0}")]
    Model(#[from] models::errors::ModelError),
}

impl ServiceError {
    pub fn not_found(entity: &str) -> Self { Self::NotFound(format!("{} not found", entity)) }

    /// True for failures caused by the caller's input rather than storage.
    pub fn is_invalid_input(&self) -> bool {
        matches!(
            self,
            ServiceError::Validation(_) | ServiceError::Model(models::errors::ModelError::Validation(_))
        )
    }
}

pub(crate) fn db_err(e: impl std::fmt::Display) -> ServiceError {
    ServiceError::Db(e.to_string())
}
