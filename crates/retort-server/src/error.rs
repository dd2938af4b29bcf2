use retort_core::{ErrorResult, to_conflict, to_not_found};
use serde::{Deserialize, Serialize};
use thiserror::Error;
use uuid::Uuid;

/// Error body shared by every endpoint
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ApiError {
    pub error: ApiErrorDetails,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ApiErrorDetails {
    /// Machine-readable category (e.g. `conflict_error`)
    pub r#type: String,
    /// Message safe to show to API consumers
    pub message: String,
}

impl ApiError {
    pub fn new(r#type: impl Into<String>, message: impl Into<String>) -> Self {
        Self {
            error: ApiErrorDetails {
                r#type: r#type.into(),
                message: message.into(),
            },
        }
    }
}

/// Item store failures
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum StoreError {
    /// No item has this id
    #[error("item {id} not found")]
    NotFound { id: Uuid },

    /// Input failed validation
    #[error("invalid item: {0}")]
    Invalid(String),

    /// Another item already uses the name
    #[error("an item named '{name}' already exists")]
    Duplicate { name: String },

    /// The store holds its configured maximum
    #[error("item store is full ({capacity} items)")]
    Full { capacity: usize },
}

impl StoreError {
    /// Machine-readable error type for the response body
    pub const fn error_type(&self) -> &'static str {
        match self {
            Self::NotFound { .. } => "not_found_error",
            Self::Invalid(_) => "invalid_request_error",
            Self::Duplicate { .. } => "conflict_error",
            Self::Full { .. } => "capacity_error",
        }
    }
}

impl From<StoreError> for ErrorResult<ApiError> {
    fn from(error: StoreError) -> Self {
        let body = ApiError::new(error.error_type(), error.to_string());

        match error {
            StoreError::NotFound { .. } => to_not_found(body),
            StoreError::Invalid(_) => Self::unprocessable_entity(body),
            StoreError::Duplicate { .. } => to_conflict(body),
            StoreError::Full { .. } => Self::server_error(body),
        }
    }
}
