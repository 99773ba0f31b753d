use serde::{Deserialize, Serialize};

/// Corpo de erro padrão: `{ "error": ..., "details"?: ... }`
#[derive(Debug, Clone, Serialize, Deserialize, utoipa::ToSchema)]
pub struct ErrorResponse {
    pub error: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub details: Option<String>,
}

impl ErrorResponse {
    pub fn new(error: impl Into<String>) -> Self {
        ErrorResponse {
            error: error.into(),
            details: None,
        }
    }

    pub fn with_details(error: impl Into<String>, details: impl ToString) -> Self {
        ErrorResponse {
            error: error.into(),
            details: Some(details.to_string()),
        }
    }
}
