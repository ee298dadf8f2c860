//! Web error types for the employee desk server.

use axum::{
    extract::rejection::JsonRejection,
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use serde::Serialize;

use crate::export::ExportError;
use crate::schema::ValidationError;
use crate::store::StoreError;

/// Error type for web API operations.
#[derive(Debug, thiserror::Error)]
pub enum WebError {
    /// One or more form fields were rejected.
    #[error("Validation failed: {} field(s)", .0.len())]
    Validation(Vec<ValidationError>),

    /// Request body could not be read as JSON at all.
    #[error("Bad request: {0}")]
    BadRequest(String),

    /// A record with the same identity key is already in the store.
    #[error("Conflict: {0}")]
    Conflict(String),

    /// Removal of a position that no longer exists.
    #[error("Not found: {0}")]
    NotFound(String),

    /// Export serialization failed.
    #[error("Export error: {0}")]
    Export(#[from] ExportError),

    /// Internal server error.
    #[error("Internal error: {0}")]
    Internal(String),
}

/// Error response body.
#[derive(Serialize)]
struct ErrorResponse {
    success: bool,
    error: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    details: Option<String>,
    #[serde(skip_serializing_if = "Vec::is_empty")]
    fields: Vec<ValidationError>,
}

impl IntoResponse for WebError {
    fn into_response(self) -> Response {
        let (status, error_message, details, fields) = match self {
            WebError::Validation(fields) => (
                StatusCode::UNPROCESSABLE_ENTITY,
                "Validation Failed",
                None,
                fields,
            ),
            WebError::BadRequest(msg) => {
                (StatusCode::BAD_REQUEST, "Bad Request", Some(msg), Vec::new())
            }
            WebError::Conflict(msg) => (StatusCode::CONFLICT, "Duplicate", Some(msg), Vec::new()),
            WebError::NotFound(msg) => (StatusCode::NOT_FOUND, "Not Found", Some(msg), Vec::new()),
            WebError::Export(e) => {
                tracing::error!("Export error: {}", e);
                (
                    StatusCode::INTERNAL_SERVER_ERROR,
                    "Export Error",
                    None,
                    Vec::new(),
                )
            }
            WebError::Internal(msg) => {
                tracing::error!("Internal server error: {}", msg);
                (
                    StatusCode::INTERNAL_SERVER_ERROR,
                    "Internal Server Error",
                    None,
                    Vec::new(),
                )
            }
        };

        let body = Json(ErrorResponse {
            success: false,
            error: error_message.to_string(),
            details,
            fields,
        });

        (status, body).into_response()
    }
}

impl From<StoreError> for WebError {
    fn from(err: StoreError) -> Self {
        match err {
            StoreError::Duplicate { .. } => WebError::Conflict(err.to_string()),
            StoreError::IndexOutOfRange { .. } => WebError::NotFound(err.to_string()),
        }
    }
}

impl From<Vec<ValidationError>> for WebError {
    fn from(errors: Vec<ValidationError>) -> Self {
        WebError::Validation(errors)
    }
}

/// Form fields a JSON data error can point at
const FORM_FIELDS: [&str; 6] = [
    "category",
    "name",
    "salary",
    "team_size",
    "language",
    "duration_months",
];

/// Attribute a JSON data error to the form field it names.
///
/// Errors with no field path (wrong top-level shape) land on `body`.
fn rejected_field(text: &str) -> ValidationError {
    let detail = text.split_once(": ").map_or(text, |(_, rest)| rest);

    for field in FORM_FIELDS {
        if let Some(message) = detail.strip_prefix(field).and_then(|r| r.strip_prefix(": ")) {
            return ValidationError {
                field: field.to_string(),
                message: message.to_string(),
            };
        }
        if detail.contains(&format!("missing field `{}`", field)) {
            return ValidationError {
                field: field.to_string(),
                message: detail.to_string(),
            };
        }
    }

    ValidationError {
        field: "body".to_string(),
        message: detail.to_string(),
    }
}

impl From<JsonRejection> for WebError {
    fn from(rejection: JsonRejection) -> Self {
        match rejection {
            JsonRejection::JsonDataError(e) => {
                WebError::Validation(vec![rejected_field(&e.body_text())])
            }
            other => WebError::BadRequest(other.body_text()),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const PREFIX: &str = "Failed to deserialize the JSON body into the target type";

    #[test]
    fn test_rejected_field_from_path() {
        let err = rejected_field(&format!(
            "{}: salary: invalid type: floating point `5000.5`, expected i64 at line 1 column 52",
            PREFIX
        ));
        assert_eq!(err.field, "salary");
        assert!(err.message.starts_with("invalid type: floating point"));
    }

    #[test]
    fn test_rejected_field_missing() {
        let err = rejected_field(&format!("{}: missing field `name` at line 1 column 40", PREFIX));
        assert_eq!(err.field, "name");
        assert!(err.message.contains("missing field `name`"));
    }

    #[test]
    fn test_rejected_field_without_path() {
        let err = rejected_field(&format!(
            "{}: invalid type: string \"x\", expected struct RecordForm at line 1 column 3",
            PREFIX
        ));
        assert_eq!(err.field, "body");
    }
}
