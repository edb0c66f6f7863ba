// Copyright (c) 2025 sbksba
//
// This software is licensed under the terms of the MIT License.
// See the LICENSE file in the project root for the full license text.

// --- Custom Error Handling ---
// This is a good practice for transforming our internal errors
// (e.g., from the database) into appropriate HTTP responses.
use axum::{
    extract::Json,
    http::StatusCode,
    response::{IntoResponse, Response},
};

/// Our custom error type for the application.
///
/// Every error renders as a JSON envelope with `success: false`, so the
/// mobile client always receives a body it can parse, even on failure.
#[derive(Debug)]
pub struct AppError {
    code: StatusCode,
    message: String,
}

impl AppError {
    pub fn new(code: StatusCode, message: &str) -> Self {
        Self {
            code,
            message: message.to_string(),
        }
    }

    /// A required field is missing or invalid. Checked before any store
    /// call, so a validation failure never mutates state.
    pub fn validation(message: &str) -> Self {
        Self::new(StatusCode::BAD_REQUEST, message)
    }

    /// The given id does not resolve to an existing record.
    pub fn not_found(message: &str) -> Self {
        Self::new(StatusCode::NOT_FOUND, message)
    }

    /// A unique identifier collided at creation time.
    pub fn conflict(message: &str) -> Self {
        Self::new(StatusCode::CONFLICT, message)
    }

    pub fn code(&self) -> StatusCode {
        self.code
    }

    pub fn message(&self) -> &str {
        &self.message
    }
}

/// Allows converting an `anyhow::Error` (coming from the database layer)
/// into our `AppError`. The internal detail goes to the log channel only;
/// the caller gets a generic message.
impl From<anyhow::Error> for AppError {
    fn from(err: anyhow::Error) -> Self {
        tracing::error!("Internal server error: {:?}", err);
        Self {
            code: StatusCode::INTERNAL_SERVER_ERROR,
            message: "An internal error occurred.".to_string(),
        }
    }
}

/// Allows Axum to convert our `AppError` into an HTTP `Response`.
impl IntoResponse for AppError {
    fn into_response(self) -> Response {
        tracing::error!(
            "Responding with error: status_code={}, message={}",
            self.code.as_u16(),
            self.message
        );
        (
            self.code,
            Json(serde_json::json!({ "success": false, "error": self.message })),
        )
            .into_response()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_validation_error_maps_to_400() {
        let err = AppError::validation("Title cannot be empty.");
        assert_eq!(err.code(), StatusCode::BAD_REQUEST);
        assert_eq!(err.message(), "Title cannot be empty.");
    }

    #[test]
    fn test_internal_error_hides_detail() {
        let err: AppError = anyhow::anyhow!("connection refused (secret detail)").into();
        assert_eq!(err.code(), StatusCode::INTERNAL_SERVER_ERROR);
        assert_eq!(err.message(), "An internal error occurred.");
    }
}
