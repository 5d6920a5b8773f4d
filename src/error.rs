use axum::{
    Json,
    http::StatusCode,
    response::{IntoResponse, Response},
};
use serde_json::json;
use thiserror::Error;

#[derive(Error, Debug)]
pub enum AppError {
    #[error("{0}")]
    MissingFields(&'static str),

    #[error("Row with ID {0} not found.")]
    RowNotFound(String),

    #[error("{0}")]
    Sheets(String),

    #[error("{0}")]
    Email(String),

    #[error("Internal error: {0}")]
    Internal(#[from] reqwest::Error),
}

impl AppError {
    fn status(&self) -> StatusCode {
        match self {
            AppError::MissingFields(_) => StatusCode::BAD_REQUEST,
            AppError::RowNotFound(_) => StatusCode::NOT_FOUND,
            AppError::Sheets(_) | AppError::Email(_) => StatusCode::BAD_GATEWAY,
            AppError::Internal(_) => StatusCode::INTERNAL_SERVER_ERROR,
        }
    }
}

impl IntoResponse for AppError {
    fn into_response(self) -> Response {
        (self.status(), Json(json!({ "error": self.to_string() }))).into_response()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_status_mapping() {
        assert_eq!(
            AppError::MissingFields("x").status(),
            StatusCode::BAD_REQUEST
        );
        assert_eq!(
            AppError::RowNotFound("abc".to_string()).status(),
            StatusCode::NOT_FOUND
        );
        assert_eq!(
            AppError::Sheets("down".to_string()).status(),
            StatusCode::BAD_GATEWAY
        );
        assert_eq!(
            AppError::Email("down".to_string()).status(),
            StatusCode::BAD_GATEWAY
        );
    }

    #[test]
    fn test_row_not_found_message() {
        let error = AppError::RowNotFound("mock-123".to_string());

        assert_eq!(error.to_string(), "Row with ID mock-123 not found.");
    }

    #[test]
    fn test_missing_fields_passes_message_through() {
        let error = AppError::MissingFields("Name, phone, and email are required.");

        assert_eq!(error.to_string(), "Name, phone, and email are required.");
    }
}
