use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use serde_json::{json, Value};
use thiserror::Error;
use tracing::{error, warn};

use crate::directory::calendar::CalendarError;
use crate::forms::FieldErrors;
use crate::utils::response::error as error_response;

#[derive(Debug, Error)]
pub enum AppError {
    #[error("Validation error: {0}")]
    ValidationError(String),

    #[error("Form has {} invalid field(s)", .0.len())]
    FormRejected(FieldErrors),

    #[error("Resource not found: {message}")]
    NotFound {
        message: String,
        back_href: &'static str,
    },

    #[error("Internal server error")]
    InternalServerError(String),
}

impl AppError {
    pub fn event_not_found(slug: &str) -> Self {
        AppError::NotFound {
            message: format!("No event matches '{}'", slug),
            back_href: "/events",
        }
    }

    pub fn status_code(&self) -> StatusCode {
        match self {
            AppError::ValidationError(_) => StatusCode::BAD_REQUEST,
            AppError::FormRejected(_) => StatusCode::UNPROCESSABLE_ENTITY,
            AppError::NotFound { .. } => StatusCode::NOT_FOUND,
            AppError::InternalServerError(_) => StatusCode::INTERNAL_SERVER_ERROR,
        }
    }

    pub fn code(&self) -> &'static str {
        match self {
            AppError::ValidationError(_) => "VALIDATION_ERROR",
            AppError::FormRejected(_) => "FORM_INVALID",
            AppError::NotFound { .. } => "NOT_FOUND",
            AppError::InternalServerError(_) => "INTERNAL_SERVER_ERROR",
        }
    }

    fn log(&self) {
        match self {
            AppError::ValidationError(msg) => {
                warn!(message = %msg, "Rejected request");
            }
            AppError::FormRejected(errors) => {
                let fields: Vec<&str> = errors.keys().copied().collect();
                warn!(?fields, "Form submission rejected");
            }
            AppError::NotFound { message, .. } => {
                warn!(message = %message, "Resource not found");
            }
            AppError::InternalServerError(msg) => {
                error!(error = ?self, message = %msg, "Application error");
            }
        }
    }
}

impl From<CalendarError> for AppError {
    fn from(e: CalendarError) -> Self {
        AppError::ValidationError(e.to_string())
    }
}

impl IntoResponse for AppError {
    fn into_response(self) -> Response {
        let status = self.status_code();
        let code = self.code();

        self.log();

        let (public_message, details): (String, Option<Value>) = match &self {
            AppError::ValidationError(msg) | AppError::InternalServerError(msg) => {
                (msg.clone(), None)
            }
            AppError::FormRejected(errors) => (
                "Please correct the highlighted fields".to_string(),
                Some(json!({ "fields": errors })),
            ),
            AppError::NotFound { message, back_href } => {
                (message.clone(), Some(json!({ "backHref": back_href })))
            }
        };

        error_response(code, public_message, details, status)
    }
}
