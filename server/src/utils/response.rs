use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use axum::Json;
use serde::Serialize;
use serde_json::Value;
use uuid::Uuid;

/// Envelope of every successful page view.
#[derive(Serialize)]
pub struct ApiResponse<T>
where
    T: Serialize,
{
    pub success: bool,
    pub data: Option<T>,
    pub message: Option<String>,
}

#[derive(Serialize)]
pub struct ApiErrorBody {
    pub code: String,
    pub message: String,
    pub details: Option<Value>,
}

#[derive(Serialize)]
pub struct ApiErrorResponse {
    pub success: bool,
    pub error: ApiErrorBody,
}

/// The "thank you" panel shown after a form is accepted.
#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct Confirmation {
    pub form: &'static str,
    pub submitted: bool,
    pub reference: Uuid,
    pub message: String,
}

pub fn success<T>(data: T, message: impl Into<String>) -> Response
where
    T: Serialize,
{
    let body = ApiResponse {
        success: true,
        data: Some(data),
        message: Some(message.into()),
    };
    (StatusCode::OK, Json(body)).into_response()
}

pub fn confirmed(form: &'static str, message: impl Into<String>) -> Response {
    let message = message.into();
    let body = ApiResponse {
        success: true,
        data: Some(Confirmation {
            form,
            submitted: true,
            reference: Uuid::new_v4(),
            message: message.clone(),
        }),
        message: Some(message),
    };
    (StatusCode::OK, Json(body)).into_response()
}

pub fn error(
    code: &str,
    message: impl Into<String>,
    details: Option<Value>,
    status: StatusCode,
) -> Response {
    let body = ApiErrorResponse {
        success: false,
        error: ApiErrorBody {
            code: code.to_string(),
            message: message.into(),
            details,
        },
    };

    (status, Json(body)).into_response()
}
