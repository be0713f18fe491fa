use axum::response::Response;
use serde::Serialize;

use crate::utils::response::success;
use crate::utils::AppError;

pub mod events;
pub mod forms;
pub mod pages;

#[derive(Serialize)]
struct HealthPayload {
    status: &'static str,
    service: &'static str,
}

pub async fn health_check() -> Response {
    let payload = HealthPayload {
        status: "ok",
        service: "viva-site",
    };

    success(payload, "Health check successful")
}

pub async fn not_found() -> AppError {
    AppError::NotFound {
        message: "Page not found".to_string(),
        back_href: "/",
    }
}
