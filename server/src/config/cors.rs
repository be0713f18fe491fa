use axum::http::{header, HeaderValue, Method};
use tower_http::cors::{AllowOrigin, CorsLayer};

const PREFLIGHT_MAX_AGE_SECS: u64 = 86400;

/// The site is read-only apart from form posts, so only GET and POST are
/// allowed and no credentials are involved.
pub fn create_cors_layer(origins: &str) -> CorsLayer {
    CorsLayer::new()
        .allow_origin(parse_allowed_origins(origins))
        .allow_methods([Method::GET, Method::POST, Method::OPTIONS])
        .allow_headers([header::CONTENT_TYPE, header::ACCEPT, header::ORIGIN])
        .expose_headers([header::CONTENT_LENGTH, header::CONTENT_TYPE])
        .max_age(std::time::Duration::from_secs(PREFLIGHT_MAX_AGE_SECS))
}

fn parse_allowed_origins(origins: &str) -> AllowOrigin {
    if origins.trim() == "*" {
        tracing::info!("CORS: Allowing any origin");
        return AllowOrigin::any();
    }

    let origins: Vec<HeaderValue> = origins
        .split(',')
        .map(str::trim)
        .filter(|origin| !origin.is_empty())
        .filter_map(|origin| match origin.parse::<HeaderValue>() {
            Ok(value) => {
                tracing::debug!("CORS: Allowing origin: {}", origin);
                Some(value)
            }
            Err(e) => {
                tracing::warn!("CORS: Invalid origin '{}': {}", origin, e);
                None
            }
        })
        .collect();

    if origins.is_empty() {
        tracing::warn!("CORS: No valid origins configured, allowing any origin");
        AllowOrigin::any()
    } else {
        tracing::info!("CORS: Configured with {} allowed origin(s)", origins.len());
        AllowOrigin::list(origins)
    }
}
