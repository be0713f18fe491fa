use axum::routing::{get, post};
use axum::Router;
use tower_http::trace::TraceLayer;

use crate::config::{create_cors_layer, create_site_headers_layer};
use crate::handlers::{events, forms, health_check, not_found, pages};
use crate::state::AppState;

/// The site's route table. `/events/calendar` and `/events/past` take
/// precedence over `/events/:slug`.
pub fn create_routes(state: AppState) -> Router {
    let site_headers = create_site_headers_layer(&state.config);
    let cors = create_cors_layer(&state.config.cors_allowed_origins);

    Router::new()
        .route("/health", get(health_check))
        .route("/", get(pages::home))
        .route("/settings", get(pages::settings))
        .route("/about", get(pages::about))
        .route("/about/board", get(pages::board))
        .route("/about/awards", get(pages::awards))
        .route("/about/reports", get(pages::reports))
        .route("/events", get(events::list_upcoming))
        .route("/events/calendar", get(events::calendar))
        .route("/events/past", get(events::list_past))
        .route("/events/:slug", get(events::detail))
        .route("/volunteer", get(pages::volunteer).post(forms::volunteer))
        .route("/contact", get(pages::contact).post(forms::contact))
        .route("/donate", get(pages::donate).post(forms::donate))
        .route("/newsletter", post(forms::newsletter))
        .fallback(not_found)
        .with_state(state)
        .layer(site_headers)
        .layer(TraceLayer::new_for_http())
        .layer(cors)
}
