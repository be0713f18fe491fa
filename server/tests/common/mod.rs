#![allow(dead_code)]

use axum::body::Body;
use axum::http::{header, Method, Request, Response};
use axum::Router;
use chrono::NaiveDate;
use http_body_util::BodyExt;
use serde_json::Value;
use tower::ServiceExt;

use viva_server::config::Config;
use viva_server::data::SiteData;
use viva_server::routes::create_routes;
use viva_server::state::AppState;

/// Router over the bundled dataset with "today" pinned to 2024-03-10.
pub fn build_test_app() -> Router {
    let data = SiteData::bundled().expect("bundled dataset loads");
    let today = NaiveDate::from_ymd_opt(2024, 3, 10).unwrap();
    create_routes(AppState::new(data, Config::default()).with_today(today))
}

pub async fn get(app: Router, uri: &str) -> Response<Body> {
    let request = Request::builder()
        .method(Method::GET)
        .uri(uri)
        .body(Body::empty())
        .unwrap();
    app.oneshot(request).await.unwrap()
}

pub async fn post_json(app: Router, uri: &str, body: Value) -> Response<Body> {
    let request = Request::builder()
        .method(Method::POST)
        .uri(uri)
        .header(header::CONTENT_TYPE, "application/json")
        .body(Body::from(body.to_string()))
        .unwrap();
    app.oneshot(request).await.unwrap()
}

pub async fn body_json(response: Response<Body>) -> Value {
    let bytes = response.into_body().collect().await.unwrap().to_bytes();
    serde_json::from_slice(&bytes).unwrap()
}
