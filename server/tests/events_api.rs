//! Integration tests for the event list, calendar and detail views.

mod common;

use axum::http::StatusCode;
use common::{body_json, build_test_app, get};
use serde_json::Value;

fn slugs(json: &Value) -> Vec<String> {
    json["data"]["events"]["items"]
        .as_array()
        .unwrap()
        .iter()
        .map(|e| e["slug"].as_str().unwrap().to_string())
        .collect()
}

// ---------------------------------------------------------------------------
// List view
// ---------------------------------------------------------------------------

#[tokio::test]
async fn upcoming_list_is_paginated() {
    let response = get(build_test_app(), "/events").await;
    assert_eq!(response.status(), StatusCode::OK);

    let json = body_json(response).await;
    assert_eq!(json["success"], true);
    assert_eq!(json["data"]["scope"], "upcoming");
    assert_eq!(json["data"]["events"]["totalItems"], 7);
    assert_eq!(json["data"]["events"]["totalPages"], 2);
    assert_eq!(json["data"]["events"]["hasNext"], true);
    assert_eq!(slugs(&json).len(), 6);
    assert!(json["data"].get("emptyState").is_none());

    let json = body_json(get(build_test_app(), "/events?page=2").await).await;
    assert_eq!(slugs(&json), vec!["spring-gala-fundraiser"]);
}

#[tokio::test]
async fn type_filter_keeps_dataset_order() {
    let json = body_json(get(build_test_app(), "/events?type=community-service").await).await;
    assert_eq!(
        slugs(&json),
        vec![
            "community-cleanup-march",
            "food-bank-volunteering",
            "community-garden-project"
        ]
    );
    assert_eq!(json["data"]["filter"]["type"], "community-service");
}

#[tokio::test]
async fn tag_filter_intersects() {
    let json = body_json(get(build_test_app(), "/events?tags=food-security,gala").await).await;
    assert_eq!(
        slugs(&json),
        vec![
            "food-bank-volunteering",
            "community-garden-project",
            "spring-gala-fundraiser"
        ]
    );
}

#[tokio::test]
async fn search_matches_title_or_location() {
    let json = body_json(get(build_test_app(), "/events?search=ubc").await).await;
    assert_eq!(slugs(&json), vec!["youth-leadership-summit"]);
}

#[tokio::test]
async fn empty_result_offers_clear_filters() {
    let json = body_json(get(build_test_app(), "/events?type=career&tags=gala").await).await;
    assert_eq!(json["data"]["events"]["totalItems"], 0);
    assert_eq!(json["data"]["events"]["page"], 1);
    assert_eq!(json["data"]["emptyState"]["clearFiltersHref"], "/events");
}

#[tokio::test]
async fn unknown_type_is_rejected() {
    let response = get(build_test_app(), "/events?type=concert").await;
    assert_eq!(response.status(), StatusCode::BAD_REQUEST);
    let json = body_json(response).await;
    assert_eq!(json["success"], false);
    assert_eq!(json["error"]["code"], "VALIDATION_ERROR");
}

#[tokio::test]
async fn past_list_only_contains_past_events() {
    let json = body_json(get(build_test_app(), "/events/past?type=workshop").await).await;
    assert_eq!(json["data"]["scope"], "past");
    assert_eq!(
        slugs(&json),
        vec!["youth-leadership-january", "seniors-tech-workshop"]
    );
    let items = json["data"]["events"]["items"].as_array().unwrap();
    assert!(items.iter().all(|e| e["isPast"] == true));
    assert!(items.iter().all(|e| e["recap"]["hoursServed"].is_number()));
}

// ---------------------------------------------------------------------------
// Calendar
// ---------------------------------------------------------------------------

#[tokio::test]
async fn calendar_defaults_to_current_month() {
    let json = body_json(get(build_test_app(), "/events/calendar").await).await;
    let grid = &json["data"];
    assert_eq!(grid["label"], "March 2024");
    assert_eq!(grid["leadingBlanks"], 5);
    assert_eq!(grid["daysInMonth"], 31);
    assert_eq!(grid["cells"].as_array().unwrap().len(), 36);
    assert_eq!(grid["prev"]["month"], 2);
    assert_eq!(grid["next"]["month"], 4);

    let cells = grid["cells"].as_array().unwrap();
    let day = |d: u64| cells.iter().find(|c| c["day"] == d).unwrap();
    assert_eq!(day(10)["isToday"], true);
    assert_eq!(day(15)["events"][0]["slug"], "community-cleanup-march");
    assert_eq!(day(22)["events"][0]["slug"], "career-skills-workshop");
    assert!(day(5)["events"].as_array().unwrap().is_empty());
}

#[tokio::test]
async fn calendar_navigates_to_other_months() {
    let json = body_json(get(build_test_app(), "/events/calendar?year=2024&month=2").await).await;
    let grid = &json["data"];
    assert_eq!(grid["label"], "February 2024");
    assert_eq!(grid["daysInMonth"], 29);
    // Feb 1st 2024 is a Thursday.
    assert_eq!(grid["leadingBlanks"], 4);
    let cells = grid["cells"].as_array().unwrap();
    assert!(cells.iter().all(|c| c["isToday"] == false));
    let winter = cells.iter().find(|c| c["day"] == 10).unwrap();
    assert_eq!(winter["events"][0]["slug"], "winter-warmth-campaign");
}

#[tokio::test]
async fn calendar_rejects_bad_month() {
    let response = get(build_test_app(), "/events/calendar?year=2024&month=13").await;
    assert_eq!(response.status(), StatusCode::BAD_REQUEST);

    let response = get(build_test_app(), "/events/calendar?month=march").await;
    assert_eq!(response.status(), StatusCode::BAD_REQUEST);
}

// ---------------------------------------------------------------------------
// Detail
// ---------------------------------------------------------------------------

#[tokio::test]
async fn detail_by_slug() {
    let response = get(build_test_app(), "/events/community-cleanup-march").await;
    assert_eq!(response.status(), StatusCode::OK);

    let json = body_json(response).await;
    let event = &json["data"];
    assert_eq!(event["id"], "evt-001");
    assert_eq!(event["typeLabel"], "Community Service");
    assert_eq!(event["dateLabel"], "Friday, March 15, 2024");
    assert_eq!(event["spotsRemaining"], 18);
    assert_eq!(event["fillPercent"], 64);
    let related: Vec<&str> = event["related"]
        .as_array()
        .unwrap()
        .iter()
        .map(|e| e["slug"].as_str().unwrap())
        .collect();
    assert_eq!(related, vec!["food-bank-volunteering", "community-garden-project"]);
}

#[tokio::test]
async fn detail_lookup_is_idempotent() {
    let first = body_json(get(build_test_app(), "/events/networking-mixer").await).await;
    let second = body_json(get(build_test_app(), "/events/networking-mixer").await).await;
    assert_eq!(first, second);
}

#[tokio::test]
async fn unknown_slug_is_not_found_with_back_link() {
    let response = get(build_test_app(), "/events/does-not-exist").await;
    assert_eq!(response.status(), StatusCode::NOT_FOUND);

    let json = body_json(response).await;
    assert_eq!(json["success"], false);
    assert_eq!(json["error"]["code"], "NOT_FOUND");
    assert_eq!(json["error"]["details"]["backHref"], "/events");
}
