#![allow(clippy::unused_async)]
//! Tests for the events resource nested under a calendar.
//!
//! Covers calendar-scoped lookups, field validation order, the inclusive
//! date-window query and the storage-failure paths.

use salvo::http::StatusCode;
use salvo::prelude::Service;
use serde_json::json;

use super::helpers::*;

/// Creates a calendar over HTTP and returns its id.
async fn seed_calendar(service: &Service, name: &str) -> String {
    let created = TestRequest::post("/calendars")
        .json_body(&json!({ "name": name }))
        .send(service)
        .await
        .assert_status(StatusCode::OK)
        .json();
    created["id"].as_str().expect("calendar id").to_string()
}

/// Creates an event over HTTP and returns its id.
async fn seed_event(service: &Service, calendar_id: &str, name: &str, date: &str) -> String {
    let created = TestRequest::post(&format!("/calendars/{calendar_id}/events"))
        .json_body(&json!({ "name": name, "date": date }))
        .send(service)
        .await
        .assert_status(StatusCode::OK)
        .json();
    created["id"].as_str().expect("event id").to_string()
}

/// ## Summary
/// Test that a created event is retrievable under its calendar and carries
/// the normalized timestamp.
#[test_log::test(tokio::test)]
async fn created_event_round_trips() {
    let service = create_test_service();
    let calendar_id = seed_calendar(&service, "Work").await;

    let created = TestRequest::post(&format!("/calendars/{calendar_id}/events"))
        .json_body(&json!({ "name": "Standup", "date": "2020-07-15" }))
        .send(&service)
        .await
        .assert_status(StatusCode::OK)
        .json();

    assert_eq!(created["name"], "Standup");
    assert_eq!(created["calendarId"], calendar_id.as_str());
    assert_eq!(created["date"], "2020-07-15T00:00:00Z");

    let id = created["id"].as_str().expect("event id");
    let fetched = TestRequest::get(&format!("/calendars/{calendar_id}/events/{id}"))
        .send(&service)
        .await
        .assert_status(StatusCode::OK)
        .json();

    assert_eq!(fetched, created);
}

/// ## Summary
/// Test that creation validates `name` before `date` and names the missing
/// field.
#[test_log::test(tokio::test)]
async fn create_validates_name_then_date() {
    let service = create_test_service();
    let calendar_id = seed_calendar(&service, "Work").await;
    let path = format!("/calendars/{calendar_id}/events");

    // Both missing: the complaint is about the name.
    let response = TestRequest::post(&path)
        .json_body(&json!({}))
        .send(&service)
        .await
        .assert_status(StatusCode::BAD_REQUEST);
    assert!(response.body_string().contains("name"));

    let response = TestRequest::post(&path)
        .json_body(&json!({ "date": "2020-07-15" }))
        .send(&service)
        .await
        .assert_status(StatusCode::BAD_REQUEST);
    assert!(response.body_string().contains("name"));

    let response = TestRequest::post(&path)
        .json_body(&json!({ "name": "Standup" }))
        .send(&service)
        .await
        .assert_status(StatusCode::BAD_REQUEST);
    assert!(response.body_string().contains("date"));
}

/// ## Summary
/// Test that an unparseable date string is rejected at creation.
#[test_log::test(tokio::test)]
async fn create_with_invalid_date_is_rejected() {
    let service = create_test_service();
    let calendar_id = seed_calendar(&service, "Work").await;

    let response = TestRequest::post(&format!("/calendars/{calendar_id}/events"))
        .json_body(&json!({ "name": "Standup", "date": "yesterday-ish" }))
        .send(&service)
        .await
        .assert_status(StatusCode::BAD_REQUEST);
    assert!(response.body_string().contains("date"));
}

/// ## Summary
/// Test that an event created under one calendar is invisible through
/// another calendar's scope, even with the correct event id.
#[test_log::test(tokio::test)]
async fn event_is_not_visible_through_other_calendar() {
    let service = create_test_service();
    let calendar_a = seed_calendar(&service, "A").await;
    let calendar_b = seed_calendar(&service, "B").await;
    let event_id = seed_event(&service, &calendar_a, "Standup", "2020-07-15").await;

    let response = TestRequest::get(&format!("/calendars/{calendar_b}/events/{event_id}"))
        .send(&service)
        .await
        .assert_status(StatusCode::NOT_FOUND);
    assert_eq!(response.body_string(), "event not found");

    TestRequest::get(&format!("/calendars/{calendar_a}/events/{event_id}"))
        .send(&service)
        .await
        .assert_status(StatusCode::OK);
}

/// ## Summary
/// Test that nonexistent and malformed event ids both answer 404 with the
/// not-found message.
#[test_log::test(tokio::test)]
async fn missing_and_malformed_event_ids_answer_not_found() {
    let service = create_test_service();
    let calendar_id = seed_calendar(&service, "Work").await;

    let response = TestRequest::get(&format!("/calendars/{calendar_id}/events/{UNKNOWN_ID}"))
        .send(&service)
        .await
        .assert_status(StatusCode::NOT_FOUND);
    assert_eq!(response.body_string(), "event not found");

    TestRequest::get(&format!("/calendars/{calendar_id}/events/not-an-id"))
        .send(&service)
        .await
        .assert_status(StatusCode::NOT_FOUND);
}

/// ## Summary
/// Test that listing without query parameters returns the calendar's events
/// in creation order.
#[test_log::test(tokio::test)]
async fn list_returns_events_in_creation_order() {
    let service = create_test_service();
    let calendar_id = seed_calendar(&service, "Work").await;

    seed_event(&service, &calendar_id, "First", "2020-07-15").await;
    seed_event(&service, &calendar_id, "Second", "2020-06-01").await;

    let listed = TestRequest::get(&format!("/calendars/{calendar_id}/events"))
        .send(&service)
        .await
        .assert_status(StatusCode::OK)
        .json();

    let listed = listed.as_array().expect("array of events");
    assert_eq!(listed.len(), 2);
    assert_eq!(listed[0]["name"], "First");
    assert_eq!(listed[1]["name"], "Second");
}

/// ## Summary
/// Test that the date window is inclusive on both ends and keeps creation
/// order: of events dated 2020-07-15, 2020-07-31, 2020-06-01 and 2020-08-31,
/// the window [2020-07-15, 2020-08-31] yields the first, second and fourth.
#[test_log::test(tokio::test)]
async fn date_window_is_inclusive_on_both_ends() {
    let service = create_test_service();
    let calendar_id = seed_calendar(&service, "Work").await;

    let mut ids = Vec::new();
    for date in ["2020-07-15", "2020-07-31", "2020-06-01", "2020-08-31"] {
        ids.push(seed_event(&service, &calendar_id, date, date).await);
    }

    let listed = TestRequest::get(&format!(
        "/calendars/{calendar_id}/events?from=2020-07-15&to=2020-08-31"
    ))
    .send(&service)
    .await
    .assert_status(StatusCode::OK)
    .json();

    let got: Vec<_> = listed
        .as_array()
        .expect("array of events")
        .iter()
        .map(|e| e["id"].as_str().expect("id").to_string())
        .collect();
    assert_eq!(got, vec![ids[0].clone(), ids[1].clone(), ids[3].clone()]);
}

/// ## Summary
/// Test that a lone `from` or `to` query parameter falls back to listing
/// everything.
#[test_log::test(tokio::test)]
async fn half_open_window_lists_everything() {
    let service = create_test_service();
    let calendar_id = seed_calendar(&service, "Work").await;

    seed_event(&service, &calendar_id, "Early", "2020-06-01").await;
    seed_event(&service, &calendar_id, "Late", "2020-08-31").await;

    let listed = TestRequest::get(&format!(
        "/calendars/{calendar_id}/events?from=2020-07-01"
    ))
    .send(&service)
    .await
    .assert_status(StatusCode::OK)
    .json();

    assert_eq!(listed.as_array().expect("array").len(), 2);
}

/// ## Summary
/// Test that unparseable window bounds are rejected.
#[test_log::test(tokio::test)]
async fn invalid_window_bounds_are_rejected() {
    let service = create_test_service();
    let calendar_id = seed_calendar(&service, "Work").await;

    TestRequest::get(&format!(
        "/calendars/{calendar_id}/events?from=whenever&to=2020-08-31"
    ))
    .send(&service)
    .await
    .assert_status(StatusCode::BAD_REQUEST);
}

/// ## Summary
/// Test that event updates with an empty or absent body are rejected, and
/// that a body carrying only unknown fields counts as empty.
#[test_log::test(tokio::test)]
async fn update_with_empty_body_is_rejected() {
    let service = create_test_service();
    let calendar_id = seed_calendar(&service, "Work").await;
    let event_id = seed_event(&service, &calendar_id, "Standup", "2020-07-15").await;
    let path = format!("/calendars/{calendar_id}/events/{event_id}");

    TestRequest::put(&path)
        .json_body(&json!({}))
        .send(&service)
        .await
        .assert_status(StatusCode::BAD_REQUEST);

    TestRequest::put(&path)
        .send(&service)
        .await
        .assert_status(StatusCode::BAD_REQUEST);

    // The owning calendar is not updatable, so this body is empty too.
    TestRequest::put(&path)
        .json_body(&json!({ "calendarId": UNKNOWN_ID }))
        .send(&service)
        .await
        .assert_status(StatusCode::BAD_REQUEST);
}

/// ## Summary
/// Test that an update applies within its calendar scope and reports the
/// outcome, while the same update through another calendar matches nothing.
#[test_log::test(tokio::test)]
async fn update_is_scoped_by_calendar() {
    let service = create_test_service();
    let calendar_a = seed_calendar(&service, "A").await;
    let calendar_b = seed_calendar(&service, "B").await;
    let event_id = seed_event(&service, &calendar_a, "Standup", "2020-07-15").await;

    let outcome = TestRequest::put(&format!("/calendars/{calendar_b}/events/{event_id}"))
        .json_body(&json!({ "name": "Hijacked" }))
        .send(&service)
        .await
        .assert_status(StatusCode::OK)
        .json();
    assert_eq!(outcome["matchedCount"], 0);

    let outcome = TestRequest::put(&format!("/calendars/{calendar_a}/events/{event_id}"))
        .json_body(&json!({ "name": "Renamed", "date": "2020-07-16" }))
        .send(&service)
        .await
        .assert_status(StatusCode::OK)
        .json();
    assert_eq!(outcome["matchedCount"], 1);
    assert_eq!(outcome["modifiedCount"], 1);

    let fetched = TestRequest::get(&format!("/calendars/{calendar_a}/events/{event_id}"))
        .send(&service)
        .await
        .json();
    assert_eq!(fetched["name"], "Renamed");
    assert_eq!(fetched["date"], "2020-07-16T00:00:00Z");
}

/// ## Summary
/// Test that deletes are scoped, answer 200 with an empty body, and leave
/// the event reachable through its own calendar when scoped elsewhere.
#[test_log::test(tokio::test)]
async fn delete_is_scoped_by_calendar() {
    let service = create_test_service();
    let calendar_a = seed_calendar(&service, "A").await;
    let calendar_b = seed_calendar(&service, "B").await;
    let event_id = seed_event(&service, &calendar_a, "Standup", "2020-07-15").await;

    // Wrong scope: a successful no-op.
    TestRequest::delete(&format!("/calendars/{calendar_b}/events/{event_id}"))
        .send(&service)
        .await
        .assert_status(StatusCode::OK);

    TestRequest::get(&format!("/calendars/{calendar_a}/events/{event_id}"))
        .send(&service)
        .await
        .assert_status(StatusCode::OK);

    let response = TestRequest::delete(&format!("/calendars/{calendar_a}/events/{event_id}"))
        .send(&service)
        .await
        .assert_status(StatusCode::OK);
    assert!(response.body_string().is_empty());

    TestRequest::get(&format!("/calendars/{calendar_a}/events/{event_id}"))
        .send(&service)
        .await
        .assert_status(StatusCode::NOT_FOUND);
}

/// ## Summary
/// Test that deleting a calendar leaves its events behind, reachable under
/// the old calendar id.
#[test_log::test(tokio::test)]
async fn deleting_calendar_orphans_its_events() {
    let service = create_test_service();
    let calendar_id = seed_calendar(&service, "Doomed").await;
    let event_id = seed_event(&service, &calendar_id, "Leftover", "2020-07-15").await;

    TestRequest::delete(&format!("/calendars/{calendar_id}"))
        .send(&service)
        .await
        .assert_status(StatusCode::OK);

    // The parent is gone but the child still answers under its scope.
    TestRequest::get(&format!("/calendars/{calendar_id}"))
        .send(&service)
        .await
        .assert_status(StatusCode::NOT_FOUND);

    TestRequest::get(&format!("/calendars/{calendar_id}/events/{event_id}"))
        .send(&service)
        .await
        .assert_status(StatusCode::OK);
}

/// ## Summary
/// Test that a storage failure during event delete surfaces as 500 carrying
/// the failure's message.
#[test_log::test(tokio::test)]
async fn delete_store_failure_answers_500_with_message() {
    let service = create_failing_service("no reachable servers");

    let response = TestRequest::delete(&format!(
        "/calendars/{UNKNOWN_ID}/events/{UNKNOWN_ID}"
    ))
    .send(&service)
    .await
    .assert_status(StatusCode::INTERNAL_SERVER_ERROR);
    assert!(response.body_string().contains("no reachable servers"));
}
