use axum::http::StatusCode;
use axum_test::{TestResponse, TestServer};
use pretty_assertions::assert_eq;
use serde_json::{Value, json};
use shiftbook_db::mock::MockStore;

use crate::test_utils::{seeded_store, test_server};

async fn availability(
    server: &TestServer,
    employee_id: i32,
    service_id: i32,
    date: Option<&str>,
) -> TestResponse {
    let request = server
        .get("/api/availability")
        .add_query_param("employee_id", employee_id)
        .add_query_param("service_id", service_id);
    match date {
        Some(date) => request.add_query_param("date", date).await,
        None => request.await,
    }
}

#[tokio::test]
async fn test_empty_day_lists_every_slot() {
    let server = test_server(seeded_store());

    let response = availability(&server, 2, 3, Some("2025-08-20")).await;
    response.assert_status_ok();

    let body = response.json::<Value>();
    assert_eq!(body["employee_id"], 2);
    assert_eq!(body["date"], "2025-08-20");
    let slots = body["slots"].as_array().unwrap();
    assert_eq!(slots.len(), 22);
    assert_eq!(slots[0], json!({ "start": "09:00", "end": "09:30" }));
    assert_eq!(slots[21], json!({ "start": "19:30", "end": "20:00" }));
}

#[tokio::test]
async fn test_booked_slot_disappears() {
    let server = test_server(seeded_store());
    server
        .post("/api/appointments")
        .json(&json!({
            "client_id": 1,
            "employee_id": 2,
            "service_id": 3,
            "date": "2025-08-20",
            "start_time": "10:00",
            "end_time": "10:30"
        }))
        .await
        .assert_status(StatusCode::CREATED);

    let body = availability(&server, 2, 3, Some("2025-08-20")).await.json::<Value>();
    let slots = body["slots"].as_array().unwrap();
    assert_eq!(slots.len(), 21);
    assert!(!slots.contains(&json!({ "start": "10:00", "end": "10:30" })));

    // Same query, same answer.
    assert_eq!(availability(&server, 2, 3, Some("2025-08-20")).await.json::<Value>(), body);
}

#[tokio::test]
async fn test_query_parameter_errors() {
    let server = test_server(seeded_store());

    let missing = availability(&server, 2, 3, None).await;
    missing.assert_status(StatusCode::BAD_REQUEST);
    assert_eq!(missing.json::<Value>()["kind"], "validation");

    let malformed = availability(&server, 2, 3, Some("20/08/2025")).await;
    malformed.assert_status(StatusCode::BAD_REQUEST);
    assert_eq!(malformed.json::<Value>()["kind"], "invalid_time_format");

    let unknown_service = availability(&server, 2, 77, Some("2025-08-20")).await;
    unknown_service.assert_status(StatusCode::NOT_FOUND);

    let unknown_employee = availability(&server, 77, 3, Some("2025-08-20")).await;
    unknown_employee.assert_status(StatusCode::NOT_FOUND);
    assert_eq!(unknown_employee.json::<Value>()["error"], "Resource not found: employee");
}

#[tokio::test]
async fn test_store_failures_are_opaque() {
    let mut store = MockStore::new();
    store
        .expect_get_service_duration()
        .returning(|_| Err(eyre::eyre!("connection refused").into()));

    let server = test_server(store);
    let response = availability(&server, 2, 3, Some("2025-08-20")).await;
    response.assert_status(StatusCode::INTERNAL_SERVER_ERROR);

    let body = response.json::<Value>();
    assert_eq!(body["kind"], "store");
    assert_eq!(body["error"], "Internal server error");
}
