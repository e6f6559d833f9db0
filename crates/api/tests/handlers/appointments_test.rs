use axum::http::StatusCode;
use pretty_assertions::assert_eq;
use serde_json::{Value, json};

use crate::test_utils::{seeded_store, test_server};

fn booking(start: &str, end: &str) -> Value {
    json!({
        "client_id": 1,
        "employee_id": 2,
        "service_id": 3,
        "date": "2025-08-20",
        "start_time": start,
        "end_time": end,
        "status": "confirmed"
    })
}

#[tokio::test]
async fn test_create_appointment() {
    let server = test_server(seeded_store());

    let response = server.post("/api/appointments").json(&booking("10:00", "10:30")).await;
    response.assert_status(StatusCode::CREATED);

    let body = response.json::<Value>();
    assert_eq!(body["id"], 1);
    assert_eq!(body["date"], "2025-08-20");
    assert_eq!(body["start_time"], "10:00");
    assert_eq!(body["end_time"], "10:30");
    assert_eq!(body["status"], "confirmed");
    assert_eq!(body["duration_min"], 30);
}

#[tokio::test]
async fn test_overlap_is_a_conflict_but_adjacency_is_not() {
    let server = test_server(seeded_store());
    server
        .post("/api/appointments")
        .json(&booking("10:00", "10:30"))
        .await
        .assert_status(StatusCode::CREATED);

    let clash = server.post("/api/appointments").json(&booking("10:15", "10:45")).await;
    clash.assert_status(StatusCode::CONFLICT);
    assert_eq!(clash.json::<Value>()["kind"], "schedule_conflict");

    let containing = server.post("/api/appointments").json(&booking("09:30", "11:00")).await;
    containing.assert_status(StatusCode::CONFLICT);

    server
        .post("/api/appointments")
        .json(&booking("10:30", "11:00"))
        .await
        .assert_status(StatusCode::CREATED);
    server
        .post("/api/appointments")
        .json(&booking("09:30", "10:00"))
        .await
        .assert_status(StatusCode::CREATED);
}

#[tokio::test]
async fn test_cancelled_appointments_do_not_block() {
    let server = test_server(seeded_store());
    let mut cancelled = booking("10:00", "10:30");
    cancelled["status"] = json!("cancelado");
    let response = server.post("/api/appointments").json(&cancelled).await;
    response.assert_status(StatusCode::CREATED);
    assert_eq!(response.json::<Value>()["status"], "cancelled");

    server
        .post("/api/appointments")
        .json(&booking("10:00", "10:30"))
        .await
        .assert_status(StatusCode::CREATED);

    // A cancelled record may still be written over the live booking.
    server
        .post("/api/appointments")
        .json(&cancelled)
        .await
        .assert_status(StatusCode::CREATED);
    server
        .put("/api/appointments/1")
        .json(&cancelled)
        .await
        .assert_status_ok();
}

#[tokio::test]
async fn test_validation_errors() {
    let server = test_server(seeded_store());

    let malformed = server.post("/api/appointments").json(&booking("9:00", "09:30")).await;
    malformed.assert_status(StatusCode::BAD_REQUEST);
    assert_eq!(malformed.json::<Value>()["kind"], "invalid_time_format");

    let equal = server.post("/api/appointments").json(&booking("10:00", "10:00")).await;
    equal.assert_status(StatusCode::BAD_REQUEST);
    assert_eq!(equal.json::<Value>()["kind"], "invalid_range");

    let mut unknown_employee = booking("10:00", "10:30");
    unknown_employee["employee_id"] = json!(99);
    let missing = server.post("/api/appointments").json(&unknown_employee).await;
    missing.assert_status(StatusCode::NOT_FOUND);
    let body = missing.json::<Value>();
    assert_eq!(body["kind"], "not_found");
    assert_eq!(body["error"], "Resource not found: employee");
}

#[tokio::test]
async fn test_end_time_defaults_to_service_duration() {
    let server = test_server(seeded_store());
    let response = server
        .post("/api/appointments")
        .json(&json!({
            "client_id": 1,
            "employee_id": 2,
            "service_id": 4,
            "date": "2025-08-20",
            "start_time": "14:00"
        }))
        .await;
    response.assert_status(StatusCode::CREATED);

    let body = response.json::<Value>();
    assert_eq!(body["end_time"], "14:45");
    assert_eq!(body["status"], "pending");
    assert_eq!(body["duration_min"], 45);
}

#[tokio::test]
async fn test_update_runs_the_same_validation() {
    let server = test_server(seeded_store());
    server
        .post("/api/appointments")
        .json(&booking("10:00", "10:30"))
        .await
        .assert_status(StatusCode::CREATED);
    server
        .post("/api/appointments")
        .json(&booking("11:00", "11:30"))
        .await
        .assert_status(StatusCode::CREATED);

    // Moving within its own previous slot is fine.
    let moved = server.put("/api/appointments/1").json(&booking("10:10", "10:40")).await;
    moved.assert_status_ok();
    assert_eq!(moved.json::<Value>()["start_time"], "10:10");

    let clash = server.put("/api/appointments/2").json(&booking("10:30", "11:15")).await;
    clash.assert_status(StatusCode::CONFLICT);

    let inverted = server.put("/api/appointments/2").json(&booking("11:30", "11:00")).await;
    inverted.assert_status(StatusCode::BAD_REQUEST);

    let missing = server.put("/api/appointments/42").json(&booking("15:00", "15:30")).await;
    missing.assert_status(StatusCode::NOT_FOUND);
    assert_eq!(missing.json::<Value>()["error"], "Resource not found: appointment");

    let missing_overlapping = server
        .put("/api/appointments/42")
        .json(&booking("10:00", "10:30"))
        .await;
    missing_overlapping.assert_status(StatusCode::NOT_FOUND);
}
