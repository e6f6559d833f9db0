use axum::http::StatusCode;
use chrono::NaiveDate;
use pretty_assertions::assert_eq;
use rstest::rstest;
use shiftbook_api::middleware::error_handling::{AppError, map_error};
use shiftbook_core::errors::{BookingError, Entity};
use shiftbook_core::time::TimeOfDay;

fn conflict() -> BookingError {
    BookingError::ScheduleConflict {
        employee_id: 2,
        date: NaiveDate::from_ymd_opt(2025, 8, 20).unwrap(),
        start: TimeOfDay::new(10, 0).unwrap(),
        end: TimeOfDay::new(10, 30).unwrap(),
    }
}

fn inverted() -> BookingError {
    BookingError::InvalidRange {
        start: TimeOfDay::new(11, 0).unwrap(),
        end: TimeOfDay::new(10, 0).unwrap(),
    }
}

#[rstest]
#[case(BookingError::NotFound(Entity::Employee), StatusCode::NOT_FOUND)]
#[case(BookingError::InvalidTimeFormat("9:00".into()), StatusCode::BAD_REQUEST)]
#[case(inverted(), StatusCode::BAD_REQUEST)]
#[case(BookingError::Validation("missing date".into()), StatusCode::BAD_REQUEST)]
#[case(conflict(), StatusCode::CONFLICT)]
#[case(BookingError::Store(eyre::eyre!("connection refused")), StatusCode::INTERNAL_SERVER_ERROR)]
fn test_error_status_mapping(#[case] error: BookingError, #[case] expected: StatusCode) {
    assert_eq!(AppError(error).status(), expected);
}

#[tokio::test]
async fn test_map_error_builds_response() {
    let response = map_error(BookingError::NotFound(Entity::Client));
    assert_eq!(response.status(), StatusCode::NOT_FOUND);
}

#[test]
fn test_eyre_reports_become_store_errors() {
    let err: AppError = eyre::eyre!("pool closed").into();
    assert!(matches!(err.0, BookingError::Store(_)));
    assert_eq!(err.status(), StatusCode::INTERNAL_SERVER_ERROR);
}
