use chrono::NaiveDate;
use pretty_assertions::assert_eq;
use rstest::rstest;
use serde_json::{from_str, json, to_value};
use shiftbook_core::availability::Slot;
use shiftbook_core::models::{
    appointment::{Appointment, AppointmentRequest, AppointmentStatus},
    availability::AvailabilityResponse,
    service::ServiceRequest,
};
use shiftbook_core::time::{Interval, TimeOfDay};

fn t(hour: u32, minute: u32) -> TimeOfDay {
    TimeOfDay::new(hour, minute).unwrap()
}

#[test]
fn test_appointment_wire_format() {
    let appointment = Appointment {
        id: 7,
        client_id: 1,
        employee_id: 2,
        service_id: 3,
        date: NaiveDate::from_ymd_opt(2025, 8, 20).unwrap(),
        start_time: t(15, 30),
        end_time: t(16, 0),
        status: AppointmentStatus::Confirmed,
        duration_min: 30,
    };

    let value = to_value(&appointment).expect("Failed to serialize appointment");
    assert_eq!(
        value,
        json!({
            "id": 7,
            "client_id": 1,
            "employee_id": 2,
            "service_id": 3,
            "date": "2025-08-20",
            "start_time": "15:30",
            "end_time": "16:00",
            "status": "confirmed",
            "duration_min": 30
        })
    );

    let back: Appointment = serde_json::from_value(value).expect("Failed to deserialize appointment");
    assert_eq!(back, appointment);
}

#[test]
fn test_appointment_request_defaults() {
    let request: AppointmentRequest = from_str(
        r#"{"client_id":1,"employee_id":2,"service_id":3,"date":"2025-08-20","start_time":"10:00"}"#,
    )
    .expect("Failed to deserialize request");

    assert_eq!(request.end_time, None);
    assert_eq!(request.status, AppointmentStatus::Pending);
}

#[rstest]
#[case("\"pending\"", AppointmentStatus::Pending)]
#[case("\"pendiente\"", AppointmentStatus::Pending)]
#[case("\"confirmado\"", AppointmentStatus::Confirmed)]
#[case("\"cancelado\"", AppointmentStatus::Cancelled)]
#[case("\"completed\"", AppointmentStatus::Completed)]
fn test_status_accepts_legacy_aliases(#[case] input: &str, #[case] expected: AppointmentStatus) {
    let status: AppointmentStatus = from_str(input).unwrap();
    assert_eq!(status, expected);
}

#[rstest]
#[case("Cancelled", AppointmentStatus::Cancelled)]
#[case("canceled", AppointmentStatus::Cancelled)]
#[case(" completado ", AppointmentStatus::Completed)]
fn test_status_from_stored_text(#[case] input: &str, #[case] expected: AppointmentStatus) {
    assert_eq!(input.parse::<AppointmentStatus>().unwrap(), expected);
}

#[test]
fn test_unknown_status_is_rejected() {
    assert!("rescheduled".parse::<AppointmentStatus>().is_err());
    assert!(from_str::<AppointmentStatus>("\"rescheduled\"").is_err());
}

#[test]
fn test_availability_response_wire_format() {
    let slots: Vec<Slot> = vec![Interval::new(t(9, 0), t(9, 30)), Interval::new(t(9, 30), t(10, 0))];
    let response = AvailabilityResponse {
        employee_id: 2,
        service_id: 3,
        date: NaiveDate::from_ymd_opt(2025, 8, 20).unwrap(),
        slots,
    };

    assert_eq!(
        to_value(&response).unwrap(),
        json!({
            "employee_id": 2,
            "service_id": 3,
            "date": "2025-08-20",
            "slots": [
                { "start": "09:00", "end": "09:30" },
                { "start": "09:30", "end": "10:00" }
            ]
        })
    );
    assert_eq!(response.slots[0].to_string(), "09:00 - 09:30");
}

#[test]
fn test_service_request_price_is_optional() {
    let request: ServiceRequest = from_str(r#"{"name":"Haircut","duration_min":30}"#).unwrap();
    assert_eq!(request.duration_min, 30);
    assert_eq!(request.price, 0.0);
}
