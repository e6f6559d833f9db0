use async_trait::async_trait;
use chrono::NaiveDate;
use mockall::mock;
use shiftbook_core::errors::BookingResult;
use shiftbook_core::models::appointment::{AppointmentStatus, BookedSlot, NewAppointment};
use shiftbook_core::store::BookingStore;

// Mock store for exercising the scheduling core without a database
mock! {
    pub Store {}

    #[async_trait]
    impl BookingStore for Store {
        async fn client_exists(&self, id: i32) -> BookingResult<bool>;

        async fn employee_exists(&self, id: i32) -> BookingResult<bool>;

        async fn service_exists(&self, id: i32) -> BookingResult<bool>;

        async fn appointment_exists(&self, id: i32) -> BookingResult<bool>;

        async fn get_service_duration(&self, id: i32) -> BookingResult<i32>;

        async fn list_appointments(
            &self,
            employee_id: i32,
            date: NaiveDate,
            exclude_statuses: &[AppointmentStatus],
        ) -> BookingResult<Vec<BookedSlot>>;

        async fn insert_appointment(&self, appointment: &NewAppointment) -> BookingResult<i32>;

        async fn update_appointment(
            &self,
            id: i32,
            appointment: &NewAppointment,
        ) -> BookingResult<u64>;
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use mockall::predicate::eq;
    use shiftbook_core::errors::{BookingError, Entity};
    use shiftbook_core::models::appointment::AppointmentRequest;
    use shiftbook_core::time::default_offset;
    use shiftbook_core::validator::validate_appointment;

    fn request() -> AppointmentRequest {
        AppointmentRequest {
            client_id: 1,
            employee_id: 2,
            service_id: 3,
            date: "2025-08-20".to_string(),
            start_time: "10:00".to_string(),
            end_time: Some("10:30".to_string()),
            status: AppointmentStatus::Pending,
        }
    }

    #[tokio::test]
    async fn test_validator_stops_at_first_missing_reference() {
        let mut store = MockStore::new();
        store.expect_client_exists().with(eq(1)).returning(|_| Ok(true));
        store.expect_employee_exists().with(eq(2)).returning(|_| Ok(false));
        store.expect_service_exists().never();
        store.expect_list_appointments().never();

        let err = validate_appointment(&store, &request(), None, default_offset())
            .await
            .unwrap_err();
        assert!(matches!(err, BookingError::NotFound(Entity::Employee)));
    }

    #[tokio::test]
    async fn test_validator_queries_only_blocking_appointments() {
        let mut store = MockStore::new();
        store.expect_client_exists().returning(|_| Ok(true));
        store.expect_employee_exists().returning(|_| Ok(true));
        store.expect_service_exists().returning(|_| Ok(true));
        store
            .expect_list_appointments()
            .withf(|employee_id, _, excluded| {
                *employee_id == 2 && excluded.to_vec() == vec![AppointmentStatus::Cancelled]
            })
            .times(1)
            .returning(|_, _, _| {
                Ok(vec![BookedSlot {
                    id: 9,
                    start_time: "10:30".to_string(),
                    end_time: "11:00".to_string(),
                    status: AppointmentStatus::Confirmed,
                }])
            });

        let validated = validate_appointment(&store, &request(), None, default_offset())
            .await
            .unwrap();
        assert_eq!(validated.duration_min, 30);
    }
}
