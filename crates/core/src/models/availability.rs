use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

use crate::availability::Slot;

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AvailabilityQuery {
    pub employee_id: Option<i32>,
    pub service_id: Option<i32>,
    pub date: Option<String>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct AvailabilityResponse {
    pub employee_id: i32,
    pub service_id: i32,
    pub date: NaiveDate,
    pub slots: Vec<Slot>,
}
