pub mod appointment;
pub mod availability;
pub mod client;
pub mod employee;
pub mod service;

use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct DeleteResponse {
    pub id: i32,
    pub deleted: bool,
}
