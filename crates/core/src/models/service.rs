use serde::{Deserialize, Serialize};

/// A bookable service. Its duration sizes availability slots.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Service {
    pub id: i32,
    pub name: String,
    pub duration_min: i32,
    pub price: f64,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ServiceRequest {
    pub name: String,
    pub duration_min: i32,
    #[serde(default)]
    pub price: f64,
}
