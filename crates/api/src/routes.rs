pub mod appointments;
pub mod availability;
pub mod clients;
pub mod employees;
pub mod health;
pub mod services;
