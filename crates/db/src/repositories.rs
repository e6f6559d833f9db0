pub mod appointment;
pub mod client;
pub mod employee;
pub mod service;
