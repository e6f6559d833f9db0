//! # Shiftbook Core
//!
//! Domain types and the appointment-scheduling core of the Shiftbook booking
//! backend: time normalization, working hours, the conflict validator and the
//! availability calculator. Persistence is reached only through the
//! [`store::BookingStore`] trait.

pub mod availability;
pub mod errors;
pub mod hours;
pub mod memory;
pub mod models;
pub mod service;
pub mod store;
pub mod time;
pub mod validator;
