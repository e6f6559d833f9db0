//! An in-memory [`BookingStore`].
//!
//! Used in tests and for running the scheduling core without a database. It
//! enforces the same no-double-booking rule on write as the PostgreSQL store.

use std::collections::{HashMap, HashSet};
use std::sync::{Mutex, MutexGuard, PoisonError};

use async_trait::async_trait;
use chrono::{FixedOffset, NaiveDate};
use eyre::eyre;

use crate::errors::{BookingError, BookingResult, Entity};
use crate::models::appointment::{AppointmentStatus, BookedSlot, NewAppointment};
use crate::store::BookingStore;
use crate::time::{Interval, anchor, default_offset};

#[derive(Debug, Clone)]
struct Row {
    employee_id: i32,
    date: NaiveDate,
    slot: BookedSlot,
}

#[derive(Debug, Default)]
struct State {
    clients: HashSet<i32>,
    employees: HashSet<i32>,
    services: HashMap<i32, i32>,
    rows: Vec<Row>,
    next_id: i32,
}

impl State {
    fn push(&mut self, employee_id: i32, date: NaiveDate, slot: BookedSlot) {
        self.rows.push(Row {
            employee_id,
            date,
            slot,
        });
    }

    fn allocate_id(&mut self) -> i32 {
        self.next_id += 1;
        self.next_id
    }
}

#[derive(Debug)]
pub struct InMemoryStore {
    state: Mutex<State>,
    offset: FixedOffset,
}

impl Default for InMemoryStore {
    fn default() -> Self {
        Self::new()
    }
}

impl InMemoryStore {
    pub fn new() -> Self {
        Self {
            state: Mutex::new(State::default()),
            offset: default_offset(),
        }
    }

    fn state_mut(&mut self) -> &mut State {
        self.state.get_mut().unwrap_or_else(PoisonError::into_inner)
    }

    fn lock(&self) -> BookingResult<MutexGuard<'_, State>> {
        self.state
            .lock()
            .map_err(|_| BookingError::Store(eyre!("in-memory store lock poisoned")))
    }

    pub fn with_offset(mut self, offset: FixedOffset) -> Self {
        self.offset = offset;
        self
    }

    pub fn with_client(mut self, id: i32) -> Self {
        self.state_mut().clients.insert(id);
        self
    }

    pub fn with_employee(mut self, id: i32) -> Self {
        self.state_mut().employees.insert(id);
        self
    }

    pub fn with_service(mut self, id: i32, duration_min: i32) -> Self {
        self.state_mut().services.insert(id, duration_min);
        self
    }

    /// Seeds a booking with raw stored times, bypassing validation.
    pub fn with_booking(
        mut self,
        employee_id: i32,
        date: NaiveDate,
        start_time: &str,
        end_time: &str,
        status: AppointmentStatus,
    ) -> Self {
        let state = self.state_mut();
        let id = state.allocate_id();
        state.push(
            employee_id,
            date,
            BookedSlot {
                id,
                start_time: start_time.to_string(),
                end_time: end_time.to_string(),
                status,
            },
        );
        self
    }

    /// Ids of all stored appointments, in insertion order.
    pub fn booking_ids(&self) -> Vec<i32> {
        self.lock()
            .map(|state| state.rows.iter().map(|row| row.slot.id).collect())
            .unwrap_or_default()
    }

    fn ensure_free(
        &self,
        state: &State,
        appointment: &NewAppointment,
        ignore_id: Option<i32>,
    ) -> BookingResult<()> {
        if appointment.status == AppointmentStatus::Cancelled {
            return Ok(());
        }
        let requested = Interval::new(
            anchor(appointment.date, appointment.start_time, self.offset),
            anchor(appointment.date, appointment.end_time, self.offset),
        );
        let clash = state
            .rows
            .iter()
            .filter(|row| row.employee_id == appointment.employee_id && row.date == appointment.date)
            .filter(|row| row.slot.status != AppointmentStatus::Cancelled)
            .filter(|row| Some(row.slot.id) != ignore_id)
            .filter_map(|row| row.slot.interval(row.date, self.offset).ok())
            .any(|existing| requested.overlaps(&existing));

        if clash {
            return Err(BookingError::ScheduleConflict {
                employee_id: appointment.employee_id,
                date: appointment.date,
                start: appointment.start_time,
                end: appointment.end_time,
            });
        }
        Ok(())
    }
}

fn to_slot(id: i32, appointment: &NewAppointment) -> BookedSlot {
    BookedSlot {
        id,
        start_time: appointment.start_time.to_string(),
        end_time: appointment.end_time.to_string(),
        status: appointment.status,
    }
}

#[async_trait]
impl BookingStore for InMemoryStore {
    async fn client_exists(&self, id: i32) -> BookingResult<bool> {
        Ok(self.lock()?.clients.contains(&id))
    }

    async fn employee_exists(&self, id: i32) -> BookingResult<bool> {
        Ok(self.lock()?.employees.contains(&id))
    }

    async fn service_exists(&self, id: i32) -> BookingResult<bool> {
        Ok(self.lock()?.services.contains_key(&id))
    }

    async fn appointment_exists(&self, id: i32) -> BookingResult<bool> {
        Ok(self.lock()?.rows.iter().any(|row| row.slot.id == id))
    }

    async fn get_service_duration(&self, id: i32) -> BookingResult<i32> {
        self.lock()?
            .services
            .get(&id)
            .copied()
            .ok_or(BookingError::NotFound(Entity::Service))
    }

    async fn list_appointments(
        &self,
        employee_id: i32,
        date: NaiveDate,
        exclude_statuses: &[AppointmentStatus],
    ) -> BookingResult<Vec<BookedSlot>> {
        let state = self.lock()?;
        let mut slots: Vec<BookedSlot> = state
            .rows
            .iter()
            .filter(|row| row.employee_id == employee_id && row.date == date)
            .filter(|row| !exclude_statuses.contains(&row.slot.status))
            .map(|row| row.slot.clone())
            .collect();
        slots.sort_by(|a, b| a.start_time.cmp(&b.start_time));
        Ok(slots)
    }

    async fn insert_appointment(&self, appointment: &NewAppointment) -> BookingResult<i32> {
        let mut state = self.lock()?;
        self.ensure_free(&state, appointment, None)?;
        let id = state.allocate_id();
        state.push(appointment.employee_id, appointment.date, to_slot(id, appointment));
        Ok(id)
    }

    async fn update_appointment(
        &self,
        id: i32,
        appointment: &NewAppointment,
    ) -> BookingResult<u64> {
        let mut state = self.lock()?;
        if !state.rows.iter().any(|row| row.slot.id == id) {
            return Ok(0);
        }
        self.ensure_free(&state, appointment, Some(id))?;
        for row in state.rows.iter_mut().filter(|row| row.slot.id == id) {
            *row = Row {
                employee_id: appointment.employee_id,
                date: appointment.date,
                slot: to_slot(id, appointment),
            };
        }
        Ok(1)
    }
}
