//! Working-hours configuration.
//!
//! Slots are only generated inside the working window of a given day. The
//! window comes from a default, optionally overridden per weekday and per
//! employee. Resolution order for `(employee, weekday)`:
//!
//! 1. the employee's entry for that weekday
//! 2. the employee's entry for every day
//! 3. the weekday entry
//! 4. the default window

use std::collections::HashMap;

use chrono::{Datelike, NaiveDate, Weekday};

use crate::errors::{BookingError, BookingResult};
use crate::time::{Interval, TimeOfDay, parse_time_of_day};

pub type Window = Interval<TimeOfDay>;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DaySchedule {
    Open(Window),
    Closed,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct WorkingHours {
    default: Window,
    weekdays: HashMap<Weekday, DaySchedule>,
    employees: HashMap<(i32, Option<Weekday>), DaySchedule>,
}

impl Default for WorkingHours {
    /// 09:00 to 20:00 every day.
    fn default() -> Self {
        let window = match (TimeOfDay::new(9, 0), TimeOfDay::new(20, 0)) {
            (Some(start), Some(end)) => Interval::new(start, end),
            _ => unreachable!("09:00 and 20:00 are valid times"),
        };
        Self {
            default: window,
            weekdays: HashMap::new(),
            employees: HashMap::new(),
        }
    }
}

fn check(schedule: DaySchedule) -> BookingResult<DaySchedule> {
    match schedule {
        DaySchedule::Open(window) if !window.is_well_formed() => Err(BookingError::InvalidRange {
            start: window.start,
            end: window.end,
        }),
        other => Ok(other),
    }
}

impl WorkingHours {
    pub fn new(default: Window) -> BookingResult<Self> {
        check(DaySchedule::Open(default))?;
        Ok(Self {
            default,
            ..Self::default()
        })
    }

    pub fn default_window(&self) -> Window {
        self.default
    }

    pub fn with_weekday(mut self, day: Weekday, schedule: DaySchedule) -> BookingResult<Self> {
        self.weekdays.insert(day, check(schedule)?);
        Ok(self)
    }

    /// Overrides the hours of one employee, on `day` or on every day when `None`.
    pub fn with_employee(
        mut self,
        employee_id: i32,
        day: Option<Weekday>,
        schedule: DaySchedule,
    ) -> BookingResult<Self> {
        self.employees.insert((employee_id, day), check(schedule)?);
        Ok(self)
    }

    /// The working window for `employee_id` on `date`, or `None` when closed.
    pub fn window_for(&self, employee_id: i32, date: NaiveDate) -> Option<Window> {
        let weekday = date.weekday();
        let schedule = self
            .employees
            .get(&(employee_id, Some(weekday)))
            .or_else(|| self.employees.get(&(employee_id, None)))
            .or_else(|| self.weekdays.get(&weekday))
            .copied()
            .unwrap_or(DaySchedule::Open(self.default));

        match schedule {
            DaySchedule::Open(window) => Some(window),
            DaySchedule::Closed => None,
        }
    }
}

/// Parses `HH:MM-HH:MM`, or `closed`.
pub fn parse_day_schedule(s: &str) -> BookingResult<DaySchedule> {
    let s = s.trim();
    if s.eq_ignore_ascii_case("closed") {
        return Ok(DaySchedule::Closed);
    }
    let (start, end) = s.split_once('-').ok_or_else(|| {
        BookingError::InvalidTimeFormat(format!("expected HH:MM-HH:MM or 'closed', got '{s}'"))
    })?;
    let window = Interval::new(parse_time_of_day(start.trim())?, parse_time_of_day(end.trim())?);
    check(DaySchedule::Open(window))
}

pub fn parse_weekday(s: &str) -> BookingResult<Weekday> {
    s.trim()
        .parse::<Weekday>()
        .map_err(|_| BookingError::Validation(format!("unknown weekday '{s}'")))
}
