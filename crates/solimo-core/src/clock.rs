//! Local calendar clock.
//!
//! Everything date-based in the core works on the device's *local*
//! calendar day, never on UTC, so a completion recorded late in the
//! evening does not shift into the next day for users east or west of
//! Greenwich.

use std::sync::{Arc, Mutex};

use chrono::{Datelike, Days, Local, NaiveDate};

/// Source of "today" in the caller's local timezone.
pub trait Clock: Send + Sync {
    fn today(&self) -> NaiveDate;
}

/// Reads the system clock in the local timezone.
#[derive(Debug, Clone, Copy, Default)]
pub struct SystemClock;

impl Clock for SystemClock {
    fn today(&self) -> NaiveDate {
        Local::now().date_naive()
    }
}

/// A clock pinned to a chosen date, for tests and replays.
#[derive(Debug)]
pub struct FixedClock {
    date: Mutex<NaiveDate>,
}

impl FixedClock {
    pub fn new(date: NaiveDate) -> Self {
        Self {
            date: Mutex::new(date),
        }
    }

    pub fn set(&self, date: NaiveDate) {
        let mut guard = self.date.lock().unwrap_or_else(|e| e.into_inner());
        *guard = date;
    }

    /// Move the clock forward by whole days.
    pub fn advance_days(&self, days: u64) {
        let mut guard = self.date.lock().unwrap_or_else(|e| e.into_inner());
        if let Some(next) = guard.checked_add_days(Days::new(days)) {
            *guard = next;
        }
    }
}

impl Clock for FixedClock {
    fn today(&self) -> NaiveDate {
        *self.date.lock().unwrap_or_else(|e| e.into_inner())
    }
}

impl<C: Clock + ?Sized> Clock for Arc<C> {
    fn today(&self) -> NaiveDate {
        (**self).today()
    }
}

/// Format a date as `YYYY-MM-DD` from its calendar fields.
pub fn local_date_string(date: NaiveDate) -> String {
    format!("{:04}-{:02}-{:02}", date.year(), date.month(), date.day())
}
