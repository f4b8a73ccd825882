//! Calendar logic for the monthly analytics screens.
//!
//! Supplies the half-open `[start, end)` bounds of a calendar month and the
//! in-memory focus month the analytics screens page through. The aggregation
//! services consume month intervals from here and never do date math of
//! their own.

use anyhow::{bail, Result};
use chrono::{DateTime, Datelike, NaiveDate, NaiveTime, Utc};
use log::info;
use shared::AnalyticsFocusDate;
use std::sync::{Arc, Mutex};

/// Half-open month interval: `start` is the first instant of the month,
/// `end` the first instant of the next month.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct MonthInterval {
    pub start: DateTime<Utc>,
    pub end: DateTime<Utc>,
}

impl MonthInterval {
    /// Inclusive at `start`, exclusive at `end`, so adjacent months never
    /// double-count or skip an instant.
    pub fn contains(&self, instant: DateTime<Utc>) -> bool {
        self.start <= instant && instant < self.end
    }
}

/// Calendar service that handles month intervals and analytics focus
/// navigation.
#[derive(Clone)]
pub struct CalendarService {
    /// Month currently shown by the analytics screens. Kept in memory only.
    current_focus_date: Arc<Mutex<AnalyticsFocusDate>>,
}

impl CalendarService {
    pub fn new() -> Self {
        Self {
            current_focus_date: Arc::new(Mutex::new(AnalyticsFocusDate::default())),
        }
    }

    /// `[start, end)` bounds of the given calendar month, or `None` when the
    /// month number is out of range or the date is unrepresentable.
    pub fn month_interval(&self, month: u32, year: i32) -> Option<MonthInterval> {
        let start_date = NaiveDate::from_ymd_opt(year, month, 1)?;
        let (next_month, next_year) = Self::next_month(month, year);
        let end_date = NaiveDate::from_ymd_opt(next_year, next_month, 1)?;

        let start = start_date.and_time(NaiveTime::MIN).and_utc();
        let end = end_date.and_time(NaiveTime::MIN).and_utc();
        Some(MonthInterval { start, end })
    }

    /// Month interval containing the given instant.
    pub fn month_interval_for(&self, instant: DateTime<Utc>) -> Option<MonthInterval> {
        self.month_interval(instant.month(), instant.year())
    }

    /// Month preceding the given one, rolling over year boundaries.
    pub fn previous_month(month: u32, year: i32) -> (u32, i32) {
        if month == 1 {
            (12, year - 1)
        } else {
            (month - 1, year)
        }
    }

    /// Month following the given one, rolling over year boundaries.
    pub fn next_month(month: u32, year: i32) -> (u32, i32) {
        if month == 12 {
            (1, year + 1)
        } else {
            (month + 1, year)
        }
    }

    /// Current focus month of the analytics screens.
    pub fn get_focus_date(&self) -> AnalyticsFocusDate {
        self.current_focus_date.lock().unwrap().clone()
    }

    /// Move the analytics focus to a specific month.
    pub fn set_focus_date(&self, month: u32, year: i32) -> Result<AnalyticsFocusDate> {
        if !(1..=12).contains(&month) {
            bail!("Invalid month: {}. Must be between 1 and 12", month);
        }

        let new_focus_date = AnalyticsFocusDate { month, year };
        {
            let mut focus_date = self.current_focus_date.lock().unwrap();
            *focus_date = new_focus_date.clone();
        }
        info!("🗓️ CALENDAR: focus moved to {}/{}", month, year);

        Ok(new_focus_date)
    }

    /// Page the analytics focus one month back.
    pub fn navigate_previous_month(&self) -> AnalyticsFocusDate {
        let current = self.get_focus_date();
        let (month, year) = Self::previous_month(current.month, current.year);

        // previous_month always yields a valid month number
        self.set_focus_date(month, year).unwrap()
    }

    /// Page the analytics focus one month forward.
    pub fn navigate_next_month(&self) -> AnalyticsFocusDate {
        let current = self.get_focus_date();
        let (month, year) = Self::next_month(current.month, current.year);

        // next_month always yields a valid month number
        self.set_focus_date(month, year).unwrap()
    }
}

impl Default for CalendarService {
    fn default() -> Self {
        Self::new()
    }
}
