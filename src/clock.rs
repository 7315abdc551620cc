//! Clock and date line in Indonesian.

#[cfg(test)]
#[path = "clock_test.rs"]
mod clock_test;

use std::rc::Rc;

use chrono::{Datelike, NaiveDateTime, Timelike};

use crate::page::{Page, TextTarget};
use crate::time::TimeSource;

/// Weekday names indexed from Sunday = 0.
pub const WEEKDAYS: [&str; 7] = ["Minggu", "Senin", "Selasa", "Rabu", "Kamis", "Jumat", "Sabtu"];

/// Month names indexed from January = 0.
pub const MONTHS: [&str; 12] = [
    "Januari",
    "Februari",
    "Maret",
    "April",
    "Mei",
    "Juni",
    "Juli",
    "Agustus",
    "September",
    "Oktober",
    "November",
    "Desember",
];

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ClockSnapshot {
    /// `HH:MM:SS`, 24-hour, zero-padded.
    pub time: String,
    /// `<Weekday>, <day> <Month> <year>`, day not padded.
    pub date: String,
}

impl ClockSnapshot {
    pub fn at(now: &NaiveDateTime) -> Self {
        let time = format!("{:02}:{:02}:{:02}", now.hour(), now.minute(), now.second());
        let weekday = WEEKDAYS[now.weekday().num_days_from_sunday() as usize];
        let month = MONTHS[now.month0() as usize];
        let date = format!("{weekday}, {} {month} {}", now.day(), now.year());
        Self { time, date }
    }
}

/// Writes the current snapshot into the clock and date targets.
pub struct ClockDisplay {
    page: Rc<dyn Page>,
    clock: Rc<dyn TimeSource>,
}

impl ClockDisplay {
    pub fn new(page: Rc<dyn Page>, clock: Rc<dyn TimeSource>) -> Self {
        Self { page, clock }
    }

    /// Render the time source's current instant.
    pub fn tick(&self) -> ClockSnapshot {
        self.render(&self.clock.now())
    }

    /// Render `now`. Missing targets are skipped.
    pub fn render(&self, now: &NaiveDateTime) -> ClockSnapshot {
        let snapshot = ClockSnapshot::at(now);
        for (target, text) in [(TextTarget::Clock, &snapshot.time), (TextTarget::Date, &snapshot.date)] {
            if let Err(err) = self.page.set_text(target, text) {
                log::trace!("clock: {target:?} skipped: {err}");
            }
        }
        snapshot
    }
}
