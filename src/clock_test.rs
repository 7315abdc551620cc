use chrono::NaiveDate;

use super::*;
use crate::page::{MemoryPage, Part};
use crate::time::FixedClock;

fn instant(y: i32, m: u32, d: u32, hh: u32, mm: u32, ss: u32) -> NaiveDateTime {
    NaiveDate::from_ymd_opt(y, m, d)
        .and_then(|date| date.and_hms_opt(hh, mm, ss))
        .expect("valid fixture instant")
}

// =============================================================
// ClockSnapshot
// =============================================================

#[test]
fn formats_indonesian_date_and_padded_time() {
    let snapshot = ClockSnapshot::at(&instant(2025, 3, 5, 9, 7, 3));
    assert_eq!(snapshot.time, "09:07:03");
    assert_eq!(snapshot.date, "Rabu, 5 Maret 2025");
}

#[test]
fn uses_24_hour_time() {
    let snapshot = ClockSnapshot::at(&instant(2024, 12, 31, 23, 59, 59));
    assert_eq!(snapshot.time, "23:59:59");
    assert_eq!(snapshot.date, "Selasa, 31 Desember 2024");
}

#[test]
fn midnight_is_zero_padded() {
    let snapshot = ClockSnapshot::at(&instant(2024, 1, 7, 0, 0, 0));
    assert_eq!(snapshot.time, "00:00:00");
    assert_eq!(snapshot.date, "Minggu, 7 Januari 2024");
}

#[test]
fn weekday_table_starts_on_sunday() {
    // 2 March 2025 was a Sunday.
    let names: Vec<String> = (2..9)
        .map(|day| ClockSnapshot::at(&instant(2025, 3, day, 12, 0, 0)).date)
        .map(|date| date.split(',').next().unwrap_or_default().to_owned())
        .collect();
    assert_eq!(names, WEEKDAYS.to_vec());
}

#[test]
fn every_month_name_is_used() {
    for (index, name) in MONTHS.iter().enumerate() {
        let month = u32::try_from(index).expect("month index") + 1;
        let date = ClockSnapshot::at(&instant(2025, month, 1, 8, 0, 0)).date;
        assert!(date.ends_with(&format!("1 {name} 2025")), "{date}");
    }
}

// =============================================================
// ClockDisplay
// =============================================================

#[test]
fn render_writes_both_targets() {
    let page = Rc::new(MemoryPage::new());
    let display = ClockDisplay::new(page.clone(), Rc::new(FixedClock::new(instant(2025, 3, 5, 9, 7, 3))));
    display.tick();
    assert_eq!(page.text(TextTarget::Clock).as_deref(), Some("09:07:03"));
    assert_eq!(page.text(TextTarget::Date).as_deref(), Some("Rabu, 5 Maret 2025"));
}

#[test]
fn render_skips_missing_clock_target() {
    let page = Rc::new(MemoryPage::new().without(Part::Clock));
    let display = ClockDisplay::new(page.clone(), Rc::new(FixedClock::new(instant(2025, 3, 5, 9, 7, 3))));
    let snapshot = display.tick();
    assert_eq!(snapshot.time, "09:07:03");
    assert_eq!(page.text(TextTarget::Clock), None);
    assert_eq!(page.text(TextTarget::Date).as_deref(), Some("Rabu, 5 Maret 2025"));
}

#[test]
fn render_with_no_targets_does_not_fail() {
    let page = Rc::new(MemoryPage::new().without(Part::Clock).without(Part::Date));
    let display = ClockDisplay::new(page.clone(), Rc::new(FixedClock::new(instant(2025, 3, 5, 9, 7, 3))));
    display.tick();
    assert!(page.journal().is_empty());
}

#[test]
fn tick_follows_the_time_source() {
    let page = Rc::new(MemoryPage::new());
    let clock = Rc::new(FixedClock::new(instant(2025, 3, 5, 9, 7, 3)));
    let display = ClockDisplay::new(page.clone(), clock.clone());
    display.tick();
    clock.set(instant(2025, 3, 5, 9, 7, 4));
    display.tick();
    assert_eq!(page.text(TextTarget::Clock).as_deref(), Some("09:07:04"));
}
