//! Month-grid projection for the events calendar.
//!
//! A grid starts with one blank cell per weekday before the 1st (Sunday is
//! column 0), followed by one cell per day of the month.

use chrono::{Datelike, Months, NaiveDate};
use serde::Serialize;
use thiserror::Error;

use crate::models::{Event, EventType};

pub const MAX_EVENTS_PER_DAY: usize = 3;

pub const WEEKDAYS: [&str; 7] = ["Sun", "Mon", "Tue", "Wed", "Thu", "Fri", "Sat"];

const MONTH_NAMES: [&str; 12] = [
    "January",
    "February",
    "March",
    "April",
    "May",
    "June",
    "July",
    "August",
    "September",
    "October",
    "November",
    "December",
];

#[derive(Debug, Error, PartialEq, Eq)]
pub enum CalendarError {
    #[error("month must be between 1 and 12, got {0}")]
    InvalidMonth(u32),

    #[error("year {0} is outside the supported range")]
    YearOutOfRange(i32),
}

/// A year/month pair used as the calendar's reference date. `month` is
/// always in 1..=12.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct MonthRef {
    year: i32,
    month: u32,
}

impl MonthRef {
    pub fn new(year: i32, month: u32) -> Result<Self, CalendarError> {
        if !(1..=12).contains(&month) {
            return Err(CalendarError::InvalidMonth(month));
        }
        // Both neighbours must also be representable for prev/next links.
        let first = NaiveDate::from_ymd_opt(year, month, 1)
            .ok_or(CalendarError::YearOutOfRange(year))?;
        first
            .checked_add_months(Months::new(1))
            .and_then(|_| first.checked_sub_months(Months::new(1)))
            .ok_or(CalendarError::YearOutOfRange(year))?;
        Ok(Self { year, month })
    }

    pub fn containing(date: NaiveDate) -> Self {
        Self {
            year: date.year(),
            month: date.month(),
        }
    }

    pub fn year(&self) -> i32 {
        self.year
    }

    pub fn month(&self) -> u32 {
        self.month
    }

    pub fn first_day(&self) -> NaiveDate {
        NaiveDate::from_ymd_opt(self.year, self.month, 1).unwrap_or_default()
    }

    pub fn days_in_month(&self) -> u32 {
        let first = self.first_day();
        first
            .checked_add_months(Months::new(1))
            .map(|next| next.signed_duration_since(first).num_days() as u32)
            .unwrap_or(31)
    }

    /// Weekday index of the 1st, Sunday = 0.
    pub fn leading_blanks(&self) -> u32 {
        self.first_day().weekday().num_days_from_sunday()
    }

    pub fn prev(&self) -> Self {
        if self.month == 1 {
            Self {
                year: self.year - 1,
                month: 12,
            }
        } else {
            Self {
                year: self.year,
                month: self.month - 1,
            }
        }
    }

    pub fn next(&self) -> Self {
        if self.month == 12 {
            Self {
                year: self.year + 1,
                month: 1,
            }
        } else {
            Self {
                year: self.year,
                month: self.month + 1,
            }
        }
    }

    pub fn label(&self) -> String {
        format!("{} {}", MONTH_NAMES[(self.month - 1) as usize], self.year)
    }

    pub fn contains(&self, date: NaiveDate) -> bool {
        date.year() == self.year && date.month() == self.month
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct CalendarEntry {
    pub slug: String,
    pub title: String,
    #[serde(rename = "type")]
    pub event_type: EventType,
    pub time: String,
}

impl From<&Event> for CalendarEntry {
    fn from(event: &Event) -> Self {
        Self {
            slug: event.slug.clone(),
            title: event.title.clone(),
            event_type: event.event_type,
            time: event.time.clone(),
        }
    }
}

/// A grid cell. Leading blanks have no `day`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct CalendarCell {
    pub day: Option<u32>,
    pub is_today: bool,
    pub events: Vec<CalendarEntry>,
    pub overflow: usize,
}

impl CalendarCell {
    fn blank() -> Self {
        Self {
            day: None,
            is_today: false,
            events: Vec::new(),
            overflow: 0,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct MonthGrid {
    pub month: MonthRef,
    pub label: String,
    pub weekdays: [&'static str; 7],
    pub leading_blanks: u32,
    pub days_in_month: u32,
    pub cells: Vec<CalendarCell>,
    pub prev: MonthRef,
    pub next: MonthRef,
}

pub fn month_grid<'a, I>(month: MonthRef, events: I, today: NaiveDate) -> MonthGrid
where
    I: IntoIterator<Item = &'a Event>,
{
    let in_month: Vec<&Event> = events
        .into_iter()
        .filter(|e| month.contains(e.date))
        .collect();

    let leading_blanks = month.leading_blanks();
    let days_in_month = month.days_in_month();

    let mut cells: Vec<CalendarCell> = (0..leading_blanks).map(|_| CalendarCell::blank()).collect();
    cells.extend((1..=days_in_month).map(|day| {
        let on_day: Vec<&Event> = in_month
            .iter()
            .copied()
            .filter(|e| e.date.day() == day)
            .collect();
        let overflow = on_day.len().saturating_sub(MAX_EVENTS_PER_DAY);
        CalendarCell {
            day: Some(day),
            is_today: month.contains(today) && today.day() == day,
            events: on_day
                .into_iter()
                .take(MAX_EVENTS_PER_DAY)
                .map(CalendarEntry::from)
                .collect(),
            overflow,
        }
    }));

    MonthGrid {
        month,
        label: month.label(),
        weekdays: WEEKDAYS,
        leading_blanks,
        days_in_month,
        cells,
        prev: month.prev(),
        next: month.next(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::event::fixtures::{event, six_events};

    fn date(s: &str) -> NaiveDate {
        s.parse().unwrap()
    }

    #[test]
    fn test_march_2024_layout() {
        // March 1st 2024 is a Friday.
        let month = MonthRef::new(2024, 3).unwrap();
        let grid = month_grid(month, &six_events(), date("2024-03-10"));

        assert_eq!(grid.leading_blanks, 5);
        assert_eq!(grid.days_in_month, 31);
        assert_eq!(grid.cells.len(), 36);
        assert!(grid.cells[..5].iter().all(|c| c.day.is_none()));
        assert_eq!(grid.cells[5].day, Some(1));
        assert_eq!(grid.label, "March 2024");
    }

    #[test]
    fn test_grid_shape_for_every_month() {
        for year in [2023, 2024, 2100] {
            for m in 1..=12 {
                let month = MonthRef::new(year, m).unwrap();
                let grid = month_grid(month, std::iter::empty(), date("2000-01-01"));
                let w = month.first_day().weekday().num_days_from_sunday();
                let blanks = grid.cells.iter().take_while(|c| c.day.is_none()).count();
                assert_eq!(blanks as u32, w);
                let days: Vec<u32> = grid.cells.iter().filter_map(|c| c.day).collect();
                assert_eq!(days, (1..=grid.days_in_month).collect::<Vec<_>>());
            }
        }
    }

    #[test]
    fn test_month_lengths() {
        assert_eq!(MonthRef::new(2024, 2).unwrap().days_in_month(), 29);
        assert_eq!(MonthRef::new(2023, 2).unwrap().days_in_month(), 28);
        assert_eq!(MonthRef::new(2100, 2).unwrap().days_in_month(), 28);
        assert_eq!(MonthRef::new(2024, 4).unwrap().days_in_month(), 30);
        assert_eq!(MonthRef::new(2024, 12).unwrap().days_in_month(), 31);
    }

    #[test]
    fn test_events_land_on_their_day_only_in_matching_month() {
        let events = six_events();
        let month = MonthRef::new(2024, 3).unwrap();
        let grid = month_grid(month, &events, date("2024-01-01"));

        let day = |d: u32| grid.cells.iter().find(|c| c.day == Some(d)).unwrap();
        assert_eq!(day(15).events[0].slug, "event-1");
        assert_eq!(day(22).events[0].slug, "event-2");
        assert_eq!(day(28).events[0].slug, "event-3");
        // April 5th must not show up on March 5th.
        assert!(day(5).events.is_empty());
    }

    #[test]
    fn test_same_day_number_other_year_is_ignored() {
        let events = vec![event("x", EventType::Social, "2023-03-15", &[])];
        let grid = month_grid(MonthRef::new(2024, 3).unwrap(), &events, date("2024-01-01"));
        assert!(grid.cells.iter().all(|c| c.events.is_empty()));
    }

    #[test]
    fn test_overflow_beyond_three() {
        let events: Vec<Event> = (0..5)
            .map(|i| event(&i.to_string(), EventType::Social, "2024-06-07", &[]))
            .collect();
        let grid = month_grid(MonthRef::new(2024, 6).unwrap(), &events, date("2024-01-01"));
        let cell = grid.cells.iter().find(|c| c.day == Some(7)).unwrap();
        assert_eq!(cell.events.len(), MAX_EVENTS_PER_DAY);
        assert_eq!(cell.overflow, 2);
        assert_eq!(cell.events[0].slug, "event-0");
    }

    #[test]
    fn test_today_flag() {
        let month = MonthRef::new(2024, 3).unwrap();
        let grid = month_grid(month, std::iter::empty(), date("2024-03-10"));
        let today: Vec<u32> = grid.cells.iter().filter(|c| c.is_today).filter_map(|c| c.day).collect();
        assert_eq!(today, vec![10]);

        let other = month_grid(MonthRef::new(2024, 4).unwrap(), std::iter::empty(), date("2024-03-10"));
        assert!(other.cells.iter().all(|c| !c.is_today));
    }

    #[test]
    fn test_navigation_wraps_years() {
        let jan = MonthRef::new(2024, 1).unwrap();
        assert_eq!(jan.prev(), MonthRef { year: 2023, month: 12 });
        let dec = MonthRef::new(2024, 12).unwrap();
        assert_eq!(dec.next(), MonthRef { year: 2025, month: 1 });
        let july = MonthRef::containing(date("2024-07-19"));
        assert_eq!((july.year(), july.month()), (2024, 7));
        assert_eq!(july.label(), "July 2024");
    }

    #[test]
    fn test_invalid_month_rejected() {
        assert_eq!(MonthRef::new(2024, 0), Err(CalendarError::InvalidMonth(0)));
        assert_eq!(MonthRef::new(2024, 13), Err(CalendarError::InvalidMonth(13)));
        assert!(matches!(
            MonthRef::new(i32::MAX, 6),
            Err(CalendarError::YearOutOfRange(_))
        ));
    }
}
