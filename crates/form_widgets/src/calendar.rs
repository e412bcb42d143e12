//! Month grid and selection helpers for the date picker.

use chrono::{Datelike, Months, NaiveDate, NaiveDateTime, NaiveTime};

/// Column headers for a Monday-first grid.
pub const WEEKDAY_LABELS: [&str; 7] = ["Mo", "Tu", "We", "Th", "Fr", "Sa", "Su"];

const GRID_DAYS: usize = 42;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
/// The month currently shown by the picker.
pub struct CalendarMonth {
    first: NaiveDate,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct CalendarDay {
    pub date: NaiveDate,
    /// `false` for leading and trailing days borrowed from adjacent months.
    pub in_month: bool,
}

impl CalendarMonth {
    /// Returns `None` for an invalid month or an out-of-range year.
    pub fn new(year: i32, month: u32) -> Option<Self> {
        NaiveDate::from_ymd_opt(year, month, 1).map(|first| Self { first })
    }

    /// Month containing `date`.
    pub fn containing(date: NaiveDate) -> Self {
        Self {
            first: date.with_day(1).unwrap_or(date),
        }
    }

    pub fn year(&self) -> i32 {
        self.first.year()
    }

    pub fn month(&self) -> u32 {
        self.first.month()
    }

    pub fn prev(self) -> Self {
        self.first
            .checked_sub_months(Months::new(1))
            .map_or(self, |first| Self { first })
    }

    pub fn next(self) -> Self {
        self.first
            .checked_add_months(Months::new(1))
            .map_or(self, |first| Self { first })
    }

    /// Header text such as `March 2025`.
    pub fn title(&self) -> String {
        self.first.format("%B %Y").to_string()
    }

    /// Six Monday-first weeks covering the month.
    pub fn weeks(&self) -> Vec<Vec<CalendarDay>> {
        let lead = u64::from(self.first.weekday().num_days_from_monday());
        let start = self
            .first
            .checked_sub_days(chrono::Days::new(lead))
            .unwrap_or(self.first);
        let days: Vec<CalendarDay> = start
            .iter_days()
            .take(GRID_DAYS)
            .map(|date| CalendarDay {
                date,
                in_month: date.year() == self.year() && date.month() == self.month(),
            })
            .collect();
        days.chunks(7).map(<[CalendarDay]>::to_vec).collect()
    }
}

/// Whether `date` falls inside the optional inclusive bounds.
pub fn is_selectable(date: NaiveDate, min: Option<NaiveDate>, max: Option<NaiveDate>) -> bool {
    min.map_or(true, |min| date >= min) && max.map_or(true, |max| date <= max)
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
/// A picked date with an optional time of day.
pub struct DateTimeSelection {
    pub date: NaiveDate,
    pub time: Option<NaiveTime>,
}

impl DateTimeSelection {
    pub fn date_only(date: NaiveDate) -> Self {
        Self { date, time: None }
    }

    pub fn from_datetime(value: NaiveDateTime, with_time: bool) -> Self {
        Self {
            date: value.date(),
            time: with_time.then(|| value.time()),
        }
    }

    /// Date at the selected time, or midnight.
    pub fn to_naive_datetime(&self) -> NaiveDateTime {
        self.date.and_time(self.time.unwrap_or_default())
    }

    /// `Mar 5, 2025`, with ` 14:30` appended when a time is set.
    pub fn format_display(&self) -> String {
        let date = self.date.format("%b %-d, %Y");
        match self.time {
            Some(time) => format!("{date} {}", time.format("%H:%M")),
            None => date.to_string(),
        }
    }

    /// ISO-8601 form value: `2025-03-05` or `2025-03-05T14:30`.
    pub fn iso_value(&self) -> String {
        match self.time {
            Some(time) => format!("{}T{}", self.date.format("%Y-%m-%d"), time.format("%H:%M")),
            None => self.date.format("%Y-%m-%d").to_string(),
        }
    }
}

/// Parses a `HH:MM` time field. Surrounding whitespace is ignored.
pub fn parse_time_input(raw: &str) -> Option<NaiveTime> {
    NaiveTime::parse_from_str(raw.trim(), "%H:%M").ok()
}
