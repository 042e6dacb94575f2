mod cursor;
mod grid;
mod range;

pub use cursor::MonthCursor;
pub use grid::{DayState, GridCell, MonthGrid, WeekStart};
pub use range::{DateRange, IgnoreReason, SelectOutcome};

use chrono::{Datelike, Duration, Month, NaiveDate, Weekday};

use crate::error::{Error, ErrorKind, Result};

pub const DATE_FORMAT: &'static str = "%Y-%m-%d";

pub fn days_of_month(month: &Month, year: i32) -> u32 {
    let first = NaiveDate::from_ymd_opt(year, month.number_from_month(), 1);
    let next = if month.number_from_month() == 12 {
        year.checked_add(1).and_then(|year| NaiveDate::from_ymd_opt(year, 1, 1))
    } else {
        NaiveDate::from_ymd_opt(year, month.number_from_month() + 1, 1)
    };

    match (first, next) {
        (Some(first), Some(next)) => next.signed_duration_since(first).num_days() as u32,
        // Last representable month: count up to the maximum date
        (Some(first), None) => NaiveDate::MAX.day() - first.day() + 1,
        _ => 0,
    }
}

pub fn is_weekday(date: &NaiveDate) -> bool {
    !matches!(date.weekday(), Weekday::Sat | Weekday::Sun)
}

pub fn format_date(date: &NaiveDate) -> String {
    date.format(DATE_FORMAT).to_string()
}

pub fn parse_date(input: &str) -> Result<NaiveDate> {
    Ok(NaiveDate::parse_from_str(input.trim(), DATE_FORMAT)?)
}

/// Parses `YYYY-MM` into the cursor for that month.
pub fn parse_month(input: &str) -> Result<MonthCursor> {
    let invalid = || Error::new(ErrorKind::DateParse, &format!("'{}' is not YYYY-MM", input));

    let (year, month) = input.trim().split_once('-').ok_or_else(invalid)?;
    let year = year.parse::<i32>().map_err(|_| invalid())?;
    let month = month.parse::<u32>().map_err(|_| invalid())?;

    if !(1..=12).contains(&month) {
        return Err(invalid());
    }

    MonthCursor::from_zero_based(month - 1, year).ok_or_else(invalid)
}

/// Month view state: the displayed month, the selected range and the
/// focused day standing in for the pointer.
#[derive(Debug, Clone)]
pub struct DatePicker {
    cursor: MonthCursor,
    range: DateRange,
    focus: NaiveDate,
    week_start: WeekStart,
}

impl DatePicker {
    pub fn new(focus: NaiveDate, week_start: WeekStart) -> Self {
        DatePicker {
            cursor: MonthCursor::from(focus),
            range: DateRange::default(),
            focus,
            week_start,
        }
    }

    pub fn cursor(&self) -> &MonthCursor {
        &self.cursor
    }

    pub fn range(&self) -> &DateRange {
        &self.range
    }

    pub fn focus(&self) -> &NaiveDate {
        &self.focus
    }

    pub fn week_start(&self) -> WeekStart {
        self.week_start
    }

    pub fn navigate(&mut self, delta: i32) {
        self.show_month(self.cursor + delta);
    }

    /// Displays `cursor`, keeping the focused day number where possible.
    pub fn show_month(&mut self, cursor: MonthCursor) {
        let day = std::cmp::min(self.focus.day(), cursor.days_in_month());

        self.cursor = cursor;
        self.focus = cursor.day(day).unwrap_or_else(|| cursor.first_day());
    }

    pub fn move_focus(&mut self, days: i64) {
        if let Some(focus) = self.focus.checked_add_signed(Duration::days(days)) {
            self.focus_date(focus);
        }
    }

    pub fn focus_date(&mut self, date: NaiveDate) {
        self.focus = date;
        self.cursor = MonthCursor::from(date);
    }

    pub fn select_day(&mut self, day: u32) -> SelectOutcome {
        let outcome = match self.cursor.day(day) {
            Some(date) => self.range.select(date),
            None => SelectOutcome::Ignored(IgnoreReason::OutOfMonth),
        };

        log::debug!("Selecting day {} of {}: {:?}", day, self.cursor, outcome);

        outcome
    }

    pub fn select_focused(&mut self) -> SelectOutcome {
        self.select_day(self.focus.day())
    }

    pub fn select_date(&mut self, date: NaiveDate) -> SelectOutcome {
        self.focus_date(date);
        self.select_focused()
    }

    pub fn clear_selection(&mut self) {
        self.range.clear();
    }

    pub fn grid(&self, today: Option<NaiveDate>) -> MonthGrid {
        MonthGrid::new(
            self.cursor,
            &self.range,
            self.week_start,
            today,
            Some(self.focus),
        )
    }
}
