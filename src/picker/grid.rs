use chrono::{Datelike, Duration, NaiveDate, Weekday};
use serde::Deserialize;
use std::fmt;

use super::{is_weekday, DateRange, MonthCursor};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum WeekStart {
    Monday,
    Sunday,
}

impl Default for WeekStart {
    fn default() -> Self {
        WeekStart::Monday
    }
}

impl WeekStart {
    const MONDAY_HEADER: [&'static str; 7] = ["Mon", "Tue", "Wed", "Thu", "Fri", "Sat", "Sun"];
    const SUNDAY_HEADER: [&'static str; 7] = ["Sun", "Mon", "Tue", "Wed", "Thu", "Fri", "Sat"];

    /// Column of `weekday` in a week starting at `self`.
    pub fn column(self, weekday: Weekday) -> u32 {
        match self {
            WeekStart::Monday => weekday.num_days_from_monday(),
            WeekStart::Sunday => weekday.num_days_from_sunday(),
        }
    }

    pub fn header(self) -> &'static [&'static str; 7] {
        match self {
            WeekStart::Monday => &Self::MONDAY_HEADER,
            WeekStart::Sunday => &Self::SUNDAY_HEADER,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct DayState {
    pub date: NaiveDate,
    pub weekend: bool,
    pub selected: bool,
    pub in_range: bool,
    pub today: bool,
    pub focused: bool,
}

impl DayState {
    pub fn day(&self) -> u32 {
        self.date.day()
    }

    fn marker(&self) -> char {
        if self.selected {
            '*'
        } else if self.in_range {
            '+'
        } else if self.weekend {
            '-'
        } else {
            ' '
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum GridCell {
    Blank,
    Day(DayState),
}

/// Classified layout of one month: blanks before the 1st, then every day.
#[derive(Debug, Clone)]
pub struct MonthGrid {
    cursor: MonthCursor,
    week_start: WeekStart,
    cells: Vec<GridCell>,
}

impl MonthGrid {
    pub const COLUMNS: usize = 7;
    pub const CELL_WIDTH: usize = 4;

    pub fn new(
        cursor: MonthCursor,
        range: &DateRange,
        week_start: WeekStart,
        today: Option<NaiveDate>,
        focus: Option<NaiveDate>,
    ) -> Self {
        let first = cursor.first_day();
        let blanks = week_start.column(first.weekday()) as usize;
        let num_days = cursor.days_in_month();

        let mut cells = Vec::with_capacity(blanks + num_days as usize);
        cells.resize(blanks, GridCell::Blank);

        cells.extend((0..num_days).map(|offset| {
            let date = first + Duration::days(offset as i64);
            GridCell::Day(DayState {
                date,
                weekend: !is_weekday(&date),
                selected: range.is_endpoint(&date),
                in_range: range.contains(&date),
                today: today == Some(date),
                focused: focus == Some(date),
            })
        }));

        MonthGrid {
            cursor,
            week_start,
            cells,
        }
    }

    pub fn cursor(&self) -> &MonthCursor {
        &self.cursor
    }

    pub fn header(&self) -> &'static [&'static str; 7] {
        self.week_start.header()
    }

    pub fn leading_blanks(&self) -> usize {
        self.cells
            .iter()
            .take_while(|cell| matches!(cell, GridCell::Blank))
            .count()
    }

    pub fn cells(&self) -> &[GridCell] {
        &self.cells
    }

    pub fn days(&self) -> impl Iterator<Item = &DayState> {
        self.cells.iter().filter_map(|cell| match cell {
            GridCell::Day(day) => Some(day),
            GridCell::Blank => None,
        })
    }

    pub fn rows(&self) -> std::slice::Chunks<'_, GridCell> {
        self.cells.chunks(Self::COLUMNS)
    }
}

impl fmt::Display for MonthGrid {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let title = format!("{} {}", self.cursor.month().name(), self.cursor.year());
        writeln!(
            f,
            "{}",
            format!("{:^width$}", title, width = Self::COLUMNS * Self::CELL_WIDTH).trim_end()
        )?;

        for head in self.header() {
            write!(f, "{:>width$}", head, width = Self::CELL_WIDTH)?;
        }

        for row in self.rows() {
            let mut line = String::with_capacity(Self::COLUMNS * Self::CELL_WIDTH);
            for cell in row {
                match cell {
                    GridCell::Blank => line.push_str("    "),
                    GridCell::Day(day) => {
                        line.push_str(&format!(" {}{:>2}", day.marker(), day.day()))
                    }
                }
            }
            write!(f, "\n{}", line.trim_end())?;
        }

        Ok(())
    }
}
