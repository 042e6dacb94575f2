use chrono::{Datelike, Local, Month, NaiveDate};
use num_traits::FromPrimitive;
use std::cmp::Ordering;
use std::fmt;
use std::ops::{Add, Sub};

use super::days_of_month;

/// The month currently displayed by the picker.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct MonthCursor {
    month: Month,
    year: i32,
}

impl MonthCursor {
    pub fn new(month: Month, year: i32) -> Self {
        MonthCursor { month, year }
    }

    /// Builds a cursor from a zero-based month index (`0` is January).
    pub fn from_zero_based(month0: u32, year: i32) -> Option<Self> {
        let month = Month::from_u32(month0 + 1)?;
        let cursor = MonthCursor::new(month, year);

        if cursor.in_supported_range() {
            Some(cursor)
        } else {
            None
        }
    }

    pub fn month(&self) -> Month {
        self.month
    }

    pub fn month0(&self) -> u32 {
        self.month.number_from_month() - 1
    }

    pub fn year(&self) -> i32 {
        self.year
    }

    pub fn navigate(&mut self, delta: i32) {
        *self = *self + delta;
    }

    pub fn next(&self) -> Self {
        *self + 1
    }

    pub fn prev(&self) -> Self {
        *self - 1
    }

    pub fn days_in_month(&self) -> u32 {
        days_of_month(&self.month, self.year)
    }

    pub fn first_day(&self) -> NaiveDate {
        self.day(1)
            .expect("Month cursor should stay within the supported date range")
    }

    /// The date of `day` in this month, if the month has such a day.
    pub fn day(&self, day: u32) -> Option<NaiveDate> {
        NaiveDate::from_ymd_opt(self.year, self.month.number_from_month(), day)
    }

    pub fn contains<T: Datelike>(&self, date: &T) -> bool {
        date.year() == self.year && date.month() == self.month.number_from_month()
    }

    fn months_since_epoch(&self) -> i64 {
        self.year as i64 * 12 + self.month0() as i64
    }

    /// Every day of the month is a representable `NaiveDate`.
    fn in_supported_range(&self) -> bool {
        self.day(1).is_some() && self.day(self.days_in_month()).is_some()
    }
}

impl Default for MonthCursor {
    fn default() -> Self {
        MonthCursor::from(Local::now().date_naive())
    }
}

impl<T: Datelike> From<T> for MonthCursor {
    fn from(date: T) -> Self {
        MonthCursor::new(
            Month::from_u32(date.month()).unwrap_or(Month::January),
            date.year(),
        )
    }
}

impl Add<i32> for MonthCursor {
    type Output = MonthCursor;

    fn add(self, rhs: i32) -> Self::Output {
        let total = self.months_since_epoch() + rhs as i64;
        let year = total.div_euclid(12);

        if year > i32::MAX as i64 || year < i32::MIN as i64 {
            return self;
        }

        MonthCursor::from_zero_based(total.rem_euclid(12) as u32, year as i32).unwrap_or(self)
    }
}

impl Sub<i32> for MonthCursor {
    type Output = MonthCursor;

    fn sub(self, rhs: i32) -> Self::Output {
        self + rhs.saturating_neg()
    }
}

impl Ord for MonthCursor {
    fn cmp(&self, other: &Self) -> Ordering {
        self.months_since_epoch().cmp(&other.months_since_epoch())
    }
}

impl PartialOrd for MonthCursor {
    fn partial_cmp(&self, other: &Self) -> Option<Ordering> {
        Some(self.cmp(other))
    }
}

impl fmt::Display for MonthCursor {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}/{}", self.month.number_from_month(), self.year)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn back_from_january_wraps_to_december_of_previous_year() {
        let mut cursor = MonthCursor::from_zero_based(0, 2026).unwrap();
        cursor.navigate(-1);

        assert_eq!(cursor.month0(), 11);
        assert_eq!(cursor.year(), 2025);
    }

    #[test]
    fn forward_from_december_wraps_to_january_of_next_year() {
        let mut cursor = MonthCursor::from_zero_based(11, 2026).unwrap();
        cursor.navigate(1);

        assert_eq!(cursor.month0(), 0);
        assert_eq!(cursor.year(), 2027);
    }

    #[test]
    fn navigate_within_year_keeps_year() {
        let mut cursor = MonthCursor::new(Month::October, 2026);
        cursor.navigate(-1);
        assert_eq!(cursor, MonthCursor::new(Month::September, 2026));
        cursor.navigate(2);
        assert_eq!(cursor, MonthCursor::new(Month::November, 2026));
    }

    #[test]
    fn large_deltas_carry_years() {
        let cursor = MonthCursor::new(Month::March, 2026);

        assert_eq!(cursor + 25, MonthCursor::new(Month::April, 2028));
        assert_eq!(cursor - 13, MonthCursor::new(Month::February, 2025));
        assert_eq!(cursor - 3, MonthCursor::new(Month::December, 2025));
        assert_eq!(cursor - 24, MonthCursor::new(Month::March, 2024));
    }

    #[test]
    fn navigation_stops_at_supported_range() {
        let last = MonthCursor::from(NaiveDate::MAX);
        assert_eq!(last.month(), Month::December);
        assert_eq!(last.next(), last);
        assert_eq!(last.prev(), MonthCursor::new(Month::November, last.year()));
        assert_eq!(last.days_in_month(), 31);

        let first = MonthCursor::from(NaiveDate::MIN);
        assert_eq!(first.month(), Month::January);
        assert_eq!(first.prev(), first);
        assert_eq!(first.next(), MonthCursor::new(Month::February, first.year()));

        assert_eq!(MonthCursor::from_zero_based(0, NaiveDate::MAX.year() + 1), None);
    }

    #[test]
    fn ordering_and_display() {
        let oct = MonthCursor::new(Month::October, 2026);
        assert!(oct < oct.next());
        assert!(oct.prev() < oct);
        assert!(MonthCursor::new(Month::December, 2025) < MonthCursor::new(Month::January, 2026));
        assert_eq!(oct.to_string(), "10/2026");
    }

    #[test]
    fn contains_and_first_day() {
        let feb = MonthCursor::new(Month::February, 2024);

        assert_eq!(feb.days_in_month(), 29);
        assert_eq!(feb.first_day(), NaiveDate::from_ymd_opt(2024, 2, 1).unwrap());
        assert!(feb.contains(&NaiveDate::from_ymd_opt(2024, 2, 29).unwrap()));
        assert!(!feb.contains(&NaiveDate::from_ymd_opt(2024, 3, 1).unwrap()));
        assert_eq!(feb.day(30), None);
    }
}
