use chrono::NaiveDate;
use std::fmt;

use super::{format_date, is_weekday};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum IgnoreReason {
    Weekend,
    OutOfMonth,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SelectOutcome {
    Ignored(IgnoreReason),
    Started(NaiveDate),
    Completed { start: NaiveDate, end: NaiveDate },
}

/// A start/end selection over weekdays.
///
/// An end is only ever set after a start and always lies strictly after it.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct DateRange {
    start: Option<NaiveDate>,
    end: Option<NaiveDate>,
}

impl DateRange {
    pub fn start(&self) -> Option<NaiveDate> {
        self.start
    }

    pub fn end(&self) -> Option<NaiveDate> {
        self.end
    }

    pub fn is_complete(&self) -> bool {
        self.start.is_some() && self.end.is_some()
    }

    pub fn bounds(&self) -> Option<(NaiveDate, NaiveDate)> {
        self.start.zip(self.end)
    }

    pub fn select(&mut self, date: NaiveDate) -> SelectOutcome {
        if !is_weekday(&date) {
            return SelectOutcome::Ignored(IgnoreReason::Weekend);
        }

        match (self.start, self.end) {
            (Some(start), None) if date > start => {
                self.end = Some(date);
                SelectOutcome::Completed { start, end: date }
            }
            _ => {
                self.start = Some(date);
                self.end = None;
                SelectOutcome::Started(date)
            }
        }
    }

    pub fn clear(&mut self) {
        self.start = None;
        self.end = None;
    }

    pub fn is_endpoint(&self, date: &NaiveDate) -> bool {
        self.start.as_ref() == Some(date) || self.end.as_ref() == Some(date)
    }

    /// Inclusive on both ends; false while the range is incomplete.
    pub fn contains(&self, date: &NaiveDate) -> bool {
        match self.bounds() {
            Some((start, end)) => &start <= date && date <= &end,
            None => false,
        }
    }

    pub fn format_with(&self, format: &str, separator: &str) -> Option<String> {
        self.bounds().map(|(start, end)| {
            format!(
                "{}{}{}",
                start.format(format),
                separator,
                end.format(format)
            )
        })
    }
}

impl fmt::Display for DateRange {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match (self.start, self.end) {
            (Some(start), Some(end)) => write!(f, "{} .. {}", format_date(&start), format_date(&end)),
            (Some(start), None) => write!(f, "{} .. ?", format_date(&start)),
            _ => write!(f, "no selection"),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn date(d: u32) -> NaiveDate {
        // October 2026: the 1st is a Thursday
        NaiveDate::from_ymd_opt(2026, 10, d).unwrap()
    }

    #[test]
    fn weekend_click_never_changes_selection() {
        let mut range = DateRange::default();
        assert_eq!(range.select(date(3)), SelectOutcome::Ignored(IgnoreReason::Weekend));
        assert_eq!(range, DateRange::default());

        range.select(date(5));
        let before = range;
        assert_eq!(range.select(date(11)), SelectOutcome::Ignored(IgnoreReason::Weekend));
        assert_eq!(range, before);

        range.select(date(9));
        let before = range;
        assert_eq!(range.select(date(10)), SelectOutcome::Ignored(IgnoreReason::Weekend));
        assert_eq!(range, before);
    }

    #[test]
    fn first_click_starts_and_later_click_ends() {
        let mut range = DateRange::default();

        assert_eq!(range.select(date(5)), SelectOutcome::Started(date(5)));
        assert_eq!(range.start(), Some(date(5)));
        assert_eq!(range.end(), None);

        assert_eq!(
            range.select(date(9)),
            SelectOutcome::Completed {
                start: date(5),
                end: date(9)
            }
        );
        assert!(range.is_complete());
    }

    #[test]
    fn earlier_or_equal_click_restarts_selection() {
        let mut range = DateRange::default();
        range.select(date(14));

        assert_eq!(range.select(date(7)), SelectOutcome::Started(date(7)));
        assert_eq!((range.start(), range.end()), (Some(date(7)), None));

        assert_eq!(range.select(date(7)), SelectOutcome::Started(date(7)));
        assert_eq!((range.start(), range.end()), (Some(date(7)), None));
    }

    #[test]
    fn click_on_complete_range_restarts_and_clears_end() {
        let mut range = DateRange::default();
        range.select(date(5));
        range.select(date(9));

        assert_eq!(range.select(date(20)), SelectOutcome::Started(date(20)));
        assert_eq!(range.end(), None);
    }

    #[test]
    fn contains_is_inclusive_and_needs_both_ends() {
        let mut range = DateRange::default();
        range.select(date(5));
        assert!(!range.contains(&date(5)));
        assert!(range.is_endpoint(&date(5)));

        range.select(date(9));
        assert!(range.contains(&date(5)));
        assert!(range.contains(&date(7)));
        assert!(range.contains(&date(9)));
        assert!(!range.contains(&date(2)));
        assert!(!range.contains(&date(12)));
        assert!(range.is_endpoint(&date(9)));
        assert!(!range.is_endpoint(&date(7)));
    }

    #[test]
    fn formatting() {
        let mut range = DateRange::default();
        assert_eq!(range.to_string(), "no selection");
        assert_eq!(range.format_with("%Y-%m-%d", " "), None);

        range.select(date(5));
        assert_eq!(range.to_string(), "2026-10-05 .. ?");

        range.select(date(9));
        assert_eq!(range.to_string(), "2026-10-05 .. 2026-10-09");
        assert_eq!(
            range.format_with("%d.%m.%Y", " - ").unwrap(),
            "05.10.2026 - 09.10.2026"
        );
    }
}
