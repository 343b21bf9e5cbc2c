use chrono::{Datelike, NaiveDate};

/// Oldest year offered by the custom-date year pickers.
pub const FIRST_SELECTABLE_YEAR: i32 = 2014;
/// Newest year offered by the custom-date year pickers.
pub const LAST_SELECTABLE_YEAR: i32 = 2025;

pub fn is_leap_year(year: i32) -> bool {
    (year % 4 == 0 && year % 100 != 0) || year % 400 == 0
}

/// Number of days in `month` (1-12) of `year`. Returns 0 for an invalid month.
pub fn days_in_month(month: u32, year: i32) -> u32 {
    match month {
        1 | 3 | 5 | 7 | 8 | 10 | 12 => 31,
        4 | 6 | 9 | 11 => 30,
        2 if is_leap_year(year) => 29,
        2 => 28,
        _ => 0,
    }
}

/// Largest pickable day when only some of the month/year are known.
/// Without a year February allows 29; without a month every day up to 31 is allowed.
pub fn max_day(month: Option<u32>, year: Option<i32>) -> u32 {
    match (month, year) {
        (Some(month), Some(year)) => days_in_month(month, year),
        // 2000 is a leap year.
        (Some(month), None) => days_in_month(month, 2000),
        (None, _) => 31,
    }
}

pub fn selectable_years() -> impl DoubleEndedIterator<Item = i32> {
    FIRST_SELECTABLE_YEAR..=LAST_SELECTABLE_YEAR
}

/// Zero-padded `YYYY-MM-DD`.
pub fn format_iso(date: NaiveDate) -> String {
    format!(
        "{:04}-{:02}-{:02}",
        date.year(),
        date.month(),
        date.day()
    )
}

pub fn parse_iso(raw: &str) -> Option<NaiveDate> {
    NaiveDate::parse_from_str(raw.trim(), "%Y-%m-%d").ok()
}

/// A date entered one field at a time. Any part may still be missing.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct PartialDate {
    pub day: Option<u32>,
    pub month: Option<u32>,
    pub year: Option<i32>,
}

impl PartialDate {
    pub const EMPTY: PartialDate = PartialDate {
        day: None,
        month: None,
        year: None,
    };

    pub fn from_date(date: NaiveDate) -> Self {
        Self {
            day: Some(date.day()),
            month: Some(date.month()),
            year: Some(date.year()),
        }
    }

    pub fn is_complete(&self) -> bool {
        self.day.is_some() && self.month.is_some() && self.year.is_some()
    }

    pub fn is_empty(&self) -> bool {
        *self == Self::EMPTY
    }

    /// Calendar date once every field is filled in and forms a real date.
    pub fn to_date(&self) -> Option<NaiveDate> {
        NaiveDate::from_ymd_opt(self.year?, self.month?, self.day?)
    }

    pub fn max_day(&self) -> u32 {
        max_day(self.month, self.year)
    }

    /// Pull the selected day down to the current month's maximum.
    pub fn clamp_day(&mut self) {
        let max = self.max_day();
        if let Some(day) = self.day
            && day > max
        {
            self.day = Some(max);
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn ymd(y: i32, m: u32, d: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(y, m, d).unwrap()
    }

    #[test]
    fn leap_year_rules() {
        assert!(is_leap_year(2024));
        assert!(is_leap_year(2000));
        assert!(!is_leap_year(1900));
        assert!(!is_leap_year(2023));
    }

    #[test]
    fn february_length_follows_leap_year() {
        assert_eq!(days_in_month(2, 2024), 29);
        assert_eq!(days_in_month(2, 2023), 28);
        assert_eq!(days_in_month(4, 2023), 30);
        assert_eq!(days_in_month(12, 2023), 31);
        assert_eq!(days_in_month(13, 2023), 0);
    }

    #[test]
    fn max_day_with_missing_parts() {
        assert_eq!(max_day(None, None), 31);
        assert_eq!(max_day(None, Some(2023)), 31);
        assert_eq!(max_day(Some(2), None), 29);
        assert_eq!(max_day(Some(2), Some(2023)), 28);
        assert_eq!(max_day(Some(9), None), 30);
    }

    #[test]
    fn iso_formatting_pads_fields() {
        assert_eq!(format_iso(ymd(2024, 3, 5)), "2024-03-05");
        assert_eq!(parse_iso("2024-03-05"), Some(ymd(2024, 3, 5)));
        assert_eq!(parse_iso("2023-02-29"), None);
        assert_eq!(parse_iso("garbage"), None);
    }

    #[test]
    fn partial_date_completes_only_with_all_fields() {
        let mut date = PartialDate::EMPTY;
        assert!(date.is_empty());
        date.day = Some(29);
        date.month = Some(2);
        assert!(!date.is_complete());
        assert_eq!(date.to_date(), None);
        date.year = Some(2024);
        assert_eq!(date.to_date(), Some(ymd(2024, 2, 29)));
        assert_eq!(PartialDate::from_date(ymd(2024, 2, 29)), date);
    }

    #[test]
    fn clamp_day_pulls_down_to_month_maximum() {
        let mut date = PartialDate {
            day: Some(30),
            month: Some(2),
            year: Some(2023),
        };
        date.clamp_day();
        assert_eq!(date.day, Some(28));

        let mut untouched = PartialDate {
            day: Some(15),
            month: Some(2),
            year: Some(2023),
        };
        untouched.clamp_day();
        assert_eq!(untouched.day, Some(15));
    }

    #[test]
    fn selectable_years_span_catalog_range() {
        let years: Vec<i32> = selectable_years().collect();
        assert_eq!(years.first(), Some(&2014));
        assert_eq!(years.last(), Some(&2025));
        assert_eq!(years.len(), 12);
    }
}
