use std::collections::BTreeSet;
use std::ops::RangeInclusive;

use chrono::NaiveDate;

use crate::date::PartialDate;
use crate::error::DateRangeError;
use crate::filter::{FilterValue, seasonal_label};

pub const TOTAL_SEASONS: u32 = 24;

/// Which picker dialog is showing.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SubSelector {
    Seasonal,
    CustomDate,
}

/// Seasons picked in the seasonal dialog. Kept across open/close until cleared.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct SeasonSelector {
    selected: BTreeSet<u32>,
}

impl SeasonSelector {
    pub fn seasons() -> RangeInclusive<u32> {
        1..=TOTAL_SEASONS
    }

    /// Flip membership of `season`. Out-of-range numbers are ignored.
    pub fn toggle(&mut self, season: u32) -> bool {
        if !Self::seasons().contains(&season) {
            return false;
        }
        if !self.selected.remove(&season) {
            self.selected.insert(season);
        }
        true
    }

    pub fn is_selected(&self, season: u32) -> bool {
        self.selected.contains(&season)
    }

    pub fn selected(&self) -> &BTreeSet<u32> {
        &self.selected
    }

    pub fn is_empty(&self) -> bool {
        self.selected.is_empty()
    }

    pub fn clear(&mut self) {
        self.selected.clear();
    }

    pub fn restore(&mut self, seasons: &BTreeSet<u32>) {
        self.selected = seasons
            .iter()
            .copied()
            .filter(|season| Self::seasons().contains(season))
            .collect();
    }

    pub fn label(&self) -> String {
        seasonal_label(&self.selected)
    }

    /// Value to commit, `None` while nothing is picked.
    pub fn to_value(&self) -> Option<FilterValue> {
        (!self.is_empty()).then(|| FilterValue::Seasonal(self.selected.clone()))
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Endpoint {
    Start,
    End,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DateField {
    Day,
    Month,
    Year,
}

/// Start and end dates of the custom range, entered field by field.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct CustomDateSelector {
    start: PartialDate,
    end: PartialDate,
}

impl CustomDateSelector {
    pub fn date(&self, endpoint: Endpoint) -> &PartialDate {
        match endpoint {
            Endpoint::Start => &self.start,
            Endpoint::End => &self.end,
        }
    }

    fn date_mut(&mut self, endpoint: Endpoint) -> &mut PartialDate {
        match endpoint {
            Endpoint::Start => &mut self.start,
            Endpoint::End => &mut self.end,
        }
    }

    /// Set or clear one field. Month and year changes clamp the day to the
    /// new month length; days outside 1..=max are pulled into range.
    pub fn set_field(&mut self, endpoint: Endpoint, field: DateField, value: Option<i32>) {
        let date = self.date_mut(endpoint);
        match field {
            DateField::Day => {
                let max = date.max_day();
                date.day = value
                    .and_then(|day| u32::try_from(day).ok())
                    .filter(|day| *day > 0)
                    .map(|day| day.min(max));
            }
            DateField::Month => {
                date.month = value
                    .and_then(|month| u32::try_from(month).ok())
                    .filter(|month| (1..=12).contains(month));
                date.clamp_day();
            }
            DateField::Year => {
                date.year = value;
                date.clamp_day();
            }
        }
    }

    /// Days the day picker should offer for `endpoint`.
    pub fn day_options(&self, endpoint: Endpoint) -> RangeInclusive<u32> {
        1..=self.date(endpoint).max_day()
    }

    pub fn validate(&self) -> Result<(NaiveDate, NaiveDate), DateRangeError> {
        let (Some(start), Some(end)) = (self.start.to_date(), self.end.to_date()) else {
            return Err(DateRangeError::Incomplete);
        };
        if end < start {
            return Err(DateRangeError::EndBeforeStart);
        }
        Ok((start, end))
    }

    pub fn can_apply(&self) -> bool {
        self.validate().is_ok()
    }

    /// Message shown under the pickers while the range is not applicable.
    pub fn validation_message(&self) -> Option<String> {
        self.validate().err().map(|err| err.to_string())
    }

    pub fn to_value(&self) -> Result<FilterValue, DateRangeError> {
        let (start, end) = self.validate()?;
        Ok(FilterValue::DateRange { start, end })
    }

    pub fn restore(&mut self, start: NaiveDate, end: NaiveDate) {
        self.start = PartialDate::from_date(start);
        self.end = PartialDate::from_date(end);
    }

    pub fn clear(&mut self) {
        self.start = PartialDate::EMPTY;
        self.end = PartialDate::EMPTY;
    }
}
