use std::collections::{BTreeMap, BTreeSet};
use std::fmt;

use chrono::NaiveDate;

use crate::catalog::{CUSTOM_DATE_TRIGGER, FilterCategory, SEASONAL_TRIGGER};
use crate::date::format_iso;

/// A single filter selection. Seasonal and date-range picks keep their
/// payload so a removed value can be restored into its picker unchanged.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub enum FilterValue {
    Literal(String),
    Seasonal(BTreeSet<u32>),
    DateRange { start: NaiveDate, end: NaiveDate },
}

impl FilterValue {
    pub fn literal(value: impl Into<String>) -> Self {
        Self::Literal(value.into())
    }

    /// Text shown on the filter bubble.
    pub fn label(&self) -> String {
        match self {
            Self::Literal(value) => value.clone(),
            Self::Seasonal(seasons) => seasonal_label(seasons),
            Self::DateRange { start, end } => format!(
                "{CUSTOM_DATE_TRIGGER}: {} - {}",
                format_iso(*start),
                format_iso(*end)
            ),
        }
    }

    /// Key used for canonical ordering. Synthetic picks sort at their trigger's slot.
    pub fn order_key(&self) -> &str {
        match self {
            Self::Literal(value) => value,
            Self::Seasonal(_) => SEASONAL_TRIGGER,
            Self::DateRange { .. } => CUSTOM_DATE_TRIGGER,
        }
    }

    /// What this value turns back into on the available side.
    pub fn available_form(&self) -> FilterValue {
        match self {
            Self::Literal(_) => self.clone(),
            Self::Seasonal(_) => Self::literal(SEASONAL_TRIGGER),
            Self::DateRange { .. } => Self::literal(CUSTOM_DATE_TRIGGER),
        }
    }

    pub fn is_synthetic(&self) -> bool {
        !matches!(self, Self::Literal(_))
    }

    pub fn as_literal(&self) -> Option<&str> {
        match self {
            Self::Literal(value) => Some(value),
            _ => None,
        }
    }
}

impl fmt::Display for FilterValue {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.label())
    }
}

/// `"Seasonal"` alone for an empty pick, else `"Seasonal: S1, S4"` ascending.
pub fn seasonal_label(seasons: &BTreeSet<u32>) -> String {
    if seasons.is_empty() {
        return SEASONAL_TRIGGER.to_string();
    }
    let picked: Vec<String> = seasons.iter().map(|season| format!("S{season}")).collect();
    format!("{SEASONAL_TRIGGER}: {}", picked.join(", "))
}

fn rank_in(category: FilterCategory, value: &FilterValue) -> usize {
    category
        .value_rank(value.order_key())
        .unwrap_or(usize::MAX)
}

/// Insert after every value that ranks at or before `value`, keeping
/// unrecognized values stable at the end.
fn insert_ordered(list: &mut Vec<FilterValue>, category: FilterCategory, value: FilterValue) {
    let rank = rank_in(category, &value);
    let index = list
        .iter()
        .position(|existing| rank_in(category, existing) > rank)
        .unwrap_or(list.len());
    list.insert(index, value);
}

/// Active and available filter values per category. Every value lives on
/// at most one side; changes only go through [`FilterState::activate`]
/// and [`FilterState::deactivate`].
#[derive(Debug, Clone, Default, PartialEq)]
pub struct FilterState {
    active: BTreeMap<FilterCategory, Vec<FilterValue>>,
    available: BTreeMap<FilterCategory, Vec<FilterValue>>,
}

impl FilterState {
    pub fn new() -> Self {
        Self::default()
    }

    /// Every catalog value offered, nothing active.
    pub fn from_catalog() -> Self {
        let mut state = Self::new();
        for category in FilterCategory::ALL {
            for value in category.canonical_order() {
                state.offer(category, FilterValue::literal(*value));
            }
        }
        state
    }

    pub fn active(&self, category: FilterCategory) -> &[FilterValue] {
        self.active.get(&category).map(Vec::as_slice).unwrap_or(&[])
    }

    pub fn available(&self, category: FilterCategory) -> &[FilterValue] {
        self.available.get(&category).map(Vec::as_slice).unwrap_or(&[])
    }

    pub fn active_count(&self, category: FilterCategory) -> usize {
        self.active(category).len()
    }

    pub fn is_active(&self, category: FilterCategory, value: &FilterValue) -> bool {
        self.active(category).contains(value)
    }

    pub fn is_available(&self, category: FilterCategory, value: &FilterValue) -> bool {
        self.available(category).contains(value)
    }

    pub fn has_active(&self) -> bool {
        self.active.values().any(|values| !values.is_empty())
    }

    /// Active values in display order: category precedence, then canonical value order.
    pub fn active_entries(&self) -> impl Iterator<Item = (FilterCategory, &FilterValue)> {
        self.active
            .iter()
            .flat_map(|(category, values)| values.iter().map(move |value| (*category, value)))
    }

    /// Move `value` from available to active. Synthetic values consume their
    /// trigger. No-op returning `false` when the value is not on offer.
    pub fn activate(&mut self, category: FilterCategory, value: FilterValue) -> bool {
        let offered = value.available_form();
        let Some(available) = self.available.get_mut(&category) else {
            return false;
        };
        let Some(index) = available.iter().position(|existing| *existing == offered) else {
            return false;
        };
        available.remove(index);
        if available.is_empty() {
            self.available.remove(&category);
        }
        insert_ordered(self.active.entry(category).or_default(), category, value);
        true
    }

    /// Move `value` back to available, returning what was removed so its
    /// payload can be restored. No-op when the value is not active.
    pub fn deactivate(&mut self, category: FilterCategory, value: &FilterValue) -> Option<FilterValue> {
        let active = self.active.get_mut(&category)?;
        let index = active.iter().position(|existing| existing == value)?;
        let removed = active.remove(index);
        if active.is_empty() {
            self.active.remove(&category);
        }
        self.offer(category, removed.available_form());
        Some(removed)
    }

    /// Offer `value` on the available side unless it is already present on either side.
    pub(crate) fn offer(&mut self, category: FilterCategory, value: FilterValue) {
        let offered = value.available_form();
        let in_use = self
            .active(category)
            .iter()
            .any(|existing| existing.available_form() == offered);
        if in_use || self.is_available(category, &offered) {
            return;
        }
        insert_ordered(self.available.entry(category).or_default(), category, offered);
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn lit(value: &str) -> FilterValue {
        FilterValue::literal(value)
    }

    fn disjoint(state: &FilterState) -> bool {
        FilterCategory::ALL.into_iter().all(|category| {
            state.active(category).iter().all(|value| {
                !state.is_available(category, &value.available_form())
            })
        })
    }

    #[test]
    fn catalog_offers_everything_in_canonical_order() {
        let state = FilterState::from_catalog();
        let platforms: Vec<String> = state
            .available(FilterCategory::Platform)
            .iter()
            .map(FilterValue::label)
            .collect();
        assert_eq!(platforms, vec!["Steam", "Xbox", "PlayStation", "Epic Games"]);
        assert!(!state.has_active());
    }

    #[test]
    fn multi_select_activation_and_removal_round_trip() {
        let mut state = FilterState::from_catalog();
        let before = state.clone();
        let picks = ["Last Wish", "Vault of Glass", "Leviathan"];
        for pick in picks {
            assert!(state.activate(FilterCategory::Raids, lit(pick)));
            assert!(disjoint(&state));
        }
        assert_eq!(state.active_count(FilterCategory::Raids), 3);

        for pick in ["Leviathan", "Last Wish", "Vault of Glass"] {
            assert!(state.deactivate(FilterCategory::Raids, &lit(pick)).is_some());
        }
        assert_eq!(state.active_count(FilterCategory::Raids), 0);
        assert_eq!(state, before);
    }

    #[test]
    fn emptied_categories_compare_equal_to_untouched_ones() {
        let mut state = FilterState::new();
        state.offer(FilterCategory::Type, lit("Sherpas"));
        let before = state.clone();

        assert!(state.activate(FilterCategory::Type, lit("Sherpas")));
        assert!(state.available(FilterCategory::Type).is_empty());
        assert!(state.deactivate(FilterCategory::Type, &lit("Sherpas")).is_some());

        assert!(!state.has_active());
        assert_eq!(state, before);
    }

    #[test]
    fn active_values_keep_canonical_order() {
        let mut state = FilterState::from_catalog();
        state.activate(FilterCategory::Raids, lit("Leviathan"));
        state.activate(FilterCategory::Raids, lit("Salvation's Edge"));
        state.activate(FilterCategory::Raids, lit("Last Wish"));
        let order: Vec<String> = state
            .active(FilterCategory::Raids)
            .iter()
            .map(FilterValue::label)
            .collect();
        assert_eq!(order, vec!["Salvation's Edge", "Last Wish", "Leviathan"]);
    }

    #[test]
    fn active_entries_follow_category_precedence() {
        let mut state = FilterState::from_catalog();
        state.activate(FilterCategory::Platform, lit("Xbox"));
        state.activate(FilterCategory::Type, lit("Sherpas"));
        state.activate(FilterCategory::Dungeons, lit("Duality"));
        state.activate(FilterCategory::Raids, lit("Last Wish"));
        let categories: Vec<FilterCategory> =
            state.active_entries().map(|(category, _)| category).collect();
        assert_eq!(
            categories,
            vec![
                FilterCategory::Raids,
                FilterCategory::Dungeons,
                FilterCategory::Type,
                FilterCategory::Platform,
            ]
        );
    }

    #[test]
    fn unknown_values_sort_last_and_stay_stable() {
        let mut state = FilterState::from_catalog();
        state.offer(FilterCategory::Mode, lit("Zeta"));
        state.offer(FilterCategory::Mode, lit("Alpha"));
        state.activate(FilterCategory::Mode, lit("Alpha"));
        state.activate(FilterCategory::Mode, lit("Zeta"));
        state.activate(FilterCategory::Mode, lit("Master"));
        let order: Vec<String> = state
            .active(FilterCategory::Mode)
            .iter()
            .map(FilterValue::label)
            .collect();
        assert_eq!(order, vec!["Master", "Alpha", "Zeta"]);
    }

    #[test]
    fn activation_of_missing_value_is_noop() {
        let mut state = FilterState::from_catalog();
        let before = state.clone();
        assert!(!state.activate(FilterCategory::Raids, lit("Moon Raid")));
        assert_eq!(state, before);

        assert!(state.activate(FilterCategory::Raids, lit("Last Wish")));
        let after_first = state.clone();
        assert!(!state.activate(FilterCategory::Raids, lit("Last Wish")));
        assert_eq!(state, after_first);
    }

    #[test]
    fn deactivating_inactive_value_is_noop() {
        let mut state = FilterState::from_catalog();
        let before = state.clone();
        assert_eq!(state.deactivate(FilterCategory::Raids, &lit("Last Wish")), None);
        assert_eq!(state, before);
    }

    #[test]
    fn seasonal_pick_consumes_and_restores_trigger() {
        let mut state = FilterState::from_catalog();
        let pick = FilterValue::Seasonal(BTreeSet::from([3, 7, 12]));
        assert!(state.activate(FilterCategory::TimePeriod, pick.clone()));
        assert!(!state.is_available(FilterCategory::TimePeriod, &lit(SEASONAL_TRIGGER)));
        assert!(disjoint(&state));

        let removed = state.deactivate(FilterCategory::TimePeriod, &pick);
        assert_eq!(removed, Some(pick));
        assert!(state.is_available(FilterCategory::TimePeriod, &lit(SEASONAL_TRIGGER)));
        let order: Vec<String> = state
            .available(FilterCategory::TimePeriod)
            .iter()
            .map(FilterValue::label)
            .collect();
        assert_eq!(
            order,
            vec!["All Time", "Past Week", "Past Month", "Seasonal", "Custom Date"]
        );
    }

    #[test]
    fn labels_for_synthetic_values() {
        assert_eq!(seasonal_label(&BTreeSet::new()), "Seasonal");
        assert_eq!(
            FilterValue::Seasonal(BTreeSet::from([12, 3, 7])).label(),
            "Seasonal: S3, S7, S12"
        );
        let range = FilterValue::DateRange {
            start: NaiveDate::from_ymd_opt(2024, 1, 5).unwrap(),
            end: NaiveDate::from_ymd_opt(2024, 2, 29).unwrap(),
        };
        assert_eq!(range.label(), "Custom Date: 2024-01-05 - 2024-02-29");
        assert_eq!(range.to_string(), range.label());
        assert!(range.is_synthetic());
    }

    #[test]
    fn offer_skips_values_already_in_use() {
        let mut state = FilterState::from_catalog();
        state.activate(FilterCategory::Type, lit("Kills"));
        state.offer(FilterCategory::Type, lit("Kills"));
        assert!(!state.is_available(FilterCategory::Type, &lit("Kills")));
        state.offer(FilterCategory::Type, lit("Deaths"));
        assert_eq!(
            state
                .available(FilterCategory::Type)
                .iter()
                .filter(|value| value.label() == "Deaths")
                .count(),
            1
        );
    }
}
