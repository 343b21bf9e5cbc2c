use crate::catalog::{ALL_TIME, DEFAULT_TYPE, FilterCategory};
use crate::filter::{FilterState, FilterValue};

pub const CUSTOM_TITLE: &str = "Custom Leaderboard";
pub const ALL_ACTIVITIES: &str = "All Raids and Dungeons";
pub const TAB_TITLE_SUFFIX: &str = " - RADIndex";

/// Display strings derived from the active filters.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Labels {
    pub title: String,
    pub data_range: String,
    pub fireteam_size: String,
}

impl Labels {
    pub fn derive(state: &FilterState) -> Self {
        Self {
            title: derive_title(state),
            data_range: data_range_label(state),
            fireteam_size: fireteam_size_label(state),
        }
    }

    pub fn tab_title(&self) -> String {
        tab_title(&self.title)
    }
}

fn single(state: &FilterState, category: FilterCategory) -> Option<&FilterValue> {
    match state.active(category) {
        [value] => Some(value),
        _ => None,
    }
}

/// Heading for the leaderboard: `activity [mode] type`, or the custom
/// title once the selection spans more than one activity or value.
pub fn derive_title(state: &FilterState) -> String {
    if FilterCategory::ALL
        .into_iter()
        .any(|category| state.active_count(category) > 1)
    {
        return CUSTOM_TITLE.to_string();
    }

    let activities: Vec<&FilterValue> = state
        .active(FilterCategory::Raids)
        .iter()
        .chain(state.active(FilterCategory::Dungeons))
        .collect();
    let activity = match activities.as_slice() {
        [] => ALL_ACTIVITIES.to_string(),
        [one] => one.label(),
        _ => return CUSTOM_TITLE.to_string(),
    };

    let mut title = activity;
    if let Some(mode) = single(state, FilterCategory::Mode) {
        title.push(' ');
        title.push_str(&mode.label());
    }
    title.push(' ');
    match single(state, FilterCategory::Type) {
        Some(kind) => title.push_str(&kind.label()),
        None => title.push_str(DEFAULT_TYPE),
    }
    title
}

pub fn tab_title(title: &str) -> String {
    format!("{title}{TAB_TITLE_SUFFIX}")
}

pub fn data_range_label(state: &FilterState) -> String {
    state
        .active(FilterCategory::TimePeriod)
        .first()
        .map_or_else(|| ALL_TIME.to_string(), FilterValue::label)
}

/// `Fireteam Size: 1, 3` ascending by number, or `Fireteam Size: All`.
pub fn fireteam_size_label(state: &FilterState) -> String {
    let mut sizes: Vec<String> = state
        .active(FilterCategory::FireteamSize)
        .iter()
        .map(FilterValue::label)
        .collect();
    if sizes.is_empty() {
        return "Fireteam Size: All".to_string();
    }
    sizes.sort_by_key(|size| size.trim().parse::<u32>().unwrap_or(u32::MAX));
    format!("Fireteam Size: {}", sizes.join(", "))
}

#[cfg(test)]
mod tests {
    use std::collections::BTreeSet;

    use super::*;

    fn lit(value: &str) -> FilterValue {
        FilterValue::literal(value)
    }

    #[test]
    fn empty_state_gives_default_title() {
        let state = FilterState::from_catalog();
        assert_eq!(derive_title(&state), "All Raids and Dungeons Full Clears");
        assert_eq!(
            tab_title(&derive_title(&state)),
            "All Raids and Dungeons Full Clears - RADIndex"
        );
    }

    #[test]
    fn single_raid_names_the_title() {
        let mut state = FilterState::from_catalog();
        state.activate(FilterCategory::Raids, lit("Last Wish"));
        assert_eq!(derive_title(&state), "Last Wish Full Clears");
    }

    #[test]
    fn mode_and_type_suffixes() {
        let mut state = FilterState::from_catalog();
        state.activate(FilterCategory::Dungeons, lit("Duality"));
        state.activate(FilterCategory::Mode, lit("Master"));
        state.activate(FilterCategory::Type, lit("Fastest Time"));
        assert_eq!(derive_title(&state), "Duality Master Fastest Time");
    }

    #[test]
    fn two_raids_force_custom_title() {
        let mut state = FilterState::from_catalog();
        state.activate(FilterCategory::Raids, lit("Last Wish"));
        state.activate(FilterCategory::Raids, lit("Vault of Glass"));
        state.activate(FilterCategory::Type, lit("Sherpas"));
        assert_eq!(derive_title(&state), CUSTOM_TITLE);
    }

    #[test]
    fn raid_plus_dungeon_forces_custom_title() {
        let mut state = FilterState::from_catalog();
        state.activate(FilterCategory::Raids, lit("Last Wish"));
        state.activate(FilterCategory::Dungeons, lit("Duality"));
        assert_eq!(derive_title(&state), CUSTOM_TITLE);
    }

    #[test]
    fn multiple_values_in_any_category_force_custom_title() {
        let mut state = FilterState::from_catalog();
        state.activate(FilterCategory::Platform, lit("Steam"));
        state.activate(FilterCategory::Platform, lit("Xbox"));
        assert_eq!(derive_title(&state), CUSTOM_TITLE);
    }

    #[test]
    fn data_range_uses_time_period_label() {
        let mut state = FilterState::from_catalog();
        assert_eq!(data_range_label(&state), "All Time");
        state.activate(
            FilterCategory::TimePeriod,
            FilterValue::Seasonal(BTreeSet::from([1, 2])),
        );
        assert_eq!(data_range_label(&state), "Seasonal: S1, S2");
    }

    #[test]
    fn fireteam_sizes_sort_numerically() {
        let mut state = FilterState::from_catalog();
        assert_eq!(fireteam_size_label(&state), "Fireteam Size: All");
        state.offer(FilterCategory::FireteamSize, lit("12"));
        for size in ["12", "6", "2"] {
            state.activate(FilterCategory::FireteamSize, lit(size));
        }
        assert_eq!(fireteam_size_label(&state), "Fireteam Size: 2, 6, 12");
    }

    #[test]
    fn labels_bundle_every_string() {
        let mut state = FilterState::from_catalog();
        state.activate(FilterCategory::TimePeriod, lit("Past Week"));
        let labels = Labels::derive(&state);
        assert_eq!(labels.title, "All Raids and Dungeons Full Clears");
        assert_eq!(labels.data_range, "Past Week");
        assert_eq!(labels.fireteam_size, "Fireteam Size: All");
        assert_eq!(labels.tab_title(), "All Raids and Dungeons Full Clears - RADIndex");
    }
}
