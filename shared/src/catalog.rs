use serde::{Deserialize, Serialize};

pub static RAIDS: [&str; 17] = [
    "All Raids",
    "The Desert Perpetual (Epic)",
    "The Desert Perpetual",
    "Salvation's Edge",
    "Crota's End",
    "Root of Nightmares",
    "King's Fall",
    "Vow of the Disciple",
    "Vault of Glass",
    "Deep Stone Crypt",
    "Garden of Salvation",
    "Last Wish",
    "Crown of Sorrow",
    "Scourge of the Past",
    "Spire of Stars",
    "Eater of Worlds",
    "Leviathan",
];

pub static DUNGEONS: [&str; 16] = [
    "All Dungeons",
    "Equilibrium",
    "Sundered Doctrine",
    "Vesper's Host",
    "Warlord's Ruin",
    "Ghosts of the Deep",
    "Spire of the Watcher",
    "Duality",
    "Grasp of Avarice",
    "Prophecy",
    "Pit of Heresy",
    "Shattered Throne",
    "Presage",
    "Harbinger",
    "Zero Hour",
    "The Whisper",
];

pub static MODES: [&str; 11] = [
    "Challenge",
    "Contest",
    "Master",
    "Normal",
    "Ultimatum",
    "Heroic",
    "1 Feat",
    "2 Feats",
    "3 Feats",
    "4 Feats",
    "5 Feats",
];

pub static TYPES: [&str; 10] = [
    "Full Clears",
    "Clears",
    "Fastest Time",
    "Average Time",
    "Sherpas",
    "World's First",
    "Total Time",
    "Kills",
    "Deaths",
    "Assists",
];

pub static FIRETEAM_SIZES: [&str; 6] = ["1", "2", "3", "4", "5", "6"];

pub static TIME_PERIODS: [&str; 5] = [
    "All Time",
    "Past Week",
    "Past Month",
    SEASONAL_TRIGGER,
    CUSTOM_DATE_TRIGGER,
];

pub static PLATFORMS: [&str; 4] = ["Steam", "Xbox", "PlayStation", "Epic Games"];

/// Time-period value that opens the season picker instead of activating.
pub const SEASONAL_TRIGGER: &str = "Seasonal";
/// Time-period value that opens the date-range picker instead of activating.
pub const CUSTOM_DATE_TRIGGER: &str = "Custom Date";

pub const DEFAULT_TYPE: &str = "Full Clears";
pub const ALL_TIME: &str = "All Time";

/// Activity names without the leading "All ..." catch-all entry.
pub fn raid_activities() -> &'static [&'static str] {
    &RAIDS[1..]
}

pub fn dungeon_activities() -> &'static [&'static str] {
    &DUNGEONS[1..]
}

/// One of the seven filter dimensions. Declaration order is the order
/// active filters are displayed in.
#[derive(
    Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize,
)]
#[serde(rename_all = "kebab-case")]
pub enum FilterCategory {
    Raids,
    Dungeons,
    Mode,
    Type,
    FireteamSize,
    TimePeriod,
    Platform,
}

/// Selection rule for a category.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct CategoryPolicy {
    pub multi_select: bool,
}

impl FilterCategory {
    pub const ALL: [FilterCategory; 7] = [
        FilterCategory::Raids,
        FilterCategory::Dungeons,
        FilterCategory::Mode,
        FilterCategory::Type,
        FilterCategory::FireteamSize,
        FilterCategory::TimePeriod,
        FilterCategory::Platform,
    ];

    /// Tag used in markup and query strings.
    pub fn tag(self) -> &'static str {
        match self {
            Self::Raids => "raids",
            Self::Dungeons => "dungeons",
            Self::Mode => "mode",
            Self::Type => "type",
            Self::FireteamSize => "fireteam-size",
            Self::TimePeriod => "time-period",
            Self::Platform => "platform",
        }
    }

    pub fn from_tag(tag: &str) -> Option<Self> {
        Self::ALL.into_iter().find(|category| category.tag() == tag)
    }

    pub fn display_name(self) -> &'static str {
        match self {
            Self::Raids => "Raids",
            Self::Dungeons => "Dungeons",
            Self::Mode => "Mode",
            Self::Type => "Type",
            Self::FireteamSize => "Fireteam Size",
            Self::TimePeriod => "Time Period",
            Self::Platform => "Platform",
        }
    }

    pub fn policy(self) -> CategoryPolicy {
        match self {
            Self::Type | Self::TimePeriod => CategoryPolicy {
                multi_select: false,
            },
            _ => CategoryPolicy { multi_select: true },
        }
    }

    pub fn is_multi_select(self) -> bool {
        self.policy().multi_select
    }

    /// Recognized values in display order. Used for ordering only, never validation.
    pub fn canonical_order(self) -> &'static [&'static str] {
        match self {
            Self::Raids => &RAIDS,
            Self::Dungeons => &DUNGEONS,
            Self::Mode => &MODES,
            Self::Type => &TYPES,
            Self::FireteamSize => &FIRETEAM_SIZES,
            Self::TimePeriod => &TIME_PERIODS,
            Self::Platform => &PLATFORMS,
        }
    }

    /// Position of `value` in the canonical order, `None` when unrecognized.
    pub fn value_rank(self, value: &str) -> Option<usize> {
        self.canonical_order().iter().position(|known| *known == value)
    }
}

impl std::fmt::Display for FilterCategory {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.tag())
    }
}
