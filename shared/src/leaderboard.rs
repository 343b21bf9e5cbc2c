use serde::{Deserialize, Serialize};

use crate::catalog::TYPES;

/// Rows generated per leaderboard.
pub const LEADERBOARD_SIZE: usize = 100;

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct LeaderboardEntry {
    pub rank: u32,
    pub name: String,
    pub stat_value: String,
}

/// Whether the board ranks players or clans.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum EntityKind {
    #[default]
    Player,
    Clan,
}

impl EntityKind {
    pub fn toggled(self) -> Self {
        match self {
            Self::Player => Self::Clan,
            Self::Clan => Self::Player,
        }
    }

    pub fn header(self) -> &'static str {
        match self {
            Self::Player => "Player",
            Self::Clan => "Clan",
        }
    }

    pub fn search_placeholder(self) -> &'static str {
        match self {
            Self::Player => "Search for a player...",
            Self::Clan => "Search for a clan...",
        }
    }

    fn entity_name(self, rank: u32) -> String {
        format!("{}{rank}", self.header())
    }
}

/// Statistic the board ranks by, selected through the `type` filter.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum StatKind {
    #[default]
    FullClears,
    Clears,
    FastestTime,
    AverageTime,
    Sherpas,
    WorldsFirst,
    TotalTime,
    Kills,
    Deaths,
    Assists,
}

impl StatKind {
    const ALL: [StatKind; 10] = [
        StatKind::FullClears,
        StatKind::Clears,
        StatKind::FastestTime,
        StatKind::AverageTime,
        StatKind::Sherpas,
        StatKind::WorldsFirst,
        StatKind::TotalTime,
        StatKind::Kills,
        StatKind::Deaths,
        StatKind::Assists,
    ];

    pub fn name(self) -> &'static str {
        let index = Self::ALL
            .iter()
            .position(|kind| *kind == self)
            .unwrap_or_default();
        TYPES[index]
    }

    pub fn from_type(value: &str) -> Option<Self> {
        Self::ALL.into_iter().find(|kind| kind.name() == value)
    }

    /// Stat for the active type value; unknown or missing types rank full clears.
    pub fn resolve(value: Option<&str>) -> Self {
        value.and_then(Self::from_type).unwrap_or_default()
    }

    /// Column header for the stat.
    pub fn header(self) -> &'static str {
        match self {
            Self::FullClears | Self::Clears => "Clears",
            Self::FastestTime | Self::AverageTime | Self::TotalTime => "Time",
            Self::Sherpas => "Sherpas",
            Self::WorldsFirst => "WF",
            Self::Kills => "Kills",
            Self::Deaths => "Deaths",
            Self::Assists => "Assists",
        }
    }

    /// Fabricated stat for `rank` (1-based).
    pub fn value_for_rank(self, rank: u32) -> String {
        let step = i64::from(rank) - 1;
        match self {
            Self::FullClears | Self::Clears => (150 - step * 2).to_string(),
            Self::FastestTime | Self::AverageTime => {
                let hours = step / 10;
                let minutes = 20 + step % 10;
                let seconds = 30 + (i64::from(rank) * 3) % 30;
                format!("{hours}:{minutes:02}:{seconds:02}")
            }
            Self::Sherpas => (200 - step * 3).to_string(),
            Self::WorldsFirst => (if rank <= 3 { "Yes" } else { "No" }).to_string(),
            Self::TotalTime => format!("{}:00:00", 100 + step * 5),
            Self::Kills => (5000 - step * 50).to_string(),
            Self::Deaths => (100 - step).to_string(),
            Self::Assists => (3000 - step * 30).to_string(),
        }
    }
}

/// Deterministic stand-in dataset: one row per rank from 1 to `count`.
pub fn generate(stat: StatKind, entity: EntityKind, count: usize) -> Vec<LeaderboardEntry> {
    (1..=count)
        .filter_map(|rank| u32::try_from(rank).ok())
        .map(|rank| LeaderboardEntry {
            rank,
            name: entity.entity_name(rank),
            stat_value: stat.value_for_rank(rank),
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn ranks_run_from_one_to_count() {
        let rows = generate(StatKind::FullClears, EntityKind::Player, LEADERBOARD_SIZE);
        assert_eq!(rows.len(), 100);
        assert!(rows.iter().enumerate().all(|(i, row)| row.rank as usize == i + 1));
        assert_eq!(rows[0].name, "Player1");
        assert_eq!(rows[0].stat_value, "150");
        assert_eq!(rows[1].stat_value, "148");
    }

    #[test]
    fn clan_mode_renames_entities() {
        let rows = generate(StatKind::Kills, EntityKind::Clan, 3);
        let names: Vec<&str> = rows.iter().map(|row| row.name.as_str()).collect();
        assert_eq!(names, vec!["Clan1", "Clan2", "Clan3"]);
        assert_eq!(rows[2].stat_value, "4900");
    }

    #[test]
    fn durations_use_hours_minutes_seconds() {
        assert_eq!(StatKind::FastestTime.value_for_rank(1), "0:20:33");
        assert_eq!(StatKind::AverageTime.value_for_rank(11), "1:20:33");
        assert_eq!(StatKind::FastestTime.value_for_rank(10), "0:29:30");
        assert_eq!(StatKind::TotalTime.value_for_rank(3), "110:00:00");
    }

    #[test]
    fn worlds_first_is_boolean_style() {
        let rows = generate(StatKind::WorldsFirst, EntityKind::Player, 5);
        let values: Vec<&str> = rows.iter().map(|row| row.stat_value.as_str()).collect();
        assert_eq!(values, vec!["Yes", "Yes", "Yes", "No", "No"]);
    }

    #[test]
    fn type_names_resolve_with_fallback() {
        assert_eq!(StatKind::resolve(Some("Sherpas")), StatKind::Sherpas);
        assert_eq!(StatKind::resolve(Some("World's First")), StatKind::WorldsFirst);
        assert_eq!(StatKind::resolve(Some("Raid Points")), StatKind::FullClears);
        assert_eq!(StatKind::resolve(None), StatKind::FullClears);
        assert_eq!(StatKind::Deaths.name(), "Deaths");
    }

    #[test]
    fn headers_follow_stat() {
        assert_eq!(StatKind::FullClears.header(), "Clears");
        assert_eq!(StatKind::TotalTime.header(), "Time");
        assert_eq!(StatKind::WorldsFirst.header(), "WF");
        assert_eq!(EntityKind::Clan.header(), "Clan");
        assert_eq!(EntityKind::Player.search_placeholder(), "Search for a player...");
        assert_eq!(EntityKind::Player.toggled(), EntityKind::Clan);
    }
}
