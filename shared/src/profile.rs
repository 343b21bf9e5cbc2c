use std::collections::{BTreeMap, HashSet};
use std::str::FromStr;

use serde::{Deserialize, Serialize};

use crate::error::FixtureError;

/// Fixture path for the player summary document.
pub const PLAYER_DATA_PATH: &str = "player-data.json";
/// Fixture path for the per-activity clear history document.
pub const PLAYER_CLEARS_PATH: &str = "player-clears-data.json";

pub const NO_CLEARS: &str = "No clears";
pub const CLEARS_ERROR: &str = "Error loading clears";

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ActivityKind {
    #[default]
    Raid,
    Dungeon,
}

impl ActivityKind {
    pub fn key(self) -> &'static str {
        match self {
            Self::Raid => "raid",
            Self::Dungeon => "dungeon",
        }
    }

    /// Key used inside the fixture documents.
    pub fn plural(self) -> &'static str {
        match self {
            Self::Raid => "raids",
            Self::Dungeon => "dungeons",
        }
    }

    pub fn card_class(self) -> &'static str {
        match self {
            Self::Raid => "card raid-card",
            Self::Dungeon => "card dungeon-card",
        }
    }
}

impl FromStr for ActivityKind {
    type Err = FixtureError;

    fn from_str(raw: &str) -> Result<Self, Self::Err> {
        match raw {
            "raid" | "raids" => Ok(Self::Raid),
            "dungeon" | "dungeons" => Ok(Self::Dungeon),
            other => Err(FixtureError::UnknownKind(other.to_string())),
        }
    }
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PlayerSummary {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub player_id: Option<String>,
    pub name: String,
    #[serde(default)]
    pub clan: String,
    #[serde(default)]
    pub emblem_url: String,
    #[serde(default)]
    pub raids_clears_rank: u32,
    #[serde(default)]
    pub raids_speed_rank: u32,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub raids_speed_time: Option<String>,
    #[serde(default)]
    pub raids_full_clears_count: u64,
    #[serde(default)]
    pub dungeons_clears_rank: u32,
    #[serde(default)]
    pub dungeons_speed_rank: u32,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub dungeons_speed_time: Option<String>,
    #[serde(default)]
    pub dungeons_full_clears_count: u64,
    #[serde(default)]
    pub activities: ActivityGroups,
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct ActivityGroups {
    #[serde(default)]
    pub raids: Vec<Activity>,
    #[serde(default)]
    pub dungeons: Vec<Activity>,
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Activity {
    pub activity_name: String,
    #[serde(default)]
    pub full_clears_count: u64,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub total_clears_count: Option<u64>,
    #[serde(default)]
    pub fastest_time: String,
    #[serde(default)]
    pub average_time: String,
    #[serde(default)]
    pub sherpas_count: u64,
    #[serde(default)]
    pub kills: u64,
    #[serde(default)]
    pub deaths: u64,
    #[serde(default)]
    pub assists: u64,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub total_time: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub full_clears_rank: Option<u32>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub speed_rank: Option<u32>,
    #[serde(default)]
    pub mode_breakdown: BTreeMap<String, ModeStats>,
    #[serde(default)]
    pub recent_stats: RecentStats,
}

impl Activity {
    /// Clears counted by the history dots, falling back to full clears.
    pub fn total_clears(&self) -> u64 {
        self.total_clears_count.unwrap_or(self.full_clears_count)
    }

    pub fn total_time_label(&self) -> &str {
        self.total_time.as_deref().unwrap_or("0:00:00")
    }
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct ModeStats {
    pub clears: u64,
    #[serde(default)]
    pub fastest: Option<String>,
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RecentStats {
    #[serde(default)]
    pub past_day_clears: u64,
    #[serde(default)]
    pub past_week_clears: u64,
    #[serde(default)]
    pub fastest_today: Option<String>,
    #[serde(default)]
    pub fastest_this_week: Option<String>,
}

/// Rank bubbles shown in the profile header for one activity kind.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RankSummary {
    pub clears_rank: u32,
    pub speed_rank: u32,
    pub speed_time: String,
    pub full_clears: u64,
}

impl RankSummary {
    pub fn clears_label(&self) -> String {
        format!("Clears Rank #{}", self.clears_rank)
    }

    pub fn speed_label(&self) -> String {
        format!("Speed Rank #{}", self.speed_rank)
    }

    pub fn full_clears_label(&self) -> String {
        group_thousands(self.full_clears)
    }
}

impl PlayerSummary {
    pub fn from_json(raw: &str) -> Result<Self, FixtureError> {
        Ok(serde_json::from_str(raw)?)
    }

    /// Decode raw document bytes; invalid UTF-8 is rejected, never replaced.
    pub fn from_slice(raw: &[u8]) -> Result<Self, FixtureError> {
        Ok(serde_json::from_slice(raw)?)
    }

    pub fn activities(&self, kind: ActivityKind) -> &[Activity] {
        match kind {
            ActivityKind::Raid => &self.activities.raids,
            ActivityKind::Dungeon => &self.activities.dungeons,
        }
    }

    pub fn rank_summary(&self, kind: ActivityKind) -> RankSummary {
        let (clears_rank, speed_rank, speed_time, full_clears) = match kind {
            ActivityKind::Raid => (
                self.raids_clears_rank,
                self.raids_speed_rank,
                &self.raids_speed_time,
                self.raids_full_clears_count,
            ),
            ActivityKind::Dungeon => (
                self.dungeons_clears_rank,
                self.dungeons_speed_rank,
                &self.dungeons_speed_time,
                self.dungeons_full_clears_count,
            ),
        };
        RankSummary {
            clears_rank,
            speed_rank,
            speed_time: speed_time.clone().unwrap_or_else(|| "N/A".to_string()),
            full_clears,
        }
    }
}

/// Colour band for a leaderboard rank.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RankTier {
    Top10,
    Top50,
    Top100,
    Top200,
    Top500,
    Top1k,
    Top5k,
    Default,
}

impl RankTier {
    pub fn from_rank(rank: u32) -> Self {
        match rank {
            ..=10 => Self::Top10,
            ..=50 => Self::Top50,
            ..=100 => Self::Top100,
            ..=200 => Self::Top200,
            ..=500 => Self::Top500,
            ..=1000 => Self::Top1k,
            ..=5000 => Self::Top5k,
            _ => Self::Default,
        }
    }

    pub fn css_class(self) -> &'static str {
        match self {
            Self::Top10 => "rank-t10",
            Self::Top50 => "rank-t50",
            Self::Top100 => "rank-t100",
            Self::Top200 => "rank-t200",
            Self::Top500 => "rank-t500",
            Self::Top1k => "rank-t1k",
            Self::Top5k => "rank-t5k",
            Self::Default => "rank-default",
        }
    }
}

/// `1234567` -> `1,234,567`.
pub fn group_thousands(value: u64) -> String {
    let digits = value.to_string();
    let mut grouped = String::with_capacity(digits.len() + digits.len() / 3);
    for (i, digit) in digits.chars().enumerate() {
        if i > 0 && (digits.len() - i) % 3 == 0 {
            grouped.push(',');
        }
        grouped.push(digit);
    }
    grouped
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ClearsDocument {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub player_id: Option<String>,
    #[serde(default)]
    pub activities: ClearsByKind,
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct ClearsByKind {
    #[serde(default)]
    pub raids: BTreeMap<String, Vec<ClearRecord>>,
    #[serde(default)]
    pub dungeons: BTreeMap<String, Vec<ClearRecord>>,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ClearRecord {
    pub clear_id: String,
    pub completed: bool,
    pub date: String,
    #[serde(default)]
    pub time: Option<String>,
}

impl ClearRecord {
    pub fn css_class(&self) -> &'static str {
        if self.completed {
            "dot completed"
        } else {
            "dot incomplete"
        }
    }

    pub fn tooltip(&self) -> String {
        match (self.completed, &self.time) {
            (true, Some(time)) => format!("Completed: {} - {time}", self.date),
            (true, None) => format!("Completed: {}", self.date),
            (false, _) => format!("Incomplete: {}", self.date),
        }
    }
}

impl ClearsDocument {
    pub fn from_json(raw: &str) -> Result<Self, FixtureError> {
        Ok(serde_json::from_str(raw)?)
    }

    pub fn from_slice(raw: &[u8]) -> Result<Self, FixtureError> {
        Ok(serde_json::from_slice(raw)?)
    }

    /// History for one activity; unknown activities have none.
    pub fn clears_for(&self, kind: ActivityKind, activity: &str) -> &[ClearRecord] {
        let by_name = match kind {
            ActivityKind::Raid => &self.activities.raids,
            ActivityKind::Dungeon => &self.activities.dungeons,
        };
        by_name.get(activity).map(Vec::as_slice).unwrap_or(&[])
    }
}

pub fn history_key(kind: ActivityKind, activity: &str) -> String {
    format!("{}-{activity}", kind.key())
}

/// Remembers which history regions already started loading.
#[derive(Debug, Clone, Default)]
pub struct HistoryLoadTracker {
    loaded: HashSet<String>,
}

impl HistoryLoadTracker {
    /// `true` the first time `key` is claimed, `false` afterwards.
    pub fn claim(&mut self, key: &str) -> bool {
        if self.loaded.contains(key) {
            return false;
        }
        self.loaded.insert(key.to_string())
    }

    pub fn is_loaded(&self, key: &str) -> bool {
        self.loaded.contains(key)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const SUMMARY: &str = r#"{
        "playerId": "123456789",
        "name": "PlayerName",
        "clan": "Clan Name",
        "emblemUrl": "https://example.invalid/emblem.jpg",
        "raidsClearsRank": 42,
        "raidsSpeedRank": 7,
        "raidsSpeedTime": "1h 12m",
        "raidsFullClearsCount": 1234,
        "dungeonsClearsRank": 800,
        "dungeonsSpeedRank": 9000,
        "dungeonsFullClearsCount": 56,
        "activities": {
            "raids": [{
                "activityName": "Last Wish",
                "fullClearsCount": 40,
                "fastestTime": "31:05",
                "averageTime": "55:10",
                "sherpasCount": 3,
                "kills": 2500,
                "deaths": 120,
                "assists": 1400,
                "totalTime": "40:12:00",
                "fullClearsRank": 12,
                "speedRank": 80,
                "modeBreakdown": {"All Modes": {"clears": 40, "fastest": "31:05"}},
                "recentStats": {"pastDayClears": 1, "pastWeekClears": 4, "fastestToday": null, "fastestThisWeek": "31:05"},
                "totalClearsCount": 43
            }],
            "dungeons": []
        }
    }"#;

    const CLEARS: &str = r#"{
        "playerId": "123456789",
        "activities": {
            "raids": {"Last Wish": [
                {"clearId": "1", "completed": true, "date": "2025-01-02", "time": "40:12"},
                {"clearId": "2", "completed": false, "date": "2025-01-03", "time": null}
            ]},
            "dungeons": {"Duality": []}
        }
    }"#;

    #[test]
    fn byte_decoding_rejects_invalid_utf8_in_strings() {
        assert_eq!(PlayerSummary::from_slice(SUMMARY.as_bytes()).unwrap().name, "PlayerName");
        assert!(ClearsDocument::from_slice(CLEARS.as_bytes()).is_ok());

        let mut bytes = SUMMARY.as_bytes().to_vec();
        let at = bytes.windows(10).position(|w| w == b"PlayerName").unwrap();
        bytes[at + 6] = 0xff;
        assert!(matches!(PlayerSummary::from_slice(&bytes), Err(FixtureError::Decode(_))));
        // Lossy text decoding would have hidden the bad byte.
        assert!(PlayerSummary::from_json(&String::from_utf8_lossy(&bytes)).is_ok());
    }

    #[test]
    fn summary_decodes_fixture_shape() {
        let summary = PlayerSummary::from_json(SUMMARY).unwrap();
        assert_eq!(summary.name, "PlayerName");
        let raids = summary.activities(ActivityKind::Raid);
        assert_eq!(raids.len(), 1);
        assert_eq!(raids[0].total_clears(), 43);
        assert_eq!(raids[0].mode_breakdown["All Modes"].clears, 40);
        assert_eq!(raids[0].recent_stats.fastest_today, None);
        assert!(summary.activities(ActivityKind::Dungeon).is_empty());
    }

    #[test]
    fn rank_summary_per_kind() {
        let summary = PlayerSummary::from_json(SUMMARY).unwrap();
        let raids = summary.rank_summary(ActivityKind::Raid);
        assert_eq!(raids.clears_label(), "Clears Rank #42");
        assert_eq!(raids.speed_label(), "Speed Rank #7");
        assert_eq!(raids.full_clears_label(), "1,234");
        assert_eq!(raids.speed_time, "1h 12m");

        let dungeons = summary.rank_summary(ActivityKind::Dungeon);
        assert_eq!(dungeons.speed_time, "N/A");
        assert_eq!(RankTier::from_rank(dungeons.clears_rank).css_class(), "rank-t1k");
        assert_eq!(RankTier::from_rank(dungeons.speed_rank), RankTier::Default);
    }

    #[test]
    fn rank_tier_boundaries() {
        assert_eq!(RankTier::from_rank(10), RankTier::Top10);
        assert_eq!(RankTier::from_rank(11), RankTier::Top50);
        assert_eq!(RankTier::from_rank(100), RankTier::Top100);
        assert_eq!(RankTier::from_rank(201), RankTier::Top500);
        assert_eq!(RankTier::from_rank(5000), RankTier::Top5k);
        assert_eq!(RankTier::from_rank(5001).css_class(), "rank-default");
    }

    #[test]
    fn thousands_grouping() {
        assert_eq!(group_thousands(0), "0");
        assert_eq!(group_thousands(999), "999");
        assert_eq!(group_thousands(1000), "1,000");
        assert_eq!(group_thousands(1234567), "1,234,567");
    }

    #[test]
    fn clear_history_lookup_and_tooltips() {
        let clears = ClearsDocument::from_json(CLEARS).unwrap();
        let records = clears.clears_for(ActivityKind::Raid, "Last Wish");
        assert_eq!(records.len(), 2);
        assert_eq!(records[0].tooltip(), "Completed: 2025-01-02 - 40:12");
        assert_eq!(records[0].css_class(), "dot completed");
        assert_eq!(records[1].tooltip(), "Incomplete: 2025-01-03");
        assert!(clears.clears_for(ActivityKind::Dungeon, "Duality").is_empty());
        assert!(clears.clears_for(ActivityKind::Dungeon, "Prophecy").is_empty());
    }

    #[test]
    fn malformed_fixture_is_an_error() {
        assert!(matches!(
            ClearsDocument::from_json("{\"activities\": 5}"),
            Err(FixtureError::Decode(_))
        ));
        assert!(PlayerSummary::from_json("not json").is_err());
        assert!(matches!(
            ClearsDocument::from_slice(b"{\"activities\": 5}"),
            Err(FixtureError::Decode(_))
        ));
    }

    #[test]
    fn tracker_claims_each_key_once() {
        let mut tracker = HistoryLoadTracker::default();
        let key = history_key(ActivityKind::Raid, "Last Wish");
        assert_eq!(key, "raid-Last Wish");
        assert!(tracker.claim(&key));
        assert!(!tracker.claim(&key));
        assert!(tracker.is_loaded(&key));
        assert!(tracker.claim(&history_key(ActivityKind::Dungeon, "Last Wish")));
    }

    #[test]
    fn activity_kind_parses_both_forms() {
        assert_eq!("raid".parse::<ActivityKind>().unwrap(), ActivityKind::Raid);
        assert_eq!("dungeons".parse::<ActivityKind>().unwrap(), ActivityKind::Dungeon);
        assert!("strike".parse::<ActivityKind>().is_err());
    }
}
