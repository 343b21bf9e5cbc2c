use std::collections::BTreeMap;
use std::path::Path;

use bytes::Bytes;
use chrono::{Duration, NaiveDate};
use radindex_shared::catalog::{dungeon_activities, raid_activities};
use radindex_shared::date::format_iso;
use radindex_shared::profile::{
    Activity, ActivityGroups, ClearRecord, ClearsByKind, ClearsDocument, ModeStats,
    PLAYER_CLEARS_PATH, PLAYER_DATA_PATH, PlayerSummary, RecentStats,
};
use radindex_shared::FixtureError;
use rand::{Rng, SeedableRng};
use rand_chacha::ChaCha8Rng;
use tracing::{info, warn};

const PLAYER_ID: &str = "123456789";
const PLAYER_NAME: &str = "PlayerName";
const CLAN_NAME: &str = "Clan Name";
const EMBLEM_URL: &str = "https://www.bungie.net/common/destiny2_content/icons/3f8a0920aad0c2fbad18938497635f23.jpg";
/// History dates fall within this many days before today.
const HISTORY_WINDOW_DAYS: i64 = 120;

/// Both profile documents, already serialized for serving.
#[derive(Debug, Clone)]
pub struct FixtureBodies {
    pub player_data: Bytes,
    pub player_clears: Bytes,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FixtureSource {
    Generated,
    Directory,
}

impl FixtureSource {
    pub fn as_str(self) -> &'static str {
        match self {
            Self::Generated => "generated",
            Self::Directory => "directory",
        }
    }
}

/// `"{minutes}:{seconds:02}"` with minutes drawn from `min..=max`.
fn rand_time(rng: &mut impl Rng, min: u32, max: u32) -> String {
    let minutes = rng.gen_range(min..=max);
    let seconds = rng.gen_range(0..=59u32);
    format!("{minutes}:{seconds:02}")
}

fn rand_date(rng: &mut impl Rng, today: NaiveDate) -> String {
    let back = rng.gen_range(0..=HISTORY_WINDOW_DAYS);
    format_iso(today - Duration::days(back))
}

fn generate_activity(rng: &mut impl Rng, name: &str) -> Activity {
    let clears = rng.gen_range(10..=200u64);
    let fastest = rand_time(rng, 20, 120);
    let average = rand_time(rng, 30, 150);

    Activity {
        activity_name: name.to_string(),
        full_clears_count: clears,
        fastest_time: fastest.clone(),
        average_time: average,
        sherpas_count: rng.gen_range(0..=50),
        kills: rng.gen_range(2000..=20000),
        deaths: rng.gen_range(100..=800),
        assists: rng.gen_range(1000..=15000),
        total_time: Some(format!(
            "{}:{:02}:00",
            rng.gen_range(10..=300u32),
            rng.gen_range(0..=59u32)
        )),
        full_clears_rank: Some(rng.gen_range(1..=500)),
        speed_rank: Some(rng.gen_range(1..=200)),
        mode_breakdown: BTreeMap::from([(
            "All Modes".to_string(),
            ModeStats {
                clears,
                fastest: Some(fastest.clone()),
            },
        )]),
        recent_stats: RecentStats {
            past_day_clears: rng.gen_range(0..=5),
            past_week_clears: rng.gen_range(0..=20),
            fastest_today: Some(rand_time(rng, 20, 120)),
            fastest_this_week: Some(fastest),
        },
        total_clears_count: Some(clears + rng.gen_range(0..=5)),
    }
}

fn generate_clears(rng: &mut impl Rng, today: NaiveDate) -> Vec<ClearRecord> {
    let count = rng.gen_range(5..=30u32);
    (1..=count)
        .map(|id| {
            // Three completed runs for every incomplete one.
            let completed = rng.gen_ratio(3, 4);
            ClearRecord {
                clear_id: id.to_string(),
                completed,
                date: rand_date(rng, today),
                time: completed.then(|| rand_time(rng, 20, 150)),
            }
        })
        .collect()
}

fn generate_player(rng: &mut impl Rng) -> PlayerSummary {
    let raids: Vec<Activity> = raid_activities()
        .iter()
        .map(|name| generate_activity(rng, name))
        .collect();
    let dungeons: Vec<Activity> = dungeon_activities()
        .iter()
        .map(|name| generate_activity(rng, name))
        .collect();

    PlayerSummary {
        player_id: Some(PLAYER_ID.to_string()),
        name: PLAYER_NAME.to_string(),
        clan: CLAN_NAME.to_string(),
        emblem_url: EMBLEM_URL.to_string(),
        raids_clears_rank: rng.gen_range(1..=500),
        raids_speed_rank: rng.gen_range(1..=200),
        raids_speed_time: Some(format!(
            "{}h {}m",
            rng.gen_range(1..=3u32),
            rng.gen_range(0..=59u32)
        )),
        raids_full_clears_count: raids.iter().map(|a| a.full_clears_count).sum(),
        dungeons_clears_rank: rng.gen_range(1..=500),
        dungeons_speed_rank: rng.gen_range(1..=200),
        dungeons_speed_time: Some(format!(
            "{}h {}m",
            rng.gen_range(0..=1u32),
            rng.gen_range(0..=59u32)
        )),
        dungeons_full_clears_count: dungeons.iter().map(|a| a.full_clears_count).sum(),
        activities: ActivityGroups { raids, dungeons },
    }
}

fn generate_history(rng: &mut impl Rng, today: NaiveDate) -> ClearsDocument {
    let mut by_kind = ClearsByKind::default();
    for name in raid_activities() {
        by_kind
            .raids
            .insert(name.to_string(), generate_clears(rng, today));
    }
    for name in dungeon_activities() {
        by_kind
            .dungeons
            .insert(name.to_string(), generate_clears(rng, today));
    }
    ClearsDocument {
        player_id: Some(PLAYER_ID.to_string()),
        activities: by_kind,
    }
}

/// Deterministic profile documents for `seed`, dated relative to `today`.
pub fn generate(seed: u64, today: NaiveDate) -> (PlayerSummary, ClearsDocument) {
    let mut rng = ChaCha8Rng::seed_from_u64(seed);
    let player = generate_player(&mut rng);
    let history = generate_history(&mut rng, today);
    (player, history)
}

pub fn generate_bodies(seed: u64, today: NaiveDate) -> Result<FixtureBodies, FixtureError> {
    let (player, history) = generate(seed, today);
    Ok(FixtureBodies {
        player_data: Bytes::from(serde_json::to_vec(&player)?),
        player_clears: Bytes::from(serde_json::to_vec(&history)?),
    })
}

async fn read_file(path: &Path) -> Result<Vec<u8>, FixtureError> {
    tokio::fs::read(path).await.map_err(|source| FixtureError::Io {
        path: path.display().to_string(),
        source,
    })
}

fn invalid_document(path: &Path, e: FixtureError) -> FixtureError {
    match e {
        FixtureError::Decode(source) => FixtureError::InvalidDocument {
            path: path.display().to_string(),
            source,
        },
        other => other,
    }
}

/// Read both documents from `dir`, checking that the bytes as served decode.
pub async fn read_dir(dir: &Path) -> Result<FixtureBodies, FixtureError> {
    let player_path = dir.join(PLAYER_DATA_PATH);
    let clears_path = dir.join(PLAYER_CLEARS_PATH);

    let player_data = read_file(&player_path).await?;
    let player_clears = read_file(&clears_path).await?;

    PlayerSummary::from_slice(&player_data).map_err(|e| invalid_document(&player_path, e))?;
    ClearsDocument::from_slice(&player_clears).map_err(|e| invalid_document(&clears_path, e))?;

    Ok(FixtureBodies {
        player_data: Bytes::from(player_data),
        player_clears: Bytes::from(player_clears),
    })
}

/// Fixtures from `dir` when present and valid, generated ones otherwise.
pub async fn load(
    dir: Option<&Path>,
    seed: u64,
    today: NaiveDate,
) -> Result<(FixtureBodies, FixtureSource), FixtureError> {
    if let Some(dir) = dir {
        match read_dir(dir).await {
            Ok(bodies) => {
                info!(dir = %dir.display(), "Loaded profile fixtures from directory");
                return Ok((bodies, FixtureSource::Directory));
            }
            Err(e) => {
                warn!(error = %e, "Falling back to generated profile fixtures");
            }
        }
    }
    let bodies = generate_bodies(seed, today)?;
    info!(seed, "Generated profile fixtures");
    Ok((bodies, FixtureSource::Generated))
}
