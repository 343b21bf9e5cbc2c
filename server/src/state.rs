use std::path::PathBuf;
use std::sync::Arc;

use chrono::{DateTime, Utc};

use crate::fixtures::{FixtureBodies, FixtureSource};

#[derive(Clone)]
pub struct AppState {
    /// Profile documents serialized once at startup and shared by every request.
    pub fixtures: Arc<FixtureBodies>,
    pub fixture_source: FixtureSource,
    /// Built client bundle served for every non-API path.
    pub static_dir: PathBuf,
    pub started_at: DateTime<Utc>,
}

impl AppState {
    pub fn new(fixtures: FixtureBodies, fixture_source: FixtureSource, static_dir: PathBuf) -> Self {
        Self {
            fixtures: Arc::new(fixtures),
            fixture_source,
            static_dir,
            started_at: Utc::now(),
        }
    }
}
