pub mod catalog;
pub mod controller;
pub mod date;
pub mod error;
pub mod filter;
pub mod leaderboard;
pub mod pagination;
pub mod profile;
pub mod query;
pub mod selector;
pub mod title;

pub use catalog::FilterCategory;
pub use controller::{ClickOutcome, LeaderboardController, LeaderboardView};
pub use error::{DateRangeError, FixtureError};
pub use filter::{FilterState, FilterValue};
pub use selector::{DateField, Endpoint, SubSelector, TOTAL_SEASONS};
