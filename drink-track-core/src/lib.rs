//! Drink Track Core Library
//!
//! Drink catalog, the daily intake ledger with its day-boundary reset, and
//! the aggregates a front end draws from: totals, goal progress and the
//! glass fill segments.

pub mod catalog;
pub mod error;
pub mod ledger;
pub mod models;
pub mod storage;
pub mod tracker;

pub use catalog::Catalog;
pub use error::{TrackerError, TrackerResult};
pub use ledger::{Ledger, Segment, MAX_FILL_LEVEL};
pub use models::{
    parse_hex_color, DrinkDefinition, DrinkId, IntakeEvent, Rgba, DEFAULT_COLOR, PRESET_COLORS,
};
pub use storage::{IntakeRecord, JsonFileStore, MemoryStore, Snapshot, Store, DEFAULT_FILE_NAME};
pub use tracker::{Clock, DailySummary, FixedClock, SystemClock, Tracker, DEFAULT_DAILY_GOAL_ML};

pub fn version() -> &'static str {
    env!("CARGO_PKG_VERSION")
}
