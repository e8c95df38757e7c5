//! Persistence of the catalog and ledger as a single JSON document.
//!
//! # Document Format
//!
//! ```text
//! {
//!   "drinks": [
//!     {"id": 1, "name": "Water", "calories_per_100ml": 0.0, "color": "#3B82F6"}
//!   ],
//!   "daily_intake": [
//!     {"id": 1, "drink_name": "Water", "volume": 250, "calories": 0.0,
//!      "time": "08:15", "color": "#3B82F6", "date": "2025-01-01"}
//!   ]
//! }
//! ```
//!
//! Older files may omit `drinks` or an event's `date`; see [`Snapshot`] and
//! [`IntakeRecord`].

use chrono::{NaiveDate, NaiveTime};
use serde::{Deserialize, Serialize};
use std::fs;
use std::io;
use std::path::{Path, PathBuf};
use std::sync::Mutex;

use crate::error::{TrackerError, TrackerResult};
use crate::models::{DrinkDefinition, IntakeEvent};

/// File name used inside the data directory.
pub const DEFAULT_FILE_NAME: &str = "drink_tracker_data.json";

/// Everything the tracker persists.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Snapshot {
    /// `None` when the stored document has no drink list at all, in which
    /// case the first-run catalog is used.
    #[serde(default)]
    pub drinks: Option<Vec<DrinkDefinition>>,
    #[serde(default)]
    pub daily_intake: Vec<IntakeRecord>,
}

/// Stored form of an [`IntakeEvent`].
///
/// `date` is optional on read: events written without one are taken to
/// belong to the day they are loaded on.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct IntakeRecord {
    pub id: u32,
    pub drink_name: String,
    pub volume: u32,
    pub calories: f64,
    #[serde(with = "crate::models::hhmm_serde")]
    pub time: NaiveTime,
    pub color: String,
    #[serde(default)]
    pub date: Option<NaiveDate>,
}

impl IntakeRecord {
    /// Converts to an event, filling a missing date with `today`.
    pub fn into_event(self, today: NaiveDate) -> IntakeEvent {
        IntakeEvent {
            id: self.id,
            drink_name: self.drink_name,
            volume_ml: self.volume,
            calories: self.calories,
            time: self.time,
            color: self.color,
            date: self.date.unwrap_or(today),
        }
    }
}

impl From<&IntakeEvent> for IntakeRecord {
    fn from(event: &IntakeEvent) -> Self {
        Self {
            id: event.id,
            drink_name: event.drink_name.clone(),
            volume: event.volume_ml,
            calories: event.calories,
            time: event.time,
            color: event.color.clone(),
            date: Some(event.date),
        }
    }
}

/// Backing store for tracker state.
pub trait Store {
    /// Returns `Ok(None)` when nothing has been stored yet.
    fn load(&self) -> TrackerResult<Option<Snapshot>>;

    /// Replaces whatever was stored before.
    fn save(&self, snapshot: &Snapshot) -> TrackerResult<()>;
}

/// Stores the snapshot as pretty-printed JSON in one file.
#[derive(Debug, Clone)]
pub struct JsonFileStore {
    path: PathBuf,
}

impl JsonFileStore {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }

    /// Store for [`DEFAULT_FILE_NAME`] inside `data_dir`.
    pub fn in_dir(data_dir: &Path) -> Self {
        Self::new(data_dir.join(DEFAULT_FILE_NAME))
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    pub fn exists(&self) -> bool {
        self.path.exists()
    }

    fn io_error(&self, path: &Path, e: io::Error) -> TrackerError {
        TrackerError::Persistence {
            path: path.to_path_buf(),
            message: e.to_string(),
        }
    }
}

impl Store for JsonFileStore {
    fn load(&self) -> TrackerResult<Option<Snapshot>> {
        let contents = match fs::read_to_string(&self.path) {
            Ok(contents) => contents,
            Err(e) if e.kind() == io::ErrorKind::NotFound => return Ok(None),
            Err(e) => return Err(self.io_error(&self.path, e)),
        };

        let snapshot = serde_json::from_str(&contents).map_err(|e| TrackerError::Parse {
            path: self.path.clone(),
            message: e.to_string(),
        })?;

        Ok(Some(snapshot))
    }

    /// Creates the parent directory if it doesn't exist.
    fn save(&self, snapshot: &Snapshot) -> TrackerResult<()> {
        if let Some(parent) = self.path.parent().filter(|p| !p.as_os_str().is_empty()) {
            fs::create_dir_all(parent).map_err(|e| self.io_error(parent, e))?;
        }

        let json = serde_json::to_string_pretty(snapshot).map_err(|e| {
            TrackerError::Persistence {
                path: self.path.clone(),
                message: e.to_string(),
            }
        })?;

        fs::write(&self.path, json).map_err(|e| self.io_error(&self.path, e))
    }
}

/// Keeps the snapshot in memory. Used by tests and embedders that persist
/// some other way.
#[derive(Debug, Default)]
pub struct MemoryStore {
    snapshot: Mutex<Option<Snapshot>>,
}

impl MemoryStore {
    pub fn new() -> Self {
        Self::default()
    }

    /// A store that already holds `snapshot`.
    pub fn with_snapshot(snapshot: Snapshot) -> Self {
        Self {
            snapshot: Mutex::new(Some(snapshot)),
        }
    }

    /// The last saved snapshot.
    pub fn snapshot(&self) -> Option<Snapshot> {
        self.snapshot
            .lock()
            .unwrap_or_else(|poisoned| poisoned.into_inner())
            .clone()
    }
}

impl Store for MemoryStore {
    fn load(&self) -> TrackerResult<Option<Snapshot>> {
        Ok(self.snapshot())
    }

    fn save(&self, snapshot: &Snapshot) -> TrackerResult<()> {
        *self
            .snapshot
            .lock()
            .unwrap_or_else(|poisoned| poisoned.into_inner()) = Some(snapshot.clone());
        Ok(())
    }
}

impl<S: Store + ?Sized> Store for &S {
    fn load(&self) -> TrackerResult<Option<Snapshot>> {
        (**self).load()
    }

    fn save(&self, snapshot: &Snapshot) -> TrackerResult<()> {
        (**self).save(snapshot)
    }
}
