//! The state object a front end holds for the lifetime of the process.
//!
//! A [`Tracker`] owns the catalog and the ledger, loads them from a
//! [`Store`] on open and writes them back after every change. Time comes
//! from an injected [`Clock`] so day boundaries can be exercised in tests.
//!
//! All mutation goes through `&mut self`, which serializes id assignment.
//! Share a tracker across threads only behind a single lock.

use chrono::{Local, NaiveDate, NaiveDateTime};
use serde::Serialize;
use std::cell::Cell;

use crate::catalog::Catalog;
use crate::error::{TrackerError, TrackerResult};
use crate::ledger::{validate_goal, Ledger, Segment};
use crate::models::{DrinkDefinition, DrinkId, IntakeEvent};
use crate::storage::{IntakeRecord, Snapshot, Store};

/// Daily volume target used when none is configured.
pub const DEFAULT_DAILY_GOAL_ML: f64 = 2000.0;

/// Source of the current local date and time.
pub trait Clock {
    fn now(&self) -> NaiveDateTime;

    fn today(&self) -> NaiveDate {
        self.now().date()
    }
}

/// Wall-clock local time.
#[derive(Debug, Clone, Copy, Default)]
pub struct SystemClock;

impl Clock for SystemClock {
    fn now(&self) -> NaiveDateTime {
        Local::now().naive_local()
    }
}

/// A clock that only moves when told to.
#[derive(Debug, Clone)]
pub struct FixedClock {
    now: Cell<NaiveDateTime>,
}

impl FixedClock {
    pub fn new(now: NaiveDateTime) -> Self {
        Self {
            now: Cell::new(now),
        }
    }

    pub fn set(&self, now: NaiveDateTime) {
        self.now.set(now);
    }
}

impl Clock for FixedClock {
    fn now(&self) -> NaiveDateTime {
        self.now.get()
    }
}

impl<C: Clock + ?Sized> Clock for &C {
    fn now(&self) -> NaiveDateTime {
        (**self).now()
    }
}

/// Everything a front end needs to redraw the day's progress.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct DailySummary {
    pub date: NaiveDate,
    pub total_volume_ml: u64,
    pub total_calories: f64,
    pub goal_ml: f64,
    pub goal_percentage: f64,
    pub fill_level: f64,
    pub segments: Vec<Segment>,
    pub events: Vec<IntakeEvent>,
}

/// Drink catalog plus today's intake, persisted through `S`.
pub struct Tracker<S: Store, C: Clock = SystemClock> {
    store: S,
    clock: C,
    goal: f64,
    catalog: Catalog,
    ledger: Ledger,
}

impl<S: Store, C: Clock> Tracker<S, C> {
    /// Loads state from `store`.
    ///
    /// Missing data starts from the first-run catalog and an empty day. A
    /// store that fails to load is logged and treated the same way. Events
    /// from earlier days are dropped.
    pub fn open(store: S, clock: C, goal: f64) -> TrackerResult<Self> {
        validate_goal(goal)?;
        let today = clock.today();

        let snapshot = match store.load() {
            Ok(Some(snapshot)) => snapshot,
            Ok(None) => {
                tracing::info!("No saved data found, starting with default drinks");
                Snapshot::default()
            }
            Err(e) => {
                tracing::warn!("Failed to load saved data, starting fresh: {}", e);
                Snapshot::default()
            }
        };

        let catalog = match snapshot.drinks {
            Some(drinks) => Catalog::from_drinks(drinks),
            None => Catalog::seeded(),
        };
        let events = snapshot
            .daily_intake
            .into_iter()
            .filter_map(|record| {
                if record.volume == 0 {
                    tracing::warn!("Skipping stored intake {} with zero volume", record.id);
                    return None;
                }
                if !record.calories.is_finite() || record.calories < 0.0 {
                    tracing::warn!(
                        "Skipping stored intake {} with invalid calories {}",
                        record.id,
                        record.calories
                    );
                    return None;
                }
                Some(record.into_event(today))
            })
            .collect();
        let ledger = Ledger::on_load(events, today);

        tracing::info!(
            "Loaded {} drink(s) and {} intake event(s) for {}",
            catalog.len(),
            ledger.events().len(),
            today
        );

        Ok(Self {
            store,
            clock,
            goal,
            catalog,
            ledger,
        })
    }

    pub fn goal(&self) -> f64 {
        self.goal
    }

    /// Changes the daily goal for this session.
    pub fn set_goal(&mut self, goal: f64) -> TrackerResult<()> {
        validate_goal(goal)?;
        self.goal = goal;
        Ok(())
    }

    pub fn catalog(&self) -> &Catalog {
        &self.catalog
    }

    pub fn list_drinks(&self) -> &[DrinkDefinition] {
        self.catalog.list()
    }

    pub fn add_drink(
        &mut self,
        name: &str,
        calories_per_100ml: f64,
        color: impl Into<String>,
    ) -> TrackerResult<DrinkDefinition> {
        let drink = self.catalog.add(name, calories_per_100ml, color)?;
        self.persist();
        Ok(drink)
    }

    /// Removes a drink. Unknown ids are ignored. Events already recorded
    /// for the drink are kept.
    pub fn remove_drink(&mut self, id: DrinkId) -> Option<DrinkDefinition> {
        let removed = self.catalog.remove(id);
        if removed.is_some() {
            self.persist();
        }
        removed
    }

    /// Records `volume_ml` of the drink with `drink_id` at the current time.
    pub fn record_intake(
        &mut self,
        drink_id: DrinkId,
        volume_ml: i64,
    ) -> TrackerResult<IntakeEvent> {
        let drink = self
            .catalog
            .get(drink_id)
            .ok_or_else(|| TrackerError::invalid(format!("unknown drink id {}", drink_id)))?;

        let event = self
            .ledger
            .record_intake(drink, volume_ml, self.clock.now())?;
        self.persist();
        Ok(event)
    }

    pub fn today_events(&mut self) -> &[IntakeEvent] {
        self.refresh_day();
        self.ledger.events()
    }

    pub fn total_volume_today(&mut self) -> u64 {
        self.refresh_day();
        self.ledger.total_volume()
    }

    pub fn total_calories_today(&mut self) -> f64 {
        self.refresh_day();
        self.ledger.total_calories()
    }

    pub fn goal_percentage(&mut self) -> f64 {
        self.refresh_day();
        // The goal is validated on every path that sets it.
        self.ledger.goal_percentage(self.goal).unwrap_or_default()
    }

    pub fn fill_level(&mut self) -> f64 {
        self.refresh_day();
        self.ledger.fill_level(self.goal).unwrap_or_default()
    }

    pub fn visualization_segments(&mut self) -> Vec<Segment> {
        self.refresh_day();
        self.ledger.segments(self.goal).unwrap_or_default()
    }

    pub fn summary(&mut self) -> DailySummary {
        self.refresh_day();
        DailySummary {
            date: self.ledger.date(),
            total_volume_ml: self.ledger.total_volume(),
            total_calories: self.ledger.total_calories(),
            goal_ml: self.goal,
            goal_percentage: self.ledger.goal_percentage(self.goal).unwrap_or_default(),
            fill_level: self.ledger.fill_level(self.goal).unwrap_or_default(),
            segments: self.ledger.segments(self.goal).unwrap_or_default(),
            events: self.ledger.events().to_vec(),
        }
    }

    /// The state as it would be written to the store.
    pub fn snapshot(&self) -> Snapshot {
        Snapshot {
            drinks: Some(self.catalog.list().to_vec()),
            daily_intake: self.ledger.events().iter().map(IntakeRecord::from).collect(),
        }
    }

    /// Applies the day-boundary rule against the clock.
    fn refresh_day(&mut self) {
        if self.ledger.roll_over(self.clock.today()) {
            self.persist();
        }
    }

    /// Saves the full state. Failures are logged; the in-memory state stays
    /// authoritative for the session.
    fn persist(&self) {
        if let Err(e) = self.store.save(&self.snapshot()) {
            tracing::warn!("Failed to save data: {}", e);
        }
    }
}
