//! Today's intake events and the aggregates derived from them.
//!
//! The ledger only ever holds events for a single local calendar date. When
//! it observes a later date every retained event is dropped; there is no
//! history beyond the current day.

use chrono::{NaiveDate, NaiveDateTime};
use serde::Serialize;

use crate::error::{TrackerError, TrackerResult};
use crate::models::{DrinkDefinition, IntakeEvent};

/// Share of the glass that can be filled, however far past the goal the
/// day's total is.
pub const MAX_FILL_LEVEL: f64 = 0.9;

/// One event's slice of the glass visualization.
///
/// `fraction_of_fill` is the event's share of the filled band. `offset` and
/// `height` place the slice in display-height units (0 = bottom of the
/// glass, 1 = top).
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Segment {
    pub color: String,
    pub fraction_of_fill: f64,
    pub offset: f64,
    pub height: f64,
}

/// The working set of intake events for one calendar date.
#[derive(Debug, Clone, PartialEq)]
pub struct Ledger {
    date: NaiveDate,
    events: Vec<IntakeEvent>,
}

impl Ledger {
    /// An empty ledger for `date`.
    pub fn new(date: NaiveDate) -> Self {
        Self {
            date,
            events: Vec::new(),
        }
    }

    /// Builds the ledger from persisted events, keeping only those recorded
    /// on `today`.
    pub fn on_load(events: Vec<IntakeEvent>, today: NaiveDate) -> Self {
        let loaded = events.len();
        let events: Vec<IntakeEvent> = events.into_iter().filter(|e| e.date == today).collect();

        if events.len() < loaded {
            tracing::info!(
                "Discarded {} intake event(s) from before {}",
                loaded - events.len(),
                today
            );
        }

        Self {
            date: today,
            events,
        }
    }

    /// The date every retained event belongs to.
    pub fn date(&self) -> NaiveDate {
        self.date
    }

    /// Retained events in recording order.
    pub fn events(&self) -> &[IntakeEvent] {
        &self.events
    }

    pub fn is_empty(&self) -> bool {
        self.events.is_empty()
    }

    /// Moves the ledger forward to `today`, dropping all events, when
    /// `today` is later than the retained date. Returns whether anything
    /// changed.
    pub fn roll_over(&mut self, today: NaiveDate) -> bool {
        if today <= self.date {
            return false;
        }
        self.reset(today);
        true
    }

    /// Records `volume_ml` of `drink` at `now`.
    ///
    /// If `now` falls on a different date than the retained events, they are
    /// discarded first so the ledger never mixes dates.
    pub fn record_intake(
        &mut self,
        drink: &DrinkDefinition,
        volume_ml: i64,
        now: NaiveDateTime,
    ) -> TrackerResult<IntakeEvent> {
        let volume_ml = match u32::try_from(volume_ml) {
            Ok(v) if v > 0 => v,
            _ => {
                return Err(TrackerError::invalid(format!(
                    "volume must be a positive number of ml (got {})",
                    volume_ml
                )))
            }
        };

        let today = now.date();
        if today != self.date {
            self.reset(today);
        }

        let event = IntakeEvent {
            id: self.events.len() as u32 + 1,
            drink_name: drink.name.clone(),
            volume_ml,
            calories: drink.calories_for(volume_ml),
            time: IntakeEvent::truncate_to_minute(now.time()),
            color: drink.color.clone(),
            date: today,
        };
        self.events.push(event.clone());
        tracing::debug!(
            "Recorded {}ml of '{}' ({} cal)",
            event.volume_ml,
            event.drink_name,
            event.calories
        );

        Ok(event)
    }

    pub fn total_volume(&self) -> u64 {
        self.events.iter().map(|e| u64::from(e.volume_ml)).sum()
    }

    pub fn total_calories(&self) -> f64 {
        self.events.iter().map(|e| e.calories).sum()
    }

    /// Percent of `goal` reached, capped at 100.
    pub fn goal_percentage(&self, goal: f64) -> TrackerResult<f64> {
        validate_goal(goal)?;
        Ok((self.total_volume() as f64 / goal * 100.0).min(100.0))
    }

    /// Height of the filled band as a share of the glass.
    pub fn fill_level(&self, goal: f64) -> TrackerResult<f64> {
        validate_goal(goal)?;
        Ok((self.total_volume() as f64 / goal).min(MAX_FILL_LEVEL))
    }

    /// Splits the filled band into one slice per event, bottom to top in
    /// recording order, each sized by its share of the day's volume.
    pub fn segments(&self, goal: f64) -> TrackerResult<Vec<Segment>> {
        let fill = self.fill_level(goal)?;
        let total = self.total_volume();
        if total == 0 {
            return Ok(Vec::new());
        }

        let mut offset = 0.0;
        let segments = self
            .events
            .iter()
            .map(|event| {
                let fraction_of_fill = f64::from(event.volume_ml) / total as f64;
                let height = fraction_of_fill * fill;
                let segment = Segment {
                    color: event.color.clone(),
                    fraction_of_fill,
                    offset,
                    height,
                };
                offset += height;
                segment
            })
            .collect();

        Ok(segments)
    }

    fn reset(&mut self, today: NaiveDate) {
        if !self.events.is_empty() {
            tracing::info!(
                "New day {}: dropping {} intake event(s) from {}",
                today,
                self.events.len(),
                self.date
            );
        }
        self.events.clear();
        self.date = today;
    }
}

/// A goal must be a positive, finite number of ml.
pub(crate) fn validate_goal(goal: f64) -> TrackerResult<()> {
    if goal.is_finite() && goal > 0.0 {
        Ok(())
    } else {
        Err(TrackerError::invalid(format!(
            "daily goal must be a positive number of ml (got {})",
            goal
        )))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::catalog::Catalog;
    use chrono::NaiveTime;

    fn day(d: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(2025, 6, d).unwrap()
    }

    fn at(d: u32, h: u32, m: u32) -> NaiveDateTime {
        day(d).and_hms_opt(h, m, 30).unwrap()
    }

    fn drink(name: &str) -> DrinkDefinition {
        Catalog::seeded()
            .list()
            .iter()
            .find(|d| d.name == name)
            .cloned()
            .unwrap()
    }

    fn approx(a: f64, b: f64) -> bool {
        (a - b).abs() < 1e-9
    }

    #[test]
    fn test_empty_ledger_aggregates() {
        let ledger = Ledger::new(day(1));
        assert_eq!(ledger.total_volume(), 0);
        assert_eq!(ledger.total_calories(), 0.0);
        assert_eq!(ledger.goal_percentage(2000.0).unwrap(), 0.0);
        assert!(ledger.segments(2000.0).unwrap().is_empty());
    }

    #[test]
    fn test_record_intake() {
        let mut ledger = Ledger::new(day(1));
        let event = ledger
            .record_intake(&drink("Coca Cola"), 250, at(1, 14, 5))
            .unwrap();

        assert_eq!(event.id, 1);
        assert_eq!(event.drink_name, "Coca Cola");
        assert_eq!(event.volume_ml, 250);
        assert_eq!(event.calories, 105.0);
        assert_eq!(event.color, "#7C2D12");
        assert_eq!(event.date, day(1));
        assert_eq!(event.time, NaiveTime::from_hms_opt(14, 5, 0).unwrap());
        assert_eq!(ledger.events(), &[event]);
    }

    #[test]
    fn test_water_has_no_calories() {
        let mut ledger = Ledger::new(day(1));
        let event = ledger.record_intake(&drink("Water"), 500, at(1, 8, 0)).unwrap();
        assert_eq!(event.calories, 0.0);
    }

    #[test]
    fn test_ids_follow_position() {
        let mut ledger = Ledger::new(day(1));
        for expected in 1..=3 {
            let event = ledger.record_intake(&drink("Water"), 100, at(1, 9, 0)).unwrap();
            assert_eq!(event.id, expected);
        }
    }

    #[test]
    fn test_rejects_non_positive_volume() {
        let mut ledger = Ledger::new(day(1));
        assert!(ledger.record_intake(&drink("Water"), 0, at(1, 9, 0)).is_err());
        assert!(ledger.record_intake(&drink("Water"), -250, at(1, 9, 0)).is_err());
        assert!(ledger
            .record_intake(&drink("Water"), i64::from(u32::MAX) + 1, at(1, 9, 0))
            .is_err());
        assert!(ledger.is_empty());
    }

    #[test]
    fn test_recording_next_day_resets() {
        let mut ledger = Ledger::new(day(1));
        ledger.record_intake(&drink("Water"), 250, at(1, 9, 0)).unwrap();
        ledger.record_intake(&drink("Coffee"), 200, at(1, 10, 0)).unwrap();

        let event = ledger.record_intake(&drink("Orange Juice"), 300, at(2, 7, 30)).unwrap();

        assert_eq!(ledger.date(), day(2));
        assert_eq!(ledger.events().len(), 1);
        assert_eq!(ledger.events()[0], event);
        assert_eq!(event.id, 1);
        assert_eq!(ledger.total_volume(), 300);
    }

    #[test]
    fn test_roll_over() {
        let mut ledger = Ledger::new(day(1));
        ledger.record_intake(&drink("Water"), 250, at(1, 9, 0)).unwrap();

        assert!(!ledger.roll_over(day(1)));
        assert_eq!(ledger.events().len(), 1);

        assert!(ledger.roll_over(day(3)));
        assert!(ledger.is_empty());
        assert_eq!(ledger.date(), day(3));
    }

    #[test]
    fn test_roll_over_ignores_earlier_date() {
        let mut ledger = Ledger::new(day(5));
        ledger.record_intake(&drink("Water"), 250, at(5, 9, 0)).unwrap();
        assert!(!ledger.roll_over(day(4)));
        assert_eq!(ledger.events().len(), 1);
        assert_eq!(ledger.date(), day(5));
    }

    #[test]
    fn test_totals() {
        let mut ledger = Ledger::new(day(1));
        ledger.record_intake(&drink("Coca Cola"), 250, at(1, 9, 0)).unwrap();
        ledger.record_intake(&drink("Orange Juice"), 200, at(1, 10, 0)).unwrap();
        ledger.record_intake(&drink("Water"), 500, at(1, 11, 0)).unwrap();

        assert_eq!(ledger.total_volume(), 950);
        assert!(approx(ledger.total_calories(), 105.0 + 90.0));
    }

    #[test]
    fn test_goal_percentage() {
        let mut ledger = Ledger::new(day(1));
        ledger.record_intake(&drink("Water"), 500, at(1, 9, 0)).unwrap();
        assert!(approx(ledger.goal_percentage(2000.0).unwrap(), 25.0));
    }

    #[test]
    fn test_goal_percentage_is_capped() {
        let mut ledger = Ledger::new(day(1));
        ledger.record_intake(&drink("Water"), 5000, at(1, 9, 0)).unwrap();
        assert_eq!(ledger.goal_percentage(2000.0).unwrap(), 100.0);
    }

    #[test]
    fn test_invalid_goal() {
        let ledger = Ledger::new(day(1));
        assert!(ledger.goal_percentage(0.0).is_err());
        assert!(ledger.goal_percentage(-2000.0).is_err());
        assert!(ledger.goal_percentage(f64::NAN).is_err());
        assert!(ledger.segments(0.0).is_err());
        assert!(ledger.fill_level(f64::INFINITY).is_err());
    }

    #[test]
    fn test_segments_are_proportional() {
        let mut ledger = Ledger::new(day(1));
        ledger.record_intake(&drink("Orange Juice"), 300, at(1, 9, 0)).unwrap();
        ledger.record_intake(&drink("Coffee"), 700, at(1, 10, 0)).unwrap();

        assert!(approx(ledger.fill_level(2000.0).unwrap(), 0.5));

        let segments = ledger.segments(2000.0).unwrap();
        assert_eq!(segments.len(), 2);
        assert_eq!(segments[0].color, "#F97316");
        assert_eq!(segments[1].color, "#92400E");
        assert!(approx(segments[0].fraction_of_fill, 0.3));
        assert!(approx(segments[1].fraction_of_fill, 0.7));
        assert!(approx(
            segments[0].fraction_of_fill / segments[1].fraction_of_fill,
            3.0 / 7.0
        ));

        assert!(approx(segments[0].offset, 0.0));
        assert!(approx(segments[0].height, 0.15));
        assert!(approx(segments[1].offset, 0.15));
        assert!(approx(segments[1].height, 0.35));
        let filled: f64 = segments.iter().map(|s| s.height).sum();
        assert!(approx(filled, 0.5));
    }

    #[test]
    fn test_fill_level_is_capped() {
        let mut ledger = Ledger::new(day(1));
        ledger.record_intake(&drink("Water"), 3000, at(1, 9, 0)).unwrap();
        assert!(approx(ledger.fill_level(2000.0).unwrap(), MAX_FILL_LEVEL));

        let segments = ledger.segments(2000.0).unwrap();
        assert!(approx(segments[0].fraction_of_fill, 1.0));
        assert!(approx(segments[0].height, MAX_FILL_LEVEL));
    }

    #[test]
    fn test_segments_are_recomputed() {
        let mut ledger = Ledger::new(day(1));
        ledger.record_intake(&drink("Water"), 500, at(1, 9, 0)).unwrap();
        let first = ledger.segments(2000.0).unwrap();
        assert_eq!(first, ledger.segments(2000.0).unwrap());

        ledger.record_intake(&drink("Water"), 500, at(1, 10, 0)).unwrap();
        let second = ledger.segments(2000.0).unwrap();
        assert_eq!(second.len(), 2);
        assert!(approx(second[0].fraction_of_fill, 0.5));
    }

    #[test]
    fn test_on_load_keeps_only_today() {
        let mut old = Ledger::new(day(1));
        old.record_intake(&drink("Water"), 250, at(1, 9, 0)).unwrap();
        let mut current = Ledger::new(day(2));
        current.record_intake(&drink("Coffee"), 150, at(2, 8, 0)).unwrap();

        let mixed: Vec<IntakeEvent> = old
            .events()
            .iter()
            .chain(current.events())
            .cloned()
            .collect();

        let ledger = Ledger::on_load(mixed, day(2));
        assert_eq!(ledger.date(), day(2));
        assert_eq!(ledger.events(), current.events());
    }

    #[test]
    fn test_on_load_stale_events_yield_empty_ledger() {
        let mut yesterday = Ledger::new(day(1));
        yesterday.record_intake(&drink("Water"), 250, at(1, 9, 0)).unwrap();
        yesterday.record_intake(&drink("Coca Cola"), 330, at(1, 12, 0)).unwrap();

        let ledger = Ledger::on_load(yesterday.events().to_vec(), day(2));
        assert!(ledger.is_empty());
        assert_eq!(ledger.total_volume(), 0);
    }

    #[test]
    fn test_events_survive_drink_removal() {
        let mut catalog = Catalog::seeded();
        let mut ledger = Ledger::new(day(1));
        let cola = catalog.get(4).cloned().unwrap();
        ledger.record_intake(&cola, 330, at(1, 12, 0)).unwrap();

        catalog.remove(4);

        let event = &ledger.events()[0];
        assert_eq!(event.drink_name, "Coca Cola");
        assert_eq!(event.color, "#7C2D12");
        assert!(approx(event.calories, 138.6));
    }
}
