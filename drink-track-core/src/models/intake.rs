use chrono::{NaiveDate, NaiveTime, Timelike};
use serde::{Deserialize, Serialize};
use std::fmt;

/// One recorded drink for the current day.
///
/// Name and color are copied from the drink at recording time, so the event
/// stays meaningful after the drink is removed from the catalog.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct IntakeEvent {
    /// Position within the day, starting at 1.
    pub id: u32,
    pub drink_name: String,
    #[serde(rename = "volume")]
    pub volume_ml: u32,
    pub calories: f64,
    #[serde(with = "hhmm")]
    pub time: NaiveTime,
    pub color: String,
    pub date: NaiveDate,
}

impl IntakeEvent {
    /// Drops seconds and sub-second precision; events are kept per minute.
    pub(crate) fn truncate_to_minute(time: NaiveTime) -> NaiveTime {
        time.with_second(0)
            .and_then(|t| t.with_nanosecond(0))
            .unwrap_or(time)
    }
}

impl fmt::Display for IntakeEvent {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "{} {}ml {} ({} cal)",
            self.time.format(hhmm::FORMAT),
            self.volume_ml,
            self.drink_name,
            self.calories
        )
    }
}

/// Serializes a time of day as `HH:MM`.
pub(crate) mod hhmm {
    use chrono::NaiveTime;
    use serde::{self, Deserialize, Deserializer, Serializer};

    pub const FORMAT: &str = "%H:%M";

    pub fn serialize<S>(time: &NaiveTime, serializer: S) -> Result<S::Ok, S::Error>
    where
        S: Serializer,
    {
        serializer.serialize_str(&time.format(FORMAT).to_string())
    }

    pub fn deserialize<'de, D>(deserializer: D) -> Result<NaiveTime, D::Error>
    where
        D: Deserializer<'de>,
    {
        let s = String::deserialize(deserializer)?;
        NaiveTime::parse_from_str(&s, FORMAT).map_err(serde::de::Error::custom)
    }
}
