use serde::{Deserialize, Serialize};
use std::fmt;

use crate::error::{TrackerError, TrackerResult};

pub type DrinkId = u32;

/// A kind of drink the user can log, with its energy density.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct DrinkDefinition {
    pub id: DrinkId,
    pub name: String,
    pub calories_per_100ml: f64,
    pub color: String,
}

impl DrinkDefinition {
    pub(crate) fn new(
        id: DrinkId,
        name: impl Into<String>,
        calories_per_100ml: f64,
        color: impl Into<String>,
    ) -> Self {
        Self {
            id,
            name: name.into(),
            calories_per_100ml,
            color: color.into(),
        }
    }

    /// Calories contributed by `volume_ml` of this drink.
    pub fn calories_for(&self, volume_ml: u32) -> f64 {
        self.calories_per_100ml * f64::from(volume_ml) / 100.0
    }

    /// Checks the fields a definition must satisfy before the catalog owns it.
    pub(crate) fn validate(name: &str, calories_per_100ml: f64) -> TrackerResult<()> {
        if name.trim().is_empty() {
            return Err(TrackerError::invalid("drink name cannot be empty"));
        }
        if !calories_per_100ml.is_finite() {
            return Err(TrackerError::invalid(
                "calories per 100ml must be a finite number",
            ));
        }
        if calories_per_100ml < 0.0 {
            return Err(TrackerError::invalid(format!(
                "calories per 100ml cannot be negative (got {})",
                calories_per_100ml
            )));
        }
        Ok(())
    }
}

impl fmt::Display for DrinkDefinition {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} ({} cal/100ml)", self.name, self.calories_per_100ml)
    }
}
