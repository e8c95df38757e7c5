//! The set of drinks the user can log.

use std::collections::HashSet;

use crate::error::{TrackerError, TrackerResult};
use crate::models::{DrinkDefinition, DrinkId};

/// Drinks present on first run, as `(name, calories per 100ml, color)`.
const SEED_DRINKS: [(&str, f64, &str); 4] = [
    ("Water", 0.0, "#3B82F6"),
    ("Orange Juice", 45.0, "#F97316"),
    ("Coffee", 2.0, "#92400E"),
    ("Coca Cola", 42.0, "#7C2D12"),
];

/// Ordered collection of drink definitions with unique ids.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Catalog {
    drinks: Vec<DrinkDefinition>,
}

impl Catalog {
    /// An empty catalog.
    pub fn new() -> Self {
        Self::default()
    }

    /// The first-run catalog: Water, Orange Juice, Coffee and Coca Cola.
    pub fn seeded() -> Self {
        let drinks = SEED_DRINKS
            .iter()
            .zip(1..)
            .map(|(&(name, calories, color), id)| DrinkDefinition::new(id, name, calories, color))
            .collect();
        Self { drinks }
    }

    /// Builds a catalog from persisted definitions.
    ///
    /// Entries that would break the catalog's invariants (id 0, a repeated
    /// id, an empty name, bad calories) are skipped with a warning. Order is
    /// otherwise preserved.
    pub fn from_drinks(drinks: Vec<DrinkDefinition>) -> Self {
        let mut seen = HashSet::new();
        let mut kept = Vec::with_capacity(drinks.len());

        for drink in drinks {
            if drink.id == 0 {
                tracing::warn!("Skipping drink '{}' with id 0", drink.name);
                continue;
            }
            if !seen.insert(drink.id) {
                tracing::warn!("Skipping drink '{}': duplicate id {}", drink.name, drink.id);
                continue;
            }
            if let Err(e) = DrinkDefinition::validate(&drink.name, drink.calories_per_100ml) {
                tracing::warn!("Skipping drink {}: {}", drink.id, e);
                continue;
            }
            kept.push(drink);
        }

        Self { drinks: kept }
    }

    /// Adds a drink and returns it with its newly assigned id.
    ///
    /// The id is one more than the largest id present, or 1 when empty.
    /// Fails when the largest id leaves no room for another.
    pub fn add(
        &mut self,
        name: &str,
        calories_per_100ml: f64,
        color: impl Into<String>,
    ) -> TrackerResult<DrinkDefinition> {
        DrinkDefinition::validate(name, calories_per_100ml)?;

        let id = self.next_id()?;
        let drink = DrinkDefinition::new(id, name.trim(), calories_per_100ml, color);
        self.drinks.push(drink.clone());
        tracing::debug!("Added drink {} '{}'", drink.id, drink.name);
        Ok(drink)
    }

    /// Removes the drink with `id`. Removing an unknown id does nothing.
    pub fn remove(&mut self, id: DrinkId) -> Option<DrinkDefinition> {
        let index = self.drinks.iter().position(|d| d.id == id)?;
        Some(self.drinks.remove(index))
    }

    pub fn get(&self, id: DrinkId) -> Option<&DrinkDefinition> {
        self.drinks.iter().find(|d| d.id == id)
    }

    /// Drinks in insertion order.
    pub fn list(&self) -> &[DrinkDefinition] {
        &self.drinks
    }

    pub fn len(&self) -> usize {
        self.drinks.len()
    }

    pub fn is_empty(&self) -> bool {
        self.drinks.is_empty()
    }

    fn next_id(&self) -> TrackerResult<DrinkId> {
        self.drinks
            .iter()
            .map(|d| d.id)
            .max()
            .unwrap_or(0)
            .checked_add(1)
            .ok_or_else(|| TrackerError::invalid("no drink ids left"))
    }
}
