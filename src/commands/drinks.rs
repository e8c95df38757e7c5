use clap::{Args, Subcommand};

use drink_track_core::{parse_hex_color, DrinkId, Store, Tracker, DEFAULT_COLOR, PRESET_COLORS};

use super::OutputFormat;

#[derive(Args)]
pub struct DrinksCommand {
    #[command(subcommand)]
    pub command: DrinksSubcommand,
}

#[derive(Subcommand)]
pub enum DrinksSubcommand {
    /// List all drinks
    List {
        /// Output format
        #[arg(long, short, value_enum, default_value = "text")]
        format: OutputFormat,
    },

    /// Add a new drink
    Add {
        /// Name of the drink
        name: String,

        /// Calories per 100ml
        #[arg(long, allow_negative_numbers = true)]
        calories: f64,

        /// Color as #RRGGBB (presets: #3B82F6, #F97316, #92400E, #7C2D12,
        /// #10B981, #8B5CF6, #F59E0B)
        #[arg(long, default_value = DEFAULT_COLOR)]
        color: String,
    },

    /// Remove a drink (already logged intake is kept)
    Remove {
        /// Drink ID
        id: DrinkId,
    },

    /// Show the preset colors
    Colors,
}

impl DrinksCommand {
    pub fn run<S: Store>(
        &self,
        tracker: &mut Tracker<S>,
    ) -> Result<(), Box<dyn std::error::Error>> {
        match &self.command {
            DrinksSubcommand::List { format } => {
                let drinks = tracker.list_drinks();

                if drinks.is_empty() {
                    println!("No drinks found");
                    return Ok(());
                }

                match format {
                    OutputFormat::Json => {
                        println!("{}", serde_json::to_string_pretty(drinks)?);
                    }
                    OutputFormat::Text => {
                        println!("{:<4}  {:<24}  {:>10}  COLOR", "ID", "NAME", "CAL/100ML");
                        println!("{}", "-".repeat(54));
                        for drink in drinks {
                            let name = if drink.name.chars().count() > 24 {
                                let short: String = drink.name.chars().take(21).collect();
                                format!("{}...", short)
                            } else {
                                drink.name.clone()
                            };
                            println!(
                                "{:<4}  {:<24}  {:>10}  {}",
                                drink.id, name, drink.calories_per_100ml, drink.color
                            );
                        }
                        println!("\nTotal: {} drink(s)", drinks.len());
                    }
                }
                Ok(())
            }

            DrinksSubcommand::Add {
                name,
                calories,
                color,
            } => {
                if parse_hex_color(color).is_none() {
                    return Err(format!("Invalid color '{}'. Use #RRGGBB.", color).into());
                }

                let drink = tracker.add_drink(name, *calories, color.trim())?;
                println!("Added drink {}: {}", drink.id, drink);
                Ok(())
            }

            DrinksSubcommand::Remove { id } => {
                match tracker.remove_drink(*id) {
                    Some(drink) => println!("Removed drink: {}", drink.name),
                    None => println!("No drink with ID {}; nothing removed.", id),
                }
                Ok(())
            }

            DrinksSubcommand::Colors => {
                for (i, color) in PRESET_COLORS.iter().enumerate() {
                    let marker = if *color == DEFAULT_COLOR { " (default)" } else { "" };
                    println!("{}. {}{}", i + 1, color, marker);
                }
                Ok(())
            }
        }
    }
}
