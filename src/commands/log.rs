use clap::Args;

use drink_track_core::{DrinkId, Store, Tracker};

/// Volume of the small quick-add glass
pub const SMALL_GLASS_ML: i64 = 250;
/// Volume of the large quick-add glass
pub const LARGE_GLASS_ML: i64 = 500;

#[derive(Args)]
pub struct LogCommand {
    /// Drink ID (see `drink drinks list`)
    pub drink_id: DrinkId,

    /// Custom amount in ml
    #[arg(long, short, allow_negative_numbers = true, conflicts_with_all = ["small", "large"])]
    pub volume: Option<i64>,

    /// Small glass (250ml); the default
    #[arg(long, conflicts_with = "large")]
    pub small: bool,

    /// Large glass (500ml)
    #[arg(long)]
    pub large: bool,
}

impl LogCommand {
    /// Volume selected by the flags.
    pub fn volume_ml(&self) -> i64 {
        match (self.volume, self.large) {
            (Some(volume), _) => volume,
            (None, true) => LARGE_GLASS_ML,
            (None, false) => SMALL_GLASS_ML,
        }
    }

    pub fn run<S: Store>(
        &self,
        tracker: &mut Tracker<S>,
    ) -> Result<(), Box<dyn std::error::Error>> {
        let event = tracker.record_intake(self.drink_id, self.volume_ml())?;

        println!("Logged {}ml of {}", event.volume_ml, event.drink_name);
        println!("  Time:     {}", event.time.format("%H:%M"));
        println!("  Calories: {}", event.calories);
        println!();
        println!(
            "Today: {}ml, {} cal, {:.0}% of goal",
            tracker.total_volume_today(),
            tracker.total_calories_today().trunc(),
            tracker.goal_percentage()
        );
        Ok(())
    }
}
