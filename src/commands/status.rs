use std::io::IsTerminal;

use clap::Args;

use drink_track_core::{parse_hex_color, DailySummary, Store, Tracker};

use super::OutputFormat;

/// Rows used to draw the glass
const GLASS_ROWS: usize = 10;
/// Inner width of the glass
const GLASS_WIDTH: usize = 8;

#[derive(Args)]
pub struct StatusCommand {
    /// Output format
    #[arg(long, short, value_enum, default_value = "text")]
    pub format: OutputFormat,
}

impl StatusCommand {
    pub fn run<S: Store>(
        &self,
        tracker: &mut Tracker<S>,
    ) -> Result<(), Box<dyn std::error::Error>> {
        let summary = tracker.summary();

        match self.format {
            OutputFormat::Json => {
                println!("{}", serde_json::to_string_pretty(&summary)?);
            }
            OutputFormat::Text => {
                let title = format!("Today ({})", summary.date);
                println!("{}", title);
                println!("{}", "=".repeat(title.len()));
                println!("Intake:   {}ml", summary.total_volume_ml);
                println!("Calories: {}", summary.total_calories.trunc());
                println!(
                    "Goal:     {}ml ({:.0}%)",
                    summary.goal_ml, summary.goal_percentage
                );
                println!();

                for line in render_glass(&summary) {
                    println!("  {}", line);
                }

                if summary.events.is_empty() {
                    println!("\nNo drinks logged today");
                    return Ok(());
                }

                let colored = std::io::stdout().is_terminal();
                println!();
                println!("   {:<5}  {:>7}  {:<24}  CALORIES", "TIME", "VOLUME", "DRINK");
                println!("{}", "-".repeat(53));
                for event in &summary.events {
                    let marker = if colored {
                        swatch(&event.color)
                    } else {
                        "#".to_string()
                    };
                    println!(
                        "{}  {:<5}  {:>5}ml  {:<24}  {}",
                        marker,
                        event.time.format("%H:%M"),
                        event.volume_ml,
                        event.drink_name,
                        event.calories
                    );
                }
                println!("\nTotal: {} drink(s)", summary.events.len());
            }
        }
        Ok(())
    }
}

/// A block in the drink's color as a 24-bit ANSI escape. Tags that do not
/// parse fall back to an uncolored `#`.
fn swatch(tag: &str) -> String {
    match parse_hex_color(tag) {
        Some(rgba) => {
            let channel = |c: f32| (c * 255.0).round() as u8;
            format!(
                "\x1b[38;2;{};{};{}m#\x1b[0m",
                channel(rgba.r),
                channel(rgba.g),
                channel(rgba.b)
            )
        }
        None => "#".to_string(),
    }
}

/// Draws the glass top to bottom. Each filled row shows the initial of the
/// drink whose segment covers the row's midpoint.
fn render_glass(summary: &DailySummary) -> Vec<String> {
    let mut lines = Vec::with_capacity(GLASS_ROWS + 1);

    for row in (0..GLASS_ROWS).rev() {
        let midpoint = (row as f64 + 0.5) / GLASS_ROWS as f64;
        let fill = summary
            .segments
            .iter()
            .zip(&summary.events)
            .find(|(segment, _)| {
                midpoint >= segment.offset && midpoint < segment.offset + segment.height
            })
            .and_then(|(_, event)| event.drink_name.chars().next())
            .unwrap_or(' ');

        lines.push(format!("|{}|", fill.to_string().repeat(GLASS_WIDTH)));
    }
    lines.push(format!("\\{}/", "_".repeat(GLASS_WIDTH)));

    lines
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::{NaiveDate, NaiveTime};
    use drink_track_core::{IntakeEvent, Segment};

    fn event(name: &str, volume_ml: u32) -> IntakeEvent {
        IntakeEvent {
            id: 1,
            drink_name: name.to_string(),
            volume_ml,
            calories: 0.0,
            time: NaiveTime::from_hms_opt(9, 0, 0).unwrap(),
            color: "#3B82F6".to_string(),
            date: NaiveDate::from_ymd_opt(2025, 1, 1).unwrap(),
        }
    }

    fn summary(segments: Vec<Segment>, events: Vec<IntakeEvent>) -> DailySummary {
        DailySummary {
            date: NaiveDate::from_ymd_opt(2025, 1, 1).unwrap(),
            total_volume_ml: events.iter().map(|e| u64::from(e.volume_ml)).sum(),
            total_calories: 0.0,
            goal_ml: 2000.0,
            goal_percentage: 0.0,
            fill_level: segments.iter().map(|s| s.height).sum(),
            segments,
            events,
        }
    }

    #[test]
    fn test_swatch_uses_drink_color() {
        assert_eq!(swatch("#F97316"), "\x1b[38;2;249;115;22m#\x1b[0m");
        assert_eq!(swatch("#10B98180"), "\x1b[38;2;16;185;129m#\x1b[0m");
        assert_eq!(swatch("orange"), "#");
    }

    #[test]
    fn test_empty_glass() {
        let lines = render_glass(&summary(Vec::new(), Vec::new()));
        assert_eq!(lines.len(), GLASS_ROWS + 1);
        assert!(lines[..GLASS_ROWS].iter().all(|l| l == "|        |"));
        assert_eq!(lines[GLASS_ROWS], "\\________/");
    }

    #[test]
    fn test_glass_fills_bottom_up() {
        let segments = vec![
            Segment {
                color: "#F97316".to_string(),
                fraction_of_fill: 0.3,
                offset: 0.0,
                height: 0.15,
            },
            Segment {
                color: "#92400E".to_string(),
                fraction_of_fill: 0.7,
                offset: 0.15,
                height: 0.35,
            },
        ];
        let events = vec![event("Orange Juice", 300), event("Coffee", 700)];
        let lines = render_glass(&summary(segments, events));

        // Rows are listed top first; the last row before the base is row 0.
        assert_eq!(lines[GLASS_ROWS - 1], "|OOOOOOOO|");
        assert_eq!(lines[GLASS_ROWS - 2], "|CCCCCCCC|");
        assert_eq!(lines[GLASS_ROWS - 5], "|CCCCCCCC|");
        assert_eq!(lines[GLASS_ROWS - 6], "|        |");
    }
}
