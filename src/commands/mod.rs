mod config_cmd;
mod drinks;
mod log;
mod status;

use clap::ValueEnum;

pub use config_cmd::ConfigCommand;
pub use drinks::DrinksCommand;
pub use log::LogCommand;
pub use status::StatusCommand;

#[derive(Clone, ValueEnum, Default)]
pub enum OutputFormat {
    #[default]
    Text,
    Json,
}
