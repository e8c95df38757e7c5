mod color;
mod drink;
mod intake;

pub use color::{parse_hex_color, Rgba, DEFAULT_COLOR, PRESET_COLORS};
pub use drink::{DrinkDefinition, DrinkId};
pub use intake::IntakeEvent;

pub(crate) use intake::hhmm as hhmm_serde;
