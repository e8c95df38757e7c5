//! Color tags attached to drinks and intake events.
//!
//! Tags are stored as the caller gave them. Renderers that need numeric
//! components go through [`parse_hex_color`].

use serde::{Deserialize, Serialize};

/// Palette offered when creating a new drink.
pub const PRESET_COLORS: [&str; 7] = [
    "#3B82F6", "#F97316", "#92400E", "#7C2D12", "#10B981", "#8B5CF6", "#F59E0B",
];

/// Color used for a new drink when none is chosen.
pub const DEFAULT_COLOR: &str = PRESET_COLORS[0];

/// Color components in `[0, 1]`.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Rgba {
    pub r: f32,
    pub g: f32,
    pub b: f32,
    pub a: f32,
}

/// Parses `#RRGGBB` or `#RRGGBBAA`. Returns `None` for anything else.
pub fn parse_hex_color(tag: &str) -> Option<Rgba> {
    let hex = tag.trim().strip_prefix('#')?;
    if !(hex.len() == 6 || hex.len() == 8) || !hex.chars().all(|c| c.is_ascii_hexdigit()) {
        return None;
    }

    let channel = |i: usize| -> Option<f32> {
        u8::from_str_radix(&hex[i..i + 2], 16)
            .ok()
            .map(|v| f32::from(v) / 255.0)
    };

    Some(Rgba {
        r: channel(0)?,
        g: channel(2)?,
        b: channel(4)?,
        a: if hex.len() == 8 { channel(6)? } else { 1.0 },
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_rgb() {
        let c = parse_hex_color("#FF0000").unwrap();
        assert_eq!(c, Rgba { r: 1.0, g: 0.0, b: 0.0, a: 1.0 });

        let lower = parse_hex_color("#3b82f6").unwrap();
        let upper = parse_hex_color("#3B82F6").unwrap();
        assert_eq!(lower, upper);
        assert_eq!(upper.b, 246.0 / 255.0);
    }

    #[test]
    fn test_parse_rgba() {
        let c = parse_hex_color("#00000080").unwrap();
        assert_eq!(c.a, 128.0 / 255.0);
    }

    #[test]
    fn test_parse_rejects_malformed() {
        assert!(parse_hex_color("3B82F6").is_none());
        assert!(parse_hex_color("#3B82F").is_none());
        assert!(parse_hex_color("#GGGGGG").is_none());
        assert!(parse_hex_color("#+F0000").is_none());
        assert!(parse_hex_color("blue").is_none());
        assert!(parse_hex_color("").is_none());
    }

    #[test]
    fn test_presets_all_parse() {
        for tag in PRESET_COLORS {
            assert!(parse_hex_color(tag).is_some(), "{} should parse", tag);
        }
        assert_eq!(DEFAULT_COLOR, "#3B82F6");
    }
}
