//! 8-bit RGB colors, the static percent bands, and linear blending.

use std::fmt;

use serde::{Serialize, Serializer};

/// An opaque 8-bit-per-channel color.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct Rgb {
    pub r: u8,
    pub g: u8,
    pub b: u8,
}

impl Rgb {
    pub const fn new(r: u8, g: u8, b: u8) -> Self {
        Self { r, g, b }
    }
}

impl fmt::Display for Rgb {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "#{:02x}{:02x}{:02x}", self.r, self.g, self.b)
    }
}

impl Serialize for Rgb {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.collect_str(self)
    }
}

pub const GREEN: Rgb = Rgb::new(0x4c, 0xaf, 0x50);
pub const AMBER: Rgb = Rgb::new(0xff, 0x98, 0x00);
pub const RED: Rgb = Rgb::new(0xf4, 0x43, 0x36);
/// High end of the beacon pulse. The low end is [`RED`].
pub const WARN: Rgb = Rgb::new(0xff, 0xcc, 0x00);

/// Percent at which the band turns from green to amber.
pub const AMBER_FROM_PERCENT: f64 = 50.0;
/// Percent at which the band turns red and the beacon engages.
pub const RED_FROM_PERCENT: f64 = 80.0;

/// Static band color for a displayed percentage.
pub fn band_color(percent: f64) -> Rgb {
    if percent < AMBER_FROM_PERCENT {
        GREEN
    } else if percent < RED_FROM_PERCENT {
        AMBER
    } else {
        RED
    }
}

/// Per-channel linear interpolation from `from` (t = 0) to `to` (t = 1).
///
/// Channels are truncated toward zero, never rounded. `t` is clamped to
/// `[0, 1]`.
pub fn blend(from: Rgb, to: Rgb, t: f64) -> Rgb {
    let t = t.clamp(0.0, 1.0);
    let mix = |a: u8, b: u8| (f64::from(a) + (f64::from(b) - f64::from(a)) * t) as u8;
    Rgb::new(mix(from.r, to.r), mix(from.g, to.g), mix(from.b, to.b))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn blend_endpoints_are_exact() {
        assert_eq!(blend(RED, WARN, 0.0).to_string(), "#f44336");
        assert_eq!(blend(RED, WARN, 1.0).to_string(), "#ffcc00");
    }

    #[test]
    fn blend_truncates_channels() {
        // r: 244 + 11 * 0.5 = 249.5 -> 249
        // g: 67 + 137 * 0.5 = 135.5 -> 135
        // b: 54 - 54 * 0.5 = 27
        assert_eq!(blend(RED, WARN, 0.5), Rgb::new(249, 135, 27));
    }

    #[test]
    fn blend_truncates_toward_zero_on_falling_channel() {
        // b: 54 - 54 * 0.33 = 36.18 -> 36
        assert_eq!(blend(RED, WARN, 0.33).b, 36);
    }

    #[test]
    fn blend_clamps_t() {
        assert_eq!(blend(RED, WARN, -1.0), RED);
        assert_eq!(blend(RED, WARN, 3.0), WARN);
    }

    #[test]
    fn band_boundaries() {
        assert_eq!(band_color(0.0), GREEN);
        assert_eq!(band_color(49.999), GREEN);
        assert_eq!(band_color(50.0), AMBER);
        assert_eq!(band_color(79.99), AMBER);
        assert_eq!(band_color(80.0), RED);
        assert_eq!(band_color(100.0), RED);
    }

    #[test]
    fn red_band_matches_beacon_low_end() {
        assert_eq!(band_color(RED_FROM_PERCENT), blend(RED, WARN, 0.0));
    }

    #[test]
    fn displays_as_lowercase_hex_triplet() {
        assert_eq!(GREEN.to_string(), "#4caf50");
        assert_eq!(Rgb::new(0, 10, 255).to_string(), "#000aff");
    }

    #[test]
    fn serializes_as_hex_string() {
        assert_eq!(serde_json::to_string(&AMBER).unwrap(), "\"#ff9800\"");
    }
}
