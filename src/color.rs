//! RGBA color values exchanged with the host.
//!
//! The host stores its tint as four float channels in `[0, 1]`. User-facing
//! surfaces (config, CLI) accept `#rrggbb` / `#rrggbbaa` hex or a
//! comma-separated float list and render back to hex.

use std::fmt;

/// A color with four `f32` channels, conventionally in `[0, 1]`.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Rgba {
    pub r: f32,
    pub g: f32,
    pub b: f32,
    pub a: f32,
}

impl Rgba {
    /// Sentinel returned by the compatibility accessor when the bridge has
    /// nothing to report.
    pub const BLACK: Rgba = Rgba::new(0.0, 0.0, 0.0, 1.0);

    pub const fn new(r: f32, g: f32, b: f32, a: f32) -> Self {
        Self { r, g, b, a }
    }

    /// Parse a user-supplied color value.
    ///
    /// Accepts `#rrggbb`, `#rrggbbaa`, or 3-4 comma-separated floats
    /// (`0.95,0.86,1,1`). Float channels are clamped into `[0, 1]`.
    pub fn parse(input: &str) -> Result<Self, String> {
        let trimmed = input.trim();
        if trimmed.is_empty() {
            return Err("color value cannot be empty".to_string());
        }
        if let Some(hex) = trimmed.strip_prefix('#') {
            return Self::parse_hex(hex).ok_or_else(|| {
                format!("invalid hex color `{input}` (expected #rrggbb or #rrggbbaa)")
            });
        }
        Self::parse_floats(trimmed)
            .ok_or_else(|| format!("invalid color `{input}` (expected 3-4 floats in 0..1)"))
    }

    fn parse_hex(hex: &str) -> Option<Self> {
        if hex.len() != 6 && hex.len() != 8 {
            return None;
        }
        let channel = |range: std::ops::Range<usize>| {
            u8::from_str_radix(&hex[range], 16)
                .ok()
                .map(|v| v as f32 / 255.0)
        };
        let r = channel(0..2)?;
        let g = channel(2..4)?;
        let b = channel(4..6)?;
        let a = if hex.len() == 8 { channel(6..8)? } else { 1.0 };
        Some(Self::new(r, g, b, a))
    }

    fn parse_floats(input: &str) -> Option<Self> {
        let mut channels = [0.0f32; 4];
        channels[3] = 1.0;
        let mut count = 0;
        for part in input.split(',') {
            if count >= 4 {
                return None;
            }
            let value: f32 = part.trim().parse().ok()?;
            if !value.is_finite() {
                return None;
            }
            channels[count] = value.clamp(0.0, 1.0);
            count += 1;
        }
        if count < 3 {
            return None;
        }
        Some(Self::new(channels[0], channels[1], channels[2], channels[3]))
    }

    /// Render as hex, omitting the alpha component when fully opaque.
    pub fn to_hex(self) -> String {
        let byte = |c: f32| (c.clamp(0.0, 1.0) * 255.0).round() as u8;
        if self.a >= 1.0 {
            format!("#{:02x}{:02x}{:02x}", byte(self.r), byte(self.g), byte(self.b))
        } else {
            format!(
                "#{:02x}{:02x}{:02x}{:02x}",
                byte(self.r),
                byte(self.g),
                byte(self.b),
                byte(self.a)
            )
        }
    }
}

impl fmt::Display for Rgba {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.to_hex())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parses_hex_with_and_without_alpha() {
        let c = Rgba::parse("#ff0080").expect("hex");
        assert_eq!(c, Rgba::new(1.0, 0.0, 128.0 / 255.0, 1.0));

        let c = Rgba::parse("#ff008080").expect("hex with alpha");
        assert_eq!(c.a, 128.0 / 255.0);
    }

    #[test]
    fn parses_float_lists_and_clamps() {
        let c = Rgba::parse("0.5, 0.25, 1").expect("three floats");
        assert_eq!(c, Rgba::new(0.5, 0.25, 1.0, 1.0));

        let c = Rgba::parse("2,-1,0.5,0.5").expect("clamped");
        assert_eq!(c, Rgba::new(1.0, 0.0, 0.5, 0.5));
    }

    #[test]
    fn rejects_malformed_values() {
        assert!(Rgba::parse("").is_err());
        assert!(Rgba::parse("#12345").is_err());
        assert!(Rgba::parse("#gg0000").is_err());
        assert!(Rgba::parse("0.5,0.5").is_err());
        assert!(Rgba::parse("1,2,3,4,5").is_err());
        assert!(Rgba::parse("NaN,0,0,1").is_err());
    }

    #[test]
    fn hex_rendering_round_trips() {
        assert_eq!(Rgba::parse("#f2dcff").unwrap().to_hex(), "#f2dcff");
        assert_eq!(Rgba::new(0.0, 0.0, 0.0, 0.5).to_hex(), "#00000080");
        assert_eq!(format!("{}", Rgba::BLACK), "#000000");
    }
}
