//! Hex to HSL conversion and contrasting foreground selection.
//!
//! Style variables carry colors as bare `"H S% L%"` triples so stylesheets
//! can wrap them in `hsl(var(--primary))`.

use std::fmt;

use thiserror::Error;

#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum ColorError {
    #[error("invalid hex color {input:?}: expected 6 hex digits")]
    InvalidHex { input: String },
}

/// An sRGB color with 8-bit channels.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Rgb {
    pub r: u8,
    pub g: u8,
    pub b: u8,
}

/// Hue in degrees `[0, 360)`, saturation and lightness in percent `[0, 100]`.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Hsl {
    pub h: u16,
    pub s: u8,
    pub l: u8,
}

impl Hsl {
    pub const BLACK: Hsl = Hsl { h: 0, s: 0, l: 0 };
    pub const WHITE: Hsl = Hsl { h: 0, s: 0, l: 100 };
}

impl fmt::Display for Hsl {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} {}% {}%", self.h, self.s, self.l)
    }
}

impl Rgb {
    /// Parse `#rrggbb` or `rrggbb` (case-insensitive).
    pub fn from_hex(hex: &str) -> Result<Self, ColorError> {
        let invalid = || ColorError::InvalidHex {
            input: hex.to_string(),
        };

        let digits = hex.strip_prefix('#').unwrap_or(hex);
        if digits.len() != 6 || !digits.bytes().all(|b| b.is_ascii_hexdigit()) {
            return Err(invalid());
        }

        let channel = |i: usize| u8::from_str_radix(&digits[i..i + 2], 16).map_err(|_| invalid());
        Ok(Self {
            r: channel(0)?,
            g: channel(2)?,
            b: channel(4)?,
        })
    }

    fn normalized(&self) -> (f64, f64, f64) {
        (
            f64::from(self.r) / 255.0,
            f64::from(self.g) / 255.0,
            f64::from(self.b) / 255.0,
        )
    }

    pub fn to_hsl(&self) -> Hsl {
        let (r, g, b) = self.normalized();
        let max = r.max(g).max(b);
        let min = r.min(g).min(b);
        let l = (max + min) / 2.0;

        let (h, s) = if max == min {
            (0.0, 0.0)
        } else {
            let d = max - min;
            let s = if l > 0.5 {
                d / (2.0 - max - min)
            } else {
                d / (max + min)
            };
            let h = if max == r {
                (g - b) / d + if g < b { 6.0 } else { 0.0 }
            } else if max == g {
                (b - r) / d + 2.0
            } else {
                (r - g) / d + 4.0
            };
            (h / 6.0, s)
        };

        Hsl {
            // 359.5 and up rounds to 360, which is the same hue as 0.
            h: ((h * 360.0).round() as u16) % 360,
            s: (s * 100.0).round().clamp(0.0, 100.0) as u8,
            l: (l * 100.0).round().clamp(0.0, 100.0) as u8,
        }
    }

    /// Perceptual luminance in `[0, 1]`.
    pub fn luminance(&self) -> f64 {
        let (r, g, b) = self.normalized();
        0.299 * r + 0.587 * g + 0.114 * b
    }
}

/// Convert a hex color to its HSL triple.
pub fn hex_to_hsl(hex: &str) -> Result<Hsl, ColorError> {
    Ok(Rgb::from_hex(hex)?.to_hsl())
}

/// Black foreground on light backgrounds, white on dark ones.
pub fn contrast_color(hex: &str) -> Result<Hsl, ColorError> {
    let rgb = Rgb::from_hex(hex)?;
    Ok(if rgb.luminance() > 0.5 {
        Hsl::BLACK
    } else {
        Hsl::WHITE
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use proptest::prelude::*;

    #[test]
    fn known_fixtures() {
        assert_eq!(hex_to_hsl("#ef4444").unwrap().to_string(), "0 84% 60%");
        assert_eq!(hex_to_hsl("#000000").unwrap().to_string(), "0 0% 0%");
        assert_eq!(hex_to_hsl("#ffffff").unwrap().to_string(), "0 0% 100%");
    }

    #[test]
    fn fallback_palette_values() {
        assert_eq!(hex_to_hsl("#3b82f6").unwrap().to_string(), "217 91% 60%");
        assert_eq!(hex_to_hsl("#8b5cf6").unwrap().to_string(), "258 90% 66%");
    }

    #[test]
    fn hue_branches_by_max_channel() {
        assert_eq!(hex_to_hsl("#00ff00").unwrap(), Hsl { h: 120, s: 100, l: 50 });
        assert_eq!(hex_to_hsl("#0000ff").unwrap(), Hsl { h: 240, s: 100, l: 50 });
        // red max with blue above green takes the +6 phase
        assert_eq!(hex_to_hsl("#ff00ff").unwrap().h, 300);
    }

    #[test]
    fn prefix_and_case_are_optional() {
        assert_eq!(hex_to_hsl("EF4444").unwrap(), hex_to_hsl("#ef4444").unwrap());
    }

    #[test]
    fn rejects_malformed_hex() {
        for bad in ["", "#fff", "#gg0000", "#ef44441", "ef44 4"] {
            assert!(
                matches!(hex_to_hsl(bad), Err(ColorError::InvalidHex { .. })),
                "{bad:?} should be rejected"
            );
        }
    }

    #[test]
    fn contrast_picks_readable_foreground() {
        assert_eq!(contrast_color("#000000").unwrap().to_string(), "0 0% 100%");
        assert_eq!(contrast_color("#ffffff").unwrap().to_string(), "0 0% 0%");
        assert_eq!(contrast_color("#ef4444").unwrap(), Hsl::WHITE);
        assert_eq!(contrast_color("#fde047").unwrap(), Hsl::BLACK);
    }

    proptest! {
        #[test]
        fn hsl_components_stay_in_range(r: u8, g: u8, b: u8) {
            let hsl = hex_to_hsl(&format!("#{r:02x}{g:02x}{b:02x}")).unwrap();
            prop_assert!(hsl.h < 360);
            prop_assert!(hsl.s <= 100);
            prop_assert!(hsl.l <= 100);
        }
    }
}
