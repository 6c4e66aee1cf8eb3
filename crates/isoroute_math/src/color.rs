//! RGB color type

use serde::{Deserialize, Serialize};

/// An RGB color
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct Color {
    pub r: u8,
    pub g: u8,
    pub b: u8,
}

impl Color {
    pub const WHITE: Self = Self { r: 255, g: 255, b: 255 };
    pub const BLACK: Self = Self { r: 0, g: 0, b: 0 };

    /// Create a new color from 8-bit channels
    #[inline]
    pub const fn new(r: u8, g: u8, b: u8) -> Self {
        Self { r, g, b }
    }

    /// Blend toward `light` by `amount`
    ///
    /// `amount` scales each channel of `light` before adding it; a negative
    /// amount darkens instead. Channels saturate at 0 and 255.
    pub fn lighten(self, amount: f64, light: Color) -> Self {
        let channel = |base: u8, light: u8| -> u8 {
            (f64::from(base) + f64::from(light) * amount).clamp(0.0, 255.0) as u8
        };
        Self {
            r: channel(self.r, light.r),
            g: channel(self.g, light.g),
            b: channel(self.b, light.b),
        }
    }
}

impl std::fmt::Display for Color {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "rgb({},{},{})", self.r, self.g, self.b)
    }
}
