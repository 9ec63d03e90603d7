//! Color handling for fenboard rendering
//!
//! This module provides the [`Color`] type which wraps the `DynamicColor` type
//! from the color crate. Colors are parsed from CSS color strings and converted
//! to 8-bit sRGB channels when they reach the raster layer.

use std::{
    hash::{Hash, Hasher},
    str::FromStr,
};

use color::{DynamicColor, Srgb};

/// Wrapper around the `DynamicColor` type from the color crate
/// This provides convenience methods for working with colors in fenboard
#[derive(Clone, Copy, PartialEq, Debug)]
pub struct Color {
    color: DynamicColor,
}

impl Eq for Color {}

impl Hash for Color {
    fn hash<H: Hasher>(&self, state: &mut H) {
        self.to_rgba8().hash(state);
    }
}

impl Color {
    /// Create a new `Color` from a string
    /// This will parse CSS color strings such as "#ff0000", "rgb(255, 0, 0)", "red", etc.
    ///
    /// # Examples
    ///
    /// ```
    /// use fenboard_core::color::Color;
    ///
    /// let dark = Color::new("#D18B47").unwrap();
    /// let light = Color::new("navajowhite").unwrap();
    /// ```
    pub fn new(color_str: &str) -> Result<Self, String> {
        match DynamicColor::from_str(color_str) {
            Ok(color) => Ok(Self { color }),
            Err(err) => Err(format!("invalid color `{color_str}`: {err}")),
        }
    }

    /// Creates a color from 8-bit sRGB channels with straight (non-premultiplied) alpha.
    pub fn from_rgba8(r: u8, g: u8, b: u8, a: u8) -> Self {
        let rgba = color::AlphaColor::<Srgb>::from_rgba8(r, g, b, a);
        Self {
            color: DynamicColor::from_alpha_color(rgba),
        }
    }

    /// Converts the color to 8-bit sRGB channels `[r, g, b, a]` with straight alpha.
    ///
    /// # Examples
    ///
    /// ```
    /// use fenboard_core::color::Color;
    ///
    /// let color = Color::new("#D18B47").unwrap();
    /// assert_eq!(color.to_rgba8(), [0xD1, 0x8B, 0x47, 0xFF]);
    /// ```
    pub fn to_rgba8(&self) -> [u8; 4] {
        let rgba = self.color.to_alpha_color::<Srgb>().to_rgba8();
        [rgba.r, rgba.g, rgba.b, rgba.a]
    }
}

impl Default for Color {
    fn default() -> Self {
        Self::new("black").expect("'black' is a valid CSS color")
    }
}

impl std::fmt::Display for Color {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.color)
    }
}

impl FromStr for Color {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::new(s)
    }
}

impl From<Color> for tiny_skia::Color {
    fn from(color: Color) -> Self {
        let [r, g, b, a] = color.to_rgba8();
        tiny_skia::Color::from_rgba8(r, g, b, a)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_color_new() {
        let red = Color::new("#ff0000");
        assert!(red.is_ok());

        let invalid = Color::new("not-a-color");
        assert!(invalid.is_err());
    }

    #[test]
    fn test_color_invalid_message_names_input() {
        let err = Color::new("chartreuse-ish").unwrap_err();
        assert!(err.contains("chartreuse-ish"));
    }

    #[test]
    fn test_color_default_is_opaque_black() {
        let color = Color::default();
        assert_eq!(color.to_rgba8(), [0, 0, 0, 255]);
    }

    #[test]
    fn test_color_hex_to_rgba8() {
        let dark = Color::new("#D18B47").unwrap();
        let light = Color::new("#FFCE9E").unwrap();
        assert_eq!(dark.to_rgba8(), [209, 139, 71, 255]);
        assert_eq!(light.to_rgba8(), [255, 206, 158, 255]);
    }

    #[test]
    fn test_color_from_rgba8_roundtrip() {
        let color = Color::from_rgba8(12, 34, 56, 78);
        assert_eq!(color.to_rgba8(), [12, 34, 56, 78]);
    }

    #[test]
    fn test_color_into_tiny_skia() {
        let color: tiny_skia::Color = Color::new("#FFCE9E").unwrap().into();
        assert_eq!(color.to_color_u8().red(), 0xFF);
        assert_eq!(color.to_color_u8().green(), 0xCE);
        assert_eq!(color.to_color_u8().blue(), 0x9E);
    }

    #[test]
    fn test_color_from_str() {
        let color: Color = "blue".parse().unwrap();
        assert_eq!(color.to_rgba8(), [0, 0, 255, 255]);
        assert!("nope".parse::<Color>().is_err());
    }

    #[test]
    fn test_color_eq_hash() {
        use std::collections::HashSet;

        let color1 = Color::new("red").unwrap();
        let color2 = Color::new("red").unwrap();
        let color3 = Color::new("blue").unwrap();

        assert_eq!(color1, color2);
        assert_ne!(color1, color3);

        let mut set = HashSet::new();
        set.insert(color1);
        assert!(set.contains(&color2));
        assert!(!set.contains(&color3));
    }
}
