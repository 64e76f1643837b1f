// SPDX-License-Identifier: MIT

//!
//! The RGB colour type used for events and timeline palettes
//!

use serde::{Deserialize, Deserializer, Serialize, Serializer};
use thiserror::Error;

/// Errors that can arise in relation to a [`Colour`]
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum ColourError {
    #[error("`{0}` is not a hex colour (expected e.g. `#3b82f6`)")]
    InvalidHex(String),
}

/// The `Colour` type
#[derive(Debug, Default, Copy, Clone, PartialEq, Eq, Hash)]
pub struct Colour {
    r: u8,
    g: u8,
    b: u8,
}

impl From<Colour> for [u8; 3] {
    fn from(value: Colour) -> Self {
        [value.r, value.g, value.b]
    }
}

impl From<[u8; 3]> for Colour {
    fn from(value: [u8; 3]) -> Self {
        Colour::from_rgb(value[0], value[1], value[2])
    }
}

impl Colour {
    /// Create a colour from RGB values
    pub const fn from_rgb(r: u8, g: u8, b: u8) -> Self {
        Colour { r, g, b }
    }

    /// Create a colour from a hex colour (e.g. `#ab66ef`, `ab66ef`, `#ab66efff`).
    /// If the hex value has an alpha component, it is removed.
    pub fn from_hex<S: AsRef<str>>(hex_colour: S) -> Result<Self, ColourError> {
        let original = hex_colour.as_ref().trim();
        let invalid = || ColourError::InvalidHex(original.to_string());

        let hex = original.strip_prefix('#').unwrap_or(original);
        if !hex.is_ascii() {
            return Err(invalid());
        }
        let hex = match hex.len() {
            6 => hex,
            8 => &hex[0..6],
            _ => return Err(invalid()),
        };

        let component = |range: std::ops::Range<usize>| {
            u8::from_str_radix(&hex[range], 16).map_err(|_| invalid())
        };
        Ok(Colour::from_rgb(
            component(0..2)?,
            component(2..4)?,
            component(4..6)?,
        ))
    }

    /// To get RGB as, say, `#0affc3` (for CSS)
    pub fn as_hex(&self) -> String {
        // {:02x} means print as hex, requesting 2 chars (pad left with "0" if only 1 char otherwise)
        format!("#{:02x}{:02x}{:02x}", self.r, self.g, self.b)
    }

    /// Get a colour as RGB values
    pub fn as_rgb(&self) -> (u8, u8, u8) {
        (self.r, self.g, self.b)
    }

    /// Get a lighter shade of the specified colour
    pub fn lightened_colour(colour: Colour) -> Colour {
        let old_r: f64 = colour.r.into();
        let old_g: f64 = colour.g.into();
        let old_b: f64 = colour.b.into();
        let new_r: f64 = (old_r + (0.5 * (255.0 - old_r))).round();
        let new_g: f64 = (old_g + (0.5 * (255.0 - old_g))).round();
        let new_b: f64 = (old_b + (0.5 * (255.0 - old_b))).round();
        Colour::from_rgb(new_r as u8, new_g as u8, new_b as u8)
    }
}

impl Serialize for Colour {
    fn serialize<S>(&self, serializer: S) -> Result<S::Ok, S::Error>
    where
        S: Serializer,
    {
        serializer.serialize_str(&self.as_hex())
    }
}

impl<'de> Deserialize<'de> for Colour {
    fn deserialize<D>(deserializer: D) -> Result<Self, D::Error>
    where
        D: Deserializer<'de>,
    {
        let string = String::deserialize(deserializer)?;
        Colour::from_hex(string).map_err(serde::de::Error::custom)
    }
}

#[cfg(test)]
mod test {
    use super::*;
    use timeline_pro_macros::colour;

    #[test]
    fn from_hex() {
        // Should be ok
        assert_eq!(Colour::from_hex("#3b82f6"), Ok(Colour::from_rgb(59, 130, 246)));
        assert_eq!(Colour::from_hex("3B82F6"), Ok(Colour::from_rgb(59, 130, 246)));
        assert_eq!(Colour::from_hex("#3b82f6ff"), Ok(Colour::from_rgb(59, 130, 246)));

        // Should return error
        assert!(Colour::from_hex("").is_err());
        assert!(Colour::from_hex("#fff").is_err());
        assert!(Colour::from_hex("blue").is_err());
        assert!(Colour::from_hex("#gg0000").is_err());
        assert!(Colour::from_hex("#ééé").is_err());
    }

    #[test]
    fn macro_matches_runtime_parse() {
        assert_eq!(colour!("#020617"), Colour::from_hex("#020617").unwrap());
        assert_eq!(colour!("#020617").as_hex(), "#020617");
    }

    #[test]
    fn lightened() {
        let colour = Colour::lightened_colour(Colour::from_rgb(0, 100, 255));
        assert_eq!(colour.as_rgb(), (128, 178, 255));
    }

    #[test]
    fn serde_as_hex_string() {
        let colour: Colour = serde_json::from_str(r##""#ff0000""##).unwrap();
        assert_eq!(colour, Colour::from_rgb(255, 0, 0));
        assert_eq!(serde_json::to_string(&colour).unwrap(), r##""#ff0000""##);
        assert!(serde_json::from_str::<Colour>(r#""red""#).is_err());
    }
}
