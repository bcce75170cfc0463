// Copyright 2026 the Inkcard Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Serde adapters that store [`Color`] values as CSS color strings.
//!
//! Serialization always writes `#rrggbb`, or `#rrggbbaa` when the color is
//! not opaque. Deserialization accepts anything the CSS Color 4 parser
//! understands, such as `#eee`, `rgba(255, 150, 0, 0.1)` or `tomato`.
//!
//! ```rust
//! use inkcard_surface::css_color;
//! use peniko::Color;
//!
//! #[derive(serde::Serialize, serde::Deserialize)]
//! struct Ink {
//!     #[serde(with = "css_color")]
//!     color: Color,
//! }
//!
//! let ink: Ink = serde_json::from_str(r#"{ "color": "rgb(255 0 0)" }"#).unwrap();
//! assert_eq!(css_color::to_css(ink.color), "#ff0000");
//! ```

use peniko::Color;
use peniko::color::{Rgba8, Srgb, parse_color};
use serde::de::Error as _;
use serde::{Deserialize, Deserializer, Serialize, Serializer};

/// A [`Color`] that is itself (de)serializable as a CSS string.
///
/// Useful where a field attribute cannot reach, such as the payload of a
/// tagged enum variant.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct CssColor(pub Color);

impl From<Color> for CssColor {
    fn from(color: Color) -> Self {
        Self(color)
    }
}

impl From<CssColor> for Color {
    fn from(color: CssColor) -> Self {
        color.0
    }
}

impl Serialize for CssColor {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serialize(&self.0, serializer)
    }
}

impl<'de> Deserialize<'de> for CssColor {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        deserialize(deserializer).map(Self)
    }
}

/// Formats `color` as a CSS hex string.
pub fn to_css(color: Color) -> String {
    let Rgba8 { r, g, b, a } = color.to_rgba8();
    if a == u8::MAX {
        format!("#{r:02x}{g:02x}{b:02x}")
    } else {
        format!("#{r:02x}{g:02x}{b:02x}{a:02x}")
    }
}

/// Parses any CSS color string into an sRGB color.
pub fn from_css(s: &str) -> Result<Color, peniko::color::ParseError> {
    Ok(parse_color(s)?.to_alpha_color::<Srgb>())
}

/// Serializes a color as a CSS string.
pub fn serialize<S: Serializer>(color: &Color, serializer: S) -> Result<S::Ok, S::Error> {
    serializer.serialize_str(&to_css(*color))
}

/// Deserializes a color from a CSS string.
pub fn deserialize<'de, D: Deserializer<'de>>(deserializer: D) -> Result<Color, D::Error> {
    let s = String::deserialize(deserializer)?;
    from_css(&s).map_err(|e| D::Error::custom(format!("invalid color {s:?}: {e}")))
}

/// The same adapters for `Option<Color>`, with `null` meaning `None`.
pub mod option {
    use super::*;

    /// Serializes an optional color as a CSS string or `null`.
    pub fn serialize<S: Serializer>(color: &Option<Color>, serializer: S) -> Result<S::Ok, S::Error> {
        match color {
            Some(c) => serializer.serialize_some(&to_css(*c)),
            None => serializer.serialize_none(),
        }
    }

    /// Deserializes an optional color from a CSS string or `null`.
    pub fn deserialize<'de, D: Deserializer<'de>>(
        deserializer: D,
    ) -> Result<Option<Color>, D::Error> {
        Option::<String>::deserialize(deserializer)?
            .map(|s| from_css(&s).map_err(|e| D::Error::custom(format!("invalid color {s:?}: {e}"))))
            .transpose()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn opaque_colors_use_six_digits() {
        assert_eq!(to_css(Color::from_rgb8(0xee, 0xee, 0xee)), "#eeeeee");
        assert_eq!(to_css(Color::from_rgba8(0, 0, 0, 0x1a)), "#0000001a");
    }

    #[test]
    fn parses_functional_notation() {
        let c = from_css("rgba(255, 150, 0, 0.1)").unwrap().to_rgba8();
        assert_eq!((c.r, c.g, c.b), (255, 150, 0));
        assert!((25..=26).contains(&c.a), "alpha {} should be about 0.1", c.a);
    }

    #[test]
    fn rejects_garbage() {
        assert!(from_css("not-a-color").is_err());
    }
}
