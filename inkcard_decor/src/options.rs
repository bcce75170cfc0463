// Copyright 2026 the Inkcard Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Option records, one per motif kind.

use inkcard_surface::css_color;
use peniko::Color;
use serde::{Deserialize, Serialize};

/// Light gray used by most motifs unless configured otherwise.
pub const DEFAULT_INK: Color = Color::from_rgb8(0xee, 0xee, 0xee);

pub(crate) fn clamp_or(value: f32, min: f32, max: f32, fallback: f32) -> f32 {
    if value.is_finite() {
        value.clamp(min, max)
    } else {
        fallback
    }
}

/// Corner the quote glyph is anchored to.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum QuotePosition {
    /// Opening mark near the top-left corner.
    #[default]
    TopLeft,
    /// Opening mark near the top-right corner.
    TopRight,
    /// Closing mark near the bottom-left corner.
    BottomLeft,
    /// Closing mark near the bottom-right corner.
    BottomRight,
}

impl QuotePosition {
    /// Opening marks at the top, closing marks at the bottom.
    pub fn glyph(self) -> &'static str {
        match self {
            Self::TopLeft | Self::TopRight => "\u{201c}",
            Self::BottomLeft | Self::BottomRight => "\u{201d}",
        }
    }
}

/// A single large quotation mark.
#[derive(Clone, Copy, Debug, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct QuoteMarks {
    /// Glyph color.
    #[serde(with = "css_color")]
    pub color: Color,
    /// Font size of the glyph, in pixels.
    pub size: f32,
    /// Where the glyph sits.
    pub position: QuotePosition,
}

impl Default for QuoteMarks {
    fn default() -> Self {
        Self {
            color: DEFAULT_INK,
            size: 72.0,
            position: QuotePosition::TopLeft,
        }
    }
}

/// Stroke style of the border.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum BorderStyle {
    /// One continuous line.
    #[default]
    Solid,
    /// Dashes three widths long with two-width gaps.
    Dashed,
    /// Two parallel lines one width apart.
    Double,
}

/// Rectangle inset from the surface edges.
#[derive(Clone, Copy, Debug, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Border {
    /// Stroke style.
    pub style: BorderStyle,
    /// Stroke width, in pixels.
    pub width: f32,
    /// Stroke color.
    #[serde(with = "css_color")]
    pub color: Color,
    /// Corner radius of the rectangle, in pixels.
    pub radius: f32,
}

impl Default for Border {
    fn default() -> Self {
        Self {
            style: BorderStyle::Solid,
            width: 2.0,
            color: DEFAULT_INK,
            radius: 0.0,
        }
    }
}

/// Rotated, translucent text repeated across the surface.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Watermark {
    /// Text to repeat.
    pub text: String,
    /// Opacity of the black text.
    pub opacity: f32,
    /// Rotation in degrees; negative values rotate counter-clockwise.
    pub angle: f32,
}

impl Default for Watermark {
    fn default() -> Self {
        Self {
            text: "Generated by Text2Image".to_owned(),
            opacity: 0.1,
            angle: -45.0,
        }
    }
}

/// Motif of the texture tile.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum TexturePattern {
    /// A hairline diagonal.
    #[default]
    Lines,
    /// A single centered dot.
    Dots,
    /// Hairlines along two tile edges, forming a grid.
    Grid,
}

/// A faint black texture tiled over the surface.
#[derive(Clone, Copy, Debug, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Texture {
    /// Tile motif.
    pub pattern: TexturePattern,
    /// Opacity of the tiled layer.
    pub opacity: f32,
    /// Tile scale; `1.0` is a 20px tile.
    pub scale: f32,
}

impl Default for Texture {
    fn default() -> Self {
        Self {
            pattern: TexturePattern::Lines,
            opacity: 0.1,
            scale: 1.0,
        }
    }
}

/// Ornament drawn into each corner.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum CornerStyle {
    /// Two straight lines meeting at the corner.
    #[default]
    Simple,
    /// A pair of mirrored cubic curves.
    Ornate,
    /// Three curved petals and a dot.
    Floral,
}

/// Ornaments in all four corners.
#[derive(Clone, Copy, Debug, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Corner {
    /// Ornament style.
    pub style: CornerStyle,
    /// Stroke color.
    #[serde(with = "css_color")]
    pub color: Color,
    /// Extent of the ornament from the corner, in pixels.
    pub size: f32,
}

impl Default for Corner {
    fn default() -> Self {
        Self {
            style: CornerStyle::Simple,
            color: DEFAULT_INK,
            size: 40.0,
        }
    }
}

/// Motif of the pattern tile.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum PatternKind {
    /// A large center dot with quarter dots in the tile corners.
    #[default]
    Dots,
    /// A center cross with smaller crosses in the tile corners.
    Crosses,
    /// A five-pointed star with smaller stars in the tile corners.
    Stars,
}

/// A colored motif tiled over the surface.
#[derive(Clone, Copy, Debug, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Pattern {
    /// Tile motif.
    #[serde(rename = "type")]
    pub kind: PatternKind,
    /// Motif color.
    #[serde(with = "css_color")]
    pub color: Color,
    /// Opacity of the tiled layer.
    pub opacity: f32,
    /// Tile scale; `1.0` is a 20px tile.
    pub scale: f32,
}

impl Default for Pattern {
    fn default() -> Self {
        Self {
            kind: PatternKind::Dots,
            color: DEFAULT_INK,
            opacity: 0.1,
            scale: 1.0,
        }
    }
}

/// Smallest and largest tile scale.
pub const SCALE_RANGE: (f32, f32) = (0.25, 8.0);

impl QuoteMarks {
    /// Clamps numeric fields into range.
    #[must_use]
    pub fn sanitized(self) -> Self {
        Self {
            size: clamp_or(self.size, 8.0, 400.0, Self::default().size),
            ..self
        }
    }
}

impl Border {
    /// Clamps numeric fields into range.
    #[must_use]
    pub fn sanitized(self) -> Self {
        let d = Self::default();
        Self {
            width: clamp_or(self.width, 0.5, 50.0, d.width),
            radius: clamp_or(self.radius, 0.0, 200.0, d.radius),
            ..self
        }
    }
}

impl Watermark {
    /// Clamps numeric fields into range.
    #[must_use]
    pub fn sanitized(self) -> Self {
        let d = Self::default();
        Self {
            opacity: clamp_or(self.opacity, 0.0, 1.0, d.opacity),
            angle: if self.angle.is_finite() {
                self.angle % 360.0
            } else {
                d.angle
            },
            text: self.text,
        }
    }
}

impl Texture {
    /// Clamps numeric fields into range.
    #[must_use]
    pub fn sanitized(self) -> Self {
        let d = Self::default();
        Self {
            opacity: clamp_or(self.opacity, 0.0, 1.0, d.opacity),
            scale: clamp_or(self.scale, SCALE_RANGE.0, SCALE_RANGE.1, d.scale),
            ..self
        }
    }
}

impl Corner {
    /// Clamps numeric fields into range.
    #[must_use]
    pub fn sanitized(self) -> Self {
        Self {
            size: clamp_or(self.size, 4.0, 400.0, Self::default().size),
            ..self
        }
    }
}

impl Pattern {
    /// Clamps numeric fields into range.
    #[must_use]
    pub fn sanitized(self) -> Self {
        let d = Self::default();
        Self {
            opacity: clamp_or(self.opacity, 0.0, 1.0, d.opacity),
            scale: clamp_or(self.scale, SCALE_RANGE.0, SCALE_RANGE.1, d.scale),
            ..self
        }
    }
}
