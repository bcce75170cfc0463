// Copyright 2026 the Inkcard Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Inkcard Style: everything a render needs to know besides the text.
//!
//! A [`StyleConfig`] is a plain value. Editing goes through [`StyleChange`]
//! commands, each of which produces a new configuration via
//! [`StyleConfig::applied`]; a render is a pure function of the configuration,
//! the text and the registered resources.
//!
//! Values are stored as given and clamped on use with
//! [`StyleConfig::sanitized`], so an out-of-range value never fails a render.
//!
//! Configurations serialize to JSON with CSS color strings, using the same
//! camel-case keys as stored history entries:
//!
//! ```rust
//! use inkcard_style::{StyleConfig, Template};
//!
//! let style = Template::Literary.apply(&StyleConfig::default());
//! let json = style.to_json().unwrap();
//! assert!(json.contains("\"fontFamily\": \"Georgia\""));
//! assert_eq!(StyleConfig::from_json(&json).unwrap(), style);
//! ```

mod change;
mod template;

use inkcard_decor::DecorationSet;
use inkcard_filters::FilterParams;
use inkcard_surface::css_color;
use peniko::Color;
use serde::{Deserialize, Serialize};
use thiserror::Error;

pub use change::StyleChange;
pub use template::Template;

/// Errors from loading or saving configuration.
#[derive(Debug, Error)]
pub enum ConfigError {
    /// The JSON could not be read or written.
    #[error("invalid style json: {0}")]
    Json(#[from] serde_json::Error),
    /// No template has this name.
    #[error("unknown template {0:?}")]
    UnknownTemplate(String),
}

/// Horizontal placement of each line inside the padding.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum TextAlign {
    /// Flush with the left padding.
    #[default]
    Left,
    /// Centered on the surface.
    Center,
    /// Flush with the right padding.
    Right,
}

/// How a background image is mapped onto the surface.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum FitMode {
    /// Scale to fill, keeping the aspect ratio; overflow is centered and cut.
    #[default]
    Cover,
    /// Scale to fit, keeping the aspect ratio; the rest stays background color.
    Contain,
    /// Tile at native size from the top-left corner.
    Repeat,
}

/// Background color and optional image.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct Background {
    /// Color the surface is cleared to.
    #[serde(with = "css_color")]
    pub color: Color,
    /// Key of a registered background image.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub image: Option<String>,
    /// How the image is fitted.
    pub fit: FitMode,
    /// Opacity of the image layer.
    pub opacity: f32,
}

impl Default for Background {
    fn default() -> Self {
        Self {
            color: Color::WHITE,
            image: None,
            fit: FitMode::Cover,
            opacity: 1.0,
        }
    }
}

/// A complete render style.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct StyleConfig {
    /// Requested font family.
    pub font_family: String,
    /// Font size in pixels.
    pub font_size: f32,
    /// Line height as a multiple of the font size.
    pub line_height: f32,
    /// Line alignment.
    pub text_align: TextAlign,
    /// Text color.
    #[serde(with = "css_color")]
    pub text_color: Color,
    /// Space between the surface edges and the text block, in pixels.
    pub padding: f32,
    /// Radius of the rounded-corner mask; `0` keeps square corners.
    pub border_radius: f32,
    /// Background color and image.
    pub background: Background,
    /// Filters applied after composition.
    pub filters: FilterParams,
    /// Decorative overlays.
    pub decorations: DecorationSet,
}

impl Default for StyleConfig {
    fn default() -> Self {
        Self {
            font_family: "Arial".to_owned(),
            font_size: 24.0,
            line_height: 1.5,
            text_align: TextAlign::Left,
            text_color: Color::BLACK,
            padding: 40.0,
            border_radius: 0.0,
            background: Background::default(),
            filters: FilterParams::default(),
            decorations: DecorationSet::default(),
        }
    }
}

/// Valid font sizes, in pixels.
pub const FONT_SIZE_RANGE: (f32, f32) = (8.0, 200.0);
/// Valid line height multipliers.
pub const LINE_HEIGHT_RANGE: (f32, f32) = (0.5, 4.0);
/// Valid paddings, in pixels.
pub const PADDING_RANGE: (f32, f32) = (0.0, 400.0);
/// Valid corner radii, in pixels.
pub const RADIUS_RANGE: (f32, f32) = (0.0, 200.0);

fn clamp_or(value: f32, (min, max): (f32, f32), fallback: f32) -> f32 {
    if value.is_finite() {
        value.clamp(min, max)
    } else {
        fallback
    }
}

impl StyleConfig {
    /// The configuration with every numeric field clamped into range.
    ///
    /// Non-finite values are replaced by the field's default. A blank font
    /// family becomes the default family.
    #[must_use]
    pub fn sanitized(&self) -> Self {
        let d = Self::default();
        let font_family = if self.font_family.trim().is_empty() {
            d.font_family
        } else {
            self.font_family.trim().to_owned()
        };
        let clean = Self {
            font_family,
            font_size: clamp_or(self.font_size, FONT_SIZE_RANGE, d.font_size),
            line_height: clamp_or(self.line_height, LINE_HEIGHT_RANGE, d.line_height),
            text_align: self.text_align,
            text_color: self.text_color,
            padding: clamp_or(self.padding, PADDING_RANGE, d.padding),
            border_radius: clamp_or(self.border_radius, RADIUS_RANGE, d.border_radius),
            background: Background {
                opacity: clamp_or(self.background.opacity, (0.0, 1.0), d.background.opacity),
                ..self.background.clone()
            },
            filters: self.filters.sanitized(),
            decorations: self.decorations.sanitized(),
        };
        if clean != *self {
            tracing::debug!("clamped out-of-range style values");
        }
        clean
    }

    /// Applies one change, returning the new configuration.
    #[must_use]
    pub fn applied(mut self, change: StyleChange) -> Self {
        change.apply_to(&mut self);
        self
    }

    /// Parses a configuration from JSON; missing fields take their defaults.
    pub fn from_json(json: &str) -> Result<Self, ConfigError> {
        Ok(serde_json::from_str(json)?)
    }

    /// Serializes the configuration as pretty-printed JSON.
    pub fn to_json(&self) -> Result<String, ConfigError> {
        Ok(serde_json::to_string_pretty(self)?)
    }

    /// Reads a configuration from a JSON stream.
    pub fn read_from(reader: impl std::io::Read) -> Result<Self, ConfigError> {
        Ok(serde_json::from_reader(reader)?)
    }

    /// Writes the configuration as JSON to a stream.
    pub fn write_to(&self, writer: impl std::io::Write) -> Result<(), ConfigError> {
        Ok(serde_json::to_writer_pretty(writer, self)?)
    }
}
