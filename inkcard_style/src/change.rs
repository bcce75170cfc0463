// Copyright 2026 the Inkcard Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

use inkcard_decor::{Decoration, DecorationKind};
use inkcard_filters::{FilterParams, FilterPreset};
use inkcard_surface::css_color::CssColor;
use serde::{Deserialize, Serialize};

use crate::{FitMode, StyleConfig, Template, TextAlign};

/// One edit to a [`StyleConfig`].
///
/// Editing surfaces send these instead of mutating a shared configuration;
/// see [`StyleConfig::applied`]. Values are stored as sent and clamped when
/// the style is sanitized for a render.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(tag = "type", content = "value", rename_all = "kebab-case")]
pub enum StyleChange {
    /// Requested font family.
    FontFamily(String),
    /// Font size in pixels.
    FontSize(f32),
    /// Line height multiplier.
    LineHeight(f32),
    /// Line alignment.
    TextAlign(TextAlign),
    /// Text color.
    TextColor(CssColor),
    /// Padding in pixels.
    Padding(f32),
    /// Rounded-corner mask radius in pixels.
    BorderRadius(f32),
    /// Background color.
    BackgroundColor(CssColor),
    /// Key of a registered background image, or `None` to remove it.
    BackgroundImage(Option<String>),
    /// Background image fit mode.
    BackgroundFit(FitMode),
    /// Background image opacity.
    BackgroundOpacity(f32),
    /// Replaces all filter parameters.
    Filters(FilterParams),
    /// Replaces all filter parameters with a preset.
    FilterPreset(FilterPreset),
    /// Stores options for a decoration kind and enables it.
    SetDecoration(Decoration),
    /// Enables a decoration kind with its current options.
    EnableDecoration(DecorationKind),
    /// Disables a decoration kind, keeping its options.
    DisableDecoration(DecorationKind),
    /// Applies a named template.
    Template(Template),
}

impl StyleChange {
    pub(crate) fn apply_to(self, style: &mut StyleConfig) {
        match self {
            Self::FontFamily(family) => style.font_family = family,
            Self::FontSize(size) => style.font_size = size,
            Self::LineHeight(factor) => style.line_height = factor,
            Self::TextAlign(align) => style.text_align = align,
            Self::TextColor(color) => style.text_color = color.into(),
            Self::Padding(padding) => style.padding = padding,
            Self::BorderRadius(radius) => style.border_radius = radius,
            Self::BackgroundColor(color) => style.background.color = color.into(),
            Self::BackgroundImage(key) => style.background.image = key,
            Self::BackgroundFit(fit) => style.background.fit = fit,
            Self::BackgroundOpacity(opacity) => style.background.opacity = opacity,
            Self::Filters(params) => style.filters = params,
            Self::FilterPreset(preset) => style.filters = preset.params(),
            Self::SetDecoration(decoration) => style.decorations.set(decoration),
            Self::EnableDecoration(kind) => style.decorations.enable(kind),
            Self::DisableDecoration(kind) => style.decorations.disable(kind),
            Self::Template(template) => *style = template.apply(style),
        }
    }
}
