// Copyright 2026 the Inkcard Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Inkcard Decor: decorative overlays drawn between the background and the text.
//!
//! There are six motif kinds, listed by [`DecorationKind`]. A
//! [`DecorationSet`] holds one option record per kind and a set of enabled
//! kinds, so enabling a kind twice never stacks two copies of it; setting a
//! [`Decoration`] replaces the previous options for that kind.
//!
//! [`DecorationRenderer`] draws the enabled motifs into a `vello_cpu`
//! [`RenderContext`](vello_cpu::RenderContext) in the fixed order of
//! [`DecorationKind::ALL`]. Repeating motifs (texture and pattern) are drawn
//! once into a small tile which is then used as a repeating image paint;
//! tiles are memoized in a [`TileCache`].
//!
//! ```rust
//! use inkcard_decor::{Border, BorderStyle, Decoration, DecorationKind, DecorationSet};
//!
//! let mut set = DecorationSet::new();
//! set.set(Decoration::Border(Border {
//!     style: BorderStyle::Dashed,
//!     ..Border::default()
//! }));
//! set.enable(DecorationKind::Watermark);
//! let kinds: Vec<_> = set.active().map(|d| d.kind()).collect();
//! assert_eq!(kinds, [DecorationKind::Border, DecorationKind::Watermark]);
//! ```

pub mod geometry;
mod options;
mod render;
mod tile;

use serde::{Deserialize, Serialize};

pub use options::{
    Border, BorderStyle, Corner, CornerStyle, DEFAULT_INK, Pattern, PatternKind, QuoteMarks,
    QuotePosition, SCALE_RANGE, Texture, TexturePattern, Watermark,
};
pub use render::{DecorationRenderer, FontSubstitution};
pub use tile::{BASE_TILE, Motif, TileCache, TileKey};

/// One of the six motif kinds.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum DecorationKind {
    /// A large quotation mark.
    QuoteMarks,
    /// An inset rectangle.
    Border,
    /// Repeated rotated text.
    Watermark,
    /// A faint repeating texture.
    Texture,
    /// Ornaments in the four corners.
    Corner,
    /// A colored repeating pattern.
    Pattern,
}

impl DecorationKind {
    /// Every kind, in draw order.
    pub const ALL: [Self; 6] = [
        Self::QuoteMarks,
        Self::Border,
        Self::Watermark,
        Self::Texture,
        Self::Corner,
        Self::Pattern,
    ];

    /// The flag for this kind.
    pub const fn flag(self) -> DecorationKinds {
        match self {
            Self::QuoteMarks => DecorationKinds::QUOTE_MARKS,
            Self::Border => DecorationKinds::BORDER,
            Self::Watermark => DecorationKinds::WATERMARK,
            Self::Texture => DecorationKinds::TEXTURE,
            Self::Corner => DecorationKinds::CORNER,
            Self::Pattern => DecorationKinds::PATTERN,
        }
    }
}

bitflags::bitflags! {
    /// A set of decoration kinds.
    #[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
    pub struct DecorationKinds: u8 {
        /// [`DecorationKind::QuoteMarks`].
        const QUOTE_MARKS = 0b0000_0001;
        /// [`DecorationKind::Border`].
        const BORDER      = 0b0000_0010;
        /// [`DecorationKind::Watermark`].
        const WATERMARK   = 0b0000_0100;
        /// [`DecorationKind::Texture`].
        const TEXTURE     = 0b0000_1000;
        /// [`DecorationKind::Corner`].
        const CORNER      = 0b0001_0000;
        /// [`DecorationKind::Pattern`].
        const PATTERN     = 0b0010_0000;
    }
}

impl Default for DecorationKinds {
    fn default() -> Self {
        Self::empty()
    }
}

/// A motif together with its options.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(tag = "kind", rename_all = "kebab-case")]
pub enum Decoration {
    /// See [`QuoteMarks`].
    QuoteMarks(QuoteMarks),
    /// See [`Border`].
    Border(Border),
    /// See [`Watermark`].
    Watermark(Watermark),
    /// See [`Texture`].
    Texture(Texture),
    /// See [`Corner`].
    Corner(Corner),
    /// See [`Pattern`].
    Pattern(Pattern),
}

impl Decoration {
    /// The kind of this decoration.
    pub fn kind(&self) -> DecorationKind {
        match self {
            Self::QuoteMarks(_) => DecorationKind::QuoteMarks,
            Self::Border(_) => DecorationKind::Border,
            Self::Watermark(_) => DecorationKind::Watermark,
            Self::Texture(_) => DecorationKind::Texture,
            Self::Corner(_) => DecorationKind::Corner,
            Self::Pattern(_) => DecorationKind::Pattern,
        }
    }

    /// The same decoration with numeric options clamped into range.
    #[must_use]
    pub fn sanitized(self) -> Self {
        match self {
            Self::QuoteMarks(o) => Self::QuoteMarks(o.sanitized()),
            Self::Border(o) => Self::Border(o.sanitized()),
            Self::Watermark(o) => Self::Watermark(o.sanitized()),
            Self::Texture(o) => Self::Texture(o.sanitized()),
            Self::Corner(o) => Self::Corner(o.sanitized()),
            Self::Pattern(o) => Self::Pattern(o.sanitized()),
        }
    }
}

/// Option records for every kind, whether enabled or not.
#[derive(Clone, Debug, Default, PartialEq, Serialize, Deserialize)]
#[serde(default, rename_all = "kebab-case")]
pub struct DecorationOptions {
    /// Options for [`DecorationKind::QuoteMarks`].
    pub quote_marks: QuoteMarks,
    /// Options for [`DecorationKind::Border`].
    pub border: Border,
    /// Options for [`DecorationKind::Watermark`].
    pub watermark: Watermark,
    /// Options for [`DecorationKind::Texture`].
    pub texture: Texture,
    /// Options for [`DecorationKind::Corner`].
    pub corner: Corner,
    /// Options for [`DecorationKind::Pattern`].
    pub pattern: Pattern,
}

impl DecorationOptions {
    /// The options for `kind`, wrapped as a [`Decoration`].
    pub fn get(&self, kind: DecorationKind) -> Decoration {
        match kind {
            DecorationKind::QuoteMarks => Decoration::QuoteMarks(self.quote_marks),
            DecorationKind::Border => Decoration::Border(self.border),
            DecorationKind::Watermark => Decoration::Watermark(self.watermark.clone()),
            DecorationKind::Texture => Decoration::Texture(self.texture),
            DecorationKind::Corner => Decoration::Corner(self.corner),
            DecorationKind::Pattern => Decoration::Pattern(self.pattern),
        }
    }

    /// Replaces the options for the decoration's kind.
    pub fn set(&mut self, decoration: Decoration) {
        match decoration {
            Decoration::QuoteMarks(o) => self.quote_marks = o,
            Decoration::Border(o) => self.border = o,
            Decoration::Watermark(o) => self.watermark = o,
            Decoration::Texture(o) => self.texture = o,
            Decoration::Corner(o) => self.corner = o,
            Decoration::Pattern(o) => self.pattern = o,
        }
    }
}

/// Enabled decoration kinds and their options.
#[derive(Clone, Debug, Default, PartialEq, Serialize, Deserialize)]
#[serde(from = "DecorationSetRepr", into = "DecorationSetRepr")]
pub struct DecorationSet {
    enabled: DecorationKinds,
    options: DecorationOptions,
}

impl DecorationSet {
    /// Creates a set with nothing enabled and default options.
    pub fn new() -> Self {
        Self::default()
    }

    /// Stores `decoration` as the options for its kind and enables the kind.
    pub fn set(&mut self, decoration: Decoration) {
        self.enabled |= decoration.kind().flag();
        self.options.set(decoration);
    }

    /// Builder form of [`DecorationSet::set`].
    #[must_use]
    pub fn with(mut self, decoration: Decoration) -> Self {
        self.set(decoration);
        self
    }

    /// Enables `kind` with its current options.
    pub fn enable(&mut self, kind: DecorationKind) {
        self.enabled |= kind.flag();
    }

    /// Disables `kind`, keeping its options for later.
    pub fn disable(&mut self, kind: DecorationKind) {
        self.enabled.remove(kind.flag());
    }

    /// Enables or disables `kind`; returns whether it is now enabled.
    pub fn toggle(&mut self, kind: DecorationKind) -> bool {
        self.enabled.toggle(kind.flag());
        self.is_enabled(kind)
    }

    /// Returns `true` if `kind` is enabled.
    pub fn is_enabled(&self, kind: DecorationKind) -> bool {
        self.enabled.contains(kind.flag())
    }

    /// The enabled kinds.
    pub fn enabled(&self) -> DecorationKinds {
        self.enabled
    }

    /// Returns `true` if nothing is enabled.
    pub fn is_empty(&self) -> bool {
        self.enabled.is_empty()
    }

    /// Option records for all kinds.
    pub fn options(&self) -> &DecorationOptions {
        &self.options
    }

    /// Mutable option records; changes apply to enabled kinds on the next render.
    pub fn options_mut(&mut self) -> &mut DecorationOptions {
        &mut self.options
    }

    /// The enabled decorations, in draw order.
    pub fn active(&self) -> impl Iterator<Item = Decoration> + '_ {
        DecorationKind::ALL
            .into_iter()
            .filter(|kind| self.is_enabled(*kind))
            .map(|kind| self.options.get(kind))
    }

    /// The same set with every option record clamped into range.
    #[must_use]
    pub fn sanitized(&self) -> Self {
        let mut options = DecorationOptions::default();
        for kind in DecorationKind::ALL {
            options.set(self.options.get(kind).sanitized());
        }
        Self {
            enabled: self.enabled,
            options,
        }
    }
}

#[derive(Default, Serialize, Deserialize)]
#[serde(default)]
struct DecorationSetRepr {
    enabled: Vec<DecorationKind>,
    options: DecorationOptions,
}

impl From<DecorationSetRepr> for DecorationSet {
    fn from(repr: DecorationSetRepr) -> Self {
        Self {
            enabled: repr
                .enabled
                .into_iter()
                .fold(DecorationKinds::empty(), |acc, kind| acc | kind.flag()),
            options: repr.options,
        }
    }
}

impl From<DecorationSet> for DecorationSetRepr {
    fn from(set: DecorationSet) -> Self {
        Self {
            enabled: DecorationKind::ALL
                .into_iter()
                .filter(|kind| set.is_enabled(*kind))
                .collect(),
            options: set.options,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use peniko::Color;

    #[test]
    fn active_follows_draw_order() {
        let set = DecorationSet::new()
            .with(Decoration::Pattern(Pattern::default()))
            .with(Decoration::QuoteMarks(QuoteMarks::default()))
            .with(Decoration::Corner(Corner::default()));
        let kinds: Vec<_> = set.active().map(|d| d.kind()).collect();
        assert_eq!(
            kinds,
            [
                DecorationKind::QuoteMarks,
                DecorationKind::Corner,
                DecorationKind::Pattern
            ]
        );
    }

    #[test]
    fn setting_a_kind_twice_replaces_it() {
        let mut set = DecorationSet::new();
        set.set(Decoration::Border(Border {
            width: 4.0,
            ..Border::default()
        }));
        set.set(Decoration::Border(Border {
            width: 6.0,
            ..Border::default()
        }));
        let active: Vec<_> = set.active().collect();
        assert_eq!(active.len(), 1);
        assert!(matches!(active[0], Decoration::Border(Border { width: 6.0, .. })));
    }

    #[test]
    fn disable_keeps_options() {
        let mut set = DecorationSet::new().with(Decoration::Corner(Corner {
            size: 12.0,
            ..Corner::default()
        }));
        set.disable(DecorationKind::Corner);
        assert!(set.is_empty());
        assert!(set.toggle(DecorationKind::Corner));
        assert_eq!(set.options().corner.size, 12.0);
        assert!(!set.toggle(DecorationKind::Corner));
    }

    #[test]
    fn json_round_trip_and_shape() {
        let set = DecorationSet::new()
            .with(Decoration::Watermark(Watermark {
                text: "draft".into(),
                ..Watermark::default()
            }))
            .with(Decoration::Pattern(Pattern {
                kind: PatternKind::Stars,
                color: Color::from_rgb8(0x12, 0x34, 0x56),
                ..Pattern::default()
            }));
        let json = serde_json::to_value(&set).unwrap();
        assert_eq!(json["enabled"], serde_json::json!(["watermark", "pattern"]));
        assert_eq!(json["options"]["pattern"]["type"], "stars");
        assert_eq!(json["options"]["pattern"]["color"], "#123456");
        assert_eq!(json["options"]["quote-marks"]["position"], "top-left");

        let back: DecorationSet = serde_json::from_value(json).unwrap();
        assert_eq!(back, set);
    }

    #[test]
    fn sparse_json_fills_defaults() {
        let set: DecorationSet =
            serde_json::from_str(r#"{"enabled":["border"],"options":{"border":{"width":5}}}"#)
                .unwrap();
        assert!(set.is_enabled(DecorationKind::Border));
        assert_eq!(set.options().border.width, 5.0);
        assert_eq!(set.options().border.color, DEFAULT_INK);
        assert_eq!(set.options().corner, Corner::default());
    }

    #[test]
    fn tagged_decoration_json() {
        let d: Decoration =
            serde_json::from_str(r#"{"kind":"corner","style":"floral","size":30}"#).unwrap();
        assert_eq!(
            d,
            Decoration::Corner(Corner {
                style: CornerStyle::Floral,
                size: 30.0,
                ..Corner::default()
            })
        );
    }

    #[test]
    fn sanitized_clamps_every_record() {
        let mut set = DecorationSet::new();
        set.options_mut().texture.scale = 1000.0;
        set.options_mut().watermark.opacity = f32::NAN;
        set.options_mut().border.width = -3.0;
        let clean = set.sanitized();
        assert_eq!(clean.options().texture.scale, SCALE_RANGE.1);
        assert_eq!(clean.options().watermark.opacity, 0.1);
        assert_eq!(clean.options().border.width, 0.5);
    }
}
