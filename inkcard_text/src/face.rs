// Copyright 2026 the Inkcard Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

use inkcard_layout::FontMetrics;
use kurbo::{Point, Rect};
use peniko::{Color, FontData};
use skrifa::instance::{LocationRef, Size};
use skrifa::{FontRef, GlyphId, MetadataProvider};
use unicode_width::UnicodeWidthChar;
use vello_cpu::{Glyph, RenderContext};

/// Advance used when a font has no metrics for a glyph, in ems.
const FALLBACK_ADVANCE_EM: f32 = 0.6;

/// Ascent and descent of the built-in face, in ems.
const BUILTIN_ASCENT_EM: f32 = 0.8;
const BUILTIN_DESCENT_EM: f32 = 0.2;

#[derive(Clone, Debug)]
enum Source {
    Font(FontData),
    /// No font data: glyphs are drawn as filled boxes on a cell grid.
    Builtin,
}

/// A font at a concrete pixel size, ready to measure and draw.
///
/// Layout is a simple horizontal advance walk using the font's own glyph
/// metrics; no shaping is performed. Characters the font does not map are
/// drawn with its `.notdef` glyph.
#[derive(Clone, Debug)]
pub struct ScaledFace {
    source: Source,
    size: f32,
    line_height: f32,
    ascent: f32,
    descent: f32,
}

impl ScaledFace {
    /// The built-in face, used when no registered font is available.
    ///
    /// Narrow characters advance by `0.6em`, wide (East Asian) characters by
    /// `1em`, and zero-width or control characters not at all.
    pub fn builtin(size: f32, line_height_factor: f32) -> Self {
        Self {
            source: Source::Builtin,
            size,
            line_height: size * line_height_factor,
            ascent: size * BUILTIN_ASCENT_EM,
            descent: size * BUILTIN_DESCENT_EM,
        }
    }

    /// Wraps already validated font data.
    pub(crate) fn from_font(font: FontData, size: f32, line_height_factor: f32) -> Self {
        let builtin = Self::builtin(size, line_height_factor);
        let Ok(font_ref) = FontRef::from_index(font.data.data(), font.index) else {
            return builtin;
        };
        let metrics = font_ref.metrics(Size::new(size), LocationRef::default());
        Self {
            source: Source::Font(font),
            ascent: metrics.ascent,
            descent: -metrics.descent,
            ..builtin
        }
    }

    /// Font size in pixels.
    pub fn size(&self) -> f32 {
        self.size
    }

    /// Returns `true` for the built-in box face.
    pub fn is_builtin(&self) -> bool {
        matches!(self.source, Source::Builtin)
    }

    /// Distance from the baseline to the top of the tallest glyphs.
    pub fn ascent(&self) -> f32 {
        self.ascent
    }

    /// Distance from the baseline down to the lowest descender, positive.
    pub fn descent(&self) -> f32 {
        self.descent
    }

    /// Baseline for a line box whose top edge is at `top`.
    ///
    /// The glyph extent (ascent plus descent) is centered in the line box.
    pub fn baseline_in_box(&self, top: f32) -> f32 {
        top + (self.line_height - (self.ascent + self.descent)) / 2.0 + self.ascent
    }

    /// Visits every character of `text` with its glyph id and advance.
    fn for_each_glyph(&self, text: &str, mut visit: impl FnMut(char, GlyphId, f32)) {
        if let Source::Font(font) = &self.source
            && let Ok(font_ref) = FontRef::from_index(font.data.data(), font.index)
        {
            let charmap = font_ref.charmap();
            let metrics = font_ref.glyph_metrics(Size::new(self.size), LocationRef::default());
            for ch in text.chars() {
                let gid = charmap.map(ch).unwrap_or(GlyphId::NOTDEF);
                let advance = metrics
                    .advance_width(gid)
                    .unwrap_or(self.size * FALLBACK_ADVANCE_EM);
                visit(ch, gid, advance);
            }
            return;
        }
        for ch in text.chars() {
            let advance = match ch.width() {
                Some(0) | None => 0.0,
                Some(1) => self.size * FALLBACK_ADVANCE_EM,
                Some(_) => self.size,
            };
            visit(ch, GlyphId::NOTDEF, advance);
        }
    }

    /// Draws `text` with its baseline starting at `origin`, in `color`.
    ///
    /// Positions are in the user space of the context's current transform.
    #[allow(
        clippy::cast_possible_truncation,
        reason = "glyph positions are f32 in the rasterizer"
    )]
    pub fn draw(&self, ctx: &mut RenderContext, text: &str, origin: Point, color: Color) {
        ctx.set_paint(color);
        let mut pen = origin.x as f32;
        let baseline = origin.y as f32;
        match &self.source {
            Source::Font(font) => {
                let mut glyphs = Vec::with_capacity(text.len());
                self.for_each_glyph(text, |_, gid, advance| {
                    glyphs.push(Glyph {
                        id: gid.to_u32(),
                        x: pen,
                        y: baseline,
                    });
                    pen += advance;
                });
                if !glyphs.is_empty() {
                    ctx.glyph_run(font)
                        .font_size(self.size)
                        .hint(true)
                        .fill_glyphs(glyphs.into_iter());
                }
            }
            Source::Builtin => {
                let top = f64::from(baseline - self.ascent * 0.85);
                self.for_each_glyph(text, |ch, _, advance| {
                    if !ch.is_whitespace() && advance > 0.0 {
                        let inset = advance * 0.1;
                        ctx.fill_rect(&Rect::new(
                            f64::from(pen + inset),
                            top,
                            f64::from(pen + advance - inset),
                            f64::from(baseline),
                        ));
                    }
                    pen += advance;
                });
            }
        }
    }
}

impl FontMetrics for ScaledFace {
    fn measure(&self, text: &str) -> f32 {
        let mut width = 0.0;
        self.for_each_glyph(text, |_, _, advance| width += advance);
        width
    }

    fn line_height(&self) -> f32 {
        self.line_height
    }
}
