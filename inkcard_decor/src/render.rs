// Copyright 2026 the Inkcard Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

use inkcard_layout::FontMetrics;
use inkcard_text::{FaceSource, FontRegistry};
use kurbo::{Affine, Rect, Shape, Stroke};
use peniko::Color;
use vello_cpu::RenderContext;

use crate::geometry::{
    WATERMARK_SIZE, border_path, corner_frames, corner_ornament, quote_origin, watermark_origins,
};
use crate::tile::{Motif, TileCache, TileKey};
use crate::{
    Border, BorderStyle, Corner, Decoration, DecorationKind, DecorationSet, Pattern, QuoteMarks,
    Texture, Watermark,
};

/// Family the quote glyph is drawn in.
const QUOTE_FAMILY: &str = "Georgia";

/// Family watermark text is drawn in.
const WATERMARK_FAMILY: &str = "Arial";

/// Stroke width of corner ornaments.
const CORNER_STROKE: f64 = 2.0;

/// A text motif that was drawn with a substitute face.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct FontSubstitution {
    /// Motif that drew the text.
    pub kind: DecorationKind,
    /// Family the motif asked for.
    pub requested: &'static str,
    /// Where the face actually came from; never [`FaceSource::Requested`].
    pub source: FaceSource,
}

/// Draws decoration sets into a render context.
///
/// The renderer owns the tile cache, so keeping one renderer alive across
/// frames avoids redrawing texture and pattern tiles.
#[derive(Debug, Default)]
pub struct DecorationRenderer {
    tiles: TileCache,
}

impl DecorationRenderer {
    /// Creates a renderer with an empty tile cache.
    pub fn new() -> Self {
        Self::default()
    }

    /// The tile cache.
    pub fn tiles(&self) -> &TileCache {
        &self.tiles
    }

    /// Drops every cached tile.
    pub fn clear_tiles(&mut self) {
        self.tiles.clear();
    }

    /// Draws every enabled decoration in `set`, in draw order.
    ///
    /// Options are sanitized first. Text motifs resolve their family through
    /// `fonts` and fall back the same way body text does; each fallback is
    /// returned so the caller can report it. The context's transform and
    /// paint transform are left at identity.
    pub fn render(
        &mut self,
        ctx: &mut RenderContext,
        set: &DecorationSet,
        fonts: &FontRegistry,
    ) -> Vec<FontSubstitution> {
        let width = f64::from(ctx.width());
        let height = f64::from(ctx.height());
        let mut substitutions = Vec::new();
        for decoration in set.active() {
            let decoration = decoration.sanitized();
            tracing::trace!(kind = ?decoration.kind(), "drawing decoration");
            ctx.reset_transform();
            ctx.reset_paint_transform();
            let used = match &decoration {
                Decoration::QuoteMarks(o) => Some(quote(ctx, o, fonts, width, height)),
                Decoration::Border(o) => {
                    border(ctx, o, width, height);
                    None
                }
                Decoration::Watermark(o) => watermark(ctx, o, fonts, width, height),
                Decoration::Texture(o) => {
                    self.texture(ctx, o, width, height);
                    None
                }
                Decoration::Corner(o) => {
                    corner(ctx, o, width, height);
                    None
                }
                Decoration::Pattern(o) => {
                    self.pattern(ctx, o, width, height);
                    None
                }
            };
            if let Some((requested, source)) = used.filter(|(_, s)| *s != FaceSource::Requested) {
                substitutions.push(FontSubstitution {
                    kind: decoration.kind(),
                    requested,
                    source,
                });
            }
        }
        ctx.reset_transform();
        ctx.reset_paint_transform();
        substitutions
    }

    fn texture(&mut self, ctx: &mut RenderContext, o: &Texture, width: f64, height: f64) {
        let key = TileKey::new(Motif::Texture(o.pattern), Color::BLACK, o.scale);
        self.tile_fill(ctx, key, o.opacity, width, height);
    }

    fn pattern(&mut self, ctx: &mut RenderContext, o: &Pattern, width: f64, height: f64) {
        let key = TileKey::new(Motif::Pattern(o.kind), o.color, o.scale);
        self.tile_fill(ctx, key, o.opacity, width, height);
    }

    fn tile_fill(
        &mut self,
        ctx: &mut RenderContext,
        key: TileKey,
        opacity: f32,
        width: f64,
        height: f64,
    ) {
        if opacity <= 0.0 {
            return;
        }
        let image = self.tiles.get_or_render(key);
        ctx.set_paint(image);
        ctx.push_opacity_layer(opacity);
        ctx.fill_rect(&Rect::new(0.0, 0.0, width, height));
        ctx.pop_layer();
    }
}

/// Returns the family asked for and where the face came from.
fn quote(
    ctx: &mut RenderContext,
    o: &QuoteMarks,
    fonts: &FontRegistry,
    width: f64,
    height: f64,
) -> (&'static str, FaceSource) {
    let resolved = fonts.face(QUOTE_FAMILY, o.size, 1.0);
    let face = resolved.face;
    let glyph = o.position.glyph();
    let advance = f64::from(face.measure(glyph));
    let origin = quote_origin(o.position, width, height, f64::from(o.size), advance);
    face.draw(ctx, glyph, origin, o.color);
    (QUOTE_FAMILY, resolved.source)
}

fn border(ctx: &mut RenderContext, o: &Border, width: f64, height: f64) {
    let w = f64::from(o.width);
    let radius = f64::from(o.radius);
    ctx.set_paint(o.color);
    match o.style {
        BorderStyle::Solid => {
            ctx.set_stroke(Stroke::new(w));
            ctx.stroke_path(&border_path(width, height, 0.0, radius));
        }
        BorderStyle::Dashed => {
            ctx.set_stroke(Stroke::new(w).with_dashes(0.0, [3.0 * w, 2.0 * w]));
            ctx.stroke_path(&border_path(width, height, 0.0, radius));
        }
        BorderStyle::Double => {
            ctx.set_stroke(Stroke::new(w));
            ctx.stroke_path(&border_path(width, height, -w, radius));
            ctx.stroke_path(&border_path(width, height, w, radius));
        }
    }
}

fn watermark(
    ctx: &mut RenderContext,
    o: &Watermark,
    fonts: &FontRegistry,
    width: f64,
    height: f64,
) -> Option<(&'static str, FaceSource)> {
    if o.text.trim().is_empty() || o.opacity <= 0.0 {
        return None;
    }
    let resolved = fonts.face(WATERMARK_FAMILY, WATERMARK_SIZE, 1.0);
    let face = resolved.face;
    let advance = f64::from(face.measure(&o.text));
    let transform = Affine::rotate(f64::from(o.angle).to_radians());
    let color = Color::BLACK.with_alpha(o.opacity);
    ctx.set_transform(transform);
    for origin in watermark_origins(transform, width, height, advance) {
        face.draw(ctx, &o.text, origin, color);
    }
    Some((WATERMARK_FAMILY, resolved.source))
}

fn corner(ctx: &mut RenderContext, o: &Corner, width: f64, height: f64) {
    let (path, dot) = corner_ornament(o.style, f64::from(o.size));
    let dot = dot.map(|c| c.to_path(0.1));
    ctx.set_paint(o.color);
    ctx.set_stroke(Stroke::new(CORNER_STROKE));
    for frame in corner_frames(width, height) {
        ctx.set_transform(frame);
        ctx.stroke_path(&path);
        if let Some(dot) = &dot {
            ctx.fill_path(dot);
        }
    }
}
