// Copyright 2026 the Inkcard Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Procedurally drawn repeating tiles and their cache.

use std::sync::Arc;

use hashbrown::HashMap;
use kurbo::{Circle, Line, Point, Rect, Shape, Stroke};
use peniko::{Color, Extend, ImageQuality, ImageSampler};
use vello_cpu::color::Rgba8;
use vello_cpu::{Image, ImageSource, Pixmap, RenderContext};

use crate::geometry::star;
use crate::options::{PatternKind, TexturePattern};

/// Edge length of a tile at scale `1.0`.
pub const BASE_TILE: f32 = 20.0;

/// Tiles kept before the cache starts over.
const CACHE_CAPACITY: usize = 32;

/// What a tile depicts.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum Motif {
    /// A black texture tile.
    Texture(TexturePattern),
    /// A colored pattern tile.
    Pattern(PatternKind),
}

/// Identity of a rendered tile.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub struct TileKey {
    motif: Motif,
    color: [u8; 4],
    size: u16,
}

impl TileKey {
    /// Key for `motif` in `color` at `scale`.
    #[allow(
        clippy::cast_possible_truncation,
        clippy::cast_sign_loss,
        reason = "the tile edge is clamped into u16 range first"
    )]
    pub fn new(motif: Motif, color: Color, scale: f32) -> Self {
        let Rgba8 { r, g, b, a } = color.to_rgba8();
        let edge = (BASE_TILE * scale).round();
        let size = if edge.is_finite() {
            edge.clamp(2.0, 512.0) as u16
        } else {
            BASE_TILE as u16
        };
        Self {
            motif,
            color: [r, g, b, a],
            size,
        }
    }

    /// Tile edge length in pixels.
    pub fn size(&self) -> u16 {
        self.size
    }
}

/// Rendered tiles by key.
///
/// The cache is small and drops everything once full; a frame only ever
/// uses a couple of tiles.
#[derive(Debug, Default)]
pub struct TileCache {
    tiles: HashMap<TileKey, Image>,
}

impl TileCache {
    /// Creates an empty cache.
    pub fn new() -> Self {
        Self::default()
    }

    /// Returns the tile for `key`, drawing it on a miss.
    pub fn get_or_render(&mut self, key: TileKey) -> Image {
        if let Some(image) = self.tiles.get(&key) {
            return image.clone();
        }
        if self.tiles.len() >= CACHE_CAPACITY {
            tracing::debug!(tiles = self.tiles.len(), "tile cache full, clearing");
            self.tiles.clear();
        }
        let image = render_tile(key);
        self.tiles.insert(key, image.clone());
        image
    }

    /// Number of cached tiles.
    pub fn len(&self) -> usize {
        self.tiles.len()
    }

    /// Returns `true` if nothing is cached.
    pub fn is_empty(&self) -> bool {
        self.tiles.is_empty()
    }

    /// Drops every cached tile.
    pub fn clear(&mut self) {
        self.tiles.clear();
    }
}

fn render_tile(key: TileKey) -> Image {
    let s = f64::from(key.size);
    let [r, g, b, a] = key.color;
    let mut ctx = RenderContext::new(key.size, key.size);
    ctx.set_paint(Color::from_rgba8(r, g, b, a));

    let corners = [(0.0, 0.0), (s, 0.0), (0.0, s), (s, s)].map(Point::from);
    let center = Point::new(s / 2.0, s / 2.0);
    match key.motif {
        Motif::Texture(TexturePattern::Lines) => {
            ctx.set_stroke(Stroke::new(0.5));
            ctx.stroke_path(&Line::new((0.0, 0.0), (s, s)).to_path(0.1));
        }
        Motif::Texture(TexturePattern::Dots) => {
            ctx.fill_path(&Circle::new(center, s * 0.1).to_path(0.1));
        }
        Motif::Texture(TexturePattern::Grid) => {
            ctx.fill_rect(&Rect::new(0.0, 0.0, s, 0.5));
            ctx.fill_rect(&Rect::new(0.0, 0.0, 0.5, s));
        }
        Motif::Pattern(PatternKind::Dots) => {
            let radius = s * 0.15;
            ctx.fill_path(&Circle::new(center, radius).to_path(0.1));
            for corner in corners {
                ctx.fill_path(&Circle::new(corner, radius / 2.0).to_path(0.1));
            }
        }
        Motif::Pattern(PatternKind::Crosses) => {
            ctx.set_stroke(Stroke::new(s * 0.1));
            let arm = s * 0.4 / 2.0;
            let cross = |ctx: &mut RenderContext, at: Point, arm: f64| {
                ctx.stroke_path(&Line::new((at.x - arm, at.y), (at.x + arm, at.y)).to_path(0.1));
                ctx.stroke_path(&Line::new((at.x, at.y - arm), (at.x, at.y + arm)).to_path(0.1));
            };
            cross(&mut ctx, center, arm);
            for corner in corners {
                cross(&mut ctx, corner, arm * 0.6);
            }
        }
        Motif::Pattern(PatternKind::Stars) => {
            ctx.fill_path(&star(center, 5, s * 0.25, s * 0.1));
            let outer = s * 0.15;
            for corner in corners {
                ctx.fill_path(&star(corner, 5, outer, outer * 0.4));
            }
        }
    }

    ctx.flush();
    let mut pixmap = Pixmap::new(key.size, key.size);
    ctx.render_to_pixmap(&mut pixmap);
    Image {
        image: ImageSource::Pixmap(Arc::new(pixmap)),
        sampler: ImageSampler::new()
            .with_extend(Extend::Repeat)
            .with_quality(ImageQuality::Low),
    }
}
