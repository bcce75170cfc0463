// Copyright 2026 the Inkcard Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Path construction for motifs, independent of any render context.

use core::f64::consts::PI;

use kurbo::{Affine, BezPath, Circle, Point, Rect, RoundedRect, Shape, Vec2};

use crate::options::{CornerStyle, QuotePosition};

/// Inset of the border rectangle from each surface edge.
pub const BORDER_INSET: f64 = 20.0;

/// Baseline anchor of the top-left quote mark.
pub const QUOTE_ANCHOR: Point = Point::new(30.0, 80.0);

/// First watermark copy, in the rotated frame.
pub const WATERMARK_ANCHOR: Point = Point::new(-50.0, 400.0);

/// Font size of watermark text.
pub const WATERMARK_SIZE: f32 = 14.0;

/// Horizontal gap between watermark copies along the rotated baseline.
pub const WATERMARK_GAP: f64 = 60.0;

/// Distance between watermark rows.
pub const WATERMARK_ROW_STEP: f64 = 120.0;

/// Upper bound on watermark copies per frame.
const MAX_WATERMARK_COPIES: usize = 4096;

/// Transforms that place top-left corner geometry at each surface corner.
///
/// Corner geometry is written for the top-left corner, pointing into the
/// surface along `+x` and `+y`; each corner reflects it with `(dx, dy)`.
pub fn corner_frames(width: f64, height: f64) -> [Affine; 4] {
    [
        (0.0, 0.0, 1.0, 1.0),
        (width, 0.0, -1.0, 1.0),
        (0.0, height, 1.0, -1.0),
        (width, height, -1.0, -1.0),
    ]
    .map(|(x, y, dx, dy)| Affine::translate((x, y)) * Affine::scale_non_uniform(dx, dy))
}

/// Stroked outline of a top-left corner ornament, plus an optional filled dot.
pub fn corner_ornament(style: CornerStyle, size: f64) -> (BezPath, Option<Circle>) {
    let mut path = BezPath::new();
    match style {
        CornerStyle::Simple => {
            path.move_to((0.0, size));
            path.line_to((0.0, 0.0));
            path.line_to((size, 0.0));
            (path, None)
        }
        CornerStyle::Ornate => {
            let c = size * 0.5;
            path.move_to((0.0, 0.0));
            path.curve_to((c, 0.0), (size, c), (size, size));
            path.move_to((0.0, 0.0));
            path.curve_to((0.0, c), (c, size), (size, size));
            (path, None)
        }
        CornerStyle::Floral => {
            let petal = size * 0.3;
            for i in 0..3 {
                let a = f64::from(i) * PI / 4.0;
                let b = a + PI / 8.0;
                path.move_to((0.0, 0.0));
                path.quad_to(
                    (a.cos() * petal, a.sin() * petal),
                    (b.cos() * size, b.sin() * size),
                );
            }
            (path, Some(Circle::new((petal, petal), 2.0)))
        }
    }
}

/// A closed star with `spikes` points, the first pointing straight up.
pub fn star(center: Point, spikes: u32, outer: f64, inner: f64) -> BezPath {
    let step = PI / f64::from(spikes);
    let mut rot = PI * 1.5;
    let mut path = BezPath::new();
    for i in 0..spikes {
        let tip = center + Vec2::from_angle(rot) * outer;
        if i == 0 {
            path.move_to(tip);
        } else {
            path.line_to(tip);
        }
        rot += step;
        path.line_to(center + Vec2::from_angle(rot) * inner);
        rot += step;
    }
    path.close_path();
    path
}

/// The border rectangle for a surface, offset outward by `grow` pixels.
///
/// A positive `radius` rounds the corners; the radius follows the offset so
/// parallel strokes stay parallel.
pub fn border_path(width: f64, height: f64, grow: f64, radius: f64) -> BezPath {
    let rect = Rect::new(
        BORDER_INSET,
        BORDER_INSET,
        width - BORDER_INSET,
        height - BORDER_INSET,
    )
    .inflate(grow, grow);
    if radius > 0.0 {
        RoundedRect::from_rect(rect, (radius + grow).max(0.0)).to_path(0.1)
    } else {
        rect.to_path(0.1)
    }
}

/// Baseline origin of the quote glyph.
///
/// Top positions sit on the top-left anchor; bottom positions put the glyph
/// the same distance from the bottom edge. Right positions right-align the
/// glyph `advance` against the mirrored margin.
pub fn quote_origin(
    position: QuotePosition,
    width: f64,
    height: f64,
    size: f64,
    advance: f64,
) -> Point {
    let margin = QUOTE_ANCHOR.x;
    let right = width - margin - advance;
    let bottom = height - margin + 0.4 * size;
    match position {
        QuotePosition::TopLeft => QUOTE_ANCHOR,
        QuotePosition::TopRight => Point::new(right, QUOTE_ANCHOR.y),
        QuotePosition::BottomLeft => Point::new(margin, bottom),
        QuotePosition::BottomRight => Point::new(right, bottom),
    }
}

/// Baseline origins of watermark copies in the rotated frame.
///
/// Copies start at [`WATERMARK_ANCHOR`] and repeat every `advance` plus
/// [`WATERMARK_GAP`] along the baseline, on rows [`WATERMARK_ROW_STEP`] apart,
/// until the rotated image of the surface is covered.
#[allow(
    clippy::cast_possible_truncation,
    reason = "step counts are bounded by the surface extent"
)]
pub fn watermark_origins(transform: Affine, width: f64, height: f64, advance: f64) -> Vec<Point> {
    let bounds = transform
        .inverse()
        .transform_rect_bbox(Rect::new(0.0, 0.0, width, height));
    let col = advance.max(0.0) + WATERMARK_GAP;
    let row = WATERMARK_ROW_STEP;
    // Copies are anchored on a lattice through the anchor point.
    let first_col = ((bounds.x0 - advance - WATERMARK_ANCHOR.x) / col).floor() as i64;
    let last_col = ((bounds.x1 - WATERMARK_ANCHOR.x) / col).ceil() as i64;
    let first_row = ((bounds.y0 - WATERMARK_ANCHOR.y) / row).floor() as i64;
    let last_row = ((bounds.y1 + f64::from(WATERMARK_SIZE) - WATERMARK_ANCHOR.y) / row).ceil() as i64;

    let mut origins = Vec::new();
    'rows: for j in first_row..=last_row {
        for i in first_col..=last_col {
            if origins.len() == MAX_WATERMARK_COPIES {
                break 'rows;
            }
            origins.push(Point::new(
                WATERMARK_ANCHOR.x + i as f64 * col,
                WATERMARK_ANCHOR.y + j as f64 * row,
            ));
        }
    }
    origins
}
