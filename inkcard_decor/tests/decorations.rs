// Copyright 2026 the Inkcard Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Rasterized checks of each motif on a white surface.

use inkcard_decor::{
    Border, BorderStyle, Corner, CornerStyle, Decoration, DecorationKind, DecorationRenderer,
    DecorationSet, FontSubstitution, Pattern, PatternKind, QuoteMarks, Texture, Watermark,
};
use inkcard_surface::Surface;
use inkcard_text::{FaceSource, FontRegistry};
use kurbo::Rect;
use peniko::Color;
use vello_cpu::{Pixmap, RenderContext};

const WHITE: [u8; 4] = [255, 255, 255, 255];
const INK: [u8; 4] = [0xee, 0xee, 0xee, 255];

fn draw(width: u16, height: u16, set: &DecorationSet, renderer: &mut DecorationRenderer) -> Surface {
    let mut ctx = RenderContext::new(width, height);
    ctx.set_paint(Color::WHITE);
    ctx.fill_rect(&Rect::new(0.0, 0.0, f64::from(width), f64::from(height)));
    renderer.render(&mut ctx, set, &FontRegistry::new());
    ctx.flush();
    let mut pixmap = Pixmap::new(width, height);
    ctx.render_to_pixmap(&mut pixmap);
    Surface::from_pixmap(pixmap)
}

fn changed_pixels(surface: &Surface) -> usize {
    surface
        .data()
        .chunks_exact(4)
        .filter(|px| *px != WHITE)
        .count()
}

#[test]
fn solid_border_covers_rows_19_and_20() {
    let set = DecorationSet::new().with(Decoration::Border(Border::default()));
    let s = draw(800, 600, &set, &mut DecorationRenderer::new());
    assert_eq!(s.pixel(400, 19), Some(INK));
    assert_eq!(s.pixel(400, 20), Some(INK));
    assert_eq!(s.pixel(19, 300), Some(INK));
    assert_eq!(s.pixel(20, 300), Some(INK));
    assert_eq!(s.pixel(400, 18), Some(WHITE));
    assert_eq!(s.pixel(400, 21), Some(WHITE));
    assert_eq!(s.pixel(400, 100), Some(WHITE));
}

#[test]
fn dashed_border_has_gaps() {
    let set = DecorationSet::new().with(Decoration::Border(Border {
        style: BorderStyle::Dashed,
        ..Border::default()
    }));
    let s = draw(200, 100, &set, &mut DecorationRenderer::new());
    let row: Vec<_> = (20..180).map(|x| s.pixel(x, 19).unwrap()).collect();
    assert!(row.contains(&INK), "expected dashes");
    assert!(row.contains(&WHITE), "expected gaps");
}

#[test]
fn double_border_draws_two_lines() {
    let set = DecorationSet::new().with(Decoration::Border(Border {
        style: BorderStyle::Double,
        ..Border::default()
    }));
    let s = draw(200, 100, &set, &mut DecorationRenderer::new());
    // Lines centered at 18 and 22, each 2px wide.
    assert_eq!(s.pixel(100, 17), Some(INK));
    assert_eq!(s.pixel(100, 20), Some(WHITE));
    assert_eq!(s.pixel(100, 22), Some(INK));
}

#[test]
fn corners_are_mirror_symmetric() {
    for style in [CornerStyle::Simple, CornerStyle::Ornate, CornerStyle::Floral] {
        let set = DecorationSet::new().with(Decoration::Corner(Corner {
            style,
            color: Color::BLACK,
            size: 30.0,
        }));
        let s = draw(100, 100, &set, &mut DecorationRenderer::new());
        assert!(changed_pixels(&s) > 0, "{style:?} drew nothing");
        let mut mismatched = 0;
        for y in 0..100 {
            for x in 0..100 {
                let p = s.pixel(x, y).unwrap();
                for q in [s.pixel(99 - x, y), s.pixel(x, 99 - y), s.pixel(99 - x, 99 - y)] {
                    let q = q.unwrap();
                    if p.iter().zip(q).any(|(a, b)| a.abs_diff(b) > 8) {
                        mismatched += 1;
                    }
                }
            }
        }
        // Allow a few antialiasing differences along curves.
        assert!(mismatched < 30, "{style:?}: {mismatched} asymmetric samples");
    }
}

#[test]
fn quote_mark_draws_near_its_anchor() {
    let set = DecorationSet::new().with(Decoration::QuoteMarks(QuoteMarks {
        color: Color::BLACK,
        ..QuoteMarks::default()
    }));
    let s = draw(300, 200, &set, &mut DecorationRenderer::new());
    assert!(changed_pixels(&s) > 0);
    // Nothing lands in the lower half.
    for y in 100..200 {
        for x in 0..300 {
            assert_eq!(s.pixel(x, y), Some(WHITE));
        }
    }
}

#[test]
fn watermark_covers_the_surface() {
    let set = DecorationSet::new().with(Decoration::Watermark(Watermark {
        opacity: 0.5,
        ..Watermark::default()
    }));
    let s = draw(400, 400, &set, &mut DecorationRenderer::new());
    let quadrant = |x0: u16, y0: u16| {
        (y0..y0 + 200)
            .flat_map(|y| (x0..x0 + 200).map(move |x| (x, y)))
            .filter(|&(x, y)| s.pixel(x, y) != Some(WHITE))
            .count()
    };
    for (x0, y0) in [(0, 0), (200, 0), (0, 200), (200, 200)] {
        assert!(quadrant(x0, y0) > 0, "quadrant ({x0}, {y0}) is empty");
    }
}

#[test]
fn tiled_motifs_reuse_cached_tiles() {
    let set = DecorationSet::new()
        .with(Decoration::Texture(Texture::default()))
        .with(Decoration::Pattern(Pattern {
            kind: PatternKind::Crosses,
            color: Color::from_rgb8(200, 0, 0),
            opacity: 1.0,
            scale: 1.0,
        }));
    let mut renderer = DecorationRenderer::new();
    let first = draw(120, 80, &set, &mut renderer);
    assert_eq!(renderer.tiles().len(), 2);
    assert!(changed_pixels(&first) > 0);

    let second = draw(120, 80, &set, &mut renderer);
    assert_eq!(renderer.tiles().len(), 2);
    assert_eq!(first, second, "cached tiles must render identically");

    let mut bigger = set.clone();
    bigger.options_mut().pattern.scale = 2.0;
    draw(120, 80, &bigger, &mut renderer);
    assert_eq!(renderer.tiles().len(), 3);

    renderer.clear_tiles();
    assert!(renderer.tiles().is_empty());
}

#[test]
fn pattern_repeats_with_tile_period() {
    let set = DecorationSet::new().with(Decoration::Pattern(Pattern {
        kind: PatternKind::Dots,
        color: Color::BLACK,
        opacity: 1.0,
        scale: 1.0,
    }));
    let s = draw(100, 100, &set, &mut DecorationRenderer::new());
    assert_ne!(s.pixel(10, 10), Some(WHITE), "tile center carries a dot");
    for (x, y) in [(10, 10), (13, 9), (5, 5)] {
        assert_eq!(s.pixel(x, y), s.pixel(x + 20, y + 40));
    }
}

#[test]
fn empty_set_draws_nothing() {
    let s = draw(50, 50, &DecorationSet::new(), &mut DecorationRenderer::new());
    assert_eq!(changed_pixels(&s), 0);
}

#[test]
fn text_motifs_report_substitute_faces() {
    let set = DecorationSet::new()
        .with(Decoration::QuoteMarks(QuoteMarks::default()))
        .with(Decoration::Border(Border::default()))
        .with(Decoration::Watermark(Watermark::default()));
    let mut renderer = DecorationRenderer::new();
    let mut ctx = RenderContext::new(200, 150);
    let used = renderer.render(&mut ctx, &set, &FontRegistry::new());
    assert_eq!(
        used,
        [
            FontSubstitution {
                kind: DecorationKind::QuoteMarks,
                requested: "Georgia",
                source: FaceSource::Builtin,
            },
            FontSubstitution {
                kind: DecorationKind::Watermark,
                requested: "Arial",
                source: FaceSource::Builtin,
            },
        ]
    );

    let mut fonts = FontRegistry::new();
    fonts
        .register_font("Arial", include_bytes!("../../assets/fonts/dejavu/DejaVuSans.ttf").to_vec())
        .unwrap();
    let used = renderer.render(&mut ctx, &set, &fonts);
    assert_eq!(
        used,
        [FontSubstitution {
            kind: DecorationKind::QuoteMarks,
            requested: "Georgia",
            source: FaceSource::DefaultFamily,
        }]
    );
}
