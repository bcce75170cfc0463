// Copyright 2026 the Inkcard Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Whole-card renders checked at the pixel level.

use inkcard::{
    Decoration, DecorationSet, Editor, ExportFormat, FilterParams, RenderNotice, Renderer,
    StyleChange, StyleConfig, Surface, Template, TextAlign,
};
use inkcard_decor::Border;
use inkcard_layout::layout;
use peniko::Color;

const DEJAVU_SANS: &[u8] = include_bytes!("../../assets/fonts/dejavu/DejaVuSans.ttf");
const WHITE: [u8; 4] = [255, 255, 255, 255];

/// A renderer whose default family is backed by a real font.
fn renderer() -> Renderer {
    let mut renderer = Renderer::new();
    renderer.register_font("Arial", DEJAVU_SANS).unwrap();
    renderer
}

/// Bounding box of every pixel that differs from `background`, as `(x0, y0, x1, y1)`.
fn ink_bounds(surface: &Surface, background: [u8; 4]) -> Option<(u16, u16, u16, u16)> {
    let mut bounds: Option<(u16, u16, u16, u16)> = None;
    for y in 0..surface.height() {
        for x in 0..surface.width() {
            if surface.pixel(x, y) == Some(background) {
                continue;
            }
            bounds = Some(match bounds {
                None => (x, y, x, y),
                Some((x0, y0, x1, y1)) => (x0.min(x), y0.min(y), x1.max(x), y1.max(y)),
            });
        }
    }
    bounds
}

#[test]
fn hello_world_is_one_centered_line() {
    let mut renderer = renderer();
    let (surface, report) = renderer
        .render_new(800, 600, &StyleConfig::default(), "Hello world")
        .unwrap();
    assert_eq!(report.lines, 1);

    let (x0, y0, x1, y1) = ink_bounds(&surface, WHITE).expect("text was drawn");
    let center = (f32::from(y0) + f32::from(y1)) / 2.0;
    assert!((center - 300.0).abs() <= 8.0, "ink centered at {center}");
    assert!((38..=46).contains(&x0), "left edge at {x0}");
    assert!(x1 < 400, "short line ends at {x1}");
    // Everything else stays background.
    assert!(y0 >= 282 && y1 <= 318, "ink rows {y0}..={y1} leave the line box");
}

#[test]
fn long_text_wraps_inside_the_padding() {
    let text = "A".repeat(500);
    let style = StyleConfig::default();
    let mut renderer = renderer();
    let (surface, report) = renderer.render_new(800, 600, &style, &text).unwrap();
    assert!(report.lines > 1, "expected wrapping, got {report:?}");

    let face = renderer.fonts().face(&style.font_family, 24.0, 1.5).face;
    let block = layout(&text, 720.0, &face);
    assert_eq!(block.lines.len(), report.lines);
    for line in &block.lines {
        assert!(line.width <= 720.0, "line of width {} overflows", line.width);
    }

    let (x0, _, x1, _) = ink_bounds(&surface, WHITE).unwrap();
    assert!(x0 >= 40 && x1 < 760, "ink columns {x0}..={x1} leave the padding");
}

#[test]
fn alignment_moves_the_line() {
    let mut renderer = renderer();
    let mut lefts = Vec::new();
    for align in [TextAlign::Left, TextAlign::Center, TextAlign::Right] {
        let style = StyleConfig {
            text_align: align,
            ..StyleConfig::default()
        };
        let (surface, _) = renderer.render_new(400, 200, &style, "Hi").unwrap();
        let (x0, _, x1, _) = ink_bounds(&surface, WHITE).unwrap();
        lefts.push(x0);
        if align == TextAlign::Right {
            assert!(x1 <= 360, "right-aligned ink ends at {x1}");
        }
        if align == TextAlign::Center {
            let mid = (f32::from(x0) + f32::from(x1)) / 2.0;
            assert!((mid - 200.0).abs() <= 6.0, "centered ink at {mid}");
        }
    }
    assert!(lefts[0] < lefts[1] && lefts[1] < lefts[2], "{lefts:?}");
}

#[test]
fn missing_font_and_image_are_reported() {
    let mut renderer = Renderer::new();
    let style = StyleConfig {
        font_family: "No Such Font".into(),
        ..StyleConfig::default()
    }
    .applied(StyleChange::BackgroundImage(Some("paper".into())));
    let (surface, report) = renderer.render_new(200, 100, &style, "text").unwrap();
    assert_eq!(
        report.notices,
        [
            RenderNotice::MissingImage {
                key: "paper".into()
            },
            RenderNotice::BuiltinFont {
                requested: "No Such Font".into()
            },
        ]
    );
    assert_eq!(report.lines, 1);
    assert!(ink_bounds(&surface, WHITE).is_some(), "text still drawn");
}

#[test]
fn registered_default_family_is_a_fallback() {
    let mut renderer = Renderer::new();
    renderer.register_font("Arial", DEJAVU_SANS).unwrap();
    let style = StyleConfig {
        font_family: "Georgia".into(),
        ..StyleConfig::default()
    };
    let (_, report) = renderer.render_new(200, 100, &style, "text").unwrap();
    assert_eq!(
        report.notices,
        [RenderNotice::FontFallback {
            requested: "Georgia".into(),
            fallback: "Arial".into()
        }]
    );
}

#[test]
fn border_decoration_through_the_renderer() {
    let mut renderer = renderer();
    let style = StyleConfig {
        decorations: DecorationSet::new().with(Decoration::Border(Border::default())),
        ..StyleConfig::default()
    };
    let (surface, report) = renderer.render_new(300, 200, &style, "").unwrap();
    assert!(report.is_clean());
    let ink = [0xee, 0xee, 0xee, 255];
    assert_eq!(surface.pixel(150, 19), Some(ink));
    assert_eq!(surface.pixel(150, 20), Some(ink));
    assert_eq!(surface.pixel(19, 100), Some(ink));
    assert_eq!(surface.pixel(150, 100), Some(WHITE));
    assert_eq!(surface.pixel(150, 17), Some(WHITE));
}

#[test]
fn filters_run_after_drawing() {
    let mut renderer = renderer();
    let style = StyleConfig {
        filters: FilterParams {
            saturation: 0.0,
            ..FilterParams::default()
        },
        ..StyleConfig::default()
    }
    .applied(StyleChange::BackgroundColor(Color::from_rgb8(200, 40, 40).into()))
    .applied(StyleChange::TextColor(Color::from_rgb8(0, 0, 255).into()));
    let (surface, _) = renderer.render_new(200, 100, &style, "gray").unwrap();
    for y in (0..100).step_by(7) {
        for x in (0..200).step_by(5) {
            let [r, g, b, _] = surface.pixel(x, y).unwrap();
            assert!(r == g && g == b, "pixel ({x}, {y}) kept color: {r} {g} {b}");
        }
    }
}

#[test]
fn rounded_corners_survive_export() {
    let mut renderer = renderer();
    let style = StyleConfig {
        border_radius: 16.0,
        ..StyleConfig::default()
    }
    .applied(StyleChange::BackgroundColor(Color::from_rgb8(30, 60, 90).into()));
    let (surface, _) = renderer.render_new(120, 80, &style, "").unwrap();
    assert_eq!(surface.pixel(0, 0).unwrap()[3], 0);
    assert_eq!(surface.pixel(119, 0).unwrap()[3], 0);
    assert_eq!(surface.pixel(60, 40), Some([30, 60, 90, 255]));

    let png = inkcard_export::export(&surface, &inkcard::ExportRequest::for_surface(&surface))
        .unwrap();
    let decoded = Surface::decode_png(&png).unwrap();
    assert_eq!(decoded.pixel(0, 0).unwrap()[3], 0);
}

#[test]
fn editor_session() {
    let mut editor = Editor::with_renderer(renderer(), 400, 300).unwrap();
    editor.set_text("A quiet line of text");
    editor.apply(StyleChange::Template(Template::Handwriting));
    assert_eq!(editor.style().font_family, "FZKTJW");
    assert!(editor.style().decorations.is_enabled(inkcard::DecorationKind::Texture));
    let textured = editor.surface().clone();

    let first = editor.save_snapshot(1_000).unwrap().id;
    editor.apply(StyleChange::Template(Template::Simple));
    assert_ne!(editor.surface(), &textured);
    editor.save_snapshot(2_000).unwrap();
    assert_eq!(editor.history().len(), 2);

    editor.restore(first).unwrap();
    assert_eq!(editor.surface(), &textured);

    let request = editor
        .export_request()
        .with_format(ExportFormat::Jpeg)
        .with_width(editor.surface(), 200);
    assert_eq!((request.width, request.height), (200, 150));
    let bytes = editor.export(&request).unwrap();
    assert_eq!(&bytes[..2], &[0xff, 0xd8]);
    assert_eq!(request.file_name(5), "image-5.jpeg");
}
