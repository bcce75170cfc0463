// Copyright 2026 the Inkcard Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

use hashbrown::HashMap;
use inkcard_decor::DecorationRenderer;
use inkcard_filters::filter_surface;
use inkcard_layout::layout;
use inkcard_style::{Background, FitMode, StyleConfig, TextAlign};
use inkcard_surface::{Surface, SurfaceError};
use inkcard_text::{FaceSource, FontError, FontRegistry};
use kurbo::{Affine, Point, Rect, RoundedRect, Shape};
use peniko::{Extend, ImageQuality, ImageSampler};
use vello_cpu::{Image, Pixmap, RenderContext};

use crate::{RenderNotice, RenderReport};

/// A registered background image, premultiplied once for sampling.
#[derive(Clone, Debug)]
struct BackgroundImage {
    image: Image,
    width: f64,
    height: f64,
}

impl BackgroundImage {
    fn new(surface: &Surface) -> Self {
        Self {
            image: surface.to_image(ImageSampler::new()),
            width: f64::from(surface.width()),
            height: f64::from(surface.height()),
        }
    }

    fn paint(&self, extend: Extend, quality: ImageQuality) -> Image {
        Image {
            image: self.image.image.clone(),
            sampler: ImageSampler::new().with_extend(extend).with_quality(quality),
        }
    }
}

/// Composes cards from a style and a text.
///
/// The renderer owns the resources a style refers to by name: fonts by
/// family and background images by key. It also keeps decoration tiles
/// cached between renders.
#[derive(Debug, Default)]
pub struct Renderer {
    fonts: FontRegistry,
    images: HashMap<String, BackgroundImage>,
    decorations: DecorationRenderer,
}

impl Renderer {
    /// Creates a renderer with no fonts or images.
    pub fn new() -> Self {
        Self::default()
    }

    /// Registered fonts.
    pub fn fonts(&self) -> &FontRegistry {
        &self.fonts
    }

    /// Mutable access to the registered fonts.
    pub fn fonts_mut(&mut self) -> &mut FontRegistry {
        &mut self.fonts
    }

    /// Registers font `bytes` under family `name`.
    pub fn register_font(&mut self, name: &str, bytes: impl Into<Vec<u8>>) -> Result<(), FontError> {
        self.fonts.register_font(name, bytes)
    }

    /// Registers a decoded background image under `key`, replacing any previous one.
    pub fn register_image(&mut self, key: impl Into<String>, image: &Surface) {
        let key = key.into();
        tracing::debug!(key, width = image.width(), height = image.height(), "registered image");
        self.images.insert(key, BackgroundImage::new(image));
    }

    /// Decodes PNG bytes and registers them as a background image.
    pub fn register_png(&mut self, key: impl Into<String>, bytes: &[u8]) -> Result<(), SurfaceError> {
        let image = Surface::decode_png(bytes)?;
        self.register_image(key, &image);
        Ok(())
    }

    /// Removes a background image; returns whether it was registered.
    pub fn remove_image(&mut self, key: &str) -> bool {
        self.images.remove(key).is_some()
    }

    /// Returns `true` if a background image is registered under `key`.
    pub fn has_image(&self, key: &str) -> bool {
        self.images.contains_key(key)
    }

    /// Renders `text` in `style` onto a fresh surface of the given size.
    pub fn render_new(
        &mut self,
        width: u32,
        height: u32,
        style: &StyleConfig,
        text: &str,
    ) -> Result<(Surface, RenderReport), SurfaceError> {
        let mut surface = Surface::new(width, height)?;
        let report = self.render(&mut surface, style, text);
        Ok((surface, report))
    }

    /// Repaints `surface` with `text` in `style`.
    ///
    /// The surface keeps its size. Its previous contents are not read; they
    /// are replaced by the finished frame.
    pub fn render(&mut self, surface: &mut Surface, style: &StyleConfig, text: &str) -> RenderReport {
        let style = style.sanitized();
        let (width, height) = (surface.width(), surface.height());
        let bounds = Rect::new(0.0, 0.0, f64::from(width), f64::from(height));
        let mut report = RenderReport::default();
        tracing::debug!(width, height, chars = text.chars().count(), "render started");

        let mut ctx = RenderContext::new(width, height);
        ctx.set_paint(style.background.color);
        ctx.fill_rect(&bounds);
        self.draw_background(&mut ctx, &style.background, bounds, &mut report);
        let substitutions = self
            .decorations
            .render(&mut ctx, &style.decorations, &self.fonts);
        for used in substitutions {
            self.font_notice(used.requested, used.source, &mut report);
        }
        self.draw_text(&mut ctx, &style, text, bounds, &mut report);

        let mut frame = Surface::from_pixmap(finish(&mut ctx));
        filter_surface(&mut frame, &style.filters);
        if style.border_radius > 0.0 {
            frame = round_corners(&frame, f64::from(style.border_radius));
        }

        for notice in &report.notices {
            tracing::warn!(%notice, "render degraded");
        }
        tracing::debug!(lines = report.lines, "render finished");
        *surface = frame;
        report
    }

    fn font_notice(&self, requested: &str, source: FaceSource, report: &mut RenderReport) {
        match source {
            FaceSource::Requested => {}
            FaceSource::DefaultFamily => report.notice(RenderNotice::FontFallback {
                requested: requested.to_owned(),
                fallback: self.fonts.default_family().to_owned(),
            }),
            FaceSource::Builtin => report.notice(RenderNotice::BuiltinFont {
                requested: requested.to_owned(),
            }),
        }
    }

    fn draw_background(
        &self,
        ctx: &mut RenderContext,
        background: &Background,
        bounds: Rect,
        report: &mut RenderReport,
    ) {
        let Some(key) = &background.image else {
            return;
        };
        let Some(image) = self.images.get(key) else {
            report.notice(RenderNotice::MissingImage { key: key.clone() });
            return;
        };
        if background.opacity <= 0.0 {
            return;
        }
        let layered = background.opacity < 1.0;
        if layered {
            ctx.push_opacity_layer(background.opacity);
        }
        match background.fit {
            FitMode::Cover | FitMode::Contain => {
                let sx = bounds.width() / image.width;
                let sy = bounds.height() / image.height;
                let scale = if background.fit == FitMode::Cover {
                    sx.max(sy)
                } else {
                    sx.min(sy)
                };
                let dx = (bounds.width() - image.width * scale) / 2.0;
                let dy = (bounds.height() - image.height * scale) / 2.0;
                ctx.set_transform(Affine::translate((dx, dy)) * Affine::scale(scale));
                ctx.set_paint(image.paint(Extend::Pad, ImageQuality::Medium));
                ctx.fill_rect(&Rect::new(0.0, 0.0, image.width, image.height));
                ctx.reset_transform();
            }
            FitMode::Repeat => {
                ctx.set_paint(image.paint(Extend::Repeat, ImageQuality::Low));
                ctx.fill_rect(&bounds);
            }
        }
        if layered {
            ctx.pop_layer();
        }
    }

    #[allow(
        clippy::cast_possible_truncation,
        reason = "layout works in f32 pixel units"
    )]
    fn draw_text(
        &self,
        ctx: &mut RenderContext,
        style: &StyleConfig,
        text: &str,
        bounds: Rect,
        report: &mut RenderReport,
    ) {
        if text.trim().is_empty() {
            return;
        }
        let resolved = self
            .fonts
            .face(&style.font_family, style.font_size, style.line_height);
        self.font_notice(&style.font_family, resolved.source, report);
        let face = resolved.face;
        let (width, height) = (bounds.width() as f32, bounds.height() as f32);
        let padding = style.padding;
        let max_width = (width - 2.0 * padding).max(0.0);
        let block = layout(text, max_width, &face);
        let top = (height - block.total_height) / 2.0;

        for (i, line) in block.lines.iter().enumerate() {
            let baseline = face.baseline_in_box(top + i as f32 * block.line_height);
            let x = match style.text_align {
                TextAlign::Left => padding,
                TextAlign::Center => (width - line.width) / 2.0,
                TextAlign::Right => width - padding - line.width,
            };
            face.draw(
                ctx,
                line.text,
                Point::new(f64::from(x), f64::from(baseline)),
                style.text_color,
            );
        }
        report.lines = block.lines.len();
    }
}

fn finish(ctx: &mut RenderContext) -> Pixmap {
    ctx.flush();
    let mut pixmap = Pixmap::new(ctx.width(), ctx.height());
    ctx.render_to_pixmap(&mut pixmap);
    pixmap
}

/// Copies `frame` through a rounded-rectangle clip; outside pixels become transparent.
fn round_corners(frame: &Surface, radius: f64) -> Surface {
    let bounds = Rect::new(0.0, 0.0, f64::from(frame.width()), f64::from(frame.height()));
    let mut ctx = RenderContext::new(frame.width(), frame.height());
    ctx.push_clip_layer(&RoundedRect::from_rect(bounds, radius).to_path(0.1));
    ctx.set_paint(frame.to_image(ImageSampler::new().with_quality(ImageQuality::Low)));
    ctx.fill_rect(&bounds);
    ctx.pop_layer();
    Surface::from_pixmap(finish(&mut ctx))
}
