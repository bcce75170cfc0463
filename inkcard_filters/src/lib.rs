// Copyright 2026 the Inkcard Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Inkcard Filters: photographic adjustments over interleaved RGBA8 pixels.
//!
//! [`apply_filters`] runs a fixed sequence of stages, each reading what the
//! previous one wrote:
//!
//! 1. brightness, contrast and saturation (color channels only),
//! 2. clamping back to `0..=255`,
//! 3. a box blur over in-bounds neighbours (all four channels),
//! 4. a sepia remix,
//! 5. a flat color overlay composited source-over on every pixel.
//!
//! Intermediate math is done in `f64`; stored values are rounded to the
//! nearest integer. Parameters at their neutral values leave the buffer
//! untouched, so `FilterParams::default()` is an exact identity.
//!
//! ```rust
//! use inkcard_filters::{FilterParams, FilterPreset, apply_filters};
//!
//! let mut pixels = vec![200, 100, 50, 255];
//! apply_filters(&mut pixels, 1, 1, &FilterParams::default());
//! assert_eq!(pixels, [200, 100, 50, 255]);
//!
//! apply_filters(&mut pixels, 1, 1, &FilterPreset::Vintage.params());
//! assert_ne!(pixels, [200, 100, 50, 255]);
//! ```

mod blur;
mod tone;

use inkcard_surface::Surface;
use peniko::Color;
use serde::{Deserialize, Serialize};

pub use tone::contrast_factor;

/// Upper bound of the brightness, contrast and saturation percentages.
pub const MAX_PERCENT: f32 = 200.0;

/// Upper bound of the blur radius, in pixels.
pub const MAX_BLUR_RADIUS: f32 = 20.0;

/// Filter settings for one render.
#[derive(Clone, Copy, Debug, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct FilterParams {
    /// Brightness in percent; `100` is neutral.
    pub brightness: f32,
    /// Contrast in percent; `100` is neutral.
    pub contrast: f32,
    /// Saturation in percent; `100` is neutral, `0` is grayscale.
    pub saturation: f32,
    /// Box blur radius in pixels. Only the integer part is used.
    pub blur_radius: f32,
    /// Apply the sepia remix.
    pub sepia: bool,
    /// Flat color composited over the whole image at its own alpha.
    #[serde(
        with = "inkcard_surface::css_color::option",
        skip_serializing_if = "Option::is_none"
    )]
    pub overlay: Option<Color>,
}

impl Default for FilterParams {
    fn default() -> Self {
        Self {
            brightness: 100.0,
            contrast: 100.0,
            saturation: 100.0,
            blur_radius: 0.0,
            sepia: false,
            overlay: None,
        }
    }
}

fn clamp_or(value: f32, max: f32, fallback: f32) -> f32 {
    if value.is_finite() {
        value.clamp(0.0, max)
    } else {
        fallback
    }
}

impl FilterParams {
    /// Returns a copy with every numeric field inside its valid range.
    ///
    /// Non-finite values fall back to their neutral setting.
    #[must_use]
    pub fn sanitized(self) -> Self {
        let neutral = Self::default();
        Self {
            brightness: clamp_or(self.brightness, MAX_PERCENT, neutral.brightness),
            contrast: clamp_or(self.contrast, MAX_PERCENT, neutral.contrast),
            saturation: clamp_or(self.saturation, MAX_PERCENT, neutral.saturation),
            blur_radius: clamp_or(self.blur_radius, MAX_BLUR_RADIUS, neutral.blur_radius),
            sepia: self.sepia,
            overlay: self.overlay,
        }
    }

    /// Integer blur window half-size.
    #[allow(
        clippy::cast_possible_truncation,
        clippy::cast_sign_loss,
        reason = "radius is clamped to 0..=20 before the cast"
    )]
    pub fn blur_box(&self) -> usize {
        clamp_or(self.blur_radius, MAX_BLUR_RADIUS, 0.0).floor() as usize
    }

    /// Returns `true` if applying these parameters changes nothing.
    pub fn is_identity(&self) -> bool {
        tone::Tone::new(self).is_none()
            && self.blur_box() == 0
            && !self.sepia
            && self.overlay.is_none()
    }
}

/// Named filter combinations.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum FilterPreset {
    /// Neutral settings.
    #[default]
    None,
    /// Brighter, punchier, with an orange wash.
    Warm,
    /// Slightly desaturated with a blue wash.
    Cool,
    /// Darker, contrasty, sepia toned.
    Vintage,
}

impl FilterPreset {
    /// Every preset, in display order.
    pub const ALL: [Self; 4] = [Self::None, Self::Warm, Self::Cool, Self::Vintage];

    /// Parameters this preset stands for.
    pub fn params(self) -> FilterParams {
        let base = FilterParams::default();
        match self {
            Self::None => base,
            Self::Warm => FilterParams {
                brightness: 110.0,
                contrast: 110.0,
                saturation: 120.0,
                overlay: Some(Color::new([1.0, 150.0 / 255.0, 0.0, 0.1])),
                ..base
            },
            Self::Cool => FilterParams {
                contrast: 105.0,
                saturation: 90.0,
                overlay: Some(Color::new([0.0, 150.0 / 255.0, 1.0, 0.1])),
                ..base
            },
            Self::Vintage => FilterParams {
                brightness: 90.0,
                contrast: 120.0,
                saturation: 80.0,
                blur_radius: 0.5,
                sepia: true,
                ..base
            },
        }
    }
}

/// Applies `params` in place to `width * height` interleaved RGBA8 pixels.
///
/// # Panics
///
/// Panics if `pixels` is not exactly `width * height * 4` bytes long.
pub fn apply_filters(pixels: &mut [u8], width: usize, height: usize, params: &FilterParams) {
    assert_eq!(
        pixels.len(),
        width * height * 4,
        "pixel buffer does not match {width}x{height}"
    );
    let params = params.sanitized();
    if params.is_identity() {
        return;
    }
    tracing::debug!(?params, width, height, "applying filters");

    if let Some(tone) = tone::Tone::new(&params) {
        for px in pixels.chunks_exact_mut(4) {
            tone.apply(px);
        }
    }

    let radius = params.blur_box();
    if radius > 0 {
        blur::box_blur(pixels, width, height, radius);
    }

    if params.sepia {
        for px in pixels.chunks_exact_mut(4) {
            sepia(px);
        }
    }

    if let Some(color) = params.overlay {
        overlay(pixels, color);
    }
}

/// Applies `params` in place to a whole surface.
pub fn filter_surface(surface: &mut Surface, params: &FilterParams) {
    let width = usize::from(surface.width());
    let height = usize::from(surface.height());
    apply_filters(surface.data_mut(), width, height, params);
}

#[allow(
    clippy::cast_possible_truncation,
    clippy::cast_sign_loss,
    reason = "value is rounded and clamped to 0..=255 first"
)]
pub(crate) fn to_u8(value: f64) -> u8 {
    value.round().clamp(0.0, 255.0) as u8
}

fn sepia(px: &mut [u8]) {
    let [r, g, b] = [px[0], px[1], px[2]].map(f64::from);
    px[0] = to_u8((0.393 * r + 0.769 * g + 0.189 * b).min(255.0));
    px[1] = to_u8((0.349 * r + 0.686 * g + 0.168 * b).min(255.0));
    px[2] = to_u8((0.272 * r + 0.534 * g + 0.131 * b).min(255.0));
}

/// Source-over composite of a flat `color` on straight-alpha pixels.
fn overlay(pixels: &mut [u8], color: Color) {
    let [or, og, ob, oa] = color.components.map(|c| f64::from(c.clamp(0.0, 1.0)));
    if oa == 0.0 {
        return;
    }
    let src = [or * 255.0, og * 255.0, ob * 255.0];
    for px in pixels.chunks_exact_mut(4) {
        let da = f64::from(px[3]) / 255.0;
        let keep = da * (1.0 - oa);
        let out_a = oa + keep;
        for (c, s) in px[..3].iter_mut().zip(src) {
            *c = to_u8((s * oa + f64::from(*c) * keep) / out_a);
        }
        px[3] = to_u8(out_a * 255.0);
    }
}
