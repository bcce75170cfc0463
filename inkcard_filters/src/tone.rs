// Copyright 2026 the Inkcard Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

use crate::{FilterParams, to_u8};

/// Contrast multiplier for a contrast percentage.
///
/// The percentage is mapped onto the classic `-255..=255` contrast level
/// with `100` at level zero, then turned into the usual
/// `259 (L + 255) / (255 (259 - L))` factor. `100` yields exactly `1.0`,
/// `0` yields `0.0` (flat mid gray).
pub fn contrast_factor(contrast_percent: f64) -> f64 {
    let level = (contrast_percent - 100.0) * 255.0 / 100.0;
    259.0 * (level + 255.0) / (255.0 * (259.0 - level))
}

/// Per-pixel brightness, contrast and saturation.
///
/// Each field is `None` when that stage is neutral.
#[derive(Clone, Copy, Debug)]
pub(crate) struct Tone {
    brightness: Option<f64>,
    contrast: Option<f64>,
    saturation: Option<f64>,
}

impl Tone {
    /// Returns `None` when every stage is neutral.
    pub(crate) fn new(params: &FilterParams) -> Option<Self> {
        let stage = |percent: f32| (percent != 100.0).then_some(f64::from(percent) / 100.0);
        let tone = Self {
            brightness: stage(params.brightness),
            contrast: (params.contrast != 100.0).then(|| contrast_factor(f64::from(params.contrast))),
            saturation: stage(params.saturation),
        };
        (tone.brightness.is_some() || tone.contrast.is_some() || tone.saturation.is_some())
            .then_some(tone)
    }

    /// Adjusts the color channels of one RGBA pixel; alpha is untouched.
    pub(crate) fn apply(&self, px: &mut [u8]) {
        let mut rgb = [px[0], px[1], px[2]].map(f64::from);
        if let Some(b) = self.brightness {
            rgb = rgb.map(|c| c * b);
        }
        if let Some(f) = self.contrast {
            rgb = rgb.map(|c| f * (c - 128.0) + 128.0);
        }
        if let Some(s) = self.saturation {
            let luma = 0.2989 * rgb[0] + 0.5870 * rgb[1] + 0.1140 * rgb[2];
            rgb = rgb.map(|c| luma + s * (c - luma));
        }
        for (dst, v) in px[..3].iter_mut().zip(rgb) {
            *dst = to_u8(v);
        }
    }
}
