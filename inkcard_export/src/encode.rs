// Copyright 2026 the Inkcard Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

use image::codecs::jpeg::JpegEncoder;
use image::imageops::{self, FilterType};
use image::{ExtendedColorType, Rgba, RgbaImage};
use inkcard_surface::Surface;

/// Straight-alpha RGBA8 pixels of `surface` at `width` x `height`.
///
/// Resampling happens on premultiplied values so transparent pixels do not
/// bleed their color into opaque neighbours. A same-size request is a copy.
pub(crate) fn resample(surface: &Surface, width: u32, height: u32) -> Vec<u8> {
    let (sw, sh) = (u32::from(surface.width()), u32::from(surface.height()));
    if (sw, sh) == (width, height) {
        return surface.data().to_vec();
    }
    let data = surface.data();
    let stride = usize::from(surface.width());
    let source = RgbaImage::from_fn(sw, sh, |x, y| {
        let i = (y as usize * stride + x as usize) * 4;
        let a = u32::from(data[i + 3]);
        let premul = |c: u8| div255(u32::from(c) * a);
        Rgba([premul(data[i]), premul(data[i + 1]), premul(data[i + 2]), data[i + 3]])
    });
    let mut out = imageops::resize(&source, width, height, FilterType::Lanczos3).into_raw();
    for px in out.chunks_exact_mut(4) {
        let a = u32::from(px[3]);
        if a == 0 {
            px[..3].fill(0);
            continue;
        }
        for c in &mut px[..3] {
            *c = to_u8((u32::from(*c) * 255 + a / 2) / a);
        }
    }
    out
}

#[allow(
    clippy::cast_possible_truncation,
    reason = "the quotient of a byte product by 255 fits in a byte"
)]
fn div255(v: u32) -> u8 {
    ((v + 127) / 255) as u8
}

#[allow(
    clippy::cast_possible_truncation,
    reason = "clamped to 255 first"
)]
fn to_u8(v: u32) -> u8 {
    v.min(255) as u8
}

pub(crate) fn png(pixels: &[u8], width: u32, height: u32) -> Result<Vec<u8>, png::EncodingError> {
    let mut out = Vec::new();
    let mut encoder = png::Encoder::new(&mut out, width, height);
    encoder.set_color(png::ColorType::Rgba);
    encoder.set_depth(png::BitDepth::Eight);
    let mut writer = encoder.write_header()?;
    writer.write_image_data(pixels)?;
    writer.finish()?;
    Ok(out)
}

#[allow(
    clippy::cast_possible_truncation,
    clippy::cast_sign_loss,
    reason = "quality is validated to 0..=1, so the product is within 1..=100"
)]
pub(crate) fn jpeg(
    pixels: &[u8],
    width: u32,
    height: u32,
    quality: f32,
) -> Result<Vec<u8>, image::ImageError> {
    // JPEG has no alpha; flatten onto white.
    let rgb: Vec<u8> = pixels
        .chunks_exact(4)
        .flat_map(|px| {
            let a = u32::from(px[3]);
            let over = |c: u8| div255(u32::from(c) * a + 255 * (255 - a));
            [over(px[0]), over(px[1]), over(px[2])]
        })
        .collect();
    let quality = (quality * 100.0).round().clamp(1.0, 100.0) as u8;
    let mut out = Vec::new();
    JpegEncoder::new_with_quality(&mut out, quality).encode(
        &rgb,
        width,
        height,
        ExtendedColorType::Rgb8,
    )?;
    Ok(out)
}

/// Lossy WebP with alpha at `quality * 100`.
pub(crate) fn webp(
    pixels: &[u8],
    width: u32,
    height: u32,
    quality: f32,
) -> Result<Vec<u8>, webp::WebPEncodingError> {
    let encoder = webp::Encoder::from_rgba(pixels, width, height);
    let encoded = encoder.encode_simple(false, (quality * 100.0).clamp(0.0, 100.0))?;
    Ok(encoded.to_vec())
}
