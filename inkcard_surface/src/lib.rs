// Copyright 2026 the Inkcard Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Inkcard Surface: the working raster of the pipeline.
//!
//! A [`Surface`] is a fixed-size buffer of interleaved, straight (not
//! premultiplied) RGBA8 pixels in row-major order. Each pipeline stage
//! borrows it for the duration of one call:
//!
//! - composition rasterizes into a `vello_cpu` [`Pixmap`] and converts the
//!   finished frame with [`Surface::from_pixmap`],
//! - the filter engine mutates [`Surface::data_mut`] in place,
//! - export reads [`Surface::data`] to resample and encode.
//!
//! Dimensions are `u16` because the rasterizer addresses pixels that way.
//! Zero-area surfaces are rejected at construction.
//!
//! Background images enter the pipeline as surfaces too, either built from
//! already decoded pixels with [`Surface::from_rgba8`] or decoded from PNG
//! bytes with [`Surface::decode_png`].
//!
//! The [`css_color`] module holds the serde adapters every configuration
//! type in the workspace uses to store colors as CSS strings.

pub mod css_color;

use std::io::Cursor;
use std::sync::Arc;

use peniko::{Color, ImageSampler};
use png::{BitDepth, ColorType, Transformations};
use thiserror::Error;
use vello_cpu::color::{PremulRgba8, Rgba8};
use vello_cpu::{Image, ImageSource, Pixmap};

/// Errors produced while building a [`Surface`].
#[derive(Debug, Error)]
pub enum SurfaceError {
    /// Width or height is zero.
    #[error("surface must have a non-zero area, got {width}x{height}")]
    ZeroArea {
        /// Requested width.
        width: u32,
        /// Requested height.
        height: u32,
    },
    /// Width or height does not fit the rasterizer's `u16` coordinates.
    #[error("surface dimensions {width}x{height} exceed {max}x{max}", max = u16::MAX)]
    TooLarge {
        /// Requested width.
        width: u32,
        /// Requested height.
        height: u32,
    },
    /// The pixel buffer length is not `width * height * 4`.
    #[error("expected {expected} bytes of RGBA8 data, got {actual}")]
    BufferSize {
        /// Byte count implied by the dimensions.
        expected: usize,
        /// Byte count supplied.
        actual: usize,
    },
    /// The PNG stream could not be decoded.
    #[error("png decode failed: {0}")]
    Png(#[from] png::DecodingError),
    /// The PNG decoded to a pixel layout we do not convert.
    #[error("unsupported png color layout {0:?}")]
    UnsupportedColor(ColorType),
}

/// Straight-alpha RGBA8 raster.
#[derive(Clone, PartialEq, Eq)]
pub struct Surface {
    width: u16,
    height: u16,
    data: Vec<u8>,
}

impl core::fmt::Debug for Surface {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        f.debug_struct("Surface")
            .field("width", &self.width)
            .field("height", &self.height)
            .field("bytes", &self.data.len())
            .finish_non_exhaustive()
    }
}

fn checked_dims(width: u32, height: u32) -> Result<(u16, u16), SurfaceError> {
    if width == 0 || height == 0 {
        return Err(SurfaceError::ZeroArea { width, height });
    }
    match (u16::try_from(width), u16::try_from(height)) {
        (Ok(w), Ok(h)) => Ok((w, h)),
        _ => Err(SurfaceError::TooLarge { width, height }),
    }
}

impl Surface {
    /// Creates a fully transparent surface.
    pub fn new(width: u32, height: u32) -> Result<Self, SurfaceError> {
        let (width, height) = checked_dims(width, height)?;
        Ok(Self {
            width,
            height,
            data: vec![0; usize::from(width) * usize::from(height) * 4],
        })
    }

    /// Creates a surface where every pixel is `color`.
    pub fn filled(width: u32, height: u32, color: Color) -> Result<Self, SurfaceError> {
        let mut surface = Self::new(width, height)?;
        let Rgba8 { r, g, b, a } = color.to_rgba8();
        for px in surface.data.chunks_exact_mut(4) {
            px.copy_from_slice(&[r, g, b, a]);
        }
        Ok(surface)
    }

    /// Wraps an existing straight-alpha RGBA8 buffer.
    pub fn from_rgba8(width: u32, height: u32, data: Vec<u8>) -> Result<Self, SurfaceError> {
        let (w, h) = checked_dims(width, height)?;
        let expected = usize::from(w) * usize::from(h) * 4;
        if data.len() != expected {
            return Err(SurfaceError::BufferSize {
                expected,
                actual: data.len(),
            });
        }
        Ok(Self {
            width: w,
            height: h,
            data,
        })
    }

    /// Decodes a PNG stream into a surface.
    ///
    /// Palette, grayscale and 16-bit images are normalized to 8-bit RGBA.
    pub fn decode_png(bytes: &[u8]) -> Result<Self, SurfaceError> {
        let mut decoder = png::Decoder::new(Cursor::new(bytes));
        decoder.set_transformations(Transformations::normalize_to_color8() | Transformations::ALPHA);
        let mut reader = decoder.read_info()?;
        let mut buf = vec![0_u8; reader.output_buffer_size()];
        let info = reader.next_frame(&mut buf)?;
        buf.truncate(info.buffer_size());

        let data = match (info.color_type, info.bit_depth) {
            (ColorType::Rgba, BitDepth::Eight) => buf,
            (ColorType::GrayscaleAlpha, BitDepth::Eight) => buf
                .chunks_exact(2)
                .flat_map(|ga| [ga[0], ga[0], ga[0], ga[1]])
                .collect(),
            (other, _) => return Err(SurfaceError::UnsupportedColor(other)),
        };
        Self::from_rgba8(info.width, info.height, data)
    }

    /// Converts a rendered premultiplied pixmap into a straight-alpha surface.
    pub fn from_pixmap(pixmap: Pixmap) -> Self {
        let width = pixmap.width();
        let height = pixmap.height();
        let data = pixmap
            .take_unpremultiplied()
            .into_iter()
            .flat_map(|Rgba8 { r, g, b, a }| [r, g, b, a])
            .collect();
        Self {
            width,
            height,
            data,
        }
    }

    /// Premultiplies the surface into a pixmap the rasterizer can sample.
    pub fn to_pixmap(&self) -> Pixmap {
        let pixels = self
            .data
            .chunks_exact(4)
            .map(|px| {
                let a = px[3];
                PremulRgba8 {
                    r: premultiply(px[0], a),
                    g: premultiply(px[1], a),
                    b: premultiply(px[2], a),
                    a,
                }
            })
            .collect();
        Pixmap::from_parts(pixels, self.width, self.height)
    }

    /// Wraps the surface as an image paint for the rasterizer.
    pub fn to_image(&self, sampler: ImageSampler) -> Image {
        Image {
            image: ImageSource::Pixmap(Arc::new(self.to_pixmap())),
            sampler,
        }
    }

    /// Width in pixels.
    pub fn width(&self) -> u16 {
        self.width
    }

    /// Height in pixels.
    pub fn height(&self) -> u16 {
        self.height
    }

    /// Width divided by height.
    pub fn aspect_ratio(&self) -> f64 {
        f64::from(self.width) / f64::from(self.height)
    }

    /// Interleaved RGBA8 bytes, row-major.
    pub fn data(&self) -> &[u8] {
        &self.data
    }

    /// Mutable access to the interleaved RGBA8 bytes.
    pub fn data_mut(&mut self) -> &mut [u8] {
        &mut self.data
    }

    /// Consumes the surface, returning its bytes.
    pub fn into_data(self) -> Vec<u8> {
        self.data
    }

    /// Pixel at `(x, y)`, or `None` when out of bounds.
    pub fn pixel(&self, x: u16, y: u16) -> Option<[u8; 4]> {
        if x >= self.width || y >= self.height {
            return None;
        }
        let i = (usize::from(y) * usize::from(self.width) + usize::from(x)) * 4;
        Some([
            self.data[i],
            self.data[i + 1],
            self.data[i + 2],
            self.data[i + 3],
        ])
    }
}

#[allow(
    clippy::cast_possible_truncation,
    reason = "c * a / 255 never exceeds 255"
)]
fn premultiply(c: u8, a: u8) -> u8 {
    ((u32::from(c) * u32::from(a) + 127) / 255) as u8
}
