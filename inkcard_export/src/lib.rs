// Copyright 2026 the Inkcard Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Inkcard Export: turn a finished [`Surface`] into encoded image bytes.
//!
//! [`export`] resamples the surface to the requested size with a Lanczos3
//! filter and encodes it:
//!
//! - PNG through the `png` crate, lossless and byte-for-byte deterministic,
//! - JPEG through `image` at `quality * 100`, flattened onto white,
//! - WebP through `webp` (libwebp), lossy at `quality * 100` with alpha.
//!
//! Export never mutates the surface. Invalid requests fail before any work
//! is done.

mod encode;

use core::fmt;
use core::str::FromStr;

use inkcard_surface::Surface;
use serde::{Deserialize, Serialize};
use thiserror::Error;

/// Largest width or height an export may request.
pub const MAX_EXPORT_DIMENSION: u32 = 16_384;

/// Errors from [`export`].
#[derive(Debug, Error)]
pub enum ExportError {
    /// Width or height is zero.
    #[error("export target must have a non-zero area, got {width}x{height}")]
    ZeroArea {
        /// Requested width.
        width: u32,
        /// Requested height.
        height: u32,
    },
    /// Width or height exceeds [`MAX_EXPORT_DIMENSION`].
    #[error("export target {width}x{height} exceeds {max}x{max}", max = MAX_EXPORT_DIMENSION)]
    TooLarge {
        /// Requested width.
        width: u32,
        /// Requested height.
        height: u32,
    },
    /// Quality is not a finite number in `0..=1`.
    #[error("export quality must be within 0..=1, got {0}")]
    Quality(f32),
    /// No format has this name.
    #[error("unknown export format {0:?}")]
    UnknownFormat(String),
    /// The PNG encoder failed.
    #[error("png encoding failed: {0}")]
    Png(#[from] png::EncodingError),
    /// The JPEG encoder failed.
    #[error("jpeg encoding failed: {0}")]
    Image(#[from] image::ImageError),
    /// The WebP encoder failed.
    #[error("webp encoding failed: {0:?}")]
    WebP(webp::WebPEncodingError),
}

/// Output encoding.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ExportFormat {
    /// Lossless PNG.
    #[default]
    Png,
    /// Lossy JPEG.
    Jpeg,
    /// Lossy WebP.
    #[serde(rename = "webp")]
    WebP,
}

impl ExportFormat {
    /// Every format.
    pub const ALL: [Self; 3] = [Self::Png, Self::Jpeg, Self::WebP];

    /// File extension, without the dot.
    pub fn extension(self) -> &'static str {
        match self {
            Self::Png => "png",
            Self::Jpeg => "jpeg",
            Self::WebP => "webp",
        }
    }

    /// MIME type of the encoded bytes.
    pub fn mime_type(self) -> &'static str {
        match self {
            Self::Png => "image/png",
            Self::Jpeg => "image/jpeg",
            Self::WebP => "image/webp",
        }
    }

    /// Approximate bits per pixel at `quality`, used for size estimates.
    pub fn bits_per_pixel(self, quality: f32) -> f64 {
        let q = f64::from(quality);
        match self {
            Self::Png => 32.0,
            Self::Jpeg => 24.0 * q,
            Self::WebP => 16.0 * q,
        }
    }
}

impl fmt::Display for ExportFormat {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.extension())
    }
}

impl FromStr for ExportFormat {
    type Err = ExportError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "png" => Ok(Self::Png),
            "jpeg" | "jpg" => Ok(Self::Jpeg),
            "webp" => Ok(Self::WebP),
            _ => Err(ExportError::UnknownFormat(s.to_owned())),
        }
    }
}

/// Target size, format and quality of one export.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct ExportRequest {
    /// Output width in pixels.
    pub width: u32,
    /// Output height in pixels.
    pub height: u32,
    /// Output encoding.
    pub format: ExportFormat,
    /// Quality in `0..=1` for lossy formats.
    pub quality: f32,
    /// Keep the surface's aspect ratio when one dimension is edited.
    pub lock_aspect: bool,
}

impl ExportRequest {
    /// Default quality for lossy formats.
    pub const DEFAULT_QUALITY: f32 = 0.9;

    /// A PNG request at the surface's native size, with the aspect ratio locked.
    pub fn for_surface(surface: &Surface) -> Self {
        Self {
            width: u32::from(surface.width()),
            height: u32::from(surface.height()),
            format: ExportFormat::Png,
            quality: Self::DEFAULT_QUALITY,
            lock_aspect: true,
        }
    }

    /// Sets the width; with the aspect lock on, the height follows from the
    /// current aspect ratio of `surface`.
    #[must_use]
    pub fn with_width(mut self, surface: &Surface, width: u32) -> Self {
        self.width = width;
        if self.lock_aspect {
            self.height = paired_dimension(f64::from(width) / surface.aspect_ratio());
        }
        self
    }

    /// Sets the height; with the aspect lock on, the width follows from the
    /// current aspect ratio of `surface`.
    #[must_use]
    pub fn with_height(mut self, surface: &Surface, height: u32) -> Self {
        self.height = height;
        if self.lock_aspect {
            self.width = paired_dimension(f64::from(height) * surface.aspect_ratio());
        }
        self
    }

    /// Sets the format.
    #[must_use]
    pub fn with_format(mut self, format: ExportFormat) -> Self {
        self.format = format;
        self
    }

    /// Sets the quality.
    #[must_use]
    pub fn with_quality(mut self, quality: f32) -> Self {
        self.quality = quality;
        self
    }

    /// Checks the target size and quality.
    pub fn validate(&self) -> Result<(), ExportError> {
        let (width, height) = (self.width, self.height);
        if width == 0 || height == 0 {
            return Err(ExportError::ZeroArea { width, height });
        }
        if width > MAX_EXPORT_DIMENSION || height > MAX_EXPORT_DIMENSION {
            return Err(ExportError::TooLarge { width, height });
        }
        if !(0.0..=1.0).contains(&self.quality) {
            return Err(ExportError::Quality(self.quality));
        }
        Ok(())
    }

    /// Rough encoded size in bytes.
    #[allow(
        clippy::cast_possible_truncation,
        clippy::cast_sign_loss,
        reason = "an estimate; the product is positive and far below u64::MAX"
    )]
    pub fn estimated_size(&self) -> u64 {
        let pixels = f64::from(self.width) * f64::from(self.height);
        (pixels * self.format.bits_per_pixel(self.quality.clamp(0.0, 1.0)) / 8.0).round() as u64
    }

    /// A download name such as `image-1700000000000.png`.
    pub fn file_name(&self, timestamp_ms: u64) -> String {
        format!("image-{timestamp_ms}.{}", self.format.extension())
    }
}

#[allow(
    clippy::cast_possible_truncation,
    clippy::cast_sign_loss,
    reason = "the value is rounded and clamped into u32 range"
)]
fn paired_dimension(value: f64) -> u32 {
    if value.is_finite() {
        value.round().clamp(1.0, f64::from(u32::MAX)) as u32
    } else {
        1
    }
}

/// Resamples and encodes `surface` as described by `request`.
pub fn export(surface: &Surface, request: &ExportRequest) -> Result<Vec<u8>, ExportError> {
    request.validate()?;
    let (width, height) = (request.width, request.height);
    tracing::debug!(
        width,
        height,
        format = %request.format,
        quality = request.quality,
        "exporting surface"
    );
    let pixels = encode::resample(surface, width, height);
    let bytes = match request.format {
        ExportFormat::Png => encode::png(&pixels, width, height)?,
        ExportFormat::Jpeg => encode::jpeg(&pixels, width, height, request.quality)?,
        ExportFormat::WebP => {
            encode::webp(&pixels, width, height, request.quality).map_err(ExportError::WebP)?
        }
    };
    tracing::debug!(bytes = bytes.len(), "export finished");
    Ok(bytes)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn surface(width: u32, height: u32) -> Surface {
        Surface::new(width, height).unwrap()
    }

    #[test]
    fn aspect_lock_follows_current_surface() {
        let s = surface(800, 600);
        let req = ExportRequest::for_surface(&s).with_width(&s, 400);
        assert_eq!((req.width, req.height), (400, 300));
        let req = req.with_height(&s, 900);
        assert_eq!((req.width, req.height), (1200, 900));

        // A different surface changes the ratio used by the next edit.
        let square = surface(500, 500);
        let req = req.with_width(&square, 250);
        assert_eq!((req.width, req.height), (250, 250));
    }

    #[test]
    fn unlocked_edits_leave_the_other_dimension() {
        let s = surface(800, 600);
        let req = ExportRequest {
            lock_aspect: false,
            ..ExportRequest::for_surface(&s)
        }
        .with_width(&s, 100);
        assert_eq!((req.width, req.height), (100, 600));
    }

    #[test]
    fn tiny_edits_never_reach_zero() {
        let s = surface(1000, 10);
        let req = ExportRequest::for_surface(&s).with_width(&s, 1);
        assert_eq!(req.height, 1);
    }

    #[test]
    fn validation() {
        let s = surface(4, 4);
        let base = ExportRequest::for_surface(&s);
        assert!(base.validate().is_ok());
        assert!(matches!(
            ExportRequest { width: 0, ..base }.validate(),
            Err(ExportError::ZeroArea { .. })
        ));
        assert!(matches!(
            ExportRequest {
                height: MAX_EXPORT_DIMENSION + 1,
                ..base
            }
            .validate(),
            Err(ExportError::TooLarge { .. })
        ));
        for quality in [-0.1, 1.5, f32::NAN] {
            assert!(matches!(
                base.with_quality(quality).validate(),
                Err(ExportError::Quality(_))
            ));
        }
    }

    #[test]
    fn estimates_use_bits_per_pixel() {
        let s = surface(800, 600);
        let png = ExportRequest::for_surface(&s);
        assert_eq!(png.estimated_size(), 800 * 600 * 4);
        let jpeg = png.with_format(ExportFormat::Jpeg).with_quality(0.5);
        assert_eq!(jpeg.estimated_size(), 800 * 600 * 3 / 2);
        let webp = png.with_format(ExportFormat::WebP).with_quality(1.0);
        assert_eq!(webp.estimated_size(), 800 * 600 * 2);
    }

    #[test]
    fn formats_parse_and_name() {
        assert_eq!("JPG".parse::<ExportFormat>().unwrap(), ExportFormat::Jpeg);
        assert_eq!("webp".parse::<ExportFormat>().unwrap(), ExportFormat::WebP);
        assert!("gif".parse::<ExportFormat>().is_err());
        let req = ExportRequest::for_surface(&surface(2, 2)).with_format(ExportFormat::WebP);
        assert_eq!(req.file_name(42), "image-42.webp");
        assert_eq!(ExportFormat::Jpeg.mime_type(), "image/jpeg");
    }
}
