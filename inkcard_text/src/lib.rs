// Copyright 2026 the Inkcard Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Inkcard Text: named fonts, glyph metrics and glyph drawing.
//!
//! Fonts are registered at runtime under a family name with
//! [`FontRegistry::register_font`]. Rendering asks the registry for a
//! [`ScaledFace`] by family; when that family is missing the registry falls
//! back to its default family, and when that is missing too it hands out
//! the built-in box face, so text rendering never fails for lack of a font.
//! [`ResolvedFace::source`] tells the caller which of those happened.
//!
//! [`ScaledFace`] implements [`FontMetrics`](inkcard_layout::FontMetrics), so
//! it plugs directly into [`inkcard_layout::layout`].

mod face;

use hashbrown::HashMap;
use peniko::{Blob, FontData};
use skrifa::FontRef;
use thiserror::Error;

pub use face::ScaledFace;

/// Family used when a requested family is not registered.
pub const DEFAULT_FAMILY: &str = "Arial";

/// Errors from font registration.
#[derive(Debug, Error)]
pub enum FontError {
    /// The family name is empty or only whitespace.
    #[error("font family name must not be empty")]
    EmptyName,
    /// The bytes are not a font the parser understands.
    #[error("font data for {name:?} could not be parsed: {reason}")]
    Parse {
        /// Family the data was registered under.
        name: String,
        /// Parser message.
        reason: String,
    },
}

/// Where a [`ResolvedFace`] came from.
#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub enum FaceSource {
    /// The requested family was registered.
    Requested,
    /// The requested family was missing; the default family was used.
    DefaultFamily,
    /// Neither family was registered; the built-in face was used.
    Builtin,
}

/// A face picked by [`FontRegistry::face`].
#[derive(Clone, Debug)]
pub struct ResolvedFace {
    /// The face to measure and draw with.
    pub face: ScaledFace,
    /// How the face was found.
    pub source: FaceSource,
}

/// Fonts registered by family name.
///
/// Family names are matched ASCII case-insensitively, ignoring surrounding
/// whitespace.
#[derive(Clone, Debug)]
pub struct FontRegistry {
    fonts: HashMap<String, FontData>,
    default_family: String,
}

impl Default for FontRegistry {
    fn default() -> Self {
        Self::new()
    }
}

fn family_key(name: &str) -> String {
    name.trim().to_ascii_lowercase()
}

impl FontRegistry {
    /// Creates an empty registry whose default family is [`DEFAULT_FAMILY`].
    pub fn new() -> Self {
        Self {
            fonts: HashMap::new(),
            default_family: DEFAULT_FAMILY.to_owned(),
        }
    }

    /// Registers `bytes` as the font for family `name`.
    ///
    /// The data is validated before it is stored; an existing family of the
    /// same name is replaced. Collections use their first face.
    pub fn register_font(&mut self, name: &str, bytes: impl Into<Vec<u8>>) -> Result<(), FontError> {
        let key = family_key(name);
        if key.is_empty() {
            return Err(FontError::EmptyName);
        }
        let bytes = bytes.into();
        if let Err(e) = FontRef::from_index(&bytes, 0) {
            return Err(FontError::Parse {
                name: name.to_owned(),
                reason: e.to_string(),
            });
        }
        tracing::debug!(family = name, bytes = bytes.len(), "registered font");
        self.fonts.insert(key, FontData::new(Blob::from(bytes), 0));
        Ok(())
    }

    /// Returns `true` if `family` is registered.
    pub fn contains(&self, family: &str) -> bool {
        self.fonts.contains_key(&family_key(family))
    }

    /// Number of registered families.
    pub fn len(&self) -> usize {
        self.fonts.len()
    }

    /// Returns `true` if no fonts are registered.
    pub fn is_empty(&self) -> bool {
        self.fonts.is_empty()
    }

    /// Family used when a requested family is missing.
    pub fn default_family(&self) -> &str {
        &self.default_family
    }

    /// Changes the fallback family.
    pub fn set_default_family(&mut self, family: impl Into<String>) {
        self.default_family = family.into();
    }

    /// Picks a face for `family` at `size` pixels.
    ///
    /// `line_height_factor` multiplies `size` to get the line height.
    pub fn face(&self, family: &str, size: f32, line_height_factor: f32) -> ResolvedFace {
        if let Some(font) = self.fonts.get(&family_key(family)) {
            return ResolvedFace {
                face: ScaledFace::from_font(font.clone(), size, line_height_factor),
                source: FaceSource::Requested,
            };
        }
        if let Some(font) = self.fonts.get(&family_key(&self.default_family)) {
            return ResolvedFace {
                face: ScaledFace::from_font(font.clone(), size, line_height_factor),
                source: FaceSource::DefaultFamily,
            };
        }
        ResolvedFace {
            face: ScaledFace::builtin(size, line_height_factor),
            source: FaceSource::Builtin,
        }
    }
}

/// Derives a family name from a font file name by dropping its extension.
///
/// ```rust
/// assert_eq!(inkcard_text::family_from_file_name("FZKTJW.ttf"), "FZKTJW");
/// assert_eq!(inkcard_text::family_from_file_name("fonts/My.Font.otf"), "My.Font");
/// ```
pub fn family_from_file_name(file_name: &str) -> &str {
    let base = file_name.rsplit(['/', '\\']).next().unwrap_or(file_name);
    match base.rfind('.') {
        Some(dot) if dot > 0 => &base[..dot],
        _ => base,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use inkcard_layout::{FontMetrics, layout};
    use kurbo::Point;
    use peniko::Color;
    use vello_cpu::{Pixmap, RenderContext};

    const DEJAVU_SANS: &[u8] = include_bytes!("../../assets/fonts/dejavu/DejaVuSans.ttf");

    fn inked_pixels(ctx: &mut RenderContext) -> usize {
        let mut pixmap = Pixmap::new(ctx.width(), ctx.height());
        ctx.flush();
        ctx.render_to_pixmap(&mut pixmap);
        pixmap.data().iter().filter(|p| p.a > 0).count()
    }

    #[test]
    fn rejects_empty_name_and_garbage() {
        let mut registry = FontRegistry::new();
        assert!(matches!(
            registry.register_font("  ", vec![0; 4]),
            Err(FontError::EmptyName)
        ));
        assert!(matches!(
            registry.register_font("Bogus", b"not a font".to_vec()),
            Err(FontError::Parse { .. })
        ));
        assert!(registry.is_empty(), "failed registrations must not be stored");
    }

    #[test]
    fn missing_family_uses_builtin_face() {
        let registry = FontRegistry::new();
        let resolved = registry.face("Nope", 20.0, 1.5);
        assert_eq!(resolved.source, FaceSource::Builtin);
        assert!(resolved.face.is_builtin(), "expected the box face");
        assert_eq!(resolved.face.line_height(), 30.0);
        assert_eq!(resolved.face.measure("ab"), 24.0);
        assert_eq!(resolved.face.measure("你好"), 40.0);
    }

    #[test]
    fn builtin_baseline_centers_glyph_extent() {
        let face = ScaledFace::builtin(20.0, 2.0);
        // Box is 40px, glyph extent 20px: 10px above, then a 16px ascent.
        assert_eq!(face.baseline_in_box(100.0), 126.0);
    }

    #[test]
    fn builtin_face_draws_boxes() {
        let face = ScaledFace::builtin(16.0, 1.5);
        let mut ctx = RenderContext::new(64, 24);
        face.draw(&mut ctx, "ab", Point::new(2.0, 18.0), Color::BLACK);
        assert!(inked_pixels(&mut ctx) > 0, "expected some glyph coverage");

        let mut blank = RenderContext::new(64, 24);
        face.draw(&mut blank, "   ", Point::new(2.0, 18.0), Color::BLACK);
        assert_eq!(inked_pixels(&mut blank), 0);
    }

    #[test]
    fn registered_font_measures_and_draws() {
        let bytes = DEJAVU_SANS.to_vec();
        let mut registry = FontRegistry::new();
        registry.register_font("DejaVu Sans", bytes).unwrap();
        assert!(registry.contains("dejavu sans"), "lookups ignore case");

        let resolved = registry.face("DejaVu Sans", 24.0, 1.5);
        assert_eq!(resolved.source, FaceSource::Requested);
        let face = resolved.face;
        assert!(face.ascent() > 0.0 && face.descent() > 0.0, "{face:?}");
        let w = face.measure("Hello");
        assert!(w > 24.0 && w < 24.0 * 5.0, "implausible width {w}");

        let result = layout("Hello world, wrapped text", 100.0, &face);
        assert!(result.lines.len() > 1, "expected wrapping");

        let mut ctx = RenderContext::new(120, 40);
        face.draw(&mut ctx, "Hello", Point::new(4.0, 30.0), Color::BLACK);
        assert!(inked_pixels(&mut ctx) > 0, "expected glyph coverage");
    }

    #[test]
    fn default_family_is_used_as_fallback() {
        let bytes = DEJAVU_SANS.to_vec();
        let mut registry = FontRegistry::new();
        registry.register_font(DEFAULT_FAMILY, bytes).unwrap();
        let resolved = registry.face("Georgia", 24.0, 1.5);
        assert_eq!(resolved.source, FaceSource::DefaultFamily);
        assert!(!resolved.face.is_builtin(), "default family has real glyphs");
    }

    #[test]
    fn file_names_become_families() {
        assert_eq!(family_from_file_name("Lobster.woff2"), "Lobster");
        assert_eq!(family_from_file_name(".hidden"), ".hidden");
        assert_eq!(family_from_file_name("C:\\fonts\\Noto.ttf"), "Noto");
    }
}
