// Copyright 2026 the Inkcard Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Inkcard: render text onto a styled card and export it as an image.
//!
//! A render is a full repaint, sequenced by [`Renderer::render`]:
//!
//! 1. clear to the background color,
//! 2. draw the background image per its fit mode and opacity,
//! 3. draw the enabled decorations ([`inkcard_decor`]),
//! 4. wrap the text against `width - 2 * padding` ([`inkcard_layout`]) and
//!    draw the block vertically centered, each line aligned inside the padding,
//! 5. run the pixel filters ([`inkcard_filters`]),
//! 6. cut the rounded-corner mask when the style has a corner radius.
//!
//! Rendering never fails. Missing fonts fall back to the default family and
//! then to a built-in face; a missing background image is skipped. Each
//! degradation is logged and returned as a [`RenderNotice`]. The caller's
//! surface is only replaced once the new frame is complete.
//!
//! [`Editor`] keeps a style, a text and the rendered surface together and
//! re-renders after every [`StyleChange`]. Finished cards are exported with
//! [`inkcard_export`] and can be kept in a bounded [`History`].
//!
//! ```rust
//! use inkcard::{Renderer, StyleConfig, Surface};
//!
//! let mut renderer = Renderer::new();
//! let mut surface = Surface::new(320, 200).unwrap();
//! let report = renderer.render(&mut surface, &StyleConfig::default(), "Hello world");
//! assert_eq!(report.lines, 1);
//! // No fonts are registered, so the built-in face was used.
//! assert_eq!(report.notices.len(), 1);
//! ```

mod editor;
mod history;
mod renderer;

use thiserror::Error;

pub use editor::Editor;
pub use history::{History, HistoryEntry, MAX_HISTORY};
pub use renderer::Renderer;

pub use inkcard_decor::{Decoration, DecorationKind, DecorationSet};
pub use inkcard_export::{ExportError, ExportFormat, ExportRequest};
pub use inkcard_filters::{FilterParams, FilterPreset};
pub use inkcard_style::{
    Background, ConfigError, FitMode, StyleChange, StyleConfig, Template, TextAlign,
};
pub use inkcard_surface::css_color::CssColor;
pub use inkcard_surface::{Surface, SurfaceError};
pub use inkcard_text::FontError;

/// A non-fatal degradation during a render.
#[derive(Clone, Debug, PartialEq, Eq, Error)]
pub enum RenderNotice {
    /// The requested family is missing; the default family was used.
    #[error("font family {requested:?} is not registered, used {fallback:?}")]
    FontFallback {
        /// Family the style asked for.
        requested: String,
        /// Family used instead.
        fallback: String,
    },
    /// Neither the requested nor the default family is registered.
    #[error("font family {requested:?} is not registered and no default font is, used the built-in face")]
    BuiltinFont {
        /// Family the style asked for.
        requested: String,
    },
    /// The background image key is not registered; the layer was skipped.
    #[error("background image {key:?} is not registered, skipped it")]
    MissingImage {
        /// Key the style referenced.
        key: String,
    },
}

/// What happened during one render.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct RenderReport {
    /// Degradations, in the order they occurred, each reported once.
    pub notices: Vec<RenderNotice>,
    /// Number of text lines drawn.
    pub lines: usize,
}

impl RenderReport {
    /// Returns `true` if nothing degraded.
    pub fn is_clean(&self) -> bool {
        self.notices.is_empty()
    }

    /// Records `notice` unless an identical one is already recorded.
    fn notice(&mut self, notice: RenderNotice) {
        if !self.notices.contains(&notice) {
            self.notices.push(notice);
        }
    }
}
