// Copyright 2026 the Inkcard Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

use inkcard_export::{ExportError, ExportRequest, export};
use inkcard_style::{StyleChange, StyleConfig};
use inkcard_surface::{Surface, SurfaceError};

use crate::{History, HistoryEntry, RenderReport, Renderer};

/// A card being edited: its style, its text and the last rendered surface.
///
/// Every edit goes through [`Editor::apply`] or [`Editor::set_text`] and is
/// followed by a full re-render, so [`Editor::surface`] always shows the
/// current state. [`Editor::version`] counts those renders.
#[derive(Debug)]
pub struct Editor {
    renderer: Renderer,
    style: StyleConfig,
    text: String,
    surface: Surface,
    version: u64,
    history: History,
    last_report: RenderReport,
}

impl Editor {
    /// An editor with the default style and empty text, rendered once.
    pub fn new(width: u32, height: u32) -> Result<Self, SurfaceError> {
        Self::with_renderer(Renderer::new(), width, height)
    }

    /// Like [`Editor::new`], with fonts and images already registered.
    pub fn with_renderer(renderer: Renderer, width: u32, height: u32) -> Result<Self, SurfaceError> {
        let mut editor = Self {
            renderer,
            style: StyleConfig::default(),
            text: String::new(),
            surface: Surface::new(width, height)?,
            version: 0,
            history: History::new(),
            last_report: RenderReport::default(),
        };
        editor.refresh();
        Ok(editor)
    }

    /// Applies one style edit and re-renders.
    pub fn apply(&mut self, change: StyleChange) -> &RenderReport {
        tracing::debug!(?change, "style change");
        let style = core::mem::take(&mut self.style);
        self.style = style.applied(change);
        self.refresh()
    }

    /// Replaces the whole style and re-renders.
    pub fn set_style(&mut self, style: StyleConfig) -> &RenderReport {
        self.style = style;
        self.refresh()
    }

    /// Replaces the text and re-renders.
    pub fn set_text(&mut self, text: impl Into<String>) -> &RenderReport {
        self.text = text.into();
        self.refresh()
    }

    /// Re-renders with the current style and text.
    ///
    /// Call this after registering fonts or images through
    /// [`Editor::renderer_mut`].
    pub fn refresh(&mut self) -> &RenderReport {
        self.last_report = self
            .renderer
            .render(&mut self.surface, &self.style, &self.text);
        self.version += 1;
        &self.last_report
    }

    /// Current style, as edited; values are clamped only when rendering.
    pub fn style(&self) -> &StyleConfig {
        &self.style
    }

    /// Current text.
    pub fn text(&self) -> &str {
        &self.text
    }

    /// The last rendered frame.
    pub fn surface(&self) -> &Surface {
        &self.surface
    }

    /// Number of renders so far.
    pub fn version(&self) -> u64 {
        self.version
    }

    /// Report from the last render.
    pub fn last_report(&self) -> &RenderReport {
        &self.last_report
    }

    /// The renderer, for registering fonts and images.
    pub fn renderer_mut(&mut self) -> &mut Renderer {
        &mut self.renderer
    }

    /// Saved snapshots.
    pub fn history(&self) -> &History {
        &self.history
    }

    /// Mutable access to the saved snapshots.
    pub fn history_mut(&mut self) -> &mut History {
        &mut self.history
    }

    /// A PNG request at the surface's size.
    pub fn export_request(&self) -> ExportRequest {
        ExportRequest::for_surface(&self.surface)
    }

    /// Encodes the current frame.
    pub fn export(&self, request: &ExportRequest) -> Result<Vec<u8>, ExportError> {
        export(&self.surface, request)
    }

    /// Stores the current style, text and a PNG preview in the history.
    pub fn save_snapshot(&mut self, timestamp: u64) -> Result<&HistoryEntry, ExportError> {
        let preview = self.export(&self.export_request())?;
        Ok(self
            .history
            .record(self.style.clone(), self.text.clone(), preview, timestamp))
    }

    /// Restores the style and text of snapshot `id` and re-renders.
    ///
    /// Returns `None` if no such snapshot is kept.
    pub fn restore(&mut self, id: u64) -> Option<&RenderReport> {
        let entry = self.history.get(id)?;
        self.style = entry.style.clone();
        self.text = entry.text.clone();
        Some(self.refresh())
    }
}
