// Copyright 2026 the Inkcard Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Inkcard Layout: greedy line breaking against a pixel width budget.
//!
//! This crate turns a source string into an ordered list of lines that each
//! fit a maximum width, as measured by a caller-provided [`FontMetrics`].
//! It does not shape or draw anything; it only decides where lines end.
//!
//! # Breaking rules
//!
//! The scan keeps a candidate line and grows it one character at a time.
//!
//! - A hard newline (`\n`) always ends the current line. The newline belongs
//!   to the line's source range but never to its visible text.
//! - ASCII spaces and the CJK punctuation marks `，。；！？` are soft break
//!   points. When the candidate overflows, the line ends just after the most
//!   recent soft break point.
//! - A run with no usable break point is split after the last character
//!   that still fits. At least one character is always taken, so layout
//!   makes progress even when a single glyph is wider than the budget.
//!
//! Visible line text is trimmed of surrounding whitespace; break-point
//! search always sees the untrimmed text.
//!
//! # Example
//!
//! ```rust
//! use inkcard_layout::{FixedAdvance, layout};
//!
//! // Every character is 10px wide; lines are 20px tall.
//! let metrics = FixedAdvance::new(10.0, 20.0);
//! let result = layout("hello world", 60.0, &metrics);
//!
//! let lines: Vec<&str> = result.lines.iter().map(|l| l.text).collect();
//! assert_eq!(lines, ["hello", "world"]);
//! assert_eq!(result.total_height, 40.0);
//! ```

#![no_std]

extern crate alloc;

use alloc::vec::Vec;
use core::ops::Range;

/// Measurement capability used by [`layout`].
///
/// Implementations are expected to be deterministic: measuring the same
/// string twice must yield the same width.
pub trait FontMetrics {
    /// Rendered advance width of `text`, in pixels.
    fn measure(&self, text: &str) -> f32;

    /// Distance between consecutive baselines, in pixels.
    fn line_height(&self) -> f32;
}

impl<T: FontMetrics + ?Sized> FontMetrics for &T {
    fn measure(&self, text: &str) -> f32 {
        (**self).measure(text)
    }

    fn line_height(&self) -> f32 {
        (**self).line_height()
    }
}

/// Metrics where every character occupies the same advance.
///
/// Useful for tests and for faces without per-glyph advance data.
#[derive(Copy, Clone, Debug, PartialEq)]
pub struct FixedAdvance {
    /// Advance of a single character, in pixels.
    pub advance: f32,
    /// Line height, in pixels.
    pub line_height: f32,
}

impl FixedAdvance {
    /// Creates fixed-advance metrics.
    pub const fn new(advance: f32, line_height: f32) -> Self {
        Self {
            advance,
            line_height,
        }
    }
}

impl FontMetrics for FixedAdvance {
    fn measure(&self, text: &str) -> f32 {
        text.chars().count() as f32 * self.advance
    }

    fn line_height(&self) -> f32 {
        self.line_height
    }
}

/// One laid-out line.
#[derive(Clone, Debug, PartialEq)]
pub struct Line<'a> {
    /// Visible text, trimmed of leading and trailing whitespace.
    pub text: &'a str,
    /// Byte range of the line in the source, before trimming.
    ///
    /// Includes the terminating newline when the line ended on one, so the
    /// ranges of consecutive lines tile the source without gaps.
    pub range: Range<usize>,
    /// Measured width of [`Line::text`].
    pub width: f32,
}

/// Output of [`layout`].
#[derive(Clone, Debug, Default, PartialEq)]
pub struct LayoutResult<'a> {
    /// Lines in reading order.
    pub lines: Vec<Line<'a>>,
    /// Line height used to stack the lines.
    pub line_height: f32,
    /// Height of the whole block: `lines.len() * line_height`.
    pub total_height: f32,
}

impl LayoutResult<'_> {
    /// Returns `true` if no lines were produced.
    pub fn is_empty(&self) -> bool {
        self.lines.is_empty()
    }

    /// Widest visible line, or `0.0` for an empty result.
    pub fn max_line_width(&self) -> f32 {
        self.lines.iter().map(|l| l.width).fold(0.0, f32::max)
    }
}

/// Returns `true` for characters after which a line may softly break.
pub fn is_soft_break(ch: char) -> bool {
    matches!(ch, ' ' | '，' | '。' | '；' | '！' | '？')
}

/// Wraps `text` into lines no wider than `max_width`.
///
/// See the [crate documentation](crate) for the breaking rules. Empty input
/// produces an empty result.
pub fn layout<'a, M: FontMetrics + ?Sized>(
    text: &'a str,
    max_width: f32,
    metrics: &M,
) -> LayoutResult<'a> {
    let mut lines = Vec::new();
    let mut start = 0;
    while start < text.len() {
        let next = next_line_end(text, start, max_width, metrics);
        let text_range = visible_range(text, start, next);
        let visible = text[text_range].trim();
        lines.push(Line {
            text: visible,
            range: start..next,
            width: metrics.measure(visible),
        });
        start = next;
    }

    let line_height = metrics.line_height();
    let total_height = lines.len() as f32 * line_height;
    LayoutResult {
        lines,
        line_height,
        total_height,
    }
}

/// Strips a single terminating newline from `start..end`.
fn visible_range(text: &str, start: usize, end: usize) -> Range<usize> {
    if text[start..end].ends_with('\n') {
        start..end - 1
    } else {
        start..end
    }
}

/// Finds the exclusive end of the line that starts at `start`.
///
/// The returned index is always greater than `start`.
fn next_line_end<M: FontMetrics + ?Sized>(
    text: &str,
    start: usize,
    max_width: f32,
    metrics: &M,
) -> usize {
    // End of the candidate that is known to fit.
    let mut end = start;
    // End of the candidate just after the most recent soft break point.
    let mut last_break = None;

    for (offset, ch) in text[start..].char_indices() {
        let pos = start + offset;
        let after = pos + ch.len_utf8();
        if ch == '\n' {
            return after;
        }
        if metrics.measure(&text[start..after]) > max_width {
            return match last_break {
                Some(b) => b,
                None if end > start => end,
                // Not even one character fits; take it anyway.
                None => after,
            };
        }
        end = after;
        // A break on the very first character would yield an empty line.
        if pos > start && is_soft_break(ch) {
            last_break = Some(after);
        }
    }
    text.len()
}
