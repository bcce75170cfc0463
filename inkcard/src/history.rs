// Copyright 2026 the Inkcard Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

use std::collections::VecDeque;

use inkcard_style::{ConfigError, StyleConfig};
use serde::{Deserialize, Serialize, Serializer};

/// Number of snapshots a [`History`] keeps.
pub const MAX_HISTORY: usize = 10;

/// A saved card: the style and text that produced it, plus a PNG preview.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct HistoryEntry {
    /// Identifier, unique within one history.
    pub id: u64,
    /// Style at the time of the snapshot.
    pub style: StyleConfig,
    /// Text at the time of the snapshot.
    pub text: String,
    /// PNG-encoded preview.
    pub preview: Vec<u8>,
    /// Caller-supplied timestamp in milliseconds.
    pub timestamp: u64,
}

/// Recent snapshots, newest first, capped at [`MAX_HISTORY`].
///
/// Ids come from a counter that only grows, so an id is never handed out
/// twice even after its entry is removed or evicted. Serialized as a plain
/// array of entries; the counter resumes past the largest id on load.
#[derive(Clone, Debug, Default, PartialEq, Deserialize)]
#[serde(from = "VecDeque<HistoryEntry>")]
pub struct History {
    entries: VecDeque<HistoryEntry>,
    /// Last id handed out.
    last_id: u64,
}

impl From<VecDeque<HistoryEntry>> for History {
    fn from(entries: VecDeque<HistoryEntry>) -> Self {
        let last_id = entries.iter().map(|e| e.id).max().unwrap_or(0);
        Self { entries, last_id }
    }
}

impl Serialize for History {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        self.entries.serialize(serializer)
    }
}

impl History {
    /// An empty history.
    pub fn new() -> Self {
        Self::default()
    }

    /// Adds a snapshot at the front, evicting the oldest beyond the cap.
    pub fn record(
        &mut self,
        style: StyleConfig,
        text: impl Into<String>,
        preview: Vec<u8>,
        timestamp: u64,
    ) -> &HistoryEntry {
        self.last_id += 1;
        let id = self.last_id;
        self.entries.push_front(HistoryEntry {
            id,
            style,
            text: text.into(),
            preview,
            timestamp,
        });
        while self.entries.len() > MAX_HISTORY {
            if let Some(evicted) = self.entries.pop_back() {
                tracing::debug!(id = evicted.id, "history entry evicted");
            }
        }
        &self.entries[0]
    }

    /// Snapshots, newest first.
    pub fn entries(&self) -> impl ExactSizeIterator<Item = &HistoryEntry> {
        self.entries.iter()
    }

    /// The snapshot with `id`, if it is still kept.
    pub fn get(&self, id: u64) -> Option<&HistoryEntry> {
        self.entries.iter().find(|e| e.id == id)
    }

    /// Removes and returns the snapshot with `id`.
    pub fn remove(&mut self, id: u64) -> Option<HistoryEntry> {
        let index = self.entries.iter().position(|e| e.id == id)?;
        self.entries.remove(index)
    }

    /// Drops every snapshot. Ids keep counting from where they were.
    pub fn clear(&mut self) {
        self.entries.clear();
    }

    /// Number of snapshots.
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    /// Returns `true` if there are no snapshots.
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Serializes the snapshots as a JSON array, newest first.
    pub fn to_json(&self) -> Result<String, ConfigError> {
        Ok(serde_json::to_string(self)?)
    }

    /// Parses a JSON array written by [`History::to_json`].
    ///
    /// Entries past [`MAX_HISTORY`] are dropped from the old end.
    pub fn from_json(json: &str) -> Result<Self, ConfigError> {
        let mut history: Self = serde_json::from_str(json)?;
        history.entries.truncate(MAX_HISTORY);
        Ok(history)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn style(size: f32) -> StyleConfig {
        StyleConfig {
            font_size: size,
            ..StyleConfig::default()
        }
    }

    #[test]
    fn newest_first_and_capped() {
        let mut history = History::new();
        for i in 0..15_u64 {
            let entry = history.record(style(10.0 + i as f32), format!("t{i}"), vec![], i);
            assert_eq!(entry.id, i + 1);
        }
        assert_eq!(history.len(), MAX_HISTORY);
        let ids: Vec<u64> = history.entries().map(|e| e.id).collect();
        assert_eq!(ids, (6..=15).rev().collect::<Vec<_>>());
        assert!(history.get(5).is_none());
        assert_eq!(history.get(15).unwrap().text, "t14");
    }

    #[test]
    fn ids_stay_unique_after_removal() {
        let mut history = History::new();
        history.record(style(20.0), "a", vec![], 0);
        history.record(style(20.0), "b", vec![], 1);
        let removed = history.remove(1).unwrap();
        assert_eq!(removed.text, "a");
        assert_eq!(history.record(style(20.0), "c", vec![], 2).id, 3);
        assert!(history.remove(1).is_none());
        history.clear();
        assert!(history.is_empty());
    }

    #[test]
    fn removed_newest_id_is_not_reused() {
        let mut history = History::new();
        history.record(style(20.0), "a", vec![], 0);
        history.record(style(20.0), "b", vec![], 1);
        assert_eq!(history.remove(2).unwrap().text, "b");
        let id = history.record(style(20.0), "c", vec![], 2).id;
        assert_eq!(id, 3);
        assert!(history.get(2).is_none());

        history.clear();
        assert_eq!(history.record(style(20.0), "d", vec![], 3).id, 4);
    }

    #[test]
    fn loaded_history_continues_past_the_largest_id() {
        let mut history = History::new();
        for i in 0..3 {
            history.record(style(20.0), format!("t{i}"), vec![], i);
        }
        let mut back = History::from_json(&history.to_json().unwrap()).unwrap();
        assert_eq!(back, history);
        assert_eq!(back.record(style(20.0), "next", vec![], 9).id, 4);
    }

    #[test]
    fn json_keeps_order_and_content() {
        let mut history = History::new();
        history.record(style(18.0), "first", vec![1, 2, 3], 100);
        history.record(style(30.0), "second", vec![], 200);
        let json = history.to_json().unwrap();
        assert!(json.starts_with('['), "{json}");
        assert!(json.contains("\"timestamp\":200"), "{json}");
        let back = History::from_json(&json).unwrap();
        assert_eq!(back, history);
        assert!(History::from_json("{").is_err());
    }
}
