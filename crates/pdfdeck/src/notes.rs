//! Speaker notes, keyed by stable slide id.
//!
//! Notes live in a plain UTF-8 file next to the first imported PDF
//! (`talk.pdf` -> `talk.pdf.notes`):
//!
//! ```text
//! ==XXslide0
//! Welcome everyone.
//! ==XXslide3
//! Mention the benchmark numbers.
//! ```
//!
//! Every line containing the marker starts a new entry; text before the
//! first marker is ignored.

use std::collections::BTreeMap;
use std::path::{Path, PathBuf};

use anyhow::{Context, Result};

use crate::deck::SlideId;

pub const SLIDE_MARKER: &str = "==XXslide";

#[derive(Debug, Clone, Default)]
pub struct NotesStore {
    notes: BTreeMap<SlideId, String>,
    path: Option<PathBuf>,
}

impl NotesStore {
    pub fn new() -> Self {
        Self::default()
    }

    /// Load the notes file at `path` and bind the store to it. A missing file
    /// is not an error: the store starts empty and will be created on save.
    pub fn read(path: &Path) -> Result<Self> {
        let mut store = Self {
            notes: BTreeMap::new(),
            path: Some(path.to_path_buf()),
        };
        if !path.is_file() {
            tracing::debug!(path = %path.display(), "no notes file yet");
            return Ok(store);
        }
        let contents = std::fs::read_to_string(path)
            .with_context(|| format!("Failed to read notes from {}", path.display()))?;
        store.notes = parse(&contents);
        tracing::info!(path = %path.display(), entries = store.notes.len(), "notes loaded");
        Ok(store)
    }

    pub fn path(&self) -> Option<&Path> {
        self.path.as_deref()
    }

    pub fn get(&self, id: SlideId) -> Option<&str> {
        self.notes.get(&id).map(String::as_str)
    }

    /// Store the text for a slide. Empty text drops the entry.
    pub fn set(&mut self, id: SlideId, text: impl Into<String>) {
        let text = text.into();
        if text.is_empty() {
            self.notes.remove(&id);
        } else {
            self.notes.insert(id, text);
        }
    }

    #[cfg(test)]
    pub fn len(&self) -> usize {
        self.notes.len()
    }

    pub fn is_empty(&self) -> bool {
        self.notes.is_empty()
    }

    pub fn iter(&self) -> impl Iterator<Item = (SlideId, &str)> {
        self.notes.iter().map(|(id, text)| (*id, text.as_str()))
    }

    /// Write the notes file. Returns `false` when there was nothing to write
    /// or the store is not bound to a file.
    pub fn save(&self) -> Result<bool> {
        let Some(path) = &self.path else {
            return Ok(false);
        };
        if self.notes.is_empty() {
            return Ok(false);
        }
        std::fs::write(path, render(&self.notes))
            .with_context(|| format!("Failed to write notes to {}", path.display()))?;
        tracing::info!(path = %path.display(), entries = self.notes.len(), "notes saved");
        Ok(true)
    }
}

fn parse(contents: &str) -> BTreeMap<SlideId, String> {
    let mut notes = BTreeMap::new();
    // `None` while skipping: before the first marker, or under a bad marker
    let mut current: Option<(SlideId, String)> = None;

    for line in contents.split_inclusive('\n') {
        if let Some(pos) = line.find(SLIDE_MARKER) {
            flush(&mut notes, current.take());
            let number = line[pos + SLIDE_MARKER.len()..].trim();
            match number.parse::<u32>() {
                Ok(n) => current = Some((SlideId(n), String::new())),
                Err(_) => tracing::warn!(marker = line.trim(), "skipping malformed notes marker"),
            }
        } else if let Some((_, body)) = current.as_mut() {
            body.push_str(line);
        }
    }
    flush(&mut notes, current);
    notes
}

fn flush(notes: &mut BTreeMap<SlideId, String>, entry: Option<(SlideId, String)>) {
    if let Some((id, mut body)) = entry {
        // The writer terminates every body with a newline
        if body.ends_with('\n') {
            body.pop();
            if body.ends_with('\r') {
                body.pop();
            }
        }
        notes.insert(id, body);
    }
}

fn render(notes: &BTreeMap<SlideId, String>) -> String {
    let mut out = String::new();
    for (id, text) in notes {
        out.push_str(SLIDE_MARKER);
        out.push_str(&id.0.to_string());
        out.push('\n');
        out.push_str(text);
        out.push('\n');
    }
    out
}
