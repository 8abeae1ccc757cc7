//! The slide deck: which pages are in the presentation, in what order,
//! where the cursor is, their notes, and whether we are presenting.
//!
//! Every imported page gets a [`SlideId`] that never changes. Reordering and
//! deleting only touch `order`; notes and images stay keyed by id, so a note
//! follows its slide wherever it moves.

pub mod event;
pub mod geometry;
pub mod images;

#[cfg(test)]
mod tests;

use std::collections::BTreeMap;
use std::fmt;
use std::path::{Path, PathBuf};
use std::time::Instant;

use crate::notes::NotesStore;
use crate::paths::{normalize_input, notes_path_for};
use crate::pdf::export::PageSelection;
use crate::pdf::{PageSize, PdfEngine};
use crate::timer::{PresentationTimer, format_elapsed};

pub use event::DeckEvent;
pub use geometry::FitMode;
pub use images::SlideImages;

/// Stable identity of an imported page.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct SlideId(pub u32);

impl fmt::Display for SlideId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct SourceId(pub usize);

/// An imported PDF file.
#[derive(Debug, Clone)]
pub struct Source {
    pub path: PathBuf,
    pub page_sizes: Vec<PageSize>,
}

impl Source {
    pub fn display_name(&self) -> String {
        self.path
            .file_name()
            .unwrap_or(self.path.as_os_str())
            .to_string_lossy()
            .to_string()
    }
}

/// What a slide id points at.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct PageRef {
    pub source: SourceId,
    pub page_index: u32,
    pub size: PageSize,
}

#[derive(Debug, Clone)]
pub struct DeckSettings {
    pub thumbnail_width: u32,
    pub projection_size: [u32; 2],
    pub fit: FitMode,
}

impl Default for DeckSettings {
    fn default() -> Self {
        Self {
            thumbnail_width: 200,
            projection_size: [1920, 1080],
            fit: FitMode::Page,
        }
    }
}

pub struct Deck {
    engine: Box<dyn PdfEngine>,
    settings: DeckSettings,
    sources: Vec<Source>,
    pages: BTreeMap<SlideId, PageRef>,
    order: Vec<SlideId>,
    next_id: u32,
    current: usize,
    presentation_mode: bool,
    /// 0.0 = top of the page, 1.0 = bottom (only used for tall pages)
    vertical_offset: f32,
    primary_file: Option<PathBuf>,
    notes: NotesStore,
    timer: PresentationTimer,
    timer_text: String,
    images: SlideImages,
    events: Vec<DeckEvent>,
}

impl Deck {
    pub fn new(engine: Box<dyn PdfEngine>, settings: DeckSettings) -> Self {
        Self {
            engine,
            settings,
            sources: Vec::new(),
            pages: BTreeMap::new(),
            order: Vec::new(),
            next_id: 0,
            current: 0,
            presentation_mode: false,
            vertical_offset: 0.0,
            primary_file: None,
            notes: NotesStore::new(),
            timer: PresentationTimer::new(),
            timer_text: format_elapsed(std::time::Duration::ZERO),
            images: SlideImages::new(),
            events: Vec::new(),
        }
    }

    // ---- queries ----

    pub fn settings(&self) -> &DeckSettings {
        &self.settings
    }

    pub fn slide_count(&self) -> usize {
        self.order.len()
    }

    pub fn is_empty(&self) -> bool {
        self.order.is_empty()
    }

    #[cfg(test)]
    pub fn order(&self) -> &[SlideId] {
        &self.order
    }

    pub fn current_position(&self) -> usize {
        self.current
    }

    pub fn slide_at(&self, position: usize) -> Option<SlideId> {
        self.order.get(position).copied()
    }

    pub fn current_slide_id(&self) -> Option<SlideId> {
        self.slide_at(self.current)
    }

    pub fn page(&self, id: SlideId) -> Option<&PageRef> {
        self.pages.get(&id)
    }

    pub fn source(&self, id: SourceId) -> Option<&Source> {
        self.sources.get(id.0)
    }

    #[cfg(test)]
    pub fn sources(&self) -> &[Source] {
        &self.sources
    }

    pub fn presentation_mode(&self) -> bool {
        self.presentation_mode
    }

    pub fn vertical_offset(&self) -> f32 {
        self.vertical_offset
    }

    pub fn primary_file(&self) -> Option<&Path> {
        self.primary_file.as_deref()
    }

    pub fn images(&self) -> &SlideImages {
        &self.images
    }

    pub fn notes(&self) -> &NotesStore {
        &self.notes
    }

    pub fn timer_text(&self) -> &str {
        &self.timer_text
    }

    pub fn timer_running(&self) -> bool {
        self.timer.is_running()
    }

    /// Short label for a slide, e.g. `talk.pdf p.3`.
    pub fn slide_label(&self, id: SlideId) -> String {
        match self.page(id) {
            Some(page) => {
                let name = self
                    .source(page.source)
                    .map(Source::display_name)
                    .unwrap_or_default();
                format!("{name} p.{}", page.page_index + 1)
            }
            None => format!("slide {id}"),
        }
    }

    /// Pending notifications, oldest first.
    pub fn take_events(&mut self) -> Vec<DeckEvent> {
        std::mem::take(&mut self.events)
    }

    fn emit(&mut self, event: DeckEvent) {
        tracing::trace!(?event, "deck event");
        self.events.push(event);
    }

    // ---- import ----

    #[cfg(test)]
    pub fn import_file(&mut self, path: impl AsRef<Path>) -> usize {
        self.import_files([path])
    }

    /// Import PDFs and append all their pages to the order. Files that fail
    /// to load raise an error event and are skipped. Returns the number of
    /// slides added.
    pub fn import_files<I, P>(&mut self, paths: I) -> usize
    where
        I: IntoIterator<Item = P>,
        P: AsRef<Path>,
    {
        let was_empty = self.order.is_empty();
        let mut added = 0;

        for input in paths {
            let path = normalize_input(&input.as_ref().to_string_lossy());
            let source_id = match self.sources.iter().position(|s| s.path == path) {
                Some(index) => SourceId(index),
                None => match self.engine.open(&path) {
                    Ok(info) => {
                        self.sources.push(Source {
                            path: path.clone(),
                            page_sizes: info.page_sizes,
                        });
                        SourceId(self.sources.len() - 1)
                    }
                    Err(e) => {
                        tracing::warn!(path = %path.display(), error = %e, "import failed");
                        self.emit(DeckEvent::error(
                            "Error",
                            format!("Failed to load: {}", path.display()),
                        ));
                        continue;
                    }
                },
            };

            if self.primary_file.is_none() {
                self.set_primary_file(path.clone());
            }
            added += self.append_source_pages(source_id);
        }

        if added > 0 {
            tracing::info!(added, total = self.order.len(), "imported slides");
        }
        self.emit(DeckEvent::SlideOrderChanged);
        if was_empty && added > 0 {
            self.emit(DeckEvent::CurrentNotesChanged);
        }
        added
    }

    fn append_source_pages(&mut self, source_id: SourceId) -> usize {
        let source = &self.sources[source_id.0];
        let path = source.path.clone();
        let sizes = source.page_sizes.clone();

        let mut new_ids = Vec::with_capacity(sizes.len());
        let mut requests = Vec::with_capacity(sizes.len());
        for (page_index, size) in sizes.into_iter().enumerate() {
            let id = SlideId(self.next_id);
            self.next_id += 1;
            let page_index = page_index as u32;
            self.pages.insert(
                id,
                PageRef {
                    source: source_id,
                    page_index,
                    size,
                },
            );
            self.order.push(id);
            new_ids.push(id);
            requests.push((
                page_index,
                geometry::thumbnail_size(size, self.settings.thumbnail_width),
            ));
        }

        let rendered = self.engine.render_pages(&path, &requests);
        for (id, result) in new_ids.iter().zip(rendered) {
            match result {
                Ok(image) => self.images.insert_thumbnail(*id, image),
                Err(e) => tracing::warn!(slide = %id, error = %e, "thumbnail render failed"),
            }
        }
        if self.presentation_mode {
            self.render_projections();
        }
        new_ids.len()
    }

    /// Bind the notes to `path`. A notes file that exists but cannot be read
    /// leaves the store unbound so saving never overwrites it.
    fn set_primary_file(&mut self, path: PathBuf) {
        let notes_path = notes_path_for(&path);
        self.notes = match NotesStore::read(&notes_path) {
            Ok(store) => store,
            Err(e) => {
                tracing::warn!(error = %e, "could not read notes");
                self.emit(DeckEvent::error("Notes", format!("{e:#}")));
                NotesStore::new()
            }
        };
        self.primary_file = Some(path);
        self.emit(DeckEvent::CurrentFileChanged);
    }

    // ---- reorder / delete ----

    /// Remove the slide at `position`. The last remaining slide cannot be
    /// removed. Notes of the removed slide are kept.
    pub fn remove_slide(&mut self, position: usize) -> bool {
        if self.order.len() <= 1 || position >= self.order.len() {
            return false;
        }
        let id = self.order.remove(position);
        self.images.remove(id);
        tracing::debug!(slide = %id, position, "removed slide");

        let len = self.order.len();
        if self.current >= len {
            self.set_current(len - 1);
        } else if self.current > position {
            self.set_current(self.current - 1);
        } else if self.current == position {
            // Same position, different slide underneath
            self.emit(DeckEvent::CurrentPageChanged);
            self.emit(DeckEvent::CurrentNotesChanged);
        }
        self.emit(DeckEvent::SlideOrderChanged);
        true
    }

    /// Move the slide at `from` so that it ends up at `to`. The cursor stays
    /// on the slide it was on.
    pub fn move_slide(&mut self, from: usize, to: usize) -> bool {
        let len = self.order.len();
        if from >= len || to >= len {
            return false;
        }
        if from != to {
            let id = self.order.remove(from);
            self.order.insert(to, id);
            tracing::debug!(slide = %id, from, to, "moved slide");
        }

        let current = self.current;
        if current == from {
            self.set_current(to);
        } else if from < current && current <= to {
            self.set_current(current - 1);
        } else if to <= current && current < from {
            self.set_current(current + 1);
        }
        self.emit(DeckEvent::SlideOrderChanged);
        true
    }

    // ---- navigation ----

    fn set_current(&mut self, position: usize) {
        if self.current != position {
            self.current = position;
            self.emit(DeckEvent::CurrentPageChanged);
            self.emit(DeckEvent::CurrentNotesChanged);
        }
    }

    pub fn jump_to_slide(&mut self, position: usize) -> bool {
        if position >= self.order.len() {
            return false;
        }
        self.set_current(position);
        self.vertical_offset = 0.0;
        true
    }

    pub fn next_slide(&mut self) -> bool {
        if self.current + 1 >= self.order.len() {
            return false;
        }
        self.set_current(self.current + 1);
        self.vertical_offset = 0.0;
        true
    }

    pub fn prev_slide(&mut self) -> bool {
        if self.current == 0 {
            return false;
        }
        self.set_current(self.current - 1);
        self.vertical_offset = 0.0;
        true
    }

    pub fn first_slide(&mut self) -> bool {
        self.jump_to_slide(0)
    }

    pub fn last_slide(&mut self) -> bool {
        match self.order.len() {
            0 => false,
            n => self.jump_to_slide(n - 1),
        }
    }

    fn current_is_tall(&self, viewport: [f32; 2]) -> bool {
        self.current_slide_id()
            .and_then(|id| self.page(id))
            .is_some_and(|page| geometry::is_tall(page.size, viewport, self.settings.fit))
    }

    /// Projector "next": scroll a tall page to its bottom first, then move on.
    pub fn advance(&mut self, viewport: [f32; 2]) -> bool {
        if self.current_is_tall(viewport) && self.vertical_offset < 1.0 {
            self.vertical_offset = 1.0;
            self.emit(DeckEvent::CurrentPageChanged);
            return true;
        }
        self.next_slide()
    }

    /// Projector "previous": scroll back to the top of a tall page first;
    /// landing on a tall previous page shows its bottom.
    pub fn retreat(&mut self, viewport: [f32; 2]) -> bool {
        if self.vertical_offset > 0.0 {
            self.vertical_offset = 0.0;
            self.emit(DeckEvent::CurrentPageChanged);
            return true;
        }
        if !self.prev_slide() {
            return false;
        }
        if self.current_is_tall(viewport) {
            self.vertical_offset = 1.0;
        }
        true
    }

    // ---- presentation mode ----

    pub fn set_presentation_mode(&mut self, enabled: bool) {
        if self.presentation_mode == enabled {
            return;
        }
        self.presentation_mode = enabled;
        self.vertical_offset = 0.0;
        tracing::info!(enabled, "presentation mode");
        if enabled {
            self.render_projections();
            self.emit(DeckEvent::CurrentNotesChanged);
        } else {
            self.stop_timer();
        }
        self.emit(DeckEvent::PresentationModeChanged);
    }

    /// Render projection images for every slide in the order that lacks one.
    fn render_projections(&mut self) {
        let mut by_source: BTreeMap<SourceId, Vec<(SlideId, u32, [u32; 2])>> = BTreeMap::new();
        for id in &self.order {
            if self.images.has_projection(*id) {
                continue;
            }
            if let Some(page) = self.pages.get(id) {
                let size = geometry::projection_size(
                    page.size,
                    self.settings.projection_size,
                    self.settings.fit,
                );
                by_source
                    .entry(page.source)
                    .or_default()
                    .push((*id, page.page_index, size));
            }
        }

        for (source_id, wanted) in by_source {
            let path = self.sources[source_id.0].path.clone();
            let requests: Vec<(u32, [u32; 2])> =
                wanted.iter().map(|(_, page, size)| (*page, *size)).collect();
            let rendered = self.engine.render_pages(&path, &requests);
            for ((id, _, _), result) in wanted.into_iter().zip(rendered) {
                match result {
                    Ok(image) => self.images.insert_projection(id, image),
                    Err(e) => {
                        tracing::warn!(slide = %id, error = %e, "projection render failed")
                    }
                }
            }
        }
    }

    /// Re-render projection images, e.g. after the projector size changed.
    pub fn set_projection_size(&mut self, size: [u32; 2]) {
        if self.settings.projection_size == size {
            return;
        }
        self.settings.projection_size = size;
        self.images.clear_projections();
        if self.presentation_mode {
            self.render_projections();
        }
    }

    // ---- notes ----

    pub fn current_notes(&self) -> &str {
        self.current_slide_id()
            .and_then(|id| self.notes.get(id))
            .unwrap_or("")
    }

    pub fn set_current_notes(&mut self, text: &str) {
        let Some(id) = self.current_slide_id() else {
            return;
        };
        if self.notes.get(id).unwrap_or("") == text {
            return;
        }
        self.notes.set(id, text);
        self.emit(DeckEvent::CurrentNotesChanged);
    }

    /// Write the notes file. Returns whether anything was written.
    pub fn save_notes(&mut self) -> bool {
        match self.notes.save() {
            Ok(written) => written,
            Err(e) => {
                self.emit(DeckEvent::error("Notes", format!("{e:#}")));
                false
            }
        }
    }

    // ---- timer ----

    pub fn start_timer(&mut self) {
        self.timer.start();
        self.tick();
    }

    pub fn stop_timer(&mut self) {
        self.timer.stop();
        self.tick();
    }

    pub fn reset_timer(&mut self) {
        self.timer.reset();
        self.tick();
    }

    /// Refresh the timer text; emits when the displayed value changed.
    pub fn tick(&mut self) {
        self.tick_at(Instant::now());
    }

    pub fn tick_at(&mut self, now: Instant) {
        let text = self.timer.text_at(now);
        if text != self.timer_text {
            self.timer_text = text;
            self.emit(DeckEvent::TimerTextChanged);
        }
    }

    // ---- export ----

    /// The pages in slide order, ready for [`crate::pdf::export::export_pages`].
    pub fn export_plan(&self) -> Vec<PageSelection> {
        self.order
            .iter()
            .filter_map(|id| self.pages.get(id))
            .filter_map(|page| {
                self.sources
                    .get(page.source.0)
                    .map(|source| PageSelection::new(source.path.clone(), page.page_index))
            })
            .collect()
    }
}
