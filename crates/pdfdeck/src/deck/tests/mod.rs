mod navigation;
mod notes;

use std::cell::RefCell;
use std::collections::HashMap;
use std::path::{Path, PathBuf};
use std::rc::Rc;

use image::RgbaImage;

use super::{Deck, DeckEvent, DeckSettings, SlideId};
use crate::pdf::{DocumentInfo, PageSize, PdfEngine, PdfError, PdfResult};

const LANDSCAPE: PageSize = PageSize {
    width: 960.0,
    height: 540.0,
};
const PORTRAIT: PageSize = PageSize {
    width: 595.0,
    height: 842.0,
};

/// In-memory engine: knows a fixed set of documents and records renders.
#[derive(Default)]
struct FakeEngine {
    documents: HashMap<PathBuf, Vec<PageSize>>,
    renders: Rc<RefCell<Vec<(PathBuf, u32, [u32; 2])>>>,
}

impl FakeEngine {
    fn with(mut self, path: &str, pages: &[PageSize]) -> Self {
        self.documents.insert(PathBuf::from(path), pages.to_vec());
        self
    }
}

impl PdfEngine for FakeEngine {
    fn open(&self, path: &Path) -> PdfResult<DocumentInfo> {
        match self.documents.get(path) {
            Some(pages) => Ok(DocumentInfo {
                path: path.to_path_buf(),
                page_sizes: pages.clone(),
            }),
            None => Err(PdfError::Load {
                path: path.to_path_buf(),
                reason: "no such document".into(),
            }),
        }
    }

    fn render(&self, path: &Path, page_index: u32, size: [u32; 2]) -> PdfResult<RgbaImage> {
        self.renders
            .borrow_mut()
            .push((path.to_path_buf(), page_index, size));
        Ok(RgbaImage::new(size[0], size[1]))
    }
}

/// Deck over a fake engine with `a.pdf` (3 landscape pages), `b.pdf`
/// (2 pages, the second portrait) and `tall.pdf` (portrait only).
fn engine() -> FakeEngine {
    FakeEngine::default()
        .with("/fake/a.pdf", &[LANDSCAPE, LANDSCAPE, LANDSCAPE])
        .with("/fake/b.pdf", &[LANDSCAPE, PORTRAIT])
        .with("/fake/tall.pdf", &[PORTRAIT, PORTRAIT])
}

fn deck_with(engine: FakeEngine, settings: DeckSettings) -> Deck {
    Deck::new(Box::new(engine), settings)
}

/// A deck with five slides: a.pdf pages 1-3, then b.pdf pages 1-2.
fn five_slide_deck() -> Deck {
    let mut deck = deck_with(engine(), DeckSettings::default());
    deck.import_files(["/fake/a.pdf", "/fake/b.pdf"]);
    deck.take_events();
    deck
}

fn ids(deck: &Deck) -> Vec<u32> {
    deck.order().iter().map(|id| id.0).collect()
}

fn has_event(events: &[DeckEvent], wanted: &DeckEvent) -> bool {
    events.iter().any(|e| e == wanted)
}
