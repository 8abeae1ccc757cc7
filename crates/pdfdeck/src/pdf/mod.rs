//! Seam between the deck and the PDF libraries.
//!
//! Decoding and rasterising pages is PDFium's job ([`pdfium::PdfiumEngine`]);
//! writing a reordered document is done with lopdf ([`export`]).

pub mod browse;
pub mod export;
pub mod pdfium;

use std::path::{Path, PathBuf};

use image::RgbaImage;

/// Page size in PDF points (1/72 inch).
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct PageSize {
    pub width: f32,
    pub height: f32,
}

impl PageSize {
    pub fn new(width: f32, height: f32) -> Self {
        Self { width, height }
    }
}

#[derive(Debug, Clone)]
pub struct DocumentInfo {
    pub path: PathBuf,
    pub page_sizes: Vec<PageSize>,
}

impl DocumentInfo {
    pub fn page_count(&self) -> usize {
        self.page_sizes.len()
    }
}

#[derive(Debug, thiserror::Error)]
pub enum PdfError {
    #[error("could not bind the PDFium library: {0}")]
    Bind(String),
    #[error("failed to load {path}: {reason}")]
    Load { path: PathBuf, reason: String },
    #[error("page {page} out of range (document has {count} pages)")]
    PageOutOfRange { page: u32, count: usize },
    #[error("failed to render page {page}: {reason}")]
    Render { page: u32, reason: String },
    #[error("export failed: {0}")]
    Export(String),
    #[error("io error: {0}")]
    Io(#[from] std::io::Error),
}

pub type PdfResult<T> = Result<T, PdfError>;

/// What the deck needs from a PDF backend.
pub trait PdfEngine {
    /// Open a document and report its page geometry.
    fn open(&self, path: &Path) -> PdfResult<DocumentInfo>;

    /// Rasterise one page to exactly `size` pixels.
    fn render(&self, path: &Path, page_index: u32, size: [u32; 2]) -> PdfResult<RgbaImage>;

    /// Render several pages of one document. Engines that pay for opening a
    /// document should override this to open it once.
    fn render_pages(&self, path: &Path, requests: &[(u32, [u32; 2])]) -> Vec<PdfResult<RgbaImage>> {
        requests
            .iter()
            .map(|&(page_index, size)| self.render(path, page_index, size))
            .collect()
    }
}
