use std::path::{Path, PathBuf};

use image::RgbaImage;
use pdfium_render::prelude::*;

use super::{DocumentInfo, PageSize, PdfEngine, PdfError, PdfResult};

/// [`PdfEngine`] backed by the PDFium shared library.
pub struct PdfiumEngine {
    pdfium: Pdfium,
}

impl PdfiumEngine {
    /// Bind PDFium, trying in order: the configured directory, the directory
    /// of the running executable, the working directory, the system library.
    pub fn new(library_dir: Option<&Path>) -> PdfResult<Self> {
        let mut candidates: Vec<PathBuf> = Vec::new();
        if let Some(dir) = library_dir {
            candidates.push(dir.to_path_buf());
        }
        if let Some(dir) = std::env::current_exe()
            .ok()
            .and_then(|exe| exe.parent().map(Path::to_path_buf))
        {
            candidates.push(dir);
        }
        candidates.push(PathBuf::from("./"));

        let mut last_error = String::from("no candidate locations");
        for dir in &candidates {
            let dir = dir.to_string_lossy();
            let library = Pdfium::pdfium_platform_library_name_at_path(&*dir);
            match Pdfium::bind_to_library(&library) {
                Ok(bindings) => {
                    tracing::debug!(library = ?library, "bound PDFium");
                    return Ok(Self {
                        pdfium: Pdfium::new(bindings),
                    });
                }
                Err(e) => {
                    tracing::trace!(library = ?library, error = %e, "PDFium not found here");
                    last_error = e.to_string();
                }
            }
        }

        match Pdfium::bind_to_system_library() {
            Ok(bindings) => {
                tracing::debug!("bound system PDFium");
                Ok(Self {
                    pdfium: Pdfium::new(bindings),
                })
            }
            Err(e) => {
                tracing::warn!(error = %e, previous = %last_error, "PDFium unavailable");
                Err(PdfError::Bind(e.to_string()))
            }
        }
    }

    fn load<'a>(&'a self, path: &Path) -> PdfResult<pdfium_render::prelude::PdfDocument<'a>> {
        self.pdfium
            .load_pdf_from_file(path, None)
            .map_err(|e| PdfError::Load {
                path: path.to_path_buf(),
                reason: e.to_string(),
            })
    }
}

impl PdfEngine for PdfiumEngine {
    fn open(&self, path: &Path) -> PdfResult<DocumentInfo> {
        let document = self.load(path)?;
        let page_sizes = document
            .pages()
            .iter()
            .map(|page| PageSize::new(page.width().value, page.height().value))
            .collect::<Vec<_>>();
        tracing::debug!(path = %path.display(), pages = page_sizes.len(), "opened PDF");
        Ok(DocumentInfo {
            path: path.to_path_buf(),
            page_sizes,
        })
    }

    fn render(&self, path: &Path, page_index: u32, size: [u32; 2]) -> PdfResult<RgbaImage> {
        let document = self.load(path)?;
        render_page(&document, page_index, size)
    }

    fn render_pages(&self, path: &Path, requests: &[(u32, [u32; 2])]) -> Vec<PdfResult<RgbaImage>> {
        let document = match self.load(path) {
            Ok(document) => document,
            Err(e) => {
                let reason = e.to_string();
                return requests
                    .iter()
                    .map(|&(page, _)| {
                        Err(PdfError::Render {
                            page,
                            reason: reason.clone(),
                        })
                    })
                    .collect();
            }
        };
        requests
            .iter()
            .map(|&(page_index, size)| render_page(&document, page_index, size))
            .collect()
    }
}

fn render_page(
    document: &pdfium_render::prelude::PdfDocument<'_>,
    page_index: u32,
    size: [u32; 2],
) -> PdfResult<RgbaImage> {
    let pages = document.pages();
    let count = pages.len() as usize;
    let index = u16::try_from(page_index)
        .ok()
        .filter(|i| (*i as usize) < count)
        .ok_or(PdfError::PageOutOfRange {
            page: page_index,
            count,
        })?;
    let page = pages.get(index).map_err(|e| PdfError::Render {
        page: page_index,
        reason: e.to_string(),
    })?;

    let config = PdfRenderConfig::new()
        .set_target_width(size[0].max(1) as i32)
        .set_target_height(size[1].max(1) as i32);
    let bitmap = page
        .render_with_config(&config)
        .map_err(|e| PdfError::Render {
            page: page_index,
            reason: e.to_string(),
        })?;
    Ok(bitmap.as_image().to_rgba8())
}
