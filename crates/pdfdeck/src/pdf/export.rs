//! Write the current slide order out as a standalone PDF.
//!
//! Sources are loaded with lopdf, renumbered into one object space and given
//! a fresh page tree whose kids follow the slide order. Page attributes that
//! a source inherited from its own page tree are copied onto the page first,
//! since that tree is dropped.

use std::collections::{HashMap, HashSet};
use std::path::{Path, PathBuf};

use lopdf::{Dictionary, Document, Object, ObjectId, dictionary};

use super::{PdfError, PdfResult};

const INHERITABLE_KEYS: [&[u8]; 4] = [b"Resources", b"MediaBox", b"CropBox", b"Rotate"];
const MAX_TREE_DEPTH: usize = 64;

/// One output page: page `page_index` (0-based) of the PDF at `path`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PageSelection {
    pub path: PathBuf,
    pub page_index: u32,
}

impl PageSelection {
    pub fn new(path: impl Into<PathBuf>, page_index: u32) -> Self {
        Self {
            path: path.into(),
            page_index,
        }
    }
}

/// Assemble `plan` and save it to `output`. Returns the number of pages written.
pub fn export_pages(plan: &[PageSelection], output: &Path) -> PdfResult<usize> {
    let mut document = assemble(plan)?;
    document
        .save(output)
        .map_err(|e| PdfError::Export(format!("{}: {e}", output.display())))?;
    tracing::info!(output = %output.display(), pages = plan.len(), "exported PDF");
    Ok(plan.len())
}

/// Number of pages in the PDF at `path`, read with lopdf so that callers that
/// only rearrange pages do not need PDFium.
pub fn page_count(path: &Path) -> PdfResult<usize> {
    let document = Document::load(path).map_err(|e| PdfError::Load {
        path: path.to_path_buf(),
        reason: e.to_string(),
    })?;
    Ok(document.get_pages().len())
}

pub fn assemble(plan: &[PageSelection]) -> PdfResult<Document> {
    if plan.is_empty() {
        return Err(PdfError::Export("No slides to export.".to_string()));
    }

    let mut out = Document::with_version("1.5");
    let pages_id = out.new_object_id();

    let mut source_pages: HashMap<&Path, Vec<ObjectId>> = HashMap::new();
    for selection in plan {
        let path = selection.path.as_path();
        if source_pages.contains_key(path) {
            continue;
        }
        let source = Document::load(path).map_err(|e| PdfError::Load {
            path: path.to_path_buf(),
            reason: e.to_string(),
        })?;
        let page_ids = merge_source(&mut out, source);
        tracing::debug!(source = %path.display(), pages = page_ids.len(), "merged source");
        source_pages.insert(path, page_ids);
    }

    let mut kids = Vec::with_capacity(plan.len());
    let mut used = HashSet::new();
    for selection in plan {
        let page_ids = &source_pages[selection.path.as_path()];
        let page_id = *page_ids
            .get(selection.page_index as usize)
            .ok_or(PdfError::PageOutOfRange {
                page: selection.page_index,
                count: page_ids.len(),
            })?;

        // A page object can only have one parent slot; repeats get a copy
        let target = if used.insert(page_id) {
            page_id
        } else {
            let copy = out
                .get_object(page_id)
                .map_err(|e| PdfError::Export(e.to_string()))?
                .clone();
            out.add_object(copy)
        };
        if let Ok(page) = out.get_object_mut(target).and_then(|o| o.as_dict_mut()) {
            page.set("Parent", pages_id);
        }
        kids.push(Object::Reference(target));
    }

    let count = kids.len() as i64;
    out.objects.insert(
        pages_id,
        Object::Dictionary(dictionary! {
            "Type" => "Pages",
            "Kids" => kids,
            "Count" => count,
        }),
    );
    let catalog_id = out.add_object(dictionary! {
        "Type" => "Catalog",
        "Pages" => pages_id,
    });
    out.trailer.set("Root", catalog_id);

    let pruned = out.prune_objects();
    tracing::trace!(pruned = pruned.len(), "dropped unreachable objects");
    out.compress();
    Ok(out)
}

/// Move every object of `source` into `out` and return the source's page
/// ids (now valid in `out`) in page order.
fn merge_source(out: &mut Document, mut source: Document) -> Vec<ObjectId> {
    source.renumber_objects_with(out.max_id + 1);
    let page_ids: Vec<ObjectId> = source.get_pages().into_values().collect();
    for &page_id in &page_ids {
        materialize_inherited(&mut source, page_id);
    }
    out.max_id = out.max_id.max(source.max_id);
    out.objects.extend(source.objects);
    page_ids
}

fn materialize_inherited(doc: &mut Document, page_id: ObjectId) {
    let mut found: Vec<(&[u8], Object)> = Vec::new();
    {
        let Ok(page) = doc.get_dictionary(page_id) else {
            return;
        };
        for key in INHERITABLE_KEYS {
            if page.has(key) {
                continue;
            }
            if let Some(value) = find_inherited(doc, page, key) {
                found.push((key, value));
            }
        }
    }
    if found.is_empty() {
        return;
    }
    if let Ok(page) = doc.get_object_mut(page_id).and_then(|o| o.as_dict_mut()) {
        for (key, value) in found {
            page.set(key.to_vec(), value);
        }
    }
}

fn find_inherited(doc: &Document, page: &Dictionary, key: &[u8]) -> Option<Object> {
    let mut parent = page.get(b"Parent").and_then(Object::as_reference).ok();
    let mut depth = 0;
    while let Some(id) = parent {
        depth += 1;
        if depth > MAX_TREE_DEPTH {
            tracing::warn!("page tree too deep, not inheriting {}", String::from_utf8_lossy(key));
            return None;
        }
        let node = doc.get_dictionary(id).ok()?;
        if let Ok(value) = node.get(key) {
            return Some(value.clone());
        }
        parent = node.get(b"Parent").and_then(Object::as_reference).ok();
    }
    None
}
