use std::path::{Path, PathBuf};

use anyhow::{Context, Result};

use crate::paths::is_pdf;

/// A folder tree restricted to PDFs, for the organizer's side panel.
#[derive(Debug, Clone, PartialEq)]
pub enum BrowseEntry {
    Folder {
        name: String,
        path: PathBuf,
        children: Vec<BrowseEntry>,
    },
    File {
        name: String,
        path: PathBuf,
    },
}

impl BrowseEntry {
    pub fn name(&self) -> &str {
        match self {
            Self::Folder { name, .. } | Self::File { name, .. } => name,
        }
    }

    pub fn path(&self) -> &Path {
        match self {
            Self::Folder { path, .. } | Self::File { path, .. } => path,
        }
    }

    /// Every PDF below this entry, in display order.
    pub fn files(&self) -> Vec<PathBuf> {
        let mut out = Vec::new();
        self.collect_files(&mut out);
        out
    }

    fn collect_files(&self, out: &mut Vec<PathBuf>) {
        match self {
            Self::File { path, .. } => out.push(path.clone()),
            Self::Folder { children, .. } => {
                for child in children {
                    child.collect_files(out);
                }
            }
        }
    }
}

/// Scan `root` recursively. Sub-folders come first, sorted by name, then PDF
/// files sorted case-insensitively. Hidden entries are skipped; unreadable
/// sub-folders are logged and left empty.
pub fn scan_folder(root: &Path) -> Result<Vec<BrowseEntry>> {
    let entries = std::fs::read_dir(root)
        .with_context(|| format!("Failed to read folder {}", root.display()))?;

    let mut folders = Vec::new();
    let mut files = Vec::new();
    for entry in entries.flatten() {
        let path = entry.path();
        let name = entry.file_name().to_string_lossy().to_string();
        if name.starts_with('.') {
            continue;
        }
        if path.is_dir() {
            folders.push((name, path));
        } else if is_pdf(&path) {
            files.push((name, path));
        }
    }
    folders.sort_by(|a, b| a.0.cmp(&b.0));
    files.sort_by_key(|(name, _)| name.to_lowercase());

    let mut out = Vec::with_capacity(folders.len() + files.len());
    for (name, path) in folders {
        let children = scan_folder(&path).unwrap_or_else(|e| {
            tracing::warn!(folder = %path.display(), error = %e, "skipping unreadable folder");
            Vec::new()
        });
        out.push(BrowseEntry::Folder {
            name,
            path,
            children,
        });
    }
    out.extend(
        files
            .into_iter()
            .map(|(name, path)| BrowseEntry::File { name, path }),
    );
    Ok(out)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn touch(path: &Path) {
        std::fs::write(path, b"%PDF-1.5\n").unwrap();
    }

    #[test]
    fn folders_first_then_pdfs_case_insensitive() {
        let dir = tempfile::tempdir().unwrap();
        let root = dir.path();
        std::fs::create_dir(root.join("b-folder")).unwrap();
        std::fs::create_dir(root.join("a-folder")).unwrap();
        touch(&root.join("Zeta.pdf"));
        touch(&root.join("alpha.PDF"));
        touch(&root.join("notes.txt"));
        touch(&root.join(".hidden.pdf"));
        touch(&root.join("a-folder").join("inner.pdf"));

        let entries = scan_folder(root).unwrap();
        let names: Vec<&str> = entries.iter().map(BrowseEntry::name).collect();
        assert_eq!(names, vec!["a-folder", "b-folder", "alpha.PDF", "Zeta.pdf"]);

        match &entries[0] {
            BrowseEntry::Folder { children, .. } => {
                assert_eq!(children.len(), 1);
                assert_eq!(children[0].name(), "inner.pdf");
            }
            other => panic!("expected folder, got {other:?}"),
        }
    }

    #[test]
    fn files_flattens_in_display_order() {
        let dir = tempfile::tempdir().unwrap();
        let root = dir.path();
        std::fs::create_dir(root.join("sub")).unwrap();
        touch(&root.join("sub").join("one.pdf"));
        touch(&root.join("two.pdf"));

        let folder = BrowseEntry::Folder {
            name: "root".into(),
            path: root.to_path_buf(),
            children: scan_folder(root).unwrap(),
        };
        let files = folder.files();
        assert_eq!(files.len(), 2);
        assert!(files[0].ends_with("sub/one.pdf"));
        assert!(files[1].ends_with("two.pdf"));
    }

    #[test]
    fn missing_folder_is_an_error() {
        assert!(scan_folder(Path::new("/no/such/folder/here")).is_err());
    }
}
