use std::path::{Path, PathBuf};

const FILE_URL_PREFIX: &str = "file://";
const NOTES_EXTENSION: &str = "notes";

/// Turn a path or `file://` URL (as delivered by drag-and-drop and some file
/// dialogs) into a local filesystem path.
pub fn normalize_input(input: &str) -> PathBuf {
    let Some(rest) = input.strip_prefix(FILE_URL_PREFIX) else {
        return PathBuf::from(input);
    };
    // Tolerate the `file://localhost/...` form
    let rest = rest.strip_prefix("localhost").unwrap_or(rest);
    let decoded =
        String::from_utf8_lossy(&urlencoding::decode_binary(rest.as_bytes())).into_owned();

    if cfg!(windows) {
        // file:///C:/deck.pdf -> C:/deck.pdf
        if let Some(stripped) = decoded.strip_prefix('/') {
            if stripped.as_bytes().get(1) == Some(&b':') {
                return PathBuf::from(stripped);
            }
        }
    }
    PathBuf::from(decoded)
}

/// The notes file that belongs to a PDF: `<file>.notes` next to it.
pub fn notes_path_for(pdf: &Path) -> PathBuf {
    let mut name = pdf.as_os_str().to_os_string();
    name.push(".");
    name.push(NOTES_EXTENSION);
    PathBuf::from(name)
}

pub fn is_pdf(path: &Path) -> bool {
    path.extension()
        .and_then(|e| e.to_str())
        .is_some_and(|e| e.eq_ignore_ascii_case("pdf"))
}
