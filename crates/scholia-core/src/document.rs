//! Uploaded-file storage and PDF text extraction.
//!
//! Uploads are copied into a fixed directory under their original filename.
//! Extraction walks the PDF page by page and joins page texts with newlines.

use std::path::{Path, PathBuf};

use lopdf::Document;

/// Copy `source` into `upload_dir` (created if absent) under its original
/// filename. An existing file with the same name is overwritten.
pub fn save_upload(source: &Path, upload_dir: &Path) -> Result<PathBuf, UploadError> {
    let name = source
        .file_name()
        .ok_or_else(|| UploadError::NoFileName(source.to_path_buf()))?;
    std::fs::create_dir_all(upload_dir)
        .map_err(|e| UploadError::CreateDir(upload_dir.to_path_buf(), e))?;
    let dest = upload_dir.join(name);
    std::fs::copy(source, &dest).map_err(|e| UploadError::Copy(source.to_path_buf(), e))?;
    Ok(dest)
}

/// Extract all text from a PDF file, page texts joined by newline.
///
/// A page with no extractable text contributes an empty string rather than
/// failing the whole document; only an unparseable file is an error.
pub fn extract_text(path: &Path) -> Result<String, ExtractError> {
    let doc = Document::load(path).map_err(|e| ExtractError::Parse(path.to_path_buf(), e))?;
    let mut pages = Vec::new();
    for page_no in doc.get_pages().keys() {
        let text = doc.extract_text(&[*page_no]).unwrap_or_default();
        pages.push(text);
    }
    Ok(pages.join("\n"))
}

/// Collapse runs of whitespace into single spaces and trim the ends.
pub fn normalize_whitespace(text: &str) -> String {
    text.split_whitespace().collect::<Vec<_>>().join(" ")
}

#[derive(Debug, thiserror::Error)]
pub enum UploadError {
    #[error("upload source has no file name: {0}")]
    NoFileName(PathBuf),
    #[error("failed to create upload directory {0}: {1}")]
    CreateDir(PathBuf, std::io::Error),
    #[error("failed to store upload {0}: {1}")]
    Copy(PathBuf, std::io::Error),
}

#[derive(Debug, thiserror::Error)]
pub enum ExtractError {
    #[error("failed to parse PDF {0}: {1}")]
    Parse(PathBuf, lopdf::Error),
}
