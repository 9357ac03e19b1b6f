use crate::content::Content;
use std::fs;
use std::path::{Path, PathBuf};

#[derive(Debug, thiserror::Error)]
pub enum IoError {
    #[error("File not found: {0}")]
    NotFound(PathBuf),
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
}

/// Read a markdown file and return its content
pub fn read_source(path: &Path) -> Result<String, IoError> {
    if !path.exists() {
        return Err(IoError::NotFound(path.to_path_buf()));
    }
    fs::read_to_string(path).map_err(IoError::Io)
}

/// Read and parse a markdown file
pub fn read_content(path: &Path) -> Result<Content, IoError> {
    let source = read_source(path)?;
    log::debug!("read {} bytes from {}", source.len(), path.display());
    Ok(Content::parse(&source))
}
