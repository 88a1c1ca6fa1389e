use std::fs;
use std::path::{Path, PathBuf};

use tracing::{debug, info};

use crate::error::{Error, Result};
use crate::types::SourceDocument;

/// List the eligible `.txt` files directly inside `dir`, sorted by file name.
///
/// Subdirectories are not descended into and `aggregate_file` is skipped.
/// Returns `CorpusEmpty` when nothing is left, including when `dir` does not exist.
pub fn discover(dir: &Path, aggregate_file: &str) -> Result<Vec<PathBuf>> {
    let mut files: Vec<PathBuf> = walkdir::WalkDir::new(dir)
        .min_depth(1)
        .max_depth(1)
        .into_iter()
        .filter_map(|e| e.ok())
        .filter(|e| e.file_type().is_file())
        .map(|e| e.into_path())
        .filter(|p| p.extension().and_then(|s| s.to_str()) == Some("txt"))
        .filter(|p| p.file_name().and_then(|s| s.to_str()) != Some(aggregate_file))
        .collect();
    files.sort_by(|a, b| a.file_name().cmp(&b.file_name()));
    if files.is_empty() {
        return Err(Error::CorpusEmpty(dir.to_path_buf()));
    }
    debug!(dir = %dir.display(), count = files.len(), "discovered corpus files");
    Ok(files)
}

/// Read every eligible document of the corpus into memory.
pub fn read_documents(dir: &Path, aggregate_file: &str) -> Result<Vec<SourceDocument>> {
    let files = discover(dir, aggregate_file)?;
    let mut documents = Vec::with_capacity(files.len());
    for (file_index, file_path) in files.iter().enumerate() {
        debug!(file = %file_path.display(), "reading {}/{}", file_index + 1, files.len());
        let content = read_file_content(file_path)?;
        documents.push(SourceDocument { name: source_name(file_path), content });
    }
    info!(dir = %dir.display(), documents = documents.len(), "corpus loaded");
    Ok(documents)
}

fn read_file_content(file_path: &Path) -> Result<String> {
    match fs::read_to_string(file_path) {
        Ok(content) => Ok(content),
        Err(e) if e.kind() == std::io::ErrorKind::InvalidData => {
            let bytes = fs::read(file_path).map_err(|e| Error::io(file_path, e))?;
            Ok(String::from_utf8_lossy(&bytes).into_owned())
        }
        Err(e) => Err(Error::io(file_path, e)),
    }
}

fn source_name(file_path: &Path) -> String {
    file_path
        .file_name()
        .map(|s| s.to_string_lossy().into_owned())
        .unwrap_or_else(|| file_path.to_string_lossy().into_owned())
}
