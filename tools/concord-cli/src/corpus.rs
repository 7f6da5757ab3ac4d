use std::fs;
use std::path::{Path, PathBuf};

use anyhow::{Context, Result};
use concord_window::AnnotateError;
use thiserror::Error;

/// Files ending with this are tokenization caches, never documents.
pub const CACHE_SUFFIX: &str = ".cache";

#[derive(Debug, Error)]
pub enum DocumentError {
    #[error("cannot read {}: {source}", path.display())]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("{} is not valid UTF-8 (first bad byte at {valid_up_to})", path.display())]
    Decode { path: PathBuf, valid_up_to: usize },

    #[error(transparent)]
    Annotate(#[from] AnnotateError),
}

/// Regular files of `folder`, sorted by path, cache files excluded.
pub fn list_documents(folder: &Path) -> Result<Vec<PathBuf>> {
    let mut documents = Vec::new();
    for entry in fs::read_dir(folder)
        .with_context(|| format!("Cannot read corpus folder '{}'", folder.display()))?
    {
        let path = entry?.path();
        if !path.is_file() || is_cache_file(&path) {
            continue;
        }
        documents.push(path);
    }
    documents.sort();
    Ok(documents)
}

pub fn is_cache_file(path: &Path) -> bool {
    path.file_name()
        .map(|name| name.to_string_lossy().ends_with(CACHE_SUFFIX))
        .unwrap_or(false)
}

pub fn read_document(path: &Path) -> Result<String, DocumentError> {
    let bytes = fs::read(path).map_err(|source| DocumentError::Io {
        path: path.to_path_buf(),
        source,
    })?;
    String::from_utf8(bytes).map_err(|e| DocumentError::Decode {
        path: path.to_path_buf(),
        valid_up_to: e.utf8_error().valid_up_to(),
    })
}
