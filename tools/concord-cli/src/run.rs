use std::path::{Path, PathBuf};

use anyhow::Result;
use concord_protocol::MatchRecord;
use concord_text::tokenize;
use concord_window::Annotator;
use rayon::prelude::*;

use crate::cache::DocumentCache;
use crate::corpus::{list_documents, read_document, DocumentError};

/// Outcome of one corpus folder.
#[derive(Debug, Default)]
pub struct FolderReport {
    /// Records of every successful document, in document then token order.
    pub records: Vec<MatchRecord>,
    pub documents: usize,
    pub failures: Vec<(PathBuf, DocumentError)>,
}

pub fn annotate_document(
    path: &Path,
    annotator: &Annotator<'_>,
    cache: &dyn DocumentCache,
    context_radius: usize,
) -> Result<Vec<MatchRecord>, DocumentError> {
    let document = cache.get_or_compute(path, &|| {
        let text = read_document(path)?;
        Ok(tokenize(&text, context_radius))
    })?;
    let records = annotator.annotate_tokens(&path.display().to_string(), &document)?;
    Ok(records)
}

/// Annotates every document of `folder`, one rayon task per document.
///
/// A failing document is logged and reported; the rest of the folder still runs.
pub fn annotate_folder(
    folder: &Path,
    annotator: &Annotator<'_>,
    cache: &dyn DocumentCache,
    context_radius: usize,
) -> Result<FolderReport> {
    let documents = list_documents(folder)?;
    tracing::info!(folder = %folder.display(), documents = documents.len(), "annotating folder");

    let outcomes: Vec<_> = documents
        .par_iter()
        .map(|path| (path, annotate_document(path, annotator, cache, context_radius)))
        .collect();

    let mut report = FolderReport {
        documents: documents.len(),
        ..FolderReport::default()
    };
    for (path, outcome) in outcomes {
        match outcome {
            Ok(records) => {
                tracing::debug!(path = %path.display(), records = records.len(), "document done");
                report.records.extend(records);
            }
            Err(e) => {
                tracing::error!(path = %path.display(), error = %e, "document failed");
                report.failures.push((path.clone(), e));
            }
        }
    }
    Ok(report)
}
