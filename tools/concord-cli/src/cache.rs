use std::ffi::OsString;
use std::fs;
use std::io;
use std::path::{Path, PathBuf};
use std::time::UNIX_EPOCH;

use concord_protocol::{CachedDocument, Fingerprint, TokenizedDocument};
use rkyv::AlignedVec;
use thiserror::Error;

use crate::corpus::{DocumentError, CACHE_SUFFIX};

#[derive(Debug, Error)]
pub enum CacheError {
    #[error(transparent)]
    Io(#[from] io::Error),

    #[error("corrupt cache entry: {0}")]
    Corrupt(String),

    #[error("cannot serialize cache entry: {0}")]
    Serialize(String),
}

/// Memoizes tokenization per document. Results never depend on whether a
/// cache entry existed.
pub trait DocumentCache: Send + Sync {
    fn get_or_compute(
        &self,
        path: &Path,
        compute: &dyn Fn() -> Result<TokenizedDocument, DocumentError>,
    ) -> Result<TokenizedDocument, DocumentError>;
}

pub struct NoCache;

impl DocumentCache for NoCache {
    fn get_or_compute(
        &self,
        _path: &Path,
        compute: &dyn Fn() -> Result<TokenizedDocument, DocumentError>,
    ) -> Result<TokenizedDocument, DocumentError> {
        compute()
    }
}

/// Stores each tokenization next to its document as `<path>.cache`.
///
/// An entry is reused only if the document's length and mtime and the
/// context radius all match what was recorded.
pub struct FileCache {
    context_radius: u32,
}

impl FileCache {
    pub fn new(context_radius: usize) -> Self {
        Self {
            context_radius: u32::try_from(context_radius).unwrap_or(u32::MAX),
        }
    }

    pub fn entry_path(path: &Path) -> PathBuf {
        let mut name = OsString::from(path.as_os_str());
        name.push(CACHE_SUFFIX);
        PathBuf::from(name)
    }

    fn load(&self, path: &Path, fingerprint: Fingerprint) -> Result<Option<TokenizedDocument>, CacheError> {
        let bytes = match fs::read(Self::entry_path(path)) {
            Ok(bytes) => bytes,
            Err(e) if e.kind() == io::ErrorKind::NotFound => return Ok(None),
            Err(e) => return Err(e.into()),
        };

        let mut aligned = AlignedVec::with_capacity(bytes.len());
        aligned.extend_from_slice(&bytes);
        let cached = rkyv::from_bytes::<CachedDocument>(&aligned)
            .map_err(|e| CacheError::Corrupt(e.to_string()))?;

        if cached.fingerprint != fingerprint || cached.context_radius != self.context_radius {
            return Ok(None);
        }
        Ok(Some(cached.document))
    }

    fn store(&self, path: &Path, fingerprint: Fingerprint, document: &TokenizedDocument) -> Result<(), CacheError> {
        let entry = CachedDocument {
            fingerprint,
            context_radius: self.context_radius,
            document: document.clone(),
        };
        let bytes = rkyv::to_bytes::<_, 4096>(&entry).map_err(|e| CacheError::Serialize(e.to_string()))?;
        fs::write(Self::entry_path(path), bytes.as_slice())?;
        Ok(())
    }
}

impl DocumentCache for FileCache {
    fn get_or_compute(
        &self,
        path: &Path,
        compute: &dyn Fn() -> Result<TokenizedDocument, DocumentError>,
    ) -> Result<TokenizedDocument, DocumentError> {
        let fingerprint = match fingerprint(path) {
            Ok(fp) => fp,
            // Let the computation report the I/O problem itself.
            Err(_) => return compute(),
        };

        match self.load(path, fingerprint) {
            Ok(Some(document)) => {
                tracing::debug!(path = %path.display(), "cache hit");
                return Ok(document);
            }
            Ok(None) => {}
            Err(e) => tracing::warn!(path = %path.display(), error = %e, "ignoring unreadable cache entry"),
        }

        let document = compute()?;
        if let Err(e) = self.store(path, fingerprint, &document) {
            tracing::warn!(path = %path.display(), error = %e, "cannot write cache entry");
        }
        Ok(document)
    }
}

pub fn fingerprint(path: &Path) -> io::Result<Fingerprint> {
    let meta = fs::metadata(path)?;
    let modified = meta
        .modified()?
        .duration_since(UNIX_EPOCH)
        .unwrap_or_default();
    Ok(Fingerprint {
        len: meta.len(),
        modified_secs: modified.as_secs(),
        modified_nanos: modified.subsec_nanos(),
    })
}
