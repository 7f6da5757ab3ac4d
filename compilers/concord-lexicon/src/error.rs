use std::io;
use std::path::PathBuf;

use thiserror::Error;

#[derive(Debug, Error)]
pub enum LexiconError {
    #[error("cannot read {}: {source}", path.display())]
    Io {
        path: PathBuf,
        #[source]
        source: io::Error,
    },

    #[error("{} is not valid UTF-8", path.display())]
    Decode { path: PathBuf },

    #[error("{} is not a directory", .0.display())]
    NotADirectory(PathBuf),

    /// Raised only under `DuplicatePolicy::Reject`.
    #[error("form '{form}' is listed under lemma '{previous}' and lemma '{lemma}'")]
    ConflictingLemma {
        form: String,
        previous: String,
        lemma: String,
    },

    #[error("form '{form}' of group '{group}' references unknown lemma id {id}")]
    UnknownLemma { group: String, form: String, id: u32 },

    #[error("unsupported lexicon version {found} (expected {expected})")]
    Version { found: u32, expected: u32 },

    #[error("invalid lexicon archive: {0}")]
    Archive(String),
}

pub type Result<T> = std::result::Result<T, LexiconError>;
