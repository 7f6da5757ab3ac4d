//! Word groups: which forms to look for, and which lemma each form reports.

pub mod archive;
pub mod error;
pub mod index;
pub mod loader;

pub use archive::{compile, load_compiled};
pub use error::LexiconError;
pub use index::{DuplicatePolicy, Group, GroupIndex, GroupIndexBuilder, GroupMatch};
pub use loader::load_groups;
