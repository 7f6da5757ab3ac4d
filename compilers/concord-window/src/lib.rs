//! Match windows and annotated records.

pub mod annotate;
pub mod error;
pub mod record;
pub mod window;

pub use annotate::Annotator;
pub use error::AnnotateError;
pub use record::build_record;
pub use window::{extract_window, Window, WindowConfig};
