//! Word scanning and form normalization.

pub mod normalize;
pub mod token;
pub mod tokenizer;

pub use normalize::{match_key, normalize_form, strip_accents};
pub use token::{Span, Token};
pub use tokenizer::{context_bounds, is_letter, tokenize, Tokens};
