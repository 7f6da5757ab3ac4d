use thiserror::Error;

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum AnnotateError {
    #[error("token index {index} is out of range for {len} tokens")]
    IndexOutOfRange { index: usize, len: usize },

    #[error("document has {tokens} tokens but {contexts} contexts")]
    Misaligned { tokens: usize, contexts: usize },
}
