use rkyv::{Archive, Deserialize, Serialize};
use crate::ids::{GroupId, LemmaId};
use alloc::string::String;
use alloc::vec::Vec;

#[cfg(feature = "serde")]
use serde::{Deserialize as SerdeDeserialize, Serialize as SerdeSerialize};

/// Canonical base form shared by a family of word-forms.
#[derive(Debug, Clone, PartialEq, Eq, Archive, Serialize, Deserialize)]
#[cfg_attr(feature = "serde", derive(SerdeDeserialize, SerdeSerialize))]
#[archive(check_bytes)]
pub struct Lemma {
    pub id: LemmaId,
    pub text: String,
}

/// A normalized word-form listed in a group, with the lemma file it came from.
#[derive(Debug, Clone, PartialEq, Eq, Archive, Serialize, Deserialize)]
#[cfg_attr(feature = "serde", derive(SerdeDeserialize, SerdeSerialize))]
#[archive(check_bytes)]
pub struct Member {
    pub form: String,
    pub lemma: LemmaId,
}

#[derive(Debug, Clone, PartialEq, Eq, Archive, Serialize, Deserialize)]
#[cfg_attr(feature = "serde", derive(SerdeDeserialize, SerdeSerialize))]
#[archive(check_bytes)]
pub struct Group {
    pub id: GroupId,
    pub name: String,
    pub members: Vec<Member>,
}

/// Compiled form of a wordlist tree. Groups are sorted by name.
#[derive(Debug, Clone, PartialEq, Eq, Archive, Serialize, Deserialize)]
#[cfg_attr(feature = "serde", derive(SerdeDeserialize, SerdeSerialize))]
#[archive(check_bytes)]
pub struct Lexicon {
    pub version: u32,
    pub lemmas: Vec<Lemma>,
    pub groups: Vec<Group>,
}

impl Lexicon {
    pub const VERSION: u32 = 1;
}

/// Output of the tokenizer for one document.
/// `tokens[i]` and `contexts[i]` describe the same word.
#[derive(Debug, Clone, Default, PartialEq, Eq, Archive, Serialize, Deserialize)]
#[cfg_attr(feature = "serde", derive(SerdeDeserialize, SerdeSerialize))]
#[archive(check_bytes)]
pub struct TokenizedDocument {
    pub tokens: Vec<String>,
    pub contexts: Vec<String>,
}

impl TokenizedDocument {
    pub fn len(&self) -> usize {
        self.tokens.len()
    }

    pub fn is_empty(&self) -> bool {
        self.tokens.is_empty()
    }

    pub fn push(&mut self, token: String, context: String) {
        self.tokens.push(token);
        self.contexts.push(context);
    }
}

/// Identifies a file's content without reading it: byte length plus mtime.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Archive, Serialize, Deserialize)]
#[archive(check_bytes)]
pub struct Fingerprint {
    pub len: u64,
    pub modified_secs: u64,
    pub modified_nanos: u32,
}

/// On-disk cache entry for a tokenized document.
#[derive(Debug, Clone, PartialEq, Eq, Archive, Serialize, Deserialize)]
#[archive(check_bytes)]
pub struct CachedDocument {
    pub fingerprint: Fingerprint,
    pub context_radius: u32,
    pub document: TokenizedDocument,
}

/// One annotated occurrence of a group word. Field order is the export column order.
#[derive(Debug, Clone, PartialEq, Eq, Archive, Serialize, Deserialize)]
#[cfg_attr(feature = "serde", derive(SerdeDeserialize, SerdeSerialize))]
#[archive(check_bytes)]
pub struct MatchRecord {
    pub document: String,
    pub lemma: String,
    pub group: String,
    /// Lowercased token.
    pub token: String,
    /// Token as it appears in the text.
    pub mention: String,
    pub context: String,
    /// Token window joined with single spaces.
    pub tokenized: String,
    pub has_marker: bool,
}
