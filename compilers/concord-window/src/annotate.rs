use concord_lexicon::GroupIndex;
use concord_protocol::{MatchRecord, TokenizedDocument};
use concord_text::tokenize;

use crate::error::AnnotateError;
use crate::record::build_record;
use crate::window::{extract_window, WindowConfig};

/// Turns documents into match records against a fixed group index.
///
/// Holds no state besides borrowed, read-only configuration, so one
/// annotator can be shared across threads.
pub struct Annotator<'a> {
    index: &'a GroupIndex,
    config: WindowConfig,
}

impl<'a> Annotator<'a> {
    pub fn new(index: &'a GroupIndex, config: WindowConfig) -> Self {
        Self { index, config }
    }

    /// Tokenizes `text` and annotates it.
    pub fn annotate_text(
        &self,
        doc_id: &str,
        text: &str,
        context_radius: usize,
    ) -> Result<Vec<MatchRecord>, AnnotateError> {
        self.annotate_tokens(doc_id, &tokenize(text, context_radius))
    }

    /// One record per (token, group) pair, in token order then group-name order.
    pub fn annotate_tokens(
        &self,
        doc_id: &str,
        doc: &TokenizedDocument,
    ) -> Result<Vec<MatchRecord>, AnnotateError> {
        if doc.tokens.len() != doc.contexts.len() {
            return Err(AnnotateError::Misaligned {
                tokens: doc.tokens.len(),
                contexts: doc.contexts.len(),
            });
        }

        let mut records = Vec::new();
        for (index, (token, context)) in doc.tokens.iter().zip(&doc.contexts).enumerate() {
            let mut hits = self.index.matches(token).peekable();
            if hits.peek().is_none() {
                continue;
            }

            let window = extract_window(&doc.tokens, index, &self.config)?;
            for hit in hits {
                records.push(build_record(
                    window.tokens(),
                    doc_id,
                    token,
                    hit.lemma,
                    hit.group.name(),
                    context,
                    window.has_marker(),
                ));
            }
        }

        tracing::debug!(
            document = doc_id,
            tokens = doc.len(),
            records = records.len(),
            "annotated document"
        );
        Ok(records)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use concord_lexicon::{DuplicatePolicy, GroupIndexBuilder};

    fn index(entries: &[(&str, &str, &[&str])]) -> GroupIndex {
        let mut builder = GroupIndexBuilder::new(DuplicatePolicy::LastWins);
        for (group, lemma, forms) in entries {
            builder.add_lemma_forms(group, lemma, forms.iter()).unwrap();
        }
        builder.build()
    }

    #[test]
    fn test_marker_behind_match() {
        let index = index(&[("flori", "flower", &["rose"])]);
        let annotator = Annotator::new(&index, WindowConfig::default());
        let records = annotator.annotate_text("doc", "the ad rose again", 80).unwrap();

        assert_eq!(records.len(), 1);
        let record = &records[0];
        assert_eq!(record.lemma, "flower");
        assert_eq!(record.group, "flori");
        assert_eq!(record.tokenized, "the ad rose again");
        assert_eq!(record.context, "the ad rose again");
        assert!(record.has_marker);
    }

    #[test]
    fn test_no_marker_narrow_window() {
        let index = index(&[("flori", "flower", &["rose"])]);
        let annotator = Annotator::new(&index, WindowConfig::default());
        let records = annotator.annotate_text("doc", "rose is pretty", 80).unwrap();

        assert_eq!(records.len(), 1);
        assert_eq!(records[0].tokenized, "rose is pretty");
        assert!(!records[0].has_marker);
    }

    #[test]
    fn test_empty_text() {
        let index = index(&[("flori", "flower", &["rose"])]);
        let annotator = Annotator::new(&index, WindowConfig::default());
        assert!(annotator.annotate_text("doc", "", 80).unwrap().is_empty());
    }

    #[test]
    fn test_token_in_two_groups() {
        let index = index(&[
            ("flori", "floare", &["rose"]),
            ("culori", "roz", &["rose"]),
        ]);
        let annotator = Annotator::new(&index, WindowConfig::default());
        let records = annotator.annotate_text("doc", "a Rose here", 80).unwrap();

        assert_eq!(records.len(), 2);
        assert_eq!((records[0].group.as_str(), records[0].lemma.as_str()), ("culori", "roz"));
        assert_eq!((records[1].group.as_str(), records[1].lemma.as_str()), ("flori", "floare"));
        for record in &records {
            assert_eq!(record.token, "rose");
            assert_eq!(record.mention, "Rose");
            assert_eq!(record.context, records[0].context);
        }
    }

    #[test]
    fn test_only_unaccented_spelling_matches() {
        let index = index(&[("flori", "rose", &["rosé"])]);
        let annotator = Annotator::new(&index, WindowConfig::default());
        let records = annotator.annotate_text("doc", "rosé Rose rôse", 2).unwrap();

        assert_eq!(records.len(), 1);
        assert_eq!(records[0].token, "rose");
        assert_eq!(records[0].mention, "Rose");
        assert_eq!(records[0].context, "é Rose r");
    }

    #[test]
    fn test_records_follow_token_order() {
        let index = index(&[("g", "x", &["x"]), ("g", "y", &["y"])]);
        let annotator = Annotator::new(&index, WindowConfig::default());
        let records = annotator.annotate_text("doc", "y x z y", 0).unwrap();
        let mentions: Vec<_> = records.iter().map(|r| r.mention.as_str()).collect();
        assert_eq!(mentions, ["y", "x", "y"]);
    }

    #[test]
    fn test_misaligned_document() {
        let index = index(&[]);
        let annotator = Annotator::new(&index, WindowConfig::default());
        let doc = TokenizedDocument {
            tokens: vec!["a".to_string()],
            contexts: Vec::new(),
        };
        let err = annotator.annotate_tokens("doc", &doc).unwrap_err();
        assert_eq!(err, AnnotateError::Misaligned { tokens: 1, contexts: 0 });
    }
}
