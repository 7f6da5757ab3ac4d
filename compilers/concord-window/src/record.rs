use concord_protocol::MatchRecord;

use crate::window::join_tokens;

/// Assembles the exported row for one (token, group) match.
pub fn build_record<S: AsRef<str>>(
    window: &[S],
    doc_id: &str,
    token: &str,
    lemma: &str,
    group: &str,
    context: &str,
    has_marker: bool,
) -> MatchRecord {
    MatchRecord {
        document: doc_id.to_string(),
        lemma: lemma.to_string(),
        group: group.to_string(),
        token: token.to_lowercase(),
        mention: token.to_string(),
        context: context.to_string(),
        tokenized: join_tokens(window),
        has_marker,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_build_record() {
        let record = build_record(
            &["Ad", "Rosa", "venit"],
            "late/doc1.txt",
            "Rosa",
            "rosa",
            "flori",
            "…ad Rosa venit…",
            true,
        );
        assert_eq!(record.document, "late/doc1.txt");
        assert_eq!(record.token, "rosa");
        assert_eq!(record.mention, "Rosa");
        assert_eq!(record.tokenized, "Ad Rosa venit");
        assert_eq!(record.context, "…ad Rosa venit…");
        assert!(record.has_marker);
    }

    #[test]
    fn test_empty_window() {
        let record = build_record::<&str>(&[], "d", "x", "x", "g", "x", false);
        assert_eq!(record.tokenized, "");
    }
}
