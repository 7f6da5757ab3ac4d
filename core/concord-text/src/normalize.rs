use unicode_general_category::{get_general_category, GeneralCategory};
use unicode_normalization::UnicodeNormalization;

/// Canonically decomposes `s` and drops nonspacing marks: "ședință" -> "sedinta".
pub fn strip_accents(s: &str) -> String {
    s.nfd()
        .filter(|c| get_general_category(*c) != GeneralCategory::NonspacingMark)
        .collect()
}

/// Form as stored in a group: trimmed and accent-free, case preserved.
pub fn normalize_form(s: &str) -> String {
    strip_accents(s.trim())
}

/// Key used to compare tokens against group forms.
/// Both sides of a lookup must go through this function.
pub fn match_key(s: &str) -> String {
    normalize_form(s).to_lowercase()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_strip_accents() {
        assert_eq!(strip_accents("ședință"), "sedinta");
        assert_eq!(strip_accents("Ἀθῆναι"), "Αθηναι");
        assert_eq!(strip_accents("plain"), "plain");
    }

    #[test]
    fn test_accent_variants_share_a_key() {
        // Precomposed, decomposed and unaccented spellings.
        let variants = ["încă", "i\u{0302}nca\u{0306}", "INCA", "  inca\t"];
        for v in variants {
            assert_eq!(match_key(v), "inca");
        }
    }

    #[test]
    fn test_normalize_keeps_case() {
        assert_eq!(normalize_form(" Ștefan "), "Stefan");
    }
}
