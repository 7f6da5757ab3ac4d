use nom::{
    bytes::complete::{take_till, take_while},
    character::complete::satisfy,
    combinator::recognize,
    sequence::pair,
    IResult,
};
use unicode_general_category::{get_general_category, GeneralCategory};

use concord_protocol::TokenizedDocument;
use crate::token::{Span, Token};

/// Characters that continue a word once it has started.
/// Combining marks count so decomposed accents stay in their word; a word
/// itself always opens on an alphabetic char.
pub fn is_letter(c: char) -> bool {
    c.is_alphabetic()
        || matches!(
            get_general_category(c),
            GeneralCategory::NonspacingMark | GeneralCategory::SpacingMark | GeneralCategory::EnclosingMark
        )
}

/// Skips everything up to the next alphabetic char, then takes the maximal letter run.
/// A mark with no letter before it stays in the gap.
fn gap_then_word(input: &str) -> IResult<&str, (&str, &str)> {
    pair(
        take_till(char::is_alphabetic),
        recognize(pair(satisfy(char::is_alphabetic), take_while(is_letter))),
    )(input)
}

/// Lazy scanner over the words of `source`.
///
/// Cloning the iterator restarts nothing and shares nothing: each clone
/// continues independently from the same position.
#[derive(Debug, Clone)]
pub struct Tokens<'a> {
    source: &'a str,
    rest: &'a str,
    char_pos: usize,
    context_radius: usize,
}

impl<'a> Tokens<'a> {
    pub fn new(source: &'a str, context_radius: usize) -> Self {
        Self {
            source,
            rest: source,
            char_pos: 0,
            context_radius,
        }
    }
}

impl<'a> Iterator for Tokens<'a> {
    type Item = Token<'a>;

    fn next(&mut self) -> Option<Token<'a>> {
        let (next_rest, (gap, word)) = match gap_then_word(self.rest) {
            Ok(res) => res,
            Err(_) => {
                // Only separators left.
                self.rest = "";
                return None;
            }
        };

        let start = self.source.len() - self.rest.len() + gap.len();
        let span = Span::new(start, start + word.len());
        let char_start = self.char_pos + gap.chars().count();
        let char_end = char_start + word.chars().count();

        self.rest = next_rest;
        self.char_pos = char_end;

        let bounds = context_bounds(self.source, span, self.context_radius);
        Some(Token {
            text: word,
            span,
            char_start,
            char_end,
            context: &self.source[bounds.start..bounds.end],
        })
    }
}

impl std::iter::FusedIterator for Tokens<'_> {}

/// Widens `span` by `radius` characters on each side, clipped to the source.
pub fn context_bounds(source: &str, span: Span, radius: usize) -> Span {
    let start = source[..span.start]
        .char_indices()
        .rev()
        .take(radius)
        .last()
        .map_or(span.start, |(i, _)| i);
    let end = source[span.end..]
        .char_indices()
        .nth(radius)
        .map_or(source.len(), |(i, _)| span.end + i);
    Span::new(start, end)
}

/// Eager form of [`Tokens`]: index-aligned token and context strings.
pub fn tokenize(text: &str, context_radius: usize) -> TokenizedDocument {
    Tokens::new(text, context_radius).fold(TokenizedDocument::default(), |mut doc, token| {
        doc.push(token.text.to_string(), token.context.to_string());
        doc
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use proptest::prelude::*;

    fn words(text: &str) -> Vec<&str> {
        Tokens::new(text, 0).map(|t| t.text).collect()
    }

    #[test]
    fn test_splits_on_punctuation_digits_and_underscore() {
        assert_eq!(words("the ad rose again"), ["the", "ad", "rose", "again"]);
        assert_eq!(words("Ce-i aici? Nimic, 42 de ori."), ["Ce", "i", "aici", "Nimic", "de", "ori"]);
        assert_eq!(words("abc123def snake_case"), ["abc", "def", "snake", "case"]);
    }

    #[test]
    fn test_keeps_diacritics_inside_words() {
        // Precomposed and decomposed spellings both stay one token.
        assert_eq!(words("înțelepciune"), ["înțelepciune"]);
        assert_eq!(words("a\u{0302}ncă"), ["a\u{0302}ncă"]);
        assert_eq!(words("ἄνθρωπος λέγει"), ["ἄνθρωπος", "λέγει"]);
    }

    #[test]
    fn test_stray_mark_does_not_open_a_word() {
        assert_eq!(words("5\u{0301} x"), ["x"]);
        assert_eq!(words("\u{0301}\u{0308}"), Vec::<&str>::new());
        // Still attached when it follows a letter.
        assert_eq!(words("e\u{0301}5\u{0301}"), ["e\u{0301}"]);
    }

    #[test]
    fn test_empty_and_separator_only_input() {
        assert!(tokenize("", 80).is_empty());
        assert!(tokenize("  12, 34 ... !", 80).is_empty());
    }

    #[test]
    fn test_char_offsets_and_context() {
        let text = "ăla bun drum";
        let tokens: Vec<_> = Tokens::new(text, 2).collect();
        assert_eq!(tokens.len(), 3);
        assert_eq!((tokens[1].char_start, tokens[1].char_end), (4, 7));
        assert_eq!(tokens[1].context, "a bun d");
        assert_eq!(tokens[0].context, "ăla b");
        assert_eq!(tokens[2].context, "n drum");
    }

    #[test]
    fn test_radius_larger_than_document() {
        let doc = tokenize("scurt text", 500);
        assert_eq!(doc.tokens, ["scurt", "text"]);
        assert!(doc.contexts.iter().all(|c| c == "scurt text"));
    }

    #[test]
    fn test_restartable() {
        let scanner = Tokens::new("unu doi trei", 1);
        let first: Vec<_> = scanner.clone().collect();
        let second: Vec<_> = scanner.collect();
        assert_eq!(first, second);
    }

    fn letter_runs(text: &str) -> usize {
        let mut runs = 0;
        let mut inside = false;
        for c in text.chars() {
            if inside {
                inside = is_letter(c);
            } else if c.is_alphabetic() {
                runs += 1;
                inside = true;
            }
        }
        runs
    }

    proptest! {
        #[test]
        fn test_gaps_and_tokens_rebuild_source(text in "\\PC{0,60}") {
            let mut rebuilt = String::new();
            let mut last = 0;
            for token in Tokens::new(&text, 3) {
                prop_assert!(token.span.start >= last);
                rebuilt.push_str(&text[last..token.span.start]);
                rebuilt.push_str(token.text);
                last = token.span.end;
            }
            rebuilt.push_str(&text[last..]);
            prop_assert_eq!(rebuilt, text);
        }

        #[test]
        fn test_token_count_matches_letter_runs(text in "[a-zăîâșț0-9 ,._\\-\u{0301}\u{0306}]{0,60}") {
            prop_assert_eq!(Tokens::new(&text, 0).count(), letter_runs(&text));
        }

        #[test]
        fn test_context_is_bounded(text in "\\PC{0,60}", radius in 0usize..12) {
            let total = text.chars().count();
            for token in Tokens::new(&text, radius) {
                let token_len = token.char_end - token.char_start;
                let context_len = token.context.chars().count();
                prop_assert!(context_len <= 2 * radius + token_len);
                let expected = token.char_end.saturating_add(radius).min(total)
                    - token.char_start.saturating_sub(radius);
                prop_assert_eq!(context_len, expected);
                prop_assert!(token.context.contains(token.text));
            }
        }
    }
}
