//! Sentence and word splitting.
//!
//! The pipeline only needs two operations from a tokenizer, so any engine
//! (NLTK-style punkt, ICU, a remote service) can sit behind
//! [`SentenceTokenizer`]. [`UnicodeTokenizer`] is the built-in UAX #29 engine.

use unicode_segmentation::UnicodeSegmentation;

pub trait SentenceTokenizer: Send + Sync {
    /// Ordered, trimmed, non-empty sentences.
    fn sentence_split(&self, text: &str) -> Vec<String>;
    /// Ordered tokens of one sentence, punctuation included, whitespace dropped.
    fn word_split(&self, sentence: &str) -> Vec<String>;
}

/// UAX #29 sentence and word boundaries.
#[derive(Debug, Clone, Copy, Default)]
pub struct UnicodeTokenizer;

/// Closing marks that may trail a terminator without moving the boundary.
fn is_closing_mark(c: char) -> bool {
    matches!(c, '"' | '\'' | ')' | ']' | '\u{201D}' | '\u{2019}')
}

/// Byte offsets right after every `.`, `!` or `?` (plus closing marks) that
/// is followed by whitespace. UAX #29 does not break before a lowercase
/// letter, but a terminator followed by a space always ends a sentence here.
fn terminator_cuts(segment: &str) -> Vec<usize> {
    let mut cuts = Vec::new();
    let mut chars = segment.char_indices().peekable();
    while let Some((_, c)) = chars.next() {
        if !matches!(c, '.' | '!' | '?') {
            continue;
        }
        while let Some(&(_, next)) = chars.peek() {
            if matches!(next, '.' | '!' | '?') || is_closing_mark(next) {
                chars.next();
            } else {
                break;
            }
        }
        if let Some(&(offset, next)) = chars.peek() {
            if next.is_whitespace() {
                cuts.push(offset);
            }
        }
    }
    cuts
}

impl SentenceTokenizer for UnicodeTokenizer {
    fn sentence_split(&self, text: &str) -> Vec<String> {
        let mut sentences = Vec::new();
        for segment in text.split_sentence_bounds() {
            let mut start = 0;
            for cut in terminator_cuts(segment).into_iter().chain([segment.len()]) {
                let sentence = segment[start..cut].trim();
                if !sentence.is_empty() {
                    sentences.push(sentence.to_string());
                }
                start = cut;
            }
        }
        sentences
    }

    fn word_split(&self, sentence: &str) -> Vec<String> {
        sentence
            .split_word_bounds()
            .filter(|w| !w.trim().is_empty())
            .map(str::to_string)
            .collect()
    }
}

/// Lower-cased copies of the tokens made only of alphanumeric characters.
pub fn alphanumeric_tokens<S: AsRef<str>>(tokens: &[S]) -> Vec<String> {
    tokens
        .iter()
        .map(AsRef::as_ref)
        .filter(|t| !t.is_empty() && t.chars().all(char::is_alphanumeric))
        .map(str::to_lowercase)
        .collect()
}

/// Match key of a single sentence: its alphanumeric tokens, lower-cased.
pub fn sentence_key(tokenizer: &dyn SentenceTokenizer, sentence: &str) -> Vec<String> {
    alphanumeric_tokens(&tokenizer.word_split(sentence))
}

/// Match keys of every sentence in a block, in order.
pub fn block_keys(tokenizer: &dyn SentenceTokenizer, text: &str) -> Vec<Vec<String>> {
    tokenizer
        .sentence_split(text)
        .iter()
        .map(|sentence| sentence_key(tokenizer, sentence))
        .collect()
}
