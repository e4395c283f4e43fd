//! Default sentence splitting and tokenization
//!
//! Neither is clever. They're here so the tools run out of the box; anything implementing the
//! traits can be swapped in.
use regex::Regex;
use normalize::normalized_words;
use errors::*;

/// Cut a document into sentences
pub trait SentenceSplitter {
    fn split_sentences(&self, text: &str) -> Vec<String>;
}

/// Turn a sentence into normalized tokens
///
/// An error means the sentence can't be tagged; it gets skipped, not the whole run.
pub trait Tokenizer {
    fn tokenize(&self, sentence: &str) -> Result<Vec<String>>;
}

/// Splits at blank lines, and after `.`, `!` or `?` when the next sentence starts with a
/// capital or a digit
pub struct RegexSentenceSplitter {
    paragraph: Regex,
    terminal: Regex,
}

impl RegexSentenceSplitter {
    pub fn new() -> Self {
        RegexSentenceSplitter {
            paragraph: Regex::new(r"\n[ \t\r]*\n").expect("paragraph pattern is valid"),
            terminal: Regex::new(r#"[.!?]+["')\]]*\s+"#).expect("terminal pattern is valid"),
        }
    }
}

impl Default for RegexSentenceSplitter {
    fn default() -> Self {
        RegexSentenceSplitter::new()
    }
}

impl SentenceSplitter for RegexSentenceSplitter {
    fn split_sentences(&self, text: &str) -> Vec<String> {
        let mut sentences = vec![];
        for paragraph in self.paragraph.split(text) {
            let mut start = 0;
            for end in self.terminal.find_iter(paragraph).map(|m| m.end()) {
                let starts_sentence = paragraph[end..].chars().next()
                    .map(|c| c.is_uppercase() || c.is_numeric())
                    .unwrap_or(false);
                if starts_sentence {
                    sentences.push(&paragraph[start..end]);
                    start = end;
                }
            }
            sentences.push(&paragraph[start..]);
        }
        sentences.into_iter()
            .map(str::trim)
            .filter(|s| !s.is_empty())
            .map(|s| s.to_string())
            .collect()
    }
}

/// Unicode word splitting with the shared normalization
#[derive(Default)]
pub struct WordTokenizer;

impl Tokenizer for WordTokenizer {
    fn tokenize(&self, sentence: &str) -> Result<Vec<String>> {
        normalized_words(sentence)
    }
}

/// Blank out control characters (NULs and friends) that sneak into extracted text
///
/// Line structure is kept. The replacement character is left alone on purpose so that the
/// tokenizer refuses the sentence it sits in.
pub fn clean_encoding(text: &str) -> String {
    text.chars()
        .map(|c| if c.is_control() && !c.is_whitespace() { ' ' } else { c })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn splits_on_terminal_punctuation() {
        let splitter = RegexSentenceSplitter::new();
        let sentences = splitter.split_sentences(
            "The flu caused a fever. Rest helped!  3 patients recovered? yes, mostly.");
        assert_eq!(sentences, vec![
            "The flu caused a fever.",
            "Rest helped!",
            "3 patients recovered? yes, mostly.",
        ]);
    }

    #[test]
    fn keeps_decimals_and_lowercase_continuations() {
        let splitter = RegexSentenceSplitter::new();
        let sentences = splitter.split_sentences("Dose was 2.5 mg. vs. placebo it worked.");
        assert_eq!(sentences, vec!["Dose was 2.5 mg. vs. placebo it worked."]);
    }

    #[test]
    fn blank_lines_end_sentences() {
        let splitter = RegexSentenceSplitter::new();
        let sentences = splitter.split_sentences("Title without a period\n\n  \nBody text.\n");
        assert_eq!(sentences, vec!["Title without a period", "Body text."]);
        assert!(splitter.split_sentences("  \n ").is_empty());
    }

    #[test]
    fn tokenizer_normalizes() {
        let tokens = WordTokenizer.tokenize("The Flu, and FEVER.").unwrap();
        assert_eq!(tokens, vec!["the", "flu", ",", "and", "fever", "."]);
        assert!(WordTokenizer.tokenize("bro\u{FFFD}ken text").is_err());
    }

    #[test]
    fn control_characters_are_blanked() {
        assert_eq!(clean_encoding("a\u{0}b\nc\u{7}"), "a b\nc ");
    }
}
