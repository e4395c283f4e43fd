//! The one normalization used on both sides: dictionary synonyms and sentence tokens
//!
//! If the dictionary and the tagger disagree on how a word is folded, terms silently stop
//! matching, so everything that turns text into lookup keys goes through this module.
use unicode_normalization::UnicodeNormalization;
use unicode_normalization::char::is_combining_mark;
use unicode_segmentation::UnicodeSegmentation;
use errors::*;

/// Fold case and diacritics out of a single token
///
/// Fails on tokens that can't be keys: empty ones, ones containing whitespace or control
/// characters, and ones carrying the replacement character left behind by a bad decode.
pub fn normalize_token(token: &str) -> Result<String> {
    if token.is_empty() {
        return Err(Error::MalformedInput("empty token".into()));
    }
    if let Some(bad) = token.chars().find(|c| c.is_whitespace() || c.is_control() || *c == '\u{FFFD}') {
        return Err(Error::MalformedInput(
            format!("token {:?} contains {:?} and cannot be normalized", token, bad)));
    }
    let folded: String = token.nfkd()
        .filter(|c| !is_combining_mark(*c))
        .flat_map(|c| c.to_lowercase())
        .collect();
    if folded.is_empty() {
        // Nothing but combining marks
        return Err(Error::MalformedInput(format!("token {:?} normalizes to nothing", token)));
    }
    Ok(folded)
}

/// Split at unicode word bounds, dropping the whitespace in between
///
/// A combining mark after a space attaches to the space, so segments are trimmed and kept only
/// if something besides marks and joiners is left.
pub fn words(text: &str) -> Vec<&str> {
    text.split_word_bounds()
        .map(str::trim)
        .filter(|w| w.chars().any(|c| !c.is_whitespace() && !is_mark_or_joiner(c)))
        .collect()
}

fn is_mark_or_joiner(c: char) -> bool {
    is_combining_mark(c) || c == '\u{200C}' || c == '\u{200D}'
}

/// Split and normalize in one go
pub fn normalized_words(text: &str) -> Result<Vec<String>> {
    words(text).into_iter().map(normalize_token).collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn folds_case_and_accents() {
        assert_eq!(normalize_token("Influenza").unwrap(), "influenza");
        assert_eq!(normalize_token("Sjögren").unwrap(), "sjogren");
        // Decomposed input ends up the same as composed input
        assert_eq!(normalize_token("Sjo\u{0308}gren").unwrap(), "sjogren");
    }

    #[test]
    fn rejects_unusable_tokens() {
        assert!(normalize_token("").is_err());
        assert!(normalize_token("two words").is_err());
        assert!(normalize_token("bro\u{FFFD}ken").is_err());
        assert!(normalize_token("\u{0301}").is_err());
    }

    #[test]
    fn words_skip_whitespace() {
        assert_eq!(words("  heart   attack\t"), vec!["heart", "attack"]);
        assert_eq!(words("covid-19 risk."), vec!["covid", "-", "19", "risk", "."]);
        assert!(words("   ").is_empty());
    }

    #[test]
    fn stray_marks_between_words_are_dropped() {
        assert_eq!(words("flu and \u{301} fever"), vec!["flu", "and", "fever"]);
        assert_eq!(words("\u{301}flu"), vec!["flu"]);
        assert!(normalized_words("flu  \u{301}\u{200D} fever").is_ok());
        // Marks on a letter stay with the letter
        assert_eq!(words("Sjo\u{0308}gren"), vec!["Sjo\u{0308}gren"]);
    }

    #[test]
    fn normalized_words_match_for_synonyms_and_text() {
        let from_synonym = normalized_words("Heart Attack").unwrap();
        let from_sentence = normalized_words("heart  ATTACK").unwrap();
        assert_eq!(from_synonym, from_sentence);
    }
}
