//! Longest-match dictionary tagging of tokenized sentences
use std::cmp::min;
use std::collections::BTreeSet;
use dictionary::{Dictionary, TermId};

/// The distinct terms found in one sentence, in id order
pub type MatchSet = BTreeSet<TermId>;

/// A term found in a sentence, with the token span it covered
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Mention {
    pub id: TermId,
    pub start: usize,
    pub end: usize,
}

/// Scans sentences against one dictionary
pub struct Tagger<'d> {
    dict: &'d Dictionary,
}

impl<'d> Tagger<'d> {
    pub fn new(dict: &'d Dictionary) -> Self {
        Tagger { dict: dict }
    }

    /// Every non-overlapping mention, left to right
    ///
    /// At each position the widest window that is a dictionary key wins, and scanning resumes
    /// after it. Tokens must already be normalized.
    pub fn mentions(&self, tokens: &[String]) -> Vec<Mention> {
        let max_len = self.dict.max_synonym_len();
        let mut mentions = vec![];
        let mut start = 0;
        while start < tokens.len() {
            let widest = min(max_len, tokens.len() - start);
            // Widest first, so the first hit is the longest match
            let hit = (1..widest + 1).rev()
                .filter_map(|len| self.dict.lookup(&tokens[start..start + len])
                    .map(|id| Mention { id: id, start: start, end: start + len }))
                .next();
            match hit {
                Some(mention) => {
                    start = mention.end;
                    mentions.push(mention);
                }
                None => start += 1,
            }
        }
        mentions
    }

    /// The distinct terms in a sentence
    pub fn tag(&self, tokens: &[String]) -> MatchSet {
        self.mentions(tokens).into_iter().map(|m| m.id).collect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Cursor;
    use dictionary::BuildOptions;

    fn dict(list: &str) -> Dictionary {
        Dictionary::from_term_list(Cursor::new(list), &BuildOptions::default()).unwrap()
    }

    fn toks(text: &str) -> Vec<String> {
        text.split_whitespace().map(|t| t.to_string()).collect()
    }

    #[test]
    fn longest_match_wins() {
        let d = dict("heart\nheart attack\n");
        let tagger = Tagger::new(&d);
        let found = tagger.tag(&toks("heart attack"));
        assert_eq!(found.into_iter().collect::<Vec<_>>(), vec![2]);
        assert_eq!(tagger.tag(&toks("heart rate")).into_iter().collect::<Vec<_>>(), vec![1]);
    }

    #[test]
    fn matches_do_not_overlap() {
        let d = dict("a b\nb c\nc\n");
        let tagger = Tagger::new(&d);
        let mentions = tagger.mentions(&toks("a b c"));
        assert_eq!(mentions, vec![
            Mention { id: 1, start: 0, end: 2 },
            Mention { id: 3, start: 2, end: 3 },
        ]);
    }

    #[test]
    fn partial_windows_never_match() {
        let d = dict("myocardial infarction\n");
        let tagger = Tagger::new(&d);
        assert!(tagger.tag(&toks("myocardial")).is_empty());
        assert!(tagger.tag(&toks("acute myocardial damage")).is_empty());
    }

    #[test]
    fn repeats_collapse() {
        let d = dict("influenza|flu\nfever\n");
        let tagger = Tagger::new(&d);
        let found = tagger.tag(&toks("flu or influenza then flu with fever"));
        assert_eq!(found.into_iter().collect::<Vec<_>>(), vec![1, 2]);
    }

    #[test]
    fn short_and_empty_sentences() {
        let d = dict("one two three\n");
        let tagger = Tagger::new(&d);
        assert!(tagger.tag(&[]).is_empty());
        assert!(tagger.tag(&toks("one two")).is_empty());
        assert!(tagger.tag(&toks("zero one two three")).contains(&1));
    }

    #[test]
    fn empty_dictionary_matches_nothing() {
        let d = Dictionary::from_terms(vec![], &BuildOptions::default()).unwrap();
        assert!(Tagger::new(&d).tag(&toks("anything at all")).is_empty());
    }
}
