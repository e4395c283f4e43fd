//! Term dictionary: synonyms folded to shared term ids
//!
//! A term list has one term per line, the term and its synonyms separated by `|`:
//!
//! ```text
//! influenza|flu|grippe
//! fever|pyrexia
//! ```
//!
//! Ids count lines from 1 in the order they appear (so word 0 never names a term). Every
//! synonym is split and normalized exactly like sentence text, and keyed by its token sequence.
use std::collections::HashSet;
use std::io::BufRead;
use farm::{FarmMap, new_farm};
use normalize::{normalize_token, normalized_words};
use errors::*;

/// Identifier of a term, stable for the life of a dictionary and its caches
pub type TermId = u32;

/// Separates a term from its synonyms in the term list
pub const DELIMITER: char = '|';

/// One canonical concept and the surface forms that name it
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Term {
    pub id: TermId,
    /// Normalized token sequences, never empty
    pub synonyms: Vec<Vec<String>>,
}

/// Filters applied to synonyms while the dictionary is being built
#[derive(Debug, Clone, Default)]
pub struct BuildOptions {
    /// Normalized single words. A synonym containing any of them is dropped whole.
    pub stopwords: HashSet<String>,
    /// Drop synonyms of two characters or fewer
    pub remove_shortwords: bool,
}

impl BuildOptions {
    /// Whether a normalized synonym survives the filters
    pub fn keeps(&self, synonym: &[String]) -> bool {
        if let Some(stop) = synonym.iter().find(|t| self.stopwords.contains(*t)) {
            debug!("Dropping {:?}: contains stopword {:?}", synonym.join(" "), stop);
            return false;
        }
        if self.remove_shortwords {
            let length = synonym.iter().map(|t| t.chars().count()).sum::<usize>()
                + synonym.len().saturating_sub(1);
            if length <= 2 {
                debug!("Dropping {:?}: too short", synonym.join(" "));
                return false;
            }
        }
        true
    }
}

/// Read a stopword list: one word per line, blank lines ignored
pub fn read_stopwords<R: BufRead>(reader: R) -> Result<HashSet<String>> {
    let mut stopwords = HashSet::new();
    for (line_i, line) in reader.lines().enumerate() {
        let line = line?;
        let word = line.trim();
        if word.is_empty() { continue; }
        let word = normalize_token(word).map_err(|e| Error::MalformedInput(
            format!("stopword list line {}: {}", line_i + 1, e)))?;
        stopwords.insert(word);
    }
    Ok(stopwords)
}

/// Immutable mapping from normalized token sequences to term ids
#[derive(Debug, Clone, PartialEq)]
pub struct Dictionary {
    terms: Vec<Term>,
    entries: FarmMap<Vec<String>, TermId>,
    max_synonym_len: usize,
}

impl Dictionary {
    /// Assemble a dictionary from terms in their original order
    ///
    /// Filters are applied here, so a dictionary loaded from a cache passes through the same
    /// gate as one read from a term list. Terms left without synonyms are dropped, but their
    /// ids are not handed to anyone else. Ids must start at 1 and increase, since `term` relies
    /// on that order.
    pub(crate) fn from_terms<I>(terms: I, options: &BuildOptions) -> Result<Dictionary>
        where I: IntoIterator<Item=Term> {
        let mut dict = Dictionary {
            terms: vec![],
            entries: new_farm(),
            max_synonym_len: 0,
        };
        let mut last_id: TermId = 0;
        for mut term in terms {
            if term.id <= last_id {
                return Err(Error::MalformedInput(
                    format!("term id {} follows {}; ids must start at 1 and increase", term.id, last_id)));
            }
            last_id = term.id;
            term.synonyms.retain(|syn| !syn.is_empty() && options.keeps(syn));
            if term.synonyms.is_empty() {
                debug!("Term {} has no synonyms left and is dropped", term.id);
                continue;
            }
            for syn in term.synonyms.iter() {
                dict.max_synonym_len = dict.max_synonym_len.max(syn.len());
                if let Some(previous) = dict.entries.insert(syn.clone(), term.id) {
                    if previous != term.id {
                        debug!("{:?} moves from term {} to term {}", syn.join(" "), previous, term.id);
                    }
                }
            }
            dict.terms.push(term);
        }
        Ok(dict)
    }

    /// Parse a term list, one term (with its synonyms) per line
    pub fn from_term_list<R: BufRead>(reader: R, options: &BuildOptions) -> Result<Dictionary> {
        let mut terms = vec![];
        let mut next_id: TermId = 1;
        for (line_i, line) in reader.lines().enumerate() {
            let line = line?;
            if line.trim_start().starts_with('#') { continue; }
            let synonyms = parse_term_line(&line).map_err(|e| Error::MalformedInput(
                format!("term list line {}: {}", line_i + 1, e)))?;
            terms.push(Term { id: next_id, synonyms: synonyms });
            next_id += 1;
        }
        Dictionary::from_terms(terms, options)
    }

    /// The term the exact token sequence names, if any
    #[inline]
    pub fn lookup(&self, tokens: &[String]) -> Option<TermId> {
        self.entries.get(tokens).cloned()
    }

    /// Terms in their original order
    pub fn terms(&self) -> &[Term] {
        &self.terms
    }

    pub fn term(&self, id: TermId) -> Option<&Term> {
        self.terms.binary_search_by_key(&id, |t| t.id).ok().map(|i| &self.terms[i])
    }

    /// Number of terms (not synonyms)
    pub fn len(&self) -> usize {
        self.terms.len()
    }

    pub fn is_empty(&self) -> bool {
        self.terms.is_empty()
    }

    /// Number of distinct lookup keys
    pub fn key_count(&self) -> usize {
        self.entries.len()
    }

    /// Longest synonym, in tokens. No match window is ever wider than this.
    pub fn max_synonym_len(&self) -> usize {
        self.max_synonym_len
    }
}

/// Split one term list line into normalized synonyms
fn parse_term_line(line: &str) -> Result<Vec<Vec<String>>> {
    if line.trim().is_empty() {
        return Err(Error::MalformedInput("line is empty".into()));
    }
    let mut synonyms = vec![];
    for piece in line.split(DELIMITER) {
        let syn = normalized_words(piece)?;
        if !syn.is_empty() {
            synonyms.push(syn);
        }
    }
    if synonyms.is_empty() {
        return Err(Error::MalformedInput(format!("no term in {:?}", line)));
    }
    Ok(synonyms)
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Cursor;

    fn toks(text: &str) -> Vec<String> {
        text.split(' ').map(|t| t.to_string()).collect()
    }

    fn build(list: &str, options: &BuildOptions) -> Result<Dictionary> {
        Dictionary::from_term_list(Cursor::new(list), options)
    }

    #[test]
    fn synonyms_share_an_id() {
        let dict = build("Influenza|flu\nfever\nheart attack|Myocardial Infarction\n",
            &BuildOptions::default()).unwrap();
        assert_eq!(dict.len(), 3);
        assert_eq!(dict.lookup(&toks("influenza")), Some(1));
        assert_eq!(dict.lookup(&toks("flu")), Some(1));
        assert_eq!(dict.lookup(&toks("fever")), Some(2));
        assert_eq!(dict.lookup(&toks("myocardial infarction")), Some(3));
        assert_eq!(dict.lookup(&toks("heart")), None);
        assert_eq!(dict.max_synonym_len(), 2);
        assert_eq!(dict.key_count(), 5);
    }

    #[test]
    fn out_of_order_ids_are_refused() {
        let term = |id: TermId, word: &str| Term { id: id, synonyms: vec![toks(word)] };
        let options = BuildOptions::default();
        assert!(Dictionary::from_terms(vec![term(2, "flu"), term(1, "fever")], &options).is_err());
        assert!(Dictionary::from_terms(vec![term(1, "flu"), term(1, "fever")], &options).is_err());
        assert!(Dictionary::from_terms(vec![term(0, "flu")], &options).is_err());
        let dict = Dictionary::from_terms(vec![term(2, "flu"), term(5, "fever")], &options).unwrap();
        assert_eq!(dict.term(5).map(|t| t.synonyms.clone()), Some(vec![toks("fever")]));
        assert!(dict.term(3).is_none());
    }

    #[test]
    fn building_twice_is_identical() {
        let list = "a b c|d\ne|f g\n";
        let options = BuildOptions::default();
        assert_eq!(build(list, &options).unwrap(), build(list, &options).unwrap());
    }

    #[test]
    fn later_terms_win_shared_synonyms() {
        let dict = build("cold|chill\nfever|chill\n", &BuildOptions::default()).unwrap();
        assert_eq!(dict.lookup(&toks("chill")), Some(2));
        // Both still list it
        assert_eq!(dict.term(1).unwrap().synonyms.len(), 2);
    }

    #[test]
    fn empty_lines_are_malformed() {
        match build("flu\n   \nfever\n", &BuildOptions::default()) {
            Err(Error::MalformedInput(msg)) => assert!(msg.contains("line 2")),
            other => panic!("expected a malformed input error, got {:?}", other),
        }
        assert!(build("| |\n", &BuildOptions::default()).is_err());
    }

    #[test]
    fn comments_do_not_take_ids() {
        let dict = build("# diseases\nflu\nfever\n", &BuildOptions::default()).unwrap();
        assert_eq!(dict.lookup(&toks("flu")), Some(1));
        assert_eq!(dict.lookup(&toks("fever")), Some(2));
    }

    #[test]
    fn stopwords_drop_whole_synonyms() {
        let options = BuildOptions {
            stopwords: read_stopwords(Cursor::new("The\n\nof\n")).unwrap(),
            remove_shortwords: false,
        };
        let dict = build("the cold|common cold\nthe\nflu\n", &options).unwrap();
        assert_eq!(dict.lookup(&toks("the cold")), None);
        assert_eq!(dict.lookup(&toks("common cold")), Some(1));
        // Term 2 lost its only synonym, but term 3 keeps its id
        assert!(dict.term(2).is_none());
        assert_eq!(dict.lookup(&toks("flu")), Some(3));
    }

    #[test]
    fn shortwords_are_dropped() {
        let options = BuildOptions { remove_shortwords: true, ..BuildOptions::default() };
        let dict = build("ms|multiple sclerosis\nab\nflu\na b\n", &options).unwrap();
        assert_eq!(dict.lookup(&toks("ms")), None);
        assert_eq!(dict.lookup(&toks("multiple sclerosis")), Some(1));
        assert!(dict.term(2).is_none());
        assert_eq!(dict.lookup(&toks("flu")), Some(3));
        // "a b" is three characters with its space
        assert_eq!(dict.lookup(&toks("a b")), Some(4));
    }
}
