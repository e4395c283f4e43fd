//! Streaming cooccurrence records, one sentence at a time
//!
//! Nothing is summed here. Every sentence writes weight-1 records straight to the sink, so memory
//! stays flat no matter how big the corpus is; see `records::Totals` for the summing side.
use std::io::Write;
use records::Record;
use tagger::MatchSet;
use errors::*;

/// Write one sentence's pairs and occurrences
pub fn accumulate<W: Write>(matches: &MatchSet, sink: &mut W) -> Result<()> {
    // The set is ordered, so every later id is higher than the earlier one
    for (i, &low) in matches.iter().enumerate() {
        for &high in matches.iter().skip(i + 1) {
            writeln!(sink, "{}", Record::Cooccurrence { low: low, high: high, weight: 1 })?;
        }
    }
    for &id in matches.iter() {
        writeln!(sink, "{}", Record::Occurrence { id: id, weight: 1 })?;
    }
    Ok(())
}

/// Close out a document with its sentence count
pub fn flush_document<W: Write>(sentence_count: u64, sink: &mut W) -> Result<()> {
    writeln!(sink, "{}", Record::SentenceCount(sentence_count))?;
    Ok(())
}

/// Per-document state: the sink and how many sentences have gone by
pub struct DocumentCounters<'w, W: 'w + Write> {
    sink: &'w mut W,
    sentences: u64,
}

impl<'w, W: Write> DocumentCounters<'w, W> {
    pub fn new(sink: &'w mut W) -> Self {
        DocumentCounters { sink: sink, sentences: 0 }
    }

    /// Count a sentence and write its records
    pub fn sentence(&mut self, matches: &MatchSet) -> Result<()> {
        self.sentences += 1;
        accumulate(matches, &mut *self.sink)
    }

    /// Count a sentence that produced no records (skipped or empty)
    pub fn count_only(&mut self) {
        self.sentences += 1;
    }

    pub fn sentences(&self) -> u64 {
        self.sentences
    }

    /// Write the sentence count and end the document
    pub fn finish(self) -> Result<u64> {
        flush_document(self.sentences, self.sink)?;
        Ok(self.sentences)
    }
}
