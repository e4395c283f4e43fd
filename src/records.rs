//! The textual record stream, and summing it back into totals
//!
//! One record per line, tab separated:
//!
//! ```text
//! COOCCURRENCE    <low id>  <high id>  <weight>
//! OCCURRENCE      <id>      <weight>
//! SENTENCECOUNT   <count>
//! ```
//!
//! Records are only ever partial counts. The same key shows up many times across a stream and
//! the totals are the sums of the weights.
use std::collections::BTreeMap;
use std::fmt;
use std::io::{BufRead, Write};
use std::str::FromStr;
use dictionary::TermId;
use errors::*;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Record {
    /// Two distinct terms in one sentence. `low < high` always.
    Cooccurrence { low: TermId, high: TermId, weight: u64 },
    Occurrence { id: TermId, weight: u64 },
    /// Sentences in one document
    SentenceCount(u64),
}

impl Record {
    /// A cooccurrence with its ids put in order
    ///
    /// Returns None for a term paired with itself.
    pub fn pair(a: TermId, b: TermId, weight: u64) -> Option<Record> {
        if a < b {
            Some(Record::Cooccurrence { low: a, high: b, weight: weight })
        } else if b < a {
            Some(Record::Cooccurrence { low: b, high: a, weight: weight })
        } else {
            None
        }
    }
}

impl fmt::Display for Record {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        match *self {
            Record::Cooccurrence { low, high, weight } =>
                write!(f, "COOCCURRENCE\t{}\t{}\t{}", low, high, weight),
            Record::Occurrence { id, weight } => write!(f, "OCCURRENCE\t{}\t{}", id, weight),
            Record::SentenceCount(count) => write!(f, "SENTENCECOUNT\t{}", count),
        }
    }
}

impl FromStr for Record {
    type Err = Error;

    fn from_str(line: &str) -> Result<Record> {
        let fields: Vec<&str> = line.trim_end_matches(|c: char| c == '\n' || c == '\r')
            .split('\t')
            .collect();
        let complain = || Error::MalformedInput(format!("not a record: {:?}", line));
        let num = |s: &str| s.parse::<u64>().map_err(|_| complain());
        let id = |s: &str| s.parse::<TermId>().map_err(|_| complain());
        match &fields[..] {
            &["COOCCURRENCE", a, b, w] => {
                let (low, high) = (id(a)?, id(b)?);
                if low >= high {
                    return Err(Error::MalformedInput(
                        format!("cooccurrence ids out of order in {:?}", line)));
                }
                Ok(Record::Cooccurrence { low: low, high: high, weight: num(w)? })
            }
            &["OCCURRENCE", i, w] => Ok(Record::Occurrence { id: id(i)?, weight: num(w)? }),
            &["SENTENCECOUNT", n] => Ok(Record::SentenceCount(num(n)?)),
            _ => Err(complain()),
        }
    }
}

/// Corpus-wide sums over any number of record streams
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Totals {
    pub cooccurrences: BTreeMap<(TermId, TermId), u64>,
    pub occurrences: BTreeMap<TermId, u64>,
    pub sentences: u64,
    pub documents: u64,
}

impl Totals {
    pub fn new() -> Self {
        Default::default()
    }

    pub fn add(&mut self, record: &Record) {
        match *record {
            Record::Cooccurrence { low, high, weight } =>
                *self.cooccurrences.entry((low, high)).or_insert(0) += weight,
            Record::Occurrence { id, weight } =>
                *self.occurrences.entry(id).or_insert(0) += weight,
            Record::SentenceCount(count) => {
                self.sentences += count;
                self.documents += 1;
            }
        }
    }

    /// Sum every record in a stream. Blank lines are skipped.
    pub fn add_stream<R: BufRead>(&mut self, reader: R) -> Result<()> {
        for (line_i, line) in reader.lines().enumerate() {
            let line = line?;
            if line.trim().is_empty() { continue; }
            let record: Record = line.parse().map_err(|e| Error::MalformedInput(
                format!("record stream line {}: {}", line_i + 1, e)))?;
            self.add(&record);
        }
        Ok(())
    }

    /// Cooccurrences sharing a term with the given one, with their summed weights
    pub fn partners(&self, id: TermId) -> Vec<(TermId, u64)> {
        self.cooccurrences.iter()
            .filter_map(|(&(low, high), &weight)| {
                if low == id { Some((high, weight)) }
                else if high == id { Some((low, weight)) }
                else { None }
            })
            .collect()
    }

    /// Write the sums back out as records, sorted by key, with one total sentence count
    pub fn write_to<W: Write>(&self, mut sink: W) -> Result<()> {
        for (&(low, high), &weight) in self.cooccurrences.iter() {
            writeln!(sink, "{}", Record::Cooccurrence { low: low, high: high, weight: weight })?;
        }
        for (&id, &weight) in self.occurrences.iter() {
            writeln!(sink, "{}", Record::Occurrence { id: id, weight: weight })?;
        }
        writeln!(sink, "{}", Record::SentenceCount(self.sentences))?;
        sink.flush()?;
        Ok(())
    }
}
