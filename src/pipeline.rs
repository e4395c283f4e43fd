//! Documents in, record stream out
//!
//! Strictly sequential: documents in order, sentences in order, and each sentence is tagged
//! completely before its records are written. The dictionary is only ever read.
use std::io::Write;
use std::time::Instant;
use accumulate::DocumentCounters;
use dictionary::Dictionary;
use tagger::Tagger;
use text::{clean_encoding, RegexSentenceSplitter, SentenceSplitter, Tokenizer, WordTokenizer};
use errors::*;

/// What happened to one document
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct DocumentReport {
    pub sentences: u64,
    pub skipped_sentences: u64,
}

/// What happened over a whole run
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct RunSummary {
    pub documents: u64,
    pub sentences: u64,
    pub skipped_sentences: u64,
    pub failed_documents: u64,
}

impl RunSummary {
    fn absorb(&mut self, report: &DocumentReport) {
        self.documents += 1;
        self.sentences += report.sentences;
        self.skipped_sentences += report.skipped_sentences;
    }
}

/// Tags sentences against a dictionary and streams their cooccurrences
pub struct Extractor<'d, S = RegexSentenceSplitter, T = WordTokenizer> {
    tagger: Tagger<'d>,
    splitter: S,
    tokenizer: T,
    progress_every: u64,
}

impl<'d> Extractor<'d> {
    /// Use the default sentence splitter and tokenizer
    pub fn new(dict: &'d Dictionary) -> Self {
        Extractor::with_parts(dict, RegexSentenceSplitter::new(), WordTokenizer)
    }
}

impl<'d, S: SentenceSplitter, T: Tokenizer> Extractor<'d, S, T> {
    pub fn with_parts(dict: &'d Dictionary, splitter: S, tokenizer: T) -> Self {
        Extractor {
            tagger: Tagger::new(dict),
            splitter: splitter,
            tokenizer: tokenizer,
            progress_every: 10000,
        }
    }

    /// Log progress every this many documents (0 for never)
    pub fn progress_every(mut self, documents: u64) -> Self {
        self.progress_every = documents;
        self
    }

    /// Write the records of one document, ending with its sentence count
    ///
    /// A sentence that can't be tokenized is skipped but still counted as a sentence of the
    /// document. Only sink failures are errors.
    pub fn process_document<W: Write>(&self, doc_i: u64, text: &str, sink: &mut W)
        -> Result<DocumentReport> {
        let text = clean_encoding(text);
        let mut counters = DocumentCounters::new(sink);
        let mut skipped = 0;
        for (sent_i, sentence) in self.splitter.split_sentences(&text).iter().enumerate() {
            match self.tokenizer.tokenize(sentence) {
                Ok(tokens) => counters.sentence(&self.tagger.tag(&tokens))?,
                Err(ref err) if err.is_recoverable() => {
                    warn!("Skipping document {} sentence {}: {}", doc_i, sent_i, err);
                    skipped += 1;
                    counters.count_only();
                }
                Err(err) => return Err(err),
            }
        }
        let sentences = counters.finish()?;
        Ok(DocumentReport { sentences: sentences, skipped_sentences: skipped })
    }

    /// Process every document, in order
    ///
    /// Unreadable documents are logged and counted; the run goes on without them. Anything
    /// else (including a sink that stops accepting writes) ends the run.
    pub fn run<I, W>(&self, documents: I, sink: &mut W) -> Result<RunSummary>
        where I: IntoIterator<Item=Result<String>>, W: Write {
        let start = Instant::now();
        let mut summary = RunSummary::default();
        for (doc_i, document) in documents.into_iter().enumerate() {
            let doc_i = doc_i as u64;
            match document {
                Ok(text) => {
                    let report = self.process_document(doc_i, &text, sink)?;
                    summary.absorb(&report);
                }
                Err(ref err) if err.is_recoverable() => {
                    warn!("Skipping document {}: {}", doc_i, err);
                    summary.failed_documents += 1;
                }
                Err(err) => return Err(err),
            }
            if self.progress_every > 0 && (doc_i + 1) % self.progress_every == 0 {
                info!("Finished {} documents ({} sentences) in {:.1}s",
                    doc_i + 1, summary.sentences, start.elapsed().as_secs_f64());
            }
        }
        sink.flush()?;
        if summary.skipped_sentences > 0 || summary.failed_documents > 0 {
            warn!("Skipped {} sentences and {} documents that couldn't be read",
                summary.skipped_sentences, summary.failed_documents);
        }
        Ok(summary)
    }
}
