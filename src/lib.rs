//! Dictionary term cooccurrence extraction
//!
//! Terms (each with any number of synonyms) are tagged in sentences by longest match, and every
//! sentence streams out which terms it contained and which pairs of them appeared together.
//! The library is shared by the included binaries: `tc-cooccur` writes the record stream and
//! `tc-sum-records` sums streams into corpus totals.

#[macro_use] extern crate log;
extern crate byteorder;
extern crate farmhash;
extern crate regex;
extern crate unicode_normalization;
extern crate unicode_segmentation;
#[cfg(test)] extern crate tempfile;

pub mod errors;
pub mod farm;
pub mod normalize;
pub mod dictionary;
pub mod cache;
pub mod tagger;
pub mod records;
pub mod accumulate;
pub mod text;
pub mod documents;
pub mod pipeline;

pub use dictionary::{BuildOptions, Dictionary, Term, TermId};
pub use pipeline::{Extractor, RunSummary};
pub use records::{Record, Totals};
pub use tagger::{MatchSet, Tagger};
