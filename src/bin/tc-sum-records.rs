//! Sum cooccurrence record streams into corpus totals
//!
//! Reads the output of one or more `tc-cooccur` runs (stdin if no files are given) and writes
//! one record per key with the summed weight, sorted by key, followed by a single
//! `SENTENCECOUNT` for the whole corpus.

// argument parsing
#[macro_use] extern crate clap;
// logging
#[macro_use] extern crate log;
extern crate env_logger;
// lastly, this library
extern crate termcooc;

use std::fs::File;
use std::io::{self, BufReader, BufWriter};

use termcooc::errors::*;
use termcooc::Totals;

pub fn main() {
    // Main can't return a Result, and the ? operator needs the enclosing function to return Result
    inner_main().expect("Could not recover. Exiting.");
}

pub fn inner_main() -> Result<()> {
    env_logger::init();
    let args = app_from_crate!()
        .arg_from_usage("[streams]... 'record files to add up (default: stdin)'")
        .arg_from_usage("--out [FILE] 'where to write the totals (default: stdout)'")
        .get_matches();

    let mut totals = Totals::new();
    match args.values_of("streams") {
        Some(paths) => for path in paths {
            info!("Adding {}", path);
            totals.add_stream(BufReader::new(File::open(path)?))?;
        },
        None => {
            let stdin = io::stdin();
            totals.add_stream(stdin.lock())?;
        }
    }
    info!("{} documents, {} sentences, {} terms, {} pairs",
        totals.documents, totals.sentences, totals.occurrences.len(), totals.cooccurrences.len());

    match args.value_of("out") {
        Some(path) => totals.write_to(BufWriter::new(File::create(path)?)),
        None => {
            let stdout = io::stdout();
            let sink = BufWriter::new(stdout.lock());
            totals.write_to(sink)
        }
    }
}
