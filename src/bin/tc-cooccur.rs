//! Tag dictionary terms in documents and stream their sentence cooccurrences
//!
//! Terms come from a term list (one term per line, synonyms separated by `|`) or from a cache
//! saved by an earlier run. Documents come from a file of blank-line separated documents (stdin
//! by default), from a list of file names with one document per file, or from a single file read
//! whole as one document.
//!
//! Every sentence writes a `COOCCURRENCE` record for each pair of distinct terms in it and an
//! `OCCURRENCE` record for each term, all with weight 1; every document ends with a
//! `SENTENCECOUNT`. Sum records with the same key to get corpus totals (`tc-sum-records` does).

// argument parsing
#[macro_use] extern crate clap;
// logging
#[macro_use] extern crate log;
extern crate env_logger;
// lastly, this library
extern crate termcooc;

use std::env;
use std::fs::File;
use std::io::{self, BufReader, BufWriter, Write};
use std::iter;
use std::path::PathBuf;
use std::process;
use std::time::Instant;

use termcooc::errors::*;
use termcooc::cache::DictionarySource;
use termcooc::dictionary::{read_stopwords, BuildOptions};
use clap::Arg;
use termcooc::documents::{read_document, BlockDocuments, ListedDocuments};
use termcooc::Extractor;

pub fn main() {
    // Main can't return a Result, and the ? operator needs the enclosing function to return Result
    if let Err(err) = inner_main() {
        error!("{}", err);
        eprintln!("Could not recover: {}", err);
        eprintln!("COMMAND: {}", env::args().collect::<Vec<_>>().join(" "));
        process::exit(1);
    }
}

pub fn inner_main() -> Result<()> {
    env_logger::init();
    let args = app_from_crate!()
        .arg_from_usage("--terms [FILE] 'term list, one term per line with synonyms separated by |'")
        .arg_from_usage("--cache [FILE] 'dictionary cache saved by an earlier run (used instead of --terms)'")
        .arg_from_usage("--cache-out [FILE] 'save the compiled dictionary here for faster loading later'")
        .arg_from_usage("--stopwords [FILE] 'words, one per line; any synonym containing one is dropped'")
        .arg_from_usage("--remove-shortwords 'drop synonyms of two characters or fewer'")
        .arg_from_usage("--documents [FILE] 'documents separated by blank lines (default: stdin)'")
        .arg_from_usage("--document-list [FILE] 'file of paths, one document per path'")
        .arg_from_usage("--document [FILE] 'a single file read whole as one document'")
        .arg_from_usage("--out [FILE] 'where to write records (default: stdout)'")
        .arg(Arg::from_usage("--progress [N] 'log progress every N documents'").default_value("10000"))
        .get_matches();

    // Echo what we were asked to do
    for name in &["terms", "cache", "cache-out", "stopwords", "documents", "document-list", "document",
                  "out", "progress"] {
        if let Some(value) = args.value_of(name) {
            info!("--{} {}", name, value);
        }
    }
    if args.is_present("remove-shortwords") {
        info!("--remove-shortwords");
    }
    let sources = ["documents", "document-list", "document"].iter()
        .filter(|&&name| args.is_present(name))
        .count();
    if sources > 1 {
        return Err(Error::Configuration(
            "use only one of --documents, --document-list and --document".into()));
    }
    let progress = value_t!(args, "progress", u64).unwrap_or_else(|e| e.exit());

    let mut options = BuildOptions::default();
    options.remove_shortwords = args.is_present("remove-shortwords");
    if let Some(path) = args.value_of("stopwords") {
        options.stopwords = read_stopwords(BufReader::new(File::open(path)?))?;
        info!("Loaded {} stopwords", options.stopwords.len());
    }
    let source = DictionarySource {
        term_list: args.value_of("terms").map(PathBuf::from),
        cache: args.value_of("cache").map(PathBuf::from),
        cache_out: args.value_of("cache-out").map(PathBuf::from),
        options: options,
    };
    let dict = source.build()?;

    let stdout = io::stdout();
    let mut sink: Box<dyn Write> = match args.value_of("out") {
        Some(path) => Box::new(BufWriter::new(File::create(path)?)),
        None => Box::new(BufWriter::new(stdout.lock())),
    };

    let extractor = Extractor::new(&dict).progress_every(progress);
    let start = Instant::now();
    let summary = match (args.value_of("document-list"), args.value_of("document"), args.value_of("documents")) {
        (Some(list), _, _) => {
            let documents = ListedDocuments::new(BufReader::new(File::open(list)?))?;
            info!("{} documents listed", documents.len());
            extractor.run(documents, &mut sink)?
        }
        (None, Some(path), _) => {
            extractor.run(iter::once(read_document(path)), &mut sink)?
        }
        (None, None, Some(path)) if path != "-" => {
            extractor.run(BlockDocuments::new(BufReader::new(File::open(path)?)), &mut sink)?
        }
        _ => {
            let stdin = io::stdin();
            extractor.run(BlockDocuments::new(stdin.lock()), &mut sink)?
        }
    };

    info!("Processed {} documents, {} sentences ({} skipped, {} unreadable documents)",
        summary.documents, summary.sentences, summary.skipped_sentences, summary.failed_documents);
    info!("Processing time: {:.2}s", start.elapsed().as_secs_f64());
    if let Some(path) = args.value_of("out") {
        info!("Finished output to: {}", path);
    }
    Ok(())
}
