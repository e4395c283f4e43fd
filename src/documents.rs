//! Document sources
//!
//! Every source hands out one document at a time, in input order, and never hold more than the
//! current document in memory.
use std::fs::File;
use std::io::{self, BufRead, BufReader, Read};
use std::mem;
use std::path::{Path, PathBuf};
use errors::*;

/// Documents separated by one or more blank lines, as in a dump of abstracts
pub struct BlockDocuments<R> {
    lines: io::Lines<R>,
    done: bool,
}

impl<R: BufRead> BlockDocuments<R> {
    pub fn new(reader: R) -> Self {
        BlockDocuments { lines: reader.lines(), done: false }
    }
}

impl<R: BufRead> Iterator for BlockDocuments<R> {
    type Item = Result<String>;

    fn next(&mut self) -> Option<Self::Item> {
        if self.done { return None; }
        let mut document = String::new();
        loop {
            match self.lines.next() {
                None => {
                    self.done = true;
                    return if document.is_empty() { None } else { Some(Ok(document)) };
                }
                Some(Err(err)) => {
                    self.done = true;
                    return Some(Err(err.into()));
                }
                Some(Ok(line)) => {
                    if line.trim().is_empty() {
                        if !document.is_empty() {
                            return Some(Ok(mem::replace(&mut document, String::new())));
                        }
                        // else keep skipping blank lines
                    } else {
                        if !document.is_empty() { document.push('\n'); }
                        document.push_str(&line);
                    }
                }
            }
        }
    }
}

/// One document per file, the files named one per line in a list
pub struct ListedDocuments {
    paths: Vec<PathBuf>,
    next: usize,
}

impl ListedDocuments {
    pub fn new<R: BufRead>(list: R) -> Result<Self> {
        let mut paths = vec![];
        for line in list.lines() {
            let line = line?;
            let path = line.trim();
            if !path.is_empty() {
                paths.push(PathBuf::from(path));
            }
        }
        Ok(ListedDocuments { paths: paths, next: 0 })
    }

    pub fn len(&self) -> usize {
        self.paths.len()
    }
}

impl Iterator for ListedDocuments {
    type Item = Result<String>;

    fn next(&mut self) -> Option<Self::Item> {
        let path = self.paths.get(self.next)?.clone();
        self.next += 1;
        debug!("Reading {}", path.display());
        Some(read_lossy(&path).map_err(|err| Error::MissingDocument(path, err)))
    }
}

/// Read a single file as one document, blank lines and all
pub fn read_document<P: AsRef<Path>>(path: P) -> Result<String> {
    info!("Reading {} as one document", path.as_ref().display());
    Ok(read_lossy(path.as_ref())?)
}

/// Read a whole file, replacing undecodable bytes instead of failing
fn read_lossy(path: &Path) -> io::Result<String> {
    let mut bytes = vec![];
    BufReader::new(File::open(path)?).read_to_end(&mut bytes)?;
    Ok(String::from_utf8_lossy(&bytes).into_owned())
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::fs;
    use std::io::Cursor;

    #[test]
    fn a_whole_file_is_one_document() {
        let dir = ::tempfile::tempdir().unwrap();
        let path = dir.path().join("article.txt");
        fs::write(&path, "Flu season.\n\nFever follows.\n\nRest.\n").unwrap();
        assert_eq!(read_document(&path).unwrap(), "Flu season.\n\nFever follows.\n\nRest.\n");
        match read_document(dir.path().join("missing.txt")) {
            Err(Error::IOError(_)) => {},
            other => panic!("expected an IO error, got {:?}", other),
        }
    }

    #[test]
    fn blocks_split_on_blank_lines() {
        let docs: Vec<String> = BlockDocuments::new(Cursor::new(
            "\n\nfirst line\nsecond line\n\n\n  \nthird\n"))
            .map(|d| d.unwrap())
            .collect();
        assert_eq!(docs, vec!["first line\nsecond line", "third"]);
    }

    #[test]
    fn no_text_no_documents() {
        assert_eq!(BlockDocuments::new(Cursor::new("")).count(), 0);
        assert_eq!(BlockDocuments::new(Cursor::new("\n \n")).count(), 0);
    }

    #[test]
    fn listed_files_in_order() {
        let dir = ::tempfile::tempdir().unwrap();
        let a = dir.path().join("a.txt");
        let b = dir.path().join("b.txt");
        fs::write(&a, "Alpha.").unwrap();
        fs::write(&b, b"Be\xfft\xe4.").unwrap();
        let missing = dir.path().join("missing.txt");
        let list = format!("{}\n\n{}\n{}\n", b.display(), a.display(), missing.display());

        let docs = ListedDocuments::new(Cursor::new(list)).unwrap();
        assert_eq!(docs.len(), 3);
        let docs: Vec<Result<String>> = docs.collect();
        assert_eq!(docs[0].as_ref().unwrap(), "Be\u{FFFD}t\u{FFFD}.");
        assert_eq!(docs[1].as_ref().unwrap(), "Alpha.");
        match docs[2] {
            Err(Error::MissingDocument(ref path, _)) => assert_eq!(path, &missing),
            ref other => panic!("expected a read failure, got {:?}", other),
        }
    }
}
