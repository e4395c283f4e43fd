//! Read and write compiled dictionaries as a small versioned binary file
//!
//! Layout, all integers little-endian:
//!
//! ```text
//! b"TCDICT"  u16 version  u32 term count
//! per term:     u32 id  u32 synonym count
//! per synonym:  u32 token count
//! per token:    u32 byte length  UTF-8 bytes
//! ```
//!
//! Loading is strict. Anything that doesn't look exactly like this is refused rather than
//! guessed at, because a half-read dictionary gives quietly wrong counts.
use std::fs::File;
use std::io::{self, BufReader, BufWriter, Read, Write};
use std::path::{Path, PathBuf};
use byteorder::{LittleEndian, ReadBytesExt, WriteBytesExt};
use dictionary::{BuildOptions, Dictionary, Term, TermId};
use errors::*;

const MAGIC: &'static [u8; 6] = b"TCDICT";
pub const FORMAT_VERSION: u16 = 1;

/// Write the dictionary's terms and synonyms
pub fn write_dictionary<W: Write>(mut writer: W, dict: &Dictionary) -> Result<()> {
    writer.write_all(MAGIC)?;
    writer.write_u16::<LittleEndian>(FORMAT_VERSION)?;
    writer.write_u32::<LittleEndian>(dict.terms().len() as u32)?;
    for term in dict.terms() {
        writer.write_u32::<LittleEndian>(term.id)?;
        writer.write_u32::<LittleEndian>(term.synonyms.len() as u32)?;
        for syn in term.synonyms.iter() {
            writer.write_u32::<LittleEndian>(syn.len() as u32)?;
            for token in syn.iter() {
                writer.write_u32::<LittleEndian>(token.len() as u32)?;
                writer.write_all(token.as_bytes())?;
            }
        }
    }
    writer.flush()?;
    Ok(())
}

/// Read a dictionary written by `write_dictionary`
///
/// The filters in `options` are applied again, which changes nothing for a cache that was
/// written with the same filters.
pub fn read_dictionary<R: Read>(mut reader: R, options: &BuildOptions) -> Result<Dictionary> {
    let mut magic = [0u8; 6];
    reader.read_exact(&mut magic).map_err(truncated)?;
    if &magic != MAGIC {
        return Err(Error::CorruptCache(format!(
            "expected the file to start with {:?} but found {:?}",
            String::from_utf8_lossy(MAGIC), String::from_utf8_lossy(&magic))));
    }
    let version = reader.read_u16::<LittleEndian>().map_err(truncated)?;
    if version != FORMAT_VERSION {
        return Err(Error::IncompatibleCache { found: version, expected: FORMAT_VERSION });
    }

    let term_count = reader.read_u32::<LittleEndian>().map_err(truncated)?;
    let mut terms = Vec::with_capacity(term_count.min(1 << 20) as usize);
    let mut last_id: TermId = 0;
    for _ in 0..term_count {
        let id = reader.read_u32::<LittleEndian>().map_err(truncated)?;
        if id <= last_id {
            return Err(Error::CorruptCache(
                format!("term id {} follows {}; ids must start at 1 and increase", id, last_id)));
        }
        last_id = id;
        let synonym_count = reader.read_u32::<LittleEndian>().map_err(truncated)?;
        if synonym_count == 0 {
            return Err(Error::CorruptCache(format!("term {} has no synonyms", id)));
        }
        let mut synonyms = vec![];
        for _ in 0..synonym_count {
            synonyms.push(read_synonym(&mut reader, id)?);
        }
        terms.push(Term { id: id, synonyms: synonyms });
    }

    // Trailing bytes mean we're reading something else
    let mut rest = [0u8; 1];
    if reader.read(&mut rest)? != 0 {
        return Err(Error::CorruptCache("unexpected bytes after the last term".into()));
    }
    Dictionary::from_terms(terms, options)
}

fn read_synonym<R: Read>(reader: &mut R, id: TermId) -> Result<Vec<String>> {
    let token_count = reader.read_u32::<LittleEndian>().map_err(truncated)?;
    if token_count == 0 {
        return Err(Error::CorruptCache(format!("term {} has an empty synonym", id)));
    }
    // No capacity up front: a garbage count or length runs out of file, not out of memory
    let mut synonym = vec![];
    for _ in 0..token_count {
        let length = reader.read_u32::<LittleEndian>().map_err(truncated)?;
        if length == 0 {
            return Err(Error::CorruptCache(format!("term {} has an empty token", id)));
        }
        let mut bytes = vec![];
        reader.by_ref().take(length as u64).read_to_end(&mut bytes)?;
        if bytes.len() != length as usize {
            return Err(truncated(io::ErrorKind::UnexpectedEof.into()));
        }
        synonym.push(String::from_utf8(bytes)?);
    }
    Ok(synonym)
}

fn truncated(err: io::Error) -> Error {
    if err.kind() == io::ErrorKind::UnexpectedEof {
        Error::CorruptCache("the file ends in the middle of the dictionary".into())
    } else {
        Error::IOError(err)
    }
}

/// Save a dictionary cache to a file
pub fn save<P: AsRef<Path>>(path: P, dict: &Dictionary) -> Result<()> {
    let file = File::create(path.as_ref())?;
    write_dictionary(BufWriter::new(file), dict)?;
    info!("Saved {} terms to {}", dict.len(), path.as_ref().display());
    Ok(())
}

/// Load a dictionary cache from a file
pub fn load<P: AsRef<Path>>(path: P, options: &BuildOptions) -> Result<Dictionary> {
    let file = File::open(path.as_ref())?;
    read_dictionary(BufReader::new(file), options)
}

/// Where a dictionary comes from, and where (if anywhere) to save it
#[derive(Debug, Clone, Default)]
pub struct DictionarySource {
    pub term_list: Option<PathBuf>,
    pub cache: Option<PathBuf>,
    pub cache_out: Option<PathBuf>,
    pub options: BuildOptions,
}

impl DictionarySource {
    /// Load the cache if there is one, otherwise parse the term list
    pub fn build(&self) -> Result<Dictionary> {
        let dict = match (self.cache.as_ref(), self.term_list.as_ref()) {
            (Some(cache), term_list) => {
                if term_list.is_some() {
                    info!("Both a cache and a term list were given; using the cache");
                }
                info!("Loading dictionary cache {}", cache.display());
                load(cache, &self.options)?
            }
            (None, Some(term_list)) => {
                info!("Building dictionary from {}", term_list.display());
                let file = File::open(term_list)?;
                Dictionary::from_term_list(BufReader::new(file), &self.options)?
            }
            (None, None) => return Err(Error::Configuration(
                "a term list or a dictionary cache is required".into())),
        };
        info!("Dictionary has {} terms, {} keys, longest synonym {} tokens",
            dict.len(), dict.key_count(), dict.max_synonym_len());
        if let Some(ref out) = self.cache_out {
            save(out, &dict)?;
        }
        Ok(dict)
    }
}
