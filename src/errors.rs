//
// Errors
//
use std::io;
use std::result;
use std::error;
use std::string;
use std::fmt;
use std::path::PathBuf;

/// Type alias for termcooc errors
pub type Result<X> = result::Result<X, Error>;

/// Everything that can go wrong while building a dictionary or extracting cooccurrences
#[derive(Debug)]
pub enum Error {
    Configuration(String),
    MalformedInput(String),
    IncompatibleCache { found: u16, expected: u16 },
    CorruptCache(String),
    IOError(io::Error),
    MissingDocument(PathBuf, io::Error),
    Utf8Error(string::FromUtf8Error),
}

impl Error {
    /// Whether this error only spoils one sentence or document (and the run can go on)
    pub fn is_recoverable(&self) -> bool {
        match *self {
            Error::MalformedInput(_) | Error::MissingDocument(_, _) => true,
            _ => false,
        }
    }
}

impl fmt::Display for Error {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        match *self {
            Error::Configuration(ref info) => write!(f, "Configuration error: {}", info),
            Error::MalformedInput(ref info) => write!(f, "Malformed input: {}", info),
            Error::IncompatibleCache { found, expected } => write!(f,
                "The dictionary cache has format version {} but this build reads version {}. \
                Rebuild the cache from the term list.",
                found, expected),
            Error::CorruptCache(ref info) => write!(f, "Corrupt dictionary cache: {}", info),
            Error::IOError(ref err) => write!(f, "IO error: {}", err),
            Error::MissingDocument(ref path, ref err) => write!(f,
                "The document {} is listed but couldn't be read. Wrong directory? \
                The OS error was: {}",
                path.display(), err),
            Error::Utf8Error(ref err) => write!(f, "Invalid UTF-8: {}", err),
        }
    }
}

impl error::Error for Error {
    fn source(&self) -> Option<&(dyn error::Error + 'static)> {
        match *self {
            Error::IOError(ref err) => Some(err),
            Error::MissingDocument(_, ref err) => Some(err),
            Error::Utf8Error(ref err) => Some(err),
            _ => None,
        }
    }
}

//
// Convert everything else into Error
//
impl From<io::Error> for Error {
    fn from(err: io::Error) -> Self {
        Error::IOError(err)
    }
}
impl From<string::FromUtf8Error> for Error {
    fn from(err: string::FromUtf8Error) -> Self {
        Error::Utf8Error(err)
    }
}

//
// Convert Error into a general io Error
//
impl From<Error> for io::Error {
    fn from(err: Error) -> Self {
        match err {
            Error::IOError(err) => err,
            other => io::Error::new(io::ErrorKind::Other, other),
        }
    }
}
