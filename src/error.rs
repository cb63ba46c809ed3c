use std::error;
use std::fmt;
use std::io;
use std::path::PathBuf;
use std::result;

use bstr::ByteSlice;

use crate::options::Setting;

/// A type alias for `Result<T, csvquote::Error>`.
pub type Result<T> = result::Result<T, Error>;

/// An error that can occur while transcoding.
///
/// The transcoding itself can never fail: every byte sequence has an
/// encoding. Errors come from the configuration given by the caller or from
/// the underlying readers and writers.
#[derive(Debug)]
pub enum Error {
    /// An I/O error that occurred while reading input or writing output.
    Io(io::Error),
    /// An input file could not be opened.
    Open {
        /// The path that was given.
        path: PathBuf,
        /// The error returned when opening it.
        err: io::Error,
    },
    /// The quote, delimiter or record separator given is not usable.
    Config(ConfigError),
}

impl Error {
    /// Returns true if this error was caused by the reading end of the
    /// output going away, e.g., when piping into `head`.
    ///
    /// A pipeline stage should exit quietly in this case.
    pub fn is_broken_pipe(&self) -> bool {
        match *self {
            Error::Io(ref err) => err.kind() == io::ErrorKind::BrokenPipe,
            _ => false,
        }
    }
}

impl From<io::Error> for Error {
    fn from(err: io::Error) -> Error {
        Error::Io(err)
    }
}

impl From<ConfigError> for Error {
    fn from(err: ConfigError) -> Error {
        Error::Config(err)
    }
}

impl error::Error for Error {
    fn source(&self) -> Option<&(dyn error::Error + 'static)> {
        match *self {
            Error::Io(ref err) => Some(err),
            Error::Open { ref err, .. } => Some(err),
            Error::Config(ref err) => Some(err),
        }
    }
}

impl fmt::Display for Error {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        match *self {
            Error::Io(ref err) => err.fmt(f),
            Error::Open { ref path, ref err } => {
                write!(f, "failed to open {}: {}", path.display(), err)
            }
            Error::Config(ref err) => err.fmt(f),
        }
    }
}

/// An error in the configuration given on the command line.
///
/// These are always reported before any input is read.
#[derive(Clone, Debug, Eq, PartialEq)]
pub struct ConfigError {
    kind: ConfigErrorKind,
}

/// The specific kind of configuration error.
#[derive(Clone, Debug, Eq, PartialEq)]
pub enum ConfigErrorKind {
    /// The value given for a setting is not exactly one byte.
    NotOneByte {
        /// The setting the value was given for.
        setting: Setting,
        /// The value as given.
        value: String,
    },
    /// Two settings share the same byte.
    Conflict {
        /// The first setting.
        first: Setting,
        /// The second setting.
        second: Setting,
        /// The byte both settings resolve to.
        byte: u8,
    },
}

impl ConfigError {
    pub(crate) fn new(kind: ConfigErrorKind) -> ConfigError {
        ConfigError { kind }
    }

    /// Return the specific kind of this error.
    pub fn kind(&self) -> &ConfigErrorKind {
        &self.kind
    }
}

impl error::Error for ConfigError {}

impl fmt::Display for ConfigError {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        match self.kind {
            ConfigErrorKind::NotOneByte { setting, ref value } => write!(
                f,
                "invalid {} {:?}: {} must be exactly one character",
                setting, value, setting
            ),
            ConfigErrorKind::Conflict { first, second, byte } => write!(
                f,
                "{} and {} must differ, but both are '{}'",
                first,
                second,
                [byte].escape_bytes()
            ),
        }
    }
}
