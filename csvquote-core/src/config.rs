/// The byte substituted for a field delimiter inside a quoted field.
///
/// This is the ASCII group separator.
pub const DELIMITER_CODE: u8 = 0x1D;

/// The byte substituted for a record separator inside a quoted field.
///
/// This is the ASCII file separator.
pub const RECORD_SEPARATOR_CODE: u8 = 0x1C;

/// The bytes that give CSV data its structure, and the codes that stand in
/// for them.
///
/// A `Config` is cheap to copy and never changes once built. The same value
/// should be given to the [`Encoder`](struct.Encoder.html) and to the
/// [`Decoder`](struct.Decoder.html) that later undoes its work, otherwise the
/// round trip is not lossless.
///
/// All five bytes are expected to be distinct. This is not checked here.
/// Using the same byte for two roles produces output that is well defined
/// byte by byte but generally not reversible.
#[derive(Clone, Copy, Debug, Eq, PartialEq)]
pub struct Config {
    quote: u8,
    delimiter: u8,
    record_sep: u8,
    delimiter_code: u8,
    record_sep_code: u8,
}

impl Default for Config {
    fn default() -> Config {
        Config {
            quote: b'"',
            delimiter: b',',
            record_sep: b'\n',
            delimiter_code: DELIMITER_CODE,
            record_sep_code: RECORD_SEPARATOR_CODE,
        }
    }
}

impl Config {
    /// The quote byte. The default is `b'"'`.
    pub fn quote(&self) -> u8 {
        self.quote
    }

    /// The field delimiter. The default is `b','`.
    pub fn delimiter(&self) -> u8 {
        self.delimiter
    }

    /// The record separator. The default is `b'\n'`.
    pub fn record_separator(&self) -> u8 {
        self.record_sep
    }

    /// The code written in place of a quoted delimiter.
    pub fn delimiter_code(&self) -> u8 {
        self.delimiter_code
    }

    /// The code written in place of a quoted record separator.
    pub fn record_separator_code(&self) -> u8 {
        self.record_sep_code
    }

    /// Returns true if `b` is one of the two reserved codes.
    pub fn is_code(&self, b: u8) -> bool {
        b == self.delimiter_code || b == self.record_sep_code
    }
}

/// Builds a [`Config`](struct.Config.html).
///
/// Building never fails. The reserved codes are fixed and cannot be changed.
#[derive(Debug, Default)]
pub struct ConfigBuilder {
    config: Config,
}

impl ConfigBuilder {
    /// Create a new builder with the default configuration.
    pub fn new() -> ConfigBuilder {
        ConfigBuilder::default()
    }

    /// Build a `Config` from the current settings.
    pub fn build(&self) -> Config {
        self.config
    }

    /// The quote byte that opens and closes a quoted field.
    ///
    /// The default is `b'"'`.
    pub fn quote(&mut self, quote: u8) -> &mut ConfigBuilder {
        self.config.quote = quote;
        self
    }

    /// The field delimiter.
    ///
    /// The default is `b','`.
    pub fn delimiter(&mut self, delimiter: u8) -> &mut ConfigBuilder {
        self.config.delimiter = delimiter;
        self
    }

    /// The record separator.
    ///
    /// Only a single byte is supported. In particular, CRLF data should use
    /// `b'\n'` (the default): a quoted `\r` is then passed through as is,
    /// which is what line oriented tools expect.
    pub fn record_separator(&mut self, record_sep: u8) -> &mut ConfigBuilder {
        self.config.record_sep = record_sep;
        self
    }

    /// A convenience method for tab separated data.
    ///
    /// This sets the delimiter to `b'\t'`.
    pub fn tab(&mut self) -> &mut ConfigBuilder {
        self.delimiter(b'\t')
    }
}
