use std::fmt;
use std::result;

use bstr::ByteVec;
use csvquote_core::{Config, ConfigBuilder};

use crate::error::{ConfigError, ConfigErrorKind, Result};

/// One of the bytes that make up a [`Config`](struct.Config.html).
///
/// This is used to name the offending setting in configuration errors.
#[derive(Clone, Copy, Debug, Eq, PartialEq)]
pub enum Setting {
    /// The quote character.
    Quote,
    /// The field delimiter.
    Delimiter,
    /// The record separator.
    RecordSeparator,
    /// The reserved code for quoted delimiters.
    DelimiterCode,
    /// The reserved code for quoted record separators.
    RecordSeparatorCode,
}

impl fmt::Display for Setting {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        let name = match *self {
            Setting::Quote => "quote character",
            Setting::Delimiter => "field delimiter",
            Setting::RecordSeparator => "record separator",
            Setting::DelimiterCode => "reserved delimiter code",
            Setting::RecordSeparatorCode => "reserved record separator code",
        };
        f.write_str(name)
    }
}

/// Caller supplied overrides of the default configuration, as strings.
///
/// Each override must resolve to exactly one byte. The escapes `\t`, `\n`,
/// `\r`, `\0`, `\\` and `\xNN` are recognized, so that separators which are
/// awkward to type in a shell can still be given. When `tab` is set, it takes
/// precedence over `delimiter`.
#[derive(Clone, Debug, Default)]
pub struct Overrides {
    /// The quote character. The default is `"`.
    pub quote: Option<String>,
    /// The field delimiter. The default is `,`.
    pub delimiter: Option<String>,
    /// Use a tab as the field delimiter.
    pub tab: bool,
    /// The record separator. The default is a newline.
    pub record_separator: Option<String>,
}

impl Overrides {
    /// Validate these overrides and build a configuration from them.
    ///
    /// This fails if any override is not exactly one byte, or if two of the
    /// resulting bytes (including the reserved codes) are the same.
    pub fn config(&self) -> Result<Config> {
        let mut builder = ConfigBuilder::new();
        if let Some(ref quote) = self.quote {
            builder.quote(parse_byte(Setting::Quote, quote)?);
        }
        if self.tab {
            builder.tab();
        } else if let Some(ref delimiter) = self.delimiter {
            builder.delimiter(parse_byte(Setting::Delimiter, delimiter)?);
        }
        if let Some(ref sep) = self.record_separator {
            let sep = parse_byte(Setting::RecordSeparator, sep)?;
            builder.record_separator(sep);
        }
        let config = builder.build();
        check_distinct(&config)?;
        Ok(config)
    }
}

fn parse_byte(
    setting: Setting,
    value: &str,
) -> result::Result<u8, ConfigError> {
    let bytes = Vec::unescape_bytes(value);
    if bytes.len() != 1 {
        return Err(ConfigError::new(ConfigErrorKind::NotOneByte {
            setting,
            value: value.to_string(),
        }));
    }
    Ok(bytes[0])
}

fn check_distinct(config: &Config) -> result::Result<(), ConfigError> {
    let roles = [
        (Setting::Quote, config.quote()),
        (Setting::Delimiter, config.delimiter()),
        (Setting::RecordSeparator, config.record_separator()),
        (Setting::DelimiterCode, config.delimiter_code()),
        (Setting::RecordSeparatorCode, config.record_separator_code()),
    ];
    for (i, &(first, a)) in roles.iter().enumerate() {
        for &(second, b) in &roles[i + 1..] {
            if a == b {
                return Err(ConfigError::new(ConfigErrorKind::Conflict {
                    first,
                    second,
                    byte: a,
                }));
            }
        }
    }
    Ok(())
}
