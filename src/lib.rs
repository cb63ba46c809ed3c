/*!
The `csvquote` crate makes CSV data safe for line and field oriented tools.

Delimiters and record separators that appear inside quoted fields confuse
tools like `cut`, `sort` or `awk`, which split on those bytes without any
knowledge of quoting. This crate replaces them with reserved nonprinting
codes so that every remaining delimiter and record separator is structural,
and restores them afterwards. Both directions preserve the length of the
data and never add or remove quotes.

The byte level state machine lives in the
[`csvquote-core`](https://docs.rs/csvquote-core) crate, which is re-exported
here. This crate adds streaming over `io::Read` and `io::Write`, validation
of caller supplied configuration, header inspection and the command line
interface.

# Example

```
use csvquote::{Mode, TranscoderBuilder};

# fn main() { example().unwrap(); }
fn example() -> csvquote::Result<()> {
    let data = "id,comment\n1,\"hello, world\"\n";

    let mut replaced = vec![];
    let mut tc = TranscoderBuilder::new().build();
    tc.transcode(data.as_bytes(), &mut replaced)?;
    assert_eq!(replaced, b"id,comment\n1,\"hello\x1d world\"\n");

    let mut restored = vec![];
    let mut tc = TranscoderBuilder::new().mode(Mode::Restore).build();
    tc.transcode(&replaced[..], &mut restored)?;
    assert_eq!(restored, data.as_bytes());
    Ok(())
}
```
*/

#![deny(missing_docs)]

pub use csvquote_core::{
    Config, ConfigBuilder, DecodeResult, Decoder, EncodeResult, Encoder,
    EncoderBuilder, State, DELIMITER_CODE, RECORD_SEPARATOR_CODE,
};

pub use crate::error::{ConfigError, ConfigErrorKind, Error, Result};
pub use crate::options::{Overrides, Setting};
pub use crate::transcoder::{Mode, Summary, Transcoder, TranscoderBuilder};

pub mod cli;
mod error;
pub mod header;
mod options;
mod transcoder;
