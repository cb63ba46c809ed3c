use std::fs;
use std::io;
use std::path::Path;

use bstr::ByteSlice;
use csvquote_core::{Config, Decoder, Encoder, EncoderBuilder};
use tracing::{debug, trace};

use crate::error::{Error, Result};

/// The default size of the buffer used to read input, 64 KiB.
const BUF_SIZE: usize = 64 * 1024;

/// The direction of transcoding.
#[derive(Clone, Copy, Debug, Eq, PartialEq)]
pub enum Mode {
    /// Replace delimiters and record separators inside quoted fields with
    /// reserved codes. This is the default.
    Replace,
    /// Replace the reserved codes with the original delimiters and record
    /// separators.
    Restore,
}

impl Default for Mode {
    fn default() -> Mode {
        Mode::Replace
    }
}

/// Builds a [`Transcoder`](struct.Transcoder.html) with various configuration
/// knobs.
#[derive(Debug)]
pub struct TranscoderBuilder {
    capacity: usize,
    mode: Mode,
    config: Config,
    line_buffered: bool,
    bytewise: bool,
}

impl Default for TranscoderBuilder {
    fn default() -> TranscoderBuilder {
        TranscoderBuilder {
            capacity: BUF_SIZE,
            mode: Mode::default(),
            config: Config::default(),
            line_buffered: false,
            bytewise: false,
        }
    }
}

impl TranscoderBuilder {
    /// Create a new builder with the default configuration.
    pub fn new() -> TranscoderBuilder {
        TranscoderBuilder::default()
    }

    /// Build a transcoder from this configuration.
    pub fn build(&self) -> Transcoder {
        Transcoder {
            buf: vec![0; self.capacity.max(1)],
            mode: self.mode,
            config: self.config,
            line_buffered: self.line_buffered,
            bytewise: self.bytewise,
        }
    }

    /// Whether to replace or restore.
    ///
    /// The default is `Mode::Replace`.
    pub fn mode(&mut self, mode: Mode) -> &mut TranscoderBuilder {
        self.mode = mode;
        self
    }

    /// The quote, delimiter and record separator bytes.
    pub fn config(&mut self, config: Config) -> &mut TranscoderBuilder {
        self.config = config;
        self
    }

    /// The number of bytes read from the input at a time.
    ///
    /// The default is 64 KiB. Output is written and flushed once per chunk.
    pub fn buffer_capacity(
        &mut self,
        capacity: usize,
    ) -> &mut TranscoderBuilder {
        self.capacity = capacity;
        self
    }

    /// Flush the output after every record separator written, instead of
    /// once per chunk.
    ///
    /// This is slower, but makes each record available downstream as soon
    /// as it has been read. It is disabled by default.
    pub fn line_buffered(&mut self, yes: bool) -> &mut TranscoderBuilder {
        self.line_buffered = yes;
        self
    }

    /// Use the bytewise reference encoder. See `EncoderBuilder::bytewise`.
    #[doc(hidden)]
    pub fn bytewise(&mut self, yes: bool) -> &mut TranscoderBuilder {
        self.bytewise = yes;
        self
    }
}

/// A summary of one transcoded input.
#[derive(Clone, Copy, Debug, Default, Eq, PartialEq)]
pub struct Summary {
    bytes: u64,
    open_quote: bool,
}

impl Summary {
    /// The number of bytes read (and written).
    pub fn bytes(&self) -> u64 {
        self.bytes
    }

    /// Whether the input ended inside a quoted field. This is always false
    /// in restore mode.
    pub fn has_open_quote(&self) -> bool {
        self.open_quote
    }
}

/// Streams data from an `io::Read` to an `io::Write`, replacing or restoring
/// quoted delimiters and record separators on the way.
///
/// Input is read in chunks, transcoded in place and written out before the
/// next chunk is read. Each call to `transcode` is an independent stream:
/// quoting state never carries over from one input to the next.
#[derive(Debug)]
pub struct Transcoder {
    buf: Vec<u8>,
    mode: Mode,
    config: Config,
    line_buffered: bool,
    bytewise: bool,
}

enum Codec {
    Encode(Encoder),
    Decode(Decoder),
}

impl Codec {
    fn apply(&mut self, buf: &mut [u8]) {
        match *self {
            Codec::Encode(ref mut enc) => enc.encode_in_place(buf),
            Codec::Decode(ref dec) => dec.decode_in_place(buf),
        }
    }

    fn has_open_quote(&self) -> bool {
        match *self {
            Codec::Encode(ref enc) => enc.has_open_quote(),
            Codec::Decode(_) => false,
        }
    }
}

impl Transcoder {
    /// Create a new transcoder with the default configuration.
    pub fn new() -> Transcoder {
        TranscoderBuilder::new().build()
    }

    /// The direction of this transcoder.
    pub fn mode(&self) -> Mode {
        self.mode
    }

    /// The configuration of this transcoder.
    pub fn config(&self) -> &Config {
        &self.config
    }

    /// Open the file at `path` and transcode its contents to `wtr`.
    ///
    /// The file is closed before this returns.
    pub fn transcode_path<P: AsRef<Path>, W: io::Write>(
        &mut self,
        path: P,
        wtr: W,
    ) -> Result<Summary> {
        let path = path.as_ref();
        let file = fs::File::open(path).map_err(|err| Error::Open {
            path: path.to_path_buf(),
            err,
        })?;
        debug!(path = %path.display(), "opened input");
        self.transcode(file, wtr)
    }

    /// Transcode everything in `rdr` to `wtr`.
    ///
    /// An input that ends inside a quoted field is not an error, but it is
    /// reported in the returned summary.
    pub fn transcode<R: io::Read, W: io::Write>(
        &mut self,
        mut rdr: R,
        mut wtr: W,
    ) -> Result<Summary> {
        let mut codec = match self.mode {
            Mode::Replace => Codec::Encode(
                EncoderBuilder::new()
                    .config(self.config)
                    .bytewise(self.bytewise)
                    .build(),
            ),
            Mode::Restore => Codec::Decode(Decoder::new(self.config)),
        };
        let flush_at = if self.line_buffered {
            Some(self.config.record_separator())
        } else {
            None
        };
        let mut summary = Summary::default();
        loop {
            let n = match rdr.read(&mut self.buf) {
                Ok(0) => break,
                Ok(n) => n,
                Err(ref err) if err.kind() == io::ErrorKind::Interrupted => {
                    continue
                }
                Err(err) => return Err(Error::Io(err)),
            };
            let chunk = &mut self.buf[..n];
            codec.apply(chunk);
            trace!(bytes = n, "transcoded chunk");
            write_chunk(&mut wtr, chunk, flush_at)?;
            summary.bytes += n as u64;
        }
        wtr.flush()?;
        summary.open_quote = codec.has_open_quote();
        debug!(
            bytes = summary.bytes,
            mode = ?self.mode,
            open_quote = summary.open_quote,
            "input finished"
        );
        Ok(summary)
    }
}

impl Default for Transcoder {
    fn default() -> Transcoder {
        Transcoder::new()
    }
}

/// Write `chunk` and flush. When `flush_at` is set, also flush after every
/// occurrence of that byte.
fn write_chunk<W: io::Write>(
    wtr: &mut W,
    mut chunk: &[u8],
    flush_at: Option<u8>,
) -> io::Result<()> {
    if let Some(term) = flush_at {
        while let Some(i) = chunk.find_byte(term) {
            wtr.write_all(&chunk[..=i])?;
            wtr.flush()?;
            chunk = &chunk[i + 1..];
        }
    }
    wtr.write_all(chunk)?;
    wtr.flush()
}

#[cfg(test)]
mod tests {
    use std::io::{self, Read, Write};

    use csvquote_core::{Config, ConfigBuilder};

    use super::{Mode, TranscoderBuilder};

    fn replace(config: Config, capacity: usize, data: &[u8]) -> Vec<u8> {
        let mut out = vec![];
        TranscoderBuilder::new()
            .config(config)
            .buffer_capacity(capacity)
            .build()
            .transcode(data, &mut out)
            .unwrap();
        out
    }

    fn restore(config: Config, capacity: usize, data: &[u8]) -> Vec<u8> {
        let mut out = vec![];
        TranscoderBuilder::new()
            .mode(Mode::Restore)
            .config(config)
            .buffer_capacity(capacity)
            .build()
            .transcode(data, &mut out)
            .unwrap();
        out
    }

    const SCENARIO: &[u8] =
        b"field1,\"field2, has a comma\",\"f3 \"\"quoted\"\" here\"\n";

    #[test]
    fn scenario() {
        let config = Config::default();
        for &cap in &[1, 2, 3, 7, 64 * 1024] {
            let encoded = replace(config, cap, SCENARIO);
            assert_eq!(
                &encoded[..],
                &b"field1,\"field2\x1d has a comma\",\
                   \"f3 \"\"quoted\"\" here\"\n"[..],
                "capacity {}",
                cap
            );
            assert_eq!(&restore(config, cap, &encoded)[..], SCENARIO);
        }
    }

    #[test]
    fn empty_input() {
        assert!(replace(Config::default(), 16, b"").is_empty());
        assert!(restore(Config::default(), 16, b"").is_empty());
    }

    #[test]
    fn summary() {
        let mut tc = TranscoderBuilder::new().build();
        let mut out = vec![];
        let summary = tc.transcode(&b"a,\"b,c"[..], &mut out).unwrap();
        assert_eq!(6, summary.bytes());
        assert!(summary.has_open_quote());

        // A new input starts outside of any quoted field.
        out.clear();
        let summary = tc.transcode(&b"x,y"[..], &mut out).unwrap();
        assert_eq!(&out[..], &b"x,y"[..]);
        assert!(!summary.has_open_quote());
    }

    #[test]
    fn custom_config() {
        let config = ConfigBuilder::new()
            .quote(b'\'')
            .delimiter(b'|')
            .record_separator(b'\r')
            .build();
        let data = b"'a|b\rc'|d\r";
        let encoded = replace(config, 4, data);
        assert_eq!(&encoded[..], &b"'a\x1db\x1cc'|d\r"[..]);
        assert_eq!(&restore(config, 4, &encoded)[..], &data[..]);
    }

    #[test]
    fn bytewise_agrees() {
        let data = b"a,\"b\n\"\"c,\",d\n\"e";
        let mut fast = vec![];
        TranscoderBuilder::new()
            .build()
            .transcode(&data[..], &mut fast)
            .unwrap();
        let mut slow = vec![];
        TranscoderBuilder::new()
            .bytewise(true)
            .build()
            .transcode(&data[..], &mut slow)
            .unwrap();
        assert_eq!(fast, slow);
    }

    /// A reader that fails with `Interrupted` before every successful read.
    struct Interrupting<'a> {
        data: &'a [u8],
        interrupt: bool,
    }

    impl<'a> Read for Interrupting<'a> {
        fn read(&mut self, buf: &mut [u8]) -> io::Result<usize> {
            self.interrupt = !self.interrupt;
            if self.interrupt {
                return Err(io::Error::from(io::ErrorKind::Interrupted));
            }
            self.data.read(buf)
        }
    }

    #[test]
    fn interrupted_reads_are_retried() {
        let rdr = Interrupting { data: b"\"a,b\"", interrupt: false };
        let mut out = vec![];
        TranscoderBuilder::new()
            .buffer_capacity(2)
            .build()
            .transcode(rdr, &mut out)
            .unwrap();
        assert_eq!(&out[..], &b"\"a\x1db\""[..]);
    }

    /// A writer that records where flushes happen.
    #[derive(Default)]
    struct Flushes {
        written: Vec<u8>,
        flushed_at: Vec<usize>,
    }

    impl Write for Flushes {
        fn write(&mut self, buf: &[u8]) -> io::Result<usize> {
            self.written.extend_from_slice(buf);
            Ok(buf.len())
        }

        fn flush(&mut self) -> io::Result<()> {
            self.flushed_at.push(self.written.len());
            Ok(())
        }
    }

    #[test]
    fn line_buffered_flushes_per_record() {
        let mut wtr = Flushes::default();
        TranscoderBuilder::new()
            .line_buffered(true)
            .build()
            .transcode(&b"a\n\"b\nc\"\nd"[..], &mut wtr)
            .unwrap();
        assert_eq!(&wtr.written[..], &b"a\n\"b\x1cc\"\nd"[..]);
        // After each unquoted newline, after the chunk, and at the end.
        assert_eq!(wtr.flushed_at, vec![2, 8, 9, 9]);
    }

    #[test]
    fn unbuffered_flushes_per_chunk() {
        let mut wtr = Flushes::default();
        TranscoderBuilder::new()
            .buffer_capacity(4)
            .build()
            .transcode(&b"a\nb\nc\nd"[..], &mut wtr)
            .unwrap();
        assert_eq!(wtr.flushed_at, vec![4, 7, 7]);
    }

    #[test]
    fn read_error_propagates() {
        struct Failing;

        impl Read for Failing {
            fn read(&mut self, _: &mut [u8]) -> io::Result<usize> {
                Err(io::Error::new(io::ErrorKind::Other, "boom"))
            }
        }

        let mut out = vec![];
        let err = TranscoderBuilder::new()
            .build()
            .transcode(Failing, &mut out)
            .unwrap_err();
        assert_eq!("boom", err.to_string());
    }
}
