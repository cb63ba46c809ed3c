use core::cmp;

use memchr::memchr2;

use crate::config::Config;

/// The result of decoding a buffer of data.
#[derive(Clone, Copy, Debug, Eq, PartialEq)]
pub enum DecodeResult {
    /// All of the caller provided input was consumed.
    InputEmpty,
    /// The caller provided output buffer filled up before all of the input
    /// could be consumed.
    OutputFull,
}

/// A decoder for the "restore" direction.
///
/// Every delimiter code becomes the delimiter and every record separator code
/// becomes the record separator. All other bytes are copied as is. Unlike the
/// [`Encoder`](struct.Encoder.html), a decoder does not track quoting and
/// carries no state between calls: it relies on the codes never appearing in
/// the original data.
#[derive(Clone, Copy, Debug, Default)]
pub struct Decoder {
    config: Config,
}

impl Decoder {
    /// Create a new decoder for the given configuration.
    ///
    /// This should be the same configuration that was used to encode the
    /// data.
    pub fn new(config: Config) -> Decoder {
        Decoder { config }
    }

    /// The configuration this decoder was built with.
    pub fn config(&self) -> &Config {
        &self.config
    }

    /// Decode the data in `input` and write it to `output`.
    ///
    /// This returns the result along with the number of bytes read from
    /// `input` and written to `output`, which are always equal.
    pub fn decode(
        &self,
        input: &[u8],
        output: &mut [u8],
    ) -> (DecodeResult, usize, usize) {
        let n = cmp::min(input.len(), output.len());
        output[..n].copy_from_slice(&input[..n]);
        self.decode_in_place(&mut output[..n]);
        let res = if n < input.len() {
            DecodeResult::OutputFull
        } else {
            DecodeResult::InputEmpty
        };
        (res, n, n)
    }

    /// Decode the data in `buf`, overwriting it with the result.
    pub fn decode_in_place(&self, buf: &mut [u8]) {
        let dcode = self.config.delimiter_code();
        let tcode = self.config.record_separator_code();
        let mut i = 0;
        while let Some(offset) = memchr2(dcode, tcode, &buf[i..]) {
            i += offset;
            buf[i] = self.decode_byte(buf[i]);
            i += 1;
        }
    }

    #[inline(always)]
    fn decode_byte(&self, b: u8) -> u8 {
        if b == self.config.delimiter_code() {
            self.config.delimiter()
        } else if b == self.config.record_separator_code() {
            self.config.record_separator()
        } else {
            b
        }
    }
}

#[cfg(test)]
mod tests {
    use proptest::prelude::*;

    use crate::config::{Config, ConfigBuilder};
    use crate::encoder::Encoder;

    use super::{DecodeResult, Decoder};

    fn decode(config: Config, data: &[u8]) -> Vec<u8> {
        let mut buf = data.to_vec();
        Decoder::new(config).decode_in_place(&mut buf);
        buf
    }

    fn encode(config: Config, data: &[u8]) -> Vec<u8> {
        let mut buf = data.to_vec();
        Encoder::new(config).encode_in_place(&mut buf);
        buf
    }

    macro_rules! decodes_to {
        ($name:ident, $data:expr, $expected:expr) => {
            decodes_to!($name, $data, $expected, |builder| builder);
        };
        ($name:ident, $data:expr, $expected:expr, $config:expr) => {
            #[test]
            fn $name() {
                let mut builder = ConfigBuilder::new();
                $config(&mut builder);
                let got = decode(builder.build(), $data);
                let expected: &[u8] = $expected;
                assert_eq!(expected, &*got);
            }
        };
    }

    decodes_to!(empty, b"", b"");
    decodes_to!(nothing_to_do, b"a,\"b\"\n", b"a,\"b\"\n");
    decodes_to!(delimiter_code, b"\"a\x1db\"", b"\"a,b\"");
    decodes_to!(record_sep_code, b"\"a\x1cb\"\n", b"\"a\nb\"\n");
    // Codes are restored regardless of quoting.
    decodes_to!(codes_outside_quotes, b"\x1d\x1c", b",\n");
    decodes_to!(only_codes, b"\x1d\x1d\x1c\x1c", b",,\n\n");
    decodes_to!(
        custom,
        b"'a\x1db\x1cc'|d",
        b"'a|b\rc'|d",
        |b: &mut ConfigBuilder| {
            b.quote(b'\'').delimiter(b'|').record_separator(b'\r');
        }
    );

    #[test]
    fn scenario_round_trip() {
        let config = Config::default();
        let original: &[u8] =
            b"field1,\"field2, has a comma\",\"f3 \"\"quoted\"\" here\"\n";
        let encoded = encode(config, original);
        assert_ne!(original, &*encoded);
        assert_eq!(original, &*decode(config, &encoded));
    }

    #[test]
    fn decode_small_output() {
        let dec = Decoder::new(Config::default());
        let mut out = [0u8; 2];

        let (res, nin, nout) = dec.decode(b"a\x1db", &mut out);
        assert_eq!((DecodeResult::OutputFull, 2, 2), (res, nin, nout));
        assert_eq!(&out, b"a,");

        let (res, nin, nout) = dec.decode(b"b", &mut out);
        assert_eq!((DecodeResult::InputEmpty, 1, 1), (res, nin, nout));
        assert_eq!(&out[..1], b"b");
    }

    fn no_codes() -> impl Strategy<Value = Vec<u8>> {
        prop::collection::vec(
            prop_oneof![
                Just(b'"'),
                Just(b','),
                Just(b'\n'),
                b'a'..=b'c',
                any::<u8>().prop_filter("reserved code", |b| {
                    *b != 0x1C && *b != 0x1D
                }),
            ],
            0..200,
        )
    }

    proptest! {
        #[test]
        fn round_trip(data in no_codes()) {
            let config = Config::default();
            prop_assert_eq!(&data, &decode(config, &encode(config, &data)));
        }

        #[test]
        fn decode_is_idempotent(data in no_codes()) {
            let config = Config::default();
            let once = decode(config, &data);
            prop_assert_eq!(&once, &data);
            prop_assert_eq!(decode(config, &once), once);
        }
    }
}
