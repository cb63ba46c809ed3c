use core::cmp;

use memchr::{memchr, memchr3};

use crate::config::Config;

/// The state of an [`Encoder`](struct.Encoder.html).
///
/// A quote byte seen inside a quoted field is ambiguous: it either closes the
/// field or is the first half of a doubled quote escape (`""`). Which one is
/// only known once the next byte arrives, which is why there is a third state
/// between `Quoted` and `Unquoted`.
#[derive(Clone, Copy, Debug, Eq, PartialEq)]
pub enum State {
    /// Outside of any quoted field. This is the initial state.
    Unquoted,
    /// Inside a quoted field. Delimiters and record separators seen in this
    /// state are substituted.
    Quoted,
    /// The previous byte was a quote inside a quoted field. A second quote
    /// continues the field, anything else means the field has ended.
    QuotedMaybeEndingOrEscaping,
}

impl Default for State {
    fn default() -> State {
        State::Unquoted
    }
}

/// The result of encoding a buffer of data.
#[derive(Clone, Copy, Debug, Eq, PartialEq)]
pub enum EncodeResult {
    /// All of the caller provided input was consumed.
    InputEmpty,
    /// The caller provided output buffer filled up before all of the input
    /// could be consumed.
    OutputFull,
}

/// Builds an [`Encoder`](struct.Encoder.html) with various configuration
/// knobs.
#[derive(Debug, Default)]
pub struct EncoderBuilder {
    enc: Encoder,
}

impl EncoderBuilder {
    /// Create a new builder.
    pub fn new() -> EncoderBuilder {
        EncoderBuilder::default()
    }

    /// Build an encoder from this configuration.
    pub fn build(&self) -> Encoder {
        let mut enc = self.enc.clone();
        enc.reset();
        enc
    }

    /// The quote, delimiter and record separator bytes to use.
    pub fn config(&mut self, config: Config) -> &mut EncoderBuilder {
        self.enc.config = config;
        self
    }

    /// Apply the transition function to every single byte instead of
    /// skipping over runs that cannot change the output.
    ///
    /// This exists for testing the fast path against the state machine it
    /// implements. It is always slower.
    #[doc(hidden)]
    pub fn bytewise(&mut self, yes: bool) -> &mut EncoderBuilder {
        self.enc.bytewise = yes;
        self
    }
}

/// A push based encoder for the "replace" direction.
///
/// An encoder copies its input to its output unchanged except for delimiter
/// and record separator bytes that occur inside a quoted field, which are
/// replaced by the configured codes. Quote bytes are never changed. Since
/// every substitution is one byte for one byte, the output is always exactly
/// as long as the input.
///
/// The encoder remembers whether it is inside a quoted field between calls,
/// so a stream may be split into chunks at arbitrary positions (including
/// between the two quotes of a `""` escape). Use a fresh encoder, or call
/// `reset`, for each independent stream.
///
/// An input that ends inside a quoted field is not an error. The quoted field
/// simply never closes; see `has_open_quote`.
#[derive(Clone, Debug, Default)]
pub struct Encoder {
    config: Config,
    state: State,
    bytewise: bool,
}

impl Encoder {
    /// Create a new encoder for the given configuration.
    pub fn new(config: Config) -> Encoder {
        EncoderBuilder::new().config(config).build()
    }

    /// The configuration this encoder was built with.
    pub fn config(&self) -> &Config {
        &self.config
    }

    /// The current state.
    pub fn state(&self) -> State {
        self.state
    }

    /// Returns true if ending the input now would leave a quoted field
    /// without its closing quote.
    ///
    /// This is only the case in `State::Quoted`. In
    /// `State::QuotedMaybeEndingOrEscaping` the last byte seen was a quote,
    /// and at the end of the input that quote closes the field.
    pub fn has_open_quote(&self) -> bool {
        self.state == State::Quoted
    }

    /// Reset the encoder such that it behaves as if it had never been used.
    pub fn reset(&mut self) {
        self.state = State::Unquoted;
    }

    /// Encode the data in `input` and write it to `output`.
    ///
    /// This returns the result along with the number of bytes read from
    /// `input` and written to `output`. The two counts are always equal.
    /// `EncodeResult::OutputFull` is returned when `output` is shorter than
    /// `input`, in which case the caller should call `encode` again with the
    /// remaining input.
    pub fn encode(
        &mut self,
        input: &[u8],
        output: &mut [u8],
    ) -> (EncodeResult, usize, usize) {
        let n = cmp::min(input.len(), output.len());
        output[..n].copy_from_slice(&input[..n]);
        self.encode_in_place(&mut output[..n]);
        let res = if n < input.len() {
            EncodeResult::OutputFull
        } else {
            EncodeResult::InputEmpty
        };
        (res, n, n)
    }

    /// Encode the data in `buf`, overwriting it with the result.
    pub fn encode_in_place(&mut self, buf: &mut [u8]) {
        if self.bytewise {
            self.encode_bytewise(buf)
        } else {
            self.encode_fast(buf)
        }
    }

    #[inline(always)]
    fn encode_fast(&mut self, buf: &mut [u8]) {
        let (quote, delim, term) = (
            self.config.quote(),
            self.config.delimiter(),
            self.config.record_separator(),
        );
        let mut state = self.state;
        let mut i = 0;
        while i < buf.len() {
            match state {
                // Nothing is substituted here, so only a quote matters.
                State::Unquoted => match memchr(quote, &buf[i..]) {
                    None => break,
                    Some(offset) => {
                        i += offset + 1;
                        state = State::Quoted;
                    }
                },
                State::Quoted => {
                    match memchr3(quote, delim, term, &buf[i..]) {
                        None => break,
                        Some(offset) => {
                            i += offset;
                            let (s, b) = self.transition(state, buf[i]);
                            buf[i] = b;
                            state = s;
                            i += 1;
                        }
                    }
                }
                State::QuotedMaybeEndingOrEscaping => {
                    let (s, b) = self.transition(state, buf[i]);
                    buf[i] = b;
                    state = s;
                    i += 1;
                }
            }
        }
        self.state = state;
    }

    #[inline(always)]
    fn encode_bytewise(&mut self, buf: &mut [u8]) {
        let mut state = self.state;
        for b in buf.iter_mut() {
            let (s, out) = self.transition(state, *b);
            *b = out;
            state = s;
        }
        self.state = state;
    }

    /// The transition function. Returns the next state and the byte to emit
    /// for the input byte `c`.
    #[inline(always)]
    fn transition(&self, state: State, c: u8) -> (State, u8) {
        use self::State::*;

        let config = &self.config;
        match state {
            Unquoted => {
                if c == config.quote() {
                    (Quoted, c)
                } else {
                    (Unquoted, c)
                }
            }
            Quoted => {
                if c == config.quote() {
                    (QuotedMaybeEndingOrEscaping, c)
                } else if c == config.delimiter() {
                    (Quoted, config.delimiter_code())
                } else if c == config.record_separator() {
                    (Quoted, config.record_separator_code())
                } else {
                    (Quoted, c)
                }
            }
            QuotedMaybeEndingOrEscaping => {
                if c == config.quote() {
                    (Quoted, c)
                } else {
                    (Unquoted, c)
                }
            }
        }
    }
}
