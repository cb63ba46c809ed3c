/*!
`csvquote-core` provides the byte level state machines behind `csvquote`.

CSV fields may contain the field delimiter and the record separator as long as
the field is quoted. Line and field oriented tools such as `cut`, `head` or
`awk` don't know that, and will happily split a record in the middle of a
quoted field. This crate fixes that by rewriting every delimiter and record
separator that occurs *inside* a quoted field to a reserved nonprinting code.
The rewritten data can flow through any such tool, and a final pass restores
the original bytes.

There are two transcoders, both sharing one [`Config`](struct.Config.html):

* [`Encoder`](struct.Encoder.html) performs the substitution. It tracks
  whether it is inside a quoted field (including the one byte of lookahead
  needed to tell a doubled quote escape from the end of a field), so its
  state carries across calls.
* [`Decoder`](struct.Decoder.html) undoes the substitution. It is stateless.

Neither does any I/O or allocation. Callers provide input and output buffers,
in a push style. The `csvquote` crate wraps these in a
`std::io` driver.

# Example

```
use csvquote_core::{Config, Decoder, Encoder, EncodeResult};

let config = Config::default();
let mut enc = Encoder::new(config);
let mut out = [0; 32];

let (res, nin, nout) = enc.encode(b"a,\"b,c\"\n", &mut out);
assert_eq!(res, EncodeResult::InputEmpty);
assert_eq!((nin, nout), (8, 8));
assert_eq!(&out[..nout], b"a,\"b\x1dc\"\n");

let mut buf = out;
Decoder::new(config).decode_in_place(&mut buf[..nout]);
assert_eq!(&buf[..nout], b"a,\"b,c\"\n");
```

# Reserved codes

The delimiter is replaced with [`DELIMITER_CODE`](constant.DELIMITER_CODE.html)
(ASCII group separator, `0x1D`) and the record separator with
[`RECORD_SEPARATOR_CODE`](constant.RECORD_SEPARATOR_CODE.html) (ASCII file
separator, `0x1C`). These bytes must never occur in genuine input. Nothing
checks this: if they do, decoding silently produces different data.
*/

#![deny(missing_docs)]
#![cfg_attr(not(test), no_std)]

pub use crate::config::{
    Config, ConfigBuilder, DELIMITER_CODE, RECORD_SEPARATOR_CODE,
};
pub use crate::decoder::{DecodeResult, Decoder};
pub use crate::encoder::{EncodeResult, Encoder, EncoderBuilder, State};

mod config;
mod decoder;
mod encoder;
