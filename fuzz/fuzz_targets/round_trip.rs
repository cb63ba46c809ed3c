#![no_main]

use csvquote_core::{Config, Decoder, EncoderBuilder};
use libfuzzer_sys::fuzz_target;

fuzz_target!(|data: &[u8]| {
    let config = Config::default();
    if data.iter().any(|&b| config.is_code(b)) {
        return;
    }

    let mut fast = data.to_vec();
    EncoderBuilder::new().build().encode_in_place(&mut fast);
    let mut slow = data.to_vec();
    EncoderBuilder::new().bytewise(true).build().encode_in_place(&mut slow);
    assert_eq!(fast, slow);

    Decoder::new(config).decode_in_place(&mut fast);
    assert_eq!(fast, data);
});
