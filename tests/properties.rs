//! Property tests for streaming through `Transcoder`.

use csvquote::{ConfigBuilder, Mode, Transcoder, TranscoderBuilder};
use proptest::prelude::*;

/// A field that is either plain or quoted, possibly containing delimiters,
/// record separators and doubled quotes.
fn field() -> impl Strategy<Value = String> {
    prop_oneof![
        "[a-z0-9 ]{0,8}",
        "[a-z,\n ]{0,8}".prop_map(|s| format!("\"{}\"", s)),
        "[a-z,\n]{0,4}".prop_map(|s| format!("\"{}\"\"{}\"", s, s)),
    ]
}

fn record() -> impl Strategy<Value = Vec<String>> {
    prop::collection::vec(field(), 1..6)
}

fn csv_data() -> impl Strategy<Value = (Vec<Vec<String>>, String)> {
    prop::collection::vec(record(), 0..8).prop_map(|records| {
        let mut data = String::new();
        for r in &records {
            data.push_str(&r.join(","));
            data.push('\n');
        }
        (records, data)
    })
}

fn run(tc: &mut Transcoder, data: &[u8]) -> Vec<u8> {
    let mut out = vec![];
    tc.transcode(data, &mut out).unwrap();
    out
}

proptest! {
    #[test]
    fn replaced_output_splits_into_records_and_fields(
        (records, data) in csv_data(),
        capacity in 1usize..64,
    ) {
        let mut tc =
            TranscoderBuilder::new().buffer_capacity(capacity).build();
        let out = String::from_utf8(run(&mut tc, data.as_bytes())).unwrap();

        let lines: Vec<&str> = out.lines().collect();
        prop_assert_eq!(lines.len(), records.len());
        for (line, record) in lines.iter().zip(&records) {
            prop_assert_eq!(line.split(',').count(), record.len());
        }
    }

    #[test]
    fn restore_undoes_replace(
        data in "[a-z,\"\n\r\t ]{0,200}",
        capacity in 1usize..64,
    ) {
        let mut replace =
            TranscoderBuilder::new().buffer_capacity(capacity).build();
        let mut restore = TranscoderBuilder::new()
            .buffer_capacity(capacity)
            .mode(Mode::Restore)
            .build();
        let replaced = run(&mut replace, data.as_bytes());
        prop_assert_eq!(replaced.len(), data.len());
        prop_assert_eq!(run(&mut restore, &replaced), data.as_bytes());
    }

    #[test]
    fn custom_config_round_trips(data in "[a-z;'|\n ]{0,200}") {
        let config = ConfigBuilder::new()
            .quote(b'\'')
            .delimiter(b';')
            .record_separator(b'|')
            .build();
        let mut replace = TranscoderBuilder::new().config(config).build();
        let mut restore = TranscoderBuilder::new()
            .config(config)
            .mode(Mode::Restore)
            .build();
        let replaced = run(&mut replace, data.as_bytes());
        prop_assert_eq!(run(&mut restore, &replaced), data.as_bytes());
    }
}
