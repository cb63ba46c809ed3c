/*!
Header inspection.

Finding the column number to hand to `cut -f` or `awk '{print $N}'` is
tedious for wide CSV files with quoted headers. `read_header` reads just the
first record, splits it into fields with quoting taken into account, and
`write_header` lists them with their 1-based index.
*/

use std::io;

use bstr::ByteSlice;
use csvquote_core::{Config, Decoder, Encoder};
use tracing::debug;

use crate::error::{Error, Result};

const BUF_SIZE: usize = 8 * 1024;

/// Read the first record of `rdr` and return its fields.
///
/// Delimiters and record separators inside quoted fields are kept as part of
/// the field. Quotes are not removed. Reading stops at the end of the first
/// record, so the rest of the input is never read. An empty input has no
/// fields.
pub fn read_header<R: io::Read>(
    mut rdr: R,
    config: Config,
) -> Result<Vec<Vec<u8>>> {
    let mut enc = Encoder::new(config);
    let mut buf = vec![0; BUF_SIZE];
    let mut record = vec![];
    let mut any = false;
    loop {
        let n = match rdr.read(&mut buf) {
            Ok(0) => break,
            Ok(n) => n,
            Err(ref err) if err.kind() == io::ErrorKind::Interrupted => {
                continue
            }
            Err(err) => return Err(Error::Io(err)),
        };
        any = true;
        let chunk = &mut buf[..n];
        enc.encode_in_place(chunk);
        // Quoted separators have been replaced, so this is the real end.
        match chunk.find_byte(config.record_separator()) {
            Some(end) => {
                record.extend_from_slice(&chunk[..end]);
                break;
            }
            None => record.extend_from_slice(chunk),
        }
    }
    if !any {
        return Ok(vec![]);
    }
    let dec = Decoder::new(config);
    let fields: Vec<Vec<u8>> = record
        .split_str(&[config.delimiter()])
        .map(|field| {
            let mut field = field.to_vec();
            dec.decode_in_place(&mut field);
            field
        })
        .collect();
    debug!(fields = fields.len(), "read header");
    Ok(fields)
}

/// Write each field on its own line, preceded by its 1-based index.
pub fn write_header<W: io::Write>(
    mut wtr: W,
    fields: &[Vec<u8>],
) -> io::Result<()> {
    for (i, field) in fields.iter().enumerate() {
        write!(wtr, " {}\t: ", i + 1)?;
        wtr.write_all(field)?;
        wtr.write_all(b"\n")?;
    }
    wtr.flush()
}
