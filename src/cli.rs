/*!
The `csvquote` command line.

Arguments are parsed with `clap`. The built-in `-h` help flag is disabled:
`-h` selects header mode, and help is available as `-?` or `--help`.
*/

use std::fs::File;
use std::io;
use std::path::PathBuf;

use clap::{ArgAction, Parser};
use tracing::debug;

use crate::error::{Error, Result};
use crate::header::{read_header, write_header};
use crate::options::Overrides;
use crate::transcoder::{Mode, TranscoderBuilder};

const AFTER_HELP: &str = "\
Use csvquote at the start and at the end of a pipeline so that regular unix
tools like cut, head, sort and awk can handle CSV data whose quoted fields
contain delimiters or newlines:

    csvquote data.csv | cut -d ',' -f 2,4 | csvquote -u
    cat data.csv | csvquote | head -n 100 | csvquote -u

Inside a quoted field, a quote character is written twice:

    field1,\"field2, has a comma\",\"field3 has a \"\"quoted\"\" word\"

Override values may use the escapes \\t, \\n, \\r, \\0, \\\\ and \\xNN.
The reserved codes 0x1D and 0x1C must not occur in the input.";

/// Command line arguments for `csvquote`.
#[derive(Parser, Debug)]
#[command(name = "csvquote")]
#[command(version)]
#[command(about = "Replace delimiters and newlines inside quoted CSV fields \
                   with nonprinting characters, or restore them")]
#[command(after_help = AFTER_HELP)]
#[command(disable_help_flag = true)]
#[command(args_override_self = true)]
pub struct Args {
    /// Restore mode: replace nonprinting characters with the original
    /// characters
    #[arg(short = 'u', overrides_with = "sanitize")]
    pub restore: bool,

    /// Replace mode (the default): replace special characters inside quoted
    /// fields with nonprinting characters
    #[arg(short = 's', overrides_with = "restore")]
    pub sanitize: bool,

    /// Field delimiter character [default: ,]
    #[arg(short = 'd', value_name = "CHAR", allow_hyphen_values = true)]
    pub delimiter: Option<String>,

    /// Use tab as the field delimiter (overrides -d)
    #[arg(short = 't')]
    pub tab: bool,

    /// Field quoting character [default: "]
    #[arg(short = 'q', value_name = "CHAR", allow_hyphen_values = true)]
    pub quote: Option<String>,

    /// Record separator character [default: \n]
    #[arg(short = 'r', value_name = "CHAR", allow_hyphen_values = true)]
    pub record_separator: Option<String>,

    /// Flush output after every record (slower)
    #[arg(short = 'b')]
    pub line_buffered: bool,

    /// Print the index of each field in the first record, then quit
    #[arg(short = 'h')]
    pub header: bool,

    /// Print help
    #[arg(short = '?', long = "help", action = ArgAction::Help)]
    help: Option<bool>,

    /// Input files. If none are given, read from standard input
    #[arg(value_name = "FILE")]
    pub files: Vec<PathBuf>,
}

impl Args {
    /// The configuration overrides given.
    pub fn overrides(&self) -> Overrides {
        Overrides {
            quote: self.quote.clone(),
            delimiter: self.delimiter.clone(),
            tab: self.tab,
            record_separator: self.record_separator.clone(),
        }
    }

    /// The direction selected by `-u` and `-s`. The last one given wins.
    pub fn mode(&self) -> Mode {
        if self.restore {
            Mode::Restore
        } else {
            Mode::Replace
        }
    }
}

/// Run `csvquote` with the given arguments, writing to `wtr`.
///
/// The configuration is validated before any input is opened. Without input
/// files, standard input is read.
pub fn run<W: io::Write>(args: &Args, mut wtr: W) -> Result<()> {
    let config = args.overrides().config()?;
    debug!(?config, mode = ?args.mode(), header = args.header, "configured");

    if args.header {
        let fields = match args.files.first() {
            None => read_header(io::stdin().lock(), config)?,
            Some(path) => {
                let file = File::open(path)
                    .map_err(|err| Error::Open { path: path.clone(), err })?;
                read_header(file, config)?
            }
        };
        write_header(&mut wtr, &fields)?;
        return Ok(());
    }

    let mut tc = TranscoderBuilder::new()
        .mode(args.mode())
        .config(config)
        .line_buffered(args.line_buffered)
        .build();
    if args.files.is_empty() {
        tc.transcode(io::stdin().lock(), &mut wtr)?;
    } else {
        for path in &args.files {
            tc.transcode_path(path, &mut wtr)?;
        }
    }
    Ok(())
}
