use std::io;
use std::process::ExitCode;

use clap::Parser;
use tracing::debug;
use tracing_subscriber::layer::SubscriberExt;
use tracing_subscriber::util::SubscriberInitExt;
use tracing_subscriber::EnvFilter;

use csvquote::cli::{self, Args};

fn main() -> ExitCode {
    // Logs go to stderr so they never mix with the data on stdout.
    let filter = EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| EnvFilter::new("warn"));
    tracing_subscriber::registry()
        .with(filter)
        .with(tracing_subscriber::fmt::layer().with_writer(io::stderr))
        .init();

    let args = Args::parse();
    match cli::run(&args, io::stdout().lock()) {
        Ok(()) => ExitCode::SUCCESS,
        Err(err) if err.is_broken_pipe() => {
            debug!("output closed early");
            ExitCode::SUCCESS
        }
        Err(err) => {
            eprintln!("csvquote: {}", err);
            ExitCode::FAILURE
        }
    }
}
