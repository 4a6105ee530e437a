pub mod config;
pub mod pipeline;

pub use config::{Config, FormatArg, LogLevel};
pub use pipeline::{RunStatus, process_lines};

use crate::input::LineReader;
use crate::output::NdjsonWriter;
use crate::parser::AccessLogParser;
use std::io;
use std::process::ExitCode;
use tracing::debug;
use tracing_subscriber::filter::LevelFilter;
use tracing_subscriber::{EnvFilter, fmt, prelude::*};

/// Install the stderr diagnostics subscriber.
///
/// Stdout carries nothing but NDJSON records, so every diagnostic goes to
/// stderr. `RUST_LOG` overrides the flag-selected default level.
fn init_logging(level: LogLevel) {
    let filter = EnvFilter::builder()
        .with_default_directive(LevelFilter::from(tracing::Level::from(level)).into())
        .from_env_lossy();

    let subscriber = tracing_subscriber::registry().with(filter).with(
        fmt::layer()
            .with_writer(io::stderr)
            .with_target(false)
            .compact(),
    );

    // Tests may have installed a subscriber already; losing that race is fine.
    let _ = tracing::subscriber::set_global_default(subscriber);
}

/// Exit-code contract: 0 clean, 3 malformed line without skipping, 1 input
/// or pipe failure, 2 any other write failure.
fn exit_code(status: RunStatus) -> u8 {
    match status {
        RunStatus::Complete => 0,
        RunStatus::MalformedInput => 3,
        RunStatus::InputFailed | RunStatus::BrokenPipe => 1,
        RunStatus::WriteFailed => 2,
    }
}

/// Entry point behind the binary: flags, logging, pipeline, exit code.
pub fn main() -> ExitCode {
    let config = Config::from_args(std::env::args());
    init_logging(config.log_level);

    let mut parser = AccessLogParser::new(config.parse_options());
    let lines = LineReader::new(config.files.clone());
    let mut writer = NdjsonWriter::new(io::stdout().lock());

    let status = process_lines(&mut parser, lines, &mut writer, config.skip_errors);
    debug!("Run finished: {status:?}");
    ExitCode::from(exit_code(status))
}
