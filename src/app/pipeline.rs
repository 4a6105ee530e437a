//! The read → parse → write loop and its terminal status.

use crate::input::InputError;
use crate::output::{NdjsonWriter, OutputError};
use crate::parser::AccessLogParser;
use bytes::Bytes;
use std::io::Write;
use tracing::{debug, error, warn};

/// How a processing run ended; the binary maps this to an exit code.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RunStatus {
    /// Every line was consumed; skipped malformed lines still count.
    Complete,
    /// A line was rejected and skipping is off.
    MalformedInput,
    /// A source failed to open or read.
    InputFailed,
    /// Downstream closed standard output.
    BrokenPipe,
    /// Writing a record failed for any other reason.
    WriteFailed,
}

/// Drive lines from the reader through the parser into the writer.
///
/// Malformed lines are always reported on stderr; `skip_errors` decides
/// whether the run continues past them.
pub fn process_lines<I, W>(
    parser: &mut AccessLogParser,
    lines: I,
    writer: &mut NdjsonWriter<W>,
    skip_errors: bool,
) -> RunStatus
where
    I: IntoIterator<Item = Result<Bytes, InputError>>,
    W: Write,
{
    for line in lines {
        let line = match line {
            Ok(line) => line,
            Err(err) => {
                error!("Input failed: {err}");
                return RunStatus::InputFailed;
            }
        };

        let record = match parser.parse(&line) {
            Ok(record) => record,
            Err(err) => {
                warn!("{err}: {}", String::from_utf8_lossy(&line));
                if skip_errors {
                    continue;
                }
                return RunStatus::MalformedInput;
            }
        };

        match writer.write_record(&record) {
            Ok(()) => {}
            Err(OutputError::BrokenPipe) => {
                debug!("Output pipe closed, stopping");
                return RunStatus::BrokenPipe;
            }
            Err(err) => {
                error!("{err}");
                return RunStatus::WriteFailed;
            }
        }
    }

    RunStatus::Complete
}
