//! NDJSON output with typed failure modes.

use crate::parser::ParsedRecord;
use std::io::{self, Write};
use thiserror::Error;

#[derive(Error, Debug)]
pub enum OutputError {
    /// Downstream closed the pipe; the caller tears down quietly.
    #[error("Output pipe closed")]
    BrokenPipe,
    #[error("Write error: {0}")]
    Io(io::Error),
}

impl From<io::Error> for OutputError {
    fn from(err: io::Error) -> Self {
        if err.kind() == io::ErrorKind::BrokenPipe {
            Self::BrokenPipe
        } else {
            Self::Io(err)
        }
    }
}

/// Writes one JSON document per record, newline-delimited, flushed per line.
pub struct NdjsonWriter<W: Write> {
    sink: W,
}

impl<W: Write> NdjsonWriter<W> {
    pub fn new(sink: W) -> Self {
        Self { sink }
    }

    /// Consume the writer and hand back its sink.
    pub fn into_inner(self) -> W {
        self.sink
    }

    /// Serialize one record, terminate the line, flush.
    ///
    /// A broken-pipe failure anywhere in that sequence surfaces as
    /// `BrokenPipe`, including one hit mid-serialization.
    pub fn write_record(&mut self, record: &ParsedRecord) -> Result<(), OutputError> {
        serde_json::to_writer(&mut self.sink, record).map_err(io::Error::from)?;
        self.sink.write_all(b"\n")?;
        self.sink.flush()?;
        Ok(())
    }
}
