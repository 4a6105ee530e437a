use thiserror::Error;

/// The single failure kind of the line parser.
///
/// A line either yields a complete record or it is malformed; no partial
/// results exist. The reason string says which stage rejected the line and
/// is meant for diagnostics, not for programmatic dispatch.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
#[error("malformed log line: {reason}")]
pub struct MalformedLine {
    pub reason: &'static str,
}

impl MalformedLine {
    pub(crate) fn new(reason: &'static str) -> Self {
        Self { reason }
    }
}
