pub mod access;
mod decode;
pub mod error;
pub mod pattern;
pub mod record;

pub use access::{AccessLogParser, ParseOptions, QueryMode};
pub use error::MalformedLine;
pub use pattern::{FieldSet, LogFormat, match_line};
pub use record::{ParsedRecord, Query};
