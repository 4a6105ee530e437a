//! The configurable line parser: match, decode field-by-field, assemble.

use crate::parser::decode;
use crate::parser::error::MalformedLine;
use crate::parser::pattern::{self, LogFormat};
use crate::parser::record::{ParsedRecord, Query};

/// How the query component of the request url lands in the record.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum QueryMode {
    /// Form-decoded key/value mapping.
    #[default]
    Structured,
    /// The literal query substring, untouched.
    Raw,
}

/// Tagged parser configuration: line layout plus query handling.
///
/// One parser type covers both layouts and both query modes; there are no
/// per-format parser types to keep in sync.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct ParseOptions {
    pub format: LogFormat,
    pub query_mode: QueryMode,
}

/// Parser for the fixed access-log layouts.
///
/// Holds a single-entry memo of the last decoded time field, so each worker
/// owns its own instance. `parse` takes `&mut self`, which makes the memo's
/// read-then-write a critical section by construction.
pub struct AccessLogParser {
    options: ParseOptions,
    last_time: Option<(Vec<u8>, i64)>,
}

impl Default for AccessLogParser {
    fn default() -> Self {
        Self::new(ParseOptions::default())
    }
}

impl AccessLogParser {
    pub fn new(options: ParseOptions) -> Self {
        Self {
            options,
            last_time: None,
        }
    }

    /// Parse one raw line into a record, or reject it as malformed.
    ///
    /// Decoding runs field-by-field in line order and aborts at the first
    /// failure; partial records are never produced.
    pub fn parse(&mut self, line: &[u8]) -> Result<ParsedRecord, MalformedLine> {
        let fields = pattern::match_line(line, self.options.format)?;

        let ip = decode::text(fields.ip);
        let host = decode::host(fields.host)?;
        let ts = self.timestamp(fields.time)?;
        let method = decode::text(fields.method);
        let url = decode::text(fields.url);
        let (path, query) = decode::split_target(&url);
        let query = match self.options.query_mode {
            QueryMode::Structured => Query::Pairs(decode::query_pairs(query)),
            QueryMode::Raw => Query::Raw(query.to_string()),
        };
        let status = decode::number(fields.status)?;
        let size = decode::number(fields.size)?;
        let referer = fields.referer.map(decode::text);
        let user_agent = fields.user_agent.map(decode::text);

        Ok(ParsedRecord {
            ip,
            host,
            ts,
            method,
            path: path.to_string(),
            query,
            status,
            size,
            referer,
            user_agent,
        })
    }

    /// Decode the time field, short-circuiting byte-identical repeats.
    ///
    /// Consecutive lines usually land in the same formatted second, so one
    /// remembered (raw, epoch) pair removes most of the calendar math.
    fn timestamp(&mut self, raw: &[u8]) -> Result<i64, MalformedLine> {
        if let Some((last_raw, ts)) = &self.last_time
            && last_raw.as_slice() == raw
        {
            return Ok(*ts);
        }
        let ts = decode::timestamp(raw)?;
        self.last_time = Some((raw.to_vec(), ts));
        Ok(ts)
    }
}
