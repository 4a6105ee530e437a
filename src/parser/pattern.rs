//! Line segmentation: the fixed access-log grammar, applied to raw bytes.
//!
//! Patterns run on `regex::bytes` with Unicode disabled so every class is
//! byte-wise; lines are not guaranteed to be valid UTF-8.

use crate::parser::error::MalformedLine;
use regex::bytes::Regex;
use std::sync::LazyLock;

/// Shared core of both layouts: everything up to the response size.
///
/// Verbose mode strips whitespace even inside character classes, so the
/// single-space separators are spelled `\x20`.
const LINE_CORE: &str = r#"(?x-u)
^
([0-9.]+)          # client address
\x20
(\S+)              # host, or the dash placeholder
\x20
(\S+)              # remote user
\x20
\[ ([^\]]+) \]     # bracketed local time
\x20
"
([A-Z]+)           # request method
\x20
([^"\s]+)          # request url
\x20
([^"]+)            # protocol, up to the closing quote
"
\x20
(\d+)              # response status
\x20
(\d+)              # body size
"#;

/// Combined-only tail: quoted referer and user-agent.
const QUOTED_TAIL: &str = r#"
\x20
" ([^"]*) "        # referer
\x20
" ([^"]*) "        # user agent
"#;

static SIMPLE_LINE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(LINE_CORE).expect("simple line pattern is valid"));

static COMBINED_LINE: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(&format!("{LINE_CORE}{QUOTED_TAIL}")).expect("combined line pattern is valid")
});

/// `DD/Mon/YYYY:HH:MM:SS +HHMM`, the only accepted time layout.
pub(crate) static LOCAL_TIME: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"(?-u)^(\d{2})/([A-Za-z]{3})/(\d{4}):(\d{2}):(\d{2}):(\d{2}) ([+-])(\d{2})(\d{2})$")
        .expect("local time pattern is valid")
});

/// A `\xHH` byte escape; anything without exactly two hex digits stays literal.
pub(crate) static HEX_ESCAPE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"\\x([0-9a-fA-F]{2})").expect("hex escape pattern is valid"));

/// Which of the two fixed access-log layouts a line is expected to follow.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum LogFormat {
    /// Nine fields, ending at the response size.
    Simple,
    /// Eleven fields: the simple layout plus quoted referer and user-agent.
    #[default]
    Combined,
}

/// Raw sub-fields of one matched line, borrowed from the input bytes.
///
/// Produced only by a successful match and never partially populated. The
/// `user` and `protocol` fields are captured but dropped downstream.
#[derive(Debug, Clone, Copy)]
pub struct FieldSet<'a> {
    pub ip: &'a [u8],
    pub host: &'a [u8],
    pub user: &'a [u8],
    pub time: &'a [u8],
    pub method: &'a [u8],
    pub url: &'a [u8],
    pub protocol: &'a [u8],
    pub status: &'a [u8],
    pub size: &'a [u8],
    pub referer: Option<&'a [u8]>,
    pub user_agent: Option<&'a [u8]>,
}

/// Segment one raw line into its fields per the selected layout.
///
/// The match is anchored at byte 0; trailing bytes after the last field are
/// permitted. Failing to match is the only failure mode.
pub fn match_line(line: &[u8], format: LogFormat) -> Result<FieldSet<'_>, MalformedLine> {
    match format {
        LogFormat::Simple => {
            let caps = SIMPLE_LINE
                .captures(line)
                .ok_or_else(|| MalformedLine::new("line does not match the simple access format"))?;
            let (_, [ip, host, user, time, method, url, protocol, status, size]) = caps.extract();
            Ok(FieldSet {
                ip,
                host,
                user,
                time,
                method,
                url,
                protocol,
                status,
                size,
                referer: None,
                user_agent: None,
            })
        }
        LogFormat::Combined => {
            let caps = COMBINED_LINE.captures(line).ok_or_else(|| {
                MalformedLine::new("line does not match the combined access format")
            })?;
            let (_, [ip, host, user, time, method, url, protocol, status, size, referer, user_agent]) =
                caps.extract();
            Ok(FieldSet {
                ip,
                host,
                user,
                time,
                method,
                url,
                protocol,
                status,
                size,
                referer: Some(referer),
                user_agent: Some(user_agent),
            })
        }
    }
}
