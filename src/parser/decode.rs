//! Per-field decoders: raw matched bytes to semantic values.

use crate::parser::error::MalformedLine;
use crate::parser::pattern::{HEX_ESCAPE, LOCAL_TIME};
use chrono::NaiveDate;
use std::borrow::Cow;
use url::form_urlencoded;

const MONTHS: [&[u8]; 12] = [
    b"Jan", b"Feb", b"Mar", b"Apr", b"May", b"Jun", b"Jul", b"Aug", b"Sep", b"Oct", b"Nov", b"Dec",
];

/// Replace every `\xHH` escape with the byte it encodes.
///
/// Escapes without exactly two hex digits are left literal. Borrows the input
/// untouched when it contains no escapes, which is the common case.
pub(crate) fn unescape(raw: &[u8]) -> Cow<'_, [u8]> {
    HEX_ESCAPE.replace_all(raw, |caps: &regex::bytes::Captures| {
        let hex = &caps[1];
        [(hex_nibble(hex[0]) << 4) | hex_nibble(hex[1])]
    })
}

fn hex_nibble(digit: u8) -> u8 {
    match digit {
        b'0'..=b'9' => digit - b'0',
        b'a'..=b'f' => digit - b'a' + 10,
        b'A'..=b'F' => digit - b'A' + 10,
        // The escape pattern only captures hex digits.
        _ => 0,
    }
}

fn latin1(bytes: &[u8]) -> String {
    bytes.iter().map(|&b| char::from(b)).collect()
}

/// Unescape, then widen each byte to the code point of the same value.
///
/// Single-byte decoding never fails and never merges bytes, so arbitrary
/// high bytes survive as their Latin-1 characters.
pub(crate) fn text(raw: &[u8]) -> String {
    latin1(&unescape(raw))
}

/// Decode the host field under internationalized-domain-name rules.
///
/// The dash placeholder means "no host" and yields `None`; anything else must
/// be a valid IDNA name once unescaped.
pub(crate) fn host(raw: &[u8]) -> Result<Option<String>, MalformedLine> {
    let unescaped = unescape(raw);
    if unescaped.as_ref() == b"-" {
        return Ok(None);
    }
    let (decoded, validity) = idna::domain_to_unicode(&latin1(&unescaped));
    match validity {
        Ok(()) => Ok(Some(decoded)),
        Err(_) => Err(MalformedLine::new("host field is not a valid IDNA name")),
    }
}

/// Decode `DD/Mon/YYYY:HH:MM:SS +HHMM` into UTC epoch seconds.
///
/// The wall clock is assembled as a naive timestamp and the signed offset is
/// subtracted afterwards. Month names are case-sensitive English
/// abbreviations; chrono rejects out-of-range calendar fields.
pub(crate) fn timestamp(raw: &[u8]) -> Result<i64, MalformedLine> {
    let caps = LOCAL_TIME.captures(raw).ok_or_else(|| {
        MalformedLine::new("time field does not match DD/Mon/YYYY:HH:MM:SS +HHMM")
    })?;
    let (_, [day, month, year, hour, minute, second, sign, off_hours, off_minutes]) =
        caps.extract();

    let month = MONTHS
        .iter()
        .position(|name| *name == month)
        .ok_or_else(|| MalformedLine::new("unknown month abbreviation in time field"))?;
    let date = NaiveDate::from_ymd_opt(digits(year) as i32, month as u32 + 1, digits(day))
        .ok_or_else(|| MalformedLine::new("calendar date in time field is out of range"))?;
    let clock = date
        .and_hms_opt(digits(hour), digits(minute), digits(second))
        .ok_or_else(|| MalformedLine::new("clock time in time field is out of range"))?;

    let offset = i64::from(3600 * digits(off_hours) + 60 * digits(off_minutes));
    let offset = if sign == b"-" { -offset } else { offset };
    Ok(clock.and_utc().timestamp() - offset)
}

/// Fold a short all-digit capture; widths are bounded by the time pattern.
fn digits(raw: &[u8]) -> u32 {
    raw.iter().fold(0, |n, &b| n * 10 + u32::from(b - b'0'))
}

/// Parse a numeric field as a non-negative integer.
///
/// The line pattern only passes digit runs through, but an overlong run still
/// has to be rejected rather than silently wrapped.
pub(crate) fn number(raw: &[u8]) -> Result<u64, MalformedLine> {
    std::str::from_utf8(raw)
        .ok()
        .and_then(|text| text.parse().ok())
        .ok_or_else(|| MalformedLine::new("numeric field is not an unsigned base-10 integer"))
}

/// Split a decoded request url into path and query, dropping any fragment.
///
/// The token is treated as a request-target: no scheme or host handling, the
/// path goes through verbatim.
pub(crate) fn split_target(target: &str) -> (&str, &str) {
    let target = target.split_once('#').map_or(target, |(before, _)| before);
    target.split_once('?').unwrap_or((target, ""))
}

/// Form-decode a query string into key/value pairs.
///
/// Percent escapes and `+` decode per form-encoding rules; pairs with an
/// empty value are dropped; duplicate keys keep their first position but the
/// last value wins.
pub(crate) fn query_pairs(query: &str) -> Vec<(String, String)> {
    let mut pairs: Vec<(String, String)> = Vec::new();
    for (key, value) in form_urlencoded::parse(query.as_bytes()) {
        if value.is_empty() {
            continue;
        }
        match pairs.iter_mut().find(|(existing, _)| existing.as_str() == key) {
            Some((_, slot)) => *slot = value.into_owned(),
            None => pairs.push((key.into_owned(), value.into_owned())),
        }
    }
    pairs
}
