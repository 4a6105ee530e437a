use http_log_parser::{
    AccessLogParser, LogFormat, ParseOptions, ParsedRecord, Query, QueryMode,
};

const EXAMPLE: &[u8] = b"1.2.3.4 - - [18/Jun/2020:00:01:09 +0300] \"GET /path/?greetings=hello%20world HTTP/1.1\" 204 0 \"https://example.com/\" \"Chrome/1 Firefox/2 IE/3 Edge/4\"";

fn combined() -> AccessLogParser {
    AccessLogParser::new(ParseOptions::default())
}

#[test]
fn test_example_line_decodes_to_documented_record() {
    let record = combined().parse(EXAMPLE).unwrap();

    let expected = ParsedRecord {
        ip: "1.2.3.4".into(),
        host: None,
        ts: 1_592_427_669,
        method: "GET".into(),
        path: "/path/".into(),
        query: Query::Pairs(vec![("greetings".into(), "hello world".into())]),
        status: 204,
        size: 0,
        referer: Some("https://example.com/".into()),
        user_agent: Some("Chrome/1 Firefox/2 IE/3 Edge/4".into()),
    };
    assert_eq!(record, expected);
}

#[test]
fn test_record_has_exactly_the_expected_keys() {
    let record = combined().parse(EXAMPLE).unwrap();
    let value = serde_json::to_value(&record).unwrap();
    let mut keys: Vec<&str> = value.as_object().unwrap().keys().map(String::as_str).collect();
    keys.sort_unstable();

    // No host key: the raw token was the dash placeholder.
    assert_eq!(
        keys,
        ["ip", "method", "path", "query", "referer", "size", "status", "ts", "user_agent"]
    );
}

#[test]
fn test_host_present_iff_raw_token_is_not_dash() {
    let with_host = b"1.2.3.4 example.com - [18/Jun/2020:00:01:09 +0300] \"GET / HTTP/1.1\" 200 5 \"-\" \"-\"";
    let record = combined().parse(with_host).unwrap();
    assert_eq!(record.host, Some("example.com".to_string()));

    // An escaped dash is still the placeholder once unescaped.
    let escaped_dash = b"1.2.3.4 \\x2d - [18/Jun/2020:00:01:09 +0300] \"GET / HTTP/1.1\" 200 5 \"-\" \"-\"";
    let record = combined().parse(escaped_dash).unwrap();
    assert_eq!(record.host, None);
}

#[test]
fn test_punycode_host_is_decoded() {
    let line = b"1.2.3.4 xn--bcher-kva.example - [18/Jun/2020:00:01:09 +0300] \"GET / HTTP/1.1\" 200 5 \"-\" \"-\"";
    let record = combined().parse(line).unwrap();
    assert_eq!(record.host, Some("b\u{fc}cher.example".to_string()));
}

#[test]
fn test_structured_query_decoding() {
    let line = b"1.2.3.4 - - [18/Jun/2020:00:01:09 +0300] \"GET /p?a=1&b=2 HTTP/1.1\" 200 5 \"-\" \"-\"";
    let record = combined().parse(line).unwrap();
    assert_eq!(
        record.query,
        Query::Pairs(vec![("a".into(), "1".into()), ("b".into(), "2".into())])
    );

    let line = b"1.2.3.4 - - [18/Jun/2020:00:01:09 +0300] \"GET /p?a=1&a=2 HTTP/1.1\" 200 5 \"-\" \"-\"";
    let record = combined().parse(line).unwrap();
    assert_eq!(record.query, Query::Pairs(vec![("a".into(), "2".into())]));
}

#[test]
fn test_absolute_form_target_splits_at_the_query_only() {
    let line = b"1.2.3.4 - - [18/Jun/2020:00:01:09 +0300] \"GET http://example.com/path?q=1 HTTP/1.1\" 200 5 \"-\" \"-\"";
    let record = combined().parse(line).unwrap();
    assert_eq!(record.path, "http://example.com/path");
    assert_eq!(record.query, Query::Pairs(vec![("q".into(), "1".into())]));
}

#[test]
fn test_raw_query_is_the_literal_substring() {
    let mut parser = AccessLogParser::new(ParseOptions {
        query_mode: QueryMode::Raw,
        ..ParseOptions::default()
    });
    let line = b"1.2.3.4 - - [18/Jun/2020:00:01:09 +0300] \"GET /p?a=hello%20world HTTP/1.1\" 200 5 \"-\" \"-\"";
    let record = parser.parse(line).unwrap();
    assert_eq!(record.query, Query::Raw("a=hello%20world".to_string()));
    assert_eq!(record.path, "/p");
}

#[test]
fn test_hex_escapes_decode_before_text() {
    let line = b"1.2.3.4 - - [18/Jun/2020:00:01:09 +0300] \"GET /p HTTP/1.1\" 200 5 \"-\" \"agent\\x20one\"";
    let record = combined().parse(line).unwrap();
    assert_eq!(record.user_agent, Some("agent one".to_string()));
}

#[test]
fn test_high_bytes_survive_as_latin1_text() {
    let line = b"1.2.3.4 - - [18/Jun/2020:00:01:09 +0300] \"GET /caf\xe9 HTTP/1.1\" 200 5 \"-\" \"-\"";
    let record = combined().parse(line).unwrap();
    assert_eq!(record.path, "/caf\u{e9}");
}

#[test]
fn test_parse_is_deterministic_across_interleaved_lines() {
    let other = b"5.6.7.8 - - [19/Jun/2020:12:00:00 +0000] \"GET /other HTTP/1.1\" 200 1 \"-\" \"-\"";

    let mut parser = combined();
    let first = parser.parse(EXAMPLE).unwrap();
    let unrelated = parser.parse(other).unwrap();
    let second = parser.parse(EXAMPLE).unwrap();

    assert_eq!(first, second);
    assert_ne!(first.ts, unrelated.ts);
}

#[test]
fn test_timezone_offsets_shift_the_epoch() {
    let plus = b"1.2.3.4 - - [18/Jun/2020:00:01:09 +0300] \"GET / HTTP/1.1\" 200 5 \"-\" \"-\"";
    let minus = b"1.2.3.4 - - [18/Jun/2020:00:01:09 -0500] \"GET / HTTP/1.1\" 200 5 \"-\" \"-\"";

    let mut parser = combined();
    let east = parser.parse(plus).unwrap().ts;
    let west = parser.parse(minus).unwrap().ts;
    assert_eq!(west - east, 8 * 3600);
}

#[test]
fn test_simple_format_drops_the_quoted_tail() {
    let mut parser = AccessLogParser::new(ParseOptions {
        format: LogFormat::Simple,
        ..ParseOptions::default()
    });
    let line = b"1.2.3.4 - - [18/Jun/2020:00:01:09 +0300] \"GET /p?a=1 HTTP/1.1\" 200 5";
    let record = parser.parse(line).unwrap();

    assert_eq!(record.referer, None);
    assert_eq!(record.user_agent, None);
    assert_eq!(record.status, 200);
    assert_eq!(record.size, 5);

    let value = serde_json::to_value(&record).unwrap();
    let obj = value.as_object().unwrap();
    assert!(!obj.contains_key("referer"));
    assert!(!obj.contains_key("user_agent"));
}

#[test]
fn test_combined_format_requires_the_quoted_tail() {
    let without_tail = b"1.2.3.4 - - [18/Jun/2020:00:01:09 +0300] \"GET /p HTTP/1.1\" 200 5";
    assert!(combined().parse(without_tail).is_err());
}

#[test]
fn test_malformed_lines_fail_with_no_partial_record() {
    let cases: [&[u8]; 5] = [
        // Non-numeric status.
        b"1.2.3.4 - - [18/Jun/2020:00:01:09 +0300] \"GET /p HTTP/1.1\" 2x4 0 \"-\" \"-\"",
        // Unparsable timestamp.
        b"1.2.3.4 - - [yesterday] \"GET /p HTTP/1.1\" 204 0 \"-\" \"-\"",
        // Missing closing quote on the request.
        b"1.2.3.4 - - [18/Jun/2020:00:01:09 +0300] \"GET /p HTTP/1.1 204 0 \"-\" \"-\"",
        // Month out of range for the calendar.
        b"1.2.3.4 - - [30/Feb/2020:00:00:00 +0000] \"GET /p HTTP/1.1\" 204 0 \"-\" \"-\"",
        // Empty line.
        b"",
    ];

    let mut parser = combined();
    for line in cases {
        assert!(parser.parse(line).is_err(), "{:?}", String::from_utf8_lossy(line));
    }
}

#[test]
fn test_ndjson_shape_of_serialized_record() {
    let record = combined().parse(EXAMPLE).unwrap();
    let json = serde_json::to_string(&record).unwrap();
    assert_eq!(
        json,
        r#"{"ip":"1.2.3.4","ts":1592427669,"method":"GET","path":"/path/","query":{"greetings":"hello world"},"status":204,"size":0,"referer":"https://example.com/","user_agent":"Chrome/1 Firefox/2 IE/3 Edge/4"}"#
    );
}
