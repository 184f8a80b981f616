use std::sync::LazyLock;

use regex::Regex;

use crate::{error::RecordError, models::ParsedRecord};

// Groups: ip, time, request, response, size. Word, digit and space classes
// in the timestamp and response are ASCII only.
static ACCESS_LOG: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(concat!(
        r#"^([^ ]*) \S+ \S+ "#,
        r#"\[([0-9A-Za-z_:/]+(?-u:\s)[+\-][0-9]{4})\] "#,
        r#""(.+?)" ([0-9]{3}) ([^ ]*).*$"#,
    ))
    .expect("access log regex is valid")
});

pub fn parse_line(line: &str) -> Result<ParsedRecord, RecordError> {
    let caps = ACCESS_LOG.captures(line).ok_or(RecordError::Parse)?;
    let field = |i: usize| caps.get(i).map(|m| m.as_str().to_string());
    Ok(ParsedRecord {
        ip: field(1).ok_or(RecordError::Parse)?,
        time: field(2).ok_or(RecordError::Parse)?,
        request: field(3).ok_or(RecordError::Parse)?,
        response: caps[4].parse().map_err(|_| RecordError::Parse)?,
        size: field(5).ok_or(RecordError::Parse)?,
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use asserting::{expectations::IsEqualTo, prelude::*};

    #[test]
    fn parse_line_valid() {
        let line = r#"127.0.0.1 - - [01/Aug/1995:00:00:01 -0400] "GET /index.html HTTP/1.0" 200 1234"#;
        assert_that!(parse_line(line))
            .is_ok()
            .mapping(|r| r.unwrap())
            .expecting(IsEqualTo {
                expected: ParsedRecord {
                    ip: "127.0.0.1".into(),
                    time: "01/Aug/1995:00:00:01 -0400".into(),
                    request: "GET /index.html HTTP/1.0".into(),
                    response: 200,
                    size: "1234".into(),
                },
            });
    }

    #[test]
    fn request_keeps_every_character() {
        let line = r#"in24.inetnebr.com - - [01/Aug/1995:00:00:01 -0400] "GET /shuttle/missions/sts-68/news/sts-68-mcc-05.txt?a=1&b=%20 HTTP/1.0" 200 -"#;
        let record = parse_line(line).unwrap();
        assert_eq!(record.ip, "in24.inetnebr.com");
        assert_eq!(
            record.request,
            "GET /shuttle/missions/sts-68/news/sts-68-mcc-05.txt?a=1&b=%20 HTTP/1.0"
        );
        assert_eq!(record.size, "-");
    }

    #[test]
    fn trailing_fields_are_ignored() {
        let line = r#"10.0.0.7 - frank [10/Oct/2000:13:55:36 -0700] "GET /apache_pb.gif HTTP/1.0" 200 2326 "http://www.example.com/start.html" "Mozilla/4.08""#;
        let record = parse_line(line).unwrap();
        assert_eq!(record.size, "2326");
        assert_eq!(record.response, 200);
    }

    #[test]
    fn non_matching_lines_are_rejected() {
        for line in [
            "",
            "garbage",
            r#"127.0.0.1 - - [01/Aug/1995:00:00:01] "GET / HTTP/1.0" 200 1"#,
            r#"127.0.0.1 - - [01/Aug/1995:00:00:01 -0400] "GET / HTTP/1.0" 2000 1"#,
            r#"127.0.0.1 - - [01/Aug/1995:00:00:01 -0400] "" 200 1"#,
        ] {
            assert_that!(parse_line(line)).is_err();
        }
    }

    #[test]
    fn non_ascii_digits_are_not_a_response() {
        let line = r#"127.0.0.1 - - [01/Aug/1995:00:00:01 -0400] "GET / HTTP/1.0" ٢٠٠ 5"#;
        assert!(matches!(parse_line(line), Err(RecordError::Parse)));
    }

    #[test]
    fn non_ascii_letters_are_not_a_timestamp() {
        let line = r#"127.0.0.1 - - [01/Août/1995:00:00:01 -0400] "GET / HTTP/1.0" 200 5"#;
        assert!(matches!(parse_line(line), Err(RecordError::Parse)));
    }

    #[test]
    fn tab_inside_request_is_kept() {
        let line = "127.0.0.1 - - [01/Aug/1995:00:00:01 -0400] \"GET /a\tb HTTP/1.0\" 200 5";
        assert_eq!(parse_line(line).unwrap().request, "GET /a\tb HTTP/1.0");
    }
}
