use crate::{error::RecordError, models::ParsedRecord};

const REJECTED_RESPONSE: u16 = 404;

#[derive(Debug)]
pub enum Verdict {
    Valid(ParsedRecord),
    Trap {
        record: ParsedRecord,
        reason: RecordError,
    },
}

/// Asserts `response != 404`. Failing records are tagged for the trap
/// instead of being dropped.
pub fn validate(record: ParsedRecord) -> Verdict {
    if record.response == REJECTED_RESPONSE {
        let reason = RecordError::Validation(record.response);
        Verdict::Trap { record, reason }
    } else {
        Verdict::Valid(record)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use asserting::prelude::*;

    fn record(response: u16) -> ParsedRecord {
        ParsedRecord {
            ip: "127.0.0.1".into(),
            time: "01/Aug/1995:00:00:01 -0400".into(),
            request: "GET / HTTP/1.0".into(),
            response,
            size: "1".into(),
        }
    }

    #[test]
    fn not_found_is_trapped() {
        let verdict = validate(record(404));
        assert!(matches!(
            verdict,
            Verdict::Trap {
                reason: RecordError::Validation(404),
                ..
            }
        ));
    }

    #[test]
    fn other_responses_pass_unchanged() {
        for code in [200, 301, 403, 500] {
            match validate(record(code)) {
                Verdict::Valid(r) => {
                    assert_that!(r).is_equal_to(record(code));
                }
                other => panic!("expected {code} to be valid, got {other:?}"),
            }
        }
    }
}
