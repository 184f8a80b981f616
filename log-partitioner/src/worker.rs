use chrono::TimeZone;
use tokio::sync::mpsc::{Receiver, Sender};
use tracing::debug;

use crate::{
    datetime::{normalize, with_day},
    models::{Outcome, TrapRecord},
    parser::parse_line,
    validate::{Verdict, validate},
};

const BATCH_SIZE: usize = 4096;

/// Runs one line through parse, validate, normalize and day extraction.
pub fn process_line<Tz: TimeZone>(line: &str, tz: &Tz) -> Outcome {
    let parsed = match parse_line(line) {
        Ok(parsed) => parsed,
        Err(_) => return Outcome::Malformed,
    };
    let valid = match validate(parsed) {
        Verdict::Valid(record) => record,
        Verdict::Trap { record, reason } => return Outcome::Trap(TrapRecord { record, reason }),
    };
    match normalize(valid) {
        Ok(record) => Outcome::Partition(with_day(record, tz)),
        Err((record, reason)) => Outcome::Trap(TrapRecord { record, reason }),
    }
}

pub async fn worker_loop<Tz: TimeZone>(
    tx: Sender<Vec<Outcome>>,
    mut rx: Receiver<Vec<String>>,
    tz: Tz,
) {
    let mut buffer = Vec::with_capacity(BATCH_SIZE);
    let mut line_no = 0usize;
    let mut trapped = 0usize;
    while let Some(chunk) = rx.recv().await {
        for line in chunk {
            line_no += 1;
            let outcome = process_line(&line, &tz);
            match &outcome {
                Outcome::Malformed => debug!(line = line_no, "skipping malformed line"),
                Outcome::Trap(trap) => {
                    trapped += 1;
                    debug!(
                        line = line_no,
                        trap_row = trapped,
                        response = trap.record.response,
                        reason = %trap.reason,
                        "trapped record"
                    );
                }
                Outcome::Partition(_) => {}
            }
            buffer.push(outcome);
            if buffer.len() >= BATCH_SIZE && tx.send(buffer.split_off(0)).await.is_err() {
                return;
            }
        }
    }
    if !buffer.is_empty() {
        tx.send(buffer).await.ok();
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::RecordError;
    use chrono::Utc;
    use tokio::sync::mpsc;

    const OK_LINE: &str =
        r#"127.0.0.1 - - [01/Aug/1995:00:00:01 -0400] "GET /index.html HTTP/1.0" 200 1234"#;
    const NOT_FOUND_LINE: &str =
        r#"127.0.0.1 - - [01/Aug/1995:00:00:02 -0400] "GET /missing.html HTTP/1.0" 404 -"#;
    const BAD_DATE_LINE: &str =
        r#"127.0.0.1 - - [01/Xyz/1995:00:00:03 -0400] "GET /index.html HTTP/1.0" 200 10"#;

    #[test]
    fn valid_line_reaches_a_partition() {
        match process_line(OK_LINE, &Utc) {
            Outcome::Partition(r) => {
                assert_eq!(u8::from(r.day), 1);
                assert_eq!(r.record.ip, "127.0.0.1");
                assert_eq!(r.record.time.timestamp_millis(), 807_249_601_000);
            }
            other => panic!("unexpected {other:?}"),
        }
    }

    #[test]
    fn not_found_and_bad_dates_are_trapped() {
        let Outcome::Trap(not_found) = process_line(NOT_FOUND_LINE, &Utc) else {
            panic!("404 should be trapped");
        };
        assert!(matches!(not_found.reason, RecordError::Validation(404)));
        assert_eq!(not_found.record.response, 404);

        let Outcome::Trap(bad_date) = process_line(BAD_DATE_LINE, &Utc) else {
            panic!("bad timestamp should be trapped");
        };
        assert!(matches!(bad_date.reason, RecordError::DateParse { .. }));
        assert_eq!(bad_date.record.response, 200);
        assert!(bad_date.reason.to_string().contains("01/Xyz/1995:00:00:03 -0400"));
        assert_ne!(not_found.reason.to_string(), bad_date.reason.to_string());
    }

    #[test]
    fn empty_line_is_malformed() {
        assert!(matches!(process_line("", &Utc), Outcome::Malformed));
    }

    #[tokio::test]
    async fn worker_flushes_remainder_when_input_closes() {
        let (line_tx, line_rx) = mpsc::channel(4);
        let (out_tx, mut out_rx) = mpsc::channel(4);
        let handle = tokio::spawn(worker_loop(out_tx, line_rx, Utc));

        line_tx
            .send(vec![OK_LINE.into(), String::new(), NOT_FOUND_LINE.into()])
            .await
            .unwrap();
        drop(line_tx);
        handle.await.unwrap();

        let batch = out_rx.recv().await.unwrap();
        assert_eq!(batch.len(), 3);
        assert!(matches!(batch[0], Outcome::Partition(_)));
        assert!(matches!(batch[1], Outcome::Malformed));
        assert!(matches!(batch[2], Outcome::Trap(_)));
        assert!(out_rx.recv().await.is_none());
    }
}
