use chrono::{DateTime, Duration, FixedOffset, NaiveDate};
use rand::{Rng, seq::IndexedRandom};

const METHODS: [(&str, u8); 3] = [("GET", 8), ("POST", 1), ("HEAD", 1)];
const PATHS: [(&str, u8); 6] = [
    ("/", 10),
    ("/history/apollo/", 10),
    ("/shuttle/countdown/", 50),
    ("/images/NASA-logosmall.gif", 40),
    ("/shuttle/missions/sts-70/mission-sts-70.html", 20),
    ("/facts/about_ksc.html", 10),
];
const STATUS: [(u16, u8); 5] = [(200, 80), (304, 10), (302, 3), (404, 6), (500, 1)];
const HOSTS: [&str; 5] = [
    "in24.inetnebr.com",
    "uplherc.upl.com",
    "piweba4y.prodigy.com",
    "ix-orl2-01.ix.netcom.com",
    "unicomp6.unicomp.net",
];
const MALFORMED: [&str; 3] = [
    "",
    "-- log rotated --",
    r#"kiosk.example.com - - [01/Aug/1995:00:00:01] "GET / HTTP/1.0" 200 10"#,
];

/// Writes log lines whose timestamps advance evenly across a span of days,
/// in the server's local offset.
pub struct LogGenerator {
    start: DateTime<FixedOffset>,
    step: Duration,
    emitted: i32,
    malformed_ratio: f64,
}

impl LogGenerator {
    pub fn new(start: NaiveDate, days: u32, lines: usize, malformed_ratio: f64) -> Option<Self> {
        if !(0.0..=1.0).contains(&malformed_ratio) {
            return None;
        }
        let offset = FixedOffset::west_opt(4 * 3600)?;
        let start = start.and_hms_opt(0, 0, 0)?.and_local_timezone(offset).single()?;
        let span = Duration::try_days(i64::from(days))?;
        start.checked_add_signed(span)?;
        let step = span / i32::try_from(lines.max(1)).ok()?;
        Some(Self {
            start,
            step,
            emitted: 0,
            malformed_ratio,
        })
    }

    /// `None` once the next timestamp is past what chrono can represent.
    pub fn next_line<R: Rng + ?Sized>(&mut self, rng: &mut R) -> Option<String> {
        let offset = self.step.checked_mul(self.emitted)?;
        let timestamp = self.start.checked_add_signed(offset)?;
        self.emitted = self.emitted.checked_add(1)?;
        if rng.random_bool(self.malformed_ratio) {
            return Some(MALFORMED.choose(rng).copied().unwrap_or_default().to_string());
        }
        Some(apache_line(rng, timestamp))
    }
}

pub fn apache_line<R: Rng + ?Sized>(rng: &mut R, timestamp: DateTime<FixedOffset>) -> String {
    let host = if rng.random_bool(0.5) {
        HOSTS.choose(rng).copied().unwrap_or("localhost").to_string()
    } else {
        format!(
            "192.168.{}.{}",
            rng.random_range(0..256),
            rng.random_range(0..256)
        )
    };
    let timestamp = timestamp.format("%d/%b/%Y:%H:%M:%S %z");
    let method = pick(&METHODS, rng, "GET");
    let path = pick(&PATHS, rng, "/");
    let status = pick(&STATUS, rng, 200);
    let size = if status == 304 || rng.random_bool(0.05) {
        "-".to_string()
    } else {
        rng.random_range(100..20_000).to_string()
    };

    format!("{host} - - [{timestamp}] \"{method} {path} HTTP/1.0\" {status} {size}")
}

fn pick<T: Copy, R: Rng + ?Sized>(table: &[(T, u8)], rng: &mut R, fallback: T) -> T {
    table
        .choose_weighted(rng, |(_, w)| *w)
        .map(|(v, _)| *v)
        .unwrap_or(fallback)
}
