//! Effective-date extraction.
//!
//! Articles are often published weeks after the event they describe, so a
//! year/month written in the summary ("2024年3月活动") takes priority over the
//! publish timestamp.

use std::sync::OnceLock;

use chrono::{DateTime, NaiveDate, NaiveDateTime};
use regex::Regex;

/// Years accepted from summary text.
const SUMMARY_YEAR_MIN: i32 = 2020;
const SUMMARY_YEAR_MAX: i32 = 2026;

static SUMMARY_DATE_RE: OnceLock<Regex> = OnceLock::new();

fn summary_date_re() -> &'static Regex {
    SUMMARY_DATE_RE.get_or_init(|| {
        // A literal pattern; failing to compile is a programming error.
        Regex::new(r"(\d{4})[年\-](\d{1,2})").unwrap()
    })
}

/// Pick the effective date of an article.
///
/// Returns the first-of-month date embedded in `summary` when present and
/// plausible, else the parsed `publish_time`, else `None`.
pub fn extract_date(publish_time: Option<&str>, summary: Option<&str>) -> Option<NaiveDateTime> {
    summary_date(summary.unwrap_or("")).or_else(|| publish_time.and_then(parse_timestamp))
}

/// Year/month from the first `YYYY年M` or `YYYY-M` match in `summary`.
///
/// Only the first match is considered; if it is out of range the summary
/// yields nothing even when a later match would be valid.
pub fn summary_date(summary: &str) -> Option<NaiveDateTime> {
    let caps = summary_date_re().captures(summary)?;
    let year: i32 = ascii_digits(caps.get(1)?.as_str()).parse().ok()?;
    let month: u32 = ascii_digits(caps.get(2)?.as_str()).parse().ok()?;

    if !(SUMMARY_YEAR_MIN..=SUMMARY_YEAR_MAX).contains(&year) || !(1..=12).contains(&month) {
        return None;
    }

    NaiveDate::from_ymd_opt(year, month, 1)?.and_hms_opt(0, 0, 0)
}

/// `\d` is Unicode-aware, so full-width digits (`２０２４`) match the summary
/// pattern but `str::parse` only accepts ASCII.
fn ascii_digits(s: &str) -> String {
    s.chars()
        .map(|c| match c {
            '\u{ff10}'..='\u{ff19}' => char::from(b'0' + (c as u32 - 0xff10) as u8),
            _ => c,
        })
        .collect()
}

/// Parse a publish-time cell.
///
/// Accepts RFC 3339 (offset dropped, wall-clock kept) and a small set of
/// common spreadsheet exports. Anything else, including `nan`/`NaT`
/// placeholders, is `None`.
pub fn parse_timestamp(s: &str) -> Option<NaiveDateTime> {
    let s = s.trim();
    if s.is_empty() {
        return None;
    }

    if let Ok(dt) = DateTime::parse_from_rfc3339(s) {
        return Some(dt.naive_local());
    }

    const DATETIME_FMTS: [&str; 12] = [
        "%Y-%m-%d %H:%M:%S",
        "%Y-%m-%d %H:%M:%S%.f",
        "%Y-%m-%dT%H:%M:%S",
        "%Y-%m-%dT%H:%M:%S%.f",
        "%Y-%m-%d %H:%M",
        "%Y-%m-%dT%H:%M",
        "%Y/%m/%d %H:%M:%S",
        "%Y/%m/%d %H:%M",
        "%Y.%m.%d %H:%M:%S",
        "%Y.%m.%d %H:%M",
        "%Y年%m月%d日 %H:%M:%S",
        "%Y年%m月%d日 %H:%M",
    ];
    for fmt in DATETIME_FMTS {
        if let Ok(dt) = NaiveDateTime::parse_from_str(s, fmt) {
            return Some(dt);
        }
    }

    const DATE_FMTS: [&str; 4] = ["%Y-%m-%d", "%Y/%m/%d", "%Y.%m.%d", "%Y年%m月%d日"];
    for fmt in DATE_FMTS {
        if let Ok(d) = NaiveDate::parse_from_str(s, fmt) {
            return d.and_hms_opt(0, 0, 0);
        }
    }

    None
}
