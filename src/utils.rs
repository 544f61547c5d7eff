use chrono::{DateTime, NaiveDate, NaiveDateTime, Utc};

use crate::model::{Price, TradeDate};

const DATE_FORMATS: &[&str] = &[
    "%Y-%m-%d",
    "%Y/%m/%d",
    "%m/%d/%Y",
    "%B %d, %Y",
    "%B %d %Y",
    "%d %B %Y",
    "%d-%B-%Y",
    "%a %B %d %Y",
];

const OFFSET_FORMATS: &[&str] = &["%Y-%m-%dT%H:%M:%S%.f%z", "%Y-%m-%d %H:%M:%S%.f%z"];

const DATETIME_FORMATS: &[&str] = &[
    "%Y-%m-%dT%H:%M:%S%.f",
    "%Y-%m-%d %H:%M:%S%.f",
    "%Y-%m-%dT%H:%M",
    "%Y-%m-%d %H:%M",
];

/// Reads a date cell into a calendar date. Offsets are folded into UTC before
/// the date is taken; everything else is read as a plain calendar date with
/// no timezone, so month lookups never shift.
pub fn parse_trade_date(raw: &str) -> TradeDate {
    let s = raw.trim();

    if let Some(date) = DATE_FORMATS
        .iter()
        .find_map(|fmt| NaiveDate::parse_from_str(s, fmt).ok())
    {
        return TradeDate::Valid(date);
    }

    if let Some(dt) = DateTime::parse_from_rfc3339(s)
        .ok()
        .or_else(|| {
            OFFSET_FORMATS
                .iter()
                .find_map(|fmt| DateTime::parse_from_str(s, fmt).ok())
        })
        .or_else(|| DateTime::parse_from_rfc2822(s).ok())
    {
        return TradeDate::Valid(dt.with_timezone(&Utc).date_naive());
    }

    match DATETIME_FORMATS
        .iter()
        .find_map(|fmt| NaiveDateTime::parse_from_str(s, fmt).ok())
    {
        Some(dt) => TradeDate::Valid(dt.date()),
        None => TradeDate::Invalid,
    }
}

/// Lenient price parsing: leading whitespace is skipped and the longest
/// decimal prefix is taken (`"12.5abc"` is 12.5, `"1,234"` is 1). Anything
/// without a numeric prefix is NaN.
pub fn parse_price(raw: &str) -> Price {
    let s = raw.trim_start();
    let unsigned = s.strip_prefix(['+', '-']).unwrap_or(s);

    if unsigned.starts_with("Infinity") {
        return if s.starts_with('-') {
            Price::NEG_INFINITY
        } else {
            Price::INFINITY
        };
    }

    numeric_prefix(s).parse().unwrap_or(Price::NAN)
}

fn numeric_prefix(s: &str) -> &str {
    let bytes = s.as_bytes();
    let digits_from = |mut ix: usize| {
        while ix < bytes.len() && bytes[ix].is_ascii_digit() {
            ix += 1;
        }
        ix
    };

    let start = match bytes.first() {
        Some(b'+' | b'-') => 1,
        _ => 0,
    };

    let mut end = digits_from(start);
    let mut digits = end - start;

    if bytes.get(end) == Some(&b'.') {
        let frac_end = digits_from(end + 1);
        digits += frac_end - (end + 1);
        if digits > 0 {
            end = frac_end;
        }
    }

    if digits == 0 {
        return "";
    }

    if matches!(bytes.get(end), Some(b'e' | b'E')) {
        let exp_start = match bytes.get(end + 1) {
            Some(b'+' | b'-') => end + 2,
            _ => end + 1,
        };
        let exp_end = digits_from(exp_start);
        if exp_end > exp_start {
            end = exp_end;
        }
    }

    &s[..end]
}
