//! HTML escaping and timestamp display.

use chrono::{Local, TimeZone};

/// Escapes the five HTML-significant characters.
#[must_use]
pub fn sanitize_html(input: &str) -> String {
    let mut out = String::with_capacity(input.len());
    for c in input.chars() {
        match c {
            '&' => out.push_str("&amp;"),
            '<' => out.push_str("&lt;"),
            '>' => out.push_str("&gt;"),
            '"' => out.push_str("&quot;"),
            '\'' => out.push_str("&#39;"),
            _ => out.push(c),
        }
    }
    out
}

/// Formats a millisecond Unix timestamp as `MM-DD HH:MM` in local time.
#[must_use]
pub fn format_timestamp(timestamp_ms: i64) -> String {
    format_timestamp_in(timestamp_ms, &Local)
}

/// Formats a millisecond Unix timestamp as `MM-DD HH:MM` in `tz`.
///
/// Out-of-range timestamps render as an empty string.
#[must_use]
pub fn format_timestamp_in<Tz>(timestamp_ms: i64, tz: &Tz) -> String
where
    Tz: TimeZone,
    Tz::Offset: std::fmt::Display,
{
    match tz.timestamp_millis_opt(timestamp_ms).single() {
        Some(time) => time.format("%m-%d %H:%M").to_string(),
        None => String::new(),
    }
}
