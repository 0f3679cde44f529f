/*!
 * Time-string conversion for subtitle headers.
 *
 * Subtitle files in the wild are loose about their timestamps: hours may have
 * one digit or many, the decimal separator may be a comma or a period, and
 * the fraction may carry stray characters. Parsing normalizes all of that
 * into a `Duration`; formatting always emits the canonical `HH:MM:SS,mmm`.
 */

use std::time::Duration;

use crate::errors::TimeFormatError;

/// Separator between the start and end time of a header line
pub const RANGE_SEPARATOR: &str = "-->";

/// Raw characters of the seconds field that are considered
const MAX_SECONDS_CHARS: usize = 6;

const MICROS_PER_SECOND: f64 = 1_000_000.0;

/// Parse a loosely formatted `H:MM:SS.fraction` string into a duration.
///
/// Whitespace is ignored and a comma is accepted as the decimal separator.
/// Fields after the third are ignored. The seconds field is cut to its first
/// six characters and reduced to digits plus the first decimal point, so
/// `"01,5x0"` reads as `1.50`.
pub fn parse_time_string(text: &str) -> Result<Duration, TimeFormatError> {
    let normalized: String = text
        .chars()
        .filter(|c| !c.is_whitespace())
        .map(|c| if c == ',' { '.' } else { c })
        .collect();

    let fields: Vec<&str> = normalized.split(':').collect();
    if fields.len() < 3 {
        return Err(TimeFormatError::MissingFields {
            value: normalized.clone(),
            found: fields.len(),
        });
    }

    let hours = parse_field("hours", fields[0])?;
    let minutes = parse_field("minutes", fields[1])?;
    let seconds = parse_field("seconds", &sanitize_seconds(fields[2]))?;

    let total_micros = ((hours * 3600.0 + minutes * 60.0 + seconds) * MICROS_PER_SECOND).round();
    if !total_micros.is_finite() || total_micros >= u64::MAX as f64 {
        return Err(TimeFormatError::OutOfRange(normalized));
    }

    Ok(Duration::from_micros(total_micros as u64))
}

/// Parse a `start --> end` header line into its two durations.
///
/// Only the first two segments around `-->` are read.
pub fn parse_time_range(line: &str) -> Result<(Duration, Duration), TimeFormatError> {
    let compact: String = line.chars().filter(|c| !c.is_whitespace()).collect();
    let mut segments = compact.split(RANGE_SEPARATOR);

    // split always yields at least one segment
    let start = parse_time_string(segments.next().unwrap_or_default())?;
    let end = match segments.next() {
        Some(segment) => parse_time_string(segment)?,
        None => return Err(TimeFormatError::MissingSeparator(compact)),
    };

    Ok((start, end))
}

/// Format a duration as `HH:MM:SS,mmm`.
///
/// Sub-millisecond precision is truncated. Hours widen past two digits when
/// needed.
pub fn format_duration(duration: Duration) -> String {
    let ms = duration.as_millis();
    let hours = ms / 3_600_000;
    let minutes = (ms % 3_600_000) / 60_000;
    let seconds = (ms % 60_000) / 1_000;
    let millis = ms % 1_000;

    format!("{:02}:{:02}:{:02},{:03}", hours, minutes, seconds, millis)
}

fn parse_field(field: &'static str, value: &str) -> Result<f64, TimeFormatError> {
    let invalid = || TimeFormatError::InvalidNumber {
        field,
        value: value.to_string(),
    };

    let number: f64 = value.parse().map_err(|_| invalid())?;
    if !number.is_finite() || number < 0.0 {
        return Err(invalid());
    }
    Ok(number)
}

// Keeps digits and the first '.', drops everything else
fn sanitize_seconds(raw: &str) -> String {
    let mut clean = String::with_capacity(MAX_SECONDS_CHARS);
    let mut found_dot = false;

    for ch in raw.chars().take(MAX_SECONDS_CHARS) {
        if ch.is_ascii_digit() {
            clean.push(ch);
        } else if ch == '.' && !found_dot {
            found_dot = true;
            clean.push(ch);
        }
    }

    clean
}
