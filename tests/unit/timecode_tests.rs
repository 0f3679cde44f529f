/*!
 * Tests for time-string parsing and formatting
 */

use std::time::Duration;
use subcleaner::errors::TimeFormatError;
use subcleaner::timecode::{format_duration, parse_time_range, parse_time_string};

#[test]
fn test_parse_time_string_withCanonicalTimestamp_shouldParse() {
    assert_eq!(parse_time_string("01:23:45,678").unwrap(), Duration::from_millis(5_025_678));
    assert_eq!(parse_time_string("01:23:45.678").unwrap(), Duration::from_millis(5_025_678));
}

#[test]
fn test_parse_time_string_withShortHoursAndFraction_shouldParse() {
    assert_eq!(parse_time_string("1:02:03.5").unwrap(), Duration::from_millis(3_723_500));
    assert_eq!(parse_time_string("0:00:07").unwrap(), Duration::from_secs(7));
}

#[test]
fn test_parse_time_string_withEmbeddedWhitespace_shouldIgnoreIt() {
    assert_eq!(parse_time_string(" 00 : 00 : 01 , 250 ").unwrap(), Duration::from_millis(1250));
}

#[test]
fn test_parse_time_string_withLongFraction_shouldTruncateSecondsField() {
    // only "01.234" of the seconds field is read
    assert_eq!(parse_time_string("00:00:01.2345678").unwrap(), Duration::from_millis(1234));
}

#[test]
fn test_parse_time_string_withNoisySeconds_shouldSanitize() {
    assert_eq!(parse_time_string("00:00:01,5x0").unwrap(), Duration::from_millis(1500));
    assert_eq!(parse_time_string("00:00:1.2.3").unwrap(), Duration::from_millis(1230));
}

#[test]
fn test_parse_time_string_withDecimalMinutes_shouldCombine() {
    assert_eq!(parse_time_string("0:1.5:0").unwrap(), Duration::from_secs(90));
}

#[test]
fn test_parse_time_string_withExtraFields_shouldIgnoreThem() {
    assert_eq!(parse_time_string("00:00:02:99").unwrap(), Duration::from_secs(2));
}

#[test]
fn test_parse_time_string_withTooFewFields_shouldFail() {
    let err = parse_time_string("00:01").unwrap_err();
    assert_eq!(err, TimeFormatError::MissingFields { value: "00:01".to_string(), found: 2 });
}

#[test]
fn test_parse_time_string_withNonNumericHours_shouldFail() {
    let err = parse_time_string("aa:00:01").unwrap_err();
    assert_eq!(err, TimeFormatError::InvalidNumber { field: "hours", value: "aa".to_string() });
}

#[test]
fn test_parse_time_string_withNegativeMinutes_shouldFail() {
    assert!(matches!(
        parse_time_string("00:-1:00").unwrap_err(),
        TimeFormatError::InvalidNumber { field: "minutes", .. }
    ));
}

#[test]
fn test_parse_time_string_withNoDigitsInSeconds_shouldFail() {
    assert!(matches!(
        parse_time_string("1:2:x").unwrap_err(),
        TimeFormatError::InvalidNumber { field: "seconds", .. }
    ));
}

#[test]
fn test_format_duration_withVariousDurations_shouldPadToFixedWidth() {
    assert_eq!(format_duration(Duration::ZERO), "00:00:00,000");
    assert_eq!(format_duration(Duration::from_millis(5_025_678)), "01:23:45,678");
    assert_eq!(format_duration(Duration::from_secs(61)), "00:01:01,000");
    assert_eq!(format_duration(Duration::from_secs(100 * 3600)), "100:00:00,000");
}

#[test]
fn test_format_duration_withMicroseconds_shouldTruncateToMillis() {
    assert_eq!(format_duration(Duration::from_micros(1_999_999)), "00:00:01,999");
}

#[test]
fn test_format_then_parse_withWholeMilliseconds_shouldRoundTrip() {
    let samples_ms: [u64; 7] = [0, 1, 999, 1_000, 61_001, 5_025_678, 359_999_999];
    for ms in samples_ms {
        let duration = Duration::from_millis(ms);
        assert_eq!(parse_time_string(&format_duration(duration)).unwrap(), duration, "{} ms", ms);
    }
}

#[test]
fn test_parse_time_range_withValidLine_shouldReturnBothEnds() {
    let (start, end) = parse_time_range("00:00:01,000 --> 00:00:02,500").unwrap();
    assert_eq!(start, Duration::from_secs(1));
    assert_eq!(end, Duration::from_millis(2500));
}

#[test]
fn test_parse_time_range_withoutSeparator_shouldFail() {
    assert!(matches!(
        parse_time_range("00:00:01,000").unwrap_err(),
        TimeFormatError::MissingSeparator(_)
    ));
}

#[test]
fn test_parse_time_range_withExtraSegments_shouldReadFirstTwo() {
    let (start, end) = parse_time_range("0:0:1 --> 0:0:2 --> garbage").unwrap();
    assert_eq!(start, Duration::from_secs(1));
    assert_eq!(end, Duration::from_secs(2));
}
