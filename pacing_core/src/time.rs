//! Time codec: parsing race times typed by a runner and formatting
//! durations and paces back into text.
//!
//! Accepted input forms are `M:SS` and `H:MM:SS`. Seconds are the canonical
//! internal representation; zero never denotes a real duration.

/// Reason a time string was rejected
#[derive(Clone, Debug, PartialEq, Eq, thiserror::Error)]
pub enum TimeParseError {
    #[error("time is required")]
    Empty,

    #[error("use digits and colons only")]
    InvalidCharacters,

    #[error("use M:SS or H:MM:SS")]
    InvalidFormat,

    #[error("invalid number")]
    InvalidNumber,

    #[error("seconds must be 0-59")]
    SecondsOutOfRange,

    #[error("minutes must be 0-59")]
    MinutesOutOfRange,

    #[error("time must be greater than zero")]
    ZeroDuration,
}

/// Parse `M:SS` or `H:MM:SS` into total seconds
///
/// Surrounding whitespace is ignored. In the two-field form the minutes
/// field is unbounded (`75:00` is 4500 seconds); in the three-field form
/// minutes must be below 60.
pub fn parse_time(text: &str) -> Result<u32, TimeParseError> {
    let text = text.trim();
    if text.is_empty() {
        return Err(TimeParseError::Empty);
    }

    if !text.chars().all(|c| c.is_ascii_digit() || c == ':') {
        return Err(TimeParseError::InvalidCharacters);
    }

    let fields: Vec<&str> = text.split(':').collect();
    if fields.len() != 2 && fields.len() != 3 {
        return Err(TimeParseError::InvalidFormat);
    }

    let mut values = Vec::with_capacity(fields.len());
    for field in &fields {
        let value = field
            .parse::<u32>()
            .map_err(|_| TimeParseError::InvalidNumber)?;
        values.push(value);
    }

    let (hours, minutes, seconds) = match values.as_slice() {
        [m, s] => (0, *m, *s),
        [h, m, s] => {
            if *m >= 60 {
                // Seconds are reported first when both fields are out of range
                if *s >= 60 {
                    return Err(TimeParseError::SecondsOutOfRange);
                }
                return Err(TimeParseError::MinutesOutOfRange);
            }
            (*h, *m, *s)
        }
        _ => return Err(TimeParseError::InvalidFormat),
    };

    if seconds >= 60 {
        return Err(TimeParseError::SecondsOutOfRange);
    }

    let total = hours
        .checked_mul(3600)
        .and_then(|h| minutes.checked_mul(60).and_then(|m| h.checked_add(m)))
        .and_then(|hm| hm.checked_add(seconds))
        .ok_or(TimeParseError::InvalidNumber)?;

    if total == 0 {
        return Err(TimeParseError::ZeroDuration);
    }

    Ok(total)
}

/// Best-effort seconds extraction
///
/// Returns 0 for any input `parse_time` rejects. Callers must treat 0 as
/// "do not compute", never as a zero-second race.
#[must_use]
pub fn time_to_seconds(text: &str) -> u32 {
    parse_time(text).unwrap_or(0)
}

/// Format a duration as `H:MM:SS` (one hour or more) or `M:SS`
///
/// The total is rounded to the nearest second before splitting, so a value
/// like 59.6 renders as `1:00` rather than `0:60`. Negative and non-finite
/// inputs render as `0:00`.
#[must_use]
pub fn format_duration(seconds: f64) -> String {
    let total = whole_seconds(seconds);
    let hours = total / 3600;
    let minutes = (total % 3600) / 60;
    let secs = total % 60;

    if hours > 0 {
        format!("{hours}:{minutes:02}:{secs:02}")
    } else {
        format!("{minutes}:{secs:02}")
    }
}

/// Format a pace (seconds per unit distance) as `M:SS`
#[must_use]
pub fn format_pace(seconds_per_unit: f64) -> String {
    let total = whole_seconds(seconds_per_unit);
    format!("{}:{:02}", total / 60, total % 60)
}

/// Format a signed time difference, e.g. `+2:05` or `-0:40`
#[must_use]
pub fn format_delta(seconds: f64) -> String {
    let sign = if seconds.round() < 0.0 { '-' } else { '+' };
    format!("{sign}{}", format_duration(seconds.abs()))
}

#[allow(clippy::cast_possible_truncation, clippy::cast_sign_loss)]
fn whole_seconds(seconds: f64) -> u64 {
    if seconds.is_finite() && seconds > 0.0 {
        seconds.round() as u64
    } else {
        0
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_two_field() {
        assert_eq!(parse_time("20:00"), Ok(1200));
        assert_eq!(parse_time("5:07"), Ok(307));
        assert_eq!(parse_time("75:00"), Ok(4500));
    }

    #[test]
    fn test_parse_three_field() {
        assert_eq!(parse_time("1:40:00"), Ok(6000));
        assert_eq!(parse_time("3:30:00"), Ok(12600));
        assert_eq!(parse_time("0:45:30"), Ok(2730));
    }

    #[test]
    fn test_parse_trims_whitespace() {
        assert_eq!(parse_time("  20:00 \n"), Ok(1200));
    }

    #[test]
    fn test_rejects_empty() {
        assert_eq!(parse_time(""), Err(TimeParseError::Empty));
        assert_eq!(parse_time("   "), Err(TimeParseError::Empty));
    }

    #[test]
    fn test_rejects_bad_characters() {
        assert_eq!(parse_time("20m00"), Err(TimeParseError::InvalidCharacters));
        assert_eq!(parse_time("-5:00"), Err(TimeParseError::InvalidCharacters));
        assert_eq!(parse_time("5:00.5"), Err(TimeParseError::InvalidCharacters));
    }

    #[test]
    fn test_rejects_field_count() {
        assert_eq!(parse_time("1200"), Err(TimeParseError::InvalidFormat));
        assert_eq!(parse_time("1:2:3:4"), Err(TimeParseError::InvalidFormat));
    }

    #[test]
    fn test_rejects_empty_field() {
        assert_eq!(parse_time("5:"), Err(TimeParseError::InvalidNumber));
        assert_eq!(parse_time(":30"), Err(TimeParseError::InvalidNumber));
        assert_eq!(parse_time("1::30"), Err(TimeParseError::InvalidNumber));
    }

    #[test]
    fn test_seconds_range() {
        let err = parse_time("5:75").unwrap_err();
        assert_eq!(err, TimeParseError::SecondsOutOfRange);
        assert_eq!(err.to_string(), "seconds must be 0-59");
        assert_eq!(parse_time("1:00:60"), Err(TimeParseError::SecondsOutOfRange));
    }

    #[test]
    fn test_minutes_range_only_in_three_field_form() {
        assert_eq!(parse_time("1:60:00"), Err(TimeParseError::MinutesOutOfRange));
        assert!(parse_time("60:00").is_ok());
    }

    #[test]
    fn test_zero_duration() {
        assert_eq!(parse_time("0:00"), Err(TimeParseError::ZeroDuration));
        assert_eq!(parse_time("0:00:00"), Err(TimeParseError::ZeroDuration));
        assert_eq!(parse_time("00:00"), Err(TimeParseError::ZeroDuration));
    }

    #[test]
    fn test_messages_are_distinct() {
        let all = [
            TimeParseError::Empty,
            TimeParseError::InvalidCharacters,
            TimeParseError::InvalidFormat,
            TimeParseError::InvalidNumber,
            TimeParseError::SecondsOutOfRange,
            TimeParseError::MinutesOutOfRange,
            TimeParseError::ZeroDuration,
        ];
        let messages: std::collections::HashSet<String> =
            all.iter().map(|e| e.to_string()).collect();
        assert_eq!(messages.len(), all.len());
    }

    #[test]
    fn test_time_to_seconds_defaults_to_zero() {
        assert_eq!(time_to_seconds("20:00"), 1200);
        assert_eq!(time_to_seconds("abc"), 0);
        assert_eq!(time_to_seconds("5:75"), 0);
        assert_eq!(time_to_seconds(""), 0);
    }

    #[test]
    fn test_format_duration() {
        assert_eq!(format_duration(1200.0), "20:00");
        assert_eq!(format_duration(307.0), "5:07");
        assert_eq!(format_duration(3600.0), "1:00:00");
        assert_eq!(format_duration(12_605.0), "3:30:05");
        assert_eq!(format_duration(59.6), "1:00");
        assert_eq!(format_duration(3599.5), "1:00:00");
    }

    #[test]
    fn test_format_duration_degenerate_inputs() {
        assert_eq!(format_duration(-5.0), "0:00");
        assert_eq!(format_duration(f64::NAN), "0:00");
    }

    #[test]
    fn test_format_pace() {
        assert_eq!(format_pace(480.0), "8:00");
        assert_eq!(format_pace(457.4), "7:37");
        assert_eq!(format_pace(419.6), "7:00");
    }

    #[test]
    fn test_format_delta() {
        assert_eq!(format_delta(125.0), "+2:05");
        assert_eq!(format_delta(-40.0), "-0:40");
        assert_eq!(format_delta(0.2), "+0:00");
    }

    #[test]
    fn test_two_field_roundtrip() {
        for text in ["0:01", "4:59", "19:30", "59:59"] {
            let secs = parse_time(text).unwrap();
            assert_eq!(format_duration(f64::from(secs)), text);
            assert_eq!(format_pace(f64::from(secs)), text);
        }
        // Past the hour threshold the duration switches to H:MM:SS
        let secs = parse_time("75:05").unwrap();
        assert_eq!(format_duration(f64::from(secs)), "1:15:05");
        assert_eq!(format_pace(f64::from(secs)), "75:05");
    }
}
