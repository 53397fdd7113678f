//! Conversions between display time strings and whole seconds.

/// Parses a user-entered time string into seconds.
///
/// Accepts `hh:mm:ss`, `mm:ss`, or a bare integer of seconds. Parsing is
/// deliberately soft: unparsable tokens coerce to zero rather than erroring,
/// and an empty string is zero. Negative components pass through so callers
/// can reject a negative total.
pub fn time_to_seconds(time: &str) -> i64 {
    let time = time.trim();
    if time.is_empty() {
        return 0;
    }

    if let Ok(seconds) = time.parse::<i64>() {
        return seconds;
    }

    let parts: Vec<i64> = time
        .split(':')
        .map(|part| part.trim().parse::<i64>().unwrap_or(0))
        .collect();

    match parts.as_slice() {
        [hours, minutes, seconds] => hours * 3600 + minutes * 60 + seconds,
        [minutes, seconds] => minutes * 60 + seconds,
        _ => 0,
    }
}

/// Renders seconds as `mm:ss`, switching to `hh:mm:ss` once the hour
/// component is non-zero. Components are zero-padded to two digits.
pub fn seconds_to_time(seconds: i64) -> String {
    let seconds = seconds.max(0);
    let hours = seconds / 3600;
    let minutes = (seconds % 3600) / 60;
    let secs = seconds % 60;

    if hours > 0 {
        format!("{hours:02}:{minutes:02}:{secs:02}")
    } else {
        format!("{minutes:02}:{secs:02}")
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parses_hours_minutes_seconds() {
        assert_eq!(time_to_seconds("01:02:03"), 3723);
    }

    #[test]
    fn parses_minutes_seconds() {
        assert_eq!(time_to_seconds("05:10"), 310);
        assert_eq!(time_to_seconds("1:15"), 75);
    }

    #[test]
    fn parses_bare_seconds() {
        assert_eq!(time_to_seconds("90"), 90);
        assert_eq!(time_to_seconds("0"), 0);
    }

    #[test]
    fn empty_input_is_zero() {
        assert_eq!(time_to_seconds(""), 0);
        assert_eq!(time_to_seconds("   "), 0);
    }

    #[test]
    fn invalid_tokens_coerce_to_zero() {
        assert_eq!(time_to_seconds("1:xx:03"), 3603);
        assert_eq!(time_to_seconds("abc"), 0);
    }

    #[test]
    fn negative_totals_pass_through() {
        assert_eq!(time_to_seconds("-5"), -5);
        assert_eq!(time_to_seconds("00:-10"), -10);
    }

    #[test]
    fn formats_without_hours() {
        assert_eq!(seconds_to_time(65), "01:05");
        assert_eq!(seconds_to_time(0), "00:00");
        assert_eq!(seconds_to_time(3599), "59:59");
    }

    #[test]
    fn formats_with_hours() {
        assert_eq!(seconds_to_time(3723), "01:02:03");
        assert_eq!(seconds_to_time(3600), "01:00:00");
    }

    #[test]
    fn round_trips_display_values() {
        for seconds in [0, 59, 65, 3599, 3600, 3723, 86399] {
            assert_eq!(time_to_seconds(&seconds_to_time(seconds)), seconds);
        }
    }
}
