//! Time codec for split entry and display.
//!
//! Times are typed as cumulative shorthand digits and read right to left:
//! the last two digits are seconds and anything before them is minutes.
//! Display uses `M:SS.f` for whole seconds and `M:SS.ff` otherwise.
//!
//! | input    | seconds |
//! |----------|---------|
//! | `45`     | 45      |
//! | `130`    | 90      |
//! | `1245`   | 765     |
//! | `75.5`   | 75.5    |
//!
//! Parsing and formatting are independent conventions, not inverses:
//! `format_time(parse_time("130")?)` is `"1:30.0"`, but `"1:30.0"` is not
//! accepted as input.

use crate::{LedgerError, Result};

/// Marker shown in place of a time that has not been recorded yet.
pub const NO_TIME: &str = "---";

/// Parse a shorthand time string into seconds.
///
/// A string with a decimal point is a literal number of seconds. Otherwise it
/// must be all digits; after leading zeros are dropped, one or two digits are
/// seconds and longer strings split into minutes and the final two digits.
/// The seconds part is not range-checked, so `"199"` is 1:99, i.e. 159 seconds.
/// A leading `+` and `_` separators between digits are accepted, so `"+1_000"`
/// is 10:00.
///
/// # Errors
///
/// Returns [`LedgerError::InvalidTime`] for empty, non-numeric, negative or
/// non-finite input, and for digit strings too large to represent.
///
/// ```rust
/// use splitbook::codec::parse_time;
///
/// assert_eq!(parse_time("1245").unwrap(), 765.0);
/// assert!(parse_time("abc").is_err());
/// ```
pub fn parse_time(input: &str) -> Result<f64> {
    let normalized = strip_digit_separators(input.trim()).ok_or_else(|| LedgerError::invalid_time(input))?;

    if normalized.contains('.') {
        let seconds: f64 = normalized.parse().map_err(|_| LedgerError::invalid_time(input))?;
        if !seconds.is_finite() || seconds < 0.0 {
            return Err(LedgerError::invalid_time(input));
        }
        return Ok(seconds);
    }

    let unsigned = normalized.strip_prefix('+').unwrap_or(&normalized);
    if unsigned.is_empty() || !unsigned.bytes().all(|b| b.is_ascii_digit()) {
        return Err(LedgerError::invalid_time(input));
    }

    let digits = unsigned.trim_start_matches('0');
    let digits = if digits.is_empty() { "0" } else { digits };

    let number = |part: &str| part.parse::<u64>().map_err(|_| LedgerError::invalid_time(input));

    let seconds = if digits.len() <= 2 {
        number(digits)?
    } else {
        let (minutes, seconds) = digits.split_at(digits.len() - 2);
        number(minutes)?
            .checked_mul(60)
            .and_then(|m| m.checked_add(number(seconds).ok()?))
            .ok_or_else(|| LedgerError::invalid_time(input))?
    };

    Ok(seconds as f64)
}

/// Remove `_` digit separators, or `None` if one is not between two digits.
fn strip_digit_separators(text: &str) -> Option<String> {
    let bytes = text.as_bytes();
    let well_placed = bytes.iter().enumerate().filter(|(_, b)| **b == b'_').all(|(i, _)| {
        i > 0 && bytes[i - 1].is_ascii_digit() && bytes.get(i + 1).is_some_and(u8::is_ascii_digit)
    });
    well_placed.then(|| text.replace('_', ""))
}

/// Parse a shorthand time string, reading anything unparseable as zero.
///
/// This keeps the forgiving behavior of typed data entry where a stray
/// keystroke should never crash the flow. [`crate::RunLedger`] uses the
/// strict [`parse_time`] so a typo cannot record a zero-time stage.
pub fn parse_time_lenient(input: &str) -> f64 {
    parse_time(input).unwrap_or(0.0)
}

/// Format seconds as `M:SS.f` (whole seconds) or `M:SS.ff`.
///
/// Positive infinity and NaN render as [`NO_TIME`]; negative values are the
/// formatted magnitude with a leading `-`.
///
/// ```rust
/// use splitbook::codec::format_time;
///
/// assert_eq!(format_time(765.5), "12:45.5");
/// assert_eq!(format_time(-5.0), "-0:05.0");
/// assert_eq!(format_time(f64::INFINITY), "---");
/// ```
pub fn format_time(seconds: f64) -> String {
    if seconds.is_nan() || seconds == f64::INFINITY {
        return NO_TIME.to_string();
    }
    if seconds < 0.0 {
        return format!("-{}", format_time(-seconds));
    }

    let rounded = (seconds * 100.0).round() / 100.0;
    let minutes = (rounded / 60.0).floor() as u64;
    let remainder = rounded % 60.0;

    let secs = if remainder == remainder.trunc() {
        format!("{:04.1}", remainder)
    } else {
        format!("{:05.2}", remainder)
    };

    format!("{}:{}", minutes, secs)
}

/// Format an optional record time, rendering a missing record as [`NO_TIME`].
pub fn format_record(seconds: Option<f64>) -> String {
    seconds.map(format_time).unwrap_or_else(|| NO_TIME.to_string())
}

/// Format a signed difference against a reference time, e.g. `+0:01.5`.
pub fn format_delta(delta: f64) -> String {
    if delta < 0.0 {
        format!("-{}", format_time(-delta))
    } else {
        format!("+{}", format_time(delta))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use proptest::prelude::*;

    #[test]
    fn parse_reference_table() {
        assert_eq!(parse_time("45").unwrap(), 45.0);
        assert_eq!(parse_time("130").unwrap(), 90.0);
        assert_eq!(parse_time("1245").unwrap(), 765.0);
        assert_eq!(parse_time("75.5").unwrap(), 75.5);
        assert_eq!(parse_time_lenient("abc"), 0.0);
    }

    #[test]
    fn parse_rejects_garbage_strictly() {
        for input in ["abc", "", "   ", "12a", "1:30", "-130", "-1.5", ".", "inf", "+", "++45", "_1", "1_", "1__0", "1_.5"] {
            assert!(
                matches!(parse_time(input), Err(LedgerError::InvalidTime { .. })),
                "expected InvalidTime for {input:?}"
            );
        }
    }

    #[test]
    fn parse_lenient_reads_garbage_as_zero() {
        assert_eq!(parse_time_lenient(""), 0.0);
        assert_eq!(parse_time_lenient("1:30"), 0.0);
        assert_eq!(parse_time_lenient("130"), 90.0);
    }

    #[test]
    fn parse_drops_leading_zeros_before_counting_digits() {
        assert_eq!(parse_time("0045").unwrap(), 45.0);
        assert_eq!(parse_time("0130").unwrap(), 90.0);
        assert_eq!(parse_time("0").unwrap(), 0.0);
        assert_eq!(parse_time("000").unwrap(), 0.0);
    }

    #[test]
    fn parse_accepts_sign_and_digit_separators() {
        assert_eq!(parse_time("+45").unwrap(), 45.0);
        assert_eq!(parse_time("1_000").unwrap(), 600.0);
        assert_eq!(parse_time("+1_30").unwrap(), 90.0);
        assert_eq!(parse_time("7_5.5").unwrap(), 75.5);
        assert_eq!(parse_time("+75.5").unwrap(), 75.5);
        assert_eq!(parse_time_lenient("+45"), 45.0);
    }

    #[test]
    fn parse_does_not_range_check_seconds() {
        assert_eq!(parse_time("199").unwrap(), 159.0);
        assert_eq!(parse_time("99").unwrap(), 99.0);
    }

    #[test]
    fn parse_decimal_forms() {
        assert_eq!(parse_time(" 75.5 ").unwrap(), 75.5);
        assert_eq!(parse_time(".5").unwrap(), 0.5);
        assert_eq!(parse_time("130.").unwrap(), 130.0);
    }

    #[test]
    fn parse_overflow_is_an_error() {
        assert!(parse_time("99999999999999999999999").is_err());
    }

    #[test]
    fn format_reference_table() {
        assert_eq!(format_time(0.0), "0:00.0");
        assert_eq!(format_time(90.0), "1:30.0");
        assert_eq!(format_time(765.5), "12:45.5");
        assert_eq!(format_time(f64::INFINITY), "---");
        assert_eq!(format_time(-5.0), "-0:05.0");
    }

    #[test]
    fn format_uses_two_decimals_when_needed() {
        assert_eq!(format_time(75.55), "1:15.55");
        assert_eq!(format_time(5.25), "0:05.25");
        assert_eq!(format_time(59.999), "1:00.0");
    }

    #[test]
    fn format_record_and_delta() {
        assert_eq!(format_record(None), NO_TIME);
        assert_eq!(format_record(Some(90.0)), "1:30.0");
        assert_eq!(format_delta(1.5), "+0:01.5");
        assert_eq!(format_delta(-0.25), "-0:00.25");
        assert_eq!(format_delta(0.0), "+0:00.0");
    }

    proptest! {
        #[test]
        fn prop_digit_shorthand_reads_minutes_then_seconds(
            minutes in 0u64..10_000,
            seconds in 0u64..100
        ) {
            let input = format!("{}{:02}", minutes, seconds);
            let parsed = parse_time(&input).unwrap();
            prop_assert_eq!(parsed, (minutes * 60 + seconds) as f64);
        }

        #[test]
        fn prop_short_inputs_are_plain_seconds(seconds in 0u64..100) {
            prop_assert_eq!(parse_time(&seconds.to_string()).unwrap(), seconds as f64);
        }

        #[test]
        fn prop_format_has_minute_and_padded_second_fields(centis in 0u64..1_000_000) {
            let seconds = centis as f64 / 100.0;
            let formatted = format_time(seconds);
            let (minutes, rest) = formatted.split_once(':').unwrap();
            prop_assert!(minutes.parse::<u64>().is_ok());
            let (whole, frac) = rest.split_once('.').unwrap();
            prop_assert_eq!(whole.len(), 2);
            prop_assert!(frac.len() == 1 || frac.len() == 2);
        }

        #[test]
        fn prop_negative_format_mirrors_positive(centis in 1u64..1_000_000) {
            let seconds = centis as f64 / 100.0;
            prop_assert_eq!(format_time(-seconds), format!("-{}", format_time(seconds)));
        }
    }
}
