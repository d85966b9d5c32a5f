// SPDX-FileCopyrightText: 2026 Modmail Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Slow-mode duration strings such as `1h5m10s`, `90s` or `1.5h`.

use std::time::Duration;

use modmail_core::FormatError;

/// Longest slow mode the platform accepts.
pub const MAX_SLOW_MODE: Duration = Duration::from_secs(6 * 60 * 60);

const UNITS: &[(&str, u128)] = &[
    ("ns", 1),
    ("us", 1_000),
    ("µs", 1_000),
    ("ms", 1_000_000),
    ("s", 1_000_000_000),
    ("m", 60 * 1_000_000_000),
    ("h", 3_600 * 1_000_000_000),
];

/// Parses a sequence of `<number><unit>` pairs.
///
/// A bare `0` is accepted. Signs and empty input are rejected.
pub fn parse_duration(input: &str) -> Result<Duration, FormatError> {
    let invalid = || FormatError::InvalidDuration(input.to_string());

    let s = input.trim();
    if s == "0" {
        return Ok(Duration::ZERO);
    }
    if s.is_empty() {
        return Err(invalid());
    }

    let mut total: u128 = 0;
    let mut rest = s;
    while !rest.is_empty() {
        let number_len = rest
            .find(|c: char| !(c.is_ascii_digit() || c == '.'))
            .unwrap_or(rest.len());
        let (number, tail) = rest.split_at(number_len);
        if number.is_empty() || number == "." {
            return Err(invalid());
        }

        let unit_len = tail
            .find(|c: char| c.is_ascii_digit() || c == '.')
            .unwrap_or(tail.len());
        let (unit, tail) = tail.split_at(unit_len);
        if unit.is_empty() {
            return Err(invalid());
        }
        let scale = UNITS
            .iter()
            .find(|(name, _)| *name == unit)
            .map(|(_, scale)| *scale)
            .ok_or_else(|| FormatError::UnknownDurationUnit {
                unit: unit.to_string(),
                input: input.to_string(),
            })?;

        total = total
            .checked_add(scaled(number, scale).ok_or_else(invalid)?)
            .ok_or_else(|| FormatError::DurationOverflow(input.to_string()))?;
        rest = tail;
    }

    let secs = u64::try_from(total / 1_000_000_000)
        .map_err(|_| FormatError::DurationOverflow(input.to_string()))?;
    // Remainder is below one second, so it always fits.
    let nanos = (total % 1_000_000_000) as u32;
    Ok(Duration::new(secs, nanos))
}

/// Converts `int.frac` in `unit` to nanoseconds without floating point.
fn scaled(number: &str, scale: u128) -> Option<u128> {
    let (int, frac) = match number.split_once('.') {
        Some((int, frac)) => (int, frac),
        None => (number, ""),
    };
    if frac.contains('.') {
        return None;
    }
    let int: u128 = if int.is_empty() { 0 } else { int.parse().ok()? };
    let mut value = int.checked_mul(scale)?;

    let mut divisor: u128 = 1;
    let mut frac_value: u128 = 0;
    for digit in frac.chars() {
        // Digits past nanosecond precision do not change the result.
        if divisor >= 1_000_000_000_000_000_000 {
            break;
        }
        frac_value = frac_value * 10 + u128::from(digit.to_digit(10)?);
        divisor *= 10;
    }
    value = value.checked_add(frac_value * scale / divisor)?;
    Some(value)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parses_compound_duration() {
        assert_eq!(
            parse_duration("1h5m10s").unwrap(),
            Duration::from_secs(3600 + 300 + 10)
        );
    }

    #[test]
    fn parses_single_units() {
        assert_eq!(parse_duration("90s").unwrap(), Duration::from_secs(90));
        assert_eq!(parse_duration("15m").unwrap(), Duration::from_secs(900));
        assert_eq!(parse_duration("250ms").unwrap(), Duration::from_millis(250));
        assert_eq!(parse_duration("3us").unwrap(), Duration::from_micros(3));
        assert_eq!(parse_duration("3µs").unwrap(), Duration::from_micros(3));
        assert_eq!(parse_duration("7ns").unwrap(), Duration::from_nanos(7));
    }

    #[test]
    fn parses_fractions() {
        assert_eq!(parse_duration("1.5h").unwrap(), Duration::from_secs(5400));
        assert_eq!(parse_duration(".5s").unwrap(), Duration::from_millis(500));
    }

    #[test]
    fn parses_bare_zero() {
        assert_eq!(parse_duration("0").unwrap(), Duration::ZERO);
        assert_eq!(parse_duration("0s").unwrap(), Duration::ZERO);
    }

    #[test]
    fn rejects_malformed_input() {
        for input in ["", "h", "10", "-5m", "+5m", "1..5h", "1h 5m", "."] {
            assert!(parse_duration(input).is_err(), "{input:?} should be rejected");
        }
    }

    #[test]
    fn rejects_unknown_unit() {
        assert_eq!(
            parse_duration("3d").unwrap_err(),
            FormatError::UnknownDurationUnit {
                unit: "d".into(),
                input: "3d".into()
            }
        );
    }

    #[test]
    fn rejects_overflow() {
        assert!(matches!(
            parse_duration("99999999999999999999999999999999h"),
            Err(FormatError::InvalidDuration(_)) | Err(FormatError::DurationOverflow(_))
        ));
    }

    #[test]
    fn seven_hours_exceeds_ceiling() {
        assert!(parse_duration("7h").unwrap() > MAX_SLOW_MODE);
        assert_eq!(parse_duration("6h").unwrap(), MAX_SLOW_MODE);
    }
}
