//! Compound duration expressions: `300ms`, `5s`, `1h30m`, `1.5h`.
//!
//! A duration is a sequence of `<number>[.<fraction>]<unit>` terms, summed.
//! Units: `ns`, `us` (also `µs`/`μs`), `ms`, `s`, `m`, `h`. A bare `0` is zero.
//! A leading `+` is accepted. A leading `-` is only valid for a zero duration,
//! since [`Duration`] cannot be negative.

use std::time::Duration;

use thiserror::Error;

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum DurationError {
    #[error("invalid duration syntax")]
    Invalid,
    #[error("missing unit in duration")]
    MissingUnit,
    #[error("unknown unit {0:?} in duration")]
    UnknownUnit(String),
    #[error("negative durations are not supported")]
    Negative,
    #[error("duration out of range")]
    Overflow,
}

const NANOS_PER_UNIT: &[(&str, u128)] = &[
    ("ns", 1),
    ("us", 1_000),
    ("µs", 1_000),
    ("μs", 1_000),
    ("ms", 1_000_000),
    ("s", 1_000_000_000),
    ("m", 60_000_000_000),
    ("h", 3_600_000_000_000),
];

pub fn parse_duration(input: &str) -> Result<Duration, DurationError> {
    let (negative, mut rest) = match input.as_bytes().first() {
        Some(b'-') => (true, &input[1..]),
        Some(b'+') => (false, &input[1..]),
        _ => (false, input),
    };

    if rest == "0" {
        return Ok(Duration::ZERO);
    }
    if rest.is_empty() {
        return Err(DurationError::Invalid);
    }

    let mut total: u128 = 0;
    while !rest.is_empty() {
        let (term, after) = parse_term(rest)?;
        total = total.checked_add(term).ok_or(DurationError::Overflow)?;
        rest = after;
    }

    if negative && total != 0 {
        return Err(DurationError::Negative);
    }
    let nanos = u64::try_from(total).map_err(|_| DurationError::Overflow)?;
    Ok(Duration::from_nanos(nanos))
}

/// Parse one `<number><unit>` term, returning its length in nanoseconds and
/// the unconsumed remainder.
fn parse_term(s: &str) -> Result<(u128, &str), DurationError> {
    let int_len = s.bytes().take_while(u8::is_ascii_digit).count();
    let (int_digits, mut rest) = s.split_at(int_len);

    let mut frac_digits = "";
    if let Some(after_dot) = rest.strip_prefix('.') {
        let frac_len = after_dot.bytes().take_while(u8::is_ascii_digit).count();
        (frac_digits, rest) = after_dot.split_at(frac_len);
    }
    if int_digits.is_empty() && frac_digits.is_empty() {
        return Err(DurationError::Invalid);
    }

    let unit_len = rest
        .char_indices()
        .find(|(_, c)| *c == '.' || c.is_ascii_digit())
        .map_or(rest.len(), |(i, _)| i);
    let (unit, rest) = rest.split_at(unit_len);
    if unit.is_empty() {
        return Err(DurationError::MissingUnit);
    }
    let scale = NANOS_PER_UNIT
        .iter()
        .find(|(name, _)| *name == unit)
        .map(|(_, nanos)| *nanos)
        .ok_or_else(|| DurationError::UnknownUnit(unit.to_string()))?;

    let whole = parse_digits(int_digits)?
        .checked_mul(scale)
        .ok_or(DurationError::Overflow)?;
    let fraction = fraction_nanos(frac_digits, scale);
    let term = whole.checked_add(fraction).ok_or(DurationError::Overflow)?;
    Ok((term, rest))
}

fn parse_digits(digits: &str) -> Result<u128, DurationError> {
    digits.bytes().try_fold(0u128, |acc, b| {
        acc.checked_mul(10)
            .and_then(|acc| acc.checked_add(u128::from(b - b'0')))
            .ok_or(DurationError::Overflow)
    })
}

/// `0.<digits>` of `scale` nanoseconds, truncated. Digits past nanosecond
/// precision are ignored.
fn fraction_nanos(digits: &str, scale: u128) -> u128 {
    let mut numerator: u128 = 0;
    let mut denominator: u128 = 1;
    for b in digits.bytes().take(24) {
        numerator = numerator * 10 + u128::from(b - b'0');
        denominator *= 10;
    }
    numerator * scale / denominator
}
