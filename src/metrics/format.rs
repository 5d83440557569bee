use std::time::Duration;

const NANOS_PER_CENTI: u128 = 10_000_000;
const HALF_CENTI_NANOS: u128 = 5_000_000;

/// Formats a duration as seconds with two decimals, rounding half up.
#[must_use]
pub fn format_secs(duration: Duration) -> String {
    let centis = duration
        .as_nanos()
        .saturating_add(HALF_CENTI_NANOS)
        .checked_div(NANOS_PER_CENTI)
        .unwrap_or(0);
    format!(
        "{}.{:02}",
        centis.checked_div(100).unwrap_or(0),
        centis.checked_rem(100).unwrap_or(0)
    )
}

/// `numerator / denominator` in hundredths of a percent (10_000 = 100%),
/// rounded half up. A zero denominator yields zero.
#[must_use]
pub fn rate_x100(numerator: u64, denominator: u64) -> u64 {
    if denominator == 0 {
        return 0;
    }
    let denominator = u128::from(denominator);
    let scaled = u128::from(numerator)
        .saturating_mul(20_000)
        .saturating_add(denominator)
        .checked_div(denominator.saturating_mul(2))
        .unwrap_or(0);
    u64::try_from(scaled).unwrap_or(u64::MAX)
}

#[must_use]
pub fn format_percent_x100(value_x100: u64) -> String {
    format!(
        "{}.{:02}%",
        value_x100.checked_div(100).unwrap_or(0),
        value_x100.checked_rem(100).unwrap_or(0)
    )
}
