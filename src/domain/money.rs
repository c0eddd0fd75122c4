//! Conversions between integer minor units and the decimal amounts used in
//! exported files.

/// Number of minor units in one currency unit.
pub const CENTS_PER_UNIT: i64 = 100;

/// Convert a decimal amount in major units into minor units, rounding to the
/// nearest cent. Returns `None` for non-finite or out-of-range values.
pub fn cents_from_decimal(amount: f64) -> Option<i64> {
    if !amount.is_finite() {
        return None;
    }

    let cents = (amount * CENTS_PER_UNIT as f64).round();
    if cents.abs() >= i64::MAX as f64 {
        return None;
    }

    Some(cents as i64)
}

/// Convert minor units into a decimal amount in major units.
pub fn decimal_from_cents(cents: i64) -> f64 {
    cents as f64 / CENTS_PER_UNIT as f64
}

/// Parse a decimal string such as `12.5` or `12,50` into minor units.
pub fn parse_amount(input: &str) -> Option<i64> {
    let normalized = input.trim().replace(',', ".");
    if normalized.is_empty() {
        return None;
    }

    normalized
        .parse::<f64>()
        .ok()
        .and_then(cents_from_decimal)
}

/// Render minor units as a decimal string with two fraction digits.
pub fn format_cents(cents: i64) -> String {
    let sign = if cents < 0 { "-" } else { "" };
    let abs = cents.unsigned_abs();
    format!(
        "{sign}{}.{:02}",
        abs / CENTS_PER_UNIT as u64,
        abs % CENTS_PER_UNIT as u64
    )
}

/// Apply a whole-percent discount to an amount, rounding half up.
pub fn discounted(amount_cents: i64, discount_percent: u8) -> i64 {
    let keep = 100 - i64::from(discount_percent.min(100));
    let scaled = amount_cents * keep;
    if scaled >= 0 {
        (scaled + 50) / 100
    } else {
        (scaled - 50) / 100
    }
}
