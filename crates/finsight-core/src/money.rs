//! Monetary rounding and formatting helpers

/// Round to 2 decimal places
///
/// Rounds the exact binary value, so `1.115` (stored just below the tie)
/// goes down, and exact ties like `0.125` go to the even digit. Scaling by
/// 100 first would push both up.
pub fn round2(value: f64) -> f64 {
    let rounded = format!("{:.2}", value).parse::<f64>().unwrap_or(value);
    // Avoid emitting "-0.0" in JSON
    if rounded == 0.0 {
        0.0
    } else {
        rounded
    }
}

/// Format an amount with 2 decimals and comma thousands separators
/// (e.g. `12345.678` -> `"12,345.68"`).
pub fn format_amount(value: f64) -> String {
    let fixed = format!("{:.2}", value.abs());
    let (int_part, frac_part) = fixed.split_once('.').unwrap_or((fixed.as_str(), "00"));

    let mut grouped = String::with_capacity(int_part.len() + int_part.len() / 3);
    for (i, ch) in int_part.chars().enumerate() {
        if i > 0 && (int_part.len() - i) % 3 == 0 {
            grouped.push(',');
        }
        grouped.push(ch);
    }

    let sign = if value < 0.0 && fixed != "0.00" { "-" } else { "" };
    format!("{}{}.{}", sign, grouped, frac_part)
}

/// Arithmetic mean, `None` for an empty slice
pub fn mean(values: &[f64]) -> Option<f64> {
    if values.is_empty() {
        None
    } else {
        Some(values.iter().sum::<f64>() / values.len() as f64)
    }
}
