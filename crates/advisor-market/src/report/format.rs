//! Number and value formatting shared by the reports

use serde_json::Value;

pub const NOT_AVAILABLE: &str = "N/A";

/// `$x.xx`, or N/A for a missing or non-finite value
pub fn money(value: f64) -> String {
    if value.is_finite() {
        format!("${value:.2}")
    } else {
        NOT_AVAILABLE.to_string()
    }
}

/// Digits grouped by thousands: `1234567` → `1,234,567`
pub fn thousands(value: u64) -> String {
    let digits = value.to_string();
    let mut out = String::with_capacity(digits.len() + digits.len() / 3);
    for (i, ch) in digits.chars().enumerate() {
        if i > 0 && (digits.len() - i) % 3 == 0 {
            out.push(',');
        }
        out.push(ch);
    }
    out
}

/// Ratio rendered as a percentage with two decimals, `0.2531` → `25.31%`
pub fn ratio_percent(value: Option<f64>) -> String {
    value.map_or_else(|| NOT_AVAILABLE.to_string(), |v| format!("{:.2}%", v * 100.0))
}

/// Percent change from `first` to `last`
///
/// `None` when either end is missing or non-finite, or when `first` is zero.
pub fn percent_change(first: Option<f64>, last: Option<f64>) -> Option<f64> {
    let (first, last) = (first?, last?);
    if !first.is_finite() || !last.is_finite() || first == 0.0 {
        return None;
    }
    Some((last - first) / first * 100.0)
}

/// `12.34%` or N/A
pub fn percent(value: Option<f64>) -> String {
    value.map_or_else(|| NOT_AVAILABLE.to_string(), |v| format!("{v:.2}%"))
}

/// Loose JSON value as table text; absent and null read N/A
pub fn display(value: Option<&Value>) -> String {
    match value {
        None | Some(Value::Null) => NOT_AVAILABLE.to_string(),
        Some(Value::String(s)) if s.is_empty() => NOT_AVAILABLE.to_string(),
        Some(Value::String(s)) => s.clone(),
        Some(other) => other.to_string(),
    }
}

/// Loose price value with a dollar sign, or N/A
pub fn display_price(value: Option<&Value>) -> String {
    match value {
        None | Some(Value::Null) => NOT_AVAILABLE.to_string(),
        Some(v) => format!("${}", display(Some(v))),
    }
}

/// Amount in billions: `$2.90 billion`
pub fn billions(value: Option<f64>, suffix: &str) -> String {
    value.map_or_else(
        || NOT_AVAILABLE.to_string(),
        |v| format!("${:.2}{suffix}", v / 1_000_000_000.0),
    )
}

/// Mean, max and min over the finite values
pub fn finite_stats(values: &[f64]) -> Option<(f64, f64, f64)> {
    let finite: Vec<f64> = values.iter().copied().filter(|v| v.is_finite()).collect();
    if finite.is_empty() {
        return None;
    }
    let mean = finite.iter().sum::<f64>() / finite.len() as f64;
    let max = finite.iter().copied().fold(f64::NEG_INFINITY, f64::max);
    let min = finite.iter().copied().fold(f64::INFINITY, f64::min);
    Some((mean, max, min))
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_thousands() {
        assert_eq!(thousands(0), "0");
        assert_eq!(thousands(999), "999");
        assert_eq!(thousands(1_000), "1,000");
        assert_eq!(thousands(52_164_300), "52,164,300");
    }

    #[test]
    fn test_money() {
        assert_eq!(money(187.456), "$187.46");
        assert_eq!(money(f64::NAN), "N/A");
    }

    #[test]
    fn test_percent_change() {
        assert_eq!(percent_change(Some(100.0), Some(110.0)), Some(10.0));
        assert_eq!(percent_change(Some(0.0), Some(110.0)), None);
        assert_eq!(percent_change(None, Some(1.0)), None);
        assert_eq!(percent_change(Some(f64::NAN), Some(1.0)), None);
        assert_eq!(percent(percent_change(Some(200.0), Some(150.0))), "-25.00%");
    }

    #[test]
    fn test_display() {
        assert_eq!(display(Some(&json!("Technology"))), "Technology");
        assert_eq!(display(Some(&json!(29.1))), "29.1");
        assert_eq!(display(Some(&json!(""))), "N/A");
        assert_eq!(display(None), "N/A");
        assert_eq!(display_price(Some(&json!(187.5))), "$187.5");
        assert_eq!(display_price(None), "N/A");
    }

    #[test]
    fn test_billions_and_ratio() {
        assert_eq!(billions(Some(2.9e12), " billion"), "$2900.00 billion");
        assert_eq!(billions(None, "B"), "N/A");
        assert_eq!(ratio_percent(Some(0.2531)), "25.31%");
        assert_eq!(ratio_percent(None), "N/A");
    }

    #[test]
    fn test_finite_stats_skip_nan() {
        let (mean, max, min) = finite_stats(&[1.0, f64::NAN, 3.0]).unwrap();
        assert_eq!((mean, max, min), (2.0, 3.0, 1.0));
        assert!(finite_stats(&[f64::NAN]).is_none());
    }
}
