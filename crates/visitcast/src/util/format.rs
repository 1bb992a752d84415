/// Insert thousands separators into the integer part of `value`
pub fn format_count(value: u64) -> String {
    let digits = value.to_string();
    let mut result = String::new();
    for (i, c) in digits.chars().rev().enumerate() {
        if i > 0 && i % 3 == 0 {
            result.push(',');
        }
        result.push(c);
    }
    result.chars().rev().collect()
}

/// Format a value with thousands separators, rounded to the nearest integer
pub fn format_number(value: f64) -> String {
    let formatted = format_count(value.abs().round() as u64);
    if value < 0.0 && value.round() != 0.0 {
        format!("-{}", formatted)
    } else {
        formatted
    }
}

/// Format a currency value without cents
pub fn format_currency_short(value: f64) -> String {
    let formatted = format_count(value.abs().round() as u64);
    if value >= 0.0 {
        format!("${}", formatted)
    } else {
        format!("-${}", formatted)
    }
}

/// Format a count in compact form (e.g., 2.1M, 218K, 50)
pub fn format_compact(value: f64) -> String {
    let abs_value = value.abs();
    let sign = if value < 0.0 { "-" } else { "" };

    if abs_value >= 1_000_000.0 {
        format!("{}{:.1}M", sign, abs_value / 1_000_000.0)
    } else if abs_value >= 1_000.0 {
        format!("{}{:.0}K", sign, abs_value / 1_000.0)
    } else {
        format!("{}{:.0}", sign, abs_value)
    }
}

/// Signed visit delta, e.g. `+12,345` or `-87`
pub fn format_delta(delta: i64) -> String {
    let formatted = format_count(delta.unsigned_abs());
    if delta < 0 {
        format!("-{}", formatted)
    } else {
        format!("+{}", formatted)
    }
}

/// Format a fraction as a percentage
pub fn format_percentage(value: f64) -> String {
    format!("{:.1}%", value * 100.0)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_format_count() {
        assert_eq!(format_count(0), "0");
        assert_eq!(format_count(999), "999");
        assert_eq!(format_count(213_544), "213,544");
        assert_eq!(format_count(1_234_567), "1,234,567");
    }

    #[test]
    fn test_format_number_rounds() {
        assert_eq!(format_number(500_000.4), "500,000");
        assert_eq!(format_number(-1_500.0), "-1,500");
        assert_eq!(format_number(-0.2), "0");
    }

    #[test]
    fn test_format_currency_short() {
        assert_eq!(format_currency_short(500_000.0), "$500,000");
        assert_eq!(format_currency_short(-25.0), "-$25");
    }

    #[test]
    fn test_format_compact() {
        assert_eq!(format_compact(218_420.0), "218K");
        assert_eq!(format_compact(2_100_000.0), "2.1M");
        assert_eq!(format_compact(50.0), "50");
    }

    #[test]
    fn test_format_delta() {
        assert_eq!(format_delta(43_105), "+43,105");
        assert_eq!(format_delta(-7), "-7");
        assert_eq!(format_delta(0), "+0");
    }

    #[test]
    fn test_format_percentage() {
        assert_eq!(format_percentage(0.314), "31.4%");
    }
}
