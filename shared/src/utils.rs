// Helpers shared by the client and the dashboard.

/// Placeholder shown where the backend returned no value.
pub const MISSING_VALUE: &str = "-";

/// Trims and uppercases user input. `None` when nothing is left.
pub fn normalize_symbol(input: &str) -> Option<String> {
    let trimmed = input.trim();
    if trimmed.is_empty() {
        None
    } else {
        Some(trimmed.to_uppercase())
    }
}

/// Rounds to two decimals for display.
pub fn format_price(value: f64) -> String {
    format!("{:.2}", value)
}

pub fn format_optional_price(value: Option<f64>) -> String {
    match value {
        Some(v) if v.is_finite() => format_price(v),
        _ => MISSING_VALUE.to_string(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_normalize_symbol() {
        assert_eq!(normalize_symbol("  nvda "), Some("NVDA".to_string()));
        assert_eq!(normalize_symbol("brk.b"), Some("BRK.B".to_string()));
        assert_eq!(normalize_symbol(""), None);
        assert_eq!(normalize_symbol("   "), None);
    }

    #[test]
    fn test_format_price_rounds_to_cents() {
        assert_eq!(format_price(123.456), "123.46");
        assert_eq!(format_price(7.0), "7.00");
    }

    #[test]
    fn test_format_optional_price_placeholder() {
        assert_eq!(format_optional_price(Some(1.005_1)), "1.01");
        assert_eq!(format_optional_price(None), MISSING_VALUE);
        assert_eq!(format_optional_price(Some(f64::NAN)), MISSING_VALUE);
    }
}
