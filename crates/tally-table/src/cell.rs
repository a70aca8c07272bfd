/// Parse a price cell. Empty and non-numeric cells are absent.
pub fn parse_price(cell: &str) -> Option<f64> {
    let trimmed = cell.trim();
    if trimmed.is_empty() {
        return None;
    }
    trimmed.parse::<f64>().ok().filter(|v| v.is_finite())
}

/// Format a price for writing back into a table.
pub fn format_price(price: Option<f64>) -> String {
    match price {
        Some(v) => v.to_string(),
        None => String::new(),
    }
}

/// Whether a benchmark price cell already holds a value.
///
/// Anything non-empty that is not numerically zero counts, including text.
pub fn is_filled(cell: &str) -> bool {
    let trimmed = cell.trim();
    if trimmed.is_empty() {
        return false;
    }
    trimmed.parse::<f64>().map_or(true, |v| v != 0.0)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parse_price_numbers() {
        assert_eq!(parse_price("4.5"), Some(4.5));
        assert_eq!(parse_price(" 12 "), Some(12.0));
        assert_eq!(parse_price("0"), Some(0.0));
    }

    #[test]
    fn parse_price_absent() {
        assert_eq!(parse_price(""), None);
        assert_eq!(parse_price("   "), None);
        assert_eq!(parse_price("n/a"), None);
        assert_eq!(parse_price("NaN"), None);
    }

    #[test]
    fn format_price_round_trips_shortest() {
        assert_eq!(format_price(Some(5.0)), "5");
        assert_eq!(format_price(Some(4.75)), "4.75");
        assert_eq!(format_price(None), "");
    }

    #[test]
    fn filled_rules() {
        assert!(is_filled("3.5"));
        assert!(is_filled("pending"));
        assert!(!is_filled(""));
        assert!(!is_filled("  "));
        assert!(!is_filled("0"));
        assert!(!is_filled("0.00"));
    }
}
