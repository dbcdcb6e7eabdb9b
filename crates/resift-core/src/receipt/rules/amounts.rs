//! Monetary amount parsing.

use rust_decimal::Decimal;
use std::str::FromStr;

use super::patterns::BARE_PRICE;

/// Parse a numeric amount, accepting either '.' or ',' as the decimal
/// separator ("3.50", "3,50", "45").
pub fn parse_amount(s: &str) -> Option<Decimal> {
    let normalized = s.trim().replace(',', ".");
    Decimal::from_str(&normalized).ok()
}

/// Parse a price-shaped line: optional currency symbol plus digits with an
/// optional decimal part, and nothing else. Returns the amount.
pub fn parse_price_line(text: &str) -> Option<Decimal> {
    let caps = BARE_PRICE.captures(text.trim())?;
    parse_amount(&caps[1])
}

/// Whether an amount is acceptable for a line item: strictly positive and
/// strictly below the configured ceiling.
pub fn in_item_range(amount: Decimal, max: Decimal) -> bool {
    amount > Decimal::ZERO && amount < max
}

#[cfg(test)]
mod tests {
    use super::*;

    fn dec(s: &str) -> Decimal {
        Decimal::from_str(s).unwrap()
    }

    #[test]
    fn test_parse_amount_separators() {
        assert_eq!(parse_amount("3.50"), Some(dec("3.50")));
        assert_eq!(parse_amount("3,50"), Some(dec("3.50")));
        assert_eq!(parse_amount("45"), Some(dec("45")));
        assert_eq!(parse_amount("abc"), None);
    }

    #[test]
    fn test_parse_price_line() {
        assert_eq!(parse_price_line("3.50"), Some(dec("3.50")));
        assert_eq!(parse_price_line("$ 12.99"), Some(dec("12.99")));
        assert_eq!(parse_price_line("€7,20"), Some(dec("7.20")));
        assert_eq!(parse_price_line("Coffee 3.50"), None);
        assert_eq!(parse_price_line("12/03/24"), None);
    }

    #[test]
    fn test_in_item_range() {
        let max = Decimal::from(100_000);
        assert!(in_item_range(dec("0.01"), max));
        assert!(in_item_range(dec("99999.99"), max));
        assert!(!in_item_range(Decimal::ZERO, max));
        assert!(!in_item_range(dec("100000"), max));
        assert!(!in_item_range(dec("-5"), max));
    }
}
