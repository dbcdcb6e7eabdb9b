//! Common regex patterns for receipt line matching.

use lazy_static::lazy_static;
use regex::Regex;

lazy_static! {
    // Numeric date: day-first, '-' or '/' separated, 2- or 4-digit year
    pub static ref DATE_NUMERIC: Regex = Regex::new(
        r"\b(\d{1,2})[/\-](\d{1,2})[/\-](\d{4}|\d{2})\b"
    ).unwrap();

    // A line that is nothing but a date
    pub static ref DATE_ONLY: Regex = Regex::new(
        r"^\d{1,2}[/\-]\d{1,2}[/\-](?:\d{4}|\d{2})$"
    ).unwrap();

    // A line that is nothing but a price, optionally currency-prefixed
    pub static ref BARE_PRICE: Regex = Regex::new(
        r"^[$€£]?\s*(\d{1,6}(?:[.,]\d{1,2})?)$"
    ).unwrap();

    // A line that is nothing but digits
    pub static ref BARE_INTEGER: Regex = Regex::new(
        r"^\d+$"
    ).unwrap();

    // Single-line item patterns
    pub static ref QTY_ITEM: Regex = Regex::new(
        r"^(\d{1,3})\s*[xX]\s+(.+?)\s+[$€£]?(\d{1,6}(?:[.,]\d{1,2})?)$"
    ).unwrap();

    pub static ref TRAILING_AMOUNT: Regex = Regex::new(
        r"^(.+?)\s+(\d{1,6}(?:[.,]\d{1,2})?)$"
    ).unwrap();

    pub static ref TRAILING_CURRENCY_AMOUNT: Regex = Regex::new(
        r"^(.+?)\s+[$€£]\s*(\d{1,6}(?:[.,]\d{1,2})?)$"
    ).unwrap();

    pub static ref LEADING_CURRENCY_AMOUNT: Regex = Regex::new(
        r"^[$€£]\s*(\d{1,6}(?:[.,]\d{1,2})?)\s+(.+)$"
    ).unwrap();

    pub static ref DOT_LEADER_AMOUNT: Regex = Regex::new(
        r"^(.+?)\.{2,}\s*[$€£]?(\d{1,6}(?:[.,]\d{1,2})?)$"
    ).unwrap();

    // Header/footer noise
    pub static ref PHONE_LINE: Regex = Regex::new(
        r"(?i)\b(?:tel|phone|fax)\b[\s.:]*[\d\s()+\-]{6,}"
    ).unwrap();

    pub static ref ADDRESS_LINE: Regex = Regex::new(
        r"(?i)\b(?:street|st\.|avenue|ave\.?|road|rd\.|suite|floor|blvd)\b"
    ).unwrap();

    pub static ref TIME_OF_DAY: Regex = Regex::new(
        r"\b\d{1,2}:\d{2}(?::\d{2})?\b"
    ).unwrap();

    pub static ref DATE_TIME_LABEL: Regex = Regex::new(
        r"(?i)^(?:date|time)\b[:\s]"
    ).unwrap();
}
