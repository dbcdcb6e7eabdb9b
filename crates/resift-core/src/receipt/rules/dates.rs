//! Transaction date extraction.
//!
//! Receipts targeted by this pipeline print dates day-first. Month-first
//! receipts are a known accuracy limitation: the text gives no signal to
//! disambiguate, so the day-first reading is applied unconditionally.

use chrono::NaiveDate;

use super::patterns::DATE_NUMERIC;
use crate::receipt::lines::Line;

/// Scan all lines, in order, for the first valid numeric date.
///
/// The three numeric groups are read as day, month, year; 2-digit years are
/// expanded by adding 2000. Malformed groups (month > 12, day 31 in a short
/// month) are treated as a failed match and the scan continues with the next
/// candidate. `None` means no date was printed anywhere.
pub fn extract_date(lines: &[Line]) -> Option<NaiveDate> {
    for line in lines {
        for caps in DATE_NUMERIC.captures_iter(&line.text) {
            let day: u32 = match caps[1].parse() {
                Ok(d) => d,
                Err(_) => continue,
            };
            let month: u32 = match caps[2].parse() {
                Ok(m) => m,
                Err(_) => continue,
            };
            let year: i32 = match caps[3].parse() {
                Ok(y) => y,
                Err(_) => continue,
            };
            let year = if year < 100 { year + 2000 } else { year };

            if let Some(date) = NaiveDate::from_ymd_opt(year, month, day) {
                return Some(date);
            }
        }
    }

    None
}
