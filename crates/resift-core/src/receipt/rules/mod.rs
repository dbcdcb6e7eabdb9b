//! Rule-based matchers shared by the extraction strategies.

pub mod amounts;
pub mod dates;
pub mod patterns;

pub use amounts::{in_item_range, parse_amount, parse_price_line};
pub use dates::extract_date;
pub use patterns::*;
