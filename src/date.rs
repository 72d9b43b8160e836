//! Tolerant parsing for the date strings carried on transactions.

use time::{Date, format_description::BorrowedFormatItem, macros::format_description};

/// The accepted date formats, tried in order. The first successful parse
/// wins.
const ACCEPTED_FORMATS: [&[BorrowedFormatItem<'static>]; 4] = [
    // 05 Jan 2025, 5 Jan 2025
    format_description!("[day padding:none] [month repr:short] [year]"),
    // 5-Jan-2025
    format_description!("[day padding:none]-[month repr:short]-[year]"),
    // 05/01/2025
    format_description!("[day]/[month]/[year]"),
    // 2025-01-05
    format_description!("[year]-[month]-[day]"),
];

/// Parse a transaction date string against the accepted formats.
///
/// Returns [None] when no format matches. An unparseable date is not an
/// error: consumers that filter by date keep such records rather than
/// silently dropping them.
pub fn parse_transaction_date(date: &str) -> Option<Date> {
    let date = date.trim();

    ACCEPTED_FORMATS
        .iter()
        .find_map(|format| Date::parse(date, format).ok())
}
