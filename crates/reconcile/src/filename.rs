use rust_decimal::Decimal;
use std::str::FromStr;

use ledgerlink_core::Amount;

/// Derive the dollar amount embedded in a receipt's display name.
///
/// Receipts follow the convention `"<person>, <description>, <amount>.<ext>"`,
/// but the names are typed by hand, so anything that does not yield a
/// non-negative decimal comes back as `None`, never an error.
pub fn amount_from_name(name: &str) -> Option<Amount> {
    // Drop the extension: everything after the last dot, if there is one.
    let stem = match name.rfind('.') {
        Some(idx) => &name[..idx],
        None => name,
    };

    // The amount is the last comma-separated segment. A name with no comma
    // has no amount at all.
    let segments: Vec<&str> = stem.split(',').collect();
    if segments.len() < 2 {
        return None;
    }
    let raw = segments.last()?.trim();

    // Strip currency symbols and grouping commas before parsing.
    let cleaned: String = raw
        .chars()
        .filter(|c| !matches!(c, '$' | '€' | '£' | ','))
        .collect();
    let cleaned = cleaned.trim();
    if cleaned.is_empty() {
        return None;
    }

    let value = Decimal::from_str(cleaned).ok()?;
    if value.is_sign_negative() {
        return None;
    }
    Some(Amount::from_decimal(value))
}
