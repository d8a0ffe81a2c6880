//! Money representation.
//!
//! Amounts are integer minor units (cents) to avoid floating-point drift.
//! For two-decimal currencies, 1 unit = 100 cents, so 50.00 = 5000 cents.

/// Monetary amount in minor units (cents).
pub type Cents = i64;

/// Format cents as a human-readable decimal string.
///
/// Example: 5000 -> "50.00", -1234 -> "-12.34"
pub fn format_cents(cents: Cents) -> String {
    let sign = if cents < 0 { "-" } else { "" };
    let abs_cents = cents.unsigned_abs();
    let units = abs_cents / 100;
    let remainder = abs_cents % 100;
    format!("{sign}{units}.{remainder:02}")
}
