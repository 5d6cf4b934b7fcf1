//! Money
//!
//! Amounts are carried as `u64` minor units of the shop currency (IDR). `rusty_money` is only
//! used at the edges, for display.

use rusty_money::{Money, iso};

/// The shop currency.
pub const CURRENCY: &iso::Currency = iso::IDR;

/// Wrap minor units as IDR money, saturating at `i64::MAX`.
pub fn idr(minor: u64) -> Money<'static, iso::Currency> {
    Money::from_minor(i64::try_from(minor).unwrap_or(i64::MAX), CURRENCY)
}

/// Format minor units as IDR for receipts and logs.
pub fn format_idr(minor: u64) -> String {
    format!("{}", idr(minor))
}
