//! Receipt and settlement reports

use std::fmt::{self, Display};

use jiff::Timestamp;

use crate::{
    cart::CartLine,
    money::format_idr,
    products::ProductUuid,
    settlement::Settlement,
    uuids::TypedUuid,
};

/// Receipt UUID
pub type ReceiptUuid = TypedUuid<Receipt>;

/// Outcome of a completed settlement.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Receipt {
    /// Receipt identifier
    pub uuid: ReceiptUuid,

    /// Totals and payment method
    pub settlement: Settlement,

    /// Lines that were settled, with the prices charged
    pub lines: Vec<CartLine>,

    /// When the last stock decrement landed
    pub completed_at: Timestamp,
}

impl Display for Receipt {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for line in &self.lines {
            writeln!(
                f,
                "{} x{} @ {}",
                line.name,
                line.quantity,
                format_idr(line.unit_price)
            )?;
        }

        let totals = self.settlement.totals;

        writeln!(f, "subtotal {}", format_idr(totals.subtotal))?;
        writeln!(f, "tax {}", format_idr(totals.tax))?;
        write!(
            f,
            "total {} ({})",
            format_idr(totals.total),
            self.settlement.payment_method
        )
    }
}

/// What happened to one line's stock decrement.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum LineOutcome {
    /// The decrement was written.
    Applied {
        /// Stock before the decrement
        previous_stock: u32,
        /// Stock after the decrement
        new_stock: u32,
    },

    /// The decrement was attempted and failed.
    Failed {
        /// Why it failed
        reason: String,
    },

    /// Settlement halted before reaching this line.
    NotAttempted,
}

/// One line of a settlement report.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LineReport {
    /// Product identifier
    pub product_uuid: ProductUuid,

    /// Product name
    pub name: String,

    /// Units in the cart line
    pub quantity: u32,

    /// Decrement outcome
    pub outcome: LineOutcome,
}

/// Per-line account of a settlement that did not complete.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct SettlementReport {
    /// Lines in cart order
    pub lines: Vec<LineReport>,
}

impl SettlementReport {
    /// Lines whose decrement was written.
    pub fn applied(&self) -> impl Iterator<Item = &LineReport> {
        self.lines
            .iter()
            .filter(|line| matches!(line.outcome, LineOutcome::Applied { .. }))
    }

    /// Lines whose decrement was not written, whether it failed or was never attempted.
    pub fn incomplete(&self) -> impl Iterator<Item = &LineReport> {
        self.lines
            .iter()
            .filter(|line| !matches!(line.outcome, LineOutcome::Applied { .. }))
    }
}

impl Display for SettlementReport {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let applied = self.applied().count();
        let incomplete: Vec<&str> = self.incomplete().map(|line| line.name.as_str()).collect();

        write!(
            f,
            "{applied} of {} stock updates applied; incomplete: {}",
            self.lines.len(),
            incomplete.join(", ")
        )
    }
}
