//! Register Models

use salvo::oapi::ToSchema;
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use kasir::{
    cart::CartLine,
    checkout::{CheckoutFailure, CheckoutState},
    money::format_idr,
    receipt::{LineOutcome, LineReport, Receipt, SettlementReport},
    settlement::{Settlement, Totals},
};
use kasir_app::domain::registers::RegisterSnapshot;

/// Cart line with its price snapshot
#[derive(Debug, Serialize, Deserialize, ToSchema)]
pub(crate) struct CartLineResponse {
    pub product_uuid: Uuid,
    pub name: String,
    pub barcode: Option<String>,

    /// Unit price in rupiah
    pub unit_price: u64,
    pub quantity: u32,
    pub line_total: u64,
}

impl From<CartLine> for CartLineResponse {
    fn from(line: CartLine) -> Self {
        CartLineResponse {
            product_uuid: line.product_uuid.into(),
            line_total: line.unit_price.saturating_mul(u64::from(line.quantity)),
            name: line.name,
            barcode: line.barcode,
            unit_price: line.unit_price,
            quantity: line.quantity,
        }
    }
}

/// Subtotal, tax and total in rupiah
#[derive(Debug, Serialize, Deserialize, ToSchema)]
pub(crate) struct TotalsResponse {
    pub subtotal: u64,
    pub tax: u64,
    pub total: u64,

    /// `total` formatted for display
    pub total_display: String,
}

impl From<Totals> for TotalsResponse {
    fn from(totals: Totals) -> Self {
        TotalsResponse {
            subtotal: totals.subtotal,
            tax: totals.tax,
            total: totals.total,
            total_display: format_idr(totals.total),
        }
    }
}

/// Receipt of a completed sale
#[derive(Debug, Serialize, Deserialize, ToSchema)]
pub(crate) struct ReceiptResponse {
    pub uuid: Uuid,
    pub payment_method: String,
    pub totals: TotalsResponse,
    pub lines: Vec<CartLineResponse>,
    pub completed_at: String,
}

impl From<Receipt> for ReceiptResponse {
    fn from(receipt: Receipt) -> Self {
        ReceiptResponse {
            uuid: receipt.uuid.into(),
            payment_method: receipt.settlement.payment_method.as_str().to_string(),
            totals: receipt.settlement.totals.into(),
            lines: receipt.lines.into_iter().map(Into::into).collect(),
            completed_at: receipt.completed_at.to_string(),
        }
    }
}

/// Stock decrement outcome for one line
#[derive(Debug, Serialize, Deserialize, ToSchema)]
pub(crate) struct LineReportResponse {
    pub product_uuid: Uuid,
    pub name: String,
    pub quantity: u32,

    /// `applied`, `failed` or `not_attempted`
    pub outcome: String,
    pub previous_stock: Option<u32>,
    pub new_stock: Option<u32>,
    pub reason: Option<String>,
}

impl From<LineReport> for LineReportResponse {
    fn from(line: LineReport) -> Self {
        let (outcome, previous_stock, new_stock, reason) = match line.outcome {
            LineOutcome::Applied {
                previous_stock,
                new_stock,
            } => ("applied", Some(previous_stock), Some(new_stock), None),
            LineOutcome::Failed { reason } => ("failed", None, None, Some(reason)),
            LineOutcome::NotAttempted => ("not_attempted", None, None, None),
        };

        LineReportResponse {
            product_uuid: line.product_uuid.into(),
            name: line.name,
            quantity: line.quantity,
            outcome: outcome.to_string(),
            previous_stock,
            new_stock,
            reason,
        }
    }
}

/// Per-line account of a settlement that did not complete
#[derive(Debug, Serialize, Deserialize, ToSchema)]
pub(crate) struct SettlementReportResponse {
    pub lines: Vec<LineReportResponse>,
}

impl From<SettlementReport> for SettlementReportResponse {
    fn from(report: SettlementReport) -> Self {
        SettlementReportResponse {
            lines: report.lines.into_iter().map(Into::into).collect(),
        }
    }
}

#[derive(Debug, Serialize, Deserialize, ToSchema)]
pub(crate) struct FailureResponse {
    pub reason: String,
    pub report: Option<SettlementReportResponse>,
}

impl From<CheckoutFailure> for FailureResponse {
    fn from(failure: CheckoutFailure) -> Self {
        FailureResponse {
            reason: failure.reason,
            report: failure.report.map(Into::into),
        }
    }
}

/// Checkout dialog state
#[derive(Debug, Serialize, Deserialize, ToSchema)]
pub(crate) struct CheckoutResponse {
    /// `idle`, `reviewing`, `payment_method_selected`, `settling`, `completed` or `failed`
    pub state: String,
    pub totals: Option<TotalsResponse>,
    pub payment_method: Option<String>,
    pub receipt: Option<ReceiptResponse>,
    pub failure: Option<FailureResponse>,
}

impl CheckoutResponse {
    fn new(state: String) -> Self {
        CheckoutResponse {
            state,
            totals: None,
            payment_method: None,
            receipt: None,
            failure: None,
        }
    }

    fn with_settlement(state: String, settlement: Settlement) -> Self {
        CheckoutResponse {
            totals: Some(settlement.totals.into()),
            payment_method: Some(settlement.payment_method.as_str().to_string()),
            ..CheckoutResponse::new(state)
        }
    }
}

impl From<CheckoutState> for CheckoutResponse {
    fn from(state: CheckoutState) -> Self {
        let name = state.name().to_string();

        match state {
            CheckoutState::Idle => CheckoutResponse::new(name),
            CheckoutState::Reviewing { totals } => CheckoutResponse {
                totals: Some(totals.into()),
                ..CheckoutResponse::new(name)
            },
            CheckoutState::PaymentMethodSelected {
                totals,
                payment_method,
            } => CheckoutResponse::with_settlement(
                name,
                Settlement {
                    totals,
                    payment_method,
                },
            ),
            CheckoutState::Settling { settlement } => {
                CheckoutResponse::with_settlement(name, settlement)
            }
            CheckoutState::Completed { receipt } => {
                let settlement = receipt.settlement;

                CheckoutResponse {
                    receipt: Some(receipt.into()),
                    ..CheckoutResponse::with_settlement(name, settlement)
                }
            }
            CheckoutState::Failed {
                settlement,
                failure,
            } => CheckoutResponse {
                failure: Some(failure.into()),
                ..CheckoutResponse::with_settlement(name, settlement)
            },
        }
    }
}

/// Register
#[derive(Debug, Serialize, Deserialize, ToSchema)]
pub(crate) struct RegisterResponse {
    pub uuid: Uuid,
    pub lines: Vec<CartLineResponse>,

    /// Totals of the cart as it stands
    pub totals: TotalsResponse,
    pub checkout: CheckoutResponse,
}

impl From<RegisterSnapshot> for RegisterResponse {
    fn from(snapshot: RegisterSnapshot) -> Self {
        RegisterResponse {
            uuid: snapshot.uuid.into(),
            lines: snapshot.lines.into_iter().map(Into::into).collect(),
            totals: snapshot.totals.into(),
            checkout: snapshot.checkout.into(),
        }
    }
}
