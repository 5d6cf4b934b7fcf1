//! Confirm Payment Handler

use salvo::{
    oapi::{ToSchema, extract::PathParam},
    prelude::*,
};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use kasir_app::domain::{checkout::SettlementError, registers::RegistersError};

use crate::{
    extensions::*,
    registers::{
        errors::into_status_error,
        models::{ReceiptResponse, SettlementReportResponse},
    },
};

/// Confirm Payment Response
///
/// `completed` carries the receipt. `incomplete` is returned with 409 when some stock
/// decrements were written and others were not; the cart is kept for a retry.
#[derive(Debug, Serialize, Deserialize, ToSchema)]
#[serde(tag = "status", rename_all = "snake_case")]
pub(crate) enum ConfirmPaymentResponse {
    Completed { receipt: ReceiptResponse },
    Incomplete { report: SettlementReportResponse },
}

/// Confirm Payment Handler
///
/// Writes a stock decrement per cart line, then empties the cart.
#[endpoint(
    tags("checkout"),
    summary = "Confirm Payment",
    responses(
        (status_code = StatusCode::OK, description = "Sale completed"),
        (status_code = StatusCode::CONFLICT, description = "Stock changed, settlement incomplete, or checkout not ready"),
        (status_code = StatusCode::NOT_FOUND, description = "Register not found"),
        (status_code = StatusCode::SERVICE_UNAVAILABLE, description = "Product store unavailable"),
    ),
)]
#[tracing::instrument(
    name = "registers.checkout.confirm",
    skip(register, depot, res),
    fields(register_uuid = tracing::field::Empty),
    err
)]
pub(crate) async fn handler(
    register: PathParam<Uuid>,
    depot: &mut Depot,
    res: &mut Response,
) -> Result<Json<ConfirmPaymentResponse>, StatusError> {
    let register = register.into_inner();

    tracing::Span::current().record("register_uuid", tracing::field::display(register));

    let result = depot
        .app_or_500()?
        .registers
        .confirm_payment(register.into())
        .await;

    match result {
        Ok(receipt) => {
            tracing::info!(
                register_uuid = %register,
                receipt_uuid = %receipt.uuid,
                total = receipt.settlement.totals.total,
                payment_method = %receipt.settlement.payment_method,
                "payment settled"
            );

            Ok(Json(ConfirmPaymentResponse::Completed {
                receipt: receipt.into(),
            }))
        }
        Err(RegistersError::Settlement(SettlementError::PartialFailure(report))) => {
            tracing::warn!(register_uuid = %register, "settlement incomplete: {report}");

            res.status_code(StatusCode::CONFLICT);

            Ok(Json(ConfirmPaymentResponse::Incomplete {
                report: report.into(),
            }))
        }
        Err(error) => Err(into_status_error(error)),
    }
}
