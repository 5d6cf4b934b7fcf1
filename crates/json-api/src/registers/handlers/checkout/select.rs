//! Select Payment Method Handler

use salvo::{
    oapi::{
        ToSchema,
        extract::{JsonBody, PathParam},
    },
    prelude::*,
};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use kasir::settlement::PaymentMethod;

use crate::{
    extensions::*,
    registers::{errors::into_status_error, models::RegisterResponse},
};

/// Select Payment Method Request
#[derive(Debug, Serialize, Deserialize, ToSchema)]
pub(crate) struct SelectPaymentMethodRequest {
    /// `cash`, `card` or `qris`
    pub payment_method: String,
}

/// Select Payment Method Handler
#[endpoint(
    tags("checkout"),
    summary = "Select Payment Method",
    responses(
        (status_code = StatusCode::OK, description = "Payment method selected"),
        (status_code = StatusCode::BAD_REQUEST, description = "Unknown payment method"),
        (status_code = StatusCode::NOT_FOUND, description = "Register not found"),
        (status_code = StatusCode::CONFLICT, description = "Checkout is not under review"),
    ),
)]
pub(crate) async fn handler(
    register: PathParam<Uuid>,
    json: JsonBody<SelectPaymentMethodRequest>,
    depot: &mut Depot,
) -> Result<Json<RegisterResponse>, StatusError> {
    let payment_method = json
        .into_inner()
        .payment_method
        .parse::<PaymentMethod>()
        .or_400("invalid payment method")?;

    let snapshot = depot
        .app_or_500()?
        .registers
        .select_payment_method(register.into_inner().into(), payment_method)
        .await
        .map_err(into_status_error)?;

    Ok(Json(snapshot.into()))
}
