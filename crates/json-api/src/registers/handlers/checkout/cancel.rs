//! Cancel Checkout Handler

use salvo::{oapi::extract::PathParam, prelude::*};
use uuid::Uuid;

use crate::{
    extensions::*,
    registers::{errors::into_status_error, models::RegisterResponse},
};

/// Cancel Checkout Handler
///
/// Closes the checkout dialog; the cart is kept.
#[endpoint(
    tags("checkout"),
    summary = "Cancel Checkout",
    responses(
        (status_code = StatusCode::OK, description = "Checkout closed"),
        (status_code = StatusCode::NOT_FOUND, description = "Register not found"),
        (status_code = StatusCode::CONFLICT, description = "Payment settling"),
    ),
)]
pub(crate) async fn handler(
    register: PathParam<Uuid>,
    depot: &mut Depot,
) -> Result<Json<RegisterResponse>, StatusError> {
    let snapshot = depot
        .app_or_500()?
        .registers
        .cancel_checkout(register.into_inner().into())
        .await
        .map_err(into_status_error)?;

    Ok(Json(snapshot.into()))
}
