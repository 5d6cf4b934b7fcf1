//! Open Checkout Handler

use salvo::{oapi::extract::PathParam, prelude::*};
use uuid::Uuid;

use crate::{
    extensions::*,
    registers::{errors::into_status_error, models::RegisterResponse},
};

/// Open Checkout Handler
///
/// Re-prices the cart from the live catalog and shows the totals for review.
#[endpoint(
    tags("checkout"),
    summary = "Open Checkout",
    responses(
        (status_code = StatusCode::OK, description = "Checkout under review"),
        (status_code = StatusCode::BAD_REQUEST, description = "Cart is empty"),
        (status_code = StatusCode::NOT_FOUND, description = "Register not found"),
        (status_code = StatusCode::CONFLICT, description = "Cart no longer matches the catalog"),
        (status_code = StatusCode::SERVICE_UNAVAILABLE, description = "Product store unavailable"),
    ),
)]
#[tracing::instrument(
    name = "registers.checkout.open",
    skip(register, depot),
    fields(register_uuid = tracing::field::Empty),
    err
)]
pub(crate) async fn handler(
    register: PathParam<Uuid>,
    depot: &mut Depot,
) -> Result<Json<RegisterResponse>, StatusError> {
    let register = register.into_inner();

    tracing::Span::current().record("register_uuid", tracing::field::display(register));

    let snapshot = depot
        .app_or_500()?
        .registers
        .open_checkout(register.into())
        .await
        .map_err(into_status_error)?;

    Ok(Json(snapshot.into()))
}
