//! Remove Register Item Handler

use salvo::{oapi::extract::PathParam, prelude::*};
use uuid::Uuid;

use crate::{
    extensions::*,
    registers::{errors::into_status_error, models::RegisterResponse},
};

/// Remove Register Item Handler
///
/// Drops the product's line from the cart.
#[endpoint(
    tags("registers"),
    summary = "Remove Item from Register",
    responses(
        (status_code = StatusCode::OK, description = "Item removed"),
        (status_code = StatusCode::NOT_FOUND, description = "Register or cart line not found"),
        (status_code = StatusCode::CONFLICT, description = "Payment settling"),
        (status_code = StatusCode::BAD_REQUEST, description = "Bad Request"),
    ),
)]
pub(crate) async fn handler(
    register: PathParam<Uuid>,
    product: PathParam<Uuid>,
    depot: &mut Depot,
) -> Result<Json<RegisterResponse>, StatusError> {
    let snapshot = depot
        .app_or_500()?
        .registers
        .remove_item(register.into_inner().into(), product.into_inner().into())
        .await
        .map_err(into_status_error)?;

    Ok(Json(snapshot.into()))
}
