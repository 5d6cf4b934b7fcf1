//! Get Register Handler

use salvo::{oapi::extract::PathParam, prelude::*};
use uuid::Uuid;

use crate::{
    extensions::*,
    registers::{errors::into_status_error, models::RegisterResponse},
};

/// Get Register Handler
///
/// Returns the cart, its totals and the checkout dialog state.
#[endpoint(
    tags("registers"),
    summary = "Get Register",
    responses(
        (status_code = StatusCode::OK, description = "Register"),
        (status_code = StatusCode::NOT_FOUND, description = "Register not found"),
        (status_code = StatusCode::BAD_REQUEST, description = "Bad Request"),
    ),
)]
pub(crate) async fn handler(
    register: PathParam<Uuid>,
    depot: &mut Depot,
) -> Result<Json<RegisterResponse>, StatusError> {
    let register = depot
        .app_or_500()?
        .registers
        .get_register(register.into_inner().into())
        .await
        .map_err(into_status_error)?;

    Ok(Json(register.into()))
}
