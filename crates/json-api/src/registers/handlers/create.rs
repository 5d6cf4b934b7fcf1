//! Open Register Handler

use salvo::{http::header::LOCATION, prelude::*};

use crate::{
    extensions::*,
    registers::{errors::into_status_error, models::RegisterResponse},
};

/// Open Register Handler
///
/// Starts a cashier session with an empty cart.
#[endpoint(
    tags("registers"),
    summary = "Open Register",
    responses(
        (status_code = StatusCode::CREATED, description = "Register opened"),
        (status_code = StatusCode::INTERNAL_SERVER_ERROR, description = "Internal Server Error"),
    ),
)]
#[tracing::instrument(
    name = "registers.open",
    skip(depot, res),
    fields(register_uuid = tracing::field::Empty),
    err
)]
pub(crate) async fn handler(
    depot: &mut Depot,
    res: &mut Response,
) -> Result<Json<RegisterResponse>, StatusError> {
    let register = depot
        .app_or_500()?
        .registers
        .open_register()
        .await
        .map_err(into_status_error)?;

    tracing::Span::current().record("register_uuid", tracing::field::display(register.uuid));

    res.add_header(LOCATION, format!("/registers/{}", register.uuid), true)
        .or_500("failed to set location header")?
        .status_code(StatusCode::CREATED);

    tracing::info!(register_uuid = %register.uuid, "opened register");

    Ok(Json(register.into()))
}
