//! Close Register Handler

use salvo::{oapi::extract::PathParam, prelude::*};
use uuid::Uuid;

use crate::{extensions::*, registers::errors::into_status_error};

/// Close Register Handler
///
/// Discards the register and its cart. Refused while a payment is settling.
#[endpoint(
    tags("registers"),
    summary = "Close Register",
    responses(
        (status_code = StatusCode::NO_CONTENT, description = "Register closed"),
        (status_code = StatusCode::NOT_FOUND, description = "Register not found"),
        (status_code = StatusCode::CONFLICT, description = "Payment settling"),
        (status_code = StatusCode::BAD_REQUEST, description = "Bad Request"),
    ),
)]
#[tracing::instrument(
    name = "registers.close",
    skip(register, depot),
    fields(register_uuid = tracing::field::Empty),
    err
)]
pub(crate) async fn handler(
    register: PathParam<Uuid>,
    depot: &mut Depot,
) -> Result<StatusCode, StatusError> {
    let register = register.into_inner();

    tracing::Span::current().record("register_uuid", tracing::field::display(register));

    depot
        .app_or_500()?
        .registers
        .close_register(register.into())
        .await
        .map_err(into_status_error)?;

    tracing::info!(register_uuid = %register, "closed register");

    Ok(StatusCode::NO_CONTENT)
}
