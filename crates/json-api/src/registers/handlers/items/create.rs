//! Add Register Item Handler

use salvo::{
    oapi::{
        ToSchema,
        extract::{JsonBody, PathParam},
    },
    prelude::*,
};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::{
    extensions::*,
    registers::{errors::into_status_error, models::RegisterResponse},
};

/// Add Register Item Request
///
/// Exactly one of `product_uuid` (picked from the catalog) or `barcode` (scanned).
#[derive(Debug, Default, Serialize, Deserialize, ToSchema)]
#[serde(default)]
pub(crate) struct AddItemRequest {
    pub product_uuid: Option<Uuid>,
    pub barcode: Option<String>,
}

/// Add Register Item Handler
///
/// Adds one unit, checked against the product's live stock.
#[endpoint(
    tags("registers"),
    summary = "Add Item to Register",
    responses(
        (status_code = StatusCode::OK, description = "Item added"),
        (status_code = StatusCode::NOT_FOUND, description = "Register or product not found"),
        (status_code = StatusCode::CONFLICT, description = "Not enough stock, or payment settling"),
        (status_code = StatusCode::BAD_REQUEST, description = "Bad Request"),
    ),
)]
#[tracing::instrument(
    name = "registers.items.add",
    skip(register, json, depot),
    fields(register_uuid = tracing::field::Empty),
    err
)]
pub(crate) async fn handler(
    register: PathParam<Uuid>,
    json: JsonBody<AddItemRequest>,
    depot: &mut Depot,
) -> Result<Json<RegisterResponse>, StatusError> {
    let register = register.into_inner();

    tracing::Span::current().record("register_uuid", tracing::field::display(register));

    let registers = &depot.app_or_500()?.registers;

    let snapshot = match json.into_inner() {
        AddItemRequest {
            product_uuid: Some(product),
            barcode: None,
        } => registers.add_item(register.into(), product.into()).await,
        AddItemRequest {
            product_uuid: None,
            barcode: Some(barcode),
        } => registers.scan_barcode(register.into(), barcode).await,
        AddItemRequest { .. } => {
            return Err(StatusError::bad_request()
                .brief("Provide exactly one of product_uuid or barcode"));
        }
    }
    .map_err(into_status_error)?;

    Ok(Json(snapshot.into()))
}
