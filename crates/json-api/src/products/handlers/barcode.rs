//! Find Product By Barcode Handler

use salvo::{oapi::extract::PathParam, prelude::*};

use crate::{
    extensions::*,
    products::{errors::into_status_error, models::ProductResponse},
};

/// Find Product By Barcode Handler
///
/// Exact match on the scanned barcode.
#[endpoint(
    tags("products"),
    summary = "Find Product By Barcode",
    responses(
        (status_code = StatusCode::OK, description = "Product"),
        (status_code = StatusCode::NOT_FOUND, description = "No product carries the barcode"),
    ),
)]
pub(crate) async fn handler(
    barcode: PathParam<String>,
    depot: &mut Depot,
) -> Result<Json<ProductResponse>, StatusError> {
    let product = depot
        .app_or_500()?
        .products
        .find_by_barcode(barcode.into_inner())
        .await
        .map_err(into_status_error)?;

    Ok(Json(product.into()))
}
