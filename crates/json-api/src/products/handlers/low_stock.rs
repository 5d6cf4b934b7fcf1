//! Low Stock Products Handler

use salvo::prelude::*;

use crate::{
    extensions::*,
    products::{errors::into_status_error, index::ProductsResponse},
};

/// Low Stock Products Handler
///
/// Products at or below their minimum stock, newest first.
#[endpoint(
    tags("products"),
    summary = "List Low Stock Products",
    responses(
        (status_code = StatusCode::OK, description = "Products needing a restock"),
        (status_code = StatusCode::SERVICE_UNAVAILABLE, description = "Product store unavailable"),
    ),
)]
pub(crate) async fn handler(depot: &mut Depot) -> Result<Json<ProductsResponse>, StatusError> {
    let products = depot
        .app_or_500()?
        .products
        .low_stock_products()
        .await
        .map_err(into_status_error)?;

    Ok(Json(ProductsResponse {
        products: products.into_iter().map(Into::into).collect(),
    }))
}
