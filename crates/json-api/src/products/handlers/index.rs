//! Product Index Handler

use salvo::{
    oapi::{ToSchema, extract::QueryParam},
    prelude::*,
};
use serde::{Deserialize, Serialize};

use kasir::catalog::{self, CategoryFilter};

use crate::{
    extensions::*,
    products::{errors::into_status_error, models::ProductResponse},
};

#[derive(Debug, Serialize, Deserialize, ToSchema)]
pub(crate) struct ProductsResponse {
    /// The list of products
    pub products: Vec<ProductResponse>,
}

/// Product Index Handler
///
/// Returns products newest first, optionally narrowed by a search query and a category.
#[endpoint(
    tags("products"),
    summary = "List Products",
    responses(
        (status_code = StatusCode::OK, description = "Matching products"),
        (status_code = StatusCode::SERVICE_UNAVAILABLE, description = "Product store unavailable"),
    ),
)]
pub(crate) async fn handler(
    q: QueryParam<String, false>,
    category: QueryParam<String, false>,
    depot: &mut Depot,
) -> Result<Json<ProductsResponse>, StatusError> {
    let products = depot
        .app_or_500()?
        .products
        .list_products()
        .await
        .map_err(into_status_error)?;

    let query = q.into_inner().unwrap_or_default();
    let filter = CategoryFilter::parse(&category.into_inner().unwrap_or_default());

    Ok(Json(ProductsResponse {
        products: catalog::query(&products, &query, &filter)
            .into_iter()
            .cloned()
            .map(Into::into)
            .collect(),
    }))
}
