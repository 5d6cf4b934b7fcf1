//! Update Product Handler

use salvo::{
    oapi::{
        ToSchema,
        extract::{JsonBody, PathParam},
    },
    prelude::*,
};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use kasir::products::{Category, ProductUpdate};

use crate::{
    extensions::*,
    products::{errors::into_status_error, models::ProductResponse},
};

/// Update Product Request
///
/// Omitted fields are left as they are. A blank string clears an optional text field.
#[derive(Debug, Default, Serialize, Deserialize, ToSchema)]
#[serde(default)]
pub(crate) struct UpdateProductRequest {
    pub name: Option<String>,
    pub price: Option<u64>,
    pub category: Option<String>,
    pub stock: Option<u32>,
    pub min_stock: Option<u32>,
    pub barcode: Option<String>,
    pub description: Option<String>,
    pub supplier: Option<String>,
    pub image: Option<String>,
}

impl From<UpdateProductRequest> for ProductUpdate {
    fn from(request: UpdateProductRequest) -> Self {
        ProductUpdate {
            name: request.name,
            price: request.price,
            category: request.category.as_deref().map(Category::from),
            stock: request.stock,
            min_stock: request.min_stock,
            barcode: request.barcode,
            description: request.description,
            supplier: request.supplier,
            image: request.image,
        }
    }
}

/// Product Update Handler
#[endpoint(
    tags("products"),
    summary = "Update Product",
    responses(
        (status_code = StatusCode::OK, description = "Product updated"),
        (status_code = StatusCode::NOT_FOUND, description = "Product not found"),
        (status_code = StatusCode::BAD_REQUEST, description = "Bad Request"),
        (status_code = StatusCode::SERVICE_UNAVAILABLE, description = "Product store unavailable"),
        (status_code = StatusCode::INTERNAL_SERVER_ERROR, description = "Internal Server Error"),
    ),
)]
#[tracing::instrument(
    name = "products.update",
    skip(product, json, depot),
    fields(product_uuid = tracing::field::Empty),
    err
)]
pub(crate) async fn handler(
    product: PathParam<Uuid>,
    json: JsonBody<UpdateProductRequest>,
    depot: &mut Depot,
) -> Result<Json<ProductResponse>, StatusError> {
    let product = product.into_inner();

    tracing::Span::current().record("product_uuid", tracing::field::display(product));

    let updated = depot
        .app_or_500()?
        .products
        .update_product(product.into(), json.into_inner().into())
        .await
        .map_err(into_status_error)?;

    tracing::info!(product_uuid = %product, stock = updated.stock, "updated product");

    Ok(Json(updated.into()))
}
