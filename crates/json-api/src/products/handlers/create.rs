//! Create Product Handler

use salvo::{
    http::header::LOCATION,
    oapi::{ToSchema, extract::JsonBody},
    prelude::*,
};
use serde::{Deserialize, Serialize};

use kasir::products::{Category, NewProduct};

use crate::{
    extensions::*,
    products::{errors::into_status_error, models::ProductResponse},
};

/// Create Product Request
///
/// `name`, `price` and `category` are required; they are optional here so a missing field
/// comes back as a validation error naming it.
#[derive(Debug, Default, Serialize, Deserialize, ToSchema)]
#[serde(default)]
pub(crate) struct CreateProductRequest {
    pub name: String,
    pub price: Option<u64>,
    pub category: Option<String>,
    pub stock: u32,
    pub min_stock: u32,
    pub barcode: Option<String>,
    pub description: Option<String>,
    pub supplier: Option<String>,
    pub image: Option<String>,
}

impl From<CreateProductRequest> for NewProduct {
    fn from(request: CreateProductRequest) -> Self {
        NewProduct {
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

/// Create Product Handler
#[endpoint(
    tags("products"),
    summary = "Create Product",
    responses(
        (status_code = StatusCode::CREATED, description = "Product created"),
        (status_code = StatusCode::BAD_REQUEST, description = "Missing name, price or category"),
        (status_code = StatusCode::SERVICE_UNAVAILABLE, description = "Product store unavailable"),
        (status_code = StatusCode::INTERNAL_SERVER_ERROR, description = "Internal Server Error"),
    ),
)]
#[tracing::instrument(
    name = "products.create",
    skip(json, depot, res),
    fields(product_uuid = tracing::field::Empty),
    err
)]
pub(crate) async fn handler(
    json: JsonBody<CreateProductRequest>,
    depot: &mut Depot,
    res: &mut Response,
) -> Result<Json<ProductResponse>, StatusError> {
    let product = depot
        .app_or_500()?
        .products
        .create_product(json.into_inner().into())
        .await
        .map_err(into_status_error)?;

    tracing::Span::current().record("product_uuid", tracing::field::display(product.uuid));

    res.add_header(LOCATION, format!("/products/{}", product.uuid), true)
        .or_500("failed to set location header")?
        .status_code(StatusCode::CREATED);

    Ok(Json(product.into()))
}
