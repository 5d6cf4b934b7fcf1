//! Product Errors

use salvo::http::StatusError;
use tracing::error;

use kasir_app::domain::products::ProductsServiceError;

pub(crate) fn into_status_error(error: ProductsServiceError) -> StatusError {
    match error {
        ProductsServiceError::AlreadyExists => {
            StatusError::conflict().brief("Product already exists")
        }
        ProductsServiceError::Validation(source) => StatusError::bad_request()
            .brief("Invalid product payload")
            .detail(source.to_string()),
        ProductsServiceError::InvalidData => {
            StatusError::bad_request().brief("Invalid product payload")
        }
        ProductsServiceError::NotFound => StatusError::not_found().brief("Product not found"),
        ProductsServiceError::Unavailable(source) => {
            error!("product store unavailable: {source}");

            StatusError::service_unavailable().brief("Product store unavailable")
        }
        ProductsServiceError::Sql(source) => {
            error!("product store query failed: {source}");

            StatusError::internal_server_error()
        }
    }
}
