//! Product Models

use salvo::oapi::ToSchema;
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use kasir::{catalog::stock_status, products::Product};

#[derive(Debug, Serialize, Deserialize, ToSchema)]
pub(crate) struct ProductResponse {
    /// The unique identifier of the product
    pub uuid: Uuid,

    /// Display name
    pub name: String,

    /// Unit price in rupiah
    pub price: u64,

    /// Category key
    pub category: String,

    /// Units on hand
    pub stock: u32,

    /// Low stock threshold
    pub min_stock: u32,

    /// `critical`, `low` or `normal`
    pub stock_status: String,

    pub barcode: Option<String>,

    pub description: Option<String>,

    pub supplier: Option<String>,

    pub image: Option<String>,

    /// The date and time the product was created
    pub created_at: String,

    /// The date and time the product was last updated
    pub updated_at: String,
}

impl From<Product> for ProductResponse {
    fn from(product: Product) -> Self {
        ProductResponse {
            uuid: product.uuid.into(),
            stock_status: stock_status(&product).as_str().to_string(),
            category: product.category.as_str().to_string(),
            name: product.name,
            price: product.price,
            stock: product.stock,
            min_stock: product.min_stock,
            barcode: product.barcode,
            description: product.description,
            supplier: product.supplier,
            image: product.image,
            created_at: product.created_at.to_string(),
            updated_at: product.updated_at.to_string(),
        }
    }
}
