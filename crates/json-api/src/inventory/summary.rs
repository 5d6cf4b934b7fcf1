//! Inventory Summary Handler

use salvo::{oapi::ToSchema, prelude::*};
use serde::{Deserialize, Serialize};

use kasir::{catalog::InventorySummary, money::format_idr};

use crate::{extensions::*, products::errors::into_status_error};

/// Inventory Summary Response
#[derive(Debug, Serialize, Deserialize, ToSchema)]
pub(crate) struct InventorySummaryResponse {
    /// Number of products
    pub product_count: usize,

    /// Products at or below their minimum stock
    pub low_stock_count: usize,

    /// Sum of price times stock, in rupiah
    pub inventory_value: u64,

    /// `inventory_value` formatted for display
    pub inventory_value_display: String,

    /// Mean unit price, absent for an empty catalog
    pub average_price: Option<u64>,

    /// Category holding the most products
    pub top_category: Option<String>,
}

impl From<InventorySummary> for InventorySummaryResponse {
    fn from(summary: InventorySummary) -> Self {
        InventorySummaryResponse {
            product_count: summary.product_count,
            low_stock_count: summary.low_stock_count,
            inventory_value: summary.inventory_value,
            inventory_value_display: format_idr(summary.inventory_value),
            average_price: summary.average_price,
            top_category: summary
                .top_category
                .map(|category| category.as_str().to_string()),
        }
    }
}

/// Inventory Summary Handler
#[endpoint(
    tags("inventory"),
    summary = "Inventory Summary",
    responses(
        (status_code = StatusCode::OK, description = "Catalog figures"),
        (status_code = StatusCode::SERVICE_UNAVAILABLE, description = "Product store unavailable"),
    ),
)]
pub(crate) async fn handler(
    depot: &mut Depot,
) -> Result<Json<InventorySummaryResponse>, StatusError> {
    let products = depot
        .app_or_500()?
        .products
        .list_products()
        .await
        .map_err(into_status_error)?;

    Ok(Json(InventorySummary::from_products(&products).into()))
}
