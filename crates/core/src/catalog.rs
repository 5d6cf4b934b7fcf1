//! Catalog queries
//!
//! Pure, read-only views over a snapshot of the product catalog: search, category filtering,
//! stock status and the inventory summary shown to shop owners.

use std::collections::BTreeMap;

use rust_decimal::{Decimal, RoundingStrategy, prelude::ToPrimitive};

use crate::products::{Category, Product};

/// Category filter; `All` is the identity filter.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub enum CategoryFilter {
    /// Every category
    #[default]
    All,

    /// A single category
    Only(Category),
}

impl CategoryFilter {
    /// Parse a filter value where `all` (or an empty string) means every category.
    pub fn parse(value: &str) -> Self {
        let trimmed = value.trim();

        if trimmed.is_empty()
            || trimmed.eq_ignore_ascii_case("all")
            || trimmed.eq_ignore_ascii_case("semua")
        {
            CategoryFilter::All
        } else {
            CategoryFilter::Only(Category::from(trimmed))
        }
    }

    /// Whether the product passes this filter.
    pub fn matches(&self, product: &Product) -> bool {
        match self {
            CategoryFilter::All => true,
            CategoryFilter::Only(category) => product.category == *category,
        }
    }
}

/// Stock level classification.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum StockStatus {
    /// At or below the minimum
    Critical,

    /// Above the minimum but within one and a half times of it
    Low,

    /// Comfortably stocked
    Normal,
}

impl StockStatus {
    /// Lowercase label.
    pub fn as_str(self) -> &'static str {
        match self {
            StockStatus::Critical => "critical",
            StockStatus::Low => "low",
            StockStatus::Normal => "normal",
        }
    }
}

/// Classify a product's stock against its minimum.
///
/// `Low` covers `min_stock < stock <= 1.5 * min_stock`, evaluated exactly as
/// `2 * stock <= 3 * min_stock`. With a minimum of zero the `Low` band is empty.
pub fn stock_status(product: &Product) -> StockStatus {
    let stock = u64::from(product.stock);
    let min_stock = u64::from(product.min_stock);

    if stock <= min_stock {
        StockStatus::Critical
    } else if stock * 2 <= min_stock * 3 {
        StockStatus::Low
    } else {
        StockStatus::Normal
    }
}

/// Whether the product is at or below its minimum stock.
pub fn is_low_stock(product: &Product) -> bool {
    stock_status(product) == StockStatus::Critical
}

/// Products at or below their minimum stock, in catalog order.
pub fn low_stock(products: &[Product]) -> Vec<&Product> {
    products.iter().filter(|p| is_low_stock(p)).collect()
}

/// Whether the product matches a free-text query.
///
/// Name and supplier match case-insensitively; barcodes match as typed. The query is not trimmed,
/// so surrounding spaces must appear in the field. An empty query matches everything.
pub fn matches_query(product: &Product, query: &str) -> bool {
    if query.is_empty() {
        return true;
    }

    let needle = query.to_lowercase();

    product.name.to_lowercase().contains(&needle)
        || product
            .barcode
            .as_deref()
            .is_some_and(|barcode| barcode.contains(query))
        || product
            .supplier
            .as_deref()
            .is_some_and(|supplier| supplier.to_lowercase().contains(&needle))
}

/// Free-text search over name, barcode and supplier.
pub fn search<'a>(products: &'a [Product], query: &str) -> Vec<&'a Product> {
    products
        .iter()
        .filter(|product| matches_query(product, query))
        .collect()
}

/// Keep only products in the given category.
pub fn filter_by_category<'a>(products: &'a [Product], filter: &CategoryFilter) -> Vec<&'a Product> {
    products
        .iter()
        .filter(|product| filter.matches(product))
        .collect()
}

/// Search combined with a category filter.
pub fn query<'a>(products: &'a [Product], query: &str, filter: &CategoryFilter) -> Vec<&'a Product> {
    products
        .iter()
        .filter(|product| filter.matches(product) && matches_query(product, query))
        .collect()
}

/// Exact barcode lookup, as used by the scanner.
pub fn find_by_barcode<'a>(products: &'a [Product], barcode: &str) -> Option<&'a Product> {
    let barcode = barcode.trim();

    if barcode.is_empty() {
        return None;
    }

    products
        .iter()
        .find(|product| product.barcode.as_deref() == Some(barcode))
}

/// Owner-facing aggregate figures for the catalog.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct InventorySummary {
    /// Number of products
    pub product_count: usize,

    /// Number of products at or below minimum stock
    pub low_stock_count: usize,

    /// Sum of price times stock, in minor units
    pub inventory_value: u64,

    /// Mean unit price, rounded to whole minor units
    pub average_price: Option<u64>,

    /// Category holding the most products; ties go to the earlier category
    pub top_category: Option<Category>,
}

impl InventorySummary {
    /// Compute the summary for a catalog snapshot.
    pub fn from_products(products: &[Product]) -> Self {
        let inventory_value = products.iter().fold(0_u64, |acc, product| {
            acc.saturating_add(product.price.saturating_mul(u64::from(product.stock)))
        });

        let average_price = if products.is_empty() {
            None
        } else {
            let total: Decimal = products.iter().map(|product| Decimal::from(product.price)).sum();

            (total / Decimal::from(products.len()))
                .round_dp_with_strategy(0, RoundingStrategy::MidpointAwayFromZero)
                .to_u64()
        };

        let mut counts: BTreeMap<&Category, usize> = BTreeMap::new();

        for product in products {
            *counts.entry(&product.category).or_default() += 1;
        }

        let mut top_category: Option<(&Category, usize)> = None;

        for (category, count) in counts {
            if top_category.is_none_or(|(_, best)| count > best) {
                top_category = Some((category, count));
            }
        }

        Self {
            product_count: products.len(),
            low_stock_count: products.iter().filter(|p| is_low_stock(p)).count(),
            inventory_value,
            average_price,
            top_category: top_category.map(|(category, _)| category.clone()),
        }
    }
}
