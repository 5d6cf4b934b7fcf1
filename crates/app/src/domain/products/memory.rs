//! In-memory product store.

use std::sync::Arc;

use async_trait::async_trait;
use jiff::Timestamp;
use kasir::{
    catalog,
    products::{NewProduct, Product, ProductUpdate, ProductUuid},
};
use tokio::sync::RwLock;
use tracing::info;

use crate::domain::products::{ProductsService, errors::ProductsServiceError};

/// Process-local product store, most recently created product first.
#[derive(Debug, Clone, Default)]
pub struct InMemoryProductsService {
    products: Arc<RwLock<Vec<Product>>>,
}

impl InMemoryProductsService {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Seed the store with products, given newest first.
    #[must_use]
    pub fn with_products(products: Vec<Product>) -> Self {
        Self {
            products: Arc::new(RwLock::new(products)),
        }
    }
}

#[async_trait]
impl ProductsService for InMemoryProductsService {
    async fn list_products(&self) -> Result<Vec<Product>, ProductsServiceError> {
        Ok(self.products.read().await.clone())
    }

    async fn get_product(&self, product: ProductUuid) -> Result<Product, ProductsServiceError> {
        self.products
            .read()
            .await
            .iter()
            .find(|p| p.uuid == product)
            .cloned()
            .ok_or(ProductsServiceError::NotFound)
    }

    async fn create_product(&self, product: NewProduct) -> Result<Product, ProductsServiceError> {
        let product = product.into_product(ProductUuid::new(), Timestamp::now())?;

        let mut products = self.products.write().await;

        if barcode_taken(&products, product.barcode.as_deref(), None) {
            return Err(ProductsServiceError::AlreadyExists);
        }

        products.insert(0, product.clone());

        info!(product_uuid = %product.uuid, "created product");

        Ok(product)
    }

    async fn update_product(
        &self,
        product: ProductUuid,
        update: ProductUpdate,
    ) -> Result<Product, ProductsServiceError> {
        update.validate()?;

        let mut products = self.products.write().await;

        if barcode_taken(&products, update.barcode.as_deref(), Some(product)) {
            return Err(ProductsServiceError::AlreadyExists);
        }

        let existing = products
            .iter_mut()
            .find(|p| p.uuid == product)
            .ok_or(ProductsServiceError::NotFound)?;

        existing.apply(update, Timestamp::now());

        Ok(existing.clone())
    }

    async fn delete_product(&self, product: ProductUuid) -> Result<(), ProductsServiceError> {
        let mut products = self.products.write().await;

        let index = products
            .iter()
            .position(|p| p.uuid == product)
            .ok_or(ProductsServiceError::NotFound)?;

        products.remove(index);

        info!(product_uuid = %product, "deleted product");

        Ok(())
    }

    async fn low_stock_products(&self) -> Result<Vec<Product>, ProductsServiceError> {
        let products = self.products.read().await;

        Ok(catalog::low_stock(&products).into_iter().cloned().collect())
    }

    async fn find_by_barcode(&self, barcode: String) -> Result<Product, ProductsServiceError> {
        let products = self.products.read().await;

        catalog::find_by_barcode(&products, &barcode)
            .cloned()
            .ok_or(ProductsServiceError::NotFound)
    }
}

/// Barcodes are unique across the catalog; blank barcodes never clash.
fn barcode_taken(products: &[Product], barcode: Option<&str>, except: Option<ProductUuid>) -> bool {
    let Some(barcode) = barcode.filter(|barcode| !barcode.trim().is_empty()) else {
        return false;
    };

    products
        .iter()
        .filter(|p| Some(p.uuid) != except)
        .any(|p| p.barcode.as_deref() == Some(barcode))
}

#[cfg(test)]
mod tests {
    use kasir::products::Category;
    use testresult::TestResult;

    use super::*;

    fn new_product(name: &str, stock: u32, min_stock: u32) -> NewProduct {
        NewProduct {
            name: name.to_string(),
            price: Some(1_000),
            category: Some(Category::Food),
            stock,
            min_stock,
            ..NewProduct::default()
        }
    }

    #[tokio::test]
    async fn created_product_is_listed_first() -> TestResult {
        let store = InMemoryProductsService::new();

        let first = store.create_product(new_product("Gula", 5, 1)).await?;
        let second = store.create_product(new_product("Kopi", 5, 1)).await?;

        let uuids: Vec<ProductUuid> = store
            .list_products()
            .await?
            .iter()
            .map(|p| p.uuid)
            .collect();

        assert_eq!(uuids, [second.uuid, first.uuid]);
        assert_eq!(first.created_at, first.updated_at);

        Ok(())
    }

    #[tokio::test]
    async fn create_rejects_incomplete_products() {
        let store = InMemoryProductsService::new();

        let result = store
            .create_product(NewProduct {
                price: None,
                ..new_product("Gula", 1, 0)
            })
            .await;

        assert!(
            matches!(result, Err(ProductsServiceError::Validation(_))),
            "expected Validation, got {result:?}"
        );
        assert!(store.products.read().await.is_empty());
    }

    #[tokio::test]
    async fn update_writes_only_provided_fields() -> TestResult {
        let store = InMemoryProductsService::new();
        let created = store.create_product(new_product("Gula", 20, 5)).await?;

        let updated = store
            .update_product(created.uuid, ProductUpdate::stock(17))
            .await?;

        assert_eq!(updated.stock, 17);
        assert_eq!(updated.name, "Gula");
        assert_eq!(updated.min_stock, 5);
        assert!(updated.updated_at >= created.updated_at);
        assert_eq!(store.get_product(created.uuid).await?, updated);

        Ok(())
    }

    #[tokio::test]
    async fn duplicate_barcode_is_rejected() -> TestResult {
        let store = InMemoryProductsService::new();
        let with_barcode = |name: &str| NewProduct {
            barcode: Some("8991002".to_string()),
            ..new_product(name, 5, 1)
        };

        let tea = store.create_product(with_barcode("Teh")).await?;
        let coffee = store.create_product(new_product("Kopi", 5, 1)).await?;

        let created = store.create_product(with_barcode("Teh Kotak")).await;
        let updated = store
            .update_product(
                coffee.uuid,
                ProductUpdate {
                    barcode: Some("8991002".to_string()),
                    ..ProductUpdate::default()
                },
            )
            .await;

        assert!(
            matches!(created, Err(ProductsServiceError::AlreadyExists)),
            "expected AlreadyExists, got {created:?}"
        );
        assert!(
            matches!(updated, Err(ProductsServiceError::AlreadyExists)),
            "expected AlreadyExists, got {updated:?}"
        );
        assert_eq!(store.list_products().await?.len(), 2);

        store
            .update_product(
                tea.uuid,
                ProductUpdate {
                    barcode: Some("8991002".to_string()),
                    ..ProductUpdate::default()
                },
            )
            .await?;

        Ok(())
    }

    #[tokio::test]
    async fn update_unknown_product_returns_not_found() {
        let store = InMemoryProductsService::new();

        let result = store
            .update_product(ProductUuid::new(), ProductUpdate::stock(1))
            .await;

        assert!(
            matches!(result, Err(ProductsServiceError::NotFound)),
            "expected NotFound, got {result:?}"
        );
    }

    #[tokio::test]
    async fn second_delete_returns_not_found() -> TestResult {
        let store = InMemoryProductsService::new();
        let created = store.create_product(new_product("Gula", 1, 0)).await?;

        store.delete_product(created.uuid).await?;

        let result = store.delete_product(created.uuid).await;

        assert!(
            matches!(result, Err(ProductsServiceError::NotFound)),
            "expected NotFound, got {result:?}"
        );

        Ok(())
    }

    #[tokio::test]
    async fn low_stock_keeps_listing_order() -> TestResult {
        let store = InMemoryProductsService::new();

        let oil = store.create_product(new_product("Minyak", 3, 5)).await?;
        store.create_product(new_product("Teh", 24, 12)).await?;
        let soap = store.create_product(new_product("Sabun", 0, 0)).await?;

        let uuids: Vec<ProductUuid> = store
            .low_stock_products()
            .await?
            .iter()
            .map(|p| p.uuid)
            .collect();

        assert_eq!(uuids, [soap.uuid, oil.uuid]);

        Ok(())
    }

    #[tokio::test]
    async fn barcode_lookup_is_exact() -> TestResult {
        let store = InMemoryProductsService::new();

        store
            .create_product(NewProduct {
                barcode: Some("8991002".to_string()),
                ..new_product("Teh", 24, 12)
            })
            .await?;

        assert_eq!(
            store.find_by_barcode("8991002".to_string()).await?.name,
            "Teh"
        );
        assert!(matches!(
            store.find_by_barcode("899100".to_string()).await,
            Err(ProductsServiceError::NotFound)
        ));

        Ok(())
    }
}
