//! Products service.

use async_trait::async_trait;
use jiff::Timestamp;
use kasir::products::{NewProduct, Product, ProductUpdate, ProductUuid};
use mockall::automock;
use tracing::{Span, info};

use crate::{
    database::Db,
    domain::products::{errors::ProductsServiceError, repository::PgProductsRepository},
};

#[derive(Debug, Clone)]
pub struct PgProductsService {
    db: Db,
    repository: PgProductsRepository,
}

impl PgProductsService {
    #[must_use]
    pub fn new(db: Db) -> Self {
        Self {
            db,
            repository: PgProductsRepository::new(),
        }
    }
}

#[async_trait]
impl ProductsService for PgProductsService {
    async fn list_products(&self) -> Result<Vec<Product>, ProductsServiceError> {
        let mut tx = self.db.begin().await?;

        let products = self.repository.list_products(&mut tx).await?;

        tx.commit().await?;

        Ok(products)
    }

    async fn get_product(&self, product: ProductUuid) -> Result<Product, ProductsServiceError> {
        let mut tx = self.db.begin().await?;

        let product = self.repository.get_product(&mut tx, product).await?;

        tx.commit().await?;

        Ok(product)
    }

    #[tracing::instrument(
        name = "products.service.create_product",
        skip(self, product),
        fields(product_uuid = tracing::field::Empty),
        err
    )]
    async fn create_product(&self, product: NewProduct) -> Result<Product, ProductsServiceError> {
        let product = product.into_product(ProductUuid::new(), Timestamp::now())?;

        Span::current().record("product_uuid", tracing::field::display(product.uuid));

        let mut tx = self.db.begin().await?;

        let created = self.repository.create_product(&mut tx, &product).await?;

        tx.commit().await?;

        info!(product_uuid = %created.uuid, "created product");

        Ok(created)
    }

    #[tracing::instrument(
        name = "products.service.update_product",
        skip(self, update),
        fields(product_uuid = %product),
        err
    )]
    async fn update_product(
        &self,
        product: ProductUuid,
        update: ProductUpdate,
    ) -> Result<Product, ProductsServiceError> {
        update.validate()?;

        let mut tx = self.db.begin().await?;

        let updated = self
            .repository
            .update_product(&mut tx, product, update, Timestamp::now())
            .await?;

        tx.commit().await?;

        Ok(updated)
    }

    #[tracing::instrument(
        name = "products.service.delete_product",
        skip(self),
        fields(product_uuid = %product),
        err
    )]
    async fn delete_product(&self, product: ProductUuid) -> Result<(), ProductsServiceError> {
        let mut tx = self.db.begin().await?;

        let rows_affected = self.repository.delete_product(&mut tx, product).await?;

        if rows_affected == 0 {
            return Err(ProductsServiceError::NotFound);
        }

        tx.commit().await?;

        info!(product_uuid = %product, "deleted product");

        Ok(())
    }

    async fn low_stock_products(&self) -> Result<Vec<Product>, ProductsServiceError> {
        let mut tx = self.db.begin().await?;

        let products = self.repository.low_stock_products(&mut tx).await?;

        tx.commit().await?;

        Ok(products)
    }

    async fn find_by_barcode(&self, barcode: String) -> Result<Product, ProductsServiceError> {
        let barcode = barcode.trim();

        if barcode.is_empty() {
            return Err(ProductsServiceError::NotFound);
        }

        let mut tx = self.db.begin().await?;

        let product = self.repository.find_by_barcode(&mut tx, barcode).await?;

        tx.commit().await?;

        Ok(product)
    }
}

#[automock]
#[async_trait]
pub trait ProductsService: Send + Sync {
    /// Retrieves all products, most recently created first.
    async fn list_products(&self) -> Result<Vec<Product>, ProductsServiceError>;

    /// Retrieve a single product.
    async fn get_product(&self, product: ProductUuid) -> Result<Product, ProductsServiceError>;

    /// Validates and stores a new product, assigning its UUID and timestamps.
    async fn create_product(&self, product: NewProduct) -> Result<Product, ProductsServiceError>;

    /// Writes the provided fields of `update` and stamps `updated_at`.
    async fn update_product(
        &self,
        product: ProductUuid,
        update: ProductUpdate,
    ) -> Result<Product, ProductsServiceError>;

    /// Deletes a product with the given UUID.
    async fn delete_product(&self, product: ProductUuid) -> Result<(), ProductsServiceError>;

    /// Products at or below their minimum stock, in listing order.
    async fn low_stock_products(&self) -> Result<Vec<Product>, ProductsServiceError>;

    /// Exact barcode lookup.
    async fn find_by_barcode(&self, barcode: String) -> Result<Product, ProductsServiceError>;
}

#[cfg(test)]
mod tests {
    use kasir::products::Category;
    use testresult::TestResult;

    use crate::test::TestContext;

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
    #[ignore = "requires docker"]
    async fn create_product_persists_every_field() -> TestResult {
        let ctx = TestContext::new().await;

        let product = ctx
            .products
            .create_product(NewProduct {
                barcode: Some("8991001".to_string()),
                supplier: Some("CV Sumber Tani".to_string()),
                ..new_product("Beras Premium 5kg", 40, 10)
            })
            .await?;

        let fetched = ctx.products.get_product(product.uuid).await?;

        assert_eq!(fetched.name, "Beras Premium 5kg");
        assert_eq!(fetched.price, 1_000);
        assert_eq!(fetched.category, Category::Food);
        assert_eq!(fetched.stock, 40);
        assert_eq!(fetched.min_stock, 10);
        assert_eq!(fetched.barcode.as_deref(), Some("8991001"));
        assert_eq!(fetched.supplier.as_deref(), Some("CV Sumber Tani"));

        Ok(())
    }

    #[tokio::test]
    #[ignore = "requires docker"]
    async fn list_products_returns_newest_first() -> TestResult {
        let ctx = TestContext::new().await;

        let first = ctx.products.create_product(new_product("Gula", 5, 1)).await?;
        let second = ctx.products.create_product(new_product("Kopi", 5, 1)).await?;

        let uuids: Vec<ProductUuid> = ctx
            .products
            .list_products()
            .await?
            .iter()
            .map(|p| p.uuid)
            .collect();

        assert_eq!(uuids, [second.uuid, first.uuid]);

        Ok(())
    }

    #[tokio::test]
    #[ignore = "requires docker"]
    async fn update_product_writes_only_provided_fields() -> TestResult {
        let ctx = TestContext::new().await;

        let created = ctx.products.create_product(new_product("Gula", 20, 5)).await?;

        let updated = ctx
            .products
            .update_product(created.uuid, ProductUpdate::stock(17))
            .await?;

        assert_eq!(updated.stock, 17);
        assert_eq!(updated.name, "Gula");
        assert_eq!(updated.min_stock, 5);
        assert!(updated.updated_at >= created.updated_at);

        Ok(())
    }

    #[tokio::test]
    #[ignore = "requires docker"]
    async fn update_product_unknown_uuid_returns_not_found() {
        let ctx = TestContext::new().await;

        let result = ctx
            .products
            .update_product(ProductUuid::new(), ProductUpdate::stock(1))
            .await;

        assert!(
            matches!(result, Err(ProductsServiceError::NotFound)),
            "expected NotFound, got {result:?}"
        );
    }

    #[tokio::test]
    #[ignore = "requires docker"]
    async fn delete_product_twice_returns_not_found() -> TestResult {
        let ctx = TestContext::new().await;

        let created = ctx.products.create_product(new_product("Gula", 1, 0)).await?;

        ctx.products.delete_product(created.uuid).await?;

        let result = ctx.products.delete_product(created.uuid).await;

        assert!(
            matches!(result, Err(ProductsServiceError::NotFound)),
            "expected NotFound, got {result:?}"
        );

        Ok(())
    }

    #[tokio::test]
    #[ignore = "requires docker"]
    async fn low_stock_and_barcode_lookups() -> TestResult {
        let ctx = TestContext::new().await;

        let low = ctx.products.create_product(new_product("Minyak", 3, 5)).await?;

        ctx.products
            .create_product(NewProduct {
                barcode: Some("8991002".to_string()),
                ..new_product("Teh", 24, 12)
            })
            .await?;

        let low_stock = ctx.products.low_stock_products().await?;
        let scanned = ctx.products.find_by_barcode("8991002".to_string()).await?;

        assert_eq!(low_stock.len(), 1);
        assert_eq!(low_stock.first().map(|p| p.uuid), Some(low.uuid));
        assert_eq!(scanned.name, "Teh");

        Ok(())
    }

    #[tokio::test]
    async fn create_product_rejects_missing_name_before_connecting() {
        let ctx = TestContext::lazy();

        let result = ctx.products.create_product(new_product("  ", 1, 0)).await;

        assert!(
            matches!(result, Err(ProductsServiceError::Validation(_))),
            "expected Validation, got {result:?}"
        );
    }
}
