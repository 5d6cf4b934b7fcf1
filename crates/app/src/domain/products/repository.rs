//! Products Repository

use jiff::Timestamp;
use jiff_sqlx::Timestamp as SqlxTimestamp;
use kasir::products::{Product, ProductUpdate, ProductUuid, non_blank};
use sqlx::{Postgres, QueryBuilder, Transaction, query, query_as};

use crate::domain::products::records::{ProductRecord, convert_int};

const LIST_PRODUCTS_SQL: &str = include_str!("sql/list_products.sql");
const GET_PRODUCT_SQL: &str = include_str!("sql/get_product.sql");
const FIND_BY_BARCODE_SQL: &str = include_str!("sql/find_by_barcode.sql");
const LOW_STOCK_PRODUCTS_SQL: &str = include_str!("sql/low_stock_products.sql");
const CREATE_PRODUCT_SQL: &str = include_str!("sql/create_product.sql");
const DELETE_PRODUCT_SQL: &str = include_str!("sql/delete_product.sql");

const RETURNING_COLUMNS: &str = " RETURNING uuid, name, price, category, stock, min_stock, \
    barcode, description, supplier, image, created_at, updated_at";

#[derive(Debug, Clone, Default)]
pub(crate) struct PgProductsRepository;

impl PgProductsRepository {
    #[must_use]
    pub(crate) fn new() -> Self {
        Self
    }

    pub(crate) async fn list_products(
        &self,
        tx: &mut Transaction<'_, Postgres>,
    ) -> Result<Vec<Product>, sqlx::Error> {
        let records = query_as::<Postgres, ProductRecord>(LIST_PRODUCTS_SQL)
            .fetch_all(&mut **tx)
            .await?;

        Ok(records.into_iter().map(Product::from).collect())
    }

    pub(crate) async fn low_stock_products(
        &self,
        tx: &mut Transaction<'_, Postgres>,
    ) -> Result<Vec<Product>, sqlx::Error> {
        let records = query_as::<Postgres, ProductRecord>(LOW_STOCK_PRODUCTS_SQL)
            .fetch_all(&mut **tx)
            .await?;

        Ok(records.into_iter().map(Product::from).collect())
    }

    pub(crate) async fn get_product(
        &self,
        tx: &mut Transaction<'_, Postgres>,
        product: ProductUuid,
    ) -> Result<Product, sqlx::Error> {
        query_as::<Postgres, ProductRecord>(GET_PRODUCT_SQL)
            .bind(product.into_uuid())
            .fetch_one(&mut **tx)
            .await
            .map(Product::from)
    }

    pub(crate) async fn find_by_barcode(
        &self,
        tx: &mut Transaction<'_, Postgres>,
        barcode: &str,
    ) -> Result<Product, sqlx::Error> {
        query_as::<Postgres, ProductRecord>(FIND_BY_BARCODE_SQL)
            .bind(barcode)
            .fetch_one(&mut **tx)
            .await
            .map(Product::from)
    }

    pub(crate) async fn create_product(
        &self,
        tx: &mut Transaction<'_, Postgres>,
        product: &Product,
    ) -> Result<Product, sqlx::Error> {
        let price: i64 = convert_int("price", product.price)?;
        let stock: i32 = convert_int("stock", product.stock)?;
        let min_stock: i32 = convert_int("min_stock", product.min_stock)?;

        query_as::<Postgres, ProductRecord>(CREATE_PRODUCT_SQL)
            .bind(product.uuid.into_uuid())
            .bind(&product.name)
            .bind(price)
            .bind(product.category.as_str())
            .bind(stock)
            .bind(min_stock)
            .bind(&product.barcode)
            .bind(&product.description)
            .bind(&product.supplier)
            .bind(&product.image)
            .bind(SqlxTimestamp::from(product.created_at))
            .fetch_one(&mut **tx)
            .await
            .map(Product::from)
    }

    pub(crate) async fn update_product(
        &self,
        tx: &mut Transaction<'_, Postgres>,
        product: ProductUuid,
        update: ProductUpdate,
        now: Timestamp,
    ) -> Result<Product, sqlx::Error> {
        let mut builder = update_product_query(product, update, now)?;

        builder
            .build_query_as::<ProductRecord>()
            .fetch_one(&mut **tx)
            .await
            .map(Product::from)
    }

    pub(crate) async fn delete_product(
        &self,
        tx: &mut Transaction<'_, Postgres>,
        product: ProductUuid,
    ) -> Result<u64, sqlx::Error> {
        let rows_affected = query(DELETE_PRODUCT_SQL)
            .bind(product.into_uuid())
            .execute(&mut **tx)
            .await?
            .rows_affected();

        Ok(rows_affected)
    }
}

/// Build an `UPDATE` that only writes the provided columns and always stamps `updated_at`.
fn update_product_query(
    product: ProductUuid,
    update: ProductUpdate,
    now: Timestamp,
) -> Result<QueryBuilder<'static, Postgres>, sqlx::Error> {
    let ProductUpdate {
        name,
        price,
        category,
        stock,
        min_stock,
        barcode,
        description,
        supplier,
        image,
    } = update;

    let mut builder = QueryBuilder::<Postgres>::new("UPDATE products SET updated_at = ");

    builder.push_bind(SqlxTimestamp::from(now));

    if let Some(name) = name {
        builder.push(", name = ").push_bind(name.trim().to_string());
    }

    if let Some(price) = price {
        builder
            .push(", price = ")
            .push_bind(convert_int::<u64, i64>("price", price)?);
    }

    if let Some(category) = category {
        builder
            .push(", category = ")
            .push_bind(category.as_str().to_string());
    }

    if let Some(stock) = stock {
        builder
            .push(", stock = ")
            .push_bind(convert_int::<u32, i32>("stock", stock)?);
    }

    if let Some(min_stock) = min_stock {
        builder
            .push(", min_stock = ")
            .push_bind(convert_int::<u32, i32>("min_stock", min_stock)?);
    }

    for (column, value) in [
        ("barcode", barcode),
        ("description", description),
        ("supplier", supplier),
        ("image", image),
    ] {
        if let Some(value) = value {
            builder
                .push(", ")
                .push(column)
                .push(" = ")
                .push_bind(non_blank(value));
        }
    }

    builder
        .push(" WHERE uuid = ")
        .push_bind(product.into_uuid())
        .push(RETURNING_COLUMNS);

    Ok(builder)
}

#[cfg(test)]
mod tests {
    use kasir::products::Category;
    use testresult::TestResult;

    use super::*;

    #[test]
    fn stock_only_update_writes_stock_and_timestamp() -> TestResult {
        let builder =
            update_product_query(ProductUuid::new(), ProductUpdate::stock(17), Timestamp::now())?;

        let sql = builder.sql();

        assert!(sql.starts_with("UPDATE products SET updated_at = $1, stock = $2 WHERE uuid = $3"));
        assert!(!sql.contains("price ="), "price must not be written: {sql}");

        Ok(())
    }

    #[test]
    fn update_writes_provided_columns_in_order() -> TestResult {
        let update = ProductUpdate {
            name: Some("Teh Botol".to_string()),
            category: Some(Category::Beverage),
            min_stock: Some(12),
            supplier: Some(String::new()),
            ..ProductUpdate::default()
        };

        let builder = update_product_query(ProductUuid::new(), update, Timestamp::now())?;

        assert!(builder.sql().starts_with(
            "UPDATE products SET updated_at = $1, name = $2, category = $3, min_stock = $4, \
             supplier = $5 WHERE uuid = $6"
        ));

        Ok(())
    }

    #[test]
    fn oversized_stock_is_rejected_before_querying() {
        let result = update_product_query(
            ProductUuid::new(),
            ProductUpdate::stock(u32::MAX),
            Timestamp::now(),
        );

        assert!(result.is_err());
    }
}
