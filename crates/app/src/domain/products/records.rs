//! Product Records

use std::num::TryFromIntError;

use jiff_sqlx::Timestamp as SqlxTimestamp;
use kasir::products::{Category, Product, ProductUuid};
use sqlx::{FromRow, Row, postgres::PgRow};

/// Product row as stored in the `products` table.
#[derive(Debug, Clone)]
pub(crate) struct ProductRecord(pub(crate) Product);

impl From<ProductRecord> for Product {
    fn from(record: ProductRecord) -> Self {
        record.0
    }
}

impl<'r> FromRow<'r, PgRow> for ProductRecord {
    fn from_row(row: &'r PgRow) -> sqlx::Result<Self> {
        let price_i64: i64 = row.try_get("price")?;
        let stock_i32: i32 = row.try_get("stock")?;
        let min_stock_i32: i32 = row.try_get("min_stock")?;
        let category: String = row.try_get("category")?;

        Ok(Self(Product {
            uuid: ProductUuid::from_uuid(row.try_get("uuid")?),
            name: row.try_get("name")?,
            price: convert_int("price", price_i64)?,
            category: Category::from(category.as_str()),
            stock: convert_int("stock", stock_i32)?,
            min_stock: convert_int("min_stock", min_stock_i32)?,
            barcode: row.try_get("barcode")?,
            description: row.try_get("description")?,
            supplier: row.try_get("supplier")?,
            image: row.try_get("image")?,
            created_at: row.try_get::<SqlxTimestamp, _>("created_at")?.to_jiff(),
            updated_at: row.try_get::<SqlxTimestamp, _>("updated_at")?.to_jiff(),
        }))
    }
}

/// Convert between the signed column types and the unsigned domain types.
pub(crate) fn convert_int<S, T>(column: &str, value: S) -> sqlx::Result<T>
where
    T: TryFrom<S, Error = TryFromIntError>,
{
    T::try_from(value).map_err(|e| sqlx::Error::ColumnDecode {
        index: column.to_string(),
        source: Box::new(e),
    })
}
