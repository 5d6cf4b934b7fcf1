//! Products

use std::{
    convert::Infallible,
    fmt::{self, Display},
    str::FromStr,
};

use jiff::Timestamp;
use thiserror::Error;

use crate::uuids::TypedUuid;

/// Product UUID
pub type ProductUuid = TypedUuid<Product>;

/// Product category.
///
/// The shop ships with three categories; anything else is carried as [`Category::Other`].
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub enum Category {
    /// Food and groceries
    Food,

    /// Drinks
    Beverage,

    /// Toiletries and personal care
    PersonalCare,

    /// Shop-defined category
    Other(String),
}

impl Category {
    /// Stable storage key of the category.
    pub fn as_str(&self) -> &str {
        match self {
            Category::Food => "food",
            Category::Beverage => "beverage",
            Category::PersonalCare => "personal_care",
            Category::Other(name) => name,
        }
    }
}

impl Display for Category {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for Category {
    type Err = Infallible;

    /// Parses storage keys and the Indonesian labels used on shop shelves.
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let trimmed = s.trim();

        Ok(match trimmed.to_lowercase().as_str() {
            "food" | "makanan" => Category::Food,
            "beverage" | "minuman" => Category::Beverage,
            "personal_care" | "perawatan" => Category::PersonalCare,
            _ => Category::Other(trimmed.to_string()),
        })
    }
}

impl From<&str> for Category {
    fn from(value: &str) -> Self {
        match value.parse() {
            Ok(category) => category,
            Err(never) => match never {},
        }
    }
}

/// Product
#[derive(Debug, Clone, PartialEq)]
pub struct Product {
    /// Product identifier
    pub uuid: ProductUuid,

    /// Display name
    pub name: String,

    /// Unit price in minor currency units
    pub price: u64,

    /// Product category
    pub category: Category,

    /// Units on hand
    pub stock: u32,

    /// Low stock threshold
    pub min_stock: u32,

    /// Barcode used for exact-match scanning
    pub barcode: Option<String>,

    /// Free text description
    pub description: Option<String>,

    /// Supplier name
    pub supplier: Option<String>,

    /// Image reference
    pub image: Option<String>,

    /// When the product was created
    pub created_at: Timestamp,

    /// When the product was last updated
    pub updated_at: Timestamp,
}

impl Product {
    /// Apply a partial update in place, stamping `updated_at`.
    pub fn apply(&mut self, update: ProductUpdate, now: Timestamp) {
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

        if let Some(name) = name {
            self.name = name.trim().to_string();
        }

        if let Some(price) = price {
            self.price = price;
        }

        if let Some(category) = category {
            self.category = category;
        }

        if let Some(stock) = stock {
            self.stock = stock;
        }

        if let Some(min_stock) = min_stock {
            self.min_stock = min_stock;
        }

        if let Some(barcode) = barcode {
            self.barcode = non_blank(barcode);
        }

        if let Some(description) = description {
            self.description = non_blank(description);
        }

        if let Some(supplier) = supplier {
            self.supplier = non_blank(supplier);
        }

        if let Some(image) = image {
            self.image = non_blank(image);
        }

        self.updated_at = now;
    }
}

/// Missing or malformed product fields.
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum ValidationError {
    /// Name is missing or blank.
    #[error("product name is required")]
    MissingName,

    /// Price is missing.
    #[error("product price is required")]
    MissingPrice,

    /// Category is missing or blank.
    #[error("product category is required")]
    MissingCategory,
}

/// New Product
///
/// Required fields are optional here so that an incomplete form can be rejected with the
/// field that is missing.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct NewProduct {
    /// Display name
    pub name: String,

    /// Unit price in minor currency units
    pub price: Option<u64>,

    /// Product category
    pub category: Option<Category>,

    /// Opening stock
    pub stock: u32,

    /// Low stock threshold
    pub min_stock: u32,

    /// Barcode
    pub barcode: Option<String>,

    /// Description
    pub description: Option<String>,

    /// Supplier name
    pub supplier: Option<String>,

    /// Image reference
    pub image: Option<String>,
}

impl NewProduct {
    /// Check the required fields.
    ///
    /// # Errors
    ///
    /// Returns the first [`ValidationError`] found, checking name, price, then category.
    pub fn validate(&self) -> Result<(), ValidationError> {
        if self.name.trim().is_empty() {
            return Err(ValidationError::MissingName);
        }

        if self.price.is_none() {
            return Err(ValidationError::MissingPrice);
        }

        match &self.category {
            None => Err(ValidationError::MissingCategory),
            Some(category) if category.as_str().trim().is_empty() => {
                Err(ValidationError::MissingCategory)
            }
            Some(_) => Ok(()),
        }
    }

    /// Validate and build the product record the store will hold.
    ///
    /// # Errors
    ///
    /// Returns a [`ValidationError`] when a required field is missing.
    pub fn into_product(
        self,
        uuid: ProductUuid,
        now: Timestamp,
    ) -> Result<Product, ValidationError> {
        self.validate()?;

        let NewProduct {
            name,
            price,
            category,
            stock,
            min_stock,
            barcode,
            description,
            supplier,
            image,
        } = self;

        Ok(Product {
            uuid,
            name: name.trim().to_string(),
            price: price.ok_or(ValidationError::MissingPrice)?,
            category: category.ok_or(ValidationError::MissingCategory)?,
            stock,
            min_stock,
            barcode: barcode.and_then(non_blank),
            description: description.and_then(non_blank),
            supplier: supplier.and_then(non_blank),
            image: image.and_then(non_blank),
            created_at: now,
            updated_at: now,
        })
    }
}

/// Product Update
///
/// Only the fields that are `Some` are written. Optional text fields set to a blank string are
/// cleared.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct ProductUpdate {
    /// New name
    pub name: Option<String>,

    /// New price
    pub price: Option<u64>,

    /// New category
    pub category: Option<Category>,

    /// New stock level
    pub stock: Option<u32>,

    /// New low stock threshold
    pub min_stock: Option<u32>,

    /// New barcode
    pub barcode: Option<String>,

    /// New description
    pub description: Option<String>,

    /// New supplier
    pub supplier: Option<String>,

    /// New image reference
    pub image: Option<String>,
}

impl ProductUpdate {
    /// An update that only sets the stock level.
    pub fn stock(stock: u32) -> Self {
        Self {
            stock: Some(stock),
            ..Self::default()
        }
    }

    /// Check that provided fields are usable.
    ///
    /// # Errors
    ///
    /// Returns [`ValidationError::MissingName`] for a blank name and
    /// [`ValidationError::MissingCategory`] for a blank category.
    pub fn validate(&self) -> Result<(), ValidationError> {
        if self.name.as_ref().is_some_and(|name| name.trim().is_empty()) {
            return Err(ValidationError::MissingName);
        }

        if self
            .category
            .as_ref()
            .is_some_and(|category| category.as_str().trim().is_empty())
        {
            return Err(ValidationError::MissingCategory);
        }

        Ok(())
    }
}

/// Map blank text to `None`.
pub fn non_blank(value: String) -> Option<String> {
    if value.trim().is_empty() {
        None
    } else {
        Some(value)
    }
}

#[cfg(test)]
mod tests {
    use testresult::TestResult;

    use super::*;

    fn complete() -> NewProduct {
        NewProduct {
            name: "Beras Premium 5kg".to_string(),
            price: Some(75_000),
            category: Some(Category::Food),
            stock: 12,
            min_stock: 5,
            barcode: Some("8991234567890".to_string()),
            ..NewProduct::default()
        }
    }

    #[test]
    fn category_parses_storage_keys_and_labels() {
        assert_eq!(Category::from("food"), Category::Food);
        assert_eq!(Category::from("Minuman"), Category::Beverage);
        assert_eq!(Category::from("PERAWATAN"), Category::PersonalCare);
        assert_eq!(
            Category::from(" Alat Tulis "),
            Category::Other("Alat Tulis".to_string())
        );
    }

    #[test]
    fn category_round_trips_through_storage_key() {
        for category in [Category::Food, Category::Beverage, Category::PersonalCare] {
            assert_eq!(Category::from(category.as_str()), category);
        }
    }

    #[test]
    fn validate_requires_name_price_and_category() {
        let blank_name = NewProduct {
            name: "  ".to_string(),
            ..complete()
        };
        let no_price = NewProduct {
            price: None,
            ..complete()
        };
        let no_category = NewProduct {
            category: None,
            ..complete()
        };

        assert_eq!(blank_name.validate(), Err(ValidationError::MissingName));
        assert_eq!(no_price.validate(), Err(ValidationError::MissingPrice));
        assert_eq!(no_category.validate(), Err(ValidationError::MissingCategory));
        assert_eq!(complete().validate(), Ok(()));
    }

    #[test]
    fn zero_price_is_valid() {
        let free = NewProduct {
            price: Some(0),
            ..complete()
        };

        assert_eq!(free.validate(), Ok(()));
    }

    #[test]
    fn into_product_trims_name_and_drops_blank_text() -> TestResult {
        let uuid = ProductUuid::new();
        let now = Timestamp::UNIX_EPOCH;

        let product = NewProduct {
            name: " Teh Botol ".to_string(),
            supplier: Some(String::new()),
            ..complete()
        }
        .into_product(uuid, now)?;

        assert_eq!(product.uuid, uuid);
        assert_eq!(product.name, "Teh Botol");
        assert_eq!(product.supplier, None);
        assert_eq!(product.created_at, now);
        assert_eq!(product.updated_at, now);

        Ok(())
    }

    #[test]
    fn apply_only_touches_provided_fields() -> TestResult {
        let created = Timestamp::UNIX_EPOCH;
        let later: Timestamp = "2026-03-01T08:00:00Z".parse()?;
        let mut product = complete().into_product(ProductUuid::new(), created)?;

        product.apply(
            ProductUpdate {
                price: Some(80_000),
                barcode: Some(String::new()),
                ..ProductUpdate::default()
            },
            later,
        );

        assert_eq!(product.price, 80_000);
        assert_eq!(product.barcode, None);
        assert_eq!(product.stock, 12);
        assert_eq!(product.name, "Beras Premium 5kg");
        assert_eq!(product.updated_at, later);
        assert_eq!(product.created_at, created);

        Ok(())
    }

    #[test]
    fn apply_trims_name() -> TestResult {
        let mut product = complete().into_product(ProductUuid::new(), Timestamp::UNIX_EPOCH)?;

        product.apply(
            ProductUpdate {
                name: Some("  Beras Medium 5kg ".to_string()),
                ..ProductUpdate::default()
            },
            Timestamp::UNIX_EPOCH,
        );

        assert_eq!(product.name, "Beras Medium 5kg");

        Ok(())
    }

    #[test]
    fn update_rejects_blank_name() {
        let update = ProductUpdate {
            name: Some(String::new()),
            ..ProductUpdate::default()
        };

        assert_eq!(update.validate(), Err(ValidationError::MissingName));
        assert_eq!(ProductUpdate::stock(3).validate(), Ok(()));
    }
}
