//! Cart
//!
//! The cashier's in-memory selection of products. Quantities are checked against the stock of
//! the product passed to each call; the cart keeps a price snapshot per line which
//! [`Cart::refresh`] re-syncs with the live catalog.

use smallvec::SmallVec;
use thiserror::Error;

use crate::products::{Product, ProductUuid};

/// Errors raised by cart mutations. The cart is left unchanged whenever one is returned.
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum CartError {
    /// The product has no stock at all.
    #[error("{name} is out of stock")]
    OutOfStock {
        /// Product identifier
        product: ProductUuid,
        /// Product name
        name: String,
    },

    /// The requested quantity exceeds the stock on hand.
    #[error("only {available} of {name} in stock, {requested} requested")]
    InsufficientStock {
        /// Product identifier
        product: ProductUuid,
        /// Product name
        name: String,
        /// Units on hand
        available: u32,
        /// Units requested
        requested: u32,
    },

    /// Quantities must be at least one; use [`Cart::remove`] to drop a line.
    #[error("quantity must be at least 1, got {0}")]
    InvalidQuantity(u32),

    /// There is no line for the product.
    #[error("product {0} is not in the cart")]
    NotInCart(ProductUuid),

    /// Line or cart total does not fit in minor units.
    #[error("cart total overflowed")]
    AmountOverflow,
}

/// A product selection with its price snapshot.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CartLine {
    /// Product identifier
    pub product_uuid: ProductUuid,

    /// Product name at the time of the last sync
    pub name: String,

    /// Barcode at the time of the last sync
    pub barcode: Option<String>,

    /// Unit price at the time of the last sync, in minor units
    pub unit_price: u64,

    /// Units selected, always at least one
    pub quantity: u32,
}

impl CartLine {
    fn new(product: &Product) -> Self {
        Self {
            product_uuid: product.uuid,
            name: product.name.clone(),
            barcode: product.barcode.clone(),
            unit_price: product.price,
            quantity: 1,
        }
    }

    fn sync(&mut self, product: &Product) {
        self.name.clone_from(&product.name);
        self.barcode.clone_from(&product.barcode);
        self.unit_price = product.price;
    }

    /// Unit price times quantity.
    ///
    /// # Errors
    ///
    /// Returns [`CartError::AmountOverflow`] if the product overflows `u64`.
    pub fn line_total(&self) -> Result<u64, CartError> {
        self.unit_price
            .checked_mul(u64::from(self.quantity))
            .ok_or(CartError::AmountOverflow)
    }
}

/// Problems found when re-checking a cart against the live catalog.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum CartLineIssue {
    /// The product no longer exists.
    Missing {
        /// Product identifier
        product: ProductUuid,
        /// Name from the line snapshot
        name: String,
    },

    /// Live stock no longer covers the line quantity.
    Short {
        /// Product identifier
        product: ProductUuid,
        /// Product name
        name: String,
        /// Units on hand
        available: u32,
        /// Units in the cart
        requested: u32,
    },
}

/// Cart
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Cart {
    lines: SmallVec<[CartLine; 8]>,
}

impl Cart {
    /// Create an empty cart.
    pub fn new() -> Self {
        Self::default()
    }

    /// Add one unit of the product, returning the line's new quantity.
    ///
    /// # Errors
    ///
    /// - [`CartError::OutOfStock`]: the product has no stock.
    /// - [`CartError::InsufficientStock`]: the line already holds every unit in stock.
    pub fn add(&mut self, product: &Product) -> Result<u32, CartError> {
        if product.stock == 0 {
            return Err(CartError::OutOfStock {
                product: product.uuid,
                name: product.name.clone(),
            });
        }

        let Some(line) = self.line_mut(product.uuid) else {
            self.lines.push(CartLine::new(product));

            return Ok(1);
        };

        if line.quantity >= product.stock {
            return Err(CartError::InsufficientStock {
                product: product.uuid,
                name: product.name.clone(),
                available: product.stock,
                requested: line.quantity.saturating_add(1),
            });
        }

        line.sync(product);
        line.quantity += 1;

        Ok(line.quantity)
    }

    /// Remove the product's line, returning whether there was one.
    pub fn remove(&mut self, product: ProductUuid) -> bool {
        let before = self.lines.len();

        self.lines.retain(|line| line.product_uuid != product);

        self.lines.len() != before
    }

    /// Set a line's quantity, checked against the product's current stock.
    ///
    /// # Errors
    ///
    /// - [`CartError::InvalidQuantity`]: `quantity` is zero.
    /// - [`CartError::NotInCart`]: the product has no line.
    /// - [`CartError::InsufficientStock`]: `quantity` exceeds the product's stock.
    pub fn set_quantity(&mut self, product: &Product, quantity: u32) -> Result<(), CartError> {
        if quantity < 1 {
            return Err(CartError::InvalidQuantity(quantity));
        }

        let line = self
            .line_mut(product.uuid)
            .ok_or(CartError::NotInCart(product.uuid))?;

        if quantity > product.stock {
            return Err(CartError::InsufficientStock {
                product: product.uuid,
                name: product.name.clone(),
                available: product.stock,
                requested: quantity,
            });
        }

        line.sync(product);
        line.quantity = quantity;

        Ok(())
    }

    /// Re-sync price snapshots from the live catalog and report lines it can no longer cover.
    ///
    /// Quantities are never changed here; the operator decides how to resolve each issue.
    pub fn refresh(&mut self, products: &[Product]) -> Vec<CartLineIssue> {
        let mut issues = Vec::new();

        for line in &mut self.lines {
            let Some(product) = products.iter().find(|p| p.uuid == line.product_uuid) else {
                issues.push(CartLineIssue::Missing {
                    product: line.product_uuid,
                    name: line.name.clone(),
                });

                continue;
            };

            line.sync(product);

            if line.quantity > product.stock {
                issues.push(CartLineIssue::Short {
                    product: product.uuid,
                    name: product.name.clone(),
                    available: product.stock,
                    requested: line.quantity,
                });
            }
        }

        issues
    }

    /// Sum of line totals.
    ///
    /// # Errors
    ///
    /// Returns [`CartError::AmountOverflow`] if the sum overflows `u64`.
    pub fn subtotal(&self) -> Result<u64, CartError> {
        self.lines.iter().try_fold(0_u64, |acc, line| {
            acc.checked_add(line.line_total()?)
                .ok_or(CartError::AmountOverflow)
        })
    }

    /// The line for a product, if any.
    pub fn line(&self, product: ProductUuid) -> Option<&CartLine> {
        self.lines.iter().find(|line| line.product_uuid == product)
    }

    fn line_mut(&mut self, product: ProductUuid) -> Option<&mut CartLine> {
        self.lines
            .iter_mut()
            .find(|line| line.product_uuid == product)
    }

    /// Lines in the order they were added.
    pub fn lines(&self) -> &[CartLine] {
        &self.lines
    }

    /// Total units across all lines.
    pub fn units(&self) -> u64 {
        self.lines.iter().map(|line| u64::from(line.quantity)).sum()
    }

    /// Number of lines.
    pub fn len(&self) -> usize {
        self.lines.len()
    }

    /// Whether the cart has no lines.
    pub fn is_empty(&self) -> bool {
        self.lines.is_empty()
    }

    /// Drop every line.
    pub fn clear(&mut self) {
        self.lines.clear();
    }
}
