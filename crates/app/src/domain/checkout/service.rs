//! Settlement service.
//!
//! Turns a confirmed cart into stock decrements. Live stock is re-read and validated for every
//! line before anything is written; decrements are then applied in cart order and the first one
//! that fails halts the settlement with a per-line report.

use std::sync::Arc;

use jiff::Timestamp;
use kasir::{
    cart::{Cart, CartLineIssue},
    products::{Product, ProductUpdate, ProductUuid},
    receipt::{LineOutcome, LineReport, Receipt, ReceiptUuid, SettlementReport},
    settlement::{PaymentMethod, Settlement},
};
use tracing::{Span, info, warn};

use crate::domain::{
    checkout::{errors::SettlementError, retry::RetryPolicy},
    products::{ProductsService, ProductsServiceError},
};

#[derive(Clone)]
pub struct SettlementService {
    products: Arc<dyn ProductsService>,
    retry: RetryPolicy,
}

impl SettlementService {
    #[must_use]
    pub fn new(products: Arc<dyn ProductsService>, retry: RetryPolicy) -> Self {
        Self { products, retry }
    }

    /// Settle a cart: validate live stock, then decrement it line by line.
    ///
    /// `applied` holds the lines an earlier, partly failed attempt already wrote. Their units are
    /// not taken again; only the remainder of each line is validated and decremented.
    ///
    /// The cart is not modified; clearing it after success is the caller's job.
    ///
    /// # Errors
    ///
    /// - [`SettlementError::EmptyCart`]: nothing to settle.
    /// - [`SettlementError::Rejected`]: a product vanished or no longer has enough stock.
    /// - [`SettlementError::Store`]: live stock could not be read.
    /// - [`SettlementError::PartialFailure`]: a decrement failed; the report lists what landed.
    /// - [`SettlementError::Math`]: totals overflowed.
    #[tracing::instrument(
        name = "checkout.service.settle",
        skip_all,
        fields(
            lines = cart.len(),
            already_applied = applied.len(),
            %payment_method,
            total = tracing::field::Empty
        ),
        err
    )]
    pub async fn settle(
        &self,
        cart: &Cart,
        payment_method: PaymentMethod,
        applied: &[LineReport],
    ) -> Result<Receipt, SettlementError> {
        if cart.is_empty() {
            return Err(SettlementError::EmptyCart);
        }

        let settlement = Settlement::for_cart(cart, payment_method)?;

        Span::current().record("total", settlement.totals.total);

        let live = self.validate(cart, applied).await?;

        let mut report = SettlementReport::default();
        let mut halted = false;

        for (line, pending) in cart.lines().iter().zip(live) {
            let Pending::Remaining { product, quantity } = pending else {
                if let Some(prior) = prior_line(applied, line.product_uuid) {
                    report.lines.push(prior.clone());
                }

                continue;
            };

            let outcome = if halted {
                LineOutcome::NotAttempted
            } else {
                let previous_stock = product.stock;
                let new_stock = previous_stock.saturating_sub(quantity);

                let written = self
                    .retry
                    .run(|| {
                        self.products
                            .update_product(line.product_uuid, ProductUpdate::stock(new_stock))
                    })
                    .await;

                match written {
                    Ok(_) => LineOutcome::Applied {
                        previous_stock,
                        new_stock,
                    },
                    Err(error) => {
                        warn!(product_uuid = %line.product_uuid, %error, "stock decrement failed");

                        halted = true;

                        LineOutcome::Failed {
                            reason: error.to_string(),
                        }
                    }
                }
            };

            report.lines.push(LineReport {
                product_uuid: line.product_uuid,
                name: line.name.clone(),
                quantity: line.quantity,
                outcome,
            });
        }

        if halted {
            return Err(SettlementError::PartialFailure(report));
        }

        let receipt = Receipt {
            uuid: ReceiptUuid::new(),
            settlement,
            lines: cart.lines().to_vec(),
            completed_at: Timestamp::now(),
        };

        info!(receipt_uuid = %receipt.uuid, "settled cart");

        Ok(receipt)
    }

    /// Re-read every line still owing units and check it covers them, before any write.
    async fn validate(
        &self,
        cart: &Cart,
        applied: &[LineReport],
    ) -> Result<Vec<Pending>, SettlementError> {
        let mut live = Vec::with_capacity(cart.len());
        let mut issues = Vec::new();

        for line in cart.lines() {
            let taken = prior_line(applied, line.product_uuid).map_or(0, |prior| prior.quantity);
            let quantity = line.quantity.saturating_sub(taken);

            if quantity == 0 {
                live.push(Pending::Settled);

                continue;
            }

            let product = self
                .retry
                .run(|| self.products.get_product(line.product_uuid))
                .await;

            match product {
                Ok(product) => {
                    if product.stock < quantity {
                        issues.push(CartLineIssue::Short {
                            product: product.uuid,
                            name: product.name.clone(),
                            available: product.stock,
                            requested: quantity,
                        });
                    }

                    live.push(Pending::Remaining { product, quantity });
                }
                Err(ProductsServiceError::NotFound) => {
                    issues.push(CartLineIssue::Missing {
                        product: line.product_uuid,
                        name: line.name.clone(),
                    });
                }
                Err(error) => return Err(SettlementError::Store(error)),
            }
        }

        if issues.is_empty() {
            Ok(live)
        } else {
            Err(SettlementError::Rejected(issues))
        }
    }
}

/// What a cart line still owes the stock.
enum Pending {
    /// An earlier attempt already wrote this line.
    Settled,

    /// `quantity` units remain to be taken from the live `product`.
    Remaining { product: Product, quantity: u32 },
}

fn prior_line(applied: &[LineReport], product: ProductUuid) -> Option<&LineReport> {
    applied.iter().find(|line| {
        line.product_uuid == product && matches!(line.outcome, LineOutcome::Applied { .. })
    })
}

#[cfg(test)]
mod tests {
    use std::time::Duration;

    use kasir::products::Category;
    use mockall::Sequence;
    use testresult::TestResult;

    use crate::domain::products::{InMemoryProductsService, MockProductsService};

    use super::*;

    fn product(name: &str, price: u64, stock: u32) -> Product {
        Product {
            uuid: ProductUuid::new(),
            name: name.to_string(),
            price,
            category: Category::Food,
            stock,
            min_stock: 0,
            barcode: None,
            description: None,
            supplier: None,
            image: None,
            created_at: Timestamp::UNIX_EPOCH,
            updated_at: Timestamp::UNIX_EPOCH,
        }
    }

    fn unavailable() -> ProductsServiceError {
        ProductsServiceError::Unavailable(sqlx::Error::PoolTimedOut)
    }

    fn fast_retry() -> RetryPolicy {
        RetryPolicy::new(3, Duration::ZERO)
    }

    fn cart_of(items: &[(&Product, u32)]) -> TestResult<Cart> {
        let mut cart = Cart::new();

        for (product, quantity) in items {
            for _ in 0..*quantity {
                cart.add(product)?;
            }
        }

        Ok(cart)
    }

    #[tokio::test]
    async fn settle_decrements_each_line_by_its_quantity() -> TestResult {
        let rice = product("Beras", 1_000, 20);
        let tea = product("Teh", 500, 4);
        let store = Arc::new(InMemoryProductsService::with_products(vec![
            rice.clone(),
            tea.clone(),
        ]));

        let cart = cart_of(&[(&rice, 3), (&tea, 4)])?;
        let service = SettlementService::new(store.clone(), fast_retry());

        let receipt = service.settle(&cart, PaymentMethod::Qris, &[]).await?;

        assert_eq!(store.get_product(rice.uuid).await?.stock, 17);
        assert_eq!(store.get_product(tea.uuid).await?.stock, 0);
        assert_eq!(receipt.settlement.totals.subtotal, 5_000);
        assert_eq!(receipt.settlement.totals.tax, 550);
        assert_eq!(receipt.settlement.totals.total, 5_550);
        assert_eq!(receipt.settlement.payment_method, PaymentMethod::Qris);
        assert_eq!(receipt.lines, cart.lines());

        Ok(())
    }

    #[tokio::test]
    async fn empty_cart_is_rejected() {
        let service = SettlementService::new(Arc::new(MockProductsService::new()), fast_retry());

        let result = service.settle(&Cart::new(), PaymentMethod::Cash, &[]).await;

        assert!(matches!(result, Err(SettlementError::EmptyCart)));
    }

    #[tokio::test]
    async fn short_stock_rejects_before_any_write() -> TestResult {
        let rice = product("Beras", 1_000, 5);
        let cart = cart_of(&[(&rice, 5)])?;
        let mut drained = rice.clone();

        drained.stock = 2;

        let mut products = MockProductsService::new();

        products
            .expect_get_product()
            .once()
            .return_once(move |_| Ok(drained));

        products.expect_update_product().never();

        let service = SettlementService::new(Arc::new(products), fast_retry());

        let result = service.settle(&cart, PaymentMethod::Cash, &[]).await;

        let Err(SettlementError::Rejected(issues)) = &result else {
            panic!("expected Rejected, got {result:?}");
        };

        assert_eq!(
            issues.as_slice(),
            [CartLineIssue::Short {
                product: rice.uuid,
                name: "Beras".to_string(),
                available: 2,
                requested: 5,
            }]
        );

        Ok(())
    }

    #[tokio::test]
    async fn deleted_product_rejects_before_any_write() -> TestResult {
        let rice = product("Beras", 1_000, 5);
        let cart = cart_of(&[(&rice, 1)])?;

        let mut products = MockProductsService::new();

        products
            .expect_get_product()
            .once()
            .return_once(|_| Err(ProductsServiceError::NotFound));

        products.expect_update_product().never();

        let service = SettlementService::new(Arc::new(products), fast_retry());

        let result = service.settle(&cart, PaymentMethod::Cash, &[]).await;

        assert!(
            matches!(
                &result,
                Err(SettlementError::Rejected(issues))
                    if matches!(issues.as_slice(), [CartLineIssue::Missing { .. }])
            ),
            "expected Rejected(Missing), got {result:?}"
        );

        Ok(())
    }

    #[tokio::test]
    async fn failed_decrement_halts_and_reports_each_line() -> TestResult {
        let rice = product("Beras", 1_000, 20);
        let sugar = product("Gula", 800, 10);
        let tea = product("Teh", 500, 8);
        let cart = cart_of(&[(&rice, 2), (&sugar, 1), (&tea, 1)])?;

        let catalog = vec![rice.clone(), sugar.clone(), tea.clone()];
        let sugar_uuid = sugar.uuid;

        let mut products = MockProductsService::new();
        let mut seq = Sequence::new();

        products.expect_get_product().times(3).returning(move |uuid| {
            catalog
                .iter()
                .find(|p| p.uuid == uuid)
                .cloned()
                .ok_or(ProductsServiceError::NotFound)
        });

        let applied = rice.clone();

        products
            .expect_update_product()
            .once()
            .in_sequence(&mut seq)
            .withf(move |uuid, update| *uuid == applied.uuid && update.stock == Some(18))
            .return_once(move |_, _| Ok(rice));

        products
            .expect_update_product()
            .times(3)
            .in_sequence(&mut seq)
            .withf(move |uuid, _| *uuid == sugar_uuid)
            .returning(|_, _| Err(unavailable()));

        let service = SettlementService::new(Arc::new(products), fast_retry());

        let result = service.settle(&cart, PaymentMethod::Card, &[]).await;

        let Err(SettlementError::PartialFailure(report)) = &result else {
            panic!("expected PartialFailure, got {result:?}");
        };

        let outcomes: Vec<&LineOutcome> = report.lines.iter().map(|l| &l.outcome).collect();

        assert!(matches!(
            outcomes.as_slice(),
            [
                LineOutcome::Applied {
                    previous_stock: 20,
                    new_stock: 18
                },
                LineOutcome::Failed { .. },
                LineOutcome::NotAttempted,
            ]
        ));
        assert_eq!(
            report.to_string(),
            "1 of 3 stock updates applied; incomplete: Gula, Teh"
        );

        Ok(())
    }

    #[tokio::test]
    async fn applied_lines_are_not_taken_twice() -> TestResult {
        let rice = product("Beras", 1_000, 18);
        let sugar = product("Gula", 800, 10);
        let store = Arc::new(InMemoryProductsService::with_products(vec![
            rice.clone(),
            sugar.clone(),
        ]));

        let cart = cart_of(&[(&rice, 2), (&sugar, 1)])?;
        let applied = [LineReport {
            product_uuid: rice.uuid,
            name: rice.name.clone(),
            quantity: 2,
            outcome: LineOutcome::Applied {
                previous_stock: 20,
                new_stock: 18,
            },
        }];

        let service = SettlementService::new(store.clone(), fast_retry());

        let receipt = service.settle(&cart, PaymentMethod::Cash, &applied).await?;

        assert_eq!(store.get_product(rice.uuid).await?.stock, 18);
        assert_eq!(store.get_product(sugar.uuid).await?.stock, 9);
        assert_eq!(receipt.lines, cart.lines());

        Ok(())
    }

    #[tokio::test]
    async fn grown_line_only_takes_the_extra_units() -> TestResult {
        let rice = product("Beras", 1_000, 18);
        let store = Arc::new(InMemoryProductsService::with_products(vec![rice.clone()]));

        let cart = cart_of(&[(&rice, 3)])?;
        let applied = [LineReport {
            product_uuid: rice.uuid,
            name: rice.name.clone(),
            quantity: 2,
            outcome: LineOutcome::Applied {
                previous_stock: 20,
                new_stock: 18,
            },
        }];

        let service = SettlementService::new(store.clone(), fast_retry());

        service.settle(&cart, PaymentMethod::Cash, &applied).await?;

        assert_eq!(store.get_product(rice.uuid).await?.stock, 17);

        Ok(())
    }

    #[tokio::test]
    async fn transient_read_failures_are_retried() -> TestResult {
        let rice = product("Beras", 1_000, 20);
        let cart = cart_of(&[(&rice, 1)])?;
        let live = rice.clone();
        let updated = rice.clone();

        let mut products = MockProductsService::new();
        let mut seq = Sequence::new();

        products
            .expect_get_product()
            .once()
            .in_sequence(&mut seq)
            .return_once(|_| Err(unavailable()));

        products
            .expect_get_product()
            .once()
            .in_sequence(&mut seq)
            .return_once(move |_| Ok(live));

        products
            .expect_update_product()
            .once()
            .return_once(move |_, _| Ok(updated));

        let service = SettlementService::new(Arc::new(products), fast_retry());

        service.settle(&cart, PaymentMethod::Cash, &[]).await?;

        Ok(())
    }

    #[tokio::test]
    async fn exhausted_read_retries_surface_store_error() -> TestResult {
        let rice = product("Beras", 1_000, 20);
        let cart = cart_of(&[(&rice, 1)])?;

        let mut products = MockProductsService::new();

        products
            .expect_get_product()
            .times(3)
            .returning(|_| Err(unavailable()));

        products.expect_update_product().never();

        let service = SettlementService::new(Arc::new(products), fast_retry());

        let result = service.settle(&cart, PaymentMethod::Cash, &[]).await;

        assert!(
            matches!(
                result,
                Err(SettlementError::Store(ProductsServiceError::Unavailable(_)))
            ),
            "expected Store(Unavailable), got {result:?}"
        );

        Ok(())
    }
}
