//! Register sessions service.

use std::sync::Arc;

use async_trait::async_trait;
use kasir::{
    cart::{Cart, CartError},
    checkout::CheckoutFailure,
    products::ProductUuid,
    receipt::Receipt,
    settlement::PaymentMethod,
};
use mockall::automock;
use rustc_hash::FxHashMap;
use tokio::sync::{Mutex, RwLock};
use tracing::info;

use crate::domain::{
    checkout::{RetryPolicy, SettlementError, SettlementService},
    products::ProductsService,
    registers::{
        errors::RegistersError,
        models::{Register, RegisterSnapshot, RegisterUuid},
    },
};

type Sessions = FxHashMap<RegisterUuid, Arc<Mutex<Register>>>;

/// Register sessions held in process memory.
///
/// Each session sits behind its own mutex so its commands run one at a time. The mutex is
/// released while stock decrements are in flight; commands arriving meanwhile see the
/// `Settling` state and are refused.
#[derive(Clone)]
pub struct InMemoryRegistersService {
    products: Arc<dyn ProductsService>,
    settlement: SettlementService,
    sessions: Arc<RwLock<Sessions>>,
}

impl InMemoryRegistersService {
    #[must_use]
    pub fn new(products: Arc<dyn ProductsService>, retry: RetryPolicy) -> Self {
        Self {
            settlement: SettlementService::new(Arc::clone(&products), retry),
            products,
            sessions: Arc::default(),
        }
    }

    async fn session(&self, register: RegisterUuid) -> Result<Arc<Mutex<Register>>, RegistersError> {
        self.sessions
            .read()
            .await
            .get(&register)
            .cloned()
            .ok_or(RegistersError::NotFound)
    }
}

/// Apply a cart mutation. A successful mutation closes any open checkout dialog, since its
/// totals no longer match the cart.
async fn mutate_cart<F>(
    register: RegisterUuid,
    session: &Mutex<Register>,
    mutate: F,
) -> Result<RegisterSnapshot, RegistersError>
where
    F: FnOnce(&mut Cart) -> Result<(), RegistersError> + Send,
{
    let mut session = session.lock().await;

    if session.checkout.is_settling() {
        return Err(RegistersError::Busy);
    }

    mutate(&mut session.cart)?;

    session.checkout.cancel()?;

    RegisterSnapshot::capture(register, &session)
}

#[async_trait]
impl RegistersService for InMemoryRegistersService {
    async fn open_register(&self) -> Result<RegisterSnapshot, RegistersError> {
        let uuid = RegisterUuid::new();
        let register = Register::default();
        let snapshot = RegisterSnapshot::capture(uuid, &register)?;

        self.sessions
            .write()
            .await
            .insert(uuid, Arc::new(Mutex::new(register)));

        info!(register_uuid = %uuid, "opened register");

        Ok(snapshot)
    }

    async fn get_register(&self, register: RegisterUuid) -> Result<RegisterSnapshot, RegistersError> {
        let session = self.session(register).await?;
        let session = session.lock().await;

        RegisterSnapshot::capture(register, &session)
    }

    async fn close_register(&self, register: RegisterUuid) -> Result<(), RegistersError> {
        let mut sessions = self.sessions.write().await;

        let session = sessions
            .get(&register)
            .cloned()
            .ok_or(RegistersError::NotFound)?;

        if session.lock().await.checkout.is_settling() {
            return Err(RegistersError::Busy);
        }

        sessions.remove(&register);

        info!(register_uuid = %register, "closed register");

        Ok(())
    }

    async fn add_item(
        &self,
        register: RegisterUuid,
        product: ProductUuid,
    ) -> Result<RegisterSnapshot, RegistersError> {
        let session = self.session(register).await?;
        let product = self.products.get_product(product).await?;

        mutate_cart(register, &session, |cart| {
            cart.add(&product)?;

            Ok(())
        })
        .await
    }

    async fn scan_barcode(
        &self,
        register: RegisterUuid,
        barcode: String,
    ) -> Result<RegisterSnapshot, RegistersError> {
        let session = self.session(register).await?;
        let product = self.products.find_by_barcode(barcode).await?;

        mutate_cart(register, &session, |cart| {
            cart.add(&product)?;

            Ok(())
        })
        .await
    }

    async fn remove_item(
        &self,
        register: RegisterUuid,
        product: ProductUuid,
    ) -> Result<RegisterSnapshot, RegistersError> {
        let session = self.session(register).await?;

        mutate_cart(register, &session, |cart| {
            if cart.remove(product) {
                Ok(())
            } else {
                Err(CartError::NotInCart(product).into())
            }
        })
        .await
    }

    async fn set_quantity(
        &self,
        register: RegisterUuid,
        product: ProductUuid,
        quantity: u32,
    ) -> Result<RegisterSnapshot, RegistersError> {
        let session = self.session(register).await?;
        let product = self.products.get_product(product).await?;

        mutate_cart(register, &session, |cart| {
            cart.set_quantity(&product, quantity)?;

            Ok(())
        })
        .await
    }

    async fn open_checkout(&self, register: RegisterUuid) -> Result<RegisterSnapshot, RegistersError> {
        let session = self.session(register).await?;
        let products = self.products.list_products().await?;

        let mut session = session.lock().await;
        let Register { cart, checkout, .. } = &mut *session;

        if checkout.is_settling() {
            return Err(RegistersError::Busy);
        }

        let issues = cart.refresh(&products);

        if !issues.is_empty() {
            return Err(RegistersError::StaleCart(issues));
        }

        checkout.open(cart)?;

        RegisterSnapshot::capture(register, &session)
    }

    async fn select_payment_method(
        &self,
        register: RegisterUuid,
        payment_method: PaymentMethod,
    ) -> Result<RegisterSnapshot, RegistersError> {
        let session = self.session(register).await?;
        let mut session = session.lock().await;

        session.checkout.select_payment_method(payment_method)?;

        RegisterSnapshot::capture(register, &session)
    }

    async fn cancel_checkout(&self, register: RegisterUuid) -> Result<RegisterSnapshot, RegistersError> {
        let session = self.session(register).await?;
        let mut session = session.lock().await;

        session.checkout.cancel()?;

        RegisterSnapshot::capture(register, &session)
    }

    #[tracing::instrument(
        name = "registers.service.confirm_payment",
        skip(self),
        fields(register_uuid = %register),
        err
    )]
    async fn confirm_payment(&self, register: RegisterUuid) -> Result<Receipt, RegistersError> {
        let session = self.session(register).await?;

        let (cart, applied, settlement) = {
            let mut session = session.lock().await;
            let Register {
                cart,
                checkout,
                applied,
            } = &mut *session;

            let settlement = checkout.begin_settling(cart)?;

            (cart.clone(), applied.clone(), settlement)
        };

        let result = self
            .settlement
            .settle(&cart, settlement.payment_method, &applied)
            .await;

        let mut session = session.lock().await;

        match result {
            Ok(receipt) => {
                session.finish_sale();
                session.checkout.complete(receipt.clone())?;

                Ok(receipt)
            }
            Err(error) => {
                let report = match &error {
                    SettlementError::PartialFailure(report) => {
                        session.record_applied(report);

                        Some(report.clone())
                    }
                    _ => None,
                };

                session.checkout.fail(CheckoutFailure {
                    reason: error.to_string(),
                    report,
                })?;

                Err(error.into())
            }
        }
    }
}

#[automock]
#[async_trait]
pub trait RegistersService: Send + Sync {
    /// Opens a register with an empty cart.
    async fn open_register(&self) -> Result<RegisterSnapshot, RegistersError>;

    /// Current cart and checkout state.
    async fn get_register(&self, register: RegisterUuid) -> Result<RegisterSnapshot, RegistersError>;

    /// Discards the register and its cart. Refused while settling.
    async fn close_register(&self, register: RegisterUuid) -> Result<(), RegistersError>;

    /// Adds one unit of the product, checked against its live stock.
    async fn add_item(
        &self,
        register: RegisterUuid,
        product: ProductUuid,
    ) -> Result<RegisterSnapshot, RegistersError>;

    /// Adds one unit of the product with exactly this barcode.
    async fn scan_barcode(
        &self,
        register: RegisterUuid,
        barcode: String,
    ) -> Result<RegisterSnapshot, RegistersError>;

    /// Removes the product's line.
    async fn remove_item(
        &self,
        register: RegisterUuid,
        product: ProductUuid,
    ) -> Result<RegisterSnapshot, RegistersError>;

    /// Sets a line's quantity, checked against the product's live stock.
    async fn set_quantity(
        &self,
        register: RegisterUuid,
        product: ProductUuid,
        quantity: u32,
    ) -> Result<RegisterSnapshot, RegistersError>;

    /// Re-syncs the cart with the live catalog and opens the checkout review.
    async fn open_checkout(&self, register: RegisterUuid) -> Result<RegisterSnapshot, RegistersError>;

    /// Chooses how the customer pays.
    async fn select_payment_method(
        &self,
        register: RegisterUuid,
        payment_method: PaymentMethod,
    ) -> Result<RegisterSnapshot, RegistersError>;

    /// Closes the checkout dialog.
    async fn cancel_checkout(&self, register: RegisterUuid) -> Result<RegisterSnapshot, RegistersError>;

    /// Settles the cart. The cart is emptied on success and kept intact on failure.
    async fn confirm_payment(&self, register: RegisterUuid) -> Result<Receipt, RegistersError>;
}
