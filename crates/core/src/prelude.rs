//! Common imports for working with the cashier domain.

pub use crate::{
    cart::{Cart, CartError, CartLine, CartLineIssue},
    catalog::{CategoryFilter, InventorySummary, StockStatus, stock_status},
    checkout::{Checkout, CheckoutError, CheckoutFailure, CheckoutState},
    products::{Category, NewProduct, Product, ProductUpdate, ProductUuid, ValidationError},
    receipt::{LineOutcome, LineReport, Receipt, ReceiptUuid, SettlementReport},
    settlement::{PaymentMethod, Settlement, SettlementMathError, Totals},
};
