//! Register Errors

use salvo::http::StatusError;
use tracing::warn;

use kasir::{
    cart::{CartError, CartLineIssue},
    checkout::CheckoutError,
};
use kasir_app::domain::{checkout::SettlementError, registers::RegistersError};

use crate::products::errors::into_status_error as product_status_error;

pub(crate) fn into_status_error(error: RegistersError) -> StatusError {
    match error {
        RegistersError::NotFound => StatusError::not_found().brief("Register not found"),
        RegistersError::Busy => {
            StatusError::conflict().brief("Register is settling a payment, try again shortly")
        }
        RegistersError::StaleCart(issues) => StatusError::conflict()
            .brief("Cart no longer matches the catalog")
            .detail(describe_issues(&issues)),
        RegistersError::Product(source) => product_status_error(source),
        RegistersError::Cart(source) => cart_status_error(&source),
        RegistersError::Checkout(source) => checkout_status_error(&source),
        RegistersError::Settlement(source) => settlement_status_error(source),
    }
}

fn cart_status_error(error: &CartError) -> StatusError {
    match error {
        CartError::OutOfStock { .. } | CartError::InsufficientStock { .. } => {
            StatusError::conflict().brief(error.to_string())
        }
        CartError::InvalidQuantity(_) | CartError::AmountOverflow => {
            StatusError::bad_request().brief(error.to_string())
        }
        CartError::NotInCart(_) => StatusError::not_found().brief(error.to_string()),
    }
}

fn checkout_status_error(error: &CheckoutError) -> StatusError {
    match error {
        CheckoutError::EmptyCart | CheckoutError::Totals(_) => {
            StatusError::bad_request().brief(error.to_string())
        }
        CheckoutError::InvalidTransition { .. } => StatusError::conflict().brief(error.to_string()),
    }
}

fn settlement_status_error(error: SettlementError) -> StatusError {
    match error {
        SettlementError::EmptyCart | SettlementError::Math(_) => {
            StatusError::bad_request().brief(error.to_string())
        }
        SettlementError::Rejected(issues) => StatusError::conflict()
            .brief("Stock no longer covers the cart")
            .detail(describe_issues(&issues)),
        SettlementError::Store(source) => product_status_error(source),
        SettlementError::PartialFailure(report) => {
            warn!("settlement incomplete: {report}");

            StatusError::conflict()
                .brief("Settlement incomplete")
                .detail(report.to_string())
        }
    }
}

fn describe_issues(issues: &[CartLineIssue]) -> String {
    issues
        .iter()
        .map(|issue| match issue {
            CartLineIssue::Missing { name, .. } => format!("{name} is no longer sold"),
            CartLineIssue::Short {
                name,
                available,
                requested,
                ..
            } => format!("only {available} of {name} in stock, {requested} in cart"),
        })
        .collect::<Vec<_>>()
        .join("; ")
}

#[cfg(test)]
mod tests {
    use kasir::products::ProductUuid;
    use kasir_app::domain::products::ProductsServiceError;
    use salvo::http::StatusCode;

    use super::*;

    #[test]
    fn stock_warnings_are_conflicts() {
        let error = into_status_error(RegistersError::Cart(CartError::InsufficientStock {
            product: ProductUuid::new(),
            name: "Indomie Goreng".to_string(),
            available: 5,
            requested: 6,
        }));

        assert_eq!(error.code, StatusCode::CONFLICT);
        assert_eq!(error.brief, "only 5 of Indomie Goreng in stock, 6 requested");
    }

    #[test]
    fn quantity_below_one_is_bad_request() {
        let error = into_status_error(RegistersError::Cart(CartError::InvalidQuantity(0)));

        assert_eq!(error.code, StatusCode::BAD_REQUEST);
    }

    #[test]
    fn missing_line_is_not_found() {
        let error =
            into_status_error(RegistersError::Cart(CartError::NotInCart(ProductUuid::new())));

        assert_eq!(error.code, StatusCode::NOT_FOUND);
    }

    #[test]
    fn empty_cart_checkout_is_bad_request() {
        let error = into_status_error(RegistersError::Checkout(CheckoutError::EmptyCart));

        assert_eq!(error.code, StatusCode::BAD_REQUEST);
    }

    #[test]
    fn invalid_transition_is_conflict() {
        let error = into_status_error(RegistersError::Checkout(
            CheckoutError::InvalidTransition {
                state: "idle",
                action: "confirm payment",
            },
        ));

        assert_eq!(error.code, StatusCode::CONFLICT);
    }

    #[test]
    fn store_outage_during_settlement_is_503() {
        let error = into_status_error(RegistersError::Settlement(SettlementError::Store(
            ProductsServiceError::Unavailable(sqlx::Error::PoolTimedOut),
        )));

        assert_eq!(error.code, StatusCode::SERVICE_UNAVAILABLE);
    }

    #[test]
    fn stale_cart_lists_every_issue() {
        let issues = vec![
            CartLineIssue::Missing {
                product: ProductUuid::new(),
                name: "Kopi Kapal Api".to_string(),
            },
            CartLineIssue::Short {
                product: ProductUuid::new(),
                name: "Teh Botol".to_string(),
                available: 1,
                requested: 3,
            },
        ];

        let error = into_status_error(RegistersError::StaleCart(issues));

        assert_eq!(error.code, StatusCode::CONFLICT);
        assert_eq!(
            error.detail.as_deref(),
            Some("Kopi Kapal Api is no longer sold; only 1 of Teh Botol in stock, 3 in cart")
        );
    }
}
