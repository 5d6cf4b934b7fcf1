//! Set Register Item Quantity Handler

use salvo::{
    oapi::{
        ToSchema,
        extract::{JsonBody, PathParam},
    },
    prelude::*,
};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::{
    extensions::*,
    registers::{errors::into_status_error, models::RegisterResponse},
};

/// Set Quantity Request
#[derive(Debug, Serialize, Deserialize, ToSchema)]
pub(crate) struct SetQuantityRequest {
    /// New quantity, at least 1
    pub quantity: u32,
}

/// Set Register Item Quantity Handler
#[endpoint(
    tags("registers"),
    summary = "Set Item Quantity",
    responses(
        (status_code = StatusCode::OK, description = "Quantity set"),
        (status_code = StatusCode::NOT_FOUND, description = "Register, product or cart line not found"),
        (status_code = StatusCode::CONFLICT, description = "Not enough stock, or payment settling"),
        (status_code = StatusCode::BAD_REQUEST, description = "Quantity below 1"),
    ),
)]
#[tracing::instrument(
    name = "registers.items.set_quantity",
    skip(register, product, json, depot),
    fields(
        register_uuid = tracing::field::Empty,
        product_uuid = tracing::field::Empty,
        quantity = tracing::field::Empty
    ),
    err
)]
pub(crate) async fn handler(
    register: PathParam<Uuid>,
    product: PathParam<Uuid>,
    json: JsonBody<SetQuantityRequest>,
    depot: &mut Depot,
) -> Result<Json<RegisterResponse>, StatusError> {
    let register = register.into_inner();
    let product = product.into_inner();
    let quantity = json.into_inner().quantity;

    let span = tracing::Span::current();

    span.record("register_uuid", tracing::field::display(register));
    span.record("product_uuid", tracing::field::display(product));
    span.record("quantity", quantity);

    let snapshot = depot
        .app_or_500()?
        .registers
        .set_quantity(register.into(), product.into(), quantity)
        .await
        .map_err(into_status_error)?;

    Ok(Json(snapshot.into()))
}

#[cfg(test)]
mod tests {
    use kasir::{cart::CartError, products::ProductUuid};
    use salvo::test::TestClient;
    use serde_json::json;
    use testresult::TestResult;

    use kasir_app::domain::registers::{MockRegistersService, RegisterUuid, RegistersError};

    use crate::test_helpers::{empty_snapshot, registers_service};

    use super::*;

    fn make_service(registers: MockRegistersService) -> Service {
        registers_service(
            registers,
            Router::with_path("registers/{register}/items/{product}").put(handler),
        )
    }

    #[tokio::test]
    async fn test_set_quantity_forwards_values() -> TestResult {
        let register = RegisterUuid::new();
        let product = ProductUuid::new();

        let mut registers = MockRegistersService::new();

        registers
            .expect_set_quantity()
            .once()
            .withf(move |r, p, q| *r == register && *p == product && *q == 4)
            .return_once(move |_, _, _| Ok(empty_snapshot(register)));

        let res = TestClient::put(format!(
            "http://example.com/registers/{register}/items/{product}"
        ))
        .json(&json!({ "quantity": 4 }))
        .send(&make_service(registers))
        .await;

        assert_eq!(res.status_code, Some(StatusCode::OK));

        Ok(())
    }

    #[tokio::test]
    async fn test_set_quantity_zero_returns_400() -> TestResult {
        let mut registers = MockRegistersService::new();

        registers
            .expect_set_quantity()
            .once()
            .return_once(|_, _, quantity| Err(RegistersError::Cart(CartError::InvalidQuantity(quantity))));

        let res = TestClient::put(format!(
            "http://example.com/registers/{}/items/{}",
            RegisterUuid::new(),
            ProductUuid::new()
        ))
        .json(&json!({ "quantity": 0 }))
        .send(&make_service(registers))
        .await;

        assert_eq!(res.status_code, Some(StatusCode::BAD_REQUEST));

        Ok(())
    }
}
