//! App Router

use salvo::Router;

use crate::{healthcheck, inventory, products, registers};

pub(crate) fn app_router() -> Router {
    Router::new()
        .push(Router::with_path("healthcheck").get(healthcheck::handler))
        .push(
            Router::with_path("products")
                .get(products::index::handler)
                .post(products::create::handler)
                .push(Router::with_path("low-stock").get(products::low_stock::handler))
                .push(Router::with_path("barcode/{barcode}").get(products::barcode::handler))
                .push(
                    Router::with_path("{product}")
                        .get(products::get::handler)
                        .put(products::update::handler)
                        .delete(products::delete::handler),
                ),
        )
        .push(Router::with_path("inventory/summary").get(inventory::summary::handler))
        .push(
            Router::with_path("registers")
                .post(registers::create::handler)
                .push(
                    Router::with_path("{register}")
                        .get(registers::get::handler)
                        .delete(registers::delete::handler)
                        .push(
                            Router::with_path("items")
                                .post(registers::items::create::handler)
                                .push(
                                    Router::with_path("{product}")
                                        .put(registers::items::update::handler)
                                        .delete(registers::items::delete::handler),
                                ),
                        )
                        .push(
                            Router::with_path("checkout")
                                .post(registers::checkout::open::handler)
                                .put(registers::checkout::select::handler)
                                .delete(registers::checkout::cancel::handler)
                                .push(
                                    Router::with_path("confirm")
                                        .post(registers::checkout::confirm::handler),
                                ),
                        ),
                ),
        )
}

#[cfg(test)]
mod tests {
    use salvo::{
        affix_state::inject,
        prelude::*,
        test::{ResponseExt, TestClient},
    };
    use serde_json::{Value, json};
    use testresult::TestResult;

    use kasir_app::{context::AppContext, domain::checkout::RetryPolicy};

    use crate::state::State;

    use super::*;

    fn service() -> Service {
        let app = AppContext::in_memory(RetryPolicy::none());

        Service::new(
            Router::new()
                .hoop(inject(State::from_app_context(app)))
                .push(app_router()),
        )
    }

    async fn send(
        service: &Service,
        method: &str,
        url: String,
        body: Option<Value>,
    ) -> TestResult<(StatusCode, Value)> {
        let url = format!("http://example.com{url}");

        let builder = match method {
            "POST" => TestClient::post(url),
            "PUT" => TestClient::put(url),
            "DELETE" => TestClient::delete(url),
            _ => TestClient::get(url),
        };

        let builder = match body {
            Some(body) => builder.json(&body),
            None => builder,
        };

        let mut res = builder.send(service).await;
        let status = res.status_code.unwrap_or(StatusCode::OK);
        let body = res.take_json::<Value>().await.unwrap_or(Value::Null);

        Ok((status, body))
    }

    fn string(value: &Value) -> String {
        value.as_str().map(ToString::to_string).unwrap_or_default()
    }

    #[tokio::test]
    async fn cashier_sells_until_stock_runs_out_and_settles() -> TestResult {
        let service = service();

        let (status, noodles) = send(
            &service,
            "POST",
            "/products".to_string(),
            Some(json!({
                "name": "Indomie Goreng",
                "price": 3500,
                "category": "food",
                "stock": 5,
                "min_stock": 10
            })),
        )
        .await?;

        assert_eq!(status, StatusCode::CREATED);
        assert_eq!(noodles["stock_status"], "critical");

        let (_, tea) = send(
            &service,
            "POST",
            "/products".to_string(),
            Some(json!({
                "name": "Teh Botol",
                "price": 1000,
                "category": "beverage",
                "stock": 20,
                "min_stock": 5,
                "barcode": "8991002101111"
            })),
        )
        .await?;

        let noodles_uuid = string(&noodles["uuid"]);
        let tea_uuid = string(&tea["uuid"]);

        let (status, register) = send(&service, "POST", "/registers".to_string(), None).await?;

        assert_eq!(status, StatusCode::CREATED);

        let register = string(&register["uuid"]);
        let items = format!("/registers/{register}/items");

        for _ in 0..5 {
            let (status, _) = send(
                &service,
                "POST",
                items.clone(),
                Some(json!({ "product_uuid": noodles_uuid })),
            )
            .await?;

            assert_eq!(status, StatusCode::OK);
        }

        let (status, _) = send(
            &service,
            "POST",
            items.clone(),
            Some(json!({ "product_uuid": noodles_uuid })),
        )
        .await?;

        assert_eq!(status, StatusCode::CONFLICT);

        let (status, _) = send(
            &service,
            "DELETE",
            format!("{items}/{noodles_uuid}"),
            None,
        )
        .await?;

        assert_eq!(status, StatusCode::OK);

        send(
            &service,
            "POST",
            items.clone(),
            Some(json!({ "barcode": "8991002101111" })),
        )
        .await?;

        let (status, snapshot) = send(
            &service,
            "PUT",
            format!("{items}/{tea_uuid}"),
            Some(json!({ "quantity": 3 })),
        )
        .await?;

        assert_eq!(status, StatusCode::OK);
        assert_eq!(snapshot["totals"]["subtotal"], 3000);

        let checkout = format!("/registers/{register}/checkout");

        let (status, _) = send(&service, "POST", checkout.clone(), None).await?;

        assert_eq!(status, StatusCode::OK);

        let (status, _) = send(
            &service,
            "PUT",
            checkout.clone(),
            Some(json!({ "payment_method": "qris" })),
        )
        .await?;

        assert_eq!(status, StatusCode::OK);

        let (status, confirmed) =
            send(&service, "POST", format!("{checkout}/confirm"), None).await?;

        assert_eq!(status, StatusCode::OK);
        assert_eq!(confirmed["status"], "completed");
        assert_eq!(confirmed["receipt"]["totals"]["total"], 3330);

        let (_, tea) = send(&service, "GET", format!("/products/{tea_uuid}"), None).await?;

        assert_eq!(tea["stock"], 17);

        let (_, register) = send(&service, "GET", format!("/registers/{register}"), None).await?;

        assert_eq!(register["lines"], json!([]));
        assert_eq!(register["checkout"]["state"], "completed");

        Ok(())
    }

    #[tokio::test]
    async fn literal_product_routes_win_over_uuid_route() -> TestResult {
        let service = service();

        let (status, body) = send(&service, "GET", "/products/low-stock".to_string(), None).await?;

        assert_eq!(status, StatusCode::OK);
        assert_eq!(body["products"], json!([]));

        let (status, _) = send(
            &service,
            "GET",
            "/products/barcode/0000".to_string(),
            None,
        )
        .await?;

        assert_eq!(status, StatusCode::NOT_FOUND);

        Ok(())
    }
}
