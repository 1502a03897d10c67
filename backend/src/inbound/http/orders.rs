//! Customer order endpoints.
//!
//! ```text
//! POST /api/v1/orders  {"items":[{"productId":"...","quantity":2}]}
//! GET  /api/v1/orders
//! ```
//!
//! Totals are always computed server-side from current product prices; the
//! request never carries money values.

use actix_web::{HttpResponse, get, post, web};
use serde::{Deserialize, Serialize};
use serde_json::json;
use uuid::Uuid;

use crate::domain::{Error, Order, OrderDraftItem, OrderValidationError, build_order};
use crate::inbound::http::ApiResult;
use crate::inbound::http::session::SessionContext;
use crate::inbound::http::state::HttpState;

/// One requested order line.
#[derive(Debug, Deserialize, Serialize, utoipa::ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct OrderItemRequest {
    /// Product to purchase.
    pub product_id: Uuid,
    /// Requested units.
    pub quantity: i32,
}

/// Order creation request body.
#[derive(Debug, Deserialize, Serialize, utoipa::ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct CreateOrderRequest {
    /// Requested lines; must be non-empty.
    pub items: Vec<OrderItemRequest>,
}

fn map_order_validation_error(err: OrderValidationError) -> Error {
    match err {
        OrderValidationError::Empty => {
            Error::invalid_request("order must contain at least one item")
        }
        OrderValidationError::NonPositiveQuantity { product_id } => {
            Error::invalid_request("quantity must be at least 1")
                .with_details(json!({ "productId": product_id }))
        }
        OrderValidationError::UnknownProduct { product_id } => {
            Error::invalid_request("order references an unknown product")
                .with_details(json!({ "productId": product_id }))
        }
        OrderValidationError::TotalOverflow => Error::invalid_request("order total is out of range"),
    }
}

/// Place an order for the authenticated customer.
#[utoipa::path(
    post,
    path = "/api/v1/orders",
    request_body = CreateOrderRequest,
    responses(
        (status = 201, description = "Order placed", body = Order),
        (status = 400, description = "Invalid draft", body = Error),
        (status = 401, description = "No session", body = Error),
        (status = 503, description = "Storage unavailable", body = Error)
    ),
    tags = ["orders"],
    operation_id = "createOrder"
)]
#[post("/orders")]
pub async fn create_order(
    state: web::Data<HttpState>,
    session: SessionContext,
    payload: web::Json<CreateOrderRequest>,
) -> ApiResult<HttpResponse> {
    let user = session.require_user()?;

    let drafts: Vec<OrderDraftItem> = payload
        .items
        .iter()
        .map(|item| OrderDraftItem {
            product_id: item.product_id,
            quantity: item.quantity,
        })
        .collect();
    let ids: Vec<Uuid> = drafts.iter().map(|draft| draft.product_id).collect();
    let products = state.products.find_by_ids(&ids).await?;

    let new_order =
        build_order(user.id().clone(), &drafts, &products).map_err(map_order_validation_error)?;
    let order = state.orders.create(&new_order).await?;

    Ok(HttpResponse::Created().json(order))
}

/// List the authenticated customer's orders, most recent first.
#[utoipa::path(
    get,
    path = "/api/v1/orders",
    responses(
        (status = 200, description = "Orders", body = [Order]),
        (status = 401, description = "No session", body = Error),
        (status = 503, description = "Storage unavailable", body = Error)
    ),
    tags = ["orders"],
    operation_id = "listMyOrders"
)]
#[get("/orders")]
pub async fn list_my_orders(
    state: web::Data<HttpState>,
    session: SessionContext,
) -> ApiResult<web::Json<Vec<Order>>> {
    let user = session.require_user()?;
    Ok(web::Json(state.orders.list_for_user(user.id()).await?))
}

#[cfg(test)]
mod tests {
    use actix_web::http::StatusCode;
    use actix_web::{App, test as actix_test, web};
    use serde_json::{Value, json};

    use super::*;
    use crate::domain::user::Role;
    use crate::inbound::http::test_utils::{TestState, login_cookie_for, test_session_middleware};

    fn test_app(
        state: HttpState,
    ) -> App<
        impl actix_web::dev::ServiceFactory<
            actix_web::dev::ServiceRequest,
            Config = (),
            Response = actix_web::dev::ServiceResponse,
            Error = actix_web::Error,
            InitError = (),
        >,
    > {
        App::new()
            .app_data(web::Data::new(state))
            .wrap(test_session_middleware())
            .service(
                web::scope("/api/v1")
                    .service(crate::inbound::http::auth::login)
                    .service(create_order)
                    .service(list_my_orders),
            )
    }

    #[actix_web::test]
    async fn orders_require_a_session() {
        let fixtures = TestState::with_account(Role::Customer);
        let app = actix_test::init_service(test_app(fixtures.state())).await;

        let res = actix_test::call_service(
            &app,
            actix_test::TestRequest::post()
                .uri("/api/v1/orders")
                .set_json(json!({ "items": [] }))
                .to_request(),
        )
        .await;
        assert_eq!(res.status(), StatusCode::UNAUTHORIZED);
    }

    #[actix_web::test]
    async fn placing_an_order_computes_the_total_server_side() {
        let fixtures = TestState::with_account(Role::Customer);
        let product_id = fixtures.first_product_id();
        let app = actix_test::init_service(test_app(fixtures.state())).await;
        let cookie = login_cookie_for(&app).await;

        let res = actix_test::call_service(
            &app,
            actix_test::TestRequest::post()
                .uri("/api/v1/orders")
                .cookie(cookie)
                .set_json(json!({ "items": [{ "productId": product_id, "quantity": 2 }] }))
                .to_request(),
        )
        .await;

        assert_eq!(res.status(), StatusCode::CREATED);
        let body: Value = actix_test::read_body_json(res).await;
        assert_eq!(body.get("status").and_then(Value::as_str), Some("pending"));
        // Fixture product costs 15_000 cents.
        assert_eq!(body.get("totalCents").and_then(Value::as_i64), Some(30_000));
    }

    #[actix_web::test]
    async fn empty_drafts_are_rejected() {
        let fixtures = TestState::with_account(Role::Customer);
        let app = actix_test::init_service(test_app(fixtures.state())).await;
        let cookie = login_cookie_for(&app).await;

        let res = actix_test::call_service(
            &app,
            actix_test::TestRequest::post()
                .uri("/api/v1/orders")
                .cookie(cookie)
                .set_json(json!({ "items": [] }))
                .to_request(),
        )
        .await;
        assert_eq!(res.status(), StatusCode::BAD_REQUEST);
    }

    #[actix_web::test]
    async fn unknown_products_are_rejected() {
        let fixtures = TestState::with_account(Role::Customer);
        let app = actix_test::init_service(test_app(fixtures.state())).await;
        let cookie = login_cookie_for(&app).await;

        let res = actix_test::call_service(
            &app,
            actix_test::TestRequest::post()
                .uri("/api/v1/orders")
                .cookie(cookie)
                .set_json(json!({ "items": [{ "productId": Uuid::new_v4(), "quantity": 1 }] }))
                .to_request(),
        )
        .await;
        assert_eq!(res.status(), StatusCode::BAD_REQUEST);
        let body: Value = actix_test::read_body_json(res).await;
        assert!(body.get("details").is_some());
    }

    #[actix_web::test]
    async fn customers_see_their_own_orders() {
        let fixtures = TestState::with_account(Role::Customer);
        let product_id = fixtures.first_product_id();
        let app = actix_test::init_service(test_app(fixtures.state())).await;
        let cookie = login_cookie_for(&app).await;

        let create = actix_test::call_service(
            &app,
            actix_test::TestRequest::post()
                .uri("/api/v1/orders")
                .cookie(cookie.clone())
                .set_json(json!({ "items": [{ "productId": product_id, "quantity": 1 }] }))
                .to_request(),
        )
        .await;
        assert_eq!(create.status(), StatusCode::CREATED);

        let res = actix_test::call_service(
            &app,
            actix_test::TestRequest::get()
                .uri("/api/v1/orders")
                .cookie(cookie)
                .to_request(),
        )
        .await;
        assert_eq!(res.status(), StatusCode::OK);
        let body: Value = actix_test::read_body_json(res).await;
        assert_eq!(body.as_array().map(Vec::len), Some(1));
    }
}
