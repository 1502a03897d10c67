//! Back-office endpoints behind the admin gate.
//!
//! ```text
//! GET /api/v1/admin/attributes?kind=color
//! PUT /api/v1/admin/attributes
//! GET /api/v1/admin/orders
//! GET /api/v1/admin/users
//! ```
//!
//! Every handler takes [`AdminAccess`]; visitors that fail the gate are
//! redirected before any handler body runs (see `guard.rs`).

use actix_web::{get, put, web};
use serde::{Deserialize, Serialize};
use serde_json::json;

use crate::domain::{
    AttributeCode, AttributeKind, DomainAttribute, Error, Order, User,
};
use crate::inbound::http::ApiResult;
use crate::inbound::http::guard::AdminAccess;
use crate::inbound::http::state::HttpState;

/// Attribute listing query parameters.
#[derive(Debug, Deserialize, utoipa::IntoParams)]
#[into_params(parameter_in = Query)]
pub struct AttributeListQuery {
    /// Restrict to one kind (e.g. `color`, `brand`).
    pub kind: Option<String>,
}

/// Attribute upsert request body.
///
/// Addressed by the (`kind`, `code`) natural key: an existing row gets its
/// label and ordering rewritten, a missing row is created.
#[derive(Debug, Deserialize, Serialize, utoipa::ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct UpsertAttributeRequest {
    /// Categorical axis.
    pub kind: String,
    /// Stable identifier within the kind.
    pub code: String,
    /// Display label.
    pub label: String,
    /// Display ordering within the kind.
    pub sort_order: i32,
}

fn parse_kind(raw: &str) -> Result<AttributeKind, Error> {
    AttributeKind::parse(raw).map_err(|_| {
        Error::invalid_request("unknown attribute kind")
            .with_details(json!({ "field": "kind", "value": raw }))
    })
}

/// List domain attributes, optionally restricted to one kind.
#[utoipa::path(
    get,
    path = "/api/v1/admin/attributes",
    params(AttributeListQuery),
    responses(
        (status = 200, description = "Attributes", body = [DomainAttribute]),
        (status = 303, description = "Visitor failed the admin gate"),
        (status = 400, description = "Unknown kind", body = Error),
        (status = 503, description = "Storage unavailable", body = Error)
    ),
    tags = ["admin"],
    operation_id = "listAttributes"
)]
#[get("/admin/attributes")]
pub async fn list_attributes(
    state: web::Data<HttpState>,
    _admin: AdminAccess,
    query: web::Query<AttributeListQuery>,
) -> ApiResult<web::Json<Vec<DomainAttribute>>> {
    let kind = query
        .into_inner()
        .kind
        .as_deref()
        .map(parse_kind)
        .transpose()?;
    Ok(web::Json(state.attributes.list(kind).await?))
}

/// Create or update one attribute.
#[utoipa::path(
    put,
    path = "/api/v1/admin/attributes",
    request_body = UpsertAttributeRequest,
    responses(
        (status = 200, description = "Attribute upserted", body = DomainAttribute),
        (status = 303, description = "Visitor failed the admin gate"),
        (status = 400, description = "Invalid attribute", body = Error),
        (status = 503, description = "Storage unavailable", body = Error)
    ),
    tags = ["admin"],
    operation_id = "upsertAttribute"
)]
#[put("/admin/attributes")]
pub async fn upsert_attribute(
    state: web::Data<HttpState>,
    _admin: AdminAccess,
    payload: web::Json<UpsertAttributeRequest>,
) -> ApiResult<web::Json<DomainAttribute>> {
    let payload = payload.into_inner();
    let kind = parse_kind(&payload.kind)?;
    let code = AttributeCode::new(&payload.code).map_err(|err| {
        Error::invalid_request(err.to_string()).with_details(json!({ "field": "code" }))
    })?;
    let attribute = DomainAttribute::try_new(kind, code, payload.label, payload.sort_order)
        .map_err(|err| Error::invalid_request(err.to_string()))?;

    state.attributes.upsert(&attribute).await?;
    Ok(web::Json(attribute))
}

/// List every order for the back-office overview.
#[utoipa::path(
    get,
    path = "/api/v1/admin/orders",
    responses(
        (status = 200, description = "Orders", body = [Order]),
        (status = 303, description = "Visitor failed the admin gate"),
        (status = 503, description = "Storage unavailable", body = Error)
    ),
    tags = ["admin"],
    operation_id = "listAllOrders"
)]
#[get("/admin/orders")]
pub async fn list_all_orders(
    state: web::Data<HttpState>,
    _admin: AdminAccess,
) -> ApiResult<web::Json<Vec<Order>>> {
    Ok(web::Json(state.orders.list_all().await?))
}

/// List user accounts for the back-office overview.
#[utoipa::path(
    get,
    path = "/api/v1/admin/users",
    responses(
        (status = 200, description = "Users", body = [User]),
        (status = 303, description = "Visitor failed the admin gate"),
        (status = 503, description = "Storage unavailable", body = Error)
    ),
    tags = ["admin"],
    operation_id = "listUsers"
)]
#[get("/admin/users")]
pub async fn list_users(
    state: web::Data<HttpState>,
    _admin: AdminAccess,
) -> ApiResult<web::Json<Vec<User>>> {
    Ok(web::Json(state.users.list().await?))
}
