//! OpenAPI document assembly for Swagger UI and tooling.

use utoipa::OpenApi;

/// Public OpenAPI surface of the storefront and back-office API.
#[derive(OpenApi)]
#[openapi(
    paths(
        crate::inbound::http::health::live,
        crate::inbound::http::auth::login,
        crate::inbound::http::auth::logout,
        crate::inbound::http::auth::me,
        crate::inbound::http::auth::forgot_password,
        crate::inbound::http::catalog::list_categories,
        crate::inbound::http::catalog::list_products,
        crate::inbound::http::catalog::product_detail,
        crate::inbound::http::orders::create_order,
        crate::inbound::http::orders::list_my_orders,
        crate::inbound::http::admin::list_attributes,
        crate::inbound::http::admin::upsert_attribute,
        crate::inbound::http::admin::list_all_orders,
        crate::inbound::http::admin::list_users,
    ),
    components(schemas(
        crate::domain::Error,
        crate::domain::ErrorCode,
        crate::domain::User,
        crate::domain::UserId,
        crate::domain::DisplayName,
        crate::domain::EmailAddress,
        crate::domain::Role,
        crate::domain::Category,
        crate::domain::Product,
        crate::domain::DomainAttribute,
        crate::domain::AttributeKind,
        crate::domain::AttributeCode,
        crate::domain::Order,
        crate::domain::OrderItem,
        crate::domain::OrderStatus,
        crate::inbound::http::auth::LoginRequest,
        crate::inbound::http::auth::ForgotPasswordRequest,
        crate::inbound::http::catalog::ProductPage,
        crate::inbound::http::orders::CreateOrderRequest,
        crate::inbound::http::orders::OrderItemRequest,
        crate::inbound::http::admin::UpsertAttributeRequest,
    )),
    tags(
        (name = "auth", description = "Session management"),
        (name = "catalog", description = "Storefront catalog"),
        (name = "orders", description = "Customer orders"),
        (name = "admin", description = "Back-office management"),
        (name = "health", description = "Probes")
    )
)]
pub struct ApiDoc;

#[cfg(test)]
mod tests {
    use utoipa::OpenApi;

    use super::*;

    #[test]
    fn document_includes_every_route_group() {
        let doc = ApiDoc::openapi();
        let paths: Vec<&String> = doc.paths.paths.keys().collect();
        assert!(paths.iter().any(|p| p.starts_with("/api/v1/auth")));
        assert!(paths.iter().any(|p| p.starts_with("/api/v1/catalog")));
        assert!(paths.iter().any(|p| p.starts_with("/api/v1/orders")));
        assert!(paths.iter().any(|p| p.starts_with("/api/v1/admin")));
    }
}
