//! Public storefront catalog endpoints.
//!
//! ```text
//! GET /api/v1/catalog/categories
//! GET /api/v1/catalog/products?page=1&perPage=20&category=lentes-de-sol
//! GET /api/v1/catalog/products/{id}
//! ```

use actix_web::{get, web};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::domain::catalog::PER_PAGE_DEFAULT;
use crate::domain::{Category, Error, Page, PageRequest, Product, ProductFilter};
use crate::inbound::http::ApiResult;
use crate::inbound::http::state::HttpState;

/// Product listing query parameters.
#[derive(Debug, Deserialize, utoipa::IntoParams)]
#[serde(rename_all = "camelCase")]
#[into_params(parameter_in = Query)]
pub struct ProductListQuery {
    /// 1-based page number; defaults to 1.
    pub page: Option<u32>,
    /// Window size; defaults to 20, capped at 100.
    pub per_page: Option<u32>,
    /// Restrict to one category by slug.
    pub category: Option<String>,
}

/// One page of products.
#[derive(Debug, Serialize, utoipa::ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct ProductPage {
    /// Rows in this window.
    pub items: Vec<Product>,
    /// 1-based page number.
    pub page: u32,
    /// Window size.
    pub per_page: u32,
    /// Total matching rows across all pages.
    pub total: i64,
}

impl From<Page<Product>> for ProductPage {
    fn from(page: Page<Product>) -> Self {
        Self {
            items: page.items,
            page: page.page,
            per_page: page.per_page,
            total: page.total,
        }
    }
}

/// List categories for storefront navigation.
#[utoipa::path(
    get,
    path = "/api/v1/catalog/categories",
    responses(
        (status = 200, description = "Categories", body = [Category]),
        (status = 503, description = "Catalog storage unavailable", body = Error)
    ),
    tags = ["catalog"],
    operation_id = "listCategories",
    security([])
)]
#[get("/catalog/categories")]
pub async fn list_categories(state: web::Data<HttpState>) -> ApiResult<web::Json<Vec<Category>>> {
    Ok(web::Json(state.categories.list().await?))
}

/// Page through products, optionally filtered by category.
#[utoipa::path(
    get,
    path = "/api/v1/catalog/products",
    params(ProductListQuery),
    responses(
        (status = 200, description = "Product page", body = ProductPage),
        (status = 503, description = "Catalog storage unavailable", body = Error)
    ),
    tags = ["catalog"],
    operation_id = "listProducts",
    security([])
)]
#[get("/catalog/products")]
pub async fn list_products(
    state: web::Data<HttpState>,
    query: web::Query<ProductListQuery>,
) -> ApiResult<web::Json<ProductPage>> {
    let query = query.into_inner();
    let page = PageRequest::new(
        query.page.unwrap_or(1),
        query.per_page.unwrap_or(PER_PAGE_DEFAULT),
    );
    let filter = ProductFilter {
        category_slug: query.category,
    };
    let products = state.products.page(&filter, page).await?;
    Ok(web::Json(products.into()))
}

/// Fetch one product by id.
#[utoipa::path(
    get,
    path = "/api/v1/catalog/products/{id}",
    params(("id" = Uuid, Path, description = "Product id")),
    responses(
        (status = 200, description = "Product", body = Product),
        (status = 404, description = "No such product", body = Error),
        (status = 503, description = "Catalog storage unavailable", body = Error)
    ),
    tags = ["catalog"],
    operation_id = "productDetail",
    security([])
)]
#[get("/catalog/products/{id}")]
pub async fn product_detail(
    state: web::Data<HttpState>,
    path: web::Path<Uuid>,
) -> ApiResult<web::Json<Product>> {
    let id = path.into_inner();
    let product = state
        .products
        .find_by_id(id)
        .await?
        .ok_or_else(|| Error::not_found(format!("product not found: {id}")))?;
    Ok(web::Json(product))
}
