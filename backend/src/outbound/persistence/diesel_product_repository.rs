//! PostgreSQL-backed product adapter.
//!
//! Listing uses plain limit/offset pagination; the window and its total are
//! two queries over the same filter.

use async_trait::async_trait;
use diesel::prelude::*;
use diesel_async::RunQueryDsl;
use uuid::Uuid;

use crate::domain::catalog::{Page, PageRequest, Product, ProductFilter};
use crate::domain::ports::{CatalogPersistenceError, ProductRepository};

use super::diesel_error_mapping::{map_diesel_error, map_pool_error};
use super::models::ProductRow;
use super::pool::DbPool;
use super::schema::{categories, products};

/// Diesel-backed implementation of the product repository.
#[derive(Clone)]
pub struct DieselProductRepository {
    pool: DbPool,
}

impl DieselProductRepository {
    /// Create a new repository with the given connection pool.
    pub fn new(pool: DbPool) -> Self {
        Self { pool }
    }
}

fn map_row(row: ProductRow) -> Product {
    Product {
        id: row.id,
        name: row.name,
        slug: row.slug,
        description: row.description,
        price_cents: row.price_cents,
        category_id: row.category_id,
        brand_code: row.brand_code,
        color_code: row.color_code,
        shape_code: row.shape_code,
    }
}

#[async_trait]
impl ProductRepository for DieselProductRepository {
    async fn page(
        &self,
        filter: &ProductFilter,
        page: PageRequest,
    ) -> Result<Page<Product>, CatalogPersistenceError> {
        let mut conn = self.pool.get().await.map_err(map_pool_error)?;

        let total: i64 = match &filter.category_slug {
            Some(slug) => {
                let category_ids = categories::table
                    .filter(categories::slug.eq(slug.as_str()))
                    .select(categories::id);
                products::table
                    .filter(products::category_id.eq_any(category_ids))
                    .count()
                    .get_result(&mut conn)
                    .await
            }
            None => products::table.count().get_result(&mut conn).await,
        }
        .map_err(map_diesel_error::<CatalogPersistenceError>)?;

        let mut query = products::table
            .select(ProductRow::as_select())
            .order(products::name.asc())
            .limit(page.limit())
            .offset(page.offset())
            .into_boxed();
        if let Some(slug) = &filter.category_slug {
            let category_ids = categories::table
                .filter(categories::slug.eq(slug.as_str()))
                .select(categories::id);
            query = query.filter(products::category_id.eq_any(category_ids));
        }

        let rows: Vec<ProductRow> = query
            .load(&mut conn)
            .await
            .map_err(map_diesel_error::<CatalogPersistenceError>)?;

        Ok(Page::new(
            rows.into_iter().map(map_row).collect(),
            page,
            total,
        ))
    }

    async fn find_by_id(&self, id: Uuid) -> Result<Option<Product>, CatalogPersistenceError> {
        let mut conn = self.pool.get().await.map_err(map_pool_error)?;

        let row: Option<ProductRow> = products::table
            .find(id)
            .select(ProductRow::as_select())
            .first(&mut conn)
            .await
            .optional()
            .map_err(map_diesel_error::<CatalogPersistenceError>)?;

        Ok(row.map(map_row))
    }

    async fn find_by_ids(&self, ids: &[Uuid]) -> Result<Vec<Product>, CatalogPersistenceError> {
        if ids.is_empty() {
            return Ok(Vec::new());
        }
        let mut conn = self.pool.get().await.map_err(map_pool_error)?;

        let rows: Vec<ProductRow> = products::table
            .filter(products::id.eq_any(ids))
            .select(ProductRow::as_select())
            .load(&mut conn)
            .await
            .map_err(map_diesel_error::<CatalogPersistenceError>)?;

        Ok(rows.into_iter().map(map_row).collect())
    }
}
