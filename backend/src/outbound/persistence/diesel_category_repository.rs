//! PostgreSQL-backed category adapter.

use async_trait::async_trait;
use diesel::prelude::*;
use diesel_async::RunQueryDsl;

use crate::domain::catalog::Category;
use crate::domain::ports::{CatalogPersistenceError, CategoryRepository};

use super::diesel_error_mapping::{map_diesel_error, map_pool_error};
use super::models::CategoryRow;
use super::pool::DbPool;
use super::schema::categories;

/// Diesel-backed implementation of the category repository.
#[derive(Clone)]
pub struct DieselCategoryRepository {
    pool: DbPool,
}

impl DieselCategoryRepository {
    /// Create a new repository with the given connection pool.
    pub fn new(pool: DbPool) -> Self {
        Self { pool }
    }
}

fn map_row(row: CategoryRow) -> Category {
    Category {
        id: row.id,
        name: row.name,
        slug: row.slug,
        image_url: row.image_url,
    }
}

#[async_trait]
impl CategoryRepository for DieselCategoryRepository {
    async fn list(&self) -> Result<Vec<Category>, CatalogPersistenceError> {
        let mut conn = self.pool.get().await.map_err(map_pool_error)?;

        let rows: Vec<CategoryRow> = categories::table
            .select(CategoryRow::as_select())
            .order(categories::name.asc())
            .load(&mut conn)
            .await
            .map_err(map_diesel_error::<CatalogPersistenceError>)?;

        Ok(rows.into_iter().map(map_row).collect())
    }

    async fn update_image(
        &self,
        slug: &str,
        image_url: &str,
    ) -> Result<(), CatalogPersistenceError> {
        let mut conn = self.pool.get().await.map_err(map_pool_error)?;

        let updated = diesel::update(categories::table.filter(categories::slug.eq(slug)))
            .set(categories::image_url.eq(image_url))
            .execute(&mut conn)
            .await
            .map_err(map_diesel_error::<CatalogPersistenceError>)?;

        if updated == 0 {
            return Err(CatalogPersistenceError::category_not_found(slug));
        }
        Ok(())
    }
}
