//! PostgreSQL-backed domain attribute adapter.
//!
//! Implements the `AttributeRepository` port. The upsert targets the
//! (`kind`, `code`) natural key: an existing row keeps its key and gets
//! `label`/`sort_order` rewritten from the incoming record; a missing row
//! is inserted. Deletion is deliberately absent from this adapter.

use async_trait::async_trait;
use diesel::prelude::*;
use diesel::upsert::excluded;
use diesel_async::RunQueryDsl;

use crate::domain::attribute::{AttributeCode, AttributeKind, DomainAttribute};
use crate::domain::ports::{AttributePersistenceError, AttributeRepository};

use super::diesel_error_mapping::{map_diesel_error, map_pool_error};
use super::models::{AttributeRow, NewAttributeRow};
use super::pool::DbPool;
use super::schema::domain_attributes;

/// Diesel-backed implementation of the attribute repository.
#[derive(Clone)]
pub struct DieselAttributeRepository {
    pool: DbPool,
}

impl DieselAttributeRepository {
    /// Create a new repository with the given connection pool.
    pub fn new(pool: DbPool) -> Self {
        Self { pool }
    }
}

fn map_row(row: AttributeRow) -> Result<DomainAttribute, AttributePersistenceError> {
    let corrupt =
        |message: String| AttributePersistenceError::query(format!("corrupt row: {message}"));
    let kind = AttributeKind::parse(&row.kind).map_err(|err| corrupt(err.to_string()))?;
    let code = AttributeCode::new(&row.code).map_err(|err| corrupt(err.to_string()))?;
    DomainAttribute::try_new(kind, code, row.label, row.sort_order)
        .map_err(|err| corrupt(err.to_string()))
}

#[async_trait]
impl AttributeRepository for DieselAttributeRepository {
    async fn upsert(&self, attribute: &DomainAttribute) -> Result<(), AttributePersistenceError> {
        let row = NewAttributeRow {
            kind: attribute.kind().as_str(),
            code: attribute.code().as_str(),
            label: attribute.label(),
            sort_order: attribute.sort_order(),
        };
        let mut conn = self.pool.get().await.map_err(map_pool_error)?;

        diesel::insert_into(domain_attributes::table)
            .values(&row)
            .on_conflict((domain_attributes::kind, domain_attributes::code))
            .do_update()
            .set((
                domain_attributes::label.eq(excluded(domain_attributes::label)),
                domain_attributes::sort_order.eq(excluded(domain_attributes::sort_order)),
            ))
            .execute(&mut conn)
            .await
            .map_err(map_diesel_error::<AttributePersistenceError>)?;

        Ok(())
    }

    async fn list(
        &self,
        kind: Option<AttributeKind>,
    ) -> Result<Vec<DomainAttribute>, AttributePersistenceError> {
        let mut conn = self.pool.get().await.map_err(map_pool_error)?;

        let mut query = domain_attributes::table
            .select(AttributeRow::as_select())
            .order((domain_attributes::kind.asc(), domain_attributes::sort_order.asc()))
            .into_boxed();
        if let Some(kind) = kind {
            query = query.filter(domain_attributes::kind.eq(kind.as_str()));
        }

        let rows: Vec<AttributeRow> = query
            .load(&mut conn)
            .await
            .map_err(map_diesel_error::<AttributePersistenceError>)?;

        rows.into_iter().map(map_row).collect()
    }
}
