//! PostgreSQL-backed user store adapter.

use async_trait::async_trait;
use diesel::prelude::*;
use diesel_async::RunQueryDsl;

use crate::domain::ports::{UserPersistenceError, UserRecord, UserStore};
use crate::domain::user::{EmailAddress, User};

use super::diesel_error_mapping::{map_diesel_error, map_pool_error};
use super::models::UserRow;
use super::pool::DbPool;
use super::schema::users;

/// Diesel-backed implementation of the user store.
#[derive(Clone)]
pub struct DieselUserStore {
    pool: DbPool,
}

impl DieselUserStore {
    /// Create a new store with the given connection pool.
    pub fn new(pool: DbPool) -> Self {
        Self { pool }
    }
}

fn map_row(row: UserRow) -> Result<UserRecord, UserPersistenceError> {
    let user = User::try_from_strings(&row.id.to_string(), &row.name, &row.email, &row.role)
        .map_err(|err| UserPersistenceError::query(format!("corrupt user row: {err}")))?;
    Ok(UserRecord {
        user,
        password_hash: row.password_hash,
    })
}

#[async_trait]
impl UserStore for DieselUserStore {
    async fn find_by_email(
        &self,
        email: &EmailAddress,
    ) -> Result<Option<UserRecord>, UserPersistenceError> {
        let mut conn = self.pool.get().await.map_err(map_pool_error)?;

        let row: Option<UserRow> = users::table
            .filter(users::email.eq(email.as_ref()))
            .select(UserRow::as_select())
            .first(&mut conn)
            .await
            .optional()
            .map_err(map_diesel_error::<UserPersistenceError>)?;

        row.map(map_row).transpose()
    }

    async fn list(&self) -> Result<Vec<User>, UserPersistenceError> {
        let mut conn = self.pool.get().await.map_err(map_pool_error)?;

        let rows: Vec<UserRow> = users::table
            .select(UserRow::as_select())
            .order(users::name.asc())
            .load(&mut conn)
            .await
            .map_err(map_diesel_error::<UserPersistenceError>)?;

        rows.into_iter()
            .map(|row| map_row(row).map(|record| record.user))
            .collect()
    }
}
