//! PostgreSQL-backed order adapter.
//!
//! Order creation writes the order row and its lines inside a single
//! transaction; listing loads the order window first and its lines in one
//! follow-up query.

use std::collections::HashMap;

use async_trait::async_trait;
use diesel::prelude::*;
use diesel_async::scoped_futures::ScopedFutureExt;
use diesel_async::{AsyncConnection, RunQueryDsl};
use uuid::Uuid;

use crate::domain::order::{NewOrder, Order, OrderItem, OrderStatus};
use crate::domain::ports::{OrderPersistenceError, OrderRepository};
use crate::domain::user::UserId;

use super::diesel_error_mapping::{map_diesel_error, map_pool_error};
use super::models::{NewOrderItemRow, NewOrderRow, OrderItemRow, OrderRow};
use super::pool::DbPool;
use super::schema::{order_items, orders};

/// Diesel-backed implementation of the order repository.
#[derive(Clone)]
pub struct DieselOrderRepository {
    pool: DbPool,
}

impl DieselOrderRepository {
    /// Create a new repository with the given connection pool.
    pub fn new(pool: DbPool) -> Self {
        Self { pool }
    }

    async fn load_orders(
        &self,
        rows: Vec<OrderRow>,
    ) -> Result<Vec<Order>, OrderPersistenceError> {
        if rows.is_empty() {
            return Ok(Vec::new());
        }
        let mut conn = self.pool.get().await.map_err(map_pool_error)?;

        let order_ids: Vec<Uuid> = rows.iter().map(|row| row.id).collect();
        let item_rows: Vec<OrderItemRow> = order_items::table
            .filter(order_items::order_id.eq_any(&order_ids))
            .select(OrderItemRow::as_select())
            .load(&mut conn)
            .await
            .map_err(map_diesel_error::<OrderPersistenceError>)?;

        let mut items_by_order: HashMap<Uuid, Vec<OrderItem>> = HashMap::new();
        for item in item_rows {
            items_by_order
                .entry(item.order_id)
                .or_default()
                .push(OrderItem {
                    product_id: item.product_id,
                    quantity: item.quantity,
                    unit_price_cents: item.unit_price_cents,
                });
        }

        rows.into_iter()
            .map(|row| {
                let items = items_by_order.remove(&row.id).unwrap_or_default();
                map_order(row, items)
            })
            .collect()
    }
}

fn map_order(row: OrderRow, items: Vec<OrderItem>) -> Result<Order, OrderPersistenceError> {
    let status = OrderStatus::parse(&row.status).ok_or_else(|| {
        OrderPersistenceError::query(format!("corrupt order status: {}", row.status))
    })?;
    Ok(Order {
        id: row.id,
        user_id: UserId::from_uuid(row.user_id),
        status,
        total_cents: row.total_cents,
        created_at: row.created_at,
        items,
    })
}

#[async_trait]
impl OrderRepository for DieselOrderRepository {
    async fn create(&self, order: &NewOrder) -> Result<Order, OrderPersistenceError> {
        let order_row = NewOrderRow {
            id: order.id,
            user_id: *order.user_id.as_uuid(),
            status: order.status.as_str(),
            total_cents: order.total_cents,
        };
        let item_rows: Vec<NewOrderItemRow> = order
            .items
            .iter()
            .map(|item| NewOrderItemRow {
                id: Uuid::new_v4(),
                order_id: order.id,
                product_id: item.product_id,
                quantity: item.quantity,
                unit_price_cents: item.unit_price_cents,
            })
            .collect();

        let mut conn = self.pool.get().await.map_err(map_pool_error)?;

        let created: OrderRow = conn
            .transaction(|conn| {
                async move {
                    let created: OrderRow = diesel::insert_into(orders::table)
                        .values(&order_row)
                        .returning(OrderRow::as_returning())
                        .get_result(conn)
                        .await?;

                    diesel::insert_into(order_items::table)
                        .values(&item_rows)
                        .execute(conn)
                        .await?;

                    Ok::<_, diesel::result::Error>(created)
                }
                .scope_boxed()
            })
            .await
            .map_err(map_diesel_error::<OrderPersistenceError>)?;

        map_order(created, order.items.clone())
    }

    async fn list_for_user(&self, user_id: &UserId) -> Result<Vec<Order>, OrderPersistenceError> {
        let rows: Vec<OrderRow> = {
            let mut conn = self.pool.get().await.map_err(map_pool_error)?;
            orders::table
                .filter(orders::user_id.eq(user_id.as_uuid()))
                .select(OrderRow::as_select())
                .order(orders::created_at.desc())
                .load(&mut conn)
                .await
                .map_err(map_diesel_error::<OrderPersistenceError>)?
        };
        self.load_orders(rows).await
    }

    async fn list_all(&self) -> Result<Vec<Order>, OrderPersistenceError> {
        let rows: Vec<OrderRow> = {
            let mut conn = self.pool.get().await.map_err(map_pool_error)?;
            orders::table
                .select(OrderRow::as_select())
                .order(orders::created_at.desc())
                .load(&mut conn)
                .await
                .map_err(map_diesel_error::<OrderPersistenceError>)?
        };
        self.load_orders(rows).await
    }
}
