//! Order aggregate and draft-to-order assembly.
//!
//! Totals are computed server-side from unit prices captured at purchase
//! time; a client-supplied total is never trusted. All money values are
//! integer cents.

use std::fmt;

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use utoipa::ToSchema;
use uuid::Uuid;

use super::catalog::Product;
use super::user::UserId;

/// Order lifecycle states.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "snake_case")]
pub enum OrderStatus {
    /// Placed, awaiting payment.
    Pending,
    /// Payment confirmed.
    Paid,
    /// Handed to the carrier.
    Shipped,
    /// Cancelled before fulfilment.
    Cancelled,
}

impl OrderStatus {
    /// Stable string form used in storage.
    pub fn as_str(self) -> &'static str {
        match self {
            Self::Pending => "pending",
            Self::Paid => "paid",
            Self::Shipped => "shipped",
            Self::Cancelled => "cancelled",
        }
    }

    /// Parse the stable string form.
    pub fn parse(raw: &str) -> Option<Self> {
        match raw {
            "pending" => Some(Self::Pending),
            "paid" => Some(Self::Paid),
            "shipped" => Some(Self::Shipped),
            "cancelled" => Some(Self::Cancelled),
            _ => None,
        }
    }
}

impl fmt::Display for OrderStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// One line of an order, priced at purchase time.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct OrderItem {
    /// Purchased product.
    pub product_id: Uuid,
    /// Units purchased; always ≥ 1.
    pub quantity: i32,
    /// Unit price captured when the order was placed.
    pub unit_price_cents: i64,
}

/// A persisted order with its lines.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct Order {
    /// Primary key.
    pub id: Uuid,
    /// Purchasing customer.
    pub user_id: UserId,
    /// Lifecycle state.
    pub status: OrderStatus,
    /// Sum of line totals in cents.
    pub total_cents: i64,
    /// Placement timestamp.
    pub created_at: DateTime<Utc>,
    /// Order lines.
    pub items: Vec<OrderItem>,
}

/// Client-submitted order line before pricing.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct OrderDraftItem {
    /// Product to purchase.
    pub product_id: Uuid,
    /// Requested units.
    pub quantity: i32,
}

/// An order assembled and priced but not yet persisted.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NewOrder {
    /// Generated primary key.
    pub id: Uuid,
    /// Purchasing customer.
    pub user_id: UserId,
    /// Initial lifecycle state.
    pub status: OrderStatus,
    /// Computed total in cents.
    pub total_cents: i64,
    /// Priced order lines.
    pub items: Vec<OrderItem>,
}

/// Validation errors raised while assembling an order.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum OrderValidationError {
    /// The draft contained no lines.
    Empty,
    /// A line requested zero or negative units.
    NonPositiveQuantity {
        /// Offending product.
        product_id: Uuid,
    },
    /// A line referenced a product that does not exist.
    UnknownProduct {
        /// Offending product reference.
        product_id: Uuid,
    },
    /// The total exceeded the representable range.
    TotalOverflow,
}

impl fmt::Display for OrderValidationError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Empty => write!(f, "order must contain at least one item"),
            Self::NonPositiveQuantity { product_id } => {
                write!(f, "quantity for product {product_id} must be at least 1")
            }
            Self::UnknownProduct { product_id } => {
                write!(f, "product {product_id} does not exist")
            }
            Self::TotalOverflow => write!(f, "order total is out of range"),
        }
    }
}

impl std::error::Error for OrderValidationError {}

/// Price a draft against the referenced products and assemble a new order.
///
/// Each line's unit price is taken from the product row at assembly time;
/// the total is the checked sum of `quantity * unit_price_cents` across all
/// lines.
///
/// # Errors
///
/// Returns the first violation found: an empty draft, a non-positive
/// quantity, a product reference that resolves to nothing, or a total
/// outside `i64`.
pub fn build_order(
    user_id: UserId,
    drafts: &[OrderDraftItem],
    products: &[Product],
) -> Result<NewOrder, OrderValidationError> {
    if drafts.is_empty() {
        return Err(OrderValidationError::Empty);
    }

    let mut items = Vec::with_capacity(drafts.len());
    let mut total_cents: i64 = 0;
    for draft in drafts {
        if draft.quantity < 1 {
            return Err(OrderValidationError::NonPositiveQuantity {
                product_id: draft.product_id,
            });
        }
        let product = products
            .iter()
            .find(|product| product.id == draft.product_id)
            .ok_or(OrderValidationError::UnknownProduct {
                product_id: draft.product_id,
            })?;

        let line_total = i64::from(draft.quantity)
            .checked_mul(product.price_cents)
            .ok_or(OrderValidationError::TotalOverflow)?;
        total_cents = total_cents
            .checked_add(line_total)
            .ok_or(OrderValidationError::TotalOverflow)?;

        items.push(OrderItem {
            product_id: product.id,
            quantity: draft.quantity,
            unit_price_cents: product.price_cents,
        });
    }

    Ok(NewOrder {
        id: Uuid::new_v4(),
        user_id,
        status: OrderStatus::Pending,
        total_cents,
        items,
    })
}
