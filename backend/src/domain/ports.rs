//! Domain ports defining the edges of the hexagon.
//!
//! Ports describe how the domain expects to interact with driven adapters
//! (database repositories, the mail transport, token generation). Each trait
//! exposes strongly typed errors so adapters map their failures into
//! predictable variants instead of returning `anyhow::Result`.

use async_trait::async_trait;
use thiserror::Error;
use uuid::Uuid;

use super::attribute::{AttributeKind, DomainAttribute};
use super::catalog::{Category, Page, PageRequest, Product, ProductFilter};
use super::email::OutboundEmail;
use super::error::Error;
use super::order::{NewOrder, Order};
use super::user::{EmailAddress, User, UserId};

/// Persistence errors raised by [`AttributeRepository`] adapters.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum AttributePersistenceError {
    /// Repository connection could not be established.
    #[error("attribute repository connection failed: {message}")]
    Connection {
        /// Adapter-provided diagnostics.
        message: String,
    },
    /// Query or mutation failed during execution.
    #[error("attribute repository query failed: {message}")]
    Query {
        /// Adapter-provided diagnostics.
        message: String,
    },
}

impl AttributePersistenceError {
    /// Helper for connection oriented failures.
    pub fn connection(message: impl Into<String>) -> Self {
        Self::Connection {
            message: message.into(),
        }
    }

    /// Helper for query failures.
    pub fn query(message: impl Into<String>) -> Self {
        Self::Query {
            message: message.into(),
        }
    }
}

/// Persistence errors raised by [`UserStore`] adapters.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum UserPersistenceError {
    /// Repository connection could not be established.
    #[error("user repository connection failed: {message}")]
    Connection {
        /// Adapter-provided diagnostics.
        message: String,
    },
    /// Query or mutation failed during execution.
    #[error("user repository query failed: {message}")]
    Query {
        /// Adapter-provided diagnostics.
        message: String,
    },
}

impl UserPersistenceError {
    /// Helper for connection oriented failures.
    pub fn connection(message: impl Into<String>) -> Self {
        Self::Connection {
            message: message.into(),
        }
    }

    /// Helper for query failures.
    pub fn query(message: impl Into<String>) -> Self {
        Self::Query {
            message: message.into(),
        }
    }
}

/// Persistence errors raised by catalog adapters.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum CatalogPersistenceError {
    /// Repository connection could not be established.
    #[error("catalog repository connection failed: {message}")]
    Connection {
        /// Adapter-provided diagnostics.
        message: String,
    },
    /// Query or mutation failed during execution.
    #[error("catalog repository query failed: {message}")]
    Query {
        /// Adapter-provided diagnostics.
        message: String,
    },
    /// The addressed category does not exist.
    #[error("category not found: {slug}")]
    CategoryNotFound {
        /// Slug that failed to resolve.
        slug: String,
    },
}

impl CatalogPersistenceError {
    /// Helper for connection oriented failures.
    pub fn connection(message: impl Into<String>) -> Self {
        Self::Connection {
            message: message.into(),
        }
    }

    /// Helper for query failures.
    pub fn query(message: impl Into<String>) -> Self {
        Self::Query {
            message: message.into(),
        }
    }

    /// Helper for missing categories.
    pub fn category_not_found(slug: impl Into<String>) -> Self {
        Self::CategoryNotFound { slug: slug.into() }
    }
}

/// Persistence errors raised by [`OrderRepository`] adapters.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum OrderPersistenceError {
    /// Repository connection could not be established.
    #[error("order repository connection failed: {message}")]
    Connection {
        /// Adapter-provided diagnostics.
        message: String,
    },
    /// Query or mutation failed during execution.
    #[error("order repository query failed: {message}")]
    Query {
        /// Adapter-provided diagnostics.
        message: String,
    },
}

impl OrderPersistenceError {
    /// Helper for connection oriented failures.
    pub fn connection(message: impl Into<String>) -> Self {
        Self::Connection {
            message: message.into(),
        }
    }

    /// Helper for query failures.
    pub fn query(message: impl Into<String>) -> Self {
        Self::Query {
            message: message.into(),
        }
    }
}

/// Failures surfaced by [`Mailer`] adapters.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum MailDeliveryError {
    /// The message could not be assembled (bad address, oversized body).
    #[error("mail message is invalid: {message}")]
    InvalidMessage {
        /// Adapter-provided diagnostics.
        message: String,
    },
    /// The transport rejected or failed the delivery.
    #[error("mail transport failed: {message}")]
    Transport {
        /// Adapter-provided diagnostics.
        message: String,
    },
}

impl MailDeliveryError {
    /// Helper for message assembly failures.
    pub fn invalid_message(message: impl Into<String>) -> Self {
        Self::InvalidMessage {
            message: message.into(),
        }
    }

    /// Helper for transport-level failures.
    pub fn transport(message: impl Into<String>) -> Self {
        Self::Transport {
            message: message.into(),
        }
    }
}

/// Credential record held by the user store.
///
/// The hash never travels past the authentication service; handlers only
/// ever see the inner [`User`] projection.
#[derive(Debug, Clone)]
pub struct UserRecord {
    /// Client-facing projection.
    pub user: User,
    /// Argon2 PHC-string password hash.
    pub password_hash: String,
}

/// Persistence port for domain attribute rows.
#[async_trait]
pub trait AttributeRepository: Send + Sync {
    /// Insert or update a row keyed on (`kind`, `code`).
    ///
    /// An existing row keeps its key and gets `label`/`sort_order`
    /// overwritten; a missing row is created. Rows are never deleted here.
    async fn upsert(&self, attribute: &DomainAttribute) -> Result<(), AttributePersistenceError>;

    /// List rows, optionally restricted to one kind, ordered by
    /// (`kind`, `sort_order`).
    async fn list(
        &self,
        kind: Option<AttributeKind>,
    ) -> Result<Vec<DomainAttribute>, AttributePersistenceError>;
}

/// Persistence port for user accounts.
#[async_trait]
pub trait UserStore: Send + Sync {
    /// Fetch a credential record by canonical email.
    async fn find_by_email(
        &self,
        email: &EmailAddress,
    ) -> Result<Option<UserRecord>, UserPersistenceError>;

    /// List user projections for the back-office.
    async fn list(&self) -> Result<Vec<User>, UserPersistenceError>;
}

/// Authentication port: verify credentials and produce the session user.
#[async_trait]
pub trait LoginService: Send + Sync {
    /// Authenticate credentials, returning the user projection on success.
    ///
    /// Returns [`Error::unauthorized`] for wrong credentials without
    /// distinguishing unknown accounts from wrong passwords.
    async fn authenticate(&self, credentials: &super::auth::LoginCredentials)
    -> Result<User, Error>;
}

/// Persistence port for storefront categories.
#[async_trait]
pub trait CategoryRepository: Send + Sync {
    /// List all categories in name order.
    async fn list(&self) -> Result<Vec<Category>, CatalogPersistenceError>;

    /// Replace one category's image URL, addressed by slug.
    async fn update_image(
        &self,
        slug: &str,
        image_url: &str,
    ) -> Result<(), CatalogPersistenceError>;
}

/// Persistence port for storefront products.
#[async_trait]
pub trait ProductRepository: Send + Sync {
    /// Page through products matching the filter.
    async fn page(
        &self,
        filter: &ProductFilter,
        page: PageRequest,
    ) -> Result<Page<Product>, CatalogPersistenceError>;

    /// Fetch one product.
    async fn find_by_id(&self, id: Uuid) -> Result<Option<Product>, CatalogPersistenceError>;

    /// Fetch the products referenced by an order draft.
    async fn find_by_ids(&self, ids: &[Uuid]) -> Result<Vec<Product>, CatalogPersistenceError>;
}

/// Persistence port for orders.
#[async_trait]
pub trait OrderRepository: Send + Sync {
    /// Persist a new order with its items.
    async fn create(&self, order: &NewOrder) -> Result<Order, OrderPersistenceError>;

    /// List one customer's orders, most recent first.
    async fn list_for_user(&self, user_id: &UserId) -> Result<Vec<Order>, OrderPersistenceError>;

    /// List every order, most recent first.
    async fn list_all(&self) -> Result<Vec<Order>, OrderPersistenceError>;
}

/// Outbound mail transport port.
#[async_trait]
pub trait Mailer: Send + Sync {
    /// Deliver one message through the active transport.
    async fn deliver(&self, email: &OutboundEmail) -> Result<(), MailDeliveryError>;
}

/// Issues opaque password-reset tokens.
///
/// Token persistence and lifetime enforcement belong to the verifier, not
/// to the mail flow; this port only produces the opaque value embedded in
/// the reset link.
pub trait ResetTokenIssuer: Send + Sync {
    /// Produce a fresh single-use token.
    fn issue(&self) -> String;
}

impl From<AttributePersistenceError> for Error {
    fn from(err: AttributePersistenceError) -> Self {
        match err {
            AttributePersistenceError::Connection { .. } => {
                Self::service_unavailable("attribute storage is unavailable")
            }
            AttributePersistenceError::Query { message } => {
                Self::internal(format!("attribute query failed: {message}"))
            }
        }
    }
}

impl From<UserPersistenceError> for Error {
    fn from(err: UserPersistenceError) -> Self {
        match err {
            UserPersistenceError::Connection { .. } => {
                Self::service_unavailable("user storage is unavailable")
            }
            UserPersistenceError::Query { message } => {
                Self::internal(format!("user query failed: {message}"))
            }
        }
    }
}

impl From<CatalogPersistenceError> for Error {
    fn from(err: CatalogPersistenceError) -> Self {
        match err {
            CatalogPersistenceError::Connection { .. } => {
                Self::service_unavailable("catalog storage is unavailable")
            }
            CatalogPersistenceError::Query { message } => {
                Self::internal(format!("catalog query failed: {message}"))
            }
            CatalogPersistenceError::CategoryNotFound { slug } => {
                Self::not_found(format!("category not found: {slug}"))
            }
        }
    }
}

impl From<OrderPersistenceError> for Error {
    fn from(err: OrderPersistenceError) -> Self {
        match err {
            OrderPersistenceError::Connection { .. } => {
                Self::service_unavailable("order storage is unavailable")
            }
            OrderPersistenceError::Query { message } => {
                Self::internal(format!("order query failed: {message}"))
            }
        }
    }
}

#[cfg(test)]
mod tests {
    //! Regression coverage for error mapping at the port boundary.
    use rstest::rstest;

    use super::*;
    use crate::domain::error::ErrorCode;

    #[rstest]
    fn connection_failures_surface_as_service_unavailable() {
        let err: Error = AttributePersistenceError::connection("refused").into();
        assert_eq!(err.code(), ErrorCode::ServiceUnavailable);

        let err: Error = UserPersistenceError::connection("refused").into();
        assert_eq!(err.code(), ErrorCode::ServiceUnavailable);

        let err: Error = OrderPersistenceError::connection("refused").into();
        assert_eq!(err.code(), ErrorCode::ServiceUnavailable);
    }

    #[rstest]
    fn query_failures_surface_as_internal_errors() {
        let err: Error = CatalogPersistenceError::query("syntax error").into();
        assert_eq!(err.code(), ErrorCode::InternalError);
        assert!(err.message().contains("syntax error"));
    }

    #[rstest]
    fn missing_categories_surface_as_not_found() {
        let err: Error = CatalogPersistenceError::category_not_found("lentes-de-sol").into();
        assert_eq!(err.code(), ErrorCode::NotFound);
        assert!(err.message().contains("lentes-de-sol"));
    }
}
