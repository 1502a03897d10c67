//! Domain primitives, aggregates, and services.
//!
//! Purpose: define the strongly typed entities and use-cases shared by the
//! HTTP adapter, the persistence layer, and the maintenance binaries. Types
//! stay immutable where practical; invariants and serialisation contracts
//! are documented on each type.

pub mod attribute;
pub mod auth;
pub mod catalog;
pub mod email;
pub mod error;
pub mod order;
pub mod ports;
pub mod seeding;
pub mod user;

pub use self::attribute::{
    AttributeCode, AttributeKind, AttributeValidationError, DomainAttribute,
};
pub use self::auth::{
    AccessDecision, AuthContext, LoginCredentials, LoginValidationError, SessionStatus,
};
pub use self::catalog::{Category, Page, PageRequest, Product, ProductFilter};
pub use self::email::{EmailService, OutboundEmail, PASSWORD_RESET_SUBJECT};
pub use self::error::{Error, ErrorCode, ErrorValidationError};
pub use self::order::{
    NewOrder, Order, OrderDraftItem, OrderItem, OrderStatus, OrderValidationError, build_order,
};
pub use self::seeding::{DomainSeeder, SeedReport, SeedingError};
pub use self::user::{DisplayName, EmailAddress, Role, User, UserId, UserValidationError};

/// Convenient API result alias.
///
/// # Examples
/// ```
/// use actix_web::HttpResponse;
/// use backend::domain::{ApiResult, Error};
///
/// fn handler() -> ApiResult<HttpResponse> {
///     Err(Error::forbidden("nope"))
/// }
/// ```
pub type ApiResult<T> = Result<T, Error>;
