//! PostgreSQL persistence adapters using Diesel ORM.
//!
//! Concrete implementations of the domain repository ports, backed by
//! PostgreSQL via Diesel with async support through `diesel-async` and
//! `bb8` connection pooling.
//!
//! Principles:
//!
//! - **Thin adapters**: repositories only translate between Diesel rows and
//!   domain types; no business logic lives here.
//! - **Internal models**: row structs (`models.rs`) and schema definitions
//!   (`schema.rs`) never leak to the domain layer.
//! - **Strongly typed errors**: every database failure maps to a domain
//!   persistence error variant.

pub(crate) mod diesel_error_mapping;
mod diesel_attribute_repository;
mod diesel_category_repository;
mod diesel_login_service;
mod diesel_order_repository;
mod diesel_product_repository;
mod diesel_user_store;
mod models;
mod pool;
mod schema;

pub use diesel_attribute_repository::DieselAttributeRepository;
pub use diesel_category_repository::DieselCategoryRepository;
pub use diesel_login_service::DieselLoginService;
pub use diesel_order_repository::DieselOrderRepository;
pub use diesel_product_repository::DieselProductRepository;
pub use diesel_user_store::DieselUserStore;
pub use pool::{DbPool, PoolError, PoolSettings};
