//! Shared HTTP adapter state.
//!
//! HTTP handlers accept this state via `actix_web::web::Data` so they only
//! depend on domain ports and services, and remain testable without I/O.

use std::sync::Arc;

use crate::domain::EmailService;
use crate::domain::ports::{
    AttributeRepository, CategoryRepository, LoginService, OrderRepository, ProductRepository,
    ResetTokenIssuer, UserStore,
};

/// Parameter object bundling all port implementations for HTTP handlers.
#[derive(Clone)]
pub struct HttpStatePorts {
    /// Credential verification.
    pub login: Arc<dyn LoginService>,
    /// Account lookups.
    pub users: Arc<dyn UserStore>,
    /// Domain attribute management.
    pub attributes: Arc<dyn AttributeRepository>,
    /// Category listing and maintenance.
    pub categories: Arc<dyn CategoryRepository>,
    /// Product listing and lookup.
    pub products: Arc<dyn ProductRepository>,
    /// Order persistence.
    pub orders: Arc<dyn OrderRepository>,
    /// Transactional mail façade.
    pub email: Arc<EmailService>,
    /// Password-reset token generation.
    pub reset_tokens: Arc<dyn ResetTokenIssuer>,
}

/// Dependency bundle for HTTP handlers.
#[derive(Clone)]
pub struct HttpState {
    /// Credential verification.
    pub login: Arc<dyn LoginService>,
    /// Account lookups.
    pub users: Arc<dyn UserStore>,
    /// Domain attribute management.
    pub attributes: Arc<dyn AttributeRepository>,
    /// Category listing and maintenance.
    pub categories: Arc<dyn CategoryRepository>,
    /// Product listing and lookup.
    pub products: Arc<dyn ProductRepository>,
    /// Order persistence.
    pub orders: Arc<dyn OrderRepository>,
    /// Transactional mail façade.
    pub email: Arc<EmailService>,
    /// Password-reset token generation.
    pub reset_tokens: Arc<dyn ResetTokenIssuer>,
}

impl HttpState {
    /// Construct state from a ports bundle.
    pub fn new(ports: HttpStatePorts) -> Self {
        let HttpStatePorts {
            login,
            users,
            attributes,
            categories,
            products,
            orders,
            email,
            reset_tokens,
        } = ports;
        Self {
            login,
            users,
            attributes,
            categories,
            products,
            orders,
            email,
            reset_tokens,
        }
    }
}
