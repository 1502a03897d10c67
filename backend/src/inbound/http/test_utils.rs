//! Test helpers for inbound HTTP components.
//!
//! Provides the session middleware used by handler tests plus an in-memory
//! [`TestState`] wiring every port to a stub, so handler behaviour is
//! exercised without a database or mail relay.

use std::sync::{Arc, Mutex};

use actix_session::{SessionMiddleware, storage::CookieSessionStore};
use actix_web::cookie::Key;
use async_trait::async_trait;
use chrono::Utc;
use serde_json::json;
use url::Url;
use uuid::Uuid;

use crate::domain::attribute::{AttributeKind, DomainAttribute};
use crate::domain::auth::LoginCredentials;
use crate::domain::catalog::{Category, Page, PageRequest, Product, ProductFilter};
use crate::domain::email::{EmailService, OutboundEmail};
use crate::domain::order::{NewOrder, Order};
use crate::domain::ports::{
    AttributePersistenceError, AttributeRepository, CatalogPersistenceError, CategoryRepository,
    LoginService, MailDeliveryError, Mailer, OrderPersistenceError, OrderRepository,
    ProductRepository, ResetTokenIssuer, UserPersistenceError, UserRecord, UserStore,
};
use crate::domain::user::{DisplayName, EmailAddress, Role, User, UserId};
use crate::domain::Error;
use crate::inbound::http::state::{HttpState, HttpStatePorts};

/// Password accepted by the fixture login service.
pub const FIXTURE_PASSWORD: &str = "secreto123";

/// Build a session middleware configured for tests.
///
/// - Generates a fresh signing/encryption key per invocation.
/// - Sets the cookie name to `session` and disables the `Secure` flag for
///   local HTTP tests.
pub fn test_session_middleware() -> SessionMiddleware<CookieSessionStore> {
    SessionMiddleware::builder(CookieSessionStore::default(), Key::generate())
        .cookie_name("session".to_owned())
        .cookie_secure(false)
        .build()
}

/// Deterministic user fixture with the given role.
pub fn fixture_user(role: Role) -> User {
    User::new(
        UserId::new("3fa85f64-5717-4562-b3fc-2c963f66afa6").expect("fixture id"),
        DisplayName::new("Ana").expect("fixture name"),
        EmailAddress::new("ana@example.com").expect("fixture email"),
        role,
    )
}

/// Log the fixture account in and return its session cookie.
pub async fn login_cookie_for(
    app: &impl actix_web::dev::Service<
        actix_http::Request,
        Response = actix_web::dev::ServiceResponse,
        Error = actix_web::Error,
    >,
) -> actix_web::cookie::Cookie<'static> {
    let res = actix_web::test::call_service(
        app,
        actix_web::test::TestRequest::post()
            .uri("/api/v1/auth/login")
            .set_json(json!({ "email": "ana@example.com", "password": FIXTURE_PASSWORD }))
            .to_request(),
    )
    .await;
    assert!(res.status().is_success(), "fixture login must succeed");
    res.response()
        .cookies()
        .find(|c| c.name() == "session")
        .expect("session cookie")
        .into_owned()
}

/// Login service admitting the fixture account with [`FIXTURE_PASSWORD`].
struct FixtureLoginService {
    user: User,
}

#[async_trait]
impl LoginService for FixtureLoginService {
    async fn authenticate(&self, credentials: &LoginCredentials) -> Result<User, Error> {
        if credentials.email() == self.user.email() && credentials.password() == FIXTURE_PASSWORD {
            Ok(self.user.clone())
        } else {
            Err(Error::unauthorized("invalid credentials"))
        }
    }
}

struct StubUserStore {
    records: Vec<UserRecord>,
}

#[async_trait]
impl UserStore for StubUserStore {
    async fn find_by_email(
        &self,
        email: &EmailAddress,
    ) -> Result<Option<UserRecord>, UserPersistenceError> {
        Ok(self
            .records
            .iter()
            .find(|record| record.user.email() == email)
            .cloned())
    }

    async fn list(&self) -> Result<Vec<User>, UserPersistenceError> {
        Ok(self.records.iter().map(|record| record.user.clone()).collect())
    }
}

#[derive(Default)]
struct StubAttributeRepository {
    rows: Mutex<Vec<DomainAttribute>>,
}

#[async_trait]
impl AttributeRepository for StubAttributeRepository {
    async fn upsert(&self, attribute: &DomainAttribute) -> Result<(), AttributePersistenceError> {
        let mut rows = self.rows.lock().expect("rows lock");
        if let Some(existing) = rows
            .iter_mut()
            .find(|row| row.natural_key() == attribute.natural_key())
        {
            *existing = attribute.clone();
        } else {
            rows.push(attribute.clone());
        }
        Ok(())
    }

    async fn list(
        &self,
        kind: Option<AttributeKind>,
    ) -> Result<Vec<DomainAttribute>, AttributePersistenceError> {
        let rows = self.rows.lock().expect("rows lock");
        Ok(rows
            .iter()
            .filter(|row| kind.is_none_or(|wanted| row.kind() == wanted))
            .cloned()
            .collect())
    }
}

struct StubCategoryRepository {
    categories: Mutex<Vec<Category>>,
}

#[async_trait]
impl CategoryRepository for StubCategoryRepository {
    async fn list(&self) -> Result<Vec<Category>, CatalogPersistenceError> {
        Ok(self.categories.lock().expect("categories lock").clone())
    }

    async fn update_image(
        &self,
        slug: &str,
        image_url: &str,
    ) -> Result<(), CatalogPersistenceError> {
        let mut categories = self.categories.lock().expect("categories lock");
        let Some(category) = categories.iter_mut().find(|c| c.slug == slug) else {
            return Err(CatalogPersistenceError::category_not_found(slug));
        };
        category.image_url = image_url.to_owned();
        Ok(())
    }
}

struct StubProductRepository {
    products: Vec<Product>,
    categories: Vec<Category>,
}

impl StubProductRepository {
    fn matching(&self, filter: &ProductFilter) -> Vec<Product> {
        let category_id = filter
            .category_slug
            .as_deref()
            .map(|slug| self.categories.iter().find(|c| c.slug == slug).map(|c| c.id));
        match category_id {
            // Filter named a slug that resolves to nothing: empty result.
            Some(None) => Vec::new(),
            Some(Some(id)) => self
                .products
                .iter()
                .filter(|p| p.category_id == id)
                .cloned()
                .collect(),
            None => self.products.clone(),
        }
    }
}

#[async_trait]
impl ProductRepository for StubProductRepository {
    async fn page(
        &self,
        filter: &ProductFilter,
        page: PageRequest,
    ) -> Result<Page<Product>, CatalogPersistenceError> {
        let matching = self.matching(filter);
        let total = i64::try_from(matching.len())
            .map_err(|_| CatalogPersistenceError::query("count overflow"))?;
        let items = matching
            .into_iter()
            .skip(usize::try_from(page.offset()).unwrap_or(usize::MAX))
            .take(usize::try_from(page.limit()).unwrap_or(0))
            .collect();
        Ok(Page::new(items, page, total))
    }

    async fn find_by_id(&self, id: Uuid) -> Result<Option<Product>, CatalogPersistenceError> {
        Ok(self.products.iter().find(|p| p.id == id).cloned())
    }

    async fn find_by_ids(&self, ids: &[Uuid]) -> Result<Vec<Product>, CatalogPersistenceError> {
        Ok(self
            .products
            .iter()
            .filter(|p| ids.contains(&p.id))
            .cloned()
            .collect())
    }
}

#[derive(Default)]
struct StubOrderRepository {
    orders: Mutex<Vec<Order>>,
}

#[async_trait]
impl OrderRepository for StubOrderRepository {
    async fn create(&self, order: &NewOrder) -> Result<Order, OrderPersistenceError> {
        let created = Order {
            id: order.id,
            user_id: order.user_id.clone(),
            status: order.status,
            total_cents: order.total_cents,
            created_at: Utc::now(),
            items: order.items.clone(),
        };
        self.orders.lock().expect("orders lock").push(created.clone());
        Ok(created)
    }

    async fn list_for_user(&self, user_id: &UserId) -> Result<Vec<Order>, OrderPersistenceError> {
        Ok(self
            .orders
            .lock()
            .expect("orders lock")
            .iter()
            .filter(|order| &order.user_id == user_id)
            .cloned()
            .collect())
    }

    async fn list_all(&self) -> Result<Vec<Order>, OrderPersistenceError> {
        Ok(self.orders.lock().expect("orders lock").clone())
    }
}

/// Mailer that records every delivered message.
#[derive(Default)]
pub struct RecordingMailer {
    delivered: Mutex<Vec<OutboundEmail>>,
}

impl RecordingMailer {
    /// Snapshot of everything delivered so far.
    pub fn delivered(&self) -> Vec<OutboundEmail> {
        self.delivered.lock().expect("delivered lock").clone()
    }
}

#[async_trait]
impl Mailer for RecordingMailer {
    async fn deliver(&self, email: &OutboundEmail) -> Result<(), MailDeliveryError> {
        self.delivered
            .lock()
            .expect("delivered lock")
            .push(email.clone());
        Ok(())
    }
}

struct FixedTokenIssuer;

impl ResetTokenIssuer for FixedTokenIssuer {
    fn issue(&self) -> String {
        "tok-fixture".to_owned()
    }
}

/// In-memory wiring of every port, plus handles for assertions.
pub struct TestState {
    state: HttpState,
    mailer: Arc<RecordingMailer>,
    first_product_id: Uuid,
}

impl TestState {
    /// Build a state with one account (`ana@example.com` /
    /// [`FIXTURE_PASSWORD`]) holding `role`, one category, and two products.
    pub fn with_account(role: Role) -> Self {
        let user = fixture_user(role);
        let category = Category {
            id: Uuid::new_v4(),
            name: "Lentes de sol".to_owned(),
            slug: "lentes-de-sol".to_owned(),
            image_url: "https://cdn.montura.example/categorias/lentes-de-sol.jpg".to_owned(),
        };
        let products = vec![
            Product {
                id: Uuid::new_v4(),
                name: "Aviador Clásico".to_owned(),
                slug: "aviador-clasico".to_owned(),
                description: "Marco dorado, lentes verdes.".to_owned(),
                price_cents: 15_000,
                category_id: category.id,
                brand_code: Some("ray-ban".to_owned()),
                color_code: Some("dorado".to_owned()),
                shape_code: Some("aviador".to_owned()),
            },
            Product {
                id: Uuid::new_v4(),
                name: "Redondo Retro".to_owned(),
                slug: "redondo-retro".to_owned(),
                description: "Acetato negro, estilo clásico.".to_owned(),
                price_cents: 12_500,
                category_id: category.id,
                brand_code: Some("vulk".to_owned()),
                color_code: Some("negro".to_owned()),
                shape_code: Some("redondo".to_owned()),
            },
        ];
        let first_product_id = products.first().expect("fixture products").id;

        let mailer = Arc::new(RecordingMailer::default());
        let email = Arc::new(EmailService::new(
            mailer.clone(),
            Url::parse("http://montura.test").expect("fixture url"),
        ));

        let record = UserRecord {
            user: user.clone(),
            password_hash: "unused-in-fixture".to_owned(),
        };
        let state = HttpState::new(HttpStatePorts {
            login: Arc::new(FixtureLoginService { user }),
            users: Arc::new(StubUserStore {
                records: vec![record],
            }),
            attributes: Arc::new(StubAttributeRepository::default()),
            categories: Arc::new(StubCategoryRepository {
                categories: Mutex::new(vec![category.clone()]),
            }),
            products: Arc::new(StubProductRepository {
                products,
                categories: vec![category],
            }),
            orders: Arc::new(StubOrderRepository::default()),
            email,
            reset_tokens: Arc::new(FixedTokenIssuer),
        });

        Self {
            state,
            mailer,
            first_product_id,
        }
    }

    /// Dependency bundle for handler construction.
    pub fn state(&self) -> HttpState {
        self.state.clone()
    }

    /// Everything the recording mailer delivered.
    pub fn delivered_mail(&self) -> Vec<OutboundEmail> {
        self.mailer.delivered()
    }

    /// Id of the first fixture product.
    pub fn first_product_id(&self) -> Uuid {
        self.first_product_id
    }
}
