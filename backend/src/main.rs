//! Backend entry-point: wires REST endpoints, session middleware, and
//! OpenAPI docs over the PostgreSQL and SMTP adapters.

use std::env;
use std::io;
use std::sync::Arc;

use actix_session::{SessionMiddleware, storage::CookieSessionStore};
use actix_web::cookie::{Key, SameSite};
use actix_web::{App, HttpServer, web};
use ortho_config::OrthoConfig;
use tracing::{info, warn};
use tracing_subscriber::{EnvFilter, fmt};
use url::Url;
#[cfg(debug_assertions)]
use utoipa::OpenApi;
#[cfg(debug_assertions)]
use utoipa_swagger_ui::SwaggerUi;

#[cfg(debug_assertions)]
use backend::ApiDoc;
use backend::domain::EmailService;
use backend::domain::ports::Mailer;
use backend::inbound::http::state::{HttpState, HttpStatePorts};
use backend::inbound::http::{admin, auth, catalog, health, orders};
use backend::outbound::mail::{MailSettings, PreviewMailer, SmtpMailer};
use backend::outbound::persistence::{
    DbPool, DieselAttributeRepository, DieselCategoryRepository, DieselLoginService,
    DieselOrderRepository, DieselProductRepository, DieselUserStore, PoolSettings,
};
use backend::outbound::reset_tokens::RandomResetTokenIssuer;

/// Application bootstrap.
#[actix_web::main]
async fn main() -> io::Result<()> {
    if let Err(e) = fmt()
        .with_env_filter(EnvFilter::from_default_env())
        .json()
        .try_init()
    {
        warn!(error = %e, "tracing init failed");
    }

    let database_url = env::var("DATABASE_URL")
        .map_err(|_| io::Error::other("DATABASE_URL must be set"))?;
    let pool = DbPool::connect(PoolSettings::new(&database_url))
        .await
        .map_err(|error| io::Error::other(format!("create database pool: {error}")))?;

    let frontend_url = env::var("FRONTEND_URL")
        .unwrap_or_else(|_| "http://localhost:3000".to_owned());
    let frontend_url = Url::parse(&frontend_url)
        .map_err(|error| io::Error::other(format!("invalid FRONTEND_URL: {error}")))?;

    let mail_settings = MailSettings::load()
        .map_err(|error| io::Error::other(format!("load mail settings: {error}")))?;
    let mailer: Arc<dyn Mailer> = if let Some(connection) = mail_settings.connection() {
        info!(host = %connection.host, "mail transport: SMTP relay");
        Arc::new(SmtpMailer::new(connection, mail_settings.sender()))
    } else {
        warn!("mail transport: preview only (no SMTP credentials configured)");
        Arc::new(PreviewMailer)
    };
    let email = Arc::new(EmailService::new(mailer, frontend_url));

    let key_path =
        env::var("SESSION_KEY_FILE").unwrap_or_else(|_| "/var/run/secrets/session_key".into());
    let key = match std::fs::read(&key_path) {
        Ok(bytes) => Key::derive_from(&bytes),
        Err(e) => {
            let allow_dev = env::var("SESSION_ALLOW_EPHEMERAL").ok().as_deref() == Some("1");
            if cfg!(debug_assertions) || allow_dev {
                warn!(path = %key_path, error = %e, "using temporary session key (dev only)");
                Key::generate()
            } else {
                return Err(io::Error::other(format!(
                    "failed to read session key at {key_path}: {e}"
                )));
            }
        }
    };

    let cookie_secure = env::var("SESSION_COOKIE_SECURE")
        .map(|v| v != "0")
        .unwrap_or(true);

    let state = HttpState::new(HttpStatePorts {
        login: Arc::new(DieselLoginService::new(DieselUserStore::new(pool.clone()))),
        users: Arc::new(DieselUserStore::new(pool.clone())),
        attributes: Arc::new(DieselAttributeRepository::new(pool.clone())),
        categories: Arc::new(DieselCategoryRepository::new(pool.clone())),
        products: Arc::new(DieselProductRepository::new(pool.clone())),
        orders: Arc::new(DieselOrderRepository::new(pool)),
        email,
        reset_tokens: Arc::new(RandomResetTokenIssuer),
    });

    let port: u16 = env::var("PORT")
        .ok()
        .and_then(|v| v.parse().ok())
        .unwrap_or(8080);

    info!(port, "starting HTTP server");
    HttpServer::new(move || {
        let session = SessionMiddleware::builder(CookieSessionStore::default(), key.clone())
            .cookie_name("session".into())
            .cookie_path("/".into())
            .cookie_secure(cookie_secure)
            .cookie_http_only(true)
            .cookie_same_site(SameSite::Lax)
            .build();

        let api = web::scope("/api/v1")
            .wrap(session)
            .service(auth::login)
            .service(auth::logout)
            .service(auth::me)
            .service(auth::forgot_password)
            .service(catalog::list_categories)
            .service(catalog::list_products)
            .service(catalog::product_detail)
            .service(orders::create_order)
            .service(orders::list_my_orders)
            .service(admin::list_attributes)
            .service(admin::upsert_attribute)
            .service(admin::list_all_orders)
            .service(admin::list_users);

        let app = App::new()
            .app_data(web::Data::new(state.clone()))
            .service(api)
            .service(health::live);

        #[cfg(debug_assertions)]
        let app = app.service(
            SwaggerUi::new("/docs/{_:.*}").url("/api-docs/openapi.json", ApiDoc::openapi()),
        );

        app
    })
    .bind(("0.0.0.0", port))?
    .run()
    .await
}
