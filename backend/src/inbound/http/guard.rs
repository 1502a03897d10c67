//! Admin gate for back-office routes.
//!
//! Realises the domain access-decision contract at the HTTP boundary as an
//! extractor: handlers that take [`AdminAccess`] only ever run for an
//! authenticated administrator. Every other session state turns into a
//! history-replacing redirect before the handler body is reached, so
//! protected content is never produced for a non-matching role.

use actix_web::http::StatusCode;
use actix_web::http::header;
use actix_web::{FromRequest, HttpRequest, HttpResponse, ResponseError, dev::Payload};
use futures_util::future::LocalBoxFuture;

use crate::domain::{AccessDecision, AuthContext, Error, Role, User};

use super::session::SessionContext;

/// Login entry point unauthenticated visitors are sent to.
pub const LOGIN_PATH: &str = "/login";

/// Public landing page visitors with the wrong role are sent to.
pub const HOME_PATH: &str = "/";

/// Redirect outcome of a failed gate check.
///
/// Uses `303 See Other` so the browser replaces the guarded location
/// instead of caching a permanent redirect for it.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AccessRedirect {
    location: &'static str,
}

impl AccessRedirect {
    /// Redirect to the login entry point.
    pub fn to_login() -> Self {
        Self {
            location: LOGIN_PATH,
        }
    }

    /// Redirect to the public landing page.
    pub fn to_home() -> Self {
        Self {
            location: HOME_PATH,
        }
    }

    /// Target location of the redirect.
    pub fn location(&self) -> &'static str {
        self.location
    }
}

impl std::fmt::Display for AccessRedirect {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "redirect to {}", self.location)
    }
}

impl ResponseError for AccessRedirect {
    fn status_code(&self) -> StatusCode {
        StatusCode::SEE_OTHER
    }

    fn error_response(&self) -> HttpResponse {
        HttpResponse::SeeOther()
            .insert_header((header::LOCATION, self.location))
            .finish()
    }
}

/// Extractor granting a handler to an authenticated administrator.
#[derive(Debug, Clone)]
pub struct AdminAccess {
    user: User,
}

impl AdminAccess {
    /// The administrator the gate admitted.
    pub fn user(&self) -> &User {
        &self.user
    }
}

/// Resolve the session into an [`AuthContext`] and gate on `required`.
///
/// The context starts `Resolving` and moves to a resolved state from the
/// session lookup; the decision is taken only after resolution, so the
/// `Wait` outcome cannot leak out of this function.
fn gate(session: &SessionContext, required: Role) -> Result<User, actix_web::Error> {
    let mut context = AuthContext::new();
    match session.current_user()? {
        Some(user) => context.resolve_authenticated(user),
        None => context.resolve_unauthenticated(),
    }

    match context.decide(required) {
        AccessDecision::Grant => context
            .user()
            .cloned()
            .ok_or_else(|| Error::internal("granted decision without a user").into()),
        AccessDecision::RedirectToLogin => Err(AccessRedirect::to_login().into()),
        AccessDecision::RedirectToHome => Err(AccessRedirect::to_home().into()),
        AccessDecision::Wait => {
            Err(Error::internal("session resolution did not complete").into())
        }
    }
}

impl FromRequest for AdminAccess {
    type Error = actix_web::Error;
    type Future = LocalBoxFuture<'static, Result<Self, Self::Error>>;

    fn from_request(req: &HttpRequest, payload: &mut Payload) -> Self::Future {
        let fut = SessionContext::from_request(req, payload);
        Box::pin(async move {
            let session = fut.await?;
            let user = gate(&session, Role::Admin)?;
            Ok(Self { user })
        })
    }
}

#[cfg(test)]
mod tests {
    //! Gate matrix: no session, customer session, admin session.
    use actix_web::http::StatusCode;
    use actix_web::{App, HttpResponse, test, web};

    use super::*;
    use crate::inbound::http::test_utils::{fixture_user, test_session_middleware};

    fn guarded_test_app() -> App<
        impl actix_web::dev::ServiceFactory<
            actix_web::dev::ServiceRequest,
            Config = (),
            Response = actix_web::dev::ServiceResponse,
            Error = actix_web::Error,
            InitError = (),
        >,
    > {
        App::new()
            .wrap(test_session_middleware())
            .route(
                "/login-as/{role}",
                web::get().to(
                    |session: SessionContext, path: web::Path<String>| async move {
                        let role = match path.as_str() {
                            "admin" => Role::Admin,
                            _ => Role::Customer,
                        };
                        session.persist_user(&fixture_user(role))?;
                        Ok::<_, Error>(HttpResponse::Ok())
                    },
                ),
            )
            .route(
                "/admin/ping",
                web::get().to(|admin: AdminAccess| async move {
                    HttpResponse::Ok().body(admin.user().email().to_string())
                }),
            )
    }

    async fn login_cookie(
        app: &impl actix_web::dev::Service<
            actix_http::Request,
            Response = actix_web::dev::ServiceResponse,
            Error = actix_web::Error,
        >,
        role: &str,
    ) -> actix_web::cookie::Cookie<'static> {
        let res = test::call_service(
            app,
            test::TestRequest::get()
                .uri(&format!("/login-as/{role}"))
                .to_request(),
        )
        .await;
        assert!(res.status().is_success());
        res.response()
            .cookies()
            .find(|c| c.name() == "session")
            .expect("session cookie")
            .into_owned()
    }

    #[actix_web::test]
    async fn visitors_without_a_session_are_redirected_to_login() {
        let app = test::init_service(guarded_test_app()).await;

        let res =
            test::call_service(&app, test::TestRequest::get().uri("/admin/ping").to_request())
                .await;

        assert_eq!(res.status(), StatusCode::SEE_OTHER);
        let location = res
            .headers()
            .get(header::LOCATION)
            .and_then(|v| v.to_str().ok());
        assert_eq!(location, Some(LOGIN_PATH));
    }

    #[actix_web::test]
    async fn customers_are_redirected_to_the_landing_page() {
        let app = test::init_service(guarded_test_app()).await;
        let cookie = login_cookie(&app, "customer").await;

        let res = test::call_service(
            &app,
            test::TestRequest::get()
                .uri("/admin/ping")
                .cookie(cookie)
                .to_request(),
        )
        .await;

        assert_eq!(res.status(), StatusCode::SEE_OTHER);
        let location = res
            .headers()
            .get(header::LOCATION)
            .and_then(|v| v.to_str().ok());
        assert_eq!(location, Some(HOME_PATH));
        let body = test::read_body(res).await;
        assert!(body.is_empty(), "no protected content may leak");
    }

    #[actix_web::test]
    async fn administrators_reach_the_protected_handler() {
        let app = test::init_service(guarded_test_app()).await;
        let cookie = login_cookie(&app, "admin").await;

        let res = test::call_service(
            &app,
            test::TestRequest::get()
                .uri("/admin/ping")
                .cookie(cookie)
                .to_request(),
        )
        .await;

        assert_eq!(res.status(), StatusCode::OK);
        let body = test::read_body(res).await;
        assert_eq!(body, "ana@example.com");
    }
}
