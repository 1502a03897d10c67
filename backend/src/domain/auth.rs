//! Authentication primitives and the session-gating state machine.
//!
//! Keep inbound payload parsing outside the domain by exposing constructors
//! that validate string inputs before a handler talks to a port or service.
//! [`AuthContext`] owns the session-resolution lifecycle the admin gate is
//! built on; it is created per resolution flow and passed explicitly, never
//! held as an implicit global.

use std::fmt;

use zeroize::Zeroizing;

use super::user::{EmailAddress, Role, User};

/// Domain error returned when login payload values are invalid.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum LoginValidationError {
    /// Email was missing or failed shape validation.
    InvalidEmail,
    /// Password was blank.
    EmptyPassword,
}

impl fmt::Display for LoginValidationError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::InvalidEmail => write!(f, "email address is not valid"),
            Self::EmptyPassword => write!(f, "password must not be empty"),
        }
    }
}

impl std::error::Error for LoginValidationError {}

/// Validated login credentials used by authentication services.
///
/// ## Invariants
/// - `email` is canonicalised (trimmed, lowercased) and structurally valid.
/// - `password` is required to be non-empty but retains caller-provided
///   whitespace to avoid surprising credential comparisons.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LoginCredentials {
    email: EmailAddress,
    password: Zeroizing<String>,
}

impl LoginCredentials {
    /// Construct credentials from raw email/password inputs.
    pub fn try_from_parts(email: &str, password: &str) -> Result<Self, LoginValidationError> {
        let email =
            EmailAddress::new(email).map_err(|_| LoginValidationError::InvalidEmail)?;
        if password.is_empty() {
            return Err(LoginValidationError::EmptyPassword);
        }
        Ok(Self {
            email,
            password: Zeroizing::new(password.to_owned()),
        })
    }

    /// Canonical email used for account lookups.
    pub fn email(&self) -> &EmailAddress {
        &self.email
    }

    /// Password string provided by the caller.
    pub fn password(&self) -> &str {
        self.password.as_str()
    }
}

/// Session-resolution state tracked by [`AuthContext`].
///
/// Exactly one state is active at a time. `Resolving` is the initial state
/// while the session source is being queried; the two resolved states carry
/// the outcome of that query.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SessionStatus {
    /// Session status is not yet known.
    Resolving,
    /// No valid session exists.
    Unauthenticated,
    /// A valid session exists for this user; the role is cached here and is
    /// only ever written from an authentication result.
    Authenticated(User),
}

/// Outcome of gating a protected area against the current session state.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum AccessDecision {
    /// Session is still resolving: show a neutral waiting state, render
    /// nothing protected, and do not redirect yet.
    Wait,
    /// No session: send the visitor to the login entry point, replacing
    /// history so back-navigation does not return to the guarded area.
    RedirectToLogin,
    /// Valid session with the wrong role: send the visitor to the public
    /// landing entry point, replacing history.
    RedirectToHome,
    /// Valid session with the required role: the protected area may render.
    Grant,
}

/// Explicitly owned session-gating context.
///
/// Lifecycle: constructed in `Resolving`, moved to a resolved state by the
/// session lookup, and returned to `Resolving` by logout or a forced
/// re-check. Decisions are pure reads over the current state, so every
/// state change is immediately reflected by the next [`AuthContext::decide`]
/// call; protected content is never granted while the role does not match.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AuthContext {
    status: SessionStatus,
}

impl Default for AuthContext {
    fn default() -> Self {
        Self::new()
    }
}

impl AuthContext {
    /// Start a resolution flow in the `Resolving` state.
    pub fn new() -> Self {
        Self {
            status: SessionStatus::Resolving,
        }
    }

    /// Current session status.
    pub fn status(&self) -> &SessionStatus {
        &self.status
    }

    /// Record that the session source reported a valid session.
    pub fn resolve_authenticated(&mut self, user: User) {
        self.status = SessionStatus::Authenticated(user);
    }

    /// Record that the session source reported no usable session.
    pub fn resolve_unauthenticated(&mut self) {
        self.status = SessionStatus::Unauthenticated;
    }

    /// Drop the resolved state and start a fresh resolution.
    ///
    /// Used for explicit logout and forced re-checks; callers must run the
    /// session lookup again before the next decision grants anything.
    pub fn reset(&mut self) {
        self.status = SessionStatus::Resolving;
    }

    /// Authenticated user, when the session has resolved to one.
    pub fn user(&self) -> Option<&User> {
        match &self.status {
            SessionStatus::Authenticated(user) => Some(user),
            _ => None,
        }
    }

    /// Gate a protected area requiring `required` against the current state.
    pub fn decide(&self, required: Role) -> AccessDecision {
        match &self.status {
            SessionStatus::Resolving => AccessDecision::Wait,
            SessionStatus::Unauthenticated => AccessDecision::RedirectToLogin,
            SessionStatus::Authenticated(user) if user.role() == required => {
                AccessDecision::Grant
            }
            SessionStatus::Authenticated(_) => AccessDecision::RedirectToHome,
        }
    }
}

#[cfg(test)]
mod tests {
    //! Regression coverage for this module.
    use rstest::rstest;

    use super::*;
    use crate::domain::user::UserId;

    fn user_with_role(role: Role) -> User {
        User::new(
            UserId::random(),
            crate::domain::user::DisplayName::new("Ana").expect("valid name"),
            EmailAddress::new("ana@example.com").expect("valid email"),
            role,
        )
    }

    #[rstest]
    #[case("", "pw", LoginValidationError::InvalidEmail)]
    #[case("not-an-email", "pw", LoginValidationError::InvalidEmail)]
    #[case("ana@example.com", "", LoginValidationError::EmptyPassword)]
    fn invalid_credentials(
        #[case] email: &str,
        #[case] password: &str,
        #[case] expected: LoginValidationError,
    ) {
        let err = LoginCredentials::try_from_parts(email, password)
            .expect_err("invalid inputs must fail");
        assert_eq!(err, expected);
    }

    #[rstest]
    fn credentials_canonicalise_email_but_keep_password_verbatim() {
        let creds = LoginCredentials::try_from_parts("  Ana@Example.COM ", " secret ")
            .expect("valid inputs should succeed");
        assert_eq!(creds.email().as_ref(), "ana@example.com");
        assert_eq!(creds.password(), " secret ");
    }

    #[rstest]
    fn context_starts_resolving() {
        let context = AuthContext::new();
        assert_eq!(*context.status(), SessionStatus::Resolving);
        assert_eq!(context.decide(Role::Admin), AccessDecision::Wait);
        assert!(context.user().is_none());
    }

    #[rstest]
    fn resolving_never_grants_or_redirects() {
        let context = AuthContext::new();
        for required in [Role::Admin, Role::Customer] {
            assert_eq!(context.decide(required), AccessDecision::Wait);
        }
    }

    #[rstest]
    fn missing_session_redirects_to_login() {
        let mut context = AuthContext::new();
        context.resolve_unauthenticated();
        assert_eq!(context.decide(Role::Admin), AccessDecision::RedirectToLogin);
    }

    #[rstest]
    fn wrong_role_redirects_home_without_granting() {
        let mut context = AuthContext::new();
        context.resolve_authenticated(user_with_role(Role::Customer));
        assert_eq!(context.decide(Role::Admin), AccessDecision::RedirectToHome);
    }

    #[rstest]
    fn matching_role_grants_access() {
        let mut context = AuthContext::new();
        context.resolve_authenticated(user_with_role(Role::Admin));
        assert_eq!(context.decide(Role::Admin), AccessDecision::Grant);
        assert!(context.user().is_some());
    }

    #[rstest]
    fn decisions_track_every_state_change() {
        let mut context = AuthContext::new();
        assert_eq!(context.decide(Role::Admin), AccessDecision::Wait);

        context.resolve_authenticated(user_with_role(Role::Admin));
        assert_eq!(context.decide(Role::Admin), AccessDecision::Grant);

        // Logout returns to Resolving; nothing is granted until the next
        // resolution completes.
        context.reset();
        assert_eq!(context.decide(Role::Admin), AccessDecision::Wait);
        assert!(context.user().is_none());

        context.resolve_unauthenticated();
        assert_eq!(context.decide(Role::Admin), AccessDecision::RedirectToLogin);
    }
}
