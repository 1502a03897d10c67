//! Login service backed by the user store.
//!
//! Verifies submitted credentials against stored Argon2 hashes. Unknown
//! accounts and wrong passwords produce the same `unauthorized` error so
//! the response does not reveal which addresses have accounts.

use std::sync::Arc;

use argon2::password_hash::{PasswordHash, PasswordVerifier};
use argon2::Argon2;
use async_trait::async_trait;

use crate::domain::auth::LoginCredentials;
use crate::domain::ports::{LoginService, UserStore};
use crate::domain::user::User;
use crate::domain::Error;

use super::diesel_user_store::DieselUserStore;

/// Credential-verifying `LoginService` over a [`UserStore`].
#[derive(Clone)]
pub struct DieselLoginService {
    users: Arc<dyn UserStore>,
}

impl DieselLoginService {
    /// Create a service backed by the Diesel user store.
    pub fn new(users: DieselUserStore) -> Self {
        Self {
            users: Arc::new(users),
        }
    }

    /// Create a service from any user store implementation.
    pub fn from_store(users: Arc<dyn UserStore>) -> Self {
        Self { users }
    }
}

fn password_matches(stored_hash: &str, candidate: &str) -> bool {
    PasswordHash::new(stored_hash)
        .map(|parsed| {
            Argon2::default()
                .verify_password(candidate.as_bytes(), &parsed)
                .is_ok()
        })
        .unwrap_or(false)
}

#[async_trait]
impl LoginService for DieselLoginService {
    async fn authenticate(&self, credentials: &LoginCredentials) -> Result<User, Error> {
        let record = self.users.find_by_email(credentials.email()).await?;

        let Some(record) = record else {
            return Err(Error::unauthorized("invalid credentials"));
        };
        if !password_matches(&record.password_hash, credentials.password()) {
            return Err(Error::unauthorized("invalid credentials"));
        }
        Ok(record.user)
    }
}

#[cfg(test)]
mod tests {
    //! Regression coverage for credential verification and error mapping.
    use std::sync::Mutex;

    use argon2::password_hash::{PasswordHasher, SaltString, rand_core::OsRng};
    use rstest::rstest;

    use super::*;
    use crate::domain::ports::{UserPersistenceError, UserRecord};
    use crate::domain::user::{EmailAddress, Role, User, UserId};
    use crate::domain::ErrorCode;

    struct StubUserStore {
        record: Mutex<Option<UserRecord>>,
        failure: Option<UserPersistenceError>,
    }

    impl StubUserStore {
        fn with_record(record: UserRecord) -> Self {
            Self {
                record: Mutex::new(Some(record)),
                failure: None,
            }
        }

        fn empty() -> Self {
            Self {
                record: Mutex::new(None),
                failure: None,
            }
        }

        fn failing(failure: UserPersistenceError) -> Self {
            Self {
                record: Mutex::new(None),
                failure: Some(failure),
            }
        }
    }

    #[async_trait]
    impl UserStore for StubUserStore {
        async fn find_by_email(
            &self,
            email: &EmailAddress,
        ) -> Result<Option<UserRecord>, UserPersistenceError> {
            if let Some(failure) = &self.failure {
                return Err(failure.clone());
            }
            let record = self.record.lock().expect("record lock");
            Ok(record
                .as_ref()
                .filter(|record| record.user.email() == email)
                .cloned())
        }

        async fn list(&self) -> Result<Vec<User>, UserPersistenceError> {
            Ok(Vec::new())
        }
    }

    fn hash(password: &str) -> String {
        let salt = SaltString::generate(&mut OsRng);
        Argon2::default()
            .hash_password(password.as_bytes(), &salt)
            .expect("hashing succeeds")
            .to_string()
    }

    fn record(email: &str, password: &str, role: Role) -> UserRecord {
        UserRecord {
            user: User::new(
                UserId::random(),
                crate::domain::user::DisplayName::new("Ana").expect("valid name"),
                EmailAddress::new(email).expect("valid email"),
                role,
            ),
            password_hash: hash(password),
        }
    }

    fn credentials(email: &str, password: &str) -> LoginCredentials {
        LoginCredentials::try_from_parts(email, password).expect("valid test credentials")
    }

    #[tokio::test]
    async fn correct_credentials_authenticate() {
        let store = Arc::new(StubUserStore::with_record(record(
            "ana@example.com",
            "secreto123",
            Role::Admin,
        )));
        let service = DieselLoginService::from_store(store);

        let user = service
            .authenticate(&credentials("ana@example.com", "secreto123"))
            .await
            .expect("correct credentials authenticate");
        assert_eq!(user.role(), Role::Admin);
    }

    #[rstest]
    #[case("ana@example.com", "wrong-password")]
    #[case("otra@example.com", "secreto123")]
    #[tokio::test]
    async fn wrong_credentials_are_rejected_uniformly(
        #[case] email: &str,
        #[case] password: &str,
    ) {
        let store = Arc::new(StubUserStore::with_record(record(
            "ana@example.com",
            "secreto123",
            Role::Customer,
        )));
        let service = DieselLoginService::from_store(store);

        let err = service
            .authenticate(&credentials(email, password))
            .await
            .expect_err("wrong credentials must fail");
        assert_eq!(err.code(), ErrorCode::Unauthorized);
        assert_eq!(err.message(), "invalid credentials");
    }

    #[tokio::test]
    async fn unknown_accounts_are_rejected() {
        let service = DieselLoginService::from_store(Arc::new(StubUserStore::empty()));
        let err = service
            .authenticate(&credentials("nadie@example.com", "whatever"))
            .await
            .expect_err("unknown account must fail");
        assert_eq!(err.code(), ErrorCode::Unauthorized);
    }

    #[tokio::test]
    async fn store_failures_surface_as_domain_errors() {
        let service = DieselLoginService::from_store(Arc::new(StubUserStore::failing(
            UserPersistenceError::connection("database unavailable"),
        )));
        let err = service
            .authenticate(&credentials("ana@example.com", "secreto123"))
            .await
            .expect_err("store failure must surface");
        assert_eq!(err.code(), ErrorCode::ServiceUnavailable);
    }

    #[rstest]
    fn malformed_stored_hashes_never_match() {
        assert!(!password_matches("not-a-phc-string", "secreto123"));
    }
}
