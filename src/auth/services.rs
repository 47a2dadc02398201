use std::sync::Arc;

use lazy_static::lazy_static;
use regex::Regex;
use time::OffsetDateTime;
use tracing::{info, warn};
use uuid::Uuid;

use crate::{
    auth::{
        dto::{AuthResponse, PublicUser},
        jwt::JwtKeys,
        password::{hash_password, verify_password},
        repo::{DirectoryError, User, UserDirectory},
    },
    error::ApiError,
};

pub(crate) fn is_valid_email(email: &str) -> bool {
    lazy_static! {
        static ref EMAIL_RE: Regex = Regex::new(r"^[^@\s]+@[^@\s]+\.[^@\s]+$").unwrap();
    }
    EMAIL_RE.is_match(email)
}

const MIN_PASSWORD_LEN: usize = 8;

/// Orchestrates signup, login and lookup over the user directory,
/// the password hasher and the token issuer.
#[derive(Clone)]
pub struct IdentityService {
    users: Arc<dyn UserDirectory>,
    keys: JwtKeys,
}

impl IdentityService {
    pub fn new(users: Arc<dyn UserDirectory>, keys: JwtKeys) -> Self {
        Self { users, keys }
    }

    fn check_credentials_shape(email: &str, password: &str) -> Result<(), ApiError> {
        if !is_valid_email(email) {
            return Err(ApiError::Validation("invalid email address".into()));
        }
        if password.len() < MIN_PASSWORD_LEN {
            return Err(ApiError::Validation("password too short".into()));
        }
        Ok(())
    }

    /// Register a new user and issue a token for the persisted record.
    ///
    /// An existing account with the same email is a conflict with no side
    /// effects. Unexpected lookup failures are never masked as "not found".
    pub async fn signup(&self, email: &str, password: &str) -> Result<AuthResponse, ApiError> {
        Self::check_credentials_shape(email, password)?;

        match self.users.get_by_email(email).await {
            Ok(_) => {
                warn!(email = %email, "signup with already registered email");
                return Err(ApiError::Conflict(
                    "user with this email already exists".into(),
                ));
            }
            Err(DirectoryError::NotFound) => {}
            Err(e) => return Err(ApiError::Persistence(e.into())),
        }

        let password_hash = run_hash(password.to_owned()).await?;

        let now = OffsetDateTime::now_utc();
        let user = User {
            id: Uuid::new_v4(),
            email: email.to_owned(),
            password_hash,
            role: "user".into(),
            created_at: now,
            updated_at: now,
        };

        let created = self.users.create_user(user).await.map_err(|e| match e {
            DirectoryError::Duplicate => {
                ApiError::Conflict("user with this email already exists".into())
            }
            other => ApiError::Persistence(other.into()),
        })?;

        let token = self.keys.sign(&created)?;
        info!(user_id = %created.id, email = %created.email, "user registered");
        Ok(AuthResponse {
            token,
            user: created.into(),
        })
    }

    /// Verify credentials and issue a fresh token.
    ///
    /// Every failure path renders the same error so a caller cannot tell an
    /// unknown email apart from a wrong password.
    pub async fn authenticate(&self, email: &str, password: &str) -> Result<AuthResponse, ApiError> {
        let user = match self.users.get_by_email(email).await {
            Ok(u) => u,
            Err(e) => {
                warn!(email = %email, error = %e, "login lookup failed");
                return Err(ApiError::AuthenticationFailed);
            }
        };

        let digest = user.password_hash.clone();
        let ok = run_verify(password.to_owned(), digest).await?;
        if !ok {
            warn!(email = %email, user_id = %user.id, "login password mismatch");
            return Err(ApiError::AuthenticationFailed);
        }

        let token = self.keys.sign(&user)?;
        info!(user_id = %user.id, email = %user.email, "user logged in");
        Ok(AuthResponse {
            token,
            user: user.into(),
        })
    }

    /// Look up a user by its opaque identifier. Unlike login, this path
    /// discloses "not found" on purpose.
    pub async fn get_user_by_id(&self, raw_id: &str) -> Result<PublicUser, ApiError> {
        let id = Uuid::parse_str(raw_id)
            .map_err(|_| ApiError::Validation("invalid user ID format".into()))?;
        self.get_user(id).await
    }

    pub async fn get_user(&self, id: Uuid) -> Result<PublicUser, ApiError> {
        match self.users.get_by_id(id).await {
            Ok(user) => Ok(user.into()),
            Err(DirectoryError::NotFound) => Err(ApiError::NotFound("user not found".into())),
            Err(e) => Err(ApiError::Persistence(e.into())),
        }
    }
}

// Hashing is CPU-bound; keep it off the async worker threads.
async fn run_hash(password: String) -> Result<String, ApiError> {
    tokio::task::spawn_blocking(move || hash_password(&password))
        .await
        .map_err(|e| ApiError::Hashing(e.into()))?
        .map_err(ApiError::Hashing)
}

async fn run_verify(password: String, digest: String) -> Result<bool, ApiError> {
    tokio::task::spawn_blocking(move || verify_password(&password, &digest))
        .await
        .map_err(|e| ApiError::Hashing(e.into()))?
        .map_err(ApiError::Hashing)
}
