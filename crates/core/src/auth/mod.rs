//! Users, password hashing and credential checks.
//!
//! Token issuing lives in `mymoney_shared::jwt`; this module only decides
//! whether a registration or a login is acceptable.

mod password;
mod service;

pub use password::{PasswordError, hash_password, verify_password};
pub use service::{AuthError, AuthService, LoginInput, MIN_PASSWORD_LEN, RegisterInput};

use async_trait::async_trait;
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use mymoney_shared::AppResult;
use mymoney_shared::types::UserId;

/// A registered user.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct User {
    /// User ID.
    pub id: UserId,
    /// Display name.
    pub name: String,
    /// Trimmed, lower-cased e-mail.
    pub email: String,
    /// Argon2id PHC string.
    #[serde(skip_serializing)]
    pub password_hash: String,
    /// Registration timestamp.
    pub created_at: DateTime<Utc>,
}

/// A user about to be stored.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NewUser {
    /// Display name.
    pub name: String,
    /// Normalized e-mail.
    pub email: String,
    /// Argon2id PHC string.
    pub password_hash: String,
}

/// Storage of users.
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait UserStore: Send + Sync {
    /// Finds a user by normalized e-mail.
    async fn find_by_email(&self, email: &str) -> AppResult<Option<User>>;

    /// Persists a new user.
    ///
    /// Fails with `AppError::Conflict` if the e-mail is already taken.
    async fn insert(&self, user: NewUser) -> AppResult<User>;
}

/// Normalizes an e-mail address for storage and lookup.
#[must_use]
pub fn normalize_email(email: &str) -> String {
    email.trim().to_lowercase()
}
