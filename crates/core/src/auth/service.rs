//! Registration and login rules.

use serde::Deserialize;
use thiserror::Error;

use mymoney_shared::AppError;

use super::password::{PasswordError, hash_password, verify_password};
use super::{NewUser, User, UserStore, normalize_email};
use crate::input::{MAX_TEXT_LEN, exceeds_text_len, lenient};

/// Shortest accepted password, in characters.
pub const MIN_PASSWORD_LEN: usize = 6;

/// Errors returned by registration and login.
#[derive(Debug, Error)]
pub enum AuthError {
    /// Name is missing or blank.
    #[error("Name is required")]
    NameRequired,

    /// Name is longer than [`MAX_TEXT_LEN`] characters.
    #[error("Name must have at most {MAX_TEXT_LEN} characters")]
    NameTooLong,

    /// E-mail is missing or blank.
    #[error("E-mail is required")]
    EmailRequired,

    /// E-mail is longer than [`MAX_TEXT_LEN`] characters.
    #[error("E-mail must have at most {MAX_TEXT_LEN} characters")]
    EmailTooLong,

    /// Password is shorter than [`MIN_PASSWORD_LEN`].
    #[error("Password must have at least {MIN_PASSWORD_LEN} characters")]
    PasswordTooShort,

    /// Another user already registered this e-mail.
    #[error("E-mail already registered")]
    EmailTaken,

    /// Unknown e-mail or wrong password. The two are not told apart.
    #[error("Invalid credentials")]
    InvalidCredentials,

    /// Hashing failed.
    #[error(transparent)]
    Password(#[from] PasswordError),

    /// The store failed.
    #[error("Upstream failure: {0}")]
    Upstream(AppError),
}

impl From<AppError> for AuthError {
    fn from(err: AppError) -> Self {
        match err {
            AppError::Conflict(_) => Self::EmailTaken,
            other => Self::Upstream(other),
        }
    }
}

impl AuthError {
    /// Returns the error code for API responses.
    #[must_use]
    pub const fn error_code(&self) -> &'static str {
        match self {
            Self::NameRequired => "NAME_REQUIRED",
            Self::NameTooLong => "NAME_TOO_LONG",
            Self::EmailRequired => "EMAIL_REQUIRED",
            Self::EmailTooLong => "EMAIL_TOO_LONG",
            Self::PasswordTooShort => "PASSWORD_TOO_SHORT",
            Self::EmailTaken => "EMAIL_TAKEN",
            Self::InvalidCredentials => "INVALID_CREDENTIALS",
            Self::Password(_) | Self::Upstream(_) => "INTERNAL_ERROR",
        }
    }

    /// Returns the HTTP status code for this error.
    #[must_use]
    pub const fn http_status_code(&self) -> u16 {
        match self {
            Self::NameRequired
            | Self::NameTooLong
            | Self::EmailRequired
            | Self::EmailTooLong
            | Self::PasswordTooShort => 400,
            Self::InvalidCredentials => 401,
            Self::EmailTaken => 409,
            Self::Password(_) | Self::Upstream(_) => 500,
        }
    }
}

/// Registration request.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct RegisterInput {
    /// Display name.
    #[serde(default, deserialize_with = "lenient")]
    pub name: Option<String>,
    /// E-mail.
    #[serde(default, deserialize_with = "lenient")]
    pub email: Option<String>,
    /// Plaintext password.
    #[serde(default, deserialize_with = "lenient")]
    pub password: Option<String>,
}

/// Login request.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct LoginInput {
    /// E-mail.
    #[serde(default, deserialize_with = "lenient")]
    pub email: Option<String>,
    /// Plaintext password.
    #[serde(default, deserialize_with = "lenient")]
    pub password: Option<String>,
}

/// Registration and login over a user store.
pub struct AuthService<'a> {
    users: &'a dyn UserStore,
}

impl<'a> AuthService<'a> {
    /// Creates a service over the given store.
    #[must_use]
    pub fn new(users: &'a dyn UserStore) -> Self {
        Self { users }
    }

    /// Registers a new user.
    ///
    /// # Errors
    ///
    /// Returns a validation variant for a blank or overlong name or e-mail
    /// or a short password, and `AuthError::EmailTaken` if the e-mail is in use.
    pub async fn register(&self, input: &RegisterInput) -> Result<User, AuthError> {
        let name = input
            .name
            .as_deref()
            .map(str::trim)
            .filter(|name| !name.is_empty())
            .ok_or(AuthError::NameRequired)?;
        if exceeds_text_len(name) {
            return Err(AuthError::NameTooLong);
        }
        let email = input
            .email
            .as_deref()
            .map(normalize_email)
            .filter(|email| !email.is_empty())
            .ok_or(AuthError::EmailRequired)?;
        if exceeds_text_len(&email) {
            return Err(AuthError::EmailTooLong);
        }
        let password = input
            .password
            .as_deref()
            .filter(|password| password.chars().count() >= MIN_PASSWORD_LEN)
            .ok_or(AuthError::PasswordTooShort)?;

        if self.users.find_by_email(&email).await?.is_some() {
            return Err(AuthError::EmailTaken);
        }

        let user = NewUser {
            name: name.to_string(),
            email,
            password_hash: hash_password(password)?,
        };
        Ok(self.users.insert(user).await?)
    }

    /// Checks a login attempt.
    ///
    /// # Errors
    ///
    /// Returns `AuthError::InvalidCredentials` for an unknown e-mail or a
    /// wrong password.
    pub async fn authenticate(&self, input: &LoginInput) -> Result<User, AuthError> {
        let email = normalize_email(input.email.as_deref().unwrap_or_default());
        let password = input.password.as_deref().unwrap_or_default();

        let Some(user) = self.users.find_by_email(&email).await? else {
            return Err(AuthError::InvalidCredentials);
        };

        match verify_password(password, &user.password_hash) {
            Ok(true) => Ok(user),
            Ok(false) | Err(PasswordError::InvalidHash) => Err(AuthError::InvalidCredentials),
            Err(err) => Err(err.into()),
        }
    }
}
