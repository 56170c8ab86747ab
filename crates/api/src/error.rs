//! Mapping of domain errors to HTTP responses.
//!
//! Bodies are `{ "error": <code>, "message": <text> }`, except validation
//! failures which list every issue under `errors`.

use axum::{
    Json,
    http::StatusCode,
    response::{IntoResponse, Response},
};
use serde::Serialize;
use serde_json::json;
use tracing::error;

use mymoney_core::auth::AuthError;
use mymoney_core::billing::{BillingError, ValidationIssue};
use mymoney_core::category::CategoryError;

use crate::messages::{Locale, Message, message, validation_message};

/// One validation issue as rendered to clients.
#[derive(Debug, Serialize)]
pub struct IssueResponse {
    /// Stable issue code, e.g. `MONTH_INVALID`.
    pub code: &'static str,
    /// Field path.
    pub field: &'static str,
    /// 1-based entry position.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub position: Option<usize>,
    /// Lower bound of a range rule.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub min: Option<i64>,
    /// Upper bound of a range rule.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub max: Option<i64>,
    /// Localized text.
    pub message: String,
}

impl IssueResponse {
    fn new(issue: &ValidationIssue, locale: Locale) -> Self {
        Self {
            code: issue.kind.code(),
            field: issue.field,
            position: issue.position,
            min: issue.min,
            max: issue.max,
            message: validation_message(issue, locale),
        }
    }
}

/// Builds a `{ error, message }` response.
pub fn error_response(status: StatusCode, code: &str, text: Message, locale: Locale) -> Response {
    (
        status,
        Json(json!({
            "error": code,
            "message": message(text, locale),
        })),
    )
        .into_response()
}

/// Builds the 400 response listing every validation issue.
pub fn validation_response(issues: &[ValidationIssue], locale: Locale) -> Response {
    let errors: Vec<IssueResponse> = issues
        .iter()
        .map(|issue| IssueResponse::new(issue, locale))
        .collect();
    (
        StatusCode::BAD_REQUEST,
        Json(json!({
            "error": "validation_error",
            "errors": errors,
        })),
    )
        .into_response()
}

fn internal_error(locale: Locale) -> Response {
    error_response(
        StatusCode::INTERNAL_SERVER_ERROR,
        "internal_error",
        Message::Internal,
        locale,
    )
}

/// Maps billing errors to HTTP responses.
pub fn map_billing_error(e: &BillingError, locale: Locale) -> Response {
    match e {
        BillingError::Validation(issues) => validation_response(issues, locale),
        BillingError::NotFound => error_response(
            StatusCode::NOT_FOUND,
            "not_found",
            Message::CycleNotFound,
            locale,
        ),
        BillingError::Upstream(inner) => {
            error!(error = %inner, "Billing cycle store failure");
            internal_error(locale)
        }
    }
}

/// Maps category errors to HTTP responses.
pub fn map_category_error(e: &CategoryError, locale: Locale) -> Response {
    let (status, code, text) = match e {
        CategoryError::DescriptionRequired => (
            StatusCode::BAD_REQUEST,
            "description_required",
            Message::DescriptionRequired,
        ),
        CategoryError::DescriptionTooLong => (
            StatusCode::BAD_REQUEST,
            "description_too_long",
            Message::DescriptionTooLong,
        ),
        CategoryError::Duplicate(_) => (
            StatusCode::CONFLICT,
            "category_exists",
            Message::CategoryExists,
        ),
        CategoryError::NotFound => (
            StatusCode::NOT_FOUND,
            "not_found",
            Message::CategoryNotFound,
        ),
        CategoryError::Blocked(_) => (
            StatusCode::CONFLICT,
            "category_in_use",
            Message::CategoryInUse,
        ),
        CategoryError::Upstream(inner) => {
            error!(error = %inner, "Category store failure");
            return internal_error(locale);
        }
    };
    error_response(status, code, text, locale)
}

/// Maps registration and login errors to HTTP responses.
pub fn map_auth_error(e: &AuthError, locale: Locale) -> Response {
    let (status, code, text) = match e {
        AuthError::NameRequired => (
            StatusCode::BAD_REQUEST,
            "name_required",
            Message::NameRequired,
        ),
        AuthError::NameTooLong => (
            StatusCode::BAD_REQUEST,
            "name_too_long",
            Message::NameTooLong,
        ),
        AuthError::EmailRequired => (
            StatusCode::BAD_REQUEST,
            "email_required",
            Message::EmailRequired,
        ),
        AuthError::EmailTooLong => (
            StatusCode::BAD_REQUEST,
            "email_too_long",
            Message::EmailTooLong,
        ),
        AuthError::PasswordTooShort => (
            StatusCode::BAD_REQUEST,
            "password_too_short",
            Message::PasswordTooShort,
        ),
        AuthError::EmailTaken => (StatusCode::CONFLICT, "email_taken", Message::EmailTaken),
        AuthError::InvalidCredentials => (
            StatusCode::UNAUTHORIZED,
            "invalid_credentials",
            Message::InvalidCredentials,
        ),
        AuthError::Password(_) | AuthError::Upstream(_) => {
            error!(error = %e, "Authentication failure");
            return internal_error(locale);
        }
    };
    error_response(status, code, text, locale)
}
