//! Billing cycle error types.
//!
//! Validation problems are reported as a list of [`ValidationIssue`] values:
//! a stable kind plus the field, position and limits involved. Turning an
//! issue into user-facing text is left to the presentation layer.

use serde::Serialize;
use thiserror::Error;

use mymoney_shared::AppError;

/// Kind of rule a billing cycle submission violated.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum ValidationErrorKind {
    /// Cycle name is missing or blank.
    NameRequired,
    /// Cycle name is longer than the stored column allows.
    NameTooLong,
    /// Month is missing, not an integer, or out of range.
    MonthInvalid,
    /// Year is missing, not an integer, or out of range.
    YearInvalid,
    /// No credits were submitted.
    CreditsRequired,
    /// A credit has no name.
    CreditNameRequired,
    /// A credit has a name longer than the stored column allows.
    CreditNameTooLong,
    /// A credit value is not a positive number.
    CreditValueInvalid,
    /// A credit value does not fit the stored precision.
    CreditValueTooLarge,
    /// No debts were submitted.
    DebtsRequired,
    /// A debt has no name.
    DebtNameRequired,
    /// A debt has a name longer than the stored column allows.
    DebtNameTooLong,
    /// A debt value is not a positive number.
    DebtValueInvalid,
    /// A debt value does not fit the stored precision.
    DebtValueTooLarge,
    /// A debt payment day is missing or out of range.
    PaymentDayInvalid,
    /// A debt has no status.
    StatusRequired,
    /// A debt status is not one of the known values.
    StatusUnknown,
    /// A debt that is not scheduled has no payment date.
    PaymentDateRequired,
    /// A debt payment date is not a valid calendar date.
    PaymentDateInvalid,
    /// A debt category description is too long.
    CategoryTooLong,
}

impl ValidationErrorKind {
    /// Returns the error code for API responses.
    #[must_use]
    pub const fn code(self) -> &'static str {
        match self {
            Self::NameRequired => "NAME_REQUIRED",
            Self::NameTooLong => "NAME_TOO_LONG",
            Self::MonthInvalid => "MONTH_INVALID",
            Self::YearInvalid => "YEAR_INVALID",
            Self::CreditsRequired => "CREDITS_REQUIRED",
            Self::CreditNameRequired => "CREDIT_NAME_REQUIRED",
            Self::CreditNameTooLong => "CREDIT_NAME_TOO_LONG",
            Self::CreditValueInvalid => "CREDIT_VALUE_INVALID",
            Self::CreditValueTooLarge => "CREDIT_VALUE_TOO_LARGE",
            Self::DebtsRequired => "DEBTS_REQUIRED",
            Self::DebtNameRequired => "DEBT_NAME_REQUIRED",
            Self::DebtNameTooLong => "DEBT_NAME_TOO_LONG",
            Self::DebtValueInvalid => "DEBT_VALUE_INVALID",
            Self::DebtValueTooLarge => "DEBT_VALUE_TOO_LARGE",
            Self::PaymentDayInvalid => "PAYMENT_DAY_INVALID",
            Self::StatusRequired => "STATUS_REQUIRED",
            Self::StatusUnknown => "STATUS_UNKNOWN",
            Self::PaymentDateRequired => "PAYMENT_DATE_REQUIRED",
            Self::PaymentDateInvalid => "PAYMENT_DATE_INVALID",
            Self::CategoryTooLong => "CATEGORY_TOO_LONG",
        }
    }
}

/// One violated rule with its context.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ValidationIssue {
    /// Which rule was violated.
    pub kind: ValidationErrorKind,
    /// Field path, e.g. `month` or `debts.paymentDay`.
    pub field: &'static str,
    /// 1-based entry position for `credits`/`debts` fields.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub position: Option<usize>,
    /// Lower bound for range rules.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub min: Option<i64>,
    /// Upper bound for range rules.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub max: Option<i64>,
}

impl ValidationIssue {
    /// Creates an issue on a top-level field.
    #[must_use]
    pub const fn new(kind: ValidationErrorKind, field: &'static str) -> Self {
        Self {
            kind,
            field,
            position: None,
            min: None,
            max: None,
        }
    }

    /// Creates an issue on the entry at `position` (1-based).
    #[must_use]
    pub const fn at(kind: ValidationErrorKind, field: &'static str, position: usize) -> Self {
        Self {
            kind,
            field,
            position: Some(position),
            min: None,
            max: None,
        }
    }

    /// Attaches the accepted range.
    #[must_use]
    pub const fn with_limits(mut self, min: i64, max: i64) -> Self {
        self.min = Some(min);
        self.max = Some(max);
        self
    }
}

impl std::fmt::Display for ValidationIssue {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}: {}", self.field, self.kind.code())?;
        if let Some(position) = self.position {
            write!(f, " at position {position}")?;
        }
        if let (Some(min), Some(max)) = (self.min, self.max) {
            write!(f, " (expected {min}..={max})")?;
        }
        Ok(())
    }
}

/// Errors returned by billing cycle operations.
#[derive(Debug, Error)]
pub enum BillingError {
    /// The submission broke one or more rules. Nothing was persisted.
    #[error("Billing cycle is invalid ({} issue(s))", .0.len())]
    Validation(Vec<ValidationIssue>),

    /// The cycle does not exist or belongs to another user.
    #[error("Billing cycle not found")]
    NotFound,

    /// The store failed.
    #[error("Upstream failure: {0}")]
    Upstream(#[from] AppError),
}

impl BillingError {
    /// Returns the error code for API responses.
    #[must_use]
    pub const fn error_code(&self) -> &'static str {
        match self {
            Self::Validation(_) => "VALIDATION_ERROR",
            Self::NotFound => "NOT_FOUND",
            Self::Upstream(_) => "INTERNAL_ERROR",
        }
    }

    /// Returns the HTTP status code for this error.
    #[must_use]
    pub const fn http_status_code(&self) -> u16 {
        match self {
            Self::Validation(_) => 400,
            Self::NotFound => 404,
            Self::Upstream(_) => 500,
        }
    }
}
