//! Category error types.

use thiserror::Error;

use mymoney_shared::AppError;

/// Errors returned by category operations.
#[derive(Debug, Error)]
pub enum CategoryError {
    /// Description is missing or blank.
    #[error("Category description is required")]
    DescriptionRequired,

    /// Description is longer than the stored column allows.
    #[error("Category description is too long")]
    DescriptionTooLong,

    /// The owner already has a category with this description.
    #[error("Category already exists: {0}")]
    Duplicate(String),

    /// The category does not exist or belongs to another user.
    #[error("Category not found")]
    NotFound,

    /// A debt still refers to the category.
    #[error("Category is used by a billing cycle: {0}")]
    Blocked(String),

    /// The store failed.
    #[error("Upstream failure: {0}")]
    Upstream(#[from] AppError),
}

impl CategoryError {
    /// Returns the error code for API responses.
    #[must_use]
    pub const fn error_code(&self) -> &'static str {
        match self {
            Self::DescriptionRequired => "DESCRIPTION_REQUIRED",
            Self::DescriptionTooLong => "DESCRIPTION_TOO_LONG",
            Self::Duplicate(_) => "CATEGORY_EXISTS",
            Self::NotFound => "NOT_FOUND",
            Self::Blocked(_) => "CATEGORY_IN_USE",
            Self::Upstream(_) => "INTERNAL_ERROR",
        }
    }

    /// Returns the HTTP status code for this error.
    #[must_use]
    pub const fn http_status_code(&self) -> u16 {
        match self {
            Self::DescriptionRequired | Self::DescriptionTooLong => 400,
            Self::NotFound => 404,
            Self::Duplicate(_) | Self::Blocked(_) => 409,
            Self::Upstream(_) => 500,
        }
    }
}
