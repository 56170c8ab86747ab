//! Repository implementations of the core store traits.
//!
//! Repositories provide a clean interface for database operations,
//! hiding the `SeaORM` implementation details from the rest of the application.
//! Every query that touches user data filters by the owning user.

pub mod billing_cycle;
pub mod category;
pub mod user;

pub use billing_cycle::BillingCycleRepository;
pub use category::CategoryRepository;
pub use user::UserRepository;

use sea_orm::{DbErr, SqlErr};

use mymoney_shared::AppError;

/// Maps a database error to the shared error type.
///
/// Unique violations become `AppError::Conflict`; everything else is an
/// `AppError::Database`.
pub(crate) fn db_error(err: DbErr) -> AppError {
    match err.sql_err() {
        Some(SqlErr::UniqueConstraintViolation(detail)) => AppError::Conflict(detail),
        _ => AppError::Database(err.to_string()),
    }
}

/// A stored row could not be turned back into a domain value.
pub(crate) fn corrupt<E: std::fmt::Display>(err: E) -> AppError {
    AppError::Internal(format!("stored row out of range: {err}"))
}
