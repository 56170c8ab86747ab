//! Debt categories.
//!
//! A category is a per-user label that debts refer to by description. A
//! category cannot be deleted while any of its owner's debts still uses it.

pub mod error;
pub mod service;
pub mod store;
pub mod types;


pub use error::CategoryError;
pub use service::CategoryService;
pub use store::CategoryStore;
pub use types::{Category, CategoryInput};
