//! Core business logic for MyMoney.
//!
//! This crate contains pure business logic with ZERO web or database dependencies.
//! All domain types, validation rules, and calculations live here. Persistence
//! is reached only through the owner-scoped store traits, which the database
//! crate implements.
//!
//! # Modules
//!
//! - `currency` - Brazilian real parsing and display formatting
//! - `billing` - Billing cycle validation, totals, duplication and service
//! - `category` - Debt categories and the deletion guard
//! - `auth` - Password hashing, users and credential checks
//! - `input` - Lenient reading of raw payloads and text limits

pub mod auth;
pub mod billing;
pub mod category;
pub mod currency;
pub mod input;

#[cfg(any(test, feature = "testing"))]
pub mod testing;
