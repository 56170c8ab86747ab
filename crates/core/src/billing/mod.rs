//! Billing cycles: validation, totals, duplication and the service tying
//! them to an owner-scoped store.

pub mod aggregate;
pub mod duplicate;
pub mod error;
pub mod service;
pub mod store;
pub mod types;
pub mod validation;

#[cfg(test)]
mod aggregate_props;
#[cfg(test)]
mod validation_props;

pub use aggregate::{CycleTotals, CycleWithTotals};
pub use duplicate::{COPY_SUFFIX, PLACEHOLDER_VALUE, duplicate};
pub use error::{BillingError, ValidationErrorKind, ValidationIssue};
pub use service::BillingCycleService;
pub use store::BillingCycleStore;
pub use types::{
    BillingCycle, BillingCycleDraft, BillingCycleInput, Credit, CreditInput, CycleEntries, Debt,
    DebtInput, DebtStatus, RawInteger,
};
pub use validation::{AMOUNT_CEILING, normalize, validate};
