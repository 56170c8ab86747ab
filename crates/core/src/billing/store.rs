//! Owner-scoped persistence for billing cycles.

use async_trait::async_trait;

use mymoney_shared::AppResult;
use mymoney_shared::types::{BillingCycleId, UserId};

use super::types::{BillingCycle, BillingCycleDraft};

/// Storage of billing cycles, always filtered by owner.
///
/// Implementations never return or touch a cycle that belongs to a user
/// other than `owner`. A cycle owned by someone else is indistinguishable
/// from one that does not exist.
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait BillingCycleStore: Send + Sync {
    /// Lists the owner's cycles, newest period first (year desc, month desc).
    async fn list(&self, owner: UserId) -> AppResult<Vec<BillingCycle>>;

    /// Finds one of the owner's cycles.
    async fn find(&self, owner: UserId, id: BillingCycleId) -> AppResult<Option<BillingCycle>>;

    /// Persists a new cycle for the owner.
    async fn insert(&self, owner: UserId, draft: BillingCycleDraft) -> AppResult<BillingCycle>;

    /// Replaces header and entries of one of the owner's cycles.
    ///
    /// Returns `None` if the owner has no such cycle.
    async fn replace(
        &self,
        owner: UserId,
        id: BillingCycleId,
        draft: BillingCycleDraft,
    ) -> AppResult<Option<BillingCycle>>;

    /// Deletes one of the owner's cycles. Returns false if there was none.
    async fn delete(&self, owner: UserId, id: BillingCycleId) -> AppResult<bool>;

    /// Counts the owner's cycles.
    async fn count(&self, owner: UserId) -> AppResult<u64>;

    /// Returns true if any debt in any of the owner's cycles is filed under
    /// `category`.
    async fn any_debt_in_category(&self, owner: UserId, category: &str) -> AppResult<bool>;
}
