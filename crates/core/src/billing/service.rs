//! Billing cycle operations on top of an owner-scoped store.

use chrono::{DateTime, Utc};

use mymoney_shared::types::{BillingCycleId, UserId};

use super::aggregate::{CycleTotals, CycleWithTotals};
use super::duplicate::duplicate;
use super::error::BillingError;
use super::store::BillingCycleStore;
use super::types::{BillingCycle, BillingCycleInput};
use super::validation::normalize;

/// Billing cycle service.
///
/// Every operation takes the authenticated owner and passes it to the store,
/// which only ever sees and returns that owner's cycles.
pub struct BillingCycleService<'a> {
    store: &'a dyn BillingCycleStore,
}

impl<'a> BillingCycleService<'a> {
    /// Creates a service over the given store.
    #[must_use]
    pub fn new(store: &'a dyn BillingCycleStore) -> Self {
        Self { store }
    }

    /// Lists the owner's cycles with their totals, newest period first.
    ///
    /// # Errors
    ///
    /// Returns `BillingError::Upstream` if the store fails.
    pub async fn list(&self, owner: UserId) -> Result<Vec<CycleWithTotals>, BillingError> {
        let cycles = self.store.list(owner).await?;
        Ok(cycles.into_iter().map(CycleWithTotals::from).collect())
    }

    /// Returns one cycle with its totals.
    ///
    /// # Errors
    ///
    /// Returns `BillingError::NotFound` if the owner has no such cycle.
    pub async fn get(
        &self,
        owner: UserId,
        id: BillingCycleId,
    ) -> Result<CycleWithTotals, BillingError> {
        self.store
            .find(owner, id)
            .await?
            .map(CycleWithTotals::from)
            .ok_or(BillingError::NotFound)
    }

    /// Counts the owner's cycles.
    ///
    /// # Errors
    ///
    /// Returns `BillingError::Upstream` if the store fails.
    pub async fn count(&self, owner: UserId) -> Result<u64, BillingError> {
        Ok(self.store.count(owner).await?)
    }

    /// Totals across all of the owner's cycles.
    ///
    /// # Errors
    ///
    /// Returns `BillingError::Upstream` if the store fails.
    pub async fn summary(&self, owner: UserId) -> Result<CycleTotals, BillingError> {
        let cycles = self.store.list(owner).await?;
        Ok(CycleTotals::across(&cycles))
    }

    /// Validates a submission and persists it as a new cycle.
    ///
    /// # Errors
    ///
    /// Returns `BillingError::Validation` with every violated rule, in which
    /// case nothing is written.
    pub async fn create(
        &self,
        owner: UserId,
        input: &BillingCycleInput,
    ) -> Result<BillingCycle, BillingError> {
        let draft = normalize(input).map_err(BillingError::Validation)?;
        Ok(self.store.insert(owner, draft).await?)
    }

    /// Replaces an existing cycle with a new submission.
    ///
    /// Ownership is resolved before the payload is looked at, so a caller
    /// learns nothing about cycles it does not own.
    ///
    /// # Errors
    ///
    /// Returns `BillingError::NotFound` if the owner has no such cycle and
    /// `BillingError::Validation` if the submission is invalid.
    pub async fn update(
        &self,
        owner: UserId,
        id: BillingCycleId,
        input: &BillingCycleInput,
    ) -> Result<BillingCycle, BillingError> {
        if self.store.find(owner, id).await?.is_none() {
            return Err(BillingError::NotFound);
        }

        let draft = normalize(input).map_err(BillingError::Validation)?;
        self.store
            .replace(owner, id, draft)
            .await?
            .ok_or(BillingError::NotFound)
    }

    /// Deletes one of the owner's cycles.
    ///
    /// # Errors
    ///
    /// Returns `BillingError::NotFound` if the owner has no such cycle.
    pub async fn delete(&self, owner: UserId, id: BillingCycleId) -> Result<(), BillingError> {
        if self.store.delete(owner, id).await? {
            Ok(())
        } else {
            Err(BillingError::NotFound)
        }
    }

    /// Persists a next-period template of one of the owner's cycles.
    ///
    /// # Errors
    ///
    /// Returns `BillingError::NotFound` if the owner has no such cycle.
    pub async fn duplicate(
        &self,
        owner: UserId,
        id: BillingCycleId,
        now: DateTime<Utc>,
    ) -> Result<BillingCycle, BillingError> {
        let source = self
            .store
            .find(owner, id)
            .await?
            .ok_or(BillingError::NotFound)?;
        Ok(self.store.insert(owner, duplicate(&source, now)).await?)
    }
}
