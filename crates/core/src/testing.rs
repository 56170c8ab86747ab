//! In-memory store implementations.
//!
//! Used by the unit tests in this crate and, through the `testing` feature,
//! by the HTTP tests of the API crate. Every lookup is filtered by owner the
//! same way the database repositories are.

use async_trait::async_trait;
use chrono::Utc;
use tokio::sync::RwLock;

use mymoney_shared::types::{BillingCycleId, CategoryId, UserId};
use mymoney_shared::{AppError, AppResult};

use crate::auth::{NewUser, User, UserStore};
use crate::billing::{BillingCycle, BillingCycleDraft, BillingCycleStore};
use crate::category::{Category, CategoryStore};

/// One store holding users, billing cycles and categories.
#[derive(Debug, Default)]
pub struct InMemoryStore {
    users: RwLock<Vec<User>>,
    cycles: RwLock<Vec<BillingCycle>>,
    categories: RwLock<Vec<Category>>,
}

impl InMemoryStore {
    /// Creates an empty store.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }
}

#[async_trait]
impl BillingCycleStore for InMemoryStore {
    async fn list(&self, owner: UserId) -> AppResult<Vec<BillingCycle>> {
        let mut cycles: Vec<BillingCycle> = self
            .cycles
            .read()
            .await
            .iter()
            .filter(|cycle| cycle.owner == owner)
            .cloned()
            .collect();
        cycles.sort_by(|a, b| b.year.cmp(&a.year).then(b.month.cmp(&a.month)));
        Ok(cycles)
    }

    async fn find(&self, owner: UserId, id: BillingCycleId) -> AppResult<Option<BillingCycle>> {
        Ok(self
            .cycles
            .read()
            .await
            .iter()
            .find(|cycle| cycle.owner == owner && cycle.id == id)
            .cloned())
    }

    async fn insert(&self, owner: UserId, draft: BillingCycleDraft) -> AppResult<BillingCycle> {
        let now = Utc::now();
        let cycle = BillingCycle::from_draft(BillingCycleId::new(), owner, draft, now, now);
        self.cycles.write().await.push(cycle.clone());
        Ok(cycle)
    }

    async fn replace(
        &self,
        owner: UserId,
        id: BillingCycleId,
        draft: BillingCycleDraft,
    ) -> AppResult<Option<BillingCycle>> {
        let mut cycles = self.cycles.write().await;
        let Some(slot) = cycles
            .iter_mut()
            .find(|cycle| cycle.owner == owner && cycle.id == id)
        else {
            return Ok(None);
        };
        *slot = BillingCycle::from_draft(id, owner, draft, slot.created_at, Utc::now());
        Ok(Some(slot.clone()))
    }

    async fn delete(&self, owner: UserId, id: BillingCycleId) -> AppResult<bool> {
        let mut cycles = self.cycles.write().await;
        let before = cycles.len();
        cycles.retain(|cycle| !(cycle.owner == owner && cycle.id == id));
        Ok(cycles.len() < before)
    }

    async fn count(&self, owner: UserId) -> AppResult<u64> {
        let count = self
            .cycles
            .read()
            .await
            .iter()
            .filter(|cycle| cycle.owner == owner)
            .count();
        u64::try_from(count).map_err(|e| AppError::Internal(e.to_string()))
    }

    async fn any_debt_in_category(&self, owner: UserId, category: &str) -> AppResult<bool> {
        Ok(self.cycles.read().await.iter().any(|cycle| {
            cycle.owner == owner
                && cycle
                    .debts
                    .iter()
                    .any(|debt| debt.category.as_deref() == Some(category))
        }))
    }
}

#[async_trait]
impl CategoryStore for InMemoryStore {
    async fn list(&self, owner: UserId) -> AppResult<Vec<Category>> {
        let mut categories: Vec<Category> = self
            .categories
            .read()
            .await
            .iter()
            .filter(|category| category.owner == owner)
            .cloned()
            .collect();
        categories.sort_by_key(|category| category.description.to_lowercase());
        Ok(categories)
    }

    async fn find(&self, owner: UserId, id: CategoryId) -> AppResult<Option<Category>> {
        Ok(self
            .categories
            .read()
            .await
            .iter()
            .find(|category| category.owner == owner && category.id == id)
            .cloned())
    }

    async fn find_by_description(
        &self,
        owner: UserId,
        description: &str,
    ) -> AppResult<Option<Category>> {
        Ok(self
            .categories
            .read()
            .await
            .iter()
            .find(|category| category.owner == owner && category.description == description)
            .cloned())
    }

    async fn insert(&self, owner: UserId, description: &str) -> AppResult<Category> {
        let now = Utc::now();
        let category = Category {
            id: CategoryId::new(),
            owner,
            description: description.to_string(),
            created_at: now,
            updated_at: now,
        };
        self.categories.write().await.push(category.clone());
        Ok(category)
    }

    async fn update(
        &self,
        owner: UserId,
        id: CategoryId,
        description: &str,
    ) -> AppResult<Option<Category>> {
        let mut categories = self.categories.write().await;
        let Some(slot) = categories
            .iter_mut()
            .find(|category| category.owner == owner && category.id == id)
        else {
            return Ok(None);
        };
        description.clone_into(&mut slot.description);
        slot.updated_at = Utc::now();
        Ok(Some(slot.clone()))
    }

    async fn delete(&self, owner: UserId, id: CategoryId) -> AppResult<bool> {
        let mut categories = self.categories.write().await;
        let before = categories.len();
        categories.retain(|category| !(category.owner == owner && category.id == id));
        Ok(categories.len() < before)
    }
}

#[async_trait]
impl UserStore for InMemoryStore {
    async fn find_by_email(&self, email: &str) -> AppResult<Option<User>> {
        Ok(self
            .users
            .read()
            .await
            .iter()
            .find(|user| user.email == email)
            .cloned())
    }

    async fn insert(&self, user: NewUser) -> AppResult<User> {
        let mut users = self.users.write().await;
        if users.iter().any(|existing| existing.email == user.email) {
            return Err(AppError::Conflict(format!("email {} already registered", user.email)));
        }
        let user = User {
            id: UserId::new(),
            name: user.name,
            email: user.email,
            password_hash: user.password_hash,
            created_at: Utc::now(),
        };
        users.push(user.clone());
        Ok(user)
    }
}
