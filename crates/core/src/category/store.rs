//! Owner-scoped persistence for categories.

use async_trait::async_trait;

use mymoney_shared::AppResult;
use mymoney_shared::types::{CategoryId, UserId};

use super::types::Category;

/// Storage of categories, always filtered by owner.
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait CategoryStore: Send + Sync {
    /// Lists the owner's categories by description, ignoring case.
    async fn list(&self, owner: UserId) -> AppResult<Vec<Category>>;

    /// Finds one of the owner's categories.
    async fn find(&self, owner: UserId, id: CategoryId) -> AppResult<Option<Category>>;

    /// Finds the owner's category with exactly this description.
    async fn find_by_description(
        &self,
        owner: UserId,
        description: &str,
    ) -> AppResult<Option<Category>>;

    /// Persists a new category.
    async fn insert(&self, owner: UserId, description: &str) -> AppResult<Category>;

    /// Renames one of the owner's categories. Returns `None` if there is none.
    async fn update(
        &self,
        owner: UserId,
        id: CategoryId,
        description: &str,
    ) -> AppResult<Option<Category>>;

    /// Deletes one of the owner's categories. Returns false if there was none.
    async fn delete(&self, owner: UserId, id: CategoryId) -> AppResult<bool>;
}
