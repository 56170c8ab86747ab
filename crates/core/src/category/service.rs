//! Category operations and the deletion guard.

use mymoney_shared::types::{CategoryId, UserId};

use super::error::CategoryError;
use super::store::CategoryStore;
use super::types::{Category, CategoryInput};
use crate::billing::BillingCycleStore;
use crate::input::exceeds_text_len;

/// Category service.
///
/// Needs the billing cycle store as well, to refuse deleting a category that
/// a debt still refers to.
pub struct CategoryService<'a> {
    categories: &'a dyn CategoryStore,
    cycles: &'a dyn BillingCycleStore,
}

impl<'a> CategoryService<'a> {
    /// Creates a service over the given stores.
    #[must_use]
    pub fn new(categories: &'a dyn CategoryStore, cycles: &'a dyn BillingCycleStore) -> Self {
        Self { categories, cycles }
    }

    /// Lists the owner's categories.
    ///
    /// # Errors
    ///
    /// Returns `CategoryError::Upstream` if the store fails.
    pub async fn list(&self, owner: UserId) -> Result<Vec<Category>, CategoryError> {
        Ok(self.categories.list(owner).await?)
    }

    /// Creates a category.
    ///
    /// # Errors
    ///
    /// Returns `CategoryError::DescriptionRequired` for a blank description,
    /// `CategoryError::DescriptionTooLong` for one that does not fit and
    /// `CategoryError::Duplicate` if the owner already has it.
    pub async fn create(
        &self,
        owner: UserId,
        input: &CategoryInput,
    ) -> Result<Category, CategoryError> {
        let description = checked_description(input)?;

        if self
            .categories
            .find_by_description(owner, description)
            .await?
            .is_some()
        {
            return Err(CategoryError::Duplicate(description.to_string()));
        }

        Ok(self.categories.insert(owner, description).await?)
    }

    /// Renames a category.
    ///
    /// Debts keep the description they were saved with.
    ///
    /// # Errors
    ///
    /// Returns `CategoryError::NotFound` if the owner has no such category,
    /// `CategoryError::DescriptionRequired` for a blank description and
    /// `CategoryError::Duplicate` if another of the owner's categories
    /// already uses it.
    pub async fn update(
        &self,
        owner: UserId,
        id: CategoryId,
        input: &CategoryInput,
    ) -> Result<Category, CategoryError> {
        if self.categories.find(owner, id).await?.is_none() {
            return Err(CategoryError::NotFound);
        }

        let description = checked_description(input)?;

        if let Some(existing) = self
            .categories
            .find_by_description(owner, description)
            .await?
            && existing.id != id
        {
            return Err(CategoryError::Duplicate(description.to_string()));
        }

        self.categories
            .update(owner, id, description)
            .await?
            .ok_or(CategoryError::NotFound)
    }

    /// Deletes a category unless a debt still refers to it.
    ///
    /// # Errors
    ///
    /// Returns `CategoryError::NotFound` if the owner has no such category
    /// and `CategoryError::Blocked` while any debt in the owner's cycles is
    /// filed under it.
    pub async fn delete(&self, owner: UserId, id: CategoryId) -> Result<(), CategoryError> {
        let category = self
            .categories
            .find(owner, id)
            .await?
            .ok_or(CategoryError::NotFound)?;

        if self
            .cycles
            .any_debt_in_category(owner, &category.description)
            .await?
        {
            return Err(CategoryError::Blocked(category.description));
        }

        if self.categories.delete(owner, id).await? {
            Ok(())
        } else {
            Err(CategoryError::NotFound)
        }
    }
}

fn checked_description(input: &CategoryInput) -> Result<&str, CategoryError> {
    let description = input
        .normalized_description()
        .ok_or(CategoryError::DescriptionRequired)?;
    if exceeds_text_len(description) {
        return Err(CategoryError::DescriptionTooLong);
    }
    Ok(description)
}
