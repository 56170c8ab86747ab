//! Category repository.

use async_trait::async_trait;
use chrono::Utc;
use sea_orm::{
    ActiveModelTrait, ColumnTrait, DatabaseConnection, EntityTrait, QueryFilter, QueryOrder, Set,
    sea_query::{Expr, Func, SimpleExpr},
};

use mymoney_core::category::{Category, CategoryStore};
use mymoney_shared::AppResult;
use mymoney_shared::types::{CategoryId, UserId};

use super::db_error;
use crate::entities::categories;

/// Category repository backed by Postgres.
#[derive(Debug, Clone)]
pub struct CategoryRepository {
    db: DatabaseConnection,
}

impl CategoryRepository {
    /// Creates a new category repository.
    #[must_use]
    pub const fn new(db: DatabaseConnection) -> Self {
        Self { db }
    }

    async fn find_model(
        &self,
        owner: UserId,
        id: CategoryId,
    ) -> AppResult<Option<categories::Model>> {
        categories::Entity::find_by_id(id.into_inner())
            .filter(categories::Column::UserId.eq(owner.into_inner()))
            .one(&self.db)
            .await
            .map_err(db_error)
    }
}

#[async_trait]
impl CategoryStore for CategoryRepository {
    async fn list(&self, owner: UserId) -> AppResult<Vec<Category>> {
        let rows = categories::Entity::find()
            .filter(categories::Column::UserId.eq(owner.into_inner()))
            .order_by_asc(SimpleExpr::from(Func::lower(Expr::col(
                categories::Column::Description,
            ))))
            .all(&self.db)
            .await
            .map_err(db_error)?;
        Ok(rows.into_iter().map(to_domain).collect())
    }

    async fn find(&self, owner: UserId, id: CategoryId) -> AppResult<Option<Category>> {
        Ok(self.find_model(owner, id).await?.map(to_domain))
    }

    async fn find_by_description(
        &self,
        owner: UserId,
        description: &str,
    ) -> AppResult<Option<Category>> {
        let row = categories::Entity::find()
            .filter(categories::Column::UserId.eq(owner.into_inner()))
            .filter(categories::Column::Description.eq(description))
            .one(&self.db)
            .await
            .map_err(db_error)?;
        Ok(row.map(to_domain))
    }

    async fn insert(&self, owner: UserId, description: &str) -> AppResult<Category> {
        let now = Utc::now().into();
        let row = categories::ActiveModel {
            id: Set(CategoryId::new().into_inner()),
            user_id: Set(owner.into_inner()),
            description: Set(description.to_string()),
            created_at: Set(now),
            updated_at: Set(now),
        }
        .insert(&self.db)
        .await
        .map_err(db_error)?;
        Ok(to_domain(row))
    }

    async fn update(
        &self,
        owner: UserId,
        id: CategoryId,
        description: &str,
    ) -> AppResult<Option<Category>> {
        let Some(row) = self.find_model(owner, id).await? else {
            return Ok(None);
        };
        let mut active: categories::ActiveModel = row.into();
        active.description = Set(description.to_string());
        active.updated_at = Set(Utc::now().into());
        let row = active.update(&self.db).await.map_err(db_error)?;
        Ok(Some(to_domain(row)))
    }

    async fn delete(&self, owner: UserId, id: CategoryId) -> AppResult<bool> {
        let result = categories::Entity::delete_many()
            .filter(categories::Column::Id.eq(id.into_inner()))
            .filter(categories::Column::UserId.eq(owner.into_inner()))
            .exec(&self.db)
            .await
            .map_err(db_error)?;
        Ok(result.rows_affected > 0)
    }
}

fn to_domain(row: categories::Model) -> Category {
    Category {
        id: CategoryId::from_uuid(row.id),
        owner: UserId::from_uuid(row.user_id),
        description: row.description,
        created_at: row.created_at.with_timezone(&Utc),
        updated_at: row.updated_at.with_timezone(&Utc),
    }
}
