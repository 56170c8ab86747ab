//! User repository for database operations.

use async_trait::async_trait;
use chrono::Utc;
use sea_orm::{ActiveModelTrait, ColumnTrait, DatabaseConnection, EntityTrait, QueryFilter, Set};

use mymoney_core::auth::{NewUser, User, UserStore};
use mymoney_shared::AppResult;
use mymoney_shared::types::UserId;

use super::db_error;
use crate::entities::users;

/// User repository for CRUD operations.
#[derive(Debug, Clone)]
pub struct UserRepository {
    db: DatabaseConnection,
}

impl UserRepository {
    /// Creates a new user repository.
    #[must_use]
    pub const fn new(db: DatabaseConnection) -> Self {
        Self { db }
    }
}

#[async_trait]
impl UserStore for UserRepository {
    async fn find_by_email(&self, email: &str) -> AppResult<Option<User>> {
        let row = users::Entity::find()
            .filter(users::Column::Email.eq(email))
            .one(&self.db)
            .await
            .map_err(db_error)?;
        Ok(row.map(to_domain))
    }

    async fn insert(&self, user: NewUser) -> AppResult<User> {
        let now = Utc::now().into();
        let row = users::ActiveModel {
            id: Set(UserId::new().into_inner()),
            name: Set(user.name),
            email: Set(user.email),
            password_hash: Set(user.password_hash),
            created_at: Set(now),
            updated_at: Set(now),
        }
        .insert(&self.db)
        .await
        .map_err(db_error)?;
        Ok(to_domain(row))
    }
}

fn to_domain(row: users::Model) -> User {
    User {
        id: UserId::from_uuid(row.id),
        name: row.name,
        email: row.email,
        password_hash: row.password_hash,
        created_at: row.created_at.with_timezone(&Utc),
    }
}
