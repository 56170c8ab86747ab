//! Billing cycle repository.
//!
//! A cycle is one header row plus ordered credit and debt rows. Writes that
//! touch several rows run in one database transaction.

use std::collections::HashMap;

use async_trait::async_trait;
use chrono::Utc;
use sea_orm::{
    ActiveModelTrait, ColumnTrait, ConnectionTrait, DatabaseConnection, EntityTrait,
    PaginatorTrait, QueryFilter, QueryOrder, QuerySelect, RelationTrait, Set, TransactionTrait,
    sea_query::JoinType,
};
use tracing::debug;
use uuid::Uuid;

use mymoney_core::billing::{BillingCycle, BillingCycleDraft, BillingCycleStore, Credit, Debt};
use mymoney_shared::AppResult;
use mymoney_shared::types::{BillingCycleId, UserId};

use super::{corrupt, db_error};
use crate::entities::{billing_cycle_credits, billing_cycle_debts, billing_cycles};

/// Billing cycle repository backed by Postgres.
#[derive(Debug, Clone)]
pub struct BillingCycleRepository {
    db: DatabaseConnection,
}

impl BillingCycleRepository {
    /// Creates a new billing cycle repository.
    #[must_use]
    pub const fn new(db: DatabaseConnection) -> Self {
        Self { db }
    }

    /// Loads the entries of the given headers and assembles domain cycles,
    /// keeping the header order.
    async fn assemble(
        &self,
        headers: Vec<billing_cycles::Model>,
    ) -> AppResult<Vec<BillingCycle>> {
        if headers.is_empty() {
            return Ok(Vec::new());
        }
        let ids: Vec<Uuid> = headers.iter().map(|header| header.id).collect();

        let mut credits: HashMap<Uuid, Vec<billing_cycle_credits::Model>> = HashMap::new();
        for row in billing_cycle_credits::Entity::find()
            .filter(billing_cycle_credits::Column::BillingCycleId.is_in(ids.clone()))
            .order_by_asc(billing_cycle_credits::Column::Position)
            .all(&self.db)
            .await
            .map_err(db_error)?
        {
            credits.entry(row.billing_cycle_id).or_default().push(row);
        }

        let mut debts: HashMap<Uuid, Vec<billing_cycle_debts::Model>> = HashMap::new();
        for row in billing_cycle_debts::Entity::find()
            .filter(billing_cycle_debts::Column::BillingCycleId.is_in(ids))
            .order_by_asc(billing_cycle_debts::Column::Position)
            .all(&self.db)
            .await
            .map_err(db_error)?
        {
            debts.entry(row.billing_cycle_id).or_default().push(row);
        }

        headers
            .into_iter()
            .map(|header| {
                let cycle_credits = credits.remove(&header.id).unwrap_or_default();
                let cycle_debts = debts.remove(&header.id).unwrap_or_default();
                to_domain(header, cycle_credits, cycle_debts)
            })
            .collect()
    }
}

#[async_trait]
impl BillingCycleStore for BillingCycleRepository {
    async fn list(&self, owner: UserId) -> AppResult<Vec<BillingCycle>> {
        let headers = billing_cycles::Entity::find()
            .filter(billing_cycles::Column::UserId.eq(owner.into_inner()))
            .order_by_desc(billing_cycles::Column::Year)
            .order_by_desc(billing_cycles::Column::Month)
            .all(&self.db)
            .await
            .map_err(db_error)?;
        self.assemble(headers).await
    }

    async fn find(&self, owner: UserId, id: BillingCycleId) -> AppResult<Option<BillingCycle>> {
        let Some(header) = billing_cycles::Entity::find_by_id(id.into_inner())
            .filter(billing_cycles::Column::UserId.eq(owner.into_inner()))
            .one(&self.db)
            .await
            .map_err(db_error)?
        else {
            return Ok(None);
        };
        Ok(self.assemble(vec![header]).await?.pop())
    }

    async fn insert(&self, owner: UserId, draft: BillingCycleDraft) -> AppResult<BillingCycle> {
        let id = BillingCycleId::new();
        let now = Utc::now();

        let txn = self.db.begin().await.map_err(db_error)?;

        billing_cycles::ActiveModel {
            id: Set(id.into_inner()),
            user_id: Set(owner.into_inner()),
            name: Set(draft.name.clone()),
            month: Set(to_i32(draft.month)?),
            year: Set(draft.year),
            created_at: Set(now.into()),
            updated_at: Set(now.into()),
        }
        .insert(&txn)
        .await
        .map_err(db_error)?;

        insert_entries(&txn, id.into_inner(), &draft).await?;
        txn.commit().await.map_err(db_error)?;

        debug!(user_id = %owner, cycle_id = %id, "billing cycle inserted");
        Ok(BillingCycle::from_draft(id, owner, draft, now, now))
    }

    async fn replace(
        &self,
        owner: UserId,
        id: BillingCycleId,
        draft: BillingCycleDraft,
    ) -> AppResult<Option<BillingCycle>> {
        let txn = self.db.begin().await.map_err(db_error)?;

        let Some(header) = billing_cycles::Entity::find_by_id(id.into_inner())
            .filter(billing_cycles::Column::UserId.eq(owner.into_inner()))
            .one(&txn)
            .await
            .map_err(db_error)?
        else {
            return Ok(None);
        };

        let created_at = header.created_at.with_timezone(&Utc);
        let now = Utc::now();

        let mut active: billing_cycles::ActiveModel = header.into();
        active.name = Set(draft.name.clone());
        active.month = Set(to_i32(draft.month)?);
        active.year = Set(draft.year);
        active.updated_at = Set(now.into());
        active.update(&txn).await.map_err(db_error)?;

        billing_cycle_credits::Entity::delete_many()
            .filter(billing_cycle_credits::Column::BillingCycleId.eq(id.into_inner()))
            .exec(&txn)
            .await
            .map_err(db_error)?;
        billing_cycle_debts::Entity::delete_many()
            .filter(billing_cycle_debts::Column::BillingCycleId.eq(id.into_inner()))
            .exec(&txn)
            .await
            .map_err(db_error)?;

        insert_entries(&txn, id.into_inner(), &draft).await?;
        txn.commit().await.map_err(db_error)?;

        debug!(user_id = %owner, cycle_id = %id, "billing cycle replaced");
        Ok(Some(BillingCycle::from_draft(id, owner, draft, created_at, now)))
    }

    async fn delete(&self, owner: UserId, id: BillingCycleId) -> AppResult<bool> {
        let result = billing_cycles::Entity::delete_many()
            .filter(billing_cycles::Column::Id.eq(id.into_inner()))
            .filter(billing_cycles::Column::UserId.eq(owner.into_inner()))
            .exec(&self.db)
            .await
            .map_err(db_error)?;
        Ok(result.rows_affected > 0)
    }

    async fn count(&self, owner: UserId) -> AppResult<u64> {
        billing_cycles::Entity::find()
            .filter(billing_cycles::Column::UserId.eq(owner.into_inner()))
            .count(&self.db)
            .await
            .map_err(db_error)
    }

    async fn any_debt_in_category(&self, owner: UserId, category: &str) -> AppResult<bool> {
        let found = billing_cycle_debts::Entity::find()
            .join(
                JoinType::InnerJoin,
                billing_cycle_debts::Relation::BillingCycles.def(),
            )
            .filter(billing_cycles::Column::UserId.eq(owner.into_inner()))
            .filter(billing_cycle_debts::Column::Category.eq(category))
            .one(&self.db)
            .await
            .map_err(db_error)?;
        Ok(found.is_some())
    }
}

/// Inserts credit and debt rows in draft order.
async fn insert_entries<C: ConnectionTrait>(
    conn: &C,
    cycle_id: Uuid,
    draft: &BillingCycleDraft,
) -> AppResult<()> {
    let credits = draft
        .credits
        .iter()
        .enumerate()
        .map(|(position, credit)| {
            Ok(billing_cycle_credits::ActiveModel {
                id: Set(Uuid::now_v7()),
                billing_cycle_id: Set(cycle_id),
                position: Set(to_i32(position)?),
                name: Set(credit.name.clone()),
                value: Set(credit.value),
            })
        })
        .collect::<AppResult<Vec<_>>>()?;

    let debts = draft
        .debts
        .iter()
        .enumerate()
        .map(|(position, debt)| {
            Ok(billing_cycle_debts::ActiveModel {
                id: Set(Uuid::now_v7()),
                billing_cycle_id: Set(cycle_id),
                position: Set(to_i32(position)?),
                name: Set(debt.name.clone()),
                value: Set(debt.value),
                status: Set(debt.status.into()),
                payment_day: Set(to_i32(debt.payment_day)?),
                payment_date: Set(debt.payment_date.map(Into::into)),
                category: Set(debt.category.clone()),
            })
        })
        .collect::<AppResult<Vec<_>>>()?;

    if !credits.is_empty() {
        billing_cycle_credits::Entity::insert_many(credits)
            .exec_without_returning(conn)
            .await
            .map_err(db_error)?;
    }
    if !debts.is_empty() {
        billing_cycle_debts::Entity::insert_many(debts)
            .exec_without_returning(conn)
            .await
            .map_err(db_error)?;
    }
    Ok(())
}

fn to_domain(
    header: billing_cycles::Model,
    credits: Vec<billing_cycle_credits::Model>,
    debts: Vec<billing_cycle_debts::Model>,
) -> AppResult<BillingCycle> {
    let debts = debts
        .into_iter()
        .map(|row| {
            Ok(Debt {
                name: row.name,
                value: row.value,
                status: row.status.into(),
                payment_day: u32::try_from(row.payment_day).map_err(corrupt)?,
                payment_date: row.payment_date.map(|date| date.with_timezone(&Utc)),
                category: row.category,
            })
        })
        .collect::<AppResult<Vec<_>>>()?;

    Ok(BillingCycle {
        id: BillingCycleId::from_uuid(header.id),
        owner: UserId::from_uuid(header.user_id),
        name: header.name,
        month: u32::try_from(header.month).map_err(corrupt)?,
        year: header.year,
        credits: credits
            .into_iter()
            .map(|row| Credit {
                name: row.name,
                value: row.value,
            })
            .collect(),
        debts,
        created_at: header.created_at.with_timezone(&Utc),
        updated_at: header.updated_at.with_timezone(&Utc),
    })
}

fn to_i32<T>(value: T) -> AppResult<i32>
where
    i32: TryFrom<T>,
    <i32 as TryFrom<T>>::Error: std::fmt::Display,
{
    i32::try_from(value).map_err(corrupt)
}
