//! `SeaORM` Entity for billing_cycle_debts table.

use sea_orm::entity::prelude::*;
use serde::{Deserialize, Serialize};

use super::sea_orm_active_enums::DebtStatus;

#[derive(Clone, Debug, PartialEq, DeriveEntityModel, Eq, Serialize, Deserialize)]
#[sea_orm(table_name = "billing_cycle_debts")]
pub struct Model {
    #[sea_orm(primary_key, auto_increment = false)]
    pub id: Uuid,
    pub billing_cycle_id: Uuid,
    pub position: i32,
    pub name: String,
    #[sea_orm(column_type = "Decimal(Some((14, 2)))")]
    pub value: Decimal,
    pub status: DebtStatus,
    pub payment_day: i32,
    pub payment_date: Option<DateTimeWithTimeZone>,
    pub category: Option<String>,
}

#[derive(Copy, Clone, Debug, EnumIter, DeriveRelation)]
pub enum Relation {
    #[sea_orm(
        belongs_to = "super::billing_cycles::Entity",
        from = "Column::BillingCycleId",
        to = "super::billing_cycles::Column::Id",
        on_delete = "Cascade"
    )]
    BillingCycles,
}

impl Related<super::billing_cycles::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::BillingCycles.def()
    }
}

impl ActiveModelBehavior for ActiveModel {}
