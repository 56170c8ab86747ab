//! `SeaORM` entity definitions.

pub mod billing_cycle_credits;
pub mod billing_cycle_debts;
pub mod billing_cycles;
pub mod categories;
pub mod sea_orm_active_enums;
pub mod users;
