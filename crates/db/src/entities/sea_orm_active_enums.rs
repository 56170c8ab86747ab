//! `SeaORM` active enums mirroring the Postgres enum types.

use sea_orm::entity::prelude::*;
use serde::{Deserialize, Serialize};

use mymoney_core::billing::DebtStatus as CoreDebtStatus;

/// Postgres `debt_status` enum.
#[derive(Debug, Clone, Copy, PartialEq, Eq, EnumIter, DeriveActiveEnum, Serialize, Deserialize)]
#[sea_orm(rs_type = "String", db_type = "Enum", enum_name = "debt_status")]
pub enum DebtStatus {
    #[sea_orm(string_value = "PAGO")]
    Pago,
    #[sea_orm(string_value = "PENDENTE")]
    Pendente,
    #[sea_orm(string_value = "AGENDADO")]
    Agendado,
}

impl From<CoreDebtStatus> for DebtStatus {
    fn from(status: CoreDebtStatus) -> Self {
        match status {
            CoreDebtStatus::Pago => Self::Pago,
            CoreDebtStatus::Pendente => Self::Pendente,
            CoreDebtStatus::Agendado => Self::Agendado,
        }
    }
}

impl From<DebtStatus> for CoreDebtStatus {
    fn from(status: DebtStatus) -> Self {
        match status {
            DebtStatus::Pago => Self::Pago,
            DebtStatus::Pendente => Self::Pendente,
            DebtStatus::Agendado => Self::Agendado,
        }
    }
}
