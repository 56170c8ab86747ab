//! Response bodies.
//!
//! Amounts are rendered as `pt-BR` strings through [`Brl`]; keys are
//! camelCase like the request payloads.

use chrono::{DateTime, Utc};
use serde::Serialize;

use mymoney_core::auth::User;
use mymoney_core::billing::{BillingCycle, Credit, CycleTotals, CycleWithTotals, Debt, DebtStatus};
use mymoney_core::category::Category;
use mymoney_core::currency::Brl;
use mymoney_shared::types::{BillingCycleId, CategoryId, UserId};

/// A credit entry.
#[derive(Debug, Serialize)]
pub struct CreditResponse {
    /// Credit name.
    pub name: String,
    /// Formatted amount.
    pub value: Brl,
}

impl From<&Credit> for CreditResponse {
    fn from(credit: &Credit) -> Self {
        Self {
            name: credit.name.clone(),
            value: Brl(credit.value),
        }
    }
}

/// A debt entry.
#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct DebtResponse {
    /// Debt name.
    pub name: String,
    /// Formatted amount.
    pub value: Brl,
    /// Settlement state.
    pub status: DebtStatus,
    /// Due day of the month.
    pub payment_day: u32,
    /// Payment date, absent for scheduled debts without one.
    pub payment_date: Option<DateTime<Utc>>,
    /// Category description.
    pub category: Option<String>,
}

impl From<&Debt> for DebtResponse {
    fn from(debt: &Debt) -> Self {
        Self {
            name: debt.name.clone(),
            value: Brl(debt.value),
            status: debt.status,
            payment_day: debt.payment_day,
            payment_date: debt.payment_date,
            category: debt.category.clone(),
        }
    }
}

/// Formatted totals.
#[derive(Debug, Serialize)]
pub struct TotalsResponse {
    /// Sum of credits.
    pub credit: Brl,
    /// Sum of debts.
    pub debt: Brl,
    /// Credits minus debts.
    pub consol: Brl,
    /// Sum of pending debts.
    pub pending: Brl,
}

impl From<CycleTotals> for TotalsResponse {
    fn from(totals: CycleTotals) -> Self {
        Self {
            credit: Brl(totals.credits),
            debt: Brl(totals.debts),
            consol: Brl(totals.consolidated),
            pending: Brl(totals.pending),
        }
    }
}

/// A billing cycle with its totals.
#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct BillingCycleResponse {
    /// Cycle ID.
    pub id: BillingCycleId,
    /// Display label.
    pub name: String,
    /// Month.
    pub month: u32,
    /// Year.
    pub year: i32,
    /// Credits in order.
    pub credits: Vec<CreditResponse>,
    /// Debts in order.
    pub debts: Vec<DebtResponse>,
    /// Totals of this cycle.
    pub totals: TotalsResponse,
    /// Creation timestamp.
    pub created_at: DateTime<Utc>,
    /// Last update timestamp.
    pub updated_at: DateTime<Utc>,
}

impl From<CycleWithTotals> for BillingCycleResponse {
    fn from(CycleWithTotals { cycle, totals }: CycleWithTotals) -> Self {
        Self {
            id: cycle.id,
            credits: cycle.credits.iter().map(CreditResponse::from).collect(),
            debts: cycle.debts.iter().map(DebtResponse::from).collect(),
            name: cycle.name,
            month: cycle.month,
            year: cycle.year,
            totals: totals.into(),
            created_at: cycle.created_at,
            updated_at: cycle.updated_at,
        }
    }
}

impl From<BillingCycle> for BillingCycleResponse {
    fn from(cycle: BillingCycle) -> Self {
        CycleWithTotals::from(cycle).into()
    }
}

/// Number of cycles.
#[derive(Debug, Serialize)]
pub struct CountResponse {
    /// Cycle count.
    pub value: u64,
}

/// A category.
#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct CategoryResponse {
    /// Category ID.
    pub id: CategoryId,
    /// Label.
    pub description: String,
    /// Creation timestamp.
    pub created_at: DateTime<Utc>,
    /// Last update timestamp.
    pub updated_at: DateTime<Utc>,
}

impl From<Category> for CategoryResponse {
    fn from(category: Category) -> Self {
        Self {
            id: category.id,
            description: category.description,
            created_at: category.created_at,
            updated_at: category.updated_at,
        }
    }
}

/// Token issued after register or login.
#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct AuthResponse {
    /// Bearer token.
    pub token: String,
    /// Token lifetime in seconds.
    pub expires_in: i64,
    /// User ID.
    pub user_id: UserId,
    /// Display name.
    pub name: String,
    /// E-mail.
    pub email: String,
}

impl AuthResponse {
    /// Builds the response for a user and their new token.
    #[must_use]
    pub fn new(user: User, token: String, expires_in: i64) -> Self {
        Self {
            token,
            expires_in,
            user_id: user.id,
            name: user.name,
            email: user.email,
        }
    }
}

/// Result of a token check.
#[derive(Debug, Serialize)]
pub struct TokenValidityResponse {
    /// Whether the token is valid and unexpired.
    pub valid: bool,
}

#[cfg(test)]
mod tests {
    use super::*;
    use rust_decimal_macros::dec;

    #[test]
    fn test_totals_are_formatted() {
        let totals = CycleTotals {
            credits: dec!(17251.5),
            debts: dec!(7199.7),
            consolidated: dec!(10051.8),
            pending: dec!(0),
        };
        let json = serde_json::to_value(TotalsResponse::from(totals)).unwrap();
        assert_eq!(
            json,
            serde_json::json!({
                "credit": "17.251,50",
                "debt": "7.199,70",
                "consol": "10.051,80",
                "pending": "0,00",
            })
        );
    }

    #[test]
    fn test_debt_keys_are_camel_case() {
        let debt = Debt {
            name: "Luz".into(),
            value: dec!(120.4),
            status: DebtStatus::Agendado,
            payment_day: 10,
            payment_date: None,
            category: None,
        };
        let json = serde_json::to_value(DebtResponse::from(&debt)).unwrap();
        assert_eq!(json["value"], "120,40");
        assert_eq!(json["status"], "AGENDADO");
        assert_eq!(json["paymentDay"], 10);
        assert!(json["paymentDate"].is_null());
    }
}
