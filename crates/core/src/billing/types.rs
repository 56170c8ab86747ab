//! Billing cycle data types.

use std::str::FromStr;

use chrono::{DateTime, Utc};
use rust_decimal::Decimal;
use rust_decimal::prelude::ToPrimitive;
use serde::{Deserialize, Serialize};

use crate::currency::RawAmount;
use crate::input::{lenient, lenient_entries};
use mymoney_shared::types::{BillingCycleId, UserId};

/// Settlement state of a debt.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "UPPERCASE")]
pub enum DebtStatus {
    /// Already paid.
    Pago,
    /// Not paid yet.
    Pendente,
    /// Payment scheduled; the payment date may still be unknown.
    Agendado,
}

impl DebtStatus {
    /// Returns the wire representation.
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Pago => "PAGO",
            Self::Pendente => "PENDENTE",
            Self::Agendado => "AGENDADO",
        }
    }

    /// Returns true if a debt in this state must carry a payment date.
    #[must_use]
    pub const fn requires_payment_date(self) -> bool {
        !matches!(self, Self::Agendado)
    }
}

impl std::fmt::Display for DebtStatus {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for DebtStatus {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_uppercase().as_str() {
            "PAGO" => Ok(Self::Pago),
            "PENDENTE" => Ok(Self::Pendente),
            "AGENDADO" => Ok(Self::Agendado),
            _ => Err(format!("Unknown debt status: {s}")),
        }
    }
}

/// A named inflow within a cycle.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Credit {
    /// Credit name.
    pub name: String,
    /// Amount in reais.
    pub value: Decimal,
}

/// A named obligation within a cycle.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Debt {
    /// Debt name.
    pub name: String,
    /// Amount in reais.
    pub value: Decimal,
    /// Settlement state.
    pub status: DebtStatus,
    /// Day of the month the debt is due (1-31).
    pub payment_day: u32,
    /// When it was or will be paid. Absent only for scheduled debts.
    pub payment_date: Option<DateTime<Utc>>,
    /// Description of the category this debt is filed under.
    pub category: Option<String>,
}

/// Access to the entries of anything shaped like a billing cycle.
pub trait CycleEntries {
    /// Credits in submission order.
    fn credits(&self) -> &[Credit];
    /// Debts in submission order.
    fn debts(&self) -> &[Debt];
}

/// A validated, normalized cycle that has not been persisted.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct BillingCycleDraft {
    /// Display label.
    pub name: String,
    /// Month (1-12).
    pub month: u32,
    /// Year (1970-2100).
    pub year: i32,
    /// Credits in order.
    pub credits: Vec<Credit>,
    /// Debts in order.
    pub debts: Vec<Debt>,
}

impl CycleEntries for BillingCycleDraft {
    fn credits(&self) -> &[Credit] {
        &self.credits
    }

    fn debts(&self) -> &[Debt] {
        &self.debts
    }
}

/// A persisted billing cycle.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct BillingCycle {
    /// Cycle ID.
    pub id: BillingCycleId,
    /// Owning user. Never changes after creation.
    pub owner: UserId,
    /// Display label.
    pub name: String,
    /// Month (1-12).
    pub month: u32,
    /// Year (1970-2100).
    pub year: i32,
    /// Credits in order.
    pub credits: Vec<Credit>,
    /// Debts in order.
    pub debts: Vec<Debt>,
    /// Creation timestamp.
    pub created_at: DateTime<Utc>,
    /// Last update timestamp.
    pub updated_at: DateTime<Utc>,
}

impl BillingCycle {
    /// Builds a persisted cycle from a draft.
    #[must_use]
    pub fn from_draft(
        id: BillingCycleId,
        owner: UserId,
        draft: BillingCycleDraft,
        created_at: DateTime<Utc>,
        updated_at: DateTime<Utc>,
    ) -> Self {
        Self {
            id,
            owner,
            name: draft.name,
            month: draft.month,
            year: draft.year,
            credits: draft.credits,
            debts: draft.debts,
            created_at,
            updated_at,
        }
    }
}

impl CycleEntries for BillingCycle {
    fn credits(&self) -> &[Credit] {
        &self.credits
    }

    fn debts(&self) -> &[Debt] {
        &self.debts
    }
}

/// An integer field as submitted: a JSON number or a numeric string.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum RawInteger {
    /// JSON number.
    Number(serde_json::Number),
    /// Text such as `"12"`.
    Text(String),
}

impl RawInteger {
    /// Returns the value if it is a whole number.
    ///
    /// Whole-valued fractions such as `12.0` are accepted; `12.5` is not.
    #[must_use]
    pub fn as_integer(&self) -> Option<i64> {
        match self {
            Self::Number(number) => number
                .as_i64()
                .or_else(|| whole_number(&number.to_string())),
            Self::Text(text) => whole_number(text.trim()),
        }
    }
}

fn whole_number(text: &str) -> Option<i64> {
    text.parse().ok().or_else(|| {
        Decimal::from_str(text)
            .ok()
            .filter(Decimal::is_integer)
            .and_then(|value| value.to_i64())
    })
}

impl From<i64> for RawInteger {
    fn from(value: i64) -> Self {
        Self::Number(value.into())
    }
}

/// Raw billing cycle submission.
///
/// Every field is optional and read leniently, so that a malformed payload
/// still reaches the validator and produces a complete list of issues.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct BillingCycleInput {
    /// Display label.
    #[serde(default, deserialize_with = "lenient")]
    pub name: Option<String>,
    /// Month.
    #[serde(default, deserialize_with = "lenient")]
    pub month: Option<RawInteger>,
    /// Year.
    #[serde(default, deserialize_with = "lenient")]
    pub year: Option<RawInteger>,
    /// Credits.
    #[serde(default, deserialize_with = "lenient_entries")]
    pub credits: Option<Vec<CreditInput>>,
    /// Debts.
    #[serde(default, deserialize_with = "lenient_entries")]
    pub debts: Option<Vec<DebtInput>>,
}

/// Raw credit entry.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CreditInput {
    /// Credit name.
    #[serde(default, deserialize_with = "lenient")]
    pub name: Option<String>,
    /// Amount, usually a `pt-BR` string.
    #[serde(default, deserialize_with = "lenient")]
    pub value: Option<RawAmount>,
}

/// Raw debt entry.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct DebtInput {
    /// Debt name.
    #[serde(default, deserialize_with = "lenient")]
    pub name: Option<String>,
    /// Amount, usually a `pt-BR` string.
    #[serde(default, deserialize_with = "lenient")]
    pub value: Option<RawAmount>,
    /// Status text (`PAGO`, `PENDENTE`, `AGENDADO`, any case).
    #[serde(default, deserialize_with = "lenient")]
    pub status: Option<String>,
    /// Due day of the month.
    #[serde(default, alias = "paymentday", deserialize_with = "lenient")]
    pub payment_day: Option<RawInteger>,
    /// ISO-8601 date or date-time.
    #[serde(default, deserialize_with = "lenient")]
    pub payment_date: Option<String>,
    /// Category description.
    #[serde(default, deserialize_with = "lenient")]
    pub category: Option<String>,
}
