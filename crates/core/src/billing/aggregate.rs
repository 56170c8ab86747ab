//! Totals over billing cycles.

use std::iter::Sum;
use std::ops::Add;

use rust_decimal::Decimal;
use serde::Serialize;

use super::types::{BillingCycle, CycleEntries, DebtStatus};

/// Aggregated amounts of one or more cycles.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize)]
pub struct CycleTotals {
    /// Sum of all credit values.
    pub credits: Decimal,
    /// Sum of all debt values.
    pub debts: Decimal,
    /// Credits minus debts. May be negative.
    pub consolidated: Decimal,
    /// Sum of the values of debts still pending.
    pub pending: Decimal,
}

impl CycleTotals {
    /// Computes the totals of a single cycle.
    #[must_use]
    pub fn of(cycle: &impl CycleEntries) -> Self {
        let credits: Decimal = cycle.credits().iter().map(|credit| credit.value).sum();
        let debts: Decimal = cycle.debts().iter().map(|debt| debt.value).sum();
        let pending: Decimal = cycle
            .debts()
            .iter()
            .filter(|debt| debt.status == DebtStatus::Pendente)
            .map(|debt| debt.value)
            .sum();

        Self {
            credits,
            debts,
            consolidated: credits - debts,
            pending,
        }
    }

    /// Computes the combined totals of a collection of cycles.
    ///
    /// An empty collection yields all zeros.
    pub fn across<'a, C>(cycles: impl IntoIterator<Item = &'a C>) -> Self
    where
        C: CycleEntries + 'a,
    {
        cycles.into_iter().map(Self::of).sum()
    }
}

impl Add for CycleTotals {
    type Output = Self;

    fn add(self, rhs: Self) -> Self {
        Self {
            credits: self.credits + rhs.credits,
            debts: self.debts + rhs.debts,
            consolidated: self.consolidated + rhs.consolidated,
            pending: self.pending + rhs.pending,
        }
    }
}

impl Sum for CycleTotals {
    fn sum<I: Iterator<Item = Self>>(iter: I) -> Self {
        iter.fold(Self::default(), Add::add)
    }
}

/// A cycle together with its own totals.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CycleWithTotals {
    /// The cycle.
    pub cycle: BillingCycle,
    /// Totals of this cycle alone.
    pub totals: CycleTotals,
}

impl From<BillingCycle> for CycleWithTotals {
    fn from(cycle: BillingCycle) -> Self {
        let totals = CycleTotals::of(&cycle);
        Self { cycle, totals }
    }
}
