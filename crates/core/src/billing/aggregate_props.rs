//! Property-based tests for cycle totals.

use proptest::prelude::*;
use rust_decimal::Decimal;

use super::aggregate::CycleTotals;
use super::types::{BillingCycleDraft, Credit, Debt, DebtStatus};

fn amount() -> impl Strategy<Value = Decimal> {
    (1i64..100_000_000i64).prop_map(|cents| Decimal::new(cents, 2))
}

fn status() -> impl Strategy<Value = DebtStatus> {
    prop_oneof![
        Just(DebtStatus::Pago),
        Just(DebtStatus::Pendente),
        Just(DebtStatus::Agendado),
    ]
}

fn cycle() -> impl Strategy<Value = BillingCycleDraft> {
    (
        prop::collection::vec(amount(), 1..6),
        prop::collection::vec((amount(), status()), 1..6),
    )
        .prop_map(|(credits, debts)| BillingCycleDraft {
            name: "Ciclo".into(),
            month: 6,
            year: 2024,
            credits: credits
                .into_iter()
                .map(|value| Credit {
                    name: "Crédito".into(),
                    value,
                })
                .collect(),
            debts: debts
                .into_iter()
                .map(|(value, status)| Debt {
                    name: "Débito".into(),
                    value,
                    status,
                    payment_day: 1,
                    payment_date: None,
                    category: None,
                })
                .collect(),
        })
}

proptest! {
    #![proptest_config(ProptestConfig::with_cases(100))]

    /// Consolidated is always credits minus debts.
    #[test]
    fn prop_consolidated_is_difference(cycles in prop::collection::vec(cycle(), 0..5)) {
        let totals = CycleTotals::across(&cycles);
        prop_assert_eq!(totals.consolidated, totals.credits - totals.debts);
    }

    /// Pending never exceeds total debts.
    #[test]
    fn prop_pending_bounded_by_debts(cycles in prop::collection::vec(cycle(), 0..5)) {
        let totals = CycleTotals::across(&cycles);
        prop_assert!(totals.pending >= Decimal::ZERO);
        prop_assert!(totals.pending <= totals.debts);
    }

    /// Collection totals equal the sum of per-cycle totals.
    #[test]
    fn prop_collection_is_sum_of_parts(cycles in prop::collection::vec(cycle(), 0..5)) {
        let combined = CycleTotals::across(&cycles);
        let manual = cycles
            .iter()
            .map(CycleTotals::of)
            .fold(CycleTotals::default(), |acc, totals| acc + totals);
        prop_assert_eq!(combined, manual);
    }

    /// Splitting a collection does not change its totals.
    #[test]
    fn prop_split_is_additive(
        cycles in prop::collection::vec(cycle(), 0..6),
        split in 0usize..6,
    ) {
        let split = split.min(cycles.len());
        let (left, right) = cycles.split_at(split);
        prop_assert_eq!(
            CycleTotals::across(left) + CycleTotals::across(right),
            CycleTotals::across(&cycles)
        );
    }
}
