//! Next-period templates derived from an existing cycle.

use chrono::{DateTime, Utc};
use rust_decimal::Decimal;

use super::types::{BillingCycle, BillingCycleDraft, Credit, Debt, DebtStatus};

/// Appended to the name of a duplicated cycle.
pub const COPY_SUFFIX: &str = " (cópia)";

/// Value given to every copied entry (R$ 0,01).
pub const PLACEHOLDER_VALUE: Decimal = Decimal::from_parts(1, 0, 0, false, 2);

/// Builds a draft that reuses the structure of `source`.
///
/// Entry names, order, payment days and categories are kept. Every value is
/// reset to [`PLACEHOLDER_VALUE`] and every debt becomes pending with `now`
/// as its payment date. `source` is left untouched.
#[must_use]
pub fn duplicate(source: &BillingCycle, now: DateTime<Utc>) -> BillingCycleDraft {
    BillingCycleDraft {
        name: format!("{}{COPY_SUFFIX}", source.name),
        month: source.month,
        year: source.year,
        credits: source
            .credits
            .iter()
            .map(|credit| Credit {
                name: credit.name.clone(),
                value: PLACEHOLDER_VALUE,
            })
            .collect(),
        debts: source
            .debts
            .iter()
            .map(|debt| Debt {
                name: debt.name.clone(),
                value: PLACEHOLDER_VALUE,
                status: DebtStatus::Pendente,
                payment_day: debt.payment_day,
                payment_date: Some(now),
                category: debt.category.clone(),
            })
            .collect(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::TimeZone;
    use mymoney_shared::types::{BillingCycleId, UserId};
    use rust_decimal_macros::dec;

    fn source() -> BillingCycle {
        let created = Utc.with_ymd_and_hms(2024, 4, 1, 12, 0, 0).unwrap();
        BillingCycle {
            id: BillingCycleId::new(),
            owner: UserId::new(),
            name: "Abril".into(),
            month: 4,
            year: 2024,
            credits: vec![Credit {
                name: "Salário".into(),
                value: dec!(3000),
            }],
            debts: vec![Debt {
                name: "Aluguel".into(),
                value: dec!(500),
                status: DebtStatus::Pago,
                payment_day: 10,
                payment_date: Some(created),
                category: Some("Moradia".into()),
            }],
            created_at: created,
            updated_at: created,
        }
    }

    #[test]
    fn test_placeholder_is_one_cent() {
        assert_eq!(PLACEHOLDER_VALUE, dec!(0.01));
    }

    #[test]
    fn test_paid_debt_becomes_pending_placeholder() {
        let original = source();
        let snapshot = original.clone();
        let now = Utc.with_ymd_and_hms(2024, 5, 2, 8, 30, 0).unwrap();

        let copy = duplicate(&original, now);

        assert_eq!(copy.name, "Abril (cópia)");
        assert_eq!(copy.month, 4);
        assert_eq!(copy.year, 2024);
        assert_eq!(copy.credits[0].name, "Salário");
        assert_eq!(copy.credits[0].value, PLACEHOLDER_VALUE);

        let debt = &copy.debts[0];
        assert_eq!(debt.name, "Aluguel");
        assert_eq!(debt.value, PLACEHOLDER_VALUE);
        assert_eq!(debt.status, DebtStatus::Pendente);
        assert_eq!(debt.payment_day, 10);
        assert_eq!(debt.payment_date, Some(now));
        assert_eq!(debt.category.as_deref(), Some("Moradia"));

        assert_eq!(original, snapshot);
    }

    #[test]
    fn test_entry_order_is_preserved() {
        let mut original = source();
        original.credits.push(Credit {
            name: "Freela".into(),
            value: dec!(200),
        });

        let copy = duplicate(&original, Utc::now());

        let names: Vec<&str> = copy.credits.iter().map(|c| c.name.as_str()).collect();
        assert_eq!(names, ["Salário", "Freela"]);
    }
}
