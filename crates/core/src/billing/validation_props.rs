//! Property-based tests for billing cycle validation.

use proptest::prelude::*;
use rust_decimal::Decimal;

use super::error::ValidationErrorKind;
use super::types::{BillingCycleInput, CreditInput, DebtInput, RawInteger};
use super::validation::{AMOUNT_CEILING, AMOUNT_SCALE, normalize, validate};
use crate::currency::{RawAmount, format_brl};

fn amount() -> impl Strategy<Value = Decimal> {
    (1i64..1_000_000_000i64).prop_map(|cents| Decimal::new(cents, 2))
}

fn status() -> impl Strategy<Value = &'static str> {
    prop_oneof![Just("PAGO"), Just("pendente"), Just("Agendado")]
}

fn debt() -> impl Strategy<Value = DebtInput> {
    ("[A-Za-z]{1,12}", amount(), status(), 1i64..=31).prop_map(|(name, value, status, day)| {
        DebtInput {
            name: Some(name),
            value: Some(RawAmount::from(format_brl(value))),
            status: Some(status.to_string()),
            payment_day: Some(RawInteger::from(day)),
            payment_date: Some(format!("2024-01-{day:02}")),
            category: None,
        }
    })
}

fn valid_input() -> impl Strategy<Value = BillingCycleInput> {
    (
        "[A-Za-z ]{0,8}[A-Za-z]",
        1i64..=12,
        1970i64..=2100,
        prop::collection::vec(("[A-Za-z]{1,12}", amount()), 1..5),
        prop::collection::vec(debt(), 1..5),
    )
        .prop_map(|(name, month, year, credits, debts)| BillingCycleInput {
            name: Some(name),
            month: Some(RawInteger::from(month)),
            year: Some(RawInteger::from(year)),
            credits: Some(
                credits
                    .into_iter()
                    .map(|(name, value)| CreditInput {
                        name: Some(name),
                        value: Some(RawAmount::from(format_brl(value))),
                    })
                    .collect(),
            ),
            debts: Some(debts),
        })
}

proptest! {
    #![proptest_config(ProptestConfig::with_cases(100))]

    /// Well-formed submissions produce no issues and keep every entry.
    #[test]
    fn prop_valid_input_is_accepted(input in valid_input()) {
        let draft = normalize(&input);
        prop_assert!(draft.is_ok(), "unexpected issues: {:?}", draft.as_ref().err());
        let draft = draft.unwrap();
        prop_assert_eq!(draft.credits.len(), input.credits.as_ref().map_or(0, Vec::len));
        prop_assert_eq!(draft.debts.len(), input.debts.as_ref().map_or(0, Vec::len));
    }

    /// A month outside 1..=12 is always reported, whatever else is present.
    #[test]
    fn prop_month_out_of_range_is_rejected(
        input in valid_input(),
        month in prop_oneof![-1000i64..1, 13i64..1000],
    ) {
        let mut input = input;
        input.month = Some(RawInteger::from(month));
        let issues = validate(&input);
        prop_assert_eq!(issues.len(), 1);
        prop_assert_eq!(issues[0].kind, ValidationErrorKind::MonthInvalid);
    }

    /// Each blank credit name is reported at its own position.
    #[test]
    fn prop_blank_credit_names_are_reported_per_entry(
        input in valid_input(),
        blanks in prop::collection::vec(any::<bool>(), 1..5),
    ) {
        let mut input = input;
        let credits = input.credits.as_mut().unwrap();
        let mut expected = Vec::new();
        for (index, credit) in credits.iter_mut().enumerate() {
            if blanks.get(index).copied().unwrap_or(false) {
                credit.name = Some("  ".into());
                expected.push(index + 1);
            }
        }

        let positions: Vec<usize> = validate(&input)
            .iter()
            .filter(|issue| issue.kind == ValidationErrorKind::CreditNameRequired)
            .filter_map(|issue| issue.position)
            .collect();
        prop_assert_eq!(positions, expected);
    }

    /// Arbitrary text never makes the validator panic.
    #[test]
    fn prop_validate_never_panics(
        name in proptest::option::of(".*"),
        value in ".*",
        status in ".*",
        date in ".*",
    ) {
        let input = BillingCycleInput {
            name,
            month: Some(RawInteger::Text(value.clone())),
            year: None,
            credits: Some(vec![CreditInput { name: None, value: Some(RawAmount::from(value.as_str())) }]),
            debts: Some(vec![DebtInput {
                name: Some(value.clone()),
                value: Some(RawAmount::from(value)),
                status: Some(status),
                payment_day: None,
                payment_date: Some(date),
                category: None,
            }]),
        };
        let _ = validate(&input);
    }

    /// An accepted amount always fits the stored column.
    #[test]
    fn prop_accepted_amounts_fit_storage(
        input in valid_input(),
        mantissa in 1i64..i64::MAX,
        scale in 0u32..8,
    ) {
        let mut input = input;
        if let Some(credits) = input.credits.as_mut() {
            credits[0].value = Some(RawAmount::from(Decimal::new(mantissa, scale)));
        }

        match normalize(&input) {
            Ok(draft) => {
                let value = draft.credits[0].value;
                prop_assert!(value > Decimal::ZERO);
                prop_assert!(value < AMOUNT_CEILING);
                prop_assert!(value.scale() <= AMOUNT_SCALE);
            }
            Err(issues) => {
                prop_assert_eq!(issues.len(), 1);
                prop_assert!(matches!(
                    issues[0].kind,
                    ValidationErrorKind::CreditValueInvalid | ValidationErrorKind::CreditValueTooLarge
                ));
            }
        }
    }
}
