//! Property-based tests for BRL parsing and formatting.

use proptest::prelude::*;
use rust_decimal::Decimal;

use super::brl::{format_brl, parse_brl_str};

/// Strategy for non-negative amounts with at most two fractional digits,
/// from 0,00 up to 10 billion reais.
fn cents_amount() -> impl Strategy<Value = Decimal> {
    (0i64..1_000_000_000_000i64).prop_map(|cents| Decimal::new(cents, 2))
}

proptest! {
    #![proptest_config(ProptestConfig::with_cases(256))]

    /// Formatting then parsing gives back the same value.
    #[test]
    fn prop_parse_inverts_format(amount in cents_amount()) {
        let formatted = format_brl(amount);
        prop_assert_eq!(parse_brl_str(&formatted), Some(amount));
    }

    /// Output always ends with a comma and exactly two digits.
    #[test]
    fn prop_format_has_two_fraction_digits(amount in cents_amount()) {
        let formatted = format_brl(amount);
        let (integer, fraction) = formatted.rsplit_once(',').unwrap();
        prop_assert_eq!(fraction.len(), 2);
        prop_assert!(fraction.chars().all(|c| c.is_ascii_digit()));
        prop_assert!(!integer.contains(','));
    }

    /// Thousands groups between dots are exactly three digits long.
    #[test]
    fn prop_format_groups_thousands(amount in cents_amount()) {
        let formatted = format_brl(amount);
        let integer = formatted.rsplit_once(',').unwrap().0;
        let groups: Vec<&str> = integer.split('.').collect();
        prop_assert!(!groups[0].is_empty() && groups[0].len() <= 3);
        for group in &groups[1..] {
            prop_assert_eq!(group.len(), 3);
        }
    }

    /// Currency symbols and spacing around a formatted value are ignored.
    #[test]
    fn prop_currency_prefix_is_ignored(amount in cents_amount()) {
        let decorated = format!("R$ {} ", format_brl(amount));
        prop_assert_eq!(parse_brl_str(&decorated), Some(amount));
    }

    /// Negative values keep their sign through a round trip.
    #[test]
    fn prop_negative_round_trip(cents in 1i64..1_000_000_000i64) {
        let amount = Decimal::new(-cents, 2);
        let formatted = format_brl(amount);
        prop_assert!(formatted.starts_with('-'));
        prop_assert_eq!(parse_brl_str(&formatted), Some(amount));
    }
}
