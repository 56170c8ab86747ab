//! Billing cycle validation and normalization.
//!
//! A single pass checks every rule and collects every violation, so a client
//! sees all problems at once. When nothing is wrong the same pass yields the
//! normalized draft, which is the only thing the store ever receives.

use std::ops::RangeInclusive;

use chrono::{DateTime, NaiveDate, NaiveDateTime, Utc};
use rust_decimal::{Decimal, RoundingStrategy};

use super::error::{ValidationErrorKind as Kind, ValidationIssue};
use super::types::{
    BillingCycleDraft, BillingCycleInput, Credit, CreditInput, Debt, DebtInput, DebtStatus,
    RawInteger,
};
use crate::currency::{RawAmount, parse_brl};
use crate::input::{MAX_TEXT_LEN, exceeds_text_len};

/// Accepted months.
pub const MONTH_RANGE: RangeInclusive<i64> = 1..=12;
/// Accepted years.
pub const YEAR_RANGE: RangeInclusive<i64> = 1970..=2100;
/// Accepted payment days.
pub const PAYMENT_DAY_RANGE: RangeInclusive<i64> = 1..=31;

/// Smallest amount that no longer fits `NUMERIC(14, 2)`: 10^12.
pub const AMOUNT_CEILING: Decimal = Decimal::from_parts(3_567_587_328, 232, 0, false, 0);

/// Fractional digits kept on amounts.
pub const AMOUNT_SCALE: u32 = 2;

#[allow(clippy::cast_possible_wrap)]
const TEXT_LIMITS: (i64, i64) = (1, MAX_TEXT_LEN as i64);

/// Checks a submission and returns every violated rule.
///
/// An empty list means the submission is valid.
#[must_use]
pub fn validate(input: &BillingCycleInput) -> Vec<ValidationIssue> {
    normalize(input).err().unwrap_or_default()
}

/// Validates a submission and converts it into a draft.
///
/// # Errors
///
/// Returns all violated rules if the submission is invalid.
pub fn normalize(input: &BillingCycleInput) -> Result<BillingCycleDraft, Vec<ValidationIssue>> {
    let mut issues = Vec::new();

    let name = non_blank(input.name.as_deref());
    if name.is_none() {
        issues.push(ValidationIssue::new(Kind::NameRequired, "name"));
    }
    let name = bounded(name, ValidationIssue::new(Kind::NameTooLong, "name"), &mut issues);

    let month =
        in_range(input.month.as_ref(), &MONTH_RANGE).and_then(|m| u32::try_from(m).ok());
    if month.is_none() {
        issues.push(range_issue(Kind::MonthInvalid, "month", &MONTH_RANGE));
    }

    let year =
        in_range(input.year.as_ref(), &YEAR_RANGE).and_then(|y| i32::try_from(y).ok());
    if year.is_none() {
        issues.push(range_issue(Kind::YearInvalid, "year", &YEAR_RANGE));
    }

    // Entries are collected eagerly so that every one of them is checked.
    let credits = match input.credits.as_deref() {
        Some(entries) if !entries.is_empty() => entries
            .iter()
            .enumerate()
            .map(|(index, credit)| normalize_credit(index + 1, credit, &mut issues))
            .collect::<Vec<_>>()
            .into_iter()
            .collect::<Option<Vec<_>>>(),
        _ => {
            issues.push(ValidationIssue::new(Kind::CreditsRequired, "credits"));
            None
        }
    };

    let debts = match input.debts.as_deref() {
        Some(entries) if !entries.is_empty() => entries
            .iter()
            .enumerate()
            .map(|(index, debt)| normalize_debt(index + 1, debt, &mut issues))
            .collect::<Vec<_>>()
            .into_iter()
            .collect::<Option<Vec<_>>>(),
        _ => {
            issues.push(ValidationIssue::new(Kind::DebtsRequired, "debts"));
            None
        }
    };

    match (name, month, year, credits, debts) {
        (Some(name), Some(month), Some(year), Some(credits), Some(debts)) if issues.is_empty() => {
            Ok(BillingCycleDraft {
                name: name.to_string(),
                month,
                year,
                credits,
                debts,
            })
        }
        _ => Err(issues),
    }
}

fn normalize_credit(
    position: usize,
    input: &CreditInput,
    issues: &mut Vec<ValidationIssue>,
) -> Option<Credit> {
    let name = non_blank(input.name.as_deref());
    if name.is_none() {
        issues.push(ValidationIssue::at(Kind::CreditNameRequired, "credits.name", position));
    }
    let name = bounded(
        name,
        ValidationIssue::at(Kind::CreditNameTooLong, "credits.name", position),
        issues,
    );

    let value = storable_amount(
        input.value.as_ref(),
        (Kind::CreditValueInvalid, Kind::CreditValueTooLarge),
        "credits.value",
        position,
        issues,
    );

    Some(Credit {
        name: name?.to_string(),
        value: value?,
    })
}

fn normalize_debt(
    position: usize,
    input: &DebtInput,
    issues: &mut Vec<ValidationIssue>,
) -> Option<Debt> {
    let name = non_blank(input.name.as_deref());
    if name.is_none() {
        issues.push(ValidationIssue::at(Kind::DebtNameRequired, "debts.name", position));
    }
    let name = bounded(
        name,
        ValidationIssue::at(Kind::DebtNameTooLong, "debts.name", position),
        issues,
    );

    let value = storable_amount(
        input.value.as_ref(),
        (Kind::DebtValueInvalid, Kind::DebtValueTooLarge),
        "debts.value",
        position,
        issues,
    );

    let payment_day = in_range(input.payment_day.as_ref(), &PAYMENT_DAY_RANGE)
        .and_then(|day| u32::try_from(day).ok());
    if payment_day.is_none() {
        issues.push(
            ValidationIssue::at(Kind::PaymentDayInvalid, "debts.paymentDay", position)
                .with_limits(*PAYMENT_DAY_RANGE.start(), *PAYMENT_DAY_RANGE.end()),
        );
    }

    let status = match non_blank(input.status.as_deref()) {
        None => {
            issues.push(ValidationIssue::at(Kind::StatusRequired, "debts.status", position));
            None
        }
        Some(text) => {
            let parsed = text.parse::<DebtStatus>().ok();
            if parsed.is_none() {
                issues.push(ValidationIssue::at(Kind::StatusUnknown, "debts.status", position));
            }
            parsed
        }
    };

    // A status that is missing or unknown is treated as not scheduled.
    let date_required = status.is_none_or(DebtStatus::requires_payment_date);
    let payment_date = match non_blank(input.payment_date.as_deref()) {
        Some(text) => {
            let parsed = parse_payment_date(text);
            if parsed.is_none() {
                issues.push(ValidationIssue::at(
                    Kind::PaymentDateInvalid,
                    "debts.paymentDate",
                    position,
                ));
            }
            parsed.map(Some)
        }
        None if date_required => {
            issues.push(ValidationIssue::at(
                Kind::PaymentDateRequired,
                "debts.paymentDate",
                position,
            ));
            None
        }
        None => Some(None),
    };

    let category = non_blank(input.category.as_deref());
    let category = match bounded(
        category,
        ValidationIssue::at(Kind::CategoryTooLong, "debts.category", position),
        issues,
    ) {
        Some(text) => Some(Some(text.to_string())),
        None if category.is_some() => None,
        None => Some(None),
    };

    Some(Debt {
        name: name?.to_string(),
        value: value?,
        status: status?,
        payment_day: payment_day?,
        payment_date: payment_date?,
        category: category?,
    })
}

/// Parses an ISO-8601 date (`2024-05-10`) or date-time. Date-times without
/// an offset are taken as UTC.
#[must_use]
pub fn parse_payment_date(text: &str) -> Option<DateTime<Utc>> {
    let text = text.trim();
    if let Ok(parsed) = DateTime::parse_from_rfc3339(text) {
        return Some(parsed.with_timezone(&Utc));
    }
    if let Ok(parsed) = NaiveDateTime::parse_from_str(text, "%Y-%m-%dT%H:%M:%S%.f") {
        return Some(parsed.and_utc());
    }
    NaiveDate::parse_from_str(text, "%Y-%m-%d")
        .ok()
        .and_then(|date| date.and_hms_opt(0, 0, 0))
        .map(|midnight| midnight.and_utc())
}

fn non_blank(value: Option<&str>) -> Option<&str> {
    value.map(str::trim).filter(|text| !text.is_empty())
}

fn in_range(raw: Option<&RawInteger>, range: &RangeInclusive<i64>) -> Option<i64> {
    raw.and_then(RawInteger::as_integer)
        .filter(|value| range.contains(value))
}

/// Drops text that does not fit the stored column, reporting `issue`.
fn bounded<'a>(
    text: Option<&'a str>,
    issue: ValidationIssue,
    issues: &mut Vec<ValidationIssue>,
) -> Option<&'a str> {
    match text {
        Some(text) if exceeds_text_len(text) => {
            issues.push(issue.with_limits(TEXT_LIMITS.0, TEXT_LIMITS.1));
            None
        }
        other => other,
    }
}

/// Parses an amount and rounds it to the stored scale.
///
/// The rounded value must be positive and below [`AMOUNT_CEILING`].
fn storable_amount(
    raw: Option<&RawAmount>,
    (invalid, too_large): (Kind, Kind),
    field: &'static str,
    position: usize,
    issues: &mut Vec<ValidationIssue>,
) -> Option<Decimal> {
    let value = raw
        .and_then(parse_brl)
        .map(|value| {
            value.round_dp_with_strategy(AMOUNT_SCALE, RoundingStrategy::MidpointAwayFromZero)
        })
        .filter(|value| *value > Decimal::ZERO);
    match value {
        None => {
            issues.push(ValidationIssue::at(invalid, field, position));
            None
        }
        Some(value) if value >= AMOUNT_CEILING => {
            issues.push(ValidationIssue::at(too_large, field, position));
            None
        }
        Some(value) => Some(value),
    }
}

fn range_issue(kind: Kind, field: &'static str, range: &RangeInclusive<i64>) -> ValidationIssue {
    ValidationIssue::new(kind, field).with_limits(*range.start(), *range.end())
}

#[cfg(test)]
mod tests {
    use super::*;
    use rstest::rstest;
    use rust_decimal_macros::dec;

    fn valid_debt() -> DebtInput {
        DebtInput {
            name: Some("Aluguel".into()),
            value: Some(RawAmount::from("1.200,00")),
            status: Some("PAGO".into()),
            payment_day: Some(RawInteger::from(5)),
            payment_date: Some("2024-05-05".into()),
            category: Some("Moradia".into()),
        }
    }

    fn valid_input() -> BillingCycleInput {
        BillingCycleInput {
            name: Some("Maio/2024".into()),
            month: Some(RawInteger::from(5)),
            year: Some(RawInteger::from(2024)),
            credits: Some(vec![CreditInput {
                name: Some("Salário".into()),
                value: Some(RawAmount::from("5.000,00")),
            }]),
            debts: Some(vec![valid_debt()]),
        }
    }

    fn kinds(issues: &[ValidationIssue]) -> Vec<Kind> {
        issues.iter().map(|issue| issue.kind).collect()
    }

    #[test]
    fn test_well_formed_payload_is_valid() {
        assert!(validate(&valid_input()).is_empty());
    }

    #[test]
    fn test_normalize_converts_values() {
        let draft = normalize(&valid_input()).unwrap();

        assert_eq!(draft.name, "Maio/2024");
        assert_eq!(draft.month, 5);
        assert_eq!(draft.year, 2024);
        assert_eq!(draft.credits[0].value, dec!(5000.00));

        let debt = &draft.debts[0];
        assert_eq!(debt.value, dec!(1200.00));
        assert_eq!(debt.status, DebtStatus::Pago);
        assert_eq!(debt.payment_day, 5);
        assert_eq!(
            debt.payment_date,
            Some(
                NaiveDate::from_ymd_opt(2024, 5, 5)
                    .unwrap()
                    .and_hms_opt(0, 0, 0)
                    .unwrap()
                    .and_utc()
            )
        );
        assert_eq!(debt.category.as_deref(), Some("Moradia"));
    }

    #[test]
    fn test_everything_wrong_reports_every_rule() {
        let input = BillingCycleInput {
            name: Some(String::new()),
            month: Some(RawInteger::from(13)),
            year: Some(RawInteger::from(1969)),
            credits: Some(vec![]),
            debts: Some(vec![]),
        };

        let issues = validate(&input);

        assert_eq!(
            kinds(&issues),
            vec![
                Kind::NameRequired,
                Kind::MonthInvalid,
                Kind::YearInvalid,
                Kind::CreditsRequired,
                Kind::DebtsRequired,
            ]
        );
        assert_eq!(issues[1].min, Some(1));
        assert_eq!(issues[1].max, Some(12));
        assert_eq!(issues[2].min, Some(1970));
        assert_eq!(issues[2].max, Some(2100));
    }

    #[test]
    fn test_empty_payload_does_not_panic() {
        let issues = validate(&BillingCycleInput::default());
        assert_eq!(issues.len(), 5);
    }

    #[test]
    fn test_entry_issues_carry_one_based_positions() {
        let mut input = valid_input();
        input.credits = Some(vec![
            CreditInput {
                name: Some("Salário".into()),
                value: Some(RawAmount::from("10,00")),
            },
            CreditInput {
                name: None,
                value: Some(RawAmount::from("abc")),
            },
        ]);

        let issues = validate(&input);

        assert_eq!(
            issues,
            vec![
                ValidationIssue::at(Kind::CreditNameRequired, "credits.name", 2),
                ValidationIssue::at(Kind::CreditValueInvalid, "credits.value", 2),
            ]
        );
    }

    #[test]
    fn test_later_entries_are_checked_after_an_invalid_one() {
        let mut input = valid_input();
        let mut first = valid_debt();
        first.name = None;
        let mut third = valid_debt();
        third.value = None;
        input.debts = Some(vec![first, valid_debt(), third]);

        let issues = validate(&input);

        assert_eq!(issues.len(), 2);
        assert_eq!(issues[0].position, Some(1));
        assert_eq!(issues[1].position, Some(3));
        assert_eq!(issues[1].kind, Kind::DebtValueInvalid);
    }

    #[rstest]
    #[case(RawAmount::from("0,00"))]
    #[case(RawAmount::from("-5,00"))]
    #[case(RawAmount::from(""))]
    #[case(RawAmount::from(dec!(0)))]
    fn test_non_positive_or_unparsable_values_are_rejected(#[case] value: RawAmount) {
        let mut input = valid_input();
        input.credits.as_mut().unwrap()[0].value = Some(value);

        assert_eq!(kinds(&validate(&input)), vec![Kind::CreditValueInvalid]);
    }

    #[test]
    fn test_amount_ceiling_is_one_trillion() {
        assert_eq!(AMOUNT_CEILING, dec!(1000000000000));
    }

    #[rstest]
    #[case("0,001")]
    #[case("0,004")]
    fn test_values_rounding_to_zero_are_rejected(#[case] value: &str) {
        let mut input = valid_input();
        input.credits.as_mut().unwrap()[0].value = Some(RawAmount::from(value));

        assert_eq!(kinds(&validate(&input)), vec![Kind::CreditValueInvalid]);
    }

    #[rstest]
    #[case("0,005", dec!(0.01))]
    #[case("10,126", dec!(10.13))]
    #[case("999.999.999.999,99", dec!(999999999999.99))]
    fn test_values_are_rounded_to_cents(#[case] value: &str, #[case] expected: Decimal) {
        let mut input = valid_input();
        input.debts.as_mut().unwrap()[0].value = Some(RawAmount::from(value));

        let draft = normalize(&input).unwrap();
        assert_eq!(draft.debts[0].value, expected);
        assert!(draft.debts[0].value.scale() <= AMOUNT_SCALE);
    }

    #[rstest]
    #[case("1.000.000.000.000,00")]
    #[case("99.999.999.999.999.999,00")]
    #[case("999.999.999.999,995")]
    fn test_values_beyond_storage_are_rejected(#[case] value: &str) {
        let mut input = valid_input();
        input.credits.as_mut().unwrap()[0].value = Some(RawAmount::from(value));
        input.debts.as_mut().unwrap()[0].value = Some(RawAmount::from(value));

        let issues = validate(&input);

        assert_eq!(
            kinds(&issues),
            vec![Kind::CreditValueTooLarge, Kind::DebtValueTooLarge]
        );
        assert_eq!(issues[1].position, Some(1));
    }

    #[test]
    fn test_text_longer_than_column_is_rejected() {
        let long = "x".repeat(MAX_TEXT_LEN + 1);
        let mut input = valid_input();
        input.name = Some(long.clone());
        input.credits.as_mut().unwrap()[0].name = Some(long.clone());
        let debt = &mut input.debts.as_mut().unwrap()[0];
        debt.name = Some(long.clone());
        debt.category = Some(long);

        let issues = validate(&input);

        assert_eq!(
            kinds(&issues),
            vec![
                Kind::NameTooLong,
                Kind::CreditNameTooLong,
                Kind::DebtNameTooLong,
                Kind::CategoryTooLong,
            ]
        );
        assert_eq!(issues[0].max, Some(255));
        assert_eq!(issues[3].position, Some(1));
    }

    #[test]
    fn test_text_at_column_length_is_accepted() {
        let mut input = valid_input();
        input.name = Some(format!("  {}  ", "é".repeat(MAX_TEXT_LEN)));

        let draft = normalize(&input).unwrap();
        assert_eq!(draft.name.chars().count(), MAX_TEXT_LEN);
    }

    #[rstest]
    #[case(Some(RawInteger::from(0)))]
    #[case(Some(RawInteger::from(32)))]
    #[case(Some(RawInteger::Text("dez".into())))]
    #[case(None)]
    fn test_payment_day_out_of_range(#[case] day: Option<RawInteger>) {
        let mut input = valid_input();
        input.debts.as_mut().unwrap()[0].payment_day = day;

        let issues = validate(&input);

        assert_eq!(kinds(&issues), vec![Kind::PaymentDayInvalid]);
        assert_eq!(issues[0].position, Some(1));
        assert_eq!(issues[0].max, Some(31));
    }

    #[test]
    fn test_month_as_numeric_text_is_accepted() {
        let mut input = valid_input();
        input.month = Some(RawInteger::Text("12".into()));

        assert_eq!(normalize(&input).unwrap().month, 12);
    }

    #[test]
    fn test_missing_status_is_reported_and_date_still_required() {
        let mut input = valid_input();
        let debt = &mut input.debts.as_mut().unwrap()[0];
        debt.status = None;
        debt.payment_date = None;

        assert_eq!(
            kinds(&validate(&input)),
            vec![Kind::StatusRequired, Kind::PaymentDateRequired]
        );
    }

    #[test]
    fn test_unknown_status_is_reported() {
        let mut input = valid_input();
        input.debts.as_mut().unwrap()[0].status = Some("PAID".into());

        assert_eq!(kinds(&validate(&input)), vec![Kind::StatusUnknown]);
    }

    #[test]
    fn test_lowercase_status_is_normalized() {
        let mut input = valid_input();
        input.debts.as_mut().unwrap()[0].status = Some("pendente".into());

        let draft = normalize(&input).unwrap();
        assert_eq!(draft.debts[0].status, DebtStatus::Pendente);
    }

    #[test]
    fn test_scheduled_debt_needs_no_payment_date() {
        let mut input = valid_input();
        let debt = &mut input.debts.as_mut().unwrap()[0];
        debt.status = Some("AGENDADO".into());
        debt.payment_date = None;

        let draft = normalize(&input).unwrap();
        assert_eq!(draft.debts[0].payment_date, None);
    }

    #[rstest]
    #[case("PAGO")]
    #[case("PENDENTE")]
    fn test_unscheduled_debt_requires_payment_date(#[case] status: &str) {
        let mut input = valid_input();
        let debt = &mut input.debts.as_mut().unwrap()[0];
        debt.status = Some(status.into());
        debt.payment_date = Some("   ".into());

        assert_eq!(kinds(&validate(&input)), vec![Kind::PaymentDateRequired]);
    }

    #[rstest]
    #[case("2024-02-30")]
    #[case("30/05/2024")]
    #[case("amanhã")]
    fn test_invalid_payment_date(#[case] date: &str) {
        let mut input = valid_input();
        input.debts.as_mut().unwrap()[0].payment_date = Some(date.into());

        assert_eq!(kinds(&validate(&input)), vec![Kind::PaymentDateInvalid]);
    }

    #[rstest]
    #[case("2024-05-10")]
    #[case("2024-05-10T13:45:00Z")]
    #[case("2024-05-10T13:45:00.123-03:00")]
    #[case("2024-05-10T13:45:00")]
    fn test_accepted_payment_date_formats(#[case] date: &str) {
        assert!(parse_payment_date(date).is_some());
    }

    #[test]
    fn test_offset_is_converted_to_utc() {
        let parsed = parse_payment_date("2024-05-10T22:00:00-03:00").unwrap();
        assert_eq!(parsed.to_rfc3339(), "2024-05-11T01:00:00+00:00");
    }

    #[test]
    fn test_blank_category_is_dropped() {
        let mut input = valid_input();
        input.debts.as_mut().unwrap()[0].category = Some("  ".into());

        assert_eq!(normalize(&input).unwrap().debts[0].category, None);
    }
}
