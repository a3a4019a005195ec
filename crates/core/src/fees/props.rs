//! Property-based tests for fee calculation.

use proptest::prelude::*;
use rust_decimal::Decimal;

use super::FeeSchedule;
use crate::transfer::{BankRail, PayoutMethod};
use paywise_shared::types::Currency;

fn positive_amount() -> impl Strategy<Value = Decimal> {
    (1i64..100_000_000i64).prop_map(|cents| Decimal::new(cents, 2))
}

fn any_method() -> impl Strategy<Value = PayoutMethod> {
    prop::sample::select(PayoutMethod::ALL.to_vec())
}

fn any_rail() -> impl Strategy<Value = Option<BankRail>> {
    prop_oneof![
        Just(None),
        prop::sample::select(BankRail::ALL.to_vec()).prop_map(Some),
    ]
}

proptest! {
    #![proptest_config(ProptestConfig::with_cases(100))]

    /// *For any* method and amount, fee and total carry at most the
    /// currency's decimal places.
    #[test]
    fn prop_breakdown_respects_currency_precision(
        method in any_method(),
        rail in any_rail(),
        amount in positive_amount(),
    ) {
        let breakdown = FeeSchedule::default().compute(method, rail, amount, Currency::Usd);
        let scale = Decimal::from(100);
        prop_assert_eq!(breakdown.fee * scale, (breakdown.fee * scale).round());
        prop_assert_eq!(breakdown.total * scale, (breakdown.total * scale).round());
    }

    /// *For any* method and amount, the rounded figures satisfy
    /// total = amount + fee exactly.
    #[test]
    fn prop_total_is_amount_plus_fee(
        method in any_method(),
        rail in any_rail(),
        amount in positive_amount(),
    ) {
        let breakdown = FeeSchedule::default().compute(method, rail, amount, Currency::Usd);
        prop_assert_eq!(breakdown.total, Currency::Usd.round(amount + breakdown.fee));
    }

    /// *For any* amount, internal transfers carry no fee and SWIFT is never
    /// cheaper than the other bank rails.
    #[test]
    fn prop_internal_free_and_swift_priced_highest(
        amount in positive_amount(),
        rail in any_rail(),
    ) {
        let schedule = FeeSchedule::default();
        let internal = schedule.compute(PayoutMethod::Internal, rail, amount, Currency::Usd);
        prop_assert_eq!(internal.fee, Decimal::ZERO);
        prop_assert_eq!(internal.total, Currency::Usd.round(amount));

        let swift = schedule.compute(
            PayoutMethod::Bank,
            Some(BankRail::Swift),
            amount,
            Currency::Usd,
        );
        let local = schedule.compute(
            PayoutMethod::Bank,
            Some(BankRail::Local),
            amount,
            Currency::Usd,
        );
        prop_assert!(swift.fee >= local.fee);
    }
}
