//! Property-based tests for step validation.

use chrono::NaiveDate;
use proptest::prelude::*;
use rust_decimal::Decimal;

use super::{validate_step, ValidationContext};
use crate::transfer::{BankRail, PayoutMethod, SourceAccount, TransferDraft};
use crate::wizard::WizardStep;
use paywise_shared::types::{Currency, SourceAccountId};

fn any_method() -> impl Strategy<Value = PayoutMethod> {
    prop::sample::select(PayoutMethod::ALL.to_vec())
}

fn any_rail() -> impl Strategy<Value = BankRail> {
    prop::sample::select(BankRail::ALL.to_vec())
}

fn any_step() -> impl Strategy<Value = WizardStep> {
    prop::sample::select(vec![
        WizardStep::Method,
        WizardStep::Recipient,
        WizardStep::Amount,
        WizardStep::Review,
    ])
}

/// Free-form amount input, as typed (valid decimals and junk alike).
fn amount_input() -> impl Strategy<Value = String> {
    prop_oneof![
        (1i64..100_000_000i64).prop_map(|cents| Decimal::new(cents, 2).to_string()),
        "[a-z0-9.,-]{0,12}",
    ]
}

fn accounts() -> Vec<SourceAccount> {
    vec![SourceAccount {
        id: SourceAccountId::new(),
        name: "Operating - USD".to_string(),
        currency: Currency::Usd,
        balance: Decimal::new(100_000, 2),
    }]
}

fn today() -> NaiveDate {
    NaiveDate::from_ymd_opt(2026, 3, 14).unwrap()
}

proptest! {
    #![proptest_config(ProptestConfig::with_cases(100))]

    /// *For any* draft and step, validating twice with the same context
    /// produces the same error map.
    #[test]
    fn prop_validate_step_is_deterministic(
        step in any_step(),
        method in any_method(),
        amount in amount_input(),
    ) {
        let accounts = accounts();
        let mut draft = TransferDraft::default();
        draft.source_account = Some(accounts[0].id);
        draft.method = Some(method);
        draft.amount = amount;
        let ctx = ValidationContext {
            accounts: &accounts,
            resolution: None,
            today: today(),
        };

        let first = validate_step(step, &draft, &ctx);
        let second = validate_step(step, &draft, &ctx);
        prop_assert_eq!(first, second);
    }

    /// *For any* non-bank method, a lingering bank rail selection never
    /// changes the recipient-step outcome.
    #[test]
    fn prop_bank_rail_irrelevant_outside_bank(
        method in any_method().prop_filter("non-bank", |m| *m != PayoutMethod::Bank),
        rail in any_rail(),
    ) {
        let accounts = accounts();
        let mut draft = TransferDraft::default();
        draft.source_account = Some(accounts[0].id);
        draft.method = Some(method);
        let ctx = ValidationContext {
            accounts: &accounts,
            resolution: None,
            today: today(),
        };

        let without = validate_step(WizardStep::Recipient, &draft, &ctx);
        draft.bank_rail = Some(rail);
        let with = validate_step(WizardStep::Recipient, &draft, &ctx);
        prop_assert_eq!(without, with);
    }

    /// *For any* draft, the review step reports no errors; it only re-displays
    /// data the earlier steps already gated.
    #[test]
    fn prop_review_step_never_blocks(
        method in any_method(),
        amount in amount_input(),
    ) {
        let accounts = accounts();
        let mut draft = TransferDraft::default();
        draft.method = Some(method);
        draft.amount = amount;
        let ctx = ValidationContext {
            accounts: &accounts,
            resolution: None,
            today: today(),
        };

        let errors = validate_step(WizardStep::Review, &draft, &ctx);
        prop_assert!(errors.is_empty());
    }
}
