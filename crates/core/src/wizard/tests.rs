//! Controller flow tests: full wizard runs, blocked transitions, submission
//! phases, and resolver-gated internal transfers.

use std::collections::VecDeque;
use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::{Arc, Mutex};
use std::time::Duration;

use async_trait::async_trait;
use chrono::NaiveDate;
use rust_decimal_macros::dec;
use tokio::time::advance;

use super::{SubmitPhase, WizardController, WizardError, WizardStep};
use crate::fees::FeeSchedule;
use crate::resolver::{
    IdentifierLookup, IdentifierResolver, LookupError, ResolvedIdentifier, ResolverSettings,
};
use crate::schema::Field;
use crate::submit::{SubmissionClient, SubmissionError, TransferPayload, TransferReceipt};
use crate::transfer::{BankRail, PayoutMethod, SourceAccount};
use paywise_shared::types::{Currency, SourceAccountId, TransferId};

fn accounts() -> Vec<SourceAccount> {
    vec![SourceAccount {
        id: SourceAccountId::new(),
        name: "Operating - USD".to_string(),
        currency: Currency::Usd,
        balance: dec!(5000),
    }]
}

fn today() -> NaiveDate {
    NaiveDate::from_ymd_opt(2026, 3, 14).unwrap()
}

fn controller(accounts: &[SourceAccount]) -> WizardController {
    WizardController::new(accounts.to_vec(), FeeSchedule::default())
}

/// Scripted submission endpoint; answers `Ok` with a fresh receipt once the
/// script runs out.
struct StubClient {
    calls: AtomicUsize,
    script: Mutex<VecDeque<Result<TransferReceipt, SubmissionError>>>,
}

impl StubClient {
    fn new() -> Self {
        Self {
            calls: AtomicUsize::new(0),
            script: Mutex::new(VecDeque::new()),
        }
    }

    fn failing_once(reason: SubmissionError) -> Self {
        let client = Self::new();
        client.script.lock().unwrap().push_back(Err(reason));
        client
    }

    fn call_count(&self) -> usize {
        self.calls.load(Ordering::SeqCst)
    }
}

#[async_trait]
impl SubmissionClient for StubClient {
    async fn submit_transfer(
        &self,
        _payload: &TransferPayload,
    ) -> Result<TransferReceipt, SubmissionError> {
        self.calls.fetch_add(1, Ordering::SeqCst);
        self.script.lock().unwrap().pop_front().unwrap_or_else(|| {
            Ok(TransferReceipt {
                transaction_id: TransferId::new(),
            })
        })
    }
}

struct StubLookup;

#[async_trait]
impl IdentifierLookup for StubLookup {
    async fn resolve(&self, input: &str) -> Result<Option<ResolvedIdentifier>, LookupError> {
        Ok((input == "ada-pay").then(|| ResolvedIdentifier {
            name: "Ada Lovelace".to_string(),
            verified: true,
        }))
    }
}

/// Lets background tasks run without advancing the paused clock.
async fn settle() {
    for _ in 0..16 {
        tokio::task::yield_now().await;
    }
}

fn drive_to_review(wizard: &mut WizardController, accounts: &[SourceAccount]) {
    wizard.select_source_account(accounts[0].id);
    wizard.select_payout_method(PayoutMethod::Crypto);
    assert!(wizard.next_at(today()).unwrap());

    wizard.set_field(
        Field::WalletAddress,
        "bc1qxy2kgdygjrsqtzq2n0yrf2493p83kkfjhx0wlh",
    );
    assert!(wizard.next_at(today()).unwrap());

    wizard.set_amount("1000");
    assert!(wizard.next_at(today()).unwrap());
    assert_eq!(wizard.step(), WizardStep::Review);
}

#[tokio::test]
async fn test_crypto_flow_to_done() {
    let accounts = accounts();
    let mut wizard = controller(&accounts);
    drive_to_review(&mut wizard, &accounts);

    let preview = wizard.fee_preview().unwrap();
    assert_eq!(preview.fee, dec!(10.00));
    assert_eq!(preview.total, dec!(1010.00));

    let client = StubClient::new();
    let phase = wizard.submit(&client).await.unwrap();
    assert!(matches!(phase, SubmitPhase::Done { .. }));
    assert_eq!(client.call_count(), 1);
}

#[test]
fn test_next_blocks_and_records_errors() {
    let accounts = accounts();
    let mut wizard = controller(&accounts);

    let advanced = wizard.next_at(today()).unwrap();
    assert!(!advanced);
    assert_eq!(wizard.step(), WizardStep::Method);
    assert!(wizard.state().errors.contains_key(&Field::SourceAccount));
    assert!(wizard.state().errors.contains_key(&Field::PayoutMethod));
}

#[test]
fn test_edit_clears_only_its_own_error() {
    let accounts = accounts();
    let mut wizard = controller(&accounts);
    wizard.next_at(today()).unwrap();
    assert_eq!(wizard.state().errors.len(), 2);

    wizard.select_source_account(accounts[0].id);
    assert!(!wizard.state().errors.contains_key(&Field::SourceAccount));
    assert!(wizard.state().errors.contains_key(&Field::PayoutMethod));
}

#[test]
fn test_back_keeps_values_and_clears_errors() {
    let accounts = accounts();
    let mut wizard = controller(&accounts);
    wizard.select_source_account(accounts[0].id);
    wizard.select_payout_method(PayoutMethod::Crypto);
    wizard.next_at(today()).unwrap();

    // Blocked on the recipient step, then navigate back
    wizard.next_at(today()).unwrap();
    assert!(!wizard.state().errors.is_empty());
    assert!(wizard.back().unwrap());

    assert_eq!(wizard.step(), WizardStep::Method);
    assert!(wizard.state().errors.is_empty());
    assert_eq!(wizard.draft().method, Some(PayoutMethod::Crypto));

    // Floor: back from the first step is a no-op
    assert!(!wizard.back().unwrap());
}

#[test]
fn test_method_switch_clears_exclusive_fields() {
    let accounts = accounts();
    let mut wizard = controller(&accounts);
    wizard.select_source_account(accounts[0].id);
    wizard.select_payout_method(PayoutMethod::Bank);
    wizard.select_bank_rail(BankRail::Swift);
    wizard.set_field(Field::RecipientName, "Ada Lovelace");
    wizard.set_field(Field::AccountNumber, "12345678");
    wizard.set_amount("250");

    wizard.select_payout_method(PayoutMethod::Crypto);

    assert!(wizard.draft().recipient.recipient_name.is_none());
    assert!(wizard.draft().recipient.account_number.is_none());
    assert!(wizard.draft().bank_rail.is_none());
    // Amount is not a recipient field; it survives the switch
    assert_eq!(wizard.draft().amount, "250");
}

#[test]
fn test_reselecting_same_method_keeps_recipient() {
    let accounts = accounts();
    let mut wizard = controller(&accounts);
    wizard.select_payout_method(PayoutMethod::Crypto);
    wizard.set_field(Field::WalletAddress, "bc1qxy2kgdygjrsqtzq2n0yrf2493p8");

    wizard.select_payout_method(PayoutMethod::Crypto);
    assert!(wizard.draft().recipient.wallet_address.is_some());
}

#[test]
fn test_country_change_drops_incompatible_network() {
    use crate::transfer::{Country, MobileNetwork};

    let accounts = accounts();
    let mut wizard = controller(&accounts);
    wizard.select_payout_method(PayoutMethod::MobileMoney);
    wizard.select_country(Country::Kenya);
    wizard.select_mobile_network(MobileNetwork::Mpesa);

    wizard.select_country(Country::Ghana);
    assert_eq!(wizard.draft().recipient.mobile_network, None);

    wizard.select_country(Country::Tanzania);
    wizard.select_mobile_network(MobileNetwork::Mpesa);
    wizard.select_country(Country::Kenya);
    // M-Pesa operates in both; the selection survives
    assert_eq!(
        wizard.draft().recipient.mobile_network,
        Some(MobileNetwork::Mpesa)
    );
}

#[tokio::test]
async fn test_submit_only_from_review() {
    let accounts = accounts();
    let mut wizard = controller(&accounts);
    let client = StubClient::new();

    let err = wizard.submit(&client).await.unwrap_err();
    assert_eq!(err, WizardError::NotOnReviewStep);
    assert_eq!(client.call_count(), 0);
}

#[tokio::test]
async fn test_failed_submit_allows_retry() {
    let accounts = accounts();
    let mut wizard = controller(&accounts);
    drive_to_review(&mut wizard, &accounts);

    let client = StubClient::failing_once(SubmissionError::InsufficientFunds);
    let phase = wizard.submit(&client).await.unwrap();
    assert_eq!(
        *phase,
        SubmitPhase::Failed {
            reason: SubmissionError::InsufficientFunds,
        }
    );
    // Draft intact for the retry
    assert_eq!(wizard.draft().amount, "1000");

    let phase = wizard.submit(&client).await.unwrap();
    assert!(matches!(phase, SubmitPhase::Done { .. }));
    assert_eq!(client.call_count(), 2);
}

#[tokio::test]
async fn test_done_is_terminal() {
    let accounts = accounts();
    let mut wizard = controller(&accounts);
    drive_to_review(&mut wizard, &accounts);

    let client = StubClient::new();
    wizard.submit(&client).await.unwrap();

    assert_eq!(wizard.next_at(today()).unwrap_err(), WizardError::AlreadyCompleted);
    assert_eq!(wizard.back().unwrap_err(), WizardError::AlreadyCompleted);
    assert_eq!(
        wizard.submit(&client).await.unwrap_err(),
        WizardError::AlreadyCompleted
    );
    assert_eq!(client.call_count(), 1);

    // Edits are ignored once the transfer is accepted
    wizard.set_amount("9999");
    assert_eq!(wizard.draft().amount, "1000");
}

#[tokio::test(start_paused = true)]
async fn test_internal_flow_gated_by_resolution() {
    let accounts = accounts();
    let resolver = IdentifierResolver::spawn(
        Arc::new(StubLookup),
        ResolverSettings {
            debounce: Duration::from_millis(400),
            min_input_len: 3,
        },
    );
    let mut wizard = controller(&accounts).with_resolver(resolver);
    wizard.select_source_account(accounts[0].id);
    wizard.select_payout_method(PayoutMethod::Internal);
    assert!(wizard.next_at(today()).unwrap());

    wizard.set_internal_handle("ada-pay");
    settle().await;

    // Lookup still pending: the step must not advance
    assert!(!wizard.next_at(today()).unwrap());
    assert!(wizard.state().errors.contains_key(&Field::InternalHandle));

    advance(Duration::from_millis(400)).await;
    settle().await;

    assert!(wizard.resolution().is_resolved_for("ada-pay"));
    assert!(wizard.next_at(today()).unwrap());
    assert_eq!(wizard.step(), WizardStep::Amount);
}

#[tokio::test(start_paused = true)]
async fn test_padded_handle_advances_once_resolved() {
    let accounts = accounts();
    let resolver = IdentifierResolver::spawn(
        Arc::new(StubLookup),
        ResolverSettings {
            debounce: Duration::from_millis(400),
            min_input_len: 3,
        },
    );
    let mut wizard = controller(&accounts).with_resolver(resolver);
    wizard.select_source_account(accounts[0].id);
    wizard.select_payout_method(PayoutMethod::Internal);
    assert!(wizard.next_at(today()).unwrap());

    // Pasted with surrounding whitespace; the resolver sees the trimmed value
    wizard.set_internal_handle(" ada-pay ");
    settle().await;
    advance(Duration::from_millis(400)).await;
    settle().await;

    assert!(wizard.resolution().is_resolved_for("ada-pay"));
    assert!(wizard.next_at(today()).unwrap());
    assert_eq!(wizard.step(), WizardStep::Amount);
}

#[tokio::test(start_paused = true)]
async fn test_stale_resolution_does_not_pass_validation() {
    let accounts = accounts();
    let resolver = IdentifierResolver::spawn(
        Arc::new(StubLookup),
        ResolverSettings {
            debounce: Duration::from_millis(400),
            min_input_len: 3,
        },
    );
    let mut wizard = controller(&accounts).with_resolver(resolver);
    wizard.select_source_account(accounts[0].id);
    wizard.select_payout_method(PayoutMethod::Internal);
    wizard.next_at(today()).unwrap();

    wizard.set_internal_handle("ada-pay");
    settle().await;
    advance(Duration::from_millis(400)).await;
    settle().await;
    assert!(wizard.resolution().is_resolved_for("ada-pay"));

    // Draft edited after resolution; the old result must not vouch for it
    wizard.set_internal_handle("ada-pai");
    assert!(!wizard.next_at(today()).unwrap());
    assert!(wizard.state().errors.contains_key(&Field::InternalHandle));
}
