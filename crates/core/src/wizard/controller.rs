//! The wizard controller: single writer of the draft and wizard state.
//!
//! Every mutation flows through a controller method so the invariants hold in
//! one place: errors are cleared on the edit that addresses them, cross-branch
//! recipient data is cleared on method change, and a step advances only when
//! its validation passes. While a submission is in flight or after acceptance
//! the controller ignores edits and rejects transitions.

use chrono::{NaiveDate, Utc};
use tracing::{debug, info, warn};

use super::error::WizardError;
use super::types::{SubmitPhase, WizardState, WizardStep};
use crate::fees::{FeeBreakdown, FeeSchedule};
use crate::resolver::{IdentifierResolver, ResolutionState};
use crate::schema::Field;
use crate::submit::{self, SubmissionClient, TransferPayload};
use crate::transfer::{
    BankRail, Country, MobileNetwork, PayoutMethod, Schedule, SourceAccount, TransferDraft,
    WalletProvider,
};
use crate::validation::{self, ValidationContext};
use paywise_shared::types::SourceAccountId;

/// Drives one transfer from an empty draft to a submitted payload.
///
/// Owns the draft, the wizard state, the account snapshot, the fee schedule,
/// and (when attached) the identifier resolver.
#[derive(Debug)]
pub struct WizardController {
    draft: TransferDraft,
    state: WizardState,
    accounts: Vec<SourceAccount>,
    fees: FeeSchedule,
    resolver: Option<IdentifierResolver>,
}

impl WizardController {
    /// Creates a controller over a snapshot of funding accounts.
    #[must_use]
    pub fn new(accounts: Vec<SourceAccount>, fees: FeeSchedule) -> Self {
        Self {
            draft: TransferDraft::default(),
            state: WizardState::default(),
            accounts,
            fees,
            resolver: None,
        }
    }

    /// Attaches an identifier resolver for internal transfers.
    #[must_use]
    pub fn with_resolver(mut self, resolver: IdentifierResolver) -> Self {
        self.resolver = Some(resolver);
        self
    }

    /// The draft as edited so far.
    #[must_use]
    pub fn draft(&self) -> &TransferDraft {
        &self.draft
    }

    /// Current step, errors, and submission phase.
    #[must_use]
    pub fn state(&self) -> &WizardState {
        &self.state
    }

    /// Current wizard step.
    #[must_use]
    pub fn step(&self) -> WizardStep {
        self.state.step
    }

    /// Current identifier resolution state; `Idle` when no resolver is
    /// attached.
    #[must_use]
    pub fn resolution(&self) -> ResolutionState {
        self.resolver
            .as_ref()
            .map_or(ResolutionState::Idle, IdentifierResolver::state)
    }

    /// Selects the funding account and adopts its currency.
    pub fn select_source_account(&mut self, id: SourceAccountId) {
        if !self.state.phase.is_interactive() {
            return;
        }
        self.draft.source_account = Some(id);
        if let Some(account) = self.accounts.iter().find(|a| a.id == id) {
            self.draft.currency = account.currency;
        }
        self.state.errors.remove(&Field::SourceAccount);
    }

    /// Selects the payout method, clearing recipient data the new method's
    /// schema does not own.
    pub fn select_payout_method(&mut self, method: PayoutMethod) {
        if !self.state.phase.is_interactive() || self.draft.method == Some(method) {
            return;
        }
        self.draft.method = Some(method);
        self.draft.retain_recipient_fields(method);
        if method != PayoutMethod::Bank {
            self.draft.bank_rail = None;
        }
        // Errors from the previous branch no longer apply.
        self.state.errors.clear();
    }

    /// Selects the bank rail; rail-specific identifier errors are reset since
    /// the required row set just changed.
    pub fn select_bank_rail(&mut self, rail: BankRail) {
        if !self.state.phase.is_interactive() {
            return;
        }
        self.draft.bank_rail = Some(rail);
        for field in [
            Field::BankRail,
            Field::AccountNumber,
            Field::Iban,
            Field::SwiftCode,
            Field::RoutingNumber,
        ] {
            self.state.errors.remove(&field);
        }
    }

    /// Selects the mobile money country, dropping a network that does not
    /// operate there.
    pub fn select_country(&mut self, country: Country) {
        if !self.state.phase.is_interactive() {
            return;
        }
        self.draft.recipient.country = Some(country);
        if let Some(network) = self.draft.recipient.mobile_network
            && !network.operates_in(country)
        {
            debug!(%network, %country, "Clearing network unavailable in country");
            self.draft.recipient.mobile_network = None;
        }
        self.state.errors.remove(&Field::Country);
        self.state.errors.remove(&Field::MobileNetwork);
    }

    /// Selects the mobile money network.
    pub fn select_mobile_network(&mut self, network: MobileNetwork) {
        if !self.state.phase.is_interactive() {
            return;
        }
        self.draft.recipient.mobile_network = Some(network);
        self.state.errors.remove(&Field::MobileNetwork);
    }

    /// Selects the digital wallet provider; the required contact field may
    /// have changed, so contact errors are reset.
    pub fn select_wallet_provider(&mut self, provider: WalletProvider) {
        if !self.state.phase.is_interactive() {
            return;
        }
        self.draft.recipient.wallet_provider = Some(provider);
        for field in [Field::WalletProvider, Field::Email, Field::Phone] {
            self.state.errors.remove(&field);
        }
    }

    /// Writes a free-text recipient field as typed.
    ///
    /// Edits to the internal handle also feed the resolver's debounce window.
    /// Non-recipient fields are ignored.
    pub fn set_field(&mut self, field: Field, value: &str) {
        if !self.state.phase.is_interactive() {
            return;
        }
        let stored = (!value.trim().is_empty()).then(|| value.to_string());
        let recipient = &mut self.draft.recipient;
        match field {
            Field::InternalHandle => {
                recipient.internal_handle = stored;
                if let Some(resolver) = &self.resolver {
                    resolver.note_edit(value.trim());
                }
            }
            Field::RecipientName => recipient.recipient_name = stored,
            Field::AccountNumber => recipient.account_number = stored,
            Field::SwiftCode => recipient.swift_code = stored,
            Field::Iban => recipient.iban = stored,
            Field::RoutingNumber => recipient.routing_number = stored,
            Field::Phone => recipient.phone = stored,
            Field::Email => recipient.email = stored,
            Field::WalletAddress => recipient.wallet_address = stored,
            _ => return,
        }
        self.state.errors.remove(&field);
    }

    /// Convenience for the internal handle input; see [`Self::set_field`].
    pub fn set_internal_handle(&mut self, value: &str) {
        self.set_field(Field::InternalHandle, value);
    }

    /// Writes the amount exactly as typed.
    pub fn set_amount(&mut self, value: &str) {
        if !self.state.phase.is_interactive() {
            return;
        }
        self.draft.amount = value.to_string();
        self.state.errors.remove(&Field::Amount);
    }

    /// Sets the optional payment reference.
    pub fn set_reference(&mut self, value: &str) {
        if !self.state.phase.is_interactive() {
            return;
        }
        self.draft.reference = (!value.trim().is_empty()).then(|| value.to_string());
    }

    /// Sets the optional description.
    pub fn set_description(&mut self, value: &str) {
        if !self.state.phase.is_interactive() {
            return;
        }
        self.draft.description = (!value.trim().is_empty()).then(|| value.to_string());
    }

    /// Sets the execution schedule.
    pub fn set_schedule(&mut self, schedule: Schedule) {
        if !self.state.phase.is_interactive() {
            return;
        }
        self.draft.schedule = schedule;
        self.state.errors.remove(&Field::ScheduleDate);
    }

    /// Validates the current step against today's date and advances on a
    /// clean pass. See [`Self::next_at`].
    pub fn next(&mut self) -> Result<bool, WizardError> {
        self.next_at(Utc::now().date_naive())
    }

    /// Validates the current step and advances on a clean pass.
    ///
    /// Returns `Ok(true)` when the wizard moved forward, `Ok(false)` when
    /// validation blocked it (errors are recorded) or there is no next step.
    /// `today` anchors the scheduled-date check.
    pub fn next_at(&mut self, today: NaiveDate) -> Result<bool, WizardError> {
        self.ensure_interactive()?;

        let resolution = self.resolver.as_ref().map(IdentifierResolver::state);
        let ctx = ValidationContext {
            accounts: &self.accounts,
            resolution: resolution.as_ref(),
            today,
        };
        let errors = validation::validate_step(self.state.step, &self.draft, &ctx);
        if !errors.is_empty() {
            debug!(step = %self.state.step, error_count = errors.len(), "Step blocked by validation");
            self.state.errors = errors;
            return Ok(false);
        }

        self.state.errors.clear();
        match self.state.step.next() {
            Some(next) => {
                info!(from = %self.state.step, to = %next, "Wizard advanced");
                self.state.step = next;
                Ok(true)
            }
            None => Ok(false),
        }
    }

    /// Steps backward, keeping all entered values.
    ///
    /// Errors are cleared and a failed submission returns to editing. Returns
    /// `Ok(false)` at the first step.
    pub fn back(&mut self) -> Result<bool, WizardError> {
        self.ensure_interactive()?;

        self.state.errors.clear();
        if matches!(self.state.phase, SubmitPhase::Failed { .. }) {
            self.state.phase = SubmitPhase::Editing;
        }
        match self.state.step.previous() {
            Some(previous) => {
                self.state.step = previous;
                Ok(true)
            }
            None => Ok(false),
        }
    }

    /// Fee breakdown for the current draft, when it has a method and a
    /// positive amount.
    #[must_use]
    pub fn fee_preview(&self) -> Option<FeeBreakdown> {
        let method = self.draft.method?;
        let amount = self.draft.amount_decimal().filter(|a| a.is_sign_positive() && !a.is_zero())?;
        Some(
            self.fees
                .compute(method, self.draft.bank_rail, amount, self.draft.currency),
        )
    }

    /// The payload the review step displays and submission sends.
    pub fn review_payload(&self) -> Result<TransferPayload, WizardError> {
        Ok(submit::build_payload(&self.draft, &self.accounts, &self.fees)?)
    }

    /// Submits the transfer from the review step.
    ///
    /// The client is called exactly once per invocation. On acceptance the
    /// wizard becomes terminal; on failure the draft is kept and `submit` may
    /// be called again.
    pub async fn submit(
        &mut self,
        client: &dyn SubmissionClient,
    ) -> Result<&SubmitPhase, WizardError> {
        if self.state.step != WizardStep::Review {
            return Err(WizardError::NotOnReviewStep);
        }
        self.ensure_interactive()?;

        let payload = submit::build_payload(&self.draft, &self.accounts, &self.fees)?;
        self.state.phase = SubmitPhase::Submitting;
        info!(
            recipient = %payload.recipient_label(),
            total = %payload.total.amount,
            currency = %payload.total.currency,
            "Submitting transfer"
        );

        match client.submit_transfer(&payload).await {
            Ok(receipt) => {
                info!(transaction_id = %receipt.transaction_id, "Transfer accepted");
                self.state.phase = SubmitPhase::Done { receipt };
            }
            Err(reason) => {
                warn!(error = %reason, "Transfer submission failed");
                self.state.phase = SubmitPhase::Failed { reason };
            }
        }
        Ok(&self.state.phase)
    }

    fn ensure_interactive(&self) -> Result<(), WizardError> {
        match self.state.phase {
            SubmitPhase::Submitting => Err(WizardError::SubmissionInFlight),
            SubmitPhase::Done { .. } => Err(WizardError::AlreadyCompleted),
            SubmitPhase::Editing | SubmitPhase::Failed { .. } => Ok(()),
        }
    }
}
