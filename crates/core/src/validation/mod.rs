//! Per-step validation rules for the transfer wizard.
//!
//! `validate_step` is pure and deterministic: same input, same output. Errors
//! are data (an ordered field → message map), never exceptions, so the
//! controller can surface them without special-casing control flow. A step
//! with an empty map is the only "pass" signal the controller accepts.

mod rules;

#[cfg(test)]
mod props;

use std::collections::BTreeMap;

use chrono::NaiveDate;
use rust_decimal::Decimal;

use crate::resolver::ResolutionState;
use crate::schema::{self, Field, FieldSpec};
use crate::transfer::{ContactKind, PayoutMethod, ScheduleMode, SourceAccount, TransferDraft};
use crate::wizard::WizardStep;

pub use rules::format_error;

/// Field-scoped validation errors, ordered for stable display.
pub type ErrorMap = BTreeMap<Field, String>;

/// Read-only inputs the validator needs beyond the draft itself.
///
/// `today` is explicit so scheduled-date checks stay referentially
/// transparent; the controller passes the current date.
#[derive(Debug, Clone, Copy)]
pub struct ValidationContext<'a> {
    /// Source account snapshot taken at wizard start.
    pub accounts: &'a [SourceAccount],
    /// Current identifier resolution state, if a resolver is attached.
    pub resolution: Option<&'a ResolutionState>,
    /// Today's date, for schedule checks.
    pub today: NaiveDate,
}

/// Validates one wizard step against the draft.
///
/// Returns an empty map when the step may advance.
#[must_use]
pub fn validate_step(step: WizardStep, draft: &TransferDraft, ctx: &ValidationContext<'_>) -> ErrorMap {
    match step {
        WizardStep::Method => validate_method(draft, ctx),
        WizardStep::Recipient => validate_recipient(draft, ctx),
        WizardStep::Amount => validate_amount(draft, ctx),
        // Review only re-displays already-validated data.
        WizardStep::Review => ErrorMap::new(),
    }
}

fn validate_method(draft: &TransferDraft, ctx: &ValidationContext<'_>) -> ErrorMap {
    let mut errors = ErrorMap::new();

    match draft.source_account {
        None => {
            errors.insert(Field::SourceAccount, "Select a source account".to_string());
        }
        Some(id) => {
            if !ctx.accounts.iter().any(|a| a.id == id) {
                errors.insert(Field::SourceAccount, "Unknown source account".to_string());
            }
        }
    }

    if draft.method.is_none() {
        errors.insert(Field::PayoutMethod, "Select a payout method".to_string());
    }

    errors
}

fn validate_recipient(draft: &TransferDraft, ctx: &ValidationContext<'_>) -> ErrorMap {
    let mut errors = ErrorMap::new();

    let Some(method) = draft.method else {
        errors.insert(Field::PayoutMethod, "Select a payout method".to_string());
        return errors;
    };

    // Schema-driven presence and format checks for the selected branch.
    for FieldSpec {
        field,
        kind,
        required,
    } in schema::recipient_fields(method, draft.bank_rail)
    {
        if !draft.recipient.is_set(field) {
            if required {
                errors.insert(field, rules::required_message(field));
            }
            continue;
        }
        if let Some(message) = rules::format_error(field, kind, &draft.recipient) {
            errors.insert(field, message);
        }
    }

    // Branch rules the flat table cannot express.
    match method {
        PayoutMethod::Internal => validate_resolution(draft, ctx, &mut errors),
        PayoutMethod::Bank => {
            if draft.bank_rail.is_none() {
                errors.insert(Field::BankRail, "Select a bank rail".to_string());
            }
        }
        PayoutMethod::MobileMoney => {
            if let (Some(network), Some(country)) =
                (draft.recipient.mobile_network, draft.recipient.country)
                && !network.operates_in(country)
            {
                errors.insert(
                    Field::MobileNetwork,
                    format!("{network} is not available in {country}"),
                );
            }
        }
        PayoutMethod::Crypto => {}
        PayoutMethod::DigitalWallet => {
            if let Some(provider) = draft.recipient.wallet_provider {
                let (field, kind) = match provider.required_contact() {
                    ContactKind::Email => (Field::Email, schema::FieldKind::Email),
                    ContactKind::Phone => (Field::Phone, schema::FieldKind::Phone),
                };
                if !draft.recipient.is_set(field) {
                    errors.insert(field, rules::required_message(field));
                } else if let Some(message) = rules::format_error(field, kind, &draft.recipient) {
                    errors.insert(field, message);
                }
            }
        }
    }

    errors
}

/// Internal transfers require a successful resolution of the exact handle the
/// user typed; an unresolved or not-found handle is an error even if
/// non-empty.
fn validate_resolution(
    draft: &TransferDraft,
    ctx: &ValidationContext<'_>,
    errors: &mut ErrorMap,
) {
    let Some(handle) = draft.recipient.internal_handle.as_deref() else {
        return; // presence already reported by the schema pass
    };
    // The resolver is fed the trimmed handle, so compare trimmed here too.
    let handle = handle.trim();
    if handle.is_empty() {
        return;
    }

    let message = match ctx.resolution {
        Some(state) if state.is_resolved_for(handle) => return,
        Some(ResolutionState::NotFound { input }) if input == handle => {
            "No account found for this handle".to_string()
        }
        Some(ResolutionState::Failed { input, .. }) if input == handle => {
            "Could not verify this account".to_string()
        }
        Some(ResolutionState::Pending { input }) if input == handle => {
            "Still confirming this account".to_string()
        }
        _ => "Account has not been verified yet".to_string(),
    };
    errors.insert(Field::InternalHandle, message);
}

fn validate_amount(draft: &TransferDraft, ctx: &ValidationContext<'_>) -> ErrorMap {
    let mut errors = ErrorMap::new();

    if draft.amount.trim().is_empty() {
        errors.insert(Field::Amount, "Amount is required".to_string());
    } else {
        match draft.amount_decimal() {
            None => {
                errors.insert(Field::Amount, "Enter a valid amount".to_string());
            }
            Some(amount) if amount <= Decimal::ZERO => {
                errors.insert(Field::Amount, "Amount must be greater than zero".to_string());
            }
            Some(amount) => {
                let account = draft
                    .source_account
                    .and_then(|id| ctx.accounts.iter().find(|a| a.id == id));
                if let Some(account) = account
                    && amount > account.balance
                {
                    errors.insert(
                        Field::Amount,
                        format!(
                            "Amount exceeds the available balance of {} {}",
                            account.balance, account.currency
                        ),
                    );
                }
            }
        }
    }

    if draft.schedule.mode == ScheduleMode::Scheduled {
        match draft.schedule.date {
            None => {
                errors.insert(Field::ScheduleDate, "Pick an execution date".to_string());
            }
            Some(date) if date < ctx.today => {
                errors.insert(
                    Field::ScheduleDate,
                    "Execution date cannot be in the past".to_string(),
                );
            }
            Some(_) => {}
        }
    }

    errors
}
