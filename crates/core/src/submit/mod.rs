//! Review payload assembly and submission.
//!
//! `build_payload` converts a validated draft into the wire shape the transfer
//! endpoint accepts, with fees computed and every monetary figure rounded. The
//! builder still re-checks its inputs: the controller gates on validation, but
//! the payload must be constructible from the draft alone.

use async_trait::async_trait;
use serde::{Deserialize, Serialize};
use thiserror::Error;

use crate::fees::FeeSchedule;
use crate::schema::Field;
use crate::transfer::{
    BankRail, ContactKind, Country, MobileNetwork, PayoutMethod, Schedule, SourceAccount,
    TransferDraft, WalletProvider,
};
use paywise_shared::types::{Money, SourceAccountId, TransferId};
use paywise_shared::AppError;

/// Method-specific recipient block of the submission payload.
///
/// Only the fields the selected method actually uses survive into the payload;
/// cross-branch leftovers in the draft are dropped here.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "method", rename_all = "snake_case")]
#[serde(rename_all_fields = "camelCase")]
pub enum RecipientPayload {
    /// Platform-internal transfer.
    Internal {
        /// Verified account handle.
        handle: String,
    },
    /// Bank transfer over a specific rail.
    Bank {
        /// Interbank rail.
        rail: BankRail,
        /// Recipient legal name.
        recipient_name: String,
        /// Plain account number; absent on SEPA.
        #[serde(skip_serializing_if = "Option::is_none")]
        account_number: Option<String>,
        /// IBAN; SEPA only.
        #[serde(skip_serializing_if = "Option::is_none")]
        iban: Option<String>,
        /// SWIFT/BIC code; SWIFT only.
        #[serde(skip_serializing_if = "Option::is_none")]
        swift_code: Option<String>,
        /// Routing number; ACH and Fedwire only.
        #[serde(skip_serializing_if = "Option::is_none")]
        routing_number: Option<String>,
    },
    /// Mobile money wallet.
    MobileMoney {
        /// Recipient country.
        country: Country,
        /// Carrier network.
        network: MobileNetwork,
        /// Wallet phone number.
        phone: String,
    },
    /// Cryptocurrency wallet.
    Crypto {
        /// Destination address.
        address: String,
    },
    /// Consumer digital wallet.
    DigitalWallet {
        /// Wallet provider.
        provider: WalletProvider,
        /// Contact email; PayPal only.
        #[serde(skip_serializing_if = "Option::is_none")]
        email: Option<String>,
        /// Contact phone; phone-addressed providers.
        #[serde(skip_serializing_if = "Option::is_none")]
        phone: Option<String>,
    },
}

/// Complete submission payload for one outbound transfer.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct TransferPayload {
    /// Funding account.
    pub source_account_id: SourceAccountId,
    /// Method-specific recipient details.
    pub recipient: RecipientPayload,
    /// Transfer amount, rounded to the currency's precision.
    pub amount: Money,
    /// Fee charged on top of the amount.
    pub fee: Money,
    /// Amount plus fee.
    pub total: Money,
    /// Optional payment reference.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub reference: Option<String>,
    /// Optional free-text description.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
    /// Execution schedule.
    pub schedule: Schedule,
}

impl TransferPayload {
    /// One-line recipient label for the review screen.
    #[must_use]
    pub fn recipient_label(&self) -> String {
        match &self.recipient {
            RecipientPayload::Internal { handle } => format!("@{handle}"),
            RecipientPayload::Bank {
                rail,
                recipient_name,
                ..
            } => format!("{recipient_name} via {rail}"),
            RecipientPayload::MobileMoney { network, phone, .. } => {
                format!("{phone} ({network})")
            }
            RecipientPayload::Crypto { address } => address.clone(),
            RecipientPayload::DigitalWallet {
                provider,
                email,
                phone,
            } => {
                let contact = email.as_deref().or(phone.as_deref()).unwrap_or_default();
                format!("{contact} ({provider})")
            }
        }
    }

    /// Labelled lines for the review screen: recipient, amount, fee, total.
    #[must_use]
    pub fn review_summary(&self) -> Vec<(&'static str, String)> {
        let money = |m: &Money| format!("{} {}", m.amount, m.currency);
        vec![
            ("Recipient", self.recipient_label()),
            ("Amount", money(&self.amount)),
            ("Fee", money(&self.fee)),
            ("Total", money(&self.total)),
        ]
    }
}

/// Why a draft could not be turned into a payload.
///
/// The controller validates before building, so these indicate a bug in the
/// calling sequence rather than a user mistake.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum PayloadError {
    /// No payout method selected.
    #[error("no payout method selected")]
    MethodNotSelected,
    /// No funding account selected.
    #[error("no source account selected")]
    SourceAccountNotSelected,
    /// The selected funding account is not in the snapshot.
    #[error("source account is not in the snapshot")]
    UnknownSourceAccount,
    /// Bank method without a rail.
    #[error("no bank rail selected")]
    RailNotSelected,
    /// A field the selected method requires is empty.
    #[error("missing required field: {0}")]
    MissingField(Field),
    /// The amount is not a positive decimal.
    #[error("amount is not a valid positive decimal")]
    InvalidAmount,
}

/// Builds the submission payload from a validated draft.
pub fn build_payload(
    draft: &TransferDraft,
    accounts: &[SourceAccount],
    fees: &FeeSchedule,
) -> Result<TransferPayload, PayloadError> {
    let method = draft.method.ok_or(PayloadError::MethodNotSelected)?;
    let source_account_id = draft
        .source_account
        .ok_or(PayloadError::SourceAccountNotSelected)?;
    if !accounts.iter().any(|a| a.id == source_account_id) {
        return Err(PayloadError::UnknownSourceAccount);
    }

    let amount = draft
        .amount_decimal()
        .filter(|a| a.is_sign_positive() && !a.is_zero())
        .ok_or(PayloadError::InvalidAmount)?;

    let recipient = build_recipient(draft, method)?;
    let breakdown = fees.compute(method, draft.bank_rail, amount, draft.currency);

    Ok(TransferPayload {
        source_account_id,
        recipient,
        amount: Money::new(draft.currency.round(amount), draft.currency),
        fee: Money::new(breakdown.fee, draft.currency),
        total: Money::new(breakdown.total, draft.currency),
        reference: trimmed(draft.reference.as_deref()),
        description: trimmed(draft.description.as_deref()),
        schedule: draft.schedule,
    })
}

fn build_recipient(
    draft: &TransferDraft,
    method: PayoutMethod,
) -> Result<RecipientPayload, PayloadError> {
    let recipient = &draft.recipient;
    match method {
        PayoutMethod::Internal => Ok(RecipientPayload::Internal {
            handle: require(Field::InternalHandle, recipient.internal_handle.as_deref())?,
        }),
        PayoutMethod::Bank => {
            let rail = draft.bank_rail.ok_or(PayloadError::RailNotSelected)?;
            let recipient_name =
                require(Field::RecipientName, recipient.recipient_name.as_deref())?;
            // SEPA identifies the account by IBAN instead of a plain number.
            let (account_number, iban) = if rail == BankRail::Sepa {
                (None, Some(require(Field::Iban, recipient.iban.as_deref())?))
            } else {
                (
                    Some(require(
                        Field::AccountNumber,
                        recipient.account_number.as_deref(),
                    )?),
                    None,
                )
            };
            let swift_code = if rail == BankRail::Swift {
                Some(require(Field::SwiftCode, recipient.swift_code.as_deref())?)
            } else {
                None
            };
            let routing_number = if matches!(rail, BankRail::Ach | BankRail::Fedwire) {
                Some(require(
                    Field::RoutingNumber,
                    recipient.routing_number.as_deref(),
                )?)
            } else {
                None
            };
            Ok(RecipientPayload::Bank {
                rail,
                recipient_name,
                account_number,
                iban,
                swift_code,
                routing_number,
            })
        }
        PayoutMethod::MobileMoney => Ok(RecipientPayload::MobileMoney {
            country: recipient
                .country
                .ok_or(PayloadError::MissingField(Field::Country))?,
            network: recipient
                .mobile_network
                .ok_or(PayloadError::MissingField(Field::MobileNetwork))?,
            phone: require(Field::Phone, recipient.phone.as_deref())?,
        }),
        PayoutMethod::Crypto => Ok(RecipientPayload::Crypto {
            address: require(Field::WalletAddress, recipient.wallet_address.as_deref())?,
        }),
        PayoutMethod::DigitalWallet => {
            let provider = recipient
                .wallet_provider
                .ok_or(PayloadError::MissingField(Field::WalletProvider))?;
            let (email, phone) = match provider.required_contact() {
                ContactKind::Email => {
                    (Some(require(Field::Email, recipient.email.as_deref())?), None)
                }
                ContactKind::Phone => {
                    (None, Some(require(Field::Phone, recipient.phone.as_deref())?))
                }
            };
            Ok(RecipientPayload::DigitalWallet {
                provider,
                email,
                phone,
            })
        }
    }
}

fn require(field: Field, value: Option<&str>) -> Result<String, PayloadError> {
    match value.map(str::trim) {
        Some(v) if !v.is_empty() => Ok(v.to_string()),
        _ => Err(PayloadError::MissingField(field)),
    }
}

fn trimmed(value: Option<&str>) -> Option<String> {
    value
        .map(str::trim)
        .filter(|v| !v.is_empty())
        .map(ToString::to_string)
}

/// Receipt returned by the transfer endpoint on acceptance.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct TransferReceipt {
    /// Identifier of the created transfer.
    pub transaction_id: TransferId,
}

/// Failure reported by the transfer endpoint, displayed verbatim.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum SubmissionError {
    /// The funding account no longer covers amount plus fee.
    #[error("Insufficient funds in the source account")]
    InsufficientFunds,
    /// The recipient was rejected by the receiving side.
    #[error("The recipient could not accept this transfer")]
    RecipientRejected,
    /// Transport or service failure.
    #[error("{0}")]
    Service(String),
}

impl From<SubmissionError> for AppError {
    fn from(err: SubmissionError) -> Self {
        Self::Submission(err.to_string())
    }
}

/// The transfer endpoint, behind a trait so tests can script outcomes.
#[async_trait]
pub trait SubmissionClient: Send + Sync {
    /// Submits one transfer; called at most once per confirmation.
    async fn submit_transfer(
        &self,
        payload: &TransferPayload,
    ) -> Result<TransferReceipt, SubmissionError>;
}
