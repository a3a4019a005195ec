//! Field-level messages and format checks.
//!
//! Format checks are advisory sanity checks (length/charset), not proofs of
//! correctness; the backend remains the source of truth for every identifier.

use crate::schema::{Field, FieldKind};
use crate::transfer::RecipientDetails;

/// The "value missing" message for a required field.
#[must_use]
pub fn required_message(field: Field) -> String {
    let message = match field {
        Field::SourceAccount => "Select a source account",
        Field::PayoutMethod => "Select a payout method",
        Field::BankRail => "Select a bank rail",
        Field::InternalHandle => "Enter the recipient's account handle",
        Field::RecipientName => "Recipient name is required",
        Field::AccountNumber => "Account number is required",
        Field::SwiftCode => "SWIFT/BIC code is required",
        Field::Iban => "IBAN is required",
        Field::RoutingNumber => "Routing number is required",
        Field::Country => "Select a country",
        Field::MobileNetwork => "Select a mobile network",
        Field::Phone => "Phone number is required",
        Field::WalletProvider => "Select a wallet provider",
        Field::Email => "Email is required",
        Field::WalletAddress => "Wallet address is required",
        Field::Amount => "Amount is required",
        Field::ScheduleDate => "Pick an execution date",
    };
    message.to_string()
}

/// Format check for a populated recipient field.
///
/// Returns `None` when the value is acceptable. Fields with more specific
/// conventions (BIC, IBAN, routing number) are checked by field; the rest by
/// semantic kind.
#[must_use]
pub fn format_error(field: Field, kind: FieldKind, recipient: &RecipientDetails) -> Option<String> {
    let value = string_value(field, recipient)?;
    let value = value.trim();

    match field {
        Field::SwiftCode => {
            let ok = (value.len() == 8 || value.len() == 11)
                && value.chars().all(|c| c.is_ascii_alphanumeric());
            (!ok).then(|| "Enter a valid SWIFT/BIC code (8 or 11 characters)".to_string())
        }
        Field::Iban => {
            let mut chars = value.chars();
            let country_prefix = chars.by_ref().take(2).all(|c| c.is_ascii_alphabetic());
            let ok = (15..=34).contains(&value.len())
                && country_prefix
                && value.chars().all(|c| c.is_ascii_alphanumeric());
            (!ok).then(|| "Enter a valid IBAN".to_string())
        }
        Field::RoutingNumber => {
            let ok = value.len() == 9 && value.chars().all(|c| c.is_ascii_digit());
            (!ok).then(|| "Enter a 9-digit routing number".to_string())
        }
        _ => kind_error(kind, value),
    }
}

fn kind_error(kind: FieldKind, value: &str) -> Option<String> {
    match kind {
        FieldKind::Text => None,
        FieldKind::Phone => {
            let digits: String = value
                .chars()
                .filter(|c| !matches!(c, ' ' | '-' | '(' | ')'))
                .skip_while(|c| *c == '+')
                .collect();
            let ok = (7..=15).contains(&digits.chars().count())
                && digits.chars().all(|c| c.is_ascii_digit());
            (!ok).then(|| "Enter a valid phone number".to_string())
        }
        FieldKind::AccountNumber => {
            let ok = (6..=20).contains(&value.len())
                && value.chars().all(|c| c.is_ascii_alphanumeric());
            (!ok).then(|| "Enter a valid account number".to_string())
        }
        FieldKind::WalletAddress => {
            let ok = (25..=64).contains(&value.len())
                && value.chars().all(|c| c.is_ascii_alphanumeric());
            (!ok).then(|| "Enter a valid wallet address".to_string())
        }
        FieldKind::Email => {
            let ok = value.split_once('@').is_some_and(|(local, domain)| {
                !local.is_empty() && domain.contains('.') && !domain.starts_with('.')
            });
            (!ok).then(|| "Enter a valid email address".to_string())
        }
    }
}

fn string_value(field: Field, recipient: &RecipientDetails) -> Option<&str> {
    match field {
        Field::InternalHandle => recipient.internal_handle.as_deref(),
        Field::RecipientName => recipient.recipient_name.as_deref(),
        Field::AccountNumber => recipient.account_number.as_deref(),
        Field::SwiftCode => recipient.swift_code.as_deref(),
        Field::Iban => recipient.iban.as_deref(),
        Field::RoutingNumber => recipient.routing_number.as_deref(),
        Field::Phone => recipient.phone.as_deref(),
        Field::Email => recipient.email.as_deref(),
        Field::WalletAddress => recipient.wallet_address.as_deref(),
        _ => None,
    }
}
