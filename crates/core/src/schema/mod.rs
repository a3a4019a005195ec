//! Declarative field requirements per payout method and bank rail.
//!
//! Pure data, no behavior: the validator and controller both read these tables
//! so that branch logic lives in exactly one place. Adding a payout method or
//! rail means adding one table row, not touching control flow.

use serde::{Deserialize, Serialize};
use std::fmt;

use crate::transfer::{BankRail, PayoutMethod, RecipientDetails, TransferDraft};

/// Every form control the wizard can point an error at.
///
/// Error messages are field-scoped, not step-scoped, so the UI can highlight
/// the exact offending control.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub enum Field {
    /// Funding account selector (step 1).
    SourceAccount,
    /// Payout method selector (step 1).
    PayoutMethod,
    /// Bank rail selector.
    BankRail,
    /// Internal account handle input.
    InternalHandle,
    /// Recipient name input.
    RecipientName,
    /// Bank account number input.
    AccountNumber,
    /// SWIFT/BIC code input.
    SwiftCode,
    /// IBAN input.
    Iban,
    /// Routing number input.
    RoutingNumber,
    /// Country selector (mobile money).
    Country,
    /// Mobile network selector.
    MobileNetwork,
    /// Phone number input.
    Phone,
    /// Wallet provider selector.
    WalletProvider,
    /// Email input.
    Email,
    /// Crypto wallet address input.
    WalletAddress,
    /// Amount input (step 3).
    Amount,
    /// Scheduled execution date input (step 3).
    ScheduleDate,
}

impl Field {
    /// The camelCase key the dashboard uses for this control.
    #[must_use]
    pub fn wire_name(&self) -> &'static str {
        match self {
            Self::SourceAccount => "sourceAccount",
            Self::PayoutMethod => "payoutMethod",
            Self::BankRail => "bankRail",
            Self::InternalHandle => "internalHandle",
            Self::RecipientName => "recipientName",
            Self::AccountNumber => "accountNumber",
            Self::SwiftCode => "swiftCode",
            Self::Iban => "iban",
            Self::RoutingNumber => "routingNumber",
            Self::Country => "country",
            Self::MobileNetwork => "mobileNetwork",
            Self::Phone => "phone",
            Self::WalletProvider => "walletProvider",
            Self::Email => "email",
            Self::WalletAddress => "walletAddress",
            Self::Amount => "amount",
            Self::ScheduleDate => "scheduleDate",
        }
    }
}

impl fmt::Display for Field {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.wire_name())
    }
}

/// Semantic type of a field, driving its format check.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum FieldKind {
    /// Free text or a selection.
    Text,
    /// Phone number.
    Phone,
    /// Bank account number, IBAN, BIC, or routing number.
    AccountNumber,
    /// Cryptocurrency wallet address.
    WalletAddress,
    /// Email address.
    Email,
}

/// One row of the registry: a field, its semantic type, and whether the
/// selected branch requires it.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct FieldSpec {
    /// The form control.
    pub field: Field,
    /// Semantic type for format checks.
    pub kind: FieldKind,
    /// Whether the branch requires a value.
    pub required: bool,
}

const fn spec(field: Field, kind: FieldKind, required: bool) -> FieldSpec {
    FieldSpec {
        field,
        kind,
        required,
    }
}

const INTERNAL_FIELDS: &[FieldSpec] =
    &[spec(Field::InternalHandle, FieldKind::Text, true)];

const BANK_BASE_FIELDS: &[FieldSpec] = &[
    spec(Field::RecipientName, FieldKind::Text, true),
    spec(Field::AccountNumber, FieldKind::AccountNumber, true),
];

// SEPA replaces the plain account number with an IBAN; the other rails extend
// the base row set.
const SEPA_FIELDS: &[FieldSpec] = &[
    spec(Field::RecipientName, FieldKind::Text, true),
    spec(Field::Iban, FieldKind::AccountNumber, true),
];

const SWIFT_EXTRAS: &[FieldSpec] = &[spec(Field::SwiftCode, FieldKind::AccountNumber, true)];

const ROUTING_EXTRAS: &[FieldSpec] =
    &[spec(Field::RoutingNumber, FieldKind::AccountNumber, true)];

const MOBILE_MONEY_FIELDS: &[FieldSpec] = &[
    spec(Field::Country, FieldKind::Text, true),
    spec(Field::MobileNetwork, FieldKind::Text, true),
    spec(Field::Phone, FieldKind::Phone, true),
];

const CRYPTO_FIELDS: &[FieldSpec] =
    &[spec(Field::WalletAddress, FieldKind::WalletAddress, true)];

// Email vs phone is decided by the selected provider's contact kind; the
// validator applies that branch rule on top of these rows.
const DIGITAL_WALLET_FIELDS: &[FieldSpec] = &[
    spec(Field::WalletProvider, FieldKind::Text, true),
    spec(Field::Email, FieldKind::Email, false),
    spec(Field::Phone, FieldKind::Phone, false),
];

/// Recipient field rows for the given payout method and, for bank transfers,
/// the selected rail.
#[must_use]
pub fn recipient_fields(method: PayoutMethod, rail: Option<BankRail>) -> Vec<FieldSpec> {
    match method {
        PayoutMethod::Internal => INTERNAL_FIELDS.to_vec(),
        PayoutMethod::Bank => match rail {
            Some(BankRail::Sepa) => SEPA_FIELDS.to_vec(),
            Some(BankRail::Swift) => [BANK_BASE_FIELDS, SWIFT_EXTRAS].concat(),
            Some(BankRail::Ach | BankRail::Fedwire) => [BANK_BASE_FIELDS, ROUTING_EXTRAS].concat(),
            _ => BANK_BASE_FIELDS.to_vec(),
        },
        PayoutMethod::MobileMoney => MOBILE_MONEY_FIELDS.to_vec(),
        PayoutMethod::Crypto => CRYPTO_FIELDS.to_vec(),
        PayoutMethod::DigitalWallet => DIGITAL_WALLET_FIELDS.to_vec(),
    }
}

/// Every recipient field any rail or sub-type of the given method can use.
///
/// The controller keeps exactly these on a method switch and clears the rest.
#[must_use]
pub fn owned_fields(method: PayoutMethod) -> Vec<Field> {
    match method {
        PayoutMethod::Internal => vec![Field::InternalHandle],
        PayoutMethod::Bank => vec![
            Field::RecipientName,
            Field::AccountNumber,
            Field::SwiftCode,
            Field::Iban,
            Field::RoutingNumber,
        ],
        PayoutMethod::MobileMoney => vec![Field::Country, Field::MobileNetwork, Field::Phone],
        PayoutMethod::Crypto => vec![Field::WalletAddress],
        PayoutMethod::DigitalWallet => vec![Field::WalletProvider, Field::Email, Field::Phone],
    }
}

/// All recipient fields across every payout method.
pub const RECIPIENT_FIELDS: &[Field] = &[
    Field::InternalHandle,
    Field::RecipientName,
    Field::AccountNumber,
    Field::SwiftCode,
    Field::Iban,
    Field::RoutingNumber,
    Field::Country,
    Field::MobileNetwork,
    Field::Phone,
    Field::WalletProvider,
    Field::Email,
    Field::WalletAddress,
];

impl RecipientDetails {
    /// Returns true if the given recipient field holds a non-empty value.
    ///
    /// Non-recipient fields are never "set" here; they are checked directly by
    /// the validator.
    #[must_use]
    pub fn is_set(&self, field: Field) -> bool {
        fn filled(value: Option<&String>) -> bool {
            value.is_some_and(|v| !v.trim().is_empty())
        }

        match field {
            Field::InternalHandle => filled(self.internal_handle.as_ref()),
            Field::RecipientName => filled(self.recipient_name.as_ref()),
            Field::AccountNumber => filled(self.account_number.as_ref()),
            Field::SwiftCode => filled(self.swift_code.as_ref()),
            Field::Iban => filled(self.iban.as_ref()),
            Field::RoutingNumber => filled(self.routing_number.as_ref()),
            Field::Country => self.country.is_some(),
            Field::MobileNetwork => self.mobile_network.is_some(),
            Field::Phone => filled(self.phone.as_ref()),
            Field::WalletProvider => self.wallet_provider.is_some(),
            Field::Email => filled(self.email.as_ref()),
            Field::WalletAddress => filled(self.wallet_address.as_ref()),
            _ => false,
        }
    }

    /// Clears the given recipient field. Non-recipient fields are untouched.
    pub fn clear(&mut self, field: Field) {
        match field {
            Field::InternalHandle => self.internal_handle = None,
            Field::RecipientName => self.recipient_name = None,
            Field::AccountNumber => self.account_number = None,
            Field::SwiftCode => self.swift_code = None,
            Field::Iban => self.iban = None,
            Field::RoutingNumber => self.routing_number = None,
            Field::Country => self.country = None,
            Field::MobileNetwork => self.mobile_network = None,
            Field::Phone => self.phone = None,
            Field::WalletProvider => self.wallet_provider = None,
            Field::Email => self.email = None,
            Field::WalletAddress => self.wallet_address = None,
            _ => {}
        }
    }
}

impl TransferDraft {
    /// Clears every recipient field the given method's schema does not own.
    ///
    /// Called on payout method selection so stale cross-branch data can never
    /// reach submission.
    pub fn retain_recipient_fields(&mut self, method: PayoutMethod) {
        let keep = owned_fields(method);
        for field in RECIPIENT_FIELDS {
            if !keep.contains(field) {
                self.recipient.clear(*field);
            }
        }
    }
}
