//! Domain types for the outbound transfer wizard.
//!
//! Payout methods, bank rails, and wallet providers are tagged variants so the
//! validator and fee calculator can be written as exhaustive matches: adding a
//! method is a compiler-enforced, single-point change.

use chrono::NaiveDate;
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use std::fmt;

use paywise_shared::types::{Currency, SourceAccountId};

/// Top-level channel for an outbound transfer.
///
/// The five methods are mutually exclusive; each carries its own recipient
/// field set, validation rules, and fee formula.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum PayoutMethod {
    /// Platform-internal transfer to another Paywise account.
    Internal,
    /// Bank transfer over an interbank rail.
    Bank,
    /// Mobile money wallet (carrier-operated).
    MobileMoney,
    /// Cryptocurrency wallet address.
    Crypto,
    /// Consumer digital wallet (PayPal and friends).
    DigitalWallet,
}

impl PayoutMethod {
    /// Returns the string representation of the method.
    #[must_use]
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Internal => "internal",
            Self::Bank => "bank",
            Self::MobileMoney => "mobile_money",
            Self::Crypto => "crypto",
            Self::DigitalWallet => "digital_wallet",
        }
    }

    /// Parses a method from a string.
    pub fn parse(s: &str) -> Option<Self> {
        match s.to_lowercase().as_str() {
            "internal" => Some(Self::Internal),
            "bank" => Some(Self::Bank),
            "mobile_money" => Some(Self::MobileMoney),
            "crypto" => Some(Self::Crypto),
            "digital_wallet" => Some(Self::DigitalWallet),
            _ => None,
        }
    }

    /// All payout methods, in display order.
    pub const ALL: [Self; 5] = [
        Self::Internal,
        Self::Bank,
        Self::MobileMoney,
        Self::Crypto,
        Self::DigitalWallet,
    ];
}

impl fmt::Display for PayoutMethod {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

/// Interbank network used for a bank transfer.
///
/// Only meaningful when the payout method is [`PayoutMethod::Bank`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum BankRail {
    /// Domestic transfer inside the recipient bank's country.
    Local,
    /// International SWIFT wire.
    Swift,
    /// Single Euro Payments Area credit transfer.
    Sepa,
    /// US Automated Clearing House.
    Ach,
    /// US Fedwire real-time gross settlement.
    Fedwire,
    /// UK Faster Payments.
    FasterPayments,
    /// Brazilian Pix.
    Pix,
    /// Mexican SPEI.
    Spei,
    /// Canadian EFT.
    Eft,
    /// Canadian Interac e-Transfer.
    Interac,
}

impl BankRail {
    /// Returns the string representation of the rail.
    #[must_use]
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Local => "local",
            Self::Swift => "swift",
            Self::Sepa => "sepa",
            Self::Ach => "ach",
            Self::Fedwire => "fedwire",
            Self::FasterPayments => "faster_payments",
            Self::Pix => "pix",
            Self::Spei => "spei",
            Self::Eft => "eft",
            Self::Interac => "interac",
        }
    }

    /// Parses a rail from a string.
    pub fn parse(s: &str) -> Option<Self> {
        match s.to_lowercase().as_str() {
            "local" => Some(Self::Local),
            "swift" => Some(Self::Swift),
            "sepa" => Some(Self::Sepa),
            "ach" => Some(Self::Ach),
            "fedwire" => Some(Self::Fedwire),
            "faster_payments" => Some(Self::FasterPayments),
            "pix" => Some(Self::Pix),
            "spei" => Some(Self::Spei),
            "eft" => Some(Self::Eft),
            "interac" => Some(Self::Interac),
            _ => None,
        }
    }

    /// All bank rails, in display order.
    pub const ALL: [Self; 10] = [
        Self::Local,
        Self::Swift,
        Self::Sepa,
        Self::Ach,
        Self::Fedwire,
        Self::FasterPayments,
        Self::Pix,
        Self::Spei,
        Self::Eft,
        Self::Interac,
    ];
}

impl fmt::Display for BankRail {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

/// Recipient country for mobile money transfers.
///
/// Filters which mobile networks can be selected.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Country {
    /// Kenya
    Kenya,
    /// Tanzania
    Tanzania,
    /// Uganda
    Uganda,
    /// Nigeria
    Nigeria,
    /// Ghana
    Ghana,
}

impl Country {
    /// Returns the string representation of the country.
    #[must_use]
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Kenya => "kenya",
            Self::Tanzania => "tanzania",
            Self::Uganda => "uganda",
            Self::Nigeria => "nigeria",
            Self::Ghana => "ghana",
        }
    }
}

impl fmt::Display for Country {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

/// Carrier-operated mobile money network.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum MobileNetwork {
    /// Safaricom M-Pesa.
    Mpesa,
    /// Airtel Money.
    AirtelMoney,
    /// MTN Mobile Money.
    MtnMomo,
    /// Tigo Pesa.
    TigoPesa,
}

impl MobileNetwork {
    /// Returns the string representation of the network.
    #[must_use]
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Mpesa => "mpesa",
            Self::AirtelMoney => "airtel_money",
            Self::MtnMomo => "mtn_momo",
            Self::TigoPesa => "tigo_pesa",
        }
    }

    /// Returns true if this network operates in the given country.
    ///
    /// Changing country upstream must clear a network that fails this check.
    #[must_use]
    pub fn operates_in(&self, country: Country) -> bool {
        matches!(
            (self, country),
            (Self::Mpesa, Country::Kenya | Country::Tanzania)
                | (
                    Self::AirtelMoney,
                    Country::Kenya | Country::Tanzania | Country::Uganda | Country::Nigeria
                )
                | (
                    Self::MtnMomo,
                    Country::Ghana | Country::Uganda | Country::Nigeria
                )
                | (Self::TigoPesa, Country::Tanzania | Country::Ghana)
        )
    }

    /// Networks available in the given country, in display order.
    #[must_use]
    pub fn available_in(country: Country) -> Vec<Self> {
        [Self::Mpesa, Self::AirtelMoney, Self::MtnMomo, Self::TigoPesa]
            .into_iter()
            .filter(|n| n.operates_in(country))
            .collect()
    }
}

impl fmt::Display for MobileNetwork {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

/// Consumer digital wallet provider.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum WalletProvider {
    /// PayPal (addressed by email).
    Paypal,
    /// Apple Pay (addressed by phone number).
    ApplePay,
    /// Google Pay (addressed by phone number).
    GooglePay,
    /// Venmo (addressed by phone number).
    Venmo,
}

/// How a digital wallet recipient is addressed.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ContactKind {
    /// Recipient is addressed by email.
    Email,
    /// Recipient is addressed by phone number.
    Phone,
}

impl WalletProvider {
    /// Returns the string representation of the provider.
    #[must_use]
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Paypal => "paypal",
            Self::ApplePay => "apple_pay",
            Self::GooglePay => "google_pay",
            Self::Venmo => "venmo",
        }
    }

    /// The contact detail this provider requires for the recipient.
    #[must_use]
    pub const fn required_contact(&self) -> ContactKind {
        match self {
            Self::Paypal => ContactKind::Email,
            Self::ApplePay | Self::GooglePay | Self::Venmo => ContactKind::Phone,
        }
    }
}

impl fmt::Display for WalletProvider {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

/// When the transfer should execute.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ScheduleMode {
    /// Execute immediately on submission.
    Now,
    /// Execute on a future calendar date.
    Scheduled,
}

/// Execution schedule for the transfer.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct Schedule {
    /// Immediate or scheduled execution.
    pub mode: ScheduleMode,
    /// Execution date; required when `mode` is `Scheduled`.
    pub date: Option<NaiveDate>,
}

impl Default for Schedule {
    fn default() -> Self {
        Self {
            mode: ScheduleMode::Now,
            date: None,
        }
    }
}

/// Method-specific recipient details.
///
/// All fields are optional at the type level; the validator decides which are
/// required for the selected payout method and rail. Keeping every branch's
/// fields side by side lets navigation preserve data, while
/// [`TransferDraft::retain_recipient_fields`] clears cross-branch leftovers on
/// method change.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RecipientDetails {
    /// Platform account handle for internal transfers.
    pub internal_handle: Option<String>,
    /// Recipient legal name for bank transfers.
    pub recipient_name: Option<String>,
    /// Plain bank account number.
    pub account_number: Option<String>,
    /// SWIFT/BIC code (SWIFT rail).
    pub swift_code: Option<String>,
    /// IBAN (SEPA rail; replaces the account number).
    pub iban: Option<String>,
    /// Routing number (ACH/Fedwire rails).
    pub routing_number: Option<String>,
    /// Recipient country for mobile money.
    pub country: Option<Country>,
    /// Mobile money network.
    pub mobile_network: Option<MobileNetwork>,
    /// Recipient phone number (mobile money and phone-addressed wallets).
    pub phone: Option<String>,
    /// Digital wallet provider.
    pub wallet_provider: Option<WalletProvider>,
    /// Recipient email (email-addressed wallets).
    pub email: Option<String>,
    /// Destination cryptocurrency wallet address.
    pub wallet_address: Option<String>,
}

/// The single mutable aggregate for the wizard's lifetime.
///
/// Created empty when the wizard mounts, mutated field-by-field through the
/// controller, consumed by the submit adapter on final confirmation.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct TransferDraft {
    /// Funding account chosen in step 1.
    pub source_account: Option<SourceAccountId>,
    /// Selected payout method.
    pub method: Option<PayoutMethod>,
    /// Selected bank rail; meaningful only when `method` is `Bank`.
    pub bank_rail: Option<BankRail>,
    /// Method-specific recipient details.
    pub recipient: RecipientDetails,
    /// Amount exactly as typed (decimal string).
    pub amount: String,
    /// Transfer currency.
    pub currency: Currency,
    /// Optional payment reference.
    pub reference: Option<String>,
    /// Optional free-text description.
    pub description: Option<String>,
    /// Execution schedule.
    pub schedule: Schedule,
}

impl Default for TransferDraft {
    fn default() -> Self {
        Self {
            source_account: None,
            method: None,
            bank_rail: None,
            recipient: RecipientDetails::default(),
            amount: String::new(),
            currency: Currency::Usd,
            reference: None,
            description: None,
            schedule: Schedule::default(),
        }
    }
}

impl TransferDraft {
    /// Parses the amount field as a decimal, if it is well-formed.
    #[must_use]
    pub fn amount_decimal(&self) -> Option<Decimal> {
        self.amount.trim().parse::<Decimal>().ok()
    }
}

/// A funding source account, supplied as a snapshot at wizard start.
///
/// Balances are externally provided and never refreshed by this core.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SourceAccount {
    /// Account identifier.
    pub id: SourceAccountId,
    /// Display name (e.g., "Operating - USD").
    pub name: String,
    /// Account currency.
    pub currency: Currency,
    /// Available balance at snapshot time.
    pub balance: Decimal,
}
