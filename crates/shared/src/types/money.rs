//! Money type with decimal precision and currency.
//!
//! CRITICAL: Never use floating-point for money calculations.
//! This type wraps `rust_decimal::Decimal` for arbitrary precision.

use rust_decimal::{Decimal, RoundingStrategy};
use serde::{Deserialize, Serialize};

/// Represents a monetary amount with currency.
///
/// Uses `Decimal` internally to avoid floating-point precision errors.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct Money {
    /// The amount in major currency units (e.g., dollars, not cents).
    pub amount: Decimal,
    /// ISO 4217 currency code (e.g., "USD", "KES").
    pub currency: Currency,
}

/// ISO 4217 currency codes supported for outbound transfers.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "UPPERCASE")]
pub enum Currency {
    /// US Dollar
    Usd,
    /// Euro
    Eur,
    /// British Pound
    Gbp,
    /// Nigerian Naira
    Ngn,
    /// Kenyan Shilling
    Kes,
    /// Ghanaian Cedi
    Ghs,
}

impl Currency {
    /// Number of decimal places this currency is quoted in.
    ///
    /// All fiat currencies currently in scope use 2 places.
    #[must_use]
    pub const fn decimal_places(&self) -> u32 {
        match self {
            Self::Usd | Self::Eur | Self::Gbp | Self::Ngn | Self::Kes | Self::Ghs => 2,
        }
    }

    /// Rounds an amount to this currency's precision.
    ///
    /// Uses banker's rounding (round half to even) to minimize cumulative errors.
    #[must_use]
    pub fn round(&self, amount: Decimal) -> Decimal {
        amount.round_dp_with_strategy(
            self.decimal_places(),
            RoundingStrategy::MidpointNearestEven,
        )
    }
}

impl Money {
    /// Creates a new Money instance.
    #[must_use]
    pub const fn new(amount: Decimal, currency: Currency) -> Self {
        Self { amount, currency }
    }

    /// Creates a zero amount in the specified currency.
    #[must_use]
    pub fn zero(currency: Currency) -> Self {
        Self {
            amount: Decimal::ZERO,
            currency,
        }
    }

    /// Returns true if the amount is zero.
    #[must_use]
    pub fn is_zero(&self) -> bool {
        self.amount.is_zero()
    }

    /// Returns true if the amount is negative.
    #[must_use]
    pub fn is_negative(&self) -> bool {
        self.amount.is_sign_negative()
    }

    /// Returns this amount rounded to the currency's precision.
    #[must_use]
    pub fn rounded(&self) -> Self {
        Self {
            amount: self.currency.round(self.amount),
            currency: self.currency,
        }
    }
}

impl std::fmt::Display for Currency {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Usd => write!(f, "USD"),
            Self::Eur => write!(f, "EUR"),
            Self::Gbp => write!(f, "GBP"),
            Self::Ngn => write!(f, "NGN"),
            Self::Kes => write!(f, "KES"),
            Self::Ghs => write!(f, "GHS"),
        }
    }
}

impl std::str::FromStr for Currency {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_uppercase().as_str() {
            "USD" => Ok(Self::Usd),
            "EUR" => Ok(Self::Eur),
            "GBP" => Ok(Self::Gbp),
            "NGN" => Ok(Self::Ngn),
            "KES" => Ok(Self::Kes),
            "GHS" => Ok(Self::Ghs),
            _ => Err(format!("Unknown currency: {s}")),
        }
    }
}
