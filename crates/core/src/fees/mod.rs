//! Fee calculation for outbound transfers.
//!
//! Rates are flat percentages keyed by payout method, with SWIFT priced above
//! the other bank rails. All monetary results are rounded to the currency's
//! precision with banker's rounding before display or submission.

use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

use crate::transfer::{BankRail, PayoutMethod};
use paywise_shared::config::FeesConfig;
use paywise_shared::types::Currency;

/// Fee and total for a prospective transfer, already rounded.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct FeeBreakdown {
    /// Fee charged on top of the amount.
    pub fee: Decimal,
    /// Amount plus fee.
    pub total: Decimal,
}

/// Percentage rates applied per payout method.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct FeeSchedule {
    /// Rate for bank (non-SWIFT), mobile money, and digital wallet payouts.
    pub default_rate: Decimal,
    /// Rate for bank payouts over the SWIFT rail.
    pub swift_rate: Decimal,
    /// Rate for crypto payouts.
    pub crypto_rate: Decimal,
}

impl Default for FeeSchedule {
    fn default() -> Self {
        Self::from(&FeesConfig::default())
    }
}

impl From<&FeesConfig> for FeeSchedule {
    fn from(config: &FeesConfig) -> Self {
        Self {
            default_rate: config.default_rate,
            swift_rate: config.swift_rate,
            crypto_rate: config.crypto_rate,
        }
    }
}

impl FeeSchedule {
    /// The rate applied to a payout method, with the rail refining bank
    /// payouts. The rail is ignored for every other method.
    #[must_use]
    pub fn rate(&self, method: PayoutMethod, rail: Option<BankRail>) -> Decimal {
        match method {
            PayoutMethod::Internal => Decimal::ZERO,
            PayoutMethod::Crypto => self.crypto_rate,
            PayoutMethod::Bank if rail == Some(BankRail::Swift) => self.swift_rate,
            PayoutMethod::Bank | PayoutMethod::MobileMoney | PayoutMethod::DigitalWallet => {
                self.default_rate
            }
        }
    }

    /// Computes the fee breakdown for an amount in the given currency.
    ///
    /// Fee and total are independently rounded to the currency's precision so
    /// the displayed figures always satisfy `total = amount + fee`.
    #[must_use]
    pub fn compute(
        &self,
        method: PayoutMethod,
        rail: Option<BankRail>,
        amount: Decimal,
        currency: Currency,
    ) -> FeeBreakdown {
        let fee = currency.round(amount * self.rate(method, rail));
        let total = currency.round(amount + fee);
        FeeBreakdown { fee, total }
    }
}

#[cfg(test)]
mod props;

#[cfg(test)]
mod tests {
    use super::*;
    use rstest::rstest;
    use rust_decimal_macros::dec;

    #[test]
    fn test_internal_transfers_are_free() {
        let breakdown = FeeSchedule::default().compute(
            PayoutMethod::Internal,
            None,
            dec!(500),
            Currency::Usd,
        );
        assert_eq!(breakdown.fee, dec!(0.00));
        assert_eq!(breakdown.total, dec!(500.00));
    }

    #[test]
    fn test_crypto_fee_one_percent() {
        let breakdown =
            FeeSchedule::default().compute(PayoutMethod::Crypto, None, dec!(1000), Currency::Usd);
        assert_eq!(breakdown.fee, dec!(10.00));
        assert_eq!(breakdown.total, dec!(1010.00));
    }

    #[rstest]
    #[case::local(BankRail::Local, dec!(15.00))]
    #[case::sepa(BankRail::Sepa, dec!(15.00))]
    #[case::ach(BankRail::Ach, dec!(15.00))]
    #[case::swift(BankRail::Swift, dec!(25.00))]
    fn test_bank_rail_rates(#[case] rail: BankRail, #[case] fee: Decimal) {
        let breakdown = FeeSchedule::default().compute(
            PayoutMethod::Bank,
            Some(rail),
            dec!(1000),
            Currency::Usd,
        );
        assert_eq!(breakdown.fee, fee);
    }

    #[test]
    fn test_swift_priced_above_default() {
        let schedule = FeeSchedule::default();
        assert!(schedule.swift_rate > schedule.default_rate);
    }

    #[test]
    fn test_rail_ignored_outside_bank_method() {
        let schedule = FeeSchedule::default();
        let with_rail =
            schedule.compute(PayoutMethod::Crypto, Some(BankRail::Swift), dec!(100), Currency::Usd);
        let without = schedule.compute(PayoutMethod::Crypto, None, dec!(100), Currency::Usd);
        assert_eq!(with_rail, without);
    }

    #[test]
    fn test_fee_uses_bankers_rounding() {
        // 163 * 1.5% = 2.445, midpoint at 2 decimals rounds to even: 2.44
        let breakdown = FeeSchedule::default().compute(
            PayoutMethod::MobileMoney,
            None,
            dec!(163),
            Currency::Kes,
        );
        assert_eq!(breakdown.fee, dec!(2.44));
        assert_eq!(breakdown.total, dec!(165.44));

        // 165 * 1.5% = 2.475, midpoint rounds to even: 2.48
        let breakdown = FeeSchedule::default().compute(
            PayoutMethod::MobileMoney,
            None,
            dec!(165),
            Currency::Kes,
        );
        assert_eq!(breakdown.fee, dec!(2.48));
    }
}
