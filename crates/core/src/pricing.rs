//! Prices & Totals

use rust_decimal::{
    Decimal, RoundingStrategy,
    prelude::{FromPrimitive, ToPrimitive},
};
use rusty_money::{Money, MoneyError, iso::Currency};
use thiserror::Error;

use crate::selection::SelectionEntry;

/// Errors that can occur while deriving cart totals.
#[derive(Debug, Error, PartialEq)]
pub enum TotalsError {
    /// A line amount or sum did not fit in minor units.
    #[error("amount overflowed while calculating totals")]
    Overflow,

    /// A decimal amount could not be represented in the currency's minor units.
    #[error("amount {0} cannot be represented in minor units")]
    Unrepresentable(Decimal),

    /// Wrapped money arithmetic or currency mismatch error.
    #[error(transparent)]
    Money(#[from] MoneyError),
}

/// Sales tax rate applied to the selected subtotal.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct TaxRate(Decimal);

impl TaxRate {
    /// Build a tax rate from a fraction, e.g. `0.12` for 12%.
    pub const fn from_fraction(rate: Decimal) -> Self {
        Self(rate)
    }

    /// The rate as a fraction.
    pub const fn fraction(self) -> Decimal {
        self.0
    }

    /// Tax owed on an amount, rounded to the minor unit.
    ///
    /// # Errors
    ///
    /// Returns [`TotalsError::Overflow`] if the product does not fit in minor units.
    pub fn apply(
        self,
        amount: &Money<'static, Currency>,
    ) -> Result<Money<'static, Currency>, TotalsError> {
        let Some(minor) = Decimal::from_i64(amount.to_minor_units()) else {
            return Err(TotalsError::Overflow);
        };

        let taxed = minor
            .checked_mul(self.0)
            .ok_or(TotalsError::Overflow)?
            .round_dp_with_strategy(0, RoundingStrategy::MidpointAwayFromZero)
            .to_i64()
            .ok_or(TotalsError::Overflow)?;

        Ok(Money::from_minor(taxed, amount.currency()))
    }
}

impl Default for TaxRate {
    fn default() -> Self {
        Self(Decimal::new(12, 2))
    }
}

/// Totals derived from the selection mapping.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Totals {
    /// Sum of unit price times quantity over every selected entry.
    pub subtotal: Money<'static, Currency>,

    /// Tax on the subtotal.
    pub tax: Money<'static, Currency>,

    /// Subtotal plus tax.
    pub total: Money<'static, Currency>,
}

impl Totals {
    /// Zero totals in the given currency.
    pub fn zero(currency: &'static Currency) -> Self {
        let zero = Money::from_minor(0, currency);

        Self {
            subtotal: zero,
            tax: zero,
            total: zero,
        }
    }

    /// Derive totals from a set of selection entries.
    ///
    /// # Errors
    ///
    /// Returns an error if an entry's currency differs from `currency` or the
    /// arithmetic overflows.
    pub fn derive<'e>(
        entries: impl IntoIterator<Item = &'e SelectionEntry>,
        rate: TaxRate,
        currency: &'static Currency,
    ) -> Result<Self, TotalsError> {
        let subtotal = entries.into_iter().try_fold(
            Money::from_minor(0, currency),
            |acc, entry| -> Result<_, TotalsError> {
                Ok(acc.add(line_total(&entry.unit_price, entry.quantity)?)?)
            },
        )?;

        let tax = rate.apply(&subtotal)?;
        let total = subtotal.add(tax)?;

        Ok(Self {
            subtotal,
            tax,
            total,
        })
    }
}

/// Unit price multiplied by quantity.
///
/// # Errors
///
/// Returns [`TotalsError::Overflow`] if the result does not fit in minor units.
pub fn line_total(
    unit_price: &Money<'static, Currency>,
    quantity: u32,
) -> Result<Money<'static, Currency>, TotalsError> {
    let minor = unit_price
        .to_minor_units()
        .checked_mul(i64::from(quantity))
        .ok_or(TotalsError::Overflow)?;

    Ok(Money::from_minor(minor, unit_price.currency()))
}

/// Convert a decimal major-unit amount (e.g. `10.50`) into money.
///
/// Amounts with more precision than the currency allows are rounded, midpoint
/// away from zero.
///
/// # Errors
///
/// Returns [`TotalsError::Unrepresentable`] if the amount overflows minor units.
pub fn money_from_decimal(
    amount: Decimal,
    currency: &'static Currency,
) -> Result<Money<'static, Currency>, TotalsError> {
    let scale = Decimal::from(10_i64.pow(currency.exponent));

    let minor = amount
        .checked_mul(scale)
        .map(|scaled| scaled.round_dp_with_strategy(0, RoundingStrategy::MidpointAwayFromZero))
        .and_then(|rounded| rounded.to_i64())
        .ok_or(TotalsError::Unrepresentable(amount))?;

    Ok(Money::from_minor(minor, currency))
}

#[cfg(test)]
mod tests {
    use rusty_money::iso::{PHP, USD};
    use testresult::TestResult;

    use crate::ids::{LineItemId, ProductId};

    use super::*;

    fn entry(id: u64, price_minor: i64, quantity: u32) -> SelectionEntry {
        SelectionEntry {
            line_item_id: LineItemId::new(id),
            product_id: ProductId::new(id * 10),
            quantity,
            unit_price: Money::from_minor(price_minor, PHP),
        }
    }

    #[test]
    fn single_entry_totals() -> TestResult {
        let entries = [entry(1, 10_00, 2)];

        let totals = Totals::derive(&entries, TaxRate::default(), PHP)?;

        assert_eq!(totals.subtotal, Money::from_minor(20_00, PHP));
        assert_eq!(totals.tax, Money::from_minor(2_40, PHP));
        assert_eq!(totals.total, Money::from_minor(22_40, PHP));

        Ok(())
    }

    #[test]
    fn totals_are_independent_of_entry_order() -> TestResult {
        let forward = [entry(1, 3_33, 3), entry(2, 12_50, 1), entry(3, 99, 7)];
        let reversed = [entry(3, 99, 7), entry(2, 12_50, 1), entry(1, 3_33, 3)];

        assert_eq!(
            Totals::derive(&forward, TaxRate::default(), PHP)?,
            Totals::derive(&reversed, TaxRate::default(), PHP)?
        );

        Ok(())
    }

    #[test]
    fn empty_selection_is_zero() -> TestResult {
        let totals = Totals::derive(std::iter::empty(), TaxRate::default(), PHP)?;

        assert_eq!(totals, Totals::zero(PHP));

        Ok(())
    }

    #[test]
    fn tax_rounds_half_away_from_zero() -> TestResult {
        // 0.12 * 1_25 = 15.0, 0.12 * 1_29 = 15.48
        let rate = TaxRate::default();

        assert_eq!(
            rate.apply(&Money::from_minor(1_25, PHP))?,
            Money::from_minor(15, PHP)
        );
        assert_eq!(
            rate.apply(&Money::from_minor(1_29, PHP))?,
            Money::from_minor(15, PHP)
        );
        assert_eq!(
            TaxRate::from_fraction(Decimal::new(5, 1)).apply(&Money::from_minor(1, PHP))?,
            Money::from_minor(1, PHP)
        );

        Ok(())
    }

    #[test]
    fn mismatched_currency_is_rejected() {
        let mut foreign = entry(1, 10_00, 1);
        foreign.unit_price = Money::from_minor(10_00, USD);

        let result = Totals::derive(&[foreign], TaxRate::default(), PHP);

        assert!(
            matches!(result, Err(TotalsError::Money(_))),
            "expected currency mismatch, got {result:?}"
        );
    }

    #[test]
    fn line_total_overflow_is_reported() {
        let price = Money::from_minor(i64::MAX, PHP);

        assert_eq!(line_total(&price, 2), Err(TotalsError::Overflow));
    }

    #[test]
    fn money_from_decimal_scales_to_minor_units() -> TestResult {
        let amount: Decimal = "10.505".parse()?;

        assert_eq!(
            money_from_decimal(amount, PHP)?,
            Money::from_minor(10_51, PHP)
        );

        Ok(())
    }
}
