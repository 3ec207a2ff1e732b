//! Pricing
//!
//! All amounts are held in minor units (centavos) as `u64`. Conversion to [`Money`] happens only
//! at the edges, when an amount has to be shown to a person.

use rust_decimal::{Decimal, RoundingStrategy, prelude::ToPrimitive};
use rusty_money::{Money, iso};
use thiserror::Error;

/// Errors that can occur while calculating prices.
#[derive(Debug, Error, PartialEq, Eq)]
pub enum PricingError {
    /// Discount percentages must be strictly between 0 and 100.
    #[error("discount percentage must be greater than 0 and less than 100")]
    PercentOutOfRange,

    /// The calculation could not be represented in minor units.
    #[error("price calculation overflowed")]
    Overflow,
}

/// Format an amount of centavos as Brazilian reais.
pub fn format_brl(minor: u64) -> String {
    Money::from_minor(i64::try_from(minor).unwrap_or(i64::MAX), iso::BRL).to_string()
}

/// Total for a line of `quantity` units at `unit_price`.
pub fn line_total(unit_price: u64, quantity: u32) -> u64 {
    unit_price.saturating_mul(u64::from(quantity))
}

/// Apply a percentage discount to a price, rounding half away from zero.
///
/// # Errors
///
/// - [`PricingError::PercentOutOfRange`]: `percent` is not in `(0, 100)`.
/// - [`PricingError::Overflow`]: the discounted amount cannot be represented.
pub fn discounted_price(price: u64, percent: Decimal) -> Result<u64, PricingError> {
    if percent <= Decimal::ZERO || percent >= Decimal::ONE_HUNDRED {
        return Err(PricingError::PercentOutOfRange);
    }

    let remaining = (Decimal::ONE_HUNDRED - percent) / Decimal::ONE_HUNDRED;

    Decimal::from(price)
        .checked_mul(remaining)
        .ok_or(PricingError::Overflow)?
        .round_dp_with_strategy(0, RoundingStrategy::MidpointAwayFromZero)
        .to_u64()
        .ok_or(PricingError::Overflow)
}
