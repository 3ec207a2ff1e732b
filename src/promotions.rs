//! Promotions
//!
//! A promotion is a discounted price bound to a window of calendar days. Windows are inclusive
//! on both ends and are evaluated against the civil date in the store's time zone, never against
//! instants.

use jiff::{Timestamp, civil::Date, tz::TimeZone};
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

use crate::{
    pricing::{PricingError, discounted_price},
    products::Product,
    validation::FieldErrors,
};

/// Today's civil date in the given time zone.
pub fn today_in(time_zone: &TimeZone) -> Date {
    Timestamp::now().to_zoned(time_zone.clone()).date()
}

/// Whether the product's promotion applies on `today`.
///
/// A promotion needs a non-zero promotional price and an end date. The start date is optional.
pub fn is_promotion_active(product: &Product, today: Date) -> bool {
    let Some(promo_price) = product.promo_price else {
        return false;
    };

    let Some(end) = product.promo_end_date else {
        return false;
    };

    if promo_price == 0 {
        return false;
    }

    if product.promo_start_date.is_some_and(|start| today < start) {
        return false;
    }

    today <= end
}

/// Price a customer pays on `today`.
pub fn effective_price(product: &Product, today: Date) -> u64 {
    match product.promo_price {
        Some(promo_price) if is_promotion_active(product, today) => promo_price,
        _ => product.price,
    }
}

/// Promotion fields as set for a single product.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct PromotionWindow {
    /// Discounted price in centavos
    pub promo_price: u64,

    /// First day, or open-ended start
    #[serde(default)]
    pub promo_start_date: Option<Date>,

    /// Last day
    pub promo_end_date: Option<Date>,
}

impl PromotionWindow {
    /// Check the window against the product's base price.
    ///
    /// # Errors
    ///
    /// Returns [`FieldErrors`] when the promotional price is zero or not below `base_price`,
    /// the end date is missing, or the start date falls after the end date.
    pub fn validate(&self, base_price: u64) -> Result<(), FieldErrors> {
        let mut errors = FieldErrors::new();

        if self.promo_price == 0 {
            errors.insert("promo_price", "O preço promocional deve ser maior que zero.");
        } else if self.promo_price >= base_price {
            errors.insert(
                "promo_price",
                "O preço promocional deve ser menor que o preço original.",
            );
        }

        match (self.promo_start_date, self.promo_end_date) {
            (_, None) => errors.insert("promo_end_date", "Data final da promoção é obrigatória."),
            (Some(start), Some(end)) if start > end => errors.insert(
                "promo_start_date",
                "A data inicial deve ser anterior à data final.",
            ),
            _ => {}
        }

        errors.into_result()
    }

    /// Copy the window onto a product.
    pub fn apply_to(&self, product: &mut Product) {
        product.promo_price = Some(self.promo_price);
        product.promo_start_date = self.promo_start_date;
        product.promo_end_date = self.promo_end_date;
    }
}

/// Remove any promotion from a product.
pub fn clear_promotion(product: &mut Product) {
    product.promo_price = None;
    product.promo_start_date = None;
    product.promo_end_date = None;
}

/// Check that `new_price` still sits above the product's stored promotional price.
///
/// # Errors
///
/// Returns [`FieldErrors`] keyed on `price` when the stored promotion would stop being a
/// discount at the new price.
pub fn check_base_price(product: &Product, new_price: u64) -> Result<(), FieldErrors> {
    let mut errors = FieldErrors::new();

    if product
        .promo_price
        .is_some_and(|promo_price| promo_price > 0 && promo_price >= new_price)
    {
        errors.insert(
            "price",
            "O preço deve ser maior que o preço promocional vigente.",
        );
    }

    errors.into_result()
}

/// What a bulk promotion does to one product.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum BulkChange {
    /// Set this window.
    Apply(PromotionWindow),

    /// Remove the product's promotion.
    Clear,

    /// Leave the product untouched: after rounding the price is no discount.
    Skip,
}

/// Promotion applied to every product at once.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct BulkPromotion {
    /// Percentage off the base price; `None` clears every promotion
    pub discount_percent: Option<Decimal>,

    /// First day
    #[serde(default)]
    pub promo_start_date: Option<Date>,

    /// Last day
    #[serde(default)]
    pub promo_end_date: Option<Date>,
}

impl BulkPromotion {
    /// Check the percentage and the dates.
    ///
    /// # Errors
    ///
    /// Returns [`FieldErrors`] when the percentage is outside `(0, 100)`, the end date is
    /// missing, or the start date falls after the end date. A clearing request is always valid.
    pub fn validate(&self) -> Result<(), FieldErrors> {
        let mut errors = FieldErrors::new();

        let Some(percent) = self.discount_percent else {
            return Ok(());
        };

        if percent <= Decimal::ZERO || percent >= Decimal::ONE_HUNDRED {
            errors.insert(
                "discount_percent",
                "O desconto deve ser maior que 0% e menor que 100%.",
            );
        }

        match (self.promo_start_date, self.promo_end_date) {
            (_, None) => errors.insert("promo_end_date", "Data final da promoção é obrigatória."),
            (Some(start), Some(end)) if start > end => errors.insert(
                "promo_start_date",
                "A data inicial deve ser anterior à data final.",
            ),
            _ => {}
        }

        errors.into_result()
    }

    /// Window this bulk promotion gives a product with the given base price, or `None` when
    /// promotions are being cleared.
    ///
    /// # Errors
    ///
    /// Returns a [`PricingError`] when the percentage is out of range or the discounted price
    /// overflows.
    pub fn window_for(&self, base_price: u64) -> Result<Option<PromotionWindow>, PricingError> {
        let Some(percent) = self.discount_percent else {
            return Ok(None);
        };

        Ok(Some(PromotionWindow {
            promo_price: discounted_price(base_price, percent)?,
            promo_start_date: self.promo_start_date,
            promo_end_date: self.promo_end_date,
        }))
    }

    /// Change for a product with the given base price. Products whose rounded promotional price
    /// would be zero or not below the base price are skipped.
    ///
    /// # Errors
    ///
    /// Same as [`BulkPromotion::window_for`].
    pub fn change_for(&self, base_price: u64) -> Result<BulkChange, PricingError> {
        Ok(match self.window_for(base_price)? {
            None => BulkChange::Clear,
            Some(window) if window.validate(base_price).is_ok() => BulkChange::Apply(window),
            Some(_) => BulkChange::Skip,
        })
    }
}
