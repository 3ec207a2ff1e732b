//! Basket
//!
//! The shopping cart. Unit prices are locked when a product is first added, so a promotion
//! ending while the cart is open does not change what the customer was quoted.
//!
//! The cart lives in the browser, so a checkout request carries each line's [`PriceQuote`]. The
//! server re-checks the quote against the catalogue before honouring it.

use jiff::{ToSpan, civil::Date};
use serde::{Deserialize, Serialize};
use thiserror::Error;

use crate::{
    orders::OrderItem,
    pricing::line_total,
    products::{Product, ProductId},
    promotions::effective_price,
};

/// Errors from cart operations.
#[derive(Debug, Error, PartialEq, Eq)]
pub enum CartError {
    /// The product is out of stock or hidden.
    #[error("product {0} is not available for purchase")]
    Unavailable(ProductId),
}

/// Days a quoted price stays redeemable at checkout.
pub const QUOTE_VALIDITY_DAYS: i32 = 2;

/// Unit price a customer was shown when adding a product, and the day it was shown.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct PriceQuote {
    pub unit_price: u64,
    pub added_on: Date,
}

impl PriceQuote {
    /// Day on which to price `product` for this quote.
    ///
    /// Returns `added_on` when it falls within the last [`QUOTE_VALIDITY_DAYS`] days before
    /// `today` and the product's effective price on that day equals the quoted unit price.
    /// Any other quote is not honoured and yields `None`.
    pub fn pricing_date(&self, product: &Product, today: Date) -> Option<Date> {
        let oldest = today.checked_sub(QUOTE_VALIDITY_DAYS.days()).ok()?;

        let honoured = self.added_on <= today
            && self.added_on >= oldest
            && effective_price(product, self.added_on) == self.unit_price;

        honoured.then_some(self.added_on)
    }
}

/// Cart line.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CartItem {
    /// Product in this line
    pub product_id: ProductId,

    /// Product name when added
    pub name: String,

    /// Unit price locked at add time
    pub unit_price: u64,

    /// Units
    pub quantity: u32,
}

impl CartItem {
    /// Unit price times quantity.
    pub fn line_total(&self) -> u64 {
        line_total(self.unit_price, self.quantity)
    }
}

/// Shopping cart.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Cart {
    items: Vec<CartItem>,
}

impl Cart {
    /// Empty cart.
    pub fn new() -> Self {
        Self::default()
    }

    /// Add `quantity` units of `product`, locking its effective price on `today`.
    ///
    /// Adding zero units does nothing. Adding a product already in the cart increases its
    /// quantity and keeps the price locked by the first add.
    ///
    /// # Errors
    ///
    /// Returns [`CartError::Unavailable`] when the product is out of stock or hidden.
    pub fn add(&mut self, product: &Product, quantity: u32, today: Date) -> Result<(), CartError> {
        if quantity == 0 {
            return Ok(());
        }

        if !product.is_purchasable() {
            return Err(CartError::Unavailable(product.id));
        }

        match self.line_mut(product.id) {
            Some(item) => item.quantity = item.quantity.saturating_add(quantity),
            None => self.items.push(CartItem {
                product_id: product.id,
                name: product.name.clone(),
                unit_price: effective_price(product, today),
                quantity,
            }),
        }

        Ok(())
    }

    /// Remove a product's line.
    pub fn remove(&mut self, product_id: ProductId) {
        self.items.retain(|item| item.product_id != product_id);
    }

    /// Set a line's quantity; zero removes the line.
    pub fn update_quantity(&mut self, product_id: ProductId, quantity: u32) {
        if quantity == 0 {
            self.remove(product_id);
            return;
        }

        if let Some(item) = self.line_mut(product_id) {
            item.quantity = quantity;
        }
    }

    /// Empty the cart.
    pub fn clear(&mut self) {
        self.items.clear();
    }

    /// Lines in the order they were first added.
    pub fn items(&self) -> &[CartItem] {
        &self.items
    }

    /// Units across all lines.
    pub fn total_items(&self) -> u64 {
        self.items.iter().map(|item| u64::from(item.quantity)).sum()
    }

    /// Sum of all line totals.
    pub fn total_price(&self) -> u64 {
        self.items
            .iter()
            .fold(0, |total: u64, item| total.saturating_add(item.line_total()))
    }

    /// Whether the cart has no lines.
    pub fn is_empty(&self) -> bool {
        self.items.is_empty()
    }

    /// Snapshot the lines as order items.
    pub fn into_order_items(self) -> Vec<OrderItem> {
        self.items
            .into_iter()
            .map(|item| OrderItem {
                product_id: item.product_id,
                name: item.name,
                unit_price: item.unit_price,
                quantity: item.quantity,
            })
            .collect()
    }

    fn line_mut(&mut self, product_id: ProductId) -> Option<&mut CartItem> {
        self.items
            .iter_mut()
            .find(|item| item.product_id == product_id)
    }
}
