//! Checkout Data

use jiff::tz::TimeZone;
use vitrine::{
    basket::PriceQuote,
    customers::Customer,
    orders::{OrderId, OrderItem, RegistrationStatus},
    products::ProductId,
};

/// Store details used when building checkout messages.
#[derive(Debug, Clone)]
pub struct CheckoutSettings {
    /// Time zone whose civil date decides which promotions apply
    pub time_zone: TimeZone,

    /// Store WhatsApp number, digits only or formatted
    pub whatsapp_number: String,

    /// Store e-mail, copied on confirmation e-mails
    pub store_email: String,
}

/// Requested cart line
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct CheckoutLine {
    pub product_id: ProductId,
    pub quantity: u32,

    /// Price the storefront showed when the line was added; `None` prices the line today
    pub quote: Option<PriceQuote>,
}

/// Checkout Request Data
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CheckoutRequest {
    pub customer: Customer,
    pub lines: Vec<CheckoutLine>,
}

/// Checkout outcome
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CheckoutReceipt {
    /// Identifier of the recorded order, when recording succeeded
    pub order_id: Option<OrderId>,

    /// Whether the order was stored
    pub order_recorded: bool,

    /// Registration status decided for the customer
    pub customer_status: RegistrationStatus,

    /// Lines at their locked prices
    pub items: Vec<OrderItem>,

    /// Sum of all line totals
    pub total_price: u64,

    /// WhatsApp message text
    pub message: String,

    /// `wa.me` link with the message pre-filled
    pub whatsapp_url: String,
}
