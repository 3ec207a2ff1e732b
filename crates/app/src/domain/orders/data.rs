//! Orders Data

use vitrine::{
    customers::Customer,
    orders::{Order, OrderItem, RegistrationStatus, SaleStatus},
};

/// New Order Data
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NewOrder {
    pub customer: Customer,
    pub items: Vec<OrderItem>,
    pub customer_status: RegistrationStatus,
}

/// Order Update Data
///
/// Only the fields that are `Some` change.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct OrderUpdate {
    pub status: Option<SaleStatus>,
    pub observation: Option<String>,
    pub customer_status: Option<RegistrationStatus>,
}

/// Order with its duplicate flag
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FlaggedOrder {
    pub order: Order,
    pub duplicate: bool,
}
