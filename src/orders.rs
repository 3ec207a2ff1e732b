//! Orders

use std::{fmt, str::FromStr};

use jiff::Timestamp;
use serde::{Deserialize, Serialize};
use thiserror::Error;
use uuid::Uuid;

use crate::{customers::Customer, pricing::line_total, products::ProductId};

/// Order identifier (UUID v7, so identifiers sort by creation time).
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct OrderId(Uuid);

impl OrderId {
    /// Fresh time-ordered identifier.
    pub fn new() -> Self {
        Self(Uuid::now_v7())
    }

    /// Wrap an existing UUID.
    pub const fn from_uuid(uuid: Uuid) -> Self {
        Self(uuid)
    }

    /// The underlying UUID.
    pub const fn into_uuid(self) -> Uuid {
        self.0
    }
}

impl Default for OrderId {
    fn default() -> Self {
        Self::new()
    }
}

impl From<Uuid> for OrderId {
    fn from(uuid: Uuid) -> Self {
        Self(uuid)
    }
}

impl fmt::Display for OrderId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        self.0.fmt(f)
    }
}

/// Product snapshot stored with an order.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct OrderItem {
    /// Product bought
    pub product_id: ProductId,

    /// Product name at checkout
    pub name: String,

    /// Unit price charged
    pub unit_price: u64,

    /// Units
    pub quantity: u32,
}

impl OrderItem {
    /// Unit price times quantity.
    pub fn line_total(&self) -> u64 {
        line_total(self.unit_price, self.quantity)
    }
}

/// Unknown status value.
#[derive(Debug, Error, PartialEq, Eq)]
#[error("unknown order status: {0}")]
pub struct UnknownStatus(pub String);

/// Sale status
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum SaleStatus {
    /// Awaiting payment or delivery.
    #[default]
    Open,

    /// Paid and delivered.
    Completed,
}

impl SaleStatus {
    /// Storage representation.
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Open => "open",
            Self::Completed => "completed",
        }
    }

    /// Label shown in reports.
    pub const fn label(self) -> &'static str {
        match self {
            Self::Open => "Em Aberto",
            Self::Completed => "Concluída",
        }
    }
}

impl FromStr for SaleStatus {
    type Err = UnknownStatus;

    fn from_str(value: &str) -> Result<Self, Self::Err> {
        match value {
            "open" => Ok(Self::Open),
            "completed" => Ok(Self::Completed),
            other => Err(UnknownStatus(other.to_string())),
        }
    }
}

/// Whether the customer was already known when the order was placed.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum RegistrationStatus {
    /// First order for this CPF; registration still has to be approved.
    #[default]
    Pending,

    /// A previous order exists for this CPF.
    Registered,
}

impl RegistrationStatus {
    /// Storage representation.
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Pending => "pending",
            Self::Registered => "registered",
        }
    }

    /// Label shown in reports.
    pub const fn label(self) -> &'static str {
        match self {
            Self::Pending => "Pendente",
            Self::Registered => "Realizado",
        }
    }
}

impl FromStr for RegistrationStatus {
    type Err = UnknownStatus;

    fn from_str(value: &str) -> Result<Self, Self::Err> {
        match value {
            "pending" => Ok(Self::Pending),
            "registered" => Ok(Self::Registered),
            other => Err(UnknownStatus(other.to_string())),
        }
    }
}

/// Order
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Order {
    /// Identifier
    pub id: OrderId,

    /// Creation instant
    pub date: Timestamp,

    /// Who placed the order
    pub customer: Customer,

    /// Products bought
    pub items: Vec<OrderItem>,

    /// Sum of all line totals, in centavos
    pub total_price: u64,

    /// Sale status
    pub status: SaleStatus,

    /// Free-text notes
    pub observation: String,

    /// Registration status
    pub customer_status: RegistrationStatus,
}

impl Order {
    /// New open order for `customer`, totalled from `items`.
    pub fn place(
        customer: Customer,
        items: Vec<OrderItem>,
        customer_status: RegistrationStatus,
        date: Timestamp,
    ) -> Self {
        let total_price = items
            .iter()
            .fold(0, |total: u64, item| total.saturating_add(item.line_total()));

        Self {
            id: OrderId::new(),
            date,
            customer,
            items,
            total_price,
            status: SaleStatus::Open,
            observation: String::new(),
            customer_status,
        }
    }

    /// Units across all items.
    pub fn total_items(&self) -> u64 {
        self.items.iter().map(|item| u64::from(item.quantity)).sum()
    }
}
