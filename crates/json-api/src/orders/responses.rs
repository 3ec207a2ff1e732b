//! Order response payloads

use jiff::tz::TimeZone;
use salvo::oapi::ToSchema;
use serde::{Deserialize, Serialize};
use uuid::Uuid;
use vitrine::{
    customers::Customer,
    orders::{Order, OrderItem},
    pricing::format_brl,
    reports::format_order_date,
};

#[derive(Debug, Serialize, Deserialize, ToSchema)]
pub(crate) struct CustomerResponse {
    pub name: String,
    pub email: String,
    pub cpf: String,
}

impl From<Customer> for CustomerResponse {
    fn from(customer: Customer) -> Self {
        Self {
            name: customer.name,
            email: customer.email,
            cpf: customer.national_id,
        }
    }
}

#[derive(Debug, Serialize, Deserialize, ToSchema)]
pub(crate) struct OrderItemResponse {
    pub product_id: i64,
    pub name: String,

    /// Price locked when the item was added, in centavos
    pub unit_price: u64,
    pub quantity: u32,
    pub line_total: u64,
}

impl From<OrderItem> for OrderItemResponse {
    fn from(item: OrderItem) -> Self {
        Self {
            line_total: item.line_total(),
            product_id: item.product_id.into_inner(),
            name: item.name,
            unit_price: item.unit_price,
            quantity: item.quantity,
        }
    }
}

#[derive(Debug, Serialize, Deserialize, ToSchema)]
pub(crate) struct OrderResponse {
    pub id: Uuid,

    /// RFC 3339 creation instant
    pub date: String,

    /// `dd/mm/yyyy HH:MM` in the store's time zone
    pub date_display: String,
    pub customer: CustomerResponse,
    pub items: Vec<OrderItemResponse>,

    /// Centavos
    pub total_price: u64,
    pub total_display: String,

    /// `open` or `completed`
    pub status: String,
    pub status_label: String,
    pub observation: String,

    /// `pending` or `registered`
    pub customer_status: String,
    pub customer_status_label: String,

    /// Whether an earlier order has the same customer, total and items
    pub duplicate: bool,
}

impl OrderResponse {
    pub(crate) fn new(order: Order, duplicate: bool, time_zone: &TimeZone) -> Self {
        Self {
            id: order.id.into_uuid(),
            date: order.date.to_string(),
            date_display: format_order_date(order.date, time_zone),
            customer: order.customer.into(),
            items: order.items.into_iter().map(Into::into).collect(),
            total_price: order.total_price,
            total_display: format_brl(order.total_price),
            status: order.status.as_str().to_string(),
            status_label: order.status.label().to_string(),
            observation: order.observation,
            customer_status: order.customer_status.as_str().to_string(),
            customer_status_label: order.customer_status.label().to_string(),
            duplicate,
        }
    }
}
