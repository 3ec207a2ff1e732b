//! Checkout payloads

use salvo::{http::StatusError, oapi::ToSchema};
use serde::{Deserialize, Serialize};
use vitrine::{basket::PriceQuote, customers::Customer, products::ProductId};
use vitrine_app::domain::checkout::data::{CheckoutLine, CheckoutRequest};

use crate::products::requests::parse_date;

/// Checkout form
///
/// Blank or missing fields are accepted here and rejected by the customer rules, so the
/// storefront gets the same message for both.
#[derive(Debug, Default, Serialize, Deserialize, ToSchema)]
pub(crate) struct CustomerPayload {
    #[serde(default)]
    pub name: String,

    #[serde(default)]
    pub email: String,

    /// CPF, masked or digits only
    #[serde(default)]
    pub cpf: String,
}

#[derive(Debug, Serialize, Deserialize, ToSchema)]
pub(crate) struct CartLinePayload {
    pub product_id: i64,
    pub quantity: u32,

    /// Unit price shown when the line was added, in centavos
    #[serde(default)]
    pub unit_price: Option<u64>,

    /// Day the line was added (`YYYY-MM-DD`); with `unit_price`, asks for that day's price
    #[serde(default)]
    pub added_on: Option<String>,
}

impl CartLinePayload {
    fn into_line(self) -> Result<CheckoutLine, StatusError> {
        let added_on = parse_date(self.added_on, "added_on")?;

        Ok(CheckoutLine {
            product_id: ProductId::new(self.product_id),
            quantity: self.quantity,
            quote: self
                .unit_price
                .zip(added_on)
                .map(|(unit_price, added_on)| PriceQuote {
                    unit_price,
                    added_on,
                }),
        })
    }
}

#[derive(Debug, Serialize, Deserialize, ToSchema)]
pub(crate) struct CheckoutPayload {
    pub customer: CustomerPayload,

    /// Cart contents; lines with zero quantity are ignored
    #[serde(default)]
    pub items: Vec<CartLinePayload>,
}

impl CheckoutPayload {
    pub(crate) fn into_request(self) -> Result<CheckoutRequest, StatusError> {
        Ok(CheckoutRequest {
            customer: Customer {
                name: self.customer.name,
                email: self.customer.email,
                national_id: self.customer.cpf,
            },
            lines: self
                .items
                .into_iter()
                .map(CartLinePayload::into_line)
                .collect::<Result<_, _>>()?,
        })
    }
}
