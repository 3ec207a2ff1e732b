//! Product request payloads

use jiff::civil::Date;
use salvo::{http::StatusError, oapi::ToSchema};
use serde::{Deserialize, Serialize};
use vitrine::{
    products::{ProductDetails, Visibility},
    promotions::PromotionWindow,
};

use crate::extensions::*;

/// Promotion fields
#[derive(Debug, Default, Serialize, Deserialize, ToSchema)]
pub(crate) struct PromotionRequest {
    /// Discounted price in centavos; absent or zero clears the promotion
    #[serde(default)]
    pub promo_price: Option<u64>,

    /// First day (`YYYY-MM-DD`), open-ended when absent
    #[serde(default)]
    pub promo_start_date: Option<String>,

    /// Last day (`YYYY-MM-DD`)
    #[serde(default)]
    pub promo_end_date: Option<String>,
}

impl PromotionRequest {
    pub(crate) fn into_window(self) -> Result<Option<PromotionWindow>, StatusError> {
        let Some(promo_price) = self.promo_price.filter(|price| *price > 0) else {
            return Ok(None);
        };

        Ok(Some(PromotionWindow {
            promo_price,
            promo_start_date: parse_date(self.promo_start_date, "promo_start_date")?,
            promo_end_date: parse_date(self.promo_end_date, "promo_end_date")?,
        }))
    }
}

/// Editable product fields, promotion excluded
#[derive(Debug, Serialize, Deserialize, ToSchema)]
pub(crate) struct ProductDetailsRequest {
    pub name: String,

    /// Base price in centavos
    pub price: u64,

    pub image_url: String,

    pub category: String,

    #[serde(default)]
    pub action: Option<String>,

    #[serde(default)]
    pub indication: Option<String>,

    #[serde(default)]
    pub quantity_info: Option<String>,

    /// `in_stock` (default), `out_of_stock` or `hidden`
    #[serde(default)]
    pub visibility: Option<String>,
}

impl ProductDetailsRequest {
    pub(crate) fn into_details(self) -> Result<ProductDetails, StatusError> {
        Ok(ProductDetails {
            name: self.name,
            price: self.price,
            image_url: self.image_url,
            category: self.category,
            action: self.action,
            indication: self.indication,
            quantity_info: self.quantity_info,
            visibility: self
                .visibility
                .as_deref()
                .map(parse_visibility)
                .transpose()?
                .unwrap_or_default(),
        })
    }
}

/// New product form
#[derive(Debug, Serialize, Deserialize, ToSchema)]
pub(crate) struct ProductRequest {
    #[serde(flatten)]
    pub details: ProductDetailsRequest,

    #[serde(flatten)]
    pub promotion: PromotionRequest,
}

impl ProductRequest {
    pub(crate) fn into_parts(
        self,
    ) -> Result<(ProductDetails, Option<PromotionWindow>), StatusError> {
        Ok((self.details.into_details()?, self.promotion.into_window()?))
    }
}

/// Visibility change
#[derive(Debug, Serialize, Deserialize, ToSchema)]
pub(crate) struct VisibilityRequest {
    /// `in_stock`, `out_of_stock` or `hidden`
    pub visibility: String,
}

pub(crate) fn parse_visibility(value: &str) -> Result<Visibility, StatusError> {
    value.trim().parse::<Visibility>().or_400("unknown visibility")
}

pub(crate) fn parse_date(value: Option<String>, field: &str) -> Result<Option<Date>, StatusError> {
    value
        .filter(|value| !value.trim().is_empty())
        .map(|value| value.trim().parse::<Date>())
        .transpose()
        .or_400(&format!("could not parse \"{field}\""))
}
