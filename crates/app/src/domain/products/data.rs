//! Products Data

use vitrine::{products::ProductDetails, promotions::PromotionWindow};

/// New Product Data
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NewProduct {
    pub details: ProductDetails,
    pub promotion: Option<PromotionWindow>,
}

/// Product Update Data
///
/// Replaces every editable field except the promotion, which `set_promotion` owns.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ProductUpdate {
    pub details: ProductDetails,
}

/// Outcome of a bulk promotion.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct BulkPromotionSummary {
    /// Products whose promotion was set or cleared.
    pub updated: u64,

    /// Products left untouched because the discount rounds to no saving.
    pub skipped: u64,
}
