//! Prelude

pub use crate::{
    announcements::{POPUP_SETTING_KEY, PopupConfig},
    basket::{Cart, CartError, CartItem, PriceQuote},
    catalog::{CatalogFilter, categories, storefront},
    checkout::{ConfirmationEmail, confirmation_email, whatsapp_message, whatsapp_url},
    customers::{Customer, CustomerError, format_national_id},
    duplicates::{DUPLICATE_MARKER, find_duplicates, pending_annotations},
    orders::{Order, OrderId, OrderItem, RegistrationStatus, SaleStatus},
    pricing::{PricingError, format_brl},
    products::{Product, ProductDetails, ProductId, Visibility},
    promotions::{
        BulkChange, BulkPromotion, PromotionWindow, check_base_price, effective_price,
        is_promotion_active, today_in,
    },
    reports::{orders_table, whatsapp_report},
    validation::FieldErrors,
};
