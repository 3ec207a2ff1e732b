//! Vitrine
//!
//! Vitrine is the domain core of a small storefront: product catalog, promotion windows, cart,
//! WhatsApp checkout messages, order bookkeeping and duplicate-order detection. It performs no
//! I/O; persistence and HTTP live in the `vitrine-app` and `vitrine-json` crates.

pub mod announcements;
pub mod basket;
pub mod catalog;
pub mod checkout;
pub mod customers;
pub mod duplicates;
pub mod orders;
pub mod prelude;
pub mod pricing;
pub mod products;
pub mod promotions;
pub mod reports;
pub mod validation;
