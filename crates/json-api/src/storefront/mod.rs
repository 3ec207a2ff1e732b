//! Public Storefront

mod handlers;

pub(crate) use handlers::*;
