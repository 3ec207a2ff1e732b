//! Report Handlers

pub(crate) mod table;
pub(crate) mod whatsapp;

use salvo::{
    http::header::{CONTENT_DISPOSITION, HeaderValue},
    prelude::*,
};
use vitrine::orders::Order;

use crate::{orders::into_status_error, state::State};

async fn load_orders(state: &State) -> Result<Vec<Order>, StatusError> {
    state
        .app
        .orders
        .list_orders()
        .await
        .map_err(into_status_error)
}

/// Offer the report as a download named `filename`.
fn attach_as(res: &mut Response, disposition: &'static str) {
    res.headers_mut()
        .insert(CONTENT_DISPOSITION, HeaderValue::from_static(disposition));
}
