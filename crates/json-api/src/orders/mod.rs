//! Orders

mod errors;
mod handlers;
pub(crate) mod responses;

pub(crate) use errors::into_status_error;
pub(crate) use handlers::*;
