//! Order Reports

mod handlers;

pub(crate) use handlers::*;
