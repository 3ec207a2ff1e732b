//! Promotion Handlers

pub(crate) mod bulk;
