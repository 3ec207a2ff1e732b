//! Settings Handlers

pub(crate) mod popup;
