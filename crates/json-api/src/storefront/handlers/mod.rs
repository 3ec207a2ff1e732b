//! Storefront Handlers

pub(crate) mod announcement;
pub(crate) mod catalog;
