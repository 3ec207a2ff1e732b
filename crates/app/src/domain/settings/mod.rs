//! Settings

pub mod errors;
mod repository;
pub mod service;

pub use errors::SettingsServiceError;
pub use service::*;
