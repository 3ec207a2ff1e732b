//! Reference date query parsing helpers.

use jiff::civil::Date;
use salvo::{oapi::extract::QueryParam, prelude::StatusError};

use crate::extensions::*;

pub(crate) trait ReferenceDateExt {
    /// Parse an `on=YYYY-MM-DD` parameter, falling back to `today`.
    fn into_reference_date(self, today: Date) -> Result<Date, StatusError>;
}

impl ReferenceDateExt for QueryParam<String, false> {
    fn into_reference_date(self, today: Date) -> Result<Date, StatusError> {
        self.into_inner()
            .map(|value| value.parse::<Date>())
            .transpose()
            .or_400("could not parse \"on\" query parameter")
            .map(|date| date.unwrap_or(today))
    }
}
