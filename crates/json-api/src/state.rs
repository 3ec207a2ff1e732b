//! State

use std::sync::Arc;

use jiff::civil::Date;
use vitrine::promotions::today_in;
use vitrine_app::context::AppContext;

#[derive(Clone)]
pub(crate) struct State {
    pub(crate) app: AppContext,
}

impl State {
    #[must_use]
    pub(crate) fn new(app: AppContext) -> Self {
        Self { app }
    }

    #[must_use]
    pub(crate) fn from_app_context(app: AppContext) -> Arc<Self> {
        Arc::new(Self::new(app))
    }

    /// Current calendar date in the store's time zone.
    #[must_use]
    pub(crate) fn today(&self) -> Date {
        today_in(&self.app.store.time_zone)
    }
}
