use std::sync::Arc;

use chrono::{Local, NaiveDate};

use crate::config::Config;
use crate::data::SiteData;

/// Shared application state handed to every handler via `State<AppState>`.
///
/// The dataset is immutable once loaded, so handlers only ever read it.
#[derive(Clone)]
pub struct AppState {
    pub data: Arc<SiteData>,
    pub config: Arc<Config>,
    /// Pins "today" for the calendar. `None` means the local date.
    pub today: Option<NaiveDate>,
}

impl AppState {
    pub fn new(data: SiteData, config: Config) -> Self {
        Self {
            data: Arc::new(data),
            config: Arc::new(config),
            today: None,
        }
    }

    pub fn with_today(mut self, today: NaiveDate) -> Self {
        self.today = Some(today);
        self
    }

    pub fn today(&self) -> NaiveDate {
        self.today.unwrap_or_else(|| Local::now().date_naive())
    }
}
