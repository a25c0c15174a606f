pub mod application;
pub mod cli;
pub mod config;
pub mod domain;
pub mod infrastructure;

pub use crate::application::feed_session::{FeedSession, SessionEvent, StopHandle};
pub use crate::config::FeedConfig;
pub use crate::domain::entities::report::{Report, ReportDate, ReportId};
pub use crate::domain::error::DomainError;
pub use crate::domain::values::filter_criteria::{DateRange, FilterCriteria};

use crate::domain::ports::push_channel::PushChannel;
use crate::domain::ports::report_source::ReportSource;
use crate::infrastructure::sources::http::HttpReportSource;
use std::sync::Arc;

impl FeedSession {
    /// Session against the configured HTTP backend, subscribed under the
    /// configured event name.
    pub fn from_config(config: &FeedConfig, push: Arc<dyn PushChannel>) -> Self {
        let source: Arc<dyn ReportSource> = Arc::new(HttpReportSource::from_config(config));
        FeedSession::new(source, push).with_event(config.event.clone())
    }
}
