//! Shared test helpers.

use ecoalertas::domain::ports::push_channel::{PushEvent, DEFAULT_EVENT};
use ecoalertas::infrastructure::push::local::LocalPushChannel;
use ecoalertas::infrastructure::sources::memory::MemoryReportSource;
use ecoalertas::{FeedSession, Report};
use std::sync::Arc;

pub fn report(id: i64, category: &str, status: &str, date: &str) -> Report {
    Report::new(id, category, status, date)
}

pub fn seed_reports() -> Vec<Report> {
    vec![
        report(1, "fire", "open", "2024-01-01"),
        report(2, "flood", "resolved", "2024-02-01"),
    ]
}

/// Session over an in-memory batch and a local push channel.
pub fn setup(batch: Vec<Report>) -> (FeedSession, Arc<LocalPushChannel>) {
    let push = Arc::new(LocalPushChannel::new(16));
    let session = FeedSession::new(Arc::new(MemoryReportSource::new(batch)), push.clone());
    (session, push)
}

pub async fn push_report(push: &LocalPushChannel, report: Report) -> usize {
    push.publish(DEFAULT_EVENT, PushEvent::Report(report)).await
}

pub fn view_ids(session: &mut FeedSession) -> Vec<String> {
    session
        .current_view()
        .iter()
        .map(|r| r.id.to_string())
        .collect()
}
