use crate::domain::entities::report::Report;
use crate::domain::error::DomainError;
use async_trait::async_trait;

/// Collaborator that yields the initial batch of reports.
#[async_trait]
pub trait ReportSource: Send + Sync {
    /// Human-readable name of this source.
    fn name(&self) -> &str;

    /// Single request for the full report list. Failures are
    /// `DomainError::Transport`.
    async fn fetch(&self) -> Result<Vec<Report>, DomainError>;
}
