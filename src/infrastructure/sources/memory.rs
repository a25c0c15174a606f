use crate::domain::entities::report::Report;
use crate::domain::error::DomainError;
use crate::domain::ports::report_source::ReportSource;
use async_trait::async_trait;

/// Fixed initial batch, or a fixed transport failure.
pub struct MemoryReportSource {
    result: Result<Vec<Report>, String>,
}

impl MemoryReportSource {
    pub fn new(reports: Vec<Report>) -> Self {
        Self { result: Ok(reports) }
    }

    pub fn failing(reason: impl Into<String>) -> Self {
        Self {
            result: Err(reason.into()),
        }
    }
}

#[async_trait]
impl ReportSource for MemoryReportSource {
    fn name(&self) -> &str {
        "memory"
    }

    async fn fetch(&self) -> Result<Vec<Report>, DomainError> {
        self.result.clone().map_err(DomainError::Transport)
    }
}
