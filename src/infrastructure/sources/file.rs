use crate::domain::entities::report::Report;
use crate::domain::error::DomainError;
use crate::domain::ports::report_source::ReportSource;
use async_trait::async_trait;
use std::path::PathBuf;

/// Initial batch read from a JSON array on disk.
pub struct FileReportSource {
    path: PathBuf,
}

impl FileReportSource {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }
}

#[async_trait]
impl ReportSource for FileReportSource {
    fn name(&self) -> &str {
        "file"
    }

    async fn fetch(&self) -> Result<Vec<Report>, DomainError> {
        let raw = tokio::fs::read_to_string(&self.path).await.map_err(|e| {
            DomainError::Transport(format!("reading {}: {e}", self.path.display()))
        })?;
        let reports: Vec<Report> = serde_json::from_str(&raw)?;
        Ok(reports)
    }
}
