use crate::config::FeedConfig;
use crate::domain::entities::report::Report;
use crate::domain::error::DomainError;
use crate::domain::ports::report_source::ReportSource;
use async_trait::async_trait;
use std::time::Duration;

/// Initial batch from the dashboard backend (`GET /api/reportes`).
pub struct HttpReportSource {
    url: String,
    client: reqwest::Client,
}

impl HttpReportSource {
    pub fn new(url: impl Into<String>, timeout: Duration) -> Self {
        Self {
            url: url.into(),
            client: reqwest::Client::builder()
                .user_agent("EcoAlertas/0.1")
                .timeout(timeout)
                .build()
                .unwrap_or_default(),
        }
    }

    pub fn from_config(config: &FeedConfig) -> Self {
        Self::new(config.reports_url(), config.timeout)
    }

    pub fn url(&self) -> &str {
        &self.url
    }
}

#[async_trait]
impl ReportSource for HttpReportSource {
    fn name(&self) -> &str {
        "http"
    }

    async fn fetch(&self) -> Result<Vec<Report>, DomainError> {
        let resp = self
            .client
            .get(&self.url)
            .header("Accept", "application/json")
            .send()
            .await
            .map_err(|e| DomainError::Transport(e.to_string()))?;

        if !resp.status().is_success() {
            return Err(DomainError::Transport(format!(
                "{} returned {}",
                self.url,
                resp.status()
            )));
        }

        resp.json::<Vec<Report>>()
            .await
            .map_err(|e| DomainError::Parse(e.to_string()))
    }
}
