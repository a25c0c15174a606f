use crate::domain::error::DomainError;
use crate::domain::values::instant::parse_instant;
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::fmt;

/// Report identifier. The backend emits numbers; strings are accepted too.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(untagged)]
pub enum ReportId {
    Number(i64),
    Text(String),
}

impl fmt::Display for ReportId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ReportId::Number(n) => write!(f, "{n}"),
            ReportId::Text(s) => write!(f, "{s}"),
        }
    }
}

impl From<i64> for ReportId {
    fn from(n: i64) -> Self {
        ReportId::Number(n)
    }
}

impl From<i32> for ReportId {
    fn from(n: i32) -> Self {
        ReportId::Number(n.into())
    }
}

impl From<&str> for ReportId {
    fn from(s: &str) -> Self {
        ReportId::Text(s.to_string())
    }
}

impl From<String> for ReportId {
    fn from(s: String) -> Self {
        ReportId::Text(s)
    }
}

/// Wire date plus the instant parsed from it once, at construction.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(from = "String", into = "String")]
pub struct ReportDate {
    raw: String,
    instant: Option<DateTime<Utc>>,
}

impl ReportDate {
    pub fn new(raw: impl Into<String>) -> Self {
        let raw = raw.into();
        let instant = parse_instant(&raw);
        Self { raw, instant }
    }

    pub fn raw(&self) -> &str {
        &self.raw
    }

    /// `None` when the wire value could not be parsed.
    pub fn instant(&self) -> Option<DateTime<Utc>> {
        self.instant
    }

    pub fn instant_or_err(&self) -> Result<DateTime<Utc>, DomainError> {
        self.instant
            .ok_or_else(|| DomainError::Data(format!("unparseable report date '{}'", self.raw)))
    }

    /// `YYYY-MM-DD` when parseable, the raw value otherwise.
    pub fn formatted(&self) -> String {
        match self.instant {
            Some(dt) => dt.format("%Y-%m-%d").to_string(),
            None => self.raw.clone(),
        }
    }
}

impl From<String> for ReportDate {
    fn from(raw: String) -> Self {
        ReportDate::new(raw)
    }
}

impl From<ReportDate> for String {
    fn from(d: ReportDate) -> Self {
        d.raw
    }
}

impl fmt::Display for ReportDate {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.raw)
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Report {
    pub id: ReportId,
    #[serde(default)]
    pub lat: f64,
    #[serde(default)]
    pub lng: f64,
    pub category: String,
    pub status: String,
    pub date: ReportDate,
    #[serde(default)]
    pub description: String,
    /// Opaque photo reference, never interpreted.
    #[serde(default)]
    pub photo: String,
}

impl Report {
    pub fn new(
        id: impl Into<ReportId>,
        category: impl Into<String>,
        status: impl Into<String>,
        date: impl Into<String>,
    ) -> Self {
        Self {
            id: id.into(),
            lat: 0.0,
            lng: 0.0,
            category: category.into(),
            status: status.into(),
            date: ReportDate::new(date),
            description: String::new(),
            photo: String::new(),
        }
    }

    pub fn with_description(mut self, description: impl Into<String>) -> Self {
        self.description = description.into();
        self
    }

    pub fn with_location(mut self, lat: f64, lng: f64) -> Self {
        self.lat = lat;
        self.lng = lng;
        self
    }

    pub fn with_photo(mut self, photo: impl Into<String>) -> Self {
        self.photo = photo.into();
        self
    }
}
