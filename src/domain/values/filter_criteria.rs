use crate::domain::error::DomainError;
use crate::domain::values::instant::{parse_instant, parse_instant_end_of_day};
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::collections::BTreeSet;

/// Inclusive date range; a missing bound is unbounded on that side.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct DateRange {
    pub from: Option<DateTime<Utc>>,
    pub to: Option<DateTime<Utc>>,
}

impl DateRange {
    pub fn new(from: Option<DateTime<Utc>>, to: Option<DateTime<Utc>>) -> Self {
        Self { from, to }
    }

    /// Parse optional wire bounds. A bare-date upper bound covers that whole day.
    pub fn parse(from: Option<&str>, to: Option<&str>) -> Result<Self, DomainError> {
        let from = from
            .map(|s| {
                parse_instant(s).ok_or_else(|| {
                    DomainError::InvalidInput(format!(
                        "Invalid date format: {s}. Use YYYY-MM-DD or RFC3339"
                    ))
                })
            })
            .transpose()?;
        let to = to
            .map(|s| {
                parse_instant_end_of_day(s).ok_or_else(|| {
                    DomainError::InvalidInput(format!(
                        "Invalid date format: {s}. Use YYYY-MM-DD or RFC3339"
                    ))
                })
            })
            .transpose()?;
        if let (Some(f), Some(t)) = (from, to) {
            if f > t {
                return Err(DomainError::InvalidInput(format!(
                    "Date range start {f} is after end {t}"
                )));
            }
        }
        Ok(Self { from, to })
    }

    pub fn is_unbounded(&self) -> bool {
        self.from.is_none() && self.to.is_none()
    }

    pub fn contains(&self, instant: DateTime<Utc>) -> bool {
        self.from.map_or(true, |f| instant >= f) && self.to.map_or(true, |t| instant <= t)
    }
}

/// Filter criteria. Replaced wholesale by the consumer; empty sets and empty
/// search mean "no restriction".
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct FilterCriteria {
    #[serde(default)]
    pub categories: BTreeSet<String>,
    #[serde(default)]
    pub statuses: BTreeSet<String>,
    #[serde(default)]
    pub search: String,
    #[serde(default)]
    pub date_range: DateRange,
}

impl FilterCriteria {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_categories<I, S>(mut self, categories: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.categories = categories.into_iter().map(Into::into).collect();
        self
    }

    pub fn with_statuses<I, S>(mut self, statuses: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.statuses = statuses.into_iter().map(Into::into).collect();
        self
    }

    pub fn with_search(mut self, search: impl Into<String>) -> Self {
        self.search = search.into();
        self
    }

    pub fn with_date_range(mut self, range: DateRange) -> Self {
        self.date_range = range;
        self
    }

    /// True when every report passes.
    pub fn is_unrestricted(&self) -> bool {
        self.categories.is_empty()
            && self.statuses.is_empty()
            && self.search.is_empty()
            && self.date_range.is_unbounded()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_is_unrestricted() {
        assert!(FilterCriteria::default().is_unrestricted());
        assert!(!FilterCriteria::new().with_search("x").is_unrestricted());
    }

    #[test]
    fn test_parse_range() {
        let r = DateRange::parse(Some("2024-01-01"), Some("2024-01-31")).unwrap();
        assert!(r.contains(parse_instant("2024-01-31T18:00:00Z").unwrap()));
        assert!(!r.contains(parse_instant("2024-02-01").unwrap()));
        assert!(r.contains(parse_instant("2024-01-01").unwrap()));
    }

    #[test]
    fn test_parse_range_errors() {
        assert!(DateRange::parse(Some("nope"), None).is_err());
        assert!(DateRange::parse(Some("2024-02-01"), Some("2024-01-01")).is_err());
        assert!(DateRange::parse(None, None).unwrap().is_unbounded());
    }
}
