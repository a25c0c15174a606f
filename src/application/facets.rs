use crate::domain::entities::report::Report;
use serde::Serialize;
use std::collections::HashMap;
use std::sync::Arc;

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct LabelCount {
    pub label: String,
    pub count: usize,
}

/// Filter choices and per-view breakdowns for the dashboard.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct Facets {
    /// Distinct categories across the whole collection, first-seen order.
    pub categories: Vec<String>,
    /// Distinct statuses across the whole collection, first-seen order.
    pub statuses: Vec<String>,
    pub total_reports: usize,
    pub visible_reports: usize,
    pub by_category: Vec<LabelCount>,
    pub by_status: Vec<LabelCount>,
}

pub fn facets<'a, I>(collection: I, view: &[Arc<Report>]) -> Facets
where
    I: IntoIterator<Item = &'a Arc<Report>>,
{
    let mut categories: Vec<String> = Vec::new();
    let mut statuses: Vec<String> = Vec::new();
    let mut total_reports = 0;
    for r in collection {
        total_reports += 1;
        if !categories.contains(&r.category) {
            categories.push(r.category.clone());
        }
        if !statuses.contains(&r.status) {
            statuses.push(r.status.clone());
        }
    }

    Facets {
        categories,
        statuses,
        total_reports,
        visible_reports: view.len(),
        by_category: count_by(view, |r| &r.category),
        by_status: count_by(view, |r| &r.status),
    }
}

/// Counts sorted by count descending, then label.
fn count_by<F>(view: &[Arc<Report>], key: F) -> Vec<LabelCount>
where
    F: Fn(&Report) -> &String,
{
    let mut counts: HashMap<&String, usize> = HashMap::new();
    for r in view {
        *counts.entry(key(r)).or_default() += 1;
    }
    let mut out: Vec<LabelCount> = counts
        .into_iter()
        .map(|(label, count)| LabelCount {
            label: label.clone(),
            count,
        })
        .collect();
    out.sort_by(|a, b| b.count.cmp(&a.count).then_with(|| a.label.cmp(&b.label)));
    out
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_facets() {
        let all: Vec<Arc<Report>> = vec![
            Arc::new(Report::new(1, "fire", "open", "2024-01-01")),
            Arc::new(Report::new(2, "flood", "resolved", "2024-01-02")),
            Arc::new(Report::new(3, "fire", "resolved", "2024-01-03")),
            Arc::new(Report::new(4, "smoke", "open", "2024-01-04")),
        ];
        let view: Vec<Arc<Report>> = all.iter().filter(|r| r.id.to_string() != "4").cloned().collect();

        let f = facets(&all, &view);
        assert_eq!(f.categories, vec!["fire", "flood", "smoke"]);
        assert_eq!(f.statuses, vec!["open", "resolved"]);
        assert_eq!(f.total_reports, 4);
        assert_eq!(f.visible_reports, 3);
        assert_eq!(f.by_category[0], LabelCount { label: "fire".into(), count: 2 });
        assert_eq!(f.by_category[1], LabelCount { label: "flood".into(), count: 1 });
        assert_eq!(f.by_status[0], LabelCount { label: "resolved".into(), count: 2 });
    }
}
