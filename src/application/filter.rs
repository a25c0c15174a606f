use crate::domain::entities::report::Report;
use crate::domain::values::filter_criteria::FilterCriteria;

/// Whether `report` passes every active criterion.
///
/// A report whose date could not be parsed is not evaluated against the date
/// range: it passes that criterion and is decided by the others alone.
pub fn matches(report: &Report, criteria: &FilterCriteria) -> bool {
    matches_category(report, criteria)
        && matches_status(report, criteria)
        && matches_search(report, criteria)
        && matches_date(report, criteria)
}

fn matches_category(report: &Report, criteria: &FilterCriteria) -> bool {
    criteria.categories.is_empty() || criteria.categories.contains(&report.category)
}

fn matches_status(report: &Report, criteria: &FilterCriteria) -> bool {
    criteria.statuses.is_empty() || criteria.statuses.contains(&report.status)
}

fn matches_search(report: &Report, criteria: &FilterCriteria) -> bool {
    if criteria.search.is_empty() {
        return true;
    }
    let needle = criteria.search.to_lowercase();
    report.description.to_lowercase().contains(&needle)
        || report.category.to_lowercase().contains(&needle)
}

fn matches_date(report: &Report, criteria: &FilterCriteria) -> bool {
    if criteria.date_range.is_unbounded() {
        return true;
    }
    match report.date.instant() {
        Some(instant) => criteria.date_range.contains(instant),
        None => true,
    }
}
