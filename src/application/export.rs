use crate::domain::entities::report::Report;
use crate::domain::values::export_row::ExportRow;
use std::sync::Arc;

/// Flatten an already-derived view into export rows, in view order.
pub fn project(view: &[Arc<Report>]) -> Vec<ExportRow> {
    view.iter()
        .map(|r| {
            ExportRow(
                r.id.to_string(),
                r.category.clone(),
                r.status.clone(),
                r.date.formatted(),
            )
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_project_rows() {
        let view = vec![
            Arc::new(Report::new(2, "flood", "open", "2024-02-01T08:30:00Z")),
            Arc::new(Report::new("x-1", "fire", "resolved", "unknown")),
        ];
        let rows = project(&view);
        assert_eq!(
            rows,
            vec![
                ExportRow("2".into(), "flood".into(), "open".into(), "2024-02-01".into()),
                ExportRow("x-1".into(), "fire".into(), "resolved".into(), "unknown".into()),
            ]
        );
    }

    #[test]
    fn test_project_empty() {
        assert!(project(&[]).is_empty());
    }
}
