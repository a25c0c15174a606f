mod common;

use common::{push_report, report, seed_reports, setup, view_ids};
use ecoalertas::application::derived_view::recompute;
use ecoalertas::domain::values::export_row::ExportRow;
use ecoalertas::{DateRange, FilterCriteria, ReportId};
use pretty_assertions::assert_eq;
use std::sync::Arc;

#[tokio::test]
async fn test_unrestricted_view_equals_snapshot() {
    let (mut session, push) = setup(seed_reports());
    session.start().await.unwrap();
    push_report(&push, report(3, "smoke", "open", "2024-03-01")).await;
    session.next_event().await.unwrap();

    let snapshot = session.store().snapshot();
    let view = session.current_view();
    assert_eq!(view.len(), snapshot.len());
    assert!(view.iter().zip(&snapshot).all(|(a, b)| Arc::ptr_eq(a, b)));
}

#[tokio::test]
async fn test_snapshot_is_stable_copy() {
    let (mut session, push) = setup(seed_reports());
    session.start().await.unwrap();
    let before = session.store().snapshot();

    push_report(&push, report(1, "fire", "resolved", "2024-01-01")).await;
    session.next_event().await.unwrap();

    assert_eq!(before.len(), 2);
    assert_eq!(before[0].status, "open");
    assert_eq!(session.store().snapshot()[0].status, "resolved");
}

#[tokio::test]
async fn test_current_view_is_idempotent() {
    let (mut session, _push) = setup(seed_reports());
    session.start().await.unwrap();
    session
        .set_criteria(FilterCriteria::new().with_search("F"))
        .unwrap();

    let a = session.current_view();
    let b = session.current_view();
    assert_eq!(a.len(), 2);
    assert!(a.iter().zip(b.iter()).all(|(x, y)| Arc::ptr_eq(x, y)));

    let snapshot = session.store().snapshot();
    let c = recompute(&snapshot, session.criteria());
    let d = recompute(&snapshot, session.criteria());
    assert!(c.iter().zip(&d).all(|(x, y)| Arc::ptr_eq(x, y)));
}

#[tokio::test]
async fn test_criteria_change_recomputes() {
    let (mut session, _push) = setup(seed_reports());
    session.start().await.unwrap();
    assert_eq!(view_ids(&mut session), vec!["1", "2"]);

    session
        .set_criteria(FilterCriteria::new().with_categories(["flood"]))
        .unwrap();
    assert_eq!(view_ids(&mut session), vec!["2"]);

    session.set_criteria(FilterCriteria::default()).unwrap();
    assert_eq!(view_ids(&mut session), vec!["1", "2"]);
}

#[tokio::test]
async fn test_export_follows_filter() {
    let (mut session, _push) = setup(vec![
        report(1, "A", "open", "2024-01-01"),
        report(2, "B", "open", "2024-01-02"),
    ]);
    session.start().await.unwrap();
    session
        .set_criteria(FilterCriteria::new().with_categories(["A"]))
        .unwrap();

    assert_eq!(
        session.export_current_view(),
        vec![ExportRow("1".into(), "A".into(), "open".into(), "2024-01-01".into())]
    );
}

#[tokio::test]
async fn test_export_tracks_live_merges() {
    let (mut session, push) = setup(seed_reports());
    session.start().await.unwrap();
    session
        .set_criteria(FilterCriteria::new().with_statuses(["open"]))
        .unwrap();
    assert_eq!(session.export_current_view().len(), 1);

    push_report(&push, report(5, "smoke", "open", "2024-04-10T12:00:00Z")).await;
    session.next_event().await.unwrap();

    let rows = session.export_current_view();
    assert_eq!(rows.len(), 2);
    assert_eq!(rows[0], ExportRow("5".into(), "smoke".into(), "open".into(), "2024-04-10".into()));
}

#[tokio::test]
async fn test_date_range_filter() {
    let (mut session, _push) = setup(vec![
        report(1, "fire", "open", "2024-01-01"),
        report(2, "fire", "open", "2024-02-15T09:00:00Z"),
        report(3, "fire", "open", "2024-03-01"),
    ]);
    session.start().await.unwrap();

    let range = DateRange::parse(Some("2024-02-01"), Some("2024-03-01")).unwrap();
    session
        .set_criteria(FilterCriteria::new().with_date_range(range))
        .unwrap();
    assert_eq!(view_ids(&mut session), vec!["2", "3"]);
}

#[tokio::test]
async fn test_unparseable_date_is_reported_and_kept() {
    let (mut session, push) = setup(vec![
        report(1, "fire", "open", "2024-01-01"),
        report(2, "fire", "open", "last tuesday"),
    ]);
    session.start().await.unwrap();
    assert_eq!(session.data_errors(), &[ReportId::from(2)]);

    let range = DateRange::parse(Some("2024-06-01"), None).unwrap();
    session
        .set_criteria(FilterCriteria::new().with_date_range(range.clone()))
        .unwrap();
    // Skips the range but still answers to the other filters
    assert_eq!(view_ids(&mut session), vec!["2"]);

    session
        .set_criteria(FilterCriteria::new().with_date_range(range).with_categories(["flood"]))
        .unwrap();
    assert!(view_ids(&mut session).is_empty());

    push_report(&push, report(3, "flood", "open", "??")).await;
    session.next_event().await.unwrap();
    assert_eq!(session.data_errors(), &[ReportId::from(2), ReportId::from(3)]);
    assert_eq!(view_ids(&mut session), vec!["3"]);
}

#[tokio::test]
async fn test_corrected_date_clears_data_error() {
    let (mut session, push) = setup(vec![
        report(1, "fire", "open", "2024-01-01"),
        report(2, "fire", "open", "not a date"),
    ]);
    session.start().await.unwrap();
    assert_eq!(session.data_errors(), &[ReportId::from(2)]);

    push_report(&push, report(2, "fire", "open", "2024-05-01")).await;
    session.next_event().await.unwrap();
    assert!(session.data_errors().is_empty());

    let range = DateRange::parse(Some("2024-04-01"), None).unwrap();
    session
        .set_criteria(FilterCriteria::new().with_date_range(range))
        .unwrap();
    assert_eq!(view_ids(&mut session), vec!["2"]);
}

#[tokio::test]
async fn test_facets_and_pages() {
    let (mut session, push) = setup(seed_reports());
    session.start().await.unwrap();
    push_report(&push, report(3, "fire", "resolved", "2024-03-01")).await;
    session.next_event().await.unwrap();

    let facets = session.facets();
    assert_eq!(facets.categories, vec!["fire", "flood"]);
    assert_eq!(facets.statuses, vec!["resolved", "open"]);
    assert_eq!(facets.by_category[0].label, "fire");
    assert_eq!(facets.by_category[0].count, 2);

    session
        .set_criteria(FilterCriteria::new().with_statuses(["resolved"]))
        .unwrap();
    let facets = session.facets();
    assert_eq!(facets.total_reports, 3);
    assert_eq!(facets.visible_reports, 2);

    let page = session.page(1, 1).unwrap();
    assert_eq!(page.total_pages, 2);
    assert_eq!(page.items[0].id.to_string(), "2");
}
