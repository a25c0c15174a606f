use crate::application::collection_store::CollectionStore;
use crate::application::filter::matches;
use crate::domain::entities::report::Report;
use crate::domain::values::filter_criteria::FilterCriteria;
use std::sync::Arc;

/// Shared, immutable view sequence.
pub type View = Arc<[Arc<Report>]>;

/// Filter `reports` by `criteria`, keeping the input order among matches.
pub fn recompute<'a, I>(reports: I, criteria: &FilterCriteria) -> Vec<Arc<Report>>
where
    I: IntoIterator<Item = &'a Arc<Report>>,
{
    reports
        .into_iter()
        .filter(|r| matches(r, criteria))
        .cloned()
        .collect()
}

struct Cached {
    store_revision: u64,
    criteria: FilterCriteria,
    view: View,
}

/// Last computed view plus the inputs that produced it.
///
/// The cache is only a shortcut: a read with inputs that differ from the
/// cached ones always recomputes.
#[derive(Default)]
pub struct DerivedView {
    cached: Option<Cached>,
}

impl DerivedView {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn read(&mut self, store: &CollectionStore, criteria: &FilterCriteria) -> View {
        if let Some(c) = &self.cached {
            if c.store_revision == store.revision() && &c.criteria == criteria {
                return c.view.clone();
            }
        }

        let view: View = recompute(store.iter(), criteria).into();
        tracing::trace!(
            revision = store.revision(),
            total = store.len(),
            visible = view.len(),
            "recomputed view"
        );
        self.cached = Some(Cached {
            store_revision: store.revision(),
            criteria: criteria.clone(),
            view: view.clone(),
        });
        view
    }

    /// Drop the cached view. The next read recomputes.
    pub fn invalidate(&mut self) {
        self.cached = None;
    }

    pub fn is_cached(&self) -> bool {
        self.cached.is_some()
    }
}
