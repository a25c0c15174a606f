use crate::domain::entities::report::{Report, ReportId};
use crate::domain::error::DomainError;
use crate::domain::values::merge_outcome::MergeOutcome;
use std::collections::{HashMap, HashSet, VecDeque};
use std::sync::Arc;
use tokio::sync::watch;

/// Authoritative, newest-first collection of reports keyed by id.
///
/// Every mutation bumps `revision` and notifies watchers. Ids are unique at
/// all times.
pub struct CollectionStore {
    reports: VecDeque<Arc<Report>>,
    ids: HashSet<ReportId>,
    merged: bool,
    revision: u64,
    notify: watch::Sender<u64>,
}

impl CollectionStore {
    pub fn new() -> Self {
        let (notify, _) = watch::channel(0);
        Self {
            reports: VecDeque::new(),
            ids: HashSet::new(),
            merged: false,
            revision: 0,
            notify,
        }
    }

    /// Replace the whole collection with the initial batch, in batch order.
    ///
    /// A repeated id in the batch overwrites the earlier entry at its
    /// original position. Fails once any merge has been applied.
    pub fn seed(&mut self, reports: Vec<Report>) -> Result<usize, DomainError> {
        if self.merged {
            return Err(DomainError::InvalidState(
                "cannot seed after live merges have been applied".into(),
            ));
        }

        let mut seeded: VecDeque<Arc<Report>> = VecDeque::with_capacity(reports.len());
        let mut index: HashMap<ReportId, usize> = HashMap::with_capacity(reports.len());
        for report in reports {
            match index.get(&report.id) {
                Some(&pos) => {
                    tracing::warn!(id = %report.id, "duplicate id in initial batch, keeping last");
                    seeded[pos] = Arc::new(report);
                }
                None => {
                    index.insert(report.id.clone(), seeded.len());
                    seeded.push_back(Arc::new(report));
                }
            }
        }

        self.ids = index.into_keys().collect();
        self.reports = seeded;
        self.bump();
        Ok(self.reports.len())
    }

    /// Insert-or-replace by id. The merged report always ends up first.
    pub fn merge(&mut self, report: Report) -> MergeOutcome {
        self.merged = true;
        // Only a replace needs the scan
        let outcome = if self.ids.insert(report.id.clone()) {
            MergeOutcome::Inserted
        } else {
            if let Some(pos) = self.position(&report.id) {
                self.reports.remove(pos);
            }
            MergeOutcome::Replaced
        };
        self.reports.push_front(Arc::new(report));
        self.bump();
        outcome
    }

    /// Stable copy of the current contents in store order.
    pub fn snapshot(&self) -> Vec<Arc<Report>> {
        self.reports.iter().cloned().collect()
    }

    pub fn iter(&self) -> impl Iterator<Item = &Arc<Report>> {
        self.reports.iter()
    }

    pub fn get(&self, id: &ReportId) -> Option<&Arc<Report>> {
        self.reports.iter().find(|r| &r.id == id)
    }

    pub fn len(&self) -> usize {
        self.reports.len()
    }

    pub fn is_empty(&self) -> bool {
        self.reports.is_empty()
    }

    /// Monotonic counter, bumped on every seed and merge.
    pub fn revision(&self) -> u64 {
        self.revision
    }

    /// Register for change notifications. The received value is the revision.
    pub fn subscribe(&self) -> watch::Receiver<u64> {
        self.notify.subscribe()
    }

    fn position(&self, id: &ReportId) -> Option<usize> {
        self.reports.iter().position(|r| &r.id == id)
    }

    fn bump(&mut self) {
        self.revision += 1;
        // No receivers is fine
        self.notify.send_replace(self.revision);
    }
}

impl Default for CollectionStore {
    fn default() -> Self {
        Self::new()
    }
}
