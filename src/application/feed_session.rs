use crate::application::collection_store::CollectionStore;
use crate::application::derived_view::{DerivedView, View};
use crate::application::export::project;
use crate::application::facets::{facets, Facets};
use crate::application::pagination::{paginate, Page};
use crate::domain::entities::report::{Report, ReportId};
use crate::domain::error::DomainError;
use crate::domain::ports::push_channel::{PushChannel, PushEvent, Subscription, DEFAULT_EVENT};
use crate::domain::ports::report_source::ReportSource;
use crate::domain::values::export_row::ExportRow;
use crate::domain::values::feed_state::FeedState;
use crate::domain::values::filter_criteria::FilterCriteria;
use crate::domain::values::merge_outcome::MergeOutcome;
use std::sync::Arc;
use tokio::sync::watch;

/// What applying one push event did.
#[derive(Debug, Clone, PartialEq)]
pub enum SessionEvent {
    Merged { id: ReportId, outcome: MergeOutcome },
    Disconnected(String),
    Reconnected,
    /// Arrived while the session was not live; dropped without effect.
    Discarded,
}

/// Cloneable handle that stops a session from another task.
#[derive(Clone)]
pub struct StopHandle {
    tx: Arc<watch::Sender<bool>>,
}

impl StopHandle {
    pub fn stop(&self) {
        self.tx.send_replace(true);
    }

    pub fn is_stopped(&self) -> bool {
        *self.tx.borrow()
    }
}

/// Resolves once a stop has been requested.
async fn stopped(rx: &mut watch::Receiver<bool>) {
    // The sender lives in the session, so this never errors while waiting
    let _ = rx.wait_for(|stopped| *stopped).await;
}

enum Next {
    Stop,
    Closed,
    Event(PushEvent),
}

/// Owns one initial load, one push subscription and the collection they feed.
///
/// All mutation happens through `&mut self`, so merges and view recomputation
/// never interleave. The only suspension points are the initial fetch and
/// waiting for the next push event.
pub struct FeedSession {
    source: Arc<dyn ReportSource>,
    push: Arc<dyn PushChannel>,
    event: String,
    state: FeedState,
    store: CollectionStore,
    criteria: FilterCriteria,
    view: DerivedView,
    subscription: Option<Subscription>,
    stop_tx: Arc<watch::Sender<bool>>,
    stop_rx: watch::Receiver<bool>,
    data_errors: Vec<ReportId>,
}

impl FeedSession {
    pub fn new(source: Arc<dyn ReportSource>, push: Arc<dyn PushChannel>) -> Self {
        let (stop_tx, stop_rx) = watch::channel(false);
        Self {
            source,
            push,
            event: DEFAULT_EVENT.to_string(),
            state: FeedState::Idle,
            store: CollectionStore::new(),
            criteria: FilterCriteria::default(),
            view: DerivedView::new(),
            subscription: None,
            stop_tx: Arc::new(stop_tx),
            stop_rx,
            data_errors: Vec::new(),
        }
    }

    /// Subscribe under a different push event name.
    pub fn with_event(mut self, event: impl Into<String>) -> Self {
        self.event = event.into();
        self
    }

    /// Current lifecycle state. A stop requested through a [`StopHandle`]
    /// reads as `Stopped` immediately.
    pub fn state(&self) -> FeedState {
        if self.state.is_terminal() || !*self.stop_rx.borrow() {
            self.state
        } else {
            FeedState::Stopped
        }
    }

    pub fn event(&self) -> &str {
        &self.event
    }

    pub fn store(&self) -> &CollectionStore {
        &self.store
    }

    pub fn criteria(&self) -> &FilterCriteria {
        &self.criteria
    }

    /// Ids whose date could not be parsed, in the order first seen.
    pub fn data_errors(&self) -> &[ReportId] {
        &self.data_errors
    }

    pub fn stop_handle(&self) -> StopHandle {
        StopHandle {
            tx: self.stop_tx.clone(),
        }
    }

    /// Load the initial batch, go live, then subscribe to push events.
    ///
    /// A stop requested while loading ends in `Stopped` and returns `Ok`.
    /// Fetch or subscribe failures end in `Failed` and are returned as
    /// `DomainError::Transport`. Nothing is retried.
    pub async fn start(&mut self) -> Result<(), DomainError> {
        if self.state != FeedState::Idle {
            return Err(DomainError::InvalidState(format!(
                "cannot start a session in state {}",
                self.state
            )));
        }
        if *self.stop_rx.borrow() {
            self.stop();
            return Ok(());
        }

        self.transition(FeedState::Loading);
        let source = self.source.clone();
        let mut stop_rx = self.stop_rx.clone();
        let fetched = tokio::select! {
            biased;
            _ = stopped(&mut stop_rx) => None,
            res = source.fetch() => Some(res),
        };

        let batch = match fetched {
            None => {
                self.stop();
                return Ok(());
            }
            Some(Ok(batch)) => batch,
            Some(Err(e)) => return Err(self.fail(e)),
        };

        tracing::info!(source = source.name(), reports = batch.len(), "initial batch loaded");
        for report in &batch {
            self.note_data_error(report);
        }
        self.store.seed(batch)?;
        self.view.invalidate();
        self.transition(FeedState::Live);

        let subscribed = self.push.subscribe(&self.event).await;
        match subscribed {
            Ok(sub) => {
                tracing::info!(channel = self.push.name(), event = %self.event, "subscribed");
                self.subscription = Some(sub);
                Ok(())
            }
            Err(e) => Err(self.fail(e)),
        }
    }

    /// Wait for the next push event and apply it.
    ///
    /// Returns `Ok(None)` when the session is not live, has been stopped, or
    /// the push channel closed.
    pub async fn next_event(&mut self) -> Result<Option<SessionEvent>, DomainError> {
        if self.state != FeedState::Live {
            return Ok(None);
        }
        let next = {
            let Some(sub) = self.subscription.as_mut() else {
                return Ok(None);
            };
            let stop_rx = &mut self.stop_rx;
            tokio::select! {
                biased;
                _ = stopped(stop_rx) => Next::Stop,
                ev = sub.recv() => match ev {
                    Some(ev) => Next::Event(ev),
                    None => Next::Closed,
                },
            }
        };

        match next {
            Next::Stop => {
                self.stop();
                Ok(None)
            }
            Next::Closed => {
                tracing::info!(event = %self.event, "push channel closed");
                self.subscription = None;
                Ok(None)
            }
            Next::Event(ev) => self.handle_event(ev).map(Some),
        }
    }

    /// Drain push events until stop, channel close or failure. Returns the
    /// number of merges applied.
    pub async fn run(&mut self) -> Result<usize, DomainError> {
        let mut merged = 0;
        while let Some(ev) = self.next_event().await? {
            if matches!(ev, SessionEvent::Merged { .. }) {
                merged += 1;
            }
        }
        Ok(merged)
    }

    /// Apply one push event. Events arriving while the session is not live
    /// are discarded.
    pub fn handle_event(&mut self, event: PushEvent) -> Result<SessionEvent, DomainError> {
        self.apply_pending_stop();
        if self.state != FeedState::Live {
            tracing::warn!(state = %self.state, "discarding push event");
            return Ok(SessionEvent::Discarded);
        }

        match event {
            PushEvent::Report(report) => {
                self.note_data_error(&report);
                let id = report.id.clone();
                let outcome = self.store.merge(report);
                self.view.invalidate();
                tracing::debug!(%id, %outcome, total = self.store.len(), "merged report");
                Ok(SessionEvent::Merged { id, outcome })
            }
            PushEvent::Disconnected(reason) => {
                tracing::warn!(%reason, "push transport disconnected");
                Ok(SessionEvent::Disconnected(reason))
            }
            PushEvent::Reconnected => {
                tracing::info!("push transport reconnected");
                Ok(SessionEvent::Reconnected)
            }
            PushEvent::Failed(reason) => Err(self.fail(DomainError::Transport(reason))),
        }
    }

    /// Unsubscribe and move to `Stopped`. Returns false when already terminal.
    pub fn stop(&mut self) -> bool {
        if self.state.is_terminal() {
            return false;
        }
        if let Some(mut sub) = self.subscription.take() {
            let dropped = sub.unsubscribe();
            if dropped > 0 {
                tracing::debug!(dropped, "discarded buffered push events");
            }
        }
        self.stop_tx.send_replace(true);
        self.transition(FeedState::Stopped);
        true
    }

    /// Filtered view of the collection, newest first.
    pub fn current_view(&mut self) -> View {
        self.view.read(&self.store, &self.criteria)
    }

    pub fn set_criteria(&mut self, criteria: FilterCriteria) -> Result<(), DomainError> {
        self.apply_pending_stop();
        if self.state == FeedState::Stopped {
            return Err(DomainError::InvalidState(
                "cannot change criteria after stop".into(),
            ));
        }
        self.criteria = criteria;
        self.view.invalidate();
        Ok(())
    }

    pub fn export_current_view(&mut self) -> Vec<ExportRow> {
        project(&self.current_view())
    }

    pub fn facets(&mut self) -> Facets {
        let view = self.current_view();
        facets(self.store.iter(), &view)
    }

    pub fn page(&mut self, index: usize, size: usize) -> Result<Page, DomainError> {
        paginate(&self.current_view(), index, size)
    }

    fn transition(&mut self, next: FeedState) {
        tracing::info!(from = %self.state, to = %next, "feed session state");
        self.state = next;
    }

    fn fail(&mut self, err: DomainError) -> DomainError {
        let err = match err {
            DomainError::Transport(_) => err,
            other => DomainError::Transport(other.to_string()),
        };
        tracing::warn!(error = %err, "feed session failed");
        if let Some(mut sub) = self.subscription.take() {
            sub.unsubscribe();
        }
        self.transition(FeedState::Failed);
        err
    }

    /// Finish a stop requested through a [`StopHandle`].
    fn apply_pending_stop(&mut self) {
        if !self.state.is_terminal() && *self.stop_rx.borrow() {
            self.stop();
        }
    }

    /// Keep `data_errors` in line with the latest version of each report.
    fn note_data_error(&mut self, report: &Report) {
        match report.date.instant_or_err() {
            Err(e) => {
                tracing::warn!(id = %report.id, error = %e, "report excluded from date filtering");
                if !self.data_errors.contains(&report.id) {
                    self.data_errors.push(report.id.clone());
                }
            }
            Ok(_) => self.data_errors.retain(|id| id != &report.id),
        }
    }
}
