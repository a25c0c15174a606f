use crate::domain::error::DomainError;
use crate::domain::ports::push_channel::{PushChannel, PushEvent, Subscription};
use async_trait::async_trait;
use std::sync::Mutex;
use tokio::sync::mpsc;

/// In-process push channel. Publishers call [`LocalPushChannel::publish`];
/// each subscription gets its own bounded queue.
pub struct LocalPushChannel {
    capacity: usize,
    subscribers: Mutex<Vec<(String, mpsc::Sender<PushEvent>)>>,
    refuse: Option<String>,
}

impl LocalPushChannel {
    pub fn new(capacity: usize) -> Self {
        Self {
            capacity: capacity.max(1),
            subscribers: Mutex::new(Vec::new()),
            refuse: None,
        }
    }

    /// A channel whose every subscribe attempt fails.
    pub fn refusing(reason: impl Into<String>) -> Self {
        Self {
            refuse: Some(reason.into()),
            ..Self::new(1)
        }
    }

    /// Live subscriptions for `event`.
    pub fn subscriber_count(&self, event: &str) -> usize {
        let mut subs = self.subscribers.lock().unwrap_or_else(|e| e.into_inner());
        subs.retain(|(_, tx)| !tx.is_closed());
        subs.iter().filter(|(name, _)| name == event).count()
    }

    /// Deliver `payload` to every live subscription of `event`. Returns how
    /// many subscriptions accepted it.
    pub async fn publish(&self, event: &str, payload: PushEvent) -> usize {
        let targets: Vec<mpsc::Sender<PushEvent>> = {
            let mut subs = self.subscribers.lock().unwrap_or_else(|e| e.into_inner());
            subs.retain(|(_, tx)| !tx.is_closed());
            subs.iter()
                .filter(|(name, _)| name == event)
                .map(|(_, tx)| tx.clone())
                .collect()
        };

        let mut delivered = 0;
        for tx in targets {
            if tx.send(payload.clone()).await.is_ok() {
                delivered += 1;
            }
        }
        delivered
    }
}

#[async_trait]
impl PushChannel for LocalPushChannel {
    fn name(&self) -> &str {
        "local"
    }

    async fn subscribe(&self, event: &str) -> Result<Subscription, DomainError> {
        if let Some(reason) = &self.refuse {
            return Err(DomainError::Transport(reason.clone()));
        }
        let (tx, rx) = mpsc::channel(self.capacity);
        self.subscribers
            .lock()
            .map_err(|e| DomainError::Transport(format!("subscriber list poisoned: {e}")))?
            .push((event.to_string(), tx));
        Ok(Subscription::new(event, rx))
    }
}
