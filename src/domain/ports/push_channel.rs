use crate::domain::entities::report::Report;
use crate::domain::error::DomainError;
use async_trait::async_trait;
use tokio::sync::mpsc;

/// Default application event carrying a new or updated report.
pub const DEFAULT_EVENT: &str = "nuevo-reporte";

#[derive(Debug, Clone, PartialEq)]
pub enum PushEvent {
    Report(Report),
    /// Transport lost its connection. Informational only.
    Disconnected(String),
    Reconnected,
    /// Subscription broke irrecoverably.
    Failed(String),
}

/// Receiving end of a push subscription. Events arrive one at a time in
/// transport order.
#[derive(Debug)]
pub struct Subscription {
    event: String,
    rx: mpsc::Receiver<PushEvent>,
}

impl Subscription {
    pub fn new(event: impl Into<String>, rx: mpsc::Receiver<PushEvent>) -> Self {
        Self {
            event: event.into(),
            rx,
        }
    }

    pub fn event(&self) -> &str {
        &self.event
    }

    /// Next event, or `None` once the channel is closed and drained.
    pub async fn recv(&mut self) -> Option<PushEvent> {
        self.rx.recv().await
    }

    /// Close the channel and drop anything still buffered. Returns the number
    /// of discarded events.
    pub fn unsubscribe(&mut self) -> usize {
        self.rx.close();
        let mut dropped = 0;
        while self.rx.try_recv().is_ok() {
            dropped += 1;
        }
        dropped
    }
}

/// Collaborator delivering reports pushed under an application event name.
#[async_trait]
pub trait PushChannel: Send + Sync {
    fn name(&self) -> &str;

    async fn subscribe(&self, event: &str) -> Result<Subscription, DomainError>;
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn test_unsubscribe_discards_buffered() {
        let (tx, rx) = mpsc::channel(8);
        let mut sub = Subscription::new(DEFAULT_EVENT, rx);
        tx.send(PushEvent::Reconnected).await.unwrap();
        tx.send(PushEvent::Reconnected).await.unwrap();

        assert_eq!(sub.unsubscribe(), 2);
        assert!(tx.send(PushEvent::Reconnected).await.is_err());
        assert!(sub.recv().await.is_none());
    }
}
