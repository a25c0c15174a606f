use crate::domain::entities::report::Report;
use crate::domain::error::DomainError;
use crate::domain::ports::push_channel::{PushChannel, PushEvent, Subscription};
use async_trait::async_trait;
use std::sync::Mutex;
use tokio::io::{AsyncBufReadExt, AsyncRead, BufReader};
use tokio::sync::mpsc;

/// Push channel over line-delimited JSON (stdin, a pipe, a socket).
///
/// Each line is either a bare report object or an envelope
/// `{"event": "<name>", "data": <report>}`; envelopes for other events are
/// skipped. End of input closes the subscription. A read error is delivered
/// as [`PushEvent::Failed`].
pub struct LinesPushChannel<R> {
    reader: Mutex<Option<R>>,
    capacity: usize,
}

impl<R> LinesPushChannel<R>
where
    R: AsyncRead + Send + Unpin + 'static,
{
    pub fn new(reader: R, capacity: usize) -> Self {
        Self {
            reader: Mutex::new(Some(reader)),
            capacity: capacity.max(1),
        }
    }
}

/// Decode one line for `event`. `Ok(None)` means the line is for another event.
pub fn parse_line(line: &str, event: &str) -> Result<Option<Report>, DomainError> {
    let value: serde_json::Value = serde_json::from_str(line)?;
    match (value.get("event"), value.get("data")) {
        (Some(name), Some(data)) => {
            if name.as_str() != Some(event) {
                return Ok(None);
            }
            Ok(Some(serde_json::from_value(data.clone())?))
        }
        _ => Ok(Some(serde_json::from_value(value)?)),
    }
}

#[async_trait]
impl<R> PushChannel for LinesPushChannel<R>
where
    R: AsyncRead + Send + Unpin + 'static,
{
    fn name(&self) -> &str {
        "lines"
    }

    async fn subscribe(&self, event: &str) -> Result<Subscription, DomainError> {
        let reader = self
            .reader
            .lock()
            .map_err(|e| DomainError::Transport(format!("reader lock poisoned: {e}")))?
            .take()
            .ok_or_else(|| DomainError::Transport("line channel already subscribed".into()))?;

        let (tx, rx) = mpsc::channel(self.capacity);
        let name = event.to_string();
        tokio::spawn(async move {
            let mut lines = BufReader::new(reader).lines();
            loop {
                let line = tokio::select! {
                    _ = tx.closed() => break,
                    line = lines.next_line() => line,
                };
                match line {
                    Ok(Some(line)) if line.trim().is_empty() => continue,
                    Ok(Some(line)) => match parse_line(&line, &name) {
                        Ok(Some(report)) => {
                            if tx.send(PushEvent::Report(report)).await.is_err() {
                                break;
                            }
                        }
                        Ok(None) => {}
                        Err(e) => tracing::warn!(error = %e, "skipping malformed push line"),
                    },
                    Ok(None) => break,
                    Err(e) => {
                        let _ = tx.send(PushEvent::Failed(e.to_string())).await;
                        break;
                    }
                }
            }
            tracing::debug!(event = %name, "line push reader finished");
        });

        Ok(Subscription::new(event, rx))
    }
}
