use crate::application::feed_session::{FeedSession, SessionEvent};
use crate::domain::error::DomainError;
use crate::domain::values::feed_state::FeedState;

/// Why a watch loop returned.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum WatchEnd {
    /// Stopped through a stop handle (Ctrl-C).
    Interrupted,
    /// The push input ran out; the session is stopped on the way out.
    InputClosed,
}

/// Apply push events to a live session until it is stopped or its input
/// closes, handing each applied event to `on_event`.
pub async fn watch<F>(session: &mut FeedSession, mut on_event: F) -> Result<WatchEnd, DomainError>
where
    F: FnMut(&mut FeedSession, SessionEvent),
{
    while let Some(ev) = session.next_event().await? {
        on_event(session, ev);
    }
    if session.state() == FeedState::Stopped {
        return Ok(WatchEnd::Interrupted);
    }
    session.stop();
    Ok(WatchEnd::InputClosed)
}
