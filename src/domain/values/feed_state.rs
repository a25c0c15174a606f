use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

/// Lifecycle of a feed session.
///
/// `Idle -> Loading -> Live -> Stopped`, with `Loading -> Failed` and
/// `Live -> Failed`. `Failed` and `Stopped` are terminal.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum FeedState {
    Idle,
    Loading,
    Live,
    Stopped,
    Failed,
}

impl FeedState {
    pub fn is_terminal(&self) -> bool {
        matches!(self, FeedState::Stopped | FeedState::Failed)
    }
}

impl fmt::Display for FeedState {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            FeedState::Idle => write!(f, "idle"),
            FeedState::Loading => write!(f, "loading"),
            FeedState::Live => write!(f, "live"),
            FeedState::Stopped => write!(f, "stopped"),
            FeedState::Failed => write!(f, "failed"),
        }
    }
}

impl FromStr for FeedState {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "idle" => Ok(FeedState::Idle),
            "loading" => Ok(FeedState::Loading),
            "live" => Ok(FeedState::Live),
            "stopped" => Ok(FeedState::Stopped),
            "failed" => Ok(FeedState::Failed),
            _ => Err(format!("Unknown feed state: {s}")),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_terminal_states() {
        assert!(FeedState::Stopped.is_terminal());
        assert!(FeedState::Failed.is_terminal());
        assert!(!FeedState::Live.is_terminal());
        assert!(!FeedState::Idle.is_terminal());
    }

    #[test]
    fn test_display_roundtrip() {
        for s in [FeedState::Idle, FeedState::Loading, FeedState::Live, FeedState::Stopped, FeedState::Failed] {
            assert_eq!(s.to_string().parse::<FeedState>().unwrap(), s);
        }
        assert!("paused".parse::<FeedState>().is_err());
    }
}
