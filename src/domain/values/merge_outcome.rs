use serde::{Deserialize, Serialize};
use std::fmt;

/// What a merge did to the collection.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum MergeOutcome {
    Inserted,
    Replaced,
}

impl fmt::Display for MergeOutcome {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            MergeOutcome::Inserted => write!(f, "inserted"),
            MergeOutcome::Replaced => write!(f, "replaced"),
        }
    }
}
