use std::fmt;

use serde::{Deserialize, Serialize};
use thiserror::Error;

/// One of the two lists of a dual-list transfer
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Side {
    Available,
    Assigned,
}

impl fmt::Display for Side {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Side::Available => write!(f, "available"),
            Side::Assigned => write!(f, "assigned"),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum TransferError {
    /// The id was picked on a side that does not currently hold it.
    #[error("item {id} is not on the {side} side")]
    NotOnSide {
        id: String,
        side: Side,
    },
}
