use std::fmt;

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

/// Classification of a door/floor grant, least restrictive first
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum AccessLevel {
    #[default]
    Full,
    Restricted,
    Emergency,
}

impl fmt::Display for AccessLevel {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            AccessLevel::Full => write!(f, "full"),
            AccessLevel::Restricted => write!(f, "restricted"),
            AccessLevel::Emergency => write!(f, "emergency"),
        }
    }
}

/// What kind of access point the record grants
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum PointKind {
    Door,
    Floor,
}

impl fmt::Display for PointKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            PointKind::Door => write!(f, "door"),
            PointKind::Floor => write!(f, "floor"),
        }
    }
}

/// One committed grant linking an access point to a user
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct AssignmentRecord {
    pub id: String,
    pub point_kind: PointKind,
    pub point_id: String,
    pub point_name: String,
    pub user_id: String,
    pub user_name: String,
    pub access_level: AccessLevel,
    /// Commit date, `YYYY-MM-DD` on the wire
    pub assigned_on: NaiveDate,
}
