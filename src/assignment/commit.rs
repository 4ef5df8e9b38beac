use chrono::NaiveDate;
use thiserror::Error;
use tracing::info;

use super::types::{AccessLevel, AssignmentRecord, PointKind};
use crate::ids::new_id;
use crate::transfer::{DualList, TransferItem};

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum AssignmentError {
    #[error("at least one {kind} must be assigned")]
    NoPointsAssigned { kind: PointKind },

    #[error("at least one user must be assigned")]
    NoUsersAssigned,

    #[error("assignment {0} not found")]
    NotFound(String),
}

/// Commits a paired door/floor ↔ user dual-list screen.
///
/// Produces one record per (point, user) pair of the two assigned sides,
/// point-major in display order, each at [`AccessLevel::Full`] and dated
/// `assigned_on`. Both lists are reset afterwards. If either assigned side
/// is empty nothing is produced and neither list is touched.
pub fn commit_pair<P, U>(
    points: &mut DualList<P>,
    users: &mut DualList<U>,
    kind: PointKind,
    assigned_on: NaiveDate,
) -> Result<Vec<AssignmentRecord>, AssignmentError>
where
    P: TransferItem + Clone,
    U: TransferItem + Clone,
{
    if points.assigned().is_empty() {
        return Err(AssignmentError::NoPointsAssigned { kind });
    }
    if users.assigned().is_empty() {
        return Err(AssignmentError::NoUsersAssigned);
    }

    let mut records = Vec::with_capacity(points.assigned().len() * users.assigned().len());
    for point in points.assigned() {
        for user in users.assigned() {
            records.push(AssignmentRecord {
                id: new_id("asg"),
                point_kind: kind,
                point_id: point.id().to_string(),
                point_name: point.name().to_string(),
                user_id: user.id().to_string(),
                user_name: user.name().to_string(),
                access_level: AccessLevel::default(),
                assigned_on,
            });
        }
    }

    info!(
        kind = %kind,
        points = points.assigned().len(),
        users = users.assigned().len(),
        records = records.len(),
        "committed assignment"
    );

    points.reset();
    users.reset();
    Ok(records)
}
