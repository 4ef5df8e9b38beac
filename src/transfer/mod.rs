pub mod error;
pub mod item;
pub mod partition;

pub use error::{Side, TransferError};
pub use item::{matches_query, sort_by_name, TransferItem};
pub use partition::DualList;
