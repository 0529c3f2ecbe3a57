//! Query modules for the Pissenlits SDK.
//!
//! Each module provides a query struct that borrows the SDK's
//! [`RecordStore`](crate::store::RecordStore) and recomputes its view from
//! the full record list on every call.

pub mod rankings;
pub mod records;
pub mod summary;

pub use rankings::RankingQuery;
pub use records::{RecordFilter, RecordQuery};
pub use summary::SummaryQuery;
