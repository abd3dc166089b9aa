//! Service layer for the heart data API.
//! - `records` defines the record type and the repository seam used by the HTTP layer.
//! - `storage` holds the in-memory implementation.

pub mod errors;
pub mod records;
pub mod storage;
