//! Storage implementations for the service layer.

pub mod record_store;
