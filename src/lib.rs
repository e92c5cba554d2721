//! Thin adapters that translate AWS event payloads (queue messages,
//! notifications, stream records, storage-change notifications) into
//! plain inputs for Lambda handler functions.

pub mod adapter;
pub mod conf;
pub mod convert;
pub mod error;
pub mod event;
pub mod notify;
pub mod queue;
pub mod s3;
pub mod store;
