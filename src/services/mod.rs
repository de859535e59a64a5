//! Store services: records, artifacts, and the link cache.
//!
//! Each service follows the same shape: a backend trait for pluggable
//! storage, one or more backend implementations, and a `Clone`-able wrapper
//! the workflow holds. The workflow receives all three as explicit
//! constructor arguments, so tests swap in doubles freely.

pub mod blobs;
pub mod cache;
pub mod records;
