//! reviewd
//!
//! Invoice review workflow service. Submitted invoices land as records in a
//! document store with their files in an artifact store under `processed/`;
//! reviewers list pending records with time-limited signed access links
//! (memoized in a volatile TTL cache), and approvals flip record state while
//! relocating the artifact to `approved/`.
//!
//! Layers:
//!
//! - **services**: record store, artifact store (with URL signer), and link
//!   cache, each a backend trait plus a `Clone`-able wrapper
//! - **workflow**: the listing and batch-approval orchestration
//! - **http**: the axum JSON API over a workflow instance

pub mod config;
pub mod constants;
pub mod error;
pub mod http;
pub mod reliability;
pub mod services;
pub mod workflow;

pub use config::Config;
pub use error::{Error, Result};
pub use workflow::{ReviewWorkflow, WorkflowConfig};
