//! Artifact store service with pluggable backends.
//!
//! Holds the invoice files themselves under a hierarchical key namespace with
//! two sibling prefixes, `processed/` for artifacts awaiting review and
//! `approved/` for artifacts whose records were approved. Relocation on
//! approval is a pure prefix swap of the key.
//!
//! The store also mints time-limited signed access URLs through
//! [`signer::UrlSigner`], so reviewers can open an artifact without holding
//! long-lived credentials.

mod backend;
mod filesystem;
mod memory;
mod service;
pub mod signer;
mod types;
mod validation;

pub use backend::BlobBackend;
pub use filesystem::FilesystemBlobBackend;
pub use memory::MemoryBlobBackend;
pub use service::ArtifactStore;
pub use types::ObjectMeta;
