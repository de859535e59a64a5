//! Shared constants: storage prefixes, cache keys, and default tunables.

use std::time::Duration;

/// Storage prefix for artifacts awaiting review.
pub const PROCESSED_PREFIX: &str = "processed/";

/// Storage prefix for artifacts whose records were approved.
pub const APPROVED_PREFIX: &str = "approved/";

/// Cache key namespace for memoized signed links.
pub const LINK_KEY_PREFIX: &str = "link:";

/// Counter of listing calls served.
pub const VIEWS_COUNTER: &str = "views";

/// Counter of artifacts relocated by approval.
pub const APPROVALS_COUNTER: &str = "approvals";

/// Default validity window for signed URLs. The link cache TTL uses this
/// same value so a cached link can never outlive its signature.
pub const DEFAULT_LINK_VALIDITY: Duration = Duration::from_secs(3600);

/// Default HTTP listen address.
pub const DEFAULT_LISTEN: &str = "127.0.0.1:8080";

/// Default host embedded in signed artifact URLs.
pub const DEFAULT_LINK_HOST: &str = "localhost:8080";

/// Default deadline for resolving one record's display URL.
pub const DEFAULT_RESOLVE_TIMEOUT: Duration = Duration::from_secs(10);

/// Default deadline for relocating one artifact during approval.
pub const DEFAULT_RELOCATE_TIMEOUT: Duration = Duration::from_secs(30);
