//! Application constants for Mod Fetcher
//!
//! This module centralizes all constants used throughout the application,
//! organized by functional domain for maintainability and clarity.

use std::time::Duration;

/// Modrinth service URLs and endpoints
pub mod api {
    /// Modrinth v2 API base URL
    pub const BASE_URL: &str = "https://api.modrinth.com/v2";

    /// Search endpoint path
    pub const SEARCH_PATH: &str = "/search";

    /// Game version tag endpoint path
    pub const GAME_VERSION_TAG_PATH: &str = "/tag/game_version";

    /// Category tag endpoint path
    pub const CATEGORY_TAG_PATH: &str = "/tag/category";

    /// Project type facet applied to every catalog query
    pub const PROJECT_TYPE: &str = "mod";
}

/// HTTP client configuration constants
pub mod http {
    use super::Duration;

    /// Default user agent for all HTTP requests
    pub const USER_AGENT: &str = "Mod-Fetcher/0.1.0 (mod catalog tool)";

    /// Default HTTP request timeout
    pub const DEFAULT_TIMEOUT: Duration = Duration::from_secs(60);

    /// Connection establishment timeout
    pub const CONNECT_TIMEOUT: Duration = Duration::from_secs(30);

    /// Connection pool idle timeout
    pub const POOL_IDLE_TIMEOUT: Duration = Duration::from_secs(90);

    /// Maximum connections per host in pool
    pub const POOL_MAX_PER_HOST: usize = 8;
}

/// Rate limiting and retry configuration
pub mod limits {
    /// Default rate limit for Modrinth requests (requests per second)
    pub const DEFAULT_RATE_LIMIT_RPS: u32 = 5;

    /// Maximum retry attempts for failed requests
    pub const MAX_RETRIES: u32 = 3;

    /// Base delay for exponential backoff (milliseconds)
    pub const RETRY_BASE_DELAY_MS: u64 = 1000;
}

/// Catalog paging and view configuration
pub mod catalog {
    use super::Duration;

    /// Number of entries requested per search page
    pub const PAGE_SIZE: usize = 100;

    /// Hard cap on entries accumulated per fetch sequence
    ///
    /// Bounds memory use; reaching it is surfaced as a truncated-results
    /// status so the user can refine their filters.
    pub const MAX_RESULTS: usize = 300;

    /// Window within which free-text keystrokes coalesce into one recompute
    pub const SEARCH_DEBOUNCE: Duration = Duration::from_millis(300);
}

/// Batch acquisition configuration
pub mod acquire {
    use super::Duration;

    /// Fixed delay after each transfer attempt, success or failure
    ///
    /// Keeps the acquisition channel under abuse-prevention thresholds.
    pub const TRANSFER_DELAY: Duration = Duration::from_millis(300);

    /// Extension recognized as the installable binary artifact when no
    /// file carries the primary flag
    pub const ARCHIVE_EXTENSION: &str = ".jar";

    /// Temporary file suffix for atomic transfers
    pub const TEMP_FILE_SUFFIX: &str = ".part";
}

/// Reference-data vocabulary constants
pub mod directory {
    /// Versions offered when the game-version endpoint is unreachable
    pub const FALLBACK_VERSIONS: &[&str] = &["1.20.1", "1.18.2"];

    /// Platform version preselected when present in the listing
    pub const PREFERRED_VERSION: &str = "1.20.1";

    /// Category ids surfaced in filter controls
    ///
    /// The tag endpoint also returns resourcepack/shader/modpack categories
    /// and loader pseudo-categories; only these mod categories are offered.
    pub const CATEGORY_ALLOW_LIST: &[&str] = &[
        "adventure",
        "cursed",
        "decoration",
        "economy",
        "equipment",
        "food",
        "game-mechanics",
        "library",
        "magic",
        "management",
        "minigame",
        "mobs",
        "optimization",
        "social",
        "storage",
        "technology",
        "transportation",
        "utility",
        "worldgen",
    ];
}

// Re-export commonly used constants for convenience
pub use acquire::TRANSFER_DELAY;
pub use api::BASE_URL;
pub use catalog::{MAX_RESULTS, PAGE_SIZE, SEARCH_DEBOUNCE};
pub use http::USER_AGENT;
pub use limits::{DEFAULT_RATE_LIMIT_RPS, MAX_RETRIES, RETRY_BASE_DELAY_MS};
