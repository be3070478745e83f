/// Configuration constants for the Favro API
pub mod api {
    /// Base URL for the Favro REST API v1
    pub const BASE_URL: &str = "https://favro.com/api/v1";

    /// Organizations endpoint
    pub const ORGANIZATIONS: &str = "organizations";

    /// Widgets endpoint (boards and backlogs)
    pub const WIDGETS: &str = "widgets";

    /// Columns endpoint
    pub const COLUMNS: &str = "columns";

    /// Cards endpoint
    pub const CARDS: &str = "cards";

    /// Users endpoint
    pub const USERS: &str = "users";

    /// Header carrying the organization a request is scoped to
    pub const ORGANIZATION_HEADER: &str = "organizationId";

    /// Query parameter carrying the pagination request id
    pub const REQUEST_ID_PARAM: &str = "requestId";

    /// Query parameter carrying the zero-based page number
    pub const PAGE_PARAM: &str = "page";

    /// Request timeout in seconds
    pub const TIMEOUT_SECS: u64 = 30;

    /// Connect timeout in seconds
    pub const CONNECT_TIMEOUT_SECS: u64 = 10;
}

/// Configuration constants for the local config file
pub mod context {
    /// Config directory name (relative to HOME)
    pub const DIR_NAME: &str = ".favroctl";

    /// Config file name
    pub const FILE_NAME: &str = "config.json";

    /// Extension used for the temp file during atomic writes
    pub const TMP_EXTENSION: &str = "json.tmp";
}

/// Environment variables read by the binary and passed into the session resolver
pub mod env {
    /// API token override
    pub const TOKEN: &str = "FAVRO_TOKEN";

    /// Account email override, paired with the token
    pub const EMAIL: &str = "FAVRO_EMAIL";

    /// Organization id override
    pub const ORGANIZATION_ID: &str = "FAVRO_ORGANIZATION_ID";

    /// Board id override
    pub const BOARD_ID: &str = "FAVRO_BOARD_ID";

    /// API base URL override
    pub const API_URL: &str = "FAVRO_API_URL";
}

/// Retry policy defaults
pub mod retry {
    /// Total attempts for rate-limited and 5xx responses (first try included)
    pub const MAX_ATTEMPTS: u32 = 4;

    /// First backoff delay in milliseconds, doubled on every retry
    pub const BASE_DELAY_MS: u64 = 500;

    /// Upper bound for a single backoff delay in milliseconds
    pub const MAX_DELAY_MS: u64 = 8_000;

    /// Fixed delay before the single retry of a transient network failure
    pub const TRANSIENT_DELAY_MS: u64 = 250;
}

/// Default values for CLI
pub mod defaults {
    /// Default log level
    pub const LOG_LEVEL: &str = "warn";

    /// Default number of cards shown per column in `board show`
    pub const MAX_CARDS_PER_COLUMN: usize = 7;
}
