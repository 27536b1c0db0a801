/// Application-wide constants to avoid magic values throughout the codebase.
///
/// Defaults, limits and user-facing message fragments live here so the
/// engine, configuration and output layers agree on them.
/// Output format constants
pub mod output_formats {
    /// Text output format - colorful, emoji-enhanced output with grouping
    pub const TEXT: &str = "text";
    /// JSON output format - structured output for automation
    pub const JSON: &str = "json";
    /// Minimal output format - one tab-separated line per candidate
    pub const MINIMAL: &str = "minimal";

    /// Default output format
    pub const DEFAULT: &str = TEXT;

    /// All valid output formats
    pub const ALL: [&str; 3] = [TEXT, JSON, MINIMAL];
}

/// HTTP status code constants
pub mod http_status {
    /// HTTP 200 OK - the only status treated as an active User-Agent
    pub const OK: u16 = 200;
}

/// Probe endpoint defaults
pub mod probe {
    /// Endpoint that echoes back the User-Agent it received
    pub const DEFAULT_URL: &str = "https://httpbin.org/user-agent";
    /// Redirects followed before a probe gives up
    pub const MAX_REDIRECTS: usize = 10;
    /// Idle connections kept per host between attempts
    pub const MAX_IDLE_PER_HOST: usize = 20;
}

/// Timeout and duration constants
pub mod timeouts {
    /// Default per-attempt timeout in seconds
    pub const DEFAULT_TIMEOUT_SECONDS: u64 = 5;
    /// Maximum reasonable timeout in seconds (1 hour)
    pub const MAX_TIMEOUT_SECONDS: u64 = 3600;
    /// Minimum timeout in seconds
    pub const MIN_TIMEOUT_SECONDS: u64 = 1;
}

/// Default configuration values
pub mod defaults {
    /// Attempts per candidate before it is declared failed
    pub const MAX_RETRIES: u32 = 3;
    /// Admission slots for the "medium" speed preset
    pub const MEDIUM_CONCURRENCY: usize = 10;
    /// Admission slots for the "fast" speed preset
    pub const FAST_CONCURRENCY: usize = 50;
    /// Admission slots when neither a limit nor a preset is configured
    pub const CONCURRENCY: usize = MEDIUM_CONCURRENCY;
    /// Config file looked up in the working directory and its parents
    pub const CONFIG_FILE_NAME: &str = ".uacheck.toml";
    /// How many parent directories are searched for the config file
    pub const CONFIG_SEARCH_DEPTH: usize = 3;
}

/// Upper bounds enforced by configuration validation
pub mod limits {
    pub const MAX_CONCURRENCY: usize = 1000;
    pub const MAX_RETRIES: u32 = 20;
}

/// Failure reason and error message constants
pub mod error_messages {
    /// Timeout error message reported for transport timeouts
    pub const OPERATION_TIMED_OUT: &str = "operation timed out";
    /// Reason attached to candidates rejected by the structural pre-check
    pub const INVALID_STRUCTURE: &str = "invalid structure";
    /// Raised when the input collaborator hands over nothing
    pub const NO_CANDIDATES: &str = "no candidates to evaluate";
    /// Fallback text for a panic payload that is not a string
    pub const UNKNOWN_PANIC: &str = "task panicked";
}

/// Display and formatting constants
pub mod display {
    pub const SEARCH_EMOJI: &str = "🔎";
    pub const SUCCESS_EMOJI: &str = "✅";
    pub const ACTIVE_EMOJI: &str = "🎯";
    pub const ERROR_EMOJI: &str = "❌";
    pub const CELEBRATE_EMOJI: &str = "🎉";
    pub const NETWORK_ERROR_EMOJI: &str = "🔌";
    pub const STATUS_ERROR_EMOJI: &str = "🚫";
    pub const STRUCTURE_ERROR_EMOJI: &str = "🧩";
    pub const OTHER_EMOJI: &str = "❓";
    /// Rule printed between result entries
    pub const SEPARATOR: &str = "------------------------------------";
}
