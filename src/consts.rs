//! Project-wide constants.

/// Name given to a chain built without an explicit name.
pub const DEFAULT_CHAIN_NAME: &str = "chain";

/// Name given to a worker built without an explicit name.
pub const DEFAULT_WORKER_NAME: &str = "worker";

/// Env var holding the tracing filter directive.
pub const LOG_FILTER_ENV: &str = "WORKCHAIN_LOG";

/// Env var selecting the log output format (`text` or `json`).
pub const LOG_FORMAT_ENV: &str = "WORKCHAIN_LOG_FORMAT";

/// Filter used when [`LOG_FILTER_ENV`] is unset.
pub const DEFAULT_LOG_FILTER: &str = "info,workchain=debug";

