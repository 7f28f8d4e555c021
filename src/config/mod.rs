/// Database configuration and connection management
pub mod database;

/// Chart-of-accounts configuration (built-in defaults and TOML loading)
pub mod chart;
