//! Admin service configuration loaded from environment variables.
//!
//! Every setting has a default so the service starts with zero configuration:
//! an in-memory store and the built-in seed catalog.

use std::path::PathBuf;

/// Admin service configuration.
#[derive(Debug, Clone, PartialEq)]
pub struct AdminConfig {
    /// JSON file backing the key-value store.
    /// Env: `STOREFRONT_DATA_FILE`
    /// Default: none (in-memory store).
    pub data_file: Option<PathBuf>,

    /// Seed catalog document.
    /// Env: `STOREFRONT_SEED_FILE`
    /// Default: none (built-in catalog).
    pub seed_file: Option<PathBuf>,

    /// Capacity of the service mailbox.
    /// Env: `STOREFRONT_MAILBOX`
    /// Default: `32`
    pub mailbox_capacity: usize,

    /// Events buffered per subscriber before it starts lagging.
    /// Env: `STOREFRONT_EVENT_CAPACITY`
    /// Default: `64`
    pub event_capacity: usize,

    /// Refuse to start without an admin session in the store.
    /// Env: `STOREFRONT_REQUIRE_SESSION` (true/false)
    /// Default: `false`
    pub require_session: bool,
}

impl Default for AdminConfig {
    fn default() -> Self {
        Self {
            data_file: None,
            seed_file: None,
            mailbox_capacity: 32,
            event_capacity: 64,
            require_session: false,
        }
    }
}

impl AdminConfig {
    /// Load configuration from environment variables, falling back to defaults.
    pub fn from_env() -> Self {
        Self::from_lookup(|name| std::env::var(name).ok())
    }

    fn from_lookup(lookup: impl Fn(&str) -> Option<String>) -> Self {
        let mut config = Self::default();

        if let Some(path) = lookup("STOREFRONT_DATA_FILE").filter(|p| !p.is_empty()) {
            config.data_file = Some(PathBuf::from(path));
        }

        if let Some(path) = lookup("STOREFRONT_SEED_FILE").filter(|p| !p.is_empty()) {
            config.seed_file = Some(PathBuf::from(path));
        }

        if let Some(val) = lookup("STOREFRONT_MAILBOX") {
            match parse_capacity(&val) {
                Some(n) => config.mailbox_capacity = n,
                None => tracing::warn!(value = %val, "Invalid STOREFRONT_MAILBOX, using default"),
            }
        }

        if let Some(val) = lookup("STOREFRONT_EVENT_CAPACITY") {
            match parse_capacity(&val) {
                Some(n) => config.event_capacity = n,
                None => tracing::warn!(value = %val, "Invalid STOREFRONT_EVENT_CAPACITY, using default"),
            }
        }

        if let Some(val) = lookup("STOREFRONT_REQUIRE_SESSION") {
            config.require_session = val == "true" || val == "1";
        }

        // RUST_LOG is read by tracing-subscriber's EnvFilter.

        config
    }
}

/// Channel capacities must be positive.
fn parse_capacity(value: &str) -> Option<usize> {
    value.trim().parse::<usize>().ok().filter(|n| *n > 0)
}
