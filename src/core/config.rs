use once_cell::sync::Lazy;
use std::env;
use std::time::Duration;

/// Database file path
/// Read from DATABASE_PATH environment variable
/// Default: kquiz.sqlite
pub static DATABASE_PATH: Lazy<String> =
    Lazy::new(|| env::var("DATABASE_PATH").unwrap_or_else(|_| "kquiz.sqlite".to_string()));

/// Log file path
/// Read from LOG_FILE_PATH environment variable
/// Default: kquiz.log
pub static LOG_FILE_PATH: Lazy<String> =
    Lazy::new(|| env::var("LOG_FILE_PATH").unwrap_or_else(|_| "kquiz.log".to_string()));

/// Bot token
/// Read from BOT_TOKEN or TELOXIDE_TOKEN environment variable
pub static BOT_TOKEN: Lazy<String> = Lazy::new(|| {
    env::var("BOT_TOKEN")
        .or_else(|_| env::var("TELOXIDE_TOKEN"))
        .unwrap_or_else(|_| String::new())
});

/// Custom Bot API server (e.g. a local telegram-bot-api instance)
/// Read from BOT_API_URL environment variable
pub static BOT_API_URL: Lazy<Option<String>> = Lazy::new(|| {
    env::var("BOT_API_URL").ok().and_then(|value| {
        let trimmed = value.trim();
        if trimmed.is_empty() {
            None
        } else {
            Some(trimmed.to_string())
        }
    })
});

/// Store bucket names
pub mod buckets {
    use super::{env, Lazy};

    /// Bucket holding one marker per registered chat
    /// Read from REGISTRATION_BUCKET environment variable
    pub static REGISTRATION: Lazy<String> =
        Lazy::new(|| env::var("REGISTRATION_BUCKET").unwrap_or_else(|_| "telegram".to_string()));

    /// Bucket holding the word -> translation pairs of every chat
    /// Read from VOCABULARY_BUCKET environment variable
    pub static VOCABULARY: Lazy<String> =
        Lazy::new(|| env::var("VOCABULARY_BUCKET").unwrap_or_else(|_| "kquiz".to_string()));
}

/// Network configuration
pub mod network {
    use super::Duration;

    /// Request timeout for Bot API calls (in seconds)
    /// Long polling holds a request open, so this must exceed the polling timeout.
    pub const REQUEST_TIMEOUT_SECS: u64 = 60;

    /// Request timeout duration
    pub fn timeout() -> Duration {
        Duration::from_secs(REQUEST_TIMEOUT_SECS)
    }
}

/// Database pool configuration
pub mod database {
    /// Updates are handled one at a time, a couple of connections is plenty.
    pub const POOL_MAX_SIZE: u32 = 2;

    /// How long SQLite waits on a locked database before failing (in milliseconds)
    pub const BUSY_TIMEOUT_MS: u64 = 5000;
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_network_timeout_matches_constant() {
        assert_eq!(network::timeout(), Duration::from_secs(network::REQUEST_TIMEOUT_SECS));
    }

    #[test]
    fn test_bucket_names_are_distinct() {
        assert_ne!(buckets::REGISTRATION.as_str(), buckets::VOCABULARY.as_str());
    }
}
