use thiserror::Error;

/// Errors of the outer application layer (bot setup and transport).
///
/// Word operations have their own [`WordError`](crate::storage::WordError) so the
/// router can turn each failure into a user-facing reason, and store failures at
/// startup surface through `anyhow` in the binary.
///
/// # Example
///
/// ```no_run
/// use kquiz::core::error::AppError;
///
/// fn handle_error(err: AppError) {
///     eprintln!("Error: {}", err);
/// }
/// ```
#[derive(Error, Debug)]
pub enum AppError {
    /// Telegram API errors
    #[error("Telegram error: {0}")]
    Telegram(#[from] teloxide::RequestError),

    /// IO errors
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    /// Missing or malformed settings
    #[error("Configuration error: {0}")]
    Config(String),
}

/// Type alias for Result with AppError
pub type AppResult<T> = Result<T, AppError>;
