use std::path::PathBuf;

/// Core error type for the bot.
///
/// Adapter crates map their specific errors into this type so the core can
/// decide per call site whether a failure is fatal, logged, or replaced by a
/// fallback value.
#[derive(Debug, thiserror::Error)]
pub enum Error {
    #[error("config error: {0}")]
    Config(String),

    #[error("i/o error: {0}")]
    Io(#[from] std::io::Error),

    #[error("seen log {path}: {source}")]
    SeenLog {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("feed error: {0}")]
    Feed(String),

    #[error("translation error: {0}")]
    Translation(String),

    #[error("delivery error: {0}")]
    Delivery(String),

    #[error("external error: {0}")]
    External(String),
}

pub type Result<T> = std::result::Result<T, Error>;
