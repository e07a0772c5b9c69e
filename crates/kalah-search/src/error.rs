//! Error types for the search pool and its configuration

/// Search pool errors
#[derive(thiserror::Error, Debug)]
pub enum SearchError {
    /// `decide` called before `start`
    #[error("search pool has not been started")]
    NotStarted,

    /// `start` called twice
    #[error("search pool is already running")]
    AlreadyStarted,

    /// Pool used after `stop`
    #[error("search pool has been stopped")]
    Stopped,

    /// Every root move was illegal
    #[error("no legal move at the search root")]
    NoLegalMove,

    /// A branch thread panicked while searching its subtree
    #[error("branch thread {branch} panicked during search")]
    WorkerPanicked { branch: usize },

    /// OS thread creation failed
    #[error("failed to spawn branch thread: {0}")]
    Spawn(#[from] std::io::Error),

    /// Invalid configuration
    #[error(transparent)]
    Config(#[from] ConfigError),
}

/// Configuration loading errors
#[derive(thiserror::Error, Debug)]
pub enum ConfigError {
    /// File I/O error
    #[error(transparent)]
    Io(#[from] std::io::Error),

    /// TOML syntax or type error
    #[error("invalid config file: {0}")]
    Parse(#[from] toml::de::Error),

    /// Values out of range
    #[error("invalid search config: {0}")]
    Invalid(String),
}

/// Result type for search operations
pub type SearchResult<T> = Result<T, SearchError>;
