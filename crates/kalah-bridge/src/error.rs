//! Bridge and channel errors

/// Errors from a message transport
#[derive(thiserror::Error, Debug)]
pub enum BridgeError {
    /// Underlying reader/writer failed
    #[error(transparent)]
    Io(#[from] std::io::Error),

    /// The peer hung up (mailbox closed or EOF on the line stream)
    #[error("channel closed")]
    Closed,
}

/// Result type for bridge operations
pub type BridgeResult<T> = Result<T, BridgeError>;
