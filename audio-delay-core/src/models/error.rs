use thiserror::Error;

/// Errors that can occur while driving a delay session.
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum SessionError {
    #[error("unsupported: {0}")]
    Unsupported(String),

    #[error("missing capture device id")]
    MissingDevice,

    #[error("a capture stream is already active")]
    AlreadyStreaming,

    #[error("delay cannot change while a capture stream is active")]
    DelayLocked,

    #[error("invalid delay: {0}")]
    InvalidDelay(String),

    #[error("permission denied")]
    PermissionDenied,

    #[error("device not available: {0}")]
    DeviceNotAvailable(String),

    #[error("configuration failed: {0}")]
    ConfigurationFailed(String),

    #[error("capture stream failed: {0}")]
    StreamFailed(String),

    #[error("audio graph failed: {0}")]
    GraphFailed(String),
}
