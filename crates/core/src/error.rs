/// Result alias that carries the custom [`SkyPanelError`] type.
pub type Result<T> = std::result::Result<T, SkyPanelError>;

/// Common error type for the core crate.
#[derive(Debug, thiserror::Error)]
pub enum SkyPanelError {
    /// A mode id outside the registry's dense `0..N` range was requested.
    /// The controller leaves its state untouched when this is returned.
    #[error("unknown mode id {id} ({available} modes available)")]
    InvalidMode { id: usize, available: usize },
    /// Generic message variant, mainly used to surface poisoned locks
    /// without committing to a dedicated error taxonomy for them.
    #[error("{0}")]
    Message(String),
    /// Wrapper around standard IO errors raised by pixel sinks.
    #[error("{0}")]
    Io(#[from] std::io::Error),
}

impl SkyPanelError {
    /// Creates a new error that simply wraps the provided message.
    pub fn msg<T: Into<String>>(msg: T) -> Self {
        Self::Message(msg.into())
    }
}

impl From<&str> for SkyPanelError {
    fn from(value: &str) -> Self {
        Self::msg(value)
    }
}

impl From<String> for SkyPanelError {
    fn from(value: String) -> Self {
        Self::Message(value)
    }
}
