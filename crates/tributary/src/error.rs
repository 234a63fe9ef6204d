use thiserror::Error;

pub type Result<T, E = SubscribeError> = std::result::Result<T, E>;

/// Failures while opening a stream. Errors the stream itself yields are
/// payload and go to `on_error`, never through this type.
#[derive(Debug, Error)]
pub enum SubscribeError {
    #[error("subscription `{path}` failed to start: {message}")]
    Transport { path: String, message: String },

    #[error("subscription `{path}` is enabled but its input is the skip sentinel")]
    MissingInput { path: String },

    #[error("invalid subscription input: {0}")]
    InvalidInput(#[from] serde_json::Error),
}

impl SubscribeError {
    pub fn transport(path: impl Into<String>, message: impl Into<String>) -> Self {
        Self::Transport {
            path: path.into(),
            message: message.into(),
        }
    }
}
