use thiserror::Error;

/// Errors that can occur while selecting a device, capturing, or encoding.
///
/// Each variant names the step that failed. None of them are retried.
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum CaptureError {
    #[error("audio host initialization failed: {0}")]
    Init(String),

    #[error("failed to get audio devices: {0}")]
    DeviceQuery(String),

    #[error("invalid device selection: {0}")]
    InvalidSelection(String),

    #[error("failed to open audio stream: {0}")]
    StreamOpen(String),

    #[error("failed to start audio stream: {0}")]
    StreamStart(String),

    #[error("failed to stop audio stream: {0}")]
    StreamStop(String),

    #[error("failed to save WAV file: {0}")]
    Io(String),

    #[error("encoding failed: {0}")]
    Encoding(String),

    #[error("configuration failed: {0}")]
    Configuration(String),
}

impl CaptureError {
    pub(crate) fn io(context: &str, err: std::io::Error) -> Self {
        Self::Io(format!("{}: {}", context, err))
    }
}
