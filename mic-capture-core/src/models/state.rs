use super::error::CaptureError;
use super::recording_result::RecordingResult;

/// Capture state machine.
///
/// State transitions:
/// ```text
/// idle → stream_open → recording → stopped → encoded
///            ↓             ↓          ↓
///                       failed
/// ```
#[derive(Debug, Clone, PartialEq)]
pub enum CaptureState {
    Idle,
    StreamOpen,
    Recording { duration_secs: f64 },
    Stopped { sample_count: usize },
    Encoded(Box<RecordingResult>),
    Failed(CaptureError),
}

impl CaptureState {
    pub fn is_idle(&self) -> bool {
        matches!(self, Self::Idle)
    }

    pub fn is_stream_open(&self) -> bool {
        matches!(self, Self::StreamOpen)
    }

    pub fn is_recording(&self) -> bool {
        matches!(self, Self::Recording { .. })
    }

    pub fn is_stopped(&self) -> bool {
        matches!(self, Self::Stopped { .. })
    }

    pub fn is_terminal(&self) -> bool {
        matches!(self, Self::Encoded(_) | Self::Failed(_))
    }

    /// Returns the current duration if in a state that tracks it.
    pub fn duration(&self) -> Option<f64> {
        match self {
            Self::Recording { duration_secs } => Some(*duration_secs),
            Self::Encoded(result) => Some(result.duration_secs),
            _ => None,
        }
    }

    /// Short lowercase name, used in logs and status output.
    pub fn name(&self) -> &'static str {
        match self {
            Self::Idle => "idle",
            Self::StreamOpen => "stream_open",
            Self::Recording { .. } => "recording",
            Self::Stopped { .. } => "stopped",
            Self::Encoded(_) => "encoded",
            Self::Failed(_) => "failed",
        }
    }
}
