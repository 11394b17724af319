use crate::models::error::CaptureError;
use crate::models::recording_result::RecordingResult;
use crate::models::state::CaptureState;

/// Event delegate for capture session notifications.
///
/// All methods are called from the control thread that drives the
/// `Recorder`, never from the audio callback.
pub trait CaptureDelegate: Send + Sync {
    /// Called when the session state changes.
    fn on_state_changed(&self, state: &CaptureState);

    /// Called when a step fails, before the error is returned.
    fn on_error(&self, error: &CaptureError);

    /// Called when the recording has been written to disk.
    fn on_capture_finished(&self, result: &RecordingResult);
}
