use std::sync::Arc;

use crate::models::audio_models::{AudioDevice, StreamParameters};
use crate::models::error::CaptureError;
use crate::traits::input_stream::InputStream;

/// Callback invoked with each chunk of captured samples.
///
/// `samples` are interleaved 16-bit PCM in delivery order. The callback
/// fires on the host's audio thread, so keep processing minimal.
pub type SampleCallback = Arc<dyn Fn(&[i16]) + Send + Sync + 'static>;

/// Interface to the platform audio subsystem.
///
/// Implemented by:
/// - `CpalHost` (mic-capture-cpal)
///
/// A value of this type is the initialized subsystem; dropping it
/// terminates the subsystem.
pub trait AudioHost {
    /// Every device the host exposes, input-capable or not, in
    /// host-enumeration order.
    fn devices(&self) -> Result<Vec<AudioDevice>, CaptureError>;

    /// Open (but do not start) an input stream on `device`.
    fn open_input_stream(
        &self,
        device: &AudioDevice,
        params: &StreamParameters,
        callback: SampleCallback,
    ) -> Result<Box<dyn InputStream>, CaptureError>;
}
