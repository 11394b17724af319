//! # mic-capture-core
//!
//! Platform-agnostic core for fixed-duration mono recording.
//!
//! Provides device selection, the callback-to-control-thread sample
//! handoff, and canonical 16-bit PCM WAV output. Platform backends
//! (currently cpal) implement the `AudioHost` and `InputStream` traits and
//! plug into the generic `Recorder`.
//!
//! ## Architecture
//!
//! ```text
//! mic-capture-core (this crate)
//! ├── traits/       ← AudioHost, InputStream, CaptureDelegate
//! ├── models/       ← CaptureError, CaptureState, CaptureConfiguration, AudioDevice, etc.
//! ├── processing/   ← SharedSampleBuffer, WAV serialization, PCM conversion
//! ├── session/      ← device selection, Recorder (state machine)
//! └── storage/      ← WavFileWriter, metadata sidecar
//! ```

pub mod models;
pub mod processing;
pub mod session;
pub mod storage;
pub mod traits;

#[cfg(test)]
mod testing;

// Re-export key types at crate root for convenience.
pub use models::audio_models::{AudioDevice, CaptureDiagnostics, StreamParameters};
pub use models::config::CaptureConfiguration;
pub use models::error::CaptureError;
pub use models::recording_result::{RecordingMetadata, RecordingResult};
pub use models::state::CaptureState;
pub use processing::sample_buffer::{SampleBuffer, SharedSampleBuffer};
pub use processing::wav_format::WavSpec;
pub use session::device_selector::{filter_input_devices, list_input_devices, parse_selection, select_device};
pub use session::recorder::Recorder;
pub use storage::wav_writer::WavFileWriter;
pub use traits::audio_host::{AudioHost, SampleCallback};
pub use traits::capture_delegate::CaptureDelegate;
pub use traits::input_stream::InputStream;
