//! # mic-capture-cpal
//!
//! cpal backend for mic-capture.
//!
//! Provides:
//! - `CpalHost`: scoped host handle implementing `AudioHost`
//! - `DeviceEnumerator`: device listing with input channel counts and latency
//! - `CpalInputStream`: input stream delivering 16-bit PCM chunks
//!
//! ## Platform Requirements
//! - Linux: ALSA development headers (`libasound2-dev`); JACK is opt-in via cpal
//! - macOS: Core Audio; Windows: WASAPI
//!
//! ## Usage
//! ```ignore
//! use mic_capture_core::{CaptureConfiguration, Recorder, select_device, AudioHost};
//! use mic_capture_cpal::CpalHost;
//!
//! let host = CpalHost::initialize();
//! let device = select_device(1, &host.devices()?)?;
//! let mut recorder = Recorder::new(host, CaptureConfiguration::default())?;
//! recorder.record(&device)?;
//! ```

pub mod device_enumerator;
pub mod host;
pub mod input_stream;
pub mod stream_config;

pub use device_enumerator::DeviceEnumerator;
pub use host::CpalHost;
pub use input_stream::CpalInputStream;
