use std::sync::Arc;
use std::thread;
use std::time::Instant;

use crate::models::audio_models::{AudioDevice, CaptureDiagnostics};
use crate::models::config::CaptureConfiguration;
use crate::models::error::CaptureError;
use crate::models::recording_result::{RecordingMetadata, RecordingResult};
use crate::models::state::CaptureState;
use crate::processing::pcm;
use crate::processing::sample_buffer::{SampleBuffer, SharedSampleBuffer};
use crate::processing::wav_format::WavSpec;
use crate::storage::metadata;
use crate::storage::wav_writer::WavFileWriter;
use crate::traits::audio_host::{AudioHost, SampleCallback};
use crate::traits::capture_delegate::CaptureDelegate;
use crate::traits::input_stream::InputStream;

/// Upper bound on samples reserved before the stream opens; longer
/// captures grow the buffer as they go.
const MAX_PREALLOCATED_SAMPLES: u64 = 16 * 1024 * 1024;

/// Fixed-duration mono recorder.
///
/// Drives one capture through
/// ```text
/// [AudioHost] → [InputStream callback] → [SharedSampleBuffer]
///     ─ stop + seal → [SampleBuffer] → [WavFileWriter]
/// ```
///
/// Each step is a method so callers can drive the state machine by hand;
/// [`record`](Self::record) runs them all. Any failure moves the recorder
/// to `Failed` and closes the stream. Calling a step from the wrong state
/// returns `CaptureError::Configuration` and leaves the state unchanged.
pub struct Recorder<H: AudioHost> {
    host: H,
    config: CaptureConfiguration,
    state: CaptureState,
    delegate: Option<Arc<dyn CaptureDelegate>>,
    stream: Option<Box<dyn InputStream>>,
    buffer: SharedSampleBuffer,
    device_name: String,
    capture_start: Option<Instant>,
}

impl<H: AudioHost> Recorder<H> {
    pub fn new(host: H, config: CaptureConfiguration) -> Result<Self, CaptureError> {
        config.validate().map_err(CaptureError::Configuration)?;
        Ok(Self {
            host,
            config,
            state: CaptureState::Idle,
            delegate: None,
            stream: None,
            buffer: SharedSampleBuffer::new(),
            device_name: String::new(),
            capture_start: None,
        })
    }

    pub fn set_delegate(&mut self, delegate: Arc<dyn CaptureDelegate>) {
        self.delegate = Some(delegate);
    }

    pub fn state(&self) -> &CaptureState {
        &self.state
    }

    pub fn diagnostics(&self) -> CaptureDiagnostics {
        self.buffer.diagnostics()
    }

    /// Capture for the configured duration and write the WAV file.
    pub fn record(&mut self, device: &AudioDevice) -> Result<RecordingResult, CaptureError> {
        self.open_stream(device)?;
        self.start_recording()?;

        thread::sleep(self.config.duration);

        let samples = self.stop_recording()?;
        if !self.config.is_nominal_sample_count(samples.len() as u64) {
            log::warn!(
                "captured {} samples, expected {} ± {}",
                samples.len(),
                self.config.expected_sample_count(),
                self.config.sample_count_tolerance()
            );
        }
        self.encode(samples)
    }

    /// Open an input stream on `device`. Transitions: idle → stream_open.
    pub fn open_stream(&mut self, device: &AudioDevice) -> Result<(), CaptureError> {
        self.expect_state(CaptureState::is_idle, "can only open a stream from idle state")?;

        if !device.is_input() {
            return Err(self.fail(CaptureError::InvalidSelection(format!(
                "device {} ({}) has no input channels",
                device.index, device.name
            ))));
        }

        let capacity = self
            .config
            .expected_sample_count()
            .saturating_add(self.config.sample_count_tolerance())
            .min(MAX_PREALLOCATED_SAMPLES) as usize;
        self.buffer = SharedSampleBuffer::with_capacity(capacity);

        let sink = self.buffer.clone();
        let callback: SampleCallback = Arc::new(move |chunk: &[i16]| {
            sink.append(chunk);
        });

        let params = self.config.stream_parameters(device);
        log::debug!(
            "opening '{}': {} Hz, {} ch, {} frames/buffer, latency {:?}",
            device.name,
            params.sample_rate,
            params.channels,
            params.frames_per_buffer,
            params.latency
        );

        match self.host.open_input_stream(device, &params, callback) {
            Ok(stream) => {
                self.stream = Some(stream);
                self.device_name = device.name.clone();
                self.set_state(CaptureState::StreamOpen);
                Ok(())
            }
            Err(e) => Err(self.fail(e)),
        }
    }

    /// Start the stream. Transitions: stream_open → recording.
    pub fn start_recording(&mut self) -> Result<(), CaptureError> {
        self.expect_state(CaptureState::is_stream_open, "can only start from stream_open state")?;

        let started = match self.stream.as_mut() {
            Some(stream) => stream.start(),
            None => Err(CaptureError::StreamStart("stream is not open".into())),
        };
        if let Err(e) = started {
            return Err(self.fail(e));
        }

        self.capture_start = Some(Instant::now());
        self.set_state(CaptureState::Recording { duration_secs: 0.0 });
        Ok(())
    }

    /// Stop the stream and take the captured samples.
    /// Transitions: recording → stopped.
    pub fn stop_recording(&mut self) -> Result<SampleBuffer, CaptureError> {
        self.expect_state(CaptureState::is_recording, "can only stop from recording state")?;

        let stopped = match self.stream.as_mut() {
            Some(stream) => stream.stop(),
            None => Err(CaptureError::StreamStop("stream is not open".into())),
        };
        if let Err(e) = stopped {
            return Err(self.fail(e));
        }

        let samples = self.buffer.seal();
        let elapsed = self.capture_start.map(|t| t.elapsed().as_secs_f64()).unwrap_or(0.0);
        let diagnostics = self.buffer.diagnostics();
        log::info!(
            "captured {} samples in {} callbacks over {:.2}s (rms {:.3})",
            samples.len(),
            diagnostics.callback_count,
            elapsed,
            pcm::rms_level(samples.samples())
        );

        self.set_state(CaptureState::Stopped {
            sample_count: samples.len(),
        });
        Ok(samples)
    }

    /// Close the stream and write `samples` to the output path.
    /// Transitions: stopped → encoded.
    pub fn encode(&mut self, samples: SampleBuffer) -> Result<RecordingResult, CaptureError> {
        self.expect_state(CaptureState::is_stopped, "can only encode from stopped state")?;

        // Closing the stream here releases the device before disk I/O.
        self.stream = None;
        let late = self.buffer.diagnostics().late_callbacks;
        if late > 0 {
            log::warn!("dropped {} callback chunks delivered after stop", late);
        }

        match self.write_output(&samples) {
            Ok(result) => {
                self.set_state(CaptureState::Encoded(Box::new(result.clone())));
                if let Some(ref delegate) = self.delegate {
                    delegate.on_capture_finished(&result);
                }
                Ok(result)
            }
            Err(e) => Err(self.fail(e)),
        }
    }

    // --- Internal helpers ---

    fn write_output(&self, samples: &SampleBuffer) -> Result<RecordingResult, CaptureError> {
        let spec = WavSpec {
            sample_rate: self.config.sample_rate,
            channels: self.config.channels,
            bit_depth: self.config.bit_depth,
        };
        let file_path = self.config.output_path.clone();
        let written = WavFileWriter::new(file_path.clone(), spec).write(samples.samples())?;

        let metadata = RecordingMetadata::new_mono(
            &self.config,
            &self.device_name,
            samples.len(),
            &file_path.to_string_lossy(),
            &written.checksum,
        );
        if self.config.write_metadata {
            let sidecar = metadata::write_metadata(&metadata, &file_path)?;
            log::debug!("wrote metadata to {}", sidecar.display());
        }

        Ok(RecordingResult {
            file_path,
            duration_secs: metadata.duration_secs,
            sample_count: samples.len(),
            bytes_written: written.bytes_written,
            checksum: written.checksum,
            metadata,
        })
    }

    fn expect_state(&self, check: fn(&CaptureState) -> bool, message: &str) -> Result<(), CaptureError> {
        if check(&self.state) {
            Ok(())
        } else {
            Err(CaptureError::Configuration(format!(
                "{} (current: {})",
                message,
                self.state.name()
            )))
        }
    }

    fn set_state(&mut self, new_state: CaptureState) {
        log::debug!("capture state: {} → {}", self.state.name(), new_state.name());
        self.state = new_state;
        if let Some(ref delegate) = self.delegate {
            delegate.on_state_changed(&self.state);
        }
    }

    /// Record `err` as terminal, close the stream, and hand the error back.
    fn fail(&mut self, err: CaptureError) -> CaptureError {
        self.stream = None;
        if let Some(ref delegate) = self.delegate {
            delegate.on_error(&err);
        }
        self.set_state(CaptureState::Failed(err.clone()));
        err
    }
}
