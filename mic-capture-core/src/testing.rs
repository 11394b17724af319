//! In-memory audio host used by the unit tests.

use std::sync::atomic::{AtomicBool, AtomicUsize, Ordering};
use std::sync::Arc;
use std::thread;
use std::time::Duration;

use parking_lot::Mutex;

use crate::models::audio_models::{AudioDevice, StreamParameters};
use crate::models::error::CaptureError;
use crate::models::recording_result::RecordingResult;
use crate::models::state::CaptureState;
use crate::traits::audio_host::{AudioHost, SampleCallback};
use crate::traits::capture_delegate::CaptureDelegate;
use crate::traits::input_stream::InputStream;

pub fn device(index: usize, name: &str, max_input_channels: u16) -> AudioDevice {
    AudioDevice {
        index,
        name: name.to_string(),
        max_input_channels,
        default_low_input_latency: Duration::from_millis(10),
    }
}

/// Host whose streams deliver a counting ramp (0, 1, 2, ...) from a
/// background thread, one `frames_per_buffer` chunk per millisecond.
#[derive(Clone, Default)]
pub struct MockHost {
    devices: Vec<AudioDevice>,
    fail_devices: Option<CaptureError>,
    fail_open: Option<CaptureError>,
    fail_start: Option<CaptureError>,
    fail_stop: Option<CaptureError>,
    late_chunk_on_close: bool,
    pub opened: Arc<Mutex<Vec<StreamParameters>>>,
    pub closed: Arc<AtomicUsize>,
}

impl MockHost {
    pub fn new(devices: Vec<AudioDevice>) -> Self {
        Self {
            devices,
            ..Default::default()
        }
    }

    pub fn fail_devices(mut self, err: CaptureError) -> Self {
        self.fail_devices = Some(err);
        self
    }

    pub fn fail_open(mut self, err: CaptureError) -> Self {
        self.fail_open = Some(err);
        self
    }

    pub fn fail_start(mut self, err: CaptureError) -> Self {
        self.fail_start = Some(err);
        self
    }

    pub fn fail_stop(mut self, err: CaptureError) -> Self {
        self.fail_stop = Some(err);
        self
    }

    /// Deliver one more chunk while the stream is being closed.
    pub fn late_chunk_on_close(mut self) -> Self {
        self.late_chunk_on_close = true;
        self
    }
}

impl AudioHost for MockHost {
    fn devices(&self) -> Result<Vec<AudioDevice>, CaptureError> {
        match &self.fail_devices {
            Some(err) => Err(err.clone()),
            None => Ok(self.devices.clone()),
        }
    }

    fn open_input_stream(
        &self,
        _device: &AudioDevice,
        params: &StreamParameters,
        callback: SampleCallback,
    ) -> Result<Box<dyn InputStream>, CaptureError> {
        if let Some(err) = &self.fail_open {
            return Err(err.clone());
        }
        self.opened.lock().push(*params);
        Ok(Box::new(MockStream {
            callback,
            chunk_len: params.frames_per_buffer as usize * params.channels as usize,
            running: Arc::new(AtomicBool::new(false)),
            handle: None,
            fail_start: self.fail_start.clone(),
            fail_stop: self.fail_stop.clone(),
            late_chunk_on_close: self.late_chunk_on_close,
            closed: Arc::clone(&self.closed),
        }))
    }
}

struct MockStream {
    callback: SampleCallback,
    chunk_len: usize,
    running: Arc<AtomicBool>,
    handle: Option<thread::JoinHandle<()>>,
    fail_start: Option<CaptureError>,
    fail_stop: Option<CaptureError>,
    late_chunk_on_close: bool,
    closed: Arc<AtomicUsize>,
}

impl MockStream {
    fn halt(&mut self) {
        self.running.store(false, Ordering::SeqCst);
        if let Some(handle) = self.handle.take() {
            let _ = handle.join();
        }
    }
}

impl InputStream for MockStream {
    fn start(&mut self) -> Result<(), CaptureError> {
        if let Some(err) = &self.fail_start {
            return Err(err.clone());
        }
        self.running.store(true, Ordering::SeqCst);

        let running = Arc::clone(&self.running);
        let callback = Arc::clone(&self.callback);
        let chunk_len = self.chunk_len;
        self.handle = Some(thread::spawn(move || {
            let mut next: i16 = 0;
            while running.load(Ordering::SeqCst) {
                let chunk: Vec<i16> = (0..chunk_len)
                    .map(|_| {
                        let s = next;
                        next = next.wrapping_add(1);
                        s
                    })
                    .collect();
                callback(&chunk);
                thread::sleep(Duration::from_millis(1));
            }
        }));
        Ok(())
    }

    fn stop(&mut self) -> Result<(), CaptureError> {
        self.halt();
        match &self.fail_stop {
            Some(err) => Err(err.clone()),
            None => Ok(()),
        }
    }
}

impl Drop for MockStream {
    fn drop(&mut self) {
        self.halt();
        if self.late_chunk_on_close {
            (self.callback)(&[i16::MIN; 4]);
        }
        self.closed.fetch_add(1, Ordering::SeqCst);
    }
}

/// Delegate that records every notification.
#[derive(Default)]
pub struct EventLog {
    pub states: Mutex<Vec<&'static str>>,
    pub errors: Mutex<Vec<CaptureError>>,
    pub finished: Mutex<Vec<RecordingResult>>,
}

impl CaptureDelegate for EventLog {
    fn on_state_changed(&self, state: &CaptureState) {
        self.states.lock().push(state.name());
    }

    fn on_error(&self, error: &CaptureError) {
        self.errors.lock().push(error.clone());
    }

    fn on_capture_finished(&self, result: &RecordingResult) {
        self.finished.lock().push(result.clone());
    }
}
