use mic_capture_core::models::audio_models::{AudioDevice, StreamParameters};
use mic_capture_core::models::error::CaptureError;
use mic_capture_core::traits::audio_host::{AudioHost, SampleCallback};
use mic_capture_core::traits::input_stream::InputStream;

use crate::device_enumerator::DeviceEnumerator;
use crate::input_stream::CpalInputStream;

/// An initialized cpal host.
///
/// Acquire one at startup and keep it for the life of the recording;
/// dropping it releases the host on every exit path.
pub struct CpalHost {
    host: cpal::Host,
}

impl CpalHost {
    /// Initialize the platform's default host.
    pub fn initialize() -> Self {
        let host = cpal::default_host();
        log::debug!("initialized audio host {}", host.id().name());
        Self { host }
    }

    /// Initialize a host by name (case-insensitive), e.g. `alsa` or `jack`.
    pub fn with_name(name: &str) -> Result<Self, CaptureError> {
        let id = cpal::available_hosts()
            .into_iter()
            .find(|id| id.name().eq_ignore_ascii_case(name))
            .ok_or_else(|| {
                CaptureError::Init(format!(
                    "unknown audio host '{}' (available: {})",
                    name,
                    Self::available_host_names().join(", ")
                ))
            })?;

        let host = cpal::host_from_id(id)
            .map_err(|e| CaptureError::Init(format!("{}: {}", id.name(), e)))?;
        log::debug!("initialized audio host {}", id.name());
        Ok(Self { host })
    }

    /// Default host, or the named one when `name` is given.
    pub fn from_name(name: Option<&str>) -> Result<Self, CaptureError> {
        match name {
            Some(name) => Self::with_name(name),
            None => Ok(Self::initialize()),
        }
    }

    /// Names of the hosts compiled into this build and available at runtime.
    pub fn available_host_names() -> Vec<&'static str> {
        cpal::available_hosts().iter().map(|id| id.name()).collect()
    }

    pub fn name(&self) -> &'static str {
        self.host.id().name()
    }
}

impl AudioHost for CpalHost {
    fn devices(&self) -> Result<Vec<AudioDevice>, CaptureError> {
        DeviceEnumerator::new(&self.host).list_devices()
    }

    fn open_input_stream(
        &self,
        device: &AudioDevice,
        params: &StreamParameters,
        callback: SampleCallback,
    ) -> Result<Box<dyn InputStream>, CaptureError> {
        let enumerator = DeviceEnumerator::new(&self.host);
        let stream = CpalInputStream::open_enumerated(&enumerator, device, params, callback)?;
        Ok(Box::new(stream))
    }
}

impl Drop for CpalHost {
    fn drop(&mut self) {
        log::debug!("released audio host {}", self.name());
    }
}
