//! Audio device enumeration via cpal.
//!
//! Walks every device the host exposes, in host order, and reports its
//! input capability. Output-only devices are kept with zero input channels
//! so indices stay stable for the selection prompt.

use std::time::Duration;

use cpal::traits::{DeviceTrait, HostTrait};
use cpal::{SupportedBufferSize, SupportedStreamConfig, SupportedStreamConfigRange};

use mic_capture_core::models::audio_models::AudioDevice;
use mic_capture_core::models::error::CaptureError;

/// Audio device enumerator over one cpal host.
pub struct DeviceEnumerator<'a> {
    host: &'a cpal::Host,
}

impl<'a> DeviceEnumerator<'a> {
    pub fn new(host: &'a cpal::Host) -> Self {
        Self { host }
    }

    /// List every device the host reports.
    pub fn list_devices(&self) -> Result<Vec<AudioDevice>, CaptureError> {
        let devices = self
            .host
            .devices()
            .map_err(|e| CaptureError::DeviceQuery(format!("failed to enumerate devices: {}", e)))?;

        Ok(devices
            .enumerate()
            .map(|(index, device)| Self::describe(index, &device))
            .collect())
    }

    /// Re-resolve an enumerated device to its cpal handle.
    ///
    /// Fails if the device at that index has gone or been replaced since
    /// the listing was taken.
    pub fn find_device(&self, wanted: &AudioDevice) -> Result<cpal::Device, CaptureError> {
        let device = self
            .host
            .devices()
            .map_err(|e| CaptureError::StreamOpen(format!("failed to enumerate devices: {}", e)))?
            .nth(wanted.index)
            .ok_or_else(|| CaptureError::StreamOpen(format!("device {} is no longer available", wanted.index)))?;

        let name = display_name(wanted.index, device.name());
        if name != wanted.name {
            return Err(CaptureError::StreamOpen(format!(
                "device {} changed from '{}' to '{}'",
                wanted.index, wanted.name, name
            )));
        }
        Ok(device)
    }

    fn describe(index: usize, device: &cpal::Device) -> AudioDevice {
        let name = display_name(index, device.name());

        let max_input_channels = device
            .supported_input_configs()
            .map(|configs| max_input_channels(&configs.collect::<Vec<_>>()))
            .unwrap_or(0);

        let default_low_input_latency = device
            .default_input_config()
            .map(|config| low_latency(&config))
            .unwrap_or(Duration::ZERO);

        AudioDevice {
            index,
            name,
            max_input_channels,
            default_low_input_latency,
        }
    }
}

/// Name shown for the device at `index`, with a placeholder for devices
/// the host cannot name. Listing and re-resolving must agree on it.
pub fn display_name<E>(index: usize, name: Result<String, E>) -> String {
    name.unwrap_or_else(|_| format!("Unknown Device {}", index))
}

/// Widest channel count across the device's input configurations.
pub fn max_input_channels(ranges: &[SupportedStreamConfigRange]) -> u16 {
    ranges.iter().map(|r| r.channels()).max().unwrap_or(0)
}

/// Lowest latency the device advertises for its default input config:
/// the smallest buffer it accepts, at its default rate.
pub fn low_latency(config: &SupportedStreamConfig) -> Duration {
    match config.buffer_size() {
        SupportedBufferSize::Range { min, .. } if config.sample_rate().0 > 0 => {
            Duration::from_secs_f64(*min as f64 / config.sample_rate().0 as f64)
        }
        _ => Duration::ZERO,
    }
}
