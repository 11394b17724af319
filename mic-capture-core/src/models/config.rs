use std::path::PathBuf;
use std::time::Duration;

use super::audio_models::{AudioDevice, StreamParameters};
use crate::processing::wav_format::MAX_DATA_SIZE;

pub const DEFAULT_SAMPLE_RATE: u32 = 44100;
pub const DEFAULT_CHANNELS: u16 = 1;
pub const DEFAULT_BIT_DEPTH: u16 = 16;
pub const DEFAULT_FRAMES_PER_BUFFER: u32 = 1024;
pub const DEFAULT_DURATION: Duration = Duration::from_secs(5);
pub const DEFAULT_OUTPUT_PATH: &str = "output.wav";

/// Configuration for a capture session.
#[derive(Debug, Clone, PartialEq)]
pub struct CaptureConfiguration {
    /// Sample rate in Hz (default: 44100).
    pub sample_rate: u32,

    /// Bit depth for PCM output. Only 16 is supported.
    pub bit_depth: u16,

    /// Number of channels. Only mono is supported.
    pub channels: u16,

    /// Frames the host should deliver per callback (default: 1024).
    pub frames_per_buffer: u32,

    /// Wall-clock capture duration (default: 5 seconds).
    pub duration: Duration,

    /// Destination WAV file. Overwritten if it exists.
    pub output_path: PathBuf,

    /// Also write a `.metadata.json` sidecar next to the recording.
    pub write_metadata: bool,
}

impl CaptureConfiguration {
    pub fn validate(&self) -> Result<(), String> {
        if self.sample_rate == 0 {
            return Err("sample rate must be positive".into());
        }
        if self.bit_depth != 16 {
            return Err(format!("unsupported bit depth: {}", self.bit_depth));
        }
        if self.channels != 1 {
            return Err(format!("unsupported channel count: {}", self.channels));
        }
        if self.frames_per_buffer == 0 {
            return Err("frames per buffer must be positive".into());
        }
        if self.duration.is_zero() {
            return Err("capture duration must be positive".into());
        }
        if self.output_path.as_os_str().is_empty() {
            return Err("output path is empty".into());
        }
        let worst_case = self.expected_sample_count().saturating_add(self.sample_count_tolerance());
        if self.data_size_for(worst_case) > MAX_DATA_SIZE as u64 {
            return Err(format!(
                "{:.0}s at {} Hz exceeds the 4 GiB WAV size limit",
                self.duration.as_secs_f64(),
                self.sample_rate
            ));
        }
        Ok(())
    }

    /// Stream parameters for `device`, using its default low input latency.
    pub fn stream_parameters(&self, device: &AudioDevice) -> StreamParameters {
        StreamParameters {
            channels: self.channels,
            sample_rate: self.sample_rate,
            frames_per_buffer: self.frames_per_buffer,
            latency: device.default_low_input_latency,
        }
    }

    /// Samples a full-duration capture should yield.
    pub fn expected_sample_count(&self) -> u64 {
        let per_second = self.sample_rate as u64 * self.channels as u64;
        (self.duration.as_secs_f64() * per_second as f64).round() as u64
    }

    /// Deviation from `expected_sample_count` explained by callback granularity.
    pub fn sample_count_tolerance(&self) -> u64 {
        self.frames_per_buffer as u64 * self.channels as u64
    }

    pub fn is_nominal_sample_count(&self, count: u64) -> bool {
        count.abs_diff(self.expected_sample_count()) <= self.sample_count_tolerance()
    }

    /// Data chunk size in bytes for `sample_count` samples.
    pub fn data_size_for(&self, sample_count: u64) -> u64 {
        sample_count.saturating_mul((self.bit_depth / 8) as u64)
    }
}

impl Default for CaptureConfiguration {
    fn default() -> Self {
        Self {
            sample_rate: DEFAULT_SAMPLE_RATE,
            bit_depth: DEFAULT_BIT_DEPTH,
            channels: DEFAULT_CHANNELS,
            frames_per_buffer: DEFAULT_FRAMES_PER_BUFFER,
            duration: DEFAULT_DURATION,
            output_path: PathBuf::from(DEFAULT_OUTPUT_PATH),
            write_metadata: false,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn defaults_match_recording_constants() {
        let config = CaptureConfiguration::default();
        assert_eq!(config.sample_rate, 44100);
        assert_eq!(config.channels, 1);
        assert_eq!(config.bit_depth, 16);
        assert_eq!(config.frames_per_buffer, 1024);
        assert_eq!(config.duration, Duration::from_secs(5));
        assert_eq!(config.output_path, PathBuf::from("output.wav"));
        assert!(config.validate().is_ok());
    }

    #[test]
    fn validate_rejects_unsupported_formats() {
        let stereo = CaptureConfiguration {
            channels: 2,
            ..Default::default()
        };
        assert_eq!(stereo.validate(), Err("unsupported channel count: 2".into()));

        let float = CaptureConfiguration {
            bit_depth: 32,
            ..Default::default()
        };
        assert!(float.validate().is_err());

        let silent = CaptureConfiguration {
            sample_rate: 0,
            ..Default::default()
        };
        assert!(silent.validate().is_err());
    }

    #[test]
    fn validate_rejects_zero_duration_and_buffer() {
        let instant = CaptureConfiguration {
            duration: Duration::ZERO,
            ..Default::default()
        };
        assert!(instant.validate().is_err());

        let no_frames = CaptureConfiguration {
            frames_per_buffer: 0,
            ..Default::default()
        };
        assert!(no_frames.validate().is_err());
    }

    #[test]
    fn nominal_sample_count_for_five_seconds() {
        let config = CaptureConfiguration::default();
        assert_eq!(config.expected_sample_count(), 220_500);
        assert_eq!(config.sample_count_tolerance(), 1024);

        assert!(config.is_nominal_sample_count(220_500));
        assert!(config.is_nominal_sample_count(220_500 - 1024));
        assert!(config.is_nominal_sample_count(220_500 + 1024));
        assert!(!config.is_nominal_sample_count(220_500 - 1025));
        assert!(!config.is_nominal_sample_count(0));
    }

    #[test]
    fn stream_parameters_take_device_latency() {
        let device = AudioDevice {
            index: 3,
            name: "USB Mic".into(),
            max_input_channels: 2,
            default_low_input_latency: Duration::from_millis(8),
        };
        let params = CaptureConfiguration::default().stream_parameters(&device);
        assert_eq!(params.channels, 1);
        assert_eq!(params.sample_rate, 44100);
        assert_eq!(params.frames_per_buffer, 1024);
        assert_eq!(params.latency, Duration::from_millis(8));
    }

    #[test]
    fn data_size_is_two_bytes_per_sample() {
        let config = CaptureConfiguration::default();
        assert_eq!(config.data_size_for(0), 0);
        assert_eq!(config.data_size_for(220_500), 441_000);
        assert_eq!(config.data_size_for(u64::MAX), u64::MAX);
    }

    #[test]
    fn validate_rejects_recordings_past_the_wav_size_limit() {
        let longest = CaptureConfiguration {
            duration: Duration::from_secs(48_000),
            ..Default::default()
        };
        assert!(longest.validate().is_ok());

        for secs in [49_000, 1_000_000_000_000_000] {
            let too_long = CaptureConfiguration {
                duration: Duration::from_secs(secs),
                ..Default::default()
            };
            assert!(too_long.validate().is_err(), "{} s accepted", secs);
        }

        let max = CaptureConfiguration {
            duration: Duration::MAX,
            ..Default::default()
        };
        assert!(max.validate().is_err());
    }
}
