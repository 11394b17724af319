use std::path::PathBuf;
use std::time::Duration;

use clap::Parser;

use mic_capture_core::models::config::{
    DEFAULT_DURATION, DEFAULT_FRAMES_PER_BUFFER, DEFAULT_OUTPUT_PATH, DEFAULT_SAMPLE_RATE,
};
use mic_capture_core::{CaptureConfiguration, CaptureError};

/// Record a fixed-duration mono WAV from a chosen input device.
#[derive(Debug, Parser)]
#[command(name = "mic-capture", version, about)]
pub struct Args {
    /// Device id to record from; prompts on stdin when omitted.
    #[arg(short, long, allow_negative_numbers = true)]
    pub device: Option<i64>,

    /// Output WAV file (overwritten if present).
    #[arg(short, long, default_value = DEFAULT_OUTPUT_PATH)]
    pub output: PathBuf,

    /// Recording length in seconds.
    #[arg(long, default_value_t = DEFAULT_DURATION.as_secs_f64(), allow_negative_numbers = true)]
    pub duration: f64,

    /// Sample rate in Hz.
    #[arg(long, default_value_t = DEFAULT_SAMPLE_RATE)]
    pub sample_rate: u32,

    /// Frames the host delivers per callback.
    #[arg(long, default_value_t = DEFAULT_FRAMES_PER_BUFFER)]
    pub frames_per_buffer: u32,

    /// Audio host to use (e.g. alsa, jack); platform default when omitted.
    #[arg(long)]
    pub host: Option<String>,

    /// List input devices and exit.
    #[arg(long)]
    pub list: bool,

    /// Write a JSON metadata sidecar next to the recording.
    #[arg(long)]
    pub metadata: bool,
}

impl Args {
    pub fn to_configuration(&self) -> Result<CaptureConfiguration, CaptureError> {
        let duration = Duration::try_from_secs_f64(self.duration).map_err(|_| {
            CaptureError::Configuration(format!("invalid duration: {}", self.duration))
        })?;

        let config = CaptureConfiguration {
            sample_rate: self.sample_rate,
            frames_per_buffer: self.frames_per_buffer,
            duration,
            output_path: self.output.clone(),
            write_metadata: self.metadata,
            ..Default::default()
        };
        config.validate().map_err(CaptureError::Configuration)?;
        Ok(config)
    }
}
