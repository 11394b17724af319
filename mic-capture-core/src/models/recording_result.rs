use std::path::PathBuf;

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use super::config::CaptureConfiguration;

/// Result returned when a recording has been encoded to disk.
#[derive(Debug, Clone, PartialEq)]
pub struct RecordingResult {
    pub file_path: PathBuf,
    pub duration_secs: f64,
    pub sample_count: usize,
    pub bytes_written: u64,
    pub checksum: String,
    pub metadata: RecordingMetadata,
}

/// Metadata stored alongside a recording.
///
/// Serializable for the optional JSON sidecar.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RecordingMetadata {
    pub id: String,
    pub created_at: DateTime<Utc>,
    pub device_name: String,
    pub sample_rate: u32,
    pub channels: u16,
    pub bit_depth: u16,
    pub sample_count: usize,
    pub duration_secs: f64,
    pub file_path: String,
    pub checksum: String,
}

impl RecordingMetadata {
    /// Creates metadata for a finished mono recording.
    ///
    /// `duration_secs` is derived from the sample count, not wall-clock time.
    pub fn new_mono(
        config: &CaptureConfiguration,
        device_name: &str,
        sample_count: usize,
        file_path: &str,
        checksum: &str,
    ) -> Self {
        Self {
            id: uuid::Uuid::new_v4().to_string(),
            created_at: Utc::now(),
            device_name: device_name.to_string(),
            sample_rate: config.sample_rate,
            channels: config.channels,
            bit_depth: config.bit_depth,
            sample_count,
            duration_secs: audio_duration_secs(sample_count, config.sample_rate, config.channels),
            file_path: file_path.to_string(),
            checksum: checksum.to_string(),
        }
    }
}

/// Playback length of `sample_count` interleaved samples.
pub fn audio_duration_secs(sample_count: usize, sample_rate: u32, channels: u16) -> f64 {
    let per_second = sample_rate as f64 * channels as f64;
    if per_second == 0.0 {
        return 0.0;
    }
    sample_count as f64 / per_second
}
