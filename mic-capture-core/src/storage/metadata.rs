use std::fs;
use std::path::{Path, PathBuf};

use crate::models::error::CaptureError;
use crate::models::recording_result::RecordingMetadata;

/// Sidecar location for a recording: `output.wav` → `output.metadata.json`.
pub fn sidecar_path(recording_path: &Path) -> PathBuf {
    recording_path.with_extension("metadata.json")
}

/// Write recording metadata as a JSON sidecar file.
pub fn write_metadata(metadata: &RecordingMetadata, recording_path: &Path) -> Result<PathBuf, CaptureError> {
    let metadata_path = sidecar_path(recording_path);
    let json = serde_json::to_string_pretty(metadata)
        .map_err(|e| CaptureError::Encoding(format!("failed to serialize metadata: {}", e)))?;
    fs::write(&metadata_path, json).map_err(|e| CaptureError::io("failed to write metadata", e))?;
    Ok(metadata_path)
}

/// Read recording metadata from a JSON sidecar file.
pub fn read_metadata(recording_path: &Path) -> Result<RecordingMetadata, CaptureError> {
    let json = fs::read_to_string(sidecar_path(recording_path))
        .map_err(|e| CaptureError::io("failed to read metadata", e))?;
    serde_json::from_str(&json)
        .map_err(|e| CaptureError::Encoding(format!("failed to parse metadata: {}", e)))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::config::CaptureConfiguration;

    #[test]
    fn sidecar_sits_next_to_recording() {
        assert_eq!(
            sidecar_path(Path::new("takes/output.wav")),
            PathBuf::from("takes/output.metadata.json")
        );
    }

    #[test]
    fn write_then_read() {
        let recording = std::env::temp_dir().join(format!("mic_capture_meta_{}.wav", uuid::Uuid::new_v4()));
        let metadata = RecordingMetadata::new_mono(
            &CaptureConfiguration::default(),
            "Mic",
            3,
            &recording.to_string_lossy(),
            "deadbeef",
        );

        let written = write_metadata(&metadata, &recording).unwrap();
        assert_eq!(read_metadata(&recording).unwrap(), metadata);

        fs::remove_file(written).ok();
    }

    #[test]
    fn missing_sidecar_is_io_error() {
        let recording = std::env::temp_dir().join(format!("mic_capture_none_{}.wav", uuid::Uuid::new_v4()));
        assert!(matches!(read_metadata(&recording), Err(CaptureError::Io(_))));
    }
}
