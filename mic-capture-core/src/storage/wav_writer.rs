use std::fs::File;
use std::io::{BufWriter, Write};
use std::path::PathBuf;

use sha2::{Digest, Sha256};

use crate::models::error::CaptureError;
use crate::processing::wav_format::{self, WavSpec};

/// Summary of a finished WAV write.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct WrittenWav {
    pub bytes_written: u64,
    /// SHA-256 hex digest of the complete file.
    pub checksum: String,
}

/// Writes a complete recording to disk as a canonical PCM WAV file.
///
/// ## File Format
///
/// ```text
/// [44-byte WAV header]
/// [16-bit little-endian PCM samples...]
/// ```
///
/// The whole file is serialized in memory first, so the header sizes are
/// final when written. An existing file at the path is truncated.
pub struct WavFileWriter {
    file_path: PathBuf,
    spec: WavSpec,
}

impl WavFileWriter {
    pub fn new(file_path: impl Into<PathBuf>, spec: WavSpec) -> Self {
        Self {
            file_path: file_path.into(),
            spec,
        }
    }

    /// Encode `samples` and write them to the output file.
    pub fn write(&self, samples: &[i16]) -> Result<WrittenWav, CaptureError> {
        let bytes = wav_format::encode_wav(&self.spec, samples)?;

        let file = File::create(&self.file_path)
            .map_err(|e| CaptureError::io("failed to create file", e))?;
        let mut writer = BufWriter::new(file);
        writer
            .write_all(&bytes)
            .map_err(|e| CaptureError::io("write failed", e))?;
        writer
            .flush()
            .map_err(|e| CaptureError::io("flush failed", e))?;

        log::debug!(
            "wrote {} bytes to {}",
            bytes.len(),
            self.file_path.display()
        );

        Ok(WrittenWav {
            bytes_written: bytes.len() as u64,
            checksum: sha256_hex(&bytes),
        })
    }
}

/// Compute SHA-256 hex digest of a byte slice.
pub fn sha256_hex(data: &[u8]) -> String {
    let digest = Sha256::digest(data);
    hex_encode(&digest)
}

fn hex_encode(bytes: &[u8]) -> String {
    bytes.iter().map(|b| format!("{:02x}", b)).collect()
}
