//! WAV file format utilities.
//!
//! Generates the canonical 44-byte RIFF header and serializes a complete
//! 16-bit PCM recording in one pass.

use crate::models::error::CaptureError;

/// Size of the standard WAV RIFF header in bytes.
pub const WAV_HEADER_SIZE: usize = 44;

/// Bytes in the RIFF chunk that precede the data payload, excluding the
/// 8-byte `"RIFF" <size>` prefix.
const RIFF_OVERHEAD: u32 = 36;

/// Largest data chunk the 32-bit RIFF size field can describe.
pub const MAX_DATA_SIZE: u32 = u32::MAX - RIFF_OVERHEAD;

/// Format constants written into the `fmt ` chunk.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct WavSpec {
    pub sample_rate: u32,
    pub channels: u16,
    pub bit_depth: u16,
}

impl WavSpec {
    pub fn mono_16bit(sample_rate: u32) -> Self {
        Self {
            sample_rate,
            channels: 1,
            bit_depth: 16,
        }
    }

    pub fn byte_rate(&self) -> u32 {
        self.sample_rate * self.channels as u32 * self.bit_depth as u32 / 8
    }

    pub fn block_align(&self) -> u16 {
        self.channels * self.bit_depth / 8
    }
}

/// Generate a 44-byte WAV RIFF header.
///
/// Format: PCM (format code 1), little-endian.
///
/// Layout:
/// ```text
/// [0-3]    "RIFF"
/// [4-7]    36 + data_size
/// [8-11]   "WAVE"
/// [12-15]  "fmt "
/// [16-19]  16 (PCM format chunk size)
/// [20-21]  1 (PCM format code)
/// [22-23]  channels
/// [24-27]  sample_rate
/// [28-31]  byte_rate = sample_rate * channels * bit_depth / 8
/// [32-33]  block_align = channels * bit_depth / 8
/// [34-35]  bit_depth
/// [36-39]  "data"
/// [40-43]  data_size
/// ```
pub fn generate_wav_header(spec: &WavSpec, data_size: u32) -> [u8; WAV_HEADER_SIZE] {
    let chunk_size = RIFF_OVERHEAD + data_size;

    let mut header = [0u8; WAV_HEADER_SIZE];

    // RIFF chunk descriptor
    header[0..4].copy_from_slice(b"RIFF");
    header[4..8].copy_from_slice(&chunk_size.to_le_bytes());
    header[8..12].copy_from_slice(b"WAVE");

    // fmt sub-chunk
    header[12..16].copy_from_slice(b"fmt ");
    header[16..20].copy_from_slice(&16u32.to_le_bytes());
    header[20..22].copy_from_slice(&1u16.to_le_bytes());
    header[22..24].copy_from_slice(&spec.channels.to_le_bytes());
    header[24..28].copy_from_slice(&spec.sample_rate.to_le_bytes());
    header[28..32].copy_from_slice(&spec.byte_rate().to_le_bytes());
    header[32..34].copy_from_slice(&spec.block_align().to_le_bytes());
    header[34..36].copy_from_slice(&spec.bit_depth.to_le_bytes());

    // data sub-chunk
    header[36..40].copy_from_slice(b"data");
    header[40..44].copy_from_slice(&data_size.to_le_bytes());

    header
}

/// Size in bytes of the data chunk for `sample_count` 16-bit samples.
///
/// Fails when the payload cannot be described by the 32-bit RIFF size field.
pub fn data_size(sample_count: usize) -> Result<u32, CaptureError> {
    sample_count
        .checked_mul(2)
        .and_then(|bytes| u32::try_from(bytes).ok())
        .filter(|bytes| *bytes <= MAX_DATA_SIZE)
        .ok_or_else(|| {
            CaptureError::Encoding(format!(
                "{} samples exceed the 4 GiB WAV size limit",
                sample_count
            ))
        })
}

/// Serialize samples as little-endian 16-bit PCM, in buffer order.
pub fn encode_samples(samples: &[i16]) -> Vec<u8> {
    let mut pcm = Vec::with_capacity(samples.len() * 2);
    for sample in samples {
        pcm.extend_from_slice(&sample.to_le_bytes());
    }
    pcm
}

/// Serialize a complete WAV file: header followed by the PCM payload.
pub fn encode_wav(spec: &WavSpec, samples: &[i16]) -> Result<Vec<u8>, CaptureError> {
    if spec.bit_depth != 16 {
        return Err(CaptureError::Encoding(format!(
            "unsupported bit depth: {}",
            spec.bit_depth
        )));
    }
    let data_size = data_size(samples.len())?;

    let mut bytes = Vec::with_capacity(WAV_HEADER_SIZE + data_size as usize);
    bytes.extend_from_slice(&generate_wav_header(spec, data_size));
    bytes.extend_from_slice(&encode_samples(samples));
    Ok(bytes)
}
