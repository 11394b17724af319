//! Matching requested stream parameters against what a device supports.

use cpal::{BufferSize, SampleFormat, SampleRate, StreamConfig, SupportedBufferSize, SupportedStreamConfigRange};

use mic_capture_core::models::audio_models::StreamParameters;
use mic_capture_core::models::error::CaptureError;

/// Sample formats the stream can convert to 16-bit PCM, most preferred first.
pub const SUPPORTED_FORMATS: [SampleFormat; 3] = [SampleFormat::I16, SampleFormat::F32, SampleFormat::U16];

/// A concrete configuration the device has agreed to.
#[derive(Debug, Clone, PartialEq)]
pub struct NegotiatedConfig {
    pub stream_config: StreamConfig,
    pub sample_format: SampleFormat,
}

/// Pick a device configuration for `params`.
///
/// The channel count and sample rate must match exactly; nothing is
/// resampled or downmixed. Among matching ranges the native `i16` format
/// wins, then `f32`, then `u16`. A fixed buffer of `frames_per_buffer` is
/// requested when the device reports a range containing it.
pub fn negotiate(
    ranges: &[SupportedStreamConfigRange],
    params: &StreamParameters,
) -> Result<NegotiatedConfig, CaptureError> {
    let rate = SampleRate(params.sample_rate);

    let matching = |format: SampleFormat| {
        ranges.iter().find(|range| {
            range.channels() == params.channels
                && range.sample_format() == format
                && range.min_sample_rate() <= rate
                && rate <= range.max_sample_rate()
        })
    };

    let range = SUPPORTED_FORMATS
        .iter()
        .find_map(|&format| matching(format))
        .ok_or_else(|| {
            CaptureError::StreamOpen(format!(
                "device does not support {} channel(s) at {} Hz",
                params.channels, params.sample_rate
            ))
        })?;

    let buffer_size = match range.buffer_size() {
        SupportedBufferSize::Range { min, max }
            if (*min..=*max).contains(&params.frames_per_buffer) =>
        {
            BufferSize::Fixed(params.frames_per_buffer)
        }
        _ => {
            log::debug!(
                "device cannot fix buffer at {} frames, using host default",
                params.frames_per_buffer
            );
            BufferSize::Default
        }
    };

    Ok(NegotiatedConfig {
        stream_config: StreamConfig {
            channels: params.channels,
            sample_rate: rate,
            buffer_size,
        },
        sample_format: range.sample_format(),
    })
}
