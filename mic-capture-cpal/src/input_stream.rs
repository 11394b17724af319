//! cpal input stream wrapper.
//!
//! Negotiates a device configuration, converts whatever the device
//! delivers into 16-bit PCM, and forwards each chunk to the
//! `SampleCallback` on cpal's audio thread.

use cpal::traits::{DeviceTrait, StreamTrait};
use cpal::SampleFormat;

use mic_capture_core::models::audio_models::StreamParameters;
use mic_capture_core::models::error::CaptureError;
use mic_capture_core::processing::pcm;
use mic_capture_core::traits::audio_host::SampleCallback;
use mic_capture_core::traits::input_stream::InputStream;

use crate::device_enumerator::DeviceEnumerator;
use crate::stream_config::negotiate;

/// An opened cpal input stream. Dropping it closes the stream.
pub struct CpalInputStream {
    stream: cpal::Stream,
    device_name: String,
}

impl CpalInputStream {
    pub fn open(
        device: &cpal::Device,
        params: &StreamParameters,
        callback: SampleCallback,
    ) -> Result<Self, CaptureError> {
        let device_name = device.name().unwrap_or_default();

        let ranges: Vec<_> = device
            .supported_input_configs()
            .map_err(|e| CaptureError::StreamOpen(format!("failed to query input configs: {}", e)))?
            .collect();
        let negotiated = negotiate(&ranges, params)?;
        let config = negotiated.stream_config;

        // cpal has no latency parameter; the buffer size stands in for it.
        log::debug!(
            "'{}': {:?} at {} Hz, buffer {:?} (requested latency {:?})",
            device_name,
            negotiated.sample_format,
            config.sample_rate.0,
            config.buffer_size,
            params.latency
        );

        // Conversion target for non-i16 formats, reused across callbacks.
        let mut scratch: Vec<i16> = Vec::with_capacity(params.frames_per_buffer as usize);

        let stream = match negotiated.sample_format {
            SampleFormat::I16 => device.build_input_stream(
                &config,
                move |data: &[i16], _: &cpal::InputCallbackInfo| callback(data),
                error_handler(device_name.clone()),
                None,
            ),
            SampleFormat::F32 => device.build_input_stream(
                &config,
                move |data: &[f32], _: &cpal::InputCallbackInfo| {
                    pcm::f32_to_i16(data, &mut scratch);
                    callback(&scratch)
                },
                error_handler(device_name.clone()),
                None,
            ),
            SampleFormat::U16 => device.build_input_stream(
                &config,
                move |data: &[u16], _: &cpal::InputCallbackInfo| {
                    pcm::u16_to_i16(data, &mut scratch);
                    callback(&scratch)
                },
                error_handler(device_name.clone()),
                None,
            ),
            other => {
                return Err(CaptureError::StreamOpen(format!(
                    "unsupported sample format {:?}",
                    other
                )))
            }
        }
        .map_err(|e| CaptureError::StreamOpen(format!("failed to build stream: {}", e)))?;

        Ok(Self { stream, device_name })
    }

    /// Resolve `device` through `enumerator` and open a stream on it.
    pub fn open_enumerated(
        enumerator: &DeviceEnumerator<'_>,
        device: &mic_capture_core::AudioDevice,
        params: &StreamParameters,
        callback: SampleCallback,
    ) -> Result<Self, CaptureError> {
        let handle = enumerator.find_device(device)?;
        Self::open(&handle, params, callback)
    }
}

impl InputStream for CpalInputStream {
    fn start(&mut self) -> Result<(), CaptureError> {
        self.stream
            .play()
            .map_err(|e| CaptureError::StreamStart(e.to_string()))?;
        log::debug!("stream on '{}' started", self.device_name);
        Ok(())
    }

    fn stop(&mut self) -> Result<(), CaptureError> {
        self.stream
            .pause()
            .map_err(|e| CaptureError::StreamStop(e.to_string()))?;
        log::debug!("stream on '{}' stopped", self.device_name);
        Ok(())
    }
}

impl Drop for CpalInputStream {
    fn drop(&mut self) {
        log::debug!("closing stream on '{}'", self.device_name);
    }
}

fn error_handler(device_name: String) -> impl FnMut(cpal::StreamError) + Send + 'static {
    move |err| log::error!("audio stream error on '{}': {}", device_name, err)
}
