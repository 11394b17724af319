use std::time::Duration;

use serde::{Deserialize, Serialize};

/// An audio device reported by the host, in host-enumeration order.
///
/// `index` is the device's position in the full host enumeration, so
/// filtering out output-only devices never renumbers the rest.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct AudioDevice {
    pub index: usize,
    pub name: String,
    pub max_input_channels: u16,
    pub default_low_input_latency: Duration,
}

impl AudioDevice {
    pub fn is_input(&self) -> bool {
        self.max_input_channels > 0
    }
}

/// Parameters for opening an input stream on a device.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct StreamParameters {
    pub channels: u16,
    pub sample_rate: u32,
    pub frames_per_buffer: u32,
    /// Requested latency; hosts that cannot take a latency hint derive it
    /// from `frames_per_buffer` instead.
    pub latency: Duration,
}

/// Counters collected while a stream is running.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct CaptureDiagnostics {
    pub callback_count: u64,
    pub samples_total: u64,
    /// Callback chunks that arrived after the buffer was sealed.
    pub late_callbacks: u64,
}
