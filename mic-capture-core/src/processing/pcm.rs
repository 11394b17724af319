//! Sample format conversion into the 16-bit PCM the recorder stores.

/// Convert float samples in `[-1.0, 1.0]` to 16-bit PCM, replacing the
/// contents of `out`.
///
/// Out-of-range input is clamped, so `-1.0` maps to `-32767`, not `i16::MIN`.
/// `out` keeps its allocation, so the audio thread can reuse one buffer.
pub fn f32_to_i16(samples: &[f32], out: &mut Vec<i16>) {
    out.clear();
    out.extend(
        samples
            .iter()
            .map(|&sample| (sample.clamp(-1.0, 1.0) * i16::MAX as f32) as i16),
    );
}

/// Convert offset-binary unsigned samples to signed 16-bit PCM, replacing
/// the contents of `out`.
pub fn u16_to_i16(samples: &[u16], out: &mut Vec<i16>) {
    out.clear();
    out.extend(samples.iter().map(|&sample| (sample ^ 0x8000) as i16));
}

/// Root-mean-square level of a chunk, normalized to 0.0-1.0.
pub fn rms_level(samples: &[i16]) -> f32 {
    if samples.is_empty() {
        return 0.0;
    }
    let sum_sq: f64 = samples.iter().map(|&s| (s as f64) * (s as f64)).sum();
    let rms = (sum_sq / samples.len() as f64).sqrt();
    (rms / i16::MAX as f64).min(1.0) as f32
}
