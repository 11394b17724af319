use std::sync::Arc;

use parking_lot::Mutex;

use crate::models::audio_models::CaptureDiagnostics;

/// Immutable mono PCM recording, in arrival order.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct SampleBuffer {
    samples: Vec<i16>,
}

impl SampleBuffer {
    pub fn new(samples: Vec<i16>) -> Self {
        Self { samples }
    }

    pub fn samples(&self) -> &[i16] {
        &self.samples
    }

    pub fn len(&self) -> usize {
        self.samples.len()
    }

    pub fn is_empty(&self) -> bool {
        self.samples.is_empty()
    }
}

#[derive(Debug, Default)]
struct Inner {
    samples: Vec<i16>,
    sealed: bool,
    diagnostics: CaptureDiagnostics,
}

/// Append-only sample store shared between the audio callback and the
/// control thread.
///
/// The callback appends; the control thread calls [`seal`](Self::seal)
/// once the stream has stopped and receives the finished [`SampleBuffer`].
/// Chunks that arrive after sealing are dropped and counted in
/// `late_callbacks`, so the snapshot never changes after handoff.
///
/// Clones share the same storage.
#[derive(Debug, Clone, Default)]
pub struct SharedSampleBuffer {
    inner: Arc<Mutex<Inner>>,
}

impl SharedSampleBuffer {
    pub fn new() -> Self {
        Self::default()
    }

    /// Pre-allocate room for `capacity` samples.
    pub fn with_capacity(capacity: usize) -> Self {
        let inner = Inner {
            samples: Vec::with_capacity(capacity),
            ..Default::default()
        };
        Self {
            inner: Arc::new(Mutex::new(inner)),
        }
    }

    /// Append a delivered chunk. Returns `false` if the buffer is sealed.
    pub fn append(&self, chunk: &[i16]) -> bool {
        let mut inner = self.inner.lock();
        if inner.sealed {
            inner.diagnostics.late_callbacks += 1;
            return false;
        }
        inner.samples.extend_from_slice(chunk);
        inner.diagnostics.callback_count += 1;
        inner.diagnostics.samples_total += chunk.len() as u64;
        true
    }

    /// Number of samples appended so far.
    pub fn len(&self) -> usize {
        self.inner.lock().samples.len()
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    pub fn is_sealed(&self) -> bool {
        self.inner.lock().sealed
    }

    pub fn diagnostics(&self) -> CaptureDiagnostics {
        self.inner.lock().diagnostics.clone()
    }

    /// Close the buffer to further appends and take its contents.
    ///
    /// Sealing twice yields an empty buffer the second time.
    pub fn seal(&self) -> SampleBuffer {
        let mut inner = self.inner.lock();
        inner.sealed = true;
        SampleBuffer::new(std::mem::take(&mut inner.samples))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::thread;

    #[test]
    fn appends_in_delivery_order() {
        let buf = SharedSampleBuffer::new();
        buf.append(&[1, 2, 3]);
        buf.append(&[4]);
        buf.append(&[]);
        buf.append(&[5, 6]);

        assert_eq!(buf.len(), 6);
        assert_eq!(buf.seal().samples(), &[1, 2, 3, 4, 5, 6]);
    }

    #[test]
    fn seal_rejects_late_chunks() {
        let buf = SharedSampleBuffer::with_capacity(16);
        assert!(buf.append(&[10, 20]));

        let snapshot = buf.seal();
        assert!(buf.is_sealed());
        assert!(!buf.append(&[30]));

        assert_eq!(snapshot.samples(), &[10, 20]);
        assert!(buf.is_empty());

        let diag = buf.diagnostics();
        assert_eq!(diag.callback_count, 1);
        assert_eq!(diag.samples_total, 2);
        assert_eq!(diag.late_callbacks, 1);
    }

    #[test]
    fn second_seal_is_empty() {
        let buf = SharedSampleBuffer::new();
        buf.append(&[1]);
        assert_eq!(buf.seal().len(), 1);
        assert!(buf.seal().is_empty());
    }

    #[test]
    fn writer_thread_then_reader() {
        let buf = SharedSampleBuffer::new();
        let writer = buf.clone();

        let handle = thread::spawn(move || {
            for chunk in 0..100i16 {
                writer.append(&[chunk; 8]);
            }
        });
        handle.join().unwrap();

        let snapshot = buf.seal();
        assert_eq!(snapshot.len(), 800);
        assert_eq!(&snapshot.samples()[0..8], &[0; 8]);
        assert_eq!(&snapshot.samples()[792..], &[99; 8]);
    }
}
