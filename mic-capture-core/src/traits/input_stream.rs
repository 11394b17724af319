use crate::models::error::CaptureError;

/// An opened input stream.
///
/// Dropping the stream closes it. After `stop` returns `Ok`, the host must
/// not invoke the sample callback again.
pub trait InputStream {
    /// Begin delivering samples to the callback.
    fn start(&mut self) -> Result<(), CaptureError>;

    /// Stop delivering samples.
    fn stop(&mut self) -> Result<(), CaptureError>;
}
