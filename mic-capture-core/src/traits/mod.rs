pub mod audio_host;
pub mod capture_delegate;
pub mod input_stream;
