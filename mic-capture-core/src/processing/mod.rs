pub mod pcm;
pub mod sample_buffer;
pub mod wav_format;
