//! Terminal output and input for the recorder.

use std::io::{self, BufRead, Write};

use mic_capture_core::{
    parse_selection, AudioDevice, CaptureDelegate, CaptureError, CaptureState, RecordingResult,
};

/// Prints recorder progress to stdout.
pub struct ConsoleDelegate;

impl CaptureDelegate for ConsoleDelegate {
    fn on_state_changed(&self, state: &CaptureState) {
        match state {
            CaptureState::Recording { .. } => {
                println!("\nRecording... Speak into the microphone.");
            }
            CaptureState::Stopped { sample_count } => {
                log::info!("stopped after {} samples", sample_count);
            }
            _ => {}
        }
    }

    fn on_error(&self, error: &CaptureError) {
        log::debug!("recorder failed: {}", error);
    }

    fn on_capture_finished(&self, result: &RecordingResult) {
        println!("\nRecording saved as {}!", result.file_path.display());
        log::info!(
            "{:.2}s, {} bytes, sha256 {}",
            result.duration_secs,
            result.bytes_written,
            result.checksum
        );
    }
}

/// Render the device listing, one line per device, under its host id.
pub fn format_devices(devices: &[AudioDevice]) -> String {
    let mut out = String::from("\nAvailable Audio Devices:\n");
    for device in devices {
        out.push_str(&format!(
            "[{}] {} - Max Input Channels: {}\n",
            device.index, device.name, device.max_input_channels
        ));
    }
    out
}

/// Ask for a device id on `input`.
pub fn prompt_device_id(input: &mut impl BufRead, output: &mut impl Write) -> Result<i64, CaptureError> {
    write!(output, "\nEnter the ID of the microphone to use: ")
        .and_then(|_| output.flush())
        .map_err(|e| CaptureError::InvalidSelection(format!("failed to write prompt: {}", e)))?;

    let mut line = String::new();
    input
        .read_line(&mut line)
        .map_err(|e| CaptureError::InvalidSelection(format!("failed to read selection: {}", e)))?;
    parse_selection(&line)
}

/// Prompt on the process's stdin/stdout.
pub fn prompt_stdin() -> Result<i64, CaptureError> {
    let stdin = io::stdin();
    let mut stdout = io::stdout();
    prompt_device_id(&mut stdin.lock(), &mut stdout)
}
