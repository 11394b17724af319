mod cli;
mod console;

use std::process;
use std::sync::Arc;

use clap::Parser;

use mic_capture_core::{list_input_devices, select_device, CaptureError, Recorder};
use mic_capture_cpal::CpalHost;

use cli::Args;
use console::ConsoleDelegate;

fn main() {
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("warn")).init();

    let args = Args::parse();
    if let Err(err) = run(&args) {
        eprintln!("Error: {}", err);
        process::exit(1);
    }
}

/// Everything that holds the audio host lives in here, so the host is
/// released before `main` exits, on success and failure alike.
fn run(args: &Args) -> Result<(), CaptureError> {
    let config = args.to_configuration()?;
    let host = CpalHost::from_name(args.host.as_deref())?;
    log::debug!("using audio host {}", host.name());

    let devices = list_input_devices(&host)?;
    print!("{}", console::format_devices(&devices));
    if args.list {
        return Ok(());
    }

    let id = match args.device {
        Some(id) => id,
        None => console::prompt_stdin()?,
    };
    let device = select_device(id, &devices)?;
    println!("Using device: {}", device.name);

    let mut recorder = Recorder::new(host, config)?;
    recorder.set_delegate(Arc::new(ConsoleDelegate));
    recorder.record(&device)?;
    Ok(())
}
