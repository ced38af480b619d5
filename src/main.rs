use anyhow::Result;
use clap::{CommandFactory, Parser};
use owo_colors::OwoColorize;
use vaani::app::{SessionOptions, run_session};
use vaani::audio::capture::list_devices;
use vaani::cli::{Cli, Commands};

#[tokio::main]
async fn main() -> Result<()> {
    let cli = Cli::parse();

    match cli.command {
        None => {
            let opts = SessionOptions {
                device: cli.device,
                output_dir: cli.output,
                once: cli.once,
                no_play: cli.no_play,
                quiet: cli.quiet,
                verbosity: cli.verbose,
            };
            if let Err(e) = run_session(opts).await {
                eprintln!("{}", format!("Error: {}", e).red());
                std::process::exit(1);
            }
        }
        Some(Commands::Devices) => {
            list_audio_devices()?;
        }
        Some(Commands::Completions { shell }) => {
            clap_complete::generate(shell, &mut Cli::command(), "vaani", &mut std::io::stdout());
        }
    }

    Ok(())
}

/// List available audio input devices.
fn list_audio_devices() -> Result<()> {
    let devices = list_devices()?;

    if devices.is_empty() {
        eprintln!("No audio input devices found");
        std::process::exit(1);
    }

    println!("Available audio input devices:");
    for (idx, device) in devices.iter().enumerate() {
        println!("  [{}] {}", idx, device);
    }

    Ok(())
}
