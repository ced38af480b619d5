//! Command-line interface for vaani
//!
//! Provides argument parsing using clap derive macros.

use clap::{Parser, Subcommand};
use clap_complete::Shell;
use std::path::PathBuf;

/// Record speech and play back its translation
#[derive(Parser, Debug)]
#[command(
    name = "vaani",
    version,
    about = "Record speech and play back its translation"
)]
pub struct Cli {
    /// Subcommand to execute
    #[command(subcommand)]
    pub command: Option<Commands>,

    /// Audio input device (default: system default microphone)
    #[arg(long, value_name = "DEVICE")]
    pub device: Option<String>,

    /// Directory for the recorded and translated audio files
    #[arg(short, long, value_name = "DIR", default_value = ".")]
    pub output: PathBuf,

    /// Exit after one record-translate round (default: keep prompting)
    #[arg(long)]
    pub once: bool,

    /// Skip local playback, only save the audio files
    #[arg(long)]
    pub no_play: bool,

    /// Suppress status messages (quiet mode)
    #[arg(short, long)]
    pub quiet: bool,

    /// Verbose output (-v: request details, -vv: full diagnostics)
    #[arg(short, long, action = clap::ArgAction::Count)]
    pub verbose: u8,
}

/// Available commands
#[derive(Subcommand, Debug)]
pub enum Commands {
    /// List available audio input devices
    Devices,

    /// Generate shell completion scripts
    Completions {
        /// Shell to generate completions for
        #[arg(value_enum)]
        shell: Shell,
    },
}

#[cfg(test)]
mod tests {
    use super::*;
    use clap::CommandFactory;

    #[test]
    fn cli_definition_is_consistent() {
        Cli::command().debug_assert();
    }

    #[test]
    fn defaults_to_interactive_session() {
        let cli = Cli::parse_from(["vaani"]);
        assert!(cli.command.is_none());
        assert!(!cli.once);
        assert!(!cli.quiet);
        assert_eq!(cli.output, PathBuf::from("."));
    }

    #[test]
    fn parses_session_flags() {
        let cli = Cli::parse_from([
            "vaani", "--device", "pipewire", "--output", "/tmp/v", "--once", "--no-play", "-vv",
        ]);
        assert_eq!(cli.device.as_deref(), Some("pipewire"));
        assert_eq!(cli.output, PathBuf::from("/tmp/v"));
        assert!(cli.once);
        assert!(cli.no_play);
        assert_eq!(cli.verbose, 2);
    }

    #[test]
    fn parses_devices_subcommand() {
        let cli = Cli::parse_from(["vaani", "devices"]);
        assert!(matches!(cli.command, Some(Commands::Devices)));
    }
}
