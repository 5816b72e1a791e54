//! ShakeCursor CLI — replay pointer traces through the shake-to-magnify core.
//!
//! Usage:
//!   shakecursor replay <TRACE>     Run a trace and report shakes and magnification
//!   shakecursor synth [OPTIONS]    Generate a synthetic pointer trace
//!   shakecursor config show        Print the effective configuration
//!   shakecursor config init        Write the default configuration file

use std::path::{Path, PathBuf};

use clap::{Parser, Subcommand, ValueEnum};
use shakecursor_common::config::AppConfig;
use shakecursor_common::error::ShakeCursorResult;

mod commands;
mod sim;

#[derive(Parser)]
#[command(
    name = "shakecursor",
    about = "Shake the pointer to find it: gesture detection and cursor magnification",
    version,
    author
)]
struct Cli {
    /// Enable verbose logging
    #[arg(short, long, global = true)]
    verbose: bool,

    /// Configuration file (defaults to the standard location)
    #[arg(short, long, global = true)]
    config: Option<PathBuf>,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Replay a pointer trace through the detector and magnifier
    Replay {
        /// Path to the JSONL trace
        trace: PathBuf,

        /// Motion window in milliseconds
        #[arg(long)]
        interval_ms: Option<u64>,

        /// Shake factor threshold
        #[arg(long)]
        sensitivity: Option<f64>,

        /// Magnification after the first shake
        #[arg(long)]
        magnification: Option<f64>,

        /// Extra magnification per further shake
        #[arg(long)]
        over_magnification: Option<f64>,

        /// Simulated frame interval in milliseconds
        #[arg(long, default_value = "16")]
        frame_ms: u64,
    },

    /// Generate a synthetic pointer trace
    Synth {
        /// Motion pattern
        #[arg(long, value_enum, default_value = "shake")]
        pattern: Pattern,

        /// Swing amplitude in logical pixels
        #[arg(long, default_value = "150")]
        amplitude: f64,

        /// Number of direction reversals
        #[arg(long, default_value = "6")]
        reversals: u32,

        /// Duration of one swing in milliseconds
        #[arg(long, default_value = "60")]
        swing_ms: u64,

        /// Sampling interval in milliseconds
        #[arg(long, default_value = "8")]
        step_ms: u64,

        /// Output file (stdout when omitted)
        #[arg(short, long)]
        output: Option<PathBuf>,
    },

    /// Inspect or create the configuration file
    Config {
        #[command(subcommand)]
        action: ConfigAction,
    },
}

#[derive(Subcommand)]
enum ConfigAction {
    /// Print the effective configuration as JSON
    Show,

    /// Write the default configuration
    Init {
        /// Overwrite an existing file
        #[arg(long)]
        force: bool,
    },
}

/// Synthetic motion patterns.
#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
pub enum Pattern {
    /// Horizontal back-and-forth wiggle
    Shake,
    /// One straight diagonal sweep
    Line,
    /// Back-and-forth confined to a few pixels
    Jitter,
}

/// Resolve the configuration for `command`.
///
/// An explicit `--config` file must exist, except for `config init`, which
/// is what creates it.
fn load_config(path: Option<&Path>, command: &Commands) -> ShakeCursorResult<AppConfig> {
    let creating = matches!(
        command,
        Commands::Config {
            action: ConfigAction::Init { .. }
        }
    );
    match path {
        Some(_) if creating => Ok(AppConfig::default()),
        Some(path) => AppConfig::load_from(path),
        None => Ok(AppConfig::load()),
    }
}

fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();

    let config = load_config(cli.config.as_deref(), &cli.command)?;
    shakecursor_common::logging::init_logging(&config.logging, cli.verbose);

    match cli.command {
        Commands::Replay {
            trace,
            interval_ms,
            sensitivity,
            magnification,
            over_magnification,
            frame_ms,
        } => {
            let mut shake = config.shake.clone();
            if let Some(v) = interval_ms {
                shake.time_interval_ms = v;
            }
            if let Some(v) = sensitivity {
                shake.sensitivity = v;
            }
            if let Some(v) = magnification {
                shake.magnification = v;
            }
            if let Some(v) = over_magnification {
                shake.over_magnification = v;
            }
            commands::replay::run(trace, shake, frame_ms)
        }
        Commands::Synth {
            pattern,
            amplitude,
            reversals,
            swing_ms,
            step_ms,
            output,
        } => commands::synth::run(pattern, amplitude, reversals, swing_ms, step_ms, output),
        Commands::Config { action } => match action {
            ConfigAction::Show => commands::config::show(&config),
            ConfigAction::Init { force } => commands::config::init(cli.config, force),
        },
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use shakecursor_common::error::ShakeCursorError;

    fn scratch_dir(name: &str) -> PathBuf {
        let dir = std::env::temp_dir().join(format!(
            "shakecursor-cli-{name}-{}",
            std::process::id()
        ));
        std::fs::remove_dir_all(&dir).ok();
        dir
    }

    #[test]
    fn test_config_init_creates_missing_explicit_path() {
        let dir = scratch_dir("init");
        let path = dir.join("nested").join("config.json");
        let cli = Cli::try_parse_from([
            "shakecursor",
            "--config",
            path.to_str().unwrap(),
            "config",
            "init",
        ])
        .unwrap();

        let config = load_config(cli.config.as_deref(), &cli.command).unwrap();
        assert_eq!(config, AppConfig::default());

        commands::config::init(cli.config.clone(), false).unwrap();
        assert_eq!(AppConfig::load_from(&path).unwrap(), AppConfig::default());
        assert!(commands::config::init(cli.config, false).is_err());
        std::fs::remove_dir_all(&dir).ok();
    }

    #[test]
    fn test_other_commands_require_explicit_config_to_exist() {
        let dir = scratch_dir("show");
        let path = dir.join("config.json");
        let cli = Cli::try_parse_from([
            "shakecursor",
            "-c",
            path.to_str().unwrap(),
            "config",
            "show",
        ])
        .unwrap();

        let err = load_config(cli.config.as_deref(), &cli.command).unwrap_err();
        assert!(matches!(err, ShakeCursorError::FileNotFound { .. }));
    }
}
