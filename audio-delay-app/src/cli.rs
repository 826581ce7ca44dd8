//! Command-line interface for audio-delay
//!
//! Handles argument parsing and logging configuration.

use clap::Parser;
use log::LevelFilter;

use audio_delay_core::SessionConfiguration;

/// audio-delay - record from an input device and play it back after a delay
#[derive(Parser, Debug)]
#[command(name = "audio-delay")]
#[command(author, version, about, long_about = None)]
pub struct Args {
    /// Use an in-memory host with demo devices instead of real hardware
    #[arg(long)]
    pub simulate: bool,

    /// Device id to select at startup
    #[arg(short, long)]
    pub device: Option<String>,

    /// Initial delay in seconds (clamped to the allowed range)
    #[arg(long, default_value_t = 1.0)]
    pub delay: f64,

    /// Largest selectable delay in seconds
    #[arg(long, default_value_t = 3.0)]
    pub max_delay: f64,

    /// Print the detected input devices and exit
    #[arg(short, long)]
    pub list: bool,

    /// With --list, print devices as JSON
    #[arg(long, requires = "list")]
    pub json: bool,

    /// Start recording right away (needs --device)
    #[arg(long, requires = "device")]
    pub record: bool,

    /// Increase logging verbosity
    /// -v = info, -vv = debug, -vvv = trace
    #[arg(short, long, action = clap::ArgAction::Count)]
    pub verbose: u8,

    /// Suppress all output except errors
    #[arg(short, long)]
    pub quiet: bool,
}

impl Args {
    /// Get the log level filter based on verbosity flags
    pub fn log_level(&self) -> LevelFilter {
        if self.quiet {
            LevelFilter::Error
        } else {
            match self.verbose {
                0 => LevelFilter::Warn,
                1 => LevelFilter::Info,
                2 => LevelFilter::Debug,
                _ => LevelFilter::Trace,
            }
        }
    }

    pub fn session_config(&self) -> SessionConfiguration {
        SessionConfiguration {
            max_delay_secs: self.max_delay,
            initial_delay_secs: self.delay,
            ..Default::default()
        }
    }
}

/// Initialize the logging system based on CLI arguments
pub fn init_logging(args: &Args) {
    let mut builder = env_logger::Builder::new();

    // Keep dependencies quiet; cpal backends can be chatty.
    builder.filter_level(LevelFilter::Warn);

    for module in ["audio_delay", "audio_delay_core", "audio_delay_cpal"] {
        builder.filter_module(module, args.log_level());
    }

    // cpal internals only at -vvv
    if args.verbose >= 3 {
        builder.filter_module("cpal", args.log_level());
    }

    builder.format_timestamp_millis().parse_default_env().init();
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn verbosity_maps_to_levels() {
        let args = Args::parse_from(["audio-delay", "-vv"]);
        assert_eq!(args.log_level(), LevelFilter::Debug);

        let args = Args::parse_from(["audio-delay", "-q", "-vvv"]);
        assert_eq!(args.log_level(), LevelFilter::Error);
    }

    #[test]
    fn delay_flags_feed_session_config() {
        let args = Args::parse_from(["audio-delay", "--delay", "2.5", "--max-delay", "5"]);
        let config = args.session_config();
        assert_eq!(config.initial_delay_secs, 2.5);
        assert_eq!(config.max_delay_secs, 5.0);
        assert_eq!(config.min_delay_secs, 0.0);
    }

    #[test]
    fn json_and_record_need_their_companions() {
        assert!(Args::try_parse_from(["audio-delay", "--json"]).is_err());
        assert!(Args::try_parse_from(["audio-delay", "--record"]).is_err());
        assert!(Args::try_parse_from(["audio-delay", "--record", "-d", "mic-1"]).is_ok());
    }
}
