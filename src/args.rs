//! Command-line argument parsing for the repeat game.
//!
//! Handles:
//! - Board configuration file
//! - Sound directory override
//! - Sequence seed
//! - Help text generation

use std::env;
use std::path::PathBuf;

/// Parsed command-line arguments.
#[derive(Debug, Default)]
pub struct CliArgs {
    /// JSON board configuration
    pub config_path: Option<PathBuf>,
    /// Directory of `<sound>.wav` files (overrides the configuration)
    pub sound_dir: Option<PathBuf>,
    /// Fixed seed for reproducible sequences
    pub seed: Option<u64>,
    /// Whether help was requested
    pub show_help: bool,
}

impl CliArgs {
    /// Parse arguments from command line.
    pub fn parse() -> Self {
        Self::parse_from(env::args().skip(1))
    }

    /// Parse an explicit argument list (without the program name).
    pub fn parse_from(iter: impl IntoIterator<Item = String>) -> Self {
        let mut args = Self::default();
        let mut iter = iter.into_iter();

        while let Some(arg) = iter.next() {
            let (flag, inline) = match arg.split_once('=') {
                Some((flag, value)) if flag.starts_with("--") => (flag.to_string(), Some(value.to_string())),
                _ => (arg.clone(), None),
            };

            match flag.as_str() {
                "--help" | "-h" => {
                    args.show_help = true;
                }
                "--config" | "--sounds" | "--seed" => {
                    let Some(value) = inline.or_else(|| iter.next()) else {
                        eprintln!("{} requires an argument", flag);
                        args.show_help = true;
                        continue;
                    };
                    match flag.as_str() {
                        "--config" => args.config_path = Some(PathBuf::from(value)),
                        "--sounds" => args.sound_dir = Some(PathBuf::from(value)),
                        _ => match value.parse() {
                            Ok(seed) => args.seed = Some(seed),
                            Err(_) => {
                                eprintln!("Invalid seed: {}", value);
                                args.show_help = true;
                            }
                        },
                    }
                }
                _ => {
                    eprintln!("Unknown argument: {}", arg);
                    args.show_help = true;
                }
            }
        }

        args
    }

    /// Print help text to stderr.
    pub fn print_help() {
        eprintln!(
            "Usage:\n  repeat [--config <board.json>] [--sounds <dir>] [--seed <n>]\n\n\
             Flags:\n\
             \x20 --config <file>   Board layout, sounds and timings (JSON)\n\
             \x20 --sounds <dir>    Directory containing <sound>.wav files\n\
             \x20 --seed <n>        Fixed seed for reproducible sequences\n\
             \x20 -h, --help        Show this help\n\n\
             Keys:\n\
             \x20 1-9               Press the matching button\n\
             \x20 q                 Quit\n\n\
             Set RUST_LOG=debug for event tracing.\n"
        );
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn parse(args: &[&str]) -> CliArgs {
        CliArgs::parse_from(args.iter().map(|a| a.to_string()))
    }

    #[test]
    fn test_flags_with_separate_values() {
        let args = parse(&["--config", "board.json", "--seed", "42"]);
        assert_eq!(args.config_path, Some(PathBuf::from("board.json")));
        assert_eq!(args.seed, Some(42));
        assert!(!args.show_help);
    }

    #[test]
    fn test_flags_with_inline_values() {
        let args = parse(&["--sounds=/opt/sound", "--seed=7"]);
        assert_eq!(args.sound_dir, Some(PathBuf::from("/opt/sound")));
        assert_eq!(args.seed, Some(7));
    }

    #[test]
    fn test_bad_input_requests_help() {
        assert!(parse(&["--seed", "abc"]).show_help);
        assert!(parse(&["--config"]).show_help);
        assert!(parse(&["board.json"]).show_help);
        assert!(parse(&["-h"]).show_help);
    }
}
