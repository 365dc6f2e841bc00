//! Command-line interface implementation
//!
//! This module provides the CLI entry point and dispatches to submodules
//! for specific command implementations.

mod detect;
mod extend;
mod info;

use clap::{Parser, Subcommand};
use std::path::{Path, PathBuf};
use std::process::ExitCode;

use glob::glob;
use tracing_subscriber::EnvFilter;

use crate::config::{load_config, merge_cli_overrides, BeatloopConfig, CliOverrides};
use crate::loops::{LoopType, SliceSize};
use crate::models::Sequence;
use crate::validate::suggest_name;

/// Exit codes
pub(crate) const EXIT_SUCCESS: u8 = 0;
pub(crate) const EXIT_ERROR: u8 = 1;
pub(crate) const EXIT_INVALID_ARGS: u8 = 2;

/// Environment variable holding the log filter.
pub const LOG_ENV: &str = "BEATLOOP_LOG";

/// Check if a path looks like a sequence file (.json).
pub fn is_sequence_file(path: &Path) -> bool {
    matches!(path.extension().and_then(|e| e.to_str()), Some("json"))
}

/// Find all sequence files in a directory (recursively).
pub fn find_sequence_files(dir: &Path) -> Vec<PathBuf> {
    let mut files = Vec::new();
    if let Ok(paths) = glob(&format!("{}/**/*.json", dir.display())) {
        files.extend(paths.filter_map(Result::ok));
    }
    files.sort();
    files
}

/// Expand directories to the sequence files they contain.
pub(crate) fn collect_inputs(inputs: &[PathBuf]) -> Vec<PathBuf> {
    let mut files = Vec::new();
    for input in inputs {
        if input.is_dir() {
            files.extend(find_sequence_files(input));
        } else {
            files.push(input.clone());
        }
    }
    files
}

/// Read a sequence from a JSON file.
///
/// Accepts either a `Sequence` object or a bare array of beats whose first
/// entry is the index-0 start pseudo-beat.
pub(crate) fn read_sequence(path: &Path) -> Result<Sequence, String> {
    let content = std::fs::read_to_string(path)
        .map_err(|e| format!("Cannot read '{}': {}", path.display(), e))?;
    let value: serde_json::Value = serde_json::from_str(&content)
        .map_err(|e| format!("Invalid JSON in '{}': {}", path.display(), e))?;
    let parsed = if value.is_array() {
        serde_json::from_value(value).map(Sequence::from_beats)
    } else {
        serde_json::from_value(value)
    };
    parsed.map_err(|e| format!("Invalid sequence in '{}': {}", path.display(), e))
}

/// Parse a LOOP type name, suggesting the closest match on failure.
pub(crate) fn parse_loop_type(name: &str) -> Result<LoopType, String> {
    name.parse::<LoopType>().map_err(|e| {
        let known: Vec<&str> = LoopType::ALL.iter().map(|t| t.as_str()).collect();
        match suggest_name(&name.to_ascii_lowercase().replace('-', "_"), &known) {
            Some(s) => format!("{}\n  Did you mean '{}'?", e, s),
            None => format!("{}\n  Run 'beatloop types' to list LOOP types", e),
        }
    })
}

/// Output format shared by reporting commands.
pub(crate) fn check_format(format: &str) -> Result<(), ExitCode> {
    if format != "text" && format != "json" {
        eprintln!("Error: --format must be 'text' or 'json'");
        return Err(ExitCode::from(EXIT_INVALID_ARGS));
    }
    Ok(())
}

/// Beatloop - Detect and build LOOP patterns in beat sequences
#[derive(Parser)]
#[command(name = "beatloop")]
#[command(about = "Beatloop - Detect and build LOOP patterns in beat sequences")]
#[command(version)]
pub struct Cli {
    /// Path to beatloop.toml (default: discovered from the working directory)
    #[arg(long, global = true)]
    pub config: Option<PathBuf>,

    /// Log detection and planning decisions
    #[arg(short, long, global = true)]
    pub verbose: bool,

    #[command(subcommand)]
    pub command: Commands,
}

#[derive(Subcommand)]
pub enum Commands {
    /// Detect LOOP patterns in complete sequences
    Detect {
        /// Sequence files (.json) or directories to search
        #[arg(required = true)]
        inputs: Vec<PathBuf>,

        /// Output format: text or json
        #[arg(long, default_value = "text")]
        format: String,

        /// Report horizontal flips as mirrored+rotated
        #[arg(long)]
        no_flipped: bool,
    },

    /// Show which LOOP types can close a partial sequence
    Analyze {
        /// Partial sequence file (.json)
        input: PathBuf,

        /// Output format: text or json
        #[arg(long, default_value = "text")]
        format: String,
    },

    /// Close a partial sequence with a LOOP type
    Extend {
        /// Partial sequence file (.json)
        input: PathBuf,

        /// LOOP type to apply (see 'beatloop types')
        #[arg(long = "type")]
        loop_type: String,

        /// Force a slice size: halved or quartered
        #[arg(long)]
        slice: Option<String>,

        /// Output file (default: stdout)
        #[arg(short, long)]
        output: Option<PathBuf>,
    },

    /// List the LOOP type catalogue
    Types {
        /// Output format: text or json
        #[arg(long, default_value = "text")]
        format: String,
    },

    /// Look up a related letter (maps: inverted, compound, counterpart)
    Letter {
        /// Relationship map
        map: String,

        /// Letter to look up
        letter: String,
    },

    /// Print the grid position table and its transformation maps
    Positions,
}

/// Install the stderr log subscriber.
///
/// The filter comes from `BEATLOOP_LOG`; without it the level is `warn`, or
/// `debug` with `--verbose`.
pub fn init_logging(verbose: bool) {
    let default = if verbose { "debug" } else { "warn" };
    let filter = EnvFilter::try_from_env(LOG_ENV).unwrap_or_else(|_| EnvFilter::new(default));
    // A subscriber may already be installed when embedded; keep it.
    let _ = tracing_subscriber::fmt().with_writer(std::io::stderr).with_env_filter(filter).try_init();
}

fn load_effective_config(
    path: Option<&Path>,
    overrides: &CliOverrides,
) -> Result<BeatloopConfig, ExitCode> {
    match load_config(path) {
        Ok(mut config) => {
            merge_cli_overrides(&mut config, overrides);
            Ok(config)
        }
        Err(e) => {
            eprintln!("Error: {}", e);
            Err(ExitCode::from(EXIT_ERROR))
        }
    }
}

/// Main entry point for the CLI
pub fn run() -> ExitCode {
    let cli = Cli::parse();
    init_logging(cli.verbose);

    let mut overrides = CliOverrides::default();
    match &cli.command {
        Commands::Detect { no_flipped: true, .. } => overrides.report_flipped = Some(false),
        Commands::Extend { slice: Some(slice), .. } => match slice.parse::<SliceSize>() {
            Ok(slice) => overrides.slice = Some(slice),
            Err(e) => {
                eprintln!("Error: {}", e);
                return ExitCode::from(EXIT_INVALID_ARGS);
            }
        },
        _ => {}
    }

    let config = match load_effective_config(cli.config.as_deref(), &overrides) {
        Ok(config) => config,
        Err(code) => return code,
    };

    match cli.command {
        Commands::Detect { inputs, format, .. } => detect::run_detect(&inputs, &format, &config),
        Commands::Analyze { input, format } => extend::run_analyze(&input, &format, &config),
        Commands::Extend { input, loop_type, slice, output } => {
            extend::run_extend(&input, &loop_type, slice.is_some(), output.as_deref(), &config)
        }
        Commands::Types { format } => info::run_types(&format, &config),
        Commands::Letter { map, letter } => info::run_letter(&map, &letter),
        Commands::Positions => info::run_positions(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    #[test]
    fn test_is_sequence_file() {
        assert!(is_sequence_file(Path::new("loops/rotated.json")));
        assert!(!is_sequence_file(Path::new("loops/rotated.toml")));
        assert!(!is_sequence_file(Path::new("loops/rotated")));
    }

    #[test]
    fn test_find_sequence_files() {
        let temp = TempDir::new().unwrap();
        let nested = temp.path().join("a").join("b");
        std::fs::create_dir_all(&nested).unwrap();
        std::fs::write(temp.path().join("one.json"), "{}").unwrap();
        std::fs::write(nested.join("two.json"), "{}").unwrap();
        std::fs::write(nested.join("notes.txt"), "").unwrap();

        let files = find_sequence_files(temp.path());
        assert_eq!(files.len(), 2);
        assert!(files.iter().all(|f| is_sequence_file(f)));
    }

    #[test]
    fn test_read_sequence_accepts_beat_array() {
        let temp = TempDir::new().unwrap();
        let path = temp.path().join("seq.json");
        let seq = crate::models::Sequence::starting_at(crate::models::GridPosition::Alpha1);
        std::fs::write(&path, serde_json::to_string(&seq.to_beats()).unwrap()).unwrap();

        let read = read_sequence(&path).unwrap();
        assert_eq!(read.start(), Some(crate::models::GridPosition::Alpha1));
    }

    #[test]
    fn test_read_sequence_reports_bad_json() {
        let temp = TempDir::new().unwrap();
        let path = temp.path().join("bad.json");
        std::fs::write(&path, "{not json").unwrap();
        assert!(read_sequence(&path).unwrap_err().starts_with("Invalid JSON"));
    }

    #[test]
    fn test_parse_loop_type_suggests() {
        assert_eq!(parse_loop_type("strict-rotated"), Ok(LoopType::StrictRotated));
        let err = parse_loop_type("strict_rotatd").unwrap_err();
        assert!(err.contains("Did you mean 'strict_rotated'?"));
    }

    #[test]
    fn test_cli_parses_extend() {
        let cli = Cli::parse_from([
            "beatloop", "extend", "seq.json", "--type", "rotated_swapped", "--slice", "quartered",
        ]);
        match cli.command {
            Commands::Extend { loop_type, slice, output, .. } => {
                assert_eq!(loop_type, "rotated_swapped");
                assert_eq!(slice.as_deref(), Some("quartered"));
                assert!(output.is_none());
            }
            _ => panic!("expected extend"),
        }
    }
}
