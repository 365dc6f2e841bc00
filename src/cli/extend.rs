//! Analyze and extend command implementations

use std::path::Path;
use std::process::ExitCode;

use crate::config::BeatloopConfig;
use crate::extend::{analyze_sequence, ExtendOptions, Planner};
use crate::loops::format_name_for_display;
use crate::registry::ExecutorRegistry;

use super::{check_format, parse_loop_type, read_sequence, EXIT_ERROR, EXIT_INVALID_ARGS, EXIT_SUCCESS};

/// Execute the analyze command
pub fn run_analyze(input: &Path, format: &str, config: &BeatloopConfig) -> ExitCode {
    if let Err(code) = check_format(format) {
        return code;
    }

    let sequence = match read_sequence(input) {
        Ok(seq) => seq,
        Err(e) => {
            eprintln!("Error: {}", e);
            return ExitCode::from(EXIT_ERROR);
        }
    };

    let analysis = analyze_sequence(&sequence);

    if format == "json" {
        match serde_json::to_string_pretty(&analysis) {
            Ok(text) => println!("{}", text),
            Err(e) => {
                eprintln!("Error: {}", e);
                return ExitCode::from(EXIT_ERROR);
            }
        }
        return ExitCode::from(EXIT_SUCCESS);
    }

    let position = |p: Option<crate::models::GridPosition>| p.map_or("?".to_string(), |p| p.to_string());
    println!("{}: {} -> {}", input.display(), position(analysis.start), position(analysis.end));
    println!("Extension: {}", analysis.extension_type);
    if let Some(reason) = &analysis.reason {
        println!("Reason: {}", reason);
    }
    if !analysis.available_options.is_empty() {
        println!();
        println!("Available:");
        for option in &analysis.available_options {
            let name = format_name_for_display(
                option.loop_type.as_str(),
                config.display.max_label_len,
                config.display.max_label_words,
            );
            println!("  {:<36} {:<10} {}", option.loop_type.as_str(), option.slice, name);
        }
    }
    if !analysis.unavailable_options.is_empty() {
        println!();
        println!("Unavailable:");
        for option in &analysis.unavailable_options {
            println!("  {:<36} {}", option.loop_type.as_str(), option.reason);
        }
    }

    ExitCode::from(EXIT_SUCCESS)
}

/// Execute the extend command
///
/// `forced_slice` means the configured default slice came from `--slice`
/// and must be used as given.
pub fn run_extend(
    input: &Path,
    loop_type: &str,
    forced_slice: bool,
    output: Option<&Path>,
    config: &BeatloopConfig,
) -> ExitCode {
    let loop_type = match parse_loop_type(loop_type) {
        Ok(t) => t,
        Err(e) => {
            eprintln!("Error: {}", e);
            return ExitCode::from(EXIT_INVALID_ARGS);
        }
    };

    let sequence = match read_sequence(input) {
        Ok(seq) => seq,
        Err(e) => {
            eprintln!("Error: {}", e);
            return ExitCode::from(EXIT_ERROR);
        }
    };

    let options = ExtendOptions {
        slice: forced_slice.then_some(config.extend.default_slice),
        ..config.extend_options()
    };
    let planner = Planner::new(ExecutorRegistry::with_defaults(), options);
    let closed = match planner.extend(&sequence, loop_type) {
        Ok(seq) => seq,
        Err(e) => {
            eprintln!("Error: {}", e);
            return ExitCode::from(EXIT_ERROR);
        }
    };

    let text = match serde_json::to_string_pretty(&closed) {
        Ok(text) => text,
        Err(e) => {
            eprintln!("Error: {}", e);
            return ExitCode::from(EXIT_ERROR);
        }
    };

    match output {
        Some(path) => {
            if let Err(e) = std::fs::write(path, format!("{}\n", text)) {
                eprintln!("Error: Failed to write '{}': {}", path.display(), e);
                return ExitCode::from(EXIT_ERROR);
            }
            eprintln!(
                "Extended {} beats to {} with {}: {}",
                sequence.len(),
                closed.len(),
                loop_type,
                path.display()
            );
        }
        None => println!("{}", text),
    }

    ExitCode::from(EXIT_SUCCESS)
}
