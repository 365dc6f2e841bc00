//! Detect command implementation

use std::path::PathBuf;
use std::process::ExitCode;

use rayon::prelude::*;

use crate::config::BeatloopConfig;
use crate::detect::{DetectionResult, Detector};
use crate::loops::format_name_for_display;

use super::{check_format, collect_inputs, read_sequence, EXIT_ERROR, EXIT_INVALID_ARGS, EXIT_SUCCESS};

/// Detection outcome for one file.
struct FileReport {
    path: PathBuf,
    result: Result<DetectionResult, String>,
}

fn describe(result: &DetectionResult, config: &BeatloopConfig) -> String {
    if !result.is_loop() {
        return result.reason.clone().unwrap_or_else(|| "no structured LOOP detected".to_string());
    }
    let labels: Vec<&str> = result.labels.iter().map(|l| l.as_str()).collect();
    let mut line = labels.join(", ");
    if let Some(slice) = result.slice {
        line.push_str(&format!(" [{}", slice));
        if let Some(direction) = result.direction {
            line.push_str(&format!(", {:?}", direction).to_lowercase());
        }
        line.push(']');
    }
    if let Some(loop_type) = result.loop_type {
        line.push_str(&format!(
            " -> {}",
            format_name_for_display(
                loop_type.as_str(),
                config.display.max_label_len,
                config.display.max_label_words
            )
        ));
    }
    line
}

/// Execute the detect command
///
/// Files are read and classified in parallel; the report keeps input order.
pub fn run_detect(inputs: &[PathBuf], format: &str, config: &BeatloopConfig) -> ExitCode {
    if let Err(code) = check_format(format) {
        return code;
    }

    let files = collect_inputs(inputs);
    if files.is_empty() {
        eprintln!("Error: No sequence files found");
        return ExitCode::from(EXIT_INVALID_ARGS);
    }

    let detector = Detector::new(config.detect_options());
    let reports: Vec<FileReport> = files
        .par_iter()
        .map(|path| FileReport {
            path: path.clone(),
            result: read_sequence(path).map(|seq| detector.detect(&seq)),
        })
        .collect();

    let failed = reports.iter().filter(|r| r.result.is_err()).count();

    if format == "json" {
        let entries: Vec<serde_json::Value> = reports
            .iter()
            .map(|r| match &r.result {
                Ok(result) => serde_json::json!({
                    "file": r.path.display().to_string(),
                    "result": result,
                }),
                Err(e) => serde_json::json!({
                    "file": r.path.display().to_string(),
                    "error": e,
                }),
            })
            .collect();
        match serde_json::to_string_pretty(&entries) {
            Ok(text) => println!("{}", text),
            Err(e) => {
                eprintln!("Error: {}", e);
                return ExitCode::from(EXIT_ERROR);
            }
        }
    } else {
        for report in &reports {
            match &report.result {
                Ok(result) => println!("{}: {}", report.path.display(), describe(result, config)),
                Err(e) => eprintln!("Error: {}", e),
            }
        }
    }

    if failed > 0 {
        ExitCode::from(EXIT_ERROR)
    } else {
        ExitCode::from(EXIT_SUCCESS)
    }
}
