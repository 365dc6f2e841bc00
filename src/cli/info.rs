//! Info command implementations (types, letter, positions)

use std::process::ExitCode;

use crate::config::BeatloopConfig;
use crate::loops::{format_name_for_display, is_implemented, LoopType, SliceSize};
use crate::models::GridPosition;
use crate::transforms::{letters, GridTransform, LetterMap};
use crate::validate::suggest_name;

use super::{check_format, EXIT_ERROR, EXIT_INVALID_ARGS, EXIT_SUCCESS};

fn slice_list(slices: &[SliceSize]) -> String {
    slices.iter().map(|s| s.as_str()).collect::<Vec<_>>().join(", ")
}

/// Execute the types command
pub fn run_types(format: &str, config: &BeatloopConfig) -> ExitCode {
    if let Err(code) = check_format(format) {
        return code;
    }

    if format == "json" {
        let entries: Vec<serde_json::Value> = LoopType::all()
            .iter()
            .map(|t| {
                serde_json::json!({
                    "type": t,
                    "components": Vec::from(t.components()),
                    "slices": t.supported_slices(),
                    "implemented": is_implemented(t.components()),
                    "description": t.description(),
                })
            })
            .collect();
        match serde_json::to_string_pretty(&entries) {
            Ok(text) => println!("{}", text),
            Err(e) => {
                eprintln!("Error: {}", e);
                return ExitCode::from(EXIT_ERROR);
            }
        }
        return ExitCode::from(EXIT_SUCCESS);
    }

    println!("LOOP types:");
    for loop_type in LoopType::all() {
        let name = format_name_for_display(
            loop_type.as_str(),
            config.display.max_label_len,
            config.display.max_label_words,
        );
        println!("  {:<36} {:<22} [{}]", loop_type.as_str(), name, slice_list(loop_type.supported_slices()));
        println!("      {}", loop_type.description());
    }
    ExitCode::from(EXIT_SUCCESS)
}

/// Execute the letter command
pub fn run_letter(map: &str, letter: &str) -> ExitCode {
    let map = match map.parse::<LetterMap>() {
        Ok(m) => m,
        Err(e) => {
            eprintln!("Error: {}", e);
            eprintln!("Available maps: inverted, compound, counterpart");
            return ExitCode::from(EXIT_INVALID_ARGS);
        }
    };

    match letters::related_letter(map, letter) {
        Ok(related) => {
            println!("{}", related);
            ExitCode::from(EXIT_SUCCESS)
        }
        Err(e) => {
            eprintln!("Error: {}", e);
            if let Some(suggestion) = suggest_name(letter, letters::ALPHABET) {
                eprintln!("  Did you mean '{}'?", suggestion);
            }
            ExitCode::from(EXIT_ERROR)
        }
    }
}

/// Format one row of the position table.
fn position_row(p: GridPosition) -> String {
    let (blue, red) = p.hand_locations();
    let mut row = format!("{:<8} {:<3} {:<3}", p.name(), blue.as_str(), red.as_str());
    for transform in GridTransform::ALL {
        row.push_str(&format!(" {:<8}", transform.position(p).name()));
    }
    row
}

/// Execute the positions command
pub fn run_positions() -> ExitCode {
    let mut header = format!("{:<8} {:<3} {:<3}", "position", "b", "r");
    for transform in GridTransform::ALL {
        header.push_str(&format!(" {:<8}", transform.as_str()));
    }
    println!("{}", header.trim_end());
    for p in GridPosition::ALL {
        println!("{}", position_row(p).trim_end());
    }
    ExitCode::from(EXIT_SUCCESS)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_slice_list() {
        assert_eq!(slice_list(LoopType::StrictRotated.supported_slices()), "halved, quartered");
        assert_eq!(slice_list(LoopType::StrictMirrored.supported_slices()), "halved");
    }

    #[test]
    fn test_position_row_lists_every_transform() {
        let row = position_row(GridPosition::Alpha1);
        assert!(row.starts_with("alpha1"));
        // half turn of alpha1
        assert!(row.contains("alpha5"));
        assert_eq!(row.split_whitespace().count(), 3 + GridTransform::ALL.len());
    }
}
