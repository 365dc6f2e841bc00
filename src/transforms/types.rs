//! Core transform types and error definitions
//!
//! Contains the [`GridTransform`] enum naming every table-driven map over
//! positions and locations, the [`LetterMap`] enum naming the letter
//! relationships, and [`TransformError`] for lookups that fall outside a table.

use std::fmt;
use std::str::FromStr;

use crate::loops::{LoopType, SliceSize};
use crate::models::{GridLocation, GridPosition};

use super::{location, position};

/// Errors that can occur during a table lookup
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
#[non_exhaustive]
pub enum TransformError {
    /// Letter is not part of the given relationship table
    #[error("no {map} mapping for letter '{letter}'")]
    MissingMapping { map: LetterMap, letter: String },

    /// Unknown letter map name
    #[error("unknown letter map: {0}")]
    UnknownMap(String),

    /// Unknown grid transform name
    #[error("unknown grid transform: {0}")]
    UnknownTransform(String),

    /// Beat lacks the position data a transform needs
    #[error("beat {index} has no {field}")]
    MissingPosition { index: usize, field: &'static str },

    /// LOOP type has no step at this slice size
    #[error("{loop_type} cannot repeat {slice}")]
    UnsupportedSlice { loop_type: LoopType, slice: SliceSize },
}

/// The letter-relationship tables.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum LetterMap {
    /// Pro and anti motions exchanged.
    Inverted,
    /// Inversion combined with the alpha/beta counterpart.
    Compound,
    /// Same motions, alpha and beta positions exchanged.
    Counterpart,
}

impl LetterMap {
    pub const ALL: [LetterMap; 3] = [LetterMap::Inverted, LetterMap::Compound, LetterMap::Counterpart];

    pub fn as_str(&self) -> &'static str {
        match self {
            LetterMap::Inverted => "inverted",
            LetterMap::Compound => "compound",
            LetterMap::Counterpart => "counterpart",
        }
    }
}

impl fmt::Display for LetterMap {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

impl FromStr for LetterMap {
    type Err = TransformError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "inverted" | "invert" => Ok(LetterMap::Inverted),
            "compound" => Ok(LetterMap::Compound),
            "counterpart" | "alpha-beta" | "alpha_beta" => Ok(LetterMap::Counterpart),
            _ => Err(TransformError::UnknownMap(s.to_string())),
        }
    }
}

/// A single table-driven grid transform.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum GridTransform {
    // Reflections
    MirrorVertical,
    MirrorHorizontal,

    // Hands
    Swap,

    // Rotations
    RotateCw,
    RotateCcw,
    RotateHalf,
}

impl GridTransform {
    pub const ALL: [GridTransform; 6] = [
        GridTransform::MirrorVertical,
        GridTransform::MirrorHorizontal,
        GridTransform::Swap,
        GridTransform::RotateCw,
        GridTransform::RotateCcw,
        GridTransform::RotateHalf,
    ];

    pub fn as_str(&self) -> &'static str {
        match self {
            GridTransform::MirrorVertical => "mirror-v",
            GridTransform::MirrorHorizontal => "mirror-h",
            GridTransform::Swap => "swap",
            GridTransform::RotateCw => "rotate:90",
            GridTransform::RotateCcw => "rotate:270",
            GridTransform::RotateHalf => "rotate:180",
        }
    }

    /// Apply to a position.
    pub fn position(&self, p: GridPosition) -> GridPosition {
        match self {
            GridTransform::MirrorVertical => position::vertical_mirror_position(p),
            GridTransform::MirrorHorizontal => position::horizontal_mirror_position(p),
            GridTransform::Swap => position::swapped_position(p),
            GridTransform::RotateCw => position::quarter_rotate_cw(p),
            GridTransform::RotateCcw => position::quarter_rotate_ccw(p),
            GridTransform::RotateHalf => position::half_rotate(p),
        }
    }

    /// Apply to a single hand location. Swapping hands leaves a location in place.
    pub fn location(&self, l: GridLocation) -> GridLocation {
        match self {
            GridTransform::MirrorVertical => location::vertical_mirror_location(l),
            GridTransform::MirrorHorizontal => location::horizontal_mirror_location(l),
            GridTransform::Swap => l,
            GridTransform::RotateCw => location::rotate_location_cw(l),
            GridTransform::RotateCcw => location::rotate_location_ccw(l),
            GridTransform::RotateHalf => location::rotate_location_half(l),
        }
    }
}

impl fmt::Display for GridTransform {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

impl FromStr for GridTransform {
    type Err = TransformError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "mirror-v" | "mirror" | "vertical" => Ok(GridTransform::MirrorVertical),
            "mirror-h" | "flip" | "horizontal" => Ok(GridTransform::MirrorHorizontal),
            "swap" => Ok(GridTransform::Swap),
            "rotate:90" | "cw" => Ok(GridTransform::RotateCw),
            "rotate:270" | "ccw" => Ok(GridTransform::RotateCcw),
            "rotate:180" | "half" => Ok(GridTransform::RotateHalf),
            _ => Err(TransformError::UnknownTransform(s.to_string())),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_grid_transform_names_round_trip() {
        for t in GridTransform::ALL {
            assert_eq!(t.as_str().parse::<GridTransform>(), Ok(t));
        }
        assert!(matches!(
            "skew".parse::<GridTransform>(),
            Err(TransformError::UnknownTransform(_))
        ));
    }

    #[test]
    fn test_letter_map_parse() {
        assert_eq!("Inverted".parse::<LetterMap>(), Ok(LetterMap::Inverted));
        assert_eq!("alpha-beta".parse::<LetterMap>(), Ok(LetterMap::Counterpart));
        assert!("reverse".parse::<LetterMap>().is_err());
    }

    #[test]
    fn test_swap_keeps_locations() {
        for l in GridLocation::ALL {
            assert_eq!(GridTransform::Swap.location(l), l);
        }
    }

    #[test]
    fn test_missing_mapping_message() {
        let err = TransformError::MissingMapping { map: LetterMap::Inverted, letter: "?".into() };
        assert_eq!(err.to_string(), "no inverted mapping for letter '?'");
    }

}
