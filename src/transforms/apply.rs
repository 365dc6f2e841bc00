//! Beat-wise application of LOOP transforms
//!
//! A [`BeatTransform`] is one step of a LOOP: the map that turns a beat of
//! one slice into the matching beat of the next slice. The same value drives
//! generation (executors apply it to build new beats) and detection
//! (predicates compare an existing beat against the transformed one), so the
//! two can never disagree.
//!
//! Composition is left to right as written: rotate, then reflect, then swap
//! hands. Inversion touches motion types and letters only.

use crate::loops::{ComponentSet, LoopComponent, LoopType, SliceSize};
use crate::models::{Beat, GridLocation, GridPosition, MotionEndpoint, Motions};

use super::letters::inverted_letter;
use super::location::{
    horizontal_mirror_location, rotate_location_ccw, rotate_location_cw, rotate_location_half,
    vertical_mirror_location,
};
use super::position::{
    half_rotate, horizontal_mirror_position, quarter_rotate_ccw, quarter_rotate_cw,
    swapped_position, vertical_mirror_position,
};
use super::types::TransformError;

/// Rotation applied by one LOOP step.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub enum Rotation {
    #[default]
    None,
    Cw,
    Ccw,
    Half,
}

/// Direction of a quarter-turn LOOP.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, serde::Serialize)]
#[serde(rename_all = "lowercase")]
pub enum RotationDirection {
    #[default]
    Cw,
    Ccw,
}

impl RotationDirection {
    pub fn rotation(self) -> Rotation {
        match self {
            RotationDirection::Cw => Rotation::Cw,
            RotationDirection::Ccw => Rotation::Ccw,
        }
    }
}

/// Reflection applied by one LOOP step.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub enum Reflection {
    #[default]
    None,
    /// Across the north-south axis (the MIRRORED component).
    Vertical,
    /// Across the east-west axis.
    Horizontal,
}

/// One LOOP step over beats.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub struct BeatTransform {
    pub rotation: Rotation,
    pub reflection: Reflection,
    pub swapped: bool,
    pub inverted: bool,
}

impl BeatTransform {
    /// The identity step.
    pub fn identity() -> Self {
        Self::default()
    }

    pub fn rotated(rotation: Rotation) -> Self {
        Self { rotation, ..Self::default() }
    }

    pub fn with_reflection(mut self, reflection: Reflection) -> Self {
        self.reflection = reflection;
        self
    }

    pub fn with_swap(mut self) -> Self {
        self.swapped = true;
        self
    }

    pub fn with_inversion(mut self) -> Self {
        self.inverted = true;
        self
    }

    /// Step for a component set at a given slice size.
    ///
    /// ROTATED becomes a half turn for [`SliceSize::Halved`] and a quarter
    /// turn in `direction` for [`SliceSize::Quartered`].
    pub fn from_components(
        components: ComponentSet,
        slice: SliceSize,
        direction: RotationDirection,
    ) -> Self {
        let rotation = if !components.contains(LoopComponent::Rotated) {
            Rotation::None
        } else {
            match slice {
                SliceSize::Halved => Rotation::Half,
                SliceSize::Quartered => direction.rotation(),
            }
        };
        let reflection = if components.contains(LoopComponent::Mirrored) {
            Reflection::Vertical
        } else {
            Reflection::None
        };
        Self {
            rotation,
            reflection,
            swapped: components.contains(LoopComponent::Swapped),
            inverted: components.contains(LoopComponent::Inverted),
        }
    }

    /// Step for a catalogue LOOP type.
    ///
    /// Returns `None` for REWOUND and for slice sizes the type does not support.
    pub fn for_loop(
        loop_type: LoopType,
        slice: SliceSize,
        direction: RotationDirection,
    ) -> Option<Self> {
        if !loop_type.supports(slice) {
            return None;
        }
        Some(Self::from_components(loop_type.components(), slice, direction))
    }

    /// Map a position.
    pub fn position(&self, p: GridPosition) -> GridPosition {
        let p = match self.rotation {
            Rotation::None => p,
            Rotation::Cw => quarter_rotate_cw(p),
            Rotation::Ccw => quarter_rotate_ccw(p),
            Rotation::Half => half_rotate(p),
        };
        let p = match self.reflection {
            Reflection::None => p,
            Reflection::Vertical => vertical_mirror_position(p),
            Reflection::Horizontal => horizontal_mirror_position(p),
        };
        if self.swapped {
            swapped_position(p)
        } else {
            p
        }
    }

    /// Map a single hand location (swapping does not move a location).
    pub fn location(&self, l: GridLocation) -> GridLocation {
        let l = match self.rotation {
            Rotation::None => l,
            Rotation::Cw => rotate_location_cw(l),
            Rotation::Ccw => rotate_location_ccw(l),
            Rotation::Half => rotate_location_half(l),
        };
        match self.reflection {
            Reflection::None => l,
            Reflection::Vertical => vertical_mirror_location(l),
            Reflection::Horizontal => horizontal_mirror_location(l),
        }
    }

    fn motion(&self, m: &MotionEndpoint) -> MotionEndpoint {
        let reflect = self.reflection != Reflection::None;
        let orient = |o: crate::models::Orientation| if reflect { o.mirrored() } else { o };
        MotionEndpoint {
            start_location: self.location(m.start_location),
            end_location: self.location(m.end_location),
            start_orientation: orient(m.start_orientation),
            end_orientation: orient(m.end_orientation),
            motion_type: if self.inverted { m.motion_type.inverted() } else { m.motion_type },
        }
    }

    /// Transform a beat, keeping its index.
    pub fn apply(&self, beat: &Beat) -> Result<Beat, TransformError> {
        let start = beat
            .start_position
            .ok_or(TransformError::MissingPosition { index: beat.index, field: "start position" })?;
        let end = beat
            .end_position
            .ok_or(TransformError::MissingPosition { index: beat.index, field: "end position" })?;

        let blue = self.motion(&beat.motions.blue);
        let red = self.motion(&beat.motions.red);
        let motions = if self.swapped { Motions { blue: red, red: blue } } else { Motions { blue, red } };

        let letter = match (&beat.letter, self.inverted) {
            (Some(letter), true) => Some(inverted_letter(letter)?.to_string()),
            (letter, _) => letter.clone(),
        };

        Ok(Beat {
            index: beat.index,
            letter,
            start_position: Some(self.position(start)),
            end_position: Some(self.position(end)),
            motions,
        })
    }

    /// Whether `second` is what this step makes of `first`.
    ///
    /// Compares positions, motion types and hand locations; orientations and
    /// letters are not part of the match.
    pub fn matches(&self, first: &Beat, second: &Beat) -> bool {
        let Ok(expected) = self.apply_positions_only(first) else {
            return false;
        };
        expected.start_position == second.start_position
            && expected.end_position == second.end_position
            && same_motion(&expected.motions.blue, &second.motions.blue)
            && same_motion(&expected.motions.red, &second.motions.red)
    }

    // Like `apply`, but never consults the letter tables.
    fn apply_positions_only(&self, beat: &Beat) -> Result<Beat, TransformError> {
        let unlettered = Beat { letter: None, ..beat.clone() };
        self.apply(&unlettered)
    }
}

fn same_motion(a: &MotionEndpoint, b: &MotionEndpoint) -> bool {
    a.motion_type == b.motion_type
        && a.start_location == b.start_location
        && a.end_location == b.end_location
}
