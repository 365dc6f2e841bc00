//! Validation sets: which (start, end) pairs each LOOP type can close.
//!
//! For a partial sequence from `start` to `end`, appending the LOOP's
//! transformed copies returns to `start` exactly when `end` is the image of
//! `start` under one LOOP step. The sets are built once from the position
//! tables and stored as 32x32 membership matrices.

use lazy_static::lazy_static;
use std::collections::HashMap;

use crate::models::GridPosition;
use crate::transforms::{BeatTransform, RotationDirection};

use super::types::{LoopType, SliceSize};

/// Immutable set of (start, end) position pairs.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PairSet {
    members: [[bool; GridPosition::COUNT]; GridPosition::COUNT],
}

impl Default for PairSet {
    fn default() -> Self {
        Self { members: [[false; GridPosition::COUNT]; GridPosition::COUNT] }
    }
}

impl PairSet {
    fn insert(&mut self, start: GridPosition, end: GridPosition) {
        self.members[start.ordinal()][end.ordinal()] = true;
    }

    pub fn contains(&self, start: GridPosition, end: GridPosition) -> bool {
        self.members[start.ordinal()][end.ordinal()]
    }

    pub fn len(&self) -> usize {
        self.members.iter().flatten().filter(|m| **m).count()
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    /// Valid end positions for a start, in position order.
    pub fn ends_for(&self, start: GridPosition) -> Vec<GridPosition> {
        GridPosition::ALL.into_iter().filter(|end| self.contains(start, *end)).collect()
    }

    pub fn pairs(&self) -> impl Iterator<Item = (GridPosition, GridPosition)> + '_ {
        GridPosition::ALL
            .into_iter()
            .flat_map(move |s| GridPosition::ALL.into_iter().map(move |e| (s, e)))
            .filter(move |(s, e)| self.contains(*s, *e))
    }
}

/// Directions a single LOOP step may rotate in for a slice size.
fn directions(slice: SliceSize) -> &'static [RotationDirection] {
    match slice {
        SliceSize::Halved => &[RotationDirection::Cw],
        SliceSize::Quartered => &[RotationDirection::Cw, RotationDirection::Ccw],
    }
}

fn build_set(loop_type: LoopType, slice: SliceSize) -> Option<PairSet> {
    let mut set = PairSet::default();
    for &direction in directions(slice) {
        let step = BeatTransform::for_loop(loop_type, slice, direction)?;
        for start in GridPosition::ALL {
            set.insert(start, step.position(start));
        }
    }
    Some(set)
}

/// All validation sets, keyed by LOOP type and slice size.
#[derive(Debug, Clone)]
pub struct ValidationSets {
    sets: HashMap<(LoopType, SliceSize), PairSet>,
}

impl ValidationSets {
    /// Build every set from the position tables.
    pub fn build() -> Self {
        let mut sets = HashMap::new();
        for loop_type in LoopType::ALL {
            for slice in [SliceSize::Halved, SliceSize::Quartered] {
                if let Some(set) = build_set(loop_type, slice) {
                    sets.insert((loop_type, slice), set);
                }
            }
        }
        Self { sets }
    }

    /// The set for a type at a slice size; `None` if the type cannot close at that size.
    pub fn get(&self, loop_type: LoopType, slice: SliceSize) -> Option<&PairSet> {
        self.sets.get(&(loop_type, slice))
    }

    pub fn is_valid(
        &self,
        loop_type: LoopType,
        slice: SliceSize,
        start: GridPosition,
        end: GridPosition,
    ) -> bool {
        self.get(loop_type, slice).is_some_and(|set| set.contains(start, end))
    }

    /// Required end position for a start, preferring the clockwise quarter turn.
    pub fn required_end(
        &self,
        loop_type: LoopType,
        slice: SliceSize,
        start: GridPosition,
    ) -> Option<GridPosition> {
        let step = BeatTransform::for_loop(loop_type, slice, RotationDirection::Cw)?;
        Some(step.position(start))
    }
}

lazy_static! {
    /// Process-wide sets, built on first use.
    pub static ref VALIDATION_SETS: ValidationSets = ValidationSets::build();
}

/// Shared validation sets.
pub fn validation_sets() -> &'static ValidationSets {
    &VALIDATION_SETS
}
