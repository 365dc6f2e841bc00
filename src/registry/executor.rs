//! LOOP executors and the registry that selects them.
//!
//! An executor turns the original beats of a partial sequence into the full
//! closed sequence for one LOOP type. The planner only chooses the executor
//! and the slice size; the beat-level work happens here.

use std::collections::HashMap;
use std::fmt;

use tracing::debug;

use crate::loops::{LoopType, SliceSize};
use crate::models::Beat;
use crate::transforms::{BeatTransform, RotationDirection, TransformError};

use super::traits::Registry;

/// Generates the closing copies for one LOOP type.
///
/// Given the `n` motion beats of a partial sequence (without the start
/// pseudo-beat), returns `2n` beats for [`SliceSize::Halved`] or `4n` for
/// [`SliceSize::Quartered`]: the originals followed by transformed copies,
/// with indices renumbered and each beat starting where the previous ended.
pub trait LoopExecutor: Send + Sync {
    fn execute(&self, beats: &[Beat], slice: SliceSize) -> Result<Vec<Beat>, TransformError>;
}

/// Executor that applies a LOOP type's [`BeatTransform`] to each copy.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct TransformExecutor {
    loop_type: LoopType,
}

impl TransformExecutor {
    pub fn new(loop_type: LoopType) -> Self {
        Self { loop_type }
    }

    pub fn loop_type(&self) -> LoopType {
        self.loop_type
    }

    /// The step that carries the first start onto the last end.
    ///
    /// Quarter turns may run either way; clockwise is used when both or
    /// neither fit.
    fn step_for(&self, beats: &[Beat], slice: SliceSize) -> Result<BeatTransform, TransformError> {
        let unsupported = TransformError::UnsupportedSlice { loop_type: self.loop_type, slice };
        let cw = BeatTransform::for_loop(self.loop_type, slice, RotationDirection::Cw)
            .ok_or(unsupported.clone())?;
        if slice == SliceSize::Halved {
            return Ok(cw);
        }
        let ccw = BeatTransform::for_loop(self.loop_type, slice, RotationDirection::Ccw)
            .ok_or(unsupported)?;

        let start = beats.first().and_then(|b| b.start_position);
        let end = beats.last().and_then(|b| b.end_position);
        match (start, end) {
            (Some(s), Some(e)) if cw.position(s) != e && ccw.position(s) == e => Ok(ccw),
            _ => Ok(cw),
        }
    }
}

impl LoopExecutor for TransformExecutor {
    fn execute(&self, beats: &[Beat], slice: SliceSize) -> Result<Vec<Beat>, TransformError> {
        let step = self.step_for(beats, slice)?;
        let first_index = beats.first().map_or(1, |b| b.index);

        let mut out: Vec<Beat> = Vec::with_capacity(beats.len() * slice.multiplier());
        out.extend(beats.iter().cloned());
        let mut previous: Vec<Beat> = beats.to_vec();
        for _ in 1..slice.multiplier() {
            let copy = previous.iter().map(|b| step.apply(b)).collect::<Result<Vec<_>, _>>()?;
            out.extend(copy.iter().cloned());
            previous = copy;
        }
        for (offset, beat) in out.iter_mut().enumerate() {
            beat.index = first_index + offset;
        }

        debug!(
            loop_type = %self.loop_type,
            %slice,
            original = beats.len(),
            total = out.len(),
            "executed LOOP"
        );
        Ok(out)
    }
}

/// Executors keyed by LOOP type.
#[derive(Default)]
pub struct ExecutorRegistry {
    executors: HashMap<LoopType, Box<dyn LoopExecutor>>,
}

impl fmt::Debug for ExecutorRegistry {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let mut keys: Vec<&LoopType> = self.executors.keys().collect();
        keys.sort();
        f.debug_struct("ExecutorRegistry").field("loop_types", &keys).finish()
    }
}

impl ExecutorRegistry {
    /// Create a new empty registry.
    pub fn new() -> Self {
        Self { executors: HashMap::new() }
    }

    /// Registry with a [`TransformExecutor`] for every component LOOP type.
    pub fn with_defaults() -> Self {
        let mut registry = Self::new();
        for loop_type in LoopType::ALL {
            if loop_type != LoopType::Rewound {
                registry.register(loop_type, TransformExecutor::new(loop_type));
            }
        }
        registry
    }

    /// Register an executor, replacing any previous one for the type.
    pub fn register(&mut self, loop_type: LoopType, executor: impl LoopExecutor + 'static) {
        self.executors.insert(loop_type, Box::new(executor));
    }
}

impl Registry<LoopType, dyn LoopExecutor> for ExecutorRegistry {
    fn contains(&self, key: &LoopType) -> bool {
        self.executors.contains_key(key)
    }

    fn get(&self, key: &LoopType) -> Option<&(dyn LoopExecutor + 'static)> {
        self.executors.get(key).map(|e| e.as_ref())
    }

    fn len(&self) -> usize {
        self.executors.len()
    }

    fn clear(&mut self) {
        self.executors.clear();
    }

    fn keys(&self) -> Box<dyn Iterator<Item = &LoopType> + '_> {
        Box::new(self.executors.keys())
    }
}
